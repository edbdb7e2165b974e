use super::Cmd;
use anyhow::Result;
use enkelgit::cmd::checkout;
use enkelgit::Repository;

#[derive(clap::Args, Debug)]
pub struct CheckoutArgs {
    rev: String,
}

impl Cmd for CheckoutArgs {
    fn exec(self, repo: &mut Repository) -> Result<()> {
        checkout::run(repo, &self.rev)?;
        println!("switched to `{}`", self.rev);
        Ok(())
    }
}
