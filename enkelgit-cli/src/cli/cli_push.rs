use super::Cmd;
use anyhow::Result;
use enkelgit::cmd::push;
use enkelgit::Repository;

#[derive(clap::Args, Debug)]
pub struct PushArgs {
    remote: String,
    branch: String,
    #[arg(short = 'f', long)]
    force: bool,
}

impl Cmd for PushArgs {
    fn exec(self, repo: &mut Repository) -> Result<()> {
        push::run(repo, &self.remote, &self.branch, self.force)?;
        println!("pushed `{}` to `{}`", self.branch, self.remote);
        Ok(())
    }
}
