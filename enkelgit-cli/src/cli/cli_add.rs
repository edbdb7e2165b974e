use super::Cmd;
use anyhow::Result;
use enkelgit::cmd::add;
use enkelgit::Repository;
use std::path::PathBuf;

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    #[arg(required = true)]
    paths: Vec<PathBuf>,
}

impl Cmd for AddArgs {
    fn exec(self, repo: &mut Repository) -> Result<()> {
        let staged = add::run(repo, &self.paths)?;
        for path in staged {
            println!("add `{}`", path.display());
        }
        Ok(())
    }
}
