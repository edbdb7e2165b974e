use super::Cmd;
use anyhow::Result;
use enkelgit::cmd::rm;
use enkelgit::Repository;
use std::path::PathBuf;

#[derive(clap::Args, Debug)]
pub struct RmArgs {
    path: PathBuf,
    #[arg(short = 'r', long)]
    recursive: bool,
    #[arg(short = 'f', long)]
    force: bool,
}

impl Cmd for RmArgs {
    fn exec(self, repo: &mut Repository) -> Result<()> {
        let removed = rm::run(repo, &self.path, self.recursive, self.force)?;
        for path in removed {
            println!("rm `{}`", path.display());
        }
        Ok(())
    }
}
