use anyhow::Result;
use enkelgit::cmd::clone;
use std::path::PathBuf;

#[derive(clap::Args, Debug)]
pub struct CloneArgs {
    src: PathBuf,
    dst: PathBuf,
    #[arg(long)]
    bare: bool,
}

impl CloneArgs {
    pub fn exec_standalone(self) -> Result<()> {
        let repo = clone::run(&self.src, &self.dst, self.bare)?;
        println!("cloned into `{}`", repo.worktree().display());
        Ok(())
    }
}
