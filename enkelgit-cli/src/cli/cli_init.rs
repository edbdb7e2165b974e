use anyhow::Result;
use enkelgit::cmd::init;
use std::path::PathBuf;

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    #[arg(default_value = ".")]
    path: PathBuf,
    #[arg(long)]
    bare: bool,
}

impl InitArgs {
    pub fn exec_standalone(self) -> Result<()> {
        let repo = init::run(&self.path, self.bare)?;
        println!(
            "initialized {}repository in `{}`",
            if self.bare { "bare " } else { "" },
            repo.worktree().display()
        );
        Ok(())
    }
}
