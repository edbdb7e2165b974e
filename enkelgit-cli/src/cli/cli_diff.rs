use super::Cmd;
use anyhow::Result;
use enkelgit::cmd::diff;
use enkelgit::diff::Status;
use enkelgit::Repository;
use owo_colors::OwoColorize;

#[derive(clap::Args, Debug)]
pub struct DiffArgs {
    rev1: Option<String>,
    rev2: Option<String>,
}

impl Cmd for DiffArgs {
    fn exec(self, repo: &mut Repository) -> Result<()> {
        let diff = diff::run(repo, self.rev1.as_deref(), self.rev2.as_deref())?;
        for (path, entry) in &diff {
            let line = format!("{:?} {}", entry.status, path.display());
            match entry.status {
                Status::Add => println!("{}", line.green()),
                Status::Modify => println!("{}", line.yellow()),
                Status::Delete => println!("{}", line.red()),
                Status::Conflict => println!("{}", line.magenta()),
                Status::Same => {}
            }
        }
        Ok(())
    }
}
