use super::Cmd;
use anyhow::Result;
use enkelgit::cmd::status;
use enkelgit::diff::Status;
use enkelgit::Repository;
use owo_colors::OwoColorize;

#[derive(clap::Args, Debug)]
pub struct StatusArgs {}

impl Cmd for StatusArgs {
    fn exec(self, repo: &mut Repository) -> Result<()> {
        let report = status::run(repo)?;

        match (&report.branch, report.detached) {
            (Some(branch), false) => println!("On branch {}", branch),
            _ => println!("HEAD detached"),
        }

        if !report.conflicted.is_empty() {
            println!("\nUnmerged paths:");
            for path in &report.conflicted {
                println!("  {}", format!("both modified: {}", path.display()).magenta());
            }
        }

        if !report.staged.is_empty() {
            println!("\nChanges to be committed:");
            for (path, status) in &report.staged {
                println!("  {}", describe(*status, path.display().to_string()).green());
            }
        }

        if !report.unstaged.is_empty() {
            println!("\nChanges not staged for commit:");
            for (path, status) in &report.unstaged {
                println!("  {}", describe(*status, path.display().to_string()).red());
            }
        }

        if report.conflicted.is_empty() && report.staged.is_empty() && report.unstaged.is_empty() {
            println!("nothing to commit, working directory clean");
        }

        Ok(())
    }
}

fn describe(status: Status, path: String) -> String {
    match status {
        Status::Add => format!("new file:   {}", path),
        Status::Modify => format!("modified:   {}", path),
        Status::Delete => format!("deleted:    {}", path),
        Status::Conflict => format!("both modified: {}", path),
        Status::Same => path,
    }
}
