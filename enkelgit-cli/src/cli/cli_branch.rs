use super::Cmd;
use anyhow::Result;
use enkelgit::cmd::branch::{self, BranchOutcome};
use enkelgit::Repository;

#[derive(clap::Args, Debug)]
pub struct BranchArgs {
    name: Option<String>,
}

impl Cmd for BranchArgs {
    fn exec(self, repo: &mut Repository) -> Result<()> {
        match branch::run(repo, self.name.as_deref())? {
            BranchOutcome::Listed(heads) => {
                let current = repo.refs().head_branch_name()?;
                for (name, oid) in heads {
                    let marker = if current.as_deref() == Some(name.as_str()) { "* " } else { "  " };
                    println!("{}{} {:#}", marker, name, oid);
                }
            }
            BranchOutcome::Created { name, target } => println!("created branch `{}` at {:#}", name, target),
        }
        Ok(())
    }
}
