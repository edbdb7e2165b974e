use super::Cmd;
use anyhow::Result;
use enkelgit::cmd::merge::{self, MergeOutcome};
use enkelgit::Repository;

#[derive(clap::Args, Debug)]
pub struct MergeArgs {
    rev: String,
}

impl Cmd for MergeArgs {
    fn exec(self, repo: &mut Repository) -> Result<()> {
        print_outcome(merge::run(repo, &self.rev)?);
        Ok(())
    }
}

pub(super) fn print_outcome(outcome: MergeOutcome) {
    match outcome {
        MergeOutcome::AlreadyUpToDate => println!("Already up to date."),
        MergeOutcome::FastForward(oid) => println!("Fast-forward to {:#}", oid),
        MergeOutcome::Initiated { conflicts } if conflicts.is_empty() => {
            println!("Merge made, ready to commit.")
        }
        MergeOutcome::Initiated { conflicts } => {
            println!("Automatic merge failed; fix conflicts and then commit the result.");
            for path in conflicts {
                println!("  both modified: {}", path.display());
            }
        }
    }
}
