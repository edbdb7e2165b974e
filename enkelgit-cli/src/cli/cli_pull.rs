use super::cli_merge::print_outcome;
use super::Cmd;
use anyhow::Result;
use enkelgit::cmd::pull;
use enkelgit::Repository;

#[derive(clap::Args, Debug)]
pub struct PullArgs {
    remote: String,
    branch: String,
}

impl Cmd for PullArgs {
    fn exec(self, repo: &mut Repository) -> Result<()> {
        print_outcome(pull::run(repo, &self.remote, &self.branch)?);
        Ok(())
    }
}
