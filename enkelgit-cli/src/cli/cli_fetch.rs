use super::Cmd;
use anyhow::Result;
use enkelgit::cmd::fetch;
use enkelgit::Repository;

#[derive(clap::Args, Debug)]
pub struct FetchArgs {
    remote: String,
    branch: String,
}

impl Cmd for FetchArgs {
    fn exec(self, repo: &mut Repository) -> Result<()> {
        let oid = fetch::run(repo, &self.remote, &self.branch)?;
        println!("fetched `{}` from `{}` at {:#}", self.branch, self.remote, oid);
        Ok(())
    }
}
