use super::Cmd;
use anyhow::Result;
use enkelgit::cmd::commit;
use enkelgit::Repository;

#[derive(clap::Args, Debug)]
pub struct CommitArgs {
    #[arg(short = 'm', long)]
    message: Option<String>,
}

impl Cmd for CommitArgs {
    fn exec(self, repo: &mut Repository) -> Result<()> {
        let oid = commit::run(repo, self.message)?;
        println!("committed {:#}", oid);
        Ok(())
    }
}
