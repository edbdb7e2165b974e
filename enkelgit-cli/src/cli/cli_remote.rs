use super::Cmd;
use anyhow::Result;
use enkelgit::cmd::remote;
use enkelgit::Repository;

#[derive(clap::Args, Debug)]
pub struct RemoteArgs {
    #[command(subcommand)]
    subcmd: RemoteSubCmd,
}

#[derive(clap::Subcommand, Debug)]
enum RemoteSubCmd {
    Add { name: String, path: String },
}

impl Cmd for RemoteArgs {
    fn exec(self, repo: &mut Repository) -> Result<()> {
        match self.subcmd {
            RemoteSubCmd::Add { name, path } => remote::add(repo, &name, &path),
        }
    }
}
