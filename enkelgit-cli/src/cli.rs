//! argument parsing and terminal presentation. Every variant here is a thin `clap`
//! translation that discovers (or creates) a `Repository` and delegates straight into
//! `enkelgit::cmd`.
//!
//! One file per subcommand implementing a shared `Cmd` trait, dispatched from a single
//! top-level enum.

mod cli_add;
mod cli_branch;
mod cli_checkout;
mod cli_clone;
mod cli_commit;
mod cli_diff;
mod cli_fetch;
mod cli_init;
mod cli_merge;
mod cli_pull;
mod cli_push;
mod cli_remote;
mod cli_rm;
mod cli_status;

use anyhow::Result;
use clap::Parser;
use enkelgit::Repository;
use std::ffi::OsString;

pub trait Cmd {
    fn exec(self, repo: &mut Repository) -> Result<()>;
}

#[derive(Parser, Debug)]
#[command(name = "enkelgit", author, version, about = "a minimal distributed version-control engine")]
struct Opts {
    #[command(subcommand)]
    subcmd: SubCmd,
}

#[derive(clap::Subcommand, Debug)]
enum SubCmd {
    Init(cli_init::InitArgs),
    Add(cli_add::AddArgs),
    Rm(cli_rm::RmArgs),
    Commit(cli_commit::CommitArgs),
    Branch(cli_branch::BranchArgs),
    Checkout(cli_checkout::CheckoutArgs),
    Diff(cli_diff::DiffArgs),
    Remote(cli_remote::RemoteArgs),
    Fetch(cli_fetch::FetchArgs),
    Merge(cli_merge::MergeArgs),
    Pull(cli_pull::PullArgs),
    Push(cli_push::PushArgs),
    Clone(cli_clone::CloneArgs),
    Status(cli_status::StatusArgs),
}

pub fn run<T: Into<OsString> + Clone>(args: impl IntoIterator<Item = T>) -> Result<()> {
    let opts = Opts::parse_from(args);

    // `init` and `clone` are the only commands that run without an existing repository
    // to discover.
    match opts.subcmd {
        SubCmd::Init(args) => return args.exec_standalone(),
        SubCmd::Clone(args) => return args.exec_standalone(),
        _ => {}
    }

    let mut repo = Repository::discover(".")?;
    match opts.subcmd {
        SubCmd::Init(..) | SubCmd::Clone(..) => unreachable!(),
        SubCmd::Add(args) => args.exec(&mut repo),
        SubCmd::Rm(args) => args.exec(&mut repo),
        SubCmd::Commit(args) => args.exec(&mut repo),
        SubCmd::Branch(args) => args.exec(&mut repo),
        SubCmd::Checkout(args) => args.exec(&mut repo),
        SubCmd::Diff(args) => args.exec(&mut repo),
        SubCmd::Remote(args) => args.exec(&mut repo),
        SubCmd::Fetch(args) => args.exec(&mut repo),
        SubCmd::Merge(args) => args.exec(&mut repo),
        SubCmd::Pull(args) => args.exec(&mut repo),
        SubCmd::Push(args) => args.exec(&mut repo),
        SubCmd::Status(args) => args.exec(&mut repo),
    }
}
