pub type Result<T> = std::result::Result<T, EnkelError>;
pub type EnkelError = anyhow::Error;

/// most call sites just propagate `anyhow::Error` with `.context(..)`, but a few callers
/// need to match on *why* an operation failed (e.g. the cli decides exit codes, `status`
/// decides how to render a conflict). Wrap those cases in `EnkelErrorKind` and attach
/// with `.context`.
#[derive(Debug, thiserror::Error)]
#[cfg_attr(test, derive(PartialEq))]
pub enum EnkelErrorKind {
    #[error("not a repository (or any parent up to mount point)")]
    NotARepository,
    #[error("this operation must be run in a working copy, not a bare repository")]
    BareRepository,
    #[error("refusing to run: this operation requires a bare repository")]
    NotBareRepository,
    #[error("object `{0}` not found")]
    ObjectNotFound(String),
    #[error("unknown ref `{0}`")]
    UnknownRef(String),
    #[error("ref `{0}` does not point to a commit")]
    RefNotACommit(String),
    #[error("nothing to commit, working directory clean")]
    NothingToCommit,
    #[error("cannot commit: unresolved conflicts remain")]
    UnresolvedConflicts,
    #[error("your local changes would be overwritten: {0:?}")]
    WouldOverwrite(Vec<std::path::PathBuf>),
    #[error("branch `{0}` already exists")]
    BranchExists(String),
    #[error("refusing to push to the checked-out branch `{0}`")]
    PushToCheckedOut(String),
    #[error("updates were rejected (non-fast-forward); use -f to force")]
    NonFastForwardPush,
    #[error("no files matched `{0}`")]
    NoFilesMatched(String),
    #[error("`{0}` is a directory; use -r to remove recursively")]
    IsADirectory(String),
    #[error("`{0}` has uncommitted changes; use -f to remove anyway")]
    ChangedFileRemoval(String),
    #[error("remote `{0}` is not configured")]
    UnknownRemote(String),
    #[error("remote branch `{0}` not found")]
    UnknownRemoteBranch(String),
    #[error("`{0}` is not a repository")]
    SourceNotARepository(String),
    #[error("unsupported operation: {0}")]
    Unsupported(String),
}
