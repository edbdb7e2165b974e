//! core engine for enkelgit: object store, refs, index, diff, merge, and the repository
//! façade that ties them together. `enkelgit-cli` is a thin presentation layer over
//! this crate.

pub mod checkout;
pub mod cmd;
pub mod config;
pub mod diff;
pub mod error;
pub mod hash;
pub mod index;
pub mod lockfile;
pub mod merge;
pub mod obj;
pub mod odb;
pub mod pathtree;
pub mod refs;
pub mod repo;
pub mod time;

pub use error::{EnkelError, EnkelErrorKind, Result};
pub use hash::ObjectId;
pub use repo::Repository;
