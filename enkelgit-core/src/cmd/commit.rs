//! `commit -m <msg>`.

use crate::error::Result;
use crate::hash::ObjectId;
use crate::repo::Repository;

pub fn run(repo: &Repository, message: Option<String>) -> Result<ObjectId> {
    let oid = repo.commit(message)?;
    log::info!("committed {:#}", oid);
    Ok(oid)
}
