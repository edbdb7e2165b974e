//! `remote add <name> <path>`.

use crate::error::Result;
use crate::refs;
use crate::repo::Repository;
use anyhow::ensure;

pub fn add(repo: &mut Repository, name: &str, url: &str) -> Result<()> {
    ensure!(refs::is_valid_name(name), "invalid remote name `{}`", name);
    repo.config_mut().set_remote_url(name, url);
    repo.write_config()?;
    log::info!("added remote `{}` -> `{}`", name, url);
    Ok(())
}
