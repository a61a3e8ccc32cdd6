//! `passkeeper show` — print one record in full.

use std::path::Path;

use crate::cli::output;
use crate::cli::{prompt_password, vault_path, Cli};
use crate::errors::{PassKeeperError, Result};
use crate::vault::{Record, VaultStore};

/// Execute the `show` command.
pub fn execute(cli: &Cli, index: usize) -> Result<()> {
    let path = vault_path(cli)?;
    let password = prompt_password()?;
    let record = run(&path, &password, index)?;
    output::print_record(index, &record);
    Ok(())
}

/// Open the vault and return record `index`.
pub fn run(path: &Path, passphrase: &str, index: usize) -> Result<Record> {
    let (_, mut vault) = VaultStore::open(path, passphrase)?;
    vault
        .remove(index)
        .ok_or(PassKeeperError::RecordNotFound(index))
}
