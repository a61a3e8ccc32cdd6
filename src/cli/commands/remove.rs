//! `passkeeper remove` — delete a record from the vault.

use std::path::Path;

use crate::cli::output;
use crate::cli::{confirm, prompt_password, vault_path, Cli};
use crate::errors::{PassKeeperError, Result};
use crate::vault::VaultStore;

/// Execute the `remove` command.
pub fn execute(cli: &Cli, index: usize, force: bool) -> Result<()> {
    let path = vault_path(cli)?;
    let password = prompt_password()?;

    // Unless --force is set, ask for confirmation before deleting.
    let removed = run(&path, &password, index, |name| {
        Ok(force || confirm(&format!("Delete record \"{name}\"?"))?)
    })?;

    match removed {
        Some(name) => output::success(&format!("Deleted \"{name}\"")),
        None => output::info("Cancelled."),
    }
    Ok(())
}

/// Open the vault, ask `confirm` with the record's display name and,
/// if it agrees, delete the record and save.
///
/// Returns the deleted record's name, or `None` when cancelled.
pub fn run<F>(path: &Path, passphrase: &str, index: usize, confirm: F) -> Result<Option<String>>
where
    F: FnOnce(&str) -> Result<bool>,
{
    let (store, mut vault) = VaultStore::open(path, passphrase)?;

    let name = vault
        .get(index)
        .map(|r| r.display_name())
        .ok_or(PassKeeperError::RecordNotFound(index))?;

    if !confirm(&name)? {
        return Ok(None);
    }

    vault.remove(index);
    store.save(&vault)?;
    Ok(Some(name))
}
