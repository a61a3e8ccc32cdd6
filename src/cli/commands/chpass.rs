//! `passkeeper chpass` — change the vault passphrase.
//!
//! Loads the records with the current passphrase, derives a new key
//! and writes the vault atomically under it.

use std::path::Path;

use crate::cli::output;
use crate::cli::{prompt_new_password, prompt_password, vault_path, Cli};
use crate::errors::Result;
use crate::vault::VaultStore;

/// Execute the `chpass` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let path = vault_path(cli)?;

    output::info("Enter your current vault passphrase.");
    let old_password = prompt_password()?;
    // Check the old passphrase before asking for a new one.
    VaultStore::open(&path, &old_password)?;

    output::info("Choose your new vault passphrase.");
    let new_password = prompt_new_password()?;
    let count = run(&path, &old_password, &new_password)?;

    output::success(&format!("Passphrase changed ({count} records re-encrypted)"));
    Ok(())
}

/// Re-encrypt the vault under `new_passphrase`; returns the record count.
pub fn run(path: &Path, old_passphrase: &str, new_passphrase: &str) -> Result<usize> {
    let (mut store, vault) = VaultStore::open(path, old_passphrase)?;
    store.set_passphrase(new_passphrase)?;
    store.save(&vault)?;
    Ok(vault.len())
}
