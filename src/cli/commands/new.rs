//! `passkeeper new` — create an empty vault.

use std::path::Path;

use crate::cli::output;
use crate::cli::{confirm, prompt_new_password, vault_path, Cli};
use crate::errors::Result;
use crate::vault::VaultStore;

/// Execute the `new` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let path = vault_path(cli)?;

    if path.exists() {
        let prompt = format!("{} already exists. Replace it with an empty vault?", path.display());
        if !confirm(&prompt)? {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let password = prompt_new_password()?;
    run(&path, &password)?;

    output::success(&format!("Vault created at {}", path.display()));
    output::tip("Run `passkeeper add --service <NAME>` to add a record.");
    Ok(())
}

/// Write an empty vault at `path`, replacing any file there.
pub fn run(path: &Path, passphrase: &str) -> Result<()> {
    VaultStore::create(path, passphrase)?;
    Ok(())
}
