//! `passkeeper list` — display records in a table.

use std::path::Path;

use crate::cli::output;
use crate::cli::{prompt_password, vault_path, Cli};
use crate::errors::Result;
use crate::vault::{Record, VaultStore};

/// Records matching a search, with their vault indices.
#[derive(Debug)]
pub struct Listing {
    pub total: usize,
    pub rows: Vec<(usize, Record)>,
}

/// Execute the `list` command.
pub fn execute(cli: &Cli, search: Option<&str>) -> Result<()> {
    let path = vault_path(cli)?;
    let password = prompt_password()?;
    let listing = run(&path, &password, search)?;

    output::info(&format!(
        "{} — {} of {} record(s)",
        path.display(),
        listing.rows.len(),
        listing.total
    ));
    output::print_records_table(listing.rows.iter().map(|(i, r)| (*i, r)));

    Ok(())
}

/// Open the vault and collect the records matching `search`.
pub fn run(path: &Path, passphrase: &str, search: Option<&str>) -> Result<Listing> {
    let (_, vault) = VaultStore::open(path, passphrase)?;
    let rows = vault
        .search(search.unwrap_or(""))
        .map(|(i, r)| (i, r.clone()))
        .collect();
    Ok(Listing {
        total: vault.len(),
        rows,
    })
}
