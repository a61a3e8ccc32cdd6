//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;

use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{PassKeeperError, Result};

/// PassKeeper CLI: local encrypted password keeper and credential generator.
#[derive(Parser)]
#[command(
    name = "passkeeper",
    about = "Local encrypted password keeper and credential generator",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault file (default: passwords.passdb, or `default_vault` from .passkeeper.toml)
    #[arg(long, global = true)]
    pub vault: Option<PathBuf>,

    /// Log vault and entropy activity to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new, empty vault
    New,

    /// List records (passwords are not shown)
    List {
        /// Only show records whose service or login contains this text
        search: Option<String>,
    },

    /// Show one record, including its password and comment
    Show {
        /// Record number as printed by `list`
        index: usize,
    },

    /// Add a record
    Add {
        /// Service or site name
        #[arg(short, long)]
        service: String,

        /// Login or user name
        #[arg(short, long, default_value = "")]
        login: String,

        /// Password (prompted for when neither this nor --generate is given)
        #[arg(short, long, conflicts_with = "generate")]
        password: Option<String>,

        /// Generate the password from a preset (pin4, pass8, pass12, pass16,
        /// pass32, key128, key192, key256); without a value the configured
        /// default preset is used
        #[arg(short, long, num_args = 0..=1, default_missing_value = "")]
        generate: Option<String>,

        /// Free-form comment
        #[arg(short, long, default_value = "")]
        comment: String,
    },

    /// Remove a record
    Remove {
        /// Record number as printed by `list`
        index: usize,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Change the vault passphrase
    Chpass,

    /// Print random names, PINs, passwords, hex bytes, logins or service names
    Generate {
        /// How many items to print
        count: usize,
        /// What to print: names, pins, passwords, bytes, logins or services
        kind: String,
        /// Length as a number or a range like 5-10 (syllables for names)
        length: Option<String>,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Prompt for the passphrase of an existing vault.
///
/// Returns `Zeroizing<String>` so the passphrase is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    let pw = dialoguer::Password::new()
        .with_prompt("Enter vault passphrase")
        .interact()
        .map_err(|e| PassKeeperError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new passphrase, entered twice.
///
/// Returns `Zeroizing<String>` so the passphrase is wiped from memory on drop.
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    let first = Zeroizing::new(
        dialoguer::Password::new()
            .with_prompt("Choose vault passphrase")
            .interact()
            .map_err(|e| PassKeeperError::CommandFailed(format!("password prompt: {e}")))?,
    );
    let second = Zeroizing::new(
        dialoguer::Password::new()
            .with_prompt("Confirm vault passphrase")
            .interact()
            .map_err(|e| PassKeeperError::CommandFailed(format!("password prompt: {e}")))?,
    );

    if *first != *second {
        return Err(PassKeeperError::PasswordMismatch);
    }
    Ok(first)
}

/// Ask a yes/no question, defaulting to "no".
pub fn confirm(prompt: &str) -> Result<bool> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| PassKeeperError::CommandFailed(format!("confirm prompt: {e}")))
}

/// Load settings from the working directory.
pub fn load_settings() -> Result<(PathBuf, Settings)> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;
    Ok((cwd, settings))
}

/// Resolve the vault file from `--vault` or the settings.
pub fn vault_path(cli: &Cli) -> Result<PathBuf> {
    let (cwd, settings) = load_settings()?;
    Ok(settings.vault_path(&cwd, cli.vault.as_deref()))
}
