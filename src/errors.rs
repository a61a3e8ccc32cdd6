use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// All errors that can occur in PassKeeper.
///
/// The `Display` text of each variant is the message shown to the user;
/// the core never prints anything itself.
#[derive(Debug, Error)]
pub enum PassKeeperError {
    // --- Crypto errors ---
    #[error("Key derivation failure")]
    KeyDerivationFailure,

    #[error("Error encrypting the data")]
    EncryptionFailure,

    /// Wrong passphrase and corrupted ciphertext must stay indistinguishable.
    #[error("Wrong password or file corruption")]
    DecryptionFailure,

    // --- Vault errors ---
    #[error("Cannot open DB file: {}", .path.display())]
    FileOpenFailure { path: PathBuf, source: io::Error },

    #[error("Password DB structure is corrupted")]
    StructureCorruption,

    #[error("Error serializing the data: wrote {actual} bytes, expected {expected}")]
    SerializationMismatch { expected: usize, actual: usize },

    #[error("Cannot write DB file {}: {source}", .path.display())]
    FileWriteFailure { path: PathBuf, source: io::Error },

    #[error(
        "Cannot {action}.\nNew one is saved under name \"{}\"\nPlease resolve it manually or try again.",
        .recovery_path.display()
    )]
    FileReplaceFailure {
        action: &'static str,
        recovery_path: PathBuf,
        source: io::Error,
    },

    #[error("Record #{0} not found")]
    RecordNotFound(usize),

    // --- Randomizer errors ---
    #[error("Random source is unavailable")]
    EntropySourceFailure,

    #[error("Cannot draw {0} bits at once (1..=32 allowed)")]
    InvalidDrawWidth(u32),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Passwords mismatch")]
    PasswordMismatch,
}

/// Convenience type alias for PassKeeper results.
pub type Result<T> = std::result::Result<T, PassKeeperError>;
