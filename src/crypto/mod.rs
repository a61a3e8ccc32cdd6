//! Cryptographic primitives for PassKeeper.
//!
//! This module provides:
//! - PBKDF2-HMAC-SHA256 passphrase key derivation (`kdf`)
//! - AES-256-GCM encryption and decryption of the vault blob (`encryption`)
//! - The in-memory `VaultKey` type (`keys`)

pub mod encryption;
pub mod kdf;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, derive_key, ...};
pub use encryption::{decrypt, encrypt, IV_LEN, TAG_LEN, TRAILER_LEN};
pub use kdf::derive_key;
pub use keys::{VaultKey, KEY_LEN};
