//! Vault module — encrypted credential storage.
//!
//! This module provides:
//! - DER tag/length primitives (`der`)
//! - The `Record` type and its binary encoding (`record`)
//! - The ordered in-memory `Vault` (`collection`)
//! - Whole-vault encoding and decoding (`codec`)
//! - `VaultStore` for loading and atomically saving the file (`store`)

pub mod codec;
pub mod collection;
pub mod der;
pub mod record;
pub mod store;

// Re-export the most commonly used items.
pub use collection::Vault;
pub use record::{Field, Record, RecordDecode};
pub use store::{write_atomic, VaultStore};
