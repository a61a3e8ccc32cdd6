//! The symmetric vault key.
//!
//! A `VaultKey` is derived once per session from the passphrase and is
//! only ever held in memory.  It is not scrubbed on drop; the records
//! it protects live in plain heap memory for the whole session too.

use std::fmt;

/// Length of the vault key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// A 32-byte AES-256-GCM key.
#[derive(Clone, PartialEq, Eq)]
pub struct VaultKey {
    bytes: [u8; KEY_LEN],
}

impl VaultKey {
    /// Wrap raw key bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes (e.g. to build a cipher).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl fmt::Debug for VaultKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VaultKey(..)")
    }
}
