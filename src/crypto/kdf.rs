//! Passphrase-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! The salt is a fixed string compiled into the program and the
//! iteration count is 1.  That pairing assumes a strong passphrase and
//! does nothing to harden a weak one.  Both values are part of the file
//! format: changing either makes every existing vault unreadable.

use sha2::Sha256;

use super::keys::{VaultKey, KEY_LEN};
use crate::errors::{PassKeeperError, Result};

/// Salt shared by every vault.
pub const KDF_SALT: &[u8] = b"PassKeeper key generation";

/// PBKDF2 iteration count.
pub const KDF_ITERATIONS: u32 = 1;

/// Derive the vault key from a passphrase.
///
/// The passphrase is taken as UTF-8 bytes.
pub fn derive_key(passphrase: &str) -> Result<VaultKey> {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac_sha256(passphrase.as_bytes(), KDF_SALT, KDF_ITERATIONS, &mut key)?;
    Ok(VaultKey::new(key))
}

/// PBKDF2 (RFC 8018) with HMAC-SHA256, filling `out` completely.
pub fn pbkdf2_hmac_sha256(
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    out: &mut [u8],
) -> Result<()> {
    if iterations == 0 {
        return Err(PassKeeperError::KeyDerivationFailure);
    }
    pbkdf2::pbkdf2::<hmac::Hmac<Sha256>>(password, salt, iterations, out)
        .map_err(|_| PassKeeperError::KeyDerivationFailure)
}
