//! AES-256-GCM authenticated encryption of the whole vault blob.
//!
//! Each call to `encrypt` generates a fresh random 12-byte IV and
//! appends it, followed by the 16-byte auth tag, to the ciphertext.
//! `decrypt` splits both back off the end before decrypting in place.
//!
//! Layout of the encrypted buffer:
//!   [ ciphertext (N bytes) | 12-byte IV | 16-byte auth tag ]

use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce, Tag};
use rand::rngs::OsRng;
use rand::TryRngCore;

use super::keys::VaultKey;
use crate::errors::{PassKeeperError, Result};

/// Size of the AES-256-GCM IV in bytes.
pub const IV_LEN: usize = 12;

/// Size of the AES-256-GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Bytes appended to every ciphertext (IV + tag).
pub const TRAILER_LEN: usize = IV_LEN + TAG_LEN;

/// Encrypt `plaintext` in place and append `iv || tag`.
///
/// Any failure (cipher setup or IV generation) is fatal: no partial
/// output is ever returned.
pub fn encrypt(key: &VaultKey, mut plaintext: Vec<u8>) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|_| PassKeeperError::EncryptionFailure)?;

    let mut iv = [0u8; IV_LEN];
    OsRng
        .try_fill_bytes(&mut iv)
        .map_err(|_| PassKeeperError::EncryptionFailure)?;

    let tag = cipher
        .encrypt_in_place_detached(Nonce::from_slice(&iv), b"", &mut plaintext)
        .map_err(|_| PassKeeperError::EncryptionFailure)?;

    plaintext.reserve_exact(TRAILER_LEN);
    plaintext.extend_from_slice(&iv);
    plaintext.extend_from_slice(&tag);
    Ok(plaintext)
}

/// Decrypt a buffer produced by `encrypt`.
///
/// The buffer must be strictly longer than the trailer.  A wrong key
/// and a tampered buffer both yield `DecryptionFailure`; nothing of the
/// buffer is returned in either case.
pub fn decrypt(key: &VaultKey, mut blob: Vec<u8>) -> Result<Vec<u8>> {
    if blob.len() <= TRAILER_LEN {
        return Err(PassKeeperError::DecryptionFailure);
    }

    let trailer = blob.split_off(blob.len() - TRAILER_LEN);
    let (iv, tag) = trailer.split_at(IV_LEN);

    let cipher =
        Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| PassKeeperError::DecryptionFailure)?;

    cipher
        .decrypt_in_place_detached(Nonce::from_slice(iv), b"", &mut blob, Tag::from_slice(tag))
        .map_err(|_| PassKeeperError::DecryptionFailure)?;

    Ok(blob)
}
