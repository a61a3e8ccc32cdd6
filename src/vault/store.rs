//! Loading and saving the encrypted vault file.
//!
//! `VaultStore` binds a vault path to the key derived from its
//! passphrase, so that CLI commands can work with simple calls like
//! `store.load()` and `store.save(&vault)`.
//!
//! Saving never writes over the existing file in place.  The new
//! content goes to a fresh sibling named `<path>_<n>` and is then
//! renamed over the target.  If the rename fails, the old vault is left
//! as it was and the error names the sibling holding the new content.

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::crypto::{decrypt, derive_key, encrypt, VaultKey};
use crate::errors::{PassKeeperError, Result};

use super::codec;
use super::collection::Vault;

/// The main vault handle.
pub struct VaultStore {
    /// Path to the vault file on disk.
    path: PathBuf,

    /// Key derived from the passphrase.
    key: VaultKey,
}

impl VaultStore {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Bind `path` to the key derived from `passphrase`.  Nothing is
    /// read or written.
    pub fn new(path: &Path, passphrase: &str) -> Result<Self> {
        Ok(Self::with_key(path, derive_key(passphrase)?))
    }

    pub fn with_key(path: &Path, key: VaultKey) -> Self {
        Self {
            path: path.to_path_buf(),
            key,
        }
    }

    /// Write a new, empty vault to `path` and return its handle.
    pub fn create(path: &Path, passphrase: &str) -> Result<Self> {
        let store = Self::new(path, passphrase)?;
        store.save(&Vault::new())?;
        Ok(store)
    }

    /// Read and decrypt an existing vault in one step.
    pub fn open(path: &Path, passphrase: &str) -> Result<(Self, Vault)> {
        let store = Self::new(path, passphrase)?;
        let vault = store.load()?;
        Ok((store, vault))
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Use a new passphrase for subsequent saves.
    pub fn set_passphrase(&mut self, passphrase: &str) -> Result<()> {
        self.key = derive_key(passphrase)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Read, decrypt and decode the vault file.
    ///
    /// No records are returned unless every step succeeds.
    pub fn load(&self) -> Result<Vault> {
        let blob = fs::read(&self.path).map_err(|source| PassKeeperError::FileOpenFailure {
            path: self.path.clone(),
            source,
        })?;

        let plaintext = decrypt(&self.key, blob)?;
        let vault = codec::decode(&plaintext)?;
        tracing::debug!(path = %self.path.display(), records = vault.len(), "vault loaded");
        Ok(vault)
    }

    /// Encode, encrypt and atomically replace the vault file.
    pub fn save(&self, vault: &Vault) -> Result<()> {
        let plaintext = codec::encode(vault)?;
        let blob = encrypt(&self.key, plaintext)?;
        write_atomic(&self.path, &blob)?;
        tracing::debug!(
            path = %self.path.display(),
            records = vault.len(),
            bytes = blob.len(),
            "vault saved"
        );
        Ok(())
    }
}

/// Write `bytes` to a fresh sibling of `target`, then rename it over
/// `target`.
pub fn write_atomic(target: &Path, bytes: &[u8]) -> Result<()> {
    write_atomic_with(target, bytes, |from, to| fs::rename(from, to))
}

/// [`write_atomic`] with the final rename step supplied by the caller.
pub fn write_atomic_with<F>(target: &Path, bytes: &[u8], rename: F) -> Result<()>
where
    F: FnOnce(&Path, &Path) -> io::Result<()>,
{
    let (staged, mut file) = create_sibling(target)?;

    let written = file.write_all(bytes).and_then(|()| file.sync_all());
    drop(file);
    if let Err(source) = written {
        // Best effort: the staged copy is incomplete and useless.
        let _ = fs::remove_file(&staged);
        return Err(PassKeeperError::FileWriteFailure {
            path: staged,
            source,
        });
    }

    if let Err(source) = rename(&staged, target) {
        tracing::warn!(
            target = %target.display(),
            staged = %staged.display(),
            "could not move new vault into place"
        );
        return Err(PassKeeperError::FileReplaceFailure {
            action: "rename the new file",
            recovery_path: staged,
            source,
        });
    }

    Ok(())
}

/// Create `<target>_<n>` for the smallest `n` not already taken.
fn create_sibling(target: &Path) -> Result<(PathBuf, fs::File)> {
    for n in 0u32.. {
        let mut name = OsString::from(target.as_os_str());
        name.push(format!("_{n}"));
        let candidate = PathBuf::from(name);

        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
        {
            Ok(file) => return Ok((candidate, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(source) => {
                return Err(PassKeeperError::FileWriteFailure {
                    path: candidate,
                    source,
                })
            }
        }
    }

    Err(PassKeeperError::FileWriteFailure {
        path: target.to_path_buf(),
        source: io::Error::new(io::ErrorKind::AlreadyExists, "no free file name"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::Record;

    #[test]
    fn sibling_names_count_up_from_zero() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("db.passdb");
        fs::write(dir.path().join("db.passdb_0"), b"taken").unwrap();

        let (path, _file) = create_sibling(&target).unwrap();
        assert_eq!(path, dir.path().join("db.passdb_1"));
    }

    #[test]
    fn atomic_write_replaces_target_and_leaves_no_sibling() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("db.passdb");
        fs::write(&target, b"old").unwrap();

        write_atomic(&target, b"new").unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"new");
        assert!(!dir.path().join("db.passdb_0").exists());
    }

    #[test]
    fn failed_rename_keeps_old_file_and_reports_recovery_path() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("db.passdb");
        fs::write(&target, b"old").unwrap();

        let err = write_atomic_with(&target, b"new", |_, _| {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        })
        .unwrap_err();

        let recovery = dir.path().join("db.passdb_0");
        match &err {
            PassKeeperError::FileReplaceFailure { recovery_path, .. } => {
                assert_eq!(recovery_path, &recovery)
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("db.passdb_0"));
        assert_eq!(fs::read(&target).unwrap(), b"old");
        assert_eq!(fs::read(&recovery).unwrap(), b"new");
    }

    #[test]
    fn save_then_load_returns_same_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.passdb");
        let store = VaultStore::create(&path, "correct horse").unwrap();
        assert!(store.load().unwrap().is_empty());

        let vault: Vault = [
            Record::new("example.com", "alice", "pw1", "note"),
            Record::new("bank", "bob", "pw2", ""),
        ]
        .into_iter()
        .collect();
        store.save(&vault).unwrap();

        let reopened = VaultStore::new(&path, "correct horse").unwrap();
        assert_eq!(reopened.load().unwrap(), vault);
    }

    #[test]
    fn missing_file_is_open_failure() {
        let dir = tempfile::tempdir().unwrap();
        let store = VaultStore::new(&dir.path().join("absent"), "pw").unwrap();
        assert!(matches!(
            store.load(),
            Err(PassKeeperError::FileOpenFailure { .. })
        ));
    }

    #[test]
    fn changed_passphrase_applies_to_next_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.passdb");
        let (mut store, vault) = {
            VaultStore::create(&path, "old").unwrap();
            VaultStore::open(&path, "old").unwrap()
        };

        store.set_passphrase("new").unwrap();
        store.save(&vault).unwrap();

        assert!(VaultStore::open(&path, "new").is_ok());
        assert!(matches!(
            VaultStore::open(&path, "old"),
            Err(PassKeeperError::DecryptionFailure)
        ));
    }
}
