//! # Vending Key Storage
//!
//! The vending key is created once per deployment and read on every
//! derivation. Stores persist it as the base64 text of the 8 raw bytes, with
//! no framing or checksum.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sts_rs::keys::{FileKeyStore, VendingKeyStore};
//!
//! let store = FileKeyStore::new("resources/data/VendingKey.key");
//! let vending_key = store.get_or_create()?;
//! # Ok::<(), sts_rs::StsError>(())
//! ```

use super::VendingKey;
use crate::constants::KEY_LEN;
use crate::error::StsError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use zeroize::Zeroize;

/// Persistence contract for the vending key.
pub trait VendingKeyStore {
    /// Create 8 random bytes, persist them (overwriting any existing key) and
    /// return them.
    fn generate(&self) -> Result<VendingKey, StsError>;

    /// Load the persisted key. `StsError::NotFound` on first run.
    fn read(&self) -> Result<VendingKey, StsError>;

    /// Return the persisted key, generating one if none exists yet.
    fn get_or_create(&self) -> Result<VendingKey, StsError> {
        match self.read() {
            Err(StsError::NotFound) => self.generate(),
            other => other,
        }
    }
}

/// Draw a fresh vending key from the operating system RNG.
pub fn random_vending_key() -> VendingKey {
    let mut bytes = [0u8; KEY_LEN];
    OsRng.fill_bytes(&mut bytes);
    let key = VendingKey::from_bytes(bytes);
    bytes.zeroize();
    key
}

/// Encode a key in the persisted text form.
pub fn encode_vending_key(key: &VendingKey) -> String {
    STANDARD.encode(key.as_bytes())
}

/// Decode the persisted text form. Surrounding whitespace is ignored.
pub fn decode_vending_key(text: &str) -> Result<VendingKey, StsError> {
    let mut raw = STANDARD
        .decode(text.trim())
        .map_err(|e| StsError::MalformedKey(e.to_string()))?;
    let key = VendingKey::from_slice(&raw);
    raw.zeroize();
    key
}

/// Vending key persisted in a single file.
#[derive(Debug, Clone)]
pub struct FileKeyStore {
    path: PathBuf,
}

impl FileKeyStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a key file is present. Does not validate its contents.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn ensure_parent(&self) -> Result<(), StsError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| StsError::StorageError(format!("{}: {e}", parent.display())))?;
            }
        }
        Ok(())
    }

    /// Sibling path for staging a key before it becomes visible.
    fn staging_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.path
            .with_file_name(format!(".{name}.{:016x}.tmp", OsRng.next_u64()))
    }

    /// Write `key` to a fresh staging file and flush it.
    fn stage(&self, key: &VendingKey) -> Result<PathBuf, StsError> {
        self.ensure_parent()?;
        let staging = self.staging_path();
        let written = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&staging)
            .and_then(|mut file| {
                file.write_all(encode_vending_key(key).as_bytes())?;
                file.sync_all()
            });
        if let Err(e) = written {
            let _ = fs::remove_file(&staging);
            return Err(storage_error(&staging, e));
        }
        Ok(staging)
    }

    /// Publish a new key only if no key file exists. Returns `Ok(None)` when
    /// another writer got there first. The key file never appears partially
    /// written where hard links are available.
    fn create_if_absent(&self) -> Result<Option<VendingKey>, StsError> {
        self.create_if_absent_with(|staging, path| fs::hard_link(staging, path))
    }

    fn create_if_absent_with<L>(&self, link: L) -> Result<Option<VendingKey>, StsError>
    where
        L: FnOnce(&Path, &Path) -> io::Result<()>,
    {
        let key = random_vending_key();
        let staging = self.stage(&key)?;
        let linked = link(&staging, &self.path);
        let _ = fs::remove_file(&staging);

        match linked {
            Ok(()) => Ok(Some(key)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(None),
            // no hard links on this filesystem (vfat, some network mounts)
            Err(_) => self.write_exclusive(&key),
        }
    }

    /// Create the key file directly with `create_new`. A concurrent reader
    /// may briefly see it empty.
    fn write_exclusive(&self, key: &VendingKey) -> Result<Option<VendingKey>, StsError> {
        let mut file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(None),
            Err(e) => return Err(storage_error(&self.path, e)),
        };

        let written = file
            .write_all(encode_vending_key(key).as_bytes())
            .and_then(|_| file.sync_all());
        if let Err(e) = written {
            drop(file);
            let _ = fs::remove_file(&self.path);
            return Err(storage_error(&self.path, e));
        }
        Ok(Some(key.clone()))
    }
}

impl VendingKeyStore for FileKeyStore {
    fn generate(&self) -> Result<VendingKey, StsError> {
        let key = random_vending_key();
        let staging = self.stage(&key)?;
        if let Err(e) = fs::rename(&staging, &self.path) {
            let _ = fs::remove_file(&staging);
            return Err(storage_error(&self.path, e));
        }
        Ok(key)
    }

    fn read(&self) -> Result<VendingKey, StsError> {
        let mut raw = fs::read(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StsError::NotFound,
            _ => storage_error(&self.path, e),
        })?;
        let key = std::str::from_utf8(&raw)
            .map_err(|e| StsError::MalformedKey(format!("not base64 text: {e}")))
            .and_then(decode_vending_key);
        raw.zeroize();
        key
    }

    fn get_or_create(&self) -> Result<VendingKey, StsError> {
        match self.read() {
            Err(StsError::NotFound) => match self.create_if_absent()? {
                Some(key) => Ok(key),
                None => self.read(),
            },
            other => other,
        }
    }
}

fn storage_error(path: &Path, err: io::Error) -> StsError {
    StsError::StorageError(format!("{}: {err}", path.display()))
}

/// In-process store, for tests and for embedding callers that manage
/// persistence themselves.
#[derive(Debug, Default)]
pub struct MemoryKeyStore {
    key: Mutex<Option<VendingKey>>,
}

impl MemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a known key.
    pub fn with_key(key: VendingKey) -> Self {
        Self {
            key: Mutex::new(Some(key)),
        }
    }
}

impl VendingKeyStore for MemoryKeyStore {
    fn generate(&self) -> Result<VendingKey, StsError> {
        let key = random_vending_key();
        let mut slot = self
            .key
            .lock()
            .map_err(|_| StsError::StorageError("key store lock poisoned".to_string()))?;
        *slot = Some(key.clone());
        Ok(key)
    }

    fn read(&self) -> Result<VendingKey, StsError> {
        let slot = self
            .key
            .lock()
            .map_err(|_| StsError::StorageError("key store lock poisoned".to_string()))?;
        slot.clone().ok_or(StsError::NotFound)
    }
}
