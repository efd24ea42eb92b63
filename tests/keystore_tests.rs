//! Tests for vending key persistence in `FileKeyStore`.

use std::fs;
use sts_rs::keys::store::encode_vending_key;
use sts_rs::{FileKeyStore, StsError, VendingKey, VendingKeyStore};
use tempfile::TempDir;

/// Reading before any key exists is the first-run `NotFound` condition.
#[test]
fn test_read_missing_key() {
    let dir = TempDir::new().unwrap();
    let store = FileKeyStore::new(dir.path().join("VendingKey.key"));
    assert!(!store.exists());
    assert!(matches!(store.read(), Err(StsError::NotFound)));
}

/// `generate` writes base64 of exactly 8 bytes and creates parent directories.
#[test]
fn test_generate_persists_base64() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("resources").join("data").join("VendingKey.key");
    let store = FileKeyStore::new(&path);

    let key = store.generate().unwrap();
    assert!(path.is_file());

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text.len(), 12);
    assert!(text.ends_with('='));
    assert_eq!(text, encode_vending_key(&key));
    assert_eq!(store.read().unwrap(), key);
}

/// `generate` overwrites an existing key.
#[test]
fn test_generate_overwrites() {
    let dir = TempDir::new().unwrap();
    let store = FileKeyStore::new(dir.path().join("vk.key"));

    let first = store.generate().unwrap();
    let second = store.generate().unwrap();
    assert_ne!(first, second);
    assert_eq!(store.read().unwrap(), second);
}

/// `get_or_create` creates once and then keeps returning the same key.
#[test]
fn test_get_or_create_is_stable() {
    let dir = TempDir::new().unwrap();
    let store = FileKeyStore::new(dir.path().join("vk.key"));

    let created = store.get_or_create().unwrap();
    assert!(store.exists());
    assert_eq!(store.get_or_create().unwrap(), created);
    assert_eq!(FileKeyStore::new(store.path()).read().unwrap(), created);
}

/// A key written by another tool is read back, ignoring trailing whitespace.
#[test]
fn test_read_known_key() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("vk.key");
    fs::write(&path, "ASNFZ4mrze8=\n").unwrap();

    let key = FileKeyStore::new(&path).read().unwrap();
    assert_eq!(key, VendingKey::from_bytes([0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF]));
}

/// Malformed base64 and wrong lengths are rejected and not replaced.
#[test]
fn test_read_rejects_malformed_key() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("vk.key");
    let store = FileKeyStore::new(&path);

    fs::write(&path, "%%%not-base64%%%").unwrap();
    assert!(matches!(store.read(), Err(StsError::MalformedKey(_))));
    // a corrupt key is an error, not a first run
    assert!(matches!(store.get_or_create(), Err(StsError::MalformedKey(_))));
    assert_eq!(fs::read_to_string(&path).unwrap(), "%%%not-base64%%%");

    fs::write(&path, "AAAAAAAAAAAAAAAA").unwrap();
    assert!(matches!(store.read(), Err(StsError::MalformedKey(_))));
}

/// Concurrent first-run callers all end up with the same persisted key.
#[test]
fn test_concurrent_get_or_create_agrees() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("vk.key");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = FileKeyStore::new(&path);
            std::thread::spawn(move || store.get_or_create())
        })
        .collect();

    let keys: Vec<VendingKey> = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .collect::<Result<_, _>>()
        .unwrap();

    let persisted = FileKeyStore::new(&path).read().unwrap();
    assert!(keys.iter().all(|k| *k == persisted));
}
