//! # Key Material
//!
//! Fixed 8-byte key types. The vending key is the deployment-wide secret from
//! which every decoder key is derived; a decoder key is bound to one meter's
//! parameters. Both are wiped on drop and never printed by `Debug`.

pub mod store;

use crate::constants::KEY_LEN;
use crate::error::StsError;
use crate::util::hex::{decode_hex, encode_hex_upper};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

pub use store::{FileKeyStore, MemoryKeyStore, VendingKeyStore};

/// Top-level 8-byte secret shared by every derivation in a deployment.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct VendingKey([u8; KEY_LEN]);

impl VendingKey {
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Build from a slice, rejecting anything but exactly 8 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, StsError> {
        let arr: [u8; KEY_LEN] = bytes.try_into().map_err(|_| {
            StsError::MalformedKey(format!("expected {KEY_LEN} bytes, got {}", bytes.len()))
        })?;
        Ok(Self(arr))
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// Key as a big-endian 64-bit word.
    pub fn as_u64(&self) -> u64 {
        u64::from_be_bytes(self.0)
    }
}

impl fmt::Debug for VendingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VendingKey(**redacted**)")
    }
}

/// Per-meter 8-byte key produced by DKGA02 and used to decrypt tokens.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct DecoderKey([u8; KEY_LEN]);

impl DecoderKey {
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    pub fn from_u64(word: u64) -> Self {
        Self(word.to_be_bytes())
    }

    /// Parse the canonical 16-character hex form (either case).
    pub fn from_hex(hex_str: &str) -> Result<Self, StsError> {
        let bytes = decode_hex(hex_str).map_err(|e| StsError::MalformedKey(e.to_string()))?;
        let arr: [u8; KEY_LEN] = bytes.as_slice().try_into().map_err(|_| {
            StsError::MalformedKey(format!("expected {KEY_LEN} bytes, got {}", bytes.len()))
        })?;
        Ok(Self(arr))
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    pub fn as_u64(&self) -> u64 {
        u64::from_be_bytes(self.0)
    }

    /// Canonical external form: 16 uppercase hex characters.
    pub fn to_hex(&self) -> String {
        encode_hex_upper(&self.0)
    }
}

impl fmt::Debug for DecoderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DecoderKey(**redacted**)")
    }
}
