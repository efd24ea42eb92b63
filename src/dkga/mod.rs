//! # DKGA02 Decoder Key Derivation
//!
//! Derives a meter's 8-byte decoder key from its parameters and the vending
//! key:
//!
//! 1. `x1 = PAN block XOR control block`
//! 2. `enc = E(vending key, x1)` with a single-block cipher
//! 3. `decoder key = vending key XOR (x1 XOR enc)`
//!
//! The computation is pure; blocks are rebuilt on every call.
//!
//! ## Usage
//!
//! ```rust
//! use sts_rs::dkga::{derive_decoder_key, MeterParameters};
//! use sts_rs::keys::VendingKey;
//!
//! let params = MeterParameters::new("2", "123456", "7", "1", "37194275246").unwrap();
//! let key = derive_decoder_key(&params, &VendingKey::from_bytes([0; 8])).unwrap();
//! assert_eq!(key.to_hex(), "748F27D2E8F6BA36");
//! ```

pub mod params;

use crate::cipher::{BlockCipher64, DesBlockCipher};
use crate::error::StsError;
use crate::keys::{DecoderKey, VendingKey, VendingKeyStore};

pub use params::{iin_prefix, ControlBlock, MeterParameters, PanBlock};

/// Intermediate values of one derivation, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivationTrace {
    pub control_block: ControlBlock,
    pub pan_block: PanBlock,
    pub pan_xor_control: u64,
    pub encrypted: u64,
}

/// Derive a decoder key for `params` under `vending_key`.
pub fn derive_decoder_key(
    params: &MeterParameters,
    vending_key: &VendingKey,
) -> Result<DecoderKey, StsError> {
    derive_with_trace(params, vending_key).map(|(key, _)| key)
}

/// Derive a decoder key and return the intermediate blocks alongside it.
pub fn derive_with_trace(
    params: &MeterParameters,
    vending_key: &VendingKey,
) -> Result<(DecoderKey, DerivationTrace), StsError> {
    let control_block = params.control_block()?;
    let pan_block = params.pan_block()?;

    let x1 = pan_block.as_u64() ^ control_block.as_u64();
    let encrypted = DesBlockCipher::new(vending_key.as_bytes()).encrypt(x1);
    let x2 = x1 ^ encrypted;
    let decoder_key = DecoderKey::from_u64(vending_key.as_u64() ^ x2);

    let trace = DerivationTrace {
        control_block,
        pan_block,
        pan_xor_control: x1,
        encrypted,
    };
    Ok((decoder_key, trace))
}

/// Derives decoder keys under one injected vending key.
#[derive(Debug, Clone)]
pub struct DecoderKeyDeriver {
    vending_key: VendingKey,
}

impl DecoderKeyDeriver {
    pub fn new(vending_key: VendingKey) -> Self {
        Self { vending_key }
    }

    /// Load (or create on first run) the vending key from `store`.
    pub fn from_store<S: VendingKeyStore + ?Sized>(store: &S) -> Result<Self, StsError> {
        Ok(Self::new(store.get_or_create()?))
    }

    pub fn derive(&self, params: &MeterParameters) -> Result<DecoderKey, StsError> {
        derive_decoder_key(params, &self.vending_key)
    }
}
