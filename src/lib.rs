//! # sts-rs - A Rust Crate for STS Prepayment Meter Keys and Tokens
//!
//! The sts-rs crate implements a simplified variant of the Standard Transfer
//! Specification (STS) used by prepayment utility meters: per-meter decoder
//! key derivation (DKGA02) and decoding of 20-digit tokens into credit fields.
//!
//! DES stands in for the STS encryption algorithm and the token check field
//! is not validated, so this is not an implementation of the real standard.
//!
//! ## Features
//!
//! - Generate, persist and reload the 8-byte vending key (base64 on disk)
//! - Derive a meter's decoder key from its parameters with DKGA02
//! - Parse 20-digit tokens, with or without display separators
//! - Decrypt and split tokens into class, subclass, random, TID, amount and check
//! - Decode the exponent/mantissa amount field
//! - Generate hash-based demo tokens for exercising the decoder
//!
//! ## Usage
//!
//! ```rust
//! use sts_rs::{MeterParameters, MemoryKeyStore, DecoderKeyDeriver, TokenDecoder, VendingKey};
//!
//! let store = MemoryKeyStore::with_key(VendingKey::from_bytes([0; 8]));
//! let params = MeterParameters::new("2", "123456", "7", "1", "37194275246")?;
//!
//! let decoder_key = DecoderKeyDeriver::from_store(&store)?.derive(&params)?;
//! assert_eq!(decoder_key.to_hex(), "748F27D2E8F6BA36");
//!
//! let fields = TokenDecoder::new(decoder_key).decode_str("1865-3776-4842-2132-9404")?;
//! assert_eq!(fields.identifier, 7_182_269);
//! assert_eq!(fields.units, 234.7);
//! # Ok::<(), sts_rs::StsError>(())
//! ```

pub mod cipher;
pub mod config;
pub mod constants;
pub mod dkga;
pub mod error;
pub mod keys;
pub mod logging;
pub mod token;
pub mod util;

pub use crate::config::StsConfig;
pub use crate::error::StsError;
pub use crate::logging::{init_logger, log_info};

// Keys and storage
pub use keys::{DecoderKey, FileKeyStore, MemoryKeyStore, VendingKey, VendingKeyStore};

// Decoder key derivation
pub use dkga::{derive_decoder_key, DecoderKeyDeriver, MeterParameters};

// Tokens
pub use token::amount::decode_amount;
pub use token::{
    decode, format_token, generate_demo_token, Amount, DecodedToken, Token, TokenClass,
    TokenDecoder,
};

/// Derive the decoder key for `params` using the vending key held by `store`,
/// creating that key on first use.
pub fn derive_from_store<S: VendingKeyStore + ?Sized>(
    store: &S,
    params: &MeterParameters,
) -> Result<DecoderKey, StsError> {
    DecoderKeyDeriver::from_store(store)?.derive(params)
}

/// Decode `token` for the meter described by `params`.
pub fn decode_token(
    token: &str,
    params: &MeterParameters,
    vending_key: &VendingKey,
) -> Result<DecodedToken, StsError> {
    TokenDecoder::for_meter(params, vending_key)?.decode_str(token)
}
