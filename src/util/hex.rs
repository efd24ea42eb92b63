//! # Hex Encoding/Decoding Utilities
//!
//! This module provides the hex helpers used by the key derivation and by the
//! CLI: fixed-width 8-byte block parsing, uppercase key rendering, and
//! lenient decoding for user-supplied key material.
//!
//! ## Usage
//!
//! ```rust
//! use sts_rs::util::hex::{encode_hex_upper, parse_block_hex};
//!
//! let block = parse_block_hex("212345671FFFFFFF").unwrap();
//! assert_eq!(block, 0x2123_4567_1FFF_FFFF);
//! assert_eq!(encode_hex_upper(&block.to_be_bytes()), "212345671FFFFFFF");
//! ```

use crate::constants::BLOCK_HEX_LEN;
use thiserror::Error;

/// Errors that can occur during hex operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HexError {
    #[error("Invalid hex character: {0}")]
    InvalidCharacter(char),

    #[error("Odd number of hex characters: {0}")]
    OddLength(usize),

    #[error("Expected {expected} hex characters, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("Empty hex string")]
    EmptyString,

    #[error("Hex decoding error: {0}")]
    DecodeError(String),
}

/// Encode bytes to uppercase hex string
///
/// Keys and blocks are always displayed this way.
pub fn encode_hex_upper(data: &[u8]) -> String {
    hex::encode_upper(data)
}

/// Decode hex string to bytes
///
/// Accepts both uppercase and lowercase hex characters.
/// Whitespace is automatically stripped.
pub fn decode_hex(hex_str: &str) -> Result<Vec<u8>, HexError> {
    if hex_str.is_empty() {
        return Err(HexError::EmptyString);
    }

    let cleaned: String = hex_str.chars().filter(|c| !c.is_whitespace()).collect();

    if cleaned.len() % 2 != 0 {
        return Err(HexError::OddLength(cleaned.len()));
    }

    hex::decode(&cleaned).map_err(|e| HexError::DecodeError(e.to_string()))
}

/// Parse exactly 16 hex characters into a big-endian 64-bit block.
pub fn parse_block_hex(hex_str: &str) -> Result<u64, HexError> {
    if hex_str.is_empty() {
        return Err(HexError::EmptyString);
    }
    if hex_str.len() != BLOCK_HEX_LEN {
        return Err(HexError::WrongLength {
            expected: BLOCK_HEX_LEN,
            actual: hex_str.len(),
        });
    }
    if let Some(bad) = hex_str.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(HexError::InvalidCharacter(bad));
    }

    u64::from_str_radix(hex_str, 16).map_err(|e| HexError::DecodeError(e.to_string()))
}

/// Render a 64-bit block as 16 uppercase hex characters.
pub fn format_block_hex(block: u64) -> String {
    format!("{block:016X}")
}
