//! # Utility Modules
//!
//! This module provides common utility functions used throughout the sts-rs
//! crate: MSB-first bit field extraction and hex encoding/decoding.

pub mod bits;
pub mod hex;

// Re-export commonly used functions
pub use bits::{field_msb, to_binary_string};
pub use hex::{decode_hex, encode_hex_upper, format_block_hex, parse_block_hex, HexError};
