//! # STS Tokens
//!
//! A token is a 66-bit value shown to customers as 20 decimal digits. The top
//! two bits select the token class and are sent in the clear; the remaining
//! 64 bits are one encrypted block:
//!
//! ```text
//! | class 2 | subclass 4 | random 4 | TID 24 | amount 16 | check 16 |
//!           \_________________ encrypted block (64) _______________/
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use sts_rs::token::Token;
//!
//! let grouped: Token = "1865-3776-4842-2132-9404".parse().unwrap();
//! let plain: Token = "18653776484221329404".parse().unwrap();
//! assert_eq!(grouped, plain);
//! assert_eq!(plain.class_bits(), 1);
//! ```

pub mod amount;
pub mod decode;
pub mod demo;

use crate::constants::{
    CLASS_BITS, TOKEN_BITS, TOKEN_DIGITS, TOKEN_GROUP_LEN, TOKEN_SEPARATOR,
};
use crate::error::StsError;
use crate::util::bits::field_msb;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

pub use amount::Amount;
pub use decode::{decode, DecodedToken, TokenDecoder};
pub use demo::generate_demo_token;

/// Largest value that fits in the token layout.
pub const TOKEN_MAX: u128 = (1u128 << TOKEN_BITS) - 1;

/// Token class carried in the two clear bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenClass {
    /// Credit transfer
    Transfer,
    /// Management token valid for any meter
    NonMeterSpecific,
    /// Management token bound to one meter
    MeterSpecific,
    Reserved,
}

impl TokenClass {
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Self::Transfer,
            1 => Self::NonMeterSpecific,
            2 => Self::MeterSpecific,
            _ => Self::Reserved,
        }
    }
}

impl fmt::Display for TokenClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Transfer => "transfer",
            Self::NonMeterSpecific => "non-meter-specific",
            Self::MeterSpecific => "meter-specific",
            Self::Reserved => "reserved",
        };
        f.write_str(name)
    }
}

/// A parsed token, guaranteed to fit in 66 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token(u128);

impl Token {
    pub fn from_u128(value: u128) -> Result<Self, StsError> {
        if value > TOKEN_MAX {
            return Err(StsError::TokenOutOfRange(format!(
                "{value} does not fit in {TOKEN_BITS} bits"
            )));
        }
        Ok(Self(value))
    }

    /// Assemble from the clear class bits and the encrypted block.
    pub fn from_parts(class_bits: u8, cipher_block: u64) -> Self {
        Self((u128::from(class_bits & 0b11) << 64) | u128::from(cipher_block))
    }

    pub fn value(&self) -> u128 {
        self.0
    }

    /// The two unencrypted class bits.
    pub fn class_bits(&self) -> u8 {
        field_msb(self.0, TOKEN_BITS, 0, CLASS_BITS) as u8
    }

    pub fn class(&self) -> TokenClass {
        TokenClass::from_bits(self.class_bits())
    }

    /// The 64-bit encrypted block below the class bits.
    pub fn cipher_block(&self) -> u64 {
        field_msb(self.0, TOKEN_BITS, CLASS_BITS, TOKEN_BITS - CLASS_BITS) as u64
    }

    /// Canonical 20-digit form, zero-padded.
    pub fn digits(&self) -> String {
        format!("{:0width$}", self.0, width = TOKEN_DIGITS)
    }

    /// Display form in dash-separated groups of four.
    pub fn grouped(&self) -> String {
        format_token(&self.digits())
    }
}

impl FromStr for Token {
    type Err = StsError;

    /// Digits are kept, ASCII punctuation and whitespace are treated as
    /// separators, anything else is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut value: u128 = 0;
        let mut digits = 0usize;

        for c in s.chars() {
            if let Some(d) = c.to_digit(10) {
                value = value
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(u128::from(d)))
                    .ok_or_else(|| StsError::TokenOutOfRange(format!("{s:?} is too large")))?;
                digits += 1;
            } else if !(c.is_ascii_punctuation() || c.is_ascii_whitespace()) {
                return Err(StsError::TokenOutOfRange(format!(
                    "{s:?} contains non-numeric character {c:?}"
                )));
            }
        }

        if digits == 0 {
            return Err(StsError::TokenOutOfRange(format!("{s:?} contains no digits")));
        }
        Self::from_u128(value)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits())
    }
}

/// Group a digit string in runs of four joined by `-`.
pub fn format_token(digits: &str) -> String {
    let chars: Vec<char> = digits.chars().collect();
    chars
        .chunks(TOKEN_GROUP_LEN)
        .map(|group| group.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(&TOKEN_SEPARATOR.to_string())
}
