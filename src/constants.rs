//! STS Token Constants
//!
//! This module defines the fixed widths, prefixes and literals used by the
//! DKGA02 decoder key derivation and the 66-bit token layout.

// Decoder key generation (DKGA02)

/// Hex characters in a control or PAN block (8 bytes).
pub const BLOCK_HEX_LEN: usize = 16;

/// Padding character appended to the control block.
pub const CONTROL_BLOCK_PAD: char = 'F';

/// Number of pad characters appended before normalisation.
pub const CONTROL_BLOCK_PAD_COUNT: usize = 6;

/// Issuer identification number used for 11-digit decoder reference numbers.
/// Only the trailing five characters enter the PAN block.
pub const IIN_LONG: &str = "600727";

/// Issuer identification number used for every other reference length.
pub const IIN_SHORT: &str = "0000";

/// Reference-number length that selects [`IIN_LONG`].
pub const DRN_LONG_PREFIX_LEN: usize = 11;

// Token layout (most significant bit first)

/// Total bits in a token.
pub const TOKEN_BITS: u32 = 66;

/// Largest decimal digit count of a token.
pub const TOKEN_DIGITS: usize = 20;

/// Digits per display group.
pub const TOKEN_GROUP_LEN: usize = 4;

/// Display separator between digit groups.
pub const TOKEN_SEPARATOR: char = '-';

pub const CLASS_BITS: u32 = 2;
pub const SUBCLASS_BITS: u32 = 4;
pub const RANDOM_BITS: u32 = 4;
pub const TID_BITS: u32 = 24;
pub const AMOUNT_BITS: u32 = 16;
pub const CHECK_BITS: u32 = 16;

/// Exponent bits at the top of the amount field.
pub const AMOUNT_EXPONENT_BITS: u32 = 2;

/// Mantissa bits below the exponent.
pub const AMOUNT_MANTISSA_BITS: u32 = 14;

// Demo token generation

/// Literal salt mixed into every demo token seed.
pub const DEMO_TOKEN_SALT: &str = "demo-key";

/// Smallest amount accepted for a demo token.
pub const DEMO_MIN_AMOUNT: f64 = 5.0;

// Vending key

/// Vending and decoder key length in bytes.
pub const KEY_LEN: usize = 8;

/// Default location of the persisted vending key.
pub const DEFAULT_KEY_PATH: &str = "resources/data/VendingKey.key";

/// Environment variable overriding [`DEFAULT_KEY_PATH`].
pub const KEY_PATH_ENV: &str = "STS_VENDING_KEY_PATH";
