//! # Bit Field Utilities
//!
//! This module provides MSB-first bit field extraction over fixed-width
//! integers. STS specifies its token layout from the most significant bit
//! down, so offsets here are counted from the top of the container rather
//! than from bit 0.
//!
//! ## Usage
//!
//! ```rust
//! use sts_rs::util::bits::{field_msb, to_binary_string};
//!
//! // Top nibble of a 64-bit block
//! assert_eq!(field_msb(0xA000_0000_0000_0000u64, 64, 0, 4), 0xA);
//! assert_eq!(to_binary_string(0b101u8, 4), "0101");
//! ```

/// Mask with the low `width` bits set.
#[inline]
pub fn mask(width: u32) -> u128 {
    if width >= 128 {
        u128::MAX
    } else {
        (1u128 << width) - 1
    }
}

/// Extract `width` bits starting `offset` bits below the top of a
/// `container`-bit value.
///
/// `offset + width` must not exceed `container`, and `container` must not
/// exceed 128.
///
/// # Examples
///
/// ```rust
/// use sts_rs::util::bits::field_msb;
///
/// let block: u64 = 0x026D_97BD_092B_CDB0;
/// assert_eq!(field_msb(block, 64, 0, 4), 0x0);
/// assert_eq!(field_msb(block, 64, 4, 4), 0x2);
/// assert_eq!(field_msb(block, 64, 48, 16), 0xCDB0);
/// ```
#[inline]
pub fn field_msb<T: Into<u128>>(value: T, container: u32, offset: u32, width: u32) -> u128 {
    debug_assert!(offset + width <= container && container <= 128);
    let shift = container - offset - width;
    (value.into() >> shift) & mask(width)
}

/// Render the low `width` bits of `value` as a zero-padded binary string,
/// most significant bit first.
pub fn to_binary_string<T: Into<u128>>(value: T, width: u32) -> String {
    let value = value.into() & mask(width);
    format!("{:0width$b}", value, width = width as usize)
}
