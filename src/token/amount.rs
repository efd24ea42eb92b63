//! # Transfer Amount Field
//!
//! The 16-bit amount field is a 2-bit exponent over a 14-bit mantissa. The
//! decoded quantity is
//!
//! ```text
//! e == 0:  m / 10
//! e  > 0:  (10^e * m + 2^14 * 10^(e-1)) / 10
//! ```

use crate::constants::{AMOUNT_BITS, AMOUNT_EXPONENT_BITS, AMOUNT_MANTISSA_BITS};
use crate::util::bits::field_msb;
use serde::Serialize;

/// Decoded amount field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Amount {
    /// 0..=3
    pub exponent: u8,
    /// 0..=16383
    pub mantissa: u16,
}

impl Amount {
    /// Split a raw 16-bit field.
    pub fn from_field(field: u16) -> Self {
        Self {
            exponent: field_msb(field, AMOUNT_BITS, 0, AMOUNT_EXPONENT_BITS) as u8,
            mantissa: field_msb(field, AMOUNT_BITS, AMOUNT_EXPONENT_BITS, AMOUNT_MANTISSA_BITS)
                as u16,
        }
    }

    /// Reassemble the raw 16-bit field.
    pub fn to_field(&self) -> u16 {
        (u16::from(self.exponent & 0b11) << AMOUNT_MANTISSA_BITS)
            | (self.mantissa & ((1 << AMOUNT_MANTISSA_BITS) - 1))
    }

    /// Amount in tenths of a unit. Exact for every field value.
    pub fn tenths(&self) -> u64 {
        let m = u64::from(self.mantissa);
        match self.exponent {
            0 => m,
            e => {
                let e = u32::from(e);
                10u64.pow(e) * m + (1u64 << AMOUNT_MANTISSA_BITS) * 10u64.pow(e - 1)
            }
        }
    }

    /// Decoded quantity.
    pub fn value(&self) -> f64 {
        self.tenths() as f64 / 10.0
    }
}

/// Decode a raw amount field straight to a quantity.
pub fn decode_amount(field: u16) -> f64 {
    Amount::from_field(field).value()
}
