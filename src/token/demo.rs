//! # Demo Token Generation
//!
//! Produces plausible 20-digit tokens for exercising the decoder. The digits
//! come from a SHA-256 digest of the meter number and amount, so they bear no
//! relation to any decoder key: decoding a demo token yields arbitrary fields.

use crate::constants::{DEMO_MIN_AMOUNT, DEMO_TOKEN_SALT, TOKEN_DIGITS};
use crate::error::StsError;
use sha2::{Digest, Sha256};

/// Seed hashed for a demo token: `{meter}-{amount in hundredths}-demo-key`.
pub fn demo_seed(meter_number: &str, amount: f64) -> String {
    // truncation toward zero, as an integer cast does
    let hundredths = (amount * 100.0) as i64;
    format!("{meter_number}-{hundredths}-{DEMO_TOKEN_SALT}")
}

/// Generate a 20-digit demo token. `amount` must be finite and at least 5.
///
/// Digits are the decimal characters of the lowercase hex digest, in order.
/// In the rare case a digest holds fewer than 20 of them, the digest is
/// hashed again and its digits appended.
pub fn generate_demo_token(meter_number: &str, amount: f64) -> Result<String, StsError> {
    if !amount.is_finite() || amount < DEMO_MIN_AMOUNT {
        return Err(StsError::InvalidAmount(amount));
    }

    let mut digest = Sha256::digest(demo_seed(meter_number, amount).as_bytes());
    let mut token = String::with_capacity(TOKEN_DIGITS);
    loop {
        let needed = TOKEN_DIGITS - token.len();
        let hex = hex::encode(&digest);
        token.extend(hex.chars().filter(|c| c.is_ascii_digit()).take(needed));
        if token.len() == TOKEN_DIGITS {
            return Ok(token);
        }
        digest = Sha256::digest(&digest);
    }
}
