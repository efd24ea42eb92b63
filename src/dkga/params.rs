//! # Meter Parameters and Derivation Blocks
//!
//! `MeterParameters` is validated on construction so that both derivation
//! blocks are always 16 hex characters. `ControlBlock` and `PanBlock` are the
//! two 8-byte inputs that DKGA02 combines.

use crate::constants::{
    BLOCK_HEX_LEN, CONTROL_BLOCK_PAD, CONTROL_BLOCK_PAD_COUNT, DRN_LONG_PREFIX_LEN, IIN_LONG,
    IIN_SHORT,
};
use crate::error::StsError;
use crate::util::hex::{format_block_hex, parse_block_hex};
use serde::Serialize;

/// Identification number prefix placed in front of the decoder reference
/// number in the PAN block.
pub fn iin_prefix(decoder_reference_number: &str) -> &'static str {
    if decoder_reference_number.len() == DRN_LONG_PREFIX_LEN {
        &IIN_LONG[1..]
    } else {
        IIN_SHORT
    }
}

/// The five inputs a meter is keyed by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MeterParameters {
    key_type: String,
    supply_group_code: String,
    tariff_index: String,
    key_revision_number: String,
    decoder_reference_number: String,
}

impl MeterParameters {
    /// Validate and build a parameter set.
    ///
    /// Every field must be a non-empty run of ASCII decimal digits. The decoder
    /// reference number must fill the PAN block exactly: 11 digits (behind the
    /// 5-character prefix) or 12 digits (behind the 4-character prefix).
    pub fn new(
        key_type: &str,
        supply_group_code: &str,
        tariff_index: &str,
        key_revision_number: &str,
        decoder_reference_number: &str,
    ) -> Result<Self, StsError> {
        check_digits("key_type", key_type)?;
        check_digits("supply_group_code", supply_group_code)?;
        check_digits("tariff_index", tariff_index)?;
        check_digits("key_revision_number", key_revision_number)?;
        check_digits("decoder_reference_number", decoder_reference_number)?;

        let pan_len = iin_prefix(decoder_reference_number).len() + decoder_reference_number.len();
        if pan_len != BLOCK_HEX_LEN {
            return Err(StsError::InvalidParameterLength(format!(
                "decoder_reference_number must be 11 or 12 digits, got {}",
                decoder_reference_number.len()
            )));
        }

        Ok(Self {
            key_type: key_type.to_string(),
            supply_group_code: supply_group_code.to_string(),
            tariff_index: tariff_index.to_string(),
            key_revision_number: key_revision_number.to_string(),
            decoder_reference_number: decoder_reference_number.to_string(),
        })
    }

    pub fn key_type(&self) -> &str {
        &self.key_type
    }

    pub fn supply_group_code(&self) -> &str {
        &self.supply_group_code
    }

    pub fn tariff_index(&self) -> &str {
        &self.tariff_index
    }

    pub fn key_revision_number(&self) -> &str {
        &self.key_revision_number
    }

    pub fn decoder_reference_number(&self) -> &str {
        &self.decoder_reference_number
    }

    /// Control block hex before parsing: the four key fields, six `F`s, then
    /// truncated or `F`-padded to 16 characters.
    pub fn control_block_hex(&self) -> String {
        let mut hex = String::with_capacity(BLOCK_HEX_LEN + CONTROL_BLOCK_PAD_COUNT);
        hex.push_str(&self.key_type);
        hex.push_str(&self.supply_group_code);
        hex.push_str(&self.tariff_index);
        hex.push_str(&self.key_revision_number);
        hex.extend(std::iter::repeat(CONTROL_BLOCK_PAD).take(CONTROL_BLOCK_PAD_COUNT));
        normalize_block(hex)
    }

    /// PAN block hex before parsing: identification prefix plus reference.
    pub fn pan_block_hex(&self) -> String {
        format!(
            "{}{}",
            iin_prefix(&self.decoder_reference_number),
            self.decoder_reference_number
        )
    }

    pub fn control_block(&self) -> Result<ControlBlock, StsError> {
        let hex = self.control_block_hex();
        parse_block_hex(&hex)
            .map(ControlBlock)
            .map_err(|e| StsError::InvalidParameterLength(format!("control block {hex:?}: {e}")))
    }

    pub fn pan_block(&self) -> Result<PanBlock, StsError> {
        let hex = self.pan_block_hex();
        parse_block_hex(&hex)
            .map(PanBlock)
            .map_err(|e| StsError::InvalidParameterLength(format!("PAN block {hex:?}: {e}")))
    }
}

fn check_digits(name: &str, value: &str) -> Result<(), StsError> {
    if value.is_empty() {
        return Err(StsError::InvalidParameterLength(format!("{name} is empty")));
    }
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(StsError::InvalidParameterLength(format!(
            "{name} must contain only decimal digits: {value:?}"
        )));
    }
    Ok(())
}

/// Truncate from the right or pad with `F` to exactly 16 characters.
fn normalize_block(mut hex: String) -> String {
    if hex.len() > BLOCK_HEX_LEN {
        hex.truncate(BLOCK_HEX_LEN);
    } else {
        while hex.len() < BLOCK_HEX_LEN {
            hex.push(CONTROL_BLOCK_PAD);
        }
    }
    hex
}

/// Key fields packed into 8 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlBlock(u64);

impl ControlBlock {
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    pub fn to_bytes(&self) -> [u8; 8] {
        self.0.to_be_bytes()
    }

    pub fn hex(&self) -> String {
        format_block_hex(self.0)
    }
}

/// Identification prefix and decoder reference number packed into 8 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanBlock(u64);

impl PanBlock {
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    pub fn to_bytes(&self) -> [u8; 8] {
        self.0.to_be_bytes()
    }

    pub fn hex(&self) -> String {
        format_block_hex(self.0)
    }
}
