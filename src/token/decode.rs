//! # Token Decoding
//!
//! Decrypts the 64-bit block of a token with a meter's decoder key and slices
//! the plaintext into its fields. The check field is surfaced as-is; nothing
//! here validates it against the rest of the block.

use super::amount::Amount;
use super::{Token, TokenClass};
use crate::cipher::{BlockCipher64, DesBlockCipher};
use crate::constants::{AMOUNT_BITS, CHECK_BITS, RANDOM_BITS, SUBCLASS_BITS, TID_BITS};
use crate::dkga::{derive_decoder_key, MeterParameters};
use crate::error::StsError;
use crate::keys::{DecoderKey, VendingKey};
use crate::util::bits::{field_msb, to_binary_string};
use serde::Serialize;

const BLOCK_BITS: u32 = 64;
const SUBCLASS_OFFSET: u32 = 0;
const RANDOM_OFFSET: u32 = SUBCLASS_OFFSET + SUBCLASS_BITS;
const TID_OFFSET: u32 = RANDOM_OFFSET + RANDOM_BITS;
const AMOUNT_OFFSET: u32 = TID_OFFSET + TID_BITS;
const CHECK_OFFSET: u32 = AMOUNT_OFFSET + AMOUNT_BITS;

/// Fields recovered from one token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedToken {
    pub class_bits: u8,
    pub class: TokenClass,
    pub subclass: u8,
    pub random: u8,
    /// Token identifier (TID)
    pub identifier: u32,
    pub amount_field: u16,
    pub amount: Amount,
    /// `amount` evaluated to a quantity
    pub units: f64,
    pub check: u16,
    /// Decrypted 64-bit block
    pub plain_block: u64,
}

impl DecodedToken {
    /// Split a decrypted block. `class_bits` come from the clear part of the
    /// token.
    pub fn from_plain_block(class_bits: u8, plain_block: u64) -> Self {
        let field = |offset, width| field_msb(plain_block, BLOCK_BITS, offset, width);
        let amount_field = field(AMOUNT_OFFSET, AMOUNT_BITS) as u16;
        let amount = Amount::from_field(amount_field);

        Self {
            class_bits,
            class: TokenClass::from_bits(class_bits),
            subclass: field(SUBCLASS_OFFSET, SUBCLASS_BITS) as u8,
            random: field(RANDOM_OFFSET, RANDOM_BITS) as u8,
            identifier: field(TID_OFFSET, TID_BITS) as u32,
            amount_field,
            amount,
            units: amount.value(),
            check: field(CHECK_OFFSET, CHECK_BITS) as u16,
            plain_block,
        }
    }

    /// The decrypted block as 64 binary digits, most significant first.
    pub fn raw_bits(&self) -> String {
        to_binary_string(self.plain_block, BLOCK_BITS)
    }
}

/// Decrypt and split `token` with `decoder_key`.
pub fn decode(token: &Token, decoder_key: &DecoderKey) -> DecodedToken {
    TokenDecoder::new(decoder_key.clone()).decode(token)
}

/// Decodes tokens for one meter.
pub struct TokenDecoder {
    decoder_key: DecoderKey,
    cipher: DesBlockCipher,
}

impl TokenDecoder {
    pub fn new(decoder_key: DecoderKey) -> Self {
        let cipher = DesBlockCipher::new(decoder_key.as_bytes());
        Self { decoder_key, cipher }
    }

    /// Derive the meter's decoder key and bind it.
    pub fn for_meter(params: &MeterParameters, vending_key: &VendingKey) -> Result<Self, StsError> {
        Ok(Self::new(derive_decoder_key(params, vending_key)?))
    }

    pub fn decoder_key(&self) -> &DecoderKey {
        &self.decoder_key
    }

    pub fn decode(&self, token: &Token) -> DecodedToken {
        let plain = self.cipher.decrypt(token.cipher_block());
        DecodedToken::from_plain_block(token.class_bits(), plain)
    }

    /// Parse the external string form, then decode.
    pub fn decode_str(&self, token: &str) -> Result<DecodedToken, StsError> {
        Ok(self.decode(&token.parse()?))
    }
}
