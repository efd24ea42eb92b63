//! Tests for token parsing, decoding and amount evaluation.

use sts_rs::cipher::{BlockCipher64, DesBlockCipher};
use sts_rs::{
    decode, decode_amount, Amount, DecoderKey, StsError, Token, TokenClass, TokenDecoder,
};

fn fixture_key() -> DecoderKey {
    DecoderKey::from_hex("748F27D2E8F6BA36").unwrap()
}

/// The reference token decodes to known fields under the fixture key.
#[test]
fn test_reference_token_fields() {
    let fields = TokenDecoder::new(fixture_key())
        .decode_str("1865-3776-4842-2132-9404")
        .unwrap();

    assert_eq!(fields.class_bits, 1);
    assert_eq!(fields.class, TokenClass::NonMeterSpecific);
    assert_eq!(fields.subclass, 0);
    assert_eq!(fields.random, 2);
    assert_eq!(fields.identifier, 7_182_269);
    assert_eq!(fields.amount, Amount { exponent: 0, mantissa: 2347 });
    assert_eq!(fields.units, 234.7);
    assert_eq!(fields.check, 0xCDB0);
    assert_eq!(
        fields.raw_bits(),
        "0000001001101101100101111011110100001001001010111100110110110000"
    );
}

/// Grouped and plain token strings decode identically.
#[test]
fn test_separators_do_not_matter() {
    let decoder = TokenDecoder::new(fixture_key());
    let grouped = decoder.decode_str("1865-3776-4842-2132-9404").unwrap();
    let plain = decoder.decode_str("18653776484221329404").unwrap();
    let spaced = decoder.decode_str(" 1865 3776 4842 2132 9404 ").unwrap();
    assert_eq!(grouped, plain);
    assert_eq!(plain, spaced);
}

/// Decoding the same pair twice gives the same record.
#[test]
fn test_decode_is_pure() {
    let token: Token = "73786976294838206463".parse().unwrap();
    let key = fixture_key();
    assert_eq!(decode(&token, &key), decode(&token, &key));
}

/// Short tokens are zero-extended to 66 bits.
#[test]
fn test_short_token_decodes() {
    let token: Token = "1".parse().unwrap();
    assert_eq!(token.class_bits(), 0);
    assert_eq!(token.cipher_block(), 1);
    let fields = decode(&token, &fixture_key());
    assert_eq!(fields.class, TokenClass::Transfer);
}

/// A token built by encrypting a chosen block decodes back to that block.
#[test]
fn test_encrypted_payload_roundtrip() {
    let key = fixture_key();
    // subclass 3, random 9, TID 0x00ABCD, amount e=0 m=500, check 0x1234
    let plain: u64 = 0x39_00ABCD_01F4_1234;
    let block = DesBlockCipher::new(key.as_bytes()).encrypt(plain);
    let token = Token::from_parts(2, block);

    let fields = TokenDecoder::new(key).decode_str(&token.grouped()).unwrap();
    assert_eq!(fields.class, TokenClass::MeterSpecific);
    assert_eq!(fields.subclass, 3);
    assert_eq!(fields.random, 9);
    assert_eq!(fields.identifier, 0xABCD);
    assert_eq!(fields.amount_field, 0x01F4);
    assert_eq!(fields.units, 50.0);
    assert_eq!(fields.check, 0x1234);
}

/// Tokens above 66 bits or with letters fail at parse time.
#[test]
fn test_out_of_range_tokens() {
    let decoder = TokenDecoder::new(fixture_key());
    for bad in ["73786976294838206464", "99999999999999999999", "1865-3776-4842-2132-94O4", "", "-"] {
        assert!(
            matches!(decoder.decode_str(bad), Err(StsError::TokenOutOfRange(_))),
            "{bad:?}"
        );
    }
}

/// Amount formula fixed points.
#[test]
fn test_amount_formula() {
    assert_eq!(Amount { exponent: 0, mantissa: 500 }.value(), 50.0);
    assert_eq!(Amount { exponent: 1, mantissa: 0 }.value(), 1638.4);
    assert_eq!(decode_amount(0x01F4), 50.0);
    assert_eq!(decode_amount(0x4000), 1638.4);
    assert_eq!(decode_amount(0x0000), 0.0);
}

/// Decoded fields serialize to JSON for presentation layers.
#[test]
fn test_decoded_token_json() {
    let fields = TokenDecoder::new(fixture_key())
        .decode_str("18653776484221329404")
        .unwrap();
    let json = serde_json::to_value(&fields).unwrap();
    assert_eq!(json["identifier"], 7_182_269);
    assert_eq!(json["class"], "NonMeterSpecific");
    assert_eq!(json["amount"]["mantissa"], 2347);
    assert_eq!(json["check"], 0xCDB0);
}
