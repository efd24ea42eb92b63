#![no_main]

use libfuzzer_sys::fuzz_target;
use sts_rs::{DecoderKey, Token, TokenDecoder};

fuzz_target!(|data: &[u8]| {
    if data.len() < 8 {
        return;
    }
    let mut key = [0u8; 8];
    key.copy_from_slice(&data[..8]);
    let decoder = TokenDecoder::new(DecoderKey::from_bytes(key));

    // Arbitrary text must parse or fail cleanly, never panic
    if let Ok(text) = std::str::from_utf8(&data[8..]) {
        if let Ok(fields) = decoder.decode_str(text) {
            assert_eq!(fields.raw_bits().len(), 64);
            assert!(fields.units >= 0.0);
        }
    }

    // Every in-range value decodes and renders back to the same token
    if data.len() >= 17 {
        let mut raw = [0u8; 16];
        raw[7..].copy_from_slice(&data[8..17]);
        let value = u128::from_be_bytes(raw) & sts_rs::token::TOKEN_MAX;
        let token = Token::from_u128(value).expect("masked to 66 bits");
        assert_eq!(token.grouped().parse::<Token>().ok(), Some(token));
        let _ = decoder.decode(&token);
    }
});
