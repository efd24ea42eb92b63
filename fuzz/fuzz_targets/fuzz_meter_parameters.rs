#![no_main]

use libfuzzer_sys::fuzz_target;
use sts_rs::{derive_decoder_key, MeterParameters, VendingKey};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let fields: Vec<&str> = text.splitn(5, '|').collect();
    if fields.len() != 5 {
        return;
    }

    // Validation either rejects the input or yields blocks that always parse
    if let Ok(params) = MeterParameters::new(fields[0], fields[1], fields[2], fields[3], fields[4]) {
        assert_eq!(params.control_block_hex().len(), 16);
        assert_eq!(params.pan_block_hex().len(), 16);
        let key = derive_decoder_key(&params, &VendingKey::from_bytes([0; 8]))
            .expect("validated parameters always derive");
        assert_eq!(key.to_hex().len(), 16);
    }
});
