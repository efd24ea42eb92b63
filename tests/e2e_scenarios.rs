//! End-to-end scenarios: key store -> decoder key -> token decode.

use sts_rs::{
    decode_token, DecoderKeyDeriver, FileKeyStore, MemoryKeyStore, MeterParameters, StsConfig,
    TokenClass, TokenDecoder, VendingKey, VendingKeyStore,
};
use tempfile::TempDir;

fn reference_meter() -> MeterParameters {
    MeterParameters::new("2", "123456", "7", "1", "37194275246").unwrap()
}

/// Scenario: a vending station with a pinned zero key decodes a customer token.
#[test]
fn test_pinned_key_station() {
    let store = MemoryKeyStore::with_key(VendingKey::from_bytes([0; 8]));
    let deriver = DecoderKeyDeriver::from_store(&store).unwrap();
    let decoder = TokenDecoder::new(deriver.derive(&reference_meter()).unwrap());

    assert_eq!(decoder.decoder_key().to_hex(), "748F27D2E8F6BA36");
    let fields = decoder.decode_str("1865-3776-4842-2132-9404").unwrap();
    assert_eq!(fields.class, TokenClass::NonMeterSpecific);
    assert_eq!(fields.identifier, 7_182_269);
    assert_eq!(fields.units, 234.7);
}

/// Scenario: first run on a fresh install creates the key file, later runs
/// reuse it and decode identically.
#[test]
fn test_fresh_install_lifecycle() {
    let dir = TempDir::new().unwrap();
    let config = StsConfig::default().with_key_path(dir.path().join("data").join("VendingKey.key"));

    let store = config.key_store();
    let first_key = DecoderKeyDeriver::from_store(&store)
        .unwrap()
        .derive(&reference_meter())
        .unwrap();
    assert!(store.exists());

    // a new process reads the same file
    let reopened = FileKeyStore::new(&config.key_path);
    let vending_key = reopened.read().unwrap();
    let second_key = DecoderKeyDeriver::new(vending_key.clone())
        .derive(&reference_meter())
        .unwrap();
    assert_eq!(first_key, second_key);

    let token = "1865-3776-4842-2132-9404";
    let a = decode_token(token, &reference_meter(), &vending_key).unwrap();
    let b = TokenDecoder::new(first_key).decode_str(token).unwrap();
    assert_eq!(a, b);
}

/// Scenario: rotating the vending key changes every meter's decoder key.
#[test]
fn test_key_rotation() {
    let dir = TempDir::new().unwrap();
    let store = FileKeyStore::new(dir.path().join("vk.key"));

    let before = DecoderKeyDeriver::from_store(&store).unwrap().derive(&reference_meter()).unwrap();
    store.generate().unwrap();
    let after = DecoderKeyDeriver::from_store(&store).unwrap().derive(&reference_meter()).unwrap();
    assert_ne!(before, after);
}

/// Scenario: one vending key serves meters with both reference lengths.
#[test]
fn test_mixed_meter_fleet() {
    let vk = VendingKey::from_bytes([0; 8]);
    let fleet = [
        (MeterParameters::new("2", "123456", "7", "1", "37194275246").unwrap(), "748F27D2E8F6BA36"),
        (MeterParameters::new("1", "600100", "01", "2", "123456789012").unwrap(), "A3D987E84BF47764"),
    ];
    for (params, expected) in fleet.iter() {
        let decoder = TokenDecoder::for_meter(params, &vk).unwrap();
        assert_eq!(decoder.decoder_key().to_hex(), *expected);
        assert!(decoder.decode_str("0000-0000-0000-0000-0000").is_ok());
    }
}
