//! Unit tests for the `StsError` enum and its associated `Display` trait implementation.

use std::io;
use sts_rs::error::StsError;

/// Tests that the `StorageError` variant is correctly formatted.
#[test]
fn test_storage_error() {
    let err = StsError::StorageError("disk full".to_string());
    assert_eq!(err.to_string(), "Key storage error: disk full");
}

/// Tests that the `NotFound` variant is correctly formatted.
#[test]
fn test_not_found_error() {
    assert_eq!(StsError::NotFound.to_string(), "Vending key not found");
}

/// Tests that the `MalformedKey` variant is correctly formatted.
#[test]
fn test_malformed_key_error() {
    let err = StsError::MalformedKey("expected 8 bytes, got 6".to_string());
    assert_eq!(err.to_string(), "Malformed vending key: expected 8 bytes, got 6");
}

/// Tests that the `InvalidParameterLength` variant is correctly formatted.
#[test]
fn test_invalid_parameter_length_error() {
    let err = StsError::InvalidParameterLength("key_type is empty".to_string());
    assert_eq!(err.to_string(), "Invalid parameter length: key_type is empty");
}

/// Tests that the `TokenOutOfRange` variant is correctly formatted.
#[test]
fn test_token_out_of_range_error() {
    let err = StsError::TokenOutOfRange("too large".to_string());
    assert_eq!(err.to_string(), "Token out of range: too large");
}

/// Tests that the `InvalidAmount` variant is correctly formatted.
#[test]
fn test_invalid_amount_error() {
    let err = StsError::InvalidAmount(4.99);
    assert_eq!(err.to_string(), "Invalid amount: 4.99 (minimum is 5)");
}

/// Tests that a missing file maps to `NotFound` and other I/O failures to `StorageError`.
#[test]
fn test_from_io_error() {
    let missing = io::Error::new(io::ErrorKind::NotFound, "gone");
    assert!(matches!(StsError::from(missing), StsError::NotFound));

    let denied = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
    match StsError::from(denied) {
        StsError::StorageError(msg) => assert!(msg.contains("denied")),
        other => panic!("unexpected error: {other:?}"),
    }
}
