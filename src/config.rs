//! # Configuration
//!
//! Where the vending key lives and which meter parameters the tools fall back
//! to when none are given.

use crate::constants::{DEFAULT_KEY_PATH, KEY_PATH_ENV};
use crate::dkga::MeterParameters;
use crate::error::StsError;
use crate::keys::FileKeyStore;
use std::path::PathBuf;

/// Default meter parameters as plain strings, validated on use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeterDefaults {
    pub key_type: String,
    pub supply_group_code: String,
    pub tariff_index: String,
    pub key_revision_number: String,
    pub decoder_reference_number: String,
}

impl Default for MeterDefaults {
    fn default() -> Self {
        MeterDefaults {
            key_type: "2".to_string(),
            supply_group_code: "123456".to_string(),
            tariff_index: "7".to_string(),
            key_revision_number: "1".to_string(),
            decoder_reference_number: "37194275246".to_string(),
        }
    }
}

impl MeterDefaults {
    pub fn to_parameters(&self) -> Result<MeterParameters, StsError> {
        MeterParameters::new(
            &self.key_type,
            &self.supply_group_code,
            &self.tariff_index,
            &self.key_revision_number,
            &self.decoder_reference_number,
        )
    }
}

/// Crate configuration.
#[derive(Debug, Clone)]
pub struct StsConfig {
    /// Vending key file
    pub key_path: PathBuf,
    pub meter: MeterDefaults,
}

impl Default for StsConfig {
    fn default() -> Self {
        StsConfig {
            key_path: PathBuf::from(DEFAULT_KEY_PATH),
            meter: MeterDefaults::default(),
        }
    }
}

impl StsConfig {
    /// Defaults, with the key path taken from `STS_VENDING_KEY_PATH` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(path) = std::env::var_os(KEY_PATH_ENV).filter(|p| !p.is_empty()) {
            config.key_path = PathBuf::from(path);
        }
        config
    }

    pub fn with_key_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.key_path = path.into();
        self
    }

    pub fn key_store(&self) -> FileKeyStore {
        FileKeyStore::new(&self.key_path)
    }
}
