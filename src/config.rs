//! Process configuration for the synchronization engine.
//!
//! Configuration is read once at start-up from TOML, optionally overlaid
//! with `JACKALOPE_*` environment variables, and passed into the
//! [`crate::foreman::Foreman`] by value.
//!
//! ```toml
//! employer_vendor = "asana"
//! employee_vendor = "taskrabbit"
//! max_passes_per_task = 16
//!
//! [phrases]
//! registration_confirmation = "You're registered!"
//!
//! [vocabularies.taskrabbit]
//! entries = [
//!     { word = "open", status = "posted" },
//!     { word = "accepted", status = "assigned" },
//! ]
//! ```

use crate::phrase::Phrasebook;
use crate::task::{
    adapters::{JsonFieldMapper, VendorFieldNames},
    domain::{StatusVocabulary, TaskDomainError, VendorName},
};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Environment variable overriding the employer vendor name.
pub const ENV_EMPLOYER_VENDOR: &str = "JACKALOPE_EMPLOYER_VENDOR";
/// Environment variable overriding the employee vendor name.
pub const ENV_EMPLOYEE_VENDOR: &str = "JACKALOPE_EMPLOYEE_VENDOR";
/// Environment variable overriding the pass limit.
pub const ENV_MAX_PASSES: &str = "JACKALOPE_MAX_PASSES";

/// Pass limit used when none is configured.
pub const DEFAULT_MAX_PASSES: usize = 16;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed.
    #[error("invalid configuration file: {0}")]
    Parse(#[from] toml::de::Error),

    /// An environment override held an unusable value.
    #[error("invalid value {value:?} for {key}")]
    InvalidValue {
        /// Variable or field name.
        key: &'static str,
        /// Rejected value.
        value: String,
    },

    /// A vendor name failed validation.
    #[error(transparent)]
    InvalidVendor(#[from] TaskDomainError),

    /// Both sides name the same vendor.
    #[error("employer and employee vendors must differ, both are {0}")]
    SameVendor(VendorName),

    /// The pass limit would stop every drain before its first pass.
    #[error("max_passes_per_task must be at least 1")]
    ZeroPassLimit,

    /// Two tables in one section name the same vendor once normalized.
    #[error("[{section}] configures {vendor} more than once")]
    DuplicateVendorTable {
        /// Section holding the duplicate, `vocabularies` or `fields`.
        section: &'static str,
        /// Vendor configured twice.
        vendor: VendorName,
    },
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Requester-side vendor name.
    pub employer_vendor: String,
    /// Doer-side vendor name.
    pub employee_vendor: String,
    /// Upper bound on reconciliation passes per task drain.
    pub max_passes_per_task: usize,
    /// Messages posted on vendor tasks.
    pub phrases: Phrasebook,
    /// Per-vendor status vocabularies, keyed by vendor name in any case.
    pub vocabularies: BTreeMap<String, StatusVocabulary>,
    /// Per-vendor field names, keyed by vendor name in any case.
    pub fields: BTreeMap<String, VendorFieldNames>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            employer_vendor: "asana".to_owned(),
            employee_vendor: "taskrabbit".to_owned(),
            max_passes_per_task: DEFAULT_MAX_PASSES,
            phrases: Phrasebook::default(),
            vocabularies: BTreeMap::new(),
            fields: BTreeMap::new(),
        }
    }
}

impl SyncConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the document is malformed or fails
    /// validation.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Builds the default configuration overlaid with process environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an override is unusable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Applies `JACKALOPE_*` overrides read through `lookup`, then
    /// validates.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an override is unusable.
    pub fn with_env_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(vendor) = lookup(ENV_EMPLOYER_VENDOR) {
            self.employer_vendor = vendor;
        }
        if let Some(vendor) = lookup(ENV_EMPLOYEE_VENDOR) {
            self.employee_vendor = vendor;
        }
        if let Some(raw) = lookup(ENV_MAX_PASSES) {
            self.max_passes_per_task =
                raw.trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue {
                        key: ENV_MAX_PASSES,
                        value: raw.clone(),
                    })?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Checks vendor names, per-vendor table keys, and limits.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on the first invalid setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let employer = self.employer_vendor()?;
        let employee = self.employee_vendor()?;
        if employer == employee {
            return Err(ConfigError::SameVendor(employer));
        }
        if self.max_passes_per_task == 0 {
            return Err(ConfigError::ZeroPassLimit);
        }
        check_vendor_keys("vocabularies", &self.vocabularies)?;
        check_vendor_keys("fields", &self.fields)
    }

    /// Returns the validated employer vendor name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidVendor`] when the name is invalid.
    pub fn employer_vendor(&self) -> Result<VendorName, ConfigError> {
        Ok(VendorName::new(self.employer_vendor.as_str())?)
    }

    /// Returns the validated employee vendor name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidVendor`] when the name is invalid.
    pub fn employee_vendor(&self) -> Result<VendorName, ConfigError> {
        Ok(VendorName::new(self.employee_vendor.as_str())?)
    }

    /// Returns the vocabulary configured for `vendor`, or the canonical one.
    #[must_use]
    pub fn vocabulary_for(&self, vendor: &VendorName) -> StatusVocabulary {
        table_for(&self.vocabularies, vendor)
            .cloned()
            .unwrap_or_default()
    }

    /// Builds the field mapper for `vendor` from its configured names and
    /// vocabulary.
    #[must_use]
    pub fn mapper_for(&self, vendor: &VendorName) -> JsonFieldMapper {
        let fields = table_for(&self.fields, vendor)
            .cloned()
            .unwrap_or_default();
        JsonFieldMapper::new(fields, self.vocabulary_for(vendor))
    }
}

/// Finds the table whose key names `vendor`, ignoring case and padding.
fn table_for<'t, T>(tables: &'t BTreeMap<String, T>, vendor: &VendorName) -> Option<&'t T> {
    tables
        .iter()
        .find(|(key, _)| VendorName::new(key.as_str()).is_ok_and(|name| name == *vendor))
        .map(|(_, table)| table)
}

fn check_vendor_keys<T>(
    section: &'static str,
    tables: &BTreeMap<String, T>,
) -> Result<(), ConfigError> {
    let mut seen = BTreeSet::new();
    for key in tables.keys() {
        let vendor = VendorName::new(key.as_str())?;
        if seen.contains(&vendor) {
            return Err(ConfigError::DuplicateVendorTable { section, vendor });
        }
        seen.insert(vendor);
    }
    Ok(())
}
