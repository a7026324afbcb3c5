//! Provider timing/label profiles.
//!
//! # Responsibility
//! - Describe the labels and simulated delays one provider variant uses.
//! - Load custom profiles from JSON and validate them before use.
//!
//! # Invariants
//! - Every label is non-empty after trimming.
//! - `name` is a lowercase identifier (`[a-z0-9_-]+`).
//! - Delays are whole milliseconds; zero is allowed.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// How a provider treats a trigger while a completion is still pending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Every trigger schedules its own completion; the last write wins.
    #[default]
    Coexist,
    /// A new trigger cancels the pending completion before scheduling.
    Restart,
}

/// Labels and delays for one provider variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderProfile {
    /// Short identifier used in logs, e.g. `com1`.
    pub name: String,
    pub idle_label: String,
    pub loading_label: String,
    pub loaded_label: String,
    pub refreshing_label: String,
    pub refreshed_label: String,
    pub load_delay_ms: u64,
    pub refresh_delay_ms: u64,
    #[serde(default)]
    pub overlap: OverlapPolicy,
}

impl ProviderProfile {
    /// Built-in profile for variant A.
    pub fn com_one() -> Self {
        Self {
            name: "com1".to_string(),
            idle_label: "Idle".to_string(),
            loading_label: "Loading...".to_string(),
            loaded_label: "Com1 Loaded".to_string(),
            refreshing_label: "Refreshing...".to_string(),
            refreshed_label: "Com1 Refreshed".to_string(),
            load_delay_ms: 1500,
            refresh_delay_ms: 1000,
            overlap: OverlapPolicy::Coexist,
        }
    }

    /// Built-in profile for variant B.
    pub fn com_two() -> Self {
        Self {
            name: "com2".to_string(),
            idle_label: "Ready".to_string(),
            loading_label: "Fetching...".to_string(),
            loaded_label: "Com2 Loaded".to_string(),
            refreshing_label: "Reloading...".to_string(),
            refreshed_label: "Com2 Refreshed".to_string(),
            load_delay_ms: 1200,
            refresh_delay_ms: 800,
            overlap: OverlapPolicy::Coexist,
        }
    }

    /// Parses and validates a profile from JSON.
    pub fn from_json_str(raw: &str) -> Result<Self, ProfileError> {
        let profile: Self =
            serde_json::from_str(raw).map_err(|err| ProfileError::Malformed(err.to_string()))?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn with_overlap(mut self, overlap: OverlapPolicy) -> Self {
        self.overlap = overlap;
        self
    }

    pub fn load_delay(&self) -> Duration {
        Duration::from_millis(self.load_delay_ms)
    }

    pub fn refresh_delay(&self) -> Duration {
        Duration::from_millis(self.refresh_delay_ms)
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        if !is_valid_profile_name(&self.name) {
            return Err(ProfileError::InvalidName(self.name.clone()));
        }

        for (field, value) in [
            ("idle_label", &self.idle_label),
            ("loading_label", &self.loading_label),
            ("loaded_label", &self.loaded_label),
            ("refreshing_label", &self.refreshing_label),
            ("refreshed_label", &self.refreshed_label),
        ] {
            if value.trim().is_empty() {
                return Err(ProfileError::EmptyLabel(field));
            }
        }
        Ok(())
    }
}

/// Profile load/validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    Malformed(String),
    InvalidName(String),
    EmptyLabel(&'static str),
}

impl Display for ProfileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(detail) => write!(f, "provider profile is malformed: {detail}"),
            Self::InvalidName(value) => write!(f, "provider profile name is invalid: {value}"),
            Self::EmptyLabel(field) => write!(f, "provider profile label must not be empty: {field}"),
        }
    }
}

impl Error for ProfileError {}

fn is_valid_profile_name(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
}
