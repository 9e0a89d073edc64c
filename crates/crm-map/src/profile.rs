//! Mapping profiles for reusing confirmed overrides across imports.
//!
//! A profile records the columns a user remapped by hand. Loading it onto
//! a fresh [`MappingState`] replays those overrides; columns absent from the
//! new file are reported and ignored.
//!
//! # Storage Format
//!
//! Profiles are pretty-printed JSON:
//!
//! ```json
//! {
//!   "version": "1.0",
//!   "saved_at": "2026-10-17T09:30:00Z",
//!   "description": "Trade show export",
//!   "overrides": { "Booth Visitor": "contact_name", "Badge Id": "skip" }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::state::MappingState;

/// Saved column overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingProfile {
    /// Version of the profile format.
    #[serde(default = "default_version")]
    pub version: String,
    /// Timestamp of when this profile was saved (RFC 3339).
    pub saved_at: Option<String>,
    /// Optional description or notes about this profile.
    pub description: Option<String>,
    /// Column -> target key (`organization_name`, ..., or `skip`).
    pub overrides: BTreeMap<String, String>,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl MappingProfile {
    /// Capture the user overrides of a mapping state.
    pub fn from_state(state: &MappingState) -> Self {
        Self {
            version: default_version(),
            saved_at: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
            description: None,
            overrides: state
                .overrides()
                .into_iter()
                .map(|(column, target)| (column, target.to_string()))
                .collect(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replay overrides onto a state. Returns the columns that were not
    /// present in the state's CSV.
    pub fn apply(&self, state: &mut MappingState) -> Result<Vec<String>> {
        let mut missing = Vec::new();
        for (column, target) in &self.overrides {
            if state.mapping_for_column(column).is_none() {
                warn!(column = %column, "profile column not present in CSV");
                missing.push(column.clone());
                continue;
            }
            state
                .override_column_str(column, target)
                .with_context(|| format!("apply profile override for '{column}'"))?;
        }
        Ok(missing)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("serialize mapping profile")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write mapping profile to {}", path.display()))?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read mapping profile from {}", path.display()))?;
        let profile: MappingProfile = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse mapping profile from {}", path.display()))?;
        Ok(profile)
    }
}
