//! Aggregate outcome of an import run.

use serde::{Deserialize, Serialize};

/// One organization-level failure that is not attributed to a whole batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportFailure {
    pub name: String,
    pub error: String,
}

/// A batch whose bulk insert failed as a unit.
///
/// Row-level attribution inside a failed batch is not available: the store
/// reports one error for the whole call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchError {
    /// Zero-based batch index.
    pub batch_index: usize,
    pub record_count: usize,
    pub message: String,
}

/// Counts and failure details of one import run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResult {
    pub success: bool,
    pub organizations_created: usize,
    pub organizations_skipped: usize,
    pub organizations_failed: usize,
    pub contacts_created: usize,
    pub contacts_failed: usize,
    pub failures: Vec<ImportFailure>,
    pub batch_errors: Vec<BatchError>,
    pub message: String,
}

impl ImportResult {
    pub fn imported(&self) -> usize {
        self.organizations_created
    }

    pub fn failed(&self) -> usize {
        self.organizations_failed
    }

    /// Organizations accounted for by this result.
    pub fn total(&self) -> usize {
        self.organizations_created + self.organizations_skipped + self.organizations_failed
    }

    /// Set `success` and `message` from the counts.
    pub fn finish(&mut self) {
        self.success = self.organizations_failed == 0;
        let mut message = format!(
            "Imported {} organizations ({} contacts), {} failed",
            self.organizations_created, self.contacts_created, self.organizations_failed
        );
        if self.organizations_skipped > 0 {
            message.push_str(&format!(
                ", {} skipped as duplicates",
                self.organizations_skipped
            ));
        }
        if self.contacts_failed > 0 {
            message.push_str(&format!(", {} contacts failed", self.contacts_failed));
        }
        self.message = message;
    }
}
