//! CSV header to CRM field mapping.
//!
//! - **Patterns** (`patterns`): synonyms accepted for each canonical field
//! - **Matcher** (`matcher`): exact / substring / Levenshtein confidence scoring
//! - **Engine** (`engine`): initial mapping generation and completeness checks
//! - **State** (`state`): user overrides on top of generated suggestions
//! - **Profile** (`profile`): JSON persistence of overrides
//!
//! # Example
//!
//! ```ignore
//! use crm_map::{MappingState, validate_mapping_completeness};
//!
//! let mut state = MappingState::from_headers(&headers);
//! state.override_column_str("Booth Visitor", "contact_name")?;
//! let result = state.validate();
//! ```

mod engine;
mod error;
mod matcher;
mod patterns;
mod profile;
mod state;
mod utils;

pub use engine::{
    ConfidenceLevel, FieldCandidate, LOW_CONFIDENCE_THRESHOLD, MISSING_ORGANIZATION_ERROR,
    MappingEngine, generate_initial_mappings, validate_mapping_completeness,
};
pub use error::MappingError;
pub use matcher::{
    EXACT_CONFIDENCE, HeaderMatch, MatchKind, SUBSTRING_CONFIDENCE, match_confidence,
    match_header, similarity,
};
pub use patterns::{all_patterns, is_known_header, patterns_for};
pub use profile::MappingProfile;
pub use state::{FieldStatus, MappingState};
pub use utils::{normalize_header, safe_column_name};
