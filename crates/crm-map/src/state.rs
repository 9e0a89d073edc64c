//! Mapping state for interactive review.
//!
//! Holds the generated suggestions alongside the working mappings so a user
//! can override, skip or reset individual columns before importing.

use std::collections::BTreeMap;

use crm_model::{CanonicalField, FieldMapping, MappingTarget, ValidationResult};

use crate::engine::MappingEngine;
use crate::error::MappingError;

/// Mapping status of a canonical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStatus {
    /// A user confirmed or chose the column for this field.
    Confirmed,
    /// The generator suggested a column.
    Suggested,
    /// No column targets this field.
    Unmapped,
}

/// Working set of mappings for one CSV file.
#[derive(Debug, Clone)]
pub struct MappingState {
    engine: MappingEngine,
    suggestions: Vec<FieldMapping>,
    mappings: Vec<FieldMapping>,
}

impl MappingState {
    /// Run the engine over the headers and start from its suggestions.
    pub fn new(engine: MappingEngine, headers: &[String]) -> Self {
        let suggestions = engine.generate(headers);
        Self {
            engine,
            mappings: suggestions.clone(),
            suggestions,
        }
    }

    pub fn from_headers(headers: &[String]) -> Self {
        Self::new(MappingEngine::default(), headers)
    }

    pub fn mappings(&self) -> &[FieldMapping] {
        &self.mappings
    }

    pub fn into_mappings(self) -> Vec<FieldMapping> {
        self.mappings
    }

    pub fn suggestions(&self) -> &[FieldMapping] {
        &self.suggestions
    }

    /// The mapping for a CSV column.
    pub fn mapping_for_column(&self, column: &str) -> Option<&FieldMapping> {
        self.mappings.iter().find(|m| m.csv_column == column)
    }

    /// The first column mapped to a field.
    pub fn column_for(&self, field: CanonicalField) -> Option<&str> {
        self.mappings
            .iter()
            .find(|m| m.target_field() == Some(field))
            .map(|m| m.csv_column.as_str())
    }

    pub fn status(&self, field: CanonicalField) -> FieldStatus {
        match self
            .mappings
            .iter()
            .find(|m| m.target_field() == Some(field))
        {
            Some(m) if m.user_overridden => FieldStatus::Confirmed,
            Some(_) => FieldStatus::Suggested,
            None => FieldStatus::Unmapped,
        }
    }

    /// Point a column at a new target. Field targets are recorded at full
    /// confidence since a person chose them.
    pub fn override_column(
        &mut self,
        column: &str,
        target: MappingTarget,
    ) -> Result<(), MappingError> {
        let mapping = self.find_mut(column)?;
        mapping.maps_to = target;
        mapping.confidence = if target.is_skip() { 0 } else { 100 };
        mapping.user_overridden = true;
        Ok(())
    }

    /// Parse `target` (a field key or `skip`) and apply it.
    pub fn override_column_str(&mut self, column: &str, target: &str) -> Result<(), MappingError> {
        let parsed = target
            .parse::<MappingTarget>()
            .map_err(|_| MappingError::UnknownTarget {
                column: column.to_string(),
                target: target.to_string(),
            })?;
        self.override_column(column, parsed)
    }

    pub fn skip_column(&mut self, column: &str) -> Result<(), MappingError> {
        self.override_column(column, MappingTarget::Skip)
    }

    /// Restore the generated suggestion for a column.
    pub fn reset_column(&mut self, column: &str) -> Result<(), MappingError> {
        let suggestion = self
            .suggestions
            .iter()
            .find(|m| m.csv_column == column)
            .cloned()
            .ok_or_else(|| MappingError::ColumnNotFound(column.to_string()))?;
        *self.find_mut(column)? = suggestion;
        Ok(())
    }

    /// Overrides made by the user, keyed by column.
    pub fn overrides(&self) -> BTreeMap<String, MappingTarget> {
        self.mappings
            .iter()
            .filter(|m| m.user_overridden)
            .map(|m| (m.csv_column.clone(), m.maps_to))
            .collect()
    }

    pub fn validate(&self) -> ValidationResult {
        self.engine.validate(&self.mappings)
    }

    fn find_mut(&mut self, column: &str) -> Result<&mut FieldMapping, MappingError> {
        self.mappings
            .iter_mut()
            .find(|m| m.csv_column == column)
            .ok_or_else(|| MappingError::ColumnNotFound(column.to_string()))
    }
}
