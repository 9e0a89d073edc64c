//! Import pipeline: ingest, map, validate, group, import.
//!
//! Each stage is a plain function so the CLI commands and the integration
//! tests drive exactly the same code.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::{info, trace, warn};

use crm_import::{ImportExecutor, ImportOptions, ImportProgress, LookupCache, OrganizationStore};
use crm_ingest::{CsvTable, STRICT_TEMPLATE_HEADERS, read_csv_file, require_headers};
use crm_map::{MappingProfile, MappingState};
use crm_model::{ImportResult, MappingTarget, OrganizationGroup, ValidationResult};
use crm_transform::{RowParser, group_rows};
use crm_validate::{ImportPreview, ValidationOptions, build_preview};

use crate::logging::redact_value;

/// A `COLUMN=TARGET` override given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnOverride {
    pub column: String,
    pub target: MappingTarget,
}

impl FromStr for ColumnOverride {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (column, target) = s
            .rsplit_once('=')
            .ok_or_else(|| format!("expected COLUMN=FIELD, got '{s}'"))?;
        let column = column.trim();
        if column.is_empty() {
            return Err(format!("missing column name in '{s}'"));
        }
        let target = target
            .parse::<MappingTarget>()
            .map_err(|error| error.to_string())?;
        Ok(Self {
            column: column.to_string(),
            target,
        })
    }
}

impl fmt::Display for ColumnOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.column, self.target)
    }
}

/// Read the import file, optionally requiring the template's key columns.
pub fn load_table(path: &Path, strict_template: bool) -> Result<CsvTable> {
    let table = read_csv_file(path).with_context(|| format!("load {}", path.display()))?;
    if strict_template {
        require_headers(&table, STRICT_TEMPLATE_HEADERS)
            .with_context(|| format!("check template columns of {}", path.display()))?;
    }
    info!(
        path = %path.display(),
        columns = table.headers.len(),
        rows = table.row_count(),
        "Loaded CSV"
    );
    Ok(table)
}

/// Generate mappings, then replay a saved profile and explicit overrides.
pub fn resolve_mappings(
    headers: &[String],
    profile: Option<&Path>,
    overrides: &[ColumnOverride],
) -> Result<MappingState> {
    let mut state = MappingState::from_headers(headers);

    if let Some(path) = profile {
        let profile = MappingProfile::load(path)?;
        let missing = profile.apply(&mut state)?;
        if !missing.is_empty() {
            warn!(
                profile = %path.display(),
                missing = missing.len(),
                "profile refers to columns not in this file"
            );
        }
    }

    for item in overrides {
        state
            .override_column(&item.column, item.target)
            .with_context(|| format!("apply override {item}"))?;
    }
    Ok(state)
}

/// Rows ready for import plus what the user sees before confirming.
#[derive(Debug, Clone, Serialize)]
pub struct ImportPlan {
    pub mapping: ValidationResult,
    pub preview: ImportPreview,
    #[serde(skip)]
    pub groups: Vec<OrganizationGroup>,
}

impl ImportPlan {
    pub fn contact_count(&self) -> usize {
        self.groups.iter().map(|group| group.contacts.len()).sum()
    }
}

/// Validate rows and group the valid ones.
///
/// Fails when the mapping set is incomplete; nothing is grouped then.
pub fn plan_import(
    table: &CsvTable,
    state: &MappingState,
    validation: ValidationOptions,
    sample_size: usize,
) -> Result<ImportPlan> {
    let mapping = state.validate();
    if !mapping.is_valid {
        bail!("Mapping is incomplete: {}", mapping.errors.join("; "));
    }

    let parser = RowParser::new(&table.headers, state.mappings());
    let preview = build_preview(&parser, &table.rows, validation, sample_size);
    for invalid in &preview.invalid_sample {
        trace!(
            row = invalid.row_number,
            organization = redact_value(&invalid.organization_name),
            "row rejected"
        );
    }

    let valid_rows = preview.valid_rows(&table.rows);
    let groups = group_rows(&parser, &valid_rows);
    info!(
        valid = preview.valid_count,
        invalid = preview.invalid_count,
        groups = groups.len(),
        "Planned import"
    );

    Ok(ImportPlan {
        mapping,
        preview,
        groups,
    })
}

/// Run the executor over a plan's groups.
pub async fn execute_plan<S, F>(
    plan: ImportPlan,
    store: &mut S,
    options: ImportOptions,
    cache: Option<&mut LookupCache>,
    progress: F,
) -> ImportResult
where
    S: OrganizationStore,
    F: FnMut(ImportProgress),
{
    let executor = ImportExecutor::new(store, options);
    let executor = match cache {
        Some(cache) => executor.with_cache(cache),
        None => executor,
    };
    executor.run(plan.groups, progress).await
}
