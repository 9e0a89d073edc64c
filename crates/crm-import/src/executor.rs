//! Sequential batched import of organization groups.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crm_model::{BatchError, ImportFailure, ImportResult, OrganizationGroup};

use crate::cache::LookupCache;
use crate::store::{NewContact, NewOrganization, OrganizationStore, StoredOrganization};

pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Message recorded for batches attempted without a signed-in actor.
pub const AUTHENTICATION_REQUIRED: &str = "Authentication required";

/// How organizations that already exist in the store are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DuplicatePolicy {
    /// Look names up first and skip those that exist or repeat in the run.
    #[default]
    #[serde(rename = "prefilter")]
    PreFilter,
    /// Send everything; the store's unique constraint fails the batch.
    #[serde(rename = "store")]
    StoreEnforced,
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PreFilter => "prefilter",
            Self::StoreEnforced => "store",
        })
    }
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "prefilter" | "pre-filter" => Ok(Self::PreFilter),
            "store" | "store-enforced" => Ok(Self::StoreEnforced),
            other => Err(format!("unknown duplicate policy '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOptions {
    pub batch_size: usize,
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}

/// Reported after each batch completes, successful or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportProgress {
    /// Batches finished so far.
    pub completed_batches: usize,
    pub total_batches: usize,
    /// `round(completed / total * 100)`.
    pub percent: u8,
}

impl ImportProgress {
    fn new(completed_batches: usize, total_batches: usize) -> Self {
        let percent = if total_batches == 0 {
            100
        } else {
            ((completed_batches as f64 / total_batches as f64) * 100.0).round() as u8
        };
        Self {
            completed_batches,
            total_batches,
            percent,
        }
    }
}

/// Drives groups into a store batch by batch.
///
/// Store errors never escape [`ImportExecutor::run`]; they are folded into
/// the returned [`ImportResult`].
pub struct ImportExecutor<'a, S> {
    store: &'a mut S,
    options: ImportOptions,
    cache: Option<&'a mut LookupCache>,
}

impl<'a, S: OrganizationStore> ImportExecutor<'a, S> {
    pub fn new(store: &'a mut S, options: ImportOptions) -> Self {
        Self {
            store,
            options,
            cache: None,
        }
    }

    /// Answer duplicate lookups from `cache` first and record new answers in it.
    pub fn with_cache(mut self, cache: &'a mut LookupCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub async fn run<F>(mut self, groups: Vec<OrganizationGroup>, mut progress: F) -> ImportResult
    where
        F: FnMut(ImportProgress),
    {
        let mut result = ImportResult::default();
        let total_groups = groups.len();

        let pending = match self.options.duplicate_policy {
            DuplicatePolicy::PreFilter => self.skip_duplicates(groups, &mut result).await,
            DuplicatePolicy::StoreEnforced => groups,
        };

        let batch_size = self.options.batch_size.max(1);
        let total_batches = pending.len().div_ceil(batch_size);
        info!(
            groups = total_groups,
            pending = pending.len(),
            batches = total_batches,
            policy = %self.options.duplicate_policy,
            "Starting import"
        );

        for (batch_index, batch) in pending.chunks(batch_size).enumerate() {
            self.import_batch(batch_index, batch, &mut result).await;
            progress(ImportProgress::new(batch_index + 1, total_batches));
        }

        result.finish();
        info!(
            created = result.organizations_created,
            skipped = result.organizations_skipped,
            failed = result.organizations_failed,
            contacts = result.contacts_created,
            "Import finished"
        );
        result
    }

    /// Drop groups whose name already exists or repeats earlier in the run.
    /// A failed lookup leaves duplicate handling to the store.
    async fn skip_duplicates(
        &mut self,
        groups: Vec<OrganizationGroup>,
        result: &mut ImportResult,
    ) -> Vec<OrganizationGroup> {
        let Some(existing) = self.existing_names(&groups).await else {
            return groups;
        };

        let mut claimed = HashSet::new();
        let mut pending = Vec::with_capacity(groups.len());
        for group in groups {
            let key = group.name().to_lowercase();
            if existing.contains(&key) || !claimed.insert(key) {
                debug!(organization = %group.name(), "skipping duplicate organization");
                result.organizations_skipped += 1;
            } else {
                pending.push(group);
            }
        }
        pending
    }

    /// Lowercased names that already exist, or `None` when the lookup failed.
    async fn existing_names(&mut self, groups: &[OrganizationGroup]) -> Option<HashSet<String>> {
        let mut existing = HashSet::new();
        let mut unknown = Vec::new();
        for group in groups {
            match self.cache.as_deref().and_then(|cache| cache.get(group.name())) {
                Some(true) => {
                    existing.insert(group.name().to_lowercase());
                }
                Some(false) => {}
                None => unknown.push(group.name().to_string()),
            }
        }
        if unknown.is_empty() {
            return Some(existing);
        }

        match self.store.find_existing_names(&unknown).await {
            Ok(found) => {
                let found: HashSet<String> = found.iter().map(|name| name.to_lowercase()).collect();
                if let Some(cache) = self.cache.as_deref_mut() {
                    for name in &unknown {
                        cache.insert(name, found.contains(&name.to_lowercase()));
                    }
                }
                existing.extend(found);
                Some(existing)
            }
            Err(error) => {
                warn!(%error, "duplicate lookup failed, relying on store constraint");
                None
            }
        }
    }

    async fn import_batch(
        &mut self,
        batch_index: usize,
        batch: &[OrganizationGroup],
        result: &mut ImportResult,
    ) {
        let actor = match self.store.current_actor().await {
            Ok(Some(actor)) => actor,
            Ok(None) => {
                fail_batch(result, batch_index, batch.len(), AUTHENTICATION_REQUIRED);
                return;
            }
            Err(error) => {
                fail_batch(result, batch_index, batch.len(), &error.to_string());
                return;
            }
        };

        let organizations: Vec<NewOrganization> = batch
            .iter()
            .map(|group| NewOrganization::new(group.organization.clone(), &actor))
            .collect();
        let stored = match self.store.insert_organizations(&organizations).await {
            Ok(stored) => stored,
            Err(error) => {
                fail_batch(result, batch_index, batch.len(), &error.to_string());
                return;
            }
        };
        let paired = pair_records(batch, &stored);
        if paired.len() < batch.len() {
            let message = format!(
                "Store returned {} of {} organizations",
                paired.len(),
                batch.len()
            );
            fail_batch(result, batch_index, batch.len() - paired.len(), &message);
        }
        result.organizations_created += paired.len();
        if let Some(cache) = self.cache.as_deref_mut() {
            for (_, record) in &paired {
                cache.insert(&record.name, true);
            }
        }

        let contacts: Vec<NewContact> = paired
            .iter()
            .flat_map(|&(group, record)| {
                let actor = &actor;
                group
                    .contacts
                    .iter()
                    .map(move |contact| NewContact::new(contact.clone(), record.id, actor))
            })
            .collect();
        if contacts.is_empty() {
            debug!(batch = batch_index, organizations = paired.len(), "batch imported");
            return;
        }

        match self.store.insert_contacts(&contacts).await {
            Ok(created) => {
                result.contacts_created += created;
                debug!(
                    batch = batch_index,
                    organizations = paired.len(),
                    contacts = created,
                    "batch imported"
                );
            }
            Err(error) => {
                warn!(batch = batch_index, %error, "contact insert failed");
                result.contacts_failed += contacts.len();
                let message = format!("Failed to import contacts: {error}");
                result.failures.extend(
                    paired
                        .iter()
                        .map(|(group, _)| group)
                        .filter(|group| !group.contacts.is_empty())
                        .map(|group| ImportFailure {
                            name: group.name().to_string(),
                            error: message.clone(),
                        }),
                );
            }
        }
    }
}

/// Match stored records to the groups they came from. A store that returns
/// one record per input is paired by position; otherwise records are matched
/// by name and groups left without a record are dropped from the pairing.
fn pair_records<'g, 'r>(
    batch: &'g [OrganizationGroup],
    stored: &'r [StoredOrganization],
) -> Vec<(&'g OrganizationGroup, &'r StoredOrganization)> {
    if stored.len() == batch.len() {
        return batch.iter().zip(stored).collect();
    }
    let mut used = vec![false; stored.len()];
    batch
        .iter()
        .filter_map(|group| {
            let idx = stored.iter().enumerate().position(|(idx, record)| {
                !used[idx] && record.name.eq_ignore_ascii_case(group.name())
            })?;
            used[idx] = true;
            Some((group, &stored[idx]))
        })
        .collect()
}

fn fail_batch(result: &mut ImportResult, batch_index: usize, record_count: usize, message: &str) {
    warn!(batch = batch_index, records = record_count, %message, "batch failed");
    result.organizations_failed += record_count;
    result.batch_errors.push(BatchError {
        batch_index,
        record_count,
        message: message.to_string(),
    });
}
