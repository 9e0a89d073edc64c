//! In-process store with a JSON snapshot format.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::store::{ActorId, NewContact, NewOrganization, OrganizationStore, StoredOrganization};

/// Current snapshot schema version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// A persisted organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationRecord {
    pub id: u64,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub data: NewOrganization,
}

/// A persisted contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub id: u64,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub data: NewContact,
}

/// Serializable state of an [`InMemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub version: u32,
    pub next_id: u64,
    pub organizations: Vec<OrganizationRecord>,
    pub contacts: Vec<ContactRecord>,
}

impl Default for StoreSnapshot {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            next_id: 1,
            organizations: Vec::new(),
            contacts: Vec::new(),
        }
    }
}

impl StoreSnapshot {
    /// Read a snapshot file; a missing file yields an empty snapshot.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no store file, starting empty");
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).map_err(|source| StoreError::Io {
            operation: "read",
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot: Self = serde_json::from_str(&text).map_err(|source| StoreError::Format {
            path: path.to_path_buf(),
            source,
        })?;
        if snapshot.version > SNAPSHOT_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: snapshot.version,
                max_supported: SNAPSHOT_VERSION,
            });
        }
        Ok(snapshot)
    }

    /// Write the snapshot through a temp file and rename.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|source| StoreError::Format {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                operation: "create directory",
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let temp_path = path.with_extension("json.tmp");
        let mut file = File::create(&temp_path).map_err(|source| StoreError::Io {
            operation: "create",
            path: temp_path.clone(),
            source,
        })?;
        file.write_all(json.as_bytes())
            .and_then(|()| file.sync_all())
            .map_err(|source| StoreError::Io {
                operation: "write",
                path: temp_path.clone(),
                source,
            })?;
        fs::rename(&temp_path, path).map_err(|source| StoreError::Io {
            operation: "replace",
            path: path.to_path_buf(),
            source,
        })?;

        info!(
            path = %path.display(),
            organizations = self.organizations.len(),
            contacts = self.contacts.len(),
            "Saved store"
        );
        Ok(())
    }
}

/// Store kept in memory, enforcing a case-insensitive unique organization
/// name. Failure switches make it usable as a test double.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    actor: Option<ActorId>,
    snapshot: StoreSnapshot,
    reject_names: HashSet<String>,
    fail_contacts: bool,
    fail_lookups: bool,
    organization_calls: usize,
}

impl InMemoryStore {
    /// Empty store with a signed-in actor.
    pub fn new(actor: ActorId) -> Self {
        Self {
            actor: Some(actor),
            ..Self::default()
        }
    }

    /// Empty store with no session; every batch fails authentication.
    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: StoreSnapshot, actor: Option<ActorId>) -> Self {
        Self {
            actor,
            snapshot,
            ..Self::default()
        }
    }

    pub fn snapshot(&self) -> &StoreSnapshot {
        &self.snapshot
    }

    pub fn into_snapshot(self) -> StoreSnapshot {
        self.snapshot
    }

    pub fn organizations(&self) -> &[OrganizationRecord] {
        &self.snapshot.organizations
    }

    pub fn contacts(&self) -> &[ContactRecord] {
        &self.snapshot.contacts
    }

    /// Number of `insert_organizations` calls received.
    pub fn organization_calls(&self) -> usize {
        self.organization_calls
    }

    /// Fail any organization insert whose batch contains `name`.
    pub fn reject_name(mut self, name: &str) -> Self {
        self.reject_names.insert(name.to_lowercase());
        self
    }

    pub fn fail_contacts(mut self) -> Self {
        self.fail_contacts = true;
        self
    }

    pub fn fail_lookups(mut self) -> Self {
        self.fail_lookups = true;
        self
    }

    fn name_exists(&self, key: &str) -> bool {
        self.snapshot
            .organizations
            .iter()
            .any(|record| record.data.name().to_lowercase() == key)
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.snapshot.next_id;
        self.snapshot.next_id += 1;
        id
    }
}

impl OrganizationStore for InMemoryStore {
    async fn current_actor(&mut self) -> Result<Option<ActorId>> {
        Ok(self.actor.clone())
    }

    async fn insert_organizations(
        &mut self,
        organizations: &[NewOrganization],
    ) -> Result<Vec<StoredOrganization>> {
        self.organization_calls += 1;

        let mut batch_keys = HashSet::new();
        for organization in organizations {
            let key = organization.name().to_lowercase();
            if self.reject_names.contains(&key) {
                return Err(StoreError::Rejected(format!(
                    "insert rejected for organization '{}'",
                    organization.name()
                )));
            }
            if self.name_exists(&key) || !batch_keys.insert(key) {
                return Err(StoreError::DuplicateName {
                    name: organization.name().to_string(),
                });
            }
        }

        let now = Utc::now();
        let mut stored = Vec::with_capacity(organizations.len());
        for organization in organizations {
            let id = self.allocate_id();
            stored.push(StoredOrganization {
                id,
                name: organization.name().to_string(),
                created_at: now,
            });
            self.snapshot.organizations.push(OrganizationRecord {
                id,
                created_at: now,
                data: organization.clone(),
            });
        }
        Ok(stored)
    }

    async fn insert_contacts(&mut self, contacts: &[NewContact]) -> Result<usize> {
        if self.fail_contacts {
            return Err(StoreError::Rejected("contact insert rejected".to_string()));
        }
        if let Some(missing) = contacts.iter().find(|contact| {
            !self
                .snapshot
                .organizations
                .iter()
                .any(|record| record.id == contact.organization_id)
        }) {
            return Err(StoreError::UnknownOrganization {
                id: missing.organization_id,
            });
        }

        let now = Utc::now();
        for contact in contacts {
            let id = self.allocate_id();
            self.snapshot.contacts.push(ContactRecord {
                id,
                created_at: now,
                data: contact.clone(),
            });
        }
        Ok(contacts.len())
    }

    async fn find_existing_names(&mut self, names: &[String]) -> Result<Vec<String>> {
        if self.fail_lookups {
            return Err(StoreError::Rejected("name lookup unavailable".to_string()));
        }
        Ok(names
            .iter()
            .filter(|name| self.name_exists(&name.to_lowercase()))
            .cloned()
            .collect())
    }
}
