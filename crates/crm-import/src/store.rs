//! Store abstraction consumed by the import executor.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crm_model::{ParsedContact, ParsedOrganization};

use crate::error::Result;

/// Identity of the signed-in user stamped on every created record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(String);

impl ActorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Organization row ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrganization {
    #[serde(flatten)]
    pub organization: ParsedOrganization,
    pub created_by: ActorId,
    pub updated_by: ActorId,
}

impl NewOrganization {
    pub fn new(organization: ParsedOrganization, actor: &ActorId) -> Self {
        Self {
            organization,
            created_by: actor.clone(),
            updated_by: actor.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.organization.name
    }
}

/// Contact row ready for insertion, linked to a stored organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContact {
    #[serde(flatten)]
    pub contact: ParsedContact,
    pub organization_id: u64,
    pub created_by: ActorId,
    pub updated_by: ActorId,
}

impl NewContact {
    pub fn new(contact: ParsedContact, organization_id: u64, actor: &ActorId) -> Self {
        Self {
            contact,
            organization_id,
            created_by: actor.clone(),
            updated_by: actor.clone(),
        }
    }
}

/// Identity assigned by the store to an inserted organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredOrganization {
    pub id: u64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Persistent backend for organizations and contacts.
///
/// Calls are issued one at a time by the executor. Bulk inserts are
/// all-or-nothing: an error means nothing from that call was written.
#[allow(async_fn_in_trait)]
pub trait OrganizationStore {
    /// The signed-in actor, or `None` when there is no session.
    async fn current_actor(&mut self) -> Result<Option<ActorId>>;

    /// Insert organizations and return exactly one record per input, in
    /// input order. A shorter result counts the unmatched inputs as failed.
    async fn insert_organizations(
        &mut self,
        organizations: &[NewOrganization],
    ) -> Result<Vec<StoredOrganization>>;

    /// Insert contacts and return how many were written.
    async fn insert_contacts(&mut self, contacts: &[NewContact]) -> Result<usize>;

    /// Subset of `names` that already exist, compared case-insensitively.
    async fn find_existing_names(&mut self, names: &[String]) -> Result<Vec<String>>;
}
