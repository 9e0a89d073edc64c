//! Batched import of organization groups into a store.
//!
//! # Features
//!
//! - **Store seam**: [`OrganizationStore`] hides the backend behind four calls
//! - **Executor**: sequential batches with per-batch failure isolation
//! - **Duplicate handling**: pre-filter lookups or store-enforced uniqueness
//! - **Lookup cache**: caller-owned, bounded and time-limited
//! - **In-memory store**: JSON snapshot persistence and failure switches
//!
//! # Example
//!
//! ```ignore
//! use crm_import::{ActorId, ImportExecutor, ImportOptions, InMemoryStore};
//!
//! let mut store = InMemoryStore::new(ActorId::new("rep@example.com"));
//! let result = ImportExecutor::new(&mut store, ImportOptions::default())
//!     .run(groups, |_| {})
//!     .await;
//! println!("{}", result.message);
//! ```

mod cache;
mod error;
mod executor;
mod memory;
mod store;

// === Error Types ===
pub use error::{Result, StoreError};

// === Store ===
pub use memory::{ContactRecord, InMemoryStore, OrganizationRecord, SNAPSHOT_VERSION, StoreSnapshot};
pub use store::{ActorId, NewContact, NewOrganization, OrganizationStore, StoredOrganization};

// === Execution ===
pub use cache::{DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL, LookupCache};
pub use executor::{
    AUTHENTICATION_REQUIRED, DEFAULT_BATCH_SIZE, DuplicatePolicy, ImportExecutor, ImportOptions,
    ImportProgress,
};
