use chrono::{DateTime, Utc};
use std::future::Future;
use thiserror::Error;
use crate::models::{FilterSettings, ProfileSummary, RelationSnapshot};

/// Errors that can occur when reading from or writing to a store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

/// Supplies profile snapshots to discovery
pub trait CandidateSource {
    /// The requester's own profile, if it exists and is not deleted
    fn requester(
        &self,
        session_id: &str,
    ) -> impl Future<Output = Result<Option<ProfileSummary>, StoreError>> + Send;

    /// The requester's saved filter
    fn filter_settings(
        &self,
        session_id: &str,
    ) -> impl Future<Output = Result<Option<FilterSettings>, StoreError>> + Send;

    /// All non-deleted profiles with a known location
    fn candidates(&self) -> impl Future<Output = Result<Vec<ProfileSummary>, StoreError>> + Send;
}

/// Supplies block, complaint and like edges
pub trait RelationSource {
    /// Every edge where `session_id` is the source or the target
    fn relations_for(
        &self,
        session_id: &str,
    ) -> impl Future<Output = Result<RelationSnapshot, StoreError>> + Send;
}

/// Records user activity after a discovery call
pub trait ActivityRecorder {
    /// Set `last_online` for the user; repeated calls are harmless
    fn touch_last_online(
        &self,
        session_id: &str,
        at: DateTime<Utc>,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Everything the HTTP layer needs from a backing store
pub trait DiscoveryStore:
    CandidateSource + RelationSource + ActivityRecorder + Send + Sync + 'static
{
    fn ping(&self) -> impl Future<Output = Result<(), StoreError>> + Send;
}
