use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;
use crate::core::{Discoverer, DiscoveryError};
use crate::models::{DiscoverQuery, PagedResult};
use crate::services::sources::{ActivityRecorder, CandidateSource, RelationSource, StoreError};

/// Errors surfaced by a discovery request
#[derive(Debug, Error)]
pub enum DiscoveryServiceError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Filter settings not found: {0}")]
    FilterNotFound(String),
}

/// Load a consistent snapshot for the requester and run discovery over it
///
/// `page` and `page_size` from the query, when present, take precedence over
/// the values saved in the requester's filter.
pub async fn discover_for<S>(
    store: &S,
    discoverer: &Discoverer,
    query: &DiscoverQuery,
    now: DateTime<Utc>,
) -> Result<PagedResult, DiscoveryServiceError>
where
    S: CandidateSource + RelationSource,
{
    let session_id = query.session_id.as_str();

    let requester = store
        .requester(session_id)
        .await?
        .ok_or_else(|| DiscoveryServiceError::ProfileNotFound(session_id.to_string()))?;

    let mut filter = store
        .filter_settings(session_id)
        .await?
        .ok_or_else(|| DiscoveryServiceError::FilterNotFound(session_id.to_string()))?;

    if let Some(page) = query.page {
        filter.page = page;
    }
    if let Some(page_size) = query.page_size {
        filter.page_size = page_size;
    }

    let candidates = store.candidates().await?;
    let relations = store.relations_for(session_id).await?;

    tracing::debug!(
        "Snapshot for {}: {} candidates, {} blocks, {} complaints, {} likes",
        session_id,
        candidates.len(),
        relations.blocks.len(),
        relations.complaints.len(),
        relations.likes.len()
    );

    let page = discoverer.discover(&requester, &filter, &candidates, &relations, now)?;

    Ok(page)
}

/// Refresh the requester's `last_online` without blocking the response
///
/// Failures are logged and otherwise ignored.
pub fn spawn_touch_last_online<S>(
    store: Arc<S>,
    session_id: String,
    at: DateTime<Utc>,
) -> tokio::task::JoinHandle<()>
where
    S: ActivityRecorder + Send + Sync + 'static,
{
    tokio::spawn(async move {
        if let Err(e) = store.touch_last_online(&session_id, at).await {
            tracing::warn!("Failed to refresh last_online for {}: {}", session_id, e);
        }
    })
}
