use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::models::domain::{CandidateResult, DiscoveryNotice, PagedResult};

/// Response for the discover endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoverResponse {
    #[serde(rename = "hasPrevious")]
    pub has_previous: bool,
    #[serde(rename = "hasNext")]
    pub has_next: bool,
    pub page: u32,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
    #[serde(rename = "totalCount")]
    pub total_count: u64,
    #[serde(rename = "totalPages")]
    pub total_pages: u64,
    pub content: Vec<CandidateView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<DiscoveryNotice>,
}

/// One discovered profile as sent to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateView {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(rename = "distanceKm")]
    pub distance_km: f64,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
    #[serde(rename = "isOnline")]
    pub is_online: bool,
    #[serde(rename = "lastOnline")]
    pub last_online: DateTime<Utc>,
}

impl DiscoverResponse {
    /// Build the wire response, resolving image refs against `image_base_url`
    pub fn from_page(page: PagedResult, image_base_url: Option<&str>) -> Self {
        let meta = page.meta;
        Self {
            has_previous: meta.has_previous,
            has_next: meta.has_next,
            page: meta.page,
            page_size: meta.page_size,
            total_count: meta.total_count,
            total_pages: meta.total_pages,
            content: page
                .items
                .into_iter()
                .map(|item| CandidateView::from_result(item, image_base_url))
                .collect(),
            notice: page.notice,
        }
    }
}

impl CandidateView {
    fn from_result(item: CandidateResult, image_base_url: Option<&str>) -> Self {
        let image_url = item.primary_image_ref.map(|image_ref| match image_base_url {
            Some(base) => format!(
                "{}/{}",
                base.trim_end_matches('/'),
                image_ref.trim_start_matches('/')
            ),
            None => image_ref,
        });

        Self {
            session_id: item.session_id,
            distance_km: item.distance_km,
            image_url,
            is_online: item.is_online,
            last_online: item.last_online,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
