use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;
use crate::core::Discoverer;
use crate::models::{DiscoverQuery, DiscoverResponse, ErrorResponse, HealthResponse};
use crate::services::{discover_for, spawn_touch_last_online, DiscoveryServiceError, DiscoveryStore};

/// Application state shared across all handlers
pub struct AppState<S> {
    pub store: Arc<S>,
    pub discoverer: Discoverer,
    pub image_base_url: Option<String>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            discoverer: self.discoverer.clone(),
            image_base_url: self.image_base_url.clone(),
        }
    }
}

/// Configure all discovery routes
pub fn configure<S: DiscoveryStore>(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check::<S>))
        .route("/discover", web::get().to(discover::<S>));
}

/// Health check endpoint
async fn health_check<S: DiscoveryStore>(state: web::Data<AppState<S>>) -> impl Responder {
    let status = match state.store.ping().await {
        Ok(()) => "healthy",
        Err(e) => {
            tracing::warn!("Store health check failed: {}", e);
            "degraded"
        }
    };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Discover endpoint
///
/// GET /api/v1/discover?sessionId={sessionId}&page={page}&pageSize={pageSize}
///
/// Response body:
/// ```json
/// {
///   "hasPrevious": false,
///   "hasNext": true,
///   "page": 1,
///   "pageSize": 20,
///   "totalCount": 42,
///   "totalPages": 3,
///   "content": [
///     {
///       "sessionId": "...",
///       "distanceKm": 1.2,
///       "imageUrl": "...",
///       "isOnline": true,
///       "lastOnline": "..."
///     }
///   ]
/// }
/// ```
async fn discover<S: DiscoveryStore>(
    state: web::Data<AppState<S>>,
    query: web::Query<DiscoverQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        tracing::info!("Validation failed for discover request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let session_id = query.session_id.clone();
    let now = chrono::Utc::now();

    tracing::info!(
        "Discovering for {} (page: {:?}, page size: {:?})",
        session_id,
        query.page,
        query.page_size
    );

    let page = match discover_for(state.store.as_ref(), &state.discoverer, &query, now).await {
        Ok(page) => page,
        Err(e) => return error_response(&session_id, e),
    };

    // Fire and forget; the page does not depend on it
    spawn_touch_last_online(Arc::clone(&state.store), session_id.clone(), now);

    let response = DiscoverResponse::from_page(page, state.image_base_url.as_deref());

    tracing::info!(
        "Returning {} of {} candidates for {} (page {}/{})",
        response.content.len(),
        response.total_count,
        session_id,
        response.page,
        response.total_pages
    );

    HttpResponse::Ok().json(response)
}

fn error_response(session_id: &str, err: DiscoveryServiceError) -> HttpResponse {
    match &err {
        DiscoveryServiceError::ProfileNotFound(_) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Profile not found".to_string(),
            message: err.to_string(),
            status_code: 404,
        }),
        DiscoveryServiceError::FilterNotFound(_) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Filter settings not found".to_string(),
            message: err.to_string(),
            status_code: 404,
        }),
        DiscoveryServiceError::Discovery(_) => HttpResponse::BadRequest().json(ErrorResponse {
            error: "Invalid discovery request".to_string(),
            message: err.to_string(),
            status_code: 400,
        }),
        DiscoveryServiceError::Store(_) => {
            tracing::error!("Discovery failed for {}: {}", session_id, err);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to load discovery data".to_string(),
                message: err.to_string(),
                status_code: 500,
            })
        }
    }
}
