use chrono::{DateTime, TimeDelta, Utc};
use crate::core::{
    distance::{haversine_distance_with_radius, EARTH_RADIUS_KM},
    error::DiscoveryError,
    exclusion::{is_excluded, InvisibilityPolicy},
    filters::matches_filter,
    online::is_online,
    pagination::{pagination_meta, paginate},
};
use crate::models::{
    CandidateResult, DiscoveryNotice, FilterSettings, PagedResult, ProfileSummary, RelationSnapshot,
};

/// Tunables of the discovery pipeline
#[derive(Debug, Clone, Copy)]
pub struct DiscoveryConfig {
    /// How recently a user must have been seen to be shown as online
    pub online_threshold: TimeDelta,
    pub earth_radius_km: f64,
    /// Requested page sizes above this are clamped
    pub max_page_size: u32,
    pub invisibility: InvisibilityPolicy,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            online_threshold: TimeDelta::minutes(5),
            earth_radius_km: EARTH_RADIUS_KM,
            max_page_size: 100,
            invisibility: InvisibilityPolicy::Strict,
        }
    }
}

/// Discovery orchestrator
///
/// # Pipeline Stages
/// 1. Exclusion policy (self, deleted, blocked, complained, invisible, unlocated)
/// 2. Distance against the requester's location
/// 3. Filter predicate (gender, age, radius)
/// 4. Online-status projection
/// 5. Ranking by distance and pagination
///
/// The computation is pure: it reads only its arguments and may be shared
/// freely across threads.
#[derive(Debug, Clone)]
pub struct Discoverer {
    config: DiscoveryConfig,
}

impl Discoverer {
    pub fn new(config: DiscoveryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// Produce one page of discoverable candidates for `requester`
    ///
    /// # Arguments
    /// * `requester` - The profile discovery runs on behalf of
    /// * `filter` - The requester's saved filter, including page and page size
    /// * `candidates` - Snapshot of candidate profiles
    /// * `relations` - Block, complaint and like edges touching the requester
    /// * `now` - Wall clock used for ages and online status
    ///
    /// # Returns
    /// A page of results. A requester without a location gets an empty page
    /// with `DiscoveryNotice::MissingRequesterLocation` rather than an error.
    pub fn discover(
        &self,
        requester: &ProfileSummary,
        filter: &FilterSettings,
        candidates: &[ProfileSummary],
        relations: &RelationSnapshot,
        now: DateTime<Utc>,
    ) -> Result<PagedResult, DiscoveryError> {
        let page = filter.page;
        let page_size = self.effective_page_size(filter.page_size);

        let Some(origin) = requester.location else {
            tracing::debug!(
                "Requester {} has no location, returning empty page",
                requester.session_id
            );
            return Ok(PagedResult {
                meta: pagination_meta(0, page, page_size)?,
                items: Vec::new(),
                notice: Some(DiscoveryNotice::MissingRequesterLocation),
            });
        };

        // Validate pagination and the origin before touching candidates
        pagination_meta(0, page, page_size)?;
        if !origin.is_valid() {
            return Err(DiscoveryError::InvalidCoordinate {
                latitude: origin.latitude,
                longitude: origin.longitude,
            });
        }

        let today = now.date_naive();
        let mut excluded = 0usize;
        let mut filtered_out = 0usize;

        let survivors: Vec<CandidateResult> = candidates
            .iter()
            .filter(|candidate| {
                let keep = !is_excluded(requester, candidate, relations, self.config.invisibility);
                if !keep {
                    excluded += 1;
                }
                keep
            })
            .filter_map(|candidate| {
                let location = candidate.location.as_ref()?;
                let radius_km = self.config.earth_radius_km;
                let distance_km = match haversine_distance_with_radius(&origin, location, radius_km)
                {
                    Ok(distance) => distance,
                    Err(e) => {
                        tracing::warn!("Skipping candidate {}: {}", candidate.session_id, e);
                        return None;
                    }
                };

                if !matches_filter(requester, filter, candidate, distance_km, today) {
                    filtered_out += 1;
                    return None;
                }

                Some(CandidateResult {
                    session_id: candidate.session_id.clone(),
                    distance_km,
                    primary_image_ref: candidate.primary_image_ref.clone(),
                    is_online: is_online(candidate.last_online, now, self.config.online_threshold),
                    last_online: candidate.last_online,
                })
            })
            .collect();

        tracing::debug!(
            "Discovery for {}: {} candidates, {} excluded, {} filtered out, {} matched",
            requester.session_id,
            candidates.len(),
            excluded,
            filtered_out,
            survivors.len()
        );

        let (meta, items) = paginate(survivors, page, page_size, |row| {
            (row.distance_km, row.session_id.as_str())
        })?;

        Ok(PagedResult {
            meta,
            items,
            notice: None,
        })
    }

    fn effective_page_size(&self, requested: u32) -> u32 {
        if requested > self.config.max_page_size {
            tracing::debug!(
                "Clamping page size {} to {}",
                requested,
                self.config.max_page_size
            );
            self.config.max_page_size
        } else {
            requested
        }
    }
}

impl Default for Discoverer {
    fn default() -> Self {
        Self::new(DiscoveryConfig::default())
    }
}
