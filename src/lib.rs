//! Lume Discovery - location-based discovery service for Lume dating app
//!
//! This library provides the discovery core: given a requester's profile, saved
//! filter and a snapshot of candidates and relations, it produces a
//! deterministic, distance-ranked, paginated page of compatible profiles.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    haversine_distance, Discoverer, DiscoveryConfig, DiscoveryError, InvisibilityPolicy,
};
pub use crate::models::{FilterSettings, Location, PagedResult, ProfileSummary, RelationSnapshot};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let moscow = Location::new(55.75, 37.62);
        assert_eq!(haversine_distance(&moscow, &moscow).unwrap(), 0.0);
    }
}
