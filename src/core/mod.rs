// Core algorithm exports
pub mod discovery;
pub mod distance;
pub mod error;
pub mod exclusion;
pub mod filters;
pub mod online;
pub mod pagination;

pub use discovery::{Discoverer, DiscoveryConfig};
pub use distance::{haversine_distance, haversine_distance_with_radius, EARTH_RADIUS_KM};
pub use error::DiscoveryError;
pub use exclusion::{is_excluded, is_mutual_like, InvisibilityPolicy};
pub use filters::{matches_age, matches_distance, matches_filter, matches_gender};
pub use online::is_online;
pub use pagination::{paginate, pagination_meta};
