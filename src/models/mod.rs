// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    full_years_between, BlockRelation, CandidateResult, ComplaintRelation, DiscoveryNotice,
    FilterSettings, Gender, LikeRelation, Location, PagedResult, PaginationMeta, ProfileSummary,
    Relation, RelationSnapshot, SearchGender, UnknownVariant,
};
pub use requests::DiscoverQuery;
pub use responses::{CandidateView, DiscoverResponse, ErrorResponse, HealthResponse};
