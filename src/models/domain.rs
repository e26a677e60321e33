use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// A point on the Earth's surface in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Both coordinates are finite and inside the WGS84 ranges
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Gender stored on a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Gender a user wants to be shown, `Any` being the wildcard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchGender {
    Male,
    Female,
    Any,
}

impl SearchGender {
    #[inline]
    pub fn accepts(self, gender: Gender) -> bool {
        match self {
            SearchGender::Any => true,
            SearchGender::Male => gender == Gender::Male,
            SearchGender::Female => gender == Gender::Female,
        }
    }
}

/// Error returned when a stored enum value is not recognized
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown value: {0}")]
pub struct UnknownVariant(pub String);

impl FromStr for Gender {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

impl FromStr for SearchGender {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "male" => Ok(SearchGender::Male),
            "female" => Ok(SearchGender::Female),
            "any" | "all" => Ok(SearchGender::Any),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// Read model of a profile as seen by discovery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub id: i64,
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub gender: Gender,
    pub birthday: NaiveDate,
    /// `None` when the user never shared a location, distinct from (0, 0)
    #[serde(default)]
    pub location: Option<Location>,
    /// The gender this profile is itself looking for, taken from its own filter
    #[serde(rename = "lookingFor", default)]
    pub looking_for: Option<SearchGender>,
    #[serde(rename = "isDeleted", default)]
    pub is_deleted: bool,
    #[serde(rename = "isBlocked", default)]
    pub is_blocked: bool,
    #[serde(rename = "isInvisible", default)]
    pub is_invisible: bool,
    #[serde(rename = "lastOnline")]
    pub last_online: DateTime<Utc>,
    #[serde(rename = "primaryImageRef", default)]
    pub primary_image_ref: Option<String>,
}

impl ProfileSummary {
    /// Age in whole years on the given date
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        full_years_between(self.birthday, today)
    }
}

/// Whole years elapsed from `birthday` to `today`, negative if born in the future
pub fn full_years_between(birthday: NaiveDate, today: NaiveDate) -> i32 {
    let mut years = today.year() - birthday.year();
    if (today.month(), today.day()) < (birthday.month(), birthday.day()) {
        years -= 1;
    }
    years
}

/// Saved discovery filter of a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterSettings {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(rename = "searchGender")]
    pub search_gender: SearchGender,
    /// Free-form intent ("dating", "friendship"), carried but not matched on
    #[serde(rename = "lookingFor", default)]
    pub looking_for: Option<String>,
    #[serde(rename = "ageFrom")]
    pub age_from: u8,
    #[serde(rename = "ageTo")]
    pub age_to: u8,
    #[serde(rename = "maxDistanceKm")]
    pub max_distance_km: f64,
    pub page: u32,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
}

/// Directed edge between two users, e.g. a block or a like
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    #[serde(rename = "sourceSessionId")]
    pub source_session_id: String,
    #[serde(rename = "targetSessionId")]
    pub target_session_id: String,
    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

pub type BlockRelation = Relation;
pub type ComplaintRelation = Relation;
pub type LikeRelation = Relation;

impl Relation {
    pub fn new(source: impl Into<String>, target: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            source_session_id: source.into(),
            target_session_id: target.into(),
            is_active: true,
            created_at: at,
            updated_at: at,
        }
    }

    /// Active edge going from `source` to `target`
    #[inline]
    pub fn links(&self, source: &str, target: &str) -> bool {
        self.is_active && self.source_session_id == source && self.target_session_id == target
    }
}

fn default_true() -> bool { true }

/// Relation edges touching one requester, snapshotted for a single call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelationSnapshot {
    pub blocks: Vec<BlockRelation>,
    pub complaints: Vec<ComplaintRelation>,
    #[serde(default)]
    pub likes: Vec<LikeRelation>,
}

/// One row of a discovery page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateResult {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(rename = "distanceKm")]
    pub distance_km: f64,
    #[serde(rename = "primaryImageRef")]
    pub primary_image_ref: Option<String>,
    #[serde(rename = "isOnline")]
    pub is_online: bool,
    #[serde(rename = "lastOnline")]
    pub last_online: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub page: u32,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
    #[serde(rename = "totalCount")]
    pub total_count: u64,
    #[serde(rename = "totalPages")]
    pub total_pages: u64,
    #[serde(rename = "hasPrevious")]
    pub has_previous: bool,
    #[serde(rename = "hasNext")]
    pub has_next: bool,
}

/// Soft conditions reported alongside an otherwise valid page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiscoveryNotice {
    MissingRequesterLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedResult {
    pub meta: PaginationMeta,
    pub items: Vec<CandidateResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<DiscoveryNotice>,
}
