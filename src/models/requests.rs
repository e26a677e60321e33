use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query string of the discover endpoint
///
/// `page` and `pageSize` override the values saved in the user's filter.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DiscoverQuery {
    #[validate(length(min = 1))]
    #[serde(alias = "session_id", rename = "sessionId")]
    pub session_id: String,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub page: Option<u32>,
    #[validate(range(min = 1))]
    #[serde(alias = "page_size", rename = "pageSize", default)]
    pub page_size: Option<u32>,
}
