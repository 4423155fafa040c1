use serde::{Deserialize, Serialize};

use crate::models::domain::{InterestedUser, Preference, ScoredMatch};

/// Pagination envelope for paginated listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
    pub total: usize,
    pub pages: usize,
}

/// Response for the find-matches endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindMatchesResponse {
    pub matches: Vec<ScoredMatch>,
    pub pagination: Pagination,
}

/// Response wrapping a stored preference record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferenceResponse {
    pub preference: Preference,
}

/// Response for preference deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletePreferenceResponse {
    pub deleted: bool,
}

/// Response for the interested-users dry run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterestedUsersResponse {
    #[serde(rename = "interestedUsers")]
    pub interested_users: Vec<InterestedUser>,
    pub count: usize,
}

/// Acknowledgement for a profile-created event; fanout runs in the
/// background after this is sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileCreatedResponse {
    #[serde(rename = "eventId")]
    pub event_id: String,
    pub accepted: bool,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
