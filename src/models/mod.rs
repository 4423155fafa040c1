// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Address, AgeRange, CriteriaWeights, InterestedUser, MatchNotification, MatchNotificationData,
    NotificationFrequency, Preference, Profile, ScoredMatch, StringRange,
};
pub use requests::{FindMatchesRequest, SavePreferenceRequest, UserIdRequest};
pub use responses::{
    DeletePreferenceResponse, ErrorResponse, FindMatchesResponse, HealthResponse,
    InterestedUsersResponse, Pagination, PreferenceResponse, ProfileCreatedResponse,
};
