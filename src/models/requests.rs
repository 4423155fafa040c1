use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::domain::{
    AgeRange, CriteriaWeights, NotificationFrequency, Preference, StringRange,
};

/// Request to create or update a preference record (upsert semantics).
///
/// Validation happens here, before anything reaches the store: malformed
/// ranges and out-of-bounds weights or thresholds never persist.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SavePreferenceRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(custom(function = "validate_age_range"))]
    #[serde(rename = "preferredAgeRange", default)]
    pub preferred_age_range: Option<AgeRange>,
    #[serde(rename = "preferredHeight", default)]
    pub preferred_height: StringRange,
    #[serde(rename = "preferredIncome", default)]
    pub preferred_income: StringRange,
    #[serde(rename = "preferredEducation", default)]
    pub preferred_education: Vec<String>,
    #[serde(rename = "preferredOccupation", default)]
    pub preferred_occupation: Vec<String>,
    #[serde(rename = "preferredCities", default)]
    pub preferred_cities: Vec<String>,
    #[serde(rename = "preferredStates", default)]
    pub preferred_states: Vec<String>,
    #[serde(rename = "preferredCountries", default)]
    pub preferred_countries: Vec<String>,
    #[serde(rename = "preferredCaste", default)]
    pub preferred_caste: Vec<String>,
    #[serde(rename = "preferredSubCaste", default)]
    pub preferred_sub_caste: Vec<String>,
    #[serde(rename = "preferredGotra", default)]
    pub preferred_gotra: Vec<String>,
    #[serde(rename = "preferredMotherTongue", default)]
    pub preferred_mother_tongue: Vec<String>,
    #[serde(rename = "preferredMaritalStatus", default)]
    pub preferred_marital_status: Vec<String>,
    #[serde(rename = "preferredFoodHabit", default)]
    pub preferred_food_habit: Vec<String>,
    #[serde(rename = "preferredFamilyType", default)]
    pub preferred_family_type: Vec<String>,
    #[serde(rename = "preferredQualification", default)]
    pub preferred_qualification: Vec<String>,
    #[serde(rename = "preferredWorkLocation", default)]
    pub preferred_work_location: Vec<String>,
    #[serde(rename = "preferredCompanyType", default)]
    pub preferred_company_type: Vec<String>,
    #[validate(custom(function = "validate_weights"))]
    #[serde(rename = "criteriaWeights", default)]
    pub criteria_weights: CriteriaWeights,
    #[validate(range(min = 0, max = 100))]
    #[serde(rename = "matchThreshold", default = "default_match_threshold")]
    pub match_threshold: u8,
    #[serde(rename = "enableMatchNotifications", default = "default_enable_notifications")]
    pub enable_match_notifications: bool,
    #[serde(rename = "notificationFrequency", default)]
    pub notification_frequency: NotificationFrequency,
}

fn default_match_threshold() -> u8 {
    70
}

fn default_enable_notifications() -> bool {
    true
}

impl SavePreferenceRequest {
    /// Convert into the domain record (timestamps are the store's concern).
    pub fn into_preference(self) -> Preference {
        Preference {
            user_id: self.user_id,
            preferred_age_range: self.preferred_age_range,
            preferred_height: self.preferred_height,
            preferred_income: self.preferred_income,
            preferred_education: self.preferred_education,
            preferred_occupation: self.preferred_occupation,
            preferred_cities: self.preferred_cities,
            preferred_states: self.preferred_states,
            preferred_countries: self.preferred_countries,
            preferred_caste: self.preferred_caste,
            preferred_sub_caste: self.preferred_sub_caste,
            preferred_gotra: self.preferred_gotra,
            preferred_mother_tongue: self.preferred_mother_tongue,
            preferred_marital_status: self.preferred_marital_status,
            preferred_food_habit: self.preferred_food_habit,
            preferred_family_type: self.preferred_family_type,
            preferred_qualification: self.preferred_qualification,
            preferred_work_location: self.preferred_work_location,
            preferred_company_type: self.preferred_company_type,
            criteria_weights: self.criteria_weights,
            match_threshold: self.match_threshold,
            enable_match_notifications: self.enable_match_notifications,
            notification_frequency: self.notification_frequency,
            created_at: None,
            updated_at: None,
        }
    }
}

fn validate_age_range(range: &AgeRange) -> Result<(), ValidationError> {
    if range.min > range.max {
        return Err(ValidationError::new("age_range_inverted"));
    }
    if range.min < 18 || range.max > 80 {
        return Err(ValidationError::new("age_range_out_of_bounds"));
    }
    Ok(())
}

fn validate_weights(weights: &CriteriaWeights) -> Result<(), ValidationError> {
    let all = [
        weights.age,
        weights.education,
        weights.occupation,
        weights.location,
        weights.cultural,
        weights.lifestyle,
    ];
    if all.iter().any(|w| *w > 100) {
        return Err(ValidationError::new("weight_out_of_range"));
    }
    Ok(())
}

/// Request to find matches for a user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(range(min = 1))]
    #[serde(default = "default_page")]
    pub page: u32,
    #[validate(range(min = 1, max = 100))]
    #[serde(alias = "limit", rename = "pageSize", default = "default_page_size")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    20
}

/// Request carrying only a user id (reset, delete).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserIdRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_request(json: &str) -> SavePreferenceRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_save_request_defaults() {
        let request = minimal_request(r#"{"userId": "u1"}"#);

        assert!(request.validate().is_ok());
        assert_eq!(request.match_threshold, 70);
        assert!(request.enable_match_notifications);
        assert_eq!(request.notification_frequency, NotificationFrequency::Immediate);
        assert_eq!(request.criteria_weights.location, 20);
    }

    #[test]
    fn test_inverted_age_range_rejected() {
        let request = minimal_request(
            r#"{"userId": "u1", "preferredAgeRange": {"min": 40, "max": 25}}"#,
        );

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_age_range_outside_bounds_rejected() {
        let request = minimal_request(
            r#"{"userId": "u1", "preferredAgeRange": {"min": 16, "max": 30}}"#,
        );

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_oversized_weight_rejected() {
        let request = minimal_request(
            r#"{"userId": "u1", "criteriaWeights": {"age": 120}}"#,
        );

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_unknown_frequency_fails_deserialization() {
        let result: Result<SavePreferenceRequest, _> =
            serde_json::from_str(r#"{"userId": "u1", "notificationFrequency": "hourly"}"#);

        assert!(result.is_err());
    }

    #[test]
    fn test_find_matches_request_defaults() {
        let request: FindMatchesRequest = serde_json::from_str(r#"{"userId": "u1"}"#).unwrap();

        assert!(request.validate().is_ok());
        assert_eq!(request.page, 1);
        assert_eq!(request.page_size, 20);
    }

    #[test]
    fn test_find_matches_rejects_oversized_page() {
        let request: FindMatchesRequest =
            serde_json::from_str(r#"{"userId": "u1", "pageSize": 500}"#).unwrap();

        assert!(request.validate().is_err());
    }
}
