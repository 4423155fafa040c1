use serde::{Deserialize, Serialize};

/// Matrimonial profile as stored by the profile service.
///
/// Every attribute the scorer reads is optional: documents arrive from an
/// external store and may be sparse. A missing attribute makes the dimension
/// non-evaluable rather than scoring zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "profileId", alias = "$id", default)]
    pub profile_id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "firstName", default)]
    pub first_name: Option<String>,
    #[serde(rename = "lastName", default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(rename = "HighestQualification", default)]
    pub highest_qualification: Option<String>,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(rename = "currentAddress", default)]
    pub current_address: Option<Address>,
    #[serde(rename = "subCaste", default)]
    pub sub_caste: Option<String>,
    #[serde(rename = "maritalStatus", default)]
    pub marital_status: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Profile {
    /// Current city, treating an empty string as absent.
    pub fn city(&self) -> Option<&str> {
        self.current_address
            .as_ref()
            .and_then(|address| address.city.as_deref())
            .filter(|city| !city.is_empty())
    }

    /// Display name for notification messages.
    pub fn display_name(&self) -> String {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.to_string(),
            _ => "A new member".to_string(),
        }
    }
}

/// Postal address; only `city` participates in scoring.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub pincode: Option<String>,
}

/// Inclusive age range filter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AgeRange {
    pub min: u8,
    pub max: u8,
}

impl AgeRange {
    pub fn contains(&self, age: u8) -> bool {
        age >= self.min && age <= self.max
    }
}

/// Open-ended range stored as display strings (heights like "5'4\"",
/// incomes like "10-15 LPA"). Persisted, never scored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StringRange {
    #[serde(default)]
    pub min: Option<String>,
    #[serde(default)]
    pub max: Option<String>,
}

/// Batching hint for the notification dispatcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationFrequency {
    #[default]
    Immediate,
    Daily,
    Weekly,
}

impl NotificationFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationFrequency::Immediate => "immediate",
            NotificationFrequency::Daily => "daily",
            NotificationFrequency::Weekly => "weekly",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "immediate" => Some(NotificationFrequency::Immediate),
            "daily" => Some(NotificationFrequency::Daily),
            "weekly" => Some(NotificationFrequency::Weekly),
            _ => None,
        }
    }
}

/// Per-dimension scoring weights, each bounded 0..=100.
///
/// Weights need not sum to anything: the aggregate divides by the weight sum
/// of the dimensions that were actually evaluable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CriteriaWeights {
    #[serde(default = "default_age_weight")]
    pub age: u8,
    #[serde(default = "default_education_weight")]
    pub education: u8,
    #[serde(default = "default_occupation_weight")]
    pub occupation: u8,
    #[serde(default = "default_location_weight")]
    pub location: u8,
    #[serde(default = "default_cultural_weight")]
    pub cultural: u8,
    #[serde(default = "default_lifestyle_weight")]
    pub lifestyle: u8,
}

impl Default for CriteriaWeights {
    fn default() -> Self {
        Self {
            age: default_age_weight(),
            education: default_education_weight(),
            occupation: default_occupation_weight(),
            location: default_location_weight(),
            cultural: default_cultural_weight(),
            lifestyle: default_lifestyle_weight(),
        }
    }
}

fn default_age_weight() -> u8 { 20 }
fn default_education_weight() -> u8 { 15 }
fn default_occupation_weight() -> u8 { 15 }
fn default_location_weight() -> u8 { 20 }
fn default_cultural_weight() -> u8 { 20 }
fn default_lifestyle_weight() -> u8 { 10 }

/// A user's saved matching criteria, weights and notification settings.
/// At most one record exists per user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preference {
    #[serde(rename = "userId")]
    pub user_id: String,
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
    #[serde(rename = "criteriaWeights", default)]
    pub criteria_weights: CriteriaWeights,
    #[serde(rename = "matchThreshold", default = "default_match_threshold")]
    pub match_threshold: u8,
    #[serde(rename = "enableMatchNotifications", default = "default_true")]
    pub enable_match_notifications: bool,
    #[serde(rename = "notificationFrequency", default)]
    pub notification_frequency: NotificationFrequency,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Preference {
    /// A fresh record with no constraints: every dimension unconstrained,
    /// notifications on, schema-default weights and threshold.
    pub fn defaults(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            preferred_age_range: None,
            preferred_height: StringRange::default(),
            preferred_income: StringRange::default(),
            preferred_education: Vec::new(),
            preferred_occupation: Vec::new(),
            preferred_cities: Vec::new(),
            preferred_states: Vec::new(),
            preferred_countries: Vec::new(),
            preferred_caste: Vec::new(),
            preferred_sub_caste: Vec::new(),
            preferred_gotra: Vec::new(),
            preferred_mother_tongue: Vec::new(),
            preferred_marital_status: Vec::new(),
            preferred_food_habit: Vec::new(),
            preferred_family_type: Vec::new(),
            preferred_qualification: Vec::new(),
            preferred_work_location: Vec::new(),
            preferred_company_type: Vec::new(),
            criteria_weights: CriteriaWeights::default(),
            match_threshold: default_match_threshold(),
            enable_match_notifications: true,
            notification_frequency: NotificationFrequency::Immediate,
            created_at: None,
            updated_at: None,
        }
    }
}

pub(crate) fn default_match_threshold() -> u8 { 70 }

fn default_true() -> bool { true }

/// One scored candidate. Transient: recomputed on demand, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredMatch {
    pub profile: Profile,
    #[serde(rename = "matchScore")]
    pub match_score: u8,
    #[serde(rename = "matchReasons")]
    pub match_reasons: Vec<String>,
}

/// A preference owner whose threshold a new profile meets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterestedUser {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "matchScore")]
    pub match_score: u8,
    #[serde(rename = "matchReasons")]
    pub match_reasons: Vec<String>,
}

/// Notification document handed to the dispatch collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchNotification {
    pub recipient: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub message: String,
    pub data: MatchNotificationData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchNotificationData {
    #[serde(rename = "newProfileUserId")]
    pub new_profile_user_id: String,
    #[serde(rename = "matchScore")]
    pub match_score: u8,
    #[serde(rename = "matchReasons")]
    pub match_reasons: Vec<String>,
}

impl MatchNotification {
    /// Build the "new profile matches your preferences" notification for one
    /// interested user.
    pub fn for_match(new_profile: &Profile, interested: &InterestedUser) -> Self {
        Self {
            recipient: interested.user_id.clone(),
            kind: "match".to_string(),
            title: "New Match Found!".to_string(),
            message: format!(
                "{} matches your preferences ({}% match)",
                new_profile.display_name(),
                interested.match_score
            ),
            data: MatchNotificationData {
                new_profile_user_id: new_profile.user_id.clone(),
                match_score: interested.match_score,
                match_reasons: interested.match_reasons.clone(),
            },
        }
    }
}
