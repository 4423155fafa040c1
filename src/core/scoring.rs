use crate::models::{Preference, Profile};

/// Reason strings surfaced alongside a score. Lifestyle intentionally has no
/// reason string.
pub const REASON_AGE: &str = "Age matches your preference";
pub const REASON_EDUCATION: &str = "Education matches your preference";
pub const REASON_LOCATION: &str = "Location matches your preference";
pub const REASON_OCCUPATION: &str = "Occupation matches your preference";
pub const REASON_CULTURAL: &str = "Cultural background matches your preference";

/// Calculate a match score (0-100) for a candidate profile against a user's
/// saved preference.
///
/// Scoring formula:
/// ```text
/// score = round(Σ(dimension_score × weight) / Σ(weight))
/// ```
/// taken over the evaluable dimensions only: a dimension counts when the
/// preference constrains it (non-empty) AND the profile carries the attribute.
/// Each dimension score is a binary membership test (100 or 0). With no
/// evaluable dimension the aggregate is 0. Rounding is half-up.
///
/// Total over any (preference, profile) pair: malformed or missing optional
/// fields make dimensions non-evaluable, never errors.
pub fn calculate_match_score(preference: &Preference, profile: &Profile) -> (u8, Vec<String>) {
    let weights = &preference.criteria_weights;

    let dimensions = [
        (age_score(preference, profile), weights.age),
        (education_score(preference, profile), weights.education),
        (occupation_score(preference, profile), weights.occupation),
        (location_score(preference, profile), weights.location),
        (cultural_score(preference, profile), weights.cultural),
        (lifestyle_score(preference, profile), weights.lifestyle),
    ];

    let mut total_score: u32 = 0;
    let mut total_weight: u32 = 0;

    for (dimension_score, weight) in dimensions {
        if let Some(score) = dimension_score {
            total_score += score as u32 * weight as u32;
            total_weight += weight as u32;
        }
    }

    let score = if total_weight > 0 {
        // Dimension scores are 0 or 100, so the quotient stays in 0..=100.
        (total_score as f64 / total_weight as f64).round() as u8
    } else {
        0
    };

    (score, match_reasons(preference, profile))
}

/// Human-readable match reasons, in a fixed dimension order (age, education,
/// location, occupation, cultural) independent of weights; a dimension with
/// weight 0 still contributes its reason when it matches.
pub fn match_reasons(preference: &Preference, profile: &Profile) -> Vec<String> {
    let mut reasons = Vec::new();

    if age_score(preference, profile) == Some(100) {
        reasons.push(REASON_AGE.to_string());
    }
    if education_score(preference, profile) == Some(100) {
        reasons.push(REASON_EDUCATION.to_string());
    }
    if location_score(preference, profile) == Some(100) {
        reasons.push(REASON_LOCATION.to_string());
    }
    if occupation_score(preference, profile) == Some(100) {
        reasons.push(REASON_OCCUPATION.to_string());
    }
    if cultural_score(preference, profile) == Some(100) {
        reasons.push(REASON_CULTURAL.to_string());
    }

    reasons
}

/// Age dimension: 100 when the profile age falls inside the preferred range
/// (inclusive). None when either side is absent.
#[inline]
pub(crate) fn age_score(preference: &Preference, profile: &Profile) -> Option<u8> {
    let range = preference.preferred_age_range.as_ref()?;
    let age = profile.age?;
    Some(if range.contains(age) { 100 } else { 0 })
}

#[inline]
pub(crate) fn education_score(preference: &Preference, profile: &Profile) -> Option<u8> {
    membership_score(
        &preference.preferred_education,
        profile.highest_qualification.as_deref(),
    )
}

#[inline]
pub(crate) fn occupation_score(preference: &Preference, profile: &Profile) -> Option<u8> {
    membership_score(&preference.preferred_occupation, profile.occupation.as_deref())
}

#[inline]
pub(crate) fn location_score(preference: &Preference, profile: &Profile) -> Option<u8> {
    membership_score(&preference.preferred_cities, profile.city())
}

#[inline]
pub(crate) fn cultural_score(preference: &Preference, profile: &Profile) -> Option<u8> {
    membership_score(&preference.preferred_caste, profile.sub_caste.as_deref())
}

#[inline]
pub(crate) fn lifestyle_score(preference: &Preference, profile: &Profile) -> Option<u8> {
    membership_score(
        &preference.preferred_marital_status,
        profile.marital_status.as_deref(),
    )
}

/// Binary membership test shared by the five list-backed dimensions.
/// None when the preference list is empty or the attribute is absent/empty.
#[inline]
fn membership_score(preferred: &[String], value: Option<&str>) -> Option<u8> {
    if preferred.is_empty() {
        return None;
    }
    let value = value.filter(|v| !v.is_empty())?;
    Some(if preferred.iter().any(|p| p == value) { 100 } else { 0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Address, AgeRange, CriteriaWeights, Preference, Profile};

    fn test_profile() -> Profile {
        Profile {
            profile_id: "p1".to_string(),
            user_id: "candidate".to_string(),
            first_name: Some("Asha".to_string()),
            last_name: Some("Kulkarni".to_string()),
            gender: Some("female".to_string()),
            age: Some(28),
            highest_qualification: Some("B.Tech".to_string()),
            occupation: Some("Software Engineer".to_string()),
            current_address: Some(Address {
                street: None,
                city: Some("Pune".to_string()),
                state: Some("Maharashtra".to_string()),
                pincode: None,
            }),
            sub_caste: Some("deshastha".to_string()),
            marital_status: Some("never_married".to_string()),
            created_at: None,
        }
    }

    fn test_preference() -> Preference {
        let mut preference = Preference::defaults("seeker");
        preference.preferred_age_range = Some(AgeRange { min: 25, max: 35 });
        preference.preferred_education = vec!["B.Tech".to_string(), "M.Tech".to_string()];
        preference.preferred_occupation = vec!["Software Engineer".to_string()];
        preference.preferred_cities = vec!["Pune".to_string(), "Mumbai".to_string()];
        preference.preferred_caste = vec!["deshastha".to_string()];
        preference.preferred_marital_status = vec!["never_married".to_string()];
        preference
    }

    #[test]
    fn test_full_match_scores_100() {
        let (score, reasons) = calculate_match_score(&test_preference(), &test_profile());

        assert_eq!(score, 100);
        assert_eq!(
            reasons,
            vec![
                REASON_AGE,
                REASON_EDUCATION,
                REASON_LOCATION,
                REASON_OCCUPATION,
                REASON_CULTURAL,
            ]
        );
    }

    #[test]
    fn test_no_evaluable_dimension_scores_zero() {
        let preference = Preference::defaults("seeker");
        let (score, reasons) = calculate_match_score(&preference, &test_profile());

        assert_eq!(score, 0);
        assert!(reasons.is_empty());
    }

    #[test]
    fn test_missing_attribute_skips_dimension() {
        let mut profile = test_profile();
        profile.occupation = None;
        let mut preference = test_preference();
        preference.criteria_weights = CriteriaWeights {
            age: 50,
            education: 0,
            occupation: 50,
            location: 0,
            cultural: 0,
            lifestyle: 0,
        };
        preference.preferred_education = Vec::new();
        preference.preferred_cities = Vec::new();
        preference.preferred_caste = Vec::new();
        preference.preferred_marital_status = Vec::new();

        // Occupation is unverifiable, so age (in range) is the only weighted
        // evaluable dimension left.
        let (score, _) = calculate_match_score(&preference, &profile);
        assert_eq!(score, 100);
    }

    #[test]
    fn test_failing_dimension_drags_weighted_average() {
        let mut profile = test_profile();
        profile.age = Some(45); // Outside 25-35
        let mut preference = test_preference();
        preference.criteria_weights = CriteriaWeights {
            age: 50,
            education: 50,
            occupation: 0,
            location: 0,
            cultural: 0,
            lifestyle: 0,
        };
        preference.preferred_occupation = Vec::new();
        preference.preferred_cities = Vec::new();
        preference.preferred_caste = Vec::new();
        preference.preferred_marital_status = Vec::new();

        // (0*50 + 100*50) / 100 = 50
        let (score, reasons) = calculate_match_score(&preference, &profile);
        assert_eq!(score, 50);
        assert_eq!(reasons, vec![REASON_EDUCATION]);
    }

    #[test]
    fn test_rounding_is_half_up() {
        let mut preference = test_preference();
        preference.preferred_occupation = Vec::new();
        preference.preferred_cities = Vec::new();
        preference.preferred_caste = Vec::new();
        preference.preferred_marital_status = Vec::new();
        preference.criteria_weights = CriteriaWeights {
            age: 1,
            education: 7,
            occupation: 0,
            location: 0,
            cultural: 0,
            lifestyle: 0,
        };
        let mut profile = test_profile();
        profile.highest_qualification = Some("MBBS".to_string()); // Not preferred

        // (100*1 + 0*7) / 8 = 12.5 -> 13
        let (score, _) = calculate_match_score(&preference, &profile);
        assert_eq!(score, 13);
    }

    #[test]
    fn test_zero_weight_dimension_still_yields_reason() {
        let mut preference = test_preference();
        preference.criteria_weights.cultural = 0;

        let (score, reasons) = calculate_match_score(&preference, &test_profile());

        assert_eq!(score, 100);
        assert!(reasons.contains(&REASON_CULTURAL.to_string()));
    }

    #[test]
    fn test_lifestyle_has_no_reason_string() {
        let mut preference = Preference::defaults("seeker");
        preference.preferred_marital_status = vec!["never_married".to_string()];

        let (score, reasons) = calculate_match_score(&preference, &test_profile());

        assert_eq!(score, 100);
        assert!(reasons.is_empty());
    }

    #[test]
    fn test_empty_string_attribute_is_not_evaluable() {
        let mut profile = test_profile();
        profile.sub_caste = Some(String::new());
        let mut preference = Preference::defaults("seeker");
        preference.preferred_caste = vec!["deshastha".to_string()];

        let (score, reasons) = calculate_match_score(&preference, &profile);

        assert_eq!(score, 0);
        assert!(reasons.is_empty());
    }
}
