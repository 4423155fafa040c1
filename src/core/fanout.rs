use crate::core::scoring::calculate_match_score;
use crate::models::{InterestedUser, Preference, Profile};

/// Inverse match direction: given one newly created profile, surface every
/// preference owner whose threshold it meets.
///
/// Returns the full list, unsorted and unpaginated. Delivery, batching by
/// `notificationFrequency` and rate limiting belong to the notification
/// dispatcher, not here.
pub fn find_interested_users(preferences: &[Preference], new_profile: &Profile) -> Vec<InterestedUser> {
    preferences
        .iter()
        .filter(|preference| preference.enable_match_notifications)
        .filter(|preference| preference.user_id != new_profile.user_id) // No self-notification
        .filter_map(|preference| {
            let (score, reasons) = calculate_match_score(preference, new_profile);
            if score >= preference.match_threshold {
                Some(InterestedUser {
                    user_id: preference.user_id.clone(),
                    match_score: score,
                    match_reasons: reasons,
                })
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Address, AgeRange, CriteriaWeights};

    fn new_profile() -> Profile {
        Profile {
            profile_id: "p-new".to_string(),
            user_id: "newcomer".to_string(),
            first_name: Some("Ravi".to_string()),
            last_name: Some("Joshi".to_string()),
            gender: Some("male".to_string()),
            age: Some(30),
            highest_qualification: Some("B.Tech".to_string()),
            occupation: Some("Engineer".to_string()),
            current_address: Some(Address {
                street: None,
                city: Some("Mumbai".to_string()),
                state: None,
                pincode: None,
            }),
            sub_caste: Some("chitpavan".to_string()),
            marital_status: Some("never_married".to_string()),
            created_at: None,
        }
    }

    fn interested_preference(user_id: &str) -> Preference {
        let mut preference = Preference::defaults(user_id);
        preference.preferred_age_range = Some(AgeRange { min: 25, max: 35 });
        preference.preferred_cities = vec!["Mumbai".to_string()];
        preference.criteria_weights = CriteriaWeights {
            age: 50,
            education: 0,
            occupation: 0,
            location: 50,
            cultural: 0,
            lifestyle: 0,
        };
        preference.match_threshold = 80;
        preference
    }

    #[test]
    fn test_fanout_includes_users_over_threshold() {
        let mut below = interested_preference("too_picky");
        below.preferred_cities = vec!["Delhi".to_string()]; // 50 < 80

        let preferences = vec![interested_preference("alice"), below];
        let interested = find_interested_users(&preferences, &new_profile());

        assert_eq!(interested.len(), 1);
        assert_eq!(interested[0].user_id, "alice");
        assert_eq!(interested[0].match_score, 100);
        assert!(!interested[0].match_reasons.is_empty());
    }

    #[test]
    fn test_fanout_skips_profile_owner() {
        let preferences = vec![interested_preference("newcomer")];

        assert!(find_interested_users(&preferences, &new_profile()).is_empty());
    }

    #[test]
    fn test_fanout_skips_disabled_notifications() {
        let mut muted = interested_preference("muted");
        muted.enable_match_notifications = false;

        assert!(find_interested_users(&[muted], &new_profile()).is_empty());
    }
}
