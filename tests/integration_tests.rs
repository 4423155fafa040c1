// Integration tests for Vivah Algo

use vivah_algo::core::{find_interested_users, Matcher};
use vivah_algo::models::{Address, AgeRange, CriteriaWeights, Preference, Profile};

fn create_test_profile(id: &str, age: u8, education: &str, city: &str, sub_caste: &str) -> Profile {
    Profile {
        profile_id: format!("profile-{}", id),
        user_id: id.to_string(),
        first_name: Some(format!("User {}", id)),
        last_name: None,
        gender: Some("female".to_string()),
        age: Some(age),
        highest_qualification: Some(education.to_string()),
        occupation: Some("Software Engineer".to_string()),
        current_address: Some(Address {
            street: None,
            city: Some(city.to_string()),
            state: Some("Maharashtra".to_string()),
            pincode: None,
        }),
        sub_caste: Some(sub_caste.to_string()),
        marital_status: Some("never_married".to_string()),
        created_at: None,
    }
}

fn create_test_preference(user_id: &str) -> Preference {
    let mut preference = Preference::defaults(user_id);
    preference.preferred_age_range = Some(AgeRange { min: 25, max: 35 });
    preference.preferred_education = vec!["B.Tech".to_string(), "M.Tech".to_string()];
    preference.preferred_cities = vec!["Pune".to_string(), "Mumbai".to_string()];
    preference.preferred_caste = vec!["deshastha".to_string()];
    preference.criteria_weights = CriteriaWeights {
        age: 30,
        education: 25,
        occupation: 0,
        location: 25,
        cultural: 20,
        lifestyle: 0,
    };
    preference.match_threshold = 70;
    preference
}

#[test]
fn test_integration_end_to_end_matching() {
    let matcher = Matcher::default();
    let preference = create_test_preference("current_user");

    let candidates = vec![
        create_test_profile("1", 28, "B.Tech", "Pune", "deshastha"),   // 100
        create_test_profile("2", 30, "M.Tech", "Mumbai", "deshastha"), // 100
        create_test_profile("3", 33, "B.Tech", "Pune", "karhade"),     // 80
        create_test_profile("4", 45, "B.Tech", "Pune", "deshastha"),   // Too old: 70
        create_test_profile("5", 28, "MBBS", "Nagpur", "karhade"),     // 30
    ];

    let result = matcher.find_matches(&preference, candidates, 1, 10);

    // Candidates 1, 2, 3 and 4 reach the threshold of 70
    assert_eq!(result.total_matches, 4);

    // Sorted by score, ties broken by user id
    let order: Vec<&str> = result.matches.iter().map(|m| m.profile.user_id.as_str()).collect();
    assert_eq!(order, vec!["1", "2", "3", "4"]);

    for matched in &result.matches {
        assert!(matched.match_score >= preference.match_threshold);
        assert!(matched.match_score <= 100);
        assert_ne!(matched.profile.user_id, "current_user");
    }
}

#[test]
fn test_pages_concatenate_to_full_result_set() {
    let matcher = Matcher::default();
    let mut preference = create_test_preference("current_user");
    preference.match_threshold = 0;

    let candidates: Vec<Profile> = (0..23)
        .map(|i| {
            create_test_profile(
                &format!("u{:02}", i),
                22 + (i % 20) as u8,
                ["B.Tech", "MBBS"][i % 2],
                ["Pune", "Nagpur"][i % 3 % 2],
                ["deshastha", "karhade"][i % 5 % 2],
            )
        })
        .collect();

    let page_size = 5;
    let full = matcher.find_matches(&preference, candidates.clone(), 1, 100);
    assert_eq!(full.total_matches, 23);
    assert_eq!(full.total_pages, (23 + page_size - 1) / page_size);

    let mut collected: Vec<String> = Vec::new();
    for page in 1..=full.total_pages {
        let result = matcher.find_matches(&preference, candidates.clone(), page, page_size);
        assert_eq!(result.total_matches, 23);
        collected.extend(result.matches.iter().map(|m| m.profile.user_id.clone()));
    }

    let full_ids: Vec<String> = full.matches.iter().map(|m| m.profile.user_id.clone()).collect();
    assert_eq!(collected, full_ids, "pages must reproduce the full ranked list");

    let mut deduped = collected.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), 23, "no duplicates across pages");
}

#[test]
fn test_fanout_end_to_end() {
    let new_profile = create_test_profile("newcomer", 28, "B.Tech", "Pune", "deshastha");

    let mut eager = create_test_preference("eager");
    eager.match_threshold = 50;

    let mut picky = create_test_preference("picky");
    picky.preferred_cities = vec!["Delhi".to_string()];
    picky.match_threshold = 90;

    let mut muted = create_test_preference("muted");
    muted.enable_match_notifications = false;

    let own = create_test_preference("newcomer");

    let interested = find_interested_users(&[eager, picky, muted, own], &new_profile);

    assert_eq!(interested.len(), 1);
    assert_eq!(interested[0].user_id, "eager");
    assert_eq!(interested[0].match_score, 100);
    assert!(!interested[0].match_reasons.is_empty());
}

#[test]
fn test_fanout_and_finder_agree_on_threshold() {
    // A user who would see the new profile in their own match search is
    // exactly a user the fanout reports as interested.
    let matcher = Matcher::default();
    let new_profile = create_test_profile("newcomer", 31, "M.Tech", "Mumbai", "deshastha");
    let preference = create_test_preference("seeker");

    let finder_sees = matcher
        .find_matches(&preference, vec![new_profile.clone()], 1, 10)
        .total_matches
        > 0;
    let fanout_sees = !find_interested_users(std::slice::from_ref(&preference), &new_profile).is_empty();

    assert_eq!(finder_sees, fanout_sees);
}
