use std::collections::HashSet;

use crate::models::{AgeRange, Preference, Profile};

/// Cheap candidate pre-filter applied before full scoring.
///
/// A hard constraint is derived from a dimension only when failing that
/// dimension alone already caps the best achievable score below the
/// preference's match threshold: with `W` the weight sum over all constrained
/// dimensions, a candidate failing a dimension of weight `w` can score at
/// most `round(100 * (W - w) / W)`. Candidates missing the attribute entirely are
/// never excluded (the dimension is not evaluable for them), so filtering
/// produces exactly the same result set as scoring everything.
///
/// Only the two cheaply indexable dimensions are considered: age range and
/// city membership.
#[derive(Debug, Clone, Default)]
pub struct Prefilter {
    age: Option<AgeRange>,
    cities: Option<HashSet<String>>,
}

impl Prefilter {
    /// Derive hard constraints from a preference and its threshold.
    pub fn build(preference: &Preference) -> Self {
        let total = constrained_weight_total(preference);
        if total == 0 {
            return Self::default();
        }

        let mut prefilter = Self::default();

        if preference.preferred_age_range.is_some()
            && disqualifying(preference.criteria_weights.age, total, preference.match_threshold)
        {
            prefilter.age = preference.preferred_age_range;
        }

        if !preference.preferred_cities.is_empty()
            && disqualifying(
                preference.criteria_weights.location,
                total,
                preference.match_threshold,
            )
        {
            prefilter.cities = Some(preference.preferred_cities.iter().cloned().collect());
        }

        prefilter
    }

    /// Whether a candidate survives the pre-filter. Profiles missing an
    /// attribute always pass that constraint.
    pub fn passes(&self, profile: &Profile) -> bool {
        if let (Some(range), Some(age)) = (&self.age, profile.age) {
            if !range.contains(age) {
                return false;
            }
        }

        if let (Some(cities), Some(city)) = (&self.cities, profile.city()) {
            if !cities.contains(city) {
                return false;
            }
        }

        true
    }

    pub fn is_empty(&self) -> bool {
        self.age.is_none() && self.cities.is_none()
    }
}

/// Weight sum over the dimensions this preference actually constrains.
fn constrained_weight_total(preference: &Preference) -> u32 {
    let weights = &preference.criteria_weights;
    let mut total: u32 = 0;

    if preference.preferred_age_range.is_some() {
        total += weights.age as u32;
    }
    if !preference.preferred_education.is_empty() {
        total += weights.education as u32;
    }
    if !preference.preferred_occupation.is_empty() {
        total += weights.occupation as u32;
    }
    if !preference.preferred_cities.is_empty() {
        total += weights.location as u32;
    }
    if !preference.preferred_caste.is_empty() {
        total += weights.cultural as u32;
    }
    if !preference.preferred_marital_status.is_empty() {
        total += weights.lifestyle as u32;
    }

    total
}

/// Best achievable rounded score for a candidate that fails this one
/// dimension, compared against the threshold.
#[inline]
fn disqualifying(weight: u8, total: u32, threshold: u8) -> bool {
    let best = (100.0 * (total - weight as u32) as f64 / total as f64).round() as u8;
    best < threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Address, CriteriaWeights};

    fn preference_with(threshold: u8, weights: CriteriaWeights) -> Preference {
        let mut preference = Preference::defaults("seeker");
        preference.match_threshold = threshold;
        preference.criteria_weights = weights;
        preference.preferred_age_range = Some(AgeRange { min: 25, max: 35 });
        preference.preferred_cities = vec!["Pune".to_string()];
        preference.preferred_education = vec!["B.Tech".to_string()];
        preference
    }

    fn profile_with(age: Option<u8>, city: Option<&str>) -> Profile {
        Profile {
            profile_id: "p1".to_string(),
            user_id: "candidate".to_string(),
            first_name: None,
            last_name: None,
            gender: None,
            age,
            highest_qualification: None,
            occupation: None,
            current_address: city.map(|c| Address {
                street: None,
                city: Some(c.to_string()),
                state: None,
                pincode: None,
            }),
            sub_caste: None,
            marital_status: None,
            created_at: None,
        }
    }

    #[test]
    fn test_heavy_weight_becomes_hard_constraint() {
        // Age carries 60 of 80 constrained weight: failing it caps the score
        // at round(100*20/80) = 25, below the threshold of 70.
        let preference = preference_with(
            70,
            CriteriaWeights { age: 60, education: 10, occupation: 0, location: 10, cultural: 0, lifestyle: 0 },
        );
        let prefilter = Prefilter::build(&preference);

        assert!(!prefilter.is_empty());
        assert!(!prefilter.passes(&profile_with(Some(45), Some("Pune"))));
        assert!(prefilter.passes(&profile_with(Some(30), Some("Pune"))));
    }

    #[test]
    fn test_light_weight_stays_soft() {
        // Failing a 10-of-80 dimension still allows round(100*70/80) = 88.
        let preference = preference_with(
            70,
            CriteriaWeights { age: 10, education: 60, occupation: 0, location: 10, cultural: 0, lifestyle: 0 },
        );
        let prefilter = Prefilter::build(&preference);

        assert!(prefilter.passes(&profile_with(Some(45), Some("Pune"))));
    }

    #[test]
    fn test_missing_attribute_always_passes() {
        let preference = preference_with(
            100,
            CriteriaWeights { age: 60, education: 10, occupation: 0, location: 30, cultural: 0, lifestyle: 0 },
        );
        let prefilter = Prefilter::build(&preference);

        assert!(prefilter.passes(&profile_with(None, None)));
    }

    #[test]
    fn test_zero_threshold_builds_no_constraints() {
        let preference = preference_with(
            0,
            CriteriaWeights { age: 60, education: 10, occupation: 0, location: 30, cultural: 0, lifestyle: 0 },
        );

        assert!(Prefilter::build(&preference).is_empty());
    }

    #[test]
    fn test_unconstrained_preference_builds_nothing() {
        let preference = Preference::defaults("seeker");

        assert!(Prefilter::build(&preference).is_empty());
    }
}
