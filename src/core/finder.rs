use crate::core::{prefilter::Prefilter, scoring::calculate_match_score};
use crate::models::{Preference, Profile, ScoredMatch};

/// One page of match results plus the totals the pagination envelope needs.
#[derive(Debug, Clone)]
pub struct MatchPage {
    pub matches: Vec<ScoredMatch>,
    pub total_matches: usize,
    pub total_pages: usize,
}

/// Match orchestrator.
///
/// # Pipeline stages
/// 1. Self-exclusion
/// 2. Threshold-aware pre-filter (output-preserving, optional)
/// 3. Scoring
/// 4. Threshold filter, ranking, pagination
///
/// A full scan-and-score over the candidate pool on every call; the snapshot
/// semantics and scaling limits of that are the caller's trade-off.
#[derive(Debug, Clone)]
pub struct Matcher {
    use_prefilter: bool,
}

impl Matcher {
    pub fn new(use_prefilter: bool) -> Self {
        Self { use_prefilter }
    }

    /// Find, rank and paginate the candidates that meet a user's threshold.
    ///
    /// `page` is 1-based; a `page_size` of 0 is treated as 1.
    pub fn find_matches(
        &self,
        preference: &Preference,
        candidates: Vec<Profile>,
        page: usize,
        page_size: usize,
    ) -> MatchPage {
        let prefilter = if self.use_prefilter {
            Prefilter::build(preference)
        } else {
            Prefilter::default()
        };

        let mut matches: Vec<ScoredMatch> = candidates
            .into_iter()
            .filter(|profile| profile.user_id != preference.user_id) // Exclude self
            .filter(|profile| prefilter.passes(profile))
            .filter_map(|profile| {
                let (score, reasons) = calculate_match_score(preference, &profile);
                if score >= preference.match_threshold {
                    Some(ScoredMatch {
                        profile,
                        match_score: score,
                        match_reasons: reasons,
                    })
                } else {
                    None
                }
            })
            .collect();

        // Sort by score (descending), ties broken on candidate user id so
        // pagination stays stable across calls with unchanged data.
        matches.sort_by(|a, b| {
            b.match_score
                .cmp(&a.match_score)
                .then_with(|| a.profile.user_id.cmp(&b.profile.user_id))
        });

        let page = page.max(1);
        let page_size = page_size.max(1);
        let total_matches = matches.len();
        let total_pages = (total_matches + page_size - 1) / page_size;

        let skip = (page - 1) * page_size;
        let matches: Vec<ScoredMatch> = matches.into_iter().skip(skip).take(page_size).collect();

        MatchPage {
            matches,
            total_matches,
            total_pages,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(true)
    }
}
