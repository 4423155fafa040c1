// Core algorithm exports
pub mod fanout;
pub mod finder;
pub mod prefilter;
pub mod scoring;

pub use fanout::find_interested_users;
pub use finder::{MatchPage, Matcher};
pub use prefilter::Prefilter;
pub use scoring::{calculate_match_score, match_reasons};
