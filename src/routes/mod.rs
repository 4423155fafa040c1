// Route exports
pub mod matches;
pub mod preferences;

use actix_web::web;
use std::sync::Arc;

use crate::core::Matcher;
use crate::models::CriteriaWeights;
use crate::services::{AppwriteClient, CacheManager, PreferenceStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub appwrite: Arc<AppwriteClient>,
    pub cache: Arc<CacheManager>,
    pub store: Arc<PreferenceStore>,
    pub matcher: Matcher,
    pub default_weights: CriteriaWeights,
    pub default_threshold: u8,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(preferences::configure)
            .configure(matches::configure),
    );
}
