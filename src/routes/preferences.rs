use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{
    DeletePreferenceResponse, ErrorResponse, Preference, PreferenceResponse,
    SavePreferenceRequest, UserIdRequest,
};
use crate::routes::AppState;
use crate::services::{AppwriteError, CacheKey, PreferenceStoreError};

/// Configure all preference routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/preferences", web::post().to(save_preferences))
        .route("/preferences", web::get().to(get_preferences))
        .route("/preferences", web::delete().to(delete_preferences))
        .route("/preferences/reset", web::post().to(reset_preferences));
}

/// Create or update preferences endpoint (upsert)
///
/// POST /api/v1/preferences
///
/// The user must already have a profile; preference records without one are
/// rejected, matching the onboarding order the profile service enforces.
async fn save_preferences(
    state: web::Data<AppState>,
    req: web::Json<SavePreferenceRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for save_preferences: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let user_id = req.user_id.clone();

    match state.appwrite.get_profile(&user_id).await {
        Ok(_) => {}
        Err(AppwriteError::NotFound(_)) => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Profile required".to_string(),
                message: "Please complete your profile first".to_string(),
                status_code: 400,
            });
        }
        Err(e) => {
            tracing::error!("Failed to check profile for {}: {}", user_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to check profile".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    }

    let preference = req.into_inner().into_preference();

    if let Err(e) = state.store.upsert(&preference).await {
        tracing::error!("Failed to save preferences for {}: {}", user_id, e);
        return HttpResponse::InternalServerError().json(ErrorResponse {
            error: "Failed to save preferences".to_string(),
            message: e.to_string(),
            status_code: 500,
        });
    }

    invalidate_preference_cache(&state, &user_id).await;

    respond_with_stored(&state, &user_id).await
}

/// Get preferences endpoint
///
/// GET /api/v1/preferences?userId={userId}
async fn get_preferences(
    state: web::Data<AppState>,
    query: web::Query<std::collections::HashMap<String, String>>,
) -> impl Responder {
    let user_id = match query.get("userId") {
        Some(id) if !id.is_empty() => id,
        _ => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Missing userId parameter".to_string(),
                message: "userId query parameter is required".to_string(),
                status_code: 400,
            });
        }
    };

    let cache_key = CacheKey::preference(user_id);
    if let Ok(preference) = state.cache.get::<Preference>(&cache_key).await {
        return HttpResponse::Ok().json(PreferenceResponse { preference });
    }

    match state.store.get(user_id).await {
        Ok(preference) => {
            if let Err(e) = state.cache.set(&cache_key, &preference).await {
                tracing::warn!("Failed to cache preferences for {}: {}", user_id, e);
            }
            HttpResponse::Ok().json(PreferenceResponse { preference })
        }
        Err(PreferenceStoreError::NotFound(_)) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Preferences not found".to_string(),
            message: "No preferences found".to_string(),
            status_code: 404,
        }),
        Err(e) => {
            tracing::error!("Failed to fetch preferences for {}: {}", user_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch preferences".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Delete preferences endpoint
///
/// DELETE /api/v1/preferences?userId={userId}
async fn delete_preferences(
    state: web::Data<AppState>,
    query: web::Query<std::collections::HashMap<String, String>>,
) -> impl Responder {
    let user_id = match query.get("userId") {
        Some(id) if !id.is_empty() => id,
        _ => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Missing userId parameter".to_string(),
                message: "userId query parameter is required".to_string(),
                status_code: 400,
            });
        }
    };

    match state.store.delete(user_id).await {
        Ok(true) => {
            invalidate_preference_cache(&state, user_id).await;
            HttpResponse::Ok().json(DeletePreferenceResponse { deleted: true })
        }
        Ok(false) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Preferences not found".to_string(),
            message: "No preferences found".to_string(),
            status_code: 404,
        }),
        Err(e) => {
            tracing::error!("Failed to delete preferences for {}: {}", user_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to delete preferences".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Reset preferences to defaults endpoint
///
/// POST /api/v1/preferences/reset
///
/// Upsert semantics: creates the record when absent. Defaults carry no
/// criteria constraints; weights and threshold come from configuration.
async fn reset_preferences(
    state: web::Data<AppState>,
    req: web::Json<UserIdRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let user_id = &req.user_id;

    let mut preference = Preference::defaults(user_id);
    preference.criteria_weights = state.default_weights;
    preference.match_threshold = state.default_threshold;

    if let Err(e) = state.store.upsert(&preference).await {
        tracing::error!("Failed to reset preferences for {}: {}", user_id, e);
        return HttpResponse::InternalServerError().json(ErrorResponse {
            error: "Failed to reset preferences".to_string(),
            message: e.to_string(),
            status_code: 500,
        });
    }

    invalidate_preference_cache(&state, user_id).await;

    tracing::info!("Reset preferences to defaults for user {}", user_id);

    respond_with_stored(&state, user_id).await
}

/// Re-read the stored record so the response carries store timestamps.
async fn respond_with_stored(state: &web::Data<AppState>, user_id: &str) -> HttpResponse {
    match state.store.get(user_id).await {
        Ok(preference) => HttpResponse::Ok().json(PreferenceResponse { preference }),
        Err(e) => {
            tracing::error!("Failed to re-read preferences for {}: {}", user_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to read saved preferences".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Cache invalidation is best-effort; the store is the source of truth.
async fn invalidate_preference_cache(state: &web::Data<AppState>, user_id: &str) {
    let cache_key = CacheKey::preference(user_id);
    if let Err(e) = state.cache.delete(&cache_key).await {
        tracing::warn!("Failed to invalidate preference cache for {}: {}", user_id, e);
    }
}
