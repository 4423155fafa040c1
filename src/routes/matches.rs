use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::find_interested_users;
use crate::models::{
    ErrorResponse, FindMatchesRequest, FindMatchesResponse, HealthResponse,
    InterestedUsersResponse, MatchNotification, Pagination, Profile, ProfileCreatedResponse,
};
use crate::routes::AppState;
use crate::services::{AppwriteClient, PreferenceStore, PreferenceStoreError};

/// Configure match and event routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/find", web::post().to(find_matches))
        .route("/matches/interested", web::post().to(find_interested))
        .route("/events/profile-created", web::post().to(profile_created));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find matches endpoint
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "page": 1,
///   "pageSize": 20
/// }
/// ```
///
/// Scores the full candidate pool against the requesting user's preference
/// and returns the page of matches at or above their threshold. Results are
/// never cached; every call scores a fresh snapshot of the pool.
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let user_id = &req.user_id;

    tracing::info!(
        "Finding matches for user: {}, page: {}, page_size: {}",
        user_id,
        req.page,
        req.page_size
    );

    let preference = match state.store.get(user_id).await {
        Ok(preference) => preference,
        Err(PreferenceStoreError::NotFound(_)) => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "Preferences not found".to_string(),
                message: "No preferences found. Please set your preferences first.".to_string(),
                status_code: 404,
            });
        }
        Err(e) => {
            tracing::error!("Failed to fetch preferences for {}: {}", user_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch preferences".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let candidates = match state.appwrite.list_candidate_profiles(user_id).await {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::error!("Failed to load candidate pool for {}: {}", user_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to load candidates".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    tracing::debug!("Scoring {} candidates for {}", candidates.len(), user_id);

    let result = state.matcher.find_matches(
        &preference,
        candidates,
        req.page as usize,
        req.page_size as usize,
    );

    tracing::info!(
        "Returning {} of {} matches for user {}",
        result.matches.len(),
        result.total_matches,
        user_id
    );

    HttpResponse::Ok().json(FindMatchesResponse {
        pagination: Pagination {
            page: req.page,
            page_size: req.page_size,
            total: result.total_matches,
            pages: result.total_pages,
        },
        matches: result.matches,
    })
}

/// Interested-users dry run
///
/// POST /api/v1/matches/interested
///
/// Body: a profile document. Returns the users whose preferences the profile
/// satisfies without dispatching any notifications.
async fn find_interested(
    state: web::Data<AppState>,
    profile: web::Json<Profile>,
) -> impl Responder {
    if profile.user_id.is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Missing userId".to_string(),
            message: "Profile must carry a userId".to_string(),
            status_code: 400,
        });
    }

    let preferences = match state.store.list_notification_enabled().await {
        Ok(preferences) => preferences,
        Err(e) => {
            tracing::error!("Failed to load preferences for fanout: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to load preferences".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let interested = find_interested_users(&preferences, &profile);

    HttpResponse::Ok().json(InterestedUsersResponse {
        count: interested.len(),
        interested_users: interested,
    })
}

/// Profile-created event intake
///
/// POST /api/v1/events/profile-created
///
/// Body: the newly created profile document. Responds 202 immediately;
/// fanout and notification dispatch run in a background task so the caller's
/// profile write never depends on them.
async fn profile_created(
    state: web::Data<AppState>,
    profile: web::Json<Profile>,
) -> impl Responder {
    if profile.user_id.is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Missing userId".to_string(),
            message: "Profile must carry a userId".to_string(),
            status_code: 400,
        });
    }

    let event_id = uuid::Uuid::new_v4().to_string();
    let profile = profile.into_inner();

    tracing::info!(
        "Accepted profile-created event {} for user {}",
        event_id,
        profile.user_id
    );

    let appwrite = state.appwrite.clone();
    let store = state.store.clone();
    tokio::spawn(async move {
        dispatch_match_notifications(appwrite, store, profile).await;
    });

    HttpResponse::Accepted().json(ProfileCreatedResponse {
        event_id,
        accepted: true,
    })
}

/// Fanout worker: score the new profile against every notification-enabled
/// preference and create one notification document per interested user.
/// One recipient failing must not stop the rest, and nothing here propagates
/// back to the profile-created event intake.
async fn dispatch_match_notifications(
    appwrite: Arc<AppwriteClient>,
    store: Arc<PreferenceStore>,
    profile: Profile,
) {
    let preferences = match store.list_notification_enabled().await {
        Ok(preferences) => preferences,
        Err(e) => {
            tracing::error!(
                "Fanout aborted for profile {}: failed to load preferences: {}",
                profile.user_id,
                e
            );
            return;
        }
    };

    let interested = find_interested_users(&preferences, &profile);

    tracing::info!(
        "Profile {} matched {} of {} notification-enabled preferences",
        profile.user_id,
        interested.len(),
        preferences.len()
    );

    let mut delivered = 0usize;
    for user in &interested {
        let notification = MatchNotification::for_match(&profile, user);
        match appwrite.create_notification(&notification).await {
            Ok(()) => delivered += 1,
            Err(e) => {
                tracing::warn!("Failed to notify user {}: {}", user.user_id, e);
            }
        }
    }

    tracing::info!(
        "Dispatched {}/{} match notifications for profile {}",
        delivered,
        interested.len(),
        profile.user_id
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }
}
