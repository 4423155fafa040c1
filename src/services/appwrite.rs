use crate::models::{MatchNotification, Profile};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with Appwrite
#[derive(Debug, Error)]
pub enum AppwriteError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Appwrite API client
///
/// Handles all communication with the profile document store:
/// - Fetching a single profile by owner
/// - Loading the candidate pool for matching
/// - Writing match notification documents for the dispatcher
pub struct AppwriteClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    client: Client,
    collections: AppwriteCollections,
}

/// Collection IDs in Appwrite
#[derive(Debug, Clone)]
pub struct AppwriteCollections {
    pub user_profiles: String,
    pub notifications: String,
}

/// Page size for candidate-pool reads.
const CANDIDATE_PAGE_SIZE: usize = 100;

impl AppwriteClient {
    /// Create a new Appwrite client
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        collections: AppwriteCollections,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            project_id,
            database_id,
            client,
            collections,
        }
    }

    /// Fetch the profile owned by a given user.
    pub async fn get_profile(&self, user_id: &str) -> Result<Profile, AppwriteError> {
        let queries = vec![format!("equal(\"userId\", \"{}\")", user_id)];
        let url = self.documents_url(&self.collections.user_profiles, &queries);

        tracing::debug!("Fetching profile for user: {}", user_id);

        let response = self
            .client
            .get(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Failed to fetch profile for {}: {} - {}", user_id, status, body);
            return Err(AppwriteError::ApiError(format!(
                "Failed to fetch profile: {}",
                status
            )));
        }

        let json: Value = response.json().await?;

        let documents = json
            .get("documents")
            .and_then(|d| d.as_array())
            .ok_or_else(|| AppwriteError::InvalidResponse("Missing documents array".into()))?;

        let doc = documents
            .first()
            .ok_or_else(|| AppwriteError::NotFound(format!("Profile not found for user {}", user_id)))?;

        let data = doc.get("data").unwrap_or(doc);

        serde_json::from_value(data.clone())
            .map_err(|e| AppwriteError::InvalidResponse(format!("Failed to parse profile: {}", e)))
    }

    /// Load the full candidate pool, excluding the requesting user's own
    /// profile. Pages through the collection until exhausted; documents that
    /// fail to parse as profiles are skipped.
    pub async fn list_candidate_profiles(
        &self,
        exclude_user_id: &str,
    ) -> Result<Vec<Profile>, AppwriteError> {
        let mut profiles = Vec::new();
        let mut offset = 0usize;

        loop {
            let queries = vec![
                format!("notEqual(\"userId\", \"{}\")", exclude_user_id),
                format!("limit({})", CANDIDATE_PAGE_SIZE),
                format!("offset({})", offset),
            ];
            let url = self.documents_url(&self.collections.user_profiles, &queries);

            let response = self
                .client
                .get(&url)
                .header("X-Appwrite-Key", &self.api_key)
                .header("X-Appwrite-Project", &self.project_id)
                .send()
                .await?;

            if !response.status().is_success() {
                return Err(AppwriteError::ApiError(format!(
                    "Failed to query candidates: {}",
                    response.status()
                )));
            }

            let json: Value = response.json().await?;

            let documents = json
                .get("documents")
                .and_then(|d| d.as_array())
                .ok_or_else(|| AppwriteError::InvalidResponse("Missing documents array".into()))?;

            let fetched = documents.len();

            profiles.extend(documents.iter().filter_map(|doc| {
                let data = doc.get("data").unwrap_or(doc);
                serde_json::from_value::<Profile>(data.clone()).ok()
            }).filter(|p| p.user_id != exclude_user_id));

            if fetched < CANDIDATE_PAGE_SIZE {
                break;
            }
            offset += CANDIDATE_PAGE_SIZE;
        }

        tracing::debug!(
            "Loaded {} candidate profiles (excluding {})",
            profiles.len(),
            exclude_user_id
        );

        Ok(profiles)
    }

    /// Create a match notification document for the dispatch collaborator.
    pub async fn create_notification(
        &self,
        notification: &MatchNotification,
    ) -> Result<(), AppwriteError> {
        let url = format!(
            "{}/databases/{}/collections/{}/documents",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            self.collections.notifications
        );

        let mut payload = serde_json::to_value(notification).unwrap();
        // Add Appwrite-specific fields
        if let Some(obj) = payload.as_object_mut() {
            obj.insert(
                "$id".to_string(),
                Value::String(uuid::Uuid::new_v4().to_string()),
            );
        }

        let response = self
            .client
            .post(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppwriteError::ApiError(format!(
                "Failed to create notification: {}",
                response.status()
            )));
        }

        tracing::debug!("Created match notification for {}", notification.recipient);

        Ok(())
    }

    /// Build a documents URL with an encoded query array.
    fn documents_url(&self, collection: &str, queries: &[String]) -> String {
        let queries_json = serde_json::to_string(queries).unwrap();
        let encoded = urlencoding::encode(&queries_json);

        format!(
            "{}/databases/{}/collections/{}/documents?query={}",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            collection,
            encoded
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appwrite_client_creation() {
        let collections = AppwriteCollections {
            user_profiles: "user_profiles".to_string(),
            notifications: "notifications".to_string(),
        };

        let client = AppwriteClient::new(
            "https://appwrite.test/v1".to_string(),
            "test_key".to_string(),
            "test_project".to_string(),
            "test_db".to_string(),
            collections,
        );

        assert_eq!(client.base_url, "https://appwrite.test/v1");
        assert_eq!(client.api_key, "test_key");
    }

    #[test]
    fn test_documents_url_encodes_queries() {
        let collections = AppwriteCollections {
            user_profiles: "user_profiles".to_string(),
            notifications: "notifications".to_string(),
        };
        let client = AppwriteClient::new(
            "https://appwrite.test/v1/".to_string(),
            "key".to_string(),
            "project".to_string(),
            "db".to_string(),
            collections,
        );

        let url = client.documents_url("user_profiles", &["limit(100)".to_string()]);

        assert!(url.starts_with("https://appwrite.test/v1/databases/db/collections/user_profiles/documents?query="));
        assert!(!url.contains('['), "query array should be percent-encoded");
    }
}
