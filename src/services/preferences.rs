use crate::models::{
    AgeRange, CriteriaWeights, NotificationFrequency, Preference, StringRange,
};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with the preference store
#[derive(Debug, Error)]
pub enum PreferenceStoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("No preferences found for user {0}")]
    NotFound(String),

    #[error("Invalid stored value: {0}")]
    InvalidRecord(String),
}

/// Postgres-backed preference store
///
/// Owns the one-record-per-user preference table. The primary key on
/// `user_id` enforces the at-most-one invariant; create and update share the
/// upsert entry point.
pub struct PreferenceStore {
    pool: PgPool,
}

impl PreferenceStore {
    /// Create a new store from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, PreferenceStoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new store from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, PreferenceStoreError> {
        tracing::info!("Connecting to PostgreSQL preference store");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    /// Create or update a user's preference record.
    pub async fn upsert(&self, preference: &Preference) -> Result<(), PreferenceStoreError> {
        let query = r#"
            INSERT INTO preferences (
                user_id,
                age_min, age_max,
                height_min, height_max,
                income_min, income_max,
                preferred_education, preferred_occupation, preferred_cities,
                preferred_states, preferred_countries, preferred_caste,
                preferred_sub_caste, preferred_gotra, preferred_mother_tongue,
                preferred_marital_status, preferred_food_habit, preferred_family_type,
                preferred_qualification, preferred_work_location, preferred_company_type,
                weight_age, weight_education, weight_occupation,
                weight_location, weight_cultural, weight_lifestyle,
                match_threshold, enable_match_notifications, notification_frequency,
                created_at, updated_at
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                $11, $12, $13, $14, $15, $16, $17, $18, $19, $20,
                $21, $22, $23, $24, $25, $26, $27, $28, $29, $30, $31,
                NOW(), NOW()
            )
            ON CONFLICT (user_id)
            DO UPDATE SET
                age_min = EXCLUDED.age_min,
                age_max = EXCLUDED.age_max,
                height_min = EXCLUDED.height_min,
                height_max = EXCLUDED.height_max,
                income_min = EXCLUDED.income_min,
                income_max = EXCLUDED.income_max,
                preferred_education = EXCLUDED.preferred_education,
                preferred_occupation = EXCLUDED.preferred_occupation,
                preferred_cities = EXCLUDED.preferred_cities,
                preferred_states = EXCLUDED.preferred_states,
                preferred_countries = EXCLUDED.preferred_countries,
                preferred_caste = EXCLUDED.preferred_caste,
                preferred_sub_caste = EXCLUDED.preferred_sub_caste,
                preferred_gotra = EXCLUDED.preferred_gotra,
                preferred_mother_tongue = EXCLUDED.preferred_mother_tongue,
                preferred_marital_status = EXCLUDED.preferred_marital_status,
                preferred_food_habit = EXCLUDED.preferred_food_habit,
                preferred_family_type = EXCLUDED.preferred_family_type,
                preferred_qualification = EXCLUDED.preferred_qualification,
                preferred_work_location = EXCLUDED.preferred_work_location,
                preferred_company_type = EXCLUDED.preferred_company_type,
                weight_age = EXCLUDED.weight_age,
                weight_education = EXCLUDED.weight_education,
                weight_occupation = EXCLUDED.weight_occupation,
                weight_location = EXCLUDED.weight_location,
                weight_cultural = EXCLUDED.weight_cultural,
                weight_lifestyle = EXCLUDED.weight_lifestyle,
                match_threshold = EXCLUDED.match_threshold,
                enable_match_notifications = EXCLUDED.enable_match_notifications,
                notification_frequency = EXCLUDED.notification_frequency,
                updated_at = NOW()
        "#;

        sqlx::query(query)
            .bind(&preference.user_id)
            .bind(preference.preferred_age_range.map(|r| r.min as i16))
            .bind(preference.preferred_age_range.map(|r| r.max as i16))
            .bind(&preference.preferred_height.min)
            .bind(&preference.preferred_height.max)
            .bind(&preference.preferred_income.min)
            .bind(&preference.preferred_income.max)
            .bind(&preference.preferred_education)
            .bind(&preference.preferred_occupation)
            .bind(&preference.preferred_cities)
            .bind(&preference.preferred_states)
            .bind(&preference.preferred_countries)
            .bind(&preference.preferred_caste)
            .bind(&preference.preferred_sub_caste)
            .bind(&preference.preferred_gotra)
            .bind(&preference.preferred_mother_tongue)
            .bind(&preference.preferred_marital_status)
            .bind(&preference.preferred_food_habit)
            .bind(&preference.preferred_family_type)
            .bind(&preference.preferred_qualification)
            .bind(&preference.preferred_work_location)
            .bind(&preference.preferred_company_type)
            .bind(preference.criteria_weights.age as i16)
            .bind(preference.criteria_weights.education as i16)
            .bind(preference.criteria_weights.occupation as i16)
            .bind(preference.criteria_weights.location as i16)
            .bind(preference.criteria_weights.cultural as i16)
            .bind(preference.criteria_weights.lifestyle as i16)
            .bind(preference.match_threshold as i16)
            .bind(preference.enable_match_notifications)
            .bind(preference.notification_frequency.as_str())
            .execute(&self.pool)
            .await?;

        tracing::debug!("Upserted preferences for user {}", preference.user_id);

        Ok(())
    }

    /// Fetch a user's preference record.
    pub async fn get(&self, user_id: &str) -> Result<Preference, PreferenceStoreError> {
        let query = r#"
            SELECT *
            FROM preferences
            WHERE user_id = $1
        "#;

        let row = sqlx::query(query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| PreferenceStoreError::NotFound(user_id.to_string()))?;

        row_to_preference(&row)
    }

    /// Delete a user's preference record. Returns whether one existed.
    pub async fn delete(&self, user_id: &str) -> Result<bool, PreferenceStoreError> {
        let query = r#"
            DELETE FROM preferences
            WHERE user_id = $1
        "#;

        let result = sqlx::query(query).bind(user_id).execute(&self.pool).await?;

        Ok(result.rows_affected() > 0)
    }

    /// All preference records with match notifications enabled, for fanout.
    pub async fn list_notification_enabled(
        &self,
    ) -> Result<Vec<Preference>, PreferenceStoreError> {
        let query = r#"
            SELECT *
            FROM preferences
            WHERE enable_match_notifications
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        let preferences: Result<Vec<Preference>, PreferenceStoreError> =
            rows.iter().map(row_to_preference).collect();
        let preferences = preferences?;

        tracing::debug!(
            "Loaded {} notification-enabled preference records",
            preferences.len()
        );

        Ok(preferences)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PreferenceStoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

/// Map a preference row back to the domain record.
fn row_to_preference(row: &PgRow) -> Result<Preference, PreferenceStoreError> {
    let frequency: String = row.get("notification_frequency");
    let notification_frequency = NotificationFrequency::parse(&frequency).ok_or_else(|| {
        PreferenceStoreError::InvalidRecord(format!("unknown notification frequency: {}", frequency))
    })?;

    let age_min: Option<i16> = row.get("age_min");
    let age_max: Option<i16> = row.get("age_max");
    let preferred_age_range = match (age_min, age_max) {
        (Some(min), Some(max)) => Some(AgeRange {
            min: min as u8,
            max: max as u8,
        }),
        _ => None,
    };

    Ok(Preference {
        user_id: row.get("user_id"),
        preferred_age_range,
        preferred_height: StringRange {
            min: row.get("height_min"),
            max: row.get("height_max"),
        },
        preferred_income: StringRange {
            min: row.get("income_min"),
            max: row.get("income_max"),
        },
        preferred_education: row.get("preferred_education"),
        preferred_occupation: row.get("preferred_occupation"),
        preferred_cities: row.get("preferred_cities"),
        preferred_states: row.get("preferred_states"),
        preferred_countries: row.get("preferred_countries"),
        preferred_caste: row.get("preferred_caste"),
        preferred_sub_caste: row.get("preferred_sub_caste"),
        preferred_gotra: row.get("preferred_gotra"),
        preferred_mother_tongue: row.get("preferred_mother_tongue"),
        preferred_marital_status: row.get("preferred_marital_status"),
        preferred_food_habit: row.get("preferred_food_habit"),
        preferred_family_type: row.get("preferred_family_type"),
        preferred_qualification: row.get("preferred_qualification"),
        preferred_work_location: row.get("preferred_work_location"),
        preferred_company_type: row.get("preferred_company_type"),
        criteria_weights: CriteriaWeights {
            age: row.get::<i16, _>("weight_age") as u8,
            education: row.get::<i16, _>("weight_education") as u8,
            occupation: row.get::<i16, _>("weight_occupation") as u8,
            location: row.get::<i16, _>("weight_location") as u8,
            cultural: row.get::<i16, _>("weight_cultural") as u8,
            lifestyle: row.get::<i16, _>("weight_lifestyle") as u8,
        },
        match_threshold: row.get::<i16, _>("match_threshold") as u8,
        enable_match_notifications: row.get("enable_match_notifications"),
        notification_frequency,
        created_at: Some(row.get("created_at")),
        updated_at: Some(row.get("updated_at")),
    })
}
