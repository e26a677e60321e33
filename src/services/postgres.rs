use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use crate::models::{
    FilterSettings, Gender, Location, ProfileSummary, Relation, RelationSnapshot, SearchGender,
};
use crate::services::sources::{
    ActivityRecorder, CandidateSource, DiscoveryStore, RelationSource, StoreError,
};

const PROFILE_COLUMNS: &str = r#"
    p.id, p.session_id, p.gender, p.birthday, p.latitude, p.longitude,
    p.is_deleted, p.is_blocked, p.is_invisible, p.last_online, p.primary_image,
    f.search_gender AS looking_for
"#;

/// PostgreSQL-backed discovery store
///
/// Reads the profile, filter and relation tables maintained by the rest of
/// the Lume backend. The only write is the `last_online` refresh.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
        )
        .await
    }

    async fn edges(&self, table: &str, session_id: &str) -> Result<Vec<Relation>, StoreError> {
        let query = format!(
            r#"
            SELECT source_session_id, target_session_id, is_active, created_at, updated_at
            FROM {}
            WHERE source_session_id = $1 OR target_session_id = $1
            "#,
            table
        );

        let rows = sqlx::query(&query).bind(session_id).fetch_all(&self.pool).await?;

        rows.iter().map(relation_from_row).collect()
    }
}

fn profile_from_row(row: &PgRow) -> Result<ProfileSummary, StoreError> {
    let session_id: String = row.try_get("session_id")?;

    let gender: String = row.try_get("gender")?;
    let gender = gender
        .parse::<Gender>()
        .map_err(|e| StoreError::Corrupt(format!("profile {}: gender {}", session_id, e)))?;

    let looking_for = row
        .try_get::<Option<String>, _>("looking_for")?
        .map(|value| value.parse::<SearchGender>())
        .transpose()
        .map_err(|e| StoreError::Corrupt(format!("profile {}: search gender {}", session_id, e)))?;

    let latitude: Option<f64> = row.try_get("latitude")?;
    let longitude: Option<f64> = row.try_get("longitude")?;
    let location = match (latitude, longitude) {
        (Some(lat), Some(lon)) => Some(Location::new(lat, lon)),
        _ => None,
    };

    Ok(ProfileSummary {
        id: row.try_get("id")?,
        session_id,
        gender,
        birthday: row.try_get("birthday")?,
        location,
        looking_for,
        is_deleted: row.try_get("is_deleted")?,
        is_blocked: row.try_get("is_blocked")?,
        is_invisible: row.try_get("is_invisible")?,
        last_online: row.try_get("last_online")?,
        primary_image_ref: row.try_get("primary_image")?,
    })
}

fn filter_from_row(row: &PgRow) -> Result<FilterSettings, StoreError> {
    let session_id: String = row.try_get("session_id")?;

    let search_gender: String = row.try_get("search_gender")?;
    let search_gender = search_gender
        .parse::<SearchGender>()
        .map_err(|e| StoreError::Corrupt(format!("filter {}: search gender {}", session_id, e)))?;

    let age_from: i16 = row.try_get("age_from")?;
    let age_to: i16 = row.try_get("age_to")?;
    let page: i32 = row.try_get("page")?;
    let page_size: i32 = row.try_get("page_size")?;

    Ok(FilterSettings {
        search_gender,
        looking_for: row.try_get("looking_for")?,
        age_from: narrow_column(&session_id, "age_from", age_from)?,
        age_to: narrow_column(&session_id, "age_to", age_to)?,
        max_distance_km: row.try_get("max_distance_km")?,
        page: narrow_column(&session_id, "page", page)?,
        page_size: narrow_column(&session_id, "page_size", page_size)?,
        session_id,
    })
}

/// Narrow a signed SQL integer into the unsigned width the filter uses
fn narrow_column<T, S>(session_id: &str, column: &str, value: S) -> Result<T, StoreError>
where
    T: TryFrom<S>,
    S: Copy + Into<i64>,
{
    T::try_from(value).map_err(|_| {
        StoreError::Corrupt(format!(
            "filter {}: {} out of range ({})",
            session_id,
            column,
            value.into()
        ))
    })
}

fn relation_from_row(row: &PgRow) -> Result<Relation, StoreError> {
    Ok(Relation {
        source_session_id: row.try_get("source_session_id")?,
        target_session_id: row.try_get("target_session_id")?,
        is_active: row.try_get("is_active")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

impl CandidateSource for PostgresClient {
    async fn requester(&self, session_id: &str) -> Result<Option<ProfileSummary>, StoreError> {
        let query = format!(
            r#"
            SELECT {}
            FROM profiles p
            LEFT JOIN filters f ON f.session_id = p.session_id
            WHERE p.session_id = $1 AND p.is_deleted = FALSE
            "#,
            PROFILE_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(session_id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(profile_from_row).transpose()
    }

    async fn filter_settings(
        &self,
        session_id: &str,
    ) -> Result<Option<FilterSettings>, StoreError> {
        let query = r#"
            SELECT session_id, search_gender, looking_for, age_from, age_to,
                   max_distance_km, page, page_size
            FROM filters
            WHERE session_id = $1
        "#;

        let row = sqlx::query(query)
            .bind(session_id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(filter_from_row).transpose()
    }

    async fn candidates(&self) -> Result<Vec<ProfileSummary>, StoreError> {
        let query = format!(
            r#"
            SELECT {}
            FROM profiles p
            LEFT JOIN filters f ON f.session_id = p.session_id
            WHERE p.is_deleted = FALSE
              AND p.latitude IS NOT NULL
              AND p.longitude IS NOT NULL
            "#,
            PROFILE_COLUMNS
        );

        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        let mut profiles = Vec::with_capacity(rows.len());
        for row in &rows {
            match profile_from_row(row) {
                Ok(profile) => profiles.push(profile),
                Err(StoreError::Corrupt(reason)) => {
                    tracing::warn!("Skipping candidate row: {}", reason);
                }
                Err(e) => return Err(e),
            }
        }

        tracing::debug!("Loaded {} candidate profiles", profiles.len());

        Ok(profiles)
    }
}

impl RelationSource for PostgresClient {
    async fn relations_for(&self, session_id: &str) -> Result<RelationSnapshot, StoreError> {
        Ok(RelationSnapshot {
            blocks: self.edges("blocks", session_id).await?,
            complaints: self.edges("complaints", session_id).await?,
            likes: self.edges("likes", session_id).await?,
        })
    }
}

impl ActivityRecorder for PostgresClient {
    /// Single-row update, so concurrent refreshes simply race to the same value
    async fn touch_last_online(
        &self,
        session_id: &str,
        at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let query = r#"
            UPDATE profiles
            SET last_online = GREATEST(last_online, $2)
            WHERE session_id = $1
        "#;

        sqlx::query(query)
            .bind(session_id)
            .bind(at)
            .execute(&self.pool)
            .await?;

        tracing::trace!("Refreshed last_online for {}", session_id);

        Ok(())
    }
}

impl DiscoveryStore for PostgresClient {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
            .map_err(Into::into)
    }
}
