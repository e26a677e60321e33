use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use crate::models::{FilterSettings, ProfileSummary, Relation, RelationSnapshot};
use crate::services::sources::{
    ActivityRecorder, CandidateSource, DiscoveryStore, RelationSource, StoreError,
};

#[derive(Default)]
struct Tables {
    profiles: HashMap<String, ProfileSummary>,
    filters: HashMap<String, FilterSettings>,
    blocks: Vec<Relation>,
    complaints: Vec<Relation>,
    likes: Vec<Relation>,
}

/// In-process store used by tests and benchmarks
///
/// Mirrors the Postgres store's contract, including the candidate pre-filter
/// and copying each profile's own search gender into `looking_for`.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_profile(&self, profile: ProfileSummary) {
        let mut tables = self.tables.write().await;
        tables.profiles.insert(profile.session_id.clone(), profile);
    }

    pub async fn upsert_filter(&self, filter: FilterSettings) {
        let mut tables = self.tables.write().await;
        tables.filters.insert(filter.session_id.clone(), filter);
    }

    pub async fn add_block(&self, edge: Relation) {
        self.tables.write().await.blocks.push(edge);
    }

    pub async fn add_complaint(&self, edge: Relation) {
        self.tables.write().await.complaints.push(edge);
    }

    pub async fn add_like(&self, edge: Relation) {
        self.tables.write().await.likes.push(edge);
    }

    /// Current profile row, bypassing discovery rules
    pub async fn profile(&self, session_id: &str) -> Option<ProfileSummary> {
        self.tables.read().await.profiles.get(session_id).cloned()
    }
}

impl Tables {
    fn with_looking_for(&self, profile: &ProfileSummary) -> ProfileSummary {
        let mut profile = profile.clone();
        if let Some(filter) = self.filters.get(&profile.session_id) {
            profile.looking_for = Some(filter.search_gender);
        }
        profile
    }
}

fn touching<'a>(edges: &'a [Relation], session_id: &'a str) -> impl Iterator<Item = Relation> + 'a {
    edges
        .iter()
        .filter(move |edge| {
            edge.source_session_id == session_id || edge.target_session_id == session_id
        })
        .cloned()
}

impl CandidateSource for InMemoryStore {
    async fn requester(&self, session_id: &str) -> Result<Option<ProfileSummary>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .profiles
            .get(session_id)
            .filter(|profile| !profile.is_deleted)
            .map(|profile| tables.with_looking_for(profile)))
    }

    async fn filter_settings(
        &self,
        session_id: &str,
    ) -> Result<Option<FilterSettings>, StoreError> {
        Ok(self.tables.read().await.filters.get(session_id).cloned())
    }

    async fn candidates(&self) -> Result<Vec<ProfileSummary>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .profiles
            .values()
            .filter(|profile| !profile.is_deleted && profile.location.is_some())
            .map(|profile| tables.with_looking_for(profile))
            .collect())
    }
}

impl RelationSource for InMemoryStore {
    async fn relations_for(&self, session_id: &str) -> Result<RelationSnapshot, StoreError> {
        let tables = self.tables.read().await;
        Ok(RelationSnapshot {
            blocks: touching(&tables.blocks, session_id).collect(),
            complaints: touching(&tables.complaints, session_id).collect(),
            likes: touching(&tables.likes, session_id).collect(),
        })
    }
}

impl ActivityRecorder for InMemoryStore {
    async fn touch_last_online(
        &self,
        session_id: &str,
        at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if let Some(profile) = tables.profiles.get_mut(session_id) {
            profile.last_online = at;
        }
        Ok(())
    }
}

impl DiscoveryStore for InMemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, Location, SearchGender};
    use chrono::{NaiveDate, TimeDelta};

    fn profile(session_id: &str, location: Option<Location>) -> ProfileSummary {
        ProfileSummary {
            id: 1,
            session_id: session_id.to_string(),
            gender: Gender::Female,
            birthday: NaiveDate::from_ymd_opt(1996, 9, 1).unwrap(),
            location,
            looking_for: None,
            is_deleted: false,
            is_blocked: false,
            is_invisible: false,
            last_online: Utc::now() - TimeDelta::days(1),
            primary_image_ref: None,
        }
    }

    #[tokio::test]
    async fn test_candidates_skip_deleted_and_unlocated() {
        let store = InMemoryStore::new();
        store.insert_profile(profile("a", Some(Location::new(1.0, 1.0)))).await;
        store.insert_profile(profile("b", None)).await;
        let mut gone = profile("c", Some(Location::new(1.0, 1.0)));
        gone.is_deleted = true;
        store.insert_profile(gone).await;

        let candidates = store.candidates().await.unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].session_id, "a");
    }

    #[tokio::test]
    async fn test_looking_for_copied_from_filter() {
        let store = InMemoryStore::new();
        store.insert_profile(profile("a", Some(Location::new(1.0, 1.0)))).await;
        store
            .upsert_filter(FilterSettings {
                session_id: "a".to_string(),
                search_gender: SearchGender::Male,
                looking_for: None,
                age_from: 18,
                age_to: 99,
                max_distance_km: 10.0,
                page: 1,
                page_size: 10,
            })
            .await;

        let candidates = store.candidates().await.unwrap();
        assert_eq!(candidates[0].looking_for, Some(SearchGender::Male));
    }

    #[tokio::test]
    async fn test_relations_only_touch_requester() {
        let store = InMemoryStore::new();
        let now = Utc::now();
        store.add_block(Relation::new("me", "x", now)).await;
        store.add_block(Relation::new("y", "me", now)).await;
        store.add_block(Relation::new("y", "z", now)).await;

        let snapshot = store.relations_for("me").await.unwrap();
        assert_eq!(snapshot.blocks.len(), 2);
        assert!(snapshot.complaints.is_empty());
    }

    #[tokio::test]
    async fn test_touch_is_idempotent() {
        let store = InMemoryStore::new();
        store.insert_profile(profile("a", None)).await;
        let at = Utc::now();

        store.touch_last_online("a", at).await.unwrap();
        store.touch_last_online("a", at).await.unwrap();
        store.touch_last_online("missing", at).await.unwrap();

        assert_eq!(store.profile("a").await.unwrap().last_online, at);
    }
}
