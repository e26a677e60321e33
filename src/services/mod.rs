// Service exports
pub mod discovery;
pub mod memory;
pub mod postgres;
pub mod sources;

pub use discovery::{discover_for, spawn_touch_last_online, DiscoveryServiceError};
pub use memory::InMemoryStore;
pub use postgres::PostgresClient;
pub use sources::{ActivityRecorder, CandidateSource, DiscoveryStore, RelationSource, StoreError};
