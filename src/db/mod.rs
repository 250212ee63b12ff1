//! Storage layer (string key/value store).

pub mod store;

pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};

/// Storage keys as constants.
pub mod keys {
    /// JSON array of activities, most recent first
    pub const ACTIVITIES: &str = "kinetix_activities";
    /// JSON array of goals
    pub const GOALS: &str = "kinetix_goals";
}
