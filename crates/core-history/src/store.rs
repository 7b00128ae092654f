use core_utils::Db;

#[derive(Debug, Clone)]
pub struct SlateDBHistoryStore {
    pub db: Db,
}

impl SlateDBHistoryStore {
    #[must_use]
    pub const fn new(db: Db) -> Self {
        Self { db }
    }

    // Create a new store with a new in-memory database
    pub async fn new_in_memory() -> Self {
        Self::new(Db::memory().await)
    }
}
