pub mod iterable;

use bytes::Bytes;
use iterable::IterableEntity;
use serde_json::de;
use serde_json::ser;
use slatedb::{Db as SlateDb, DbIterator, SlateDBError};
use snafu::prelude::*;
use std::ops::RangeBounds;
use std::sync::Arc;

#[derive(Snafu, Debug)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("SlateDB error: {source}"))]
    Database { source: SlateDBError },

    #[snafu(display("SlateDB error while fetching key {key}: {source}"))]
    KeyGet { key: String, source: SlateDBError },

    #[snafu(display("SlateDB error while putting key {key}: {source}"))]
    KeyPut { key: String, source: SlateDBError },

    #[snafu(display("Error serializing value: {source}"))]
    SerializeValue { source: serde_json::Error },

    #[snafu(display("Deserialize error: {source}"))]
    DeserializeValue { source: serde_json::Error },

    #[snafu(display("Scan Failed: {source}"))]
    ScanFailed { source: SlateDBError },
}

type Result<T> = std::result::Result<T, Error>;

#[derive(Clone)]
pub struct Db(Arc<SlateDb>);

impl std::fmt::Debug for Db {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Db")
    }
}

impl Db {
    pub const fn new(db: Arc<SlateDb>) -> Self {
        Self(db)
    }

    #[allow(clippy::expect_used)]
    pub async fn memory() -> Self {
        let object_store = object_store::memory::InMemory::new();
        let db = SlateDb::open(
            object_store::path::Path::from("/"),
            std::sync::Arc::new(object_store),
        )
        .await
        .expect("Failed to open database");
        Self(Arc::new(db))
    }

    /// Closes the database connection.
    ///
    /// # Errors
    ///
    /// Returns a `DbError` if the underlying database operation fails.
    pub async fn close(&self) -> Result<()> {
        self.0.close().await.context(DatabaseSnafu)?;
        Ok(())
    }

    /// Stores a key-value pair in the database.
    pub async fn put<T: serde::Serialize + Sync>(&self, key: &str, value: &T) -> Result<()> {
        let serialized = ser::to_vec(value).context(SerializeValueSnafu)?;
        self.0
            .put(key.as_bytes(), serialized.as_slice())
            .await
            .context(KeyPutSnafu {
                key: key.to_string(),
            })
    }

    /// Retrieves a value from the database by its key.
    pub async fn get<T: for<'de> serde::de::Deserialize<'de>>(
        &self,
        key: &str,
    ) -> Result<Option<T>> {
        let value: Option<Bytes> = self.0.get(key.as_bytes()).await.context(KeyGetSnafu {
            key: key.to_string(),
        })?;
        value.map_or_else(
            || Ok(None),
            |bytes| de::from_slice(&bytes).context(DeserializeValueSnafu),
        )
    }

    /// Stores an entity under its own key.
    pub async fn put_iterable_entity<T: serde::Serialize + Sync + IterableEntity>(
        &self,
        entity: &T,
    ) -> Result<()> {
        let serialized = ser::to_vec(entity).context(SerializeValueSnafu)?;
        let key = entity.key();
        self.0
            .put(&key[..], serialized.as_slice())
            .await
            .context(DatabaseSnafu)
    }

    /// Iterator for iterating in range
    pub async fn range_iterator<R: RangeBounds<Bytes> + Send>(
        &self,
        range: R,
    ) -> Result<DbIterator<'_>> {
        self.0.scan(range).await.context(ScanFailedSnafu)
    }

    /// Fetch items from a key range in key order, stopping after `limit` items.
    pub async fn items_from_range<
        R: RangeBounds<Bytes> + Send,
        T: for<'de> serde::de::Deserialize<'de> + Send,
    >(
        &self,
        range: R,
        limit: Option<u16>,
    ) -> Result<Vec<T>> {
        let mut iter = self.range_iterator(range).await?;
        let mut items: Vec<T> = vec![];
        while let Some(item) = iter.next().await.context(ScanFailedSnafu)? {
            let item = de::from_slice(&item.value).context(DeserializeValueSnafu)?;
            items.push(item);
            if items.len() >= usize::from(limit.unwrap_or(u16::MAX)) {
                break;
            }
        }
        Ok(items)
    }
}
