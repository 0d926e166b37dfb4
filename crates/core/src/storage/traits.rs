use async_trait::async_trait;

use super::{AppendPolicy, Item, KeySchema, Result};

/// Key-value store with single-partition-key tables.
///
/// Every operation is a single atomic store-side call. Implementations must
/// not retry transport failures; those propagate to the caller unchanged.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Discovers the key schema of a table.
    async fn describe_table(&self, table: &str) -> Result<KeySchema>;

    /// Gets an item by its partition key. Returns `None` when nothing matches.
    async fn get_item(&self, table: &str, key: &str) -> Result<Option<Item>>;

    /// Writes an item.
    ///
    /// With `overwrite` set to `false` the write is conditional on no item
    /// with the same partition key existing, and fails with `Conflict`.
    async fn put_item(&self, table: &str, item: &Item, overwrite: bool) -> Result<()>;

    /// Appends `values` to the list stored under `attribute`.
    ///
    /// The list is initialized to empty when absent, and the item is created
    /// when it does not exist. Returns the updated item.
    async fn append_to_list(
        &self,
        table: &str,
        key: &str,
        attribute: &str,
        values: &[String],
        policy: AppendPolicy,
    ) -> Result<Item>;

    /// Removes every occurrence of `values` from the list stored under
    /// `attribute`. Values not in the list are ignored. Returns the updated item.
    async fn remove_from_list(
        &self,
        table: &str,
        key: &str,
        attribute: &str,
        values: &[String],
    ) -> Result<Item>;
}
