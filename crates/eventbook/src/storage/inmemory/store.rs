//! In-memory key-value store implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use eventbook_core::storage::{AppendPolicy, Item, KeySchema, KeyValueStore, Result, StoreError};

#[derive(Debug)]
struct Table {
    schema: KeySchema,
    items: HashMap<String, Item>,
}

/// In-memory storage backend.
///
/// Tables live in a HashMap wrapped in `Arc<RwLock<_>>`. Every operation
/// holds the lock for its whole duration, which gives the same per-item
/// atomicity a real store provides. Data is lost when the store is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<HashMap<String, Table>>>,
}

impl InMemoryStore {
    /// Creates a new store without tables.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new store with one empty table.
    pub fn with_table(name: impl Into<String>, schema: KeySchema) -> Self {
        let mut tables = HashMap::new();
        tables.insert(
            name.into(),
            Table {
                schema,
                items: HashMap::new(),
            },
        );
        Self {
            tables: Arc::new(RwLock::new(tables)),
        }
    }

    /// Creates an empty table, replacing any table with the same name.
    #[cfg_attr(not(test), allow(dead_code))]
    pub async fn create_table(&self, name: impl Into<String>, schema: KeySchema) {
        self.tables.write().await.insert(
            name.into(),
            Table {
                schema,
                items: HashMap::new(),
            },
        );
    }
}

fn table_not_found(table: &str) -> StoreError {
    StoreError::QueryFailed(format!("Table not found: {table}"))
}

fn list_values(item: &Item, attribute: &str) -> Result<Vec<Value>> {
    match item.get(attribute) {
        None => Ok(Vec::new()),
        Some(Value::Array(values)) => Ok(values.clone()),
        Some(_) => Err(StoreError::InvalidData(format!(
            "attribute {attribute} is not a list"
        ))),
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn describe_table(&self, table: &str) -> Result<KeySchema> {
        let tables = self.tables.read().await;
        tables
            .get(table)
            .map(|t| t.schema.clone())
            .ok_or_else(|| StoreError::SchemaLookup {
                table: table.to_string(),
                reason: "table not found".to_string(),
            })
    }

    async fn get_item(&self, table: &str, key: &str) -> Result<Option<Item>> {
        let tables = self.tables.read().await;
        let t = tables.get(table).ok_or_else(|| table_not_found(table))?;
        Ok(t.items.get(key).cloned())
    }

    async fn put_item(&self, table: &str, item: &Item, overwrite: bool) -> Result<()> {
        let mut tables = self.tables.write().await;
        let t = tables.get_mut(table).ok_or_else(|| table_not_found(table))?;

        let key = t
            .schema
            .key_of(item)
            .ok_or_else(|| {
                StoreError::InvalidData(format!(
                    "item is missing partition key {}",
                    t.schema.partition_key
                ))
            })?
            .to_string();

        if !overwrite && t.items.contains_key(&key) {
            return Err(StoreError::Conflict {
                table: table.to_string(),
                key,
            });
        }

        t.items.insert(key, item.clone());
        Ok(())
    }

    async fn append_to_list(
        &self,
        table: &str,
        key: &str,
        attribute: &str,
        values: &[String],
        policy: AppendPolicy,
    ) -> Result<Item> {
        let mut tables = self.tables.write().await;
        let t = tables.get_mut(table).ok_or_else(|| table_not_found(table))?;
        let partition_key = t.schema.partition_key.clone();

        let item = t.items.entry(key.to_string()).or_insert_with(|| {
            let mut item = Item::new();
            item.insert(partition_key, Value::String(key.to_string()));
            item
        });

        let mut list = list_values(item, attribute)?;

        if policy == AppendPolicy::UniqueOnly
            && values
                .iter()
                .any(|v| list.iter().any(|existing| existing.as_str() == Some(v)))
        {
            return Err(StoreError::DuplicateListValue {
                table: table.to_string(),
                key: key.to_string(),
                attribute: attribute.to_string(),
            });
        }

        list.extend(values.iter().cloned().map(Value::String));
        item.insert(attribute.to_string(), Value::Array(list));

        Ok(item.clone())
    }

    async fn remove_from_list(
        &self,
        table: &str,
        key: &str,
        attribute: &str,
        values: &[String],
    ) -> Result<Item> {
        let mut tables = self.tables.write().await;
        let t = tables.get_mut(table).ok_or_else(|| table_not_found(table))?;

        let item = t
            .items
            .get_mut(key)
            .ok_or_else(|| StoreError::InvalidData(format!("no item {key} in {table}")))?;

        if !item.contains_key(attribute) {
            return Ok(item.clone());
        }

        let list: Vec<Value> = list_values(item, attribute)?
            .into_iter()
            .filter(|v| !values.iter().any(|r| v.as_str() == Some(r)))
            .collect();
        item.insert(attribute.to_string(), Value::Array(list));

        Ok(item.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TABLE: &str = "users";

    fn store() -> InMemoryStore {
        InMemoryStore::with_table(TABLE, KeySchema::new("email"))
    }

    fn item(value: Value) -> Item {
        value.as_object().cloned().unwrap()
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    // ==================== describe_table ====================

    #[tokio::test]
    async fn test_describe_table() {
        let schema = store().describe_table(TABLE).await.unwrap();
        assert_eq!(schema, KeySchema::new("email"));
    }

    #[tokio::test]
    async fn test_describe_unknown_table() {
        let result = store().describe_table("missing").await;
        assert!(matches!(result, Err(StoreError::SchemaLookup { .. })));
    }

    #[tokio::test]
    async fn test_create_table() {
        let store = InMemoryStore::new();
        store.create_table("events", KeySchema::new("id")).await;

        let schema = store.describe_table("events").await.unwrap();
        assert_eq!(schema.partition_key, "id");
    }

    // ==================== get/put ====================

    #[tokio::test]
    async fn test_get_nonexistent_item() {
        let result = store().get_item(TABLE, "a@b.com").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_get_from_unknown_table() {
        let result = store().get_item("missing", "a@b.com").await;
        assert!(matches!(result, Err(StoreError::QueryFailed(_))));
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let store = store();
        let user = item(json!({ "email": "a@b.com" }));

        store.put_item(TABLE, &user, false).await.unwrap();

        let retrieved = store.get_item(TABLE, "a@b.com").await.unwrap();
        assert_eq!(retrieved, Some(user));
    }

    #[tokio::test]
    async fn test_put_without_overwrite_conflicts() {
        let store = store();
        let user = item(json!({ "email": "a@b.com" }));

        store.put_item(TABLE, &user, false).await.unwrap();
        let result = store.put_item(TABLE, &user, false).await;

        assert_eq!(
            result,
            Err(StoreError::Conflict {
                table: TABLE.to_string(),
                key: "a@b.com".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_put_with_overwrite_replaces() {
        let store = store();
        store
            .put_item(TABLE, &item(json!({ "email": "a@b.com", "n": 1 })), false)
            .await
            .unwrap();
        store
            .put_item(TABLE, &item(json!({ "email": "a@b.com", "n": 2 })), true)
            .await
            .unwrap();

        let retrieved = store.get_item(TABLE, "a@b.com").await.unwrap().unwrap();
        assert_eq!(retrieved["n"], 2);
    }

    #[tokio::test]
    async fn test_put_without_partition_key() {
        let result = store()
            .put_item(TABLE, &item(json!({ "name": "nobody" })), true)
            .await;
        assert!(matches!(result, Err(StoreError::InvalidData(_))));
    }

    // ==================== list operations ====================

    #[tokio::test]
    async fn test_append_initializes_list_and_creates_item() {
        let store = store();

        let updated = store
            .append_to_list(TABLE, "a@b.com", "savedEventIds", &ids(&["e1"]), AppendPolicy::Always)
            .await
            .unwrap();

        assert_eq!(
            Value::Object(updated),
            json!({ "email": "a@b.com", "savedEventIds": ["e1"] })
        );
    }

    #[tokio::test]
    async fn test_append_preserves_order() {
        let store = store();
        for id in ["e1", "e2", "e3"] {
            store
                .append_to_list(TABLE, "a@b.com", "savedEventIds", &ids(&[id]), AppendPolicy::Always)
                .await
                .unwrap();
        }

        let item = store.get_item(TABLE, "a@b.com").await.unwrap().unwrap();
        assert_eq!(item["savedEventIds"], json!(["e1", "e2", "e3"]));
    }

    #[tokio::test]
    async fn test_append_always_allows_duplicates() {
        let store = store();
        for _ in 0..2 {
            store
                .append_to_list(TABLE, "a@b.com", "tags", &ids(&["x"]), AppendPolicy::Always)
                .await
                .unwrap();
        }

        let item = store.get_item(TABLE, "a@b.com").await.unwrap().unwrap();
        assert_eq!(item["tags"], json!(["x", "x"]));
    }

    #[tokio::test]
    async fn test_append_unique_rejects_duplicates() {
        let store = store();
        store
            .append_to_list(TABLE, "a@b.com", "savedEventIds", &ids(&["e1"]), AppendPolicy::UniqueOnly)
            .await
            .unwrap();

        let result = store
            .append_to_list(TABLE, "a@b.com", "savedEventIds", &ids(&["e1"]), AppendPolicy::UniqueOnly)
            .await;

        assert!(matches!(result, Err(StoreError::DuplicateListValue { .. })));
        let item = store.get_item(TABLE, "a@b.com").await.unwrap().unwrap();
        assert_eq!(item["savedEventIds"], json!(["e1"]));
    }

    #[tokio::test]
    async fn test_append_to_non_list_attribute() {
        let store = store();
        store
            .put_item(TABLE, &item(json!({ "email": "a@b.com", "savedEventIds": "e1" })), true)
            .await
            .unwrap();

        let result = store
            .append_to_list(TABLE, "a@b.com", "savedEventIds", &ids(&["e2"]), AppendPolicy::Always)
            .await;
        assert!(matches!(result, Err(StoreError::InvalidData(_))));
    }

    #[tokio::test]
    async fn test_remove_from_list() {
        let store = store();
        store
            .append_to_list(TABLE, "a@b.com", "savedEventIds", &ids(&["e1", "e2", "e3"]), AppendPolicy::Always)
            .await
            .unwrap();

        let updated = store
            .remove_from_list(TABLE, "a@b.com", "savedEventIds", &ids(&["e2"]))
            .await
            .unwrap();

        assert_eq!(updated["savedEventIds"], json!(["e1", "e3"]));
    }

    #[tokio::test]
    async fn test_remove_absent_value_is_ignored() {
        let store = store();
        store
            .append_to_list(TABLE, "a@b.com", "savedEventIds", &ids(&["e1"]), AppendPolicy::Always)
            .await
            .unwrap();

        let updated = store
            .remove_from_list(TABLE, "a@b.com", "savedEventIds", &ids(&["e9"]))
            .await
            .unwrap();

        assert_eq!(updated["savedEventIds"], json!(["e1"]));
    }

    #[tokio::test]
    async fn test_remove_from_missing_item() {
        let result = store()
            .remove_from_list(TABLE, "a@b.com", "savedEventIds", &ids(&["e1"]))
            .await;
        assert!(matches!(result, Err(StoreError::InvalidData(_))));
    }

    #[tokio::test]
    async fn test_concurrent_appends_are_not_lost() {
        let store = store();

        let handles: Vec<_> = (0..20)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .append_to_list(
                            TABLE,
                            "a@b.com",
                            "savedEventIds",
                            &[format!("e{i}")],
                            AppendPolicy::UniqueOnly,
                        )
                        .await
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let item = store.get_item(TABLE, "a@b.com").await.unwrap().unwrap();
        assert_eq!(item["savedEventIds"].as_array().unwrap().len(), 20);
    }
}
