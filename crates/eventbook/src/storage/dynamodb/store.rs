//! DynamoDB key-value store implementation.
//!
//! Implements `KeyValueStore` from `eventbook_core::storage` using DynamoDB.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::config::Region;
use aws_sdk_dynamodb::types::{AttributeValue, KeyType, ReturnValue};
use aws_sdk_dynamodb::Client;
use tokio::sync::RwLock;

use eventbook_core::storage::{AppendPolicy, Item, KeySchema, KeyValueStore, Result, StoreError};

use super::conversions::{
    attributes_to_item, item_to_attributes, string_list_attribute, Attributes,
};
use super::error::{
    map_describe_table_error, map_get_item_error, map_put_item_error, map_update_item_error,
};
use crate::logging::Logger;

/// Attempts made by `remove_from_list` before reporting a concurrent modification.
const MAX_REMOVE_ATTEMPTS: usize = 3;

/// DynamoDB-based key-value store.
///
/// Key schemas are discovered with DescribeTable on first use and cached for
/// the lifetime of the store.
pub struct DynamoDbStore {
    client: Client,
    schemas: RwLock<HashMap<String, KeySchema>>,
    log: Logger,
}

impl DynamoDbStore {
    /// Creates a new store with the given DynamoDB client.
    pub fn new(client: Client, log: Logger) -> Self {
        Self {
            client,
            schemas: RwLock::new(HashMap::new()),
            log,
        }
    }

    /// Creates a new store using the AWS SDK default credential chain.
    ///
    /// `endpoint_url` points the client at a non-AWS endpoint such as a
    /// local DynamoDB.
    pub async fn connect(
        region: impl Into<String>,
        endpoint_url: Option<&str>,
        log: Logger,
    ) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(region.into()));
        if let Some(url) = endpoint_url {
            loader = loader.endpoint_url(url);
        }
        let config = loader.load().await;

        Self::new(Client::new(&config), log)
    }

    /// Partition key attribute of a table, rejecting composite keys.
    async fn partition_key(&self, table: &str) -> Result<String> {
        let schema = self.describe_table(table).await?;
        match schema.sort_key {
            None => Ok(schema.partition_key),
            Some(sort_key) => Err(StoreError::InvalidData(format!(
                "table {} has sort key {} and cannot be addressed by partition key alone",
                table, sort_key
            ))),
        }
    }

    fn log_remove_retry(&self, table: &str, key: &str, attempt: usize) {
        tracing::debug!(
            parent: self.log.span(),
            table,
            key,
            attempt,
            "list changed during removal, re-reading"
        );
    }

    async fn get_attributes(&self, table: &str, key: &str) -> Result<Option<Attributes>> {
        let partition_key = self.partition_key(table).await?;

        let result = self
            .client
            .get_item()
            .table_name(table)
            .key(partition_key, AttributeValue::S(key.to_string()))
            .consistent_read(true)
            .send()
            .await
            .map_err(map_get_item_error)?;

        Ok(result.item)
    }
}

/// Builds the condition that none of `values` is already in the list `#a`.
fn unique_condition(values: &[String]) -> (String, Vec<(String, AttributeValue)>) {
    let placeholders: Vec<String> = (0..values.len()).map(|i| format!(":u{}", i)).collect();
    let clauses = placeholders
        .iter()
        .map(|p| format!("NOT contains(#a, {})", p))
        .collect::<Vec<_>>()
        .join(" AND ");
    let bindings = placeholders
        .into_iter()
        .zip(values.iter().cloned().map(AttributeValue::S))
        .collect();

    (format!("attribute_not_exists(#a) OR ({})", clauses), bindings)
}

/// Indices of list elements equal to one of `values`.
fn matching_indices(list: &[AttributeValue], values: &[String]) -> Vec<usize> {
    list.iter()
        .enumerate()
        .filter(|(_, element)| {
            element
                .as_s()
                .map(|s| values.iter().any(|v| v == s))
                .unwrap_or(false)
        })
        .map(|(i, _)| i)
        .collect()
}

#[async_trait]
impl KeyValueStore for DynamoDbStore {
    async fn describe_table(&self, table: &str) -> Result<KeySchema> {
        if let Some(schema) = self.schemas.read().await.get(table) {
            return Ok(schema.clone());
        }

        let output = self
            .client
            .describe_table()
            .table_name(table)
            .send()
            .await
            .map_err(|e| map_describe_table_error(e, table))?;

        let elements = output
            .table()
            .map(|description| description.key_schema())
            .unwrap_or_default();

        let mut partition_key = None;
        let mut sort_key = None;
        for element in elements {
            match element.key_type() {
                KeyType::Hash => partition_key = Some(element.attribute_name().to_string()),
                KeyType::Range => sort_key = Some(element.attribute_name().to_string()),
                _ => {}
            }
        }

        let schema = KeySchema {
            partition_key: partition_key.ok_or_else(|| StoreError::SchemaLookup {
                table: table.to_string(),
                reason: "table has no partition key".to_string(),
            })?,
            sort_key,
        };

        tracing::debug!(
            parent: self.log.span(),
            table,
            partition_key = %schema.partition_key,
            "key schema discovered"
        );
        self.schemas
            .write()
            .await
            .insert(table.to_string(), schema.clone());

        Ok(schema)
    }

    async fn get_item(&self, table: &str, key: &str) -> Result<Option<Item>> {
        match self.get_attributes(table, key).await? {
            Some(attributes) => Ok(Some(attributes_to_item(&attributes)?)),
            None => Ok(None),
        }
    }

    async fn put_item(&self, table: &str, item: &Item, overwrite: bool) -> Result<()> {
        let partition_key = self.partition_key(table).await?;
        let key = item
            .get(&partition_key)
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                StoreError::InvalidData(format!("item is missing partition key {}", partition_key))
            })?
            .to_string();

        let mut request = self
            .client
            .put_item()
            .table_name(table)
            .set_item(Some(item_to_attributes(item)));

        if !overwrite {
            request = request
                .condition_expression("attribute_not_exists(#pk)")
                .expression_attribute_names("#pk", &partition_key);
        }

        request
            .send()
            .await
            .map_err(|e| map_put_item_error(e, table, &key))?;

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
        let partition_key = self.partition_key(table).await?;

        let mut request = self
            .client
            .update_item()
            .table_name(table)
            .key(partition_key, AttributeValue::S(key.to_string()))
            .update_expression("SET #a = list_append(if_not_exists(#a, :empty), :v)")
            .expression_attribute_names("#a", attribute)
            .expression_attribute_values(":empty", AttributeValue::L(Vec::new()))
            .expression_attribute_values(":v", string_list_attribute(values))
            .return_values(ReturnValue::AllNew);

        if policy == AppendPolicy::UniqueOnly && !values.is_empty() {
            let (condition, bindings) = unique_condition(values);
            request = request.condition_expression(condition);
            for (placeholder, value) in bindings {
                request = request.expression_attribute_values(placeholder, value);
            }
        }

        let output = request.send().await.map_err(|e| {
            map_update_item_error(
                e,
                StoreError::DuplicateListValue {
                    table: table.to_string(),
                    key: key.to_string(),
                    attribute: attribute.to_string(),
                },
            )
        })?;

        attributes_to_item(&output.attributes.unwrap_or_default())
    }

    async fn remove_from_list(
        &self,
        table: &str,
        key: &str,
        attribute: &str,
        values: &[String],
    ) -> Result<Item> {
        let partition_key = self.partition_key(table).await?;
        let concurrent = || StoreError::ConcurrentModification {
            table: table.to_string(),
            key: key.to_string(),
        };

        for attempt in 1..=MAX_REMOVE_ATTEMPTS {
            let current = self
                .get_attributes(table, key)
                .await?
                .ok_or_else(|| StoreError::InvalidData(format!("no item {} in {}", key, table)))?;

            let indices = match current.get(attribute) {
                None => return attributes_to_item(&current),
                Some(AttributeValue::L(list)) => matching_indices(list, values),
                Some(_) => {
                    return Err(StoreError::InvalidData(format!(
                        "attribute {} is not a list",
                        attribute
                    )))
                }
            };

            if indices.is_empty() {
                return attributes_to_item(&current);
            }

            // Each removed position must still hold the value read above.
            let mut request = self
                .client
                .update_item()
                .table_name(table)
                .key(&partition_key, AttributeValue::S(key.to_string()))
                .expression_attribute_names("#a", attribute)
                .return_values(ReturnValue::AllNew);

            let mut removals = Vec::with_capacity(indices.len());
            let mut conditions = Vec::with_capacity(indices.len());
            for (n, index) in indices.iter().enumerate() {
                let placeholder = format!(":r{}", n);
                removals.push(format!("#a[{}]", index));
                conditions.push(format!("#a[{}] = {}", index, placeholder));
                let expected = current_value(&current, attribute, *index);
                request = request.expression_attribute_values(placeholder, expected);
            }

            let result = request
                .update_expression(format!("REMOVE {}", removals.join(", ")))
                .condition_expression(conditions.join(" AND "))
                .send()
                .await
                .map_err(|e| map_update_item_error(e, concurrent()));

            match result {
                Ok(output) => return attributes_to_item(&output.attributes.unwrap_or_default()),
                Err(StoreError::ConcurrentModification { .. }) => {
                    self.log_remove_retry(table, key, attempt);
                }
                Err(err) => return Err(err),
            }
        }

        Err(concurrent())
    }
}

fn current_value(attributes: &Attributes, attribute: &str, index: usize) -> AttributeValue {
    attributes
        .get(attribute)
        .and_then(|list| list.as_l().ok())
        .and_then(|list| list.get(index))
        .cloned()
        .unwrap_or(AttributeValue::Null(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    use aws_sdk_dynamodb::config::BehaviorVersion;

    use crate::logging::test_support::capture_logs;

    fn s(value: &str) -> AttributeValue {
        AttributeValue::S(value.to_string())
    }

    fn offline_store(log: Logger) -> DynamoDbStore {
        let config = aws_sdk_dynamodb::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .build();
        DynamoDbStore::new(Client::from_conf(config), log)
    }

    #[test]
    fn test_remove_retry_is_logged_under_store_span() {
        let output = capture_logs(|| {
            let store = offline_store(Logger::root("eventbook").component("store"));
            store.log_remove_retry("users", "a@b.com", 2);
        });

        assert!(output.contains("component{name="), "{output}");
        assert!(output.contains("store"), "{output}");
        assert!(output.contains("attempt=2"), "{output}");
        assert!(output.contains("list changed during removal"), "{output}");
    }

    #[test]
    fn test_unique_condition_single_value() {
        let (condition, bindings) = unique_condition(&["e1".to_string()]);

        assert_eq!(
            condition,
            "attribute_not_exists(#a) OR (NOT contains(#a, :u0))"
        );
        assert_eq!(bindings, vec![(":u0".to_string(), s("e1"))]);
    }

    #[test]
    fn test_unique_condition_multiple_values() {
        let (condition, bindings) = unique_condition(&["e1".to_string(), "e2".to_string()]);

        assert_eq!(
            condition,
            "attribute_not_exists(#a) OR (NOT contains(#a, :u0) AND NOT contains(#a, :u1))"
        );
        assert_eq!(bindings.len(), 2);
    }

    #[test]
    fn test_matching_indices() {
        let list = vec![s("e1"), s("e2"), s("e1"), AttributeValue::N("1".to_string())];

        assert_eq!(matching_indices(&list, &["e1".to_string()]), vec![0, 2]);
        assert_eq!(matching_indices(&list, &["e2".to_string()]), vec![1]);
        assert!(matching_indices(&list, &["e9".to_string()]).is_empty());
    }

    #[test]
    fn test_current_value() {
        let mut attributes = HashMap::new();
        attributes.insert("savedEventIds".to_string(), AttributeValue::L(vec![s("e1"), s("e2")]));

        assert_eq!(current_value(&attributes, "savedEventIds", 1), s("e2"));
        assert_eq!(
            current_value(&attributes, "savedEventIds", 5),
            AttributeValue::Null(true)
        );
    }
}
