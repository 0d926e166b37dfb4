use serde_json::{Map, Value};

/// A stored document: attribute name to value.
pub type Item = Map<String, Value>;

/// Key schema of a single-partition-key table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySchema {
    /// Attribute name of the partition (hash) key.
    pub partition_key: String,
    /// Attribute name of the sort (range) key, when the table has one.
    pub sort_key: Option<String>,
}

impl KeySchema {
    /// Creates a schema with only a partition key.
    pub fn new(partition_key: impl Into<String>) -> Self {
        Self {
            partition_key: partition_key.into(),
            sort_key: None,
        }
    }

    /// Reads the partition key value of an item, if it is a string.
    pub fn key_of<'a>(&self, item: &'a Item) -> Option<&'a str> {
        item.get(&self.partition_key).and_then(Value::as_str)
    }
}

/// How `append_to_list` treats values already present in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppendPolicy {
    /// Append unconditionally.
    #[default]
    Always,
    /// Fail with `DuplicateListValue` if any value is already in the list.
    UniqueOnly,
}

/// An attribute that was expected to hold a list of strings holds something else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotAStringList;

/// Returns the string values of a list attribute, `None` when it is absent.
pub fn string_list(item: &Item, attribute: &str) -> Result<Option<Vec<String>>, NotAStringList> {
    match item.get(attribute) {
        None => Ok(None),
        Some(Value::Array(values)) => values
            .iter()
            .map(|v| v.as_str().map(str::to_string).ok_or(NotAStringList))
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        Some(_) => Err(NotAStringList),
    }
}
