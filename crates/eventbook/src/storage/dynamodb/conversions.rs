//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and
//! JSON documents. These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::{Map, Number, Value};

use eventbook_core::storage::{Item, StoreError};

/// A DynamoDB item as the SDK represents it.
pub type Attributes = HashMap<String, AttributeValue>;

// ============================================================================
// JSON to DynamoDB
// ============================================================================

/// Convert a JSON value to a DynamoDB attribute.
pub fn value_to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(values) => AttributeValue::L(values.iter().map(value_to_attribute).collect()),
        Value::Object(map) => AttributeValue::M(
            map.iter()
                .map(|(k, v)| (k.clone(), value_to_attribute(v)))
                .collect(),
        ),
    }
}

/// Convert a stored document to a DynamoDB item.
pub fn item_to_attributes(item: &Item) -> Attributes {
    item.iter()
        .map(|(k, v)| (k.clone(), value_to_attribute(v)))
        .collect()
}

/// Wrap a list of strings as a DynamoDB list attribute.
pub fn string_list_attribute(values: &[String]) -> AttributeValue {
    AttributeValue::L(values.iter().cloned().map(AttributeValue::S).collect())
}

// ============================================================================
// DynamoDB to JSON
// ============================================================================

/// Convert a DynamoDB attribute to a JSON value.
///
/// String and number sets keep their DynamoDB type tag, `{"SS": [...]}` or
/// `{"NS": [...]}`, so a set is never mistaken for a list. Binary attributes
/// are rejected.
pub fn attribute_to_value(attribute: &AttributeValue) -> Result<Value, StoreError> {
    match attribute {
        AttributeValue::S(s) => Ok(Value::String(s.clone())),
        AttributeValue::N(n) => parse_number(n).map(Value::Number),
        AttributeValue::Bool(b) => Ok(Value::Bool(*b)),
        AttributeValue::Null(_) => Ok(Value::Null),
        AttributeValue::L(values) => values
            .iter()
            .map(attribute_to_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        AttributeValue::M(map) => map
            .iter()
            .map(|(k, v)| attribute_to_value(v).map(|v| (k.clone(), v)))
            .collect::<Result<Map<_, _>, _>>()
            .map(Value::Object),
        AttributeValue::Ss(values) => Ok(tagged_set(
            "SS",
            values.iter().cloned().map(Value::String).collect(),
        )),
        AttributeValue::Ns(values) => values
            .iter()
            .map(|n| parse_number(n).map(Value::Number))
            .collect::<Result<Vec<_>, _>>()
            .map(|numbers| tagged_set("NS", numbers)),
        other => Err(StoreError::InvalidData(format!(
            "Unsupported attribute type: {:?}",
            other
        ))),
    }
}

/// Convert a DynamoDB item to a stored document.
pub fn attributes_to_item(attributes: &Attributes) -> Result<Item, StoreError> {
    attributes
        .iter()
        .map(|(k, v)| attribute_to_value(v).map(|v| (k.clone(), v)))
        .collect()
}

fn tagged_set(tag: &str, members: Vec<Value>) -> Value {
    let mut set = Map::new();
    set.insert(tag.to_string(), Value::Array(members));
    Value::Object(set)
}

fn parse_number(n: &str) -> Result<Number, StoreError> {
    if let Ok(i) = n.parse::<i64>() {
        return Ok(Number::from(i));
    }
    if let Ok(u) = n.parse::<u64>() {
        return Ok(Number::from(u));
    }
    n.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| StoreError::InvalidData(format!("Invalid number: {}", n)))
}

// ============================================================================
// Tests
// ============================================================================
