//! Typed value segments and the codec that builds them from raw JSON

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::DomainError;

/// Type tag carried by every variable value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentType {
    #[serde(rename = "string")]
    String,
    #[serde(rename = "number")]
    Number,
    #[serde(rename = "integer")]
    Integer,
    #[serde(rename = "float")]
    Float,
    #[serde(rename = "boolean")]
    Boolean,
    #[serde(rename = "object")]
    Object,
    #[serde(rename = "secret")]
    Secret,
    #[serde(rename = "file")]
    File,
    #[serde(rename = "none")]
    None,
    #[serde(rename = "array[any]")]
    ArrayAny,
    #[serde(rename = "array[string]")]
    ArrayString,
    #[serde(rename = "array[number]")]
    ArrayNumber,
    #[serde(rename = "array[object]")]
    ArrayObject,
    #[serde(rename = "array[file]")]
    ArrayFile,
    #[serde(rename = "array[boolean]")]
    ArrayBoolean,
}

impl SegmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Secret => "secret",
            Self::File => "file",
            Self::None => "none",
            Self::ArrayAny => "array[any]",
            Self::ArrayString => "array[string]",
            Self::ArrayNumber => "array[number]",
            Self::ArrayObject => "array[object]",
            Self::ArrayFile => "array[file]",
            Self::ArrayBoolean => "array[boolean]",
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(
            self,
            Self::ArrayAny
                | Self::ArrayString
                | Self::ArrayNumber
                | Self::ArrayObject
                | Self::ArrayFile
                | Self::ArrayBoolean
        )
    }

    /// Infer the narrowest type describing a raw JSON value
    pub fn infer(value: &Value) -> Self {
        match value {
            Value::Null => Self::None,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Object(_) => Self::Object,
            Value::Array(items) => infer_array(items),
        }
    }

    /// Whether a raw JSON value can be stored under this type
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::String | Self::Secret => value.is_string(),
            Self::Number | Self::Float => value.is_number(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Boolean => value.is_boolean(),
            Self::Object | Self::File => value.is_object(),
            Self::None => value.is_null(),
            Self::ArrayAny => value.is_array(),
            Self::ArrayString => all_items(value, Value::is_string),
            Self::ArrayNumber => all_items(value, Value::is_number),
            Self::ArrayObject | Self::ArrayFile => all_items(value, Value::is_object),
            Self::ArrayBoolean => all_items(value, Value::is_boolean),
        }
    }
}

fn infer_array(items: &[Value]) -> SegmentType {
    let Some(first) = items.first() else {
        return SegmentType::ArrayAny;
    };

    let element = SegmentType::infer(first);

    if items.iter().any(|item| SegmentType::infer(item) != element) {
        return SegmentType::ArrayAny;
    }

    match element {
        SegmentType::String => SegmentType::ArrayString,
        SegmentType::Number => SegmentType::ArrayNumber,
        SegmentType::Object => SegmentType::ArrayObject,
        SegmentType::Boolean => SegmentType::ArrayBoolean,
        _ => SegmentType::ArrayAny,
    }
}

fn all_items(value: &Value, predicate: fn(&Value) -> bool) -> bool {
    value
        .as_array()
        .is_some_and(|items| items.iter().all(predicate))
}

impl fmt::Display for SegmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SegmentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(Value::String(s.to_string()))
            .map_err(|_| DomainError::validation(format!("unknown value_type '{}'", s)))
    }
}

/// A value together with its declared type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    value_type: SegmentType,
    value: Value,
}

impl Segment {
    /// Build a segment whose type is inferred from the value itself
    pub fn infer(value: Value) -> Self {
        Self {
            value_type: SegmentType::infer(&value),
            value,
        }
    }

    /// Build a segment for a declared type, rejecting mismatched payloads
    pub fn build(value_type: SegmentType, value: Value) -> Result<Self, DomainError> {
        if !value_type.accepts(&value) {
            return Err(DomainError::validation(format!(
                "value of type '{}' is not compatible with declared type '{}'",
                SegmentType::infer(&value),
                value_type
            )));
        }

        Ok(Self { value_type, value })
    }

    pub fn value_type(&self) -> SegmentType {
        self.value_type
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }
}
