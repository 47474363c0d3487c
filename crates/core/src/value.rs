//! Dynamic value model for codecforge
//!
//! This module defines the canonical [`Value`] type that decoded instances
//! are built from and that captured unknown fields are stored as. There is
//! exactly one value model; every codec reads into it and writes out of it.
//!
//! ## Equality Rules
//!
//! - Different variants are NEVER equal (no type coercion)
//! - `Int(1)` != `Float(1.0)`
//! - `Float` uses IEEE-754 equality: `NaN != NaN`, `-0.0 == 0.0`
//! - `Map` entries compare in order (entry order is part of the value)

use serde::{Deserialize, Serialize};

/// Canonical dynamic value.
///
/// Decoded instances of schema types are `Value::Record`s whose fields sit in
/// property declaration order. Unknown fields captured by a sink property are
/// stored as a `Value::Map` with insertion-ordered entries so that re-encoding
/// reproduces the original field order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    /// JSON null / absence of value
    Null,

    /// Boolean true or false
    Bool(bool),

    /// 64-bit signed integer
    Int(i64),

    /// 64-bit IEEE-754 floating point
    Float(f64),

    /// Single character, encoded on the wire as a one-character string
    Char(char),

    /// UTF-8 encoded string
    String(String),

    /// Ordered sequence of values
    List(Vec<Value>),

    /// Ordered sequence of distinct values (first occurrence wins on decode)
    Set(Vec<Value>),

    /// String-keyed entries in insertion order
    Map(Vec<(String, Value)>),

    /// An instance of a schema type, fields in declaration order
    Record(RecordValue),
}

/// A decoded instance of a schema type.
///
/// `fields` is positional: index `i` holds the value of the `i`-th declared
/// property of the type named `type_name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordValue {
    /// Name of the schema type this instance belongs to.
    pub type_name: String,
    /// Property values in declaration order.
    pub fields: Vec<Value>,
}

impl RecordValue {
    /// Create a record value for the given type with positional fields.
    pub fn new(type_name: impl Into<String>, fields: Vec<Value>) -> Self {
        RecordValue {
            type_name: type_name.into(),
            fields,
        }
    }

    /// Returns the field at `index`, if present.
    pub fn field(&self, index: usize) -> Option<&Value> {
        self.fields.get(index)
    }
}

impl Value {
    /// Convenience constructor for a record value.
    pub fn record(type_name: impl Into<String>, fields: Vec<Value>) -> Self {
        Value::Record(RecordValue::new(type_name, fields))
    }

    /// Returns the variant name as a string (for error messages).
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::Char(_) => "Char",
            Value::String(_) => "String",
            Value::List(_) => "List",
            Value::Set(_) => "Set",
            Value::Map(_) => "Map",
            Value::Record(_) => "Record",
        }
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Try to get as bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as i64.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as f64.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Try to get as string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as list slice.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Try to get as map entries.
    pub fn as_map(&self) -> Option<&[(String, Value)]> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Try to get as record reference.
    pub fn as_record(&self) -> Option<&RecordValue> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Look up a map entry by key (linear scan, entries are few).
    pub fn map_get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            // IEEE-754 equality: NaN != NaN, -0.0 == 0.0
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => a == b,

            // Different variants: NEVER equal (no type coercion)
            _ => false,
        }
    }
}
