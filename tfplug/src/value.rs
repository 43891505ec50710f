//! Typed tri-state values
//!
//! `Value<T>` is the typed view of a single attribute: null, unknown, or a
//! known `T`. A known zero value (`0`, `""`, `false`) is never null.
//! `StateType` converts between these typed values and the untyped
//! `Dynamic` tree Terraform hands the provider.

use crate::attribute_type::AttributeType;
use crate::types::{AttributePath, Diagnostics, Dynamic};
use std::collections::HashMap;
use std::fmt;
use std::net::{AddrParseError, Ipv4Addr};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value<T> {
    Known(T),
    Null,
    Unknown,
}

/// List attribute whose elements may themselves be null or unknown
pub type ListValue<T> = Value<Vec<Value<T>>>;

impl<T> Default for Value<T> {
    fn default() -> Self {
        Value::Null
    }
}

impl<T> Value<T> {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Value::Unknown)
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Value::Known(_))
    }

    pub fn as_known(&self) -> Option<&T> {
        match self {
            Value::Known(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_known_mut(&mut self) -> Option<&mut T> {
        match self {
            Value::Known(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_known(self) -> Option<T> {
        match self {
            Value::Known(v) => Some(v),
            _ => None,
        }
    }

    /// Absent wire values are null, present ones are known
    pub fn from_wire(wire: Option<T>) -> Self {
        match wire {
            Some(v) => Value::Known(v),
            None => Value::Null,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Value<U> {
        match self {
            Value::Known(v) => Value::Known(f(v)),
            Value::Null => Value::Null,
            Value::Unknown => Value::Unknown,
        }
    }
}

impl<T: Clone> Value<T> {
    /// Null and unknown send nothing upstream
    pub fn to_wire(&self) -> Option<T> {
        self.as_known().cloned()
    }
}

impl<T> From<T> for Value<T> {
    fn from(v: T) -> Self {
        Value::Known(v)
    }
}

/// A Rust type with a fixed Terraform type
pub trait StateType: Sized {
    fn attr_type() -> AttributeType;

    /// Decode a known `Dynamic`. Type mismatches are reported against `path`
    /// and yield `None`.
    fn from_dynamic(value: &Dynamic, path: &AttributePath, diags: &mut Diagnostics)
        -> Option<Self>;

    fn to_dynamic(&self) -> Dynamic;
}

pub fn conversion_error(
    diags: &mut Diagnostics,
    path: &AttributePath,
    expected: &str,
    value: &Dynamic,
) {
    diags.add_attribute_error(
        path,
        "Value Conversion Error",
        format!(
            "Expected {} value at {}, got {}",
            expected,
            path,
            value.type_name()
        ),
    );
}

impl StateType for String {
    fn attr_type() -> AttributeType {
        AttributeType::String
    }

    fn from_dynamic(value: &Dynamic, path: &AttributePath, diags: &mut Diagnostics) -> Option<Self> {
        match value {
            Dynamic::String(s) => Some(s.clone()),
            other => {
                conversion_error(diags, path, "string", other);
                None
            }
        }
    }

    fn to_dynamic(&self) -> Dynamic {
        Dynamic::String(self.clone())
    }
}

impl StateType for bool {
    fn attr_type() -> AttributeType {
        AttributeType::Bool
    }

    fn from_dynamic(value: &Dynamic, path: &AttributePath, diags: &mut Diagnostics) -> Option<Self> {
        match value {
            Dynamic::Bool(b) => Some(*b),
            other => {
                conversion_error(diags, path, "bool", other);
                None
            }
        }
    }

    fn to_dynamic(&self) -> Dynamic {
        Dynamic::Bool(*self)
    }
}

impl StateType for i64 {
    fn attr_type() -> AttributeType {
        AttributeType::Number
    }

    fn from_dynamic(value: &Dynamic, path: &AttributePath, diags: &mut Diagnostics) -> Option<Self> {
        match value {
            Dynamic::Number(n)
                if n.fract() == 0.0 && *n >= i64::MIN as f64 && *n <= i64::MAX as f64 =>
            {
                Some(*n as i64)
            }
            other => {
                conversion_error(diags, path, "integer", other);
                None
            }
        }
    }

    fn to_dynamic(&self) -> Dynamic {
        Dynamic::Number(*self as f64)
    }
}

/// IPv4 address kept in its textual form
///
/// Decoding never rejects a malformed address; the `Ipv4Address` validator
/// does that during validation so the error lands on the right attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Ipv4Address(String);

impl Ipv4Address {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn parse(&self) -> Result<Ipv4Addr, AddrParseError> {
        self.0.parse()
    }
}

impl fmt::Display for Ipv4Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Ipv4Address {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl StateType for Ipv4Address {
    fn attr_type() -> AttributeType {
        AttributeType::String
    }

    fn from_dynamic(value: &Dynamic, path: &AttributePath, diags: &mut Diagnostics) -> Option<Self> {
        String::from_dynamic(value, path, diags).map(Ipv4Address)
    }

    fn to_dynamic(&self) -> Dynamic {
        Dynamic::String(self.0.clone())
    }
}

impl<T: StateType> StateType for Value<T> {
    fn attr_type() -> AttributeType {
        T::attr_type()
    }

    fn from_dynamic(value: &Dynamic, path: &AttributePath, diags: &mut Diagnostics) -> Option<Self> {
        match value {
            Dynamic::Null => Some(Value::Null),
            Dynamic::Unknown => Some(Value::Unknown),
            known => T::from_dynamic(known, path, diags).map(Value::Known),
        }
    }

    fn to_dynamic(&self) -> Dynamic {
        match self {
            Value::Known(v) => v.to_dynamic(),
            Value::Null => Dynamic::Null,
            Value::Unknown => Dynamic::Unknown,
        }
    }
}

impl<T: StateType> StateType for Vec<T> {
    fn attr_type() -> AttributeType {
        AttributeType::list(T::attr_type())
    }

    fn from_dynamic(value: &Dynamic, path: &AttributePath, diags: &mut Diagnostics) -> Option<Self> {
        let Dynamic::List(items) = value else {
            conversion_error(diags, path, "list", value);
            return None;
        };

        // Every element is decoded so all mismatches get reported
        let mut out = Vec::with_capacity(items.len());
        let mut failed = false;
        for (i, item) in items.iter().enumerate() {
            match T::from_dynamic(item, &path.clone().index(i as i64), diags) {
                Some(v) => out.push(v),
                None => failed = true,
            }
        }
        (!failed).then_some(out)
    }

    fn to_dynamic(&self) -> Dynamic {
        Dynamic::List(self.iter().map(StateType::to_dynamic).collect())
    }
}

impl<T: StateType> StateType for HashMap<String, T> {
    fn attr_type() -> AttributeType {
        AttributeType::map(T::attr_type())
    }

    fn from_dynamic(value: &Dynamic, path: &AttributePath, diags: &mut Diagnostics) -> Option<Self> {
        let Dynamic::Map(items) = value else {
            conversion_error(diags, path, "map", value);
            return None;
        };

        let mut out = HashMap::with_capacity(items.len());
        let mut failed = false;
        for (k, item) in items {
            match T::from_dynamic(item, &path.clone().key(k), diags) {
                Some(v) => {
                    out.insert(k.clone(), v);
                }
                None => failed = true,
            }
        }
        (!failed).then_some(out)
    }

    fn to_dynamic(&self) -> Dynamic {
        Dynamic::Map(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_dynamic()))
                .collect(),
        )
    }
}
