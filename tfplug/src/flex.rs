//! Field codec between WAPI wire fields and typed state values
//!
//! `flatten_*` turns an optional wire field into state: absent is null,
//! anything present (zero values included) is known. `expand_*` goes the
//! other way: null and unknown produce nothing, so the server applies its
//! own default.

use crate::value::{Ipv4Address, ListValue, Value};

pub fn flatten_string(wire: Option<&str>) -> Value<String> {
    Value::from_wire(wire.map(str::to_string))
}

pub fn expand_string(state: &Value<String>) -> Option<String> {
    state.to_wire()
}

pub fn flatten_bool(wire: Option<bool>) -> Value<bool> {
    Value::from_wire(wire)
}

pub fn expand_bool(state: &Value<bool>) -> Option<bool> {
    state.to_wire()
}

pub fn flatten_int64(wire: Option<i64>) -> Value<i64> {
    Value::from_wire(wire)
}

pub fn expand_int64(state: &Value<i64>) -> Option<i64> {
    state.to_wire()
}

pub fn flatten_ipv4_address(wire: Option<&str>) -> Value<Ipv4Address> {
    Value::from_wire(wire.map(Ipv4Address::from))
}

pub fn expand_ipv4_address(state: &Value<Ipv4Address>) -> Option<String> {
    state.as_known().map(|a| a.as_str().to_string())
}

pub fn flatten_string_list(wire: Option<&[String]>) -> ListValue<String> {
    Value::from_wire(wire.map(|items| items.iter().cloned().map(Value::Known).collect()))
}

/// Null and unknown elements are dropped, order is kept
pub fn expand_string_list(state: &ListValue<String>) -> Option<Vec<String>> {
    state
        .as_known()
        .map(|items| items.iter().filter_map(Value::to_wire).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatten_absent_is_null() {
        assert!(flatten_string(None).is_null());
        assert!(flatten_bool(None).is_null());
        assert!(flatten_int64(None).is_null());
        assert!(flatten_ipv4_address(None).is_null());
        assert!(flatten_string_list(None).is_null());
    }

    #[test]
    fn flatten_zero_values_are_known() {
        assert_eq!(flatten_string(Some("")), Value::Known(String::new()));
        assert_eq!(flatten_bool(Some(false)), Value::Known(false));
        assert_eq!(flatten_int64(Some(0)), Value::Known(0));
        assert_eq!(flatten_string_list(Some(&[])), Value::Known(vec![]));
    }

    #[test]
    fn expand_null_and_unknown_send_nothing() {
        assert_eq!(expand_string(&Value::Null), None);
        assert_eq!(expand_string(&Value::Unknown), None);
        assert_eq!(expand_bool(&Value::Unknown), None);
        assert_eq!(expand_int64(&Value::Null), None);
        assert_eq!(expand_ipv4_address(&Value::Unknown), None);
        assert_eq!(expand_string_list(&Value::Unknown), None);
    }

    #[test]
    fn expand_known_values() {
        assert_eq!(expand_int64(&Value::Known(0)), Some(0));
        assert_eq!(expand_bool(&Value::Known(false)), Some(false));
        assert_eq!(
            expand_ipv4_address(&Value::Known(Ipv4Address::from("10.0.0.1"))),
            Some("10.0.0.1".to_string())
        );
    }

    #[test]
    fn expand_string_list_drops_unset_elements() {
        let state = Value::Known(vec![
            Value::Known("a".to_string()),
            Value::Null,
            Value::Unknown,
            Value::Known("b".to_string()),
        ]);
        assert_eq!(
            expand_string_list(&state),
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }
}
