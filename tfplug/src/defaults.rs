//! Default value providers for attributes
//!
//! Defaults are applied during planning to optional+computed attributes that
//! are null in configuration. An explicit value in configuration, zero
//! values included, always wins.
//!
//! ```ignore
//! use tfplug::defaults::StaticDefault;
//! use tfplug::schema::{AttributeBuilder, AttributeType};
//!
//! let role = AttributeBuilder::new("role", AttributeType::String)
//!     .optional()
//!     .computed()
//!     .default(StaticDefault::string("USER"))
//!     .build();
//! ```

use crate::schema::{Default, DefaultRequest, DefaultResponse};
use crate::types::{Dynamic, DynamicValue};
use std::sync::Arc;

/// StaticDefault provides a static default value
pub struct StaticDefault {
    value: Dynamic,
}

impl StaticDefault {
    pub fn create(value: Dynamic) -> Arc<dyn Default> {
        Arc::new(Self { value })
    }

    pub fn string(value: &str) -> Arc<dyn Default> {
        Self::create(Dynamic::String(value.to_string()))
    }

    pub fn number(value: f64) -> Arc<dyn Default> {
        Self::create(Dynamic::Number(value))
    }

    pub fn int64(value: i64) -> Arc<dyn Default> {
        Self::create(Dynamic::Number(value as f64))
    }

    pub fn bool(value: bool) -> Arc<dyn Default> {
        Self::create(Dynamic::Bool(value))
    }

    pub fn list(values: Vec<Dynamic>) -> Arc<dyn Default> {
        Self::create(Dynamic::List(values))
    }
}

impl Default for StaticDefault {
    fn description(&self) -> String {
        format!("static default value: {:?}", self.value)
    }

    fn default_value(&self, _request: DefaultRequest) -> DefaultResponse {
        DefaultResponse {
            value: DynamicValue::new(self.value.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AttributePath;

    fn request(name: &str) -> DefaultRequest {
        DefaultRequest {
            path: AttributePath::new(name),
        }
    }

    #[test]
    fn static_string_default() {
        let default = StaticDefault::string("USER");
        let response = default.default_value(request("role"));
        assert_eq!(response.value.value, Dynamic::String("USER".to_string()));
    }

    #[test]
    fn static_zero_defaults_are_not_null() {
        let response = StaticDefault::int64(0).default_value(request("dscp"));
        assert_eq!(response.value.value, Dynamic::Number(0.0));

        let response = StaticDefault::bool(false).default_value(request("use_dscp"));
        assert_eq!(response.value.value, Dynamic::Bool(false));

        let response = StaticDefault::string("").default_value(request("comment"));
        assert_eq!(response.value.value, Dynamic::String(String::new()));
    }

    #[test]
    fn static_list_default() {
        let default = StaticDefault::list(vec![Dynamic::String("a".to_string())]);
        let response = default.default_value(request("licenses"));
        assert_eq!(
            response.value.value,
            Dynamic::List(vec![Dynamic::String("a".to_string())])
        );
        assert!(default.description().starts_with("static default value"));
    }
}
