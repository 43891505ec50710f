use crate::types::{AttributePath, Diagnostics, Dynamic};
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::Arc;

/// What a validator sees: the configured value, where it sits, and the
/// other attributes of the object that holds it
pub struct ValidatorRequest<'a> {
    pub value: &'a Dynamic,
    pub path: &'a AttributePath,
    pub siblings: &'a HashMap<String, Dynamic>,
}

/// Validators run on configuration before anything is expanded. The schema
/// only calls them for known values.
pub trait Validator: Send + Sync {
    fn description(&self) -> String;
    fn validate(&self, request: &ValidatorRequest<'_>, diagnostics: &mut Diagnostics);
}

pub struct StringLengthValidator {
    pub min: Option<usize>,
    pub max: Option<usize>,
}

impl StringLengthValidator {
    pub fn between(min: usize, max: usize) -> Arc<dyn Validator> {
        Arc::new(Self {
            min: Some(min),
            max: Some(max),
        })
    }
}

impl Validator for StringLengthValidator {
    fn description(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!("string length must be between {} and {}", min, max),
            (Some(min), None) => format!("string length must be at least {}", min),
            (None, Some(max)) => format!("string length must be at most {}", max),
            (None, None) => "any string length".to_string(),
        }
    }

    fn validate(&self, request: &ValidatorRequest<'_>, diagnostics: &mut Diagnostics) {
        let Some(s) = request.value.as_string() else {
            return;
        };
        let len = s.chars().count();
        if let Some(min) = self.min {
            if len < min {
                diagnostics.add_attribute_error(
                    request.path,
                    format!("{} must have minimum length of {}", request.path, min),
                    format!("Got length {}", len),
                );
            }
        }
        if let Some(max) = self.max {
            if len > max {
                diagnostics.add_attribute_error(
                    request.path,
                    format!("{} must have maximum length of {}", request.path, max),
                    format!("Got length {}", len),
                );
            }
        }
    }
}

pub struct OneOfValidator {
    pub values: Vec<String>,
}

impl OneOfValidator {
    pub fn create(values: &[&str]) -> Arc<dyn Validator> {
        Arc::new(Self {
            values: values.iter().map(|v| v.to_string()).collect(),
        })
    }
}

impl Validator for OneOfValidator {
    fn description(&self) -> String {
        format!("value must be one of: {}", self.values.join(", "))
    }

    fn validate(&self, request: &ValidatorRequest<'_>, diagnostics: &mut Diagnostics) {
        let Some(s) = request.value.as_string() else {
            return;
        };
        if !self.values.iter().any(|v| v == s) {
            diagnostics.add_attribute_error(
                request.path,
                "Invalid Attribute Value Match",
                format!(
                    "Attribute {} value must be one of: {:?}, got: {:?}",
                    request.path, self.values, s
                ),
            );
        }
    }
}

/// Rejects strings with leading or trailing whitespace
pub struct TrimmedStringValidator;

impl TrimmedStringValidator {
    pub fn create() -> Arc<dyn Validator> {
        Arc::new(Self)
    }
}

impl Validator for TrimmedStringValidator {
    fn description(&self) -> String {
        "value must not have leading or trailing whitespace".to_string()
    }

    fn validate(&self, request: &ValidatorRequest<'_>, diagnostics: &mut Diagnostics) {
        let Some(s) = request.value.as_string() else {
            return;
        };
        if s.trim() != s {
            diagnostics.add_attribute_error(
                request.path,
                "Invalid Attribute Value",
                format!(
                    "Attribute {} should not have leading or trailing whitespace, got: {:?}",
                    request.path, s
                ),
            );
        }
    }
}

pub struct NumberRangeValidator {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumberRangeValidator {
    pub fn between(min: f64, max: f64) -> Arc<dyn Validator> {
        Arc::new(Self {
            min: Some(min),
            max: Some(max),
        })
    }
}

impl Validator for NumberRangeValidator {
    fn description(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!("value must be between {} and {}", min, max),
            (Some(min), None) => format!("value must be at least {}", min),
            (None, Some(max)) => format!("value must be at most {}", max),
            (None, None) => "any number".to_string(),
        }
    }

    fn validate(&self, request: &ValidatorRequest<'_>, diagnostics: &mut Diagnostics) {
        let Some(n) = request.value.as_number() else {
            return;
        };
        if let Some(min) = self.min {
            if n < min {
                diagnostics.add_attribute_error(
                    request.path,
                    format!("{} must be at least {}", request.path, min),
                    format!("Got {}", n),
                );
            }
        }
        if let Some(max) = self.max {
            if n > max {
                diagnostics.add_attribute_error(
                    request.path,
                    format!("{} must be at most {}", request.path, max),
                    format!("Got {}", n),
                );
            }
        }
    }
}

pub struct Ipv4AddressValidator;

impl Ipv4AddressValidator {
    pub fn create() -> Arc<dyn Validator> {
        Arc::new(Self)
    }
}

impl Validator for Ipv4AddressValidator {
    fn description(&self) -> String {
        "value must be an IPv4 address".to_string()
    }

    fn validate(&self, request: &ValidatorRequest<'_>, diagnostics: &mut Diagnostics) {
        let Some(s) = request.value.as_string() else {
            return;
        };
        if let Err(e) = s.parse::<Ipv4Addr>() {
            diagnostics.add_attribute_error(
                request.path,
                "Invalid IPv4 Address String Value",
                format!("A string value was provided that is not valid IPv4 format: {:?} ({})", s, e),
            );
        }
    }
}

/// The named sibling attributes must be set whenever this one is
pub struct AlsoRequiresValidator {
    pub attributes: Vec<String>,
}

impl AlsoRequiresValidator {
    pub fn create(attributes: &[&str]) -> Arc<dyn Validator> {
        Arc::new(Self {
            attributes: attributes.iter().map(|a| a.to_string()).collect(),
        })
    }
}

impl Validator for AlsoRequiresValidator {
    fn description(&self) -> String {
        format!("also requires: {}", self.attributes.join(", "))
    }

    fn validate(&self, request: &ValidatorRequest<'_>, diagnostics: &mut Diagnostics) {
        if request.value.is_null() {
            return;
        }
        for name in &self.attributes {
            let missing = request.siblings.get(name).is_none_or(Dynamic::is_null);
            if missing {
                diagnostics.add_attribute_error(
                    request.path,
                    "Invalid Attribute Combination",
                    format!(
                        "Attribute {:?} must be specified when {:?} is specified",
                        name,
                        request.path.last_attribute().unwrap_or_default()
                    ),
                );
            }
        }
    }
}

pub struct ListLengthValidator {
    pub min: Option<usize>,
    pub max: Option<usize>,
}

impl ListLengthValidator {
    pub fn at_least(min: usize) -> Arc<dyn Validator> {
        Arc::new(Self {
            min: Some(min),
            max: None,
        })
    }
}

impl Validator for ListLengthValidator {
    fn description(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!("list must have between {} and {} items", min, max),
            (Some(min), None) => format!("list must have at least {} items", min),
            (None, Some(max)) => format!("list must have at most {} items", max),
            (None, None) => "any list length".to_string(),
        }
    }

    fn validate(&self, request: &ValidatorRequest<'_>, diagnostics: &mut Diagnostics) {
        let Dynamic::List(items) = request.value else {
            return;
        };
        if let Some(min) = self.min {
            if items.len() < min {
                diagnostics.add_attribute_error(
                    request.path,
                    format!("{} must have at least {} items", request.path, min),
                    format!("Got {} items", items.len()),
                );
            }
        }
        if let Some(max) = self.max {
            if items.len() > max {
                diagnostics.add_attribute_error(
                    request.path,
                    format!("{} must have at most {} items", request.path, max),
                    format!("Got {} items", items.len()),
                );
            }
        }
    }
}
