//! Schema types and builders for tfplug
//!
//! A schema is the attribute list of a resource, each attribute carrying its
//! type, required/optional/computed flags, validators, plan modifiers and an
//! optional default. Nested objects are attributes with a [`NestedType`].
//! The schema also drives config validation and plan computation.

use crate::plan_modifier::{values_equal, PlanModifier, PlanModifyRequest};
use crate::types::{AttributePath, Diagnostics, Dynamic, DynamicValue};
use crate::validator::{Validator, ValidatorRequest};
use std::collections::HashMap;
use std::sync::Arc;

pub use crate::attribute_type::{AttrTypes, AttributeType};

static NULL: Dynamic = Dynamic::Null;

/// Schema is returned by resources
/// Version is used for state migration
#[derive(Debug, Clone)]
pub struct Schema {
    pub version: i64,
    pub block: Block,
}

/// Block represents the root configuration block
#[derive(Debug, Clone)]
pub struct Block {
    pub version: i64,
    pub attributes: Vec<Attribute>,
    pub description: String,
    pub description_kind: StringKind,
    pub deprecated: bool,
}

/// Attribute represents a single configuration attribute
#[derive(Clone)]
pub struct Attribute {
    pub name: String,
    pub r#type: AttributeType,
    pub description: String,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    pub sensitive: bool,
    pub validators: Vec<Arc<dyn Validator>>,
    pub plan_modifiers: Vec<Arc<dyn PlanModifier>>,
    pub default: Option<Arc<dyn Default>>,
    pub nested_type: Option<NestedType>,
    pub deprecated: bool,
}

// Manual Debug implementation since validators/modifiers don't implement Debug
impl std::fmt::Debug for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attribute")
            .field("name", &self.name)
            .field("type", &self.r#type)
            .field("description", &self.description)
            .field("required", &self.required)
            .field("optional", &self.optional)
            .field("computed", &self.computed)
            .field("sensitive", &self.sensitive)
            .field(
                "validators",
                &format!("{} validators", self.validators.len()),
            )
            .field(
                "plan_modifiers",
                &format!("{} plan modifiers", self.plan_modifiers.len()),
            )
            .field("default", &self.default.is_some())
            .field("nested_type", &self.nested_type)
            .field("deprecated", &self.deprecated)
            .finish()
    }
}

/// NestedType for attributes with nested structures
#[derive(Debug, Clone)]
pub struct NestedType {
    pub attributes: Vec<Attribute>,
    pub nesting: ObjectNestingMode,
}

impl NestedType {
    pub fn single(attributes: Vec<Attribute>) -> Self {
        Self {
            attributes,
            nesting: ObjectNestingMode::Single,
        }
    }

    pub fn list(attributes: Vec<Attribute>) -> Self {
        Self {
            attributes,
            nesting: ObjectNestingMode::List,
        }
    }

    pub fn attr_type(&self) -> AttributeType {
        let object = AttributeType::Object(attr_types(&self.attributes));
        match self.nesting {
            ObjectNestingMode::Single => object,
            ObjectNestingMode::List => AttributeType::list(object),
        }
    }
}

/// ObjectNestingMode for nested attribute objects
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObjectNestingMode {
    Single,
    List,
}

/// StringKind represents the format of string values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StringKind {
    Plain,
    Markdown,
}

/// Default provides default values for optional attributes
/// Called when the attribute is null in configuration
pub trait Default: Send + Sync {
    fn description(&self) -> String;
    fn default_value(&self, request: DefaultRequest) -> DefaultResponse;
}

/// Request for default values
pub struct DefaultRequest {
    pub path: AttributePath,
}

/// Response with default value
pub struct DefaultResponse {
    pub value: DynamicValue,
}

/// Result of planning one resource change
#[derive(Debug, Clone)]
pub struct PlannedChange {
    pub planned_state: DynamicValue,
    pub diagnostics: Diagnostics,
}

/// How null computed attributes are filled while planning
#[derive(Debug, Clone, Copy, PartialEq)]
enum ComputedFill {
    /// Carry the prior value forward
    Prior,
    /// Mark the value unknown, the resource is changing
    Unknown,
}

fn attr_types(attributes: &[Attribute]) -> AttrTypes {
    attributes
        .iter()
        .map(|a| (a.name.clone(), a.r#type.clone()))
        .collect()
}

impl Schema {
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.block.attributes.iter().find(|a| a.name == name)
    }

    /// Object type of the whole resource
    pub fn attr_type(&self) -> AttributeType {
        AttributeType::Object(attr_types(&self.block.attributes))
    }

    /// Check a configuration against the schema. All problems are collected.
    pub fn validate(&self, config: &DynamicValue) -> Diagnostics {
        let mut diags = Diagnostics::new();
        match &config.value {
            Dynamic::Map(values) => validate_attributes(
                &self.block.attributes,
                values,
                &AttributePath::root(),
                &mut diags,
            ),
            Dynamic::Null | Dynamic::Unknown => {}
            other => diags.add_error(
                "Invalid configuration",
                Some(format!("Expected an object, got {}", other.type_name())),
            ),
        }
        diags
    }

    /// Compute the planned state from configuration and prior state.
    ///
    /// Defaults fill null computed attributes. The other null computed
    /// attributes keep their prior value when nothing else differs from the
    /// prior state, and become unknown when the resource is created or
    /// changed. Plan modifiers run last.
    pub fn plan_resource_change(&self, config: &DynamicValue, prior: &DynamicValue) -> PlannedChange {
        let mut change = PlannedChange {
            planned_state: DynamicValue::null(),
            diagnostics: Diagnostics::new(),
        };

        let Dynamic::Map(values) = &config.value else {
            // Destroy plans keep the null config
            change.planned_state = config.clone();
            return change;
        };

        let prior_values = prior.value.as_map();
        let changed = match prior_values {
            None => true,
            Some(prior_values) => {
                let proposed = propose_attributes(&self.block.attributes, values, Some(prior_values));
                !values_equal(&Dynamic::Map(proposed), &prior.value)
            }
        };
        tracing::trace!(changed, "planning resource change");

        let fill = if changed {
            ComputedFill::Unknown
        } else {
            ComputedFill::Prior
        };
        let planned = plan_attributes(
            &self.block.attributes,
            values,
            prior_values,
            &AttributePath::root(),
            fill,
            &mut change,
        );
        change.planned_state = DynamicValue::new(Dynamic::Map(planned));
        change
    }
}

fn validate_attributes(
    attributes: &[Attribute],
    values: &HashMap<String, Dynamic>,
    path: &AttributePath,
    diags: &mut Diagnostics,
) {
    for attr in attributes {
        let value = values.get(&attr.name).unwrap_or(&NULL);
        let attr_path = path.clone().attribute(&attr.name);

        if attr.required && value.is_null() {
            diags.add_attribute_error(
                &attr_path,
                "Missing required argument",
                format!("The argument \"{}\" is required, but no definition was found.", attr_path),
            );
            continue;
        }

        if attr.computed && !attr.optional && !attr.required && !value.is_null() {
            diags.add_attribute_error(
                &attr_path,
                "Invalid Configuration for Read-Only Attribute",
                format!("Cannot set value for attribute {}, it is computed only", attr_path),
            );
            continue;
        }

        if !attr.r#type.accepts(value) {
            diags.add_attribute_error(
                &attr_path,
                "Incorrect attribute value type",
                format!(
                    "Inappropriate value for attribute {}: {} required, got {}",
                    attr_path,
                    attr.r#type.type_name(),
                    value.type_name()
                ),
            );
            continue;
        }

        if !value.is_known() {
            continue;
        }

        if attr.deprecated {
            diags.add_attribute_warning(
                &attr_path,
                "Attribute Deprecated",
                format!("{} is deprecated", attr_path),
            );
        }

        let request = ValidatorRequest {
            value,
            path: &attr_path,
            siblings: values,
        };
        for validator in &attr.validators {
            validator.validate(&request, diags);
        }

        let Some(nested) = &attr.nested_type else {
            continue;
        };
        match (nested.nesting, value) {
            (ObjectNestingMode::Single, Dynamic::Map(inner)) => {
                validate_attributes(&nested.attributes, inner, &attr_path, diags)
            }
            (ObjectNestingMode::List, Dynamic::List(items)) => {
                for (i, item) in items.iter().enumerate() {
                    if let Dynamic::Map(inner) = item {
                        let item_path = attr_path.clone().index(i as i64);
                        validate_attributes(&nested.attributes, inner, &item_path, diags);
                    }
                }
            }
            _ => {}
        }
    }
}

/// The new state Terraform proposes before defaults and modifiers: config
/// values, with null computed attributes taken from the prior state.
fn propose_attributes(
    attributes: &[Attribute],
    config: &HashMap<String, Dynamic>,
    prior: Option<&HashMap<String, Dynamic>>,
) -> HashMap<String, Dynamic> {
    attributes
        .iter()
        .map(|attr| {
            let config_value = config.get(&attr.name).unwrap_or(&NULL);
            let prior_value = prior.and_then(|p| p.get(&attr.name)).unwrap_or(&NULL);

            let mut value = match (&attr.nested_type, config_value) {
                (Some(nested), Dynamic::Map(inner)) if nested.nesting == ObjectNestingMode::Single => {
                    Dynamic::Map(propose_attributes(&nested.attributes, inner, prior_value.as_map()))
                }
                (Some(nested), Dynamic::List(items)) if nested.nesting == ObjectNestingMode::List => {
                    let prior_items = prior_value.as_list().unwrap_or_default();
                    Dynamic::List(
                        items
                            .iter()
                            .enumerate()
                            .map(|(i, item)| match item {
                                Dynamic::Map(inner) => Dynamic::Map(propose_attributes(
                                    &nested.attributes,
                                    inner,
                                    prior_items.get(i).and_then(Dynamic::as_map),
                                )),
                                other => other.clone(),
                            })
                            .collect(),
                    )
                }
                _ => config_value.clone(),
            };

            if value.is_null() && attr.computed {
                value = match &attr.default {
                    Some(default) => default_value(default.as_ref(), AttributePath::new(&attr.name)),
                    None => prior_value.clone(),
                };
            }
            (attr.name.clone(), value)
        })
        .collect()
}

fn default_value(default: &dyn Default, path: AttributePath) -> Dynamic {
    default.default_value(DefaultRequest { path }).value.value
}

fn plan_attributes(
    attributes: &[Attribute],
    config: &HashMap<String, Dynamic>,
    prior: Option<&HashMap<String, Dynamic>>,
    path: &AttributePath,
    fill: ComputedFill,
    change: &mut PlannedChange,
) -> HashMap<String, Dynamic> {
    let mut planned = HashMap::with_capacity(attributes.len());

    for attr in attributes {
        let config_value = config.get(&attr.name).unwrap_or(&NULL);
        let prior_value = prior.and_then(|p| p.get(&attr.name)).unwrap_or(&NULL);
        let attr_path = path.clone().attribute(&attr.name);

        let mut value = match (&attr.nested_type, config_value) {
            (Some(nested), Dynamic::Map(inner)) if nested.nesting == ObjectNestingMode::Single => {
                Dynamic::Map(plan_attributes(
                    &nested.attributes,
                    inner,
                    prior_value.as_map(),
                    &attr_path,
                    fill,
                    change,
                ))
            }
            (Some(nested), Dynamic::List(items)) if nested.nesting == ObjectNestingMode::List => {
                let prior_items = prior_value.as_list().unwrap_or_default();
                Dynamic::List(
                    items
                        .iter()
                        .enumerate()
                        .map(|(i, item)| match item {
                            Dynamic::Map(inner) => Dynamic::Map(plan_attributes(
                                &nested.attributes,
                                inner,
                                prior_items.get(i).and_then(Dynamic::as_map),
                                &attr_path.clone().index(i as i64),
                                fill,
                                change,
                            )),
                            other => other.clone(),
                        })
                        .collect(),
                )
            }
            _ => config_value.clone(),
        };

        if value.is_null() && attr.computed {
            value = match (&attr.default, fill) {
                (Some(default), _) => default_value(default.as_ref(), attr_path.clone()),
                (None, ComputedFill::Prior) => prior_value.clone(),
                (None, ComputedFill::Unknown) => Dynamic::Unknown,
            };
        }

        for modifier in &attr.plan_modifiers {
            let response = modifier.modify_plan(PlanModifyRequest {
                state: prior_value.clone(),
                plan: value,
                config: config_value.clone(),
                attribute_path: attr_path.clone(),
            });
            value = response.plan_value;
            change.diagnostics.append(response.diagnostics);
        }

        planned.insert(attr.name.clone(), value);
    }

    planned
}

/// AttributeBuilder provides fluent API for building attributes
/// ALWAYS use this instead of constructing Attribute directly
pub struct AttributeBuilder {
    attribute: Attribute,
}

impl AttributeBuilder {
    pub fn new(name: &str, type_: AttributeType) -> Self {
        Self {
            attribute: Attribute {
                name: name.to_string(),
                r#type: type_,
                description: String::new(),
                required: false,
                optional: false,
                computed: false,
                sensitive: false,
                validators: Vec::new(),
                plan_modifiers: Vec::new(),
                default: None,
                nested_type: None,
                deprecated: false,
            },
        }
    }

    /// Attribute holding a nested object or list of objects. The type is
    /// derived from the nested attributes.
    pub fn nested(name: &str, nested: NestedType) -> Self {
        let mut builder = Self::new(name, nested.attr_type());
        builder.attribute.nested_type = Some(nested);
        builder
    }

    pub fn description(mut self, desc: &str) -> Self {
        self.attribute.description = desc.to_string();
        self
    }

    pub fn required(mut self) -> Self {
        self.attribute.required = true;
        self.attribute.optional = false;
        self
    }

    pub fn optional(mut self) -> Self {
        self.attribute.optional = true;
        self.attribute.required = false;
        self
    }

    pub fn computed(mut self) -> Self {
        self.attribute.computed = true;
        self
    }

    /// Mark as sensitive (hidden)
    pub fn sensitive(mut self) -> Self {
        self.attribute.sensitive = true;
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.attribute.deprecated = true;
        self
    }

    pub fn validator(mut self, validator: Arc<dyn Validator>) -> Self {
        self.attribute.validators.push(validator);
        self
    }

    pub fn plan_modifier(mut self, modifier: Arc<dyn PlanModifier>) -> Self {
        self.attribute.plan_modifiers.push(modifier);
        self
    }

    pub fn default(mut self, default: Arc<dyn Default>) -> Self {
        self.attribute.default = Some(default);
        self
    }

    pub fn build(self) -> Attribute {
        self.attribute
    }
}

/// SchemaBuilder provides fluent API for building schemas
/// ALWAYS use this for consistency
pub struct SchemaBuilder {
    schema: Schema,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self {
            schema: Schema {
                version: 0,
                block: Block {
                    version: 0,
                    attributes: Vec::new(),
                    description: String::new(),
                    description_kind: StringKind::Plain,
                    deprecated: false,
                },
            },
        }
    }

    /// Set schema version
    pub fn version(mut self, version: i64) -> Self {
        self.schema.version = version;
        self.schema.block.version = version;
        self
    }

    pub fn attribute(mut self, attr: Attribute) -> Self {
        self.schema.block.attributes.push(attr);
        self
    }

    pub fn attributes(mut self, attrs: impl IntoIterator<Item = Attribute>) -> Self {
        self.schema.block.attributes.extend(attrs);
        self
    }

    pub fn description(mut self, desc: &str) -> Self {
        self.schema.block.description = desc.to_string();
        self
    }

    pub fn description_kind(mut self, kind: StringKind) -> Self {
        self.schema.block.description_kind = kind;
        self
    }

    pub fn build(self) -> Schema {
        self.schema
    }
}

impl std::default::Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}
