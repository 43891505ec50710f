use crate::types::{AttributePath, AttributePathStep, Dynamic};
use std::collections::HashMap;

/// Static shape of an object: attribute name to type
pub type AttrTypes = HashMap<String, AttributeType>;

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeType {
    String,
    Number,
    Bool,
    List(Box<AttributeType>),
    Set(Box<AttributeType>),
    Map(Box<AttributeType>),
    Object(AttrTypes),
}

impl AttributeType {
    pub fn list(element: AttributeType) -> Self {
        AttributeType::List(Box::new(element))
    }

    pub fn map(element: AttributeType) -> Self {
        AttributeType::Map(Box::new(element))
    }

    pub fn object<I, S>(attrs: I) -> Self
    where
        I: IntoIterator<Item = (S, AttributeType)>,
        S: Into<String>,
    {
        AttributeType::Object(attrs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            AttributeType::String => "string",
            AttributeType::Number => "number",
            AttributeType::Bool => "bool",
            AttributeType::List(_) => "list",
            AttributeType::Set(_) => "set",
            AttributeType::Map(_) => "map",
            AttributeType::Object(_) => "object",
        }
    }

    /// Type found at `path` below this type, if the path fits the shape
    pub fn lookup(&self, path: &AttributePath) -> Option<&AttributeType> {
        let mut current = self;
        for step in &path.steps {
            current = match (current, step) {
                (AttributeType::Object(attrs), AttributePathStep::AttributeName(name)) => {
                    attrs.get(name)?
                }
                (AttributeType::Map(elem), AttributePathStep::ElementKeyString(_)) => elem,
                (AttributeType::List(elem), AttributePathStep::ElementKeyInt(_))
                | (AttributeType::Set(elem), AttributePathStep::ElementKeyInt(_)) => elem,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Whether a value is acceptable for this type. Null and unknown fit
    /// every type.
    pub fn accepts(&self, value: &Dynamic) -> bool {
        match (self, value) {
            (_, Dynamic::Null) | (_, Dynamic::Unknown) => true,
            (AttributeType::String, Dynamic::String(_)) => true,
            (AttributeType::Number, Dynamic::Number(_)) => true,
            (AttributeType::Bool, Dynamic::Bool(_)) => true,
            (AttributeType::List(elem), Dynamic::List(items))
            | (AttributeType::Set(elem), Dynamic::List(items)) => {
                items.iter().all(|item| elem.accepts(item))
            }
            (AttributeType::Map(elem), Dynamic::Map(items)) => {
                items.values().all(|item| elem.accepts(item))
            }
            (AttributeType::Object(attrs), Dynamic::Map(items)) => items
                .iter()
                .all(|(k, v)| attrs.get(k).is_some_and(|t| t.accepts(v))),
            _ => false,
        }
    }

    /// Fill every attribute an object value is missing with null, all the
    /// way down. Values of other shapes are returned as they are.
    pub fn conform(&self, value: &Dynamic) -> Dynamic {
        match (self, value) {
            (AttributeType::Object(attrs), Dynamic::Map(items)) => Dynamic::Map(
                attrs
                    .iter()
                    .map(|(name, ty)| {
                        let v = items.get(name).map_or(Dynamic::Null, |v| ty.conform(v));
                        (name.clone(), v)
                    })
                    .collect(),
            ),
            (AttributeType::List(elem), Dynamic::List(items))
            | (AttributeType::Set(elem), Dynamic::List(items)) => {
                Dynamic::List(items.iter().map(|v| elem.conform(v)).collect())
            }
            (AttributeType::Map(elem), Dynamic::Map(items)) => Dynamic::Map(
                items
                    .iter()
                    .map(|(k, v)| (k.clone(), elem.conform(v)))
                    .collect(),
            ),
            _ => value.clone(),
        }
    }
}
