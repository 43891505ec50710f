//! Object mapping between wire structs and state models
//!
//! Every nested WAPI object has a state model generated by [`state_model!`]
//! and an [`ObjectMapper`] impl that expands the model into its wire struct
//! and flattens a wire struct back. The helpers here lift a single mapper to
//! nullable objects, lists of objects, and raw `Dynamic` values.

use crate::attribute_type::AttrTypes;
use crate::types::{AttributePath, Diagnostics, Dynamic, DynamicValue};
use crate::value::{ListValue, StateType, Value};
use std::fmt::Debug;

/// A typed object with a fixed attribute shape
pub trait StateModel: StateType + Clone + PartialEq + Default + Debug {
    fn attr_types() -> AttrTypes;
}

/// Expand/flatten contract for one object type
///
/// Implementations map field by field through the `flex` codecs and the
/// mappers of nested objects. Anything involving more than one field
/// belongs in validators or the resource, not here.
pub trait ObjectMapper: StateModel {
    type Wire;

    fn expand(&self, diags: &mut Diagnostics) -> Option<Self::Wire>;

    fn flatten(wire: &Self::Wire, diags: &mut Diagnostics) -> Self;
}

/// Null or unknown objects expand to nothing without visiting any field
pub fn expand_object<M: ObjectMapper>(state: &Value<M>, diags: &mut Diagnostics) -> Option<M::Wire> {
    state.as_known()?.expand(diags)
}

/// An absent wire object flattens to the null object
pub fn flatten_object<M: ObjectMapper>(wire: Option<&M::Wire>, diags: &mut Diagnostics) -> Value<M> {
    match wire {
        Some(w) => Value::Known(M::flatten(w, diags)),
        None => Value::Null,
    }
}

/// Expand each element in order. Null and unknown elements are dropped.
/// Returns `None` as soon as an element records an error.
pub fn expand_object_list<M: ObjectMapper>(
    state: &ListValue<M>,
    diags: &mut Diagnostics,
) -> Option<Vec<M::Wire>> {
    let items = state.as_known()?;
    let errors = diags.error_count();

    let mut out = Vec::with_capacity(items.len());
    for item in items {
        if let Some(wire) = expand_object(item, diags) {
            out.push(wire);
        }
        if diags.error_count() > errors {
            return None;
        }
    }
    Some(out)
}

pub fn flatten_object_list<M: ObjectMapper>(
    wire: Option<&[M::Wire]>,
    diags: &mut Diagnostics,
) -> ListValue<M> {
    match wire {
        Some(items) => Value::Known(
            items
                .iter()
                .map(|w| Value::Known(M::flatten(w, diags)))
                .collect(),
        ),
        None => Value::Null,
    }
}

/// Decode an untyped value into a model and expand it. Decode failures are
/// reported against `path` and nothing is expanded.
pub fn expand_state<M: ObjectMapper>(
    value: &Dynamic,
    path: &AttributePath,
    diags: &mut Diagnostics,
) -> Option<M::Wire> {
    let state = Value::<M>::from_dynamic(value, path, diags)?;
    expand_object(&state, diags)
}

pub fn flatten_state<M: ObjectMapper>(wire: Option<&M::Wire>, diags: &mut Diagnostics) -> Dynamic {
    flatten_object::<M>(wire, diags).to_dynamic()
}

/// Decode a whole resource state/plan/config into its root model
pub fn decode_model<M: StateModel>(value: &DynamicValue, diags: &mut Diagnostics) -> Option<M> {
    match &value.value {
        Dynamic::Null | Dynamic::Unknown => {
            diags.add_error(
                "Value Conversion Error",
                Some(format!(
                    "Expected an object, got {}",
                    value.value.type_name()
                )),
            );
            None
        }
        v => M::from_dynamic(v, &AttributePath::root(), diags),
    }
}

pub fn encode_model<M: StateModel>(model: &M) -> DynamicValue {
    DynamicValue::new(model.to_dynamic())
}

/// Declare a state model: a struct of `Value<_>` fields with its attribute
/// names, `AttrTypes` and conversion to and from `Dynamic`.
///
/// ```ignore
/// state_model! {
///     pub struct MemberLomUserModel {
///         pub name: String => "name",
///         pub disable: bool => "disable",
///     }
/// }
/// ```
///
/// A missing attribute decodes as null. Decoding reports every bad field
/// and returns `None` if any of them failed.
#[macro_export]
macro_rules! state_model {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $ty:ty => $attr:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Default)]
        $vis struct $name {
            $(
                $(#[$fmeta])*
                $fvis $field: $crate::value::Value<$ty>,
            )*
        }

        impl $name {
            pub const ATTRIBUTES: &'static [&'static str] = &[$($attr),*];
        }

        impl $crate::mapper::StateModel for $name {
            fn attr_types() -> $crate::attribute_type::AttrTypes {
                let mut types = $crate::attribute_type::AttrTypes::new();
                $(
                    types.insert(
                        $attr.to_string(),
                        <$ty as $crate::value::StateType>::attr_type(),
                    );
                )*
                types
            }
        }

        impl $crate::value::StateType for $name {
            fn attr_type() -> $crate::attribute_type::AttributeType {
                $crate::attribute_type::AttributeType::Object(
                    <Self as $crate::mapper::StateModel>::attr_types(),
                )
            }

            fn from_dynamic(
                value: &$crate::types::Dynamic,
                path: &$crate::types::AttributePath,
                diags: &mut $crate::types::Diagnostics,
            ) -> ::std::option::Option<Self> {
                let ::std::option::Option::Some(attrs) = value.as_map() else {
                    $crate::value::conversion_error(diags, path, "object", value);
                    return ::std::option::Option::None;
                };

                let errors = diags.error_count();
                let model = Self {
                    $(
                        $field: match attrs.get($attr) {
                            ::std::option::Option::Some(v) => {
                                <$crate::value::Value<$ty> as $crate::value::StateType>::from_dynamic(
                                    v,
                                    &path.clone().attribute($attr),
                                    diags,
                                )
                                .unwrap_or_default()
                            }
                            ::std::option::Option::None => $crate::value::Value::Null,
                        },
                    )*
                };

                if diags.error_count() > errors {
                    ::std::option::Option::None
                } else {
                    ::std::option::Option::Some(model)
                }
            }

            fn to_dynamic(&self) -> $crate::types::Dynamic {
                let mut attrs = ::std::collections::HashMap::new();
                $(
                    attrs.insert(
                        $attr.to_string(),
                        $crate::value::StateType::to_dynamic(&self.$field),
                    );
                )*
                $crate::types::Dynamic::Map(attrs)
            }
        }
    };
}
