use std::collections::HashMap;

use serde_json::Value as JsonValue;
use tfplug::{AttributePath, Diagnostics, Value};

use crate::api::grid::ExtAttr;

pub type ExtAttrsValue = Value<HashMap<String, Value<String>>>;

/// Extensible attributes are kept as strings in state. Numbers and booleans
/// are rendered with their JSON text. Null values are dropped. Anything else
/// is reported and skipped.
pub fn flatten_ext_attrs(
    wire: Option<&HashMap<String, ExtAttr>>,
    diags: &mut Diagnostics,
) -> ExtAttrsValue {
    let Some(wire) = wire else {
        return Value::Null;
    };

    let mut attrs = HashMap::with_capacity(wire.len());
    for (name, attr) in wire {
        let value = match &attr.value {
            JsonValue::Null => continue,
            JsonValue::String(s) => Value::Known(s.clone()),
            JsonValue::Number(n) => Value::Known(n.to_string()),
            JsonValue::Bool(b) => Value::Known(b.to_string()),
            other => {
                diags.add_attribute_warning(
                    &AttributePath::new("extattrs").key(name),
                    "Unsupported extensible attribute",
                    format!(
                        "Extensible attribute {name:?} has a non-scalar value and was not imported: {other}"
                    ),
                );
                continue;
            }
        };
        attrs.insert(name.clone(), value);
    }

    Value::Known(attrs)
}

pub fn expand_ext_attrs(state: &ExtAttrsValue) -> Option<HashMap<String, ExtAttr>> {
    let attrs = state.as_known()?;
    Some(
        attrs
            .iter()
            .filter_map(|(name, value)| {
                value.as_known().map(|v| {
                    (
                        name.clone(),
                        ExtAttr {
                            value: JsonValue::String(v.clone()),
                        },
                    )
                })
            })
            .collect(),
    )
}
