use crate::types::{AttributePath, Diagnostics, Dynamic};

#[derive(Debug, Clone)]
pub struct PlanModifyRequest {
    /// Prior state value, null on create
    pub state: Dynamic,
    /// Planned value after defaults and unknown marking
    pub plan: Dynamic,
    pub config: Dynamic,
    pub attribute_path: AttributePath,
}

#[derive(Debug, Clone)]
pub struct PlanModifyResponse {
    pub plan_value: Dynamic,
    pub diagnostics: Diagnostics,
}

impl PlanModifyResponse {
    fn unchanged(request: PlanModifyRequest) -> Self {
        Self {
            plan_value: request.plan,
            diagnostics: Diagnostics::new(),
        }
    }
}

/// Trait for modifying terraform plan behavior
///
/// Plan modifiers run after defaults have been applied. They may replace
/// the planned value or add warnings and errors to the plan.
pub trait PlanModifier: Send + Sync {
    fn description(&self) -> String;

    fn modify_plan(&self, request: PlanModifyRequest) -> PlanModifyResponse;
}

/// Keeps the prior state value for a computed attribute instead of showing
/// it as unknown. Does nothing on create.
pub struct UseStateForUnknown;

impl PlanModifier for UseStateForUnknown {
    fn description(&self) -> String {
        "once set, the value of this attribute in state will not change".to_string()
    }

    fn modify_plan(&self, request: PlanModifyRequest) -> PlanModifyResponse {
        if request.plan.is_unknown() && request.state.is_known() {
            return PlanModifyResponse {
                plan_value: request.state,
                diagnostics: Diagnostics::new(),
            };
        }
        PlanModifyResponse::unchanged(request)
    }
}

/// Rejects any change to a value once the resource exists
pub struct Immutable;

impl PlanModifier for Immutable {
    fn description(&self) -> String {
        "this value cannot be changed after creation".to_string()
    }

    fn modify_plan(&self, request: PlanModifyRequest) -> PlanModifyResponse {
        if !request.state.is_known() || !request.plan.is_known() {
            return PlanModifyResponse::unchanged(request);
        }

        let mut diagnostics = Diagnostics::new();
        if !values_equal(&request.state, &request.plan) {
            diagnostics.add_attribute_error(
                &request.attribute_path,
                "Immutable attribute cannot be changed",
                format!(
                    "Attribute {} cannot be changed after the resource is created",
                    request.attribute_path
                ),
            );
        }

        PlanModifyResponse {
            plan_value: request.plan,
            diagnostics,
        }
    }
}

/// Compare two Dynamic values for equality
pub fn values_equal(a: &Dynamic, b: &Dynamic) -> bool {
    match (a, b) {
        (Dynamic::Null, Dynamic::Null) => true,
        (Dynamic::Unknown, Dynamic::Unknown) => true,
        (Dynamic::Bool(a), Dynamic::Bool(b)) => a == b,
        (Dynamic::Number(a), Dynamic::Number(b)) => (a - b).abs() < f64::EPSILON,
        (Dynamic::String(a), Dynamic::String(b)) => a == b,
        (Dynamic::List(a), Dynamic::List(b)) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| values_equal(x, y))
        }
        (Dynamic::Map(a), Dynamic::Map(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(k, v)| b.get(k).is_some_and(|v2| values_equal(v, v2)))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn request(state: Dynamic, plan: Dynamic) -> PlanModifyRequest {
        PlanModifyRequest {
            config: plan.clone(),
            state,
            plan,
            attribute_path: AttributePath::new("platform"),
        }
    }

    #[test]
    fn values_equal_handles_all_types() {
        assert!(values_equal(&Dynamic::Number(42.0), &Dynamic::Number(42.0)));
        assert!(!values_equal(&Dynamic::Number(42.0), &Dynamic::Number(43.0)));
        assert!(!values_equal(&Dynamic::Bool(true), &Dynamic::Bool(false)));
        assert!(!values_equal(&Dynamic::Null, &Dynamic::Bool(false)));

        let list1 = Dynamic::List(vec![Dynamic::String("a".to_string()), Dynamic::Number(1.0)]);
        let list2 = Dynamic::List(vec![Dynamic::String("b".to_string()), Dynamic::Number(1.0)]);
        assert!(values_equal(&list1, &list1.clone()));
        assert!(!values_equal(&list1, &list2));

        let map1 = HashMap::from([("key".to_string(), Dynamic::String("value".to_string()))]);
        let map2 = HashMap::from([("key".to_string(), Dynamic::String("other".to_string()))]);
        assert!(values_equal(&Dynamic::Map(map1.clone()), &Dynamic::Map(map1.clone())));
        assert!(!values_equal(&Dynamic::Map(map1), &Dynamic::Map(map2)));
    }

    #[test]
    fn use_state_for_unknown_preserves_state_when_unknown() {
        let response = UseStateForUnknown.modify_plan(request(
            Dynamic::String("member/b25lLnZpcnR1YWxfbm9kZSQ0:gm.example.com".to_string()),
            Dynamic::Unknown,
        ));

        assert_eq!(
            response.plan_value,
            Dynamic::String("member/b25lLnZpcnR1YWxfbm9kZSQ0:gm.example.com".to_string())
        );
    }

    #[test]
    fn use_state_for_unknown_stays_unknown_on_create() {
        let response = UseStateForUnknown.modify_plan(request(Dynamic::Null, Dynamic::Unknown));
        assert_eq!(response.plan_value, Dynamic::Unknown);
    }

    #[test]
    fn use_state_for_unknown_uses_plan_when_known() {
        let response = UseStateForUnknown.modify_plan(request(
            Dynamic::String("existing-value".to_string()),
            Dynamic::String("new-value".to_string()),
        ));
        assert_eq!(response.plan_value, Dynamic::String("new-value".to_string()));
    }

    #[test]
    fn immutable_rejects_change_after_create() {
        let response = Immutable.modify_plan(request(
            Dynamic::String("secret".to_string()),
            Dynamic::String("changed".to_string()),
        ));
        assert_eq!(response.diagnostics.errors.len(), 1);
        assert_eq!(
            response.diagnostics.errors[0].summary,
            "Immutable attribute cannot be changed"
        );
    }

    #[test]
    fn immutable_allows_create_and_same_value() {
        let response =
            Immutable.modify_plan(request(Dynamic::Null, Dynamic::String("secret".to_string())));
        assert!(response.diagnostics.is_empty());

        let response = Immutable.modify_plan(request(
            Dynamic::String("secret".to_string()),
            Dynamic::String("secret".to_string()),
        ));
        assert!(response.diagnostics.is_empty());
    }

    #[test]
    fn custom_plan_modifier_can_modify_planned_value() {
        struct UppercaseModifier;

        impl PlanModifier for UppercaseModifier {
            fn description(&self) -> String {
                "uppercases the planned value".to_string()
            }

            fn modify_plan(&self, request: PlanModifyRequest) -> PlanModifyResponse {
                let mut diagnostics = Diagnostics::new();
                let plan_value = match &request.plan {
                    Dynamic::String(s) if s.chars().any(char::is_lowercase) => {
                        diagnostics.add_warning(
                            format!("Normalizing {}", request.attribute_path),
                            Some(format!("Using {:?}", s.to_uppercase())),
                        );
                        Dynamic::String(s.to_uppercase())
                    }
                    _ => request.plan,
                };

                PlanModifyResponse {
                    plan_value,
                    diagnostics,
                }
            }
        }

        let response =
            UppercaseModifier.modify_plan(request(Dynamic::Null, Dynamic::String("vnios".to_string())));
        assert_eq!(response.plan_value, Dynamic::String("VNIOS".to_string()));
        assert_eq!(response.diagnostics.warnings.len(), 1);
    }
}
