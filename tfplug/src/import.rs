//! Import helpers for simplifying resource import implementations

use crate::context::Context;
use crate::resource::{ImportResourceStateRequest, ImportResourceStateResponse, ImportedResource};
use crate::types::{AttributePath, DynamicValue};

/// Sets the import ID to a specific attribute in state
///
/// For resources whose import ID maps directly onto one attribute.
///
/// Example: ID "member/b25l...:gm.example.com" -> state.ref = ID
pub fn import_state_passthrough_id(
    _ctx: &Context,
    attr_path: AttributePath,
    request: &ImportResourceStateRequest,
    response: &mut ImportResourceStateResponse,
) {
    if request.id.is_empty() {
        response.diagnostics.add_attribute_error(
            &attr_path,
            "Missing import ID",
            "The import ID must not be empty",
        );
        return;
    }

    let mut state = DynamicValue::object();

    if let Err(e) = state.set_string(&attr_path, request.id.clone()) {
        response.diagnostics.add_attribute_error(
            &attr_path,
            format!("Failed to set import ID: {}", e),
            format!(
                "Could not set attribute '{}' to value '{}'",
                attr_path, request.id
            ),
        );
        return;
    }

    response.imported_resources.push(ImportedResource {
        type_name: request.type_name.clone(),
        state,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Diagnostics;

    fn import(id: &str) -> ImportResourceStateResponse {
        let request = ImportResourceStateRequest {
            type_name: "nios_grid_member".to_string(),
            id: id.to_string(),
        };
        let mut response = ImportResourceStateResponse {
            imported_resources: Vec::new(),
            diagnostics: Diagnostics::new(),
        };
        import_state_passthrough_id(
            &Context::new(),
            AttributePath::new("ref"),
            &request,
            &mut response,
        );
        response
    }

    #[test]
    fn passthrough_sets_attribute() {
        let response = import("member/b25lLnZpcnR1YWxfbm9kZSQ0:gm.example.com");

        assert!(response.diagnostics.is_empty());
        assert_eq!(response.imported_resources.len(), 1);
        let imported = &response.imported_resources[0];
        assert_eq!(imported.type_name, "nios_grid_member");
        assert_eq!(
            imported.state.get_string(&AttributePath::new("ref")).unwrap(),
            "member/b25lLnZpcnR1YWxfbm9kZSQ0:gm.example.com"
        );
    }

    #[test]
    fn empty_id_is_rejected() {
        let response = import("");
        assert!(response.imported_resources.is_empty());
        assert_eq!(response.diagnostics.errors[0].summary, "Missing import ID");
    }
}
