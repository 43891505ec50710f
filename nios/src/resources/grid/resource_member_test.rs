#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::super::*;
    use crate::api::test_helpers::{create_test_client, wapi_path};
    use crate::resources::grid::models::MemberLomUserModel;
    use mockito::{Matcher, Server};
    use serde_json::json;
    use std::any::Any;
    use std::sync::Arc;
    use tfplug::DynamicValue;

    const MEMBER_REF: &str = "member/b25lLnZpcnR1YWxfbm9kZSQy:infoblox-test.localdomain";

    async fn configured_resource(server_url: &str) -> MemberResource {
        let data: Arc<dyn Any + Send + Sync> = Arc::new(NiosProviderData {
            client: Arc::new(create_test_client(server_url)),
        });
        let mut resource = MemberResource::new();
        let response = resource
            .configure(
                Context::new(),
                ConfigureResourceRequest {
                    provider_data: Some(data),
                },
            )
            .await;
        assert!(response.diagnostics.is_empty());
        resource
    }

    fn lom_user(name: &str, password: Option<&str>) -> Value<MemberLomUserModel> {
        Value::Known(MemberLomUserModel {
            name: Value::Known(name.to_string()),
            password: password.map_or(Value::Null, |p| Value::Known(p.to_string())),
            role: Value::Known("USER".to_string()),
            disable: Value::Known(false),
            comment: Value::Known(String::new()),
        })
    }

    fn planned_member(r#ref: Value<String>) -> MemberModel {
        MemberModel {
            r#ref,
            host_name: Value::Known("infoblox-test.localdomain".to_string()),
            comment: Value::Known("lab member".to_string()),
            lom_users: Value::Known(vec![lom_user("admin", Some("Infoblox@123"))]),
            ..Default::default()
        }
    }

    fn member_response(comment: &str) -> String {
        json!({
            "result": {
                "_ref": MEMBER_REF,
                "host_name": "infoblox-test.localdomain",
                "comment": comment,
                "platform": "VNIOS",
                "enable_ha": false,
                "dscp": 0,
                "use_dscp": false,
                "extattrs": {},
                "lom_users": [{"name": "admin", "role": "USER", "disable": false, "comment": ""}]
            }
        })
        .to_string()
    }

    fn decode(state: &DynamicValue) -> MemberModel {
        let mut diags = Diagnostics::new();
        let model = decode_model::<MemberModel>(state, &mut diags).unwrap();
        assert!(diags.is_empty());
        model
    }

    fn password_of(model: &MemberModel) -> Value<String> {
        model.lom_users.as_known().unwrap()[0]
            .as_known()
            .unwrap()
            .password
            .clone()
    }

    #[test]
    fn test_resource_type_name() {
        let resource = MemberResource::new();
        assert_eq!(resource.type_name(), "nios_grid_member");
    }

    #[test]
    fn test_resource_schema() {
        let schema = MemberResource::new().schema();
        assert_eq!(schema.version, 0);

        let attrs = &schema.block.attributes;
        assert!(attrs.iter().any(|a| a.name == "host_name" && a.required));
        assert!(attrs.iter().any(|a| a.name == "ref" && a.computed && !a.optional));
        assert!(attrs.iter().any(|a| a.name == "lom_users" && a.nested_type.is_some()));
    }

    #[tokio::test]
    async fn test_configure_rejects_foreign_provider_data() {
        let mut resource = MemberResource::new();
        let data: Arc<dyn Any + Send + Sync> = Arc::new("not provider data".to_string());

        let response = resource
            .configure(
                Context::new(),
                ConfigureResourceRequest {
                    provider_data: Some(data),
                },
            )
            .await;

        assert_eq!(response.diagnostics.errors[0].summary, "Invalid provider data");
    }

    #[tokio::test]
    async fn test_create_without_provider_data() {
        let resource = MemberResource::new();
        let planned_state = encode_model(&planned_member(Value::Unknown));

        let response = resource
            .create(
                Context::new(),
                CreateResourceRequest {
                    type_name: "nios_grid_member".to_string(),
                    planned_state: planned_state.clone(),
                    config: planned_state.clone(),
                },
            )
            .await;

        assert_eq!(response.diagnostics.error_count(), 1);
        assert_eq!(response.diagnostics.errors[0].summary, "Provider not configured");
        assert_eq!(response.new_state, planned_state);
    }

    #[tokio::test]
    async fn test_create_member() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", wapi_path("/member"))
            .match_query(Matcher::UrlEncoded("_return_as_object".into(), "1".into()))
            .match_body(Matcher::Json(json!({
                "host_name": "infoblox-test.localdomain",
                "comment": "lab member",
                "lom_users": [{
                    "name": "admin",
                    "password": "Infoblox@123",
                    "role": "USER",
                    "disable": false,
                    "comment": ""
                }]
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(member_response("lab member"))
            .create_async()
            .await;

        let resource = configured_resource(&server.url()).await;
        let planned_state = encode_model(&planned_member(Value::Unknown));
        let response = resource
            .create(
                Context::new(),
                CreateResourceRequest {
                    type_name: "nios_grid_member".to_string(),
                    planned_state: planned_state.clone(),
                    config: planned_state,
                },
            )
            .await;

        assert!(response.diagnostics.is_empty());
        let state = decode(&response.new_state);
        assert_eq!(state.r#ref, Value::Known(MEMBER_REF.to_string()));
        assert_eq!(state.platform, Value::Known("VNIOS".to_string()));
        assert_eq!(state.ipv6_setting, Value::Null);
        assert_eq!(password_of(&state), Value::Known("Infoblox@123".to_string()));
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_api_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", wapi_path("/member"))
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "Error": "AdmConProtoError: Duplicate object",
                    "code": "Client.Ibap.Data.Conflict",
                    "text": "Duplicate object 'infoblox-test.localdomain'"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let resource = configured_resource(&server.url()).await;
        let planned_state = encode_model(&planned_member(Value::Unknown));
        let response = resource
            .create(
                Context::new(),
                CreateResourceRequest {
                    type_name: "nios_grid_member".to_string(),
                    planned_state: planned_state.clone(),
                    config: planned_state,
                },
            )
            .await;

        assert_eq!(response.diagnostics.error_count(), 1);
        assert_eq!(response.diagnostics.errors[0].summary, "Failed to create member");
        assert!(response.diagnostics.errors[0].detail.contains("Duplicate object"));
    }

    #[tokio::test]
    async fn test_read_keeps_password_from_state() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", wapi_path(&format!("/{}", MEMBER_REF)))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(member_response("changed outside terraform"))
            .create_async()
            .await;

        let resource = configured_resource(&server.url()).await;
        let current_state = encode_model(&planned_member(Value::Known(MEMBER_REF.to_string())));
        let response = resource
            .read(
                Context::new(),
                ReadResourceRequest {
                    type_name: "nios_grid_member".to_string(),
                    current_state,
                },
            )
            .await;

        assert!(response.diagnostics.is_empty());
        let state = decode(&response.new_state.unwrap());
        assert_eq!(state.comment, Value::Known("changed outside terraform".to_string()));
        assert_eq!(password_of(&state), Value::Known("Infoblox@123".to_string()));
    }

    #[tokio::test]
    async fn test_read_removes_missing_member() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", wapi_path(&format!("/{}", MEMBER_REF)))
            .with_status(404)
            .with_body("")
            .create_async()
            .await;

        let resource = configured_resource(&server.url()).await;
        let response = resource
            .read(
                Context::new(),
                ReadResourceRequest {
                    type_name: "nios_grid_member".to_string(),
                    current_state: encode_model(&planned_member(Value::Known(
                        MEMBER_REF.to_string(),
                    ))),
                },
            )
            .await;

        assert!(response.diagnostics.is_empty());
        assert!(response.new_state.is_none());
    }

    #[tokio::test]
    async fn test_read_without_ref() {
        let server = Server::new_async().await;
        let resource = configured_resource(&server.url()).await;

        let response = resource
            .read(
                Context::new(),
                ReadResourceRequest {
                    type_name: "nios_grid_member".to_string(),
                    current_state: encode_model(&planned_member(Value::Null)),
                },
            )
            .await;

        assert_eq!(response.diagnostics.errors[0].summary, "Missing object reference");
        assert!(response.new_state.is_some());
    }

    #[tokio::test]
    async fn test_update_strips_lom_passwords() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("PUT", wapi_path(&format!("/{}", MEMBER_REF)))
            .match_body(Matcher::Json(json!({
                "host_name": "infoblox-test.localdomain",
                "comment": "updated",
                "lom_users": [{
                    "name": "admin",
                    "role": "USER",
                    "disable": false,
                    "comment": ""
                }]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(member_response("updated"))
            .create_async()
            .await;

        let resource = configured_resource(&server.url()).await;
        let prior = planned_member(Value::Known(MEMBER_REF.to_string()));
        let mut plan = prior.clone();
        plan.comment = Value::Known("updated".to_string());

        let response = resource
            .update(
                Context::new(),
                UpdateResourceRequest {
                    type_name: "nios_grid_member".to_string(),
                    prior_state: encode_model(&prior),
                    planned_state: encode_model(&plan),
                    config: encode_model(&plan),
                },
            )
            .await;

        assert!(response.diagnostics.is_empty());
        let state = decode(&response.new_state);
        assert_eq!(state.comment, Value::Known("updated".to_string()));
        assert_eq!(password_of(&state), Value::Known("Infoblox@123".to_string()));
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_update_sends_password_of_added_lom_user() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("PUT", wapi_path(&format!("/{}", MEMBER_REF)))
            .match_body(Matcher::Json(json!({
                "host_name": "infoblox-test.localdomain",
                "comment": "lab member",
                "lom_users": [
                    {"name": "admin", "role": "USER", "disable": false, "comment": ""},
                    {
                        "name": "ops",
                        "password": "NEWPW",
                        "role": "USER",
                        "disable": false,
                        "comment": ""
                    }
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "result": {
                        "_ref": MEMBER_REF,
                        "host_name": "infoblox-test.localdomain",
                        "comment": "lab member",
                        "lom_users": [
                            {"name": "admin", "role": "USER", "disable": false, "comment": ""},
                            {"name": "ops", "role": "USER", "disable": false, "comment": ""}
                        ]
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let resource = configured_resource(&server.url()).await;
        let prior = planned_member(Value::Known(MEMBER_REF.to_string()));
        let mut plan = prior.clone();
        plan.lom_users = Value::Known(vec![
            lom_user("admin", Some("Infoblox@123")),
            lom_user("ops", Some("NEWPW")),
        ]);

        let response = resource
            .update(
                Context::new(),
                UpdateResourceRequest {
                    type_name: "nios_grid_member".to_string(),
                    prior_state: encode_model(&prior),
                    planned_state: encode_model(&plan),
                    config: encode_model(&plan),
                },
            )
            .await;

        assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics.errors);
        m.assert_async().await;

        let state = decode(&response.new_state);
        let passwords: Vec<_> = state
            .lom_users
            .as_known()
            .unwrap()
            .iter()
            .map(|u| u.as_known().unwrap().password.clone())
            .collect();
        assert_eq!(
            passwords,
            vec![
                Value::Known("Infoblox@123".to_string()),
                Value::Known("NEWPW".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_create_stops_when_context_cancelled() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", wapi_path("/member"))
            .with_status(201)
            .with_body(member_response("lab member"))
            .expect(0)
            .create_async()
            .await;

        let resource = configured_resource(&server.url()).await;
        let planned_state = encode_model(&planned_member(Value::Unknown));
        let ctx = Context::new();
        ctx.cancel();

        let response = resource
            .create(
                ctx,
                CreateResourceRequest {
                    type_name: "nios_grid_member".to_string(),
                    planned_state: planned_state.clone(),
                    config: planned_state.clone(),
                },
            )
            .await;

        assert_eq!(response.diagnostics.errors[0].summary, "Failed to create member");
        assert!(response.diagnostics.errors[0].detail.contains("Request cancelled"));
        assert_eq!(response.new_state, planned_state);
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_delete_member() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("DELETE", wapi_path(&format!("/{}", MEMBER_REF)))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!(MEMBER_REF).to_string())
            .create_async()
            .await;

        let resource = configured_resource(&server.url()).await;
        let response = resource
            .delete(
                Context::new(),
                DeleteResourceRequest {
                    type_name: "nios_grid_member".to_string(),
                    prior_state: encode_model(&planned_member(Value::Known(
                        MEMBER_REF.to_string(),
                    ))),
                },
            )
            .await;

        assert!(response.diagnostics.is_empty());
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_delete_missing_member_succeeds() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("DELETE", wapi_path(&format!("/{}", MEMBER_REF)))
            .with_status(404)
            .with_body("")
            .create_async()
            .await;

        let resource = configured_resource(&server.url()).await;
        let response = resource
            .delete(
                Context::new(),
                DeleteResourceRequest {
                    type_name: "nios_grid_member".to_string(),
                    prior_state: encode_model(&planned_member(Value::Known(
                        MEMBER_REF.to_string(),
                    ))),
                },
            )
            .await;

        assert!(response.diagnostics.is_empty());
    }

    #[tokio::test]
    async fn test_import_sets_ref() {
        let resource = MemberResource::new();
        let response = resource
            .import_state(
                Context::new(),
                ImportResourceStateRequest {
                    type_name: "nios_grid_member".to_string(),
                    id: MEMBER_REF.to_string(),
                },
            )
            .await;

        assert!(response.diagnostics.is_empty());
        let state = decode(&response.imported_resources[0].state);
        assert_eq!(state.r#ref, Value::Known(MEMBER_REF.to_string()));
        assert_eq!(state.host_name, Value::Null);
    }
}
