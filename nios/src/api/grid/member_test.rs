#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::api::test_helpers::{create_test_client, wapi_path};
    use mockito::{Matcher, Server};
    use serde_json::json;

    const MEMBER_REF: &str = "member/b25lLnZpcnR1YWxfbm9kZSQy:infoblox-test.localdomain";

    fn member_body() -> String {
        json!({
            "result": {
                "_ref": MEMBER_REF,
                "host_name": "infoblox-test.localdomain",
                "comment": "",
                "config_addr_type": "IPV4",
                "platform": "VNIOS",
                "service_type_configuration": "ALL_V4",
                "enable_ha": false,
                "router_id": 12,
                "is_dscp_capable": true,
                "extattrs": {"Site": {"value": "east"}, "Rack": {"value": 4}},
                "lom_users": [{"name": "admin", "role": "USER", "disable": false, "comment": ""}],
                "vip_setting": {
                    "address": "172.28.83.10",
                    "gateway": "172.28.82.1",
                    "subnet_mask": "255.255.254.0",
                    "primary": true,
                    "dscp": 0,
                    "use_dscp": false
                },
                "snmp_setting": {
                    "queries_enable": false,
                    "trap_receivers": [{"address": "10.0.0.1", "comment": "noc"}]
                }
            }
        })
        .to_string()
    }

    #[test]
    fn test_member_serialization_skips_absent_fields() {
        let member = Member {
            r#ref: Some(MEMBER_REF.to_string()),
            host_name: Some("gm.example.com".to_string()),
            enable_ha: Some(false),
            ..Default::default()
        };

        let body = serde_json::to_value(&member).unwrap();
        assert_eq!(
            body,
            json!({"_ref": MEMBER_REF, "host_name": "gm.example.com", "enable_ha": false})
        );
    }

    #[tokio::test]
    async fn test_create_member() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", wapi_path("/member"))
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("_return_as_object".into(), "1".into()),
                Matcher::Regex("_return_fields%2B=host_name".into()),
            ]))
            .match_body(Matcher::Json(json!({
                "host_name": "infoblox-test.localdomain",
                "config_addr_type": "IPV4"
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(member_body())
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let request = Member {
            host_name: Some("infoblox-test.localdomain".to_string()),
            config_addr_type: Some("IPV4".to_string()),
            ..Default::default()
        };
        let created = client.grid().member().create(&request).await.unwrap();

        assert_eq!(created.r#ref.as_deref(), Some(MEMBER_REF));
        assert_eq!(created.router_id, Some(12));
        assert_eq!(created.extattrs.unwrap()["Rack"].value, json!(4));
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_member() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", wapi_path(&format!("/{}", MEMBER_REF)))
            .match_query(Matcher::UrlEncoded("_return_as_object".into(), "1".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(member_body())
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let member = client.grid().member().get(MEMBER_REF).await.unwrap();

        assert_eq!(member.host_name.as_deref(), Some("infoblox-test.localdomain"));
        let lom = &member.lom_users.unwrap()[0];
        assert_eq!(lom.name.as_deref(), Some("admin"));
        assert_eq!(lom.password, None);
        let vip = member.vip_setting.unwrap();
        assert_eq!(vip.address.as_deref(), Some("172.28.83.10"));
        assert_eq!(vip.vlan_id, None);
        let receivers = member.snmp_setting.unwrap().trap_receivers.unwrap();
        assert_eq!(receivers[0].comment.as_deref(), Some("noc"));
    }

    #[tokio::test]
    async fn test_get_member_not_found() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", wapi_path("/member/missing"))
            .with_status(404)
            .with_body(r#"{"Error": "AdmConDataNotFound", "code": "Client.Ibap.Data.NotFound", "text": "Reference member/missing not found"}"#)
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let result = client.grid().member().get("member/missing").await;

        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_member() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("PUT", wapi_path(&format!("/{}", MEMBER_REF)))
            .match_query(Matcher::UrlEncoded("_return_as_object".into(), "1".into()))
            .match_body(Matcher::PartialJson(json!({"comment": "updated"})))
            .with_status(200)
            .with_body(member_body())
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let request = Member {
            comment: Some("updated".to_string()),
            ..Default::default()
        };
        let updated = client
            .grid()
            .member()
            .update(MEMBER_REF, &request)
            .await
            .unwrap();

        assert_eq!(updated.r#ref.as_deref(), Some(MEMBER_REF));
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_delete_member() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("DELETE", wapi_path(&format!("/{}", MEMBER_REF)))
            .with_status(200)
            .with_body(format!("\"{}\"", MEMBER_REF))
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let deleted = client.grid().member().delete(MEMBER_REF).await.unwrap();

        assert_eq!(deleted, MEMBER_REF);
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_api_error_handling() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", wapi_path("/member"))
            .with_status(400)
            .with_body(r#"{"Error": "AdmConProtoError: Invalid value for platform", "code": "Client.Ibap.Proto", "text": "Invalid value for platform: \"X\""}"#)
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let result = client.grid().member().create(&Member::default()).await;

        match result {
            Err(ApiError::ApiError { status, message, .. }) => {
                assert_eq!(status, 400);
                assert!(message.contains("Invalid value for platform"));
            }
            other => panic!("Expected ApiError, got {:?}", other),
        }
    }
}
