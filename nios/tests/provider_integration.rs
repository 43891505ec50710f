#![allow(clippy::disallowed_methods)]

use std::collections::HashMap;

use mockito::{Matcher, Server};
use nios::resources::grid::models::{MemberLomUserModel, MemberModel, MemberNetworkSettingModel};
use nios::NiosProvider;
use serde_json::json;
use tfplug::mapper::{decode_model, encode_model};
use tfplug::resource::{
    CreateResourceRequest, DeleteResourceRequest, PlanResourceChangeRequest, ReadResourceRequest,
    ValidateResourceConfigRequest,
};
use tfplug::{Context, Diagnostics, Dynamic, DynamicValue, Ipv4Address, Value};

const MEMBER_REF: &str = "member/b25lLnZpcnR1YWxfbm9kZSQz:gm-east.example.com";

fn member_path(suffix: &str) -> Matcher {
    Matcher::Regex(format!(
        "^/wapi/v2\\.13\\.6/{}(\\?.*)?$",
        suffix.replace('.', "\\.")
    ))
}

async fn configured_provider(url: &str) -> NiosProvider {
    let config = DynamicValue::new(Dynamic::Map(HashMap::from([
        ("nios_host_url".to_string(), Dynamic::String(url.to_string())),
        ("nios_username".to_string(), Dynamic::String("admin".to_string())),
        ("nios_password".to_string(), Dynamic::String("infoblox".to_string())),
        ("wapi_version".to_string(), Dynamic::String("v2.13.6".to_string())),
    ])));

    let mut provider = NiosProvider::new();
    let diags = provider.configure(Context::new(), &config).await;
    assert!(diags.is_empty(), "{:?}", diags.errors);
    provider
}

fn member_config() -> DynamicValue {
    encode_model(&MemberModel {
        host_name: Value::Known("gm-east.example.com".to_string()),
        platform: Value::Known("VNIOS".to_string()),
        vip_setting: Value::Known(MemberNetworkSettingModel {
            address: Value::Known(Ipv4Address::from("10.20.0.5")),
            subnet_mask: Value::Known("255.255.255.0".to_string()),
            gateway: Value::Known("10.20.0.1".to_string()),
            ..Default::default()
        }),
        lom_users: Value::Known(vec![Value::Known(MemberLomUserModel {
            name: Value::Known("ops".to_string()),
            password: Value::Known("S3cret!".to_string()),
            ..Default::default()
        })]),
        ..Default::default()
    })
}

fn server_member() -> serde_json::Value {
    json!({
        "_ref": MEMBER_REF,
        "host_name": "gm-east.example.com",
        "comment": "",
        "config_addr_type": "IPV4",
        "platform": "VNIOS",
        "service_type_configuration": "ALL_V4",
        "enable_ha": false,
        "master_candidate": false,
        "upgrade_group": "Default",
        "time_zone": "(UTC) Coordinated Universal Time",
        "use_time_zone": false,
        "dscp": 0,
        "use_dscp": false,
        "enable_lom": false,
        "use_enable_lom": false,
        "use_snmp_setting": false,
        "use_threshold_traps": false,
        "vpn_mtu": 1450,
        "syslog_size": 300,
        "csp_access_key": [],
        "extattrs": {},
        "lom_users": [{"name": "ops", "role": "USER", "disable": false, "comment": ""}],
        "threshold_traps": [{"trap_type": "CpuUsage", "trap_reset": 70, "trap_trigger": 90}],
        "vip_setting": {
            "address": "10.20.0.5",
            "subnet_mask": "255.255.255.0",
            "gateway": "10.20.0.1",
            "primary": true,
            "dscp": 0,
            "use_dscp": false
        },
        "additional_ip_list": []
    })
}

#[tokio::test]
async fn member_lifecycle_against_mock_wapi() {
    let mut server = Server::new_async().await;
    let provider = configured_provider(&server.url()).await;
    let resource = provider
        .create_resource(Context::new(), "nios_grid_member")
        .await
        .unwrap();

    let config = member_config();
    let validated = resource
        .validate(
            Context::new(),
            ValidateResourceConfigRequest {
                type_name: "nios_grid_member".to_string(),
                config: config.clone(),
            },
        )
        .await;
    assert!(validated.diagnostics.is_empty());

    let plan = resource
        .plan(
            Context::new(),
            PlanResourceChangeRequest {
                type_name: "nios_grid_member".to_string(),
                config: config.clone(),
                prior_state: DynamicValue::null(),
            },
        )
        .await;
    assert!(plan.diagnostics.is_empty());

    let create_mock = server
        .mock("POST", member_path("member"))
        .match_query(Matcher::UrlEncoded("_return_as_object".into(), "1".into()))
        .match_body(Matcher::PartialJson(json!({
            "host_name": "gm-east.example.com",
            "platform": "VNIOS",
            "comment": "",
            "vpn_mtu": 1450,
            "extattrs": {},
            "vip_setting": {"address": "10.20.0.5", "primary": true, "dscp": 0},
            "lom_users": [{"name": "ops", "password": "S3cret!", "role": "USER"}]
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(json!({ "result": server_member() }).to_string())
        .create_async()
        .await;

    let created = resource
        .create(
            Context::new(),
            CreateResourceRequest {
                type_name: "nios_grid_member".to_string(),
                planned_state: plan.planned_state,
                config,
            },
        )
        .await;
    assert!(created.diagnostics.is_empty(), "{:?}", created.diagnostics.errors);
    create_mock.assert_async().await;

    let read_mock = server
        .mock("GET", member_path(MEMBER_REF))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "result": server_member() }).to_string())
        .create_async()
        .await;

    let read = resource
        .read(
            Context::new(),
            ReadResourceRequest {
                type_name: "nios_grid_member".to_string(),
                current_state: created.new_state.clone(),
            },
        )
        .await;
    read_mock.assert_async().await;

    // a refresh against an unchanged object yields the same state
    let refreshed = read.new_state.unwrap();
    assert_eq!(refreshed, created.new_state);

    let mut diags = Diagnostics::new();
    let state: MemberModel = decode_model(&refreshed, &mut diags).unwrap();
    assert_eq!(state.r#ref, Value::Known(MEMBER_REF.to_string()));
    assert_eq!(state.router_id, Value::Null);
    assert_eq!(state.threshold_traps.as_known().unwrap().len(), 1);
    let lom = state.lom_users.as_known().unwrap()[0].as_known().unwrap();
    assert_eq!(lom.password, Value::Known("S3cret!".to_string()));

    // planning the same config again shows no changes
    let replan = resource
        .plan(
            Context::new(),
            PlanResourceChangeRequest {
                type_name: "nios_grid_member".to_string(),
                config: member_config(),
                prior_state: refreshed.clone(),
            },
        )
        .await;
    assert!(replan.diagnostics.is_empty(), "{:?}", replan.diagnostics.errors);
    assert_eq!(replan.planned_state, refreshed);

    let delete_mock = server
        .mock("DELETE", member_path(MEMBER_REF))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!(MEMBER_REF).to_string())
        .create_async()
        .await;

    let deleted = resource
        .delete(
            Context::new(),
            DeleteResourceRequest {
                type_name: "nios_grid_member".to_string(),
                prior_state: refreshed,
            },
        )
        .await;
    assert!(deleted.diagnostics.is_empty());
    delete_mock.assert_async().await;
}

#[tokio::test]
async fn plan_keeps_ref_of_existing_member() {
    let server = Server::new_async().await;
    let provider = configured_provider(&server.url()).await;
    let resource = provider
        .create_resource(Context::new(), "nios_grid_member")
        .await
        .unwrap();

    let mut diags = Diagnostics::new();
    let mut prior: MemberModel = decode_model(&member_config(), &mut diags).unwrap();
    prior.r#ref = Value::Known(MEMBER_REF.to_string());

    let plan = resource
        .plan(
            Context::new(),
            PlanResourceChangeRequest {
                type_name: "nios_grid_member".to_string(),
                config: member_config(),
                prior_state: encode_model(&prior),
            },
        )
        .await;

    assert!(plan.diagnostics.is_empty());
    let planned: MemberModel = decode_model(&plan.planned_state, &mut diags).unwrap();
    assert_eq!(planned.r#ref, Value::Known(MEMBER_REF.to_string()));
}

#[tokio::test]
async fn changing_lom_password_is_refused_at_plan() {
    let server = Server::new_async().await;
    let provider = configured_provider(&server.url()).await;
    let resource = provider
        .create_resource(Context::new(), "nios_grid_member")
        .await
        .unwrap();

    let mut diags = Diagnostics::new();
    let mut config: MemberModel = decode_model(&member_config(), &mut diags).unwrap();
    let prior = encode_model(&MemberModel {
        r#ref: Value::Known(MEMBER_REF.to_string()),
        ..config.clone()
    });
    if let Some(users) = config.lom_users.as_known_mut() {
        users[0] = Value::Known(MemberLomUserModel {
            name: Value::Known("ops".to_string()),
            password: Value::Known("rotated".to_string()),
            ..Default::default()
        });
    }

    let plan = resource
        .plan(
            Context::new(),
            PlanResourceChangeRequest {
                type_name: "nios_grid_member".to_string(),
                config: encode_model(&config),
                prior_state: prior,
            },
        )
        .await;

    assert!(plan.diagnostics.has_error());
}
