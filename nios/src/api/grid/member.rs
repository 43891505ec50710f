//! Grid member (`member` object) API implementation

use super::super::common::{ApiQueryParams, ObjectRef, WapiObject};
use super::super::{ApiError, Client};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Grid member as sent to and returned by the WAPI
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Member {
    #[serde(rename = "_ref", skip_serializing_if = "Option::is_none")]
    pub r#ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_addr_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_type_configuration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_ha: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub master_candidate: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upgrade_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_time_zone: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dscp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_dscp: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_lom: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_enable_lom: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_snmp_setting: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_threshold_traps: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub router_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpn_mtu: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub syslog_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csp_access_key: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extattrs: Option<HashMap<String, ExtAttr>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lom_users: Option<Vec<MemberLomUser>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold_traps: Option<Vec<MemberThresholdTrap>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vip_setting: Option<MemberNetworkSetting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv6_setting: Option<MemberIpv6Setting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_ip_list: Option<Vec<MemberAdditionalIp>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_provisioning: Option<MemberPreProvisioning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snmp_setting: Option<MemberSnmpSetting>,
}

/// Extensible attribute value, `{"value": ...}` on the wire
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExtAttr {
    pub value: serde_json::Value,
}

/// Lights-out management user. The password is write-only.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MemberLomUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MemberThresholdTrap {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trap_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trap_reset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trap_trigger: Option<i64>,
}

/// IPv4 network setting, used for `vip_setting` and additional IPs
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MemberNetworkSetting {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet_mask: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vlan_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dscp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lan_subnet_mask: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lan_gateway: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_dscp: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MemberIpv6Setting {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtual_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cidr_prefix: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_router_config_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vlan_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dscp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_dscp: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MemberAdditionalIp {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anycast: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv4_network_setting: Option<MemberNetworkSetting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_bgp: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_ospf: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MemberPreProvisioning {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardware_info: Option<Vec<MemberHardwareInfo>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub licenses: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MemberHardwareInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hwtype: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MemberSnmpSetting {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_id: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queries_community_string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queries_enable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snmpv3_queries_enable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snmpv3_traps_enable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub syscontact: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sysdescr: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub syslocation: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sysname: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trap_receivers: Option<Vec<MemberSnmpTrapReceiver>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traps_community_string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traps_enable: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MemberSnmpTrapReceiver {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl WapiObject for Member {
    fn object_type() -> &'static str {
        "member"
    }

    fn return_fields() -> &'static [&'static str] {
        &[
            "host_name",
            "comment",
            "config_addr_type",
            "platform",
            "service_type_configuration",
            "enable_ha",
            "master_candidate",
            "upgrade_group",
            "time_zone",
            "use_time_zone",
            "dscp",
            "use_dscp",
            "enable_lom",
            "use_enable_lom",
            "use_snmp_setting",
            "use_threshold_traps",
            "router_id",
            "vpn_mtu",
            "syslog_size",
            "csp_access_key",
            "extattrs",
            "lom_users",
            "threshold_traps",
            "vip_setting",
            "ipv6_setting",
            "additional_ip_list",
            "pre_provisioning",
            "snmp_setting",
        ]
    }
}

/// Member API for grid member operations
pub struct MemberApi<'a> {
    client: &'a Client,
}

impl<'a> MemberApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// POST /member
    pub async fn create(&self, member: &Member) -> Result<Member, ApiError> {
        self.client
            .post(
                &Member::object_path(),
                &ApiQueryParams::for_object::<Member>(),
                member,
            )
            .await
    }

    /// GET /{ref}
    pub async fn get(&self, r#ref: &str) -> Result<Member, ApiError> {
        self.client
            .get(
                &Member::resource_path(r#ref),
                &ApiQueryParams::for_object::<Member>(),
            )
            .await
    }

    /// PUT /{ref}
    pub async fn update(&self, r#ref: &str, member: &Member) -> Result<Member, ApiError> {
        self.client
            .put(
                &Member::resource_path(r#ref),
                &ApiQueryParams::for_object::<Member>(),
                member,
            )
            .await
    }

    /// DELETE /{ref}, returns the deleted reference
    pub async fn delete(&self, r#ref: &str) -> Result<String, ApiError> {
        let deleted: ObjectRef = self.client.delete(&Member::resource_path(r#ref)).await?;
        Ok(deleted.0)
    }
}

#[cfg(test)]
#[path = "./member_test.rs"]
mod member_test;
