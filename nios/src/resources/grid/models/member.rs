use std::collections::HashMap;
use std::sync::Arc;

use tfplug::defaults::StaticDefault;
use tfplug::flex;
use tfplug::mapper::{expand_object, expand_object_list, flatten_object, flatten_object_list};
use tfplug::plan_modifier::UseStateForUnknown;
use tfplug::schema::{Attribute, AttributeBuilder, AttributeType};
use tfplug::validator::{
    AlsoRequiresValidator, NumberRangeValidator, OneOfValidator, StringLengthValidator,
    TrimmedStringValidator,
};
use tfplug::{state_model, Diagnostics, Dynamic, NestedType, ObjectMapper, Schema, SchemaBuilder, Value};

use super::additional_ip::{additional_ip_attributes, MemberAdditionalIpModel};
use super::ext_attrs::{expand_ext_attrs, flatten_ext_attrs};
use super::ipv6_setting::{ipv6_setting_attributes, MemberIpv6SettingModel};
use super::lom_user::{lom_user_attributes, MemberLomUserModel};
use super::network_setting::{
    dscp_attribute, network_setting_attributes, use_dscp_attribute, MemberNetworkSettingModel,
};
use super::pre_provisioning::{pre_provisioning_attributes, MemberPreProvisioningModel};
use super::snmp_setting::{snmp_setting_attributes, MemberSnmpSettingModel};
use super::threshold_trap::{threshold_trap_attributes, MemberThresholdTrapModel};
use crate::api::grid::Member;

state_model! {
    /// State of the `nios_grid_member` resource
    pub struct MemberModel {
        pub r#ref: String => "ref",
        pub host_name: String => "host_name",
        pub comment: String => "comment",
        pub config_addr_type: String => "config_addr_type",
        pub platform: String => "platform",
        pub service_type_configuration: String => "service_type_configuration",
        pub enable_ha: bool => "enable_ha",
        pub master_candidate: bool => "master_candidate",
        pub upgrade_group: String => "upgrade_group",
        pub time_zone: String => "time_zone",
        pub use_time_zone: bool => "use_time_zone",
        pub dscp: i64 => "dscp",
        pub use_dscp: bool => "use_dscp",
        pub enable_lom: bool => "enable_lom",
        pub use_enable_lom: bool => "use_enable_lom",
        pub use_snmp_setting: bool => "use_snmp_setting",
        pub use_threshold_traps: bool => "use_threshold_traps",
        pub router_id: i64 => "router_id",
        pub vpn_mtu: i64 => "vpn_mtu",
        pub syslog_size: i64 => "syslog_size",
        pub csp_access_key: Vec<Value<String>> => "csp_access_key",
        pub extattrs: HashMap<String, Value<String>> => "extattrs",
        pub lom_users: Vec<Value<MemberLomUserModel>> => "lom_users",
        pub threshold_traps: Vec<Value<MemberThresholdTrapModel>> => "threshold_traps",
        pub vip_setting: MemberNetworkSettingModel => "vip_setting",
        pub ipv6_setting: MemberIpv6SettingModel => "ipv6_setting",
        pub additional_ip_list: Vec<Value<MemberAdditionalIpModel>> => "additional_ip_list",
        pub pre_provisioning: MemberPreProvisioningModel => "pre_provisioning",
        pub snmp_setting: MemberSnmpSettingModel => "snmp_setting",
    }
}

fn flag(name: &str, description: &str) -> AttributeBuilder {
    AttributeBuilder::new(name, AttributeType::Bool)
        .description(description)
        .optional()
        .computed()
        .default(StaticDefault::bool(false))
}

fn one_of(name: &str, description: &str, default: &str, values: &[&str]) -> Attribute {
    AttributeBuilder::new(name, AttributeType::String)
        .description(description)
        .optional()
        .computed()
        .default(StaticDefault::string(default))
        .validator(OneOfValidator::create(values))
        .build()
}

pub fn member_attributes() -> Vec<Attribute> {
    vec![
        AttributeBuilder::new("ref", AttributeType::String)
            .description("The reference to the object.")
            .computed()
            .plan_modifier(Arc::new(UseStateForUnknown))
            .build(),
        AttributeBuilder::new("host_name", AttributeType::String)
            .description("The host name of the Grid member.")
            .required()
            .validator(TrimmedStringValidator::create())
            .build(),
        AttributeBuilder::new("comment", AttributeType::String)
            .description("A descriptive comment of the Grid member.")
            .optional()
            .computed()
            .default(StaticDefault::string(""))
            .validator(StringLengthValidator::between(0, 256))
            .validator(TrimmedStringValidator::create())
            .build(),
        one_of(
            "config_addr_type",
            "Address configuration type.",
            "IPV4",
            &["BOTH", "IPV4", "IPV6"],
        ),
        one_of(
            "platform",
            "Hardware Platform.",
            "INFOBLOX",
            &["CISCO", "IBVM", "INFOBLOX", "RIVERBED", "VNIOS"],
        ),
        one_of(
            "service_type_configuration",
            "Configure all services to the given type.",
            "ALL_V4",
            &["ALL_V4", "ALL_V6", "CUSTOM"],
        ),
        flag("enable_ha", "If set to True, the member has two physical nodes (HA pair).").build(),
        flag(
            "master_candidate",
            "Determines if a Grid member is a Grid Master Candidate or not.",
        )
        .build(),
        AttributeBuilder::new("upgrade_group", AttributeType::String)
            .description("The name of the upgrade group to which this Grid member belongs.")
            .optional()
            .computed()
            .default(StaticDefault::string("Default"))
            .build(),
        AttributeBuilder::new("time_zone", AttributeType::String)
            .description("The time zone of the Grid member.")
            .optional()
            .computed()
            .validator(AlsoRequiresValidator::create(&["use_time_zone"]))
            .build(),
        flag("use_time_zone", "Use flag for: time_zone").build(),
        dscp_attribute(),
        use_dscp_attribute(),
        flag(
            "enable_lom",
            "Determines if the LOM functionality is enabled or not.",
        )
        .validator(AlsoRequiresValidator::create(&["use_enable_lom"]))
        .build(),
        flag("use_enable_lom", "Use flag for: enable_lom").build(),
        flag("use_snmp_setting", "Use flag for: snmp_setting").build(),
        flag("use_threshold_traps", "Use flag for: threshold_traps").build(),
        AttributeBuilder::new("router_id", AttributeType::Number)
            .description("Virtual router identifier. Valid values are from 1 to 255.")
            .optional()
            .validator(NumberRangeValidator::between(1.0, 255.0))
            .build(),
        AttributeBuilder::new("vpn_mtu", AttributeType::Number)
            .description("The VPN maximum transmission unit (MTU).")
            .optional()
            .computed()
            .default(StaticDefault::int64(1450))
            .build(),
        AttributeBuilder::new("syslog_size", AttributeType::Number)
            .description("The maximum size for the syslog file expressed in megabytes.")
            .optional()
            .computed()
            .default(StaticDefault::int64(300))
            .build(),
        AttributeBuilder::new("csp_access_key", AttributeType::list(AttributeType::String))
            .description("CSP portal on-prem host access key")
            .optional()
            .computed()
            .build(),
        AttributeBuilder::new("extattrs", AttributeType::map(AttributeType::String))
            .description("Extensible attributes associated with the object.")
            .optional()
            .computed()
            .default(StaticDefault::create(Dynamic::Map(HashMap::new())))
            .build(),
        AttributeBuilder::nested("lom_users", NestedType::list(lom_user_attributes()))
            .description("The list of LOM users.")
            .optional()
            .computed()
            .build(),
        AttributeBuilder::nested(
            "threshold_traps",
            NestedType::list(threshold_trap_attributes()),
        )
        .description("Determines the list of threshold traps.")
        .optional()
        .computed()
        .validator(AlsoRequiresValidator::create(&["use_threshold_traps"]))
        .build(),
        AttributeBuilder::nested(
            "vip_setting",
            NestedType::single(network_setting_attributes()),
        )
        .description("The network settings for the Grid member.")
        .optional()
        .computed()
        .build(),
        AttributeBuilder::nested("ipv6_setting", NestedType::single(ipv6_setting_attributes()))
            .description("IPv6 network settings for the Grid member.")
            .optional()
            .computed()
            .build(),
        AttributeBuilder::nested(
            "additional_ip_list",
            NestedType::list(additional_ip_attributes()),
        )
        .description("The additional IP list of a Grid member.")
        .optional()
        .computed()
        .build(),
        AttributeBuilder::nested(
            "pre_provisioning",
            NestedType::single(pre_provisioning_attributes()),
        )
        .description("Pre-provisioning information.")
        .optional()
        .build(),
        AttributeBuilder::nested("snmp_setting", NestedType::single(snmp_setting_attributes()))
            .description("The Grid Member SNMP settings.")
            .optional()
            .computed()
            .validator(AlsoRequiresValidator::create(&["use_snmp_setting"]))
            .build(),
    ]
}

pub fn member_schema() -> Schema {
    SchemaBuilder::new()
        .version(0)
        .description("Manages a NIOS Grid Member.")
        .attributes(member_attributes())
        .build()
}

impl ObjectMapper for MemberModel {
    type Wire = Member;

    fn expand(&self, diags: &mut Diagnostics) -> Option<Member> {
        Some(Member {
            r#ref: flex::expand_string(&self.r#ref),
            host_name: flex::expand_string(&self.host_name),
            comment: flex::expand_string(&self.comment),
            config_addr_type: flex::expand_string(&self.config_addr_type),
            platform: flex::expand_string(&self.platform),
            service_type_configuration: flex::expand_string(&self.service_type_configuration),
            enable_ha: flex::expand_bool(&self.enable_ha),
            master_candidate: flex::expand_bool(&self.master_candidate),
            upgrade_group: flex::expand_string(&self.upgrade_group),
            time_zone: flex::expand_string(&self.time_zone),
            use_time_zone: flex::expand_bool(&self.use_time_zone),
            dscp: flex::expand_int64(&self.dscp),
            use_dscp: flex::expand_bool(&self.use_dscp),
            enable_lom: flex::expand_bool(&self.enable_lom),
            use_enable_lom: flex::expand_bool(&self.use_enable_lom),
            use_snmp_setting: flex::expand_bool(&self.use_snmp_setting),
            use_threshold_traps: flex::expand_bool(&self.use_threshold_traps),
            router_id: flex::expand_int64(&self.router_id),
            vpn_mtu: flex::expand_int64(&self.vpn_mtu),
            syslog_size: flex::expand_int64(&self.syslog_size),
            csp_access_key: flex::expand_string_list(&self.csp_access_key),
            extattrs: expand_ext_attrs(&self.extattrs),
            lom_users: expand_object_list(&self.lom_users, diags),
            threshold_traps: expand_object_list(&self.threshold_traps, diags),
            vip_setting: expand_object(&self.vip_setting, diags),
            ipv6_setting: expand_object(&self.ipv6_setting, diags),
            additional_ip_list: expand_object_list(&self.additional_ip_list, diags),
            pre_provisioning: expand_object(&self.pre_provisioning, diags),
            snmp_setting: expand_object(&self.snmp_setting, diags),
        })
    }

    fn flatten(wire: &Member, diags: &mut Diagnostics) -> Self {
        Self {
            r#ref: flex::flatten_string(wire.r#ref.as_deref()),
            host_name: flex::flatten_string(wire.host_name.as_deref()),
            comment: flex::flatten_string(wire.comment.as_deref()),
            config_addr_type: flex::flatten_string(wire.config_addr_type.as_deref()),
            platform: flex::flatten_string(wire.platform.as_deref()),
            service_type_configuration: flex::flatten_string(
                wire.service_type_configuration.as_deref(),
            ),
            enable_ha: flex::flatten_bool(wire.enable_ha),
            master_candidate: flex::flatten_bool(wire.master_candidate),
            upgrade_group: flex::flatten_string(wire.upgrade_group.as_deref()),
            time_zone: flex::flatten_string(wire.time_zone.as_deref()),
            use_time_zone: flex::flatten_bool(wire.use_time_zone),
            dscp: flex::flatten_int64(wire.dscp),
            use_dscp: flex::flatten_bool(wire.use_dscp),
            enable_lom: flex::flatten_bool(wire.enable_lom),
            use_enable_lom: flex::flatten_bool(wire.use_enable_lom),
            use_snmp_setting: flex::flatten_bool(wire.use_snmp_setting),
            use_threshold_traps: flex::flatten_bool(wire.use_threshold_traps),
            router_id: flex::flatten_int64(wire.router_id),
            vpn_mtu: flex::flatten_int64(wire.vpn_mtu),
            syslog_size: flex::flatten_int64(wire.syslog_size),
            csp_access_key: flex::flatten_string_list(wire.csp_access_key.as_deref()),
            extattrs: flatten_ext_attrs(wire.extattrs.as_ref(), diags),
            lom_users: flatten_object_list(wire.lom_users.as_deref(), diags),
            threshold_traps: flatten_object_list(wire.threshold_traps.as_deref(), diags),
            vip_setting: flatten_object(wire.vip_setting.as_ref(), diags),
            ipv6_setting: flatten_object(wire.ipv6_setting.as_ref(), diags),
            additional_ip_list: flatten_object_list(wire.additional_ip_list.as_deref(), diags),
            pre_provisioning: flatten_object(wire.pre_provisioning.as_ref(), diags),
            snmp_setting: flatten_object(wire.snmp_setting.as_ref(), diags),
        }
    }
}
