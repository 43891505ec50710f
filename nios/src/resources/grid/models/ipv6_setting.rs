use tfplug::defaults::StaticDefault;
use tfplug::flex;
use tfplug::schema::{Attribute, AttributeBuilder, AttributeType};
use tfplug::validator::NumberRangeValidator;
use tfplug::{state_model, Diagnostics, ObjectMapper};

use super::network_setting::{dscp_attribute, use_dscp_attribute};
use crate::api::grid::MemberIpv6Setting;

state_model! {
    pub struct MemberIpv6SettingModel {
        pub virtual_ip: String => "virtual_ip",
        pub cidr_prefix: i64 => "cidr_prefix",
        pub gateway: String => "gateway",
        pub enabled: bool => "enabled",
        pub auto_router_config_enabled: bool => "auto_router_config_enabled",
        pub vlan_id: i64 => "vlan_id",
        pub primary: bool => "primary",
        pub dscp: i64 => "dscp",
        pub use_dscp: bool => "use_dscp",
    }
}

pub fn ipv6_setting_attributes() -> Vec<Attribute> {
    vec![
        AttributeBuilder::new("virtual_ip", AttributeType::String)
            .description("IPv6 address.")
            .optional()
            .computed()
            .build(),
        AttributeBuilder::new("cidr_prefix", AttributeType::Number)
            .description("IPv6 CIDR prefix.")
            .optional()
            .computed()
            .validator(NumberRangeValidator::between(0.0, 128.0))
            .build(),
        AttributeBuilder::new("gateway", AttributeType::String)
            .description("Gateway address.")
            .optional()
            .computed()
            .build(),
        AttributeBuilder::new("enabled", AttributeType::Bool)
            .description("Determines if IPv6 networking should be enabled.")
            .optional()
            .computed()
            .default(StaticDefault::bool(false))
            .build(),
        AttributeBuilder::new("auto_router_config_enabled", AttributeType::Bool)
            .description("Determines if automatic router configuration should be enabled.")
            .optional()
            .computed()
            .default(StaticDefault::bool(false))
            .build(),
        AttributeBuilder::new("vlan_id", AttributeType::Number)
            .description("The identifier for the VLAN. Valid values are from 1 to 4096.")
            .optional()
            .validator(NumberRangeValidator::between(1.0, 4096.0))
            .build(),
        AttributeBuilder::new("primary", AttributeType::Bool)
            .description("Determines if the current address is the primary VLAN address or not.")
            .optional()
            .computed()
            .default(StaticDefault::bool(true))
            .build(),
        dscp_attribute(),
        use_dscp_attribute(),
    ]
}

impl ObjectMapper for MemberIpv6SettingModel {
    type Wire = MemberIpv6Setting;

    fn expand(&self, _diags: &mut Diagnostics) -> Option<MemberIpv6Setting> {
        Some(MemberIpv6Setting {
            virtual_ip: flex::expand_string(&self.virtual_ip),
            cidr_prefix: flex::expand_int64(&self.cidr_prefix),
            gateway: flex::expand_string(&self.gateway),
            enabled: flex::expand_bool(&self.enabled),
            auto_router_config_enabled: flex::expand_bool(&self.auto_router_config_enabled),
            vlan_id: flex::expand_int64(&self.vlan_id),
            primary: flex::expand_bool(&self.primary),
            dscp: flex::expand_int64(&self.dscp),
            use_dscp: flex::expand_bool(&self.use_dscp),
        })
    }

    fn flatten(wire: &MemberIpv6Setting, _diags: &mut Diagnostics) -> Self {
        Self {
            virtual_ip: flex::flatten_string(wire.virtual_ip.as_deref()),
            cidr_prefix: flex::flatten_int64(wire.cidr_prefix),
            gateway: flex::flatten_string(wire.gateway.as_deref()),
            enabled: flex::flatten_bool(wire.enabled),
            auto_router_config_enabled: flex::flatten_bool(wire.auto_router_config_enabled),
            vlan_id: flex::flatten_int64(wire.vlan_id),
            primary: flex::flatten_bool(wire.primary),
            dscp: flex::flatten_int64(wire.dscp),
            use_dscp: flex::flatten_bool(wire.use_dscp),
        }
    }
}
