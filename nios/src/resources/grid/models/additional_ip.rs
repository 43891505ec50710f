use tfplug::defaults::StaticDefault;
use tfplug::flex;
use tfplug::mapper::{expand_object, flatten_object};
use tfplug::schema::{Attribute, AttributeBuilder, AttributeType};
use tfplug::validator::{OneOfValidator, StringLengthValidator, TrimmedStringValidator};
use tfplug::{state_model, Diagnostics, NestedType, ObjectMapper};

use super::network_setting::{network_setting_attributes, MemberNetworkSettingModel};
use crate::api::grid::MemberAdditionalIp;

state_model! {
    /// One entry of `additional_ip_list`
    pub struct MemberAdditionalIpModel {
        pub anycast: bool => "anycast",
        pub ipv4_network_setting: MemberNetworkSettingModel => "ipv4_network_setting",
        pub comment: String => "comment",
        pub enable_bgp: bool => "enable_bgp",
        pub enable_ospf: bool => "enable_ospf",
        pub interface: String => "interface",
    }
}

pub fn additional_ip_attributes() -> Vec<Attribute> {
    vec![
        AttributeBuilder::new("anycast", AttributeType::Bool)
            .description("Determines if anycast for the Interface object is enabled or not.")
            .optional()
            .computed()
            .default(StaticDefault::bool(false))
            .build(),
        AttributeBuilder::nested(
            "ipv4_network_setting",
            NestedType::single(network_setting_attributes()),
        )
        .description("The IPv4 network settings of the interface.")
        .optional()
        .computed()
        .build(),
        AttributeBuilder::new("comment", AttributeType::String)
            .description("A descriptive comment of this structure.")
            .optional()
            .computed()
            .default(StaticDefault::string(""))
            .validator(StringLengthValidator::between(0, 256))
            .validator(TrimmedStringValidator::create())
            .build(),
        AttributeBuilder::new("enable_bgp", AttributeType::Bool)
            .description("Determines if the BGP advertisement setting is enabled for this interface or not.")
            .optional()
            .computed()
            .default(StaticDefault::bool(false))
            .build(),
        AttributeBuilder::new("enable_ospf", AttributeType::Bool)
            .description("Determines if the OSPF advertisement setting is enabled for this interface or not.")
            .optional()
            .computed()
            .default(StaticDefault::bool(false))
            .build(),
        AttributeBuilder::new("interface", AttributeType::String)
            .description("The interface type for the Interface object.")
            .optional()
            .computed()
            .validator(OneOfValidator::create(&["LAN2", "LAN_HA", "LOOPBACK", "MGMT"]))
            .build(),
    ]
}

impl ObjectMapper for MemberAdditionalIpModel {
    type Wire = MemberAdditionalIp;

    fn expand(&self, diags: &mut Diagnostics) -> Option<MemberAdditionalIp> {
        Some(MemberAdditionalIp {
            anycast: flex::expand_bool(&self.anycast),
            ipv4_network_setting: expand_object(&self.ipv4_network_setting, diags),
            comment: flex::expand_string(&self.comment),
            enable_bgp: flex::expand_bool(&self.enable_bgp),
            enable_ospf: flex::expand_bool(&self.enable_ospf),
            interface: flex::expand_string(&self.interface),
        })
    }

    fn flatten(wire: &MemberAdditionalIp, diags: &mut Diagnostics) -> Self {
        Self {
            anycast: flex::flatten_bool(wire.anycast),
            ipv4_network_setting: flatten_object(wire.ipv4_network_setting.as_ref(), diags),
            comment: flex::flatten_string(wire.comment.as_deref()),
            enable_bgp: flex::flatten_bool(wire.enable_bgp),
            enable_ospf: flex::flatten_bool(wire.enable_ospf),
            interface: flex::flatten_string(wire.interface.as_deref()),
        }
    }
}
