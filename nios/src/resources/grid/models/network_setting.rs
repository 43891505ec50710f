use tfplug::defaults::StaticDefault;
use tfplug::flex;
use tfplug::schema::{Attribute, AttributeBuilder, AttributeType};
use tfplug::validator::{AlsoRequiresValidator, Ipv4AddressValidator, NumberRangeValidator};
use tfplug::{state_model, Diagnostics, Ipv4Address, ObjectMapper};

use crate::api::grid::MemberNetworkSetting;

state_model! {
    /// IPv4 network setting of `vip_setting` and `additional_ip_list[].ipv4_network_setting`
    pub struct MemberNetworkSettingModel {
        pub address: Ipv4Address => "address",
        pub gateway: String => "gateway",
        pub subnet_mask: String => "subnet_mask",
        pub vlan_id: i64 => "vlan_id",
        pub primary: bool => "primary",
        pub dscp: i64 => "dscp",
        pub lan_subnet_mask: String => "lan_subnet_mask",
        pub lan_gateway: String => "lan_gateway",
        pub use_dscp: bool => "use_dscp",
    }
}

pub fn network_setting_attributes() -> Vec<Attribute> {
    vec![
        AttributeBuilder::new("address", AttributeType::String)
            .description("The IPv4 Address of the Grid Member.")
            .optional()
            .computed()
            .validator(Ipv4AddressValidator::create())
            .build(),
        AttributeBuilder::new("gateway", AttributeType::String)
            .description("The default gateway for the Grid Member.")
            .optional()
            .computed()
            .build(),
        AttributeBuilder::new("subnet_mask", AttributeType::String)
            .description("The subnet mask for the Grid Member.")
            .optional()
            .computed()
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
        AttributeBuilder::new("lan_subnet_mask", AttributeType::String)
            .description("LAN netmask only for GCP HA.")
            .optional()
            .computed()
            .build(),
        AttributeBuilder::new("lan_gateway", AttributeType::String)
            .description("LAN gateway only for GCP HA.")
            .optional()
            .computed()
            .build(),
        use_dscp_attribute(),
    ]
}

/// `dscp` paired with the `use_dscp` override flag in the same object
pub fn dscp_attribute() -> Attribute {
    AttributeBuilder::new("dscp", AttributeType::Number)
        .description(
            "The DSCP (Differentiated Services Code Point) value. Valid values are from 0 to 63.",
        )
        .optional()
        .computed()
        .default(StaticDefault::int64(0))
        .validator(NumberRangeValidator::between(0.0, 63.0))
        // Sibling lookup: a nested `dscp` needs its own object's `use_dscp`,
        // not the member-level flag
        .validator(AlsoRequiresValidator::create(&["use_dscp"]))
        .build()
}

pub fn use_dscp_attribute() -> Attribute {
    AttributeBuilder::new("use_dscp", AttributeType::Bool)
        .description("Use flag for: dscp")
        .optional()
        .computed()
        .default(StaticDefault::bool(false))
        .build()
}

impl ObjectMapper for MemberNetworkSettingModel {
    type Wire = MemberNetworkSetting;

    fn expand(&self, _diags: &mut Diagnostics) -> Option<MemberNetworkSetting> {
        Some(MemberNetworkSetting {
            address: flex::expand_ipv4_address(&self.address),
            gateway: flex::expand_string(&self.gateway),
            subnet_mask: flex::expand_string(&self.subnet_mask),
            vlan_id: flex::expand_int64(&self.vlan_id),
            primary: flex::expand_bool(&self.primary),
            dscp: flex::expand_int64(&self.dscp),
            lan_subnet_mask: flex::expand_string(&self.lan_subnet_mask),
            lan_gateway: flex::expand_string(&self.lan_gateway),
            use_dscp: flex::expand_bool(&self.use_dscp),
        })
    }

    fn flatten(wire: &MemberNetworkSetting, _diags: &mut Diagnostics) -> Self {
        Self {
            address: flex::flatten_ipv4_address(wire.address.as_deref()),
            gateway: flex::flatten_string(wire.gateway.as_deref()),
            subnet_mask: flex::flatten_string(wire.subnet_mask.as_deref()),
            vlan_id: flex::flatten_int64(wire.vlan_id),
            primary: flex::flatten_bool(wire.primary),
            dscp: flex::flatten_int64(wire.dscp),
            lan_subnet_mask: flex::flatten_string(wire.lan_subnet_mask.as_deref()),
            lan_gateway: flex::flatten_string(wire.lan_gateway.as_deref()),
            use_dscp: flex::flatten_bool(wire.use_dscp),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tfplug::mapper::{encode_model, expand_object, flatten_object};
    use tfplug::{AttributePath, NestedType, SchemaBuilder, StateType, Value};

    fn vip_wire() -> MemberNetworkSetting {
        MemberNetworkSetting {
            address: Some("172.28.83.10".to_string()),
            gateway: Some("172.28.82.1".to_string()),
            subnet_mask: Some("255.255.254.0".to_string()),
            primary: Some(true),
            dscp: Some(0),
            use_dscp: Some(false),
            ..Default::default()
        }
    }

    #[test]
    fn schema_matches_model_shape() {
        assert_eq!(
            NestedType::single(network_setting_attributes()).attr_type(),
            MemberNetworkSettingModel::attr_type()
        );
    }

    #[test]
    fn round_trip_keeps_zero_dscp() {
        let mut diags = Diagnostics::new();
        let state = flatten_object::<MemberNetworkSettingModel>(Some(&vip_wire()), &mut diags);

        let model = state.as_known().unwrap();
        assert_eq!(model.dscp, Value::Known(0));
        assert_eq!(model.use_dscp, Value::Known(false));
        assert_eq!(model.vlan_id, Value::Null);

        let expanded = expand_object(&state, &mut diags).unwrap();
        assert_eq!(expanded, vip_wire());
        assert_eq!(
            flatten_object::<MemberNetworkSettingModel>(Some(&expanded), &mut diags),
            state
        );
    }

    #[test]
    fn dscp_requires_use_dscp() {
        let schema = SchemaBuilder::new()
            .attributes(network_setting_attributes())
            .build();
        let config = encode_model(&MemberNetworkSettingModel {
            dscp: Value::Known(12),
            ..Default::default()
        });

        let diags = schema.validate(&config);
        assert_eq!(diags.error_count(), 1);
        assert_eq!(diags.errors[0].summary, "Invalid Attribute Combination");
        assert_eq!(diags.errors[0].attribute, Some(AttributePath::new("dscp")));
    }

    #[test]
    fn bad_address_and_vlan_are_rejected() {
        let schema = SchemaBuilder::new()
            .attributes(network_setting_attributes())
            .build();
        let config = encode_model(&MemberNetworkSettingModel {
            address: Value::Known(Ipv4Address::from("172.28.83.300")),
            vlan_id: Value::Known(0),
            ..Default::default()
        });

        assert_eq!(schema.validate(&config).error_count(), 2);
    }
}
