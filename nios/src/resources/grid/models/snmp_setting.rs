use tfplug::defaults::StaticDefault;
use tfplug::flex;
use tfplug::mapper::{expand_object_list, flatten_object_list};
use tfplug::schema::{Attribute, AttributeBuilder, AttributeType};
use tfplug::validator::{StringLengthValidator, TrimmedStringValidator};
use tfplug::{state_model, Diagnostics, NestedType, ObjectMapper, Value};

use crate::api::grid::{MemberSnmpSetting, MemberSnmpTrapReceiver};

state_model! {
    pub struct MemberSnmpTrapReceiverModel {
        pub address: String => "address",
        pub user: String => "user",
        pub comment: String => "comment",
    }
}

state_model! {
    /// `engine_id` is server-generated and never part of the state.
    pub struct MemberSnmpSettingModel {
        pub queries_community_string: String => "queries_community_string",
        pub queries_enable: bool => "queries_enable",
        pub snmpv3_queries_enable: bool => "snmpv3_queries_enable",
        pub snmpv3_traps_enable: bool => "snmpv3_traps_enable",
        pub syscontact: Vec<Value<String>> => "syscontact",
        pub sysdescr: Vec<Value<String>> => "sysdescr",
        pub syslocation: Vec<Value<String>> => "syslocation",
        pub sysname: Vec<Value<String>> => "sysname",
        pub trap_receivers: Vec<Value<MemberSnmpTrapReceiverModel>> => "trap_receivers",
        pub traps_community_string: String => "traps_community_string",
        pub traps_enable: bool => "traps_enable",
    }
}

pub fn trap_receiver_attributes() -> Vec<Attribute> {
    vec![
        AttributeBuilder::new("address", AttributeType::String)
            .description("The address of the trap receiver.")
            .optional()
            .computed()
            .build(),
        AttributeBuilder::new("user", AttributeType::String)
            .description("The SNMPv3 user for this trap receiver.")
            .optional()
            .computed()
            .build(),
        AttributeBuilder::new("comment", AttributeType::String)
            .description("A descriptive comment for this trap receiver.")
            .optional()
            .computed()
            .default(StaticDefault::string(""))
            .validator(StringLengthValidator::between(0, 256))
            .validator(TrimmedStringValidator::create())
            .build(),
    ]
}

fn string_list(name: &str, description: &str) -> Attribute {
    AttributeBuilder::new(name, AttributeType::list(AttributeType::String))
        .description(description)
        .optional()
        .computed()
        .build()
}

fn enable_flag(name: &str, description: &str) -> Attribute {
    AttributeBuilder::new(name, AttributeType::Bool)
        .description(description)
        .optional()
        .computed()
        .default(StaticDefault::bool(false))
        .build()
}

pub fn snmp_setting_attributes() -> Vec<Attribute> {
    vec![
        AttributeBuilder::new("queries_community_string", AttributeType::String)
            .description("The community string for SNMP queries.")
            .optional()
            .computed()
            .sensitive()
            .build(),
        enable_flag(
            "queries_enable",
            "If set to True, SNMP queries are enabled.",
        ),
        enable_flag(
            "snmpv3_queries_enable",
            "If set to True, SNMPv3 queries are enabled.",
        ),
        enable_flag(
            "snmpv3_traps_enable",
            "If set to True, SNMPv3 traps are enabled.",
        ),
        string_list("syscontact", "The name of the contact person for the appliance."),
        string_list("sysdescr", "Useful information about the appliance."),
        string_list("syslocation", "The physical location of the appliance."),
        string_list("sysname", "The FQDN (Fully Qualified Domain Name) of the appliance."),
        AttributeBuilder::nested(
            "trap_receivers",
            NestedType::list(trap_receiver_attributes()),
        )
        .description("A list of SNMP trap receivers.")
        .optional()
        .computed()
        .build(),
        AttributeBuilder::new("traps_community_string", AttributeType::String)
            .description("A string the NIOS appliance sends to the management system together with its traps.")
            .optional()
            .computed()
            .sensitive()
            .build(),
        enable_flag("traps_enable", "If set to True, SNMP traps are enabled."),
    ]
}

impl ObjectMapper for MemberSnmpTrapReceiverModel {
    type Wire = MemberSnmpTrapReceiver;

    fn expand(&self, _diags: &mut Diagnostics) -> Option<MemberSnmpTrapReceiver> {
        Some(MemberSnmpTrapReceiver {
            address: flex::expand_string(&self.address),
            user: flex::expand_string(&self.user),
            comment: flex::expand_string(&self.comment),
        })
    }

    fn flatten(wire: &MemberSnmpTrapReceiver, _diags: &mut Diagnostics) -> Self {
        Self {
            address: flex::flatten_string(wire.address.as_deref()),
            user: flex::flatten_string(wire.user.as_deref()),
            comment: flex::flatten_string(wire.comment.as_deref()),
        }
    }
}

impl ObjectMapper for MemberSnmpSettingModel {
    type Wire = MemberSnmpSetting;

    fn expand(&self, diags: &mut Diagnostics) -> Option<MemberSnmpSetting> {
        Some(MemberSnmpSetting {
            engine_id: None,
            queries_community_string: flex::expand_string(&self.queries_community_string),
            queries_enable: flex::expand_bool(&self.queries_enable),
            snmpv3_queries_enable: flex::expand_bool(&self.snmpv3_queries_enable),
            snmpv3_traps_enable: flex::expand_bool(&self.snmpv3_traps_enable),
            syscontact: flex::expand_string_list(&self.syscontact),
            sysdescr: flex::expand_string_list(&self.sysdescr),
            syslocation: flex::expand_string_list(&self.syslocation),
            sysname: flex::expand_string_list(&self.sysname),
            trap_receivers: expand_object_list(&self.trap_receivers, diags),
            traps_community_string: flex::expand_string(&self.traps_community_string),
            traps_enable: flex::expand_bool(&self.traps_enable),
        })
    }

    fn flatten(wire: &MemberSnmpSetting, diags: &mut Diagnostics) -> Self {
        Self {
            queries_community_string: flex::flatten_string(
                wire.queries_community_string.as_deref(),
            ),
            queries_enable: flex::flatten_bool(wire.queries_enable),
            snmpv3_queries_enable: flex::flatten_bool(wire.snmpv3_queries_enable),
            snmpv3_traps_enable: flex::flatten_bool(wire.snmpv3_traps_enable),
            syscontact: flex::flatten_string_list(wire.syscontact.as_deref()),
            sysdescr: flex::flatten_string_list(wire.sysdescr.as_deref()),
            syslocation: flex::flatten_string_list(wire.syslocation.as_deref()),
            sysname: flex::flatten_string_list(wire.sysname.as_deref()),
            trap_receivers: flatten_object_list(wire.trap_receivers.as_deref(), diags),
            traps_community_string: flex::flatten_string(wire.traps_community_string.as_deref()),
            traps_enable: flex::flatten_bool(wire.traps_enable),
        }
    }
}
