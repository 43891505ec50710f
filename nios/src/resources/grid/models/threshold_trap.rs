use tfplug::flex;
use tfplug::schema::{Attribute, AttributeBuilder, AttributeType};
use tfplug::validator::OneOfValidator;
use tfplug::{state_model, Diagnostics, ObjectMapper};

use crate::api::grid::MemberThresholdTrap;

pub const TRAP_TYPES: &[&str] = &[
    "CpuUsage",
    "DBObjects",
    "Disk",
    "ExtStorage",
    "FDUsage",
    "FastpathDroppedTraffic",
    "Fastpathmbuffdepletion",
    "IPAMUtilization",
    "Memory",
    "NetworkCapacity",
    "RPZHitRate",
    "RecursiveClients",
    "Reporting",
    "ReportingVolume",
    "Rootfs",
    "SwapUsage",
    "TcpUdpFloodAlertRate",
    "TcpUdpFloodDropRate",
    "ThreatProtectionDroppedTraffic",
    "ThreatProtectionTotalTraffic",
    "Tmpfs",
];

state_model! {
    pub struct MemberThresholdTrapModel {
        pub trap_type: String => "trap_type",
        pub trap_reset: i64 => "trap_reset",
        pub trap_trigger: i64 => "trap_trigger",
    }
}

/// `trap_reset` and `trap_trigger` have per-type server defaults, so they
/// are left computed without a static default.
pub fn threshold_trap_attributes() -> Vec<Attribute> {
    vec![
        AttributeBuilder::new("trap_type", AttributeType::String)
            .description("Determines the type of a given trap.")
            .optional()
            .computed()
            .validator(OneOfValidator::create(TRAP_TYPES))
            .build(),
        AttributeBuilder::new("trap_reset", AttributeType::Number)
            .description("Determines the threshold value to reset the trap.")
            .optional()
            .computed()
            .build(),
        AttributeBuilder::new("trap_trigger", AttributeType::Number)
            .description("Determines the threshold value to trigger the trap.")
            .optional()
            .computed()
            .build(),
    ]
}

impl ObjectMapper for MemberThresholdTrapModel {
    type Wire = MemberThresholdTrap;

    fn expand(&self, _diags: &mut Diagnostics) -> Option<MemberThresholdTrap> {
        Some(MemberThresholdTrap {
            trap_type: flex::expand_string(&self.trap_type),
            trap_reset: flex::expand_int64(&self.trap_reset),
            trap_trigger: flex::expand_int64(&self.trap_trigger),
        })
    }

    fn flatten(wire: &MemberThresholdTrap, _diags: &mut Diagnostics) -> Self {
        Self {
            trap_type: flex::flatten_string(wire.trap_type.as_deref()),
            trap_reset: flex::flatten_int64(wire.trap_reset),
            trap_trigger: flex::flatten_int64(wire.trap_trigger),
        }
    }
}
