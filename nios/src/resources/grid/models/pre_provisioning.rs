use tfplug::flex;
use tfplug::mapper::{expand_object_list, flatten_object_list};
use tfplug::schema::{Attribute, AttributeBuilder, AttributeType};
use tfplug::validator::{ListLengthValidator, OneOfValidator};
use tfplug::{state_model, Diagnostics, NestedType, ObjectMapper, Value};

use crate::api::grid::{MemberHardwareInfo, MemberPreProvisioning};

pub const HARDWARE_TYPES: &[&str] = &[
    "CP-V1405", "CP-V2205", "CP-V805", "IB-1415", "IB-1425", "IB-1516", "IB-1526", "IB-2215",
    "IB-2225", "IB-2326", "IB-4015", "IB-4025", "IB-4126", "IB-815", "IB-825", "IB-926",
    "IB-FLEX", "IB-V1415", "IB-V1425", "IB-V1516", "IB-V1526", "IB-V2215", "IB-V2225",
    "IB-V2326", "IB-V4015", "IB-V4025", "IB-V4126", "IB-V815", "IB-V825", "IB-V926",
];

state_model! {
    pub struct MemberHardwareInfoModel {
        pub hwtype: String => "hwtype",
    }
}

state_model! {
    /// Hardware and licenses of a member that has not joined the grid yet
    pub struct MemberPreProvisioningModel {
        pub hardware_info: Vec<Value<MemberHardwareInfoModel>> => "hardware_info",
        pub licenses: Vec<Value<String>> => "licenses",
    }
}

pub fn hardware_info_attributes() -> Vec<Attribute> {
    vec![AttributeBuilder::new("hwtype", AttributeType::String)
        .description("Hardware type.")
        .required()
        .validator(OneOfValidator::create(HARDWARE_TYPES))
        .build()]
}

pub fn pre_provisioning_attributes() -> Vec<Attribute> {
    vec![
        AttributeBuilder::nested(
            "hardware_info",
            NestedType::list(hardware_info_attributes()),
        )
        .description("An array of structures that describe the hardware being pre-provisioned.")
        .required()
        .validator(ListLengthValidator::at_least(1))
        .build(),
        AttributeBuilder::new("licenses", AttributeType::list(AttributeType::String))
            .description("An array of license types the pre-provisioned member should have.")
            .required()
            .build(),
    ]
}

impl ObjectMapper for MemberHardwareInfoModel {
    type Wire = MemberHardwareInfo;

    fn expand(&self, _diags: &mut Diagnostics) -> Option<MemberHardwareInfo> {
        Some(MemberHardwareInfo {
            hwtype: flex::expand_string(&self.hwtype),
        })
    }

    fn flatten(wire: &MemberHardwareInfo, _diags: &mut Diagnostics) -> Self {
        Self {
            hwtype: flex::flatten_string(wire.hwtype.as_deref()),
        }
    }
}

impl ObjectMapper for MemberPreProvisioningModel {
    type Wire = MemberPreProvisioning;

    fn expand(&self, diags: &mut Diagnostics) -> Option<MemberPreProvisioning> {
        Some(MemberPreProvisioning {
            hardware_info: expand_object_list(&self.hardware_info, diags),
            licenses: flex::expand_string_list(&self.licenses),
        })
    }

    fn flatten(wire: &MemberPreProvisioning, diags: &mut Diagnostics) -> Self {
        Self {
            hardware_info: flatten_object_list(wire.hardware_info.as_deref(), diags),
            licenses: flex::flatten_string_list(wire.licenses.as_deref()),
        }
    }
}
