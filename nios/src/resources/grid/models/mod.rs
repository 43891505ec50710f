pub mod additional_ip;
pub mod ext_attrs;
pub mod ipv6_setting;
pub mod lom_user;
pub mod member;
pub mod network_setting;
pub mod pre_provisioning;
pub mod snmp_setting;
pub mod threshold_trap;

pub use additional_ip::MemberAdditionalIpModel;
pub use ipv6_setting::MemberIpv6SettingModel;
pub use lom_user::MemberLomUserModel;
pub use member::{member_attributes, member_schema, MemberModel};
pub use network_setting::MemberNetworkSettingModel;
pub use pre_provisioning::{MemberHardwareInfoModel, MemberPreProvisioningModel};
pub use snmp_setting::{MemberSnmpSettingModel, MemberSnmpTrapReceiverModel};
pub use threshold_trap::MemberThresholdTrapModel;
