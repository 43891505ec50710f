//! Grid API module for grid-level objects

use crate::api::client::Client;

mod member;
pub use member::{
    ExtAttr, Member, MemberAdditionalIp, MemberApi, MemberHardwareInfo, MemberIpv6Setting,
    MemberLomUser, MemberNetworkSetting, MemberPreProvisioning, MemberSnmpSetting,
    MemberSnmpTrapReceiver, MemberThresholdTrap,
};

/// Grid API providing grid and member operations
pub struct GridApi<'a> {
    client: &'a Client,
}

impl<'a> GridApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Access grid member operations
    pub fn member(&self) -> MemberApi<'a> {
        MemberApi::new(self.client)
    }
}
