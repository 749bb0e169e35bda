// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Fixed-layout structures exchanged with the Standard TCP/IP port monitor
// through `XcvData` (tcpxcv.h). `winapi` does not carry these, so they are
// declared here with the header's exact field widths.

#![cfg_attr(not(windows), allow(dead_code))]

use winprint_core::types::PortConfig;

use crate::strings::from_wide_until_nul;

pub const MAX_PORTNAME_LEN: usize = 64;
pub const MAX_NETWORKNAME_LEN: usize = 49;
pub const MAX_SNMP_COMMUNITY_STR_LEN: usize = 33;
pub const MAX_QUEUENAME_LEN: usize = 33;
pub const MAX_IPADDR_STR_LEN: usize = 16;
pub const RESERVED_BYTE_ARRAY_SIZE: usize = 540;

/// `XcvData` command returning a `PORT_DATA_1`.
pub const GET_CONFIG_INFO: &str = "GetConfigInfo";

/// `CONFIG_INFO_DATA_1`: input of `GetConfigInfo`.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct ConfigInfoData1 {
    pub reserved: [u8; 128],
    pub version: u32,
}

impl ConfigInfoData1 {
    pub fn new() -> Self {
        Self {
            reserved: [0; 128],
            version: 1,
        }
    }
}

impl Default for ConfigInfoData1 {
    fn default() -> Self {
        Self::new()
    }
}

/// `PORT_DATA_1`: output of `GetConfigInfo`.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct PortData1 {
    pub port_name: [u16; MAX_PORTNAME_LEN],
    pub version: u32,
    pub protocol: u32,
    pub cb_size: u32,
    pub reserved: u32,
    pub host_address: [u16; MAX_NETWORKNAME_LEN],
    pub snmp_community: [u16; MAX_SNMP_COMMUNITY_STR_LEN],
    pub double_spool: u32,
    pub queue: [u16; MAX_QUEUENAME_LEN],
    pub ip_address: [u16; MAX_IPADDR_STR_LEN],
    pub reserved2: [u8; RESERVED_BYTE_ARRAY_SIZE],
    pub port_number: u32,
    pub snmp_enabled: u32,
    pub snmp_dev_index: u32,
}

impl PortData1 {
    /// Zeroed structure with `cb_size` preset, ready to receive a reply.
    pub fn new() -> Self {
        // SAFETY: every field is an integer or integer array; all-zero is valid.
        let mut data: Self = unsafe { std::mem::zeroed() };
        data.cb_size = std::mem::size_of::<Self>() as u32;
        data
    }

    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: repr(C) plain data with no padding-sensitive invariants.
        unsafe {
            std::slice::from_raw_parts(
                (self as *const Self).cast::<u8>(),
                std::mem::size_of::<Self>(),
            )
        }
    }

    pub fn to_port_config(&self) -> PortConfig {
        PortConfig {
            host_address: from_wide_until_nul(&self.host_address),
            port_number: self.port_number,
            snmp_enabled: self.snmp_enabled != 0,
        }
    }
}

impl Default for PortData1 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layouts_match_tcpxcv_header() {
        assert_eq!(std::mem::size_of::<ConfigInfoData1>(), 132);
        assert_eq!(std::mem::size_of::<PortData1>(), 964);
        assert_eq!(PortData1::new().cb_size, 964);
        assert_eq!(ConfigInfoData1::new().version, 1);
    }

    #[test]
    fn reply_converts_to_port_config() {
        let mut data = PortData1::new();
        for (slot, c) in data.host_address.iter_mut().zip("192.168.3.135".encode_utf16()) {
            *slot = c;
        }
        data.port_number = 9100;
        data.snmp_enabled = 1;

        let config = data.to_port_config();
        assert_eq!(config.host_address, "192.168.3.135");
        assert_eq!(config.port_number, 9100);
        assert!(config.snmp_enabled);
        assert_eq!(data.as_bytes().len(), 964);
    }
}
