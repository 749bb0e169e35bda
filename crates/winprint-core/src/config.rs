// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Inventory configuration.

use serde::{Deserialize, Serialize};

use crate::types::EnumScope;

/// Standard raw-print (JetDirect) port.
pub const RAW_PORT: u32 = 9100;

/// Registry root holding one subkey per Standard TCP/IP port.
pub const TCP_MONITOR_PORTS_KEY: &str =
    "SYSTEM\\CurrentControlSet\\Control\\Print\\Monitors\\Standard TCP/IP Port\\Ports";

/// Registry root holding one subkey per WSD port.
pub const WSD_MONITOR_PORTS_KEY: &str =
    "SYSTEM\\CurrentControlSet\\Control\\Print\\Monitors\\WSD Port\\Ports";

/// Settings for a collection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Port number used when no resolution tier yields one.
    pub default_raw_port: u32,
    /// HKLM path of the Standard TCP/IP port monitor's `Ports` key.
    pub tcp_monitor_key: String,
    /// HKLM path of the WSD port monitor's `Ports` key.
    pub wsd_monitor_key: String,
    /// Address the placeholder WS-Discovery step hands back.
    pub discovery_fallback_ip: String,
    /// Enumerate printers installed on this machine.
    pub include_local: bool,
    /// Enumerate printer connections the user has made.
    pub include_connections: bool,
}

impl InventoryConfig {
    /// Printer classes to enumerate.
    pub fn enum_scope(&self) -> EnumScope {
        EnumScope {
            local: self.include_local,
            connections: self.include_connections,
        }
    }

    /// Registry path of the TCP/IP monitor settings for `port_name`.
    pub fn tcp_port_key(&self, port_name: &str) -> String {
        format!("{}\\{}", self.tcp_monitor_key, port_name)
    }

    /// Registry path of the WSD monitor settings for `port_name`.
    pub fn wsd_port_key(&self, port_name: &str) -> String {
        format!("{}\\{}", self.wsd_monitor_key, port_name)
    }
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            default_raw_port: RAW_PORT,
            tcp_monitor_key: TCP_MONITOR_PORTS_KEY.to_owned(),
            wsd_monitor_key: WSD_MONITOR_PORTS_KEY.to_owned(),
            discovery_fallback_ip: "192.168.1.100".to_owned(),
            include_local: true,
            include_connections: true,
        }
    }
}
