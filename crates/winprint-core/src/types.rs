// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the spooler inventory.

use serde::{Deserialize, Serialize};

/// Which printer classes an enumeration covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumScope {
    /// Printers installed on this machine.
    pub local: bool,
    /// Connections to printers shared by other machines.
    pub connections: bool,
}

/// One print queue as reported by the spooler, with owned copies of every
/// string the native `PRINTER_INFO_2` element pointed at.
///
/// Null native strings are represented as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpoolerEntry {
    pub printer_name: String,
    pub share_name: String,
    pub port_name: String,
    pub driver_name: String,
    pub location: String,
    pub status: u32,
}

/// Parsed `GetConfigInfo` response from a port monitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortConfig {
    pub host_address: String,
    pub port_number: u32,
    pub snmp_enabled: bool,
}

/// Network details resolved for a port name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortResolution {
    /// Host name or IP address; empty when unresolved.
    pub ip: String,
    /// TCP port; 0 when no tier set one.
    pub port: u32,
    pub snmp_enabled: bool,
}

impl From<PortConfig> for PortResolution {
    fn from(config: PortConfig) -> Self {
        Self {
            ip: config.host_address,
            port: config.port_number,
            snmp_enabled: config.snmp_enabled,
        }
    }
}

/// What device discovery knows about a WSD device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceProbe {
    pub ip: String,
    pub model: String,
}

/// A printer queue with its resolved network details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrinterRecord {
    /// 1-based position in enumeration order.
    pub index: usize,
    pub name: String,
    pub is_default: bool,
    pub share_name: Option<String>,
    pub port_name: String,
    /// Resolved address; empty when unresolved.
    pub ip: String,
    /// Resolved TCP port; 0 when unknown.
    pub port: u32,
    pub snmp_enabled: bool,
    pub driver_name: String,
    /// WSD endpoint URL for WSD devices.
    pub location: Option<String>,
    pub uuid: Option<String>,
    pub model_name: Option<String>,
    /// Raw `PRINTER_STATUS_*` bit set.
    pub status: u32,
}

impl PrinterRecord {
    /// Build a record from a spooler entry before any port resolution.
    pub fn from_entry(index: usize, entry: SpoolerEntry, default_printer: Option<&str>) -> Self {
        let is_default = default_printer.is_some_and(|name| name == entry.printer_name);
        Self {
            index,
            is_default,
            name: entry.printer_name,
            share_name: non_empty(entry.share_name),
            port_name: entry.port_name,
            ip: String::new(),
            port: 0,
            snmp_enabled: false,
            driver_name: entry.driver_name,
            location: non_empty(entry.location),
            uuid: None,
            model_name: None,
            status: entry.status,
        }
    }

    /// Merge resolved port details into this record.
    pub fn apply_resolution(&mut self, resolution: PortResolution) {
        self.ip = resolution.ip;
        self.port = resolution.port;
        self.snmp_enabled = resolution.snmp_enabled;
    }

    /// Whether the record's port belongs to the WSD port monitor.
    pub fn is_wsd(&self) -> bool {
        self.port_name.contains("WSD")
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
