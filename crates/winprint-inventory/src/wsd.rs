// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// WSD device identification.
//
// The WSD port monitor persists a "Printer UUID" per port.  The UUID is
// handed to a `WsDiscovery` implementation which answers with the device's
// address and model.  `KeywordDiscovery` is the built-in stand-in for a
// WS-Discovery network probe.

use tracing::debug;

use winprint_bridge::traits::RegistryReader;
use winprint_core::config::InventoryConfig;
use winprint_core::error::Result;
use winprint_core::types::DeviceProbe;

const PRINTER_UUID: &str = "Printer UUID";

/// Maps a WSD device UUID to its address and model.
pub trait WsDiscovery {
    fn resolve_by_uuid(&self, uuid: &str) -> Result<DeviceProbe>;
}

/// Placeholder discovery matching vendor keywords inside the UUID.
///
/// Always answers with a fixed fallback address.
#[derive(Debug, Clone)]
pub struct KeywordDiscovery {
    fallback_ip: String,
}

impl KeywordDiscovery {
    pub fn new(fallback_ip: impl Into<String>) -> Self {
        Self {
            fallback_ip: fallback_ip.into(),
        }
    }

    pub fn from_config(config: &InventoryConfig) -> Self {
        Self::new(config.discovery_fallback_ip.clone())
    }
}

impl WsDiscovery for KeywordDiscovery {
    fn resolve_by_uuid(&self, uuid: &str) -> Result<DeviceProbe> {
        let model = if uuid.contains("hp") {
            "HP LaserJet"
        } else if uuid.contains("canon") {
            "Canon PIXMA"
        } else if uuid.contains("epson") || uuid.contains("def75") {
            "Epson WorkForce/L6290"
        } else {
            "Unknown Model"
        };
        Ok(DeviceProbe {
            ip: self.fallback_ip.clone(),
            model: model.to_owned(),
        })
    }
}

/// What the WSD lookup found for one port.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WsdDevice {
    pub uuid: String,
    /// `None` when discovery failed for a known UUID.
    pub probe: Option<DeviceProbe>,
}

/// Looks up WSD device identity for spooler ports.
pub struct WsdResolver<'a> {
    registry: &'a dyn RegistryReader,
    discovery: &'a dyn WsDiscovery,
    config: &'a InventoryConfig,
}

impl<'a> WsdResolver<'a> {
    pub fn new(
        registry: &'a dyn RegistryReader,
        discovery: &'a dyn WsDiscovery,
        config: &'a InventoryConfig,
    ) -> Self {
        Self {
            registry,
            discovery,
            config,
        }
    }

    /// Persisted device UUID of a WSD port, if any.
    pub fn printer_uuid(&self, port_name: &str) -> Option<String> {
        let path = self.config.wsd_port_key(port_name);
        match self.registry.read_key(&path) {
            Ok(values) => values
                .get(PRINTER_UUID)
                .filter(|v| !v.is_empty())
                .map(str::to_owned),
            Err(e) => {
                debug!(port = %port_name, error = %e, "no WSD monitor settings");
                None
            }
        }
    }

    /// UUID and discovery answer for `port_name`. `None` unless the port
    /// belongs to the WSD monitor and has a persisted UUID.
    pub fn resolve(&self, port_name: &str) -> Option<WsdDevice> {
        if !port_name.contains("WSD") {
            return None;
        }
        let uuid = self.printer_uuid(port_name)?;
        let probe = match self.discovery.resolve_by_uuid(&uuid) {
            Ok(probe) => Some(probe),
            Err(e) => {
                debug!(uuid = %uuid, error = %e, "WSD discovery failed");
                None
            }
        };
        Some(WsdDevice { uuid, probe })
    }
}
