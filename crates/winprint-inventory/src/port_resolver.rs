// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Port name → IP address, TCP port and SNMP flag.
//
// Three sources are tried in order and the first that answers wins:
//   1. the port monitor's `GetConfigInfo` vendor extension (live state),
//   2. the Standard TCP/IP monitor's persisted registry settings,
//   3. information embedded in the port name itself.
// Failures of 1 and 2 are expected for non-TCP ports and are never surfaced.

use tracing::debug;

use winprint_bridge::traits::{PortMonitor, RegistryReader};
use winprint_core::config::InventoryConfig;
use winprint_core::types::PortResolution;

const HOST_NAME: &str = "HostName";
const IP_ADDRESS: &str = "IPAddress";
const PORT_NUMBER: &str = "PortNumber";
const SNMP_ENABLED: &str = "SNMP Enabled";

/// Resolves network details for spooler port names.
pub struct PortResolver<'a> {
    monitor: &'a dyn PortMonitor,
    registry: &'a dyn RegistryReader,
    config: &'a InventoryConfig,
}

impl<'a> PortResolver<'a> {
    pub fn new(
        monitor: &'a dyn PortMonitor,
        registry: &'a dyn RegistryReader,
        config: &'a InventoryConfig,
    ) -> Self {
        Self {
            monitor,
            registry,
            config,
        }
    }

    /// Resolve `port_name`, falling back to the configured raw port when no
    /// source yields a port number.
    pub fn resolve(&self, port_name: &str) -> PortResolution {
        let mut resolution = self
            .from_port_monitor(port_name)
            .or_else(|| self.from_registry(port_name))
            .unwrap_or_else(|| parse_port_name(port_name));

        // Applies to every tier, including a port monitor answer of 0.
        if resolution.port == 0 {
            resolution.port = self.config.default_raw_port;
        }
        resolution
    }

    /// Tier 1: ask the port monitor directly.
    fn from_port_monitor(&self, port_name: &str) -> Option<PortResolution> {
        match self.monitor.port_config(port_name) {
            Ok(config) => Some(config.into()),
            Err(e) => {
                debug!(port = %port_name, error = %e, "vendor extension query unavailable");
                None
            }
        }
    }

    /// Tier 2: the TCP/IP monitor's persisted settings. Only counts when it
    /// produces an address.
    fn from_registry(&self, port_name: &str) -> Option<PortResolution> {
        let path = self.config.tcp_port_key(port_name);
        let values = match self.registry.read_key(&path) {
            Ok(values) => values,
            Err(e) => {
                debug!(port = %port_name, error = %e, "no TCP/IP monitor settings");
                return None;
            }
        };

        // IPAddress is consulted only when HostName is absent; an empty
        // HostName leaves the tier without an address.
        let ip = values
            .get(HOST_NAME)
            .or_else(|| values.get(IP_ADDRESS))
            .unwrap_or_default();
        if ip.is_empty() {
            return None;
        }
        let ip = ip.to_owned();

        let port = values
            .get(PORT_NUMBER)
            .and_then(parse_decimal)
            .unwrap_or(self.config.default_raw_port);

        let snmp_enabled = values.get(SNMP_ENABLED) == Some("1");

        Some(PortResolution {
            ip,
            port,
            snmp_enabled,
        })
    }
}

/// Tier 3: recover an address from the port name.
///
/// - containing `IP_`: the second `_`-separated segment is the address;
/// - containing `:`: `host:port`, the port kept only if it is decimal;
/// - four dot-separated integers: the whole name is an IPv4 address.
///
/// The `IP_` test is a literal substring match, so names such as
/// `192.168.3.135_1` do not take that branch. Port 0 means unset.
pub fn parse_port_name(port_name: &str) -> PortResolution {
    let mut resolution = PortResolution::default();

    if port_name.contains("IP_") {
        if let Some(ip) = port_name.split('_').nth(1) {
            resolution.ip = ip.to_owned();
        }
    } else if port_name.contains(':') {
        let mut parts = port_name.split(':');
        if let (Some(host), Some(port)) = (parts.next(), parts.next()) {
            resolution.ip = host.to_owned();
            if let Some(port) = parse_decimal(port) {
                resolution.port = port;
            }
        }
    } else {
        let segments: Vec<&str> = port_name.split('.').collect();
        if segments.len() == 4 && segments.iter().all(|s| s.parse::<i64>().is_ok()) {
            resolution.ip = port_name.to_owned();
        }
    }

    resolution
}

fn parse_decimal(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
