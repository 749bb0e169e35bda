// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for non-Windows builds where the print spooler is unavailable.
//
// Every trait method returns `PlatformUnavailable`. The real implementation
// lives in the `windows` module.

use winprint_core::error::{Result, WinprintError};
use winprint_core::types::{EnumScope, PortConfig, SpoolerEntry};

use crate::traits::*;

/// No-op bridge returned on non-Windows platforms.
pub struct StubBridge;

impl PlatformBridge for StubBridge {
    fn platform_name(&self) -> &str {
        "Non-Windows (stub)"
    }
}

impl PrintSpooler for StubBridge {
    fn default_printer_name(&self) -> Result<String> {
        tracing::warn!("PrintSpooler::default_printer_name called on stub bridge");
        Err(WinprintError::PlatformUnavailable)
    }

    fn required_buffer_size(&self, _scope: EnumScope) -> Result<u32> {
        tracing::warn!("PrintSpooler::required_buffer_size called on stub bridge");
        Err(WinprintError::PlatformUnavailable)
    }

    fn enumerate_printers(&self, _scope: EnumScope, _buffer_size: u32) -> Result<Vec<SpoolerEntry>> {
        Err(WinprintError::PlatformUnavailable)
    }
}

impl PortMonitor for StubBridge {
    fn port_config(&self, _port_name: &str) -> Result<PortConfig> {
        Err(WinprintError::PlatformUnavailable)
    }
}

impl RegistryReader for StubBridge {
    fn read_key(&self, _path: &str) -> Result<RegistryValues> {
        Err(WinprintError::PlatformUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_call_is_unavailable() {
        let bridge = StubBridge;
        let scope = EnumScope { local: true, connections: true };
        assert!(matches!(
            bridge.required_buffer_size(scope),
            Err(WinprintError::PlatformUnavailable)
        ));
        assert!(matches!(
            bridge.port_config("IP_10.0.0.1"),
            Err(WinprintError::PlatformUnavailable)
        ));
        assert!(matches!(
            bridge.read_key("SYSTEM"),
            Err(WinprintError::PlatformUnavailable)
        ));
    }

    #[test]
    fn platform_bridge_selects_stub() {
        assert_eq!(crate::platform_bridge().platform_name(), "Non-Windows (stub)");
    }
}
