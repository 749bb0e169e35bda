// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Printer collection: one linear pass over the spooler's printer list.
//
// Only enumeration failures abort a run.  The default-printer query and every
// per-printer lookup are best-effort and degrade to empty fields.

use tracing::{debug, info, warn};

use winprint_bridge::traits::PlatformBridge;
use winprint_core::config::InventoryConfig;
use winprint_core::error::{Result, WinprintError};
use winprint_core::types::PrinterRecord;

use crate::port_resolver::PortResolver;
use crate::wsd::{WsDiscovery, WsdResolver};

/// Collects `PrinterRecord`s from a platform bridge.
pub struct PrinterCollector<'a> {
    bridge: &'a dyn PlatformBridge,
    discovery: &'a dyn WsDiscovery,
    config: InventoryConfig,
}

impl<'a> PrinterCollector<'a> {
    pub fn new(
        bridge: &'a dyn PlatformBridge,
        discovery: &'a dyn WsDiscovery,
        config: InventoryConfig,
    ) -> Self {
        Self {
            bridge,
            discovery,
            config,
        }
    }

    /// The user's default printer. `Ok(None)` when none is configured.
    pub fn default_printer(&self) -> Result<Option<String>> {
        let name = self.bridge.default_printer_name()?;
        Ok(if name.is_empty() { None } else { Some(name) })
    }

    /// Enumerate every local and connected printer, in spooler order.
    pub fn collect(&self) -> Result<Vec<PrinterRecord>> {
        let default_printer = match self.default_printer() {
            Ok(name) => name,
            Err(e) => {
                warn!(error = %e, "default printer unknown; no record will be marked default");
                None
            }
        };

        let scope = self.config.enum_scope();
        let size = self
            .bridge
            .required_buffer_size(scope)
            .map_err(WinprintError::in_enumeration)?;
        if size == 0 {
            info!("spooler reported no printers");
            return Ok(Vec::new());
        }
        let entries = self
            .bridge
            .enumerate_printers(scope, size)
            .map_err(WinprintError::in_enumeration)?;

        let ports = PortResolver::new(self.bridge, self.bridge, &self.config);
        let wsd = WsdResolver::new(self.bridge, self.discovery, &self.config);

        let mut records = Vec::with_capacity(entries.len());
        for (i, entry) in entries.into_iter().enumerate() {
            let mut record = PrinterRecord::from_entry(i + 1, entry, default_printer.as_deref());

            if !record.port_name.is_empty() {
                record.apply_resolution(ports.resolve(&record.port_name));
            }

            if let Some(device) = wsd.resolve(&record.port_name) {
                record.uuid = Some(device.uuid);
                if let Some(probe) = device.probe {
                    if record.ip.is_empty() {
                        record.ip = probe.ip;
                    }
                    record.model_name = Some(probe.model);
                }
            }

            debug!(
                index = record.index,
                name = %record.name,
                port = %record.port_name,
                ip = %record.ip,
                "printer collected"
            );
            records.push(record);
        }

        info!(
            count = records.len(),
            default = default_printer.as_deref().unwrap_or("<none>"),
            platform = self.bridge.platform_name(),
            "printer collection complete"
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::HashMap;

    use winprint_bridge::traits::{PortMonitor, PrintSpooler, RegistryReader, RegistryValues};
    use winprint_core::types::{EnumScope, PortConfig, SpoolerEntry};

    use super::*;
    use crate::wsd::KeywordDiscovery;

    /// In-memory spooler with scripted enumeration results.
    #[derive(Default)]
    struct FakeBridge {
        default_printer: Option<String>,
        entries: Vec<SpoolerEntry>,
        size_error: Option<String>,
        enumerate_error: Option<String>,
        spooler_unloaded: bool,
        platform_unavailable: bool,
        port_configs: HashMap<String, PortConfig>,
        registry: HashMap<String, RegistryValues>,
        enumerated_with: Cell<Option<u32>>,
    }

    impl FakeBridge {
        fn with_printer(mut self, name: &str, port: &str) -> Self {
            self.entries.push(SpoolerEntry {
                printer_name: name.into(),
                port_name: port.into(),
                driver_name: "Epson ESC/P-R V4 Class Driver".into(),
                ..Default::default()
            });
            self
        }

        fn with_registry(mut self, path: String, values: &[(&str, &str)]) -> Self {
            self.registry.insert(path, values.iter().copied().collect());
            self
        }
    }

    impl PlatformBridge for FakeBridge {
        fn platform_name(&self) -> &str {
            "fake"
        }
    }

    impl PrintSpooler for FakeBridge {
        fn default_printer_name(&self) -> Result<String> {
            self.default_printer
                .clone()
                .ok_or_else(|| WinprintError::DefaultPrinter("Element not found. (os error 1168)".into()))
        }

        fn required_buffer_size(&self, _scope: EnumScope) -> Result<u32> {
            if self.spooler_unloaded {
                return Err(WinprintError::Bridge("load winspool.drv: module not found".into()));
            }
            if let Some(e) = &self.size_error {
                return Err(WinprintError::enumeration(e));
            }
            Ok(self.entries.len() as u32 * 136)
        }

        fn enumerate_printers(&self, _scope: EnumScope, buffer_size: u32) -> Result<Vec<SpoolerEntry>> {
            self.enumerated_with.set(Some(buffer_size));
            if self.platform_unavailable {
                return Err(WinprintError::PlatformUnavailable);
            }
            if let Some(e) = &self.enumerate_error {
                return Err(WinprintError::enumeration(e));
            }
            Ok(self.entries.clone())
        }
    }

    impl PortMonitor for FakeBridge {
        fn port_config(&self, port_name: &str) -> Result<PortConfig> {
            self.port_configs
                .get(port_name)
                .cloned()
                .ok_or_else(|| WinprintError::PortMonitor("not a TCP/IP port".into()))
        }
    }

    impl RegistryReader for FakeBridge {
        fn read_key(&self, path: &str) -> Result<RegistryValues> {
            self.registry
                .get(path)
                .cloned()
                .ok_or_else(|| WinprintError::RegistryKeyNotFound(path.to_owned()))
        }
    }

    fn collect(bridge: &FakeBridge) -> Result<Vec<PrinterRecord>> {
        let config = InventoryConfig::default();
        let discovery = KeywordDiscovery::from_config(&config);
        PrinterCollector::new(bridge, &discovery, config).collect()
    }

    #[test]
    fn zero_size_means_no_printers() {
        let bridge = FakeBridge::default();
        assert!(collect(&bridge).unwrap().is_empty());
        assert_eq!(bridge.enumerated_with.get(), None);
    }

    #[test]
    fn enumerates_with_the_reported_size() {
        let bridge = FakeBridge::default()
            .with_printer("Fax", "SHRFAX:")
            .with_printer("Microsoft Print to PDF", "PORTPROMPT:");
        collect(&bridge).unwrap();
        assert_eq!(bridge.enumerated_with.get(), Some(272));
    }

    #[test]
    fn bridge_failures_carry_enumeration_context() {
        let bridge = FakeBridge {
            spooler_unloaded: true,
            ..FakeBridge::default().with_printer("Fax", "SHRFAX:")
        };
        let err = collect(&bridge).unwrap_err();
        assert!(matches!(err, WinprintError::Enumeration(_)));
        assert_eq!(
            err.to_string(),
            "EnumPrinters failed: platform bridge error: load winspool.drv: module not found"
        );

        let bridge = FakeBridge {
            platform_unavailable: true,
            ..FakeBridge::default().with_printer("Fax", "SHRFAX:")
        };
        let err = collect(&bridge).unwrap_err();
        assert!(err.to_string().starts_with("EnumPrinters failed: "));
    }

    #[test]
    fn sizing_failure_aborts() {
        let bridge = FakeBridge {
            size_error: Some("The RPC server is unavailable.".into()),
            ..FakeBridge::default().with_printer("Fax", "SHRFAX:")
        };
        let err = collect(&bridge).unwrap_err();
        assert!(err.to_string().starts_with("EnumPrinters failed"));
    }

    #[test]
    fn enumeration_failure_returns_no_records() {
        let bridge = FakeBridge {
            enumerate_error: Some("Access is denied.".into()),
            ..FakeBridge::default().with_printer("Fax", "SHRFAX:")
        };
        let err = collect(&bridge).unwrap_err();
        assert!(matches!(err, WinprintError::Enumeration(_)));
    }

    #[test]
    fn records_keep_enumeration_order_with_one_based_index() {
        let bridge = FakeBridge::default()
            .with_printer("Zeta", "PORTPROMPT:")
            .with_printer("Alpha", "SHRFAX:")
            .with_printer("Mid", "nul");
        let records = collect(&bridge).unwrap();
        let names: Vec<_> = records.iter().map(|r| (r.index, r.name.as_str())).collect();
        assert_eq!(names, [(1, "Zeta"), (2, "Alpha"), (3, "Mid")]);
    }

    #[test]
    fn default_flag_is_case_sensitive() {
        let bridge = FakeBridge {
            default_printer: Some("Office Laser".into()),
            ..FakeBridge::default()
                .with_printer("office laser", "PORTPROMPT:")
                .with_printer("Office Laser", "PORTPROMPT:")
        };
        let records = collect(&bridge).unwrap();
        assert!(!records[0].is_default);
        assert!(records[1].is_default);
    }

    #[test]
    fn default_query_failure_is_not_fatal() {
        let bridge = FakeBridge::default().with_printer("Fax", "SHRFAX:");
        let records = collect(&bridge).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records.iter().all(|r| !r.is_default));
    }

    #[test]
    fn name_heuristics_fill_fax_and_pdf_ports() {
        let bridge = FakeBridge::default()
            .with_printer("Fax", "SHRFAX:")
            .with_printer("Raw", "192.168.3.135_1");
        let records = collect(&bridge).unwrap();

        assert_eq!(records[0].ip, "SHRFAX");
        assert_eq!(records[0].port, 9100);
        assert_eq!(records[1].ip, "");
        assert_eq!(records[1].port, 9100);
    }

    #[test]
    fn empty_port_name_skips_resolution() {
        let bridge = FakeBridge::default().with_printer("Orphan", "");
        let record = &collect(&bridge).unwrap()[0];
        assert_eq!(record.port, 0);
        assert_eq!(record.ip, "");
    }

    #[test]
    fn wsd_printer_gets_uuid_model_and_fallback_ip() {
        let config = InventoryConfig::default();
        let port = "WSD-c4dc4c24-9590-4320-bdb7-f499aa9786a3";
        let bridge = FakeBridge::default()
            .with_printer("WSD - EPSON3DEF75 (L6290 Series)", port)
            .with_registry(
                config.wsd_port_key(port),
                &[("Printer UUID", "cfe92100-67c4-11d4-a45f-e0bb9e3def75")],
            );

        let record = &collect(&bridge).unwrap()[0];
        assert_eq!(record.uuid.as_deref(), Some("cfe92100-67c4-11d4-a45f-e0bb9e3def75"));
        assert_eq!(record.model_name.as_deref(), Some("Epson WorkForce/L6290"));
        assert_eq!(record.ip, "192.168.1.100");
        assert_eq!(record.port, 9100);
    }

    #[test]
    fn resolved_ip_wins_over_discovery_fallback() {
        let config = InventoryConfig::default();
        let port = "WSD-hp-1";
        let mut bridge = FakeBridge::default()
            .with_printer("HP", port)
            .with_registry(config.wsd_port_key(port), &[("Printer UUID", "uuid-hp-1")]);
        bridge.port_configs.insert(
            port.into(),
            PortConfig {
                host_address: "10.0.0.42".into(),
                port_number: 3910,
                snmp_enabled: true,
            },
        );

        let record = &collect(&bridge).unwrap()[0];
        assert_eq!(record.ip, "10.0.0.42");
        assert_eq!(record.port, 3910);
        assert!(record.snmp_enabled);
        assert_eq!(record.model_name.as_deref(), Some("HP LaserJet"));
    }

    #[test]
    fn default_printer_query_maps_empty_to_none() {
        let config = InventoryConfig::default();
        let discovery = KeywordDiscovery::from_config(&config);

        let bridge = FakeBridge {
            default_printer: Some(String::new()),
            ..Default::default()
        };
        let collector = PrinterCollector::new(&bridge, &discovery, config.clone());
        assert_eq!(collector.default_printer().unwrap(), None);

        let bridge = FakeBridge {
            default_printer: Some("Fax".into()),
            ..Default::default()
        };
        let collector = PrinterCollector::new(&bridge, &discovery, config);
        assert_eq!(collector.default_printer().unwrap().as_deref(), Some("Fax"));
    }
}
