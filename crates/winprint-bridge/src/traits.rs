// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for the native subsystems the inventory
// reads from.

use std::collections::HashMap;

use winprint_core::error::Result;
use winprint_core::types::{EnumScope, PortConfig, SpoolerEntry};

/// Unified bridge grouping every native capability the collector needs.
pub trait PlatformBridge: PrintSpooler + PortMonitor + RegistryReader {
    /// Human-readable platform name (e.g. "Windows").
    fn platform_name(&self) -> &str;
}

/// The print spooler's enumeration surface.
///
/// Enumeration follows the native two-call convention: the caller first asks
/// for the buffer size, then enumerates into a buffer of exactly that size.
pub trait PrintSpooler {
    /// Name of the user's default printer, or an empty string if none is set.
    fn default_printer_name(&self) -> Result<String>;

    /// Sizing call: bytes needed to hold every `PRINTER_INFO_2` in `scope`.
    ///
    /// The spooler's insufficient-buffer signal is reported as `Ok(needed)`.
    /// `Ok(0)` means there is nothing to enumerate.
    fn required_buffer_size(&self, scope: EnumScope) -> Result<u32>;

    /// Enumerate into a buffer of `buffer_size` bytes and copy every entry out.
    fn enumerate_printers(&self, scope: EnumScope, buffer_size: u32) -> Result<Vec<SpoolerEntry>>;
}

/// Vendor-extension channel of a port monitor (`XcvData`).
pub trait PortMonitor {
    /// Issue `GetConfigInfo` against the port's monitor.
    fn port_config(&self, port_name: &str) -> Result<PortConfig>;
}

/// Read access to `HKEY_LOCAL_MACHINE`.
pub trait RegistryReader {
    /// Read every string-like value of the subkey at `path`.
    ///
    /// A missing key is `Err(RegistryKeyNotFound)`; missing values simply do
    /// not appear in the returned set.
    fn read_key(&self, path: &str) -> Result<RegistryValues>;
}

/// Values of one registry key, rendered as strings.
///
/// Lookups ignore case, as the registry does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryValues {
    values: HashMap<String, String>,
}

impl RegistryValues {
    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.values
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for RegistryValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Self::default();
        for (name, value) in iter {
            values.insert(name, value);
        }
        values
    }
}
