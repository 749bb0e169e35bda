// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Windows platform bridge over the print spooler and the registry.

pub mod registry;
pub mod winspool;

use std::mem::size_of;

use tracing::{debug, trace};
use winapi::um::winspool::{PRINTER_INFO_2W, SERVER_ACCESS_ADMINISTER};

use winprint_core::error::{Result, WinprintError};
use winprint_core::types::{EnumScope, PortConfig, SpoolerEntry};

use crate::strings::{from_wide_ptr, from_wide_until_nul, hex_dump};
use crate::tcpxcv::{ConfigInfoData1, GET_CONFIG_INFO, PortData1};
use crate::traits::*;

use self::winspool::{EnumCounts, PrinterHandle, RawCall};

/// `PRINTER_INFO_2`.
const PRINTER_INFO_LEVEL: u32 = 2;

/// Upper bound accepted from the default-printer sizing call, in characters.
const MAX_DEFAULT_PRINTER_CHARS: u32 = 1024;

/// Bridge backed by `winspool.drv` and `HKEY_LOCAL_MACHINE`.
#[derive(Debug, Default)]
pub struct WindowsBridge;

impl WindowsBridge {
    pub fn new() -> Self {
        Self
    }
}

impl PlatformBridge for WindowsBridge {
    fn platform_name(&self) -> &str {
        "Windows"
    }
}

impl PrintSpooler for WindowsBridge {
    fn default_printer_name(&self) -> Result<String> {
        let mut size = 0u32;
        match winspool::default_printer(None, &mut size)? {
            RawCall::Done(()) => return Ok(String::new()),
            RawCall::InsufficientBuffer(()) => {}
            RawCall::Failed(e) => return Err(WinprintError::DefaultPrinter(e.to_string())),
        }

        if size == 0 {
            return Ok(String::new());
        }
        if size > MAX_DEFAULT_PRINTER_CHARS {
            return Err(WinprintError::DefaultPrinter(format!(
                "GetDefaultPrinter returned invalid size ({size})"
            )));
        }

        let mut buffer = vec![0u16; size as usize];
        match winspool::default_printer(Some(buffer.as_mut_slice()), &mut size)? {
            RawCall::Done(()) => {
                let len = (size as usize).min(buffer.len());
                Ok(from_wide_until_nul(&buffer[..len]))
            }
            RawCall::InsufficientBuffer(()) => Err(WinprintError::DefaultPrinter(format!(
                "GetDefaultPrinter returned invalid size ({size})"
            ))),
            RawCall::Failed(e) => Err(WinprintError::DefaultPrinter(e.to_string())),
        }
    }

    fn required_buffer_size(&self, scope: EnumScope) -> Result<u32> {
        let flags = winspool::enum_flags(scope);
        match winspool::enum_printers(flags, PRINTER_INFO_LEVEL, None)? {
            RawCall::Done(_) => Ok(0),
            RawCall::InsufficientBuffer(counts) => Ok(counts.needed),
            RawCall::Failed(e) => Err(WinprintError::enumeration(e)),
        }
    }

    fn enumerate_printers(&self, scope: EnumScope, buffer_size: u32) -> Result<Vec<SpoolerEntry>> {
        let flags = winspool::enum_flags(scope);
        let mut buffer = vec![0u8; buffer_size as usize];
        let counts = match winspool::enum_printers(flags, PRINTER_INFO_LEVEL, Some(buffer.as_mut_slice()))? {
            RawCall::Done(counts) => counts,
            RawCall::InsufficientBuffer(counts) => {
                return Err(WinprintError::enumeration(format!(
                    "buffer of {buffer_size} bytes too small, {} needed",
                    counts.needed
                )));
            }
            RawCall::Failed(e) => return Err(WinprintError::enumeration(e)),
        };
        debug!(count = counts.returned, bytes = buffer_size, "printers enumerated");
        read_printer_info_2(&buffer, counts)
    }
}

/// Copy every `PRINTER_INFO_2W` out of an enumeration buffer.
///
/// The structures sit at the front of the buffer with a stride of their
/// native size; the strings they point at live further into the same buffer.
fn read_printer_info_2(buffer: &[u8], counts: EnumCounts) -> Result<Vec<SpoolerEntry>> {
    let stride = size_of::<PRINTER_INFO_2W>();
    let count = counts.returned as usize;
    if count.saturating_mul(stride) > buffer.len() {
        return Err(WinprintError::enumeration(format!(
            "{count} entries do not fit a {} byte buffer",
            buffer.len()
        )));
    }

    let entries = (0..count)
        .map(|i| {
            // SAFETY: bounds checked above; the Vec<u8> gives no alignment
            // guarantee, hence the unaligned read.
            let info: PRINTER_INFO_2W = unsafe {
                std::ptr::read_unaligned(buffer.as_ptr().add(i * stride).cast::<PRINTER_INFO_2W>())
            };
            // SAFETY: the spooler fills these with null or NUL-terminated
            // strings inside `buffer`, which outlives this call.
            unsafe {
                SpoolerEntry {
                    printer_name: from_wide_ptr(info.pPrinterName),
                    share_name: from_wide_ptr(info.pShareName),
                    port_name: from_wide_ptr(info.pPortName),
                    driver_name: from_wide_ptr(info.pDriverName),
                    location: from_wide_ptr(info.pLocation),
                    status: info.Status,
                }
            }
        })
        .collect();
    Ok(entries)
}

impl PortMonitor for WindowsBridge {
    fn port_config(&self, port_name: &str) -> Result<PortConfig> {
        let xcv_name = format!(",XcvPort {port_name}");
        let handle = PrinterHandle::open(&xcv_name, SERVER_ACCESS_ADMINISTER)
            .map_err(|e| WinprintError::PortMonitor(format!("open {xcv_name}: {e}")))?;

        let input = ConfigInfoData1::new();
        let mut output = PortData1::new();
        // SAFETY: both are the repr(C) structures GetConfigInfo is defined on.
        let reply = unsafe { handle.xcv_data(GET_CONFIG_INFO, &input, &mut output) }
            .map_err(|e| WinprintError::PortMonitor(format!("{GET_CONFIG_INFO} on {port_name}: {e}")))?;

        if let Err(e) = handle.close() {
            debug!(port = %port_name, error = %e, "closing XcvPort handle failed");
        }

        if reply.status != 0 {
            return Err(WinprintError::PortMonitor(format!(
                "{GET_CONFIG_INFO} on {port_name}: status {}",
                reply.status
            )));
        }
        trace!(port = %port_name, dump = %hex_dump(output.as_bytes(), 16), "PORT_DATA_1");
        Ok(output.to_port_config())
    }
}

impl RegistryReader for WindowsBridge {
    fn read_key(&self, path: &str) -> Result<RegistryValues> {
        registry::read_key(path)
    }
}
