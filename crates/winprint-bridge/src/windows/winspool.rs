// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Late-bound `winspool.drv` entry points.
//
// The library and its symbols are resolved once, on first use, into a
// process-wide table that is read-only afterwards. Each wrapper turns the
// BOOL return convention into a `RawCall`, keeping the spooler's
// insufficient-buffer signal apart from real failures.

use std::io;
use std::ptr::null_mut;
use std::sync::OnceLock;

use libloading::{Library, Symbol};
use tracing::debug;
use winapi::shared::minwindef::{BOOL, DWORD, FALSE, LPBYTE, LPDWORD};
use winapi::shared::winerror::ERROR_INSUFFICIENT_BUFFER;
use winapi::shared::ntdef::{LPCWSTR, LPWSTR};
use winapi::um::winnt::HANDLE;
use winapi::um::winspool::{PRINTER_DEFAULTSW, PRINTER_ENUM_CONNECTIONS, PRINTER_ENUM_LOCAL};

use winprint_core::error::{Result, WinprintError};
use winprint_core::types::EnumScope;

use crate::strings::to_wide;

const WINSPOOL_DLL: &str = "winspool.drv";

type FnEnumPrintersW =
    unsafe extern "system" fn(DWORD, LPWSTR, DWORD, LPBYTE, DWORD, LPDWORD, LPDWORD) -> BOOL;
type FnGetDefaultPrinterW = unsafe extern "system" fn(LPWSTR, LPDWORD) -> BOOL;
type FnOpenPrinterW = unsafe extern "system" fn(LPWSTR, *mut HANDLE, *mut PRINTER_DEFAULTSW) -> BOOL;
type FnClosePrinter = unsafe extern "system" fn(HANDLE) -> BOOL;
type FnXcvDataW = unsafe extern "system" fn(
    HANDLE,
    LPCWSTR,
    LPBYTE,
    DWORD,
    LPBYTE,
    DWORD,
    LPDWORD,
    LPDWORD,
) -> BOOL;

struct WinspoolApi {
    _lib: Library,
    enum_printers: FnEnumPrintersW,
    get_default_printer: FnGetDefaultPrinterW,
    open_printer: FnOpenPrinterW,
    close_printer: FnClosePrinter,
    xcv_data: FnXcvDataW,
}

impl WinspoolApi {
    fn load() -> std::result::Result<Self, String> {
        unsafe {
            let lib = Library::new(WINSPOOL_DLL).map_err(|e| format!("load {WINSPOOL_DLL}: {e}"))?;
            let enum_printers = symbol::<FnEnumPrintersW>(&lib, b"EnumPrintersW")?;
            let get_default_printer = symbol::<FnGetDefaultPrinterW>(&lib, b"GetDefaultPrinterW")?;
            let open_printer = symbol::<FnOpenPrinterW>(&lib, b"OpenPrinterW")?;
            let close_printer = symbol::<FnClosePrinter>(&lib, b"ClosePrinter")?;
            let xcv_data = symbol::<FnXcvDataW>(&lib, b"XcvDataW")?;
            debug!(library = WINSPOOL_DLL, "spooler entry points resolved");
            Ok(Self {
                _lib: lib,
                enum_printers,
                get_default_printer,
                open_printer,
                close_printer,
                xcv_data,
            })
        }
    }
}

/// # Safety
///
/// `T` must be the exact function-pointer type of the exported symbol.
unsafe fn symbol<T: Copy>(lib: &Library, name: &[u8]) -> std::result::Result<T, String> {
    unsafe {
        lib.get::<T>(name)
            .map(|s: Symbol<T>| *s)
            .map_err(|e| format!("resolve {}: {e}", String::from_utf8_lossy(name)))
    }
}

static WINSPOOL: OnceLock<std::result::Result<WinspoolApi, String>> = OnceLock::new();

fn api() -> Result<&'static WinspoolApi> {
    WINSPOOL
        .get_or_init(WinspoolApi::load)
        .as_ref()
        .map_err(|e| WinprintError::Bridge(e.clone()))
}

/// Outcome of a spooler call that follows the two-call sizing convention.
#[derive(Debug)]
pub enum RawCall<T> {
    /// The call succeeded.
    Done(T),
    /// The buffer was missing or too small; `T` carries the size needed.
    InsufficientBuffer(T),
    /// Any other failure.
    Failed(io::Error),
}

impl<T> RawCall<T> {
    fn from_bool(ok: BOOL, value: T) -> Self {
        if ok != FALSE {
            return Self::Done(value);
        }
        let err = io::Error::last_os_error();
        if err.raw_os_error() == Some(ERROR_INSUFFICIENT_BUFFER as i32) {
            Self::InsufficientBuffer(value)
        } else {
            Self::Failed(err)
        }
    }
}

/// Byte count and element count reported by `EnumPrintersW`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumCounts {
    pub needed: u32,
    pub returned: u32,
}

pub fn enum_flags(scope: EnumScope) -> u32 {
    let mut flags = 0;
    if scope.local {
        flags |= PRINTER_ENUM_LOCAL;
    }
    if scope.connections {
        flags |= PRINTER_ENUM_CONNECTIONS;
    }
    flags
}

/// `EnumPrintersW` for the local server. `buffer: None` is the sizing call.
pub fn enum_printers(flags: u32, level: u32, buffer: Option<&mut [u8]>) -> Result<RawCall<EnumCounts>> {
    let api = api()?;
    let (ptr, len) = match buffer {
        Some(buf) => (buf.as_mut_ptr(), buf.len() as DWORD),
        None => (null_mut(), 0),
    };
    let mut counts = EnumCounts::default();
    let ok = unsafe {
        (api.enum_printers)(
            flags,
            null_mut(),
            level,
            ptr,
            len,
            &mut counts.needed,
            &mut counts.returned,
        )
    };
    Ok(RawCall::from_bool(ok, counts))
}

/// `GetDefaultPrinterW`. `size` is in characters, including the terminator.
pub fn default_printer(buffer: Option<&mut [u16]>, size: &mut u32) -> Result<RawCall<()>> {
    let api = api()?;
    let ptr = match buffer {
        Some(buf) => {
            *size = (*size).min(buf.len() as u32);
            buf.as_mut_ptr()
        }
        None => {
            *size = 0;
            null_mut()
        }
    };
    let ok = unsafe { (api.get_default_printer)(ptr, size) };
    Ok(RawCall::from_bool(ok, ()))
}

/// Reply counters from `XcvDataW`.
#[derive(Debug, Clone, Copy, Default)]
pub struct XcvReply {
    pub needed: u32,
    pub status: u32,
}

/// An open spooler handle, closed when dropped.
pub struct PrinterHandle {
    raw: HANDLE,
}

impl PrinterHandle {
    /// `OpenPrinterW` with only `DesiredAccess` set in the defaults.
    pub fn open(name: &str, access: u32) -> Result<Self> {
        let api = api()?;
        let mut wide = to_wide(name);
        let mut defaults = PRINTER_DEFAULTSW {
            pDatatype: null_mut(),
            pDevMode: null_mut(),
            DesiredAccess: access,
        };
        let mut raw: HANDLE = null_mut();
        if unsafe { (api.open_printer)(wide.as_mut_ptr(), &mut raw, &mut defaults) } == FALSE {
            return Err(io::Error::last_os_error().into());
        }
        Ok(Self { raw })
    }

    /// Send a vendor-extension command through this handle.
    ///
    /// # Safety
    ///
    /// `I` and `O` must be `repr(C)` plain-data structures matching what the
    /// monitor expects for `command`.
    pub unsafe fn xcv_data<I, O>(&self, command: &str, input: &I, output: &mut O) -> Result<XcvReply> {
        let api = api()?;
        let command = to_wide(command);
        let mut reply = XcvReply::default();
        let ok = unsafe {
            (api.xcv_data)(
                self.raw,
                command.as_ptr(),
                (input as *const I).cast_mut().cast::<u8>(),
                std::mem::size_of::<I>() as DWORD,
                (output as *mut O).cast::<u8>(),
                std::mem::size_of::<O>() as DWORD,
                &mut reply.needed,
                &mut reply.status,
            )
        };
        if ok == FALSE {
            return Err(io::Error::last_os_error().into());
        }
        Ok(reply)
    }

    /// Close explicitly, surfacing a `ClosePrinter` failure.
    pub fn close(mut self) -> Result<()> {
        let raw = std::mem::replace(&mut self.raw, null_mut());
        let api = api()?;
        if unsafe { (api.close_printer)(raw) } == FALSE {
            return Err(io::Error::last_os_error().into());
        }
        Ok(())
    }
}

impl Drop for PrinterHandle {
    fn drop(&mut self) {
        if self.raw.is_null() {
            return;
        }
        if let Ok(api) = api() {
            if unsafe { (api.close_printer)(self.raw) } == FALSE {
                debug!(error = %io::Error::last_os_error(), "ClosePrinter failed");
            }
        }
    }
}
