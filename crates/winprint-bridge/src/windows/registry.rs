// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// HKLM reads for the port monitors' persisted configuration.

use std::io;

use winreg::enums::*;
use winreg::types::FromRegValue;
use winreg::{RegKey, RegValue};

use winprint_core::error::{Result, WinprintError};

use crate::traits::RegistryValues;

/// Read every string-like value of `HKLM\<path>`.
pub fn read_key(path: &str) -> Result<RegistryValues> {
    let hklm = RegKey::predef(HKEY_LOCAL_MACHINE);
    let key = hklm
        .open_subkey_with_flags(path, KEY_QUERY_VALUE)
        .map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => WinprintError::RegistryKeyNotFound(path.to_owned()),
            _ => WinprintError::Registry(format!("open {path}: {e}")),
        })?;

    let mut values = RegistryValues::default();
    for item in key.enum_values() {
        let (name, value) =
            item.map_err(|e| WinprintError::Registry(format!("enumerate {path}: {e}")))?;
        if let Some(text) = value_as_string(&value) {
            values.insert(name, text);
        }
    }
    Ok(values)
}

/// Strings as-is, DWORDs in decimal, everything else skipped.
fn value_as_string(value: &RegValue) -> Option<String> {
    match value.vtype {
        REG_SZ | REG_EXPAND_SZ => String::from_reg_value(value).ok(),
        REG_DWORD => u32::from_reg_value(value).ok().map(|n| n.to_string()),
        _ => None,
    }
}
