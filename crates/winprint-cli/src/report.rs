// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Plain-text printer report.

use std::fmt::Write;

use winprint_core::types::PrinterRecord;

/// Render the collected printers. Unresolved optional fields are omitted.
pub fn render(printers: &[PrinterRecord]) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_report(&mut out, printers);
    out
}

fn write_report(out: &mut String, printers: &[PrinterRecord]) -> std::fmt::Result {
    writeln!(out, "\nPrinters found: {}", printers.len())?;
    writeln!(out, "{}", "=".repeat(80))?;

    for p in printers {
        writeln!(out, "Printer #{}:", p.index)?;
        writeln!(out, "  Name: {}", p.name)?;
        writeln!(out, "  Default printer: {}", p.is_default)?;
        if let Some(share) = &p.share_name {
            writeln!(out, "  Share name: {share}")?;
        }
        writeln!(out, "  Port: {}", p.port_name)?;
        if !p.ip.is_empty() {
            writeln!(out, "  IP address: {}", p.ip)?;
        }
        if p.port != 0 {
            writeln!(out, "  Port number: {}", p.port)?;
        }
        writeln!(out, "  Driver: {}", p.driver_name)?;
        if let Some(location) = &p.location {
            writeln!(out, "  Location: {location}")?;
        }
        if let Some(uuid) = &p.uuid {
            writeln!(out, "  UUID: {uuid}")?;
        }
        if let Some(model) = &p.model_name {
            writeln!(out, "  Model: {model}")?;
        }
        writeln!(out, "  Status: {}", p.status)?;
        writeln!(out, "  SNMP enabled: {}", p.snmp_enabled)?;
        writeln!(out, "{}", "-".repeat(40))?;
    }
    Ok(())
}
