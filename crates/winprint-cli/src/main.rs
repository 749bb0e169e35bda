// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// winprint-info — prints every printer known to the local spooler together
// with its resolved network port details.
//
// Entry point. Initialises logging, collects the printer list and writes the
// report to stdout.

mod report;

use std::process::ExitCode;

use winprint_core::InventoryConfig;
use winprint_inventory::{KeywordDiscovery, PrinterCollector};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let bridge = winprint_bridge::platform_bridge();
    let config = InventoryConfig::default();
    let discovery = KeywordDiscovery::from_config(&config);
    let collector = PrinterCollector::new(bridge.as_ref(), &discovery, config);

    println!("Collecting printer information...");

    let printers = match collector.collect() {
        Ok(printers) => printers,
        Err(e) => {
            tracing::error!(error = %e, platform = bridge.platform_name(), "printer collection failed");
            eprintln!("Failed to collect printer information: {e}");
            return ExitCode::FAILURE;
        }
    };

    print!("{}", report::render(&printers));

    if let Ok(Some(name)) = collector.default_printer() {
        println!("\nDefault printer: {name}");
    }

    ExitCode::SUCCESS
}
