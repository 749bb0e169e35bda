// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// winprint Inventory — spooler enumeration, network port resolution and WSD
// device lookup.  This crate turns the raw answers of `winprint-bridge` into
// the `PrinterRecord` list defined in `winprint-core`.

pub mod collector;
pub mod port_resolver;
pub mod wsd;

pub use collector::PrinterCollector;
pub use port_resolver::PortResolver;
pub use wsd::{KeywordDiscovery, WsDiscovery, WsdResolver};
