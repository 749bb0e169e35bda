// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! winprint — Native platform bridge abstractions.
//!
//! This crate defines the traits the inventory logic talks to (spooler,
//! port monitor, registry) and the platform dispatch that picks an
//! implementation. On Windows the bridge calls `winspool.drv` and the
//! registry; everywhere else a stub reports `PlatformUnavailable`.

pub mod strings;
pub mod tcpxcv;
pub mod traits;

#[cfg(windows)]
pub mod windows;

#[cfg(not(windows))]
pub mod stub;

/// Retrieves the bridge implementation for the target operating system.
pub fn platform_bridge() -> Box<dyn traits::PlatformBridge> {
    #[cfg(windows)]
    {
        Box::new(windows::WindowsBridge::new())
    }
    #[cfg(not(windows))]
    {
        // Non-Windows builds: every call reports PlatformUnavailable.
        Box::new(stub::StubBridge)
    }
}
