// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for winprint.

use thiserror::Error;

/// Top-level error type for all winprint operations.
#[derive(Debug, Error)]
pub enum WinprintError {
    // -- Spooler errors --
    #[error("{0}")]
    Enumeration(String),

    #[error("default printer query failed: {0}")]
    DefaultPrinter(String),

    #[error("port monitor query failed: {0}")]
    PortMonitor(String),

    // -- Registry --
    #[error("registry key not found: {0}")]
    RegistryKeyNotFound(String),

    #[error("registry read failed: {0}")]
    Registry(String),

    // -- Device discovery --
    #[error("device discovery failed: {0}")]
    Discovery(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

impl WinprintError {
    /// Wrap an enumeration failure with the `EnumPrinters` context.
    pub fn enumeration(cause: impl std::fmt::Display) -> Self {
        Self::Enumeration(format!("EnumPrinters failed: {cause}"))
    }

    /// Add the `EnumPrinters` context unless it is already there.
    pub fn in_enumeration(self) -> Self {
        match self {
            Self::Enumeration(_) => self,
            other => Self::enumeration(other),
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, WinprintError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumeration_error_carries_context() {
        let err = WinprintError::enumeration("Access is denied. (os error 5)");
        assert_eq!(
            err.to_string(),
            "EnumPrinters failed: Access is denied. (os error 5)"
        );
    }

    #[test]
    fn enumeration_context_is_added_once() {
        let err = WinprintError::PlatformUnavailable.in_enumeration();
        assert_eq!(
            err.to_string(),
            "EnumPrinters failed: feature not available on this platform"
        );
        let err = WinprintError::enumeration("os error 5").in_enumeration();
        assert_eq!(err.to_string(), "EnumPrinters failed: os error 5");
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::from(std::io::ErrorKind::PermissionDenied);
        let err: WinprintError = io.into();
        assert!(matches!(err, WinprintError::Io(_)));
    }
}
