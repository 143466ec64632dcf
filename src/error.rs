//! Error types for ropesim.
//!
//! This module provides error types for rope construction, configuration
//! loading, and viewer startup.

use thiserror::Error;

/// Errors raised when building a rope from a configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RopeError {
    /// A configuration value makes the simulation ill-defined.
    #[error("Invalid rope configuration: {reason}")]
    InvalidConfiguration {
        /// Which value was rejected and why.
        reason: String,
    },
}

impl RopeError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        RopeError::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

/// Errors that can occur while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the file from disk.
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid configuration JSON.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// The file parsed but holds values the simulator rejects.
    #[error(transparent)]
    Invalid(#[from] RopeError),
}

/// Errors that can occur when starting the viewer.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// Failed to create event loop.
    #[error("Failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// Failed to create window.
    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    /// Failed to create a surface for rendering.
    #[error("Failed to create GPU surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    #[error("No compatible GPU adapter found: {0}")]
    NoAdapter(#[from] wgpu::RequestAdapterError),
    /// Failed to create GPU device.
    #[error("Failed to create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    /// The rope configuration was rejected.
    #[error(transparent)]
    Config(#[from] RopeError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_invalid_configuration_message() {
        let err = RopeError::invalid("node_count must be at least 2, got 1");
        assert_eq!(
            err.to_string(),
            "Invalid rope configuration: node_count must be at least 2, got 1"
        );
    }

    #[test]
    fn test_config_error_wraps_rope_error() {
        let err: ConfigError = RopeError::invalid("node_mass must be positive").into();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert_eq!(
            err.to_string(),
            "Invalid rope configuration: node_mass must be positive"
        );
    }

    #[test]
    fn test_config_error_io_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = ConfigError::from(io);
        assert!(err.source().is_some());
    }
}
