//! Rope configuration.
//!
//! [`RopeConfig`] holds every tunable of a rope. Values are fixed once a
//! [`RopeSimulator`](crate::RopeSimulator) is built from it.
//!
//! # Example
//!
//! ```
//! use ropesim::RopeConfig;
//!
//! let config = RopeConfig::default()
//!     .with_node_count(24)
//!     .with_tension(0.8)
//!     .with_damping(0.1, 0.9, 0.2);
//!
//! assert!(config.validate().is_ok());
//! ```
//!
//! Configurations can also be loaded from JSON. Missing keys take the
//! defaults:
//!
//! ```
//! use ropesim::RopeConfig;
//!
//! let config = RopeConfig::from_json_str(r#"{ "node_count": 4, "gravity": 1.6 }"#).unwrap();
//! assert_eq!(config.node_count, 4);
//! assert_eq!(config.tension, 0.3);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, RopeError};

/// Parameters of a rope simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RopeConfig {
    /// Number of nodes in the chain, anchors included. Must be at least 2.
    pub node_count: usize,
    /// Mass of every node.
    pub node_mass: f32,
    /// Rest length of each segment, also the horizontal spacing at layout.
    pub segment_length: f32,
    /// Downward acceleration along -Y.
    pub gravity: f32,
    /// Damping of the first node at layout.
    pub initial_damping: f32,
    /// Damping of the last node at layout, and the ceiling of the ramp.
    pub max_damping: f32,
    /// Damping added per simulated second until `max_damping` is reached.
    pub damping_increase_rate: f32,
    /// Spring stiffness scale applied to every segment.
    pub tension: f32,
    /// Width of the rendered line. Not used by the physics.
    pub line_width: f32,
}

impl Default for RopeConfig {
    fn default() -> Self {
        Self {
            node_count: 10,
            node_mass: 1.0,
            segment_length: 1.0,
            gravity: 9.8,
            initial_damping: 0.5,
            max_damping: 0.5,
            damping_increase_rate: 0.05,
            tension: 0.3,
            line_width: 0.1,
        }
    }
}

impl RopeConfig {
    /// Set the number of nodes.
    pub fn with_node_count(mut self, count: usize) -> Self {
        self.node_count = count;
        self
    }

    /// Set the mass of every node.
    pub fn with_node_mass(mut self, mass: f32) -> Self {
        self.node_mass = mass;
        self
    }

    /// Set the rest length of each segment.
    pub fn with_segment_length(mut self, length: f32) -> Self {
        self.segment_length = length;
        self
    }

    /// Set the gravitational acceleration.
    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the damping ramp: starting value, ceiling, and increase per second.
    pub fn with_damping(mut self, initial: f32, max: f32, increase_rate: f32) -> Self {
        self.initial_damping = initial;
        self.max_damping = max;
        self.damping_increase_rate = increase_rate;
        self
    }

    /// Set the spring stiffness.
    pub fn with_tension(mut self, tension: f32) -> Self {
        self.tension = tension;
        self
    }

    /// Set the rendered line width.
    pub fn with_line_width(mut self, width: f32) -> Self {
        self.line_width = width;
        self
    }

    /// Check that the configuration describes a well-defined rope.
    ///
    /// Rejects fewer than two nodes, a non-positive node mass, and any
    /// non-finite parameter. An inverted damping range is allowed.
    pub fn validate(&self) -> Result<(), RopeError> {
        if self.node_count < 2 {
            return Err(RopeError::invalid(format!(
                "node_count must be at least 2, got {}",
                self.node_count
            )));
        }

        let fields = [
            ("node_mass", self.node_mass),
            ("segment_length", self.segment_length),
            ("gravity", self.gravity),
            ("initial_damping", self.initial_damping),
            ("max_damping", self.max_damping),
            ("damping_increase_rate", self.damping_increase_rate),
            ("tension", self.tension),
            ("line_width", self.line_width),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(RopeError::invalid(format!(
                "{name} must be finite, got {value}"
            )));
        }

        if self.node_mass <= 0.0 {
            return Err(RopeError::invalid(format!(
                "node_mass must be positive, got {}",
                self.node_mass
            )));
        }

        Ok(())
    }

    /// Parse a configuration from JSON and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: RopeConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> String {
        // A struct of plain numbers always serializes.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
