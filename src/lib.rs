//! # ropesim
//!
//! Real-time mass-spring rope simulation.
//!
//! A rope is a chain of point masses. The two end nodes are fixed anchors;
//! every node in between falls under gravity, is pulled toward its
//! neighbours by a spring force, and is slowed by a damping coefficient that
//! ramps up over time so the rope settles.
//!
//! ## Quick Start
//!
//! ```
//! use ropesim::prelude::*;
//!
//! let config = RopeConfig::default()
//!     .with_node_count(16)
//!     .with_tension(0.5);
//! let mut rope = RopeSimulator::new(config).unwrap();
//!
//! // Drive it from any loop that can supply a time step.
//! for _ in 0..120 {
//!     rope.step(1.0 / 60.0);
//! }
//!
//! for point in rope.positions() {
//!     // hand to a renderer
//!     let _ = point;
//! }
//! ```
//!
//! ## Integration
//!
//! Each [`RopeSimulator::step`] runs three passes over the interior nodes:
//!
//! 1. velocity from gravity, the two neighbour springs, and damping
//! 2. position from the new velocity
//! 3. damping ramp toward `max_damping`
//!
//! Every node in pass 1 reads the positions from before the step, so the
//! update does not depend on node order.
//!
//! ## Rendering
//!
//! The simulator only produces points. Implement [`PolylineSink`] to draw
//! them, or open the bundled wgpu [`Viewer`]:
//!
//! ```no_run
//! use ropesim::{RopeConfig, Viewer};
//!
//! Viewer::new(RopeConfig::default()).run().unwrap();
//! ```

pub mod config;
pub mod error;
pub mod gpu;
mod node;
pub mod render;
mod rope;
pub mod time;
mod window;

pub use config::RopeConfig;
pub use error::{ConfigError, RopeError, ViewerError};
pub use glam::Vec3;
pub use node::Node;
pub use render::{PolylineSink, Ribbon, RibbonVertex};
pub use rope::RopeSimulator;
pub use window::Viewer;

/// Convenient re-exports for common usage.
///
/// ```
/// use ropesim::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::RopeConfig;
    pub use crate::node::Node;
    pub use crate::render::PolylineSink;
    pub use crate::rope::RopeSimulator;
    pub use crate::time::Clock;
    pub use crate::window::Viewer;
    pub use crate::Vec3;
}
