//! The mass-spring rope integrator.
//!
//! A [`RopeSimulator`] owns a fixed chain of [`Node`]s. The first and last
//! nodes are anchors and never move; every interior node is pulled by
//! gravity and by a spring force toward each neighbour, then damped.
//!
//! # Example
//!
//! ```
//! use ropesim::{RopeConfig, RopeSimulator};
//!
//! let mut rope = RopeSimulator::new(RopeConfig::default()).unwrap();
//!
//! for _ in 0..60 {
//!     rope.step(1.0 / 60.0);
//! }
//!
//! let points = rope.positions();
//! assert_eq!(points.len(), 10);
//! ```

use glam::Vec3;
use tracing::{debug, warn};

use crate::config::RopeConfig;
use crate::error::RopeError;
use crate::node::Node;
use crate::render::PolylineSink;

/// Height of the first node at layout.
const LAYOUT_FIRST_Y: f32 = 2.0;
/// Height the layout interpolates toward.
const LAYOUT_LAST_Y: f32 = 0.0;

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// A chain of point masses joined by tension springs.
#[derive(Debug, Clone)]
pub struct RopeSimulator {
    config: RopeConfig,
    nodes: Vec<Node>,
    elapsed: f32,
}

impl RopeSimulator {
    /// Lay out a rope from `config`.
    ///
    /// Nodes are placed `segment_length` apart along X, starting one segment
    /// right of `-node_count * segment_length / 2`, so the chain is not
    /// centred on the origin. Heights interpolate from 2.0 toward 0.0 by
    /// `i / node_count`, which leaves the last node one step above 0.0,
    /// while dampings interpolate by `i / (node_count - 1)` and do reach
    /// `max_damping` at the last node. Both quirks are kept so existing rope
    /// setups look the same; they are candidates for correction.
    ///
    /// # Errors
    ///
    /// Returns [`RopeError::InvalidConfiguration`] if `config` fails
    /// [`RopeConfig::validate`].
    pub fn new(config: RopeConfig) -> Result<Self, RopeError> {
        config.validate()?;

        if config.max_damping < config.initial_damping {
            warn!(
                initial_damping = config.initial_damping,
                max_damping = config.max_damping,
                "max_damping is below initial_damping; the damping ramp will clamp downward"
            );
        }

        let nodes = layout(&config);
        debug!(
            node_count = nodes.len(),
            segment_length = config.segment_length,
            "rope laid out"
        );

        Ok(Self {
            config,
            nodes,
            elapsed: 0.0,
        })
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Runs three full passes over the interior nodes: velocities from the
    /// current positions, then positions from the new velocities, then the
    /// damping ramp. The first pass only reads positions, so every node sees
    /// the same snapshot of its neighbours. Anchors are never touched.
    ///
    /// Gravity and damping scale with `dt`; the spring forces are added to
    /// the velocity once per step as an impulse. A zero `dt` leaves the rope
    /// untouched, so `step` is discontinuous at zero: any positive `dt`, however
    /// small, still applies the full spring impulse. A negative or non-finite
    /// `dt` is ignored.
    pub fn step(&mut self, dt: f32) {
        if !dt.is_finite() || dt < 0.0 {
            warn!(dt, "ignoring invalid time step");
            return;
        }
        if dt == 0.0 {
            return;
        }

        let last = self.nodes.len() - 1;
        let gravity = Vec3::new(0.0, -self.config.gravity * dt, 0.0);

        for i in 1..last {
            let left = self.tension_force(&self.nodes[i], &self.nodes[i - 1]);
            let right = self.tension_force(&self.nodes[i], &self.nodes[i + 1]);

            let node = &mut self.nodes[i];
            node.velocity += gravity;
            node.velocity += left / node.mass;
            node.velocity += right / node.mass;
            node.velocity *= 1.0 - node.damping * dt;
        }

        for node in &mut self.nodes[1..last] {
            node.position += node.velocity * dt;
        }

        let increase = self.config.damping_increase_rate * dt;
        let max_damping = self.config.max_damping;
        for node in &mut self.nodes[1..last] {
            node.damping = (node.damping + increase).min(max_damping);
        }

        self.elapsed += dt;
    }

    /// Spring force exerted on `a` by its link to `b`.
    ///
    /// Stretched links pull `a` toward `b`, compressed links push it away.
    /// Coincident nodes have no defined direction and yield zero force.
    pub fn tension_force(&self, a: &Node, b: &Node) -> Vec3 {
        let direction = b.position - a.position;
        let distance = direction.length();
        let magnitude =
            (distance - self.config.segment_length) * (a.mass * b.mass).sqrt() * self.config.tension;
        magnitude * direction.normalize_or_zero()
    }

    /// Current node positions in chain order.
    pub fn positions(&self) -> Vec<Vec3> {
        self.nodes.iter().map(|n| n.position).collect()
    }

    /// Hand the current polyline to a renderer, with the configured width.
    pub fn render_to<S: PolylineSink + ?Sized>(&self, sink: &mut S) {
        sink.draw_polyline(&self.positions(), self.config.line_width);
    }

    /// Restore the initial layout and clear the simulated time.
    pub fn reset(&mut self) {
        self.nodes = layout(&self.config);
        self.elapsed = 0.0;
        debug!(node_count = self.nodes.len(), "rope reset");
    }

    /// All nodes, anchors included.
    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The node at `index`, if any.
    #[inline]
    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Number of nodes, anchors included.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; a valid rope has at least two nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The configuration this rope was built from.
    #[inline]
    pub fn config(&self) -> &RopeConfig {
        &self.config
    }

    /// Simulated seconds accumulated by [`step`](Self::step) since the
    /// last layout.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

fn layout(config: &RopeConfig) -> Vec<Node> {
    let count = config.node_count;
    let mut nodes = Vec::with_capacity(count);
    let mut x = -(count as f32) * config.segment_length * 0.5;

    for i in 0..count {
        x += config.segment_length;
        let y = lerp(LAYOUT_FIRST_Y, LAYOUT_LAST_Y, i as f32 / count as f32);
        let damping = lerp(
            config.initial_damping,
            config.max_damping,
            i as f32 / (count - 1) as f32,
        );
        nodes.push(Node::new(config.node_mass, Vec3::new(x, y, 0.0), damping));
    }

    nodes
}
