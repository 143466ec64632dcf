//! Point masses of the chain.

use glam::Vec3;

/// One point mass of the rope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    /// Constant after layout.
    pub mass: f32,
    /// World-space position.
    pub position: Vec3,
    /// Stays zero for anchors.
    pub velocity: Vec3,
    /// Velocity damping coefficient, ramped by each step.
    pub damping: f32,
}

impl Node {
    /// Create a node at rest.
    pub fn new(mass: f32, position: Vec3, damping: f32) -> Self {
        Self {
            mass,
            position,
            velocity: Vec3::ZERO,
            damping,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_is_at_rest() {
        let node = Node::new(2.0, Vec3::new(1.0, 2.0, 3.0), 0.25);
        assert_eq!(node.mass, 2.0);
        assert_eq!(node.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(node.velocity, Vec3::ZERO);
        assert_eq!(node.damping, 0.25);
    }
}
