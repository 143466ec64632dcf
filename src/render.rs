//! Rendering seam and line geometry.
//!
//! The simulator does not draw anything itself. After each step a host hands
//! the node positions to a [`PolylineSink`], which draws a connected line of
//! the configured width through them. [`Ribbon`] turns such a polyline into a
//! triangle strip for renderers that have no wide-line primitive.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Receives the rope as an ordered list of points once per frame.
pub trait PolylineSink {
    /// Draw a connected line through `points` with the given `width`.
    fn draw_polyline(&mut self, points: &[Vec3], width: f32);
}

/// GPU vertex of a ribbon strip.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct RibbonVertex {
    /// World-space position.
    pub position: [f32; 3],
    /// Normalized distance along the line (0.0 at the first point, 1.0 at
    /// the last). Used for shading.
    pub along: f32,
}

/// A polyline expanded into a camera-facing triangle strip.
///
/// Each input point contributes two vertices, offset by half the width on
/// either side of the line, perpendicular to both the line and the view
/// direction.
#[derive(Debug, Clone, Default)]
pub struct Ribbon {
    vertices: Vec<RibbonVertex>,
}

impl Ribbon {
    /// Build the strip for `points`, seen along `view_dir`.
    pub fn build(points: &[Vec3], width: f32, view_dir: Vec3) -> Self {
        let mut ribbon = Self::default();
        ribbon.rebuild(points, width, view_dir);
        ribbon
    }

    /// Rebuild in place, reusing the vertex allocation.
    pub fn rebuild(&mut self, points: &[Vec3], width: f32, view_dir: Vec3) {
        self.vertices.clear();
        self.vertices.reserve(points.len() * 2);

        let half_width = width * 0.5;
        let last = points.len().saturating_sub(1);
        let mut prev_side = Vec3::Y;

        for (i, &point) in points.iter().enumerate() {
            let ahead = points[(i + 1).min(last)];
            let behind = points[i.saturating_sub(1)];
            let tangent = ahead - behind;

            // Tangent parallel to the view (or zero): keep the last good side.
            let side = tangent.cross(view_dir).try_normalize().unwrap_or(prev_side);
            prev_side = side;

            let along = if last == 0 { 0.0 } else { i as f32 / last as f32 };
            let offset = side * half_width;
            self.vertices.push(RibbonVertex {
                position: (point - offset).to_array(),
                along,
            });
            self.vertices.push(RibbonVertex {
                position: (point + offset).to_array(),
                along,
            });
        }
    }

    /// Strip vertices, two per input point.
    pub fn vertices(&self) -> &[RibbonVertex] {
        &self.vertices
    }

    /// Vertex data as bytes for buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Number of vertices in the strip.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the strip has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

impl PolylineSink for Ribbon {
    /// Builds the strip as seen from the default front view (looking down -Z).
    fn draw_polyline(&mut self, points: &[Vec3], width: f32) {
        self.rebuild(points, width, Vec3::NEG_Z);
    }
}
