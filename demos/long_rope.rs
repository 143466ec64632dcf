//! # Long Rope
//!
//! Sixty nodes stepped at a fixed 120 Hz in slow motion.
//!
//! Run with: `cargo run --example long_rope`

use ropesim::prelude::*;

fn main() {
    let config = RopeConfig::default()
        .with_node_count(60)
        .with_segment_length(0.25)
        .with_tension(0.9)
        .with_damping(0.3, 1.0, 0.1)
        .with_line_width(0.04);

    Viewer::new(config)
        .with_title("ropesim - long rope")
        .with_fixed_delta(Some(1.0 / 120.0))
        .with_time_scale(0.5)
        .run()
        .unwrap();
}
