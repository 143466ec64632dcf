//! # Settling Rope
//!
//! A bouncy rope whose damping ramps from almost nothing to heavy, so it
//! swings at first and comes to rest within a few seconds.
//!
//! Run with: `cargo run --example settle`

use ropesim::prelude::*;

fn main() {
    let config = RopeConfig::default()
        .with_node_count(16)
        .with_segment_length(0.5)
        .with_tension(1.2)
        .with_damping(0.02, 3.0, 0.6)
        .with_line_width(0.05);

    Viewer::new(config)
        .with_title("ropesim - settle")
        .run()
        .unwrap();
}
