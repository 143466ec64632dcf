//! # Headless Rope
//!
//! Steps a default rope at 60 Hz with no window and prints the node
//! positions every half second as tab-separated values.
//!
//! Run with: `cargo run --example headless`

use ropesim::prelude::*;

/// Prints each polyline it receives as one block of rows.
struct TsvSink {
    frame: u32,
}

impl PolylineSink for TsvSink {
    fn draw_polyline(&mut self, points: &[Vec3], width: f32) {
        println!("# frame {} (width {})", self.frame, width);
        for (i, p) in points.iter().enumerate() {
            println!("{i}\t{:.4}\t{:.4}", p.x, p.y);
        }
        self.frame += 1;
    }
}

fn main() {
    let mut rope = RopeSimulator::new(RopeConfig::default()).unwrap();
    let mut sink = TsvSink { frame: 0 };

    for tick in 0..=180 {
        if tick % 30 == 0 {
            rope.render_to(&mut sink);
        }
        rope.step(1.0 / 60.0);
    }
}
