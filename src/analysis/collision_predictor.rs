// src/analysis/collision_predictor.rs
//
// Linear extrapolation of the current position and a proximity test against
// the exclusion zone around the frame center. No physics: the velocity is
// assumed constant over the lookahead.

use crate::types::{Point, PredictionConfig};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CollisionPrediction {
    pub predicted: Point,
    /// Distance from the predicted point to the frame center (pixels)
    pub distance: f64,
    pub collision: bool,
}

pub struct CollisionPredictor {
    lookahead_frames: i32,
    exclusion_radius: f64,
}

impl CollisionPredictor {
    pub fn new(config: &PredictionConfig) -> Self {
        Self {
            lookahead_frames: config.lookahead_frames,
            exclusion_radius: config.exclusion_radius,
        }
    }

    pub fn predict(&self, position: Point, velocity: (i32, i32), center: Point) -> CollisionPrediction {
        let (dx, dy) = velocity;
        let n = self.lookahead_frames as i64;
        let px = position.x as i64 + dx as i64 * n;
        let py = position.y as i64 + dy as i64 * n;
        let distance = (px - center.x as i64) as f64;
        let distance = distance.hypot((py - center.y as i64) as f64);

        // Reported point is clamped to frame space; distance uses the exact one
        let predicted = Point::new(clamp_px(px), clamp_px(py));

        CollisionPrediction {
            predicted,
            distance,
            collision: distance < self.exclusion_radius,
        }
    }

}

fn clamp_px(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Fixed reference point of a frame
pub fn frame_center(width: i32, height: i32) -> Point {
    Point::new(width / 2, height / 2)
}
