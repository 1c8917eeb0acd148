// src/detection/types.rs

use crate::types::Point;
use serde::{Deserialize, Serialize};

/// Raw detector candidate for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub bbox: [f32; 4], // [x1, y1, x2, y2] pixels
    pub confidence: f32,
}

impl Candidate {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32, confidence: f32) -> Self {
        Self {
            bbox: [x1, y1, x2, y2],
            confidence,
        }
    }

    /// Corner coordinates truncated toward zero
    pub fn corners(&self) -> (i32, i32, i32, i32) {
        (
            self.bbox[0] as i32,
            self.bbox[1] as i32,
            self.bbox[2] as i32,
            self.bbox[3] as i32,
        )
    }
}

/// Everything the detector reports for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorFrame {
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// The single accepted detection of a frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Detection {
    pub center: Point,
    pub radius: i32,
    pub confidence: f32,
}
