// src/pipeline/frame_context.rs
//
// Per-frame input and output of the engine. FrameOutput is the only
// contract with the overlay renderer and the telemetry/logging side:
// every consumer reads from the same value instead of shared state.

use crate::analysis::{Classification, DynamicsEstimate, GrowthLabel, RiskLevel, Verdict};
use crate::detection::Candidate;
use crate::types::Point;
use serde::Serialize;

const MIN_DISTANCE_M: f64 = 10.0;
const MAX_BASE_DISTANCE_M: f64 = 500.0;

#[derive(Debug, Clone, Copy)]
pub struct FrameInput<'a> {
    pub frame_id: u64,
    pub width: i32,
    pub height: i32,
    pub candidates: &'a [Candidate],
}

#[derive(Debug, Clone, Serialize)]
pub struct FrameOutput {
    pub frame_id: u64,
    pub detection_present: bool,
    pub position: Option<Point>,
    pub radius: Option<i32>,
    pub predicted_position: Option<Point>,
    pub distance_to_center: Option<f64>,
    pub direction_label: String,
    pub growth_label: GrowthLabel,
    pub dynamics: DynamicsEstimate,
    pub classification: Option<Classification>,
    /// Classifier tier with the verdict's override applied
    pub effective_risk: Option<RiskLevel>,
    pub verdict: Verdict,
    pub estimated_distance_m: Option<f64>,
}

impl FrameOutput {
    pub fn no_target(frame_id: u64, dynamics: DynamicsEstimate) -> Self {
        Self {
            frame_id,
            detection_present: false,
            position: None,
            radius: None,
            predicted_position: None,
            distance_to_center: None,
            direction_label: "STATIONARY".to_string(),
            growth_label: GrowthLabel::Stable,
            dynamics,
            classification: None,
            effective_risk: None,
            verdict: Verdict::no_target(),
            estimated_distance_m: None,
        }
    }

    /// Secondary banner line, e.g. "V: LEFT UP | Z: APPROACHING"
    pub fn vector_text(&self) -> String {
        if !self.detection_present {
            return "NO TARGET".to_string();
        }
        format!(
            "V: {} | Z: {}",
            self.direction_label,
            self.growth_label.as_str()
        )
    }

    /// The predicted-path arrow is only worth drawing for visible motion
    pub fn shows_trajectory_arrow(&self) -> bool {
        let (dx, dy) = self.dynamics.velocity;
        self.detection_present && (dx.abs() > 1 || dy.abs() > 1)
    }

    pub fn status_message(&self) -> &str {
        &self.verdict.status_message
    }
}

/// Apparent size → rough range. Larger on screen = closer.
pub fn estimate_distance_m(radius: i32) -> f64 {
    (MAX_BASE_DISTANCE_M - radius as f64 * 2.0).max(MIN_DISTANCE_M)
}
