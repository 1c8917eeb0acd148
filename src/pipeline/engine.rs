// src/pipeline/engine.rs
//
// Orchestrator that wires the detection filter, motion history, dynamics
// estimator, collision predictor, threat classifier and maneuver decision.
//
// Single entry point: call process_frame() once per frame. The history push
// for frame N is committed before dynamics are read for frame N, so frames
// must never be processed concurrently on one engine. Each viewer/stream
// gets its own AvoidanceEngine.

use super::frame_context::{estimate_distance_m, FrameInput, FrameOutput};
use crate::analysis::{
    direction_label, frame_center, CollisionPredictor, DecisionInput, DynamicsEstimator,
    GrowthLabel, ManeuverDecision, MotionHistory, Slot, ThreatClassifier,
};
use crate::detection::DetectionFilter;
use crate::types::Config;
use tracing::debug;

pub struct AvoidanceEngine {
    filter: DetectionFilter,
    history: MotionHistory,
    predictor: CollisionPredictor,
    decision: ManeuverDecision,
    growth_threshold: f64,
    movement_threshold: i32,
}

impl AvoidanceEngine {
    pub fn new(config: &Config) -> Self {
        Self {
            filter: DetectionFilter::new(config.detection.clone()),
            history: MotionHistory::new(),
            predictor: CollisionPredictor::new(&config.prediction),
            decision: ManeuverDecision::new(&config.maneuver),
            growth_threshold: config.prediction.growth_threshold,
            movement_threshold: config.prediction.movement_threshold,
        }
    }

    pub fn process_frame(&mut self, input: &FrameInput<'_>) -> FrameOutput {
        // 1. Filter → exactly one history entry per frame
        let detection = self.filter.select(input.candidates);
        self.history.push(
            Slot::from(detection.map(|d| d.center)),
            Slot::from(detection.map(|d| d.radius)),
        );

        // 2. Dynamics over the buffer just updated
        let dynamics = DynamicsEstimator::estimate(&self.history.snapshot());

        let Some(detection) = detection else {
            debug!("Frame {}: no target", input.frame_id);
            return FrameOutput::no_target(input.frame_id, dynamics);
        };

        // 3. Prediction and classification are independent of each other
        let center = frame_center(input.width, input.height);
        let prediction = self
            .predictor
            .predict(detection.center, dynamics.velocity, center);
        let approaching = dynamics.is_approaching(self.growth_threshold);
        let classification = ThreatClassifier::classify(
            detection.radius,
            dynamics.velocity_magnitude(),
            approaching,
        );

        // 4. Verdict
        let verdict = self.decision.decide(Some(DecisionInput {
            collision: prediction.collision,
            approaching,
            velocity: dynamics.velocity,
        }));
        let effective_risk = verdict
            .risk_override
            .unwrap_or(classification.risk_level);

        debug!(
            "Frame {}: pos=({}, {}) r={} v={:?} growth={:.2} pred=({}, {}) dist={:.1} → {} [{}]",
            input.frame_id,
            detection.center.x,
            detection.center.y,
            detection.radius,
            dynamics.velocity,
            dynamics.growth_rate,
            prediction.predicted.x,
            prediction.predicted.y,
            prediction.distance,
            verdict.state.as_str(),
            effective_risk.as_str()
        );

        FrameOutput {
            frame_id: input.frame_id,
            detection_present: true,
            position: Some(detection.center),
            radius: Some(detection.radius),
            predicted_position: Some(prediction.predicted),
            distance_to_center: Some(prediction.distance),
            direction_label: direction_label(dynamics.velocity, self.movement_threshold),
            growth_label: GrowthLabel::from_rate(dynamics.growth_rate, self.growth_threshold),
            dynamics,
            classification: Some(classification),
            effective_risk: Some(effective_risk),
            verdict,
            estimated_distance_m: Some(estimate_distance_m(detection.radius)),
        }
    }

    pub fn history(&self) -> &MotionHistory {
        &self.history
    }
}
