// src/analysis/mod.rs
//
// Trajectory and threat analysis for a single tracked object.
//
// Signal flow (one frame at a time):
//   Detection → motion_history → dynamics ─┬→ collision_predictor ─┐
//                                           └→ threat_classifier ───┴→ maneuver_decision → Verdict
//
// Orchestrated by pipeline::engine::AvoidanceEngine.

pub mod collision_predictor;
pub mod dynamics;
pub mod maneuver_decision;
pub mod motion_history;
pub mod threat_classifier;

// Re-exports for ergonomic access from the pipeline
pub use collision_predictor::{frame_center, CollisionPrediction, CollisionPredictor};
pub use dynamics::{direction_label, DynamicsEstimate, DynamicsEstimator, GrowthLabel};
pub use maneuver_decision::{
    AvoidanceVector, DecisionInput, DecisionState, Horizontal, Maneuver, ManeuverDecision,
    Verdict, Vertical,
};
pub use motion_history::{
    GapRing, HistorySnapshot, MotionHistory, Slot, TrailSegment, HISTORY_CAPACITY,
};
pub use threat_classifier::{Classification, ObjectType, RiskLevel, ThreatClassifier};
