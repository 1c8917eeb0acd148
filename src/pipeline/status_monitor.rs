// src/pipeline/status_monitor.rs
//
// Holds the previous frame's status message on behalf of the caller and
// reports when it changes. The engine itself keeps no such state.

use super::frame_context::FrameOutput;
use serde::Serialize;

const INITIAL_STATUS: &str = "IDLE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LogLevel {
    Info,
    Critical,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Critical => "CRITICAL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusTransition {
    pub frame_id: u64,
    pub level: LogLevel,
    pub from: String,
    pub to: String,
    pub message: String,
}

pub struct StatusMonitor {
    last_status: String,
}

impl StatusMonitor {
    pub fn new() -> Self {
        Self {
            last_status: INITIAL_STATUS.to_string(),
        }
    }

    pub fn observe(&mut self, output: &FrameOutput) -> Option<StatusTransition> {
        let status = output.status_message();
        if status == self.last_status {
            return None;
        }

        let level = if output.verdict.is_critical() {
            LogLevel::Critical
        } else {
            LogLevel::Info
        };
        let transition = StatusTransition {
            frame_id: output.frame_id,
            level,
            from: std::mem::replace(&mut self.last_status, status.to_string()),
            to: status.to_string(),
            message: format!(
                "Status Change: {} - Maneuver: {}",
                status,
                output.verdict.maneuver_text()
            ),
        };
        Some(transition)
    }

    pub fn last_status(&self) -> &str {
        &self.last_status
    }
}

impl Default for StatusMonitor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{DecisionInput, DynamicsEstimate, ManeuverDecision};
    use crate::types::ManeuverConfig;

    fn output_with(input: Option<DecisionInput>, frame_id: u64) -> FrameOutput {
        let mut out = FrameOutput::no_target(frame_id, DynamicsEstimate::zero());
        out.detection_present = input.is_some();
        out.verdict = ManeuverDecision::new(&ManeuverConfig::default()).decide(input);
        out
    }

    #[test]
    fn test_first_frame_transitions_from_idle() {
        let mut monitor = StatusMonitor::new();
        let t = monitor.observe(&output_with(None, 0)).unwrap();
        assert_eq!(t.from, "IDLE");
        assert_eq!(t.to, "SCANNING SECTOR...");
        assert_eq!(t.level, LogLevel::Info);
        assert_eq!(t.message, "Status Change: SCANNING SECTOR... - Maneuver: NONE");
    }

    #[test]
    fn test_repeat_status_is_silent() {
        let mut monitor = StatusMonitor::new();
        assert!(monitor.observe(&output_with(None, 0)).is_some());
        assert!(monitor.observe(&output_with(None, 1)).is_none());
        assert!(monitor.observe(&output_with(None, 2)).is_none());
    }

    #[test]
    fn test_collision_course_is_critical() {
        let mut monitor = StatusMonitor::new();
        monitor.observe(&output_with(None, 0));
        let collision = Some(DecisionInput {
            collision: true,
            approaching: true,
            velocity: (2, -1),
        });
        let t = monitor.observe(&output_with(collision, 1)).unwrap();
        assert_eq!(t.level, LogLevel::Critical);
        assert_eq!(
            t.message,
            "Status Change: ⚠️ COLLISION COURSE - Maneuver: THRUST LEFT-DOWN"
        );
        assert_eq!(monitor.last_status(), "⚠️ COLLISION COURSE");
    }
}
