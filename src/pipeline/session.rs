// src/pipeline/session.rs
//
// One viewer/stream. Owns its engine, its status baseline and its event
// log. Two sessions never touch each other's motion history; only the
// PipelineMetrics counters are shared.

use super::engine::AvoidanceEngine;
use super::event_log::EventLog;
use super::frame_context::{FrameInput, FrameOutput};
use super::metrics::PipelineMetrics;
use super::status_monitor::{LogLevel, StatusMonitor};
use super::telemetry::TelemetrySnapshot;
use crate::analysis::DecisionState;
use crate::detection::{DetectionSource, DetectorFrame};
use crate::types::Config;
use anyhow::Result;
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Frame size assumed until the detector reports one
const FALLBACK_FRAME_SIZE: (i32, i32) = (640, 480);

#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub frames: u64,
    pub frames_with_target: u64,
    pub collision_course_frames: u64,
    pub transitions: u64,
    pub critical_transitions: u64,
    pub detector_failures: u64,
}

pub struct TrackingSession {
    id: Uuid,
    engine: AvoidanceEngine,
    monitor: StatusMonitor,
    events: EventLog,
    metrics: PipelineMetrics,
    recent_log_count: usize,
    next_frame_id: u64,
    frame_size: (i32, i32),
    last_output: Option<FrameOutput>,
    summary: SessionSummary,
}

impl TrackingSession {
    pub fn new(config: &Config, metrics: PipelineMetrics) -> Self {
        let id = Uuid::new_v4();
        Self {
            id,
            engine: AvoidanceEngine::new(config),
            monitor: StatusMonitor::new(),
            events: EventLog::new(config.telemetry.event_log_capacity),
            metrics,
            recent_log_count: config.telemetry.recent_log_count,
            next_frame_id: 0,
            frame_size: FALLBACK_FRAME_SIZE,
            last_output: None,
            summary: SessionSummary {
                session_id: id.to_string(),
                ..SessionSummary::default()
            },
        }
    }

    /// Process one frame. Detector errors become an empty frame.
    pub fn step(&mut self, frame: Result<DetectorFrame>) -> &FrameOutput {
        let started = Instant::now();
        let frame_id = self.next_frame_id;
        self.next_frame_id += 1;

        let frame = match frame {
            Ok(frame) => {
                self.frame_size = (frame.width, frame.height);
                frame
            }
            Err(e) => {
                warn!(
                    "Session {}: detector failure on frame {}: {:#}",
                    self.id, frame_id, e
                );
                self.metrics.record_detector_failure();
                self.summary.detector_failures += 1;
                DetectorFrame {
                    width: self.frame_size.0,
                    height: self.frame_size.1,
                    candidates: Vec::new(),
                }
            }
        };

        let output = self.engine.process_frame(&FrameInput {
            frame_id,
            width: frame.width,
            height: frame.height,
            candidates: &frame.candidates,
        });

        self.metrics.record_state(output.verdict.state);
        self.summary.frames += 1;
        if output.detection_present {
            self.summary.frames_with_target += 1;
        }
        if output.verdict.state == DecisionState::CollisionCourse {
            self.summary.collision_course_frames += 1;
        }

        if let Some(transition) = self.monitor.observe(&output) {
            match transition.level {
                LogLevel::Critical => {
                    warn!("🚨 [{}] {}", self.id, transition.message);
                    self.summary.critical_transitions += 1;
                }
                LogLevel::Info => info!("[{}] {}", self.id, transition.message),
            }
            self.metrics.record_transition(transition.level);
            self.summary.transitions += 1;
            self.events.record(&transition);
        }

        self.metrics.record_frame_time(started.elapsed());

        self.last_output.insert(output)
    }

    /// Pull frames until the source is exhausted
    pub fn run<S: DetectionSource + ?Sized>(&mut self, source: &mut S) -> SessionSummary {
        info!("Session {} started", self.id);
        while let Some(frame) = source.next_frame() {
            self.step(frame);
        }
        debug!(
            "Session {} finished after {} frames",
            self.id, self.summary.frames
        );
        self.summary.clone()
    }

    pub fn telemetry(&self) -> TelemetrySnapshot {
        let last_log = self
            .events
            .last()
            .map(|e| e.message.clone())
            .unwrap_or_default();
        TelemetrySnapshot::from_frame(
            self.id.to_string(),
            self.last_output.as_ref(),
            last_log,
            self.events.recent(self.recent_log_count),
        )
    }

    pub fn summary(&self) -> &SessionSummary {
        &self.summary
    }

    pub fn last_output(&self) -> Option<&FrameOutput> {
        self.last_output.as_ref()
    }

    pub fn engine(&self) -> &AvoidanceEngine {
        &self.engine
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::Candidate;

    fn frame(candidates: Vec<Candidate>) -> Result<DetectorFrame> {
        Ok(DetectorFrame {
            width: 640,
            height: 480,
            candidates,
        })
    }

    fn approaching_box(i: u64) -> Candidate {
        let cx = 360.0 - 3.0 * i as f32;
        let r = 20.0 + 2.0 * i as f32;
        Candidate::new(cx - r, 240.0 - r, cx + r, 240.0 + r, 0.9)
    }

    #[test]
    fn test_detector_failure_becomes_no_target() {
        let mut session = TrackingSession::new(&Config::default(), PipelineMetrics::new());
        let out = session.step(Err(anyhow::anyhow!("camera unplugged")));
        assert!(!out.detection_present);
        assert_eq!(session.summary().detector_failures, 1);
        assert_eq!(session.engine().history().len(), 1);
    }

    #[test]
    fn test_transitions_are_logged_once() {
        let mut session = TrackingSession::new(&Config::default(), PipelineMetrics::new());
        for _ in 0..3 {
            session.step(frame(vec![]));
        }
        // IDLE → SCANNING only
        assert_eq!(session.summary().transitions, 1);
        assert_eq!(session.events().len(), 1);
    }

    #[test]
    fn test_collision_course_telemetry() {
        let metrics = PipelineMetrics::new();
        let mut session = TrackingSession::new(&Config::default(), metrics.clone());
        for i in 0..8 {
            session.step(frame(vec![approaching_box(i)]));
        }

        let telemetry = session.telemetry();
        assert_eq!(telemetry.objects_detected, 1);
        assert_eq!(telemetry.critical_threats, 1);
        assert_eq!(telemetry.system_status, "⚠️ COLLISION COURSE");
        assert_eq!(telemetry.maneuver, "THRUST RIGHT-UP");
        assert_eq!(telemetry.delta_v, "1.240 km/s");
        assert_eq!(telemetry.detected_objects.len(), 1);
        assert_eq!(telemetry.detected_objects[0].risk, "CRITICAL");
        // radius 34 → 500 - 68
        assert_eq!(telemetry.detected_objects[0].distance, "432.00m");
        assert!(telemetry.last_log.contains("COLLISION COURSE"));
        assert!(session.summary().critical_transitions >= 1);
        assert_eq!(metrics.summary().total_frames, 8);
    }

    #[test]
    fn test_run_consumes_iterator_source() {
        let mut session = TrackingSession::new(&Config::default(), PipelineMetrics::new());
        let frames: Vec<Result<DetectorFrame>> = vec![
            frame(vec![Candidate::new(0.0, 0.0, 40.0, 40.0, 0.9)]),
            Err(anyhow::anyhow!("decode error")),
            frame(vec![]),
        ];
        let summary = session.run(&mut frames.into_iter());
        assert_eq!(summary.frames, 3);
        assert_eq!(summary.frames_with_target, 1);
        assert_eq!(summary.detector_failures, 1);
    }

    #[test]
    fn test_idle_telemetry_before_first_frame() {
        let session = TrackingSession::new(&Config::default(), PipelineMetrics::new());
        let telemetry = session.telemetry();
        assert_eq!(telemetry.frame_id, None);
        assert_eq!(telemetry.system_status, "IDLE");
        assert!(telemetry.logs.is_empty());
    }
}
