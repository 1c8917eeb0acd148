// src/pipeline/metrics.rs
//
// Counters shared by every session in the process. Sessions share nothing
// else; detection state stays per-session.

use crate::analysis::DecisionState;
use super::status_monitor::LogLevel;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct PipelineMetrics {
    pub total_frames: Arc<AtomicU64>,
    pub frames_with_target: Arc<AtomicU64>,
    pub collision_course_frames: Arc<AtomicU64>,
    pub intersect_safe_frames: Arc<AtomicU64>,
    pub status_transitions: Arc<AtomicU64>,
    pub critical_transitions: Arc<AtomicU64>,
    pub detector_failures: Arc<AtomicU64>,
    pub frame_time_us: Arc<AtomicU64>,
    pub started_at: Instant,
}

fn bump(counter: &AtomicU64) {
    counter.fetch_add(1, Ordering::Relaxed);
}

fn read(counter: &AtomicU64) -> u64 {
    counter.load(Ordering::Relaxed)
}

impl PipelineMetrics {
    pub fn new() -> Self {
        let counter = || Arc::new(AtomicU64::new(0));
        Self {
            total_frames: counter(),
            frames_with_target: counter(),
            collision_course_frames: counter(),
            intersect_safe_frames: counter(),
            status_transitions: counter(),
            critical_transitions: counter(),
            detector_failures: counter(),
            frame_time_us: counter(),
            started_at: Instant::now(),
        }
    }

    /// One processed frame and the state it ended in
    pub fn record_state(&self, state: DecisionState) {
        bump(&self.total_frames);
        let per_state = match state {
            DecisionState::NoTarget => return,
            DecisionState::CollisionCourse => Some(&self.collision_course_frames),
            DecisionState::IntersectSafe => Some(&self.intersect_safe_frames),
            DecisionState::Tracking => None,
        };
        bump(&self.frames_with_target);
        if let Some(counter) = per_state {
            bump(counter);
        }
    }

    pub fn record_transition(&self, level: LogLevel) {
        bump(&self.status_transitions);
        if level == LogLevel::Critical {
            bump(&self.critical_transitions);
        }
    }

    pub fn record_detector_failure(&self) {
        bump(&self.detector_failures);
    }

    /// Latest per-frame latency; saturates rather than wrapping
    pub fn record_frame_time(&self, elapsed: Duration) {
        let us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        self.frame_time_us.store(us, Ordering::Relaxed);
    }

    pub fn summary(&self) -> MetricsSummary {
        let elapsed_secs = self.started_at.elapsed().as_secs_f64();
        let total_frames = read(&self.total_frames);
        MetricsSummary {
            total_frames,
            fps: if elapsed_secs > 0.01 {
                total_frames as f64 / elapsed_secs
            } else {
                0.0
            },
            frames_with_target: read(&self.frames_with_target),
            collision_course_frames: read(&self.collision_course_frames),
            intersect_safe_frames: read(&self.intersect_safe_frames),
            status_transitions: read(&self.status_transitions),
            critical_transitions: read(&self.critical_transitions),
            detector_failures: read(&self.detector_failures),
            last_frame_us: read(&self.frame_time_us),
            elapsed_secs,
        }
    }
}

impl Default for PipelineMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct MetricsSummary {
    pub total_frames: u64,
    pub fps: f64,
    pub frames_with_target: u64,
    pub collision_course_frames: u64,
    pub intersect_safe_frames: u64,
    pub status_transitions: u64,
    pub critical_transitions: u64,
    pub detector_failures: u64,
    pub last_frame_us: u64,
    pub elapsed_secs: f64,
}
