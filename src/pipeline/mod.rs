// src/pipeline/mod.rs

pub mod engine;
pub mod event_log;
pub mod frame_context;
pub mod metrics;
pub mod session;
pub mod status_monitor;
pub mod telemetry;

pub use engine::AvoidanceEngine;
pub use event_log::{EventLog, LogEntry};
pub use frame_context::{FrameInput, FrameOutput};
pub use metrics::{MetricsSummary, PipelineMetrics};
pub use session::{SessionSummary, TrackingSession};
pub use status_monitor::{LogLevel, StatusMonitor, StatusTransition};
pub use telemetry::{DetectedObject, TelemetrySnapshot};
