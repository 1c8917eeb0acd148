// src/types.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub detection: DetectionConfig,
    pub prediction: PredictionConfig,
    pub maneuver: ManeuverConfig,
    pub telemetry: TelemetryConfig,
    pub replay: ReplayConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Candidates below this confidence are never considered
    pub confidence_min: f32,
    /// Accepted width/height band (inclusive)
    pub ratio_min: f32,
    pub ratio_max: f32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            confidence_min: 0.50,
            ratio_min: 0.70,
            ratio_max: 1.40,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionConfig {
    /// Frames to extrapolate the current velocity forward
    pub lookahead_frames: i32,
    /// Radius of the exclusion zone around the frame center (pixels)
    pub exclusion_radius: f64,
    /// Radius growth (pixels) above which the object counts as approaching
    pub growth_threshold: f64,
    /// Per-frame displacement below which an axis reads as stationary
    pub movement_threshold: i32,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            lookahead_frames: 15,
            exclusion_radius: 80.0,
            growth_threshold: 0.50,
            movement_threshold: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ManeuverConfig {
    pub thrust_delta_v_km_s: f64,
}

impl Default for ManeuverConfig {
    fn default() -> Self {
        Self {
            thrust_delta_v_km_s: 1.240,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub event_log_capacity: usize,
    pub recent_log_count: usize,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            event_log_capacity: 100,
            recent_log_count: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    pub input_dir: String,
    pub extension: String,
    pub output_dir: String,
    pub write_telemetry: bool,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            input_dir: "replays".to_string(),
            extension: "jsonl".to_string(),
            output_dir: "output".to_string(),
            write_telemetry: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Integer pixel coordinate in frame space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}
