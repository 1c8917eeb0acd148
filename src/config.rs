use crate::types::Config;
use anyhow::{bail, Context, Result};
use std::fs;

/// Longest extrapolation the predictor accepts
pub const MAX_LOOKAHEAD_FRAMES: i32 = 1_000;

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let contents =
            fs::read_to_string(path).with_context(|| format!("Failed to read config {}", path))?;
        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config {}", path))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let det = &self.detection;
        if !(0.0..=1.0).contains(&det.confidence_min) {
            bail!(
                "detection.confidence_min must be within [0, 1], got {}",
                det.confidence_min
            );
        }
        if det.ratio_min <= 0.0 || det.ratio_min > det.ratio_max {
            bail!(
                "detection ratio band is invalid: [{}, {}]",
                det.ratio_min,
                det.ratio_max
            );
        }

        let pred = &self.prediction;
        if !(1..=MAX_LOOKAHEAD_FRAMES).contains(&pred.lookahead_frames) {
            bail!(
                "prediction.lookahead_frames must be within [1, {}], got {}",
                MAX_LOOKAHEAD_FRAMES,
                pred.lookahead_frames
            );
        }
        if !(pred.exclusion_radius > 0.0) {
            bail!(
                "prediction.exclusion_radius must be positive, got {}",
                pred.exclusion_radius
            );
        }
        if self.telemetry.event_log_capacity == 0 {
            bail!("telemetry.event_log_capacity must be at least 1");
        }
        Ok(())
    }
}
