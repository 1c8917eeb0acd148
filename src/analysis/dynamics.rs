// src/analysis/dynamics.rs
//
// Finite-difference motion estimate over the newest valid samples.
//
// Velocity: mean of up to four pairwise position deltas (newest five
// samples), truncated toward zero per axis.
// Growth: mean of the newest five valid radii minus the mean of the oldest
// five valid radii still held by the history. With exactly five valid radii
// both windows are the same samples and growth is zero.

use super::motion_history::HistorySnapshot;
use crate::types::Point;
use serde::Serialize;

const MIN_VALID_POSITIONS: usize = 2;
const MIN_VALID_RADII: usize = 5;
const VELOCITY_WINDOW: usize = 5;
const GROWTH_WINDOW: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DynamicsEstimate {
    /// Per-frame displacement (pixels)
    pub velocity: (i32, i32),
    /// Radius trend (pixels). Positive = growing.
    pub growth_rate: f64,
}

impl DynamicsEstimate {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn velocity_magnitude(&self) -> f64 {
        let (dx, dy) = self.velocity;
        ((dx as f64).powi(2) + (dy as f64).powi(2)).sqrt()
    }

    pub fn is_approaching(&self, growth_threshold: f64) -> bool {
        self.growth_rate > growth_threshold
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GrowthLabel {
    Approaching,
    Stable,
}

impl GrowthLabel {
    pub fn from_rate(growth_rate: f64, threshold: f64) -> Self {
        if growth_rate > threshold {
            Self::Approaching
        } else {
            Self::Stable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approaching => "APPROACHING",
            Self::Stable => "STABLE",
        }
    }
}

pub struct DynamicsEstimator;

impl DynamicsEstimator {
    pub fn estimate(snapshot: &HistorySnapshot<'_>) -> DynamicsEstimate {
        let valid_pos = snapshot.valid_positions();
        let valid_rad = snapshot.valid_radii();

        if valid_pos.len() < MIN_VALID_POSITIONS || valid_rad.len() < MIN_VALID_RADII {
            return DynamicsEstimate::zero();
        }

        DynamicsEstimate {
            velocity: mean_velocity(&valid_pos),
            growth_rate: growth_rate(&valid_rad),
        }
    }
}

fn mean_velocity(valid_pos: &[Point]) -> (i32, i32) {
    let limit = VELOCITY_WINDOW.min(valid_pos.len());
    let pairs = limit.saturating_sub(1);
    if pairs == 0 {
        return (0, 0);
    }

    let (sum_dx, sum_dy) = valid_pos[..limit]
        .windows(2)
        .fold((0i64, 0i64), |(sx, sy), w| {
            (
                sx + (w[0].x as i64 - w[1].x as i64),
                sy + (w[0].y as i64 - w[1].y as i64),
            )
        });

    // `as` truncates toward zero and saturates at the i32 range
    (
        (sum_dx as f64 / pairs as f64) as i32,
        (sum_dy as f64 / pairs as f64) as i32,
    )
}

fn growth_rate(valid_rad: &[i32]) -> f64 {
    let recent = &valid_rad[..GROWTH_WINDOW.min(valid_rad.len())];
    let oldest = &valid_rad[valid_rad.len().saturating_sub(GROWTH_WINDOW)..];
    mean(recent) - mean(oldest)
}

fn mean(values: &[i32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64
}

/// Compass-style label for the current motion, e.g. "LEFT UP"
pub fn direction_label(velocity: (i32, i32), movement_threshold: i32) -> String {
    let (dx, dy) = velocity;
    let horizontal = if dx > movement_threshold {
        Some("RIGHT")
    } else if dx < -movement_threshold {
        Some("LEFT")
    } else {
        None
    };
    let vertical = if dy > movement_threshold {
        Some("DOWN")
    } else if dy < -movement_threshold {
        Some("UP")
    } else {
        None
    };

    match (horizontal, vertical) {
        (None, None) => "STATIONARY".to_string(),
        (Some(h), None) => h.to_string(),
        (None, Some(v)) => v.to_string(),
        (Some(h), Some(v)) => format!("{} {}", h, v),
    }
}
