// src/analysis/threat_classifier.rs
//
// Size band + velocity + approach → risk score and tier.
//
// Independent of the collision test: the maneuver decision may later force
// the tier up. Never fails: unusable input degrades to a fixed
// "Unknown Debris / MEDIUM / 1.0" classification.

use anyhow::{bail, Result};
use serde::Serialize;
use tracing::debug;

// ============================================================================
// TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ObjectType {
    SmallDebris,
    MediumDebris,
    LargeDebris,
    CriticalMass,
    Unknown,
}

impl ObjectType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::SmallDebris => "Small Debris",
            Self::MediumDebris => "Medium Debris",
            Self::LargeDebris => "Large Debris",
            Self::CriticalMass => "Critical Mass",
            Self::Unknown => "Unknown Debris",
        }
    }

    pub fn risk_multiplier(&self) -> f64 {
        match self {
            Self::SmallDebris => 1.0,
            Self::MediumDebris => 1.5,
            Self::LargeDebris => 2.0,
            Self::CriticalMass => 3.0,
            Self::Unknown => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }

    pub fn from_score(score: f64) -> Self {
        if score >= 3.0 {
            Self::Critical
        } else if score >= 2.0 {
            Self::High
        } else if score >= 1.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    pub object_type: ObjectType,
    pub risk_level: RiskLevel,
    pub risk_score: f64,
}

impl Classification {
    pub fn unknown() -> Self {
        Self {
            object_type: ObjectType::Unknown,
            risk_level: RiskLevel::Medium,
            risk_score: 1.0,
        }
    }
}

// ============================================================================
// CLASSIFIER
// ============================================================================

/// (lower bound inclusive, upper bound exclusive, type). The last band
/// also takes everything above it.
const SIZE_BANDS: [(i32, i32, ObjectType); 4] = [
    (0, 30, ObjectType::SmallDebris),
    (30, 60, ObjectType::MediumDebris),
    (60, 100, ObjectType::LargeDebris),
    (100, i32::MAX, ObjectType::CriticalMass),
];

const MAX_VELOCITY_FACTOR: f64 = 2.0;
const VELOCITY_SCALE: f64 = 10.0;
const APPROACH_FACTOR: f64 = 1.5;

pub struct ThreatClassifier;

impl ThreatClassifier {
    pub fn classify(radius: i32, velocity_magnitude: f64, approaching: bool) -> Classification {
        Self::try_classify(radius, velocity_magnitude, approaching).unwrap_or_else(|e| {
            debug!("Classification degraded to Unknown Debris: {}", e);
            Classification::unknown()
        })
    }

    pub fn try_classify(
        radius: i32,
        velocity_magnitude: f64,
        approaching: bool,
    ) -> Result<Classification> {
        if !velocity_magnitude.is_finite() || velocity_magnitude < 0.0 {
            bail!("invalid velocity magnitude {}", velocity_magnitude);
        }

        let object_type = size_band(radius)?;
        let velocity_factor = (velocity_magnitude / VELOCITY_SCALE).min(MAX_VELOCITY_FACTOR);
        let approach_factor = if approaching { APPROACH_FACTOR } else { 1.0 };
        let risk_score = object_type.risk_multiplier() * velocity_factor * approach_factor;

        Ok(Classification {
            object_type,
            risk_level: RiskLevel::from_score(risk_score),
            risk_score,
        })
    }
}

fn size_band(radius: i32) -> Result<ObjectType> {
    SIZE_BANDS
        .iter()
        .find(|(lo, hi, _)| radius >= *lo && radius < *hi)
        .map(|(_, _, t)| *t)
        .or_else(|| (radius == i32::MAX).then_some(ObjectType::CriticalMass))
        .ok_or_else(|| anyhow::anyhow!("radius {} outside every size band", radius))
}
