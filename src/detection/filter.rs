// src/detection/filter.rs
//
// Picks at most one detection per frame out of the raw detector candidates.
//
// Selection is first-match in detector order: no ranking by confidence.
// Two overlapping eligible candidates resolve to whichever the detector
// emitted first.

use super::types::{Candidate, Detection};
use crate::types::{DetectionConfig, Point};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rejection {
    LowConfidence,
    Degenerate,
    AspectRatio,
}

pub struct DetectionFilter {
    config: DetectionConfig,
}

impl DetectionFilter {
    pub fn new(config: DetectionConfig) -> Self {
        Self { config }
    }

    pub fn select(&self, candidates: &[Candidate]) -> Option<Detection> {
        for (idx, candidate) in candidates.iter().enumerate() {
            match self.evaluate(candidate) {
                Ok(detection) => {
                    debug!(
                        "Accepted candidate {} at ({}, {}) r={} conf={:.2}",
                        idx,
                        detection.center.x,
                        detection.center.y,
                        detection.radius,
                        detection.confidence
                    );
                    return Some(detection);
                }
                Err(reason) => {
                    debug!("Rejected candidate {}: {:?}", idx, reason);
                }
            }
        }
        None
    }

    pub fn evaluate(&self, candidate: &Candidate) -> Result<Detection, Rejection> {
        // NaN confidence fails the gate
        if !(candidate.confidence >= self.config.confidence_min) {
            return Err(Rejection::LowConfidence);
        }

        // Corners saturate at the i32 range, so extents need i64
        let (x1, y1, x2, y2) = candidate.corners();
        let w = x2 as i64 - x1 as i64;
        let h = y2 as i64 - y1 as i64;
        if w <= 0 || h <= 0 {
            return Err(Rejection::Degenerate);
        }

        let aspect_ratio = w as f32 / h as f32;
        if aspect_ratio < self.config.ratio_min || aspect_ratio > self.config.ratio_max {
            return Err(Rejection::AspectRatio);
        }

        let to_px = |v: i64| i32::try_from(v).map_err(|_| Rejection::Degenerate);
        Ok(Detection {
            center: Point::new(to_px(x1 as i64 + w / 2)?, to_px(y1 as i64 + h / 2)?),
            radius: to_px(w.max(h) / 2)?,
            confidence: candidate.confidence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> DetectionFilter {
        DetectionFilter::new(DetectionConfig::default())
    }

    #[test]
    fn test_accepts_square_box() {
        let det = filter()
            .select(&[Candidate::new(100.0, 100.0, 141.0, 140.0, 0.9)])
            .unwrap();
        assert_eq!(det.center, Point::new(120, 120));
        assert_eq!(det.radius, 20);
    }

    #[test]
    fn test_confidence_floor_is_inclusive() {
        let f = filter();
        assert!(f
            .select(&[Candidate::new(0.0, 0.0, 40.0, 40.0, 0.50)])
            .is_some());
        assert!(f
            .select(&[Candidate::new(0.0, 0.0, 40.0, 40.0, 0.49)])
            .is_none());
    }

    #[test]
    fn test_rejects_elongated_boxes() {
        let f = filter();
        // 100x50 -> ratio 2.0
        assert_eq!(
            f.evaluate(&Candidate::new(0.0, 0.0, 100.0, 50.0, 0.9)),
            Err(Rejection::AspectRatio)
        );
        // 50x100 -> ratio 0.5
        assert_eq!(
            f.evaluate(&Candidate::new(0.0, 0.0, 50.0, 100.0, 0.9)),
            Err(Rejection::AspectRatio)
        );
        // 70x100 sits exactly on the lower edge
        assert!(f.evaluate(&Candidate::new(0.0, 0.0, 70.0, 100.0, 0.9)).is_ok());
        // 140x100 sits exactly on the upper edge, 141x100 is past it
        assert!(f.evaluate(&Candidate::new(0.0, 0.0, 140.0, 100.0, 0.9)).is_ok());
        assert_eq!(
            f.evaluate(&Candidate::new(0.0, 0.0, 141.0, 100.0, 0.9)),
            Err(Rejection::AspectRatio)
        );
    }

    #[test]
    fn test_nan_confidence_rejected() {
        assert_eq!(
            filter().evaluate(&Candidate::new(0.0, 0.0, 40.0, 40.0, f32::NAN)),
            Err(Rejection::LowConfidence)
        );
    }

    #[test]
    fn test_huge_box_does_not_overflow() {
        let det = filter()
            .evaluate(&Candidate::new(-2e9, -2e9, 2e9, 2e9, 0.9))
            .unwrap();
        assert_eq!(det.center, Point::new(0, 0));
        assert_eq!(det.radius, 2_000_000_000);

        // Both corners saturate to opposite ends of the i32 range
        let det = filter()
            .evaluate(&Candidate::new(-1e12, -1e12, 1e12, 1e12, 0.9))
            .unwrap();
        assert_eq!(det.radius, i32::MAX);
    }

    #[test]
    fn test_degenerate_box_rejected() {
        assert_eq!(
            filter().evaluate(&Candidate::new(10.0, 10.0, 30.0, 10.0, 0.9)),
            Err(Rejection::Degenerate)
        );
    }

    #[test]
    fn test_first_match_wins_over_higher_confidence() {
        let candidates = [
            Candidate::new(0.0, 0.0, 200.0, 20.0, 0.99), // wrong shape
            Candidate::new(10.0, 10.0, 50.0, 50.0, 0.60),
            Candidate::new(300.0, 300.0, 340.0, 340.0, 0.95),
        ];
        let det = filter().select(&candidates).unwrap();
        assert_eq!(det.center, Point::new(30, 30));
        assert_eq!(det.confidence, 0.60);
    }

    #[test]
    fn test_fractional_coordinates_truncate() {
        let det = filter()
            .select(&[Candidate::new(10.9, 20.7, 51.2, 60.9, 0.8)])
            .unwrap();
        // (10, 20, 51, 60): w=41 h=40
        assert_eq!(det.center, Point::new(30, 40));
        assert_eq!(det.radius, 20);
    }

    #[test]
    fn test_empty_candidates() {
        assert!(filter().select(&[]).is_none());
    }
}
