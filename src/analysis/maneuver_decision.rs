// src/analysis/maneuver_decision.rs
//
// Per-frame verdict. The state is re-derived from scratch every frame and
// nothing is carried over between frames. Transition tracking belongs to
// the caller (see pipeline::status_monitor).
//
//   no detection                     → NO_TARGET
//   collision && approaching         → COLLISION_COURSE  (THRUST, risk CRITICAL)
//   collision && !approaching        → INTERSECT_SAFE    (NONE,   risk HIGH)
//   otherwise                        → TRACKING          (MAINTAIN)

use super::threat_classifier::RiskLevel;
use crate::types::ManeuverConfig;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DecisionState {
    NoTarget,
    CollisionCourse,
    IntersectSafe,
    Tracking,
}

impl DecisionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoTarget => "NO_TARGET",
            Self::CollisionCourse => "COLLISION_COURSE",
            Self::IntersectSafe => "INTERSECT_SAFE",
            Self::Tracking => "TRACKING",
        }
    }

    /// Text shown on the overlay banner and compared for transitions
    pub fn status_message(&self) -> &'static str {
        match self {
            Self::NoTarget => "SCANNING SECTOR...",
            Self::CollisionCourse => "⚠️ COLLISION COURSE",
            Self::IntersectSafe => "TRAJECTORY INTERSECT (SAFE)",
            Self::Tracking => "TRACKING TARGET",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Maneuver {
    None,
    Maintain,
    Thrust,
}

impl Maneuver {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Maintain => "MAINTAIN",
            Self::Thrust => "THRUST",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Horizontal {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Vertical {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AvoidanceVector {
    pub horizontal: Horizontal,
    pub vertical: Vertical,
}

impl AvoidanceVector {
    /// Steer against the sign of the object's apparent motion. Zero counts
    /// as positive on both axes.
    pub fn opposing(velocity: (i32, i32)) -> Self {
        let (dx, dy) = velocity;
        Self {
            horizontal: if dx < 0 {
                Horizontal::Right
            } else {
                Horizontal::Left
            },
            vertical: if dy < 0 { Vertical::Down } else { Vertical::Up },
        }
    }

    pub fn label(&self) -> String {
        let h = match self.horizontal {
            Horizontal::Left => "LEFT",
            Horizontal::Right => "RIGHT",
        };
        let v = match self.vertical {
            Vertical::Up => "UP",
            Vertical::Down => "DOWN",
        };
        format!("{}-{}", h, v)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub state: DecisionState,
    pub status_message: String,
    pub maneuver: Maneuver,
    pub avoidance: Option<AvoidanceVector>,
    /// km/s
    pub delta_v: f64,
    /// Replaces the classifier tier when set
    pub risk_override: Option<RiskLevel>,
}

impl Verdict {
    fn new(state: DecisionState, maneuver: Maneuver) -> Self {
        Self {
            state,
            status_message: state.status_message().to_string(),
            maneuver,
            avoidance: None,
            delta_v: 0.0,
            risk_override: None,
        }
    }

    pub fn no_target() -> Self {
        Self::new(DecisionState::NoTarget, Maneuver::None)
    }

    /// Dashboard form, e.g. "THRUST RIGHT-UP"
    pub fn maneuver_text(&self) -> String {
        match (self.maneuver, self.avoidance) {
            (Maneuver::Thrust, Some(vector)) => format!("THRUST {}", vector.label()),
            (m, _) => m.as_str().to_string(),
        }
    }

    pub fn delta_v_text(&self) -> String {
        if self.maneuver == Maneuver::Thrust {
            format!("{:.3} km/s", self.delta_v)
        } else {
            "0.000".to_string()
        }
    }

    pub fn is_critical(&self) -> bool {
        self.state == DecisionState::CollisionCourse
    }
}

/// Everything the decision needs for one frame with a detection
#[derive(Debug, Clone, Copy)]
pub struct DecisionInput {
    pub collision: bool,
    pub approaching: bool,
    pub velocity: (i32, i32),
}

pub struct ManeuverDecision {
    thrust_delta_v: f64,
}

impl ManeuverDecision {
    pub fn new(config: &ManeuverConfig) -> Self {
        Self {
            thrust_delta_v: config.thrust_delta_v_km_s,
        }
    }

    /// `None` input means no detection this frame
    pub fn decide(&self, input: Option<DecisionInput>) -> Verdict {
        let Some(input) = input else {
            return Verdict::no_target();
        };

        match (input.collision, input.approaching) {
            (true, true) => Verdict {
                avoidance: Some(AvoidanceVector::opposing(input.velocity)),
                delta_v: self.thrust_delta_v,
                risk_override: Some(RiskLevel::Critical),
                ..Verdict::new(DecisionState::CollisionCourse, Maneuver::Thrust)
            },
            (true, false) => Verdict {
                risk_override: Some(RiskLevel::High),
                ..Verdict::new(DecisionState::IntersectSafe, Maneuver::None)
            },
            (false, _) => Verdict::new(DecisionState::Tracking, Maneuver::Maintain),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decider() -> ManeuverDecision {
        ManeuverDecision::new(&ManeuverConfig::default())
    }

    fn input(collision: bool, approaching: bool, dx: i32, dy: i32) -> Option<DecisionInput> {
        Some(DecisionInput {
            collision,
            approaching,
            velocity: (dx, dy),
        })
    }

    #[test]
    fn test_no_target() {
        let v = decider().decide(None);
        assert_eq!(v.state, DecisionState::NoTarget);
        assert_eq!(v.maneuver, Maneuver::None);
        assert_eq!(v.delta_v, 0.0);
        assert_eq!(v.status_message, "SCANNING SECTOR...");
        assert!(v.risk_override.is_none());
    }

    #[test]
    fn test_collision_course_thrusts_against_motion() {
        let v = decider().decide(input(true, true, -3, 2));
        assert_eq!(v.state, DecisionState::CollisionCourse);
        assert_eq!(v.maneuver, Maneuver::Thrust);
        assert_eq!(
            v.avoidance,
            Some(AvoidanceVector {
                horizontal: Horizontal::Right,
                vertical: Vertical::Up,
            })
        );
        assert_eq!(v.risk_override, Some(RiskLevel::Critical));
        assert!((v.delta_v - 1.240).abs() < 1e-9);
        assert_eq!(v.maneuver_text(), "THRUST RIGHT-UP");
        assert_eq!(v.delta_v_text(), "1.240 km/s");
        assert!(v.is_critical());
    }

    #[test]
    fn test_zero_velocity_dodges_left_up() {
        let v = decider().decide(input(true, true, 0, 0));
        assert_eq!(v.avoidance.unwrap().label(), "LEFT-UP");
        let v = decider().decide(input(true, true, 4, -1));
        assert_eq!(v.avoidance.unwrap().label(), "LEFT-DOWN");
    }

    #[test]
    fn test_intersect_without_approach_is_safe() {
        let v = decider().decide(input(true, false, 5, 0));
        assert_eq!(v.state, DecisionState::IntersectSafe);
        assert_eq!(v.maneuver, Maneuver::None);
        assert_eq!(v.risk_override, Some(RiskLevel::High));
        assert!(v.avoidance.is_none());
        assert_eq!(v.delta_v_text(), "0.000");
    }

    #[test]
    fn test_tracking_when_clear() {
        for approaching in [true, false] {
            let v = decider().decide(input(false, approaching, 1, 1));
            assert_eq!(v.state, DecisionState::Tracking);
            assert_eq!(v.maneuver, Maneuver::Maintain);
            assert_eq!(v.maneuver_text(), "MAINTAIN");
            assert!(v.risk_override.is_none());
        }
    }
}
