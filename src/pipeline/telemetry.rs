// src/pipeline/telemetry.rs
//
// Dashboard payload. Built on demand from a session's latest frame and its
// event log, serialized with serde_json by whoever serves it.

use super::frame_context::FrameOutput;
use crate::analysis::RiskLevel;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct DetectedObject {
    pub id: String,
    #[serde(rename = "type")]
    pub object_type: String,
    pub distance: String,
    pub risk: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TelemetrySnapshot {
    pub session_id: String,
    pub frame_id: Option<u64>,
    pub objects_detected: u32,
    pub critical_threats: u32,
    pub high_risk: u32,
    pub system_status: String,
    pub maneuver: String,
    pub delta_v: String,
    pub detected_objects: Vec<DetectedObject>,
    pub last_log: String,
    pub logs: Vec<String>,
}

impl TelemetrySnapshot {
    pub fn from_frame(
        session_id: String,
        output: Option<&FrameOutput>,
        last_log: String,
        logs: Vec<String>,
    ) -> Self {
        let Some(output) = output else {
            return Self {
                session_id,
                frame_id: None,
                objects_detected: 0,
                critical_threats: 0,
                high_risk: 0,
                system_status: "IDLE".to_string(),
                maneuver: "NONE".to_string(),
                delta_v: "0.000".to_string(),
                detected_objects: Vec::new(),
                last_log,
                logs,
            };
        };

        let detected_objects = match (output.classification, output.effective_risk) {
            (Some(classification), Some(risk)) if output.detection_present => {
                vec![DetectedObject {
                    id: "OBJ_001".to_string(),
                    object_type: classification.object_type.label().to_string(),
                    distance: format!("{:.2}m", output.estimated_distance_m.unwrap_or_default()),
                    risk: risk.as_str().to_string(),
                }]
            }
            _ => Vec::new(),
        };

        Self {
            session_id,
            frame_id: Some(output.frame_id),
            objects_detected: output.detection_present as u32,
            critical_threats: output.verdict.is_critical() as u32,
            high_risk: (output.effective_risk == Some(RiskLevel::High)) as u32,
            system_status: output.verdict.status_message.clone(),
            maneuver: output.verdict.maneuver_text(),
            delta_v: output.verdict.delta_v_text(),
            detected_objects,
            last_log,
            logs,
        }
    }
}
