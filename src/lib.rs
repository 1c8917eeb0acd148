pub mod analysis;
pub mod config;
pub mod detection;
pub mod pipeline;
pub mod replay;
pub mod types;

// Re-export main entry points for external use
pub use pipeline::{AvoidanceEngine, FrameInput, FrameOutput, TrackingSession};
pub use types::Config;
