// src/detection/mod.rs

mod filter;
mod source;
mod types;

// Re-export public APIs
pub use filter::{DetectionFilter, Rejection};
pub use source::DetectionSource;
pub use types::*;
