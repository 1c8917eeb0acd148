// src/detection/source.rs

use super::types::DetectorFrame;
use anyhow::Result;

/// Pull-based supplier of per-frame detector output.
///
/// `None` ends the stream. `Some(Err(_))` is a failed frame: the session
/// treats it as a frame with no candidates and keeps going.
pub trait DetectionSource {
    fn next_frame(&mut self) -> Option<Result<DetectorFrame>>;
}

impl<I> DetectionSource for I
where
    I: Iterator<Item = Result<DetectorFrame>>,
{
    fn next_frame(&mut self) -> Option<Result<DetectorFrame>> {
        self.next()
    }
}
