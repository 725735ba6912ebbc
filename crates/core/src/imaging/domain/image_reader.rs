use std::path::Path;

use crate::shared::frame::Frame;

/// Decodes a photo from disk into an RGB frame.
///
/// Implementations handle format details; the pipeline works with the
/// abstract `Frame` type.
pub trait ImageReader: Send {
    fn read(&self, path: &Path) -> Result<Frame, Box<dyn std::error::Error>>;
}
