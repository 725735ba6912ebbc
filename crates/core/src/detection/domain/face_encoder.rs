use crate::shared::bounding_box::BoundingBox;
use crate::shared::encoding::Encoding;
use crate::shared::frame::Frame;

/// One face found in a photo: where it is and who it looks like.
#[derive(Clone, Debug)]
pub struct DetectedFace {
    pub bounding_box: BoundingBox,
    pub encoding: Encoding,
}

/// Domain interface for face detection plus identity encoding.
///
/// Implementations may be stateful (e.g., an inference session),
/// hence `&mut self`. Returns zero or more faces per photo.
pub trait FaceEncoder: Send {
    fn detect_and_encode(
        &mut self,
        frame: &Frame,
    ) -> Result<Vec<DetectedFace>, Box<dyn std::error::Error>>;
}
