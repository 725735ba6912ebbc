use std::path::Path;

use crate::imaging::domain::image_writer::ImageWriter;
use crate::shared::bounding_box::{BoundingBox, CropRect};
use crate::shared::frame::Frame;

/// Fraction of the face's larger dimension added as padding on every side.
pub const DEFAULT_PADDING_RATIO: f64 = 0.3;

/// Crops a padded face region out of a photo and persists it.
pub struct FaceCropper {
    writer: Box<dyn ImageWriter>,
    padding_ratio: f64,
}

impl FaceCropper {
    pub fn new(writer: Box<dyn ImageWriter>, padding_ratio: f64) -> Self {
        Self {
            writer,
            padding_ratio,
        }
    }

    /// Computes the padded, clamped crop for `bbox` and writes it to `dest`.
    ///
    /// Failures are returned, not raised further; the caller decides whether
    /// to skip the face and continue the batch.
    pub fn export(
        &self,
        frame: &Frame,
        bbox: &BoundingBox,
        dest: &Path,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let rect = bbox.padded_crop(frame.width(), frame.height(), self.padding_ratio);
        if rect.width == 0 || rect.height == 0 {
            return Err(format!(
                "crop region is empty (box lies outside a {}x{} image)",
                frame.width(),
                frame.height()
            )
            .into());
        }

        let crop = crop_frame(frame, &rect);
        self.writer.write(dest, &crop)
    }
}

/// Extracts a rectangle from a frame as a new, tightly-packed frame.
fn crop_frame(frame: &Frame, rect: &CropRect) -> Frame {
    let src = frame.as_ndarray();
    let x1 = rect.x as usize;
    let y1 = rect.y as usize;
    let w = rect.width as usize;
    let h = rect.height as usize;

    let mut data = Vec::with_capacity(w * h * 3);
    for row in y1..y1 + h {
        for col in x1..x1 + w {
            for c in 0..3 {
                data.push(src[[row, col, c]]);
            }
        }
    }

    Frame::new(data, rect.width, rect.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    // --- Stubs ---

    struct StubImageWriter {
        written: Arc<Mutex<Vec<(PathBuf, Frame)>>>,
        fail: bool,
    }

    impl StubImageWriter {
        fn new() -> Self {
            Self {
                written: Arc::new(Mutex::new(Vec::new())),
                fail: false,
            }
        }
    }

    impl ImageWriter for StubImageWriter {
        fn write(&self, path: &Path, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
            if self.fail {
                return Err("disk full".into());
            }
            self.written
                .lock()
                .unwrap()
                .push((path.to_path_buf(), frame.clone()));
            Ok(())
        }
    }

    // --- Helpers ---

    fn make_frame(width: u32, height: u32) -> Frame {
        Frame::new(vec![128u8; (width * height * 3) as usize], width, height)
    }

    fn bbox(top: u32, right: u32, bottom: u32, left: u32) -> BoundingBox {
        BoundingBox::new(top, right, bottom, left).unwrap()
    }

    // --- Tests ---

    #[test]
    fn test_export_writes_padded_crop() {
        let writer = StubImageWriter::new();
        let written = writer.written.clone();
        let cropper = FaceCropper::new(Box::new(writer), 0.3);

        // 100x100 box at (10,10) on 200x200: padding 30, low edges clamp
        let frame = make_frame(200, 200);
        cropper
            .export(&frame, &bbox(10, 110, 110, 10), Path::new("out.jpg"))
            .unwrap();

        let written = written.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].0, PathBuf::from("out.jpg"));
        assert_eq!(written[0].1.width(), 140);
        assert_eq!(written[0].1.height(), 140);
    }

    #[test]
    fn test_export_interior_box_fully_padded() {
        let writer = StubImageWriter::new();
        let written = writer.written.clone();
        let cropper = FaceCropper::new(Box::new(writer), 0.3);

        // 40x40 box well inside a 300x300 frame: padding 12 on each side
        let frame = make_frame(300, 300);
        cropper
            .export(&frame, &bbox(100, 140, 140, 100), Path::new("out.jpg"))
            .unwrap();

        let written = written.lock().unwrap();
        assert_eq!(written[0].1.width(), 64);
        assert_eq!(written[0].1.height(), 64);
    }

    #[test]
    fn test_export_crop_pixels_come_from_rect() {
        let writer = StubImageWriter::new();
        let written = writer.written.clone();
        let cropper = FaceCropper::new(Box::new(writer), 0.0);

        // Mark pixel (row=5, col=6) red in a 20x20 frame
        let mut data = vec![0u8; 20 * 20 * 3];
        data[(5 * 20 + 6) * 3] = 255;
        let frame = Frame::new(data, 20, 20);

        // Zero padding: crop is exactly the box [4,8) x [4,8)
        cropper
            .export(&frame, &bbox(4, 8, 8, 4), Path::new("out.jpg"))
            .unwrap();

        let written = written.lock().unwrap();
        let crop = &written[0].1;
        assert_eq!(crop.width(), 4);
        assert_eq!(crop.height(), 4);
        // Marked pixel lands at crop (row=1, col=2)
        assert_eq!(crop.as_ndarray()[[1, 2, 0]], 255);
    }

    #[test]
    fn test_export_write_failure_is_returned() {
        let mut writer = StubImageWriter::new();
        writer.fail = true;
        let cropper = FaceCropper::new(Box::new(writer), 0.3);

        let frame = make_frame(100, 100);
        let result = cropper.export(&frame, &bbox(10, 30, 30, 10), Path::new("out.jpg"));
        assert!(result.is_err());
    }

    #[test]
    fn test_export_box_outside_image_is_an_error() {
        let writer = StubImageWriter::new();
        let written = writer.written.clone();
        let cropper = FaceCropper::new(Box::new(writer), 0.3);

        // Box entirely beyond a small frame
        let frame = make_frame(100, 100);
        let result = cropper.export(&frame, &bbox(200, 300, 300, 200), Path::new("out.jpg"));
        assert!(result.is_err());
        assert!(written.lock().unwrap().is_empty());
    }
}
