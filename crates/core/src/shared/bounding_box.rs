use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BoundingBoxError {
    #[error("inverted vertical extent: top {top} must be less than bottom {bottom}")]
    InvertedVertical { top: u32, bottom: u32 },
    #[error("inverted horizontal extent: left {left} must be less than right {right}")]
    InvertedHorizontal { left: u32, right: u32 },
}

/// A detected face rectangle in pixel coordinates.
///
/// Construction enforces `top < bottom` and `left < right`; coordinates are
/// expected to lie within the source image as produced by the detector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    top: u32,
    right: u32,
    bottom: u32,
    left: u32,
}

/// The padded, clamped region actually exported for a face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn new(top: u32, right: u32, bottom: u32, left: u32) -> Result<Self, BoundingBoxError> {
        if top >= bottom {
            return Err(BoundingBoxError::InvertedVertical { top, bottom });
        }
        if left >= right {
            return Err(BoundingBoxError::InvertedHorizontal { left, right });
        }
        Ok(Self {
            top,
            right,
            bottom,
            left,
        })
    }

    pub fn top(&self) -> u32 {
        self.top
    }

    pub fn right(&self) -> u32 {
        self.right
    }

    pub fn bottom(&self) -> u32 {
        self.bottom
    }

    pub fn left(&self) -> u32 {
        self.left
    }

    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }

    /// Computes the export region: the box grown by
    /// `floor(ratio * max(width, height))` on every side, with each edge
    /// clamped independently to `[0, image_width) × [0, image_height)`.
    pub fn padded_crop(&self, image_width: u32, image_height: u32, ratio: f64) -> CropRect {
        let padding = (ratio * f64::from(self.width().max(self.height()))).floor() as i64;

        let x1 = (i64::from(self.left) - padding).max(0) as u32;
        let y1 = (i64::from(self.top) - padding).max(0) as u32;
        let x2 = ((i64::from(self.right) + padding).min(i64::from(image_width))).max(0) as u32;
        let y2 = ((i64::from(self.bottom) + padding).min(i64::from(image_height))).max(0) as u32;

        CropRect {
            x: x1,
            y: y1,
            width: x2.saturating_sub(x1),
            height: y2.saturating_sub(y1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn bbox(top: u32, right: u32, bottom: u32, left: u32) -> BoundingBox {
        BoundingBox::new(top, right, bottom, left).unwrap()
    }

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn test_valid_box() {
        let b = bbox(10, 110, 110, 10);
        assert_eq!(b.width(), 100);
        assert_eq!(b.height(), 100);
    }

    #[test]
    fn test_inverted_vertical_rejected() {
        assert_eq!(
            BoundingBox::new(110, 110, 10, 10),
            Err(BoundingBoxError::InvertedVertical {
                top: 110,
                bottom: 10
            })
        );
    }

    #[test]
    fn test_inverted_horizontal_rejected() {
        assert_eq!(
            BoundingBox::new(10, 10, 110, 110),
            Err(BoundingBoxError::InvertedHorizontal {
                left: 110,
                right: 10
            })
        );
    }

    #[test]
    fn test_zero_extent_rejected() {
        assert!(BoundingBox::new(10, 110, 10, 10).is_err());
        assert!(BoundingBox::new(10, 10, 110, 10).is_err());
    }

    // ── Padded crop ──────────────────────────────────────────────────

    #[test]
    fn test_padded_crop_clamps_at_low_edge() {
        // 100x100 box at (10,10) on a 200x200 image, ratio 0.3 → padding 30.
        // Low edges clamp to 0; high edges reach 110+30=140 unclamped.
        let crop = bbox(10, 110, 110, 10).padded_crop(200, 200, 0.3);
        assert_eq!(
            crop,
            CropRect {
                x: 0,
                y: 0,
                width: 140,
                height: 140
            }
        );
    }

    #[test]
    fn test_padded_crop_interior_box_unclamped() {
        // 40x40 box at (100,100) on 300x300, padding = 12
        let crop = bbox(100, 140, 140, 100).padded_crop(300, 300, 0.3);
        assert_eq!(
            crop,
            CropRect {
                x: 88,
                y: 88,
                width: 64,
                height: 64
            }
        );
    }

    #[test]
    fn test_padded_crop_clamps_at_high_edge() {
        // Box touching the bottom-right corner of a 120x120 image
        let crop = bbox(80, 120, 120, 80).padded_crop(120, 120, 0.3);
        // padding = 12; low edges 80-12=68, high edges clamp to 120
        assert_eq!(
            crop,
            CropRect {
                x: 68,
                y: 68,
                width: 52,
                height: 52
            }
        );
    }

    #[test]
    fn test_padded_crop_padding_uses_max_dimension() {
        // 20x60 box: padding = floor(0.3 * 60) = 18 on every side
        let crop = bbox(100, 120, 160, 100).padded_crop(400, 400, 0.3);
        assert_eq!(crop.x, 82);
        assert_eq!(crop.y, 82);
        assert_eq!(crop.width, 20 + 2 * 18);
        assert_eq!(crop.height, 60 + 2 * 18);
    }

    #[test]
    fn test_padded_crop_zero_ratio_is_identity() {
        let crop = bbox(10, 50, 60, 20).padded_crop(100, 100, 0.0);
        assert_eq!(
            crop,
            CropRect {
                x: 20,
                y: 10,
                width: 30,
                height: 50
            }
        );
    }

    #[rstest]
    #[case::tiny_image(10, 10)]
    #[case::tall_image(50, 400)]
    #[case::wide_image(400, 50)]
    fn test_padded_crop_always_within_image(#[case] img_w: u32, #[case] img_h: u32) {
        let b = bbox(2, 9, 9, 2);
        let crop = b.padded_crop(img_w, img_h, 0.3);
        assert!(crop.x + crop.width <= img_w);
        assert!(crop.y + crop.height <= img_h);
    }

    #[test]
    fn test_padded_crop_large_ratio_covers_whole_image() {
        let crop = bbox(40, 60, 60, 40).padded_crop(100, 100, 5.0);
        assert_eq!(
            crop,
            CropRect {
                x: 0,
                y: 0,
                width: 100,
                height: 100
            }
        );
    }
}
