use image::{DynamicImage, ImageBuffer, Rgba, RgbaImage};
use thiserror::Error;

/// Default amplification factor applied to raw channel differences.
pub const DEFAULT_SCALE: f32 = 2.0;

/// Default offset subtracted after amplification. Empirically tuned against
/// sample images; differences below it read as background noise.
pub const DEFAULT_OFFSET: f32 = 115.0;

#[derive(Debug, Error)]
pub enum DetectError {
    #[error("image dimensions are zero")]
    ZeroDimensions,
}

/// Tuning knobs for the difference boost applied before the border decision.
#[derive(Debug, Clone, Copy)]
pub struct DetectorConfig {
    /// Amplification factor for per-channel differences.
    pub scale: f32,

    /// Offset subtracted after amplification, clamped at zero.
    pub offset: f32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            offset: DEFAULT_OFFSET,
        }
    }
}

/// Non-zero region of a difference image. `right` and `bottom` are exclusive
/// corner coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Bounds {
    left: u32,
    top: u32,
    right: u32,
    bottom: u32,
}

/// Determine whether an image carries a one-pixel contrasting border.
///
/// The pixel at (0, 0) is taken as the presumed background color. The image
/// is compared against a flat reference of that color, the difference is
/// amplified and offset, and the non-zero region of the result is checked:
/// a border ring leaves a difference region that starts past the first row
/// and column and ends no later than the last ones.
///
/// Pure function of the input; the same image always yields the same answer.
pub fn detect_border(image: &DynamicImage, config: &DetectorConfig) -> Result<bool, DetectError> {
    let pixels = image.to_rgba8();
    let (width, height) = pixels.dimensions();
    if width == 0 || height == 0 {
        return Err(DetectError::ZeroDimensions);
    }

    let reference = background_reference(&pixels);
    let diff = boosted_difference(&pixels, &reference, config);

    let bounds = match nonzero_bounds(&diff) {
        Some(bounds) => bounds,
        // Entirely uniform image: no difference region, so no border signal.
        None => return Ok(false),
    };

    Ok(bounds.left > 0
        && bounds.top > 0
        && bounds.left + bounds.right <= width
        && bounds.top + bounds.bottom <= height)
}

/// Flat image of the presumed background: every pixel takes the value of the
/// source pixel at (0, 0).
fn background_reference(image: &RgbaImage) -> RgbaImage {
    let background = *image.get_pixel(0, 0);
    ImageBuffer::from_fn(image.width(), image.height(), |_, _| background)
}

/// Per-channel absolute difference against the reference, amplified and
/// offset so small inconsistencies fall back to zero.
fn boosted_difference(
    image: &RgbaImage,
    reference: &RgbaImage,
    config: &DetectorConfig,
) -> RgbaImage {
    ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
        let source = image.get_pixel(x, y);
        let flat = reference.get_pixel(x, y);

        let mut boosted = [0u8; 4];
        for (out, (a, b)) in boosted.iter_mut().zip(source.0.iter().zip(flat.0.iter())) {
            let diff = a.abs_diff(*b);
            *out = (f32::from(diff) * config.scale - config.offset).clamp(0.0, 255.0) as u8;
        }
        Rgba(boosted)
    })
}

/// Smallest rectangle covering every pixel with a non-zero channel, or `None`
/// when the whole image is zero.
fn nonzero_bounds(image: &RgbaImage) -> Option<Bounds> {
    let mut bounds: Option<Bounds> = None;

    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel.0.iter().all(|&channel| channel == 0) {
            continue;
        }
        let bounds = bounds.get_or_insert(Bounds {
            left: x,
            top: y,
            right: x + 1,
            bottom: y + 1,
        });
        bounds.left = bounds.left.min(x);
        bounds.top = bounds.top.min(y);
        bounds.right = bounds.right.max(x + 1);
        bounds.bottom = bounds.bottom.max(y + 1);
    }

    bounds
}
