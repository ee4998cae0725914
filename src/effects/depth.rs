use image::Rgb32FImage;
use kurbo::Rect;

use crate::effects::map_masked;
use crate::foundation::core::TimeOfDay;
use crate::foundation::math::luma;
use crate::raster::plane::Plane;

const NIGHT_MAX_FALLOFF: f32 = 0.35;
const DAY_MAX_DESATURATION: f32 = 0.15;
const DAY_MAX_CONTRAST_LOSS: f32 = 0.12;
const MID_GRAY: f32 = 127.5;

/// Simulate depth inside the frame.
///
/// At night the frame is lit from above, so brightness falls off toward the
/// bottom of `bounds`. By day distant boards lose saturation and contrast to
/// haze. `intensity` is in [0, 1]; zero returns an exact copy.
pub fn apply_depth(
    img: &Rgb32FImage,
    mask: &Plane,
    bounds: Rect,
    intensity: f32,
    time_of_day: TimeOfDay,
) -> Rgb32FImage {
    if intensity <= 0.0 {
        return img.clone();
    }
    let intensity = intensity.min(1.0);
    match time_of_day {
        TimeOfDay::Night => {
            let top = bounds.y0 as f32;
            let span = (bounds.height() as f32).max(1.0);
            map_masked(img, mask, |_, y, _, rgb| {
                let t = ((y as f32 + 0.5 - top) / span).clamp(0.0, 1.0);
                let factor = 1.0 - NIGHT_MAX_FALLOFF * intensity * t;
                rgb.map(|c| c * factor)
            })
        }
        TimeOfDay::Day => {
            let keep_sat = 1.0 - DAY_MAX_DESATURATION * intensity;
            let keep_contrast = 1.0 - DAY_MAX_CONTRAST_LOSS * intensity;
            map_masked(img, mask, |_, _, _, rgb| {
                let l = luma(rgb);
                rgb.map(|c| {
                    let c = l + (c - l) * keep_sat;
                    (c - MID_GRAY) * keep_contrast + MID_GRAY
                })
            })
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/depth.rs"]
mod tests;
