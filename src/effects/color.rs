use image::Rgb32FImage;

use crate::config::effect::EffectConfig;
use crate::effects::map_masked;
use crate::foundation::math::clamp255;
use crate::raster::color::{hsv_to_rgb, rgb_to_hsv};
use crate::raster::plane::Plane;

/// `v * contrast + (brightness - 1) * 100`, with both multipliers given as
/// fractions (1.0 = neutral).
pub fn brightness_contrast(rgb: [f32; 3], brightness: f32, contrast: f32) -> [f32; 3] {
    let offset = (brightness - 1.0) * 100.0;
    rgb.map(|c| clamp255(c * contrast + offset))
}

/// Scale HSV saturation by `factor`, capped at fully saturated.
pub fn saturate(rgb: [f32; 3], factor: f32) -> [f32; 3] {
    let (h, s, v) = rgb_to_hsv(rgb);
    hsv_to_rgb(h, (s * factor).clamp(0.0, 1.0), v).map(clamp255)
}

/// Additive lighting in [-100, 100]; each step moves channels by 2 levels.
pub fn add_lighting(rgb: [f32; 3], amount: f32) -> [f32; 3] {
    rgb.map(|c| clamp255(c + amount * 2.0))
}

/// Warm (positive) pushes red then green; cool (negative) pushes blue then
/// green. The dominant channel moves twice as far as the secondary.
pub fn shift_temperature(rgb: [f32; 3], temperature: f32) -> [f32; 3] {
    let [r, g, b] = rgb;
    let t = temperature.abs();
    let out = if temperature > 0.0 {
        [r + 2.0 * t, g + t, b]
    } else if temperature < 0.0 {
        [r, g + t, b + 2.0 * t]
    } else {
        rgb
    };
    out.map(clamp255)
}

/// Run the in-mask grading chain: brightness/contrast, saturation, lighting,
/// temperature. Neutral stages are skipped.
pub fn color_grade(img: &Rgb32FImage, mask: &Plane, config: &EffectConfig) -> Rgb32FImage {
    let brightness = config.brightness() / 100.0;
    let contrast = config.contrast() / 100.0;
    let saturation = config.saturation() / 100.0;
    let lighting = config.lighting_adjustment();
    let temperature = config.color_temperature();

    let do_bc = brightness != 1.0 || contrast != 1.0;
    let do_sat = saturation != 1.0;
    let do_light = lighting != 0.0;
    let do_temp = temperature != 0.0;
    if !(do_bc || do_sat || do_light || do_temp) {
        return img.clone();
    }
    tracing::debug!(do_bc, do_sat, do_light, do_temp, "color grade");

    map_masked(img, mask, |_, _, _, mut rgb| {
        if do_bc {
            rgb = brightness_contrast(rgb, brightness, contrast);
        }
        if do_sat {
            rgb = saturate(rgb, saturation);
        }
        if do_light {
            rgb = add_lighting(rgb, lighting);
        }
        if do_temp {
            rgb = shift_temperature(rgb, temperature);
        }
        rgb
    })
}

#[cfg(test)]
#[path = "../../tests/unit/effects/color.rs"]
mod tests;
