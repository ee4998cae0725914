use image::Rgb32FImage;
use kurbo::Rect;

use crate::effects::map_masked;
use crate::raster::plane::Plane;

/// Radial darkening centered on `bounds`, reaching `strength` (0..=1) at the
/// half-diagonal.
pub fn vignette(img: &Rgb32FImage, mask: &Plane, bounds: Rect, strength: f32) -> Rgb32FImage {
    if strength <= 0.0 {
        return img.clone();
    }
    let center = bounds.center();
    let radius = (0.5 * (bounds.width().hypot(bounds.height()))).max(1.0);
    map_masked(img, mask, |x, y, _, rgb| {
        let dx = f64::from(x) + 0.5 - center.x;
        let dy = f64::from(y) + 0.5 - center.y;
        let d = (dx.hypot(dy) / radius).min(1.0) as f32;
        let factor = 1.0 - strength * d * d;
        rgb.map(|c| c * factor)
    })
}

/// Darken in proportion to `1 - sqrt(mask)`, concentrating the effect where
/// the mask fades out.
pub fn edge_shadow(img: &Rgb32FImage, mask: &Plane, strength: f32) -> Rgb32FImage {
    if strength <= 0.0 {
        return img.clone();
    }
    map_masked(img, mask, |_, _, m, rgb| {
        let factor = 1.0 - (1.0 - m.sqrt()) * strength;
        rgb.map(|c| c * factor)
    })
}

/// Multiply by `1 - shadow` everywhere.
pub fn apply_contact_shadow(img: &Rgb32FImage, shadow: &Plane) -> Rgb32FImage {
    debug_assert_eq!(img.dimensions(), (shadow.width(), shadow.height()));
    let mut out = img.clone();
    for (x, y, px) in out.enumerate_pixels_mut() {
        let keep = 1.0 - shadow.get(x, y).clamp(0.0, 1.0);
        px.0 = px.0.map(|c| c * keep);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/effects/lighting.rs"]
mod tests;
