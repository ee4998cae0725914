//! Edge refinement passes. Each pass takes the previous mask and returns a
//! new one; none of them mutate their input.

use image::{GrayImage, Luma, Rgb32FImage};
use imageproc::distance_transform::euclidean_squared_distance_transform;

use crate::foundation::math::{clamp01, lerp, luma, odd_kernel, sigma_for_kernel, smoothstep01};
use crate::raster::blur::blur_plane;
use crate::raster::morph::erode3x3;
use crate::raster::plane::Plane;

const GAMMA: f32 = 2.2;
const MAX_FEATHER_PX: f32 = 40.0;
const LUMA_BLUR_KERNEL: u32 = 5;
const LUMA_DIFF_THRESHOLD: f32 = 0.15;
const MAX_LUMA_SHARPEN: f32 = 0.3;
const MAX_CONTACT_SHADOW: f32 = 0.2;

fn gaussian(src: &Plane, ksize: u32) -> Plane {
    let k = odd_kernel(ksize);
    blur_plane(src, k, sigma_for_kernel(k))
}

/// Blur in linear light: a wide and a narrow Gaussian blended 80/20, so the
/// core stays firm while the rim falls off softly.
pub fn gamma_blur(mask: &Plane, edge_blur: u32) -> Plane {
    let linear = mask.map(|v| clamp01(v).powf(GAMMA));
    let large = gaussian(&linear, edge_blur);
    let small = gaussian(&linear, (edge_blur / 2).max(1));
    large.zip_map(&small, |l, s| (0.8 * l + 0.2 * s).max(0.0).powf(1.0 / GAMMA))
}

/// Distance-based smoothstep falloff from the interior, averaged with the
/// incoming mask.
pub fn feather(mask: &Plane, edge_blur: u32) -> Plane {
    let feather_px = (2.0 * edge_blur as f32).min(MAX_FEATHER_PX).max(1.0);

    // Foreground of the transform is the exterior: each pixel gets its
    // distance to the nearest pixel outside the frame.
    let exterior = GrayImage::from_fn(mask.width(), mask.height(), |x, y| {
        Luma([if mask.get(x, y) > 0.5 { 0 } else { 255 }])
    });
    let dist_sq = euclidean_squared_distance_transform(&exterior);

    let mut out = Plane::new(mask.width(), mask.height());
    for (x, y, px) in dist_sq.enumerate_pixels() {
        let d = px.0[0].sqrt() as f32;
        let smooth = smoothstep01(d / feather_px);
        out.set(x, y, 0.5 * mask.get(x, y) + 0.5 * smooth);
    }
    out
}

/// Erode by one pixel, re-blur, and keep 70% of the spread result.
pub fn choke_spread(mask: &Plane, edge_blur: u32) -> Plane {
    let choked = erode3x3(mask, 1);
    let spread = gaussian(&choked, (edge_blur / 2).max(3));
    spread.zip_map(&choked, |s, c| 0.7 * s + 0.3 * c)
}

/// Tighten the transition band where the creative and the background differ
/// strongly in brightness, so a bright ad on a dark frame does not halo.
pub fn adapt_to_luminance(mask: &Plane, destination: &Rgb32FImage, warped: &Rgb32FImage) -> Plane {
    let dst_luma = gaussian(&luma_plane(destination), LUMA_BLUR_KERNEL);
    let src_luma = gaussian(&luma_plane(warped), LUMA_BLUR_KERNEL);

    let mut out = mask.clone();
    let data = out.as_mut_slice();
    for (i, m) in data.iter_mut().enumerate() {
        let v = *m;
        if v <= 0.1 || v >= 0.9 {
            continue;
        }
        let diff = (dst_luma.as_slice()[i] - src_luma.as_slice()[i]).abs() / 255.0;
        if diff <= LUMA_DIFF_THRESHOLD {
            continue;
        }
        let strength = diff.min(1.0) * MAX_LUMA_SHARPEN;
        let sharpened = clamp01((v - 0.5) * 2.0 + 0.5);
        *m = lerp(v, sharpened, strength);
    }
    out
}

/// Darkening band hugging the inside of the mask edge.
pub fn contact_shadow(mask: &Plane, edge_blur: u32) -> Plane {
    let eroded = erode3x3(mask, 2);
    let band = mask.zip_map(&eroded, |m, e| clamp01((m - e) * 4.0));
    let intensity = (edge_blur as f32 / 50.0).min(MAX_CONTACT_SHADOW);
    gaussian(&band, edge_blur).map(|v| clamp01(v) * intensity)
}

pub(crate) fn luma_plane(img: &Rgb32FImage) -> Plane {
    let mut out = Plane::new(img.width(), img.height());
    for (x, y, px) in img.enumerate_pixels() {
        out.set(x, y, luma(px.0));
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/mask/refine.rs"]
mod tests;
