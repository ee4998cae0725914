use image::imageops::{self, FilterType};
use image::{Rgb, Rgb32FImage, RgbImage};
use kurbo::Point;

use crate::config::effect::EffectConfig;
use crate::effects::finish::to_f32;
use crate::foundation::math::{odd_kernel, sigma_for_kernel};
use crate::raster::blur::blur_rgb;

const UPSCALE: u32 = 2;
const MIN_PAD_PX: u32 = 8;
const INPAINT_MIN_EDGE: u32 = 11; // edge_blur > 10

/// How the creative is extended past its own edges before warping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BorderMode {
    /// Mirror the image about its edge pixels.
    Reflect,
    /// Grow the edge colors outward by diffusion.
    Inpaint,
}

impl BorderMode {
    /// Mode used for a given `edge_blur`: mirroring up to 10, inpainting above.
    pub fn for_edge_blur(edge_blur: u32) -> Self {
        if edge_blur >= INPAINT_MIN_EDGE {
            Self::Inpaint
        } else {
            Self::Reflect
        }
    }
}

/// Creative ready for warping: upscaled, blurred and padded.
#[derive(Clone, Debug)]
pub struct PreparedCreative {
    /// Padded float image, samples in 0..=255.
    pub image: Rgb32FImage,
    /// Pixels of padding on every side.
    pub pad: u32,
    /// Width of the creative area inside the padding.
    pub inner_width: u32,
    /// Height of the creative area inside the padding.
    pub inner_height: u32,
}

impl PreparedCreative {
    /// Corners of the unpadded area, clockwise from top-left.
    pub fn inner_corners(&self) -> [Point; 4] {
        let x0 = f64::from(self.pad);
        let y0 = f64::from(self.pad);
        let x1 = x0 + f64::from(self.inner_width);
        let y1 = y0 + f64::from(self.inner_height);
        [
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        ]
    }
}

/// Upscale the creative 2x (Catmull-Rom), apply the pre-warp blur and pad
/// every side by `max(8, 2 * edge_blur)` pixels.
pub fn prepare_creative(creative: &RgbImage, config: &EffectConfig) -> PreparedCreative {
    let (w, h) = creative.dimensions();
    let upscaled = {
        let resized = imageops::resize(creative, w * UPSCALE, h * UPSCALE, FilterType::CatmullRom);
        to_f32(&resized)
    };

    let blurred = if config.image_blur() > 0 {
        let k = odd_kernel(2 * config.image_blur() + 1);
        blur_rgb(&upscaled, k, sigma_for_kernel(k))
    } else {
        upscaled
    };

    let pad = MIN_PAD_PX.max(2 * config.edge_blur());
    let mode = BorderMode::for_edge_blur(config.edge_blur());
    tracing::debug!(pad, ?mode, "extending creative border");
    PreparedCreative {
        inner_width: blurred.width(),
        inner_height: blurred.height(),
        image: extend_border(&blurred, pad, mode),
        pad,
    }
}

/// Grow `src` by `pad` pixels on every side.
pub fn extend_border(src: &Rgb32FImage, pad: u32, mode: BorderMode) -> Rgb32FImage {
    let (w, h) = src.dimensions();
    let (ow, oh) = (w + 2 * pad, h + 2 * pad);
    match mode {
        BorderMode::Reflect => Rgb32FImage::from_fn(ow, oh, |x, y| {
            let sx = reflect101(x as i64 - i64::from(pad), w);
            let sy = reflect101(y as i64 - i64::from(pad), h);
            *src.get_pixel(sx, sy)
        }),
        BorderMode::Inpaint => inpaint_border(src, pad),
    }
}

/// Mirror an index into `0..len` without repeating the edge sample.
pub(crate) fn reflect101(i: i64, len: u32) -> u32 {
    let n = i64::from(len);
    if n <= 1 {
        return 0;
    }
    let period = 2 * (n - 1);
    let m = i.rem_euclid(period);
    (if m < n { m } else { period - m }) as u32
}

fn inpaint_border(src: &Rgb32FImage, pad: u32) -> Rgb32FImage {
    let (w, h) = src.dimensions();
    let (ow, oh) = (w + 2 * pad, h + 2 * pad);
    let inside = |x: u32, y: u32| x >= pad && y >= pad && x < pad + w && y < pad + h;

    // Seed with the nearest edge color, then relax the padding so the fill
    // carries a smooth blend of neighboring edge colors instead of streaks.
    let mut cur = Rgb32FImage::from_fn(ow, oh, |x, y| {
        let sx = (x as i64 - i64::from(pad)).clamp(0, i64::from(w) - 1) as u32;
        let sy = (y as i64 - i64::from(pad)).clamp(0, i64::from(h) - 1) as u32;
        *src.get_pixel(sx, sy)
    });
    for _ in 0..pad {
        let prev = cur.clone();
        for (x, y, px) in cur.enumerate_pixels_mut() {
            if inside(x, y) {
                continue;
            }
            let mut acc = [0.0f32; 3];
            let mut n = 0.0f32;
            for (dx, dy) in [(-1i64, 0i64), (1, 0), (0, -1), (0, 1)] {
                let nx = x as i64 + dx;
                let ny = y as i64 + dy;
                if nx < 0 || ny < 0 || nx >= i64::from(ow) || ny >= i64::from(oh) {
                    continue;
                }
                let p = prev.get_pixel(nx as u32, ny as u32).0;
                for c in 0..3 {
                    acc[c] += p[c];
                }
                n += 1.0;
            }
            *px = Rgb(acc.map(|v| v / n));
        }
    }
    cur
}

#[cfg(test)]
#[path = "../../tests/unit/composite/prepare.rs"]
mod tests;
