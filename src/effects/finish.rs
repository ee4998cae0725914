use image::{Rgb, Rgb32FImage, RgbImage};
use kurbo::{Point, Shape as _};

use crate::foundation::math::clamp255;
use crate::geometry::corners::Quad;
use crate::raster::blur::blur_rgb;
use crate::raster::plane::Plane;

const SHARPEN_KERNEL: u32 = 5;
const SHARPEN_SIGMA: f32 = 1.0;

/// Mean creative color over the soft edge band (`0.1 < mask < 0.9`), falling
/// back to the solid interior when the band is empty.
pub fn edge_color(warped: &Rgb32FImage, mask: &Plane) -> Option<[f32; 3]> {
    mean_where(warped, mask, |m| m > 0.1 && m < 0.9).or_else(|| mean_where(warped, mask, |m| m > 0.5))
}

fn mean_where(img: &Rgb32FImage, mask: &Plane, pred: impl Fn(f32) -> bool) -> Option<[f32; 3]> {
    let mut acc = [0.0f64; 3];
    let mut n = 0u64;
    for (x, y, px) in img.enumerate_pixels() {
        if pred(mask.get(x, y)) {
            for c in 0..3 {
                acc[c] += f64::from(px.0[c]);
            }
            n += 1;
        }
    }
    (n > 0).then(|| acc.map(|v| (v / n as f64) as f32))
}

/// Replace every destination pixel whose center lies inside `quad` with
/// `color`, so heavy edge blur reveals creative-colored fill instead of the
/// photographed frame content.
pub fn prefill_frame(destination: &Rgb32FImage, quad: &Quad, color: [f32; 3]) -> Rgb32FImage {
    let mut out = destination.clone();
    let path = quad.to_path();
    let bb = quad.bounding_box();
    let (w, h) = destination.dimensions();
    let x0 = bb.x0.floor().max(0.0) as u32;
    let y0 = bb.y0.floor().max(0.0) as u32;
    let x1 = (bb.x1.ceil().max(0.0) as u32).min(w);
    let y1 = (bb.y1.ceil().max(0.0) as u32).min(h);
    let fill = Rgb(color.map(clamp255));
    for y in y0..y1 {
        for x in x0..x1 {
            let center = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            if path.winding(center) != 0 {
                out.put_pixel(x, y, fill);
            }
        }
    }
    out
}

/// `dst * (1 - a) + src * a` with `a = mask * opacity`, rounded to 8 bits.
pub fn blend(destination: &Rgb32FImage, warped: &Rgb32FImage, mask: &Plane, opacity: f32) -> RgbImage {
    let (w, h) = destination.dimensions();
    RgbImage::from_fn(w, h, |x, y| {
        let a = (mask.get(x, y) * opacity).clamp(0.0, 1.0);
        let d = destination.get_pixel(x, y).0;
        let s = warped.get_pixel(x, y).0;
        Rgb(std::array::from_fn(|c| to_u8(d[c] * (1.0 - a) + s[c] * a)))
    })
}

/// Unsharp mask limited to the frame: `v + (gain - 1) * (v - blur(v))`,
/// weighted by the mask. A gain of 1.0 returns the input unchanged.
pub fn sharpen(img: &RgbImage, mask: &Plane, gain: f32) -> RgbImage {
    if gain <= 1.0 {
        return img.clone();
    }
    let float = to_f32(img);
    let blurred = blur_rgb(&float, SHARPEN_KERNEL, SHARPEN_SIGMA);
    let amount = gain - 1.0;
    let mut out = img.clone();
    for (x, y, px) in out.enumerate_pixels_mut() {
        let m = mask.get(x, y);
        if m <= 0.0 {
            continue;
        }
        let v = float.get_pixel(x, y).0;
        let b = blurred.get_pixel(x, y).0;
        px.0 = std::array::from_fn(|c| to_u8(v[c] + m * amount * (v[c] - b[c])));
    }
    out
}

pub(crate) fn to_f32(img: &RgbImage) -> Rgb32FImage {
    let (w, h) = img.dimensions();
    Rgb32FImage::from_fn(w, h, |x, y| Rgb(img.get_pixel(x, y).0.map(f32::from)))
}

fn to_u8(v: f32) -> u8 {
    clamp255(v).round() as u8
}

#[cfg(test)]
#[path = "../../tests/unit/effects/finish.rs"]
mod tests;
