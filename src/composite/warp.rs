use image::{Rgb, Rgb32FImage};
use kurbo::Point;

use crate::composite::prepare::reflect101;
use crate::foundation::math::clamp255;
use crate::geometry::homography::Homography;

/// Resample `src` into a `width` x `height` canvas.
///
/// `dst_to_src` maps output coordinates back into `src`. Both spaces use
/// continuous coordinates where pixel `(x, y)` covers `[x, x+1) x [y, y+1)`.
/// Samples are bicubic (Catmull-Rom) with reflect-101 borders; output pixels
/// whose inverse lands at infinity are black.
pub fn warp_perspective(src: &Rgb32FImage, dst_to_src: &Homography, width: u32, height: u32) -> Rgb32FImage {
    Rgb32FImage::from_fn(width, height, |x, y| {
        let center = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
        match dst_to_src.apply(center) {
            Some(p) => Rgb(sample_bicubic(src, p.x - 0.5, p.y - 0.5)),
            None => Rgb([0.0; 3]),
        }
    })
}

/// Catmull-Rom sample at pixel-index coordinates `(fx, fy)`.
pub(crate) fn sample_bicubic(src: &Rgb32FImage, fx: f64, fy: f64) -> [f32; 3] {
    let (w, h) = src.dimensions();
    let x0 = fx.floor();
    let y0 = fy.floor();
    let wx = catmull_rom_weights((fx - x0) as f32);
    let wy = catmull_rom_weights((fy - y0) as f32);
    let (ix, iy) = (x0 as i64, y0 as i64);

    let mut acc = [0.0f32; 3];
    for (j, &ky) in wy.iter().enumerate() {
        let sy = reflect101(iy + j as i64 - 1, h);
        for (i, &kx) in wx.iter().enumerate() {
            let sx = reflect101(ix + i as i64 - 1, w);
            let p = src.get_pixel(sx, sy).0;
            let k = kx * ky;
            for c in 0..3 {
                acc[c] += k * p[c];
            }
        }
    }
    acc.map(clamp255)
}

fn catmull_rom_weights(t: f32) -> [f32; 4] {
    let t2 = t * t;
    let t3 = t2 * t;
    [
        0.5 * (-t3 + 2.0 * t2 - t),
        0.5 * (3.0 * t3 - 5.0 * t2 + 2.0),
        0.5 * (-3.0 * t3 + 4.0 * t2 + t),
        0.5 * (t3 - t2),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/composite/warp.rs"]
mod tests;
