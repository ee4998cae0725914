use kurbo::{BezPath, Point, Shape as _};

use crate::foundation::math::{clamp01, sigma_for_kernel};
use crate::geometry::corners::Quad;
use crate::raster::blur::blur_plane;
use crate::raster::plane::Plane;

const BOX_MARGIN_PX: f64 = 2.0;
const HIGH_RES_BLUR_MIN_FACTOR: u32 = 4;

/// Rasterize `quad` into a `width x height` coverage mask.
///
/// Coverage is evaluated at `supersample` x `supersample` samples per pixel,
/// each sample itself anti-aliased over a one-sample ramp around the edge,
/// then box-averaged back down. Only the quad's bounding box is supersampled.
pub fn rasterize_quad(quad: &Quad, width: u32, height: u32, supersample: u32) -> Plane {
    let mut mask = Plane::new(width, height);
    let bb = quad.bounding_box().inflate(BOX_MARGIN_PX, BOX_MARGIN_PX);
    let x0 = bb.x0.floor().max(0.0) as u32;
    let y0 = bb.y0.floor().max(0.0) as u32;
    let x1 = (bb.x1.ceil().max(0.0) as u32).min(width);
    let y1 = (bb.y1.ceil().max(0.0) as u32).min(height);
    if x0 >= x1 || y0 >= y1 {
        return mask;
    }

    let n = supersample.max(1);
    let (box_w, box_h) = (x1 - x0, y1 - y0);
    let hi = {
        let coverage = sample_coverage(quad, x0, y0, box_w * n, box_h * n, n);
        if n >= HIGH_RES_BLUR_MIN_FACTOR {
            blur_plane(&coverage, 3, sigma_for_kernel(3))
        } else {
            coverage
        }
    };

    let inv_area = 1.0 / (n * n) as f32;
    let hw = hi.width() as usize;
    let src = hi.as_slice();
    for by in 0..box_h {
        for bx in 0..box_w {
            let mut acc = 0.0f32;
            for sy in 0..n {
                let row = ((by * n + sy) as usize) * hw;
                for sx in 0..n {
                    acc += src[row + (bx * n + sx) as usize];
                }
            }
            mask.set(x0 + bx, y0 + by, clamp01(acc * inv_area));
        }
    }
    mask
}

fn sample_coverage(quad: &Quad, x0: u32, y0: u32, w: u32, h: u32, n: u32) -> Plane {
    let path: BezPath = quad.to_path();
    let corners = quad.points();
    let step = 1.0 / f64::from(n);
    let mut out = Plane::new(w, h);
    let data = out.as_mut_slice();
    for sy in 0..h {
        let py = f64::from(y0) + (f64::from(sy) + 0.5) * step;
        for sx in 0..w {
            let px = f64::from(x0) + (f64::from(sx) + 0.5) * step;
            let p = Point::new(px, py);
            // Distance in sample units drives a one-sample-wide ramp.
            let d = edge_distance(&corners, p) * f64::from(n);
            let signed = if path.winding(p) != 0 { d } else { -d };
            data[(sy * w + sx) as usize] = clamp01((0.5 + signed) as f32);
        }
    }
    out
}

fn edge_distance(corners: &[Point; 4], p: Point) -> f64 {
    (0..4)
        .map(|i| segment_distance(corners[i], corners[(i + 1) % 4], p))
        .fold(f64::INFINITY, f64::min)
}

fn segment_distance(a: Point, b: Point, p: Point) -> f64 {
    let ab = b - a;
    let len2 = ab.hypot2();
    if len2 <= f64::EPSILON {
        return (p - a).hypot();
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    (p - (a + ab * t)).hypot()
}

#[cfg(test)]
#[path = "../../tests/unit/mask/base.rs"]
mod tests;
