use crate::raster::plane::Plane;

/// Grayscale erosion with a 3x3 square element, repeated `iterations` times.
///
/// Samples outside the plane are ignored, so the border never erodes inward
/// on its own.
pub fn erode3x3(src: &Plane, iterations: u32) -> Plane {
    let mut cur = src.clone();
    for _ in 0..iterations {
        cur = erode_once(&cur);
    }
    cur
}

fn erode_once(src: &Plane) -> Plane {
    let (w, h) = (src.width() as i64, src.height() as i64);
    let data = src.as_slice();
    let mut out = Plane::new(src.width(), src.height());
    let dst = out.as_mut_slice();
    for y in 0..h {
        for x in 0..w {
            let mut m = f32::INFINITY;
            for ny in (y - 1).max(0)..=(y + 1).min(h - 1) {
                for nx in (x - 1).max(0)..=(x + 1).min(w - 1) {
                    m = m.min(data[(ny * w + nx) as usize]);
                }
            }
            dst[(y * w + x) as usize] = m;
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/raster/morph.rs"]
mod tests;
