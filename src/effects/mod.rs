pub mod color;
pub mod depth;
pub mod finish;
pub mod lighting;

use image::Rgb32FImage;

use crate::raster::plane::Plane;

/// Apply `f` to every pixel with a nonzero mask value; other pixels are
/// copied through. `f` receives the pixel position and its mask value.
pub(crate) fn map_masked(
    img: &Rgb32FImage,
    mask: &Plane,
    f: impl Fn(u32, u32, f32, [f32; 3]) -> [f32; 3],
) -> Rgb32FImage {
    debug_assert_eq!(img.dimensions(), (mask.width(), mask.height()));
    let mut out = img.clone();
    for (x, y, px) in out.enumerate_pixels_mut() {
        let m = mask.get(x, y);
        if m > 0.0 {
            px.0 = f(x, y, m, px.0).map(crate::foundation::math::clamp255);
        }
    }
    out
}
