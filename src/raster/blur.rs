use image::Rgb32FImage;

use crate::foundation::math::gaussian_kernel;
use crate::raster::plane::Plane;

/// Separable Gaussian blur of a plane. Edges are clamped.
pub fn blur_plane(src: &Plane, ksize: u32, sigma: f32) -> Plane {
    let kernel = gaussian_kernel(ksize, sigma);
    if kernel.len() == 1 {
        return src.clone();
    }
    let mut out = src.clone();
    separable(src.as_slice(), out.as_mut_slice(), src.width(), src.height(), 1, &kernel);
    out
}

/// Separable Gaussian blur of a float RGB image. Edges are clamped.
pub fn blur_rgb(src: &Rgb32FImage, ksize: u32, sigma: f32) -> Rgb32FImage {
    let kernel = gaussian_kernel(ksize, sigma);
    if kernel.len() == 1 {
        return src.clone();
    }
    let (w, h) = src.dimensions();
    let mut out = src.clone();
    separable(src.as_raw(), &mut out, w, h, 3, &kernel);
    out
}

/// Blur `src` into `dst`; both hold `width * height * channels` samples.
fn separable(src: &[f32], dst: &mut [f32], width: u32, height: u32, channels: usize, k: &[f32]) {
    let mut tmp = vec![0.0f32; src.len()];
    horizontal_pass(src, &mut tmp, width, height, channels, k);
    vertical_pass(&tmp, dst, width, height, channels, k);
}

fn horizontal_pass(src: &[f32], dst: &mut [f32], width: u32, height: u32, ch: usize, k: &[f32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    for y in 0..height as i32 {
        for x in 0..w {
            let out_idx = ((y * w + x) as usize) * ch;
            for c in 0..ch {
                let mut acc = 0.0f32;
                for (ki, &kw) in k.iter().enumerate() {
                    let sx = (x + ki as i32 - radius).clamp(0, w - 1);
                    acc += kw * src[((y * w + sx) as usize) * ch + c];
                }
                dst[out_idx + c] = acc;
            }
        }
    }
}

fn vertical_pass(src: &[f32], dst: &mut [f32], width: u32, height: u32, ch: usize, k: &[f32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let h = height as i32;
    for y in 0..h {
        for x in 0..w {
            let out_idx = ((y * w + x) as usize) * ch;
            for c in 0..ch {
                let mut acc = 0.0f32;
                for (ki, &kw) in k.iter().enumerate() {
                    let sy = (y + ki as i32 - radius).clamp(0, h - 1);
                    acc += kw * src[((sy * w + x) as usize) * ch + c];
                }
                dst[out_idx + c] = acc;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/blur.rs"]
mod tests;
