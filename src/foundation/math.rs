/// Hermite smoothstep `3t^2 - 2t^3` on an already normalized `t`.
pub(crate) fn smoothstep01(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

pub(crate) fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

pub(crate) fn clamp01(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}

pub(crate) fn clamp255(v: f32) -> f32 {
    v.clamp(0.0, 255.0)
}

/// Rec. 601 luma of an RGB triple in the same units as the input.
pub(crate) fn luma(rgb: [f32; 3]) -> f32 {
    0.299 * rgb[0] + 0.587 * rgb[1] + 0.114 * rgb[2]
}

/// Round a kernel size up to the next odd value, never below 1.
pub(crate) fn odd_kernel(size: u32) -> u32 {
    if size == 0 {
        1
    } else if size % 2 == 0 {
        size + 1
    } else {
        size
    }
}

/// Sigma implied by a kernel size when none is given explicitly.
pub(crate) fn sigma_for_kernel(ksize: u32) -> f32 {
    0.3 * ((ksize as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Normalized 1D Gaussian weights for an odd kernel size.
pub(crate) fn gaussian_kernel(ksize: u32, sigma: f32) -> Vec<f32> {
    let ksize = odd_kernel(ksize);
    if ksize == 1 || !sigma.is_finite() || sigma <= 0.0 {
        return vec![1.0];
    }

    let r = (ksize / 2) as i32;
    let denom = 2.0 * f64::from(sigma) * f64::from(sigma);
    let weights_f: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = f64::from(i);
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights_f.iter().sum();
    weights_f.iter().map(|w| (w / sum) as f32).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
