use crate::foundation::error::{BillboardError, BillboardResult};

/// Single-channel `f32` raster, row-major.
///
/// Used for the blend mask, the contact shadow and intermediate luminance
/// maps. Values are not range-restricted by the type itself.
#[derive(Clone, Debug, PartialEq)]
pub struct Plane {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl Plane {
    /// A plane of zeros.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, 0.0)
    }

    /// A plane with every sample set to `value`.
    pub fn filled(width: u32, height: u32, value: f32) -> Self {
        Self {
            width,
            height,
            data: vec![value; (width as usize) * (height as usize)],
        }
    }

    /// Wrap an existing buffer; its length must be `width * height`.
    pub fn from_vec(width: u32, height: u32, data: Vec<f32>) -> BillboardResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| BillboardError::dimensions("plane size overflow"))?;
        if data.len() != expected {
            return Err(BillboardError::dimensions(format!(
                "plane buffer has {} samples, expected {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major samples.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Mutable row-major samples.
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Take the sample buffer.
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Sample at `(x, y)`; panics when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.data[self.index(x, y)]
    }

    /// Write the sample at `(x, y)`.
    pub fn set(&mut self, x: u32, y: u32, v: f32) {
        let idx = self.index(x, y);
        self.data[idx] = v;
    }

    /// Whether both planes share dimensions.
    pub fn same_size(&self, other: &Plane) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Apply `f` to every sample, producing a new plane.
    pub fn map(&self, f: impl Fn(f32) -> f32) -> Plane {
        Plane {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Combine two equally sized planes sample by sample.
    pub fn zip_map(&self, other: &Plane, f: impl Fn(f32, f32) -> f32) -> Plane {
        debug_assert!(self.same_size(other));
        Plane {
            width: self.width,
            height: self.height,
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
        }
    }

    /// Smallest sample; `+inf` for an empty plane.
    pub fn min_value(&self) -> f32 {
        self.data.iter().copied().fold(f32::INFINITY, f32::min)
    }

    /// Largest sample; `-inf` for an empty plane.
    pub fn max_value(&self) -> f32 {
        self.data.iter().copied().fold(f32::NEG_INFINITY, f32::max)
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(x < self.width && y < self.height, "plane index out of bounds");
        (y as usize) * (self.width as usize) + (x as usize)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/plane.rs"]
mod tests;
