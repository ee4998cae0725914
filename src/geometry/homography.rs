use imageproc::geometric_transformations::Projection;
use kurbo::Point;

use crate::foundation::error::{BillboardError, BillboardResult};

/// Largest corner reprojection error accepted, relative to the frame extent.
const REPROJECTION_TOLERANCE: f64 = 1e-3;

/// Projective transform between two planes, backed by imageproc's
/// [`Projection`].
#[derive(Clone, Copy, Debug)]
pub struct Homography {
    projection: Projection,
}

impl Homography {
    /// The transform that maps every point onto itself.
    pub fn identity() -> Self {
        Self {
            projection: Projection::scale(1.0, 1.0),
        }
    }

    /// Solve the transform carrying each `src[i]` onto `dst[i]`.
    ///
    /// Degenerate correspondences (collinear corners, repeated points) have
    /// no exact solution; they are detected by reprojecting the source
    /// corners and fail with `InvalidGeometry`.
    pub fn from_correspondences(src: [Point; 4], dst: [Point; 4]) -> BillboardResult<Self> {
        let projection = Projection::from_control_points(src.map(to_f32), dst.map(to_f32))
            .ok_or_else(|| BillboardError::geometry("perspective transform is singular"))?;
        let h = Self { projection };

        let extent = src
            .iter()
            .chain(dst.iter())
            .fold(1.0f64, |acc, p| acc.max(p.x.abs()).max(p.y.abs()));
        let tolerance = REPROJECTION_TOLERANCE * extent;
        for (s, d) in src.iter().zip(dst.iter()) {
            let fits = h
                .apply(*s)
                .is_some_and(|m| (m.x - d.x).abs() <= tolerance && (m.y - d.y).abs() <= tolerance);
            if !fits {
                return Err(BillboardError::geometry(
                    "perspective transform is singular",
                ));
            }
        }
        Ok(h)
    }

    /// Map a point; `None` when it lands on the line at infinity.
    pub fn apply(&self, p: Point) -> Option<Point> {
        let (x, y) = self.projection * to_f32(p);
        (x.is_finite() && y.is_finite()).then(|| Point::new(f64::from(x), f64::from(y)))
    }

    /// The transform running the other way.
    pub fn inverse(&self) -> Self {
        Self {
            projection: self.projection.invert(),
        }
    }
}

fn to_f32(p: Point) -> (f32, f32) {
    (p.x as f32, p.y as f32)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/homography.rs"]
mod tests;
