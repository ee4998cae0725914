use std::cmp::Ordering;

use kurbo::{BezPath, Point, Rect, Shape as _};

use crate::foundation::error::{BillboardError, BillboardResult};

const MIN_AREA: f64 = 1e-6;

/// Billboard frame corners in canonical order: top-left, top-right,
/// bottom-right, bottom-left, clockwise in image space (y down).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Quad {
    points: [Point; 4],
}

impl Quad {
    /// Corners in TL, TR, BR, BL order.
    pub fn points(&self) -> [Point; 4] {
        self.points
    }

    /// Top-left corner.
    pub fn top_left(&self) -> Point {
        self.points[0]
    }

    /// Top-right corner.
    pub fn top_right(&self) -> Point {
        self.points[1]
    }

    /// Bottom-right corner.
    pub fn bottom_right(&self) -> Point {
        self.points[2]
    }

    /// Bottom-left corner.
    pub fn bottom_left(&self) -> Point {
        self.points[3]
    }

    /// Axis-aligned bounds of the four corners.
    pub fn bounding_box(&self) -> Rect {
        self.to_path().bounding_box()
    }

    /// Enclosed area in square pixels.
    pub fn area(&self) -> f64 {
        self.to_path().area().abs()
    }

    /// Nonzero-winding containment test.
    pub fn contains(&self, p: Point) -> bool {
        self.to_path().winding(p) != 0
    }

    /// Closed polygon path through the corners.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.points[0]);
        for &p in &self.points[1..] {
            path.line_to(p);
        }
        path.close_path();
        path
    }
}

/// Normalize four unordered frame corners into a [`Quad`].
///
/// The top-left corner minimizes `x + y`, bottom-right maximizes it; top-right
/// minimizes `y - x`, bottom-left maximizes it. A counter-clockwise result is
/// flipped by swapping top-right and bottom-left. When two roles land on the
/// same point (a frame rotated close to 45 degrees) the corners are instead
/// sorted by angle around their centroid. The result depends only on the set
/// of points, so ordering an already ordered quad is a no-op.
pub fn order_corners(points: &[Point]) -> BillboardResult<Quad> {
    let pts: [Point; 4] = points.try_into().map_err(|_| {
        BillboardError::geometry(format!("expected 4 frame corners, got {}", points.len()))
    })?;
    if pts.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return Err(BillboardError::geometry("frame corners must be finite"));
    }

    let tl = pick(&pts, |p| (p.x + p.y, p.y), Ordering::Less);
    let br = pick(&pts, |p| (p.x + p.y, p.y), Ordering::Greater);
    let tr = pick(&pts, |p| (p.y - p.x, p.y), Ordering::Less);
    let bl = pick(&pts, |p| (p.y - p.x, p.y), Ordering::Greater);

    let mut roles = [tl, tr, br, bl];
    let mut seen = roles;
    seen.sort_unstable();
    let distinct = seen.windows(2).all(|w| w[0] != w[1]);
    if !distinct {
        tracing::debug!("corner roles collide, falling back to angular ordering");
        roles = angular_order(&pts);
    }

    let mut ordered = roles.map(|i| pts[i]);
    let cross = (ordered[1] - ordered[0]).cross(ordered[2] - ordered[0]);
    if cross < 0.0 {
        ordered.swap(1, 3);
    }

    let quad = Quad { points: ordered };
    if quad.area() < MIN_AREA {
        return Err(BillboardError::geometry(
            "frame corners enclose zero area",
        ));
    }
    Ok(quad)
}

/// Index of the point whose key is extreme in direction `want`; ties fall to
/// the secondary key so the choice does not depend on input order.
fn pick(pts: &[Point; 4], key: impl Fn(&Point) -> (f64, f64), want: Ordering) -> usize {
    let mut best = 0;
    for i in 1..4 {
        if cmp_key(key(&pts[i]), key(&pts[best])) == want {
            best = i;
        }
    }
    best
}

fn cmp_key(a: (f64, f64), b: (f64, f64)) -> Ordering {
    a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1))
}

fn angular_order(pts: &[Point; 4]) -> [usize; 4] {
    let cx = pts.iter().map(|p| p.x).sum::<f64>() / 4.0;
    let cy = pts.iter().map(|p| p.y).sum::<f64>() / 4.0;

    let mut idx = [0usize, 1, 2, 3];
    // y grows downward, so increasing atan2 walks the corners clockwise.
    idx.sort_by(|&a, &b| {
        let ka = ((pts[a].y - cy).atan2(pts[a].x - cx), pts[a].x);
        let kb = ((pts[b].y - cy).atan2(pts[b].x - cx), pts[b].x);
        cmp_key(ka, kb)
    });
    let start = (0..4)
        .min_by(|&a, &b| {
            let pa = pts[idx[a]];
            let pb = pts[idx[b]];
            cmp_key((pa.x + pa.y, pa.y), (pb.x + pb.y, pb.y))
        })
        .unwrap_or(0);
    idx.rotate_left(start);
    idx
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/corners.rs"]
mod tests;
