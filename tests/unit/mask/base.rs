use super::*;

use crate::geometry::corners::order_corners;

fn square(lo: f64, hi: f64) -> Quad {
    order_corners(&[
        Point::new(lo, lo),
        Point::new(hi, lo),
        Point::new(hi, hi),
        Point::new(lo, hi),
    ])
    .unwrap()
}

#[test]
fn pixel_aligned_square_without_supersampling_is_exact() {
    let m = rasterize_quad(&square(25.0, 75.0), 100, 100, 1);
    let sum: f32 = m.as_slice().iter().sum();
    assert!((sum - 2500.0).abs() < 1e-3, "sum={sum}");
    assert_eq!(m.get(25, 25), 1.0);
    assert_eq!(m.get(24, 50), 0.0);
    assert_eq!(m.get(75, 50), 0.0);
}

#[test]
fn supersampled_square_has_full_interior_and_empty_exterior() {
    let m = rasterize_quad(&square(25.0, 75.0), 100, 100, 6);
    assert!(m.get(50, 50) > 0.999);
    assert_eq!(m.get(0, 0), 0.0);
    assert_eq!(m.get(99, 99), 0.0);
    assert!(m.min_value() >= 0.0 && m.max_value() <= 1.0);
}

#[test]
fn fractional_edges_get_partial_coverage() {
    let m = rasterize_quad(&square(10.5, 30.5), 40, 40, 8);
    let edge = m.get(10, 20);
    assert!(edge > 0.3 && edge < 0.7, "edge={edge}");
    assert!(m.get(20, 20) > 0.99);
}

#[test]
fn quad_outside_the_image_gives_empty_mask() {
    let m = rasterize_quad(&square(200.0, 260.0), 50, 50, 4);
    assert_eq!(m.max_value(), 0.0);
}

#[test]
fn quad_overhanging_the_image_is_clipped() {
    let m = rasterize_quad(&square(-20.0, 30.0), 40, 40, 2);
    assert_eq!(m.get(0, 0), 1.0);
    assert_eq!(m.get(35, 35), 0.0);
}
