use super::*;

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn near(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < 1e-2 && (a.y - b.y).abs() < 1e-2
}

#[test]
fn maps_corners_onto_targets() {
    let src = [p(0.0, 0.0), p(400.0, 0.0), p(400.0, 200.0), p(0.0, 200.0)];
    let dst = [p(102.0, 40.0), p(410.0, 62.0), p(398.0, 250.0), p(95.0, 231.0)];
    let h = Homography::from_correspondences(src, dst).unwrap();
    for i in 0..4 {
        assert!(near(h.apply(src[i]).unwrap(), dst[i]), "corner {i}");
    }
}

#[test]
fn scale_translation_maps_center() {
    let src = [p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)];
    let dst = [p(10.0, 20.0), p(30.0, 20.0), p(30.0, 40.0), p(10.0, 40.0)];
    let h = Homography::from_correspondences(src, dst).unwrap();
    assert!(near(h.apply(p(0.5, 0.5)).unwrap(), p(20.0, 30.0)));
}

#[test]
fn inverse_roundtrips_points() {
    let src = [p(0.0, 0.0), p(320.0, 0.0), p(320.0, 240.0), p(0.0, 240.0)];
    let dst = [p(15.0, 12.0), p(280.0, 30.0), p(300.0, 210.0), p(5.0, 190.0)];
    let h = Homography::from_correspondences(src, dst).unwrap();
    let inv = h.inverse();
    for q in [p(17.0, 33.0), p(150.0, 120.0), p(299.0, 1.0)] {
        let back = inv.apply(h.apply(q).unwrap()).unwrap();
        assert!(near(back, q), "{q:?} -> {back:?}");
    }
}

#[test]
fn identity_leaves_points_alone() {
    let id = Homography::identity();
    for q in [p(0.0, 0.0), p(12.5, -3.25), p(640.0, 480.0)] {
        assert_eq!(id.apply(q).unwrap(), q);
        assert_eq!(id.inverse().apply(q).unwrap(), q);
    }
}

#[test]
fn collinear_source_is_singular() {
    let src = [p(0.0, 0.0), p(1.0, 1.0), p(2.0, 2.0), p(3.0, 3.0)];
    let dst = [p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)];
    let err = Homography::from_correspondences(src, dst).unwrap_err();
    assert!(matches!(err, BillboardError::InvalidGeometry(_)));
}
