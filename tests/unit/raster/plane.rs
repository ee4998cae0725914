use super::*;

#[test]
fn from_vec_checks_length() {
    assert!(Plane::from_vec(2, 2, vec![0.0; 4]).is_ok());
    let err = Plane::from_vec(2, 2, vec![0.0; 3]).unwrap_err();
    assert!(matches!(err, BillboardError::DimensionMismatch(_)));
}

#[test]
fn get_set_are_row_major() {
    let mut p = Plane::new(3, 2);
    p.set(2, 1, 0.5);
    assert_eq!(p.as_slice()[5], 0.5);
    assert_eq!(p.get(2, 1), 0.5);
}

#[test]
fn zip_map_and_extrema() {
    let a = Plane::from_vec(2, 1, vec![0.25, 1.0]).unwrap();
    let b = Plane::filled(2, 1, 0.5);
    let c = a.zip_map(&b, |x, y| x - y);
    assert_eq!(c.as_slice(), &[-0.25, 0.5]);
    assert_eq!(c.min_value(), -0.25);
    assert_eq!(c.max_value(), 0.5);
}
