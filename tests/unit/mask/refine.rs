use super::*;

fn square_mask(size: u32, lo: u32, hi: u32) -> Plane {
    let mut p = Plane::new(size, size);
    for y in lo..hi {
        for x in lo..hi {
            p.set(x, y, 1.0);
        }
    }
    p
}

fn in_unit_range(p: &Plane) -> bool {
    p.min_value() >= 0.0 && p.max_value() <= 1.0 + 1e-6
}

#[test]
fn gamma_blur_softens_edges_but_keeps_core() {
    let m = square_mask(60, 15, 45);
    let out = gamma_blur(&m, 9);
    assert!(in_unit_range(&out));
    assert!(out.get(30, 30) > 0.99);
    let rim = out.get(15, 30);
    assert!(rim > 0.2 && rim < 0.99, "rim={rim}");
    assert!(out.get(13, 30) > 0.0);
    assert!(out.get(2, 2) < 1e-3);
}

#[test]
fn feather_ramps_from_boundary_inward() {
    let m = square_mask(80, 10, 70);
    let out = feather(&m, 9);
    assert!(in_unit_range(&out));
    // Deep interior: both halves are 1.
    assert!((out.get(40, 40) - 1.0).abs() < 1e-6);
    // First interior pixel: 0.5 from the mask plus a small smoothstep term.
    let edge = out.get(10, 40);
    assert!(edge > 0.5 && edge < 0.6, "edge={edge}");
    assert!(out.get(12, 40) < out.get(20, 40));
    assert_eq!(out.get(5, 40), 0.0);
}

#[test]
fn choke_spread_stays_in_range_and_pulls_edge_in() {
    let m = square_mask(40, 10, 30);
    let out = choke_spread(&m, 7);
    assert!(in_unit_range(&out));
    assert!(out.get(10, 20) < 1.0);
    assert!(out.get(20, 20) > 0.99);
}

#[test]
fn luminance_adaptation_only_touches_transition_band() {
    let mut m = Plane::filled(8, 8, 0.5);
    m.set(0, 0, 0.05);
    m.set(1, 0, 0.95);

    let mut dark = Rgb32FImage::new(8, 8);
    for px in dark.pixels_mut() {
        px.0 = [10.0, 10.0, 10.0];
    }
    let mut bright = Rgb32FImage::new(8, 8);
    for px in bright.pixels_mut() {
        px.0 = [250.0, 250.0, 250.0];
    }

    let out = adapt_to_luminance(&m, &dark, &bright);
    assert_eq!(out.get(0, 0), 0.05);
    assert_eq!(out.get(1, 0), 0.95);
    // 0.5 sits on the pivot, so sharpening leaves it alone.
    assert!((out.get(4, 4) - 0.5).abs() < 1e-6);

    let mut m = Plane::filled(8, 8, 0.7);
    m.set(0, 0, 0.3);
    let out = adapt_to_luminance(&m, &dark, &bright);
    assert!(out.get(4, 4) > 0.7 && out.get(4, 4) <= 0.7 + 0.3 * 0.2 + 1e-5);
    assert!(out.get(0, 0) < 0.3);
}

#[test]
fn luminance_adaptation_ignores_similar_brightness() {
    let m = Plane::filled(6, 6, 0.7);
    let mut a = Rgb32FImage::new(6, 6);
    for px in a.pixels_mut() {
        px.0 = [120.0, 120.0, 120.0];
    }
    let out = adapt_to_luminance(&m, &a, &a);
    assert_eq!(out, m);
}

#[test]
fn contact_shadow_is_a_capped_band_at_the_boundary() {
    let m = square_mask(60, 15, 45);
    let shadow = contact_shadow(&m, 11);
    assert!(shadow.min_value() >= 0.0);
    assert!(shadow.max_value() <= 0.2 + 1e-6);
    assert!(shadow.get(16, 30) > shadow.get(30, 30));
    assert!(shadow.get(30, 30) < 1e-3);

    let weak = contact_shadow(&m, 5);
    assert!(weak.max_value() <= 0.1 + 1e-6);
}
