use super::*;

use kurbo::Point;

use crate::geometry::corners::order_corners;

fn flat(w: u32, h: u32, rgb: [f32; 3]) -> Rgb32FImage {
    let mut img = Rgb32FImage::new(w, h);
    for px in img.pixels_mut() {
        px.0 = rgb;
    }
    img
}

fn skewed_quad() -> Quad {
    order_corners(&[
        Point::new(12.3, 8.9),
        Point::new(70.1, 15.4),
        Point::new(66.6, 61.2),
        Point::new(9.7, 55.0),
    ])
    .unwrap()
}

#[test]
fn mask_stays_in_unit_range_for_every_edge_setting() {
    let quad = skewed_quad();
    let dst = flat(80, 70, [20.0, 30.0, 40.0]);
    let src = flat(80, 70, [240.0, 240.0, 240.0]);
    for edge in [1, 3, 5, 7, 9, 11, 13, 21] {
        for smoother in [1, 3, 4, 9] {
            let config = EffectConfig::builder()
                .edge_blur(edge)
                .edge_smoother(smoother)
                .build();
            let layers = build_mask(&quad, &config, &dst, &src);
            assert!(layers.mask.min_value() >= 0.0, "edge={edge}");
            assert!(layers.mask.max_value() <= 1.0, "edge={edge}");
            assert_eq!(layers.contact_shadow.is_some(), edge >= 10);
        }
    }
}

#[test]
fn disabled_passes_leave_base_mask_untouched() {
    let quad = skewed_quad();
    let dst = flat(80, 70, [0.0, 0.0, 0.0]);
    let config = EffectConfig::builder()
        .edge_blur(21)
        .edge_smoother(3)
        .all_passes(false)
        .build();
    let layers = build_mask(&quad, &config, &dst, &dst);
    let base = base::rasterize_quad(&quad, 80, 70, 3);
    assert_eq!(layers.mask, base);
    assert!(layers.contact_shadow.is_none());
}

#[test]
fn heavy_edge_blur_widens_transition() {
    let quad = skewed_quad();
    let dst = flat(80, 70, [0.0, 0.0, 0.0]);
    let partial = |edge: i32| {
        let config = EffectConfig::builder().edge_blur(edge).build();
        let m = build_mask(&quad, &config, &dst, &dst).mask;
        m.as_slice().iter().filter(|&&v| v > 0.02 && v < 0.98).count()
    };
    assert!(partial(15) > partial(1));
}
