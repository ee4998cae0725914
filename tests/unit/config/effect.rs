use super::*;

use serde_json::json;

fn opts(v: Value) -> Map<String, Value> {
    match v {
        Value::Object(m) => m,
        _ => panic!("expected object"),
    }
}

#[test]
fn defaults_are_neutral() {
    let c = EffectConfig::default();
    assert_eq!(c.edge_blur(), 3);
    assert_eq!(c.brightness(), 100.0);
    assert_eq!(c.depth_multiplier(), NEUTRAL_DEPTH);
    assert_eq!(c.depth_intensity(), 0.0);
    assert_eq!(c.creative_opacity(), 1.0);
    assert_eq!(c.sharpen_multiplier(), 1.0);
    assert_eq!(c.pass_plan(), PassPlan::default());
}

#[test]
fn both_key_conventions_are_accepted() {
    let a = EffectConfig::from_options(&opts(json!({ "edge_blur": 9 }))).unwrap();
    let b = EffectConfig::from_options(&opts(json!({ "edgeBlur": 9 }))).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.edge_blur(), 9);

    let c = EffectConfig::from_options(&opts(json!({
        "enableBleedPrevention": false,
        "colorTemperature": -40,
        "vignetteStrength": 30,
    })))
    .unwrap();
    assert!(!c.pass_plan().bleed_prevention);
    assert_eq!(c.color_temperature(), -40.0);
    assert_eq!(c.vignette(), 30.0);
}

#[test]
fn unknown_keys_are_ignored() {
    let c = EffectConfig::from_options(&opts(json!({ "template_id": "abc", "zoom": 3 }))).unwrap();
    assert_eq!(c, EffectConfig::default());
}

#[test]
fn out_of_range_values_are_clamped_not_rejected() {
    let c = EffectConfig::from_options(&opts(json!({
        "edge_blur": 500,
        "edge_smoother": 0,
        "image_blur": -4,
        "brightness": 999,
        "contrast": -1,
        "saturation": 250,
        "lighting_adjustment": -300,
        "color_temperature": 101,
        "depth_multiplier": 1,
        "vignette": 140,
        "shadow_intensity": -5,
        "overlay_opacity": 100.5,
        "sharpening": 1e6,
    })))
    .unwrap();
    assert_eq!(c.edge_blur(), 21);
    assert_eq!(c.edge_smoother(), 1);
    assert_eq!(c.image_blur(), 0);
    assert_eq!(c.brightness(), 200.0);
    assert_eq!(c.contrast(), 0.0);
    assert_eq!(c.saturation(), 200.0);
    assert_eq!(c.lighting_adjustment(), -100.0);
    assert_eq!(c.color_temperature(), 100.0);
    assert_eq!(c.depth_multiplier(), 5.0);
    assert_eq!(c.vignette(), 100.0);
    assert_eq!(c.shadow_intensity(), 0.0);
    assert_eq!(c.overlay_opacity(), 100.0);
    assert_eq!(c.sharpening(), 100.0);
}

#[test]
fn edge_blur_is_always_odd_and_in_range() {
    for raw in -5..40 {
        let c = EffectConfig::builder().edge_blur(raw).build();
        assert_eq!(c.edge_blur() % 2, 1, "raw={raw}");
        assert!((1..=21).contains(&c.edge_blur()), "raw={raw}");
    }
    assert_eq!(EffectConfig::builder().edge_blur(8).build().edge_blur(), 9);
}

#[test]
fn numeric_strings_and_bool_spellings_are_read() {
    let c = EffectConfig::from_options(&opts(json!({
        "brightness": " 120 ",
        "enable_feathering": "off",
        "enable_choke_spread": 0,
    })))
    .unwrap();
    assert_eq!(c.brightness(), 120.0);
    let c = EffectConfig::builder().edge_blur(21).build();
    assert!(c.pass_plan().feathering);
}

#[test]
fn unreadable_values_are_configuration_errors() {
    let err = EffectConfig::from_options(&opts(json!({ "brightness": "bright" }))).unwrap_err();
    assert!(matches!(err, BillboardError::InvalidConfiguration(_)));
    let err = EffectConfig::from_options(&opts(json!({ "enable_gamma_blur": [1] }))).unwrap_err();
    assert!(matches!(err, BillboardError::InvalidConfiguration(_)));
}

#[test]
fn pass_thresholds_follow_edge_blur() {
    let plan = |e: i32| EffectConfig::builder().edge_blur(e).build().pass_plan();

    let p = plan(3);
    assert!(!p.gamma_blur && !p.choke_spread);

    let p = plan(5);
    assert!(p.gamma_blur && !p.choke_spread && !p.feathering);

    let p = plan(7);
    assert!(p.choke_spread && !p.feathering && !p.luminance_adaptation);

    let p = plan(9);
    assert!(p.feathering && p.luminance_adaptation && !p.contact_shadow);

    let p = plan(11);
    assert!(p.contact_shadow && !p.bleed_prevention);

    let p = plan(13);
    assert!(p.bleed_prevention);
}

#[test]
fn toggles_disable_passes_regardless_of_threshold() {
    let c = EffectConfig::builder()
        .edge_blur(21)
        .all_passes(false)
        .build();
    assert_eq!(c.pass_plan(), PassPlan::default());

    let c = EffectConfig::builder()
        .edge_blur(21)
        .enable_contact_shadow(false)
        .build();
    let p = c.pass_plan();
    assert!(!p.contact_shadow && p.gamma_blur && p.bleed_prevention);
}

#[test]
fn full_overlay_gives_three_quarter_opacity() {
    let c = EffectConfig::builder().overlay_opacity(100).build();
    assert_eq!(c.creative_opacity(), 0.75);
    let c = EffectConfig::builder().overlay_opacity(50).build();
    assert!((c.creative_opacity() - 0.875).abs() < 1e-6);
}

#[test]
fn depth_intensity_is_symmetric_around_neutral() {
    let lo = EffectConfig::builder().depth_multiplier(5).build();
    let hi = EffectConfig::builder().depth_multiplier(25).build();
    assert!((lo.depth_intensity() - 10.0 / 15.0).abs() < 1e-6);
    assert!((hi.depth_intensity() - 10.0 / 15.0).abs() < 1e-6);
    let max = EffectConfig::builder().depth_multiplier(30).build();
    assert_eq!(max.depth_intensity(), 1.0);
}

#[test]
fn serde_roundtrip_goes_through_validation() {
    let c: EffectConfig = serde_json::from_value(json!({ "edgeBlur": 40, "sharpening": 50 })).unwrap();
    assert_eq!(c.edge_blur(), 21);
    let back: EffectConfig = serde_json::from_value(serde_json::to_value(&c).unwrap()).unwrap();
    assert_eq!(back, c);
}

#[test]
fn key_normalization_handles_common_spellings() {
    assert_eq!(normalize_key("edgeBlur"), "edge_blur");
    assert_eq!(normalize_key("EdgeBlur"), "edge_blur");
    assert_eq!(normalize_key("edge-blur"), "edge_blur");
    assert_eq!(normalize_key("enableBleedPrevention"), "enable_bleed_prevention");
}

fn assert_in_range(c: &EffectConfig) {
    assert!((1..=21).contains(&c.edge_blur()) && c.edge_blur() % 2 == 1);
    assert!((1..=20).contains(&c.edge_smoother()));
    assert!(c.image_blur() <= 20);
    for (v, lo, hi) in [
        (c.brightness(), 0.0, 200.0),
        (c.contrast(), 0.0, 200.0),
        (c.saturation(), 0.0, 200.0),
        (c.lighting_adjustment(), -100.0, 100.0),
        (c.color_temperature(), -100.0, 100.0),
        (c.depth_multiplier(), 5.0, 30.0),
        (c.vignette(), 0.0, 100.0),
        (c.shadow_intensity(), 0.0, 100.0),
        (c.overlay_opacity(), 0.0, 100.0),
        (c.sharpening(), 0.0, 100.0),
    ] {
        assert!(v.is_finite() && v >= lo && v <= hi, "{v} outside [{lo}, {hi}]");
    }
}

#[test]
fn non_finite_builder_values_fall_back_to_defaults() {
    for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let c = EffectConfig::builder()
            .edge_blur(bad)
            .edge_smoother(bad)
            .image_blur(bad)
            .brightness(bad)
            .contrast(bad)
            .saturation(bad)
            .lighting_adjustment(bad)
            .color_temperature(bad)
            .depth_multiplier(bad)
            .vignette(bad)
            .shadow_intensity(bad)
            .overlay_opacity(bad)
            .sharpening(bad)
            .build();
        assert_in_range(&c);
        assert_eq!(c, EffectConfig::default(), "input {bad}");
    }
}

#[test]
fn one_non_finite_field_keeps_the_others() {
    let c = EffectConfig::builder()
        .edge_smoother(f64::NAN)
        .brightness(150)
        .edge_blur(9)
        .build();
    assert_in_range(&c);
    assert_eq!(c.edge_smoother(), 4);
    assert_eq!(c.brightness(), 150.0);
    assert_eq!(c.edge_blur(), 9);
}
