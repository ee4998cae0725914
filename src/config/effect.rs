use serde_json::{Map, Value};

use crate::foundation::error::{BillboardError, BillboardResult};
use crate::foundation::math::odd_kernel;

/// Depth multiplier at which the depth effect is disabled.
pub const NEUTRAL_DEPTH: f32 = 15.0;

const GAMMA_BLUR_MIN_EDGE: u32 = 4; // edge_blur > 3
const FEATHER_MIN_EDGE: u32 = 8;
const CONTACT_SHADOW_MIN_EDGE: u32 = 10;
const CHOKE_SPREAD_MIN_EDGE: u32 = 6;
const LUMINANCE_MIN_EDGE: u32 = 8;
const BLEED_MIN_EDGE: u32 = 13; // edge_blur > 12

/// Validated effect parameters for one composite call.
///
/// Every numeric field is clamped into its documented range when the value
/// is built, so an `EffectConfig` in hand is always usable as-is. Construct
/// one with [`EffectConfig::builder`], [`EffectConfig::from_options`] or serde.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct EffectConfig {
    edge_blur: u32,
    edge_smoother: u32,
    image_blur: u32,
    brightness: f32,
    contrast: f32,
    saturation: f32,
    lighting_adjustment: f32,
    color_temperature: f32,
    depth_multiplier: f32,
    vignette: f32,
    shadow_intensity: f32,
    overlay_opacity: f32,
    sharpening: f32,
    enable_gamma_blur: bool,
    enable_feathering: bool,
    enable_contact_shadow: bool,
    enable_choke_spread: bool,
    enable_luminance_adaptation: bool,
    enable_bleed_prevention: bool,
}

/// Which optional edge passes run, derived once from an [`EffectConfig`].
///
/// A pass is active only when its toggle is set and `edge_blur` reaches the
/// pass threshold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassPlan {
    /// Linear-light blur of the mask edge (`edge_blur > 3`).
    pub gamma_blur: bool,
    /// Distance-based smoothstep falloff (`edge_blur >= 8`).
    pub feathering: bool,
    /// Darkening band along the inside edge (`edge_blur >= 10`).
    pub contact_shadow: bool,
    /// Erode and re-blur the edge (`edge_blur >= 6`).
    pub choke_spread: bool,
    /// Tighten the edge on strong brightness contrast (`edge_blur >= 8`).
    pub luminance_adaptation: bool,
    /// Prefill the frame with the creative's edge color (`edge_blur > 12`).
    pub bleed_prevention: bool,
}

impl Default for EffectConfig {
    fn default() -> Self {
        EffectConfigBuilder::default().build()
    }
}

impl EffectConfig {
    /// Start from the defaults.
    pub fn builder() -> EffectConfigBuilder {
        EffectConfigBuilder::default()
    }

    /// Build a configuration from a string-keyed option map.
    ///
    /// Keys may be `snake_case` or `camelCase`. Unknown keys are ignored,
    /// out-of-range values are clamped. Values that cannot be read as the
    /// field's type are rejected.
    pub fn from_options(options: &Map<String, Value>) -> BillboardResult<Self> {
        let mut b = EffectConfigBuilder::default();
        for (key, value) in options {
            b.apply_option(key, value)?;
        }
        Ok(b.build())
    }

    /// Mask edge softness, odd, 1..=21.
    pub fn edge_blur(&self) -> u32 {
        self.edge_blur
    }

    /// Base mask supersampling factor, 1..=20.
    pub fn edge_smoother(&self) -> u32 {
        self.edge_smoother
    }

    /// Pre-warp creative blur strength, 0..=20.
    pub fn image_blur(&self) -> u32 {
        self.image_blur
    }

    /// Brightness percentage, 0..=200, 100 is neutral.
    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    /// Contrast percentage, 0..=200, 100 is neutral.
    pub fn contrast(&self) -> f32 {
        self.contrast
    }

    /// Saturation percentage, 0..=200, 100 is neutral.
    pub fn saturation(&self) -> f32 {
        self.saturation
    }

    /// Additive lighting, -100..=100.
    pub fn lighting_adjustment(&self) -> f32 {
        self.lighting_adjustment
    }

    /// Warm (positive) or cool (negative) shift, -100..=100.
    pub fn color_temperature(&self) -> f32 {
        self.color_temperature
    }

    /// Depth effect strength, 5..=30; [`NEUTRAL_DEPTH`] disables it.
    pub fn depth_multiplier(&self) -> f32 {
        self.depth_multiplier
    }

    /// Vignette strength, 0..=100.
    pub fn vignette(&self) -> f32 {
        self.vignette
    }

    /// Edge shadow strength, 0..=100.
    pub fn shadow_intensity(&self) -> f32 {
        self.shadow_intensity
    }

    /// Billboard show-through, 0..=100.
    pub fn overlay_opacity(&self) -> f32 {
        self.overlay_opacity
    }

    /// Post-blend sharpening, 0..=100.
    pub fn sharpening(&self) -> f32 {
        self.sharpening
    }

    /// Opacity of the creative in the final blend: 1.0 with no overlay,
    /// 0.75 at full overlay.
    pub fn creative_opacity(&self) -> f32 {
        1.0 - 0.25 * (self.overlay_opacity / 100.0)
    }

    /// Depth strength in [0, 1]; zero at the neutral multiplier.
    pub fn depth_intensity(&self) -> f32 {
        ((self.depth_multiplier - NEUTRAL_DEPTH).abs() / NEUTRAL_DEPTH).min(1.0)
    }

    /// Unsharp-mask gain in [1.0, 1.5].
    pub fn sharpen_multiplier(&self) -> f32 {
        1.0 + 0.5 * (self.sharpening / 100.0)
    }

    /// Evaluate the six edge-pass gates.
    pub fn pass_plan(&self) -> PassPlan {
        let e = self.edge_blur;
        PassPlan {
            gamma_blur: self.enable_gamma_blur && e >= GAMMA_BLUR_MIN_EDGE,
            feathering: self.enable_feathering && e >= FEATHER_MIN_EDGE,
            contact_shadow: self.enable_contact_shadow && e >= CONTACT_SHADOW_MIN_EDGE,
            choke_spread: self.enable_choke_spread && e >= CHOKE_SPREAD_MIN_EDGE,
            luminance_adaptation: self.enable_luminance_adaptation && e >= LUMINANCE_MIN_EDGE,
            bleed_prevention: self.enable_bleed_prevention && e >= BLEED_MIN_EDGE,
        }
    }
}

impl TryFrom<Map<String, Value>> for EffectConfig {
    type Error = BillboardError;

    fn try_from(options: Map<String, Value>) -> BillboardResult<Self> {
        Self::from_options(&options)
    }
}

/// Unclamped staging area for [`EffectConfig`].
#[derive(Clone, Debug)]
pub struct EffectConfigBuilder {
    edge_blur: f64,
    edge_smoother: f64,
    image_blur: f64,
    brightness: f64,
    contrast: f64,
    saturation: f64,
    lighting_adjustment: f64,
    color_temperature: f64,
    depth_multiplier: f64,
    vignette: f64,
    shadow_intensity: f64,
    overlay_opacity: f64,
    sharpening: f64,
    enable_gamma_blur: bool,
    enable_feathering: bool,
    enable_contact_shadow: bool,
    enable_choke_spread: bool,
    enable_luminance_adaptation: bool,
    enable_bleed_prevention: bool,
}

impl Default for EffectConfigBuilder {
    fn default() -> Self {
        Self {
            edge_blur: 3.0,
            edge_smoother: 4.0,
            image_blur: 0.0,
            brightness: 100.0,
            contrast: 100.0,
            saturation: 100.0,
            lighting_adjustment: 0.0,
            color_temperature: 0.0,
            depth_multiplier: f64::from(NEUTRAL_DEPTH),
            vignette: 0.0,
            shadow_intensity: 0.0,
            overlay_opacity: 0.0,
            sharpening: 0.0,
            enable_gamma_blur: true,
            enable_feathering: true,
            enable_contact_shadow: true,
            enable_choke_spread: true,
            enable_luminance_adaptation: true,
            enable_bleed_prevention: true,
        }
    }
}

macro_rules! builder_setters {
    ($($name:ident: $ty:ty),* $(,)?) => {
        $(
            #[doc = concat!("Stage `", stringify!($name), "`; clamped on [`EffectConfigBuilder::build`].")]
            pub fn $name(mut self, v: impl Into<$ty>) -> Self {
                self.$name = v.into();
                self
            }
        )*
    };
}

impl EffectConfigBuilder {
    builder_setters! {
        edge_blur: f64,
        edge_smoother: f64,
        image_blur: f64,
        brightness: f64,
        contrast: f64,
        saturation: f64,
        lighting_adjustment: f64,
        color_temperature: f64,
        depth_multiplier: f64,
        vignette: f64,
        shadow_intensity: f64,
        overlay_opacity: f64,
        sharpening: f64,
        enable_gamma_blur: bool,
        enable_feathering: bool,
        enable_contact_shadow: bool,
        enable_choke_spread: bool,
        enable_luminance_adaptation: bool,
        enable_bleed_prevention: bool,
    }

    /// Set every toggle at once.
    pub fn all_passes(self, on: bool) -> Self {
        self.enable_gamma_blur(on)
            .enable_feathering(on)
            .enable_contact_shadow(on)
            .enable_choke_spread(on)
            .enable_luminance_adaptation(on)
            .enable_bleed_prevention(on)
    }

    /// Apply one named option. Returns `Ok(false)` for unknown keys.
    pub fn apply_option(&mut self, key: &str, value: &Value) -> BillboardResult<bool> {
        let name = normalize_key(key);
        if let Some(slot) = self.number_slot(&name) {
            *slot = read_number(key, value)?;
            return Ok(true);
        }
        if let Some(flag) = self.flag_slot(&name) {
            *flag = read_bool(key, value)?;
            return Ok(true);
        }
        tracing::debug!(key, "ignoring unrecognized effect option");
        Ok(false)
    }

    fn number_slot(&mut self, name: &str) -> Option<&mut f64> {
        Some(match name {
            "edge_blur" => &mut self.edge_blur,
            "edge_smoother" => &mut self.edge_smoother,
            "image_blur" => &mut self.image_blur,
            "brightness" => &mut self.brightness,
            "contrast" => &mut self.contrast,
            "saturation" => &mut self.saturation,
            "lighting_adjustment" => &mut self.lighting_adjustment,
            "color_temperature" => &mut self.color_temperature,
            "depth_multiplier" => &mut self.depth_multiplier,
            "vignette" | "vignette_strength" => &mut self.vignette,
            "shadow_intensity" => &mut self.shadow_intensity,
            "overlay_opacity" => &mut self.overlay_opacity,
            "sharpening" => &mut self.sharpening,
            _ => return None,
        })
    }

    fn flag_slot(&mut self, name: &str) -> Option<&mut bool> {
        Some(match name {
            "enable_gamma_blur" => &mut self.enable_gamma_blur,
            "enable_feathering" => &mut self.enable_feathering,
            "enable_contact_shadow" => &mut self.enable_contact_shadow,
            "enable_choke_spread" => &mut self.enable_choke_spread,
            "enable_luminance_adaptation" => &mut self.enable_luminance_adaptation,
            "enable_bleed_prevention" => &mut self.enable_bleed_prevention,
            _ => return None,
        })
    }

    /// Clamp every field into range and freeze the result. Non-finite staged
    /// values fall back to the field's default.
    pub fn build(&self) -> EffectConfig {
        let d = Self::default();
        let num = |v: f64, fallback: f64| if v.is_finite() { v } else { fallback };
        EffectConfig {
            edge_blur: odd_kernel(clamp_u32(num(self.edge_blur, d.edge_blur), 1, 21)),
            edge_smoother: clamp_u32(num(self.edge_smoother, d.edge_smoother), 1, 20),
            image_blur: clamp_u32(num(self.image_blur, d.image_blur), 0, 20),
            brightness: clamp_f32(num(self.brightness, d.brightness), 0.0, 200.0),
            contrast: clamp_f32(num(self.contrast, d.contrast), 0.0, 200.0),
            saturation: clamp_f32(num(self.saturation, d.saturation), 0.0, 200.0),
            lighting_adjustment: clamp_f32(
                num(self.lighting_adjustment, d.lighting_adjustment),
                -100.0,
                100.0,
            ),
            color_temperature: clamp_f32(
                num(self.color_temperature, d.color_temperature),
                -100.0,
                100.0,
            ),
            depth_multiplier: clamp_f32(num(self.depth_multiplier, d.depth_multiplier), 5.0, 30.0),
            vignette: clamp_f32(num(self.vignette, d.vignette), 0.0, 100.0),
            shadow_intensity: clamp_f32(num(self.shadow_intensity, d.shadow_intensity), 0.0, 100.0),
            overlay_opacity: clamp_f32(num(self.overlay_opacity, d.overlay_opacity), 0.0, 100.0),
            sharpening: clamp_f32(num(self.sharpening, d.sharpening), 0.0, 100.0),
            enable_gamma_blur: self.enable_gamma_blur,
            enable_feathering: self.enable_feathering,
            enable_contact_shadow: self.enable_contact_shadow,
            enable_choke_spread: self.enable_choke_spread,
            enable_luminance_adaptation: self.enable_luminance_adaptation,
            enable_bleed_prevention: self.enable_bleed_prevention,
        }
    }
}

/// `edgeBlur`, `EdgeBlur`, `edge-blur` and `edge_blur` all map to `edge_blur`.
fn normalize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, ch) in key.trim().chars().enumerate() {
        if ch == '-' || ch == ' ' {
            out.push('_');
        } else if ch.is_ascii_uppercase() {
            if i > 0 && !out.ends_with('_') {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

fn read_number(key: &str, value: &Value) -> BillboardResult<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    match n {
        Some(n) if n.is_finite() => Ok(n),
        _ => Err(BillboardError::config(format!(
            "option '{key}' must be a finite number, got {value}"
        ))),
    }
}

fn read_bool(key: &str, value: &Value) -> BillboardResult<bool> {
    let b = match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|v| v != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        },
        _ => None,
    };
    b.ok_or_else(|| {
        BillboardError::config(format!("option '{key}' must be a boolean, got {value}"))
    })
}

fn clamp_u32(v: f64, lo: u32, hi: u32) -> u32 {
    v.round().clamp(f64::from(lo), f64::from(hi)) as u32
}

fn clamp_f32(v: f64, lo: f32, hi: f32) -> f32 {
    (v as f32).clamp(lo, hi)
}

#[cfg(test)]
#[path = "../../tests/unit/config/effect.rs"]
mod tests;
