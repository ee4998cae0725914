use image::RgbImage;
use kurbo::Point;

use crate::composite::prepare::prepare_creative;
use crate::composite::warp::warp_perspective;
use crate::config::effect::EffectConfig;
use crate::effects::{color, depth, finish, lighting};
use crate::foundation::core::TimeOfDay;
use crate::foundation::error::{BillboardError, BillboardResult};
use crate::geometry::corners::order_corners;
use crate::geometry::homography::Homography;
use crate::mask::{MaskLayers, build_mask};

/// Composite `creative` into the frame of `destination` outlined by `corners`.
///
/// Corners may come in any order. The result has the destination's size;
/// pixels far from the frame are left untouched.
#[tracing::instrument(skip(destination, creative, corners, config), fields(
    dest_w = destination.width(),
    dest_h = destination.height(),
    creative_w = creative.width(),
    creative_h = creative.height(),
))]
pub fn composite(
    destination: &RgbImage,
    creative: &RgbImage,
    corners: &[Point],
    config: &EffectConfig,
    time_of_day: TimeOfDay,
) -> BillboardResult<RgbImage> {
    validate_image("destination", destination)?;
    validate_image("creative", creative)?;
    let quad = order_corners(corners)?;
    let (w, h) = destination.dimensions();

    let warped = {
        let _span = tracing::debug_span!("warp").entered();
        let prepared = prepare_creative(creative, config);
        let to_frame = Homography::from_correspondences(prepared.inner_corners(), quad.points())?;
        warp_perspective(&prepared.image, &to_frame.inverse(), w, h)
    };

    let dest = finish::to_f32(destination);
    let MaskLayers {
        mask,
        contact_shadow,
    } = build_mask(&quad, config, &dest, &warped);
    let bounds = quad.bounding_box();

    let warped = {
        let _span = tracing::debug_span!("depth").entered();
        depth::apply_depth(&warped, &mask, bounds, config.depth_intensity(), time_of_day)
    };
    let warped = {
        let _span = tracing::debug_span!("color").entered();
        color::color_grade(&warped, &mask, config)
    };
    let warped = {
        let _span = tracing::debug_span!("lighting").entered();
        let vignetted = lighting::vignette(&warped, &mask, bounds, config.vignette() / 100.0);
        lighting::edge_shadow(&vignetted, &mask, config.shadow_intensity() / 100.0)
    };
    let warped = match contact_shadow {
        Some(shadow) => lighting::apply_contact_shadow(&warped, &shadow),
        None => warped,
    };

    let dest = if config.pass_plan().bleed_prevention {
        let _span = tracing::debug_span!("bleed_prevention").entered();
        match finish::edge_color(&warped, &mask) {
            Some(fill) => finish::prefill_frame(&dest, &quad, fill),
            None => {
                tracing::debug!("mask has no edge band, skipping bleed prevention");
                dest
            }
        }
    } else {
        dest
    };

    let blended = {
        let _span = tracing::debug_span!("blend").entered();
        finish::blend(&dest, &warped, &mask, config.creative_opacity())
    };
    drop(warped);
    drop(dest);

    let _span = tracing::debug_span!("sharpen").entered();
    Ok(finish::sharpen(&blended, &mask, config.sharpen_multiplier()))
}

fn validate_image(role: &str, img: &RgbImage) -> BillboardResult<()> {
    if img.width() == 0 || img.height() == 0 {
        return Err(BillboardError::dimensions(format!(
            "{role} image is empty ({}x{})",
            img.width(),
            img.height()
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/composite/pipeline.rs"]
mod tests;
