pub mod base;
pub mod refine;

use image::Rgb32FImage;

use crate::config::effect::EffectConfig;
use crate::foundation::math::clamp01;
use crate::geometry::corners::Quad;
use crate::raster::plane::Plane;

/// Output of the mask stage: the blend mask and, when that pass is active,
/// the contact-shadow darkening map.
#[derive(Clone, Debug)]
pub struct MaskLayers {
    /// Blend mask in [0, 1].
    pub mask: Plane,
    /// Darkening map, present when the contact-shadow pass ran.
    pub contact_shadow: Option<Plane>,
}

/// Run the base rasterization and every active refinement pass in fixed
/// order: gamma blur, feathering, choke/spread, luminance adaptation, contact
/// shadow. Disabled passes hand their input through untouched.
pub fn build_mask(
    quad: &Quad,
    config: &EffectConfig,
    destination: &Rgb32FImage,
    warped: &Rgb32FImage,
) -> MaskLayers {
    let plan = config.pass_plan();
    let edge = config.edge_blur();
    let (w, h) = destination.dimensions();

    let mut mask = {
        let _span = tracing::debug_span!("base_mask", supersample = config.edge_smoother()).entered();
        base::rasterize_quad(quad, w, h, config.edge_smoother())
    };

    if plan.gamma_blur {
        let _span = tracing::debug_span!("gamma_blur", edge).entered();
        mask = refine::gamma_blur(&mask, edge);
    }
    if plan.feathering {
        let _span = tracing::debug_span!("feather", edge).entered();
        mask = refine::feather(&mask, edge);
    }
    if plan.choke_spread {
        let _span = tracing::debug_span!("choke_spread", edge).entered();
        mask = refine::choke_spread(&mask, edge);
    }
    if plan.luminance_adaptation {
        let _span = tracing::debug_span!("luminance_adaptation").entered();
        mask = refine::adapt_to_luminance(&mask, destination, warped);
    }
    let contact_shadow = plan.contact_shadow.then(|| {
        let _span = tracing::debug_span!("contact_shadow", edge).entered();
        refine::contact_shadow(&mask, edge)
    });

    tracing::debug!(?plan, "mask passes complete");
    MaskLayers {
        mask: mask.map(clamp01),
        contact_shadow,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mask/pipeline.rs"]
mod tests;
