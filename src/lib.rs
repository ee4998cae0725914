//! Billboard is a photo compositor that mounts a flat creative image into a
//! photographed billboard frame.
//!
//! # Pipeline overview
//!
//! 1. **Order** the four frame corners into a clockwise [`Quad`].
//! 2. **Warp** an upscaled, border-extended copy of the creative into the
//!    destination through a 4-point [`Homography`].
//! 3. **Mask**: supersampled base mask plus optional edge passes (gamma blur,
//!    feathering, choke/spread, luminance adaptation, contact shadow).
//! 4. **Grade** the warped creative: depth, color, vignette, edge shadow.
//! 5. **Blend** over the destination, optionally prefilling the frame with the
//!    creative's edge color, then sharpen inside the frame.
//!
//! Every stage is pure: inputs are borrowed, outputs are new buffers, and no
//! state survives a call. File I/O is left to callers (see the `billboard`
//! binary).
//!
//! ```no_run
//! use billboard::{EffectConfig, Point, TimeOfDay, composite};
//!
//! # fn run(photo: &image::RgbImage, ad: &image::RgbImage) -> billboard::BillboardResult<()> {
//! let corners = [
//!     Point::new(120.0, 80.0),
//!     Point::new(620.0, 95.0),
//!     Point::new(610.0, 360.0),
//!     Point::new(118.0, 340.0),
//! ];
//! let config = EffectConfig::builder().edge_blur(7).vignette(20).build();
//! let out = composite(photo, ad, &corners, &config, TimeOfDay::Night)?;
//! # let _ = out;
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod composite;
mod config;
mod effects;
mod foundation;
mod geometry;
mod mask;
mod raster;

pub use composite::batch::{BatchOptions, CompositeJob, composite_batch};
pub use composite::pipeline::composite;
pub use composite::prepare::{BorderMode, PreparedCreative, extend_border, prepare_creative};
pub use composite::warp::warp_perspective;
pub use config::effect::{EffectConfig, EffectConfigBuilder, NEUTRAL_DEPTH, PassPlan};
pub use effects::color::{
    add_lighting, brightness_contrast, color_grade, saturate, shift_temperature,
};
pub use effects::depth::apply_depth;
pub use effects::finish::{blend, edge_color, prefill_frame, sharpen};
pub use effects::lighting::{apply_contact_shadow, edge_shadow, vignette};
pub use foundation::core::{Point, Rect, TimeOfDay, Vec2};
pub use foundation::error::{BillboardError, BillboardResult};
pub use geometry::corners::{Quad, order_corners};
pub use geometry::homography::Homography;
pub use mask::base::rasterize_quad;
pub use mask::refine::{adapt_to_luminance, choke_spread, contact_shadow, feather, gamma_blur};
pub use mask::{MaskLayers, build_mask};
pub use raster::blur::{blur_plane, blur_rgb};
pub use raster::color::{hsv_to_rgb, rgb_to_hsv};
pub use raster::morph::erode3x3;
pub use raster::plane::Plane;
