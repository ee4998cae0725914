pub mod batch;
pub mod pipeline;
pub mod prepare;
pub mod warp;
