pub mod blur;
pub mod color;
pub mod morph;
pub mod plane;
