pub mod corners;
pub mod homography;
