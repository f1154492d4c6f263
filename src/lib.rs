//! A small 2D affine-geometry kernel: homogeneous vectors and matrices, a world-to-screen
//! viewport mapping with letterboxing, and point-in-polygon classification under the even-odd
//! and nonzero-winding rules.

pub mod core;
pub mod util;
