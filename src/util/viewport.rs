//! Mapping between the world coordinate system and screen pixels.
//!
//! The world is a `world_width x world_height` rectangle centred on the origin with y growing
//! upwards. The screen is `screen_width x screen_height` pixels with the origin at the top-left
//! and y growing downwards; the world's extent maps onto pixel centres `0..=screen_width - 1`
//! and `0..=screen_height - 1`.

use crate::core::prelude::*;

use crate::util::gg_float;
use crate::util::linalg::{Mat3x3, Vec2, Vec2i};
use serde::{Deserialize, Serialize};

fn check_world(world_width: f64, world_height: f64) -> Result<(), GeomError> {
    if gg_float::is_positive(world_width) && gg_float::is_positive(world_height) {
        Ok(())
    } else {
        Err(GeomError::InvalidDimensions {
            width: world_width,
            height: world_height,
        })
    }
}

fn check_screen(screen_width: f64, screen_height: f64) -> Result<(), GeomError> {
    if gg_float::is_finite(screen_width)
        && gg_float::is_finite(screen_height)
        && screen_width >= 2.0
        && screen_height >= 2.0
    {
        Ok(())
    } else {
        Err(GeomError::InvalidDimensions {
            width: screen_width,
            height: screen_height,
        })
    }
}

/// `(sx, sy, tx, ty)` for the world-to-screen map. `sy` is returned positive; callers negate it.
fn scale_and_offset(
    world_width: f64,
    world_height: f64,
    screen_width: f64,
    screen_height: f64,
) -> Result<(f64, f64, f64, f64), GeomError> {
    check_world(world_width, world_height)?;
    check_screen(screen_width, screen_height)?;
    let sx = (screen_width - 1.0) / world_width;
    let sy = (screen_height - 1.0) / world_height;
    let tx = (screen_width - 1.0) / 2.0;
    let ty = (screen_height - 1.0) / 2.0;
    Ok((sx, sy, tx, ty))
}

/// World-to-screen matrix: `scale(sx, -sy)` first (the negation flips y), then
/// `translation(tx, ty)` to move the origin to the centre of the screen.
///
/// # Errors
/// [`GeomError::InvalidDimensions`] unless the world extents are positive and the screen is at
/// least 2x2 pixels.
///
/// ```
/// use ggkernel::util::linalg::Vec2;
/// use ggkernel::util::viewport::forward;
///
/// let m = forward(2.0, 2.0, 641.0, 481.0).unwrap();
/// assert_eq!(Vec2::new(0.0, 0.0) * m, Vec2::new(320.0, 240.0));
/// assert_eq!(Vec2::new(-1.0, 1.0) * m, Vec2::new(0.0, 0.0));
/// assert_eq!(Vec2::new(1.0, -1.0) * m, Vec2::new(640.0, 480.0));
/// ```
pub fn forward(
    world_width: f64,
    world_height: f64,
    screen_width: f64,
    screen_height: f64,
) -> Result<Mat3x3, GeomError> {
    let (sx, sy, tx, ty) = scale_and_offset(world_width, world_height, screen_width, screen_height)?;
    Ok(Mat3x3::scale(sx, -sy) * Mat3x3::translation(tx, ty))
}

/// Screen-to-world matrix, the exact inverse of [`forward`]: `translation(-tx, -ty)` first,
/// then `scale(1 / sx, -1 / sy)`.
///
/// # Errors
/// Same as [`forward`].
pub fn inverse(
    world_width: f64,
    world_height: f64,
    screen_width: f64,
    screen_height: f64,
) -> Result<Mat3x3, GeomError> {
    let (sx, sy, tx, ty) = scale_and_offset(world_width, world_height, screen_width, screen_height)?;
    Ok(Mat3x3::translation(-tx, -ty) * Mat3x3::scale(1.0 / sx, -1.0 / sy))
}

/// A rectangle in container pixels, in floating point so that aspect ratios are exact.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenRect {
    pub fn left(&self) -> f64 {
        self.x
    }
    pub fn right(&self) -> f64 {
        self.x + self.width
    }
    pub fn top(&self) -> f64 {
        self.y
    }
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
    pub fn centre(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// Whether the pixel lies inside (left/top edges inclusive, right/bottom exclusive).
    pub fn contains_point(&self, pos: Vec2i) -> bool {
        let pos = pos.as_vec2();
        (self.left()..self.right()).contains(&pos.x) && (self.top()..self.bottom()).contains(&pos.y)
    }

    /// Converts a container pixel into a pixel relative to this rectangle's top-left corner.
    pub fn to_local(&self, pos: Vec2i) -> Vec2i {
        pos - self.as_pixels().0
    }

    /// Truncates to whole pixels: `(top_left, extent)`. A negative width or height gives a zero
    /// extent.
    #[allow(clippy::cast_possible_truncation)]
    pub fn as_pixels(&self) -> (Vec2i, Vec2i) {
        (
            Vec2i {
                x: self.x as i32,
                y: self.y as i32,
            },
            Vec2i {
                x: self.width.max(0.0) as i32,
                y: self.height.max(0.0) as i32,
            },
        )
    }
}

/// Lays out a drawing surface inside a container of `container_width x container_height` so
/// that it keeps the `world_width : world_height` aspect ratio.
///
/// Both container dimensions are first shrunk by `border_scale`; the surface then takes the full
/// shrunk width unless that would make it too tall, in which case it takes the full shrunk
/// height instead. The result is centred in both axes.
///
/// # Errors
/// [`GeomError::InvalidBorderScale`] unless `0 < border_scale <= 1`, and
/// [`GeomError::InvalidDimensions`] for non-positive container or world extents.
///
/// ```
/// use ggkernel::util::viewport::letterbox;
///
/// let rect = letterbox(1000.0, 1000.0, 16.0, 9.0, 0.8).unwrap();
/// assert_eq!((rect.x, rect.y, rect.width, rect.height), (100.0, 275.0, 800.0, 450.0));
/// ```
pub fn letterbox(
    container_width: f64,
    container_height: f64,
    world_width: f64,
    world_height: f64,
    border_scale: f64,
) -> Result<ScreenRect, GeomError> {
    if !(gg_float::is_positive(border_scale) && border_scale <= 1.0) {
        return Err(GeomError::InvalidBorderScale(border_scale));
    }
    check_world(world_width, world_height)?;
    if !(gg_float::is_positive(container_width) && gg_float::is_positive(container_height)) {
        return Err(GeomError::InvalidDimensions {
            width: container_width,
            height: container_height,
        });
    }

    let max_width = container_width * border_scale;
    let max_height = container_height * border_scale;
    let mut x = (container_width - max_width) / 2.0;
    let mut y = (container_height - max_height) / 2.0;

    let mut width = max_width;
    let mut height = max_width * world_height / world_width;
    if height > max_height {
        width = max_height * world_width / world_height;
        height = max_height;
    }

    x += (max_width - width) / 2.0;
    y += (max_height - height) / 2.0;
    Ok(ScreenRect {
        x,
        y,
        width,
        height,
    })
}

/// A world/screen pairing with both directions of the mapping precomputed.
///
/// Rebuild it whenever the screen size changes; it holds no other state.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    world: Vec2,
    screen: Vec2i,
    forward: Mat3x3,
    inverse: Mat3x3,
}

impl Viewport {
    pub fn new(world: Vec2, screen: Vec2i) -> Result<Self, GeomError> {
        let (screen_width, screen_height) = (f64::from(screen.x), f64::from(screen.y));
        Ok(Self {
            world,
            screen,
            forward: forward(world.x, world.y, screen_width, screen_height)?,
            inverse: inverse(world.x, world.y, screen_width, screen_height)?,
        })
    }

    /// Same world, new screen size.
    pub fn resized(&self, screen: Vec2i) -> Result<Self, GeomError> {
        Self::new(self.world, screen)
    }

    pub fn world(&self) -> Vec2 {
        self.world
    }
    pub fn screen(&self) -> Vec2i {
        self.screen
    }

    /// World-to-screen matrix; see [`forward`].
    pub fn forward(&self) -> Mat3x3 {
        self.forward
    }
    /// Screen-to-world matrix; see [`inverse`].
    pub fn inverse(&self) -> Mat3x3 {
        self.inverse
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world * self.forward
    }
    pub fn screen_to_world(&self, screen: Vec2i) -> Vec2 {
        screen.as_vec2() * self.inverse
    }

    /// Maps a relative pointer movement in pixels to a world-space displacement. The delta is a
    /// direction, so only the scale (and the y flip) applies.
    pub fn relative_to_world(&self, delta: Vec2i) -> Vec2 {
        Vec2::direction(f64::from(delta.x), f64::from(delta.y)) * self.inverse
    }
}
