use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::util::linalg::{Vec2, Vec2i};
use crate::util::viewport::{letterbox, Viewport};

pub const EPSILON: f64 = 1e-9;
pub const DEFAULT_APP_WIDTH: i32 = 640;
pub const DEFAULT_APP_HEIGHT: i32 = 480;
pub const DEFAULT_WORLD_WIDTH: f64 = 2.0;
pub const DEFAULT_WORLD_HEIGHT: f64 = 2.0;
pub const DEFAULT_BORDER_SCALE: f64 = 0.8;
pub const MAX_SCATTER_POINTS: usize = 10_000;
pub const DEFAULT_FRAME_COUNT: usize = 60;

/// Settings for a host application driving the kernel.
///
/// Every field has a default, so a JSON document only needs to name what it overrides:
/// ```
/// use ggkernel::core::config::AppConfig;
/// let config = AppConfig::from_json(r#"{ "world_width": 16.0, "world_height": 9.0 }"#).unwrap();
/// assert_eq!(config.app_width, 640);
/// assert_eq!(config.world_width, 16.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub app_width: i32,
    pub app_height: i32,
    pub world_width: f64,
    pub world_height: f64,
    pub border_scale: f64,
    pub maintain_aspect_ratio: bool,
    pub scatter_points: usize,
    pub frames: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Point In Polygon Example".to_string(),
            app_width: DEFAULT_APP_WIDTH,
            app_height: DEFAULT_APP_HEIGHT,
            world_width: DEFAULT_WORLD_WIDTH,
            world_height: DEFAULT_WORLD_HEIGHT,
            border_scale: DEFAULT_BORDER_SCALE,
            maintain_aspect_ratio: false,
            scatter_points: MAX_SCATTER_POINTS,
            frames: DEFAULT_FRAME_COUNT,
        }
    }
}

impl AppConfig {
    pub fn from_json(json_text: &str) -> Result<Self> {
        let config: AppConfig =
            serde_json::from_str(json_text).context("could not parse app config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &std::path::Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("could not read config file {}", path.display()))?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.app_width < 2 || self.app_height < 2 {
            bail!(
                "app size must be at least 2x2 pixels, got {}x{}",
                self.app_width,
                self.app_height
            );
        }
        if !(self.world_width > 0.0 && self.world_height > 0.0)
            || !self.world_width.is_finite()
            || !self.world_height.is_finite()
        {
            bail!(
                "world size must be positive, got {}x{}",
                self.world_width,
                self.world_height
            );
        }
        if !(self.border_scale > 0.0 && self.border_scale <= 1.0) {
            bail!("border scale must be in (0, 1], got {}", self.border_scale);
        }
        if self.scatter_points > MAX_SCATTER_POINTS {
            bail!(
                "at most {MAX_SCATTER_POINTS} scatter points are supported, got {}",
                self.scatter_points
            );
        }
        Ok(())
    }

    pub fn app_size(&self) -> Vec2i {
        Vec2i {
            x: self.app_width,
            y: self.app_height,
        }
    }
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.world_width, self.world_height)
    }

    /// The viewport for this configuration. With `maintain_aspect_ratio` the drawing surface is
    /// the letterboxed sub-rectangle of the window rather than the whole window.
    pub fn viewport(&self) -> Result<Viewport> {
        let screen = if self.maintain_aspect_ratio {
            let rect = letterbox(
                f64::from(self.app_width),
                f64::from(self.app_height),
                self.world_width,
                self.world_height,
                self.border_scale,
            )?;
            rect.as_pixels().1
        } else {
            self.app_size()
        };
        Ok(Viewport::new(self.world_size(), screen)?)
    }
}
