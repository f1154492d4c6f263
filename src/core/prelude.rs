#[allow(unused_imports)]
pub use itertools::Itertools;
#[allow(unused_imports)]
pub use num_traits;

#[allow(unused_imports)]
pub use anyhow::{anyhow, bail, Context, Result};
#[allow(unused_imports)]
pub use tracing::{debug, error, info, warn};

#[allow(unused_imports)]
pub use crate::{
    core::{
        config::*,
        driver::{FrameDriver, FrameInput, PointInPolygonScene, RenderFrame},
        error::GeomError,
    },
    util::{
        assert::*,
        linalg::{Mat3x3, Vec2, Vec2i},
        polygon::{classify, Polygon, Polygonal, WindingRule},
        viewport::{letterbox, ScreenRect, Viewport},
    },
};
