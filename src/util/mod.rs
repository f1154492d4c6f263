use crate::core::prelude::*;

use tracing_subscriber::fmt::time::OffsetTime;

pub mod assert;
pub mod linalg;
pub mod polygon;
pub mod viewport;

pub mod gg_float {
    use num_traits::Zero;
    use std::num::FpCategory;

    pub fn is_finite(x: f64) -> bool {
        matches!(x.classify(), FpCategory::Zero | FpCategory::Normal)
    }

    /// True for finite values strictly greater than zero.
    pub fn is_positive(x: f64) -> bool {
        is_finite(x) && x > 0.0
    }

    pub fn force_positive_zero(x: f64) -> f64 {
        if x.is_zero() {
            0.0
        } else {
            x
        }
    }
}

/// Installs the global `tracing` subscriber: UTC wall-clock timestamps, source locations, no
/// targets. Fails if a subscriber is already installed.
pub fn setup_log() -> Result<()> {
    let timer = OffsetTime::new(
        time::UtcOffset::UTC,
        time::macros::format_description!("[hour]:[minute]:[second].[subsecond digits:6]"),
    );
    tracing_subscriber::fmt()
        .event_format(
            tracing_subscriber::fmt::format()
                .with_target(false)
                .with_source_location(true)
                .with_timer(timer),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("could not install log subscriber: {e}"))?;
    Ok(())
}
