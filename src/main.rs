use std::f64::consts::PI;
use std::path::PathBuf;

use ggkernel::core::prelude::*;
use ggkernel::util::setup_log;

/// Pixel positions of a five-pointed star inscribed in 80% of the world, in drawing order.
fn star_clicks(viewport: &Viewport) -> Vec<Vec2i> {
    let half_extent = viewport.world() * 0.5;
    (0..5)
        .map(|i| {
            Vec2::from_polar(PI / 2.0 + f64::from(i) * 4.0 * PI / 5.0, 0.8)
                .scaled(half_extent.x, half_extent.y)
        })
        .map(|p| viewport.world_to_screen(p).as_vec2i_lossy())
        .collect()
}

fn main() -> Result<()> {
    setup_log()?;

    let config = match std::env::args_os().nth(1) {
        Some(path) => AppConfig::load(&PathBuf::from(path))?,
        None => AppConfig::default(),
    };
    let viewport = config.viewport()?;
    info!(
        "{}: {} world on a {} surface (window {})",
        config.title,
        config.world_size(),
        viewport.screen(),
        config.app_size()
    );

    let clicks = star_clicks(&viewport);
    let screen = viewport.screen();
    let frames = config.frames;

    let mut driver = FrameDriver::new(PointInPolygonScene::new(viewport, config.scatter_points));
    driver.run(
        frames,
        |frame| {
            if let Some(&pointer) = clicks.get(frame) {
                return FrameInput {
                    pointer,
                    add_point: true,
                    ..FrameInput::default()
                };
            }
            // Sweep the pointer left to right across the middle of the surface.
            let sweep = frame - clicks.len();
            let span = (frames - clicks.len()).max(1);
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
            let x = (sweep as f64 / span as f64 * f64::from(screen.x - 1)) as i32;
            FrameInput {
                pointer: Vec2i { x, y: screen.y / 2 },
                toggle_rule: sweep == span / 2,
                ..FrameInput::default()
            }
        },
        |frame, render| {
            debug!(
                "frame {}: {} inside, {} outside, hovering: {}",
                frame,
                render.inside.len(),
                render.outside.len(),
                render.hovering
            );
            if frame % 10 == 0 || frame + 1 == frames {
                info!("frame {}: {} [{}]", frame, render.text[0], render.text[1]);
            }
            Ok(())
        },
    )?;

    let scene = driver.scene();
    info!(
        "done after {} frames: {} vertices, {} rule, {} inside / {} outside",
        driver.frames_run(),
        scene.polygon().len(),
        scene.rule(),
        scene.inside().len(),
        scene.outside().len()
    );
    Ok(())
}
