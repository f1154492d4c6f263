//! A fixed per-frame loop around the geometry kernel: input is polled once, the scene updates
//! against that snapshot, and a draw list goes out to whatever renders it. Windowing, timing
//! and drawing are the caller's business and come in as closures.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::core::prelude::*;

use crate::util::polygon::{partition, scatter};

/// One frame's worth of polled input.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct FrameInput {
    /// Pointer position in surface pixels.
    pub pointer: Vec2i,
    /// Append the pointer's world position to the polygon.
    pub add_point: bool,
    /// Remove every polygon vertex.
    pub clear: bool,
    /// Switch between even-odd and nonzero winding.
    pub toggle_rule: bool,
    /// New surface size, if the surface was resized since the last frame.
    pub resize: Option<Vec2i>,
}

/// What the external renderer should draw for a frame. Everything is in surface pixels.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderFrame {
    /// Polygon vertices, empty unless there are at least two to join up.
    pub outline: Vec<Vec2>,
    /// Whether the pointer is inside the polygon, i.e. which colour the outline gets.
    pub hovering: bool,
    pub inside: Vec<Vec2i>,
    pub outside: Vec<Vec2i>,
    pub text: Vec<String>,
}

/// Interactive point-in-polygon test: the user builds a polygon out of pointer clicks, and
/// every frame the pointer and a fresh random scatter are classified against it.
pub struct PointInPolygonScene {
    viewport: Viewport,
    polygon: Polygon,
    rule: WindingRule,
    pointer: Vec2,
    hovering: bool,
    scatter_count: usize,
    inside: Vec<Vec2>,
    outside: Vec<Vec2>,
    rng: StdRng,
}

impl PointInPolygonScene {
    pub fn new(viewport: Viewport, scatter_count: usize) -> Self {
        check_le!(scatter_count, MAX_SCATTER_POINTS);
        Self {
            viewport,
            polygon: Polygon::new(),
            rule: WindingRule::default(),
            pointer: Vec2::zero(),
            hovering: false,
            scatter_count,
            inside: Vec::new(),
            outside: Vec::new(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Replaces the scatter RNG, e.g. with a seeded one for reproducible frames.
    #[must_use]
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }
    pub fn rule(&self) -> WindingRule {
        self.rule
    }
    /// The pointer in world coordinates, as of the last `process_input()`.
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }
    pub fn is_hovering(&self) -> bool {
        self.hovering
    }
    pub fn inside(&self) -> &[Vec2] {
        &self.inside
    }
    pub fn outside(&self) -> &[Vec2] {
        &self.outside
    }

    pub fn process_input(&mut self, input: &FrameInput) {
        if let Some(screen) = input.resize.filter(|&s| s != self.viewport.screen()) {
            match self.viewport.resized(screen) {
                Ok(viewport) => {
                    debug!("viewport rebuilt: {} -> {}", self.viewport.screen(), screen);
                    self.viewport = viewport;
                }
                Err(e) => warn!("ignoring resize to {}: {}", screen, e),
            }
        }

        self.pointer = self.viewport.screen_to_world(input.pointer);

        if input.toggle_rule {
            self.rule = self.rule.toggled();
            debug!("winding rule: {}", self.rule);
        }
        if input.add_point {
            self.polygon.push(self.pointer);
        }
        if input.clear {
            debug!("clearing polygon ({} vertices)", self.polygon.len());
            self.polygon.clear();
        }
    }

    pub fn update(&mut self) {
        self.hovering = self.polygon.contains_point(self.pointer, self.rule);

        let half_extent = self.viewport.world() * 0.5;
        let points = scatter(&mut self.rng, self.scatter_count, -half_extent, half_extent);
        (self.inside, self.outside) = partition(&points, self.polygon.vertices(), self.rule);
    }

    pub fn render(&self) -> RenderFrame {
        let forward = self.viewport.forward();
        let to_pixel = |v: &Vec2| (*v * forward).as_vec2i_lossy();
        let outline = if self.polygon.len() > 1 {
            self.polygon.transformed(&forward).vertices().to_vec()
        } else {
            Vec::new()
        };
        RenderFrame {
            outline,
            hovering: self.hovering,
            inside: self.inside.iter().map(to_pixel).collect(),
            outside: self.outside.iter().map(to_pixel).collect(),
            text: vec![
                format!("Winding: {}", self.rule),
                format!("Pointer: ({:.2}, {:.2})", self.pointer.x, self.pointer.y),
                "Click to add points".to_string(),
                "Clear to remove all points".to_string(),
                "Toggle to switch winding rule".to_string(),
            ],
        }
    }
}

/// Runs a [`PointInPolygonScene`] for a fixed number of frames. Each frame calls
/// `process_input() -> update() -> render()` in that order.
pub struct FrameDriver {
    scene: PointInPolygonScene,
    frames_run: usize,
}

impl FrameDriver {
    pub fn new(scene: PointInPolygonScene) -> Self {
        Self {
            scene,
            frames_run: 0,
        }
    }

    pub fn scene(&self) -> &PointInPolygonScene {
        &self.scene
    }
    pub fn frames_run(&self) -> usize {
        self.frames_run
    }

    /// `input_fn(frame)` supplies each frame's input; `render_fn(frame, &draw_list)` consumes
    /// its output. An error from `render_fn` stops the loop.
    pub fn run<I, R>(&mut self, frames: usize, mut input_fn: I, mut render_fn: R) -> Result<()>
    where
        I: FnMut(usize) -> FrameInput,
        R: FnMut(usize, &RenderFrame) -> Result<()>,
    {
        info!("running {} frames", frames);
        for _ in 0..frames {
            let frame = self.frames_run;
            let input = input_fn(frame);
            self.scene.process_input(&input);
            self.scene.update();
            render_fn(frame, &self.scene.render())
                .with_context(|| format!("render failed on frame {frame}"))?;
            self.frames_run += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> PointInPolygonScene {
        let viewport = Viewport::new(Vec2::new(2.0, 2.0), Vec2i { x: 101, y: 101 }).unwrap();
        PointInPolygonScene::new(viewport, 500).with_rng(StdRng::seed_from_u64(1))
    }

    fn click(x: i32, y: i32) -> FrameInput {
        FrameInput {
            pointer: Vec2i { x, y },
            add_point: true,
            ..FrameInput::default()
        }
    }

    /// Clicks the corners of the world square, (-0.5, -0.5) to (0.5, 0.5) in world space.
    fn build_square(scene: &mut PointInPolygonScene) {
        for (x, y) in [(25, 75), (75, 75), (75, 25), (25, 25)] {
            scene.process_input(&click(x, y));
        }
    }

    #[test]
    fn pointer_maps_to_world() {
        let mut scene = scene();
        scene.process_input(&FrameInput {
            pointer: Vec2i { x: 0, y: 0 },
            ..FrameInput::default()
        });
        assert_eq!(scene.pointer(), Vec2::new(-1.0, 1.0));
        assert!(scene.polygon().is_empty());
    }

    #[test]
    fn clicks_build_polygon_and_hover() {
        let mut scene = scene();
        build_square(&mut scene);
        assert_eq!(scene.polygon().len(), 4);
        assert_eq!(scene.polygon().vertices()[0], Vec2::new(-0.5, -0.5));

        scene.process_input(&FrameInput {
            pointer: Vec2i { x: 50, y: 50 },
            ..FrameInput::default()
        });
        scene.update();
        assert!(scene.is_hovering());

        scene.process_input(&FrameInput {
            pointer: Vec2i { x: 90, y: 50 },
            ..FrameInput::default()
        });
        scene.update();
        assert!(!scene.is_hovering());
    }

    #[test]
    fn clear_and_toggle() {
        let mut scene = scene();
        build_square(&mut scene);
        scene.process_input(&FrameInput {
            toggle_rule: true,
            clear: true,
            ..FrameInput::default()
        });
        assert_eq!(scene.rule(), WindingRule::NonZero);
        assert!(scene.polygon().is_empty());
        scene.update();
        assert!(scene.inside().is_empty());
        assert_eq!(scene.outside().len(), 500);
    }

    #[test]
    fn update_partitions_scatter() {
        let mut scene = scene();
        build_square(&mut scene);
        scene.update();
        assert_eq!(scene.inside().len() + scene.outside().len(), 500);
        assert!(scene
            .inside()
            .iter()
            .all(|p| p.x.abs() <= 0.5 && p.y.abs() <= 0.5));
        assert!(scene
            .outside()
            .iter()
            .chain(scene.inside())
            .all(|p| p.x.abs() <= 1.0 && p.y.abs() <= 1.0));
    }

    #[test]
    fn resize_rebuilds_viewport() {
        let mut scene = scene();
        scene.process_input(&FrameInput {
            pointer: Vec2i { x: 100, y: 100 },
            resize: Some(Vec2i { x: 201, y: 201 }),
            ..FrameInput::default()
        });
        assert_eq!(scene.viewport().screen(), Vec2i { x: 201, y: 201 });
        assert_eq!(scene.pointer(), Vec2::zero());

        // Invalid sizes are ignored.
        scene.process_input(&FrameInput {
            resize: Some(Vec2i { x: 0, y: 0 }),
            ..FrameInput::default()
        });
        assert_eq!(scene.viewport().screen(), Vec2i { x: 201, y: 201 });
    }

    #[test]
    fn render_maps_through_forward() {
        let mut scene = scene();
        scene.process_input(&click(25, 75));
        assert!(scene.render().outline.is_empty());

        build_square(&mut scene);
        scene.update();
        let frame = scene.render();
        assert_eq!(frame.outline.len(), 5);
        assert_eq!(frame.outline[0], Vec2::new(25.0, 75.0));
        assert_eq!(frame.outline[3], Vec2::new(75.0, 25.0));
        assert_eq!(frame.inside.len(), scene.inside().len());
        assert!(frame
            .inside
            .iter()
            .all(|p| (25..=75).contains(&p.x) && (25..=75).contains(&p.y)));
        assert!(frame
            .outside
            .iter()
            .all(|p| (0..=100).contains(&p.x) && (0..=100).contains(&p.y)));
        assert_eq!(frame.text[0], "Winding: even-odd");
    }

    #[test]
    fn driver_runs_each_frame_in_order() {
        let _ = crate::util::setup_log();
        let mut driver = FrameDriver::new(scene());
        let corners = [(25, 75), (75, 75), (75, 25), (25, 25)];
        let mut hovering = Vec::new();
        driver
            .run(
                6,
                |frame| match corners.get(frame) {
                    Some(&(x, y)) => click(x, y),
                    None => FrameInput {
                        pointer: Vec2i { x: 50, y: 50 },
                        ..FrameInput::default()
                    },
                },
                |_, render| {
                    hovering.push(render.hovering);
                    Ok(())
                },
            )
            .unwrap();
        assert_eq!(driver.frames_run(), 6);
        assert_eq!(driver.scene().polygon().len(), 4);
        assert_eq!(hovering, [false, false, false, false, true, true]);
    }

    #[test]
    fn driver_stops_on_render_error() {
        let mut driver = FrameDriver::new(scene());
        let result = driver.run(10, |_| FrameInput::default(), |frame, _| {
            if frame == 3 {
                bail!("surface lost");
            }
            Ok(())
        });
        let err = result.unwrap_err();
        assert!(format!("{err:#}").contains("frame 3"));
        assert!(format!("{err:#}").contains("surface lost"));
        assert_eq!(driver.frames_run(), 3);
    }
}
