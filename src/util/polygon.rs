//! Point-in-polygon classification under the even-odd and nonzero winding rules.
//!
//! A polygon is an ordered list of world-space vertices; the closing edge from the last vertex
//! back to the first is implicit. Fewer than three vertices means no interior.
//!
//! Classification casts a ray from the query point towards +x. An edge crosses the ray when
//! exactly one of its endpoints satisfies `y >= point.y` and its intercept at `point.y` satisfies
//! `x >= point.x`. Consequently a point lying on a non-horizontal edge counts that edge as
//! crossed: for the square `[(-1, -1), (1, -1), (1, 1), (-1, 1)]`, `(1, 0)` is inside and
//! `(-1, 0)` is outside.

use std::fmt::{Display, Formatter};

use crate::core::prelude::*;

use crate::util::linalg::{Mat3x3, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum WindingRule {
    /// Inside iff the ray crosses the boundary an odd number of times.
    #[default]
    EvenOdd,
    /// Inside iff the signed crossing count is nonzero.
    NonZero,
}

impl WindingRule {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            WindingRule::EvenOdd => WindingRule::NonZero,
            WindingRule::NonZero => WindingRule::EvenOdd,
        }
    }
}

impl Display for WindingRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            WindingRule::EvenOdd => write!(f, "even-odd"),
            WindingRule::NonZero => write!(f, "nonzero"),
        }
    }
}

/// The signed contribution of the edge `start -> end` to the winding number at `point`: `+1` if
/// the edge runs from the upper side down across the ray, `-1` if it runs upwards, `None` if it
/// misses.
fn crossing(point: Vec2, start: Vec2, end: Vec2) -> Option<i32> {
    let start_above = start.y >= point.y;
    let end_above = end.y >= point.y;
    if start_above == end_above {
        // Includes every horizontal edge.
        return None;
    }
    let x = if end.x == start.x {
        start.x
    } else {
        start.x + (point.y - start.y) * (end.x - start.x) / (end.y - start.y)
    };
    (x >= point.x).then_some(if start_above { 1 } else { -1 })
}

/// Crossings of all edges, starting with the closing edge from the last vertex to the first.
fn crossings(point: Vec2, vertices: &[Vec2]) -> impl Iterator<Item = i32> + '_ {
    let closing = vertices.last().copied();
    closing
        .into_iter()
        .chain(vertices.iter().copied())
        .tuple_windows()
        .filter_map(move |(start, end)| crossing(point, start, end))
}

/// Decides whether `point` lies inside the polygon with the given vertices.
///
/// ```
/// use ggkernel::util::linalg::Vec2;
/// use ggkernel::util::polygon::{classify, WindingRule};
///
/// let square = [
///     Vec2::new(-1.0, -1.0),
///     Vec2::new(1.0, -1.0),
///     Vec2::new(1.0, 1.0),
///     Vec2::new(-1.0, 1.0),
/// ];
/// assert!(classify(Vec2::zero(), &square, WindingRule::EvenOdd));
/// assert!(!classify(Vec2::new(2.0, 2.0), &square, WindingRule::NonZero));
/// ```
pub fn classify(point: Vec2, vertices: &[Vec2], rule: WindingRule) -> bool {
    if vertices.len() < 3 {
        return false;
    }
    let accumulator = match rule {
        WindingRule::EvenOdd => crossings(point, vertices).fold(0, |inside, _| inside ^ 1),
        WindingRule::NonZero => crossings(point, vertices).sum::<i32>(),
    };
    accumulator != 0
}

/// The signed crossing total used by [`WindingRule::NonZero`]. Zero for polygons without an
/// interior.
pub fn winding_number(point: Vec2, vertices: &[Vec2]) -> i32 {
    if vertices.len() < 3 {
        0
    } else {
        crossings(point, vertices).sum()
    }
}

/// Draws `count` points uniformly from the axis-aligned rectangle spanned by `min` and `max`.
pub fn scatter<R: Rng + ?Sized>(rng: &mut R, count: usize, min: Vec2, max: Vec2) -> Vec<Vec2> {
    check_le!(min.x, max.x);
    check_le!(min.y, max.y);
    (0..count)
        .map(|_| Vec2::new(rng.gen_range(min.x..=max.x), rng.gen_range(min.y..=max.y)))
        .collect()
}

/// Splits `points` into `(inside, outside)`, preserving order within each half.
pub fn partition(points: &[Vec2], vertices: &[Vec2], rule: WindingRule) -> (Vec<Vec2>, Vec<Vec2>) {
    points
        .iter()
        .copied()
        .partition(|&point| classify(point, vertices, rule))
}

/// Anything that can be viewed as an ordered vertex loop.
pub trait Polygonal {
    fn vertices(&self) -> &[Vec2];

    fn has_interior(&self) -> bool {
        self.vertices().len() >= 3
    }
    fn contains_point(&self, point: Vec2, rule: WindingRule) -> bool {
        classify(point, self.vertices(), rule)
    }
    fn winding_number(&self, point: Vec2) -> i32 {
        winding_number(point, self.vertices())
    }
    /// Every edge in order, closing edge last.
    fn edges(&self) -> Vec<(Vec2, Vec2)> {
        self.vertices()
            .iter()
            .copied()
            .circular_tuple_windows()
            .collect()
    }
}

impl Polygonal for [Vec2] {
    fn vertices(&self) -> &[Vec2] {
        self
    }
}

/// An editable polygon. Vertex order is insertion order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    vertices: Vec<Vec2>,
}

impl Polygon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, vertex: Vec2) {
        self.vertices.push(vertex);
    }
    pub fn clear(&mut self) {
        self.vertices.clear();
    }
    pub fn len(&self) -> usize {
        self.vertices.len()
    }
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Every vertex mapped through `mat`.
    #[must_use]
    pub fn transformed(&self, mat: &Mat3x3) -> Polygon {
        self.vertices.iter().map(|&v| v * *mat).collect()
    }
}

impl Polygonal for Polygon {
    fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }
}

impl From<Vec<Vec2>> for Polygon {
    fn from(vertices: Vec<Vec2>) -> Self {
        Self { vertices }
    }
}

impl FromIterator<Vec2> for Polygon {
    fn from_iter<T: IntoIterator<Item = Vec2>>(iter: T) -> Self {
        Self {
            vertices: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f64::consts::PI;

    const RULES: [WindingRule; 2] = [WindingRule::EvenOdd, WindingRule::NonZero];

    fn square() -> Vec<Vec2> {
        vec![
            Vec2::new(-1.0, -1.0),
            Vec2::new(1.0, -1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(-1.0, 1.0),
        ]
    }

    /// Star polygon {5/2}: the centre pentagon is wound twice.
    fn pentagram() -> Vec<Vec2> {
        (0..5)
            .map(|i| Vec2::from_polar(PI / 2.0 + f64::from(i) * 4.0 * PI / 5.0, 1.0))
            .collect()
    }

    // ==== Rules ====

    #[test]
    fn winding_rule_toggle() {
        assert_eq!(WindingRule::default(), WindingRule::EvenOdd);
        assert_eq!(WindingRule::EvenOdd.toggled(), WindingRule::NonZero);
        assert_eq!(WindingRule::NonZero.toggled(), WindingRule::EvenOdd);
        assert_eq!(format!("{}", WindingRule::NonZero), "nonzero");
        assert_eq!(WindingRule::EvenOdd.to_string(), "even-odd");
    }

    // ==== Convex square ====

    #[test]
    fn square_inside_and_outside() {
        let square = square();
        for rule in RULES {
            assert!(classify(Vec2::zero(), &square, rule));
            assert!(classify(Vec2::new(0.9, -0.9), &square, rule));
            assert!(!classify(Vec2::new(2.0, 2.0), &square, rule));
            assert!(!classify(Vec2::new(-1.5, 0.0), &square, rule));
            assert!(!classify(Vec2::new(0.0, 1.5), &square, rule));
        }
    }

    #[test]
    fn square_boundary_is_stable() {
        let square = square();
        for rule in RULES {
            for _ in 0..3 {
                assert!(classify(Vec2::new(1.0, 0.0), &square, rule));
                assert!(!classify(Vec2::new(-1.0, 0.0), &square, rule));
            }
        }
    }

    #[test]
    fn square_winding_number_sign_follows_orientation() {
        let square = square();
        let mut reversed = square.clone();
        reversed.reverse();
        assert_eq!(winding_number(Vec2::zero(), &square), -1);
        assert_eq!(winding_number(Vec2::zero(), &reversed), 1);
        assert_eq!(winding_number(Vec2::new(3.0, 0.0), &square), 0);
    }

    #[test]
    fn vertical_edges_use_start_x() {
        let square = square();
        // Both vertical edges straddle y = 0.5; only the right one is at or beyond x = 0.
        assert_eq!(crossing(Vec2::new(0.0, 0.5), square[1], square[2]), Some(-1));
        assert_eq!(crossing(Vec2::new(0.0, 0.5), square[3], square[0]), None);
        assert_eq!(crossing(Vec2::new(-2.0, 0.5), square[3], square[0]), Some(1));
    }

    #[test]
    fn horizontal_edges_never_cross() {
        let square = square();
        assert_eq!(crossing(Vec2::new(0.0, -1.0), square[0], square[1]), None);
        assert_eq!(crossing(Vec2::new(0.0, 1.0), square[2], square[3]), None);
    }

    // ==== Degenerate ====

    #[test]
    fn degenerate_polygons_have_no_interior() {
        let points = [Vec2::zero(), Vec2::new(0.5, 0.5), Vec2::new(-3.0, 7.0)];
        let degenerate: [&[Vec2]; 3] = [
            &[],
            &[Vec2::zero()],
            &[Vec2::new(-1.0, -1.0), Vec2::new(1.0, 1.0)],
        ];
        for vertices in degenerate {
            assert!(!vertices.has_interior());
            for point in points {
                for rule in RULES {
                    assert!(!classify(point, vertices, rule));
                }
                assert_eq!(winding_number(point, vertices), 0);
            }
        }
    }

    // ==== Self-intersecting ====

    #[test]
    fn figure_eight_lobes_have_opposite_winding() {
        // Two triangles sharing the origin, wound in opposite directions. Each lobe is wound
        // exactly once (+1 or -1), so both rules agree everywhere; the rules only diverge where
        // the winding number is even and nonzero, see `rules_diverge_where_wound_twice`.
        let figure_eight = [
            Vec2::new(0.0, 0.0),
            Vec2::new(-1.0, 1.0),
            Vec2::new(-1.0, -1.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, -1.0),
        ];
        let left = Vec2::new(-0.5, 0.1);
        let right = Vec2::new(0.5, 0.1);
        assert_eq!(
            winding_number(left, &figure_eight),
            -winding_number(right, &figure_eight)
        );
        assert_ne!(winding_number(left, &figure_eight), 0);
        for rule in RULES {
            assert!(classify(left, &figure_eight, rule));
            assert!(classify(right, &figure_eight, rule));
            assert!(!classify(Vec2::new(0.0, 0.5), &figure_eight, rule));
        }
    }

    #[test]
    fn rules_diverge_where_wound_twice() {
        let star = pentagram();
        let centre = Vec2::new(0.0, 0.05);
        assert_eq!(winding_number(centre, &star).abs(), 2);
        assert!(!classify(centre, &star, WindingRule::EvenOdd));
        assert!(classify(centre, &star, WindingRule::NonZero));

        // A point in one of the tips is wound once; both rules agree.
        let tip = Vec2::new(0.0, 0.9);
        assert!(classify(tip, &star, WindingRule::EvenOdd));
        assert!(classify(tip, &star, WindingRule::NonZero));
    }

    #[test]
    fn doubly_wound_square() {
        let mut twice = square();
        twice.extend(square());
        assert_eq!(winding_number(Vec2::zero(), &twice), -2);
        assert!(!classify(Vec2::zero(), &twice, WindingRule::EvenOdd));
        assert!(classify(Vec2::zero(), &twice, WindingRule::NonZero));
    }

    // ==== Polygon ====

    #[test]
    fn polygon_editing() {
        let mut polygon = Polygon::new();
        assert!(polygon.is_empty());
        for v in square() {
            if polygon.len() < 3 {
                assert!(!polygon.has_interior());
                assert!(!polygon.contains_point(Vec2::new(0.5, -0.5), WindingRule::EvenOdd));
            }
            polygon.push(v);
        }
        assert_eq!(polygon.len(), 4);
        assert!(polygon.has_interior());
        assert!(polygon.contains_point(Vec2::zero(), WindingRule::EvenOdd));
        assert_eq!(polygon.winding_number(Vec2::zero()), -1);
        assert_eq!(polygon.edges().len(), 4);
        assert_eq!(polygon.edges()[3], (Vec2::new(-1.0, 1.0), Vec2::new(-1.0, -1.0)));

        polygon.clear();
        assert!(polygon.is_empty());
        assert!(!polygon.has_interior());
    }

    #[test]
    fn polygon_transformed() {
        let polygon = Polygon::from(square());
        let moved = polygon.transformed(&Mat3x3::translation(10.0, 0.0));
        assert_eq!(moved.vertices()[0], Vec2::new(9.0, -1.0));
        assert!(moved.contains_point(Vec2::new(10.0, 0.0), WindingRule::NonZero));
        assert!(!moved.contains_point(Vec2::zero(), WindingRule::NonZero));
    }

    // ==== Scatter ====

    #[test]
    fn scatter_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let min = Vec2::new(-1.0, -1.0);
        let max = Vec2::new(1.0, 1.0);
        let points = scatter(&mut rng, 1000, min, max);
        assert_eq!(points.len(), 1000);
        assert!(points
            .iter()
            .all(|p| (min.x..=max.x).contains(&p.x) && (min.y..=max.y).contains(&p.y)));
    }

    #[test]
    fn partition_splits_by_rule() {
        let mut rng = StdRng::seed_from_u64(11);
        let points = scatter(&mut rng, 2000, Vec2::new(-2.0, -2.0), Vec2::new(2.0, 2.0));
        let (inside, outside) = partition(&points, &square(), WindingRule::EvenOdd);
        assert_eq!(inside.len() + outside.len(), points.len());
        assert!(inside.iter().all(|p| p.x.abs() <= 1.0 && p.y.abs() <= 1.0));
        assert!(outside.iter().all(|p| p.x.abs() > 1.0 || p.y.abs() > 1.0));
        // Roughly a quarter of the area.
        assert!((300..700).contains(&inside.len()), "{}", inside.len());

        let (inside, outside) = partition(&points, &[], WindingRule::NonZero);
        assert!(inside.is_empty());
        assert_eq!(outside.len(), points.len());
    }
}
