//! Integer clip-space conversion, point cleaning, and the engine boundary.

use serde::{Deserialize, Serialize};

use super::Point;

/// Winding convention the engine uses to resolve self-intersections and
/// overlaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

/// Integer point in clip space (pixel coordinates times the clip scale).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClipPoint {
    pub x: i64,
    pub y: i64,
}

impl ClipPoint {
    pub fn distance_to(self, other: ClipPoint) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Boolean polygon geometry over integer clip-space rings.
///
/// Implemented by the host around whatever clipping library it ships.
/// Rings are simple (not explicitly closed); operations may return any
/// number of disjoint output rings, including none.
pub trait ClipperEngine {
    /// Resolves self-intersections in one ring.
    fn simplify(&self, ring: &[ClipPoint], fill_rule: FillRule) -> Vec<Vec<ClipPoint>>;

    /// Unions multiple rings into a minimal merged set.
    fn union(&self, rings: &[Vec<ClipPoint>], fill_rule: FillRule) -> Vec<Vec<ClipPoint>>;
}

/// Converts pixel points into clip space at the given scale.
pub fn to_clip_space(points: &[Point], scale: f64) -> Vec<ClipPoint> {
    points
        .iter()
        .map(|p| ClipPoint {
            x: (p.x * scale).round() as i64,
            y: (p.y * scale).round() as i64,
        })
        .collect()
}

/// Converts clip-space points back into pixel space.
pub fn from_clip_space(points: &[ClipPoint], scale: f64) -> Vec<Point> {
    points
        .iter()
        .map(|p| Point::new(p.x as f64 / scale, p.y as f64 / scale))
        .collect()
}

/// Drops points closer than `tolerance` (pixel units) to the previously
/// kept point, preventing degenerate near-zero-length edges.
///
/// The ring is treated as cyclic: a trailing point that collapses onto the
/// first one is dropped as well, which is what unwinds the duplicated
/// closing point of a freshly closed freehand ring.
pub fn clean(points: &[ClipPoint], tolerance: f64, scale: f64) -> Vec<ClipPoint> {
    let scaled = tolerance * scale;
    let mut kept: Vec<ClipPoint> = Vec::with_capacity(points.len());
    for &point in points {
        match kept.last() {
            Some(&prev) if prev.distance_to(point) < scaled => continue,
            _ => kept.push(point),
        }
    }
    while kept.len() > 1 {
        let first = kept[0];
        let last = kept[kept.len() - 1];
        if last.distance_to(first) < scaled {
            kept.pop();
        } else {
            break;
        }
    }
    kept
}
