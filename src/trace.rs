//! Freehand trace capture.

use crate::geometry::{LatLng, Point};
use crate::map::{MapSurface, TraceCanvas};

/// Accumulates pointer samples while the user drags out a freehand stroke.
///
/// Each sample draws one transient segment on the [`TraceCanvas`] and
/// stores the geographic conversion of the pixel. The trace itself never
/// becomes geometry; only the accumulated points do, and only when at
/// least three of them exist at release.
#[derive(Debug, Default)]
pub struct FreehandTracer {
    creating: bool,
    from_point: Point,
    latlngs: Vec<LatLng>,
}

impl FreehandTracer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a stroke is currently being captured.
    pub fn is_creating(&self) -> bool {
        self.creating
    }

    /// Starts a stroke at the given pixel position.
    pub(crate) fn begin(&mut self, canvas: &dyn TraceCanvas, start: Point) {
        self.creating = true;
        self.from_point = start;
        self.latlngs.clear();
        canvas.begin();
    }

    /// Records one pointer sample: draws the transient segment and appends
    /// the geographic conversion of the pixel.
    pub(crate) fn sample(&mut self, map: &dyn MapSurface, canvas: &dyn TraceCanvas, point: Point) {
        if !self.creating {
            return;
        }
        canvas.line_segment(self.from_point, point);
        self.latlngs.push(map.container_point_to_latlng(point));
        self.from_point = point;
    }

    /// Ends the stroke and clears the transient trace.
    ///
    /// Returns the closed ring (first point re-appended), or `None` when
    /// fewer than three samples accumulated and the gesture is discarded.
    pub(crate) fn finish(&mut self, canvas: &dyn TraceCanvas) -> Option<Vec<LatLng>> {
        self.creating = false;
        canvas.clear();
        let mut ring = std::mem::take(&mut self.latlngs);
        if ring.len() <= 2 {
            log::debug!("freehand stroke discarded with {} sample(s)", ring.len());
            return None;
        }
        ring.push(ring[0]);
        Some(ring)
    }
}
