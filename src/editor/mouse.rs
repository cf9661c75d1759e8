//! Pointer protocol: freehand creation and drag routing.

use crate::error::Result;
use crate::geometry::Point;
use crate::mode::Mode;
use crate::polygon::edges;

use super::Editor;

/// Pointer buttons delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Primary drawing button.
    Left,
    /// Secondary/context button; never starts a gesture.
    Right,
    Middle,
}

impl Editor {
    /// Pointer pressed on the map surface (not on an edge marker).
    ///
    /// Starts accumulating a freehand stroke when CREATE is set. Secondary
    /// presses and presses during an active edge drag are ignored, as is
    /// any press while a polygon exists on a single-polygon surface.
    pub fn pointer_down(&mut self, button: MouseButton, point: Point) {
        if button == MouseButton::Right {
            return;
        }
        if self.drag.is_some() {
            return;
        }
        if !self.options.multiple_polygons && !self.store.is_empty() {
            return;
        }
        if self.mode.contains(Mode::CREATE) {
            self.tracer.begin(self.canvas.as_ref(), point);
        }
    }

    /// Pointer moved. Feeds the active edge drag when one exists,
    /// otherwise the freehand tracer.
    pub fn pointer_move(&mut self, point: Point) {
        if let Some(session) = self.drag.as_ref() {
            let polygon = session.polygon;
            let index = session.index;
            edges::drag_edge_to(&mut self.store, self.map.as_ref(), polygon, index, point);
            return;
        }
        self.tracer.sample(self.map.as_ref(), self.canvas.as_ref(), point);
    }

    /// Pointer released: commits the active edge drag or the freehand
    /// stroke. A stroke with fewer than three samples is discarded with no
    /// polygon, no event, and no history entry.
    pub async fn pointer_up(&mut self) -> Result<()> {
        if self.drag.is_some() {
            return self.finish_edge_drag().await;
        }
        if !self.tracer.is_creating() {
            return Ok(());
        }
        let Some(ring) = self.tracer.finish(self.canvas.as_ref()) else {
            return Ok(());
        };
        if !self.create_polygon(&ring).await? {
            return Ok(());
        }
        if self.options.create_exit_mode {
            self.unset_mode(Mode::CREATE).await;
        }
        Ok(())
    }

    /// A pointer leaving the surface ends the active gesture like a
    /// release.
    pub async fn pointer_leave(&mut self) -> Result<()> {
        self.pointer_up().await
    }
}
