//! Per-vertex protocols: the gated drag-edit session and delete-point.

use crate::error::Result;
use crate::history::CommandKind;
use crate::merge;
use crate::mode::Mode;
use crate::polygon::{PolygonId, PolygonSnapshot, edges};
use crate::pubsub::{Event, Response};

use super::Editor;
use super::mouse::MouseButton;

/// The active drag session; at most one per surface. Carries the whole-set
/// snapshot taken before the first vertex translation so the commit can
/// record an invertible command.
#[derive(Debug)]
pub(super) struct DragSession {
    pub(super) polygon: PolygonId,
    pub(super) index: usize,
    pub(super) before: Vec<PolygonSnapshot>,
}

impl Editor {
    /// Primary-button press on an edge marker. Returns whether a drag
    /// session began.
    ///
    /// Before any state changes, the `edit-start` event is published and
    /// every subscriber awaited; a response with `interrupt` set aborts
    /// the session with zero mutation. This is the sole cooperative
    /// cancellation point; external policy can veto an edit here.
    pub async fn edge_pressed(
        &mut self,
        polygon: PolygonId,
        index: usize,
        button: MouseButton,
    ) -> bool {
        if button == MouseButton::Right {
            // Context gestures route through edge_context.
            return false;
        }
        if self.drag.is_some() {
            // One drag session at a time; a second press is not a
            // supported input until the active session releases.
            return false;
        }
        if !self.mode.contains(Mode::EDIT) {
            return false;
        }
        if !self
            .store
            .get(polygon)
            .is_some_and(|p| index < p.ring().len())
        {
            return false;
        }

        if let Some(Response { interrupt: true }) = self.publish(Event::EditStart).await {
            log::debug!("edge drag on {polygon:?} vetoed by edit-start subscriber");
            return false;
        }

        // Repositioning an edge fights the map pan; claim it.
        self.map.set_dragging_enabled(false);
        self.drag = Some(DragSession {
            polygon,
            index,
            before: self.store.snapshot(),
        });
        log::debug!("edge drag started on {polygon:?} vertex {index}");
        true
    }

    /// Secondary/context gesture on an edge: removes that vertex while
    /// DELETE_POINT is set. The polygon is rebuilt from the reduced ring,
    /// or destroyed when fewer than three vertices remain.
    pub async fn edge_context(&mut self, polygon: PolygonId, index: usize) -> Result<()> {
        if !self.mode.contains(Mode::DELETE_POINT) {
            return Ok(());
        }
        let before = self.store.snapshot();
        let changed = edges::delete_vertex(
            &mut self.store,
            self.map.as_ref(),
            self.clipper.as_ref(),
            &self.options,
            self.mode,
            polygon,
            index,
        )?;
        if !changed {
            return Ok(());
        }
        self.notify_boundaries().await;
        let after = self.store.snapshot();
        self.commit_command(CommandKind::Edit, before, after).await;
        Ok(())
    }

    /// Commits the active drag session: releases the pan claim, re-cleans
    /// the dragged polygon, runs the merge passes when enabled, and
    /// records one command.
    pub(super) async fn finish_edge_drag(&mut self) -> Result<()> {
        let Some(session) = self.drag.take() else {
            return Ok(());
        };

        // CREATE's claim on the gesture surface outlives the drag.
        if !self.mode.contains(Mode::CREATE) {
            self.map.set_dragging_enabled(true);
        }

        let Some(ring) = self.store.get(session.polygon).map(|p| p.ring().to_vec()) else {
            return Ok(());
        };

        // Drop any self-overlap the drag introduced.
        edges::rebuild_polygon(
            &mut self.store,
            self.map.as_ref(),
            self.clipper.as_ref(),
            &self.options,
            self.mode,
            session.polygon,
            &ring,
        )?;

        let mut kind = CommandKind::Edit;
        if self.options.merge_polygons
            && merge::merge_polygons(
                &mut self.store,
                self.map.as_ref(),
                self.clipper.as_ref(),
                &self.options,
                self.mode,
            )?
        {
            kind = CommandKind::Merge;
        }

        if self.options.notify_after_edit_exit {
            // Consumed by set_mode once EDIT is exited.
            self.boundary_update_required = true;
        } else {
            self.notify_boundaries().await;
        }

        let after = self.store.snapshot();
        self.commit_command(kind, session.before, after).await;
        Ok(())
    }
}
