//! Editor state, mode control, notifications, and history application.

use std::rc::Rc;

use crate::error::Result;
use crate::geometry::LatLng;
use crate::geometry::clip::ClipperEngine;
use crate::history::{Command, CommandKind, UndoRedoStack};
use crate::map::{MapSurface, TraceCanvas};
use crate::merge;
use crate::mode::Mode;
use crate::options::DrawOptions;
use crate::polygon::{PolygonId, PolygonSnapshot, PolygonStore};
use crate::pubsub::{Event, EventName, PubSub, Response};
use crate::trace::FreehandTracer;

use super::edit::DragSession;

/// Interaction state machine and geometry-commit pipeline for one map
/// surface.
///
/// The editor coordinates pointer gestures against the mutable polygon set
/// while keeping geometry, edge markers, and history consistent. All
/// mutation entry points that can notify subscribers are `async`; the host
/// drives them from its event loop. Starts in [`Mode::VIEW`]; call
/// [`Editor::set_mode`] for the opening transition (which, like every
/// transition, emits a mode event).
pub struct Editor {
    pub(super) map: Rc<dyn MapSurface>,
    pub(super) canvas: Rc<dyn TraceCanvas>,
    pub(super) clipper: Rc<dyn ClipperEngine>,
    pub(super) options: DrawOptions,
    pub(super) mode: Mode,
    pub(super) store: PolygonStore,
    pub(super) history: UndoRedoStack,
    pub(super) events: PubSub,
    pub(super) tracer: FreehandTracer,
    pub(super) drag: Option<DragSession>,
    pub(super) boundary_update_required: bool,
}

impl Editor {
    pub fn new(
        map: Rc<dyn MapSurface>,
        canvas: Rc<dyn TraceCanvas>,
        clipper: Rc<dyn ClipperEngine>,
        mut options: DrawOptions,
    ) -> Self {
        options.validate_and_clamp();
        Self {
            map,
            canvas,
            clipper,
            options,
            mode: Mode::VIEW,
            store: PolygonStore::new(),
            history: UndoRedoStack::new(),
            events: PubSub::new(),
            tracer: FreehandTracer::new(),
            drag: None,
            boundary_update_required: false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn options(&self) -> &DrawOptions {
        &self.options
    }

    pub fn store(&self) -> &PolygonStore {
        &self.store
    }

    pub fn history(&self) -> &UndoRedoStack {
        &self.history
    }

    pub fn polygon_count(&self) -> usize {
        self.store.len()
    }

    /// Subscription surface for toolbars and boundary consumers.
    pub fn events_mut(&mut self) -> &mut PubSub {
        &mut self.events
    }

    /// Replaces the active mode set.
    ///
    /// Emits the mode event on every call, even when the set is unchanged,
    /// so toolbars can always resync. Consumes a deferred boundary
    /// notification when the new set no longer includes EDIT, and hands the
    /// map's own gesture handling over to CREATE while that flag is set.
    pub async fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.publish(Event::Mode { mode }).await;

        if self.boundary_update_required && !mode.contains(Mode::EDIT) {
            self.boundary_update_required = false;
            self.notify_boundaries().await;
        }

        self.map.set_gestures_enabled(!mode.contains(Mode::CREATE));
        self.map.apply_mode_classes(mode);
        log::debug!("mode set to {mode}");
    }

    /// Clears the given flags (XOR toggle), falling back to VIEW when the
    /// set would empty out.
    pub async fn unset_mode(&mut self, mode: Mode) {
        self.set_mode(self.mode.toggled(mode)).await;
    }

    /// Commits a geographic ring through clean+simplify as one or more
    /// polygons, merging overlaps afterwards when enabled.
    ///
    /// Returns `false` when the geometry vanished entirely: no polygon, no
    /// event, no history entry.
    pub async fn create_polygon(&mut self, ring: &[LatLng]) -> Result<bool> {
        let before = self.store.snapshot();
        let created = self.store.create(
            self.map.as_ref(),
            self.clipper.as_ref(),
            &self.options,
            self.mode,
            ring,
            None,
        )?;
        if created.is_empty() {
            return Ok(false);
        }

        let mut kind = CommandKind::Create;
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

        self.notify_boundaries().await;
        let after = self.store.snapshot();
        self.commit_command(kind, before, after).await;
        Ok(true)
    }

    /// Destroys one polygon and its edge markers. Returns whether it
    /// existed.
    pub async fn delete_polygon(&mut self, id: PolygonId) -> bool {
        let before = self.store.snapshot();
        if !self.store.destroy(self.map.as_ref(), id) {
            return false;
        }
        self.notify_boundaries().await;
        let after = self.store.snapshot();
        self.commit_command(CommandKind::Delete, before, after).await;
        true
    }

    /// Click on a polygon body; destroys it while DELETE mode is set.
    pub async fn polygon_clicked(&mut self, id: PolygonId) -> bool {
        if !self.mode.contains(Mode::DELETE) {
            return false;
        }
        self.delete_polygon(id).await
    }

    /// Destroys every polygon in one silent batch, emitting a single
    /// boundary notification and one history entry.
    pub async fn clear_polygons(&mut self) {
        if self.store.is_empty() {
            return;
        }
        let before = self.store.snapshot();
        self.store.clear(self.map.as_ref());
        self.notify_boundaries().await;
        self.commit_command(CommandKind::Delete, before, Vec::new()).await;
    }

    /// Pops the newest command and applies its inverse. Silent no-op on an
    /// empty undo stack.
    pub async fn undo(&mut self) -> bool {
        let Some(command) = self.history.pop_undo() else {
            return false;
        };
        self.restore_snapshots(&command.before);
        self.notify_boundaries().await;
        let name = match command.kind {
            CommandKind::Merge => EventName::UndoMergedPolygon,
            _ => EventName::StackStateUpdated,
        };
        self.history.push_redo(command);
        self.publish_stack_state(name).await;
        true
    }

    /// Replays the most recently undone command. Silent no-op when nothing
    /// was undone.
    pub async fn redo(&mut self) -> bool {
        let Some(command) = self.history.pop_redo() else {
            return false;
        };
        self.restore_snapshots(&command.after);
        self.notify_boundaries().await;
        let name = match command.kind {
            CommandKind::Merge => EventName::RedoMergedPolygon,
            _ => EventName::StackStateUpdated,
        };
        self.history.restore_undo(command);
        self.publish_stack_state(name).await;
        true
    }

    /// Publishes the boundary event carrying every polygon's current ring.
    pub(super) async fn notify_boundaries(&self) {
        let latlngs = self.store.rings();
        self.publish(Event::Markers { latlngs }).await;
    }

    pub(super) async fn publish(&self, event: Event) -> Option<Response> {
        self.events.publish(&event).await
    }

    /// Records a command and announces it on its cause-specific channel.
    pub(super) async fn commit_command(
        &mut self,
        kind: CommandKind,
        before: Vec<PolygonSnapshot>,
        after: Vec<PolygonSnapshot>,
    ) {
        self.history.push(Command { kind, before, after });
        let name = match kind {
            CommandKind::Create => EventName::SimplePolygonCreated,
            CommandKind::Edit => EventName::PolygonEditedNonOverlapping,
            CommandKind::Merge => EventName::PolygonOverlapsOtherPolygon,
            CommandKind::Delete => EventName::StackStateUpdated,
        };
        self.publish_stack_state(name).await;
    }

    async fn publish_stack_state(&self, name: EventName) {
        self.publish(Event::StackState {
            name,
            undo_empty: self.history.undo_empty(),
            redo_empty: self.history.redo_empty(),
        })
        .await;
    }

    /// Silent whole-set restore: clears the store and reinserts the
    /// snapshots verbatim under their original ids.
    fn restore_snapshots(&mut self, snapshots: &[PolygonSnapshot]) {
        self.store.clear(self.map.as_ref());
        for snapshot in snapshots {
            self.store.insert(
                self.map.as_ref(),
                self.mode,
                snapshot.id,
                snapshot.ring.clone(),
            );
        }
    }
}
