//! Linear undo/redo command log.
//!
//! The stack stores data only; applying snapshots to the polygon set and
//! announcing stack changes are editor responsibilities, so the log itself
//! stays trivially testable.

use crate::polygon::PolygonSnapshot;

/// What a history entry did; selects the stack event announcing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Create,
    Delete,
    Edit,
    Merge,
}

/// One reversible mutation of the polygon set.
///
/// Whole-set ring snapshots on both sides make apply and invert total:
/// restoring `after` replays the command, restoring `before` inverts it,
/// regardless of how many polygons the mutation touched.
#[derive(Debug, Clone)]
pub struct Command {
    pub kind: CommandKind,
    pub before: Vec<PolygonSnapshot>,
    pub after: Vec<PolygonSnapshot>,
}

/// Linear history. A fresh push abandons the redo branch.
#[derive(Debug, Default)]
pub struct UndoRedoStack {
    undo: Vec<Command>,
    redo: Vec<Command>,
}

impl UndoRedoStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn undo_empty(&self) -> bool {
        self.undo.is_empty()
    }

    pub fn redo_empty(&self) -> bool {
        self.redo.is_empty()
    }

    /// Records a fresh mutation, discarding any stale redo entries.
    pub fn push(&mut self, command: Command) {
        self.undo.push(command);
        self.redo.clear();
    }

    /// Takes the newest command off the undo stack; `None` when empty.
    pub(crate) fn pop_undo(&mut self) -> Option<Command> {
        self.undo.pop()
    }

    /// Parks an undone command on the redo stack.
    pub(crate) fn push_redo(&mut self, command: Command) {
        self.redo.push(command);
    }

    /// Takes the newest command off the redo stack; `None` when empty.
    pub(crate) fn pop_redo(&mut self) -> Option<Command> {
        self.redo.pop()
    }

    /// Returns a replayed command to the undo stack without disturbing the
    /// remaining redo entries.
    pub(crate) fn restore_undo(&mut self, command: Command) {
        self.undo.push(command);
    }
}
