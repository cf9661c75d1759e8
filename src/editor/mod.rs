//! The per-surface editor context.
//!
//! One [`Editor`] per independent drawing surface, owned by its host. The
//! implementation is split by protocol: mode control, notifications, and
//! history live in `core`; the freehand creation pointer protocol in
//! `mouse`; the per-vertex edit/delete protocols in `edit`.

mod core;
mod edit;
mod mouse;

pub use core::Editor;
pub use mouse::MouseButton;
