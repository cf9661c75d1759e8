//! Coordinate primitives and the clipping boundary.
//!
//! Three coordinate spaces flow through the crate:
//! - [`LatLng`]: geographic coordinates as the map surface understands them;
//!   the persistent representation of polygon rings.
//! - [`Point`]: pixel coordinates (container or layer space) used for
//!   gesture input and the transient trace.
//! - [`clip::ClipPoint`]: scaled integer coordinates handed to the boolean
//!   clipping engine, which needs integers for robustness.

pub mod clip;

mod point;

pub use point::{LatLng, Point};
