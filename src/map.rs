//! Host collaborator traits: the map surface and the transient trace canvas.
//!
//! The core never renders anything itself. The host implements these traits
//! over its map widget and feeds pointer gestures into the editor's entry
//! points; the editor calls back out through them to move markers, redraw
//! polygon layers, and claim or release the map's own gesture handling.

use crate::geometry::{LatLng, Point};
use crate::mode::Mode;

/// Handle to a rendered polygon layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(pub u64);

/// Handle to a rendered edge marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerId(pub u64);

/// The interactive map viewport.
///
/// Conversions must return finite coordinates for finite input. Container
/// space is the widget-relative pixel space gestures arrive in; layer space
/// is the pannable overlay the host may place markers in.
pub trait MapSurface {
    fn latlng_to_container_point(&self, latlng: LatLng) -> Point;
    fn container_point_to_latlng(&self, point: Point) -> LatLng;
    fn latlng_to_layer_point(&self, latlng: LatLng) -> Point;
    fn layer_point_to_latlng(&self, point: Point) -> LatLng;

    /// Switches every map gesture (drag, zoom variants) on or off at once;
    /// held off for the whole time CREATE is active.
    fn set_gestures_enabled(&self, enabled: bool);

    /// Switches panning alone; held off for the duration of an edge drag.
    fn set_dragging_enabled(&self, enabled: bool);

    /// Reflects the active mode in host styling.
    fn apply_mode_classes(&self, mode: Mode);

    fn add_polygon_layer(&self, ring: &[LatLng]) -> LayerId;
    fn redraw_polygon_layer(&self, layer: LayerId, ring: &[LatLng]);
    fn remove_polygon_layer(&self, layer: LayerId);

    /// Places one edge marker. Non-interactive markers are visual only and
    /// must not deliver press/context gestures back to the editor.
    fn add_edge_marker(&self, latlng: LatLng, interactive: bool) -> MarkerId;
    fn move_edge_marker(&self, marker: MarkerId, latlng: LatLng);
    fn remove_edge_marker(&self, marker: MarkerId);
}

/// Renders the live freehand trace while the pointer moves. Purely visual;
/// nothing drawn here becomes committed geometry.
pub trait TraceCanvas {
    /// Resets the canvas ahead of a new stroke.
    fn begin(&self);

    /// Draws one transient segment.
    fn line_segment(&self, from: Point, to: Point);

    /// Removes any transient trace from the surface.
    fn clear(&self);
}
