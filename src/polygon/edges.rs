//! Vertex edge mechanics: marker attachment, live drag translation,
//! vertex deletion, and the clean-and-simplify rebuild.
//!
//! The drag/delete *protocols* (mode guards, the edit-start veto, gesture
//! claims, history commits) live on the editor; this module only moves
//! geometry and markers.

use crate::error::Result;
use crate::geometry::clip::ClipperEngine;
use crate::geometry::{LatLng, Point};
use crate::map::MapSurface;
use crate::mode::Mode;
use crate::options::DrawOptions;

use super::store::PolygonStore;
use super::{Edge, PolygonId};

/// Places one marker per ring vertex. Markers are interactive only while
/// the mode at attach time allows vertex interaction; a later mode change
/// does not restyle existing markers (they are recreated on the next
/// rebuild anyway).
pub(crate) fn attach_edges(
    map: &dyn MapSurface,
    mode: Mode,
    polygon: PolygonId,
    ring: &[LatLng],
) -> Vec<Edge> {
    let interactive = mode.contains(Mode::EDIT) || mode.contains(Mode::DELETE_POINT);
    ring.iter()
        .enumerate()
        .map(|(index, &latlng)| Edge {
            marker: map.add_edge_marker(latlng, interactive),
            polygon,
            index,
            latlng,
        })
        .collect()
}

/// Moves one edge to the pointer position and redraws its polygon from all
/// edge positions. Pure vertex translation; topology is not recomputed
/// until the drag commits.
pub(crate) fn drag_edge_to(
    store: &mut PolygonStore,
    map: &dyn MapSurface,
    polygon: PolygonId,
    index: usize,
    point: Point,
) {
    let latlng = map.container_point_to_latlng(point);
    let Some(poly) = store.get_mut(polygon) else {
        return;
    };
    let Some(edge) = poly.edges.get_mut(index) else {
        return;
    };
    edge.latlng = latlng;
    map.move_edge_marker(edge.marker, latlng);

    poly.ring = poly.edges.iter().map(|e| e.latlng).collect();
    map.redraw_polygon_layer(poly.layer, &poly.ring);
}

/// Replaces a polygon's geometry by running `ring` back through
/// clean+simplify, keeping the polygon's id on the first resulting ring.
/// A self-intersecting ring may legitimately split into several polygons;
/// a fully degenerate one destroys the polygon.
pub(crate) fn rebuild_polygon(
    store: &mut PolygonStore,
    map: &dyn MapSurface,
    clipper: &dyn ClipperEngine,
    options: &DrawOptions,
    mode: Mode,
    id: PolygonId,
    ring: &[LatLng],
) -> Result<Vec<PolygonId>> {
    store.destroy(map, id);
    store.create(map, clipper, options, mode, ring, Some(id))
}

/// Removes one vertex and rebuilds the polygon from the reduced ring.
/// Dropping below three vertices destroys the polygon outright.
pub(crate) fn delete_vertex(
    store: &mut PolygonStore,
    map: &dyn MapSurface,
    clipper: &dyn ClipperEngine,
    options: &DrawOptions,
    mode: Mode,
    id: PolygonId,
    index: usize,
) -> Result<bool> {
    let Some(poly) = store.get(id) else {
        return Ok(false);
    };
    if index >= poly.ring.len() {
        return Ok(false);
    }

    let mut ring = poly.ring.clone();
    ring.remove(index);

    if ring.len() < 3 {
        log::debug!("vertex removal left polygon {:?} degenerate, destroying it", id);
        store.destroy(map, id);
    } else {
        rebuild_polygon(store, map, clipper, options, mode, id, &ring)?;
    }
    Ok(true)
}
