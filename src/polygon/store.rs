//! Ownership and lifecycle of the live polygon set.
//!
//! Store operations are notification-free: they mutate geometry, layers,
//! and markers, and nothing else. The editor composites decide when a
//! boundary notification goes out, which is what makes multi-step silent
//! rebuilds (merge passes, history restores) emit exactly one.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::geometry::clip::{self, ClipperEngine};
use crate::geometry::{LatLng, Point};
use crate::map::MapSurface;
use crate::mode::Mode;
use crate::options::DrawOptions;

use super::{edges, Polygon, PolygonId, PolygonSnapshot};

/// Owns every polygon on one drawing surface, in creation (id) order.
#[derive(Default)]
pub struct PolygonStore {
    polygons: BTreeMap<PolygonId, Polygon>,
    next_id: u64,
}

impl PolygonStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn contains(&self, id: PolygonId) -> bool {
        self.polygons.contains_key(&id)
    }

    pub fn get(&self, id: PolygonId) -> Option<&Polygon> {
        self.polygons.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: PolygonId) -> Option<&mut Polygon> {
        self.polygons.get_mut(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Polygon> {
        self.polygons.values()
    }

    /// Every polygon's ring, in id order; the boundary-notify payload.
    pub fn rings(&self) -> Vec<Vec<LatLng>> {
        self.polygons.values().map(|p| p.ring.clone()).collect()
    }

    /// Ring snapshots of the whole set, for the history log.
    pub fn snapshot(&self) -> Vec<PolygonSnapshot> {
        self.polygons
            .values()
            .map(|p| PolygonSnapshot {
                id: p.id,
                ring: p.ring.clone(),
            })
            .collect()
    }

    /// Cleans and simplifies `ring` in integer pixel space, then creates
    /// one polygon per surviving output ring.
    ///
    /// Returns the created ids; an empty list means the geometry vanished
    /// (not an error). `reuse_id` keeps the first created polygon on an
    /// existing identity, which is how rebuilds preserve it.
    pub(crate) fn create(
        &mut self,
        map: &dyn MapSurface,
        clipper: &dyn ClipperEngine,
        options: &DrawOptions,
        mode: Mode,
        ring: &[LatLng],
        reuse_id: Option<PolygonId>,
    ) -> Result<Vec<PolygonId>> {
        for (index, latlng) in ring.iter().enumerate() {
            if !latlng.is_finite() {
                return Err(Error::NonFiniteCoordinate { index });
            }
        }

        let pixels: Vec<Point> = ring
            .iter()
            .map(|&ll| map.latlng_to_container_point(ll))
            .collect();
        let clipped = clip::to_clip_space(&pixels, options.clip_scale);
        let cleaned = clip::clean(&clipped, options.clean_tolerance, options.clip_scale);
        if cleaned.len() < 3 {
            log::debug!("ring collapsed to {} point(s) under cleaning", cleaned.len());
            return Ok(Vec::new());
        }
        let simplified = clipper.simplify(&cleaned, options.fill_rule);

        let mut created = Vec::new();
        for out_ring in &simplified {
            if out_ring.len() < 3 {
                continue;
            }
            let latlngs: Vec<LatLng> = clip::from_clip_space(out_ring, options.clip_scale)
                .into_iter()
                .map(|p| map.container_point_to_latlng(p))
                .collect();
            let id = match reuse_id {
                Some(id) if created.is_empty() => id,
                _ => self.allocate_id(),
            };
            self.insert(map, mode, id, latlngs);
            created.push(id);
        }
        log::debug!(
            "created {} polygon(s) from a {}-point ring",
            created.len(),
            ring.len()
        );
        Ok(created)
    }

    /// Inserts an already-committed ring verbatim, renders its layer, and
    /// attaches its edges. Used by creation, rebuilds, and history
    /// restores; keeps the id allocator ahead of restored ids.
    pub(crate) fn insert(
        &mut self,
        map: &dyn MapSurface,
        mode: Mode,
        id: PolygonId,
        ring: Vec<LatLng>,
    ) {
        self.next_id = self.next_id.max(id.0 + 1);
        if let Some(previous) = self.polygons.remove(&id) {
            Self::remove_rendering(map, &previous);
        }
        let layer = map.add_polygon_layer(&ring);
        let edge_list = edges::attach_edges(map, mode, id, &ring);
        self.polygons.insert(
            id,
            Polygon {
                id,
                layer,
                ring,
                edges: edge_list,
            },
        );
    }

    /// Removes a polygon, its layer, and every one of its edge markers.
    pub(crate) fn destroy(&mut self, map: &dyn MapSurface, id: PolygonId) -> bool {
        match self.polygons.remove(&id) {
            Some(polygon) => {
                Self::remove_rendering(map, &polygon);
                true
            }
            None => false,
        }
    }

    /// Destroys every polygon.
    pub(crate) fn clear(&mut self, map: &dyn MapSurface) {
        let ids: Vec<PolygonId> = self.polygons.keys().copied().collect();
        for id in ids {
            self.destroy(map, id);
        }
    }

    fn remove_rendering(map: &dyn MapSurface, polygon: &Polygon) {
        for edge in &polygon.edges {
            map.remove_edge_marker(edge.marker);
        }
        map.remove_polygon_layer(polygon.layer);
    }

    fn allocate_id(&mut self) -> PolygonId {
        let id = PolygonId(self.next_id);
        self.next_id += 1;
        id
    }
}
