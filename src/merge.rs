//! Union merge over the tracked polygon set.

use crate::error::Result;
use crate::geometry::clip::{self, ClipPoint, ClipperEngine};
use crate::geometry::{LatLng, Point};
use crate::map::MapSurface;
use crate::mode::Mode;
use crate::options::{DrawOptions, MergeStrategy};
use crate::polygon::PolygonStore;

/// Merges every overlapping polygon in the store. No-op below two
/// polygons. Returns whether the ring set changed.
///
/// The pass itself is a full destroy/recreate in silent store execution;
/// the caller emits the single boundary notification afterwards.
pub(crate) fn merge_polygons(
    store: &mut PolygonStore,
    map: &dyn MapSurface,
    clipper: &dyn ClipperEngine,
    options: &DrawOptions,
    mode: Mode,
) -> Result<bool> {
    match options.merge {
        MergeStrategy::TwoPass => {
            // A single union pass can miss chains of three or more
            // overlapping shapes; the second pass is idempotent on an
            // already-merged set and catches the remainder.
            let first = merge_pass(store, map, clipper, options, mode)?;
            let second = merge_pass(store, map, clipper, options, mode)?;
            Ok(first || second)
        }
        MergeStrategy::FixedPoint { max_iterations } => {
            let mut changed = false;
            for iteration in 0..max_iterations {
                if !merge_pass(store, map, clipper, options, mode)? {
                    log::debug!("merge settled after {} pass(es)", iteration + 1);
                    break;
                }
                changed = true;
            }
            Ok(changed)
        }
    }
}

/// One union pass: every tracked ring into clip space, union, then a
/// silent rebuild of the store from the merged output.
fn merge_pass(
    store: &mut PolygonStore,
    map: &dyn MapSurface,
    clipper: &dyn ClipperEngine,
    options: &DrawOptions,
    mode: Mode,
) -> Result<bool> {
    if store.len() < 2 {
        return Ok(false);
    }

    let rings: Vec<Vec<ClipPoint>> = store
        .iter()
        .map(|polygon| {
            let pixels: Vec<Point> = polygon
                .ring()
                .iter()
                .map(|&ll| map.latlng_to_container_point(ll))
                .collect();
            clip::to_clip_space(&pixels, options.clip_scale)
        })
        .collect();

    let merged = clipper.union(&rings, options.fill_rule);
    let changed = merged.len() != rings.len();
    if changed {
        log::info!(
            "merge pass collapsed {} polygon(s) into {}",
            rings.len(),
            merged.len()
        );
    }

    store.clear(map);
    for out_ring in &merged {
        if out_ring.len() < 3 {
            continue;
        }
        let latlngs: Vec<LatLng> = clip::from_clip_space(out_ring, options.clip_scale)
            .into_iter()
            .map(|p| map.container_point_to_latlng(p))
            .collect();
        store.create(map, clipper, options, mode, &latlngs, None)?;
    }
    Ok(changed)
}
