//! Shared fakes for the integration tests: a flat-projection map surface,
//! a recording trace canvas, and a rectangle-only clipping engine.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use mapsketch::editor::{Editor, MouseButton};
use mapsketch::geometry::clip::{ClipPoint, ClipperEngine, FillRule};
use mapsketch::geometry::{LatLng, Point};
use mapsketch::map::{LayerId, MapSurface, MarkerId, TraceCanvas};
use mapsketch::mode::Mode;
use mapsketch::options::DrawOptions;
use mapsketch::pubsub::{Event, EventName, FnSubscriber, Response};

/// Flat projection: latitude is the pixel y, longitude the pixel x, and
/// container space equals layer space.
#[derive(Default)]
pub struct FlatMap {
    pub layers: RefCell<HashMap<LayerId, Vec<LatLng>>>,
    pub markers: RefCell<HashMap<MarkerId, (LatLng, bool)>>,
    pub gestures_enabled: Cell<bool>,
    pub dragging_enabled: Cell<bool>,
    pub mode_classes: RefCell<Vec<Mode>>,
    next_layer: Cell<u64>,
    next_marker: Cell<u64>,
}

impl FlatMap {
    pub fn new() -> Self {
        let map = Self::default();
        map.gestures_enabled.set(true);
        map.dragging_enabled.set(true);
        map
    }

    pub fn layer_count(&self) -> usize {
        self.layers.borrow().len()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.borrow().len()
    }

    pub fn interactive_marker_count(&self) -> usize {
        self.markers
            .borrow()
            .values()
            .filter(|(_, interactive)| *interactive)
            .count()
    }
}

impl MapSurface for FlatMap {
    fn latlng_to_container_point(&self, latlng: LatLng) -> Point {
        Point::new(latlng.lng, latlng.lat)
    }

    fn container_point_to_latlng(&self, point: Point) -> LatLng {
        LatLng::new(point.y, point.x)
    }

    fn latlng_to_layer_point(&self, latlng: LatLng) -> Point {
        Point::new(latlng.lng, latlng.lat)
    }

    fn layer_point_to_latlng(&self, point: Point) -> LatLng {
        LatLng::new(point.y, point.x)
    }

    fn set_gestures_enabled(&self, enabled: bool) {
        self.gestures_enabled.set(enabled);
    }

    fn set_dragging_enabled(&self, enabled: bool) {
        self.dragging_enabled.set(enabled);
    }

    fn apply_mode_classes(&self, mode: Mode) {
        self.mode_classes.borrow_mut().push(mode);
    }

    fn add_polygon_layer(&self, ring: &[LatLng]) -> LayerId {
        let id = LayerId(self.next_layer.get());
        self.next_layer.set(id.0 + 1);
        self.layers.borrow_mut().insert(id, ring.to_vec());
        id
    }

    fn redraw_polygon_layer(&self, layer: LayerId, ring: &[LatLng]) {
        self.layers.borrow_mut().insert(layer, ring.to_vec());
    }

    fn remove_polygon_layer(&self, layer: LayerId) {
        self.layers.borrow_mut().remove(&layer);
    }

    fn add_edge_marker(&self, latlng: LatLng, interactive: bool) -> MarkerId {
        let id = MarkerId(self.next_marker.get());
        self.next_marker.set(id.0 + 1);
        self.markers.borrow_mut().insert(id, (latlng, interactive));
        id
    }

    fn move_edge_marker(&self, marker: MarkerId, latlng: LatLng) {
        if let Some(entry) = self.markers.borrow_mut().get_mut(&marker) {
            entry.0 = latlng;
        }
    }

    fn remove_edge_marker(&self, marker: MarkerId) {
        self.markers.borrow_mut().remove(&marker);
    }
}

/// Records trace activity without rendering anything.
#[derive(Default)]
pub struct RecordingCanvas {
    pub segments: RefCell<Vec<(Point, Point)>>,
    pub begun: Cell<usize>,
    pub cleared: Cell<usize>,
}

impl TraceCanvas for RecordingCanvas {
    fn begin(&self) {
        self.begun.set(self.begun.get() + 1);
        self.segments.borrow_mut().clear();
    }

    fn line_segment(&self, from: Point, to: Point) {
        self.segments.borrow_mut().push((from, to));
    }

    fn clear(&self) {
        self.cleared.set(self.cleared.get() + 1);
        self.segments.borrow_mut().clear();
    }
}

#[derive(Clone, Copy)]
struct Bounds {
    min_x: i64,
    min_y: i64,
    max_x: i64,
    max_y: i64,
}

impl Bounds {
    fn of(ring: &[ClipPoint]) -> Bounds {
        let mut b = Bounds {
            min_x: i64::MAX,
            min_y: i64::MAX,
            max_x: i64::MIN,
            max_y: i64::MIN,
        };
        for p in ring {
            b.min_x = b.min_x.min(p.x);
            b.min_y = b.min_y.min(p.y);
            b.max_x = b.max_x.max(p.x);
            b.max_y = b.max_y.max(p.y);
        }
        b
    }

    fn overlaps(self, other: Bounds) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }

    fn hull(self, other: Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    fn ring(self) -> Vec<ClipPoint> {
        vec![
            ClipPoint { x: self.min_x, y: self.min_y },
            ClipPoint { x: self.min_x, y: self.max_y },
            ClipPoint { x: self.max_x, y: self.max_y },
            ClipPoint { x: self.max_x, y: self.min_y },
        ]
    }
}

/// Engine fake for axis-aligned test shapes: `simplify` echoes the ring,
/// `union` collapses bbox-overlapping groups into their hull rectangle and
/// passes lone rings through untouched (which keeps it idempotent).
pub struct RectClipper;

impl ClipperEngine for RectClipper {
    fn simplify(&self, ring: &[ClipPoint], _fill_rule: FillRule) -> Vec<Vec<ClipPoint>> {
        if ring.len() < 3 {
            vec![]
        } else {
            vec![ring.to_vec()]
        }
    }

    fn union(&self, rings: &[Vec<ClipPoint>], _fill_rule: FillRule) -> Vec<Vec<ClipPoint>> {
        let bounds: Vec<Bounds> = rings.iter().map(|r| Bounds::of(r)).collect();
        let mut visited = vec![false; rings.len()];
        let mut out = Vec::new();

        for start in 0..rings.len() {
            if visited[start] {
                continue;
            }
            visited[start] = true;
            let mut members = vec![start];
            let mut stack = vec![start];
            while let Some(i) = stack.pop() {
                for j in 0..rings.len() {
                    if !visited[j] && bounds[i].overlaps(bounds[j]) {
                        visited[j] = true;
                        members.push(j);
                        stack.push(j);
                    }
                }
            }

            if members.len() == 1 {
                out.push(rings[start].clone());
            } else {
                let hull = members
                    .iter()
                    .skip(1)
                    .fold(bounds[members[0]], |acc, &i| acc.hull(bounds[i]));
                out.push(hull.ring());
            }
        }
        out
    }
}

pub fn build_editor(options: DrawOptions) -> (Editor, Rc<FlatMap>, Rc<RecordingCanvas>) {
    let _ = env_logger::builder().is_test(true).try_init();
    let map = Rc::new(FlatMap::new());
    let canvas = Rc::new(RecordingCanvas::default());
    let editor = Editor::new(map.clone(), canvas.clone(), Rc::new(RectClipper), options);
    (editor, map, canvas)
}

/// Subscribes a recorder to each channel and returns the shared log.
pub fn record_events(editor: &mut Editor, names: &[EventName]) -> Rc<RefCell<Vec<Event>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    for &name in names {
        let sink = log.clone();
        editor.events_mut().subscribe(
            name,
            Rc::new(FnSubscriber(move |event: &Event| {
                sink.borrow_mut().push(event.clone());
                None::<Response>
            })),
        );
    }
    log
}

/// Drags out a square whose corners sit `size` pixels apart, starting at
/// `origin`. Four samples, one per corner.
pub async fn draw_square(editor: &mut Editor, origin: (f64, f64), size: f64) {
    let (x, y) = origin;
    editor.pointer_down(MouseButton::Left, Point::new(x, y));
    for (px, py) in [(x, y), (x, y + size), (x + size, y + size), (x + size, y)] {
        editor.pointer_move(Point::new(px, py));
    }
    editor.pointer_up().await.expect("pointer_up");
}
