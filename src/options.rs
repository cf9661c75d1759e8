//! Editor options: defaults, TOML loading, validation.
//!
//! Options are plain data with sensible defaults; hosts can construct them
//! directly or load them from a TOML fragment. Invalid numeric values are
//! clamped to their valid range with a logged warning rather than rejected.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::geometry::clip::FillRule;

/// How the merge engine chases overlap chains.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "kebab-case")]
pub enum MergeStrategy {
    /// Two full union passes. One pass can leave artifacts when three or
    /// more shapes overlap in a chain; the second pass over the already
    /// merged set catches the remainder.
    TwoPass,
    /// Repeat union passes until the ring set stops changing, bounded by
    /// `max_iterations`.
    FixedPoint { max_iterations: usize },
}

impl Default for MergeStrategy {
    fn default() -> Self {
        MergeStrategy::TwoPass
    }
}

/// Behavior options for one drawing surface.
///
/// # Example TOML
/// ```toml
/// merge_polygons = true
/// notify_after_edit_exit = false
/// create_exit_mode = true
/// multiple_polygons = true
/// clean_tolerance = 1.1
/// clip_scale = 1000000.0
/// fill_rule = "non-zero"
///
/// [merge]
/// strategy = "fixed-point"
/// max_iterations = 4
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawOptions {
    /// Merge overlapping polygons after create and edit commits.
    pub merge_polygons: bool,
    /// Defer boundary notifications from edit commits until EDIT mode is
    /// exited, collapsing a run of edits into one notification.
    pub notify_after_edit_exit: bool,
    /// Leave CREATE mode automatically once a polygon is committed.
    pub create_exit_mode: bool,
    /// Allow more than one polygon on the surface. When false, new creation
    /// gestures are refused while a polygon exists.
    pub multiple_polygons: bool,
    /// Pixel distance under which neighbouring vertices collapse into one.
    pub clean_tolerance: f64,
    /// Integer units per pixel in clip space.
    pub clip_scale: f64,
    /// Fill rule handed to the clipping engine.
    pub fill_rule: FillRule,
    /// Merge pass strategy.
    pub merge: MergeStrategy,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            merge_polygons: true,
            notify_after_edit_exit: false,
            create_exit_mode: true,
            multiple_polygons: true,
            clean_tolerance: 1.1,
            clip_scale: 1_000_000.0,
            fill_rule: FillRule::default(),
            merge: MergeStrategy::default(),
        }
    }
}

impl DrawOptions {
    /// Parses options from a TOML string and clamps out-of-range values.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let mut options: DrawOptions =
            toml::from_str(raw).context("Failed to parse draw options")?;
        options.validate_and_clamp();
        Ok(options)
    }

    /// Loads options from a TOML file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read draw options from {}", path.display()))?;
        Self::from_toml_str(&raw)
    }

    /// Clamps numeric fields to acceptable ranges, warning on each fix.
    ///
    /// Validated ranges:
    /// - `clean_tolerance`: 0.0 - 100.0 pixels
    /// - `clip_scale`: at least 10_000 units per pixel
    /// - `merge.max_iterations`: 1 - 16
    pub(crate) fn validate_and_clamp(&mut self) {
        if !(0.0..=100.0).contains(&self.clean_tolerance) || !self.clean_tolerance.is_finite() {
            log::warn!(
                "Invalid clean_tolerance {:.2}, clamping to 0.0-100.0 range",
                self.clean_tolerance
            );
            self.clean_tolerance = if self.clean_tolerance.is_finite() {
                self.clean_tolerance.clamp(0.0, 100.0)
            } else {
                1.1
            };
        }

        if !self.clip_scale.is_finite() || self.clip_scale < 10_000.0 {
            log::warn!(
                "Invalid clip_scale {:.0}, raising to the 10000 minimum",
                self.clip_scale
            );
            self.clip_scale = if self.clip_scale.is_finite() {
                self.clip_scale.max(10_000.0)
            } else {
                1_000_000.0
            };
        }

        if let MergeStrategy::FixedPoint { max_iterations } = &mut self.merge {
            if !(1..=16).contains(max_iterations) {
                log::warn!(
                    "Invalid merge max_iterations {}, clamping to 1-16 range",
                    max_iterations
                );
                *max_iterations = (*max_iterations).clamp(1, 16);
            }
        }
    }
}
