//! Layout configuration: spacing and sizing constants plus the canvas origin.

use crate::structure::Structure;
use serde::{Deserialize, Serialize};

// ─── Config ───────────────────────────────────────────────────────────────

/// Spacing/sizing constants consumed by the layout engine.
///
/// Every dimension must be finite and positive. Callers may hand in any
/// values (e.g. from a partially filled JSON document); the engine always
/// works on [`LayoutConfig::sanitized`], which clamps bad values back to the
/// built-in defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Parent edge → child edge distance in branching layouts.
    pub h_gap: f32,
    /// Gap between stacked siblings.
    pub v_gap: f32,
    /// Distance between ranks in org-chart layouts.
    pub level_gap: f32,
    pub node_width: f32,
    pub node_height: f32,
    pub root_width: f32,
    pub root_height: f32,
    /// Canvas origin. The root is centred here unless it is pinned.
    pub center_x: f32,
    pub center_y: f32,
    /// Level assigned to the layout root. Non-zero when laying out a
    /// floating topic grafted onto the canvas.
    pub base_level: u32,
    /// Deepest nesting the engine will follow before giving up.
    pub max_depth: usize,
    /// Structure used when neither the caller nor any ancestor names one.
    pub default_structure: Structure,
    pub fishbone: FishboneConfig,
    pub timeline: TimelineConfig,
}

/// Fishbone (Ishikawa) geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FishboneConfig {
    /// Horizontal distance between consecutive ribs along the spine.
    pub spine_step: f32,
    /// Vertical distance from the spine to a main rib.
    pub rib_offset: f32,
    /// Diagonal step for the first level of sub-ribs.
    pub sub_spacing: f32,
    /// Multiplier applied to `sub_spacing` per additional depth level.
    pub decay: f32,
}

/// Timeline geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Distance between consecutive items along the line.
    pub item_spacing: f32,
    /// Distance of an item from the line.
    pub item_offset: f32,
    /// Step between an item's own children.
    pub sub_spacing: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            h_gap: 40.0,
            v_gap: 16.0,
            level_gap: 60.0,
            node_width: 120.0,
            node_height: 40.0,
            root_width: 160.0,
            root_height: 56.0,
            center_x: 0.0,
            center_y: 0.0,
            base_level: 0,
            max_depth: 512,
            default_structure: Structure::default(),
            fishbone: FishboneConfig::default(),
            timeline: TimelineConfig::default(),
        }
    }
}

impl Default for FishboneConfig {
    fn default() -> Self {
        Self {
            spine_step: 140.0,
            rib_offset: 80.0,
            sub_spacing: 60.0,
            decay: 0.75,
        }
    }
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            item_spacing: 180.0,
            item_offset: 80.0,
            sub_spacing: 50.0,
        }
    }
}

// ─── Sanitizing ───────────────────────────────────────────────────────────

/// Replace `value` with `fallback` unless it is finite and positive.
fn clamp_positive(name: &str, value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        log::warn!("layout config `{name}` = {value} is not positive, using {fallback}");
        fallback
    }
}

/// Gaps may legitimately be zero; only negatives and NaN are rejected.
fn clamp_gap(name: &str, value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        log::warn!("layout config `{name}` = {value} is invalid, using {fallback}");
        fallback
    }
}

impl LayoutConfig {
    /// A copy with every invalid dimension clamped to its default.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let d = Self::default();
        let fd = FishboneConfig::default();
        let td = TimelineConfig::default();
        Self {
            h_gap: clamp_gap("h_gap", self.h_gap, d.h_gap),
            v_gap: clamp_gap("v_gap", self.v_gap, d.v_gap),
            level_gap: clamp_gap("level_gap", self.level_gap, d.level_gap),
            node_width: clamp_positive("node_width", self.node_width, d.node_width),
            node_height: clamp_positive("node_height", self.node_height, d.node_height),
            root_width: clamp_positive("root_width", self.root_width, d.root_width),
            root_height: clamp_positive("root_height", self.root_height, d.root_height),
            center_x: if self.center_x.is_finite() {
                self.center_x
            } else {
                d.center_x
            },
            center_y: if self.center_y.is_finite() {
                self.center_y
            } else {
                d.center_y
            },
            base_level: self.base_level,
            max_depth: if self.max_depth == 0 {
                d.max_depth
            } else {
                self.max_depth
            },
            default_structure: self.default_structure,
            fishbone: FishboneConfig {
                spine_step: clamp_positive(
                    "fishbone.spine_step",
                    self.fishbone.spine_step,
                    fd.spine_step,
                ),
                rib_offset: clamp_positive(
                    "fishbone.rib_offset",
                    self.fishbone.rib_offset,
                    fd.rib_offset,
                ),
                sub_spacing: clamp_positive(
                    "fishbone.sub_spacing",
                    self.fishbone.sub_spacing,
                    fd.sub_spacing,
                ),
                decay: clamp_positive(
                    "fishbone.decay",
                    self.fishbone.decay,
                    fd.decay,
                ),
            },
            timeline: TimelineConfig {
                item_spacing: clamp_positive(
                    "timeline.item_spacing",
                    self.timeline.item_spacing,
                    td.item_spacing,
                ),
                item_offset: clamp_positive(
                    "timeline.item_offset",
                    self.timeline.item_offset,
                    td.item_offset,
                ),
                sub_spacing: clamp_positive(
                    "timeline.sub_spacing",
                    self.timeline.sub_spacing,
                    td.sub_spacing,
                ),
            },
        }
    }

    /// Same constants, centred on another origin one level deeper.
    /// Used when laying out floating topics.
    #[must_use]
    pub fn grafted(&self, center_x: f32, center_y: f32) -> Self {
        Self {
            center_x,
            center_y,
            base_level: self.base_level + 1,
            ..self.clone()
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
