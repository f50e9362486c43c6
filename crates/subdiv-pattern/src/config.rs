//! Pattern configuration types.

use serde::{Deserialize, Serialize};

/// How line positions are spaced along an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SpacingMode {
    /// Fixed distance between consecutive lines.
    #[default]
    Absolute,
    /// Fixed number of divisions across the extent.
    Quantity,
}

/// The subdivision topology to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SubdivisionMode {
    /// Lines of constant V spanning the full U range.
    #[default]
    Horizontal,
    /// Lines of constant U spanning the full V range.
    Vertical,
    /// Both a vertical and a horizontal line set.
    Crosshatch,
    /// Parallel lines at an angle, optionally with a mirrored second family.
    DiagonalHerringbone,
    /// A grid of square cells with alternating rows or columns shifted.
    StaggeredGrid,
}

/// How the first line is anchored within the extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AlignmentMode {
    /// First line at the extent minimum plus the start offset.
    #[default]
    EdgeToEdge,
    /// Lines placed symmetrically about the extent center.
    CenterOutward,
}

/// Which grid axis receives the stagger shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StaggerDirection {
    /// Odd rows shift along U.
    #[default]
    Horizontal,
    /// Odd columns shift along V.
    Vertical,
}

/// The full parameter set for one generation call.
///
/// All fields are plain values; the engine treats the config as immutable
/// for the duration of a call. Hosts that edit parameters interactively
/// own the mutable record and re-invoke generation explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// Absolute spacing or quantity divisions.
    pub spacing_mode: SpacingMode,
    /// Which pattern topology to generate.
    pub subdivision_mode: SubdivisionMode,
    /// Edge-aligned or center-outward placement.
    pub alignment_mode: AlignmentMode,
    /// Primary spacing in mm (Absolute mode; also the staggered cell size).
    pub primary_spacing: f64,
    /// Division count (Quantity mode).
    pub divisions: u32,
    /// Offset of the first line from the extent minimum (edge alignment).
    pub start_offset: f64,
    /// Rotation of the whole pattern about the frame normal, in degrees.
    pub rotation_deg: f64,
    /// Crosshatch spacing for the vertical (constant-U) line set.
    pub horizontal_spacing: f64,
    /// Crosshatch spacing for the horizontal (constant-V) line set.
    pub vertical_spacing: f64,
    /// When set, crosshatch uses `primary_spacing` for both sets.
    pub linked_spacing: bool,
    /// Diagonal family angle from the U axis, in degrees.
    pub diagonal_angle_deg: f64,
    /// Enable the second diagonal family.
    pub use_alternate_angle: bool,
    /// Second diagonal family angle, in degrees.
    pub alternate_angle_deg: f64,
    /// Shift applied to alternating rows/columns of the staggered grid.
    pub stagger_offset: f64,
    /// Which axis the stagger shift applies to.
    pub stagger_direction: StaggerDirection,
    /// Ordered spacing steps for the irregular repeating pattern.
    pub pattern_sequence: Vec<f64>,
    /// Enable the pattern sequence (supersedes the spacing resolver).
    pub use_pattern_sequence: bool,
    /// Number of full sequence cycles before expansion stops.
    pub pattern_repeat: u32,
    /// Mirror the result about the centroid along U.
    pub flip_horizontal: bool,
    /// Mirror the result about the centroid along V.
    pub flip_vertical: bool,
    /// Enable clipping against an offset boundary.
    pub use_clip_offset: bool,
    /// Clip offset distance; positive insets the boundary.
    pub clip_offset: f64,
    /// Fuse the resulting wires into chained polylines.
    pub fuse: bool,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            spacing_mode: SpacingMode::Absolute,
            subdivision_mode: SubdivisionMode::Horizontal,
            alignment_mode: AlignmentMode::EdgeToEdge,
            primary_spacing: 500.0,
            divisions: 10,
            start_offset: 0.0,
            rotation_deg: 0.0,
            horizontal_spacing: 50.0,
            vertical_spacing: 50.0,
            linked_spacing: true,
            diagonal_angle_deg: 45.0,
            use_alternate_angle: false,
            alternate_angle_deg: -45.0,
            stagger_offset: 2.0,
            stagger_direction: StaggerDirection::Horizontal,
            pattern_sequence: Vec::new(),
            use_pattern_sequence: false,
            pattern_repeat: 1,
            flip_horizontal: false,
            flip_vertical: false,
            use_clip_offset: false,
            clip_offset: 0.0,
            fuse: false,
        }
    }
}

impl PatternConfig {
    /// The crosshatch spacing pair, honoring the linked-spacing flag.
    pub fn crosshatch_spacings(&self) -> (f64, f64) {
        if self.linked_spacing {
            (self.primary_spacing, self.primary_spacing)
        } else {
            (self.horizontal_spacing, self.vertical_spacing)
        }
    }

    /// The sanitized pattern sequence: absolute values, when enabled.
    ///
    /// Sequence magnitudes are taken at the config boundary so that a
    /// negative entry cannot walk the cursor backwards forever.
    pub fn effective_sequence(&self) -> Vec<f64> {
        if !self.use_pattern_sequence {
            return Vec::new();
        }
        self.pattern_sequence.iter().map(|s| s.abs()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_host_property_defaults() {
        let cfg = PatternConfig::default();
        assert_eq!(cfg.spacing_mode, SpacingMode::Absolute);
        assert_eq!(cfg.subdivision_mode, SubdivisionMode::Horizontal);
        assert_eq!(cfg.alignment_mode, AlignmentMode::EdgeToEdge);
        assert_eq!(cfg.primary_spacing, 500.0);
        assert_eq!(cfg.divisions, 10);
        assert_eq!(cfg.horizontal_spacing, 50.0);
        assert_eq!(cfg.vertical_spacing, 50.0);
        assert!(cfg.linked_spacing);
        assert_eq!(cfg.diagonal_angle_deg, 45.0);
        assert_eq!(cfg.alternate_angle_deg, -45.0);
        assert_eq!(cfg.stagger_offset, 2.0);
        assert_eq!(cfg.pattern_repeat, 1);
        assert!(!cfg.fuse);
    }

    #[test]
    fn test_linked_spacing_substitution() {
        let mut cfg = PatternConfig {
            primary_spacing: 75.0,
            horizontal_spacing: 10.0,
            vertical_spacing: 20.0,
            ..Default::default()
        };
        assert_eq!(cfg.crosshatch_spacings(), (75.0, 75.0));
        cfg.linked_spacing = false;
        assert_eq!(cfg.crosshatch_spacings(), (10.0, 20.0));
    }

    #[test]
    fn test_config_json_round_trip() {
        let cfg = PatternConfig {
            spacing_mode: SpacingMode::Quantity,
            subdivision_mode: SubdivisionMode::DiagonalHerringbone,
            divisions: 7,
            rotation_deg: 15.0,
            pattern_sequence: vec![50.0, 25.0],
            use_pattern_sequence: true,
            fuse: true,
            ..Default::default()
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: PatternConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn test_partial_json_fills_in_defaults() {
        // Hosts may send only the fields they set
        let cfg: PatternConfig = serde_json::from_str(
            r#"{"subdivision_mode": "Crosshatch", "primary_spacing": 50.0}"#,
        )
        .unwrap();
        assert_eq!(cfg.subdivision_mode, SubdivisionMode::Crosshatch);
        assert_eq!(cfg.primary_spacing, 50.0);
        assert_eq!(cfg.spacing_mode, SpacingMode::Absolute);
        assert_eq!(cfg.alignment_mode, AlignmentMode::EdgeToEdge);
        assert_eq!(cfg.divisions, 10);
        assert!(cfg.linked_spacing);
        assert!(!cfg.use_pattern_sequence);
        assert!(!cfg.fuse);
    }

    #[test]
    fn test_effective_sequence_gated_and_absolute() {
        let mut cfg = PatternConfig {
            pattern_sequence: vec![50.0, -25.0],
            ..Default::default()
        };
        assert!(cfg.effective_sequence().is_empty());
        cfg.use_pattern_sequence = true;
        assert_eq!(cfg.effective_sequence(), vec![50.0, 25.0]);
    }
}
