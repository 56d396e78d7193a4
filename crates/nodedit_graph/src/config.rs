// SPDX-License-Identifier: MIT OR Apache-2.0
//! Editor configuration.
//!
//! Visual constants and the template used by the "New" context-menu entry.
//! Stored as RON; every field is optional in the file and falls back to its
//! default.

use egui::{pos2, vec2, Color32, Rect};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "nodedit.ron";

/// Smallest accepted grid cell, in pixels
pub const MIN_GRID_SIZE: f32 = 2.0;

/// Smallest accepted slot marker and hit area side, in pixels
pub const MIN_SLOT_SIZE: f32 = 1.0;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid RON for this structure
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Serializing failed
    #[error("Serialization error: {0}")]
    Serialize(#[from] ron::Error),
}

impl ConfigError {
    /// The configuration file does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Template for nodes created from the context menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeTemplate {
    /// Display name
    pub name: String,
    /// Graph-space position of the top-left corner
    pub position: [f32; 2],
    /// Width and height
    pub size: [f32; 2],
    /// RGBA color
    pub color: [u8; 4],
    /// Number of input slots
    pub input_count: usize,
    /// Number of output slots
    pub output_count: usize,
}

impl NodeTemplate {
    /// Graph-space bounds of a node created from this template
    pub fn bounds(&self) -> Rect {
        Rect::from_min_size(
            pos2(self.position[0], self.position[1]),
            vec2(self.size[0], self.size[1]),
        )
    }
}

impl Default for NodeTemplate {
    fn default() -> Self {
        Self {
            name: "New".to_string(),
            position: [400.0, 260.0],
            size: [180.0, 220.0],
            color: [255, 255, 255, 255],
            input_count: 1,
            output_count: 2,
        }
    }
}

/// Editor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Grid cell size in pixels
    pub grid_size: f32,
    /// Grid line color
    pub grid_color: [u8; 4],
    /// Whether the grid is shown at startup
    pub show_grid: bool,
    /// Side of the square slot marker and hit area
    pub slot_size: f32,
    /// Slot marker color
    pub slot_color: [u8; 4],
    /// Link curve color
    pub link_color: [u8; 4],
    /// Link curve thickness
    pub link_thickness: f32,
    /// Horizontal reach of the curve tangents
    pub curve_tangent: f32,
    /// Outline color of the selected node
    pub selection_color: [u8; 4],
    /// Template for the "New" context-menu entry
    pub new_node: NodeTemplate,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_size: 32.0,
            grid_color: [50, 50, 50, 255],
            show_grid: true,
            slot_size: 8.0,
            slot_color: [100, 100, 100, 255],
            link_color: [100, 100, 100, 255],
            link_thickness: 1.0,
            curve_tangent: 50.0,
            selection_color: [255, 200, 0, 255],
            new_node: NodeTemplate::default(),
        }
    }
}

impl EditorConfig {
    /// Parse from a RON string. Out-of-range values are clamped.
    pub fn from_ron(s: &str) -> Result<Self, ConfigError> {
        let mut config: Self = ron::from_str(s)?;
        config.clamp();
        Ok(config)
    }

    /// Pull sizes that would stall or disable the editor back into range.
    /// Returns true if anything was changed.
    pub fn clamp(&mut self) -> bool {
        let mut changed = false;

        if self.grid_size.is_nan() || self.grid_size < MIN_GRID_SIZE {
            tracing::warn!(grid_size = self.grid_size, min = MIN_GRID_SIZE, "Grid size out of range, clamping");
            self.grid_size = MIN_GRID_SIZE;
            changed = true;
        }

        if self.slot_size.is_nan() || self.slot_size < MIN_SLOT_SIZE {
            tracing::warn!(slot_size = self.slot_size, min = MIN_SLOT_SIZE, "Slot size out of range, clamping");
            self.slot_size = MIN_SLOT_SIZE;
            changed = true;
        }

        changed
    }

    /// Serialize to a pretty RON string
    pub fn to_ron(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    /// Load from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_ron(&content)
    }

    /// Grid line color
    pub fn grid_color32(&self) -> Color32 {
        to_color32(self.grid_color)
    }

    /// Slot marker color
    pub fn slot_color32(&self) -> Color32 {
        to_color32(self.slot_color)
    }

    /// Link curve color
    pub fn link_color32(&self) -> Color32 {
        to_color32(self.link_color)
    }

    /// Selection outline color
    pub fn selection_color32(&self) -> Color32 {
        to_color32(self.selection_color)
    }
}

fn to_color32([r, g, b, a]: [u8; 4]) -> Color32 {
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EditorConfig::default();
        assert_eq!(config.grid_size, 32.0);
        assert!(config.show_grid);
        assert_eq!(config.new_node.name, "New");
        assert_eq!(
            config.new_node.bounds(),
            Rect::from_min_size(pos2(400.0, 260.0), vec2(180.0, 220.0))
        );
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = EditorConfig::from_ron("(grid_size: 16.0, new_node: (name: \"Blank\"))")
            .expect("valid config");
        assert_eq!(config.grid_size, 16.0);
        assert_eq!(config.slot_size, 8.0);
        assert_eq!(config.new_node.name, "Blank");
        assert_eq!(config.new_node.output_count, 2);
    }

    #[test]
    fn test_serialization() {
        let mut config = EditorConfig::default();
        config.curve_tangent = 80.0;
        let ron_str = config.to_ron().unwrap();
        let loaded = EditorConfig::from_ron(&ron_str).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_parse_error() {
        let err = EditorConfig::from_ron("(grid_size: \"wide\")").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_out_of_range_sizes_are_clamped() {
        let config = EditorConfig::from_ron("(grid_size: 0.000001, slot_size: -3.0)").expect("valid config");
        assert_eq!(config.grid_size, MIN_GRID_SIZE);
        assert_eq!(config.slot_size, MIN_SLOT_SIZE);

        let mut config = EditorConfig::default();
        assert!(!config.clamp());
        config.grid_size = f32::NAN;
        assert!(config.clamp());
        assert_eq!(config.grid_size, MIN_GRID_SIZE);
    }

    #[test]
    fn test_missing_file() {
        let err = EditorConfig::load("/nonexistent/nodedit.ron").unwrap_err();
        assert!(err.is_not_found());
    }
}
