//! Input parameters for one generation run.

use serde::{Deserialize, Serialize};

/// Minimum accepted arc radius (exclusive).
pub const MIN_RADIUS: f64 = 0.01;

/// Numeric and structural inputs for a single energy chain.
///
/// The defaults mirror the add-on property defaults. Note that the default
/// length is shorter than the default arc, so a caller has to pick a length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChainParameters {
    /// Radius of the half-circle arc.
    #[serde(default = "default_radius")]
    pub radius: f64,
    /// Total length of the guide curve (arc plus both legs).
    #[serde(default = "default_length")]
    pub length: f64,
    /// Number of links (and bones) in the chain.
    #[serde(default = "default_link_count")]
    pub link_count: u32,
    /// Whether `head_offset`/`tail_offset` adjust the bone length.
    #[serde(default)]
    pub change_bone_size: bool,
    /// Offset of the first bone head along Y, relative to the template start.
    #[serde(default)]
    pub head_offset: f64,
    /// Offset of the bone tail along Y, relative to the template end.
    #[serde(default)]
    pub tail_offset: f64,
}

fn default_radius() -> f64 {
    1.0
}

fn default_length() -> f64 {
    2.0
}

fn default_link_count() -> u32 {
    1
}

impl Default for ChainParameters {
    fn default() -> Self {
        Self {
            radius: default_radius(),
            length: default_length(),
            link_count: default_link_count(),
            change_bone_size: false,
            head_offset: 0.0,
            tail_offset: 0.0,
        }
    }
}

impl ChainParameters {
    /// Creates parameters with the given curve shape and link count.
    pub fn new(radius: f64, length: f64, link_count: u32) -> Self {
        Self {
            radius,
            length,
            link_count,
            ..Default::default()
        }
    }

    /// Enables bone resizing with the given head and tail offsets.
    pub fn with_bone_offsets(mut self, head_offset: f64, tail_offset: f64) -> Self {
        self.change_bone_size = true;
        self.head_offset = head_offset;
        self.tail_offset = tail_offset;
        self
    }

    /// Head offset as applied to the layout (zero unless resizing is enabled).
    pub fn effective_head_offset(&self) -> f64 {
        if self.change_bone_size {
            self.head_offset
        } else {
            0.0
        }
    }

    /// Tail offset as applied to the layout (zero unless resizing is enabled).
    pub fn effective_tail_offset(&self) -> f64 {
        if self.change_bone_size {
            self.tail_offset
        } else {
            0.0
        }
    }

    /// Parses parameters from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_from_empty_object() {
        let params = ChainParameters::from_json("{}").unwrap();
        assert_eq!(params, ChainParameters::default());
        assert_eq!(params.radius, 1.0);
        assert_eq!(params.length, 2.0);
        assert_eq!(params.link_count, 1);
        assert!(!params.change_bone_size);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result = ChainParameters::from_json(r#"{"radius": 1.0, "segments": 4}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_offsets_ignored_unless_enabled() {
        let mut params = ChainParameters::new(1.0, 5.0, 3);
        params.head_offset = -0.5;
        params.tail_offset = 0.5;
        assert_eq!(params.effective_head_offset(), 0.0);
        assert_eq!(params.effective_tail_offset(), 0.0);

        let params = ChainParameters::new(1.0, 5.0, 3).with_bone_offsets(-0.5, 0.5);
        assert_eq!(params.effective_head_offset(), -0.5);
        assert_eq!(params.effective_tail_offset(), 0.5);
    }
}
