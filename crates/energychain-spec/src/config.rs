//! Generator configuration: entity naming and primitive resolution.

use serde::{Deserialize, Serialize};

use crate::error::{ChainError, ChainResult};

/// Default vertex count of the circle primitive the arc is cut from.
pub const DEFAULT_CIRCLE_VERTICES: u32 = 32;

/// Display type of the controller empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyDisplay {
    /// Plain axes.
    PlainAxes,
    /// A single arrow.
    #[default]
    SingleArrow,
    /// A cube.
    Cube,
}

/// Configuration for a generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct GeneratorConfig {
    /// Base name of the guide curve.
    pub curve_name: String,
    /// Base name of the hook controller.
    pub controller_name: String,
    /// Base name of the armature. Link objects derive their name from it.
    pub armature_name: String,
    /// Vertex count of the circle primitive. Must be even and at least 4.
    pub circle_vertices: u32,
    /// Display type of the controller.
    pub controller_display: EmptyDisplay,
    /// Name of the hook modifier on the curve.
    pub hook_name: String,
    /// Name of the spline-IK constraint on the last bone.
    pub spline_ik_name: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            curve_name: "U_Shape".to_string(),
            controller_name: "Controller".to_string(),
            armature_name: "EnergyChainArmature".to_string(),
            circle_vertices: DEFAULT_CIRCLE_VERTICES,
            controller_display: EmptyDisplay::SingleArrow,
            hook_name: "Hook".to_string(),
            spline_ik_name: "Spline IK".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Sets the circle primitive vertex count.
    pub fn circle_vertices(mut self, count: u32) -> Self {
        self.circle_vertices = count;
        self
    }

    /// Checks that the configuration can produce a valid rig.
    pub fn validate(&self) -> ChainResult<()> {
        if self.circle_vertices < 4 || self.circle_vertices % 2 != 0 {
            return Err(ChainError::invalid_parameter(format!(
                "circle_vertices must be even and at least 4, got {}",
                self.circle_vertices
            )));
        }
        for (field, value) in [
            ("curve_name", &self.curve_name),
            ("controller_name", &self.controller_name),
            ("armature_name", &self.armature_name),
            ("hook_name", &self.hook_name),
            ("spline_ik_name", &self.spline_ik_name),
        ] {
            if value.trim().is_empty() {
                return Err(ChainError::invalid_parameter(format!(
                    "{} must not be empty",
                    field
                )));
            }
        }
        Ok(())
    }

    /// Base name for link objects: the armature name with `Armature` replaced by `Link`.
    pub fn link_base_name(armature_name: &str) -> String {
        armature_name.replace("Armature", "Link")
    }

    /// Name of bone `index` (0-based) in an armature.
    pub fn bone_name(armature_name: &str, index: usize) -> String {
        format!("{}_Bone{}", armature_name, index + 1)
    }
}
