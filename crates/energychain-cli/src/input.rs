//! Parameter loading and template construction for CLI commands.

use anyhow::{bail, Context, Result};
use energychain_rig::{MemoryScene, MeshData, ObjectId, Transform};
use energychain_spec::ChainParameters;
use std::fs;
use std::path::Path;

use crate::cli_args::{ParamArgs, TemplateArgs};

/// Name of the template object the CLI builds.
pub const TEMPLATE_NAME: &str = "ChainLink";

/// Loads chain parameters from a JSON file.
pub fn load_params(path: &Path) -> Result<ChainParameters> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read params file: {}", path.display()))?;
    ChainParameters::from_json(&json)
        .with_context(|| format!("Failed to parse params file: {}", path.display()))
}

impl ParamArgs {
    /// Resolves the final parameters: file values first, then flags.
    pub fn resolve(&self) -> Result<ChainParameters> {
        let mut params = match &self.params {
            Some(path) => load_params(Path::new(path))?,
            None => ChainParameters::default(),
        };

        if let Some(radius) = self.radius {
            params.radius = radius;
        }
        if let Some(length) = self.length {
            params.length = length;
        }
        if let Some(links) = self.links {
            params.link_count = links;
        }
        if self.change_bone_size {
            params.change_bone_size = true;
        }
        if self.no_change_bone_size {
            params.change_bone_size = false;
        }
        if let Some(head) = self.head_offset {
            params.head_offset = head;
        }
        if let Some(tail) = self.tail_offset {
            params.tail_offset = tail;
        }

        log::debug!("resolved parameters: {:?}", params);
        Ok(params)
    }
}

impl TemplateArgs {
    /// Builds a scene holding a unit-footprint box template of the requested extent.
    pub fn build_scene(&self) -> Result<(MemoryScene, ObjectId)> {
        if self.template_extent.is_nan() || self.template_extent < 0.0 {
            bail!(
                "template extent must be a non-negative number, got {}",
                self.template_extent
            );
        }
        if !self.template_origin_y.is_finite() {
            bail!(
                "template origin must be finite, got {}",
                self.template_origin_y
            );
        }

        let mut scene = MemoryScene::new();
        let template = scene
            .add_mesh(
                TEMPLATE_NAME,
                MeshData::cuboid([1.0, self.template_extent, 1.0]),
                Transform::at([0.0, self.template_origin_y, 0.0]),
            )
            .context("Failed to create template object")?;
        Ok((scene, template))
    }
}
