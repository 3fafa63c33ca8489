//! Validate command implementation
//!
//! Runs validation and planning without touching a scene.

use anyhow::{Context, Result};
use colored::Colorize;
use energychain_spec::{
    canonical_params_hash, curve, layout, validate, ChainParameters, ChainResult, GeneratorConfig,
};
use std::process::ExitCode;

use crate::cli_args::{ParamArgs, TemplateArgs};

/// Run the validate command
///
/// # Arguments
/// * `params` - Parameter file and flag overrides
/// * `template` - Template box dimensions
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(params: &ParamArgs, template: &TemplateArgs, json_output: bool) -> Result<ExitCode> {
    let chain_params = params.resolve()?;
    let config = GeneratorConfig::default();
    let params_hash =
        canonical_params_hash(&chain_params, &config).context("Failed to hash parameters")?;

    let result = check(&chain_params, &config, template);

    if json_output {
        let output = match &result {
            Ok(bone_length) => serde_json::json!({
                "ok": true,
                "params_hash": params_hash,
                "bone_length": bone_length,
            }),
            Err(e) => serde_json::json!({
                "ok": false,
                "params_hash": params_hash,
                "error": { "code": e.code(), "message": e.to_string() },
            }),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output).context("Failed to serialize output")?
        );
    } else {
        println!(
            "{} radius {}, length {}, {} link(s), template extent {}",
            "Validating:".cyan().bold(),
            chain_params.radius,
            chain_params.length,
            chain_params.link_count,
            template.template_extent
        );
        match &result {
            Ok(bone_length) => println!(
                "\n{} Parameters are valid (bone length {:.4})",
                "SUCCESS".green().bold(),
                bone_length
            ),
            Err(e) => println!("\n{} [{}] {}", "FAILED".red().bold(), e.code(), e),
        }
    }

    Ok(if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

/// Validates and plans the chain, returning the bone length.
fn check(
    params: &ChainParameters,
    config: &GeneratorConfig,
    template: &TemplateArgs,
) -> ChainResult<f64> {
    config.validate()?;
    validate(params, template.template_extent)?;
    curve::build_with_vertices(params.radius, params.length, config.circle_vertices)?;
    let chain = layout::plan(params, template.template_extent, template.template_origin_y)?;
    Ok(chain.bone_length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use energychain_spec::ChainError;
    use std::fs;

    #[test]
    fn check_accepts_reference_parameters() {
        let params = ChainParameters::new(1.0, 4.0, 3);
        let bone_length =
            check(&params, &GeneratorConfig::default(), &TemplateArgs::default()).unwrap();
        assert_eq!(bone_length, 1.0);
    }

    #[test]
    fn check_reports_first_failure() {
        let params = ChainParameters::new(1.0, 3.0, 3);
        let err = check(&params, &GeneratorConfig::default(), &TemplateArgs::default())
            .unwrap_err();
        assert!(matches!(err, ChainError::ArcTooLong { .. }));

        let params = ChainParameters::new(1.0, 4.0, 3).with_bone_offsets(0.5, -0.5);
        let err = check(&params, &GeneratorConfig::default(), &TemplateArgs::default())
            .unwrap_err();
        assert!(matches!(err, ChainError::InvalidBoneLength { .. }));
    }

    #[test]
    fn validate_params_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("params.json");
        fs::write(&path, r#"{"radius": 0.5, "length": 3.0, "link_count": 8}"#).unwrap();

        let args = ParamArgs {
            params: Some(path.to_string_lossy().into_owned()),
            ..Default::default()
        };
        assert_eq!(
            run(&args, &TemplateArgs::default(), true).unwrap(),
            ExitCode::SUCCESS
        );

        let args = ParamArgs {
            radius: Some(0.001),
            ..args
        };
        assert_eq!(
            run(&args, &TemplateArgs::default(), false).unwrap(),
            ExitCode::from(1)
        );
    }
}
