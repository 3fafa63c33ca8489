//! Generate command implementation
//!
//! Builds a rig around a box template in an in-memory scene and reports it.

use anyhow::{Context, Result};
use colored::Colorize;
use energychain_rig::{generate, GenerationReport, RigGraph};
use energychain_spec::{canonical_params_hash, ChainParameters, GeneratorConfig};
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use crate::cli_args::{ParamArgs, TemplateArgs};

/// Run the generate command
///
/// # Arguments
/// * `params` - Parameter file and flag overrides
/// * `template` - Template box dimensions
/// * `out` - Optional path for the JSON report
/// * `json_output` - Print the JSON report instead of colored output
///
/// # Returns
/// Exit code: 0 on success, 1 if generation failed
pub fn run(
    params: &ParamArgs,
    template: &TemplateArgs,
    out: Option<&str>,
    json_output: bool,
) -> Result<ExitCode> {
    let start = Instant::now();
    let chain_params = params.resolve()?;
    let config = GeneratorConfig::default();
    let params_hash =
        canonical_params_hash(&chain_params, &config).context("Failed to hash parameters")?;

    let (mut scene, template_id) = template.build_scene()?;
    let result = generate(&mut scene, Some(template_id), &chain_params, &config);
    let report = GenerationReport::from_result(params_hash, &result, start.elapsed());

    if let Some(path) = out {
        write_report(&report, Path::new(path))?;
    }

    if json_output {
        let json = report
            .to_json_pretty()
            .context("Failed to serialize report")?;
        println!("{}", json);
    } else {
        print_summary(&chain_params, &report, out);
    }

    Ok(if report.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

/// Writes a report as pretty JSON.
pub fn write_report(report: &GenerationReport, path: &Path) -> Result<()> {
    let json = report
        .to_json_pretty()
        .context("Failed to serialize report")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write report to: {}", path.display()))?;
    Ok(())
}

fn print_summary(params: &ChainParameters, report: &GenerationReport, out: Option<&str>) {
    println!(
        "{} radius {}, length {}, {} link(s)",
        "Generating:".cyan().bold(),
        params.radius,
        params.length,
        params.link_count
    );
    println!("{} {}", "Params hash:".dimmed(), &report.params_hash[..16]);

    if let Some(rig) = &report.rig {
        print_rig(rig);
    }

    if let Some(error) = &report.error {
        println!(
            "\n{} [{}] {}",
            "FAILED".red().bold(),
            error.code,
            error.message
        );
        if error.partial_state {
            println!(
                "  {} entities created before the failure remain in the scene",
                "!".yellow()
            );
        }
    } else {
        println!(
            "\n{} Rig generated ({}ms)",
            "SUCCESS".green().bold(),
            report.duration_ms
        );
    }

    if let Some(path) = out {
        println!("{} {}", "Report:".dimmed(), path);
    }
}

fn print_rig(rig: &RigGraph) {
    println!(
        "  {} {} ({} points, {} hooked to {}, legs {:.4})",
        "curve".green(),
        rig.curve.name,
        rig.curve.points.len(),
        rig.curve.hook_points.len(),
        rig.controller.name,
        rig.curve.extrude_amount
    );
    println!(
        "  {} {} ({} bones, length {:.4})",
        "armature".green(),
        rig.armature.name,
        rig.bones.len(),
        rig.bone_length
    );
    for link in &rig.links {
        println!(
            "    {} -> {} at [{:.4}, {:.4}, {:.4}]",
            link.name, link.bone, link.location[0], link.location[1], link.location[2]
        );
    }
    println!(
        "  {} '{}' on {} (chain {}, target {})",
        "spline ik".green(),
        rig.spline_ik.name,
        rig.spline_ik.bone,
        rig.spline_ik.chain_count,
        rig.curve.name
    );
}
