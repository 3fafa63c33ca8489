//! Offsets command implementation
//!
//! Computes the head/tail offsets that put the bone ends at a cursor position.

use anyhow::{Context, Result};
use colored::Colorize;
use energychain_rig::cursor_offsets;
use std::process::ExitCode;

use crate::cli_args::TemplateArgs;

/// Run the offsets command
///
/// # Arguments
/// * `cursor_y` - Cursor position along Y
/// * `template` - Template box dimensions
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 if the template is degenerate
pub fn run(cursor_y: f64, template: &TemplateArgs, json_output: bool) -> Result<ExitCode> {
    let (scene, template_id) = template.build_scene()?;

    match cursor_offsets(&scene, Some(template_id), cursor_y) {
        Ok((head, tail)) => {
            if json_output {
                let output = serde_json::json!({
                    "ok": true,
                    "cursor_y": cursor_y,
                    "head_offset": head,
                    "tail_offset": tail,
                });
                println!(
                    "{}",
                    serde_json::to_string_pretty(&output).context("Failed to serialize output")?
                );
            } else {
                println!("{} {}", "Head offset:".cyan().bold(), head);
                println!("{} {}", "Tail offset:".cyan().bold(), tail);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            if json_output {
                let output = serde_json::json!({
                    "ok": false,
                    "error": { "code": e.code(), "message": e.to_string() },
                });
                println!(
                    "{}",
                    serde_json::to_string_pretty(&output).context("Failed to serialize output")?
                );
            } else {
                println!("{} [{}] {}", "FAILED".red().bold(), e.code(), e);
            }
            Ok(ExitCode::from(1))
        }
    }
}
