//! CLI argument definitions for the `energychain` binary.
//!
//! All `#[derive(Parser)]`, `#[derive(Subcommand)]` and `#[derive(Args)]`
//! types live here, keeping `main.rs` focused on dispatch.

use clap::{Args, Parser, Subcommand};

/// Energy chain rig generator
#[derive(Parser, Debug)]
#[command(name = "energychain")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG still applies)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a rig around a box template and print a summary
    Generate {
        #[command(flatten)]
        params: ParamArgs,

        #[command(flatten)]
        template: TemplateArgs,

        /// Write the generation report to this path
        #[arg(short, long)]
        out: Option<String>,

        /// Print the JSON report instead of colored output
        #[arg(long)]
        json: bool,
    },

    /// Compute head and tail offsets that put the bone ends at a cursor
    Offsets {
        /// Cursor position along Y
        #[arg(long, allow_hyphen_values = true)]
        cursor_y: f64,

        #[command(flatten)]
        template: TemplateArgs,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Check parameters against a template extent without building anything
    Validate {
        #[command(flatten)]
        params: ParamArgs,

        #[command(flatten)]
        template: TemplateArgs,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },
}

/// Chain parameters: an optional JSON file, overridden by individual flags.
#[derive(Args, Debug, Clone, Default)]
pub struct ParamArgs {
    /// Path to a JSON parameters file
    #[arg(short, long)]
    pub params: Option<String>,

    /// Half-circle radius
    #[arg(long)]
    pub radius: Option<f64>,

    /// Total curve length (arc plus both legs)
    #[arg(long)]
    pub length: Option<f64>,

    /// Number of links
    #[arg(long)]
    pub links: Option<u32>,

    /// Apply head/tail offsets to the bone length
    #[arg(long)]
    pub change_bone_size: bool,

    /// Ignore head/tail offsets, even if the params file enables them
    #[arg(long, conflicts_with = "change_bone_size")]
    pub no_change_bone_size: bool,

    /// Head offset along Y
    #[arg(long, allow_hyphen_values = true)]
    pub head_offset: Option<f64>,

    /// Tail offset along Y
    #[arg(long, allow_hyphen_values = true)]
    pub tail_offset: Option<f64>,
}

/// The box template the chain is built from.
#[derive(Args, Debug, Clone)]
pub struct TemplateArgs {
    /// Template size along Y
    #[arg(long, default_value_t = 1.0)]
    pub template_extent: f64,

    /// Template origin along Y
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub template_origin_y: f64,
}

impl Default for TemplateArgs {
    fn default() -> Self {
        Self {
            template_extent: 1.0,
            template_origin_y: 0.0,
        }
    }
}
