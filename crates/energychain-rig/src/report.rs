//! Machine-readable generation reports.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::RigError;
use crate::graph::RigGraph;

/// Current report format version.
pub const REPORT_VERSION: u32 = 1;

/// An error entry in a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportError {
    pub code: String,
    pub category: String,
    pub message: String,
    /// True if the scene may hold entities from the failed run.
    pub partial_state: bool,
}

impl From<&RigError> for ReportError {
    fn from(err: &RigError) -> Self {
        Self {
            code: err.code().to_string(),
            category: err.category().to_string(),
            message: err.to_string(),
            partial_state: err.leaves_partial_state(),
        }
    }
}

/// Result of one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub report_version: u32,
    pub ok: bool,
    /// Canonical hash of params and config.
    pub params_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rig: Option<RigGraph>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ReportError>,
    pub duration_ms: u64,
    pub generator_version: String,
}

impl GenerationReport {
    /// Builds a report from a finished run.
    pub fn from_result(
        params_hash: impl Into<String>,
        result: &Result<RigGraph, RigError>,
        duration: Duration,
    ) -> Self {
        let (rig, error) = match result {
            Ok(graph) => (Some(graph.clone()), None),
            Err(e) => (None, Some(ReportError::from(e))),
        };
        Self {
            report_version: REPORT_VERSION,
            ok: rig.is_some(),
            params_hash: params_hash.into(),
            rig,
            error,
            duration_ms: duration.as_millis() as u64,
            generator_version: format!("energychain-rig v{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Serializes the report as pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
