//! Error types for parameter validation and geometry planning.

use thiserror::Error;

/// Result type for energy chain planning operations.
pub type ChainResult<T> = Result<T, ChainError>;

/// Errors that can occur while validating parameters or planning the rig.
///
/// All variants except [`ChainError::Assembly`] are raised before the host
/// scene is touched, so a failed run leaves nothing behind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChainError {
    /// A numeric parameter is outside its domain.
    #[error("Invalid parameter: {reason}")]
    InvalidParameter { reason: String },

    /// No template object was provided.
    #[error("No template object selected")]
    MissingTemplate,

    /// The template object has no positive extent along the chain axis.
    #[error("Template object has an invalid Y dimension ({extent_y})")]
    DegenerateDimension { extent_y: f64 },

    /// The requested length cannot contain the half-circle arc.
    #[error("Length must be greater than arc length ({arc_length:.3}), got {length}")]
    ArcTooLong { length: f64, arc_length: f64 },

    /// Head/tail offsets collapse or invert the bone.
    #[error("Computed bone length must be positive, got {bone_length}")]
    InvalidBoneLength { bone_length: f64 },

    /// A mid-assembly step failed after entities were already created.
    #[error("Assembly failed at {step}: {message} (entities created before this step remain in the scene)")]
    Assembly { step: String, message: String },
}

impl ChainError {
    /// Creates a new invalid parameter error.
    pub fn invalid_parameter(reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            reason: reason.into(),
        }
    }

    /// Creates a new assembly error for the given step.
    pub fn assembly(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Assembly {
            step: step.into(),
            message: message.into(),
        }
    }

    /// Returns the stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            ChainError::InvalidParameter { .. } => "CHAIN_001",
            ChainError::MissingTemplate => "CHAIN_002",
            ChainError::DegenerateDimension { .. } => "CHAIN_003",
            ChainError::ArcTooLong { .. } => "CHAIN_004",
            ChainError::InvalidBoneLength { .. } => "CHAIN_005",
            ChainError::Assembly { .. } => "CHAIN_006",
        }
    }

    /// Returns the error category.
    pub fn category(&self) -> &'static str {
        match self {
            ChainError::Assembly { .. } => "assembly",
            _ => "validation",
        }
    }

    /// Returns true if the scene may hold entities from the failed run.
    pub fn leaves_partial_state(&self) -> bool {
        matches!(self, ChainError::Assembly { .. })
    }
}
