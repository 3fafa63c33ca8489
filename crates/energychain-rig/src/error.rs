//! Error types for host scene access and rig generation.

use energychain_spec::ChainError;
use thiserror::Error;

use crate::scene::{EditMode, ObjectId};

/// Result type for host scene operations.
pub type HostResult<T> = Result<T, HostError>;

/// Result type for rig generation.
pub type RigResult<T> = Result<T, RigError>;

/// Errors reported by a [`HostScene`](crate::scene::HostScene).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HostError {
    /// No object with this id.
    #[error("Object {id} not found")]
    ObjectNotFound { id: ObjectId },

    /// No object with this name.
    #[error("Object '{name}' not found")]
    NameNotFound { name: String },

    /// An object with this name already exists.
    #[error("Object name '{name}' is already taken")]
    NameTaken { name: String },

    /// The object is not of the kind the operation needs.
    #[error("Object '{name}' is not {expected}")]
    WrongKind { name: String, expected: &'static str },

    /// An editing context is already open.
    #[error("Cannot enter a new editing context while {mode:?} on {target} is open")]
    ContextAlreadyOpen { target: ObjectId, mode: EditMode },

    /// `exit_mode` was called without an open context.
    #[error("No editing context is open")]
    NoActiveContext,

    /// The operation needs a different editing context.
    #[error("'{operation}' requires {required}")]
    WrongContext {
        operation: &'static str,
        required: String,
    },

    /// The object does not support this editing mode.
    #[error("Object '{name}' does not support {mode:?} mode")]
    UnsupportedMode { name: String, mode: EditMode },

    /// No bone with this name in the armature.
    #[error("Bone '{bone}' not found in armature '{armature}'")]
    BoneNotFound { armature: String, bone: String },

    /// A bone with this name already exists in the armature.
    #[error("Bone '{bone}' already exists in armature '{armature}'")]
    BoneExists { armature: String, bone: String },

    /// A curve point index is out of range.
    #[error("Point index {index} out of range for curve '{curve}' with {len} points")]
    PointOutOfRange {
        curve: String,
        index: usize,
        len: usize,
    },

    /// The parent relation would form a cycle.
    #[error("Parenting '{child}' would create a cycle")]
    ParentCycle { child: String },
}

impl HostError {
    /// Returns the stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            HostError::ObjectNotFound { .. } => "HOST_001",
            HostError::NameNotFound { .. } => "HOST_002",
            HostError::NameTaken { .. } => "HOST_003",
            HostError::WrongKind { .. } => "HOST_004",
            HostError::ContextAlreadyOpen { .. } => "HOST_005",
            HostError::NoActiveContext => "HOST_006",
            HostError::WrongContext { .. } => "HOST_007",
            HostError::UnsupportedMode { .. } => "HOST_008",
            HostError::BoneNotFound { .. } => "HOST_009",
            HostError::BoneExists { .. } => "HOST_010",
            HostError::PointOutOfRange { .. } => "HOST_011",
            HostError::ParentCycle { .. } => "HOST_012",
        }
    }

    pub(crate) fn wrong_context(operation: &'static str, required: impl Into<String>) -> Self {
        Self::WrongContext {
            operation,
            required: required.into(),
        }
    }
}

/// Errors from the generation pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RigError {
    /// Validation, planning, or assembly failure.
    #[error(transparent)]
    Chain(#[from] ChainError),

    /// Host failure before any scene mutation (e.g. template lookup).
    #[error(transparent)]
    Host(#[from] HostError),
}

impl RigError {
    /// Returns the stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            RigError::Chain(e) => e.code(),
            RigError::Host(e) => e.code(),
        }
    }

    /// Returns the error category.
    pub fn category(&self) -> &'static str {
        match self {
            RigError::Chain(e) => e.category(),
            RigError::Host(_) => "host",
        }
    }

    /// Returns true if entities from the failed run may remain in the scene.
    pub fn leaves_partial_state(&self) -> bool {
        match self {
            RigError::Chain(e) => e.leaves_partial_state(),
            RigError::Host(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HostError::ContextAlreadyOpen {
            target: ObjectId(3),
            mode: EditMode::Edit,
        };
        assert!(err.to_string().contains("#3"));

        let err = HostError::wrong_context("add_bone", "Edit mode on 'Arm'");
        assert_eq!(err.to_string(), "'add_bone' requires Edit mode on 'Arm'");
    }

    #[test]
    fn test_rig_error_delegates() {
        let err: RigError = ChainError::MissingTemplate.into();
        assert_eq!(err.code(), "CHAIN_002");
        assert!(!err.leaves_partial_state());

        let err: RigError = ChainError::assembly("hierarchy", "boom").into();
        assert!(err.leaves_partial_state());

        let err: RigError = HostError::NoActiveContext.into();
        assert_eq!(err.category(), "host");
    }
}
