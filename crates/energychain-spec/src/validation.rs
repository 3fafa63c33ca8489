//! Parameter validation.
//!
//! Runs before any scene mutation. A failure here means the run is aborted
//! with zero side effects.

use crate::error::{ChainError, ChainResult};
use crate::params::{ChainParameters, MIN_RADIUS};

/// Validates generation parameters against the template's extent along Y.
///
/// # Arguments
/// * `params` - The chain parameters
/// * `source_extent_y` - The template object's world-space extent along Y
///
/// # Example
/// ```
/// use energychain_spec::{validate, ChainParameters};
///
/// let params = ChainParameters::new(1.0, 5.0, 3);
/// assert!(validate(&params, 1.0).is_ok());
/// assert!(validate(&params, 0.0).is_err());
/// ```
pub fn validate(params: &ChainParameters, source_extent_y: f64) -> ChainResult<()> {
    if !params.radius.is_finite() || params.radius <= MIN_RADIUS {
        return Err(ChainError::invalid_parameter(format!(
            "radius must be greater than {}, got {}",
            MIN_RADIUS, params.radius
        )));
    }

    if !params.length.is_finite() || params.length < 0.0 {
        return Err(ChainError::invalid_parameter(format!(
            "length must be non-negative, got {}",
            params.length
        )));
    }

    if params.link_count < 1 {
        return Err(ChainError::invalid_parameter(format!(
            "link_count must be at least 1, got {}",
            params.link_count
        )));
    }

    if !source_extent_y.is_finite() || source_extent_y <= 0.0 {
        return Err(ChainError::DegenerateDimension {
            extent_y: source_extent_y,
        });
    }

    if params.change_bone_size {
        for (name, value) in [
            ("head_offset", params.head_offset),
            ("tail_offset", params.tail_offset),
        ] {
            if !value.is_finite() {
                return Err(ChainError::invalid_parameter(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }

        let bone_length = source_extent_y + params.tail_offset - params.head_offset;
        if bone_length <= 0.0 {
            return Err(ChainError::InvalidBoneLength { bone_length });
        }
    }

    Ok(())
}
