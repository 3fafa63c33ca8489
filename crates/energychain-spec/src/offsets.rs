//! Cursor-based bone offset pickers.
//!
//! Given a cursor position along Y and the template's origin and extent, these
//! compute the head/tail offsets that put the bone end at the cursor.

use crate::error::{ChainError, ChainResult};

/// Offsets are written back with four decimal places.
fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

fn check_extent(extent_y: f64) -> ChainResult<()> {
    if !extent_y.is_finite() || extent_y <= 0.0 {
        return Err(ChainError::DegenerateDimension { extent_y });
    }
    Ok(())
}

/// Head offset placing the first bone head at `cursor_y`.
///
/// `head_offset = cursor_y - (origin_y - extent_y / 2)`
pub fn head_offset_from_cursor(cursor_y: f64, origin_y: f64, extent_y: f64) -> ChainResult<f64> {
    check_extent(extent_y)?;
    Ok(round4(cursor_y - (origin_y - extent_y / 2.0)))
}

/// Tail offset placing the bone tail at `cursor_y`.
///
/// `tail_offset = cursor_y - (origin_y + extent_y / 2)`
pub fn tail_offset_from_cursor(cursor_y: f64, origin_y: f64, extent_y: f64) -> ChainResult<f64> {
    check_extent(extent_y)?;
    Ok(round4(cursor_y - (origin_y + extent_y / 2.0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_offset() {
        assert_eq!(head_offset_from_cursor(-0.25, 0.0, 1.0).unwrap(), 0.25);
        assert_eq!(head_offset_from_cursor(1.0, 2.0, 2.0).unwrap(), 0.0);
    }

    #[test]
    fn test_tail_offset() {
        assert_eq!(tail_offset_from_cursor(0.75, 0.0, 1.0).unwrap(), 0.25);
        assert_eq!(tail_offset_from_cursor(0.0, 0.0, 1.0).unwrap(), -0.5);
    }

    #[test]
    fn test_rounding() {
        assert_eq!(head_offset_from_cursor(0.123456, 0.0, 2.0).unwrap(), 1.1235);
    }

    #[test]
    fn test_degenerate_extent() {
        assert!(matches!(
            tail_offset_from_cursor(0.0, 0.0, 0.0),
            Err(ChainError::DegenerateDimension { .. })
        ));
    }
}
