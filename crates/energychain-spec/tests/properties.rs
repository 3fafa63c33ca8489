//! Property tests for the geometry planners.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p energychain-spec --test properties
//! ```

use std::f64::consts::PI;

use energychain_spec::curve::{self, distance};
use energychain_spec::layout;
use energychain_spec::ChainError;
use proptest::prelude::*;

proptest! {
    #[test]
    fn legs_have_equal_extrusion_length(radius in 0.02f64..50.0, extra in 0.001f64..100.0) {
        let length = PI * radius + extra;
        let shape = curve::build(radius, length).unwrap();
        let expected = (length - PI * radius) / 2.0;
        let n = shape.points.len();
        let tol = 1e-9 * (1.0 + length);

        prop_assert!((distance(shape.points[0], shape.points[1]) - expected).abs() < tol);
        prop_assert!((distance(shape.points[n - 2], shape.points[n - 1]) - expected).abs() < tol);
    }

    #[test]
    fn arc_spans_half_circle(radius in 0.02f64..50.0, extra in 0.001f64..10.0) {
        let shape = curve::build(radius, PI * radius + extra).unwrap();
        let arc = shape.arc_points();
        let tol = 1e-9 * (1.0 + radius);

        for p in arc {
            prop_assert!((distance(*p, [0.0, 0.0, 0.0]) - radius).abs() < tol);
            prop_assert!(p[1] >= 0.0);
        }
        prop_assert!((distance(arc[0], arc[arc.len() - 1]) - 2.0 * radius).abs() < tol);
    }

    #[test]
    fn too_short_length_is_rejected(radius in 0.02f64..50.0, fraction in 0.0f64..=1.0) {
        let length = PI * radius * fraction;
        let is_arc_too_long = matches!(
            curve::build(radius, length),
            Err(ChainError::ArcTooLong { .. })
        );
        prop_assert!(is_arc_too_long);
    }

    #[test]
    fn layout_has_one_connected_bone_per_link(
        link_count in 1u32..200,
        extent in 0.01f64..10.0,
        origin in -100.0f64..100.0,
    ) {
        let chain = layout::compute(link_count, extent, false, 0.0, 0.0, origin).unwrap();
        prop_assert_eq!(chain.bones.len(), link_count as usize);
        prop_assert_eq!(chain.links.len(), link_count as usize);
        prop_assert!(!chain.bones[0].connected);
        for pair in chain.bones.windows(2) {
            prop_assert_eq!(pair[0].tail, pair[1].head);
            prop_assert!(pair[1].connected);
        }
    }

    #[test]
    fn bone_length_ignores_offsets_without_resize(
        extent in 0.01f64..10.0,
        head in -5.0f64..5.0,
        tail in -5.0f64..5.0,
    ) {
        let chain = layout::compute(3, extent, false, head, tail, 0.0).unwrap();
        prop_assert_eq!(chain.bone_length, extent);
    }
}
