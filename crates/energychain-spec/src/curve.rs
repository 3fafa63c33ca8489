//! U-shaped guide curve construction.
//!
//! The curve is cut from a circle primitive lying in the YZ plane: the half
//! with `y >= 0` is kept, its two extreme vertices along Z become the free
//! ends, and each end is extruded along -Y so the two legs run parallel.
//!
//! ```text
//!            arc (y >= 0)
//!          .-'''''''-.
//!        /             \
//!   z=-r |             | z=+r
//!        |             |      legs along -Y,
//!        |             |      (length - pi*r) / 2 each
//!        *             *      <- fixed anchors
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_CIRCLE_VERTICES;
use crate::error::{ChainError, ChainResult};

/// A point in world space.
pub type Point3 = [f64; 3];

/// Coordinates closer to zero than `SNAP_EPSILON * radius` are snapped to zero.
const SNAP_EPSILON: f64 = 1e-9;

/// Length of the half-circle arc for a given radius.
pub fn arc_length(radius: f64) -> f64 {
    PI * radius
}

/// The U-shaped guide polyline.
///
/// `points[0]` and `points[len - 1]` are the extrusion tips (fixed anchors).
/// Every point in between lies on the arc and is hook-controlled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveShape {
    /// Arc radius.
    pub radius: f64,
    /// Total requested length.
    pub length: f64,
    /// Length of each straight leg.
    pub extrude_amount: f64,
    /// Ordered polyline points.
    pub points: Vec<Point3>,
}

impl CurveShape {
    /// Length of the arc portion.
    pub fn arc_length(&self) -> f64 {
        arc_length(self.radius)
    }

    /// The arc vertices, in winding order, without the extrusion tips.
    pub fn arc_points(&self) -> &[Point3] {
        &self.points[1..self.points.len() - 1]
    }

    /// Indices of points bound to the hook controller.
    pub fn hook_point_indices(&self) -> Vec<usize> {
        (1..self.points.len() - 1).collect()
    }

    /// Indices of the two fixed anchors.
    pub fn anchor_indices(&self) -> [usize; 2] {
        [0, self.points.len() - 1]
    }

    /// Returns true if the point at `index` is hook-controlled.
    pub fn is_hook_controlled(&self, index: usize) -> bool {
        index > 0 && index + 1 < self.points.len()
    }
}

/// Builds the U-shaped curve with the default circle resolution.
///
/// # Example
/// ```
/// use energychain_spec::curve;
///
/// let shape = curve::build(1.0, 5.0).unwrap();
/// assert!((shape.extrude_amount - 0.9292).abs() < 1e-4);
/// assert!(curve::build(1.0, 3.0).is_err());
/// ```
pub fn build(radius: f64, length: f64) -> ChainResult<CurveShape> {
    build_with_vertices(radius, length, DEFAULT_CIRCLE_VERTICES)
}

/// Builds the U-shaped curve from a circle primitive with `circle_vertices` vertices.
pub fn build_with_vertices(
    radius: f64,
    length: f64,
    circle_vertices: u32,
) -> ChainResult<CurveShape> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(ChainError::invalid_parameter(format!(
            "radius must be positive, got {}",
            radius
        )));
    }
    if !length.is_finite() {
        return Err(ChainError::invalid_parameter(format!(
            "length must be finite, got {}",
            length
        )));
    }
    if circle_vertices < 4 || circle_vertices % 2 != 0 {
        return Err(ChainError::invalid_parameter(format!(
            "circle_vertices must be even and at least 4, got {}",
            circle_vertices
        )));
    }

    let arc = arc_length(radius);
    if length <= arc {
        return Err(ChainError::ArcTooLong {
            length,
            arc_length: arc,
        });
    }

    let circle = circle_primitive(radius, circle_vertices as usize);
    let arc_points = cut_half_arc(&circle)?;
    let extrude_amount = (length - arc) / 2.0;

    let first = arc_points[0];
    let last = arc_points[arc_points.len() - 1];

    let mut points = Vec::with_capacity(arc_points.len() + 2);
    points.push([first[0], first[1] - extrude_amount, first[2]]);
    points.extend_from_slice(&arc_points);
    points.push([last[0], last[1] - extrude_amount, last[2]]);

    log::debug!(
        "built U curve: radius={} length={} extrude={:.4} points={}",
        radius,
        length,
        extrude_amount,
        points.len()
    );

    Ok(CurveShape {
        radius,
        length,
        extrude_amount,
        points,
    })
}

/// Circle of `count` vertices in the YZ plane, centred on the origin.
///
/// Equivalent to an XY circle rotated 90 degrees about Y: vertex `k` sits at
/// `(0, r sin t, -r cos t)` with `t = 2 pi k / count`.
fn circle_primitive(radius: f64, count: usize) -> Vec<Point3> {
    (0..count)
        .map(|k| {
            let t = 2.0 * PI * k as f64 / count as f64;
            [
                0.0,
                snap(radius * t.sin(), radius),
                snap(-radius * t.cos(), radius),
            ]
        })
        .collect()
}

fn snap(value: f64, radius: f64) -> f64 {
    if value.abs() <= SNAP_EPSILON * radius {
        0.0
    } else {
        value
    }
}

/// Keeps the `y >= 0` half of `circle` and orders it from the min-Z end to
/// the max-Z end, following the circle's winding.
fn cut_half_arc(circle: &[Point3]) -> ChainResult<Vec<Point3>> {
    let n = circle.len();
    let kept: Vec<bool> = circle.iter().map(|p| p[1] >= 0.0).collect();

    let retained: Vec<usize> = (0..n).filter(|&i| kept[i]).collect();
    let by_z = |a: &&usize, b: &&usize| circle[**a][2].total_cmp(&circle[**b][2]);
    let (start, end) = match (retained.iter().min_by(by_z), retained.iter().max_by(by_z)) {
        (Some(&start), Some(&end)) => (start, end),
        _ => {
            return Err(ChainError::invalid_parameter(
                "half-circle cut removed every vertex",
            ))
        }
    };

    for step in [1, n - 1] {
        let mut ordered = vec![circle[start]];
        let mut i = start;
        while i != end {
            i = (i + step) % n;
            if !kept[i] {
                break;
            }
            ordered.push(circle[i]);
        }
        if i == end && kept[i] {
            return Ok(ordered);
        }
    }

    Err(ChainError::invalid_parameter(
        "half-circle cut does not connect the arc ends",
    ))
}

/// Euclidean distance between two points.
pub fn distance(a: Point3, b: Point3) -> f64 {
    let d = [a[0] - b[0], a[1] - b[1], a[2] - b[2]];
    (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt()
}
