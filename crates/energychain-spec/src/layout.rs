//! Bone chain layout planning.
//!
//! All bones lie on the world Y axis, head to tail, starting at the
//! template's near edge (shifted by the head offset when resizing).

use serde::{Deserialize, Serialize};

use crate::curve::Point3;
use crate::error::{ChainError, ChainResult};
use crate::params::ChainParameters;

/// A planned bone, in world space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoneSpec {
    /// Position in the chain, 0-based.
    pub index: usize,
    /// Head position.
    pub head: Point3,
    /// Tail position.
    pub tail: Point3,
    /// Index of the parent bone, `None` for the root.
    pub parent: Option<usize>,
    /// Whether the head is connected to the parent's tail.
    pub connected: bool,
}

impl BoneSpec {
    /// Length of the bone.
    pub fn length(&self) -> f64 {
        crate::curve::distance(self.head, self.tail)
    }
}

/// A planned link object: one template duplicate per bone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkObjectSpec {
    /// Position in the chain, 0-based.
    pub index: usize,
    /// World location of the duplicate.
    pub location: Point3,
    /// Bone the duplicate is parented to.
    pub bone_index: usize,
}

/// Output of the layout planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainLayout {
    /// Length shared by every bone.
    pub bone_length: f64,
    /// Y coordinate of the first bone head; also the armature origin.
    pub start_y: f64,
    /// Bones in chain order.
    pub bones: Vec<BoneSpec>,
    /// Link objects in chain order, one per bone.
    pub links: Vec<LinkObjectSpec>,
}

impl ChainLayout {
    /// World location of the armature object.
    pub fn armature_origin(&self) -> Point3 {
        [0.0, self.start_y, 0.0]
    }

    /// Index of the last bone in chain order.
    pub fn last_bone_index(&self) -> usize {
        self.bones.len() - 1
    }

    /// Number of bones.
    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }
}

/// Plans the bone chain.
///
/// # Arguments
/// * `link_count` - Number of bones/links, at least 1
/// * `extent_y` - Template extent along Y
/// * `change_bone_size` - Whether offsets apply
/// * `head_offset` / `tail_offset` - Bone end offsets along Y
/// * `source_origin_y` - Template origin along Y
pub fn compute(
    link_count: u32,
    extent_y: f64,
    change_bone_size: bool,
    head_offset: f64,
    tail_offset: f64,
    source_origin_y: f64,
) -> ChainResult<ChainLayout> {
    if link_count < 1 {
        return Err(ChainError::invalid_parameter(format!(
            "link_count must be at least 1, got {}",
            link_count
        )));
    }

    let bone_length = if change_bone_size {
        extent_y + tail_offset - head_offset
    } else {
        extent_y
    };
    if !bone_length.is_finite() || bone_length <= 0.0 {
        return Err(ChainError::InvalidBoneLength { bone_length });
    }

    let mut start_y = source_origin_y - extent_y / 2.0;
    if change_bone_size {
        start_y += head_offset;
    }

    // head(i) and tail(i - 1) share one expression so connected joints match exactly.
    let y_at = |i: usize| start_y + i as f64 * bone_length;

    let count = link_count as usize;
    let bones: Vec<BoneSpec> = (0..count)
        .map(|i| BoneSpec {
            index: i,
            head: [0.0, y_at(i), 0.0],
            tail: [0.0, y_at(i + 1), 0.0],
            parent: i.checked_sub(1),
            connected: i > 0,
        })
        .collect();

    let links = (0..count)
        .map(|i| LinkObjectSpec {
            index: i,
            location: [0.0, i as f64 * bone_length, 0.0],
            bone_index: i,
        })
        .collect();

    log::debug!(
        "planned {} bones: bone_length={} start_y={}",
        count,
        bone_length,
        start_y
    );

    Ok(ChainLayout {
        bone_length,
        start_y,
        bones,
        links,
    })
}

/// Plans the bone chain from generation parameters.
pub fn plan(
    params: &ChainParameters,
    extent_y: f64,
    source_origin_y: f64,
) -> ChainResult<ChainLayout> {
    compute(
        params.link_count,
        extent_y,
        params.change_bone_size,
        params.effective_head_offset(),
        params.effective_tail_offset(),
        source_origin_y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_three_bone_chain() {
        let layout = compute(3, 1.0, false, 0.0, 0.0, 0.0).unwrap();
        assert_eq!(layout.bone_length, 1.0);
        assert_eq!(layout.start_y, -0.5);
        assert_eq!(layout.bone_count(), 3);
        assert_eq!(
            layout.bones[1],
            BoneSpec {
                index: 1,
                head: [0.0, 0.5, 0.0],
                tail: [0.0, 1.5, 0.0],
                parent: Some(0),
                connected: true,
            }
        );
        assert_eq!(layout.bones[0].parent, None);
        assert!(!layout.bones[0].connected);
        assert_eq!(layout.last_bone_index(), 2);
    }

    #[test]
    fn test_chain_is_connected_head_to_tail() {
        let layout = compute(7, 0.37, true, 0.013, -0.021, 4.2).unwrap();
        for pair in layout.bones.windows(2) {
            assert_eq!(pair[0].tail, pair[1].head);
            assert!(pair[1].connected);
            assert_eq!(pair[1].parent, Some(pair[0].index));
        }
    }

    #[test]
    fn test_offsets_ignored_without_resize() {
        let layout = compute(2, 2.0, false, -0.5, 0.5, 0.0).unwrap();
        assert_eq!(layout.bone_length, 2.0);
        assert_eq!(layout.start_y, -1.0);
    }

    #[test]
    fn test_resized_bone_length() {
        let layout = compute(2, 2.0, true, -0.5, 0.5, 0.0).unwrap();
        assert_eq!(layout.bone_length, 3.0);
        assert_eq!(layout.start_y, -1.5);
        assert_eq!(layout.armature_origin(), [0.0, -1.5, 0.0]);
    }

    #[test]
    fn test_link_locations() {
        let layout = compute(3, 1.0, false, 0.0, 0.0, 0.0).unwrap();
        let locations: Vec<_> = layout.links.iter().map(|l| l.location).collect();
        assert_eq!(
            locations,
            vec![[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 2.0, 0.0]]
        );
        assert!(layout.links.iter().all(|l| l.index == l.bone_index));
    }

    #[test]
    fn test_invalid_bone_length() {
        let err = compute(2, 1.0, true, 1.0, 0.0, 0.0).unwrap_err();
        assert_eq!(err, ChainError::InvalidBoneLength { bone_length: 0.0 });
        assert!(compute(0, 1.0, false, 0.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn test_plan_uses_effective_offsets() {
        let mut params = ChainParameters::new(1.0, 5.0, 2);
        params.head_offset = -0.5;
        params.tail_offset = 0.5;
        assert_eq!(
            plan(&params, 2.0, 0.0).unwrap(),
            compute(2, 2.0, false, 0.0, 0.0, 0.0).unwrap()
        );

        params.change_bone_size = true;
        let resized = plan(&params, 2.0, 0.0).unwrap();
        assert_eq!(resized.bone_length, 3.0);
        assert_eq!(resized.start_y, -1.5);
    }
}
