//! The persisted rig: what a generation run leaves in the host scene.
//!
//! ```text
//! Armature
//!  +- Curve            (hook -> Controller)
//!  |   +- Controller
//!  +- Bone1 -> Link_1
//!  +- Bone2 -> Link_2
//!  +- BoneN -> Link_N  (spline IK -> Curve, chain_count = N)
//! ```

use energychain_spec::Point3;
use serde::{Deserialize, Serialize};

use crate::scene::ObjectId;

/// A created object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: ObjectId,
    pub name: String,
}

/// The guide curve and its hook binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveRecord {
    pub id: ObjectId,
    pub name: String,
    pub points: Vec<Point3>,
    /// Points bound to the controller.
    pub hook_points: Vec<usize>,
    /// Length of each straight leg.
    pub extrude_amount: f64,
}

/// A bone as inserted, in armature-local coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoneRecord {
    pub name: String,
    pub head: Point3,
    pub tail: Point3,
    pub parent: Option<String>,
    pub connected: bool,
}

/// A template duplicate and the bone it follows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub id: ObjectId,
    pub name: String,
    pub bone: String,
    pub location: Point3,
}

/// The spline-IK constraint on the last bone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplineIkRecord {
    pub name: String,
    pub bone: String,
    pub target: ObjectId,
    pub chain_count: u32,
}

/// Everything a generation run created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigGraph {
    pub template: EntityRef,
    pub controller: EntityRef,
    pub curve: CurveRecord,
    pub armature: EntityRef,
    pub bone_length: f64,
    pub bones: Vec<BoneRecord>,
    pub links: Vec<LinkRecord>,
    pub spline_ik: SplineIkRecord,
}

impl RigGraph {
    /// The last bone in chain order.
    pub fn last_bone(&self) -> Option<&BoneRecord> {
        self.bones.last()
    }

    /// The link parented to `bone`.
    pub fn link_for_bone(&self, bone: &str) -> Option<&LinkRecord> {
        self.links.iter().find(|l| l.bone == bone)
    }

    /// Ids of every object the run created, in creation order.
    pub fn created_objects(&self) -> Vec<ObjectId> {
        let mut ids = vec![self.curve.id, self.controller.id, self.armature.id];
        ids.extend(self.links.iter().map(|l| l.id));
        ids
    }
}
