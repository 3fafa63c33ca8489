//! The host scene surface consumed by the rig assembler.
//!
//! A host owns the scene document. The assembler only ever talks to it
//! through [`HostScene`]; ownership and lifetime of created entities stay
//! with the host.

use std::collections::BTreeSet;
use std::fmt;

use energychain_spec::{EmptyDisplay, Point3};
use serde::{Deserialize, Serialize};

use crate::error::HostResult;

/// Opaque handle to a scene object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An exclusive, per-target editing context.
///
/// Object-level editing is the state where no context is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditMode {
    /// Structural editing: curve points, armature bones.
    Edit,
    /// Pose editing: bone constraints.
    Pose,
}

/// Object transform: location, XYZ euler rotation (radians), scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub location: Point3,
    pub rotation_euler: Point3,
    pub scale: Point3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Transform = Transform {
        location: [0.0, 0.0, 0.0],
        rotation_euler: [0.0, 0.0, 0.0],
        scale: [1.0, 1.0, 1.0],
    };

    /// Identity rotation and scale at `location`.
    pub fn at(location: Point3) -> Self {
        Self {
            location,
            ..Self::IDENTITY
        }
    }

    /// Sets the XYZ euler rotation.
    pub fn with_rotation(mut self, rotation_euler: Point3) -> Self {
        self.rotation_euler = rotation_euler;
        self
    }

    /// Sets the scale.
    pub fn with_scale(mut self, scale: Point3) -> Self {
        self.scale = scale;
        self
    }

    /// Maps a local point to world space: scale, then rotate X, Y, Z, then translate.
    pub fn apply(&self, p: Point3) -> Point3 {
        let mut v = [p[0] * self.scale[0], p[1] * self.scale[1], p[2] * self.scale[2]];

        let [rx, ry, rz] = self.rotation_euler;
        let (s, c) = rx.sin_cos();
        v = [v[0], c * v[1] - s * v[2], s * v[1] + c * v[2]];
        let (s, c) = ry.sin_cos();
        v = [c * v[0] + s * v[2], v[1], -s * v[0] + c * v[2]];
        let (s, c) = rz.sin_cos();
        v = [c * v[0] - s * v[1], s * v[0] + c * v[1], v[2]];

        [
            v[0] + self.location[0],
            v[1] + self.location[1],
            v[2] + self.location[2],
        ]
    }
}

/// World-space origin and axis-aligned extent of an object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectBounds {
    /// Object origin (its location).
    pub origin: Point3,
    /// Bounding box size along each axis, including object scale.
    pub extent: Point3,
}

/// A bone to insert into an armature under edit. Positions are armature-local.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoneInsert {
    pub name: String,
    pub head: Point3,
    pub tail: Point3,
    pub parent: Option<String>,
    pub connected: bool,
}

/// A hook modifier binding curve points to a driver object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HookBinding {
    /// Modifier name.
    pub name: String,
    /// Driver object.
    pub driver: ObjectId,
    /// Indices of the bound curve points.
    pub point_indices: Vec<usize>,
}

/// How a spline-IK solve affects bone scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleMode {
    /// Keep the bone's original scale.
    #[default]
    BoneOriginal,
    /// Stretch to fit the curve.
    FitCurve,
}

/// A spline-IK constraint on a pose bone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplineIkSettings {
    /// Constraint name.
    pub name: String,
    /// Target curve object.
    pub target: ObjectId,
    /// Number of bones affected, counted back from the constrained bone.
    pub chain_count: u32,
    /// Scale mode along the bone axis.
    pub y_scale_mode: ScaleMode,
    /// Scale mode across the bone axis.
    pub xz_scale_mode: ScaleMode,
}

/// The parent of an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParentTarget {
    /// Plain object parent.
    Object { id: ObjectId },
    /// Bone parent within an armature.
    Bone { armature: ObjectId, bone: String },
}

/// Scene operations the rig assembler needs from a host.
///
/// Structural operations (`add_bone`, `remove_bone`, `add_hook`) need an
/// [`EditMode::Edit`] context on their target, `add_spline_ik` needs
/// [`EditMode::Pose`], and everything else runs at object level with no
/// context open. At most one context may be open at a time; use
/// [`EditSession`](crate::session::EditSession) to scope them.
pub trait HostScene {
    /// Names of every object currently in the scene.
    fn object_names(&self) -> BTreeSet<String>;

    /// Looks an object up by name.
    fn find_object(&self, name: &str) -> Option<ObjectId>;

    /// Returns true if the object exists.
    fn contains(&self, id: ObjectId) -> bool;

    /// Name of an object.
    fn object_name(&self, id: ObjectId) -> HostResult<String>;

    /// World-space origin and extent of an object.
    fn object_bounds(&self, id: ObjectId) -> HostResult<ObjectBounds>;

    /// Creates an empty.
    fn create_empty(
        &mut self,
        name: &str,
        display: EmptyDisplay,
        transform: Transform,
    ) -> HostResult<ObjectId>;

    /// Creates a poly-spline curve through `points` (object-local).
    fn create_curve(
        &mut self,
        name: &str,
        points: &[Point3],
        transform: Transform,
    ) -> HostResult<ObjectId>;

    /// Creates an armature. Hosts may insert a default bone.
    fn create_armature(&mut self, name: &str, transform: Transform) -> HostResult<ObjectId>;

    /// Duplicates `source` with an independent copy of its geometry, placed at `location`.
    fn duplicate_object(
        &mut self,
        source: ObjectId,
        name: &str,
        location: Point3,
    ) -> HostResult<ObjectId>;

    /// Shows or hides an object.
    fn set_hidden(&mut self, id: ObjectId, hidden: bool) -> HostResult<()>;

    /// Opens an exclusive editing context on `target`.
    fn enter_mode(&mut self, target: ObjectId, mode: EditMode) -> HostResult<()>;

    /// Closes the open editing context, returning to object level.
    fn exit_mode(&mut self) -> HostResult<()>;

    /// The open editing context, if any.
    fn active_context(&self) -> Option<(ObjectId, EditMode)>;

    /// Bone names of an armature, in insertion order.
    fn bone_names(&self, armature: ObjectId) -> HostResult<Vec<String>>;

    /// Removes a bone.
    fn remove_bone(&mut self, armature: ObjectId, name: &str) -> HostResult<()>;

    /// Inserts a bone.
    fn add_bone(&mut self, armature: ObjectId, bone: &BoneInsert) -> HostResult<()>;

    /// Adds a hook modifier to a curve.
    fn add_hook(&mut self, curve: ObjectId, hook: &HookBinding) -> HostResult<()>;

    /// Adds a spline-IK constraint to a pose bone.
    fn add_spline_ik(
        &mut self,
        armature: ObjectId,
        bone: &str,
        constraint: &SplineIkSettings,
    ) -> HostResult<()>;

    /// Reparents `child`, preserving its world transform.
    fn set_parent_keep_transform(&mut self, child: ObjectId, parent: ParentTarget)
        -> HostResult<()>;
}
