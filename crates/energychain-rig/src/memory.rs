//! In-memory host scene.
//!
//! [`MemoryScene`] implements [`HostScene`] with the same rules a real host
//! enforces: unique object names, one editing context at a time, structural
//! edits only inside the matching context, and keep-transform parenting.
//! Every mutating call is appended to an operation log.

use std::collections::{BTreeMap, BTreeSet};

use energychain_spec::{EmptyDisplay, Point3};
use serde::{Deserialize, Serialize};

use crate::error::{HostError, HostResult};
use crate::scene::{
    BoneInsert, EditMode, HookBinding, HostScene, ObjectBounds, ObjectId, ParentTarget,
    SplineIkSettings, Transform,
};

/// Name of the bone a host inserts into a fresh armature.
pub const DEFAULT_BONE_NAME: &str = "Bone";

/// Mesh geometry owned by a single object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshData {
    pub vertices: Vec<Point3>,
    pub faces: Vec<Vec<usize>>,
}

impl MeshData {
    /// An axis-aligned box of the given size centred on the origin.
    pub fn cuboid(size: Point3) -> Self {
        let [hx, hy, hz] = [size[0] / 2.0, size[1] / 2.0, size[2] / 2.0];
        let vertices = vec![
            [-hx, -hy, -hz],
            [hx, -hy, -hz],
            [hx, hy, -hz],
            [-hx, hy, -hz],
            [-hx, -hy, hz],
            [hx, -hy, hz],
            [hx, hy, hz],
            [-hx, hy, hz],
        ];
        let faces = vec![
            vec![0, 3, 2, 1],
            vec![4, 5, 6, 7],
            vec![0, 1, 5, 4],
            vec![2, 3, 7, 6],
            vec![1, 2, 6, 5],
            vec![0, 4, 7, 3],
        ];
        Self { vertices, faces }
    }

    /// Size of the local bounding box.
    pub fn local_extent(&self) -> Point3 {
        extent_of(self.vertices.iter().copied())
    }
}

fn extent_of(points: impl Iterator<Item = Point3>) -> Point3 {
    let mut min = [f64::INFINITY; 3];
    let mut max = [f64::NEG_INFINITY; 3];
    let mut any = false;
    for p in points {
        any = true;
        for axis in 0..3 {
            min[axis] = min[axis].min(p[axis]);
            max[axis] = max[axis].max(p[axis]);
        }
    }
    if !any {
        return [0.0; 3];
    }
    [max[0] - min[0], max[1] - min[1], max[2] - min[2]]
}

/// Poly-spline curve data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveData {
    pub points: Vec<Point3>,
    pub hooks: Vec<HookBinding>,
}

/// A bone with its pose constraints. Positions are armature-local.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bone {
    pub name: String,
    pub head: Point3,
    pub tail: Point3,
    pub parent: Option<String>,
    pub connected: bool,
    pub constraints: Vec<SplineIkSettings>,
}

/// Armature data: bones in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArmatureData {
    pub bones: Vec<Bone>,
}

impl ArmatureData {
    /// Looks a bone up by name.
    pub fn bone(&self, name: &str) -> Option<&Bone> {
        self.bones.iter().find(|b| b.name == name)
    }

    fn bone_mut(&mut self, name: &str) -> Option<&mut Bone> {
        self.bones.iter_mut().find(|b| b.name == name)
    }
}

/// Object payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ObjectKind {
    Empty { display: EmptyDisplay },
    Mesh(MeshData),
    Curve(CurveData),
    Armature(ArmatureData),
}

impl ObjectKind {
    /// Short kind label.
    pub fn label(&self) -> &'static str {
        match self {
            ObjectKind::Empty { .. } => "empty",
            ObjectKind::Mesh(_) => "mesh",
            ObjectKind::Curve(_) => "curve",
            ObjectKind::Armature(_) => "armature",
        }
    }
}

/// A recorded parent relation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parent {
    pub target: ParentTarget,
    /// Child location minus the parent anchor at parenting time. Bone parents
    /// are anchored at the bone tail.
    pub world_offset: Point3,
}

/// A scene object. `transform` is the world transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    pub kind: ObjectKind,
    pub transform: Transform,
    pub parent: Option<Parent>,
    pub hidden: bool,
}

/// A mutating call, as recorded in the operation log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SceneOp {
    Create { name: String, kind: String },
    Duplicate { source: String, name: String },
    SetHidden { name: String, hidden: bool },
    EnterMode { name: String, mode: EditMode },
    ExitMode { name: String, mode: EditMode },
    RemoveBone { armature: String, bone: String },
    AddBone { armature: String, bone: String },
    AddHook { curve: String, driver: String, points: usize },
    AddSplineIk { armature: String, bone: String, target: String, chain_count: u32 },
    SetParent { child: String, parent: String },
}

/// An in-memory scene document.
#[derive(Debug, Clone, Default)]
pub struct MemoryScene {
    objects: BTreeMap<ObjectId, SceneObject>,
    next_id: u64,
    context: Option<(ObjectId, EditMode)>,
    ops: Vec<SceneOp>,
}

impl MemoryScene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a mesh object, e.g. a link template.
    pub fn add_mesh(
        &mut self,
        name: &str,
        mesh: MeshData,
        transform: Transform,
    ) -> HostResult<ObjectId> {
        self.create("add_mesh", name, ObjectKind::Mesh(mesh), transform)
    }

    /// Looks an object up.
    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    /// Mutable access to an object, bypassing context rules.
    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(&id)
    }

    /// All objects in creation order.
    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.objects.iter().map(|(id, obj)| (*id, obj))
    }

    /// Number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true if the scene has no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// The operation log.
    pub fn ops(&self) -> &[SceneOp] {
        &self.ops
    }

    fn get(&self, id: ObjectId) -> HostResult<&SceneObject> {
        self.objects.get(&id).ok_or(HostError::ObjectNotFound { id })
    }

    fn get_mut(&mut self, id: ObjectId) -> HostResult<&mut SceneObject> {
        self.objects
            .get_mut(&id)
            .ok_or(HostError::ObjectNotFound { id })
    }

    fn name_of(&self, id: ObjectId) -> String {
        self.objects
            .get(&id)
            .map(|o| o.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    fn require_object_level(&self, operation: &'static str) -> HostResult<()> {
        match self.context {
            None => Ok(()),
            Some((target, mode)) => Err(HostError::wrong_context(
                operation,
                format!(
                    "object level, but {:?} on '{}' is open",
                    mode,
                    self.name_of(target)
                ),
            )),
        }
    }

    fn require_context(
        &self,
        operation: &'static str,
        target: ObjectId,
        mode: EditMode,
    ) -> HostResult<()> {
        if self.context == Some((target, mode)) {
            Ok(())
        } else {
            Err(HostError::wrong_context(
                operation,
                format!("{:?} mode on '{}'", mode, self.name_of(target)),
            ))
        }
    }

    fn create(
        &mut self,
        operation: &'static str,
        name: &str,
        kind: ObjectKind,
        transform: Transform,
    ) -> HostResult<ObjectId> {
        self.require_object_level(operation)?;
        if self.find_object(name).is_some() {
            return Err(HostError::NameTaken {
                name: name.to_string(),
            });
        }
        self.next_id += 1;
        let id = ObjectId(self.next_id);
        self.ops.push(SceneOp::Create {
            name: name.to_string(),
            kind: kind.label().to_string(),
        });
        self.objects.insert(
            id,
            SceneObject {
                name: name.to_string(),
                kind,
                transform,
                parent: None,
                hidden: false,
            },
        );
        Ok(id)
    }

    fn armature_mut(&mut self, id: ObjectId) -> HostResult<(String, &mut ArmatureData)> {
        let obj = self.get_mut(id)?;
        match &mut obj.kind {
            ObjectKind::Armature(data) => Ok((obj.name.clone(), data)),
            _ => Err(HostError::WrongKind {
                name: obj.name.clone(),
                expected: "an armature",
            }),
        }
    }

    /// World position a parent relation is measured from.
    fn parent_anchor(&self, parent: &ParentTarget) -> HostResult<Point3> {
        match parent {
            ParentTarget::Object { id } => Ok(self.get(*id)?.transform.location),
            ParentTarget::Bone { armature, bone } => {
                let obj = self.get(*armature)?;
                let ObjectKind::Armature(data) = &obj.kind else {
                    return Err(HostError::WrongKind {
                        name: obj.name.clone(),
                        expected: "an armature",
                    });
                };
                let bone = data.bone(bone).ok_or_else(|| HostError::BoneNotFound {
                    armature: obj.name.clone(),
                    bone: bone.clone(),
                })?;
                Ok(obj.transform.apply(bone.tail))
            }
        }
    }

    fn parent_object(target: &ParentTarget) -> ObjectId {
        match target {
            ParentTarget::Object { id } => *id,
            ParentTarget::Bone { armature, .. } => *armature,
        }
    }

    fn would_cycle(&self, child: ObjectId, parent: &ParentTarget) -> bool {
        let mut current = Some(Self::parent_object(parent));
        while let Some(id) = current {
            if id == child {
                return true;
            }
            current = self
                .objects
                .get(&id)
                .and_then(|o| o.parent.as_ref())
                .map(|p| Self::parent_object(&p.target));
        }
        false
    }
}

impl HostScene for MemoryScene {
    fn object_names(&self) -> BTreeSet<String> {
        self.objects.values().map(|o| o.name.clone()).collect()
    }

    fn find_object(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|(_, o)| o.name == name)
            .map(|(id, _)| *id)
    }

    fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    fn object_name(&self, id: ObjectId) -> HostResult<String> {
        Ok(self.get(id)?.name.clone())
    }

    fn object_bounds(&self, id: ObjectId) -> HostResult<ObjectBounds> {
        let obj = self.get(id)?;
        let local = match &obj.kind {
            ObjectKind::Empty { .. } => [0.0; 3],
            ObjectKind::Mesh(mesh) => mesh.local_extent(),
            ObjectKind::Curve(curve) => extent_of(curve.points.iter().copied()),
            ObjectKind::Armature(arm) => {
                extent_of(arm.bones.iter().flat_map(|b| [b.head, b.tail]))
            }
        };
        let scale = obj.transform.scale;
        Ok(ObjectBounds {
            origin: obj.transform.location,
            extent: [
                local[0] * scale[0].abs(),
                local[1] * scale[1].abs(),
                local[2] * scale[2].abs(),
            ],
        })
    }

    fn create_empty(
        &mut self,
        name: &str,
        display: EmptyDisplay,
        transform: Transform,
    ) -> HostResult<ObjectId> {
        self.create("create_empty", name, ObjectKind::Empty { display }, transform)
    }

    fn create_curve(
        &mut self,
        name: &str,
        points: &[Point3],
        transform: Transform,
    ) -> HostResult<ObjectId> {
        let curve = CurveData {
            points: points.to_vec(),
            hooks: Vec::new(),
        };
        self.create("create_curve", name, ObjectKind::Curve(curve), transform)
    }

    fn create_armature(&mut self, name: &str, transform: Transform) -> HostResult<ObjectId> {
        let data = ArmatureData {
            bones: vec![Bone {
                name: DEFAULT_BONE_NAME.to_string(),
                head: [0.0, 0.0, 0.0],
                tail: [0.0, 1.0, 0.0],
                parent: None,
                connected: false,
                constraints: Vec::new(),
            }],
        };
        self.create("create_armature", name, ObjectKind::Armature(data), transform)
    }

    fn duplicate_object(
        &mut self,
        source: ObjectId,
        name: &str,
        location: Point3,
    ) -> HostResult<ObjectId> {
        let src = self.get(source)?;
        let source_name = src.name.clone();
        let kind = src.kind.clone();
        let transform = Transform {
            location,
            ..src.transform
        };
        let id = self.create("duplicate_object", name, kind, transform)?;
        // Replace the generic create entry with a duplicate entry.
        self.ops.pop();
        self.ops.push(SceneOp::Duplicate {
            source: source_name,
            name: name.to_string(),
        });
        Ok(id)
    }

    fn set_hidden(&mut self, id: ObjectId, hidden: bool) -> HostResult<()> {
        self.require_object_level("set_hidden")?;
        let obj = self.get_mut(id)?;
        obj.hidden = hidden;
        let name = obj.name.clone();
        self.ops.push(SceneOp::SetHidden { name, hidden });
        Ok(())
    }

    fn enter_mode(&mut self, target: ObjectId, mode: EditMode) -> HostResult<()> {
        if let Some((open_target, open_mode)) = self.context {
            return Err(HostError::ContextAlreadyOpen {
                target: open_target,
                mode: open_mode,
            });
        }
        let obj = self.get(target)?;
        let supported = match (&obj.kind, mode) {
            (ObjectKind::Armature(_), _) => true,
            (ObjectKind::Mesh(_) | ObjectKind::Curve(_), EditMode::Edit) => true,
            _ => false,
        };
        if !supported {
            return Err(HostError::UnsupportedMode {
                name: obj.name.clone(),
                mode,
            });
        }
        let name = obj.name.clone();
        self.context = Some((target, mode));
        self.ops.push(SceneOp::EnterMode { name, mode });
        Ok(())
    }

    fn exit_mode(&mut self) -> HostResult<()> {
        let (target, mode) = self.context.take().ok_or(HostError::NoActiveContext)?;
        let name = self.name_of(target);
        self.ops.push(SceneOp::ExitMode { name, mode });
        Ok(())
    }

    fn active_context(&self) -> Option<(ObjectId, EditMode)> {
        self.context
    }

    fn bone_names(&self, armature: ObjectId) -> HostResult<Vec<String>> {
        let obj = self.get(armature)?;
        match &obj.kind {
            ObjectKind::Armature(data) => Ok(data.bones.iter().map(|b| b.name.clone()).collect()),
            _ => Err(HostError::WrongKind {
                name: obj.name.clone(),
                expected: "an armature",
            }),
        }
    }

    fn remove_bone(&mut self, armature: ObjectId, name: &str) -> HostResult<()> {
        self.require_context("remove_bone", armature, EditMode::Edit)?;
        let (armature_name, data) = self.armature_mut(armature)?;
        let index = data
            .bones
            .iter()
            .position(|b| b.name == name)
            .ok_or_else(|| HostError::BoneNotFound {
                armature: armature_name.clone(),
                bone: name.to_string(),
            })?;
        data.bones.remove(index);
        for bone in data.bones.iter_mut() {
            if bone.parent.as_deref() == Some(name) {
                bone.parent = None;
                bone.connected = false;
            }
        }
        self.ops.push(SceneOp::RemoveBone {
            armature: armature_name,
            bone: name.to_string(),
        });
        Ok(())
    }

    fn add_bone(&mut self, armature: ObjectId, bone: &BoneInsert) -> HostResult<()> {
        self.require_context("add_bone", armature, EditMode::Edit)?;
        let (armature_name, data) = self.armature_mut(armature)?;
        if data.bone(&bone.name).is_some() {
            return Err(HostError::BoneExists {
                armature: armature_name,
                bone: bone.name.clone(),
            });
        }
        if let Some(parent) = &bone.parent {
            if data.bone(parent).is_none() {
                return Err(HostError::BoneNotFound {
                    armature: armature_name,
                    bone: parent.clone(),
                });
            }
        }
        data.bones.push(Bone {
            name: bone.name.clone(),
            head: bone.head,
            tail: bone.tail,
            parent: bone.parent.clone(),
            connected: bone.connected && bone.parent.is_some(),
            constraints: Vec::new(),
        });
        self.ops.push(SceneOp::AddBone {
            armature: armature_name,
            bone: bone.name.clone(),
        });
        Ok(())
    }

    fn add_hook(&mut self, curve: ObjectId, hook: &HookBinding) -> HostResult<()> {
        self.require_context("add_hook", curve, EditMode::Edit)?;
        if hook.driver == curve {
            return Err(HostError::ParentCycle {
                child: self.name_of(curve),
            });
        }
        let driver_name = self.get(hook.driver)?.name.clone();
        let obj = self.get_mut(curve)?;
        let curve_name = obj.name.clone();
        let ObjectKind::Curve(data) = &mut obj.kind else {
            return Err(HostError::WrongKind {
                name: curve_name,
                expected: "a curve",
            });
        };
        if let Some(&index) = hook.point_indices.iter().find(|&&i| i >= data.points.len()) {
            return Err(HostError::PointOutOfRange {
                curve: curve_name,
                index,
                len: data.points.len(),
            });
        }
        data.hooks.push(hook.clone());
        self.ops.push(SceneOp::AddHook {
            curve: curve_name,
            driver: driver_name,
            points: hook.point_indices.len(),
        });
        Ok(())
    }

    fn add_spline_ik(
        &mut self,
        armature: ObjectId,
        bone: &str,
        constraint: &SplineIkSettings,
    ) -> HostResult<()> {
        self.require_context("add_spline_ik", armature, EditMode::Pose)?;
        let target = self.get(constraint.target)?;
        if !matches!(target.kind, ObjectKind::Curve(_)) {
            return Err(HostError::WrongKind {
                name: target.name.clone(),
                expected: "a curve",
            });
        }
        let target_name = target.name.clone();
        let (armature_name, data) = self.armature_mut(armature)?;
        let pose_bone = data.bone_mut(bone).ok_or_else(|| HostError::BoneNotFound {
            armature: armature_name.clone(),
            bone: bone.to_string(),
        })?;
        pose_bone.constraints.push(constraint.clone());
        self.ops.push(SceneOp::AddSplineIk {
            armature: armature_name,
            bone: bone.to_string(),
            target: target_name,
            chain_count: constraint.chain_count,
        });
        Ok(())
    }

    fn set_parent_keep_transform(
        &mut self,
        child: ObjectId,
        parent: ParentTarget,
    ) -> HostResult<()> {
        self.require_object_level("set_parent")?;
        let child_obj = self.get(child)?;
        let child_name = child_obj.name.clone();
        let location = child_obj.transform.location;

        let anchor = self.parent_anchor(&parent)?;
        if self.would_cycle(child, &parent) {
            return Err(HostError::ParentCycle { child: child_name });
        }

        let parent_label = match &parent {
            ParentTarget::Object { id } => self.name_of(*id),
            ParentTarget::Bone { armature, bone } => format!("{}:{}", self.name_of(*armature), bone),
        };

        self.get_mut(child)?.parent = Some(Parent {
            target: parent,
            world_offset: [
                location[0] - anchor[0],
                location[1] - anchor[1],
                location[2] - anchor[2],
            ],
        });
        self.ops.push(SceneOp::SetParent {
            child: child_name,
            parent: parent_label,
        });
        Ok(())
    }
}
