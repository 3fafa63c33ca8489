//! End-to-end generation against the in-memory scene.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p energychain-rig --test end_to_end
//! ```

use energychain_rig::memory::{ArmatureData, Bone};
use energychain_rig::{
    generate, EditMode, HostScene, MemoryScene, MeshData, ObjectId, ObjectKind, ParentTarget,
    RigGraph, ScaleMode, SceneOp, Transform,
};
use energychain_spec::curve::distance;
use energychain_spec::{ChainParameters, GeneratorConfig};
use pretty_assertions::assert_eq;

const EPS: f64 = 1e-9;

fn scene_with_template() -> (MemoryScene, ObjectId) {
    let mut scene = MemoryScene::new();
    let template = scene
        .add_mesh(
            "ChainLink",
            MeshData::cuboid([0.4, 1.0, 0.3]),
            Transform::IDENTITY,
        )
        .unwrap();
    (scene, template)
}

fn armature_data(scene: &MemoryScene, id: ObjectId) -> &ArmatureData {
    match &scene.object(id).unwrap().kind {
        ObjectKind::Armature(data) => data,
        other => panic!("expected armature, got {}", other.label()),
    }
}

fn generate_reference_rig() -> (MemoryScene, RigGraph) {
    let (mut scene, template) = scene_with_template();
    let params = ChainParameters::new(1.0, 4.0, 3);
    let rig = generate(&mut scene, Some(template), &params, &GeneratorConfig::default()).unwrap();
    (scene, rig)
}

#[test]
fn curve_has_two_legs_and_half_circle() {
    let (scene, rig) = generate_reference_rig();

    let ObjectKind::Curve(curve) = &scene.object(rig.curve.id).unwrap().kind else {
        panic!("expected curve");
    };
    let points = &curve.points;
    let n = points.len();
    let leg = (4.0 - std::f64::consts::PI) / 2.0;

    assert!((leg - 0.4292).abs() < 1e-4);
    assert!((distance(points[0], points[1]) - leg).abs() < EPS);
    assert!((distance(points[n - 2], points[n - 1]) - leg).abs() < EPS);
    assert!((distance(points[1], points[n - 2]) - 2.0).abs() < EPS);
    for p in &points[1..n - 1] {
        assert!((distance(*p, [0.0, 0.0, 0.0]) - 1.0).abs() < EPS);
    }

    assert_eq!(curve.hooks.len(), 1);
    let hook = &curve.hooks[0];
    assert_eq!(hook.driver, rig.controller.id);
    assert_eq!(hook.point_indices, (1..n - 1).collect::<Vec<_>>());
}

#[test]
fn armature_has_connected_unit_bones() {
    let (scene, rig) = generate_reference_rig();

    let armature = scene.object(rig.armature.id).unwrap();
    assert_eq!(armature.transform.location, [0.0, -0.5, 0.0]);

    let data = armature_data(&scene, rig.armature.id);
    let names: Vec<&str> = data.bones.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "EnergyChainArmature_Bone1",
            "EnergyChainArmature_Bone2",
            "EnergyChainArmature_Bone3",
        ]
    );

    for (i, bone) in data.bones.iter().enumerate() {
        assert!((distance(bone.head, bone.tail) - 1.0).abs() < EPS);
        assert_eq!(bone.head, [0.0, i as f64, 0.0]);
        if i == 0 {
            assert_eq!(bone.parent, None);
            assert!(!bone.connected);
        } else {
            assert_eq!(bone.parent.as_deref(), Some(data.bones[i - 1].name.as_str()));
            assert_eq!(bone.head, data.bones[i - 1].tail);
            assert!(bone.connected);
        }
    }
}

#[test]
fn links_are_bone_parented_in_place() {
    let (scene, rig) = generate_reference_rig();

    assert_eq!(rig.links.len(), 3);
    for (i, link) in rig.links.iter().enumerate() {
        let bone = format!("EnergyChainArmature_Bone{}", i + 1);
        assert_eq!(rig.link_for_bone(&bone).map(|l| l.id), Some(link.id));

        let obj = scene.object(link.id).unwrap();
        assert_eq!(obj.name, format!("EnergyChainLink_{}", i + 1));
        assert_eq!(obj.transform.location, [0.0, i as f64, 0.0]);
        assert!(!obj.hidden);

        let parent = obj.parent.as_ref().unwrap();
        assert_eq!(
            parent.target,
            ParentTarget::Bone {
                armature: rig.armature.id,
                bone: format!("EnergyChainArmature_Bone{}", i + 1),
            }
        );
        // Bone i's tail sits at world y = i + 0.5; the link keeps its place.
        assert_eq!(parent.world_offset, [0.0, -0.5, 0.0]);

        let ObjectKind::Mesh(mesh) = &obj.kind else {
            panic!("expected mesh");
        };
        assert_eq!(mesh.local_extent(), [0.4, 1.0, 0.3]);
    }

    let template = scene.object(rig.template.id).unwrap();
    assert!(template.hidden);
    assert!(template.parent.is_none());
}

#[test]
fn spline_ik_only_on_last_bone() {
    let (scene, rig) = generate_reference_rig();
    let data = armature_data(&scene, rig.armature.id);

    let constrained: Vec<&Bone> = data
        .bones
        .iter()
        .filter(|b| !b.constraints.is_empty())
        .collect();
    assert_eq!(constrained.len(), 1);
    assert_eq!(constrained[0].name, "EnergyChainArmature_Bone3");

    let ik = &constrained[0].constraints[0];
    assert_eq!(ik.name, "Spline IK");
    assert_eq!(ik.target, rig.curve.id);
    assert_eq!(ik.chain_count, 3);
    assert_eq!(ik.y_scale_mode, ScaleMode::BoneOriginal);
    assert_eq!(ik.xz_scale_mode, ScaleMode::BoneOriginal);

    assert_eq!(rig.spline_ik.bone, "EnergyChainArmature_Bone3");
    assert_eq!(rig.last_bone().map(|b| b.name.as_str()), Some("EnergyChainArmature_Bone3"));
}

#[test]
fn spline_ik_chain_count_matches_link_count() {
    for n in [1u32, 2, 5, 12] {
        let (mut scene, template) = scene_with_template();
        let params = ChainParameters::new(0.5, 3.0, n);
        let rig =
            generate(&mut scene, Some(template), &params, &GeneratorConfig::default()).unwrap();

        let data = armature_data(&scene, rig.armature.id);
        assert_eq!(data.bones.len(), n as usize);
        let constrained: Vec<usize> = data
            .bones
            .iter()
            .enumerate()
            .filter(|(_, b)| !b.constraints.is_empty())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(constrained, vec![n as usize - 1]);
        assert_eq!(data.bones[n as usize - 1].constraints[0].chain_count, n);
    }
}

#[test]
fn hierarchy_is_controller_curve_armature() {
    let (scene, rig) = generate_reference_rig();

    let controller = scene.object(rig.controller.id).unwrap();
    assert_eq!(
        controller.parent.as_ref().map(|p| &p.target),
        Some(&ParentTarget::Object { id: rig.curve.id })
    );
    let curve = scene.object(rig.curve.id).unwrap();
    assert_eq!(
        curve.parent.as_ref().map(|p| &p.target),
        Some(&ParentTarget::Object {
            id: rig.armature.id
        })
    );
    assert!(scene.object(rig.armature.id).unwrap().parent.is_none());

    // Keep-transform: curve stays at the world origin under the armature at y = -0.5.
    assert_eq!(curve.transform.location, [0.0, 0.0, 0.0]);
    assert_eq!(curve.parent.as_ref().unwrap().world_offset, [0.0, 0.5, 0.0]);
}

#[test]
fn resized_bones_shift_armature_origin() {
    let mut scene = MemoryScene::new();
    let template = scene
        .add_mesh("Plate", MeshData::cuboid([1.0, 2.0, 1.0]), Transform::IDENTITY)
        .unwrap();
    let params = ChainParameters::new(1.0, 6.0, 2).with_bone_offsets(-0.5, 0.5);
    let rig = generate(&mut scene, Some(template), &params, &GeneratorConfig::default()).unwrap();

    assert_eq!(rig.bone_length, 3.0);
    assert_eq!(
        scene.object(rig.armature.id).unwrap().transform.location,
        [0.0, -1.5, 0.0]
    );
    let locations: Vec<_> = rig.links.iter().map(|l| l.location).collect();
    assert_eq!(locations, vec![[0.0, 0.0, 0.0], [0.0, 3.0, 0.0]]);
}

#[test]
fn second_run_allocates_fresh_names() {
    let (mut scene, template) = scene_with_template();
    let params = ChainParameters::new(1.0, 4.0, 2);
    let config = GeneratorConfig::default();

    let first = generate(&mut scene, Some(template), &params, &config).unwrap();
    let second = generate(&mut scene, Some(template), &params, &config).unwrap();

    // Template plus curve, controller, armature and two links per run.
    assert_eq!(first.created_objects().len(), 5);
    assert_eq!(scene.len(), 1 + 2 * second.created_objects().len());
    for id in first.created_objects() {
        assert!(!second.created_objects().contains(&id));
    }

    assert_eq!(second.curve.name, "U_Shape.001");
    assert_eq!(second.controller.name, "Controller.001");
    assert_eq!(second.armature.name, "EnergyChainArmature.001");
    assert_eq!(second.links[0].name, "EnergyChainLink.001_1");
    assert_eq!(second.bones[1].name, "EnergyChainArmature.001_Bone2");
}

#[test]
fn link_names_avoid_existing_objects() {
    let (mut scene, template) = scene_with_template();
    scene
        .add_mesh(
            "EnergyChainLink_2",
            MeshData::cuboid([1.0; 3]),
            Transform::at([5.0, 0.0, 0.0]),
        )
        .unwrap();

    let params = ChainParameters::new(1.0, 4.0, 3);
    let rig = generate(&mut scene, Some(template), &params, &GeneratorConfig::default()).unwrap();
    let names: Vec<&str> = rig.links.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["EnergyChainLink_1", "EnergyChainLink_2.001", "EnergyChainLink_3"]
    );
}

#[test]
fn editing_contexts_never_overlap() {
    let (scene, _) = generate_reference_rig();

    let mut open: Option<(String, EditMode)> = None;
    let mut sessions = Vec::new();
    for op in scene.ops() {
        match op {
            SceneOp::EnterMode { name, mode } => {
                assert!(open.is_none(), "entered {:?} on {} while open", mode, name);
                open = Some((name.clone(), *mode));
                sessions.push((name.clone(), *mode));
            }
            SceneOp::ExitMode { name, mode } => {
                assert_eq!(open.take(), Some((name.clone(), *mode)));
            }
            SceneOp::AddBone { .. } | SceneOp::RemoveBone { .. } | SceneOp::AddHook { .. } => {
                assert!(matches!(open, Some((_, EditMode::Edit))));
            }
            SceneOp::AddSplineIk { .. } => {
                assert!(matches!(open, Some((_, EditMode::Pose))));
            }
            _ => assert!(open.is_none(), "{:?} ran inside a context", op),
        }
    }
    assert!(open.is_none());
    assert_eq!(scene.active_context(), None);
    assert_eq!(
        sessions,
        vec![
            ("U_Shape".to_string(), EditMode::Edit),
            ("EnergyChainArmature".to_string(), EditMode::Edit),
            ("EnergyChainArmature".to_string(), EditMode::Pose),
        ]
    );
}

#[test]
fn default_bone_is_removed() {
    let (scene, rig) = generate_reference_rig();
    assert!(scene.ops().contains(&SceneOp::RemoveBone {
        armature: rig.armature.name.clone(),
        bone: "Bone".to_string(),
    }));
    assert!(armature_data(&scene, rig.armature.id).bone("Bone").is_none());
}
