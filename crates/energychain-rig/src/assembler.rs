//! Rig assembly.
//!
//! Turns a planned curve and bone layout into scene entities, in this order:
//!
//! 1. guide curve, controller, hook binding
//! 2. armature and bones
//! 3. link duplicates, template hidden
//! 4. bone parenting of links
//! 5. spline-IK on the last bone
//! 6. controller -> curve -> armature hierarchy
//!
//! Each structural step runs inside a scoped editing context that is released
//! before the next target is touched. A failure aborts the remaining steps;
//! entities already created stay in the scene.

use std::f64::consts::FRAC_PI_2;

use energychain_spec::layout::ChainLayout;
use energychain_spec::{unique_name, ChainError, ChainResult, CurveShape, GeneratorConfig};

use crate::error::{HostError, RigError, RigResult};
use crate::graph::{BoneRecord, CurveRecord, EntityRef, LinkRecord, RigGraph, SplineIkRecord};
use crate::scene::{
    BoneInsert, EditMode, HookBinding, HostScene, ObjectId, ParentTarget, ScaleMode,
    SplineIkSettings, Transform,
};
use crate::session::with_mode;

const STEP_CURVE: &str = "guide curve";
const STEP_ARMATURE: &str = "armature";
const STEP_LINKS: &str = "link duplication";
const STEP_PARENTING: &str = "bone parenting";
const STEP_SPLINE_IK: &str = "spline IK";
const STEP_HIERARCHY: &str = "hierarchy";

fn at_step(step: &'static str) -> impl Fn(HostError) -> ChainError {
    move |e| ChainError::assembly(step, e.to_string())
}

/// Allocates a name against a fresh snapshot of the scene.
fn fresh_name<H: HostScene + ?Sized>(host: &H, base: &str) -> String {
    unique_name(base, &host.object_names())
}

/// Assembles the rig in `host`.
///
/// `template` is duplicated once per bone and hidden. Inputs are assumed to be
/// validated. An open editing context or a missing template is reported as a
/// [`HostError`] before anything is created; every later failure is a
/// [`ChainError::Assembly`] and leaves the entities created so far in place.
pub fn assemble<H: HostScene + ?Sized>(
    host: &mut H,
    template: ObjectId,
    shape: &CurveShape,
    layout: &ChainLayout,
    config: &GeneratorConfig,
) -> RigResult<RigGraph> {
    if let Some((target, mode)) = host.active_context() {
        return Err(HostError::ContextAlreadyOpen { target, mode }.into());
    }
    let template_name = host.object_name(template)?;

    let result = assemble_steps(host, template, template_name, shape, layout, config);
    if let Err(e) = &result {
        log::warn!("{}", e);
    }
    result.map_err(RigError::from)
}

fn assemble_steps<H: HostScene + ?Sized>(
    host: &mut H,
    template: ObjectId,
    template_name: String,
    shape: &CurveShape,
    layout: &ChainLayout,
    config: &GeneratorConfig,
) -> ChainResult<RigGraph> {
    // 1. Guide curve + controller + hook.
    let curve_name = fresh_name(host, &config.curve_name);
    let curve = host
        .create_curve(&curve_name, &shape.points, Transform::IDENTITY)
        .map_err(at_step(STEP_CURVE))?;

    let controller_name = fresh_name(host, &config.controller_name);
    let controller = host
        .create_empty(
            &controller_name,
            config.controller_display,
            Transform::IDENTITY.with_rotation([FRAC_PI_2, 0.0, 0.0]),
        )
        .map_err(at_step(STEP_CURVE))?;

    let hook = HookBinding {
        name: config.hook_name.clone(),
        driver: controller,
        point_indices: shape.hook_point_indices(),
    };
    with_mode(host, curve, EditMode::Edit, |h| h.add_hook(curve, &hook))
        .map_err(at_step(STEP_CURVE))?;
    log::debug!(
        "curve '{}' with {} points, {} hooked to '{}'",
        curve_name,
        shape.points.len(),
        hook.point_indices.len(),
        controller_name
    );

    // 2. Armature + bones, positions relative to the armature origin.
    let origin = layout.armature_origin();
    let armature_name = fresh_name(host, &config.armature_name);
    let armature = host
        .create_armature(&armature_name, Transform::at(origin))
        .map_err(at_step(STEP_ARMATURE))?;

    let bones: Vec<BoneRecord> = layout
        .bones
        .iter()
        .map(|spec| BoneRecord {
            name: GeneratorConfig::bone_name(&armature_name, spec.index),
            head: sub(spec.head, origin),
            tail: sub(spec.tail, origin),
            parent: spec
                .parent
                .map(|p| GeneratorConfig::bone_name(&armature_name, p)),
            connected: spec.connected,
        })
        .collect();

    with_mode(host, armature, EditMode::Edit, |h| {
        for default_bone in h.bone_names(armature)? {
            h.remove_bone(armature, &default_bone)?;
        }
        for bone in &bones {
            h.add_bone(
                armature,
                &BoneInsert {
                    name: bone.name.clone(),
                    head: bone.head,
                    tail: bone.tail,
                    parent: bone.parent.clone(),
                    connected: bone.connected,
                },
            )?;
        }
        Ok::<_, HostError>(())
    })
    .map_err(at_step(STEP_ARMATURE))?;
    log::debug!("armature '{}' with {} bones", armature_name, bones.len());

    // 3. Link duplicates.
    let link_base = GeneratorConfig::link_base_name(&armature_name);
    let mut links = Vec::with_capacity(layout.links.len());
    for spec in &layout.links {
        let bone = bones.get(spec.bone_index).ok_or_else(|| {
            ChainError::assembly(
                STEP_LINKS,
                format!("link {} is bound to missing bone {}", spec.index, spec.bone_index),
            )
        })?;
        let name = fresh_name(host, &format!("{}_{}", link_base, spec.index + 1));
        let id = host
            .duplicate_object(template, &name, spec.location)
            .map_err(at_step(STEP_LINKS))?;
        links.push(LinkRecord {
            id,
            name,
            bone: bone.name.clone(),
            location: spec.location,
        });
    }
    host.set_hidden(template, true).map_err(at_step(STEP_LINKS))?;

    // 4. Bone parenting, keep transform.
    let present = host.bone_names(armature).map_err(at_step(STEP_PARENTING))?;
    for link in &links {
        if !present.contains(&link.bone) {
            return Err(ChainError::assembly(
                STEP_PARENTING,
                format!("bone '{}' not found in '{}'", link.bone, armature_name),
            ));
        }
        if !host.contains(link.id) {
            return Err(ChainError::assembly(
                STEP_PARENTING,
                format!("link object '{}' not found", link.name),
            ));
        }
        host.set_parent_keep_transform(
            link.id,
            ParentTarget::Bone {
                armature,
                bone: link.bone.clone(),
            },
        )
        .map_err(at_step(STEP_PARENTING))?;
        log::debug!("parented '{}' to '{}'", link.name, link.bone);
    }

    // 5. Spline IK on the last bone, covering the whole chain.
    let last_bone = bones
        .last()
        .map(|b| b.name.clone())
        .ok_or_else(|| ChainError::assembly(STEP_SPLINE_IK, "chain has no bones"))?;
    let spline_ik = SplineIkSettings {
        name: config.spline_ik_name.clone(),
        target: curve,
        chain_count: bones.len() as u32,
        y_scale_mode: ScaleMode::BoneOriginal,
        xz_scale_mode: ScaleMode::BoneOriginal,
    };
    with_mode(host, armature, EditMode::Pose, |h| {
        h.add_spline_ik(armature, &last_bone, &spline_ik)
    })
    .map_err(at_step(STEP_SPLINE_IK))?;

    // 6. Controller -> curve -> armature.
    host.set_parent_keep_transform(controller, ParentTarget::Object { id: curve })
        .map_err(at_step(STEP_HIERARCHY))?;
    host.set_parent_keep_transform(curve, ParentTarget::Object { id: armature })
        .map_err(at_step(STEP_HIERARCHY))?;

    Ok(RigGraph {
        template: EntityRef {
            id: template,
            name: template_name,
        },
        controller: EntityRef {
            id: controller,
            name: controller_name,
        },
        curve: CurveRecord {
            id: curve,
            name: curve_name,
            points: shape.points.clone(),
            hook_points: hook.point_indices,
            extrude_amount: shape.extrude_amount,
        },
        armature: EntityRef {
            id: armature,
            name: armature_name,
        },
        bone_length: layout.bone_length,
        bones,
        links,
        spline_ik: SplineIkRecord {
            name: spline_ik.name,
            bone: last_bone,
            target: curve,
            chain_count: spline_ik.chain_count,
        },
    })
}

fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}
