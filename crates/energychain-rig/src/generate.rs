//! The generation pipeline: validate, plan, then assemble.

use energychain_spec::{
    curve, head_offset_from_cursor, layout, tail_offset_from_cursor, validate, ChainError,
    ChainParameters, GeneratorConfig,
};

use crate::assembler::assemble;
use crate::error::{HostError, RigResult};
use crate::graph::RigGraph;
use crate::scene::{HostScene, ObjectId};

/// Generates an energy chain rig in `host` from `template`.
///
/// Validation and planning errors are returned before the scene is touched.
/// Errors raised during assembly leave already-created entities in place;
/// check [`RigError::leaves_partial_state`](crate::RigError::leaves_partial_state).
pub fn generate<H: HostScene + ?Sized>(
    host: &mut H,
    template: Option<ObjectId>,
    params: &ChainParameters,
    config: &GeneratorConfig,
) -> RigResult<RigGraph> {
    let template = template.ok_or(ChainError::MissingTemplate)?;
    config.validate()?;

    let bounds = host.object_bounds(template)?;
    let extent_y = bounds.extent[1];
    validate(params, extent_y)?;

    let shape = curve::build_with_vertices(params.radius, params.length, config.circle_vertices)?;
    let chain = layout::plan(params, extent_y, bounds.origin[1])?;

    let graph = assemble(host, template, &shape, &chain, config)?;
    log::info!(
        "generated energy chain '{}': {} links, bone length {}",
        graph.armature.name,
        graph.links.len(),
        graph.bone_length
    );
    Ok(graph)
}

/// Generates a rig using the template object called `template_name`.
pub fn generate_by_name<H: HostScene + ?Sized>(
    host: &mut H,
    template_name: Option<&str>,
    params: &ChainParameters,
    config: &GeneratorConfig,
) -> RigResult<RigGraph> {
    let template = match template_name {
        None => return Err(ChainError::MissingTemplate.into()),
        Some(name) => host
            .find_object(name)
            .ok_or_else(|| HostError::NameNotFound {
                name: name.to_string(),
            })?,
    };
    generate(host, Some(template), params, config)
}

/// Head and tail offsets that put the bone ends at `cursor_y`.
///
/// Returns `(head_offset, tail_offset)`.
pub fn cursor_offsets<H: HostScene + ?Sized>(
    host: &H,
    template: Option<ObjectId>,
    cursor_y: f64,
) -> RigResult<(f64, f64)> {
    let template = template.ok_or(ChainError::MissingTemplate)?;
    let bounds = host.object_bounds(template)?;
    let (origin_y, extent_y) = (bounds.origin[1], bounds.extent[1]);
    Ok((
        head_offset_from_cursor(cursor_y, origin_y, extent_y)?,
        tail_offset_from_cursor(cursor_y, origin_y, extent_y)?,
    ))
}
