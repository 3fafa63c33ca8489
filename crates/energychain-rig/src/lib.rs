//! Energy Chain Rig Assembly
//!
//! Builds an energy chain rig inside a host scene: a U-shaped guide curve
//! with a hook controller, an armature whose bones follow the curve through a
//! spline-IK constraint, and one template duplicate bone-parented per link.
//!
//! # Architecture
//!
//! - [`HostScene`] is the scene surface the rig is built against. Any scene
//!   document that can create primitives, open exclusive editing contexts,
//!   duplicate geometry, parent with keep-transform and attach constraints
//!   can host a rig.
//! - [`EditSession`] scopes an editing context; it is released on drop, so
//!   error paths never leave a context open.
//! - [`assembler::assemble`] performs the ordered host calls.
//! - [`generate`] runs validation and planning from `energychain-spec` first,
//!   so invalid input never touches the scene.
//! - [`MemoryScene`] is a complete in-memory host.
//!
//! # Failure policy
//!
//! Errors raised during assembly do not roll back: entities created before the
//! failing step remain in the scene, and the error says so.
//!
//! # Example
//!
//! ```
//! use energychain_rig::{generate, MemoryScene, MeshData, Transform};
//! use energychain_spec::{ChainParameters, GeneratorConfig};
//!
//! let mut scene = MemoryScene::new();
//! let link = scene
//!     .add_mesh("Link", MeshData::cuboid([0.5, 1.0, 0.5]), Transform::IDENTITY)
//!     .unwrap();
//!
//! let params = ChainParameters::new(1.0, 4.0, 3);
//! let rig = generate(&mut scene, Some(link), &params, &GeneratorConfig::default()).unwrap();
//!
//! assert_eq!(rig.bones.len(), 3);
//! assert_eq!(rig.spline_ik.chain_count, 3);
//! ```

pub mod assembler;
pub mod error;
pub mod generate;
pub mod graph;
pub mod memory;
pub mod report;
pub mod scene;
pub mod session;

pub use error::{HostError, HostResult, RigError, RigResult};
pub use generate::{cursor_offsets, generate, generate_by_name};
pub use graph::{BoneRecord, CurveRecord, EntityRef, LinkRecord, RigGraph, SplineIkRecord};
pub use memory::{MemoryScene, MeshData, ObjectKind, SceneObject, SceneOp};
pub use report::{GenerationReport, ReportError, REPORT_VERSION};
pub use scene::{
    BoneInsert, EditMode, HookBinding, HostScene, ObjectBounds, ObjectId, ParentTarget,
    ScaleMode, SplineIkSettings, Transform,
};
pub use session::{with_mode, EditSession};
