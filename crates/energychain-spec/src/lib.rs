//! Energy Chain Spec Library
//!
//! Host-independent planning for energy chain rigs: a U-shaped guide curve
//! plus a chain of rigid links that follow it through a spline-IK bone chain.
//!
//! # Overview
//!
//! A generation run flows through four pure stages before anything touches
//! a scene:
//!
//! 1. [`validate`] checks the [`ChainParameters`] against the template extent
//! 2. [`curve::build`] computes the U-shaped polyline
//! 3. [`layout::compute`] plans bone positions and link placement
//! 4. [`naming::unique_name`] allocates collision-free entity names
//!
//! The rig crate consumes these outputs and drives a host scene.
//!
//! # Example
//!
//! ```
//! use energychain_spec::{curve, layout, validate, ChainParameters};
//!
//! let params = ChainParameters::new(1.0, 4.0, 3);
//! validate(&params, 1.0).unwrap();
//!
//! let shape = curve::build(params.radius, params.length).unwrap();
//! let chain = layout::plan(&params, 1.0, 0.0).unwrap();
//!
//! assert!((shape.extrude_amount - 0.4292).abs() < 1e-4);
//! assert_eq!(chain.bones.len(), 3);
//! ```
//!
//! # Modules
//!
//! - [`params`]: Generation parameters
//! - [`config`]: Naming and primitive configuration
//! - [`validation`]: Parameter validation
//! - [`curve`]: U-shape guide curve builder
//! - [`layout`]: Bone chain layout planner
//! - [`naming`]: Unique name allocation
//! - [`offsets`]: Cursor-based offset helpers
//! - [`hash`]: Canonical input hashing
//! - [`error`]: Error types

pub mod config;
pub mod curve;
pub mod error;
pub mod hash;
pub mod layout;
pub mod naming;
pub mod offsets;
pub mod params;
pub mod validation;

pub use config::{EmptyDisplay, GeneratorConfig, DEFAULT_CIRCLE_VERTICES};
pub use curve::{arc_length, CurveShape, Point3};
pub use error::{ChainError, ChainResult};
pub use hash::canonical_params_hash;
pub use layout::{BoneSpec, ChainLayout, LinkObjectSpec};
pub use naming::unique_name;
pub use offsets::{head_offset_from_cursor, tail_offset_from_cursor};
pub use params::{ChainParameters, MIN_RADIUS};
pub use validation::validate;
