//! Command implementations for the energychain CLI.

pub mod generate;
pub mod offsets;
pub mod validate;
