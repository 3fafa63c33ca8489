//! Energy chain CLI library.
//!
//! Argument types, parameter loading and the command implementations behind
//! the `energychain` binary.

pub mod cli_args;
pub mod commands;
pub mod input;
