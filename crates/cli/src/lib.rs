//! Command-line front end for the X1 dataset API.
//!
//! Exposes the command definitions, dispatch, and job polling so the binary
//! and integration tests share one implementation.

pub mod commands;
pub mod poll;
