//! Scaleset CLI library.
//!
//! Config resolution and command implementations for the `scaleset` binary.

pub mod commands;
pub mod config;
