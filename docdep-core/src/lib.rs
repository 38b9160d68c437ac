//! Core types for docdep.
//!
//! This crate provides the build environment summary that a documentation
//! build hands to its extensions, and the file output used to persist what
//! extensions render.

mod env;
mod file;

// Build environment
pub use env::{BuildEnvironment, DEFAULT_SOURCE_SUFFIX, Environment};
// File operations
pub use file::{GeneratedFile, write_file};
