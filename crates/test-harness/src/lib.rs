//! Shared fixtures for end-to-end testing.
//!
//! Provides canned block assemblies and pre-built solver responses for
//! driving the full identify → compute → render flow against the scripted
//! solver and the recording renderer.

pub mod fixtures;

pub use fixtures::{identified, slab, tower, with_uniform_forces};
