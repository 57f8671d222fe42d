//! Utility functions for identifier encoding, path validation, and link building.
//!
//! - [`id_codec`] - Reversible path ↔ resource-id encoding
//! - [`path`] - Structural validation of redirect paths
//! - [`link_builder`] - Self-link construction with forwarded-host support

pub mod id_codec;
pub mod link_builder;
pub mod path;
