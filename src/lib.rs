//! chartflat - Hierarchical statechart flattening
//!
//! This crate re-exports all layers of the chartflat system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: chartflat_runtime    — CLI, serialization
//! Layer 2: chartflat_flatten    — Hierarchy index, flattening stages, tracing
//! Layer 1: chartflat_ast        — Statechart tree, visitors, transforms
//! Layer 0: chartflat_foundation — Core types (Error, DeclId, StatePath)
//! ```

pub use chartflat_ast as ast;
pub use chartflat_flatten as flatten;
pub use chartflat_foundation as foundation;
pub use chartflat_runtime as runtime;

pub use chartflat_flatten::translate;
