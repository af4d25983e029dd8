//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Error, DeclId, StatePath, and name allocation.

mod errors;
mod names;
