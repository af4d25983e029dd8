//! Integration tests for Layer 2: Flatten
//!
//! Tests for the hierarchy index, each flattening stage, and the full pipeline.

mod globaliser;
mod properties;
mod stages;
