//! Integration tests for Layer 1: AST
//!
//! Tests for the statechart tree, its builders, and visitors.

mod visitor;
