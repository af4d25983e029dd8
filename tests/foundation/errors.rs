//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use chartflat_foundation::{Error, ErrorContext, ErrorKind};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_unresolved_reference() {
    let err = Error::unresolved_reference("speed");
    assert!(matches!(err.kind, ErrorKind::UnresolvedReference { .. }));
    assert_eq!(format!("{err}"), "unresolved reference: speed");
}

#[test]
fn error_unknown_state() {
    let err = Error::unknown_state("Z");
    assert_eq!(err.kind, ErrorKind::UnknownState { name: "Z".into() });
    assert_eq!(err.subject(), Some("Z"));
}

#[test]
fn error_missing_default_child() {
    let err = Error::missing_default_child("Run.Fast");
    let msg = format!("{err}");
    assert!(msg.contains("Run.Fast"));
}

#[test]
fn error_ambiguous_state_lists_candidates() {
    let err = Error::ambiguous_state("Idle", vec!["A.Idle".into(), "B.Idle".into()]);
    let msg = format!("{err}");
    assert!(msg.contains("A.Idle, B.Idle"));
    assert_eq!(err.subject(), Some("Idle"));
}

#[test]
fn error_duplicate_declaration() {
    let err = Error::duplicate_declaration("<root>", "x");
    assert_eq!(format!("{err}"), "duplicate declaration x in <root>");
}

#[test]
fn error_unsupported_node_has_no_subject() {
    let err = Error::unsupported_node("parallel region");
    assert_eq!(err.subject(), None);
    assert!(format!("{err}").contains("parallel region"));
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn error_without_context() {
    let err = Error::unknown_state("Z");
    assert!(err.context.is_none());
}

#[test]
fn inner_stage_is_kept() {
    let err = Error::unknown_state("Z")
        .in_transition("go")
        .in_stage("expand-source")
        .in_stage("pipeline");
    let context = err.context.unwrap();
    assert_eq!(context.stage.as_deref(), Some("expand-source"));
    assert_eq!(context.transition.as_deref(), Some("go"));
}

#[test]
fn context_display() {
    let context = ErrorContext::new()
        .with_stage("finalize")
        .with_transition("t")
        .with_frame("state P.A");
    assert_eq!(
        context.to_string(),
        "at finalize\n  in transition t\n  in state P.A"
    );
}

#[test]
fn with_context_replaces() {
    let err = Error::unknown_state("Z")
        .in_stage("globalise")
        .with_context(ErrorContext::new().with_stage("finalize"));
    assert_eq!(err.context.unwrap().stage.as_deref(), Some("finalize"));
}
