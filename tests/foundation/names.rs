//! Integration tests for declaration ids, state paths, and name allocation.

use chartflat_foundation::{DeclId, DeclIdAllocator, NameAllocator, StatePath};

// =============================================================================
// Declaration Ids
// =============================================================================

#[test]
fn decl_ids_are_sequential() {
    let mut ids = DeclIdAllocator::new();
    assert_eq!(ids.next_id(), DeclId::new(0));
    assert_eq!(ids.next_id(), DeclId::new(1));
    assert_eq!(ids.allocated(), 2);
    assert_eq!(DeclId::new(7).to_string(), "#7");
}

// =============================================================================
// State Paths
// =============================================================================

#[test]
fn path_parse_and_display() {
    let path = StatePath::parse("Run.Fast.Turbo");
    assert_eq!(path.depth(), 3);
    assert_eq!(path.name(), Some("Turbo"));
    assert_eq!(path.to_string(), "Run.Fast.Turbo");
    assert_eq!(path.parent().unwrap().to_string(), "Run.Fast");
}

#[test]
fn path_containment() {
    let run = StatePath::parse("Run");
    let fast = run.child("Fast");
    assert!(run.contains(&fast));
    assert!(!fast.contains(&run));
    assert!(StatePath::root().contains(&run));
}

#[test]
fn member_mangling() {
    let scope = StatePath::parse("Run.Fast");
    assert_eq!(scope.mangle_member("speed", '_'), "Run_Fast_speed");
    assert_eq!(StatePath::root().mangle_member("speed", '_'), "speed");
    assert_eq!(scope.mangle('$'), "Run$Fast");
}

// =============================================================================
// Name Allocation
// =============================================================================

#[test]
fn mangled_collisions_resolve_deterministically() {
    let mut names = NameAllocator::new();
    let a = StatePath::parse("A").mangle_member("b_c", '_');
    let b = StatePath::parse("A_b").mangle_member("c", '_');
    assert_eq!(a, b);
    assert_eq!(names.allocate(&a), "A_b_c");
    assert_eq!(names.allocate(&b), "A_b_c1");
    assert_eq!(names.len(), 2);
}

#[test]
fn reserved_names_are_avoided() {
    let mut names = NameAllocator::with_suffix("_x");
    names.reserve("tick");
    assert_eq!(names.allocate("tick"), "tick_x");
}
