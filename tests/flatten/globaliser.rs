//! Integration tests for scope elimination.

use chartflat_ast::visitor::{NameReferenceCollector, walk_chart};
use chartflat_ast::{Declaration, Expression, NameRef, State, Statechart, Statement, Transition};
use chartflat_flatten::{FlattenConfig, Globaliser, Tracer, Translator};
use chartflat_foundation::{DeclId, ErrorKind};

fn id(n: u32) -> DeclId {
    DeclId::new(n)
}

/// Two states each declaring a local `count`, both referenced.
fn shadowed() -> Statechart {
    let outer = NameRef::new("count", id(0));
    let inner = NameRef::new("count", id(1));
    Statechart::new("c")
        .with_state(
            State::new("Outer")
                .with_declaration(Declaration::new(id(0), "count", "int"))
                .with_entry(Statement::assign(outer.clone(), Expression::Int(0)))
                .with_state(
                    State::new("Inner")
                        .with_declaration(Declaration::new(id(1), "count", "int"))
                        .with_entry(Statement::assign(inner.clone(), Expression::Name(outer))),
                ),
        )
        .with_transition(Transition::new("t", "Inner", "Inner").when(Expression::Name(inner)))
}

#[test]
fn shadowed_names_become_distinct_globals() {
    let out = Globaliser::default()
        .translate(&shadowed(), &mut Tracer::disabled())
        .unwrap();
    let names: Vec<_> = out.declarations.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["Outer_count", "Outer_Inner_count"]);

    let inner_entry = out.states[0].states[0].entry.clone().unwrap();
    assert_eq!(
        inner_entry,
        Statement::assign(
            NameRef::new("Outer_Inner_count", id(1)),
            Expression::name("Outer_count", id(0)),
        )
    );
}

#[test]
fn every_reference_names_a_global() {
    let out = Globaliser::default()
        .translate(&shadowed(), &mut Tracer::disabled())
        .unwrap();
    let mut refs = NameReferenceCollector::default();
    walk_chart(&mut refs, &out);
    assert!(!refs.names.is_empty());
    for r in &refs.names {
        let decl = out
            .declarations
            .iter()
            .find(|d| Some(d.id) == r.decl)
            .expect("reference points at a global declaration");
        assert_eq!(decl.name, r.name);
    }
}

#[test]
fn custom_separator_and_suffix() {
    let config = FlattenConfig::new()
        .with_separator('$')
        .with_collision_suffix("_dup");
    let chart = Statechart::new("c")
        .with_declaration(Declaration::new(id(0), "A$x", "int"))
        .with_state(State::new("A").with_declaration(Declaration::new(id(1), "x", "int")));
    let out = Globaliser::new(&config)
        .translate(&chart, &mut Tracer::disabled())
        .unwrap();
    let names: Vec<_> = out.declarations.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["A$x", "A$x_dup"]);
}

#[test]
fn association_is_keyed_by_original_id() {
    let (globals, association) = Globaliser::default()
        .associate(&shadowed(), &mut Tracer::disabled())
        .unwrap();
    assert_eq!(globals.len(), 2);
    assert_eq!(association.get(&id(1)).unwrap().name, "Outer_Inner_count");
}

#[test]
fn dangling_reference_is_unresolved() {
    let chart = Statechart::new("c").with_state(
        State::new("A").with_exit(Statement::call("emit", vec![Expression::name("gone", id(5))])),
    );
    let err = Globaliser::default()
        .translate(&chart, &mut Tracer::disabled())
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnresolvedReference { name: "gone".into() });
}
