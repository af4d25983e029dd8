//! Integration tests for the hierarchy index and the expansion stages.

use chartflat_ast::{Expression, State, Statechart, Statement, Transition};
use chartflat_flatten::{
    DestinationExpander, Finalizer, Hierarchy, SourceExpander, Tracer, Translator,
};
use chartflat_foundation::ErrorKind;

fn log(tag: &str) -> Statement {
    Statement::call("log", vec![Expression::string(tag)])
}

fn logged(name: &str) -> State {
    State::new(name)
        .with_entry(log(&format!("enter {name}")))
        .with_exit(log(&format!("exit {name}")))
}

// =============================================================================
// Hierarchy
// =============================================================================

#[test]
fn hierarchy_default_leaf_and_lca() {
    let chart = Statechart::new("c")
        .with_state(
            State::new("P")
                .with_state(State::new("A"))
                .with_state(State::new("B").with_state(State::new("B1"))),
        )
        .with_state(State::new("C"));
    let h = Hierarchy::build(&chart).unwrap();

    let p = h.resolve("P").unwrap();
    assert_eq!(h.dotted(h.default_leaf(p).unwrap()), "P.A");

    let b1 = h.resolve("P.B.B1").unwrap();
    let a = h.resolve("A").unwrap();
    assert_eq!(h.lca(a, b1), Some(p));
    assert_eq!(h.lca(b1, h.resolve("C").unwrap()), None);
}

// =============================================================================
// Source Expansion
// =============================================================================

#[test]
fn composite_source_yields_one_transition_per_child() {
    let chart = Statechart::new("c")
        .with_state(logged("S").with_state(logged("A1")).with_state(logged("A2")))
        .with_state(logged("T"))
        .with_transition(Transition::new("t", "S", "T").on("e").then(log("act")));

    let out = SourceExpander::default()
        .translate(&chart, &mut Tracer::disabled())
        .unwrap();
    let all = out.all_transitions();
    assert_eq!(all.len(), 2);

    let sources: Vec<_> = all.iter().map(|t| t.source.as_str()).collect();
    assert_eq!(sources, ["S.A1", "S.A2"]);
    for (t, leaf) in all.iter().zip(["A1", "A2"]) {
        assert_eq!(t.destination, "T");
        assert_eq!(t.trigger, "e");
        assert_eq!(
            t.action,
            Statement::seq([log(&format!("exit {leaf}")), log("exit S"), log("act")])
        );
    }
}

#[test]
fn expansion_preserves_guard() {
    let chart = Statechart::new("c")
        .with_state(State::new("S").with_state(State::new("A")))
        .with_state(State::new("T"))
        .with_transition(Transition::new("t", "S", "T").when(Expression::Bool(false)));
    let out = SourceExpander::default()
        .translate(&chart, &mut Tracer::disabled())
        .unwrap();
    assert_eq!(out.all_transitions()[0].guard, Expression::Bool(false));
}

// =============================================================================
// Destination Expansion
// =============================================================================

#[test]
fn composite_destination_targets_first_child() {
    let chart = Statechart::new("c")
        .with_state(State::new("X"))
        .with_state(
            State::new("D")
                .with_entry(log("enter D"))
                .with_state(State::new("D1"))
                .with_state(State::new("D2")),
        )
        .with_transition(Transition::new("t", "X", "D").then(log("act")));

    let out = DestinationExpander
        .translate(&chart, &mut Tracer::disabled())
        .unwrap();
    let t = &out.transitions[0];
    assert_eq!(t.source, "X");
    assert_eq!(t.destination, "D.D1");
    assert_eq!(t.action, Statement::seq([log("act"), log("enter D")]));
}

// =============================================================================
// Finalizer
// =============================================================================

#[test]
fn finalizer_rejects_composite_endpoints() {
    let chart = Statechart::new("c")
        .with_state(State::new("P").with_state(State::new("A")))
        .with_transition(Transition::new("t", "P", "P.A"));
    let err = Finalizer::default()
        .translate(&chart, &mut Tracer::disabled())
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnsupportedNode(_)));
}

#[test]
fn stages_chain_by_hand() {
    let chart = Statechart::new("c")
        .with_state(logged("P").with_state(logged("A")).with_state(logged("B")))
        .with_state(logged("Q").with_state(logged("Q1")))
        .with_transition(Transition::new("t", "P", "Q").then(log("act")));

    let mut tracer = Tracer::disabled();
    let sourced = SourceExpander::default().translate(&chart, &mut tracer).unwrap();
    let destined = DestinationExpander.translate(&sourced, &mut tracer).unwrap();
    let flat = Finalizer::default().translate(&destined, &mut tracer).unwrap();

    let from_b = flat
        .transitions
        .iter()
        .find(|t| t.source == "P_B")
        .unwrap();
    assert_eq!(from_b.destination, "Q_Q1");
    assert_eq!(
        from_b.action,
        Statement::seq([
            log("exit B"),
            log("exit P"),
            log("act"),
            log("enter Q"),
            log("enter Q1"),
        ])
    );
}
