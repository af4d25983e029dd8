//! Property tests over generated hierarchies.

use std::collections::HashSet;

use chartflat_ast::{Declaration, Expression, NameRef, State, Statechart, Statement, Transition};
use chartflat_flatten::{Hierarchy, translate};
use chartflat_foundation::{DeclIdAllocator, StatePath};
use proptest::prelude::*;

#[derive(Clone, Debug)]
struct Shape(Vec<Shape>);

fn forest() -> impl Strategy<Value = Vec<Shape>> {
    let leaf = Just(Shape(Vec::new()));
    let node = leaf.prop_recursive(3, 24, 3, |inner| {
        prop::collection::vec(inner, 1..4).prop_map(Shape)
    });
    prop::collection::vec(node, 1..4)
}

fn hook(kind: &str, path: &StatePath) -> Statement {
    Statement::call(kind, vec![Expression::string(path.to_string())])
}

/// `(kind, path)` for every `enter`/`exit` hook in `action`, in order.
fn hooks(action: &Statement) -> Vec<(String, StatePath)> {
    action
        .items()
        .iter()
        .filter_map(|stmt| match stmt {
            Statement::Expr(Expression::Call { function, args })
                if function == "enter" || function == "exit" =>
            {
                match args.as_slice() {
                    [Expression::Str(path)] => Some((function.clone(), StatePath::parse(path))),
                    _ => None,
                }
            }
            _ => None,
        })
        .collect()
}

/// Every state is named by its sibling index, declares its own `x`, and
/// logs its entry and exit by path.
fn build(
    shapes: &[Shape],
    scope: &StatePath,
    ids: &mut DeclIdAllocator,
    paths: &mut Vec<String>,
) -> Vec<State> {
    let mut states = Vec::new();
    for (i, shape) in shapes.iter().enumerate() {
        let name = format!("S{i}");
        let path = scope.child(name.clone());
        paths.push(path.to_string());

        let x = ids.next_id();
        let mut state = State::new(name)
            .with_declaration(Declaration::new(x, "x", "int"))
            .with_entry(Statement::seq([
                Statement::assign(NameRef::new("x", x), Expression::Int(1)),
                hook("enter", &path),
            ]))
            .with_exit(hook("exit", &path));
        state.states = build(&shape.0, &path, ids, paths);
        states.push(state);
    }
    states
}

fn chart(shapes: &[Shape], pairs: &[(usize, usize)]) -> Statechart {
    let mut ids = DeclIdAllocator::new();
    let mut paths = Vec::new();
    let mut chart = Statechart::new("generated").with_event("e");
    chart.states = build(shapes, &StatePath::root(), &mut ids, &mut paths);
    for (k, &(a, b)) in pairs.iter().enumerate() {
        chart = chart.with_transition(
            Transition::new(
                format!("t{k}"),
                paths[a % paths.len()].clone(),
                paths[b % paths.len()].clone(),
            )
            .on("e"),
        );
    }
    chart
}

proptest! {
    #[test]
    fn global_names_are_pairwise_distinct(shapes in forest()) {
        let out = translate(&chart(&shapes, &[])).unwrap();
        let names: HashSet<_> = out.declarations.iter().map(|d| d.name.clone()).collect();
        prop_assert_eq!(names.len(), out.declarations.len());
    }

    #[test]
    fn output_is_atomic_to_atomic(
        shapes in forest(),
        pairs in prop::collection::vec((0usize..64, 0usize..64), 0..8),
    ) {
        let out = translate(&chart(&shapes, &pairs)).unwrap();
        let states: HashSet<_> = out.states.iter().map(|s| s.name.as_str()).collect();

        prop_assert!(out.states.iter().all(|s| s.is_atomic() && s.transitions.is_empty()));
        prop_assert_eq!(states.len(), out.states.len());
        for t in &out.transitions {
            prop_assert!(states.contains(t.source.as_str()));
            prop_assert!(states.contains(t.destination.as_str()));
        }
    }

    #[test]
    fn one_transition_per_source_leaf(
        shapes in forest(),
        pairs in prop::collection::vec((0usize..64, 0usize..64), 0..8),
    ) {
        let input = chart(&shapes, &pairs);
        let hierarchy = Hierarchy::build(&input).unwrap();
        let expected: usize = input
            .transitions
            .iter()
            .map(|t| hierarchy.leaves_under(hierarchy.resolve(&t.source).unwrap()).len())
            .sum();

        let out = translate(&input).unwrap();
        prop_assert_eq!(out.transitions.len(), expected);
        prop_assert_eq!(out.states.len(), hierarchy.leaves().len());
    }

    #[test]
    fn atomic_self_transitions_stay_silent(
        shapes in forest(),
        picks in prop::collection::vec(0usize..64, 1..4),
    ) {
        let pairs: Vec<_> = picks.iter().map(|&p| (p, p)).collect();
        let input = chart(&shapes, &pairs);
        let hierarchy = Hierarchy::build(&input).unwrap();
        let out = translate(&input).unwrap();

        for t in &input.transitions {
            if hierarchy.is_atomic(hierarchy.resolve(&t.source).unwrap()) {
                let flat = out.transitions.iter().find(|f| f.name == t.name).unwrap();
                prop_assert!(flat.action.is_skip());
            }
        }
    }

    #[test]
    fn hooks_run_once_in_hierarchy_order(
        shapes in forest(),
        pairs in prop::collection::vec((0usize..64, 0usize..64), 1..8),
    ) {
        let out = translate(&chart(&shapes, &pairs)).unwrap();
        for t in &out.transitions {
            let hooks = hooks(&t.action);
            let split = hooks.iter().position(|(kind, _)| kind == "enter").unwrap_or(hooks.len());
            let (exits, entries) = hooks.split_at(split);
            prop_assert!(entries.iter().all(|(kind, _)| kind == "enter"));
            let exits: Vec<&StatePath> = exits.iter().map(|(_, path)| path).collect();
            let entries: Vec<&StatePath> = entries.iter().map(|(_, path)| path).collect();

            // Exits climb from the source leaf one parent at a time.
            if let Some(first) = exits.first() {
                prop_assert_eq!(first.mangle('_'), t.source.clone());
            }
            for pair in exits.windows(2) {
                prop_assert_eq!(pair[0].parent(), Some(pair[1].clone()));
            }

            // Entries descend one child at a time to the destination leaf.
            if let Some(last) = entries.last() {
                prop_assert_eq!(last.mangle('_'), t.destination.clone());
            }
            for pair in entries.windows(2) {
                prop_assert_eq!(pair[1].parent(), Some(pair[0].clone()));
            }

            // Both chains stop under the same scope.
            if let (Some(outer_exit), Some(outer_entry)) = (exits.last(), entries.first()) {
                prop_assert_eq!(outer_exit.parent(), outer_entry.parent());
            }
        }
    }
}
