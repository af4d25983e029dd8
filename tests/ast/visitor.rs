//! Integration tests for visitors and transforms.

use chartflat_ast::visitor::{
    AstTransform, AstVisitor, DeclarationCollector, NameReferenceCollector, StateCounter,
    walk_chart,
};
use chartflat_ast::{Declaration, Expression, NameRef, State, Statechart, Statement, Transition};
use chartflat_foundation::{DeclId, Error, Result};

fn chart() -> Statechart {
    let n = NameRef::new("n", DeclId::new(1));
    Statechart::new("c")
        .with_declaration(Declaration::new(DeclId::new(0), "ticks", "int"))
        .with_entry(Statement::assign(
            NameRef::new("ticks", DeclId::new(0)),
            Expression::Int(0),
        ))
        .with_state(
            State::new("Run")
                .with_declaration(Declaration::new(DeclId::new(1), "n", "int"))
                .with_state(State::new("A").with_entry(Statement::assign(
                    n.clone(),
                    Expression::Int(1),
                )))
                .with_state(State::new("B")),
        )
        .with_transition(Transition::new("t", "A", "B").when(Expression::Name(n)))
}

#[test]
fn collectors_see_the_whole_chart() {
    let chart = chart();

    let mut names = NameReferenceCollector::default();
    walk_chart(&mut names, &chart);
    let seen: Vec<_> = names.names.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(seen, ["ticks", "n", "n"]);

    let mut declarations = DeclarationCollector::default();
    walk_chart(&mut declarations, &chart);
    assert_eq!(declarations.declarations.len(), 2);

    let mut counter = StateCounter::default();
    walk_chart(&mut counter, &chart);
    assert_eq!(counter.atomic, 2);
    assert_eq!(counter.composite, 1);
}

#[derive(Default)]
struct Depths {
    current: usize,
    max: usize,
}

impl AstVisitor for Depths {
    fn enter_state(&mut self, _state: &State) {
        self.current += 1;
        self.max = self.max.max(self.current);
    }

    fn leave_state(&mut self, _state: &State) {
        self.current -= 1;
    }
}

#[test]
fn enter_and_leave_are_balanced() {
    let mut depths = Depths::default();
    walk_chart(&mut depths, &chart());
    assert_eq!(depths.current, 0);
    assert_eq!(depths.max, 2);
}

struct Prefix(&'static str);

impl AstTransform for Prefix {
    fn transform_name(&mut self, name: NameRef) -> Result<NameRef> {
        if name.decl.is_none() {
            return Err(Error::unresolved_reference(name.name));
        }
        Ok(NameRef {
            name: format!("{}{}", self.0, name.name),
            ..name
        })
    }
}

#[test]
fn transform_rewrites_guard_and_action() {
    let t = Transition::new("t", "A", "B")
        .when(Expression::name("n", DeclId::new(1)))
        .then(Statement::assign(
            NameRef::new("n", DeclId::new(1)),
            Expression::Int(2),
        ));
    let out = Prefix("g_").transform_transition(t).unwrap();
    assert_eq!(out.guard, Expression::name("g_n", DeclId::new(1)));
    assert_eq!(
        out.action,
        Statement::assign(NameRef::new("g_n", DeclId::new(1)), Expression::Int(2))
    );
}

#[test]
fn transform_fails_on_dangling_reference() {
    let stmt = Statement::while_loop(
        Expression::Bool(true),
        Statement::Expr(Expression::Name(NameRef::unresolved("ghost"))),
    );
    let err = Prefix("g_").transform_statement(stmt).unwrap_err();
    assert_eq!(err.subject(), Some("ghost"));
}
