//! Visitor pattern for traversing and rebuilding statechart trees.
//!
//! This module provides two main traits:
//! - [`AstVisitor`] - For read-only traversal
//! - [`AstTransform`] - For rebuilding a tree into a new tree, with errors
//!
//! Both dispatch over the closed [`Expression`] and [`Statement`] sum types
//! with exhaustive matches, so no node kind can be skipped silently.
//!
//! # Example
//!
//! ```
//! use chartflat_ast::{Expression, NameRef, Statement};
//! use chartflat_ast::visitor::{AstVisitor, walk_statement};
//! use chartflat_foundation::DeclId;
//!
//! struct NameCounter(usize);
//!
//! impl AstVisitor for NameCounter {
//!     fn visit_name(&mut self, _name: &NameRef) {
//!         self.0 += 1;
//!     }
//! }
//!
//! let x = NameRef::new("x", DeclId::new(0));
//! let stmt = Statement::assign(x.clone(), Expression::Name(x));
//! let mut counter = NameCounter(0);
//! walk_statement(&mut counter, &stmt);
//! assert_eq!(counter.0, 2); // target and operand
//! ```

use chartflat_foundation::Result;

use crate::ast::{Expression, NameRef, Statement};
use crate::chart::{Declaration, State, Statechart, Transition};

// =============================================================================
// Read-Only Visitor
// =============================================================================

/// Trait for read-only tree visitors.
///
/// Implement the `visit_*`/`enter_*` methods for nodes of interest. The
/// default implementations do nothing; the `walk_*` functions recurse.
#[allow(unused_variables)]
pub trait AstVisitor {
    /// Visit a name reference (in an expression or an assignment target).
    fn visit_name(&mut self, name: &NameRef) {}

    /// Visit a function call before its arguments.
    fn visit_call(&mut self, function: &str, args: &[Expression]) {}

    /// Visit a declaration in a scope list.
    fn visit_declaration(&mut self, declaration: &Declaration) {}

    /// Called before a state's declarations, hooks, transitions, and children.
    fn enter_state(&mut self, state: &State) {}

    /// Called after a state's children.
    fn leave_state(&mut self, state: &State) {}

    /// Visit a transition before its guard and action.
    fn visit_transition(&mut self, transition: &Transition) {}
}

/// Walk an expression depth-first.
pub fn walk_expression<V: AstVisitor + ?Sized>(visitor: &mut V, expr: &Expression) {
    match expr {
        Expression::Binary { left, right, .. } => {
            walk_expression(visitor, left);
            walk_expression(visitor, right);
        }
        Expression::Unary { operand, .. } => walk_expression(visitor, operand),
        Expression::Bool(_) | Expression::Int(_) | Expression::Str(_) => {}
        Expression::Call { function, args } => {
            visitor.visit_call(function, args);
            for arg in args {
                walk_expression(visitor, arg);
            }
        }
        Expression::Name(name) => visitor.visit_name(name),
    }
}

/// Walk a statement depth-first.
pub fn walk_statement<V: AstVisitor + ?Sized>(visitor: &mut V, stmt: &Statement) {
    match stmt {
        Statement::Sequence(items) => {
            for item in items {
                walk_statement(visitor, item);
            }
        }
        Statement::Assign { target, value } => {
            visitor.visit_name(target);
            walk_expression(visitor, value);
        }
        Statement::Expr(expr) => walk_expression(visitor, expr),
        Statement::If {
            condition,
            then_branch,
            else_branch,
        } => {
            walk_expression(visitor, condition);
            walk_statement(visitor, then_branch);
            walk_statement(visitor, else_branch);
        }
        Statement::While { condition, body } => {
            walk_expression(visitor, condition);
            walk_statement(visitor, body);
        }
    }
}

/// Walk a transition's guard and action.
pub fn walk_transition<V: AstVisitor + ?Sized>(visitor: &mut V, transition: &Transition) {
    visitor.visit_transition(transition);
    walk_expression(visitor, &transition.guard);
    walk_statement(visitor, &transition.action);
}

/// Walk a state and everything beneath it.
pub fn walk_state<V: AstVisitor + ?Sized>(visitor: &mut V, state: &State) {
    visitor.enter_state(state);
    for declaration in &state.declarations {
        visitor.visit_declaration(declaration);
    }
    if let Some(entry) = &state.entry {
        walk_statement(visitor, entry);
    }
    if let Some(exit) = &state.exit {
        walk_statement(visitor, exit);
    }
    for transition in &state.transitions {
        walk_transition(visitor, transition);
    }
    for child in &state.states {
        walk_state(visitor, child);
    }
    visitor.leave_state(state);
}

/// Walk a whole chart.
pub fn walk_chart<V: AstVisitor + ?Sized>(visitor: &mut V, chart: &Statechart) {
    for declaration in &chart.declarations {
        visitor.visit_declaration(declaration);
    }
    if let Some(entry) = &chart.entry {
        walk_statement(visitor, entry);
    }
    if let Some(exit) = &chart.exit {
        walk_statement(visitor, exit);
    }
    for transition in &chart.transitions {
        walk_transition(visitor, transition);
    }
    for state in &chart.states {
        walk_state(visitor, state);
    }
}

// =============================================================================
// Rebuilding Transform
// =============================================================================

/// Trait for rebuilding trees.
///
/// Override the hooks that change something; the defaults rebuild the node
/// unchanged by recursing through the `transform_*` functions.
pub trait AstTransform {
    /// Rewrite a name reference.
    ///
    /// # Errors
    ///
    /// Implementations fail when the reference cannot be rewritten.
    fn transform_name(&mut self, name: NameRef) -> Result<NameRef> {
        Ok(name)
    }

    /// Rewrite an expression.
    ///
    /// # Errors
    ///
    /// Propagates errors from nested rewrites.
    fn transform_expression(&mut self, expr: Expression) -> Result<Expression> {
        transform_expression(self, expr)
    }

    /// Rewrite a statement.
    ///
    /// # Errors
    ///
    /// Propagates errors from nested rewrites.
    fn transform_statement(&mut self, stmt: Statement) -> Result<Statement> {
        transform_statement(self, stmt)
    }

    /// Rewrite a transition.
    ///
    /// # Errors
    ///
    /// Propagates errors from nested rewrites.
    fn transform_transition(&mut self, transition: Transition) -> Result<Transition> {
        transform_transition(self, transition)
    }
}

/// Rebuild an expression, routing children through the transformer.
///
/// # Errors
///
/// Propagates the first error raised by the transformer.
pub fn transform_expression<T: AstTransform + ?Sized>(
    transformer: &mut T,
    expr: Expression,
) -> Result<Expression> {
    Ok(match expr {
        Expression::Binary { op, left, right } => Expression::Binary {
            op,
            left: Box::new(transformer.transform_expression(*left)?),
            right: Box::new(transformer.transform_expression(*right)?),
        },
        Expression::Unary { op, operand } => Expression::Unary {
            op,
            operand: Box::new(transformer.transform_expression(*operand)?),
        },
        literal @ (Expression::Bool(_) | Expression::Int(_) | Expression::Str(_)) => literal,
        Expression::Call { function, args } => Expression::Call {
            function,
            args: args
                .into_iter()
                .map(|arg| transformer.transform_expression(arg))
                .collect::<Result<_>>()?,
        },
        Expression::Name(name) => Expression::Name(transformer.transform_name(name)?),
    })
}

/// Rebuild a statement, routing children through the transformer.
///
/// # Errors
///
/// Propagates the first error raised by the transformer.
pub fn transform_statement<T: AstTransform + ?Sized>(
    transformer: &mut T,
    stmt: Statement,
) -> Result<Statement> {
    Ok(match stmt {
        Statement::Sequence(items) => Statement::Sequence(
            items
                .into_iter()
                .map(|item| transformer.transform_statement(item))
                .collect::<Result<_>>()?,
        ),
        Statement::Assign { target, value } => Statement::Assign {
            target: transformer.transform_name(target)?,
            value: transformer.transform_expression(value)?,
        },
        Statement::Expr(expr) => Statement::Expr(transformer.transform_expression(expr)?),
        Statement::If {
            condition,
            then_branch,
            else_branch,
        } => Statement::If {
            condition: transformer.transform_expression(condition)?,
            then_branch: Box::new(transformer.transform_statement(*then_branch)?),
            else_branch: Box::new(transformer.transform_statement(*else_branch)?),
        },
        Statement::While { condition, body } => Statement::While {
            condition: transformer.transform_expression(condition)?,
            body: Box::new(transformer.transform_statement(*body)?),
        },
    })
}

/// Rebuild a transition's guard and action.
///
/// # Errors
///
/// Propagates the first error raised by the transformer.
pub fn transform_transition<T: AstTransform + ?Sized>(
    transformer: &mut T,
    transition: Transition,
) -> Result<Transition> {
    Ok(Transition {
        guard: transformer.transform_expression(transition.guard)?,
        action: transformer.transform_statement(transition.action)?,
        ..transition
    })
}

/// Rebuild an optional hook.
///
/// # Errors
///
/// Propagates the first error raised by the transformer.
pub fn transform_hook<T: AstTransform + ?Sized>(
    transformer: &mut T,
    hook: Option<Statement>,
) -> Result<Option<Statement>> {
    hook.map(|stmt| transformer.transform_statement(stmt))
        .transpose()
}

// =============================================================================
// Utility Visitors
// =============================================================================

/// Collects every name reference in traversal order.
#[derive(Debug, Default)]
pub struct NameReferenceCollector {
    /// Collected references.
    pub names: Vec<NameRef>,
}

impl AstVisitor for NameReferenceCollector {
    fn visit_name(&mut self, name: &NameRef) {
        self.names.push(name.clone());
    }
}

/// Collects every declaration in traversal order.
#[derive(Debug, Default)]
pub struct DeclarationCollector {
    /// Collected declarations.
    pub declarations: Vec<Declaration>,
}

impl AstVisitor for DeclarationCollector {
    fn visit_declaration(&mut self, declaration: &Declaration) {
        self.declarations.push(declaration.clone());
    }
}

/// Counts states, splitting atomic from composite.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StateCounter {
    /// States without children.
    pub atomic: usize,
    /// States with children.
    pub composite: usize,
}

impl AstVisitor for StateCounter {
    fn enter_state(&mut self, state: &State) {
        if state.is_atomic() {
            self.atomic += 1;
        } else {
            self.composite += 1;
        }
    }
}
