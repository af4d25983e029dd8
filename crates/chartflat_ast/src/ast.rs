//! Expressions and statements carried by guards, actions, and entry/exit hooks.

use std::fmt;

use chartflat_foundation::DeclId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Binary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Rem,
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `&&`
    And,
    /// `||`
    Or,
}

impl BinaryOp {
    /// The operator's written symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::And => "&&",
            Self::Or => "||",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Unary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnaryOp {
    /// `-`
    Neg,
    /// `!`
    Not,
}

impl UnaryOp {
    /// The operator's written symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Not => "!",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A reference to a declared variable.
///
/// `decl` is the back-reference established by the front end. It is a lookup
/// key, never ownership: the declaration itself lives in a scope's list.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NameRef {
    /// The name as written at the reference site.
    pub name: String,
    /// The declaration this reference resolves to.
    pub decl: Option<DeclId>,
}

impl NameRef {
    /// Creates a resolved reference.
    #[must_use]
    pub fn new(name: impl Into<String>, decl: DeclId) -> Self {
        Self {
            name: name.into(),
            decl: Some(decl),
        }
    }

    /// Creates a reference the front end could not resolve.
    #[must_use]
    pub fn unresolved(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            decl: None,
        }
    }
}

/// An expression.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expression {
    /// `left op right`
    Binary {
        /// The operator.
        op: BinaryOp,
        /// Left operand.
        left: Box<Expression>,
        /// Right operand.
        right: Box<Expression>,
    },
    /// `op operand`
    Unary {
        /// The operator.
        op: UnaryOp,
        /// The operand.
        operand: Box<Expression>,
    },
    /// `true` or `false`
    Bool(bool),
    /// Integer literal like `42`
    Int(i64),
    /// String literal like `"hello"`
    Str(String),
    /// Function call like `f(a, b)`
    Call {
        /// Called function name (functions are not renamed).
        function: String,
        /// Arguments in order.
        args: Vec<Expression>,
    },
    /// Variable reference
    Name(NameRef),
}

impl Expression {
    /// Creates a binary expression.
    #[must_use]
    pub fn binary(op: BinaryOp, left: Expression, right: Expression) -> Self {
        Self::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Creates a unary expression.
    #[must_use]
    pub fn unary(op: UnaryOp, operand: Expression) -> Self {
        Self::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    /// Creates a resolved variable reference.
    #[must_use]
    pub fn name(name: impl Into<String>, decl: DeclId) -> Self {
        Self::Name(NameRef::new(name, decl))
    }

    /// Creates a function call.
    #[must_use]
    pub fn call(function: impl Into<String>, args: Vec<Expression>) -> Self {
        Self::Call {
            function: function.into(),
            args,
        }
    }

    /// Creates a string literal.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Str(value.into())
    }

    /// Returns true for the literal `true`, the guard of an unguarded transition.
    #[must_use]
    pub const fn is_true(&self) -> bool {
        matches!(self, Self::Bool(true))
    }
}

impl Default for Expression {
    fn default() -> Self {
        Self::Bool(true)
    }
}

/// A statement.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Statement {
    /// Statements run in order. The empty sequence is the no-op.
    Sequence(Vec<Statement>),
    /// `target := value`
    Assign {
        /// Assigned variable.
        target: NameRef,
        /// Assigned value.
        value: Expression,
    },
    /// An expression run for its effect (typically a call).
    Expr(Expression),
    /// `if condition then ... else ...`
    If {
        /// Branch condition.
        condition: Expression,
        /// Taken when the condition holds.
        then_branch: Box<Statement>,
        /// Taken otherwise.
        else_branch: Box<Statement>,
    },
    /// `while condition do ...`
    While {
        /// Loop condition.
        condition: Expression,
        /// Loop body.
        body: Box<Statement>,
    },
}

impl Statement {
    /// The no-op statement.
    #[must_use]
    pub const fn skip() -> Self {
        Self::Sequence(Vec::new())
    }

    /// Returns true if running this statement has no effect.
    #[must_use]
    pub fn is_skip(&self) -> bool {
        match self {
            Self::Sequence(items) => items.iter().all(Self::is_skip),
            _ => false,
        }
    }

    /// Creates an assignment.
    #[must_use]
    pub fn assign(target: NameRef, value: Expression) -> Self {
        Self::Assign { target, value }
    }

    /// Creates a call statement.
    #[must_use]
    pub fn call(function: impl Into<String>, args: Vec<Expression>) -> Self {
        Self::Expr(Expression::call(function, args))
    }

    /// Creates a conditional.
    #[must_use]
    pub fn if_else(condition: Expression, then_branch: Statement, else_branch: Statement) -> Self {
        Self::If {
            condition,
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        }
    }

    /// Creates a loop.
    #[must_use]
    pub fn while_loop(condition: Expression, body: Statement) -> Self {
        Self::While {
            condition,
            body: Box::new(body),
        }
    }

    /// Sequences `parts` into one statement.
    ///
    /// Nested sequences are spliced and no-ops dropped, so composed actions
    /// stay flat. A single surviving statement is returned as-is.
    #[must_use]
    pub fn seq(parts: impl IntoIterator<Item = Statement>) -> Self {
        let mut items = Vec::new();
        for part in parts {
            part.splice_into(&mut items);
        }
        if items.len() == 1 {
            items.pop().unwrap_or_else(Self::skip)
        } else {
            Self::Sequence(items)
        }
    }

    fn splice_into(self, items: &mut Vec<Statement>) {
        match self {
            Self::Sequence(inner) => {
                for stmt in inner {
                    stmt.splice_into(items);
                }
            }
            other => items.push(other),
        }
    }

    /// Returns the top-level statements, treating a non-sequence as one item.
    #[must_use]
    pub fn items(&self) -> &[Statement] {
        match self {
            Self::Sequence(items) => items,
            other => std::slice::from_ref(other),
        }
    }
}

impl Default for Statement {
    fn default() -> Self {
        Self::skip()
    }
}
