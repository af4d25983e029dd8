//! Error types for the chartflat pipeline.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

/// Result alias used throughout chartflat.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for chartflat operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error, replacing any existing context.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Records the pipeline stage the error surfaced in.
    ///
    /// An inner stage that already recorded itself wins.
    #[must_use]
    pub fn in_stage(mut self, stage: impl Into<String>) -> Self {
        let context = self.context.get_or_insert_with(ErrorContext::new);
        if context.stage.is_none() {
            context.stage = Some(stage.into());
        }
        self
    }

    /// Records the transition being rewritten when the error surfaced.
    #[must_use]
    pub fn in_transition(mut self, transition: impl Into<String>) -> Self {
        let context = self.context.get_or_insert_with(ErrorContext::new);
        if context.transition.is_none() {
            context.transition = Some(transition.into());
        }
        self
    }

    /// Creates an unresolved reference error.
    #[must_use]
    pub fn unresolved_reference(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnresolvedReference { name: name.into() })
    }

    /// Creates an unknown state error.
    #[must_use]
    pub fn unknown_state(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownState { name: name.into() })
    }

    /// Creates a missing default child error.
    #[must_use]
    pub fn missing_default_child(state: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingDefaultChild {
            state: state.into(),
        })
    }

    /// Creates an unsupported node error.
    #[must_use]
    pub fn unsupported_node(description: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnsupportedNode(description.into()))
    }

    /// Creates an ambiguous state reference error.
    #[must_use]
    pub fn ambiguous_state(name: impl Into<String>, candidates: Vec<String>) -> Self {
        Self::new(ErrorKind::AmbiguousState {
            name: name.into(),
            candidates,
        })
    }

    /// Creates a duplicate sibling state error.
    #[must_use]
    pub fn duplicate_state(path: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateState { path: path.into() })
    }

    /// Creates a duplicate declaration error.
    #[must_use]
    pub fn duplicate_declaration(scope: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateDeclaration {
            scope: scope.into(),
            name: name.into(),
        })
    }

    /// Returns the name of the offending construct, if the error names one.
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        match &self.kind {
            ErrorKind::UnresolvedReference { name }
            | ErrorKind::UnknownState { name }
            | ErrorKind::AmbiguousState { name, .. }
            | ErrorKind::DuplicateDeclaration { name, .. } => Some(name),
            ErrorKind::MissingDefaultChild { state } => Some(state),
            ErrorKind::DuplicateState { path } => Some(path),
            ErrorKind::UnsupportedNode(_)
            | ErrorKind::SerializationError(_)
            | ErrorKind::IoError(_) => None,
        }
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A name reference has no resolvable declaration.
    #[error("unresolved reference: {name}")]
    UnresolvedReference {
        /// The referenced name as written.
        name: String,
    },

    /// A transition or ancestry walk names a state absent from the hierarchy.
    #[error("unknown state: {name}")]
    UnknownState {
        /// The state name as written.
        name: String,
    },

    /// A composite state has no usable default child.
    #[error("missing default child for state {state}")]
    MissingDefaultChild {
        /// Fully-qualified path of the composite state.
        state: String,
    },

    /// A node shape no stage recognizes.
    #[error("unsupported node: {0}")]
    UnsupportedNode(String),

    /// A simple state name matches more than one state.
    #[error("ambiguous state reference {name}: matches {}", candidates.join(", "))]
    AmbiguousState {
        /// The state name as written.
        name: String,
        /// Fully-qualified paths of every matching state.
        candidates: Vec<String>,
    },

    /// Two sibling states share a name.
    #[error("duplicate state: {path}")]
    DuplicateState {
        /// Fully-qualified path of the duplicated state.
        path: String,
    },

    /// A declaration name or identity is declared twice.
    #[error("duplicate declaration {name} in {scope}")]
    DuplicateDeclaration {
        /// Fully-qualified path of the owning scope (`<root>` for the chart).
        scope: String,
        /// The duplicated declaration name.
        name: String,
    },

    /// Encoding or decoding a chart failed.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// Reading or writing a chart file failed.
    #[error("io error: {0}")]
    IoError(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Pipeline stage that failed.
    pub stage: Option<String>,
    /// Transition being rewritten.
    pub transition: Option<String>,
    /// Additional frames, outermost last.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the stage.
    #[must_use]
    pub fn with_stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = Some(stage.into());
        self
    }

    /// Sets the transition.
    #[must_use]
    pub fn with_transition(mut self, transition: impl Into<String>) -> Self {
        self.transition = Some(transition.into());
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(stage) = &self.stage {
            write!(f, "at {stage}")?;
        }
        if let Some(transition) = &self.transition {
            writeln!(f)?;
            write!(f, "  in transition {transition}")?;
        }
        for frame in &self.stack {
            writeln!(f)?;
            write!(f, "  in {frame}")?;
        }
        Ok(())
    }
}
