//! The statechart tree: declarations, states, transitions, and the chart root.

use chartflat_foundation::DeclId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ast::{Expression, Statement};

/// A variable declaration scoped to the state whose list holds it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Declaration {
    /// Arena identity referenced by [`crate::NameRef::decl`].
    pub id: DeclId,
    /// Name, unique within the owning scope.
    pub name: String,
    /// Declared type name, attached by the front end.
    pub type_name: String,
    /// Whether this is an input variable or signal.
    pub input: bool,
}

impl Declaration {
    /// Creates a local (non-input) declaration.
    #[must_use]
    pub fn new(id: DeclId, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            type_name: type_name.into(),
            input: false,
        }
    }

    /// Creates an input declaration.
    #[must_use]
    pub fn input(id: DeclId, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            input: true,
            ..Self::new(id, name, type_name)
        }
    }
}

/// A declared type, passed through untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TypeDecl {
    /// Type name.
    pub name: String,
    /// Definition as written by the front end.
    pub definition: String,
}

impl TypeDecl {
    /// Creates a type declaration.
    #[must_use]
    pub fn new(name: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            definition: definition.into(),
        }
    }
}

/// An external function signature, passed through untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FunctionDecl {
    /// Function name.
    pub name: String,
    /// Parameter names and type names.
    pub params: Vec<(String, String)>,
    /// Return type name.
    pub return_type: String,
}

impl FunctionDecl {
    /// Creates a function declaration.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        params: Vec<(String, String)>,
        return_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            params,
            return_type: return_type.into(),
        }
    }
}

/// Where a transition came from before expansion.
///
/// Records the composite states a transition was expanded from, along with
/// the action it carried before any exits or entries were composed into it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Provenance {
    /// Fully-qualified path of the composite source, if the source was expanded.
    #[cfg_attr(feature = "serde", serde(default))]
    pub source: Option<String>,
    /// Fully-qualified path of the composite destination, if the destination was expanded.
    #[cfg_attr(feature = "serde", serde(default))]
    pub destination: Option<String>,
    /// The action as written, set by the first expansion.
    #[cfg_attr(feature = "serde", serde(default))]
    pub action: Option<Statement>,
}

impl Provenance {
    /// Returns true if neither endpoint was expanded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.source.is_none() && self.destination.is_none()
    }

    /// Remembers `action` as the written action unless one is already kept.
    pub fn keep_action(&mut self, action: &Statement) {
        if self.action.is_none() {
            self.action = Some(action.clone());
        }
    }
}

/// A guarded, action-bearing transition between two named states.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Transition {
    /// Transition name.
    pub name: String,
    /// Source state, by fully-qualified path or locally-unique name.
    pub source: String,
    /// Destination state, by fully-qualified path or locally-unique name.
    pub destination: String,
    /// Triggering event name.
    pub trigger: String,
    /// Boolean guard.
    pub guard: Expression,
    /// Action run when the transition fires.
    pub action: Statement,
    /// Expansion history.
    #[cfg_attr(feature = "serde", serde(default))]
    pub provenance: Provenance,
}

impl Transition {
    /// Creates an unguarded transition with no trigger and no action.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        source: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            destination: destination.into(),
            trigger: String::new(),
            guard: Expression::default(),
            action: Statement::skip(),
            provenance: Provenance::default(),
        }
    }

    /// The action as written, before any expansion composed exits or
    /// entries into it.
    #[must_use]
    pub fn written_action(&self) -> &Statement {
        self.provenance.action.as_ref().unwrap_or(&self.action)
    }

    /// Sets the trigger.
    #[must_use]
    pub fn on(mut self, trigger: impl Into<String>) -> Self {
        self.trigger = trigger.into();
        self
    }

    /// Sets the guard.
    #[must_use]
    pub fn when(mut self, guard: Expression) -> Self {
        self.guard = guard;
        self
    }

    /// Sets the action.
    #[must_use]
    pub fn then(mut self, action: Statement) -> Self {
        self.action = action;
        self
    }
}

/// A state, atomic or composite.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct State {
    /// Name, unique among siblings.
    pub name: String,
    /// Declarations scoped to this state.
    pub declarations: Vec<Declaration>,
    /// Entry action.
    pub entry: Option<Statement>,
    /// Exit action.
    pub exit: Option<Statement>,
    /// Explicit default child; the first child when unset.
    #[cfg_attr(feature = "serde", serde(default))]
    pub initial: Option<String>,
    /// Child states in declaration order.
    pub states: Vec<State>,
    /// Transitions whose source is this state.
    pub transitions: Vec<Transition>,
}

impl State {
    /// Creates an empty state.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns true if the state has no children.
    #[must_use]
    pub fn is_atomic(&self) -> bool {
        self.states.is_empty()
    }

    /// Returns true if the state has at least one child.
    #[must_use]
    pub fn is_composite(&self) -> bool {
        !self.states.is_empty()
    }

    /// Returns the child named `name`.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&State> {
        self.states.iter().find(|s| s.name == name)
    }

    /// Sets the entry action.
    #[must_use]
    pub fn with_entry(mut self, entry: Statement) -> Self {
        self.entry = Some(entry);
        self
    }

    /// Sets the exit action.
    #[must_use]
    pub fn with_exit(mut self, exit: Statement) -> Self {
        self.exit = Some(exit);
        self
    }

    /// Sets the explicit default child.
    #[must_use]
    pub fn with_initial(mut self, initial: impl Into<String>) -> Self {
        self.initial = Some(initial.into());
        self
    }

    /// Appends a child state.
    #[must_use]
    pub fn with_state(mut self, state: State) -> Self {
        self.states.push(state);
        self
    }

    /// Appends a declaration.
    #[must_use]
    pub fn with_declaration(mut self, declaration: Declaration) -> Self {
        self.declarations.push(declaration);
        self
    }

    /// Appends a transition.
    #[must_use]
    pub fn with_transition(mut self, transition: Transition) -> Self {
        self.transitions.push(transition);
        self
    }
}

/// The chart root.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Statechart {
    /// Chart name.
    pub name: String,
    /// Declared types.
    pub types: Vec<TypeDecl>,
    /// Declared events.
    pub events: Vec<String>,
    /// Chart-level declarations (the only list after globalisation).
    pub declarations: Vec<Declaration>,
    /// Chart entry action.
    pub entry: Option<Statement>,
    /// Chart exit action.
    pub exit: Option<Statement>,
    /// External function signatures.
    pub functions: Vec<FunctionDecl>,
    /// Explicit initial top-level state; the first state when unset.
    #[cfg_attr(feature = "serde", serde(default))]
    pub initial: Option<String>,
    /// Top-level states.
    pub states: Vec<State>,
    /// Top-level transitions.
    pub transitions: Vec<Transition>,
}

impl Statechart {
    /// Creates an empty chart.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Appends a declared type.
    #[must_use]
    pub fn with_type(mut self, ty: TypeDecl) -> Self {
        self.types.push(ty);
        self
    }

    /// Appends a declared event.
    #[must_use]
    pub fn with_event(mut self, event: impl Into<String>) -> Self {
        self.events.push(event.into());
        self
    }

    /// Appends a chart-level declaration.
    #[must_use]
    pub fn with_declaration(mut self, declaration: Declaration) -> Self {
        self.declarations.push(declaration);
        self
    }

    /// Sets the chart entry action.
    #[must_use]
    pub fn with_entry(mut self, entry: Statement) -> Self {
        self.entry = Some(entry);
        self
    }

    /// Sets the chart exit action.
    #[must_use]
    pub fn with_exit(mut self, exit: Statement) -> Self {
        self.exit = Some(exit);
        self
    }

    /// Appends a function signature.
    #[must_use]
    pub fn with_function(mut self, function: FunctionDecl) -> Self {
        self.functions.push(function);
        self
    }

    /// Sets the explicit initial top-level state.
    #[must_use]
    pub fn with_initial(mut self, initial: impl Into<String>) -> Self {
        self.initial = Some(initial.into());
        self
    }

    /// Appends a top-level state.
    #[must_use]
    pub fn with_state(mut self, state: State) -> Self {
        self.states.push(state);
        self
    }

    /// Appends a top-level transition.
    #[must_use]
    pub fn with_transition(mut self, transition: Transition) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Returns a copy of this chart with its states and top-level
    /// transitions replaced.
    #[must_use]
    pub fn rebuilt(&self, states: Vec<State>, transitions: Vec<Transition>) -> Self {
        Self {
            name: self.name.clone(),
            types: self.types.clone(),
            events: self.events.clone(),
            declarations: self.declarations.clone(),
            entry: self.entry.clone(),
            exit: self.exit.clone(),
            functions: self.functions.clone(),
            initial: self.initial.clone(),
            states,
            transitions,
        }
    }

    /// Returns every transition in the tree: top-level first, then each
    /// state's list in pre-order.
    #[must_use]
    pub fn all_transitions(&self) -> Vec<&Transition> {
        fn collect<'a>(states: &'a [State], out: &mut Vec<&'a Transition>) {
            for state in states {
                out.extend(state.transitions.iter());
                collect(&state.states, out);
            }
        }

        let mut out: Vec<&Transition> = self.transitions.iter().collect();
        collect(&self.states, &mut out);
        out
    }

    /// Returns the maximum nesting depth (0 for a chart without states).
    #[must_use]
    pub fn depth(&self) -> usize {
        fn depth_of(states: &[State]) -> usize {
            states
                .iter()
                .map(|s| 1 + depth_of(&s.states))
                .max()
                .unwrap_or(0)
        }
        depth_of(&self.states)
    }
}
