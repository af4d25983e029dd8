//! Indexed view of a chart's state hierarchy.
//!
//! Every stage resolves state references and walks ancestry through a
//! [`Hierarchy`] built once from the tree it consumes. States are numbered in
//! pre-order, so a parent always precedes its children and sibling order is
//! declaration order.

use chartflat_ast::{State, Statechart};
use chartflat_foundation::{Error, Result, StatePath};

/// Pre-order index of a state within one [`Hierarchy`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(usize);

impl StateId {
    /// Returns the pre-order index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
struct Node<'a> {
    state: &'a State,
    path: StatePath,
    dotted: String,
    parent: Option<StateId>,
    children: Vec<StateId>,
}

/// Borrowed index over a chart's states.
#[derive(Debug)]
pub struct Hierarchy<'a> {
    nodes: Vec<Node<'a>>,
    roots: Vec<StateId>,
    by_path: im::HashMap<String, StateId>,
    by_name: im::HashMap<String, Vec<StateId>>,
    initial: Option<&'a str>,
}

impl<'a> Hierarchy<'a> {
    /// Indexes every state of `chart`.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateState` if two siblings share a name.
    pub fn build(chart: &'a Statechart) -> Result<Self> {
        let mut hierarchy = Self {
            nodes: Vec::new(),
            roots: Vec::new(),
            by_path: im::HashMap::new(),
            by_name: im::HashMap::new(),
            initial: chart.initial.as_deref(),
        };
        hierarchy.roots = hierarchy.insert_all(&chart.states, None, &StatePath::root())?;
        Ok(hierarchy)
    }

    fn insert_all(
        &mut self,
        states: &'a [State],
        parent: Option<StateId>,
        parent_path: &StatePath,
    ) -> Result<Vec<StateId>> {
        let mut ids = Vec::with_capacity(states.len());
        for state in states {
            let path = parent_path.child(state.name.clone());
            let dotted = path.to_string();
            if self.by_path.contains_key(&dotted) {
                return Err(Error::duplicate_state(dotted));
            }

            let id = StateId(self.nodes.len());
            self.by_path.insert(dotted.clone(), id);
            let mut same_name = self.by_name.get(&state.name).cloned().unwrap_or_default();
            same_name.push(id);
            self.by_name.insert(state.name.clone(), same_name);
            self.nodes.push(Node {
                state,
                path: path.clone(),
                dotted,
                parent,
                children: Vec::new(),
            });

            let children = self.insert_all(&state.states, Some(id), &path)?;
            self.nodes[id.0].children = children;
            ids.push(id);
        }
        Ok(ids)
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Resolves a state reference.
    ///
    /// An exact fully-qualified path wins. Otherwise a name without a
    /// separator must match exactly one state's simple name.
    ///
    /// # Errors
    ///
    /// Returns `UnknownState` if nothing matches, `AmbiguousState` if a
    /// simple name matches several states.
    pub fn resolve(&self, name: &str) -> Result<StateId> {
        if let Some(&id) = self.by_path.get(name) {
            return Ok(id);
        }
        if StatePath::is_qualified(name) {
            return Err(Error::unknown_state(name));
        }
        match self.by_name.get(name).map(Vec::as_slice) {
            Some([id]) => Ok(*id),
            Some(ids) if !ids.is_empty() => Err(Error::ambiguous_state(
                name,
                ids.iter().map(|&id| self.dotted(id).to_string()).collect(),
            )),
            _ => Err(Error::unknown_state(name)),
        }
    }

    /// Returns the number of states.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the chart has no states.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the top-level states in declaration order.
    #[must_use]
    pub fn roots(&self) -> &[StateId] {
        &self.roots
    }

    /// Iterates over all states in pre-order.
    pub fn ids(&self) -> impl Iterator<Item = StateId> + '_ {
        (0..self.nodes.len()).map(StateId)
    }

    /// Returns the indexed state.
    #[must_use]
    pub fn state(&self, id: StateId) -> &'a State {
        self.nodes[id.0].state
    }

    /// Returns the fully-qualified path of a state.
    #[must_use]
    pub fn path(&self, id: StateId) -> &StatePath {
        &self.nodes[id.0].path
    }

    /// Returns the fully-qualified dotted name of a state.
    #[must_use]
    pub fn dotted(&self, id: StateId) -> &str {
        &self.nodes[id.0].dotted
    }

    /// Returns the parent, or `None` for a top-level state.
    #[must_use]
    pub fn parent(&self, id: StateId) -> Option<StateId> {
        self.nodes[id.0].parent
    }

    /// Returns the children in declaration order.
    #[must_use]
    pub fn children(&self, id: StateId) -> &[StateId] {
        &self.nodes[id.0].children
    }

    /// Returns true if the state has no children.
    #[must_use]
    pub fn is_atomic(&self, id: StateId) -> bool {
        self.nodes[id.0].children.is_empty()
    }

    // =========================================================================
    // Ancestry
    // =========================================================================

    /// Iterates from `id` up to its top-level ancestor, `id` included.
    pub fn chain(&self, id: StateId) -> impl Iterator<Item = StateId> + '_ {
        std::iter::successors(Some(id), |&s| self.parent(s))
    }

    /// Iterates over the proper ancestors of `id`, innermost first.
    pub fn ancestors(&self, id: StateId) -> impl Iterator<Item = StateId> + '_ {
        self.chain(id).skip(1)
    }

    /// Returns true if `ancestor` is `id` or one of its ancestors.
    #[must_use]
    pub fn is_ancestor_or_self(&self, ancestor: StateId, id: StateId) -> bool {
        self.chain(id).any(|s| s == ancestor)
    }

    /// Returns the deepest state that is an ancestor-or-self of both
    /// `a` and `b`, or `None` when only the chart root contains both.
    #[must_use]
    pub fn lca(&self, a: StateId, b: StateId) -> Option<StateId> {
        let a_chain: Vec<_> = self.chain(a).collect();
        self.chain(b).find(|s| a_chain.contains(s))
    }

    // =========================================================================
    // Descendants
    // =========================================================================

    /// Returns the atomic descendants of `id` in pre-order (`id` itself when atomic).
    #[must_use]
    pub fn leaves_under(&self, id: StateId) -> Vec<StateId> {
        let mut leaves = Vec::new();
        self.collect_leaves(id, &mut leaves);
        leaves
    }

    fn collect_leaves(&self, id: StateId, leaves: &mut Vec<StateId>) {
        if self.is_atomic(id) {
            leaves.push(id);
            return;
        }
        for &child in self.children(id) {
            self.collect_leaves(child, leaves);
        }
    }

    /// Returns every atomic state in pre-order.
    #[must_use]
    pub fn leaves(&self) -> Vec<StateId> {
        self.ids().filter(|&id| self.is_atomic(id)).collect()
    }

    /// Returns the default child of a composite state, `None` for an atomic one.
    ///
    /// The default child is the one named by the state's `initial`, else the
    /// first declared child.
    ///
    /// # Errors
    ///
    /// Returns `MissingDefaultChild` if `initial` names no child.
    pub fn default_child(&self, id: StateId) -> Result<Option<StateId>> {
        let children = self.children(id);
        if children.is_empty() {
            return Ok(None);
        }
        match self.state(id).initial.as_deref() {
            Some(initial) => children
                .iter()
                .copied()
                .find(|&c| self.state(c).name == initial)
                .map(Some)
                .ok_or_else(|| Error::missing_default_child(self.dotted(id))),
            None => Ok(Some(children[0])),
        }
    }

    /// Returns the default-child chain from `id` down to an atomic state,
    /// both ends included, outermost first.
    ///
    /// # Errors
    ///
    /// Returns `MissingDefaultChild` if a state on the chain has an
    /// unusable `initial`.
    pub fn default_descent(&self, id: StateId) -> Result<Vec<StateId>> {
        let mut descent = vec![id];
        let mut current = id;
        while let Some(child) = self.default_child(current)? {
            descent.push(child);
            current = child;
        }
        Ok(descent)
    }

    /// Returns the atomic state reached by default descent from `id`.
    ///
    /// # Errors
    ///
    /// See [`Hierarchy::default_descent`].
    pub fn default_leaf(&self, id: StateId) -> Result<StateId> {
        Ok(self.default_descent(id)?.last().copied().unwrap_or(id))
    }

    /// Returns the chain entered when the chart starts: the initial top-level
    /// state down to its default leaf. Empty for a chart without states.
    ///
    /// # Errors
    ///
    /// Returns `MissingDefaultChild` if the chart's `initial` names no
    /// top-level state, or a default chain is broken.
    pub fn initial_descent(&self) -> Result<Vec<StateId>> {
        let top = match self.initial {
            Some(initial) => self
                .roots
                .iter()
                .copied()
                .find(|&id| self.state(id).name == initial)
                .ok_or_else(|| Error::missing_default_child("<root>"))?,
            None => match self.roots.first() {
                Some(&id) => id,
                None => return Ok(Vec::new()),
            },
        };
        self.default_descent(top)
    }

    // =========================================================================
    // Rebuilding
    // =========================================================================

    /// Rebuilds the state forest bottom-up.
    ///
    /// `f` receives each state's id, the original state, and its already
    /// rebuilt children, and returns the replacement state.
    pub fn rebuild<F>(&self, mut f: F) -> Vec<State>
    where
        F: FnMut(StateId, &'a State, Vec<State>) -> State,
    {
        fn go<'a, F>(hierarchy: &Hierarchy<'a>, id: StateId, f: &mut F) -> State
        where
            F: FnMut(StateId, &'a State, Vec<State>) -> State,
        {
            let children = hierarchy
                .children(id)
                .iter()
                .map(|&child| go(hierarchy, child, &mut *f))
                .collect();
            f(id, hierarchy.state(id), children)
        }

        self.roots.iter().map(|&id| go(self, id, &mut f)).collect()
    }
}
