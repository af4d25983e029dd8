//! LCA composition and single-level output.
//!
//! By now every transition runs between two atomic states. The finalizer
//! wraps each carried action with the exits and entries the hierarchy still
//! implies, then emits one flat list of leaves with every transition at the
//! top level.
//!
//! # Composition
//!
//! For a transition `A -> B` whose nominal endpoints (before expansion) were
//! `S` and `D`, let `L` be the deepest state containing both. The scope the
//! transition crosses is `L`, or `L`'s parent when `L` is `S` or `D` itself.
//! Every state below the scope on the source side is exited (innermost
//! first) and every state below it on the destination side is entered
//! (outermost first). The chains are rebuilt from the leaves around the
//! action as written, so exits an earlier expansion composed are not
//! repeated and run in hierarchy order. A plain atomic self-transition
//! injects nothing.

use chartflat_ast::{State, Statechart, Statement, Transition};
use chartflat_foundation::{Error, NameAllocator, Result};
use tracing::{debug, trace};

use crate::config::FlattenConfig;
use crate::hierarchy::{Hierarchy, StateId};
use crate::pipeline::Translator;
use crate::trace::{Stage, TraceEvent, Tracer};

/// Emits the flat chart.
#[derive(Clone, Debug)]
pub struct Finalizer {
    separator: char,
    collision_suffix: String,
}

impl Default for Finalizer {
    fn default() -> Self {
        Self::new(&FlattenConfig::default())
    }
}

/// The exits and entries injected around one transition's action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Composition {
    /// Deepest state containing both nominal endpoints, `None` for the root.
    pub lca: Option<StateId>,
    /// States exited, innermost first.
    pub exits: Vec<StateId>,
    /// States entered, outermost first.
    pub entries: Vec<StateId>,
}

impl Composition {
    /// Composes a transition against `hierarchy`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownState` if an endpoint or provenance path does not
    /// resolve.
    pub fn of(hierarchy: &Hierarchy<'_>, transition: &Transition) -> Result<Self> {
        let source = hierarchy.resolve(&transition.source)?;
        let destination = hierarchy.resolve(&transition.destination)?;
        let provenance = &transition.provenance;

        if source == destination && provenance.is_empty() {
            return Ok(Self {
                lca: Some(source),
                exits: Vec::new(),
                entries: Vec::new(),
            });
        }

        let nominal_source = match &provenance.source {
            Some(path) => hierarchy.resolve(path)?,
            None => source,
        };
        let nominal_destination = match &provenance.destination {
            Some(path) => hierarchy.resolve(path)?,
            None => destination,
        };

        let lca = hierarchy.lca(nominal_source, nominal_destination);
        let scope = match lca {
            Some(l) if l == nominal_source || l == nominal_destination => hierarchy.parent(l),
            other => other,
        };

        let mut entries = climb(hierarchy, Some(destination), scope);
        entries.reverse();
        Ok(Self {
            lca,
            exits: climb(hierarchy, Some(source), scope),
            entries,
        })
    }

    /// Wraps `action` with the composed exits and entries. `action` is the
    /// transition's written action, without any expansion hooks.
    #[must_use]
    pub fn apply(&self, hierarchy: &Hierarchy<'_>, action: &Statement) -> Statement {
        let exits = self
            .exits
            .iter()
            .filter_map(|&id| hierarchy.state(id).exit.clone());
        let entries = self
            .entries
            .iter()
            .filter_map(|&id| hierarchy.state(id).entry.clone());
        Statement::seq(
            exits
                .chain(std::iter::once(action.clone()))
                .chain(entries),
        )
    }
}

/// States from `from` up to, excluding, `scope`; innermost first.
fn climb(hierarchy: &Hierarchy<'_>, from: Option<StateId>, scope: Option<StateId>) -> Vec<StateId> {
    std::iter::successors(from, |&id| hierarchy.parent(id))
        .take_while(|&id| Some(id) != scope)
        .collect()
}

impl Finalizer {
    /// Creates a finalizer using the config's naming rules.
    #[must_use]
    pub fn new(config: &FlattenConfig) -> Self {
        Self {
            separator: config.separator,
            collision_suffix: config.collision_suffix.clone(),
        }
    }

    fn finalize(
        hierarchy: &Hierarchy<'_>,
        transition: &Transition,
        names: &[Option<String>],
        tracer: &mut Tracer,
    ) -> Result<Transition> {
        let composition = Composition::of(hierarchy, transition)?;
        let source = hierarchy.resolve(&transition.source)?;
        let destination = hierarchy.resolve(&transition.destination)?;
        let final_name = |id: StateId| {
            names[id.index()].clone().ok_or_else(|| {
                Error::unsupported_node(format!(
                    "transition endpoint {} is not an atomic state",
                    hierarchy.dotted(id)
                ))
            })
        };

        let finalized = Transition {
            name: transition.name.clone(),
            source: final_name(source)?,
            destination: final_name(destination)?,
            trigger: transition.trigger.clone(),
            guard: transition.guard.clone(),
            action: composition.apply(hierarchy, transition.written_action()),
            provenance: transition.provenance.clone(),
        };

        let lca = composition.lca.map(|id| hierarchy.dotted(id).to_string());
        trace!(
            transition = %finalized.name,
            lca = lca.as_deref().unwrap_or("<root>"),
            exits = composition.exits.len(),
            entries = composition.entries.len(),
            "transition composed"
        );
        tracer.record(TraceEvent::TransitionFinalized {
            transition: finalized.name.clone(),
            lca,
            exits: composition.exits.len(),
            entries: composition.entries.len(),
        });
        Ok(finalized)
    }

    /// Names every leaf by its mangled path; composite slots stay `None`.
    fn leaf_names(&self, hierarchy: &Hierarchy<'_>) -> Vec<Option<String>> {
        let mut allocator = NameAllocator::with_suffix(self.collision_suffix.clone());
        let mut names = vec![None; hierarchy.len()];
        for leaf in hierarchy.leaves() {
            names[leaf.index()] =
                Some(allocator.allocate(&hierarchy.path(leaf).mangle(self.separator)));
        }
        names
    }
}

impl Translator for Finalizer {
    fn stage(&self) -> Stage {
        Stage::Finalize
    }

    fn translate(&self, chart: &Statechart, tracer: &mut Tracer) -> Result<Statechart> {
        let hierarchy = Hierarchy::build(chart)?;
        let names = self.leaf_names(&hierarchy);

        let transitions = chart
            .all_transitions()
            .into_iter()
            .map(|t| {
                Self::finalize(&hierarchy, t, &names, tracer).map_err(|e| e.in_transition(&t.name))
            })
            .collect::<Result<Vec<_>>>()?;

        let states: Vec<State> = hierarchy
            .leaves()
            .into_iter()
            .zip(names.iter().flatten())
            .map(|(leaf, name)| {
                let original = hierarchy.state(leaf);
                State {
                    name: name.clone(),
                    entry: original.entry.clone(),
                    exit: original.exit.clone(),
                    ..State::default()
                }
            })
            .collect();

        let descent = hierarchy.initial_descent()?;
        let initial = descent
            .last()
            .and_then(|&leaf| names[leaf.index()].clone());
        let entry_parts: Vec<Statement> = chart
            .entry
            .iter()
            .cloned()
            .chain(
                descent
                    .iter()
                    .filter_map(|&id| hierarchy.state(id).entry.clone()),
            )
            .collect();
        let entry = (!entry_parts.is_empty()).then(|| Statement::seq(entry_parts));

        debug!(
            states = states.len(),
            transitions = transitions.len(),
            "chart finalized"
        );
        Ok(Statechart {
            entry,
            initial,
            ..chart.rebuilt(states, transitions)
        })
    }
}
