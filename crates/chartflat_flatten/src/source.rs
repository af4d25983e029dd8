//! Composite-source expansion.
//!
//! A transition leaving a composite state `S` fires from whichever leaf of
//! `S` is active. The expander replaces it with one copy per leaf `A`, each
//! running the exits from `A` up to and including `S` before the original
//! action. Transitions that already leave an atomic state are kept as-is.
//!
//! Every output transition names its source and destination by
//! fully-qualified path and is stored on its (atomic) source state.

use chartflat_ast::{State, Statechart, Statement, Transition};
use chartflat_foundation::Result;
use tracing::{debug, trace};

use crate::config::FlattenConfig;
use crate::hierarchy::{Hierarchy, StateId};
use crate::pipeline::Translator;
use crate::trace::{Stage, TraceEvent, Tracer};

/// Rewrites composite-source transitions into per-leaf transitions.
#[derive(Clone, Debug)]
pub struct SourceExpander {
    separator: char,
}

impl Default for SourceExpander {
    fn default() -> Self {
        Self::new(&FlattenConfig::default())
    }
}

impl SourceExpander {
    /// Creates an expander using the config's separator for expanded names.
    #[must_use]
    pub fn new(config: &FlattenConfig) -> Self {
        Self {
            separator: config.separator,
        }
    }

    fn expand(
        &self,
        hierarchy: &Hierarchy<'_>,
        transition: &Transition,
        tracer: &mut Tracer,
        placed: &mut [Vec<Transition>],
    ) -> Result<()> {
        let source = hierarchy.resolve(&transition.source)?;
        let destination = hierarchy.resolve(&transition.destination)?;
        let destination = hierarchy.dotted(destination).to_string();

        if hierarchy.is_atomic(source) {
            placed[source.index()].push(Transition {
                source: hierarchy.dotted(source).to_string(),
                destination,
                ..transition.clone()
            });
            return Ok(());
        }

        let leaves = hierarchy.leaves_under(source);
        for &leaf in &leaves {
            let exits = exit_path(hierarchy, leaf, source)
                .into_iter()
                .filter_map(|id| hierarchy.state(id).exit.clone());
            let action = Statement::seq(exits.chain(std::iter::once(transition.action.clone())));

            let mut expanded = Transition {
                name: format!(
                    "{}{}{}",
                    transition.name,
                    self.separator,
                    hierarchy.path(leaf).mangle(self.separator)
                ),
                source: hierarchy.dotted(leaf).to_string(),
                destination: destination.clone(),
                action,
                ..transition.clone()
            };
            expanded.provenance.source = Some(hierarchy.dotted(source).to_string());
            expanded.provenance.keep_action(&transition.action);
            trace!(transition = %expanded.name, "expanded from composite source");
            placed[leaf.index()].push(expanded);
        }

        tracer.record(TraceEvent::SourceExpanded {
            transition: transition.name.clone(),
            source: hierarchy.dotted(source).to_string(),
            leaves: leaves
                .iter()
                .map(|&leaf| hierarchy.dotted(leaf).to_string())
                .collect(),
        });
        Ok(())
    }
}

/// States exited when leaving `composite` from `leaf`, innermost first,
/// both ends included.
fn exit_path(hierarchy: &Hierarchy<'_>, leaf: StateId, composite: StateId) -> Vec<StateId> {
    let mut path: Vec<StateId> = hierarchy
        .chain(leaf)
        .take_while(|&id| id != composite)
        .collect();
    path.push(composite);
    path
}

impl Translator for SourceExpander {
    fn stage(&self) -> Stage {
        Stage::ExpandSource
    }

    fn translate(&self, chart: &Statechart, tracer: &mut Tracer) -> Result<Statechart> {
        let hierarchy = Hierarchy::build(chart)?;
        let mut placed = vec![Vec::new(); hierarchy.len()];

        for transition in chart.all_transitions() {
            self.expand(&hierarchy, transition, tracer, &mut placed)
                .map_err(|e| e.in_transition(&transition.name))?;
        }
        debug!(
            transitions = placed.iter().map(Vec::len).sum::<usize>(),
            "sources expanded"
        );

        let states = hierarchy.rebuild(|id, state, children| State {
            name: state.name.clone(),
            declarations: state.declarations.clone(),
            entry: state.entry.clone(),
            exit: state.exit.clone(),
            initial: state.initial.clone(),
            states: children,
            transitions: std::mem::take(&mut placed[id.index()]),
        });
        Ok(chart.rebuilt(states, Vec::new()))
    }
}
