//! Composite-destination expansion.
//!
//! Entering a composite state `D` means entering its default leaf `D'`. The
//! expander retargets each such transition to `D'` and appends the entries
//! from `D` down to `D'`, outermost first. The transition stays where it is
//! in the tree.

use chartflat_ast::{State, Statechart, Statement, Transition};
use chartflat_foundation::Result;
use tracing::{debug, trace};

use crate::hierarchy::Hierarchy;
use crate::pipeline::Translator;
use crate::trace::{Stage, TraceEvent, Tracer};

/// Retargets composite destinations to their default leaves.
///
/// Expanded destinations keep their names, so the expander takes no config.
#[derive(Clone, Debug, Default)]
pub struct DestinationExpander;

impl DestinationExpander {
    fn expand(
        hierarchy: &Hierarchy<'_>,
        transition: &Transition,
        tracer: &mut Tracer,
    ) -> Result<Transition> {
        let destination = hierarchy.resolve(&transition.destination)?;
        if hierarchy.is_atomic(destination) {
            return Ok(Transition {
                destination: hierarchy.dotted(destination).to_string(),
                ..transition.clone()
            });
        }

        let descent = hierarchy.default_descent(destination)?;
        let leaf = descent.last().copied().unwrap_or(destination);
        let entries = descent
            .iter()
            .filter_map(|&id| hierarchy.state(id).entry.clone());
        let action = Statement::seq(std::iter::once(transition.action.clone()).chain(entries));

        let mut expanded = Transition {
            destination: hierarchy.dotted(leaf).to_string(),
            action,
            ..transition.clone()
        };
        expanded.provenance.destination = Some(hierarchy.dotted(destination).to_string());
        expanded.provenance.keep_action(&transition.action);

        trace!(
            transition = %transition.name,
            destination = %hierarchy.dotted(destination),
            leaf = %expanded.destination,
            "expanded composite destination"
        );
        tracer.record(TraceEvent::DestinationExpanded {
            transition: transition.name.clone(),
            destination: hierarchy.dotted(destination).to_string(),
            leaf: expanded.destination.clone(),
        });
        Ok(expanded)
    }

    fn expand_all(
        hierarchy: &Hierarchy<'_>,
        transitions: &[Transition],
        tracer: &mut Tracer,
    ) -> Result<Vec<Transition>> {
        transitions
            .iter()
            .map(|t| Self::expand(hierarchy, t, tracer).map_err(|e| e.in_transition(&t.name)))
            .collect()
    }
}

impl Translator for DestinationExpander {
    fn stage(&self) -> Stage {
        Stage::ExpandDestination
    }

    fn translate(&self, chart: &Statechart, tracer: &mut Tracer) -> Result<Statechart> {
        let hierarchy = Hierarchy::build(chart)?;

        let top = Self::expand_all(&hierarchy, &chart.transitions, tracer)?;
        let mut placed = hierarchy
            .ids()
            .map(|id| Self::expand_all(&hierarchy, &hierarchy.state(id).transitions, tracer))
            .collect::<Result<Vec<_>>>()?;
        debug!(states = hierarchy.len(), "destinations expanded");

        let states = hierarchy.rebuild(|id, state, children| State {
            name: state.name.clone(),
            declarations: state.declarations.clone(),
            entry: state.entry.clone(),
            exit: state.exit.clone(),
            initial: state.initial.clone(),
            states: children,
            transitions: std::mem::take(&mut placed[id.index()]),
        });
        Ok(chart.rebuilt(states, top))
    }
}
