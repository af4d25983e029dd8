//! The four-stage flattening pipeline.
//!
//! Each stage is a [`Translator`]: a pure tree-to-tree function. The
//! [`Flattener`] runs them in order, each on the complete output of the one
//! before, and stops at the first error.

use chartflat_ast::Statechart;
use chartflat_foundation::Result;
use tracing::debug;

use crate::config::FlattenConfig;
use crate::destination::DestinationExpander;
use crate::finalize::Finalizer;
use crate::globaliser::Globaliser;
use crate::source::SourceExpander;
use crate::trace::{Stage, Tracer};

/// One stage of the pipeline.
pub trait Translator {
    /// The stage this translator implements.
    fn stage(&self) -> Stage;

    /// Translates `chart` into a new tree.
    ///
    /// # Errors
    ///
    /// Fails on the first construct the stage cannot rewrite.
    fn translate(&self, chart: &Statechart, tracer: &mut Tracer) -> Result<Statechart>;
}

/// Runs the whole pipeline.
///
/// # Example
///
/// ```
/// use chartflat_ast::{State, Statechart, Transition};
/// use chartflat_flatten::Flattener;
///
/// let chart = Statechart::new("door")
///     .with_state(State::new("Closed").with_state(State::new("Locked")))
///     .with_state(State::new("Open"))
///     .with_transition(Transition::new("open", "Closed", "Open"));
///
/// let flat = Flattener::new().translate(&chart).unwrap();
/// let names: Vec<_> = flat.states.iter().map(|s| s.name.as_str()).collect();
/// assert_eq!(names, ["Closed_Locked", "Open"]);
/// assert_eq!(flat.transitions[0].source, "Closed_Locked");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Flattener {
    config: FlattenConfig,
}

impl Flattener {
    /// Creates a flattener with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a flattener with the given configuration.
    #[must_use]
    pub fn with_config(config: FlattenConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &FlattenConfig {
        &self.config
    }

    /// Returns the stages in execution order.
    #[must_use]
    pub fn stages(&self) -> Vec<Box<dyn Translator>> {
        vec![
            Box::new(Globaliser::new(&self.config)),
            Box::new(SourceExpander::new(&self.config)),
            Box::new(DestinationExpander),
            Box::new(Finalizer::new(&self.config)),
        ]
    }

    /// Flattens `chart`, tracing as configured.
    ///
    /// # Errors
    ///
    /// Returns the first stage error, with the stage recorded in its context.
    pub fn translate(&self, chart: &Statechart) -> Result<Statechart> {
        let mut tracer = Tracer::new(self.config.trace.clone());
        self.translate_traced(chart, &mut tracer)
    }

    /// Flattens `chart`, recording into a caller-owned tracer.
    ///
    /// # Errors
    ///
    /// Returns the first stage error, with the stage recorded in its context.
    pub fn translate_traced(&self, chart: &Statechart, tracer: &mut Tracer) -> Result<Statechart> {
        let mut current: Option<Statechart> = None;
        for stage in self.stages() {
            let input = current.as_ref().unwrap_or(chart);
            current = Some(run_stage(stage.as_ref(), input, tracer)?);
        }
        Ok(current.unwrap_or_else(|| chart.clone()))
    }
}

fn run_stage(stage: &dyn Translator, chart: &Statechart, tracer: &mut Tracer) -> Result<Statechart> {
    let name = stage.stage();
    debug!(stage = %name, "stage started");
    tracer.begin_stage(name);

    let result = stage
        .translate(chart, tracer)
        .map_err(|e| e.in_stage(name.name()));
    tracer.end_stage(name, result.is_ok());

    match &result {
        Ok(out) => debug!(
            stage = %name,
            states = out.states.len(),
            transitions = out.all_transitions().len(),
            "stage finished"
        ),
        Err(e) => debug!(stage = %name, error = %e, "stage failed"),
    }
    result
}

/// Flattens `chart` with the default configuration.
///
/// # Errors
///
/// Returns the first stage error.
pub fn translate(chart: &Statechart) -> Result<Statechart> {
    Flattener::new().translate(chart)
}
