//! File-to-file flattening, as run by the `chartflat` binary.

use std::fmt;
use std::path::{Path, PathBuf};

use chartflat_ast::{State, Statechart};
use chartflat_ast::visitor::{StateCounter, walk_chart};
use chartflat_flatten::Flattener;
use chartflat_foundation::Result;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::serialize::{load_from_file, save_to_file};

/// Shape statistics for a chart.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSummary {
    /// Chart name.
    pub name: String,
    /// States without children.
    pub atomic_states: usize,
    /// States with children.
    pub composite_states: usize,
    /// Transitions anywhere in the tree.
    pub transitions: usize,
    /// Declarations anywhere in the tree.
    pub declarations: usize,
    /// Maximum nesting depth.
    pub depth: usize,
}

impl ChartSummary {
    /// Summarizes `chart`.
    #[must_use]
    pub fn of(chart: &Statechart) -> Self {
        fn declarations(states: &[State]) -> usize {
            states
                .iter()
                .map(|s| s.declarations.len() + declarations(&s.states))
                .sum()
        }

        let mut counter = StateCounter::default();
        walk_chart(&mut counter, chart);

        Self {
            name: chart.name.clone(),
            atomic_states: counter.atomic,
            composite_states: counter.composite,
            transitions: chart.all_transitions().len(),
            declarations: chart.declarations.len() + declarations(&chart.states),
            depth: chart.depth(),
        }
    }
}

impl fmt::Display for ChartSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} state(s) ({} atomic, {} composite), {} transition(s), {} declaration(s), depth {}",
            self.name,
            self.atomic_states + self.composite_states,
            self.atomic_states,
            self.composite_states,
            self.transitions,
            self.declarations,
            self.depth
        )
    }
}

/// The outcome of flattening one file.
#[derive(Clone, Debug)]
pub struct FlattenReport {
    /// Where the flat chart was written.
    pub output: PathBuf,
    /// The input chart's shape.
    pub before: ChartSummary,
    /// The flat chart's shape.
    pub after: ChartSummary,
}

/// Returns the default output path for `input`: `door.msgpack` becomes
/// `door.flat.msgpack` in the same directory.
#[must_use]
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "chart".into(), |s| s.to_string_lossy().into_owned());
    input.with_file_name(format!("{stem}.flat.msgpack"))
}

/// Loads `input`, flattens it, and writes the result to `output` (or the
/// default output path).
///
/// # Errors
///
/// Returns the first load, flattening, or save error. Nothing is written
/// when flattening fails.
pub fn flatten_file(
    flattener: &Flattener,
    input: &Path,
    output: Option<&Path>,
) -> Result<FlattenReport> {
    let chart = load_from_file(input)?;
    let before = ChartSummary::of(&chart);
    info!(input = %input.display(), "{before}");

    let flat = flattener.translate(&chart)?;
    let after = ChartSummary::of(&flat);

    let output = output.map_or_else(|| default_output_path(input), Path::to_path_buf);
    save_to_file(&flat, &output)?;
    info!(output = %output.display(), "{after}");

    Ok(FlattenReport {
        output,
        before,
        after,
    })
}
