//! Trace output formatting.

use super::record::{TraceEvent, TraceRecord};

/// Trait for formatting trace records.
pub trait TraceFormatter {
    /// Formats a single trace record.
    fn format(&self, record: &TraceRecord) -> String;

    /// Formats several records, one per line.
    fn format_many(&self, records: &[&TraceRecord]) -> String {
        records
            .iter()
            .map(|r| self.format(r))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Formats trace records in human-readable form.
#[derive(Clone, Debug, Default)]
pub struct HumanFormatter {
    /// Whether to prefix record ids.
    pub show_ids: bool,
}

impl HumanFormatter {
    /// Creates a formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to show record ids.
    #[must_use]
    pub fn with_ids(mut self) -> Self {
        self.show_ids = true;
        self
    }
}

impl TraceFormatter for HumanFormatter {
    fn format(&self, record: &TraceRecord) -> String {
        let mut out = String::new();
        if self.show_ids {
            out.push_str(&format!("#{} ", record.id));
        }
        if let Some(stage) = record.stage {
            out.push_str(&format!("[{stage}] "));
        }

        match &record.event {
            TraceEvent::StageStart { stage } => out.push_str(&format!("begin {stage}")),
            TraceEvent::StageEnd { stage, success } => {
                let status = if *success { "ok" } else { "failed" };
                out.push_str(&format!("end {stage} ({status})"));
            }
            TraceEvent::DeclarationRenamed { from, to } => {
                out.push_str(&format!("rename {from} -> {to}"));
            }
            TraceEvent::SourceExpanded {
                transition,
                source,
                leaves,
            } => {
                out.push_str(&format!(
                    "expand {transition}: source {source} -> {{{}}}",
                    leaves.join(", ")
                ));
            }
            TraceEvent::DestinationExpanded {
                transition,
                destination,
                leaf,
            } => {
                out.push_str(&format!(
                    "expand {transition}: destination {destination} -> {leaf}"
                ));
            }
            TraceEvent::TransitionFinalized {
                transition,
                lca,
                exits,
                entries,
            } => {
                let lca = lca.as_deref().unwrap_or("<root>");
                out.push_str(&format!(
                    "compose {transition}: lca {lca}, {exits} exit(s), {entries} entry(s)"
                ));
            }
        }
        out
    }
}
