//! Trace event and record types.
//!
//! This module defines the events recorded while a chart is flattened.

use std::fmt;

// =============================================================================
// Stage
// =============================================================================

/// A flattening stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Scope mangling into global declarations.
    Globalise,
    /// Composite-source expansion.
    ExpandSource,
    /// Composite-destination expansion.
    ExpandDestination,
    /// LCA composition and single-level output.
    Finalize,
}

impl Stage {
    /// All stages in pipeline order.
    pub const ALL: [Stage; 4] = [
        Self::Globalise,
        Self::ExpandSource,
        Self::ExpandDestination,
        Self::Finalize,
    ];

    /// The stage's short name, as used in error context.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Globalise => "globalise",
            Self::ExpandSource => "expand-source",
            Self::ExpandDestination => "expand-destination",
            Self::Finalize => "finalize",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Trace Event
// =============================================================================

/// Events recorded while flattening.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TraceEvent {
    /// A stage has started.
    StageStart {
        /// The stage that started.
        stage: Stage,
    },

    /// A stage has ended.
    StageEnd {
        /// The stage that ended.
        stage: Stage,
        /// Whether it produced a tree.
        success: bool,
    },

    /// A scoped declaration received its global name.
    DeclarationRenamed {
        /// Fully-qualified dotted name of the original declaration.
        from: String,
        /// Global name.
        to: String,
    },

    /// A composite-source transition was replaced by per-leaf copies.
    SourceExpanded {
        /// Transition name.
        transition: String,
        /// The composite source.
        source: String,
        /// The atomic sources it expanded to.
        leaves: Vec<String>,
    },

    /// A composite destination was resolved through default children.
    DestinationExpanded {
        /// Transition name.
        transition: String,
        /// The composite destination.
        destination: String,
        /// The atomic default descendant.
        leaf: String,
    },

    /// A transition's exits and entries were composed.
    TransitionFinalized {
        /// Transition name.
        transition: String,
        /// Least common ancestor, `None` for the chart root.
        lca: Option<String>,
        /// Number of exit actions injected.
        exits: usize,
        /// Number of entry actions injected.
        entries: usize,
    },
}

impl TraceEvent {
    /// Returns the event type name, used for filtering.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::StageStart { .. } => "stage_start",
            Self::StageEnd { .. } => "stage_end",
            Self::DeclarationRenamed { .. } => "declaration_renamed",
            Self::SourceExpanded { .. } => "source_expanded",
            Self::DestinationExpanded { .. } => "destination_expanded",
            Self::TransitionFinalized { .. } => "transition_finalized",
        }
    }
}

// =============================================================================
// Trace Record
// =============================================================================

/// A recorded event with its sequence number and the stage it belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    /// Monotonic record id.
    pub id: u64,
    /// Stage active when the event was recorded.
    pub stage: Option<Stage>,
    /// The event.
    pub event: TraceEvent,
}

impl TraceRecord {
    /// Creates a record.
    #[must_use]
    pub fn new(id: u64, stage: Option<Stage>, event: TraceEvent) -> Self {
        Self { id, stage, event }
    }
}
