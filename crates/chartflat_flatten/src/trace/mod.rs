//! Stage tracing for the flattening pipeline.
//!
//! Records what each stage did (renames, expansions, compositions) with zero
//! overhead when disabled. Records go to a bounded buffer and, optionally,
//! to stderr in human-readable form.

pub mod buffer;
pub mod format;
pub mod record;

pub use buffer::TraceBuffer;
pub use format::{HumanFormatter, TraceFormatter};
pub use record::{Stage, TraceEvent, TraceRecord};

// =============================================================================
// Trace Output
// =============================================================================

/// Where trace output should be sent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TraceOutput {
    /// No output (records are still buffered).
    #[default]
    None,
    /// Write each record to stderr as it is recorded.
    Stderr,
}

// =============================================================================
// Tracer Configuration
// =============================================================================

/// Configuration for the tracer.
#[derive(Clone, Debug)]
pub struct TracerConfig {
    /// Whether tracing is enabled.
    pub enabled: bool,
    /// Maximum records to keep in the buffer.
    pub buffer_size: usize,
    /// Where to echo records.
    pub output: TraceOutput,
    /// Event type names to keep (empty keeps all).
    pub event_filter: Vec<String>,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            buffer_size: 10_000,
            output: TraceOutput::None,
            event_filter: Vec::new(),
        }
    }
}

impl TracerConfig {
    /// Creates a disabled configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to enable tracing.
    #[must_use]
    pub fn enabled(mut self) -> Self {
        self.enabled = true;
        self
    }

    /// Builder method to set the buffer size.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Builder method to echo records to stderr.
    #[must_use]
    pub fn to_stderr(mut self) -> Self {
        self.output = TraceOutput::Stderr;
        self
    }

    /// Builder method to keep only the named event types.
    #[must_use]
    pub fn filter_events(mut self, types: Vec<String>) -> Self {
        self.event_filter = types;
        self
    }
}

// =============================================================================
// Tracer
// =============================================================================

/// Records flattening events.
///
/// `record` returns immediately when tracing is disabled.
#[derive(Clone, Debug)]
pub struct Tracer {
    config: TracerConfig,
    buffer: TraceBuffer,
    stage: Option<Stage>,
    formatter: HumanFormatter,
}

impl Tracer {
    /// Creates a tracer with the given configuration.
    #[must_use]
    pub fn new(config: TracerConfig) -> Self {
        let buffer = TraceBuffer::new(config.buffer_size);
        Self {
            config,
            buffer,
            stage: None,
            formatter: HumanFormatter::new(),
        }
    }

    /// Creates a tracer that records nothing.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(TracerConfig::default())
    }

    /// Returns true if events are being recorded.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Marks the start of a stage.
    pub fn begin_stage(&mut self, stage: Stage) {
        self.stage = Some(stage);
        self.record(TraceEvent::StageStart { stage });
    }

    /// Marks the end of a stage.
    pub fn end_stage(&mut self, stage: Stage, success: bool) {
        self.record(TraceEvent::StageEnd { stage, success });
        self.stage = None;
    }

    /// Records an event under the current stage.
    pub fn record(&mut self, event: TraceEvent) {
        if !self.config.enabled {
            return;
        }
        if !self.config.event_filter.is_empty()
            && !self
                .config
                .event_filter
                .iter()
                .any(|t| t == event.type_name())
        {
            return;
        }

        let id = self.buffer.push(self.stage, event);
        if self.config.output == TraceOutput::Stderr {
            if let Some(record) = self.buffer.iter().find(|r| r.id == id) {
                eprintln!("{}", self.formatter.format(record));
            }
        }
    }

    /// Returns the buffered records.
    #[must_use]
    pub fn buffer(&self) -> &TraceBuffer {
        &self.buffer
    }

    /// Formats every buffered record, one per line.
    #[must_use]
    pub fn render(&self) -> String {
        let records: Vec<_> = self.buffer.iter().collect();
        self.formatter.format_many(&records)
    }
}

impl Default for Tracer {
    fn default() -> Self {
        Self::disabled()
    }
}
