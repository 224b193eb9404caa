//! Install orchestration.

pub mod handoff;
pub mod pipeline;

pub use handoff::{run_handoff, HandoffResult};
pub use pipeline::{InstallPipeline, PipelineReport, LANGUAGE_KEY};
