//! Network classification and source selection.
//!
//! - [`classifier`] - Concurrent ping probes and the international/domestic decision
//! - [`source`] - Canonical vs. mirror URL selection

pub mod classifier;
pub mod source;

pub use classifier::{
    classify_result, ping_command, NetworkAssessment, NetworkClass, NetworkClassifier,
    NetworkProbeResult, DISCRIMINATING_HOSTS, REFERENCE_HOSTS,
};
pub use source::{repository_name, RepositorySource, SelectedSource, CANONICAL_URL, MIRROR_URL};
