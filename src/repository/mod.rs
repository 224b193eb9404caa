//! Repository acquisition and verification.
//!
//! - [`walk`] - Sorted, link-following directory traversal
//! - [`integrity`] - Fingerprint and size/count checks
//! - [`acquirer`] - Clone, reuse, verify or replace the destination

pub mod acquirer;
pub mod integrity;
pub mod walk;

pub use acquirer::{
    AcquisitionDecision, AcquisitionOutcome, AcquisitionReport, RepositoryAcquirer,
    CHECK_INTEGRITY_KEY, DELETE_AND_RECLONE_KEY, RECLONE_AFTER_CHECK_KEY,
};
pub use integrity::{
    check_stats, fingerprint, tree_stats, FingerprintProblem, IntegrityChecker,
    IntegrityExpectation, IntegrityFailure, IntegrityMethod, IntegrityVerdict, StatsProblem,
    TreeStats, BUNDLED_FINGERPRINT,
};
pub use walk::{walk_tree, EntryKind, TreeEntry};
