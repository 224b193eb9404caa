//! Integrity verification of a cloned tree.
//!
//! The primary check compares an MD5 fingerprint of every file against the
//! value bundled for the published repository. When that fails, a coarser
//! check accepts the tree if its total size and file count fall inside
//! bundled bounds.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::ops::RangeInclusive;
use std::path::Path;

use md5::{Digest, Md5};

use crate::error::Result;

use super::walk::{walk_tree, TreeEntry};

/// Fingerprint of a known-good clone of the published repository.
///
/// Regenerate with `ricsi fingerprint <DIR>` when the repository changes.
pub const BUNDLED_FINGERPRINT: &str = "467bcf27a0716dc3b48905cb87ca993f";

/// Fewest files a complete clone contains.
pub const MIN_FILE_COUNT: u64 = 111;

/// Smallest plausible total size in bytes.
pub const MIN_TOTAL_SIZE: u64 = 21_500_000;

/// Largest plausible total size in bytes.
pub const MAX_TOTAL_SIZE: u64 = 22_609_920;

/// What a complete clone looks like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrityExpectation {
    /// Hex MD5 fingerprint, compared case-insensitively. `None` skips
    /// straight to the size/count check.
    pub fingerprint: Option<String>,
    /// Minimum number of files.
    pub min_file_count: u64,
    /// Accepted total size, bounds inclusive.
    pub size_range: RangeInclusive<u64>,
}

impl Default for IntegrityExpectation {
    fn default() -> Self {
        Self {
            fingerprint: Some(BUNDLED_FINGERPRINT.to_string()),
            min_file_count: MIN_FILE_COUNT,
            size_range: MIN_TOTAL_SIZE..=MAX_TOTAL_SIZE,
        }
    }
}

impl IntegrityExpectation {
    /// Replace the expected fingerprint.
    pub fn with_fingerprint(mut self, fingerprint: impl Into<String>) -> Self {
        self.fingerprint = Some(fingerprint.into());
        self
    }
}

/// File count and total size of a tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub file_count: u64,
    pub total_size: u64,
}

impl TreeStats {
    fn add(mut self, entry: &TreeEntry) -> Self {
        if entry.is_file() {
            self.file_count += 1;
            self.total_size += entry.size;
        }
        self
    }
}

impl fmt::Display for TreeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} files, {} bytes", self.file_count, self.total_size)
    }
}

/// Which check accepted the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityMethod {
    Fingerprint,
    SizeAndCount,
}

impl fmt::Display for IntegrityMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityMethod::Fingerprint => write!(f, "fingerprint"),
            IntegrityMethod::SizeAndCount => write!(f, "size and file count"),
        }
    }
}

/// Why the fingerprint check did not pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FingerprintProblem {
    /// No expected value to compare against.
    NotConfigured,
    Mismatch { expected: String, actual: String },
    Unreadable(String),
}

impl fmt::Display for FingerprintProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FingerprintProblem::NotConfigured => write!(f, "no expected fingerprint"),
            FingerprintProblem::Mismatch { expected, actual } => {
                write!(f, "fingerprint {} does not match {}", actual, expected)
            }
            FingerprintProblem::Unreadable(message) => write!(f, "could not fingerprint: {}", message),
        }
    }
}

/// Why the size/count check did not pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsProblem {
    OutOfRange(TreeStats),
    Unreadable(String),
}

impl fmt::Display for StatsProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsProblem::OutOfRange(stats) => write!(f, "{} is outside the expected range", stats),
            StatsProblem::Unreadable(message) => write!(f, "could not measure: {}", message),
        }
    }
}

/// Both reasons a tree was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrityFailure {
    pub fingerprint: FingerprintProblem,
    pub stats: StatsProblem,
}

impl fmt::Display for IntegrityFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}; {}", self.fingerprint, self.stats)
    }
}

/// Outcome of verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityVerdict {
    Pass(IntegrityMethod),
    Fail(IntegrityFailure),
}

impl IntegrityVerdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, IntegrityVerdict::Pass(_))
    }
}

fn hash_file(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Md5::new();
    let mut buffer = [0u8; 64 * 1024];
    loop {
        let read = file.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Fingerprint a tree.
///
/// Each file's hex MD5 digest is followed by a newline, in walk order, and
/// the concatenation is hashed again.
pub fn fingerprint(root: &Path) -> Result<String> {
    let mut listing = String::new();
    for entry in walk_tree(root) {
        let entry = entry?;
        if entry.is_file() {
            listing.push_str(&hash_file(&entry.path)?);
            listing.push('\n');
        }
    }
    Ok(hex::encode(Md5::digest(listing.as_bytes())))
}

/// Count files and sum their sizes, following symlinks.
pub fn tree_stats(root: &Path) -> Result<TreeStats> {
    walk_tree(root).try_fold(TreeStats::default(), |stats, entry| {
        Ok(stats.add(&entry?))
    })
}

/// Whether stats fall inside the expected bounds.
pub fn check_stats(stats: TreeStats, expectation: &IntegrityExpectation) -> bool {
    expectation.size_range.contains(&stats.total_size)
        && stats.file_count >= expectation.min_file_count
}

/// Verifies trees against an expectation.
#[derive(Debug, Clone, Default)]
pub struct IntegrityChecker {
    expectation: IntegrityExpectation,
}

impl IntegrityChecker {
    pub fn new(expectation: IntegrityExpectation) -> Self {
        Self { expectation }
    }

    pub fn expectation(&self) -> &IntegrityExpectation {
        &self.expectation
    }

    /// Run the fingerprint check, falling back to size and count.
    pub fn verify(&self, root: &Path) -> IntegrityVerdict {
        let fingerprint_problem = match self.check_fingerprint(root) {
            Ok(()) => {
                tracing::info!("Fingerprint of {} matches", root.display());
                return IntegrityVerdict::Pass(IntegrityMethod::Fingerprint);
            }
            Err(problem) => problem,
        };

        tracing::warn!(
            "Fingerprint check failed ({}), trying size and file count",
            fingerprint_problem
        );

        let stats_problem = match tree_stats(root) {
            Ok(stats) if check_stats(stats, &self.expectation) => {
                tracing::info!("Size and file count of {} are plausible: {}", root.display(), stats);
                return IntegrityVerdict::Pass(IntegrityMethod::SizeAndCount);
            }
            Ok(stats) => StatsProblem::OutOfRange(stats),
            Err(e) => StatsProblem::Unreadable(e.to_string()),
        };

        IntegrityVerdict::Fail(IntegrityFailure {
            fingerprint: fingerprint_problem,
            stats: stats_problem,
        })
    }

    fn check_fingerprint(&self, root: &Path) -> std::result::Result<(), FingerprintProblem> {
        let expected = self
            .expectation
            .fingerprint
            .as_deref()
            .ok_or(FingerprintProblem::NotConfigured)?;

        let actual = fingerprint(root).map_err(|e| FingerprintProblem::Unreadable(e.to_string()))?;

        if actual.eq_ignore_ascii_case(expected.trim()) {
            Ok(())
        } else {
            Err(FingerprintProblem::Mismatch {
                expected: expected.to_string(),
                actual,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn tree(files: &[(&str, &str)]) -> TempDir {
        let temp = TempDir::new().unwrap();
        for (path, content) in files {
            let full = temp.path().join(path);
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(full, content).unwrap();
        }
        temp
    }

    /// 120 files totalling exactly 22,000,000 bytes.
    fn plausible_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        let big = File::create(temp.path().join("bundle.bin")).unwrap();
        big.set_len(22_000_000 - 119).unwrap();
        fs::create_dir(temp.path().join("src")).unwrap();
        for i in 0..119 {
            fs::write(temp.path().join("src").join(format!("f{:03}.txt", i)), "x").unwrap();
        }
        temp
    }

    #[test]
    fn fingerprint_of_single_file() {
        let temp = tree(&[("hello.txt", "hello")]);
        assert_eq!(
            fingerprint(temp.path()).unwrap(),
            "eb3b6291fa6d4fe52e9761e0c0419eb3"
        );
    }

    #[test]
    fn fingerprint_follows_name_order() {
        let temp = tree(&[("z/b.txt", "b"), ("a.txt", "a")]);
        assert_eq!(
            fingerprint(temp.path()).unwrap(),
            "47c1df45ec11381883599f96b12e4a88"
        );
    }

    #[test]
    fn fingerprint_is_deterministic() {
        let first = tree(&[("a.txt", "one"), ("dir/b.txt", "two"), ("dir/c/d.txt", "three")]);
        let second = tree(&[("dir/c/d.txt", "three"), ("a.txt", "one"), ("dir/b.txt", "two")]);

        let a = fingerprint(first.path()).unwrap();
        assert_eq!(a, fingerprint(first.path()).unwrap());
        assert_eq!(a, fingerprint(second.path()).unwrap());
    }

    #[test]
    fn one_byte_change_alters_fingerprint() {
        let temp = tree(&[("a.txt", "one"), ("dir/b.txt", "two")]);
        let before = fingerprint(temp.path()).unwrap();

        fs::write(temp.path().join("dir/b.txt"), "twp").unwrap();

        assert_ne!(before, fingerprint(temp.path()).unwrap());
    }

    #[test]
    fn empty_directories_do_not_change_fingerprint() {
        let temp = tree(&[("a.txt", "one")]);
        let before = fingerprint(temp.path()).unwrap();
        fs::create_dir(temp.path().join("empty")).unwrap();
        assert_eq!(before, fingerprint(temp.path()).unwrap());
    }

    #[test]
    fn default_expectation_carries_bundled_fingerprint() {
        let expectation = IntegrityExpectation::default();
        assert_eq!(expectation.fingerprint.as_deref(), Some(BUNDLED_FINGERPRINT));
        assert_eq!(
            IntegrityChecker::default().expectation().fingerprint.as_deref(),
            Some("467bcf27a0716dc3b48905cb87ca993f")
        );
    }

    #[test]
    fn default_checker_compares_fingerprint_first() {
        let temp = tree(&[("a.txt", "one")]);

        match IntegrityChecker::default().verify(temp.path()) {
            IntegrityVerdict::Fail(failure) => match failure.fingerprint {
                FingerprintProblem::Mismatch { expected, .. } => {
                    assert_eq!(expected, BUNDLED_FINGERPRINT)
                }
                other => panic!("expected mismatch, got {:?}", other),
            },
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn tree_stats_counts_files() {
        let temp = tree(&[("a.txt", "12345"), ("d/b.txt", "123")]);
        assert_eq!(
            tree_stats(temp.path()).unwrap(),
            TreeStats {
                file_count: 2,
                total_size: 8
            }
        );
    }

    #[test]
    fn check_stats_bounds_are_inclusive() {
        let expectation = IntegrityExpectation::default();
        let at = |total_size, file_count| TreeStats {
            file_count,
            total_size,
        };

        assert!(check_stats(at(22_000_000, 120), &expectation));
        assert!(check_stats(at(MIN_TOTAL_SIZE, MIN_FILE_COUNT), &expectation));
        assert!(check_stats(at(MAX_TOTAL_SIZE, MIN_FILE_COUNT), &expectation));
        assert!(!check_stats(at(MIN_TOTAL_SIZE - 1, 500), &expectation));
        assert!(!check_stats(at(MAX_TOTAL_SIZE + 1, 500), &expectation));
        assert!(!check_stats(at(22_000_000, MIN_FILE_COUNT - 1), &expectation));
    }

    #[test]
    fn verify_passes_on_matching_fingerprint() {
        let temp = tree(&[("a.txt", "one")]);
        let expected = fingerprint(temp.path()).unwrap().to_uppercase();
        let checker = IntegrityChecker::new(IntegrityExpectation::default().with_fingerprint(expected));

        assert_eq!(
            checker.verify(temp.path()),
            IntegrityVerdict::Pass(IntegrityMethod::Fingerprint)
        );
    }

    #[test]
    fn verify_falls_back_to_size_and_count() {
        let temp = plausible_tree();
        let checker = IntegrityChecker::new(IntegrityExpectation::default().with_fingerprint("00"));

        assert_eq!(
            checker.verify(temp.path()),
            IntegrityVerdict::Pass(IntegrityMethod::SizeAndCount)
        );
    }

    #[test]
    fn verify_fails_with_both_reasons() {
        let temp = tree(&[("a.txt", "one")]);
        let checker = IntegrityChecker::new(IntegrityExpectation::default().with_fingerprint("00"));

        match checker.verify(temp.path()) {
            IntegrityVerdict::Fail(failure) => {
                assert!(matches!(failure.fingerprint, FingerprintProblem::Mismatch { .. }));
                assert_eq!(
                    failure.stats,
                    StatsProblem::OutOfRange(TreeStats {
                        file_count: 1,
                        total_size: 3
                    })
                );
                assert!(failure.to_string().contains("1 files, 3 bytes"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn tree_stats_counts_symlinked_file_at_target_size() {
        let temp = tree(&[("a.txt", "hello")]);
        std::os::unix::fs::symlink(temp.path().join("a.txt"), temp.path().join("b.txt")).unwrap();

        assert_eq!(
            tree_stats(temp.path()).unwrap(),
            TreeStats {
                file_count: 2,
                total_size: 10
            }
        );
    }

    #[test]
    fn verify_without_expected_fingerprint_uses_fallback() {
        let temp = tree(&[("a.txt", "one")]);
        let checker = IntegrityChecker::new(IntegrityExpectation {
            fingerprint: None,
            ..IntegrityExpectation::default()
        });

        match checker.verify(temp.path()) {
            IntegrityVerdict::Fail(failure) => {
                assert_eq!(failure.fingerprint, FingerprintProblem::NotConfigured);
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn verify_missing_tree_fails() {
        let temp = TempDir::new().unwrap();
        let checker = IntegrityChecker::new(IntegrityExpectation::default().with_fingerprint("00"));

        match checker.verify(&temp.path().join("absent")) {
            IntegrityVerdict::Fail(failure) => {
                assert!(matches!(failure.fingerprint, FingerprintProblem::Unreadable(_)));
                assert!(matches!(failure.stats, StatsProblem::Unreadable(_)));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }
}
