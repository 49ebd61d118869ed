//! Per-category decode handlers.
//!
//! A session directory (`U/<user>/<session>/`) holds one subdirectory per
//! data category. The traversal engine knows nothing about categories: it
//! looks each directory name up in a [`HandlerSet`] and lets the matching
//! [`CategoryHandler`] say which files to decode and how to cross-reference
//! the results. Supporting a new category means registering a handler.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::dump::layout::{ACTIVITY_CATEGORY, DAILY_SUMMARY_CATEGORY, EXERCISE_CATEGORY};
use crate::dump::record::Record;
use crate::dump::registry::FileIdentifier;
use crate::dump::sports::{SportReference, SportsIndex};
use crate::util::fs::{is_regular_file, list_dirs};
use crate::PolarError;

/// Decoding rules for one category directory.
pub trait CategoryHandler: Send + Sync {
    /// Directory name this handler is registered under, e.g. `ACT`.
    fn category(&self) -> &str;

    /// Files under `dir` to decode, in order.
    ///
    /// A subdirectory that cannot be listed is reported as an `Err` entry;
    /// the remaining entries are still decoded.
    fn targets(&self, dir: &Path) -> Vec<Result<PathBuf, PolarError>>;

    /// Sport references carried by a record decoded from this category.
    fn references(&self, record: &Record, sports: &SportsIndex) -> Vec<SportReference> {
        record
            .sport_ids()
            .into_iter()
            .map(|id| sports.resolve(id))
            .collect()
    }
}

const ACTIVITY_FILES: &[FileIdentifier] =
    &[FileIdentifier::ActivitySamples, FileIdentifier::Identifier];
const DAILY_SUMMARY_FILES: &[FileIdentifier] = &[FileIdentifier::DailySummary];

/// A category whose directory holds a fixed set of files.
pub struct FixedFiles {
    category: &'static str,
    files: &'static [FileIdentifier],
}

impl FixedFiles {
    pub const fn new(category: &'static str, files: &'static [FileIdentifier]) -> Self {
        FixedFiles { category, files }
    }

    /// `ACT/`: daily activity samples plus their identifier.
    pub const fn activity() -> Self {
        Self::new(ACTIVITY_CATEGORY, ACTIVITY_FILES)
    }

    /// `DSUM/`: the daily summary.
    pub const fn daily_summary() -> Self {
        Self::new(DAILY_SUMMARY_CATEGORY, DAILY_SUMMARY_FILES)
    }
}

impl CategoryHandler for FixedFiles {
    fn category(&self) -> &str {
        self.category
    }

    fn targets(&self, dir: &Path) -> Vec<Result<PathBuf, PolarError>> {
        present(dir, self.files).into_iter().map(Ok).collect()
    }
}

/// `E/`: one subdirectory per training session, named by start time.
///
/// ```text
/// E/<time>/TSESS.BPB
/// E/<time>/<nn>/BASE.BPB, SAMPLES.GZB, STATS.BPB, ZONES.BPB
/// ```
pub struct Exercises;

const SESSION_FILES: &[FileIdentifier] = &[FileIdentifier::TrainingSession];
const EXERCISE_FILES: &[FileIdentifier] = &[
    FileIdentifier::ExerciseBase,
    FileIdentifier::ExerciseSamples,
    FileIdentifier::ExerciseStatistics,
    FileIdentifier::RecordedZones,
];

impl CategoryHandler for Exercises {
    fn category(&self) -> &str {
        EXERCISE_CATEGORY
    }

    fn targets(&self, dir: &Path) -> Vec<Result<PathBuf, PolarError>> {
        let sessions = match list_dirs(dir) {
            Ok(s) => s,
            Err(e) => return vec![Err(e)],
        };

        let mut targets = Vec::new();
        for session in sessions {
            let session_dir = dir.join(&session);
            targets.extend(present(&session_dir, SESSION_FILES).into_iter().map(Ok));

            match list_dirs(&session_dir) {
                Ok(exercises) => {
                    for exercise in exercises {
                        let exercise_dir = session_dir.join(exercise);
                        targets.extend(present(&exercise_dir, EXERCISE_FILES).into_iter().map(Ok));
                    }
                }
                Err(e) => targets.push(Err(e)),
            }
        }
        targets
    }
}

/// Paths of the listed files that exist as regular files in `dir`.
fn present(dir: &Path, files: &[FileIdentifier]) -> Vec<PathBuf> {
    files
        .iter()
        .map(|f| dir.join(f.file_name()))
        .filter(|p| is_regular_file(p))
        .collect()
}

/// Category handlers keyed by directory name.
#[derive(Default)]
pub struct HandlerSet {
    handlers: Vec<Box<dyn CategoryHandler>>,
}

static BUILTIN: LazyLock<HandlerSet> = LazyLock::new(HandlerSet::with_builtin);

impl HandlerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// `ACT`, `DSUM`, and `E`.
    pub fn with_builtin() -> Self {
        let mut set = Self::new();
        set.register(FixedFiles::activity());
        set.register(FixedFiles::daily_summary());
        set.register(Exercises);
        set
    }

    /// Shared instance of [`with_builtin`](HandlerSet::with_builtin).
    pub fn builtin() -> &'static HandlerSet {
        &BUILTIN
    }

    /// Add a handler, replacing any handler already registered for its category.
    pub fn register<H: CategoryHandler + 'static>(&mut self, handler: H) {
        self.handlers.retain(|h| h.category() != handler.category());
        self.handlers.push(Box::new(handler));
    }

    pub fn get(&self, category: &str) -> Option<&dyn CategoryHandler> {
        self.handlers
            .iter()
            .find(|h| h.category() == category)
            .map(|h| h.as_ref())
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.handlers.iter().map(|h| h.category())
    }
}
