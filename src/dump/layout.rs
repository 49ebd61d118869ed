//! Fixed directory layout of a device dump.
//!
//! ```text
//! <dump>/SYS/SPORT/<sport_id>/SPORT.BPB
//! <dump>/U/<user_id>/*.BPB
//! <dump>/U/<user_id>/<session_id>/<category>/...
//! ```
//!
//! The layout is imposed by the device firmware. Session directories are
//! recognised purely lexically: any name that starts with six ASCII digits
//! qualifies, whether or not it is a real calendar date.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use tracing::debug;

use crate::dump::sports::SportsIndex;
use crate::PolarError;

pub const SYS_DIR: &str = "SYS";
pub const SPORT_DIR: &str = "SPORT";
pub const USERS_DIR: &str = "U";

/// Category holding daily activity samples (`ASAMPL0.BPB`, `ID.BPB`).
pub const ACTIVITY_CATEGORY: &str = "ACT";
/// Category holding the daily summary (`DSUM.BPB`).
pub const DAILY_SUMMARY_CATEGORY: &str = "DSUM";
/// Category holding exercise recordings (`E/<time>/...`).
pub const EXERCISE_CATEGORY: &str = "E";

static SESSION_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{6}").unwrap());

/// True if `name` is a session directory name (leading six digits).
///
/// ```
/// use polar::dump::layout::is_session_id;
///
/// assert!(is_session_id("161213"));
/// assert!(is_session_id("20230101"));
/// assert!(!is_session_id("not-a-date"));
/// ```
pub fn is_session_id(name: &str) -> bool {
    SESSION_ID.is_match(name)
}

/// Calendar date named by a session id, for display.
///
/// `YYYYMMDD` is tried first, then `YYMMDD`. Returns `None` for ids that
/// are not valid dates; such sessions are still traversed.
pub fn session_date(name: &str) -> Option<NaiveDate> {
    if !is_session_id(name) {
        return None;
    }
    let long = name.get(..8).filter(|s| s.bytes().all(|b| b.is_ascii_digit()));
    if let Some(date) = long.and_then(|s| NaiveDate::parse_from_str(s, "%Y%m%d").ok()) {
        return Some(date);
    }
    NaiveDate::parse_from_str(&name[..6], "%y%m%d").ok()
}

/// A validated dump root directory.
#[derive(Debug, Clone)]
pub struct DumpRoot {
    path: PathBuf,
}

impl DumpRoot {
    /// Fails with [`PolarError::InvalidDumpRoot`] unless `path` is a directory.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PolarError> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(PolarError::InvalidDumpRoot(path.to_path_buf()));
        }
        debug!("Dump dir ({}) is OK.", path.display());
        Ok(DumpRoot {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `<dump>/SYS/SPORT`
    pub fn sports_dir(&self) -> PathBuf {
        self.path.join(SYS_DIR).join(SPORT_DIR)
    }

    /// `<dump>/U`
    pub fn users_dir(&self) -> PathBuf {
        self.path.join(USERS_DIR)
    }

    /// Build the sport index from `SYS/SPORT`.
    ///
    /// A dump without a `SYS/SPORT` directory has no sports to resolve
    /// against; it gets an empty index rather than an error.
    pub fn build_sports_index(&self) -> Result<SportsIndex, PolarError> {
        let dir = self.sports_dir();
        if !dir.exists() {
            tracing::warn!("No sports directory at {}", dir.display());
            return Ok(SportsIndex::default());
        }
        SportsIndex::build(&dir)
    }
}
