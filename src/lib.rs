//! Polar activity tracker dump decoding toolkit.
//!
//! The `polar-utils` crate (library name `polar`) decodes the file system
//! dump of a Polar activity tracker (A360 and relatives) into structured
//! records and resolves the references between them, e.g. an activity
//! sample pointing at a sport descriptor by numeric id.
//!
//! # CLI Reference
//!
//! ```text
//! polar --file <dump>/U/0/USERID.BPB          # decode one file
//! polar --dump <dump>                         # walk a full dump
//! polar --dump <dump> --json --quiet          # machine-readable, warnings only
//! polar --dump <dump> --threads 4             # walk user directories in parallel
//! ```
//!
//! `--file` and `--dump` are mutually exclusive. `--quiet` lowers logging
//! from debug to warnings; `RUST_LOG` takes precedence when set. All modes
//! accept `--color <auto|always|never>` and `--output <file>`.
//!
//! # Library API
//!
//! ```no_run
//! use polar::dump::layout::DumpRoot;
//! use polar::dump::traverse::{DumpTraversal, Outcome};
//!
//! let root = DumpRoot::open("dump").unwrap();
//! let sports = root.build_sports_index().unwrap();
//!
//! for item in DumpTraversal::new(root.path(), &sports) {
//!     if let Outcome::Decoded { record, references } = &item.outcome {
//!         println!("{}: {} ({} sport refs)", item.path.display(), record.schema(), references.len());
//!     }
//! }
//! ```
//!
//! ## Module overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`pb`] | Protocol buffer messages for every known dump file |
//! | [`dump::registry`] | File name → schema dispatch table |
//! | [`dump::record`] | Decoded record enum, encoding and rendering |
//! | [`dump::decoder`] | Read, gunzip, and decode one file |
//! | [`dump::sports`] | Sport id → descriptor index built from `SYS/SPORT` |
//! | [`dump::layout`] | Dump directory names and session id matching |
//! | [`dump::category`] | Per-category decode handlers and sport cross-references |
//! | [`dump::traverse`] | Lazy walk over `U/<user>/<session>/<category>` |
//!
//! ## Feature flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli` | on | The `polar` binary, colored output, and rayon-based parallel traversal. |

#[cfg(feature = "cli")]
pub mod cli;
pub mod dump;
pub mod pb;
pub mod util;

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by `polar` operations.
#[derive(Error, Debug)]
pub enum PolarError {
    /// The path does not exist or is not a regular file.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// No schema is registered for this file name. Callers treat this as a skip.
    #[error("No schema for file name: {0}")]
    NoSchema(String),

    /// The bytes are not a valid encoding for the file's schema.
    #[error("Malformed record {}: {reason}", path.display())]
    MalformedRecord { path: PathBuf, reason: String },

    /// A directory could not be listed; fatal for that branch only.
    #[error("Cannot read directory {}: {reason}", path.display())]
    DirectoryEnumeration { path: PathBuf, reason: String },

    /// The dump root is not a directory.
    #[error("Invalid dump directory: {}", .0.display())]
    InvalidDumpRoot(PathBuf),

    /// An I/O error occurred (file open, read, or write failure).
    #[error("I/O error: {0}")]
    Io(String),

    /// An invalid argument was supplied.
    #[error("Invalid argument: {0}")]
    Argument(String),
}

impl PolarError {
    /// True for outcomes that mean "nothing to decode here" rather than a failure.
    pub fn is_skip(&self) -> bool {
        matches!(self, PolarError::NoSchema(_))
    }
}
