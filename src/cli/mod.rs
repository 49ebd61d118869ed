//! CLI implementation for the `polar` binary.
//!
//! Argument parsing uses clap derive macros; the [`app::Cli`] struct is
//! shared between `main.rs` and `build.rs` (for man page and completion
//! generation) via `include!()`.
//!
//! Each mode module holds an `Options` struct and a
//! `pub fn execute(opts, writer) -> Result<_, PolarError>` entry point. The
//! `writer: &mut dyn Write` parameter lets tests capture output and lets the
//! global `--output` flag redirect it to a file.
//!
//! | Flag | Module | Purpose |
//! |------|--------|---------|
//! | `--file <path>` | [`file`] | Decode one file and print the record |
//! | `--dump <path>` | [`dump`] | Build the sport index and walk every user directory |
//!
//! Both modes accept `--json`. The `wprintln!` and `wprint!` macros wrap
//! `writeln!`/`write!` to convert `io::Error` into `PolarError`.

pub mod app;
pub mod dump;
pub mod file;

/// Write a line to the given writer, converting io::Error to PolarError.
macro_rules! wprintln {
    ($w:expr) => {
        writeln!($w).map_err(|e| $crate::PolarError::Io(e.to_string()))
    };
    ($w:expr, $($arg:tt)*) => {
        writeln!($w, $($arg)*).map_err(|e| $crate::PolarError::Io(e.to_string()))
    };
}

/// Write (without newline) to the given writer, converting io::Error to PolarError.
macro_rules! wprint {
    ($w:expr, $($arg:tt)*) => {
        write!($w, $($arg)*).map_err(|e| $crate::PolarError::Io(e.to_string()))
    };
}

pub(crate) use wprint;
pub(crate) use wprintln;

/// Serialize `value` as pretty JSON onto `writer`.
pub(crate) fn write_json<T: serde::Serialize>(
    writer: &mut dyn std::io::Write,
    value: &T,
) -> Result<(), crate::PolarError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| crate::PolarError::Io(format!("JSON serialization failed: {}", e)))?;
    writeln!(writer, "{}", json).map_err(|e| crate::PolarError::Io(e.to_string()))
}
