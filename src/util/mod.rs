//! Shared utilities (filesystem listing helpers).

pub mod fs;
