//! Read and decode a single dump file.
//!
//! [`decode_file`] resolves the schema from the file's base name, reads the
//! file (gunzipping `SAMPLES.GZB`), decodes it, and checks that every
//! field the message marks `required` is present, at any depth. A file whose name has no
//! schema yields [`PolarError::NoSchema`], which traversal treats as a skip.

use std::fs;
use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;
use tracing::debug;

use crate::dump::record::Record;
use crate::dump::registry::{self, Compression, FileIdentifier, SchemaEntry};
use crate::util::fs::is_regular_file;
use crate::PolarError;

/// Decode the file at `path` with the schema registered for its name.
pub fn decode_file(path: &Path) -> Result<Record, PolarError> {
    debug!("Looking for schema: {}", path.display());

    if !is_regular_file(path) {
        return Err(PolarError::NotFound(path.to_path_buf()));
    }

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let entry = match registry::lookup_name(name) {
        Some(e) => e,
        None => {
            debug!("Schema not found: {}", path.display());
            return Err(PolarError::NoSchema(name.to_string()));
        }
    };

    let buf = read_payload(path, &entry)?;
    decode_entry(&entry, &buf).map_err(|reason| PolarError::MalformedRecord {
        path: path.to_path_buf(),
        reason,
    })
}

/// Decode a single explicit file for inspection.
///
/// Unlike traversal, a missing schema is a failure here: the caller asked
/// for this particular file.
pub fn decode_one(path: &Path) -> Result<Record, PolarError> {
    decode_file(path)
}

/// Decode an in-memory, already decompressed payload as `file`.
pub fn decode_bytes(file: FileIdentifier, buf: &[u8]) -> Result<Record, PolarError> {
    let entry = registry::lookup(file)
        .ok_or_else(|| PolarError::NoSchema(file.file_name().to_string()))?;
    decode_entry(&entry, buf).map_err(|reason| PolarError::MalformedRecord {
        path: file.file_name().into(),
        reason,
    })
}

fn decode_entry(entry: &SchemaEntry, buf: &[u8]) -> Result<Record, String> {
    let record = Record::decode(entry.schema, buf)?;
    if let Some(field) = record.missing_required() {
        return Err(format!(
            "{}: missing required field `{}`",
            entry.schema, field
        ));
    }
    if !record.unknown_fields().is_empty() {
        debug!(
            "{} carries {} field(s) not in {}",
            entry.file,
            record.unknown_fields().len(),
            entry.schema
        );
    }
    debug!("Decoded {} as {}", entry.file, entry.schema);
    Ok(record)
}

fn read_payload(path: &Path, entry: &SchemaEntry) -> Result<Vec<u8>, PolarError> {
    let raw = fs::read(path)
        .map_err(|e| PolarError::Io(format!("Cannot read {}: {}", path.display(), e)))?;

    match entry.compression {
        Compression::None => Ok(raw),
        Compression::Gzip => {
            let mut decoder = GzDecoder::new(raw.as_slice());
            let mut decompressed = Vec::new();
            decoder
                .read_to_end(&mut decompressed)
                .map_err(|e| PolarError::MalformedRecord {
                    path: path.to_path_buf(),
                    reason: format!("gzip: {}", e),
                })?;
            Ok(decompressed)
        }
    }
}
