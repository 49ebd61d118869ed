use std::io::Write;
use std::path::Path;

use colored::Colorize;
use serde::Serialize;

use crate::cli::{write_json, wprintln};
use crate::dump::decoder::decode_one;
use crate::dump::record::Record;
use crate::dump::registry::Schema;
use crate::PolarError;

/// Options for `--file` mode.
pub struct FileOptions {
    pub file: String,
    pub json: bool,
}

#[derive(Serialize)]
struct FileJson<'a> {
    file: &'a str,
    message: Schema,
    record: &'a Record,
}

/// Decode one file and print its record.
///
/// No sport index is built, so references are not resolved. A file name
/// with no schema is an error here, unlike during a dump walk.
pub fn execute(opts: &FileOptions, writer: &mut dyn Write) -> Result<(), PolarError> {
    let record = decode_one(Path::new(&opts.file))?;

    if opts.json {
        return write_json(
            writer,
            &FileJson {
                file: &opts.file,
                message: record.schema(),
                record: &record,
            },
        );
    }

    wprintln!(
        writer,
        "{} ({}: {})",
        opts.file.bold(),
        record.schema(),
        record.file().description()
    )?;
    wprintln!(writer, "{}", record.render_text())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pb::sport::PbSport;
    use crate::pb::types::PbSportIdentifier;
    use prost::Message;
    use tempfile::TempDir;

    fn write_sport(dir: &Path) -> String {
        let sport = PbSport {
            identifier: Some(PbSportIdentifier { value: Some(3) }),
            parent_identifier: Some(PbSportIdentifier { value: Some(0) }),
            factor: Some(1.5),
            ..Default::default()
        };
        let path = dir.join("SPORT.BPB");
        std::fs::write(&path, sport.encode_to_vec()).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_text_output_names_schema() {
        let dir = TempDir::new().unwrap();
        let opts = FileOptions {
            file: write_sport(dir.path()),
            json: false,
        };
        let mut out = Vec::new();
        execute(&opts, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("PbSport"));
    }

    #[test]
    fn test_json_output() {
        let dir = TempDir::new().unwrap();
        let opts = FileOptions {
            file: write_sport(dir.path()),
            json: true,
        };
        let mut out = Vec::new();
        execute(&opts, &mut out).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["message"], "Sport");
        assert_eq!(json["record"]["message"]["identifier"]["value"], 3);
    }

    #[test]
    fn test_unknown_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("README");
        std::fs::write(&path, b"x").unwrap();
        let opts = FileOptions {
            file: path.to_string_lossy().into_owned(),
            json: false,
        };
        let err = execute(&opts, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, PolarError::NoSchema(_)));
    }
}
