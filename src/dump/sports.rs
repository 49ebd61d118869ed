//! Sport id → sport descriptor index.
//!
//! Built once from `SYS/SPORT/<id>/SPORT.BPB` before any user data is
//! walked, then only ever read. The id is the directory name, not the
//! `identifier` field inside the descriptor.
//!
//! Directory names are parsed as integers, so `1` and `01` name the same
//! sport. The canonical spelling wins such a collision whatever order the
//! file system lists them in; a warning is logged either way.
//!
//! A build is all-or-nothing: if any numbered sport directory lacks a
//! readable, well-formed `SPORT.BPB`, the whole build fails. There is no
//! partial index.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::dump::decoder::decode_file;
use crate::dump::record::Message;
use crate::dump::registry::FileIdentifier;
use crate::pb::sport::PbSport;
use crate::util::fs::list_dirs;
use crate::PolarError;

/// Immutable map from sport id to descriptor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SportsIndex {
    sports: BTreeMap<u64, PbSport>,
}

/// Outcome of looking up one sport id referenced by a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Resolution {
    Resolved { name: Option<String> },
    Unresolved,
}

/// A sport id referenced by a decoded record, and whether the index knows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SportReference {
    pub sport_id: u64,
    pub resolution: Resolution,
}

impl SportReference {
    pub fn is_resolved(&self) -> bool {
        matches!(self.resolution, Resolution::Resolved { .. })
    }
}

impl SportsIndex {
    /// Scan `sports_root` and decode every `<id>/SPORT.BPB`.
    ///
    /// Entries whose name is not a non-negative integer, and plain files,
    /// are ignored.
    pub fn build(sports_root: &Path) -> Result<SportsIndex, PolarError> {
        debug!("Building sports table from {}", sports_root.display());

        let mut sports = BTreeMap::new();
        for name in list_dirs(sports_root)? {
            let id: u64 = match name.parse() {
                Ok(id) => id,
                Err(_) => {
                    debug!("Skipping non-numeric sport dir: {}", name);
                    continue;
                }
            };

            let path = sports_root
                .join(&name)
                .join(FileIdentifier::Sport.file_name());
            let sport = match decode_file(&path)?.into_message() {
                Message::Sport(sport) => sport,
                other => {
                    return Err(PolarError::MalformedRecord {
                        path,
                        reason: format!("expected PbSport, decoded {}", other.schema()),
                    })
                }
            };

            match sports.entry(id) {
                Entry::Vacant(slot) => {
                    slot.insert(sport);
                }
                Entry::Occupied(mut slot) => {
                    warn!("Duplicate sport id {} in {}", id, path.display());
                    if name == id.to_string() {
                        slot.insert(sport);
                    }
                }
            }
        }

        info!("Found {} sports descriptors.", sports.len());
        Ok(SportsIndex { sports })
    }

    pub fn get(&self, id: u64) -> Option<&PbSport> {
        self.sports.get(&id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.sports.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.sports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sports.is_empty()
    }

    /// Sport ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.sports.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, &PbSport)> {
        self.sports.iter().map(|(id, s)| (*id, s))
    }

    /// Look up a referenced sport id. A miss is not an error.
    pub fn resolve(&self, sport_id: u64) -> SportReference {
        let resolution = match self.sports.get(&sport_id) {
            Some(sport) => Resolution::Resolved {
                name: sport.display_name().map(str::to_string),
            },
            None => {
                debug!("Unresolved sport reference: {}", sport_id);
                Resolution::Unresolved
            }
        };
        SportReference {
            sport_id,
            resolution,
        }
    }
}

impl FromIterator<(u64, PbSport)> for SportsIndex {
    fn from_iter<I: IntoIterator<Item = (u64, PbSport)>>(iter: I) -> Self {
        SportsIndex {
            sports: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pb::sport::PbSportTranslation;
    use crate::pb::types::{PbLanguageId, PbOneLineText, PbSportIdentifier};
    use prost::Message as _;
    use std::fs;
    use tempfile::TempDir;

    fn sport(id: u64, name: &str) -> PbSport {
        PbSport {
            identifier: Some(PbSportIdentifier { value: Some(id) }),
            parent_identifier: Some(PbSportIdentifier { value: Some(0) }),
            translation: vec![PbSportTranslation {
                id: Some(PbLanguageId {
                    language: Some("en".to_string()),
                }),
                text: Some(PbOneLineText {
                    text: Some(name.to_string()),
                }),
            }],
            ..Default::default()
        }
    }

    fn write_sport(root: &Path, dir: &str, sport: &PbSport) {
        let d = root.join(dir);
        fs::create_dir_all(&d).unwrap();
        fs::write(d.join("SPORT.BPB"), sport.encode_to_vec()).unwrap();
    }

    #[test]
    fn test_build_skips_non_numeric_dirs() {
        let dir = TempDir::new().unwrap();
        write_sport(dir.path(), "1", &sport(1, "Running"));
        write_sport(dir.path(), "abc", &sport(99, "Ignored"));
        write_sport(dir.path(), "2", &sport(2, "Cycling"));

        let index = SportsIndex::build(dir.path()).unwrap();
        assert_eq!(index.ids().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_build_keys_by_directory_name() {
        let dir = TempDir::new().unwrap();
        write_sport(dir.path(), "17", &sport(1, "Running"));

        let index = SportsIndex::build(dir.path()).unwrap();
        assert!(index.contains(17));
        assert!(!index.contains(1));
        assert_eq!(index.get(17).unwrap().identifier.as_ref().unwrap().value, Some(1));
    }

    #[test]
    fn test_build_duplicate_id_keeps_canonical_dir() {
        let dir = TempDir::new().unwrap();
        write_sport(dir.path(), "01", &sport(1, "Padded"));
        write_sport(dir.path(), "1", &sport(1, "Running"));
        write_sport(dir.path(), "002", &sport(2, "Cycling"));

        let index = SportsIndex::build(dir.path()).unwrap();
        assert_eq!(index.ids().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(index.get(1).unwrap().display_name(), Some("Running"));
        assert_eq!(index.get(2).unwrap().display_name(), Some("Cycling"));
    }

    #[test]
    fn test_build_ignores_plain_files() {
        let dir = TempDir::new().unwrap();
        write_sport(dir.path(), "1", &sport(1, "Running"));
        fs::write(dir.path().join("5"), b"not a dir").unwrap();

        let index = SportsIndex::build(dir.path()).unwrap();
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_build_fails_on_missing_descriptor() {
        let dir = TempDir::new().unwrap();
        write_sport(dir.path(), "1", &sport(1, "Running"));
        fs::create_dir(dir.path().join("2")).unwrap();

        let err = SportsIndex::build(dir.path()).unwrap_err();
        assert!(matches!(err, PolarError::NotFound(_)), "{}", err);
    }

    #[test]
    fn test_build_fails_on_malformed_descriptor() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("4")).unwrap();
        fs::write(dir.path().join("4").join("SPORT.BPB"), [0x0a, 0x05, 0x08]).unwrap();

        let err = SportsIndex::build(dir.path()).unwrap_err();
        assert!(matches!(err, PolarError::MalformedRecord { .. }), "{}", err);
    }

    #[test]
    fn test_build_missing_root_is_enumeration_error() {
        let err = SportsIndex::build(Path::new("/nonexistent/SYS/SPORT")).unwrap_err();
        assert!(matches!(err, PolarError::DirectoryEnumeration { .. }));
    }

    #[test]
    fn test_resolve() {
        let index: SportsIndex = [(1, sport(1, "Running"))].into_iter().collect();

        let hit = index.resolve(1);
        assert!(hit.is_resolved());
        assert_eq!(
            hit.resolution,
            Resolution::Resolved {
                name: Some("Running".to_string())
            }
        );

        let miss = index.resolve(42);
        assert_eq!(miss.sport_id, 42);
        assert_eq!(miss.resolution, Resolution::Unresolved);
    }
}
