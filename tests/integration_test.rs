//! Integration tests for polar-utils.
//!
//! These tests lay out synthetic device dumps on disk (`SYS/SPORT` plus a
//! `U/` tree) with hand-built protobuf records and run the full
//! index/traverse/decode pipeline against them.

use flate2::write::GzEncoder;
use flate2::Compression as GzLevel;
use prost::Message as _;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

use polar::dump::decoder::{decode_bytes, decode_file, decode_one};
use polar::dump::layout::DumpRoot;
use polar::dump::record::{Message, Record};
use polar::dump::registry::{entries, Compression, FileIdentifier, Schema};
use polar::dump::sports::Resolution;
use polar::dump::traverse::{DumpTraversal, Outcome};
use polar::dump::wire::{scan, FieldValue};
use polar::pb::activity::*;
use polar::pb::exercise::*;
use polar::pb::sport::*;
use polar::pb::types::*;
use polar::pb::user::*;
use polar::PolarError;

fn date() -> PbDate {
    PbDate {
        year: Some(2016),
        month: Some(12),
        day: Some(13),
    }
}

fn time(hour: u32) -> PbTime {
    PbTime {
        hour: Some(hour),
        minute: Some(30),
        seconds: Some(0),
        millis: None,
    }
}

fn local(hour: u32) -> PbLocalDateTime {
    PbLocalDateTime {
        date: Some(date()),
        time: Some(time(hour)),
        obsolete_trusted: Some(true),
        time_zone_offset: Some(60),
    }
}

fn system() -> PbSystemDateTime {
    PbSystemDateTime {
        date: Some(date()),
        time: Some(time(12)),
        trusted: Some(true),
    }
}

fn minutes(m: u32) -> PbDuration {
    PbDuration {
        minutes: Some(m),
        ..Default::default()
    }
}

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

fn activity_samples(sport_ids: &[u64]) -> PbActivitySamples {
    PbActivitySamples {
        start_time: Some(local(0)),
        met_recording_interval: Some(PbDuration {
            seconds: Some(30),
            ..Default::default()
        }),
        steps_recording_interval: Some(minutes(1)),
        met_samples: vec![1.0, 1.5, 3.25],
        steps_samples: vec![0, 12, 80],
        sport_info: sport_ids
            .iter()
            .map(|&id| PbSportInfo {
                factor: Some(1.0),
                time_stamp: Some(local(9)),
                sport_profile_id: Some(id),
            })
            .collect(),
        activity_info: Vec::new(),
    }
}

fn daily_summary(steps: u32) -> PbDailySummary {
    PbDailySummary {
        date: Some(date()),
        steps: Some(steps),
        ..Default::default()
    }
}

fn exercise_samples() -> PbExerciseSamples {
    PbExerciseSamples {
        recording_interval: Some(PbDuration {
            seconds: Some(1),
            ..Default::default()
        }),
        heart_rate_samples: vec![120, 121, 125, 130],
        ..Default::default()
    }
}

/// A small, valid, non-empty message for every schema.
fn sample(schema: Schema) -> Message {
    match schema {
        Schema::ActivitySamples => Message::ActivitySamples(activity_samples(&[1])),
        Schema::ExerciseBase => Message::ExerciseBase(PbExerciseBase {
            start: Some(local(10)),
            duration: Some(minutes(45)),
            sport: Some(PbSportIdentifier { value: Some(1) }),
            distance: Some(8000.0),
            ..Default::default()
        }),
        Schema::DailyActivityGoal => Message::DailyActivityGoal(PbDailyActivityGoal {
            activity_goal: vec![PbActivityGoal {
                metabolic_energy: Some(900.0),
                duration: Some(minutes(60)),
            }],
            last_modified: Some(system()),
        }),
        Schema::DailySummary => Message::DailySummary(daily_summary(4200)),
        Schema::Identifier => Message::Identifier(PbIdentifier {
            ecosystem_id: Some(42),
            created: Some(system()),
            last_modified: Some(system()),
            deleted: None,
        }),
        Schema::UserPhysData => Message::UserPhysData(PbUserPhysData {
            birthday: Some(PbUserBirthday {
                value: Some(date()),
                last_modified: None,
            }),
            gender: Some(PbUserGender {
                value: Some(Gender::Female as i32),
                last_modified: None,
            }),
            ..Default::default()
        }),
        Schema::GeneralPreferences => Message::GeneralPreferences(PbGeneralPreferences {
            localization: Some(PbLocalizationPreferences {
                language: Some(PbLanguageId {
                    language: Some("en".to_string()),
                }),
                unit_system: None,
                time_format: None,
            }),
            inactivity_alert: Some(true),
            last_modified: None,
        }),
        Schema::SportProfile => Message::SportProfile(PbSportProfile {
            profile_id: Some(9),
            sport_identifier: Some(PbSportIdentifier { value: Some(1) }),
            ..Default::default()
        }),
        Schema::RecoveryTimes => Message::RecoveryTimes(PbRecoveryTimes {
            start_time: Some(local(0)),
            end_time: Some(local(23)),
            recovery_times: vec![0.5, 0.25],
        }),
        Schema::ExerciseSamples => Message::ExerciseSamples(exercise_samples()),
        Schema::Sport => Message::Sport(sport(1, "Running")),
        Schema::ExerciseStatistics => Message::ExerciseStatistics(PbExerciseStatistics {
            heart_rate: Some(PbHeartRateStatistics {
                minimum: Some(90),
                average: Some(131),
                maximum: Some(172),
            }),
            ..Default::default()
        }),
        Schema::TrainingSession => Message::TrainingSession(PbTrainingSession {
            start: Some(local(10)),
            exercise_count: Some(1),
            ..Default::default()
        }),
        Schema::UserIdentifier => Message::UserIdentifier(PbUserIdentifier {
            master_identifier: Some(7),
            email: Some("runner@example.com".to_string()),
            ..Default::default()
        }),
        Schema::UserDatabase => Message::UserDatabase(PbUserDb {
            current_user_index: Some(0),
            user_entries: vec![PbUserDbEntry {
                user_index: Some(0),
                user_id: Some(7),
                email: None,
            }],
        }),
        Schema::UserDeviceSettings => Message::UserDeviceSettings(PbUserDeviceSettings {
            general_settings: Some(PbUserDeviceGeneralSettings {
                watch_face: Some(2),
                ..Default::default()
            }),
            last_modified: Some(system()),
        }),
        Schema::RecordedZones => Message::RecordedZones(PbRecordedZones {
            heartrate_zone: vec![PbRecordedHeartRateZone {
                zone_limits: Some(PbHeartRateZone {
                    lower_limit: Some(100),
                    higher_limit: Some(120),
                }),
                in_zone: Some(minutes(12)),
            }],
        }),
    }
}

fn gzip(buf: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), GzLevel::default());
    encoder.write_all(buf).unwrap();
    encoder.finish().unwrap()
}

fn write(path: &Path, buf: &[u8]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, buf).unwrap();
}

/// A dump with two sports, one user, one dated session and one non-session directory.
fn build_dump() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write(&root.join("SYS/SPORT/1/SPORT.BPB"), &sport(1, "Running").encode_to_vec());
    write(&root.join("SYS/SPORT/3/SPORT.BPB"), &sport(3, "Cycling").encode_to_vec());

    let user = root.join("U/0");
    write(
        &user.join("USERID.BPB"),
        &sample(Schema::UserIdentifier).encode_to_vec(),
    );
    write(&user.join("README.TXT"), b"not a record");

    let session = user.join("161213");
    write(
        &session.join("ACT/ASAMPL0.BPB"),
        &activity_samples(&[1, 99]).encode_to_vec(),
    );
    write(&session.join("DSUM/DSUM.BPB"), &daily_summary(4200).encode_to_vec());

    let training = session.join("E/103000");
    write(
        &training.join("TSESS.BPB"),
        &sample(Schema::TrainingSession).encode_to_vec(),
    );
    write(
        &training.join("00/BASE.BPB"),
        &PbExerciseBase {
            start: Some(local(10)),
            duration: Some(minutes(45)),
            sport: Some(PbSportIdentifier { value: Some(3) }),
            ..Default::default()
        }
        .encode_to_vec(),
    );
    write(
        &training.join("00/SAMPLES.GZB"),
        &gzip(&exercise_samples().encode_to_vec()),
    );

    write(
        &user.join("not-a-date/DSUM/DSUM.BPB"),
        &daily_summary(1).encode_to_vec(),
    );
    dir
}

#[test]
fn test_sports_index_keyed_by_directory() {
    let dir = build_dump();
    let root = DumpRoot::open(dir.path()).unwrap();
    let sports = root.build_sports_index().unwrap();
    assert_eq!(sports.ids().collect::<Vec<_>>(), vec![1, 3]);
    assert_eq!(sports.get(3).unwrap().display_name(), Some("Cycling"));
}

#[test]
fn test_traversal_skips_non_session_directories() {
    let dir = build_dump();
    let root = DumpRoot::open(dir.path()).unwrap();
    let sports = root.build_sports_index().unwrap();

    let summaries: Vec<_> = DumpTraversal::new(root.path(), &sports)
        .filter_map(|item| match item.record().map(Record::message) {
            Some(Message::DailySummary(m)) => Some((item.scope.clone(), m.steps)),
            _ => None,
        })
        .collect();
    assert_eq!(summaries.len(), 1);
    let (scope, steps) = &summaries[0];
    assert_eq!(scope.user.as_deref(), Some("0"));
    assert_eq!(scope.session.as_deref(), Some("161213"));
    assert_eq!(scope.category.as_deref(), Some("DSUM"));
    assert_eq!(*steps, Some(4200));
}

#[test]
fn test_traversal_enters_eight_digit_session() {
    let dir = TempDir::new().unwrap();
    let user = dir.path().join("U/alice");
    write(
        &user.join("20230101/ACT/ASAMPL0.BPB"),
        &activity_samples(&[]).encode_to_vec(),
    );
    write(
        &user.join("not-a-date/ACT/ASAMPL0.BPB"),
        &activity_samples(&[]).encode_to_vec(),
    );

    let root = DumpRoot::open(dir.path()).unwrap();
    let sports = root.build_sports_index().unwrap();
    let items: Vec<_> = DumpTraversal::new(root.path(), &sports).collect();
    assert_eq!(items.len(), 1);
    assert!(items[0]
        .path
        .ends_with(Path::new("alice/20230101/ACT/ASAMPL0.BPB")));
    assert!(matches!(
        items[0].record().map(Record::message),
        Some(Message::ActivitySamples(_))
    ));
    assert_eq!(items[0].scope.user.as_deref(), Some("alice"));
}

#[test]
fn test_traversal_decodes_every_known_file() {
    let dir = build_dump();
    let root = DumpRoot::open(dir.path()).unwrap();
    let sports = root.build_sports_index().unwrap();
    let items: Vec<_> = DumpTraversal::new(root.path(), &sports).collect();

    let mut schemas: Vec<&str> = items
        .iter()
        .filter_map(|i| i.record())
        .map(|r| r.schema().message_name())
        .collect();
    schemas.sort();
    assert_eq!(
        schemas,
        vec![
            "PbActivitySamples",
            "PbDailySummary",
            "PbExerciseBase",
            "PbExerciseSamples",
            "PbTrainingSession",
            "PbUserIdentifier",
        ]
    );

    let skipped: Vec<_> = items
        .iter()
        .filter(|i| matches!(i.outcome, Outcome::Skipped))
        .collect();
    assert_eq!(skipped.len(), 1);
    assert!(skipped[0].path.ends_with("README.TXT"));
    assert!(items.iter().all(|i| i.error().is_none()));
}

#[test]
fn test_cross_references_resolved_and_unresolved() {
    let dir = build_dump();
    let root = DumpRoot::open(dir.path()).unwrap();
    let sports = root.build_sports_index().unwrap();

    let activity = DumpTraversal::new(root.path(), &sports)
        .find(|i| {
            matches!(
                i.record().map(Record::message),
                Some(Message::ActivitySamples(_))
            )
        })
        .unwrap();
    let Outcome::Decoded { references, .. } = activity.outcome else {
        panic!("expected a decoded item");
    };
    assert_eq!(references.len(), 2);
    assert_eq!(references[0].sport_id, 1);
    assert_eq!(
        references[0].resolution,
        Resolution::Resolved {
            name: Some("Running".to_string())
        }
    );
    assert_eq!(references[1].sport_id, 99);
    assert_eq!(references[1].resolution, Resolution::Unresolved);
}

#[test]
fn test_exercise_samples_are_gunzipped() {
    let dir = build_dump();
    let root = DumpRoot::open(dir.path()).unwrap();
    let sports = root.build_sports_index().unwrap();

    let item = DumpTraversal::new(root.path(), &sports)
        .find(|i| i.path.ends_with("SAMPLES.GZB"))
        .unwrap();
    assert_eq!(item.scope.category.as_deref(), Some("E"));
    match item.record().map(Record::message) {
        Some(Message::ExerciseSamples(m)) => {
            assert_eq!(m.heart_rate_samples, vec![120, 121, 125, 130])
        }
        other => panic!("unexpected record: {:?}", other),
    }
}

#[test]
fn test_single_file_matches_direct_decode() {
    let dir = build_dump();
    let path = dir.path().join("SYS/SPORT/3/SPORT.BPB");
    let record = decode_one(&path).unwrap();
    assert_eq!(record.message(), &Message::Sport(sport(3, "Cycling")));

    let sports = DumpRoot::open(dir.path())
        .unwrap()
        .build_sports_index()
        .unwrap();
    assert_eq!(
        record.message(),
        &Message::Sport(sports.get(3).unwrap().clone())
    );
}

#[test]
fn test_every_schema_round_trips_from_disk() {
    let dir = TempDir::new().unwrap();
    for entry in entries() {
        let message = sample(entry.schema);
        let raw = message.encode_to_vec();
        let bytes = match entry.compression {
            Compression::Gzip => gzip(&raw),
            Compression::None => raw.clone(),
        };
        let path = dir.path().join(entry.file.file_name());
        fs::write(&path, bytes).unwrap();

        let decoded = decode_file(&path).unwrap();
        assert_eq!(decoded.schema(), entry.schema);
        assert_eq!(decoded.message(), &message, "{}", entry.file);
        assert!(decoded.unknown_fields().is_empty(), "{}", entry.file);
        assert_eq!(decoded.encode_to_vec(), raw, "{}", entry.file);
    }
}

#[test]
fn test_every_schema_rejects_truncated_payload() {
    for entry in entries() {
        let raw = sample(entry.schema).encode_to_vec();
        assert!(!raw.is_empty());
        let err = decode_bytes(entry.file, &raw[..raw.len() - 1]).unwrap_err();
        assert!(
            matches!(err, PolarError::MalformedRecord { .. }),
            "{}: {:?}",
            entry.file,
            err
        );
    }
}

/// Cutting a payload between two top-level fields leaves a well-formed
/// buffer. The decoder must reject every such cut that drops a required
/// field, and accept the rest unchanged.
#[test]
fn test_every_schema_field_boundary_cut() {
    // Samples with a required top-level field after their first field.
    let first_cut_rejected = [
        Schema::ActivitySamples,
        Schema::ExerciseBase,
        Schema::Identifier,
        Schema::UserPhysData,
        Schema::SportProfile,
        Schema::RecoveryTimes,
        Schema::Sport,
        Schema::TrainingSession,
    ];

    let mut rejected = 0;
    for entry in entries() {
        let raw = sample(entry.schema).encode_to_vec();
        let fields = scan(&raw).unwrap();
        let mut end = 0;
        for (i, field) in fields[..fields.len() - 1].iter().enumerate() {
            end += field.len;
            let prefix = &raw[..end];
            let typed = entry.schema.decode(prefix).unwrap();
            match (typed.missing_required(), decode_bytes(entry.file, prefix)) {
                (Some(missing), Err(PolarError::MalformedRecord { reason, .. })) => {
                    assert!(reason.contains(&missing), "{}: {}", entry.file, reason);
                    rejected += 1;
                }
                (None, Ok(record)) => {
                    assert!(
                        !(i == 0 && first_cut_rejected.contains(&entry.schema)),
                        "{} accepted without its second field",
                        entry.file
                    );
                    assert_eq!(record.message(), &typed);
                }
                (missing, result) => panic!(
                    "{} cut at {} of {} bytes: missing {:?}, decoded {:?}",
                    entry.file,
                    end,
                    raw.len(),
                    missing,
                    result
                ),
            }
        }
    }
    assert!(rejected >= first_cut_rejected.len());
}

#[test]
fn test_training_session_cut_after_start_is_malformed() {
    let raw = sample(Schema::TrainingSession).encode_to_vec();
    let fields = scan(&raw).unwrap();
    assert_eq!(fields[0].tag, 1);

    let err = decode_bytes(FileIdentifier::TrainingSession, &raw[..fields[0].len]).unwrap_err();
    assert!(err.to_string().contains("exercise_count"), "{}", err);
}

#[test]
fn test_unknown_field_kept_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("DSUM.BPB");
    let mut raw = daily_summary(4200).encode_to_vec();
    raw.extend_from_slice(&[0x48, 0x05]);
    fs::write(&path, &raw).unwrap();

    let record = decode_file(&path).unwrap();
    assert_eq!(record.encode_to_vec(), raw);
    assert_eq!(record.message(), &Message::DailySummary(daily_summary(4200)));
    assert_eq!(record.unknown_fields().len(), 1);
    assert_eq!(record.unknown_fields()[0].tag, 9);
    assert_eq!(record.unknown_fields()[0].value, FieldValue::Varint(5));
    assert!(record.render_text().contains("#9 varint 5"));
}

#[test]
fn test_missing_sports_directory_gives_empty_index() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("U")).unwrap();
    let root = DumpRoot::open(dir.path()).unwrap();
    let sports = root.build_sports_index().unwrap();
    assert!(sports.is_empty());
    assert_eq!(DumpTraversal::new(root.path(), &sports).count(), 0);
}

#[test]
fn test_invalid_dump_root() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("dump.tar");
    fs::write(&file, b"").unwrap();
    assert!(matches!(
        DumpRoot::open(&file),
        Err(PolarError::InvalidDumpRoot(_))
    ));
}
