//! Decoded dump records.
//!
//! [`Message`] is a closed enum with one variant per [`Schema`]. A
//! [`Record`] pairs it with the payload it was decoded from, so the file
//! can be reproduced byte for byte with [`Record::encode_to_vec`] even when
//! it carries fields the typed message does not declare. Those fields are
//! listed by [`Record::unknown_fields`] and appear in both renderings.
//!
//! Records render as text (pretty `Debug`) or JSON (`serde`), and report the
//! sport ids they reference so those can be resolved against a
//! [`SportsIndex`](crate::dump::sports::SportsIndex).

use std::collections::HashSet;

use prost::Message as _;
use serde::Serialize;

use crate::dump::registry::{FileIdentifier, Schema};
use crate::dump::wire::{self, Field};
use crate::pb::{activity, exercise, sport, user, Validate};

#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(tag = "schema", content = "message")]
pub enum Message {
    ActivitySamples(activity::PbActivitySamples),
    ExerciseBase(exercise::PbExerciseBase),
    DailyActivityGoal(activity::PbDailyActivityGoal),
    DailySummary(activity::PbDailySummary),
    Identifier(user::PbIdentifier),
    UserPhysData(user::PbUserPhysData),
    GeneralPreferences(user::PbGeneralPreferences),
    SportProfile(sport::PbSportProfile),
    RecoveryTimes(exercise::PbRecoveryTimes),
    ExerciseSamples(exercise::PbExerciseSamples),
    Sport(sport::PbSport),
    ExerciseStatistics(exercise::PbExerciseStatistics),
    TrainingSession(exercise::PbTrainingSession),
    UserIdentifier(user::PbUserIdentifier),
    UserDatabase(user::PbUserDb),
    UserDeviceSettings(user::PbUserDeviceSettings),
    RecordedZones(exercise::PbRecordedZones),
}

/// Apply `$body` to the wrapped message whatever its type.
macro_rules! with_message {
    ($value:expr, $m:ident => $body:expr) => {
        match $value {
            Message::ActivitySamples($m) => $body,
            Message::ExerciseBase($m) => $body,
            Message::DailyActivityGoal($m) => $body,
            Message::DailySummary($m) => $body,
            Message::Identifier($m) => $body,
            Message::UserPhysData($m) => $body,
            Message::GeneralPreferences($m) => $body,
            Message::SportProfile($m) => $body,
            Message::RecoveryTimes($m) => $body,
            Message::ExerciseSamples($m) => $body,
            Message::Sport($m) => $body,
            Message::ExerciseStatistics($m) => $body,
            Message::TrainingSession($m) => $body,
            Message::UserIdentifier($m) => $body,
            Message::UserDatabase($m) => $body,
            Message::UserDeviceSettings($m) => $body,
            Message::RecordedZones($m) => $body,
        }
    };
}

impl Message {
    pub fn schema(&self) -> Schema {
        match self {
            Message::ActivitySamples(_) => Schema::ActivitySamples,
            Message::ExerciseBase(_) => Schema::ExerciseBase,
            Message::DailyActivityGoal(_) => Schema::DailyActivityGoal,
            Message::DailySummary(_) => Schema::DailySummary,
            Message::Identifier(_) => Schema::Identifier,
            Message::UserPhysData(_) => Schema::UserPhysData,
            Message::GeneralPreferences(_) => Schema::GeneralPreferences,
            Message::SportProfile(_) => Schema::SportProfile,
            Message::RecoveryTimes(_) => Schema::RecoveryTimes,
            Message::ExerciseSamples(_) => Schema::ExerciseSamples,
            Message::Sport(_) => Schema::Sport,
            Message::ExerciseStatistics(_) => Schema::ExerciseStatistics,
            Message::TrainingSession(_) => Schema::TrainingSession,
            Message::UserIdentifier(_) => Schema::UserIdentifier,
            Message::UserDatabase(_) => Schema::UserDatabase,
            Message::UserDeviceSettings(_) => Schema::UserDeviceSettings,
            Message::RecordedZones(_) => Schema::RecordedZones,
        }
    }

    /// The file name this message is stored under.
    pub fn file(&self) -> FileIdentifier {
        match self {
            Message::ActivitySamples(_) => FileIdentifier::ActivitySamples,
            Message::ExerciseBase(_) => FileIdentifier::ExerciseBase,
            Message::DailyActivityGoal(_) => FileIdentifier::DailyActivityGoal,
            Message::DailySummary(_) => FileIdentifier::DailySummary,
            Message::Identifier(_) => FileIdentifier::Identifier,
            Message::UserPhysData(_) => FileIdentifier::UserPhysData,
            Message::GeneralPreferences(_) => FileIdentifier::GeneralPreferences,
            Message::SportProfile(_) => FileIdentifier::SportProfile,
            Message::RecoveryTimes(_) => FileIdentifier::RecoveryTimes,
            Message::ExerciseSamples(_) => FileIdentifier::ExerciseSamples,
            Message::Sport(_) => FileIdentifier::Sport,
            Message::ExerciseStatistics(_) => FileIdentifier::ExerciseStatistics,
            Message::TrainingSession(_) => FileIdentifier::TrainingSession,
            Message::UserIdentifier(_) => FileIdentifier::UserIdentifier,
            Message::UserDatabase(_) => FileIdentifier::UserDatabase,
            Message::UserDeviceSettings(_) => FileIdentifier::UserDeviceSettings,
            Message::RecordedZones(_) => FileIdentifier::RecordedZones,
        }
    }

    /// Protobuf encoding of the typed fields only.
    pub fn encode_to_vec(&self) -> Vec<u8> {
        with_message!(self, m => m.encode_to_vec())
    }

    /// Dotted path of the first `required` field left unset, if any.
    pub fn missing_required(&self) -> Option<String> {
        with_message!(self, m => m.missing_field())
    }

    /// Sport ids this message points at, sorted and deduplicated.
    ///
    /// Activity samples reference sports through `sport_info[].sport_profile_id`,
    /// exercise bases through `sport`, sport profiles through `sport_identifier`.
    pub fn sport_ids(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = match self {
            Message::ActivitySamples(m) => m
                .sport_info
                .iter()
                .filter_map(|s| s.sport_profile_id)
                .collect(),
            Message::ExerciseBase(m) => m.sport.iter().filter_map(|s| s.value).collect(),
            Message::SportProfile(m) => {
                m.sport_identifier.iter().filter_map(|s| s.value).collect()
            }
            _ => Vec::new(),
        };
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    fn render_debug(&self) -> String {
        with_message!(self, m => format!("{:#?}", m))
    }
}

/// A decoded file: the typed message plus the payload it came from.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct Record {
    #[serde(flatten)]
    message: Message,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    unknown_fields: Vec<Field>,
    #[serde(skip)]
    raw: Vec<u8>,
    /// Typed fields plus `unknown_fields` account for every byte of `raw`.
    #[serde(skip)]
    complete: bool,
}

impl Record {
    /// Decode an uncompressed payload as `schema`, keeping the payload.
    ///
    /// Required-field presence is not checked here; see
    /// [`Record::missing_required`].
    pub fn decode(schema: Schema, buf: &[u8]) -> Result<Record, String> {
        let message = schema
            .decode(buf)
            .map_err(|e| format!("{}: {}", schema, e))?;
        let typed = message.encode_to_vec();

        // Every typed field is an `Option` or a `Vec`, so a field prost kept
        // is always re-encoded and its tag shows up in `typed`.
        let known: HashSet<u32> = wire::scan(&typed)?.into_iter().map(|f| f.tag).collect();
        let unknown_fields: Vec<Field> = wire::scan(buf)
            .map_err(|e| format!("{}: {}", schema, e))?
            .into_iter()
            .filter(|f| !known.contains(&f.tag))
            .collect();
        let unknown_len: usize = unknown_fields.iter().map(|f| f.len).sum();

        Ok(Record {
            complete: typed.len() + unknown_len == buf.len(),
            message,
            unknown_fields,
            raw: buf.to_vec(),
        })
    }

    /// Wrap a message built in memory; its payload is its own encoding.
    pub fn from_message(message: Message) -> Record {
        Record {
            raw: message.encode_to_vec(),
            message,
            unknown_fields: Vec::new(),
            complete: true,
        }
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn into_message(self) -> Message {
        self.message
    }

    pub fn schema(&self) -> Schema {
        self.message.schema()
    }

    /// The file name this record is stored under.
    pub fn file(&self) -> FileIdentifier {
        self.message.file()
    }

    /// The uncompressed payload exactly as read.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Protobuf encoding of the record (uncompressed), identical to the
    /// payload it was decoded from.
    pub fn encode_to_vec(&self) -> Vec<u8> {
        self.raw.clone()
    }

    /// Top-level fields present on the wire but not declared by the message.
    pub fn unknown_fields(&self) -> &[Field] {
        &self.unknown_fields
    }

    /// Multi-line text rendering of every decoded field.
    ///
    /// Unknown top-level fields follow the typed fields. When the typed
    /// view and those fields together still do not cover the payload (an
    /// undeclared field inside a sub-message, say), the payload is appended
    /// in hex.
    pub fn render_text(&self) -> String {
        let mut text = self.message.render_debug();
        for field in &self.unknown_fields {
            text.push_str(&format!("\nunknown field {}", field));
        }
        if !self.complete {
            text.push_str(&format!(
                "\nraw payload ({} bytes): {}",
                self.raw.len(),
                wire::hex(&self.raw)
            ));
        }
        text
    }

    pub fn sport_ids(&self) -> Vec<u64> {
        self.message.sport_ids()
    }

    pub fn missing_required(&self) -> Option<String> {
        self.message.missing_required()
    }
}
