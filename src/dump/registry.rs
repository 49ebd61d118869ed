//! File name to schema dispatch.
//!
//! Every file a dump can contain is named by a [`FileIdentifier`]. The
//! [`REGISTRY`] table maps each decodable identifier to the [`Schema`] that
//! decodes it and the [`Compression`] applied on disk. The table is a
//! `static`, so it exists before `main` runs and can never be modified.
//!
//! `DEVICE.BPB` and `SYNCINFO.BPB` are recognised names, but the firmware
//! writes them in a layout the published messages do not decode. They are
//! intentionally absent from the table: [`lookup`] returns `None` for them
//! exactly as it does for an unknown name.

use std::fmt;
use std::path::Path;

use prost::Message as _;
use serde::Serialize;

use crate::dump::record::Message;
use crate::pb::{activity, exercise, sport, user};

/// Every file name known to appear in a device dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum FileIdentifier {
    /// `ASAMPL0.BPB`
    ActivitySamples,
    /// `BASE.BPB`
    ExerciseBase,
    /// `DEVICE.BPB` (no schema)
    DeviceInfo,
    /// `DGOAL.BPB`
    DailyActivityGoal,
    /// `DSUM.BPB`
    DailySummary,
    /// `ID.BPB`
    Identifier,
    /// `PHYSDATA.BPB`
    UserPhysData,
    /// `PREFS.PBP`
    GeneralPreferences,
    /// `PROFILE.PBP`
    SportProfile,
    /// `RECOVS.BPB`
    RecoveryTimes,
    /// `SAMPLES.GZB`
    ExerciseSamples,
    /// `SPORT.BPB`
    Sport,
    /// `STATS.BPB`
    ExerciseStatistics,
    /// `SYNCINFO.BPB` (no schema)
    SyncInfo,
    /// `TSESS.BPB`
    TrainingSession,
    /// `USERID.BPB`
    UserIdentifier,
    /// `UDB.BPB`
    UserDatabase,
    /// `UDEVSET.BPB`
    UserDeviceSettings,
    /// `ZONES.BPB`
    RecordedZones,
}

impl FileIdentifier {
    pub const ALL: [FileIdentifier; 19] = [
        FileIdentifier::ActivitySamples,
        FileIdentifier::ExerciseBase,
        FileIdentifier::DeviceInfo,
        FileIdentifier::DailyActivityGoal,
        FileIdentifier::DailySummary,
        FileIdentifier::Identifier,
        FileIdentifier::UserPhysData,
        FileIdentifier::GeneralPreferences,
        FileIdentifier::SportProfile,
        FileIdentifier::RecoveryTimes,
        FileIdentifier::ExerciseSamples,
        FileIdentifier::Sport,
        FileIdentifier::ExerciseStatistics,
        FileIdentifier::SyncInfo,
        FileIdentifier::TrainingSession,
        FileIdentifier::UserIdentifier,
        FileIdentifier::UserDatabase,
        FileIdentifier::UserDeviceSettings,
        FileIdentifier::RecordedZones,
    ];

    /// Match a file's base name. Case-sensitive.
    ///
    /// ```
    /// use polar::dump::registry::FileIdentifier;
    ///
    /// assert_eq!(FileIdentifier::from_file_name("DSUM.BPB"), Some(FileIdentifier::DailySummary));
    /// assert_eq!(FileIdentifier::from_file_name("dsum.bpb"), None);
    /// ```
    pub fn from_file_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.file_name() == name)
    }

    /// Identify a path by its final component.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.file_name()
            .and_then(|n| n.to_str())
            .and_then(Self::from_file_name)
    }

    pub fn file_name(self) -> &'static str {
        match self {
            FileIdentifier::ActivitySamples => "ASAMPL0.BPB",
            FileIdentifier::ExerciseBase => "BASE.BPB",
            FileIdentifier::DeviceInfo => "DEVICE.BPB",
            FileIdentifier::DailyActivityGoal => "DGOAL.BPB",
            FileIdentifier::DailySummary => "DSUM.BPB",
            FileIdentifier::Identifier => "ID.BPB",
            FileIdentifier::UserPhysData => "PHYSDATA.BPB",
            FileIdentifier::GeneralPreferences => "PREFS.PBP",
            FileIdentifier::SportProfile => "PROFILE.PBP",
            FileIdentifier::RecoveryTimes => "RECOVS.BPB",
            FileIdentifier::ExerciseSamples => "SAMPLES.GZB",
            FileIdentifier::Sport => "SPORT.BPB",
            FileIdentifier::ExerciseStatistics => "STATS.BPB",
            FileIdentifier::SyncInfo => "SYNCINFO.BPB",
            FileIdentifier::TrainingSession => "TSESS.BPB",
            FileIdentifier::UserIdentifier => "USERID.BPB",
            FileIdentifier::UserDatabase => "UDB.BPB",
            FileIdentifier::UserDeviceSettings => "UDEVSET.BPB",
            FileIdentifier::RecordedZones => "ZONES.BPB",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            FileIdentifier::ActivitySamples => "Daily activity samples",
            FileIdentifier::ExerciseBase => "Exercise summary",
            FileIdentifier::DeviceInfo => "Device information",
            FileIdentifier::DailyActivityGoal => "Daily activity goal",
            FileIdentifier::DailySummary => "Daily summary",
            FileIdentifier::Identifier => "Object identifier",
            FileIdentifier::UserPhysData => "User physical data",
            FileIdentifier::GeneralPreferences => "General preferences",
            FileIdentifier::SportProfile => "Sport profile",
            FileIdentifier::RecoveryTimes => "Recovery times",
            FileIdentifier::ExerciseSamples => "Exercise samples",
            FileIdentifier::Sport => "Sport descriptor",
            FileIdentifier::ExerciseStatistics => "Exercise statistics",
            FileIdentifier::SyncInfo => "Synchronization info",
            FileIdentifier::TrainingSession => "Training session",
            FileIdentifier::UserIdentifier => "User identifier",
            FileIdentifier::UserDatabase => "User database",
            FileIdentifier::UserDeviceSettings => "User device settings",
            FileIdentifier::RecordedZones => "Recorded heart rate zones",
        }
    }
}

impl fmt::Display for FileIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// On-disk encoding applied on top of the protobuf payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Compression {
    None,
    Gzip,
}

/// A decodable message type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Schema {
    ActivitySamples,
    ExerciseBase,
    DailyActivityGoal,
    DailySummary,
    Identifier,
    UserPhysData,
    GeneralPreferences,
    SportProfile,
    RecoveryTimes,
    ExerciseSamples,
    Sport,
    ExerciseStatistics,
    TrainingSession,
    UserIdentifier,
    UserDatabase,
    UserDeviceSettings,
    RecordedZones,
}

impl Schema {
    /// Protobuf message name as used by the device firmware.
    pub fn message_name(self) -> &'static str {
        match self {
            Schema::ActivitySamples => "PbActivitySamples",
            Schema::ExerciseBase => "PbExerciseBase",
            Schema::DailyActivityGoal => "PbDailyActivityGoal",
            Schema::DailySummary => "PbDailySummary",
            Schema::Identifier => "PbIdentifier",
            Schema::UserPhysData => "PbUserPhysData",
            Schema::GeneralPreferences => "PbGeneralPreferences",
            Schema::SportProfile => "PbSportProfile",
            Schema::RecoveryTimes => "PbRecoveryTimes",
            Schema::ExerciseSamples => "PbExerciseSamples",
            Schema::Sport => "PbSport",
            Schema::ExerciseStatistics => "PbExerciseStatistics",
            Schema::TrainingSession => "PbTrainingSession",
            Schema::UserIdentifier => "PbUserIdentifier",
            Schema::UserDatabase => "PbUserDb",
            Schema::UserDeviceSettings => "PbUserDeviceSettings",
            Schema::RecordedZones => "PbRecordedZones",
        }
    }

    /// Decode an uncompressed buffer as this schema's message.
    pub fn decode(self, buf: &[u8]) -> Result<Message, prost::DecodeError> {
        Ok(match self {
            Schema::ActivitySamples => {
                Message::ActivitySamples(activity::PbActivitySamples::decode(buf)?)
            }
            Schema::ExerciseBase => Message::ExerciseBase(exercise::PbExerciseBase::decode(buf)?),
            Schema::DailyActivityGoal => {
                Message::DailyActivityGoal(activity::PbDailyActivityGoal::decode(buf)?)
            }
            Schema::DailySummary => Message::DailySummary(activity::PbDailySummary::decode(buf)?),
            Schema::Identifier => Message::Identifier(user::PbIdentifier::decode(buf)?),
            Schema::UserPhysData => Message::UserPhysData(user::PbUserPhysData::decode(buf)?),
            Schema::GeneralPreferences => {
                Message::GeneralPreferences(user::PbGeneralPreferences::decode(buf)?)
            }
            Schema::SportProfile => Message::SportProfile(sport::PbSportProfile::decode(buf)?),
            Schema::RecoveryTimes => {
                Message::RecoveryTimes(exercise::PbRecoveryTimes::decode(buf)?)
            }
            Schema::ExerciseSamples => {
                Message::ExerciseSamples(exercise::PbExerciseSamples::decode(buf)?)
            }
            Schema::Sport => Message::Sport(sport::PbSport::decode(buf)?),
            Schema::ExerciseStatistics => {
                Message::ExerciseStatistics(exercise::PbExerciseStatistics::decode(buf)?)
            }
            Schema::TrainingSession => {
                Message::TrainingSession(exercise::PbTrainingSession::decode(buf)?)
            }
            Schema::UserIdentifier => {
                Message::UserIdentifier(user::PbUserIdentifier::decode(buf)?)
            }
            Schema::UserDatabase => Message::UserDatabase(user::PbUserDb::decode(buf)?),
            Schema::UserDeviceSettings => {
                Message::UserDeviceSettings(user::PbUserDeviceSettings::decode(buf)?)
            }
            Schema::RecordedZones => {
                Message::RecordedZones(exercise::PbRecordedZones::decode(buf)?)
            }
        })
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message_name())
    }
}

/// One row of the dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SchemaEntry {
    pub file: FileIdentifier,
    pub schema: Schema,
    pub compression: Compression,
}

const fn entry(file: FileIdentifier, schema: Schema, compression: Compression) -> SchemaEntry {
    SchemaEntry {
        file,
        schema,
        compression,
    }
}

/// The dispatch table. `DeviceInfo` and `SyncInfo` have no row.
pub static REGISTRY: [SchemaEntry; 17] = [
    entry(FileIdentifier::ActivitySamples, Schema::ActivitySamples, Compression::None),
    entry(FileIdentifier::ExerciseBase, Schema::ExerciseBase, Compression::None),
    entry(FileIdentifier::DailyActivityGoal, Schema::DailyActivityGoal, Compression::None),
    entry(FileIdentifier::DailySummary, Schema::DailySummary, Compression::None),
    entry(FileIdentifier::Identifier, Schema::Identifier, Compression::None),
    entry(FileIdentifier::UserPhysData, Schema::UserPhysData, Compression::None),
    entry(FileIdentifier::GeneralPreferences, Schema::GeneralPreferences, Compression::None),
    entry(FileIdentifier::SportProfile, Schema::SportProfile, Compression::None),
    entry(FileIdentifier::RecoveryTimes, Schema::RecoveryTimes, Compression::None),
    entry(FileIdentifier::ExerciseSamples, Schema::ExerciseSamples, Compression::Gzip),
    entry(FileIdentifier::Sport, Schema::Sport, Compression::None),
    entry(FileIdentifier::ExerciseStatistics, Schema::ExerciseStatistics, Compression::None),
    entry(FileIdentifier::TrainingSession, Schema::TrainingSession, Compression::None),
    entry(FileIdentifier::UserIdentifier, Schema::UserIdentifier, Compression::None),
    entry(FileIdentifier::UserDatabase, Schema::UserDatabase, Compression::None),
    entry(FileIdentifier::UserDeviceSettings, Schema::UserDeviceSettings, Compression::None),
    entry(FileIdentifier::RecordedZones, Schema::RecordedZones, Compression::None),
];

/// Schema and compression for a file, or `None` if the file has no schema.
pub fn lookup(file: FileIdentifier) -> Option<SchemaEntry> {
    REGISTRY.iter().find(|e| e.file == file).copied()
}

/// [`lookup`] by base name.
pub fn lookup_name(name: &str) -> Option<SchemaEntry> {
    FileIdentifier::from_file_name(name).and_then(lookup)
}

pub fn entries() -> impl Iterator<Item = &'static SchemaEntry> {
    REGISTRY.iter()
}
