//! Training session and per-exercise recordings (`E/<time>/...`).

use serde::Serialize;

use crate::pb::types::{
    PbDuration, PbHeartRateZone, PbLocalDateTime, PbMultiLineText, PbOneLineText,
    PbSportIdentifier, PbTrainingLoad,
};

/// `E/<time>/<nn>/BASE.BPB`: headline figures for one exercise.
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbExerciseBase {
    #[prost(message, optional, tag = "1")]
    pub start: Option<PbLocalDateTime>,
    #[prost(message, optional, tag = "2")]
    pub duration: Option<PbDuration>,
    #[prost(message, optional, tag = "3")]
    pub sport: Option<PbSportIdentifier>,
    #[prost(float, optional, tag = "4")]
    pub distance: Option<f32>,
    #[prost(uint32, optional, tag = "5")]
    pub calories: Option<u32>,
    #[prost(message, optional, tag = "6")]
    pub training_load: Option<PbTrainingLoad>,
    #[prost(float, optional, tag = "10")]
    pub ascent: Option<f32>,
    #[prost(float, optional, tag = "11")]
    pub descent: Option<f32>,
    #[prost(double, optional, tag = "12")]
    pub latitude: Option<f64>,
    #[prost(double, optional, tag = "13")]
    pub longitude: Option<f64>,
    #[prost(string, optional, tag = "14")]
    pub place: Option<String>,
}

validate!(PbExerciseBase {
    required_message start,
    required_message duration,
    required_message sport,
    optional_message training_load,
});

/// `E/<time>/<nn>/SAMPLES.GZB`: sensor sample streams. Stored gzip-compressed.
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbExerciseSamples {
    #[prost(message, optional, tag = "1")]
    pub recording_interval: Option<PbDuration>,
    #[prost(uint32, repeated, packed = "false", tag = "2")]
    pub heart_rate_samples: Vec<u32>,
    #[prost(uint32, repeated, packed = "false", tag = "3")]
    pub cadence_samples: Vec<u32>,
    #[prost(float, repeated, packed = "false", tag = "4")]
    pub altitude_samples: Vec<f32>,
    #[prost(float, repeated, packed = "false", tag = "6")]
    pub temperature_samples: Vec<f32>,
    #[prost(float, repeated, packed = "false", tag = "9")]
    pub speed_samples: Vec<f32>,
    #[prost(float, repeated, packed = "false", tag = "10")]
    pub distance_samples: Vec<f32>,
    #[prost(uint32, repeated, packed = "false", tag = "11")]
    pub stride_length_samples: Vec<u32>,
}

validate!(PbExerciseSamples {
    required_message recording_interval,
});

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbHeartRateStatistics {
    #[prost(uint32, optional, tag = "1")]
    pub minimum: Option<u32>,
    #[prost(uint32, optional, tag = "2")]
    pub average: Option<u32>,
    #[prost(uint32, optional, tag = "3")]
    pub maximum: Option<u32>,
}

validate!(PbHeartRateStatistics {});

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbSpeedStatistics {
    #[prost(float, optional, tag = "1")]
    pub average: Option<f32>,
    #[prost(float, optional, tag = "2")]
    pub maximum: Option<f32>,
}

validate!(PbSpeedStatistics {});

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbCadenceStatistics {
    #[prost(uint32, optional, tag = "1")]
    pub average: Option<u32>,
    #[prost(uint32, optional, tag = "2")]
    pub maximum: Option<u32>,
}

validate!(PbCadenceStatistics {});

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbAltitudeStatistics {
    #[prost(float, optional, tag = "1")]
    pub minimum: Option<f32>,
    #[prost(float, optional, tag = "2")]
    pub average: Option<f32>,
    #[prost(float, optional, tag = "3")]
    pub maximum: Option<f32>,
}

validate!(PbAltitudeStatistics {});

/// `E/<time>/<nn>/STATS.BPB`
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbExerciseStatistics {
    #[prost(message, optional, tag = "1")]
    pub heart_rate: Option<PbHeartRateStatistics>,
    #[prost(message, optional, tag = "2")]
    pub speed: Option<PbSpeedStatistics>,
    #[prost(message, optional, tag = "3")]
    pub cadence: Option<PbCadenceStatistics>,
    #[prost(message, optional, tag = "4")]
    pub altitude: Option<PbAltitudeStatistics>,
}

validate!(PbExerciseStatistics {
    optional_message heart_rate,
    optional_message speed,
    optional_message cadence,
    optional_message altitude,
});

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbRecordedHeartRateZone {
    #[prost(message, optional, tag = "1")]
    pub zone_limits: Option<PbHeartRateZone>,
    #[prost(message, optional, tag = "2")]
    pub in_zone: Option<PbDuration>,
}

validate!(PbRecordedHeartRateZone {
    required_message zone_limits,
    required_message in_zone,
});

/// `E/<time>/<nn>/ZONES.BPB`: time spent per heart rate zone.
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbRecordedZones {
    #[prost(message, repeated, tag = "1")]
    pub heartrate_zone: Vec<PbRecordedHeartRateZone>,
}

validate!(PbRecordedZones {
    repeated_message heartrate_zone,
});

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbSessionHeartRateStatistics {
    #[prost(uint32, optional, tag = "1")]
    pub average: Option<u32>,
    #[prost(uint32, optional, tag = "2")]
    pub maximum: Option<u32>,
}

validate!(PbSessionHeartRateStatistics {});

/// `E/<time>/TSESS.BPB`: a training session grouping one or more exercises.
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbTrainingSession {
    #[prost(message, optional, tag = "1")]
    pub start: Option<PbLocalDateTime>,
    #[prost(uint32, optional, tag = "2")]
    pub exercise_count: Option<u32>,
    #[prost(string, optional, tag = "3")]
    pub device_id: Option<String>,
    #[prost(string, optional, tag = "4")]
    pub model_name: Option<String>,
    #[prost(message, optional, tag = "5")]
    pub duration: Option<PbDuration>,
    #[prost(float, optional, tag = "6")]
    pub distance: Option<f32>,
    #[prost(uint32, optional, tag = "7")]
    pub calories: Option<u32>,
    #[prost(message, optional, tag = "8")]
    pub heart_rate: Option<PbSessionHeartRateStatistics>,
    #[prost(message, repeated, tag = "9")]
    pub heart_rate_zone_duration: Vec<PbDuration>,
    #[prost(message, optional, tag = "10")]
    pub training_load: Option<PbTrainingLoad>,
    #[prost(message, optional, tag = "11")]
    pub session_name: Option<PbOneLineText>,
    #[prost(float, optional, tag = "12")]
    pub feeling: Option<f32>,
    #[prost(message, optional, tag = "13")]
    pub note: Option<PbMultiLineText>,
    #[prost(message, optional, tag = "20")]
    pub end: Option<PbLocalDateTime>,
}

validate!(PbTrainingSession {
    required_message start,
    required exercise_count,
    optional_message duration,
    optional_message heart_rate,
    repeated_message heart_rate_zone_duration,
    optional_message training_load,
    optional_message session_name,
    optional_message note,
    optional_message end,
});

/// `RECOVS.BPB`: recovery status curve after training.
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbRecoveryTimes {
    #[prost(message, optional, tag = "1")]
    pub start_time: Option<PbLocalDateTime>,
    #[prost(message, optional, tag = "2")]
    pub end_time: Option<PbLocalDateTime>,
    #[prost(float, repeated, packed = "false", tag = "3")]
    pub recovery_times: Vec<f32>,
}

validate!(PbRecoveryTimes {
    required_message start_time,
    required_message end_time,
});
