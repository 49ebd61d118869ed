//! Shared message types referenced by most dump records.

use serde::Serialize;

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbDate {
    #[prost(uint32, optional, tag = "1")]
    pub year: Option<u32>,
    #[prost(uint32, optional, tag = "2")]
    pub month: Option<u32>,
    #[prost(uint32, optional, tag = "3")]
    pub day: Option<u32>,
}

validate!(PbDate {
    required year,
    required month,
    required day,
});

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbTime {
    #[prost(uint32, optional, tag = "1")]
    pub hour: Option<u32>,
    #[prost(uint32, optional, tag = "2")]
    pub minute: Option<u32>,
    #[prost(uint32, optional, tag = "3")]
    pub seconds: Option<u32>,
    #[prost(uint32, optional, tag = "4")]
    pub millis: Option<u32>,
}

validate!(PbTime {
    required hour,
    required minute,
    required seconds,
});

/// Wall-clock time as shown on the device, with the zone offset in minutes.
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbLocalDateTime {
    #[prost(message, optional, tag = "1")]
    pub date: Option<PbDate>,
    #[prost(message, optional, tag = "2")]
    pub time: Option<PbTime>,
    #[prost(bool, optional, tag = "3")]
    pub obsolete_trusted: Option<bool>,
    #[prost(int32, optional, tag = "4")]
    pub time_zone_offset: Option<i32>,
}

validate!(PbLocalDateTime {
    required_message date,
    required_message time,
    required obsolete_trusted,
});

/// UTC timestamp used for `created`/`last_modified` bookkeeping.
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbSystemDateTime {
    #[prost(message, optional, tag = "1")]
    pub date: Option<PbDate>,
    #[prost(message, optional, tag = "2")]
    pub time: Option<PbTime>,
    #[prost(bool, optional, tag = "3")]
    pub trusted: Option<bool>,
}

validate!(PbSystemDateTime {
    required_message date,
    required_message time,
    required trusted,
});

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbDuration {
    #[prost(uint32, optional, tag = "1")]
    pub hours: Option<u32>,
    #[prost(uint32, optional, tag = "2")]
    pub minutes: Option<u32>,
    #[prost(uint32, optional, tag = "3")]
    pub seconds: Option<u32>,
    #[prost(uint32, optional, tag = "4")]
    pub millis: Option<u32>,
}

validate!(PbDuration {});

impl PbDuration {
    /// Total length in milliseconds, treating absent parts as zero.
    pub fn total_millis(&self) -> u64 {
        let h = u64::from(self.hours.unwrap_or(0));
        let m = u64::from(self.minutes.unwrap_or(0));
        let s = u64::from(self.seconds.unwrap_or(0));
        let ms = u64::from(self.millis.unwrap_or(0));
        ((h * 60 + m) * 60 + s) * 1000 + ms
    }
}

/// Numeric sport id; the key used by `SYS/SPORT/<id>` directories.
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbSportIdentifier {
    #[prost(uint64, optional, tag = "1")]
    pub value: Option<u64>,
}

validate!(PbSportIdentifier {
    required value,
});

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbOneLineText {
    #[prost(string, optional, tag = "1")]
    pub text: Option<String>,
}

validate!(PbOneLineText {
    required text,
});

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbMultiLineText {
    #[prost(string, optional, tag = "1")]
    pub text: Option<String>,
}

validate!(PbMultiLineText {
    required text,
});

/// ISO 639-1 language code, e.g. `en`.
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbLanguageId {
    #[prost(string, optional, tag = "1")]
    pub language: Option<String>,
}

validate!(PbLanguageId {
    required language,
});

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbHeartRateZone {
    #[prost(uint32, optional, tag = "1")]
    pub lower_limit: Option<u32>,
    #[prost(uint32, optional, tag = "2")]
    pub higher_limit: Option<u32>,
}

validate!(PbHeartRateZone {
    required lower_limit,
    required higher_limit,
});

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbTrainingLoad {
    #[prost(uint32, optional, tag = "1")]
    pub training_load_val: Option<u32>,
    #[prost(message, optional, tag = "2")]
    pub recovery_time: Option<PbDuration>,
    #[prost(uint32, optional, tag = "3")]
    pub carbohydrate_consumption: Option<u32>,
    #[prost(uint32, optional, tag = "4")]
    pub protein_consumption: Option<u32>,
    #[prost(uint32, optional, tag = "5")]
    pub fat_consumption: Option<u32>,
}

validate!(PbTrainingLoad {
    optional_message recovery_time,
});
