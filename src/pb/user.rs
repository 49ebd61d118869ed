//! User identity, physical data, preferences, and device settings.

use serde::Serialize;

use crate::pb::types::{PbDate, PbLanguageId, PbSystemDateTime};

/// `ID.BPB`: creation and modification stamps attached to a synced object.
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbIdentifier {
    #[prost(uint64, optional, tag = "1")]
    pub ecosystem_id: Option<u64>,
    #[prost(message, optional, tag = "2")]
    pub created: Option<PbSystemDateTime>,
    #[prost(message, optional, tag = "3")]
    pub last_modified: Option<PbSystemDateTime>,
    #[prost(message, optional, tag = "4")]
    pub deleted: Option<PbSystemDateTime>,
}

validate!(PbIdentifier {
    required_message created,
    required_message last_modified,
    optional_message deleted,
});

/// `USERID.BPB`
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbUserIdentifier {
    #[prost(uint64, optional, tag = "1")]
    pub master_identifier: Option<u64>,
    #[prost(string, optional, tag = "2")]
    pub email: Option<String>,
    #[prost(message, optional, tag = "3")]
    pub user_id_last_modified: Option<PbSystemDateTime>,
    #[prost(string, optional, tag = "4")]
    pub nickname: Option<String>,
    #[prost(string, optional, tag = "5")]
    pub first_name: Option<String>,
    #[prost(string, optional, tag = "6")]
    pub last_name: Option<String>,
}

validate!(PbUserIdentifier {
    optional_message user_id_last_modified,
});

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum Gender {
    Male = 1,
    Female = 2,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbUserBirthday {
    #[prost(message, optional, tag = "1")]
    pub value: Option<PbDate>,
    #[prost(message, optional, tag = "2")]
    pub last_modified: Option<PbSystemDateTime>,
}

validate!(PbUserBirthday {
    required_message value,
    optional_message last_modified,
});

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbUserGender {
    #[prost(enumeration = "Gender", optional, tag = "1")]
    pub value: Option<i32>,
    #[prost(message, optional, tag = "2")]
    pub last_modified: Option<PbSystemDateTime>,
}

validate!(PbUserGender {
    required value,
    optional_message last_modified,
});

/// Weight in kilograms or height in centimetres.
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbUserMeasure {
    #[prost(float, optional, tag = "1")]
    pub value: Option<f32>,
    #[prost(message, optional, tag = "2")]
    pub last_modified: Option<PbSystemDateTime>,
}

validate!(PbUserMeasure {
    required value,
    optional_message last_modified,
});

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbUserHrAttribute {
    #[prost(uint32, optional, tag = "1")]
    pub value: Option<u32>,
    #[prost(message, optional, tag = "2")]
    pub last_modified: Option<PbSystemDateTime>,
}

validate!(PbUserHrAttribute {
    required value,
    optional_message last_modified,
});

/// `PHYSDATA.BPB`
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbUserPhysData {
    #[prost(message, optional, tag = "1")]
    pub birthday: Option<PbUserBirthday>,
    #[prost(message, optional, tag = "2")]
    pub gender: Option<PbUserGender>,
    #[prost(message, optional, tag = "3")]
    pub weight: Option<PbUserMeasure>,
    #[prost(message, optional, tag = "4")]
    pub height: Option<PbUserMeasure>,
    #[prost(message, optional, tag = "5")]
    pub maximum_heartrate: Option<PbUserHrAttribute>,
    #[prost(message, optional, tag = "6")]
    pub resting_heartrate: Option<PbUserHrAttribute>,
    #[prost(message, optional, tag = "10")]
    pub vo2max: Option<PbUserHrAttribute>,
    #[prost(message, optional, tag = "100")]
    pub last_modified: Option<PbSystemDateTime>,
}

validate!(PbUserPhysData {
    required_message birthday,
    required_message gender,
    optional_message weight,
    optional_message height,
    optional_message maximum_heartrate,
    optional_message resting_heartrate,
    optional_message vo2max,
    optional_message last_modified,
});

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum UnitSystem {
    Metric = 1,
    Imperial = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum TimeFormat {
    TwentyFourHour = 1,
    TwelveHour = 2,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbLocalizationPreferences {
    #[prost(message, optional, tag = "1")]
    pub language: Option<PbLanguageId>,
    #[prost(enumeration = "UnitSystem", optional, tag = "2")]
    pub unit_system: Option<i32>,
    #[prost(enumeration = "TimeFormat", optional, tag = "3")]
    pub time_format: Option<i32>,
}

validate!(PbLocalizationPreferences {
    optional_message language,
});

/// `PREFS.PBP`
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbGeneralPreferences {
    #[prost(message, optional, tag = "1")]
    pub localization: Option<PbLocalizationPreferences>,
    #[prost(bool, optional, tag = "2")]
    pub inactivity_alert: Option<bool>,
    #[prost(message, optional, tag = "100")]
    pub last_modified: Option<PbSystemDateTime>,
}

validate!(PbGeneralPreferences {
    optional_message localization,
    optional_message last_modified,
});

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbUserDbEntry {
    #[prost(uint32, optional, tag = "1")]
    pub user_index: Option<u32>,
    #[prost(uint64, optional, tag = "2")]
    pub user_id: Option<u64>,
    #[prost(string, optional, tag = "3")]
    pub email: Option<String>,
}

validate!(PbUserDbEntry {
    required user_index,
});

/// `UDB.BPB`: users registered on the device.
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbUserDb {
    #[prost(uint32, optional, tag = "1")]
    pub current_user_index: Option<u32>,
    #[prost(message, repeated, tag = "2")]
    pub user_entries: Vec<PbUserDbEntry>,
}

validate!(PbUserDb {
    repeated_message user_entries,
});

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum Handedness {
    WuLeftHand = 1,
    WuRightHand = 2,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbUserDeviceGeneralSettings {
    #[prost(uint32, optional, tag = "1")]
    pub watch_face: Option<u32>,
    #[prost(bool, optional, tag = "2")]
    pub button_lock: Option<bool>,
    #[prost(enumeration = "Handedness", optional, tag = "3")]
    pub handedness: Option<i32>,
    #[prost(bool, optional, tag = "4")]
    pub vibration: Option<bool>,
}

validate!(PbUserDeviceGeneralSettings {});

/// `UDEVSET.BPB`
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbUserDeviceSettings {
    #[prost(message, optional, tag = "1")]
    pub general_settings: Option<PbUserDeviceGeneralSettings>,
    #[prost(message, optional, tag = "100")]
    pub last_modified: Option<PbSystemDateTime>,
}

validate!(PbUserDeviceSettings {
    optional_message general_settings,
    optional_message last_modified,
});
