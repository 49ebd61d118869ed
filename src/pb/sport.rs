//! Sport descriptors and per-sport user profiles.

use serde::Serialize;

use crate::pb::types::{PbLanguageId, PbOneLineText, PbSportIdentifier, PbSystemDateTime};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum SportType {
    SingleSport = 1,
    MultiSport = 2,
    SubSport = 3,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbSportTranslation {
    #[prost(message, optional, tag = "1")]
    pub id: Option<PbLanguageId>,
    #[prost(message, optional, tag = "2")]
    pub text: Option<PbOneLineText>,
}

validate!(PbSportTranslation {
    required_message id,
    required_message text,
});

/// `SYS/SPORT/<id>/SPORT.BPB`: one sport definition.
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbSport {
    #[prost(message, optional, tag = "1")]
    pub identifier: Option<PbSportIdentifier>,
    #[prost(message, optional, tag = "2")]
    pub parent_identifier: Option<PbSportIdentifier>,
    #[prost(message, repeated, tag = "3")]
    pub translation: Vec<PbSportTranslation>,
    #[prost(float, optional, tag = "4")]
    pub factor: Option<f32>,
    #[prost(uint32, optional, tag = "5")]
    pub stages: Option<u32>,
    #[prost(enumeration = "SportType", optional, tag = "6")]
    pub sport_type: Option<i32>,
    #[prost(message, optional, tag = "100")]
    pub created: Option<PbSystemDateTime>,
    #[prost(message, optional, tag = "101")]
    pub last_modified: Option<PbSystemDateTime>,
}

validate!(PbSport {
    required_message identifier,
    required_message parent_identifier,
    repeated_message translation,
    optional_message created,
    optional_message last_modified,
});

impl PbSport {
    /// Human-readable sport name, preferring the English translation.
    pub fn display_name(&self) -> Option<&str> {
        fn text_of(t: &PbSportTranslation) -> Option<&str> {
            t.text.as_ref().and_then(|x| x.text.as_deref())
        }

        self.translation
            .iter()
            .find(|t| {
                t.id.as_ref()
                    .is_some_and(|id| id.language.as_deref() == Some("en"))
            })
            .and_then(text_of)
            .or_else(|| self.translation.first().and_then(text_of))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum HeartRateView {
    BeatsPerMinute = 1,
    PercentsOfHrReserve = 2,
    PercentsOfMaximum = 3,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbSportProfileSettings {
    #[prost(enumeration = "HeartRateView", optional, tag = "1")]
    pub heart_rate_view: Option<i32>,
    #[prost(bool, optional, tag = "2")]
    pub auto_pause: Option<bool>,
    #[prost(bool, optional, tag = "3")]
    pub auto_lap: Option<bool>,
    #[prost(uint32, optional, tag = "4")]
    pub tap_button_sensitivity: Option<u32>,
}

validate!(PbSportProfileSettings {});

/// `PROFILE.PBP`: user settings for one sport; references a sport id.
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbSportProfile {
    #[prost(uint64, optional, tag = "1")]
    pub profile_id: Option<u64>,
    #[prost(message, optional, tag = "2")]
    pub sport_identifier: Option<PbSportIdentifier>,
    #[prost(message, optional, tag = "3")]
    pub settings: Option<PbSportProfileSettings>,
    #[prost(message, optional, tag = "100")]
    pub last_modified: Option<PbSystemDateTime>,
}

validate!(PbSportProfile {
    required_message sport_identifier,
    optional_message settings,
    optional_message last_modified,
});
