//! 24/7 activity tracking messages: per-day samples, goals, and summaries.

use serde::Serialize;

use crate::pb::types::{PbDate, PbDuration, PbLocalDateTime, PbSystemDateTime};

/// Activity classification used in `PbActivityInfo`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ActivityClass {
    Sleep = 1,
    Sedentary = 2,
    Light = 3,
    ContinuousModerate = 4,
    IntermittentModerate = 5,
    ContinuousVigorous = 6,
    IntermittentVigorous = 7,
    NonWear = 8,
}

/// A sport-specific activity factor window, referencing a sport profile.
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbSportInfo {
    #[prost(float, optional, tag = "1")]
    pub factor: Option<f32>,
    #[prost(message, optional, tag = "2")]
    pub time_stamp: Option<PbLocalDateTime>,
    #[prost(uint64, optional, tag = "3")]
    pub sport_profile_id: Option<u64>,
}

validate!(PbSportInfo {
    required factor,
    required_message time_stamp,
});

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbActivityInfo {
    #[prost(enumeration = "ActivityClass", optional, tag = "1")]
    pub value: Option<i32>,
    #[prost(message, optional, tag = "2")]
    pub time_stamp: Option<PbLocalDateTime>,
    #[prost(float, optional, tag = "3")]
    pub factor: Option<f32>,
}

validate!(PbActivityInfo {
    required value,
    required_message time_stamp,
});

/// `ACT/ASAMPL0.BPB`: MET and step samples recorded over one day.
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbActivitySamples {
    #[prost(message, optional, tag = "1")]
    pub start_time: Option<PbLocalDateTime>,
    #[prost(message, optional, tag = "2")]
    pub met_recording_interval: Option<PbDuration>,
    #[prost(message, optional, tag = "3")]
    pub steps_recording_interval: Option<PbDuration>,
    #[prost(float, repeated, packed = "false", tag = "4")]
    pub met_samples: Vec<f32>,
    #[prost(uint32, repeated, packed = "false", tag = "5")]
    pub steps_samples: Vec<u32>,
    #[prost(message, repeated, tag = "6")]
    pub sport_info: Vec<PbSportInfo>,
    #[prost(message, repeated, tag = "7")]
    pub activity_info: Vec<PbActivityInfo>,
}

validate!(PbActivitySamples {
    required_message start_time,
    required_message met_recording_interval,
    required_message steps_recording_interval,
    repeated_message sport_info,
    repeated_message activity_info,
});

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbActivityGoal {
    #[prost(float, optional, tag = "1")]
    pub metabolic_energy: Option<f32>,
    #[prost(message, optional, tag = "2")]
    pub duration: Option<PbDuration>,
}

validate!(PbActivityGoal {
    required metabolic_energy,
    optional_message duration,
});

/// `DGOAL.BPB`: the user's daily activity target.
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbDailyActivityGoal {
    #[prost(message, repeated, tag = "1")]
    pub activity_goal: Vec<PbActivityGoal>,
    #[prost(message, optional, tag = "100")]
    pub last_modified: Option<PbSystemDateTime>,
}

validate!(PbDailyActivityGoal {
    repeated_message activity_goal,
    optional_message last_modified,
});

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbActivityGoalSummary {
    #[prost(float, optional, tag = "1")]
    pub activity_goal: Option<f32>,
    #[prost(float, optional, tag = "2")]
    pub achieved_activity: Option<f32>,
    #[prost(message, optional, tag = "3")]
    pub time_to_go_up: Option<PbDuration>,
    #[prost(message, optional, tag = "4")]
    pub time_to_go_walk: Option<PbDuration>,
    #[prost(message, optional, tag = "5")]
    pub time_to_go_jog: Option<PbDuration>,
}

validate!(PbActivityGoalSummary {
    required activity_goal,
    required achieved_activity,
    optional_message time_to_go_up,
    optional_message time_to_go_walk,
    optional_message time_to_go_jog,
});

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbActivityClassTimes {
    #[prost(message, optional, tag = "1")]
    pub time_non_wear: Option<PbDuration>,
    #[prost(message, optional, tag = "2")]
    pub time_sleep: Option<PbDuration>,
    #[prost(message, optional, tag = "3")]
    pub time_sedentary: Option<PbDuration>,
    #[prost(message, optional, tag = "4")]
    pub time_light_activity: Option<PbDuration>,
    #[prost(message, optional, tag = "5")]
    pub time_continuous_moderate: Option<PbDuration>,
    #[prost(message, optional, tag = "6")]
    pub time_intermittent_moderate: Option<PbDuration>,
    #[prost(message, optional, tag = "7")]
    pub time_continuous_vigorous: Option<PbDuration>,
    #[prost(message, optional, tag = "8")]
    pub time_intermittent_vigorous: Option<PbDuration>,
}

validate!(PbActivityClassTimes {
    required_message time_non_wear,
    required_message time_sleep,
    required_message time_sedentary,
    required_message time_light_activity,
    required_message time_continuous_moderate,
    required_message time_intermittent_moderate,
    required_message time_continuous_vigorous,
    required_message time_intermittent_vigorous,
});

/// `DSUM/DSUM.BPB`: totals for one calendar day.
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct PbDailySummary {
    #[prost(message, optional, tag = "1")]
    pub date: Option<PbDate>,
    #[prost(uint32, optional, tag = "2")]
    pub steps: Option<u32>,
    #[prost(uint32, optional, tag = "3")]
    pub activity_calories: Option<u32>,
    #[prost(uint32, optional, tag = "4")]
    pub training_calories: Option<u32>,
    #[prost(uint32, optional, tag = "5")]
    pub bmr_calories: Option<u32>,
    #[prost(message, optional, tag = "6")]
    pub activity_goal_summary: Option<PbActivityGoalSummary>,
    #[prost(message, optional, tag = "7")]
    pub activity_class_times: Option<PbActivityClassTimes>,
    #[prost(float, optional, tag = "8")]
    pub activity_distance: Option<f32>,
}

validate!(PbDailySummary {
    required_message date,
    optional_message activity_goal_summary,
    optional_message activity_class_times,
});
