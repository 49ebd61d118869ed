//! Protocol buffer messages stored in a device dump.
//!
//! Every `.BPB`/`.PBP`/`.GZB` file in a dump is a single proto2 message.
//! The types here are written against the `prost` derive macros so no
//! `protoc` step is needed at build time. Field tags follow the device
//! firmware's message definitions.
//!
//! prost does not enforce proto2 `required`, and a `required` sub-message
//! cannot be expressed as an `Option`. Every field the firmware marks
//! `required` is therefore declared `optional` here, and presence is checked
//! after decoding through [`Validate`], which the decoder runs on every
//! record. Validation recurses into sub-messages, so a missing
//! `start.date.day` is reported with its full path.
//!
//! Fields not modelled here are dropped by prost. The decoder keeps the raw
//! payload next to the typed message and lists unknown top-level fields
//! separately, so nothing read from a dump is lost.
//!
//! | Module | Messages |
//! |--------|----------|
//! | [`types`] | Shared date/time, duration, identifier, and text wrappers |
//! | [`activity`] | `ASAMPL0.BPB`, `DGOAL.BPB`, `DSUM.BPB` |
//! | [`exercise`] | `BASE.BPB`, `SAMPLES.GZB`, `STATS.BPB`, `ZONES.BPB`, `TSESS.BPB`, `RECOVS.BPB` |
//! | [`sport`] | `SPORT.BPB`, `PROFILE.PBP` |
//! | [`user`] | `ID.BPB`, `USERID.BPB`, `PHYSDATA.BPB`, `PREFS.PBP`, `UDB.BPB`, `UDEVSET.BPB` |

/// Presence check for the fields a message marks `required`.
pub trait Validate {
    /// Dotted path of the first required field left unset, e.g. `start.date.day`.
    fn missing_field(&self) -> Option<String>;
}

pub(crate) fn required<T>(name: &str, value: &Option<T>) -> Option<String> {
    value.is_none().then(|| name.to_string())
}

pub(crate) fn required_message<T: Validate>(name: &str, value: &Option<T>) -> Option<String> {
    match value {
        Some(message) => nested(name, message),
        None => Some(name.to_string()),
    }
}

pub(crate) fn optional_message<T: Validate>(name: &str, value: &Option<T>) -> Option<String> {
    value.as_ref().and_then(|message| nested(name, message))
}

pub(crate) fn repeated_message<T: Validate>(name: &str, values: &[T]) -> Option<String> {
    values
        .iter()
        .enumerate()
        .find_map(|(i, message)| nested(&format!("{}[{}]", name, i), message))
}

fn nested<T: Validate>(name: &str, message: &T) -> Option<String> {
    message
        .missing_field()
        .map(|inner| format!("{}.{}", name, inner))
}

/// Implement [`Validate`] from a list of `<check> <field>` pairs, where the
/// check is one of the helper functions above.
macro_rules! validate {
    ($ty:ident { $($check:ident $field:ident),* $(,)? }) => {
        impl $crate::pb::Validate for $ty {
            fn missing_field(&self) -> Option<String> {
                None$(.or_else(|| $crate::pb::$check(stringify!($field), &self.$field)))*
            }
        }
    };
}

pub mod activity;
pub mod exercise;
pub mod sport;
pub mod types;
pub mod user;
