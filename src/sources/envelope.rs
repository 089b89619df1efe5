//! Response-shape normalisation.
//!
//! The backend has returned lists and records under several wrappers over time.
//! Each shape is a variant here, found by an ordered probe; callers decode the
//! payload the variant points at and never look at the wrapper themselves.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::state::User;

/// Which record type a list response carries; picks the type-specific wrapper key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListKind {
    /// Wallpaper listings (`wallpapers` key).
    Wallpapers,
    /// User listings (`users` key).
    Users,
}

impl ListKind {
    const fn key(self) -> &'static str {
        match self {
            Self::Wallpapers => "wallpapers",
            Self::Users => "users",
        }
    }
}

/// Shape of a list response.
#[derive(Clone, Debug, PartialEq)]
pub enum ListEnvelope<'a> {
    /// The body itself is the array.
    Direct(&'a [Value]),
    /// `{ "<kind>": [...] }`, e.g. `{ "wallpapers": [...] }`.
    Keyed(&'a [Value]),
    /// `{ "data": [...] }`.
    Data(&'a [Value]),
    /// `{ "posts": [...] }`.
    Posts(&'a [Value]),
    /// `{ "success": .., "data": [...] }`.
    SuccessData(&'a [Value]),
    /// `{ "data": { ... } }` where the inner object matched one of the above.
    Nested(Box<ListEnvelope<'a>>),
    /// Nothing matched.
    Unrecognized,
}

impl<'a> ListEnvelope<'a> {
    /// What: Classify a list response.
    ///
    /// Inputs:
    /// - `value`: Parsed response body.
    /// - `kind`: Expected record type.
    ///
    /// Output:
    /// - The first matching variant in probe order, or `Unrecognized`.
    ///
    /// Details:
    /// - Probe order: direct array, `<kind>` key, `data` (tagged `SuccessData` when a
    ///   `success` flag sits next to it), `posts`, then the same probe once inside an
    ///   object-valued `data`.
    #[must_use]
    pub fn classify(value: &'a Value, kind: ListKind) -> Self {
        Self::classify_at(value, kind, true)
    }

    fn classify_at(value: &'a Value, kind: ListKind, descend: bool) -> Self {
        if let Value::Array(items) = value {
            return Self::Direct(items);
        }
        let Value::Object(map) = value else {
            return Self::Unrecognized;
        };
        if let Some(Value::Array(items)) = map.get(kind.key()) {
            return Self::Keyed(items);
        }
        if let Some(Value::Array(items)) = map.get("data") {
            return if map.contains_key("success") {
                Self::SuccessData(items)
            } else {
                Self::Data(items)
            };
        }
        if let Some(Value::Array(items)) = map.get("posts") {
            return Self::Posts(items);
        }
        if descend && let Some(inner @ Value::Object(_)) = map.get("data") {
            let nested = Self::classify_at(inner, kind, false);
            if nested != Self::Unrecognized {
                return Self::Nested(Box::new(nested));
            }
        }
        Self::Unrecognized
    }

    /// The raw list elements; empty for `Unrecognized`.
    #[must_use]
    pub fn items(&self) -> &'a [Value] {
        match self {
            Self::Direct(items)
            | Self::Keyed(items)
            | Self::Data(items)
            | Self::Posts(items)
            | Self::SuccessData(items) => *items,
            Self::Nested(inner) => inner.items(),
            Self::Unrecognized => &[],
        }
    }
}

/// What: Normalise a list response into typed records.
///
/// Inputs:
/// - `value`: Parsed response body.
/// - `kind`: Expected record type, selecting the keyed wrapper.
///
/// Output:
/// - Decoded records in response order; empty when the shape is not recognised.
///
/// Details:
/// - Elements that fail to decode are skipped with a warning so one bad record does
///   not hide the rest.
#[must_use]
pub fn decode_list<T: DeserializeOwned>(value: &Value, kind: ListKind) -> Vec<T> {
    let envelope = ListEnvelope::classify(value, kind);
    if envelope == ListEnvelope::Unrecognized {
        tracing::warn!(?kind, "[Envelope] unrecognised list response, treating as empty");
        return Vec::new();
    }
    envelope
        .items()
        .iter()
        .enumerate()
        .filter_map(|(i, item)| match T::deserialize(item) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(index = i, error = %e, "[Envelope] skipping undecodable list element");
                None
            }
        })
        .collect()
}

/// Shape of a single-record response.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RecordEnvelope<'a> {
    /// `{ "wallpaper": { ... } }`.
    Wallpaper(&'a Value),
    /// `{ "data": { ... } }`.
    Data(&'a Value),
    /// `{ "post": { ... } }`.
    Post(&'a Value),
    /// The body is the record (it carries `_id`).
    Direct(&'a Value),
    /// Nothing matched.
    Unrecognized,
}

impl<'a> RecordEnvelope<'a> {
    /// What: Classify a single-record response.
    ///
    /// Output:
    /// - First object found under `wallpaper`, `data`, `post`, else the body when it has `_id`.
    #[must_use]
    pub fn classify(value: &'a Value) -> Self {
        let Value::Object(map) = value else {
            return Self::Unrecognized;
        };
        let probes: [(&str, fn(&'a Value) -> Self); 3] = [
            ("wallpaper", Self::Wallpaper),
            ("data", Self::Data),
            ("post", Self::Post),
        ];
        for (key, variant) in probes {
            if let Some(inner @ Value::Object(_)) = map.get(key) {
                return variant(inner);
            }
        }
        if map.contains_key("_id") {
            return Self::Direct(value);
        }
        Self::Unrecognized
    }

    /// The wrapped record, if any.
    #[must_use]
    pub const fn record(&self) -> Option<&'a Value> {
        match self {
            Self::Wallpaper(v) | Self::Data(v) | Self::Post(v) | Self::Direct(v) => Some(*v),
            Self::Unrecognized => None,
        }
    }
}

/// What: Normalise a single-record response.
///
/// Output:
/// - `Some(record)` when a wrapper matched and its content decodes as `T`.
#[must_use]
pub fn decode_record<T: DeserializeOwned>(value: &Value) -> Option<T> {
    let record = RecordEnvelope::classify(value).record()?;
    match T::deserialize(record) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::debug!(error = %e, "[Envelope] record did not decode");
            None
        }
    }
}

/// What: Extract a user from a profile or auth response.
///
/// Output:
/// - The object under `user`, else the body itself, decoded as a [`User`].
#[must_use]
pub fn decode_user(value: &Value) -> Option<User> {
    let candidate = match value.get("user") {
        Some(inner @ Value::Object(_)) => inner,
        _ => value,
    };
    User::deserialize(candidate).ok()
}
