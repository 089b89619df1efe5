//! Core value types: users, wallpapers, and their image references.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Cloud-hosted image reference as the backend stores it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAsset {
    /// Storage identifier of the asset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_id: Option<String>,
    /// Plain delivery URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// HTTPS delivery URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure_url: Option<String>,
}

/// The `image` field of a wallpaper, which has been seen as an object and as a bare URL.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageField {
    /// Bare URL string.
    Url(String),
    /// Structured asset object.
    Asset(ImageAsset),
    /// Any other JSON shape; kept so one odd record does not poison a list.
    Other(Value),
}

impl ImageField {
    /// The asset's `url`, or the bare string itself.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Url(url) => Some(url),
            Self::Asset(asset) => asset.url.as_deref(),
            Self::Other(_) => None,
        }
    }

    /// The structured asset, when the field held one.
    #[must_use]
    pub const fn asset(&self) -> Option<&ImageAsset> {
        match self {
            Self::Asset(asset) => Some(asset),
            Self::Url(_) | Self::Other(_) => None,
        }
    }

    /// The bare URL, when the field held a plain string.
    #[must_use]
    pub fn bare(&self) -> Option<&str> {
        match self {
            Self::Url(url) => Some(url),
            Self::Asset(_) | Self::Other(_) => None,
        }
    }
}

/// Registered account as returned by the backend.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Backend identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Login e-mail.
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
    /// Public display name.
    #[serde(default, deserialize_with = "lenient_string")]
    pub user_name: String,
    /// Avatar, as an asset object or a bare URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<ImageField>,
    /// Older avatar field still returned by some endpoints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<ImageField>,
    /// Account creation timestamp.
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Number of uploads, used for leaderboard ranking.
    #[serde(default, deserialize_with = "lenient_count")]
    pub post_count: u64,
}

impl User {
    /// Points shown on the leaderboard for each upload.
    pub const POINTS_PER_POST: u64 = 50;

    /// What: Resolve the avatar URL.
    ///
    /// Output:
    /// - `profile` URL, else `photo` URL; `None` when neither is set.
    #[must_use]
    pub fn avatar_url(&self) -> Option<&str> {
        [self.profile.as_ref(), self.photo.as_ref()]
            .into_iter()
            .flatten()
            .find_map(|field| non_empty(field.url()))
    }

    /// Leaderboard points, `post_count * 50`.
    #[must_use]
    pub const fn points(&self) -> u64 {
        self.post_count.saturating_mul(Self::POINTS_PER_POST)
    }
}

/// A wallpaper record.
///
/// The image location is not guaranteed to live in one field; use
/// [`Wallpaper::image_url`] rather than reading the fields directly.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallpaper {
    /// Backend identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display title.
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Free-form description.
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category name.
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Tags; accepted as an array or as a JSON-encoded array string.
    #[serde(default, deserialize_with = "lenient_tags")]
    pub tags: Vec<String>,
    /// Primary image, as an asset object or a bare URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallpaper_image: Option<ImageField>,
    /// Alternate image field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageField>,
    /// Alternate flat image URL.
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Alternate flat URL.
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Alternate photo, as an asset object or a bare URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<ImageField>,
    /// Alternate flat photo URL.
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    /// Uploader, either an id or an embedded user object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_by: Option<Value>,
    /// `Mobile` or `Desktop` as chosen at upload time.
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub device_support: Option<String>,
    /// Creation timestamp.
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Last update timestamp.
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// Like counter; some responses send a list of likers instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<Value>,
    /// Users who liked the wallpaper.
    #[serde(default, deserialize_with = "lenient_list")]
    pub liked_by: Vec<Value>,
}

impl Wallpaper {
    /// What: Resolve the image URL from whichever field the backend filled.
    ///
    /// Output:
    /// - The first non-empty candidate, or `None` so the caller can show a placeholder.
    ///
    /// Details:
    /// - Priority: `wallpaperImage.url`, `image.url`, `image.secure_url`, `imageUrl`,
    ///   `url`, `photo.url`, `photoUrl`, then a bare string `image`.
    /// - `wallpaperImage` and `photo` may also be bare URL strings.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        let image_asset = self.image.as_ref().and_then(ImageField::asset);
        let candidates = [
            self.wallpaper_image.as_ref().and_then(ImageField::url),
            image_asset.and_then(|a| a.url.as_deref()),
            image_asset.and_then(|a| a.secure_url.as_deref()),
            self.image_url.as_deref(),
            self.url.as_deref(),
            self.photo.as_ref().and_then(ImageField::url),
            self.photo_url.as_deref(),
            self.image.as_ref().and_then(ImageField::bare),
        ];
        candidates.into_iter().find_map(non_empty)
    }

    /// Title, or the id when the title is missing or blank.
    #[must_use]
    pub fn display_title(&self) -> &str {
        non_empty(self.title.as_deref()).unwrap_or(&self.id)
    }

    /// Category, or `Uncategorized` when missing or blank.
    #[must_use]
    pub fn category_or_default(&self) -> &str {
        non_empty(self.category.as_deref()).unwrap_or(UNCATEGORIZED)
    }

    /// What: Count likes regardless of how the backend encoded them.
    ///
    /// Output:
    /// - The numeric `likes` value, the length of a `likes` array, or 0.
    #[must_use]
    pub fn like_count(&self) -> u64 {
        match &self.likes {
            Some(Value::Array(list)) => list.len() as u64,
            Some(other) => count_from_value(other),
            None => 0,
        }
    }
}

/// Category label used for wallpapers without one.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Orientation a wallpaper is uploaded for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeviceSupport {
    /// Portrait phone wallpaper.
    #[default]
    Mobile,
    /// Landscape desktop wallpaper.
    Desktop,
}

impl DeviceSupport {
    /// Value sent in the `deviceSupport` form field.
    #[must_use]
    pub const fn as_form_value(self) -> &'static str {
        match self {
            Self::Mobile => "Mobile",
            Self::Desktop => "Desktop",
        }
    }

    /// Parse a user-supplied device name (case-insensitive).
    #[must_use]
    pub fn from_config_key(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "mobile" | "phone" => Some(Self::Mobile),
            "desktop" | "pc" => Some(Self::Desktop),
            _ => None,
        }
    }
}

/// Ordering applied to the trending list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TrendingMode {
    /// Random order.
    #[default]
    All,
    /// Most likes first.
    Popular,
    /// Newest first.
    Recent,
    /// Most distinct likers first.
    TopRated,
}

impl TrendingMode {
    /// Return the string key used on the command line for this mode.
    #[must_use]
    pub const fn as_config_key(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Popular => "popular",
            Self::Recent => "recent",
            Self::TopRated => "top_rated",
        }
    }

    /// Parse a trending mode from its key or aliases.
    ///
    /// Inputs: `s` mode string (case-insensitive).
    ///
    /// Output: `Some(TrendingMode)` on recognized value; `None` otherwise.
    #[must_use]
    pub fn from_config_key(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "all" | "random" | "shuffle" => Some(Self::All),
            "popular" | "likes" => Some(Self::Popular),
            "recent" | "new" | "newest" => Some(Self::Recent),
            "top_rated" | "toprated" | "top" => Some(Self::TopRated),
            _ => None,
        }
    }
}

/// Treat `None` and blank strings alike.
fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.trim().is_empty())
}

/// Decode a count that may arrive as a number, a numeric string, or junk.
fn count_from_value(v: &Value) -> u64 {
    crate::util::count_of(v).unwrap_or(0)
}

/// Deserialize a JSON array, treating any other shape as empty.
fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => Vec::new(),
    })
}

/// What: Deserialize optional text from any JSON shape.
///
/// Output:
/// - Strings as-is, numbers and booleans as their JSON text; `None` for null, arrays and objects.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

/// Deserialize required text leniently, defaulting to empty.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

/// Deserialize a counter from any JSON shape, defaulting to 0.
fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(count_from_value(&v))
}

/// Deserialize tags from an array, a JSON-encoded array string, or a comma list.
fn lenient_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(tags_from_value(&v))
}

/// Flatten a tags value into trimmed, non-empty strings.
fn tags_from_value(v: &Value) -> Vec<String> {
    match v {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(ToOwned::to_owned)
            .collect(),
        Value::String(raw) => {
            if let Ok(inner @ Value::Array(_)) = serde_json::from_str::<Value>(raw) {
                return tags_from_value(&inner);
            }
            raw.split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(ToOwned::to_owned)
                .collect()
        }
        _ => Vec::new(),
    }
}
