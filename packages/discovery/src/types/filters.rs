//! Filter criteria owned by the caller for the duration of one discovery.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Media categories selectable by a caller.
///
/// Two of the selectable "types" in the original product are really
/// collection restrictions (newspapers, magazine rack); those are modeled
/// as [`MediaType::Collection`], which always routes to the filtered
/// search path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum MediaType {
    All,
    Image,
    Audio,
    Movies,
    Texts,
    Software,
    Web,
    /// A specific sub-collection, e.g. `collection:newspapers`.
    Collection(String),
}

impl Default for MediaType {
    fn default() -> Self {
        MediaType::All
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::All => write!(f, "all"),
            MediaType::Image => write!(f, "image"),
            MediaType::Audio => write!(f, "audio"),
            MediaType::Movies => write!(f, "movies"),
            MediaType::Texts => write!(f, "texts"),
            MediaType::Software => write!(f, "software"),
            MediaType::Web => write!(f, "web"),
            MediaType::Collection(name) => write!(f, "collection:{name}"),
        }
    }
}

/// A media-type string that names neither a known category nor a
/// `collection:` restriction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown media type: {0}")]
pub struct UnknownMediaType(pub String);

impl FromStr for MediaType {
    type Err = UnknownMediaType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" | "" => Ok(MediaType::All),
            "image" => Ok(MediaType::Image),
            "audio" => Ok(MediaType::Audio),
            "movies" => Ok(MediaType::Movies),
            "texts" => Ok(MediaType::Texts),
            "software" => Ok(MediaType::Software),
            "web" => Ok(MediaType::Web),
            other => match other.strip_prefix("collection:") {
                Some(name) if !name.is_empty() => Ok(MediaType::Collection(name.to_string())),
                _ => Err(UnknownMediaType(other.to_string())),
            },
        }
    }
}

impl From<MediaType> for String {
    fn from(value: MediaType) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for MediaType {
    type Error = UnknownMediaType;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Search filters for one discovery call. Immutable per call; the caller
/// owns these and the engine only reads them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Media category to draw from.
    #[serde(default)]
    pub media_type: MediaType,

    /// Lower year bound (inclusive).
    pub year_start: Option<i32>,

    /// Upper year bound (inclusive).
    pub year_end: Option<i32>,

    /// Free-text query.
    #[serde(default)]
    pub query: String,

    /// Explicit collection name.
    #[serde(default)]
    pub collection: String,

    /// ISO 639 language code; empty means any language.
    #[serde(default)]
    pub language: String,
}

impl FilterCriteria {
    /// Broad criteria: any media type, any year, any language.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the media type.
    pub fn with_media_type(mut self, media_type: MediaType) -> Self {
        self.media_type = media_type;
        self
    }

    /// Set the year range. Either bound may be omitted.
    pub fn with_years(mut self, start: Option<i32>, end: Option<i32>) -> Self {
        self.year_start = start;
        self.year_end = end;
        self
    }

    /// Set the free-text query.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Set an explicit collection.
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Set the language code.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Whether the caller expressed explicit search intent (free text, a
    /// collection, or a year bound). Explicit intent always overrides the
    /// curated path.
    pub fn has_user_filters(&self) -> bool {
        !self.query.trim().is_empty()
            || !self.collection.trim().is_empty()
            || self.year_start.is_some()
            || self.year_end.is_some()
    }
}

/// Language codes offered to callers, with display labels.
pub const LANGUAGES: &[(&str, &str)] = &[
    ("", "Any Language"),
    ("eng", "English"),
    ("spa", "Spanish"),
    ("fra", "French"),
    ("deu", "German"),
    ("ita", "Italian"),
    ("por", "Portuguese"),
    ("rus", "Russian"),
    ("jpn", "Japanese"),
    ("zho", "Chinese"),
    ("ara", "Arabic"),
    ("hin", "Hindi"),
    ("nld", "Dutch"),
    ("pol", "Polish"),
    ("kor", "Korean"),
    ("swe", "Swedish"),
    ("dan", "Danish"),
    ("nor", "Norwegian"),
    ("fin", "Finnish"),
    ("lat", "Latin"),
    ("grc", "Ancient Greek"),
];

/// Display label for a language code, if it is one we know.
pub fn language_label(code: &str) -> Option<&'static str> {
    LANGUAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_round_trip() {
        for raw in ["all", "image", "audio", "movies", "texts", "software", "web"] {
            let parsed: MediaType = raw.parse().unwrap();
            assert_eq!(parsed.to_string(), raw);
        }

        let scoped: MediaType = "collection:newspapers".parse().unwrap();
        assert_eq!(
            scoped,
            MediaType::Collection("newspapers".to_string())
        );
        assert_eq!(scoped.to_string(), "collection:newspapers");

        assert!("hologram".parse::<MediaType>().is_err());
        assert!("collection:".parse::<MediaType>().is_err());
    }

    #[test]
    fn test_media_type_serde_as_string() {
        let json = serde_json::to_string(&MediaType::Collection("magazine_rack".to_string()))
            .unwrap();
        assert_eq!(json, r#""collection:magazine_rack""#);

        let back: MediaType = serde_json::from_str(r#""texts""#).unwrap();
        assert_eq!(back, MediaType::Texts);
    }

    #[test]
    fn test_user_filter_detection() {
        assert!(!FilterCriteria::new().has_user_filters());
        assert!(!FilterCriteria::new()
            .with_media_type(MediaType::Movies)
            .with_language("eng")
            .has_user_filters());

        assert!(FilterCriteria::new().with_query("jazz").has_user_filters());
        assert!(FilterCriteria::new()
            .with_collection("prelinger")
            .has_user_filters());
        assert!(FilterCriteria::new()
            .with_years(Some(1920), None)
            .has_user_filters());
        assert!(FilterCriteria::new()
            .with_years(None, Some(1960))
            .has_user_filters());

        // Whitespace-only text is not intent
        assert!(!FilterCriteria::new().with_query("   ").has_user_filters());
    }

    #[test]
    fn test_language_labels() {
        assert_eq!(language_label("eng"), Some("English"));
        assert_eq!(language_label(""), Some("Any Language"));
        assert_eq!(language_label("xx"), None);
    }
}
