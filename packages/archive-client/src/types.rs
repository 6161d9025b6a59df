use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A metadata field value as the Archive actually returns it.
///
/// Nearly every field in the search and metadata APIs may arrive as a
/// single scalar or as a list (`"creator": "X"` vs `"creator": ["X", "Y"]`),
/// and numeric fields like `year` or `downloads` may be numbers or strings.
/// This enum absorbs all of those shapes; the accessors normalize them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
    List(Vec<MetaValue>),
}

impl MetaValue {
    /// The value as a single string. Lists yield their first entry.
    pub fn as_text(&self) -> Option<String> {
        match self {
            MetaValue::Text(s) => Some(s.clone()),
            MetaValue::Integer(n) => Some(n.to_string()),
            MetaValue::Float(x) => Some(x.to_string()),
            MetaValue::Flag(b) => Some(b.to_string()),
            MetaValue::List(vs) => vs.first().and_then(|v| v.as_text()),
        }
    }

    /// The value as a list of strings. Scalars yield a one-element list.
    pub fn to_list(&self) -> Vec<String> {
        match self {
            MetaValue::List(vs) => vs.iter().filter_map(|v| v.as_text()).collect(),
            other => other.as_text().into_iter().collect(),
        }
    }

    /// The value as a non-negative integer, parsing strings if needed.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            MetaValue::Integer(n) => u64::try_from(*n).ok(),
            MetaValue::Float(x) if *x >= 0.0 => Some(*x as u64),
            MetaValue::Text(s) => s.trim().parse().ok(),
            MetaValue::List(vs) => vs.first().and_then(|v| v.as_u64()),
            _ => None,
        }
    }

    /// The value as a float, parsing strings if needed.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetaValue::Integer(n) => Some(*n as f64),
            MetaValue::Float(x) => Some(*x),
            MetaValue::Text(s) => s.trim().parse().ok(),
            MetaValue::List(vs) => vs.first().and_then(|v| v.as_f64()),
            _ => None,
        }
    }
}

/// Top-level envelope of an `advancedsearch.php` response.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub response: SearchBody,
}

/// Body of a search response: total match count plus one page of docs.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchBody {
    #[serde(rename = "numFound")]
    pub num_found: u64,
    #[serde(default)]
    pub docs: Vec<SearchDoc>,
}

/// A single search hit, limited to the fields requested via `fl`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchDoc {
    pub identifier: String,
    #[serde(default)]
    pub title: Option<MetaValue>,
    #[serde(default)]
    pub description: Option<MetaValue>,
    #[serde(default)]
    pub mediatype: Option<MetaValue>,
    #[serde(default)]
    pub date: Option<MetaValue>,
    #[serde(default)]
    pub year: Option<MetaValue>,
    #[serde(default)]
    pub collection: Option<MetaValue>,
    #[serde(default)]
    pub creator: Option<MetaValue>,
    #[serde(default)]
    pub subject: Option<MetaValue>,
    #[serde(default)]
    pub language: Option<MetaValue>,
}

/// Response of the `/metadata/{identifier}` endpoint.
///
/// The Archive returns an empty object (no `metadata` key) for identifiers
/// that do not exist, so `metadata` is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemMetadata {
    #[serde(default)]
    pub metadata: Option<MetaRecord>,
    #[serde(default)]
    pub files: Vec<FileRecord>,
}

/// The full detail record of one item.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetaRecord {
    #[serde(default)]
    pub identifier: Option<MetaValue>,
    #[serde(default)]
    pub title: Option<MetaValue>,
    #[serde(default)]
    pub description: Option<MetaValue>,
    #[serde(default)]
    pub mediatype: Option<MetaValue>,
    #[serde(default)]
    pub date: Option<MetaValue>,
    #[serde(default)]
    pub year: Option<MetaValue>,
    #[serde(default)]
    pub publicdate: Option<MetaValue>,
    #[serde(default)]
    pub addeddate: Option<MetaValue>,
    #[serde(default)]
    pub creator: Option<MetaValue>,
    #[serde(default)]
    pub contributor: Option<MetaValue>,
    #[serde(default)]
    pub publisher: Option<MetaValue>,
    #[serde(default)]
    pub sponsor: Option<MetaValue>,
    #[serde(default)]
    pub collection: Option<MetaValue>,
    #[serde(default)]
    pub subject: Option<MetaValue>,
    #[serde(default)]
    pub language: Option<MetaValue>,
    #[serde(default)]
    pub runtime: Option<MetaValue>,
    #[serde(default)]
    pub sound: Option<MetaValue>,
    #[serde(default)]
    pub color: Option<MetaValue>,
    #[serde(default)]
    pub licenseurl: Option<MetaValue>,
    #[serde(default)]
    pub rights: Option<MetaValue>,
    #[serde(default)]
    pub credits: Option<MetaValue>,
    #[serde(default)]
    pub source: Option<MetaValue>,
    #[serde(default)]
    pub downloads: Option<MetaValue>,
    #[serde(default)]
    pub num_reviews: Option<MetaValue>,
    #[serde(default)]
    pub avg_rating: Option<MetaValue>,
    #[serde(default)]
    pub notes: Option<MetaValue>,
    #[serde(default)]
    pub volume: Option<MetaValue>,
    #[serde(default)]
    pub issue: Option<MetaValue>,
    #[serde(default)]
    pub edition: Option<MetaValue>,
    #[serde(default)]
    pub isbn: Option<MetaValue>,
    #[serde(default)]
    pub issn: Option<MetaValue>,
    #[serde(default)]
    pub lccn: Option<MetaValue>,
    #[serde(default)]
    pub oclc_id: Option<MetaValue>,
    #[serde(default)]
    pub scanner: Option<MetaValue>,
    #[serde(default)]
    pub scanningcenter: Option<MetaValue>,
    #[serde(default)]
    pub ppi: Option<MetaValue>,
    #[serde(default)]
    pub ocr: Option<MetaValue>,

    /// Everything else the record carries, kept verbatim.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// One file attached to an item.
#[derive(Debug, Clone, Deserialize)]
pub struct FileRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub size: Option<MetaValue>,
    #[serde(default)]
    pub length: Option<MetaValue>,
}
