use ahash::HashMap;
use serde::{Deserialize, Serialize};

/// Name given to the single synthetic sub-order of an entry that has no
/// internal headings of its own.
pub const MAIN_STORY: &str = "Main Story";

/// id → catalog record, resolved by the caller before parsing.
pub type MediaMap = HashMap<u32, MediaRecord>;

/// Root output: every franchise entry found in the wiki section, in page
/// order. Produced once per parse, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub entries: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub title: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alternative_titles: Vec<String>,
    #[serde(rename = "entry_notes", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Text between the entry heading and its first sub-order heading, only
    /// present for entries that have explicit sub-order headings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prologue: Option<String>,
    #[serde(rename = "watch_orders")]
    pub sub_orders: Vec<SubOrder>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubOrder {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    #[serde(rename = "step_title")]
    pub title: String,
    pub is_optional: bool,
    pub reference_id: u32,
    pub media: Media,
}

/// One catalog record as the Jikan API returns it. Studios stay structured
/// here; the step builder flattens them on the way out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRecord {
    pub mal_id: u32,
    pub title: String,
    #[serde(default)]
    pub title_english: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub episodes: Option<u32>,
    #[serde(default)]
    pub year: Option<u32>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub studios: Vec<Studio>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Studio {
    pub name: String,
}

/// The record shape emitted on a step: same fields, studios reduced to a
/// flat ordered list of names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Media {
    pub mal_id: u32,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_english: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episodes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    pub studios: Vec<String>,
}

impl MediaRecord {
    pub fn flattened(&self) -> Media {
        Media {
            mal_id: self.mal_id,
            title: self.title.clone(),
            title_english: self.title_english.clone(),
            kind: self.kind.clone(),
            episodes: self.episodes,
            year: self.year,
            score: self.score,
            studios: self.studios.iter().map(|s| s.name.clone()).collect(),
        }
    }
}
