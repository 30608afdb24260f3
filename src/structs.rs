use std::fmt;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A note id as it appears in the cookie. Current cookies store it as a JSON
/// number, but cookies written before the encoding change may carry it as a
/// string, so lookups compare the string form.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum NoteId {
    Int(u64),
    Text(String),
}

impl NoteId {
    pub fn numeric(&self) -> u64 {
        match self {
            NoteId::Int(n) => *n,
            NoteId::Text(s) => s.trim().parse().unwrap_or(0),
        }
    }

    pub fn matches(&self, other: &str) -> bool {
        self.to_string() == other
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteId::Int(n) => write!(f, "{}", n),
            NoteId::Text(s) => f.write_str(s),
        }
    }
}

/// The three note shapes, tagged by the `type` field in the stored JSON.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NoteBody {
    Title { title: String, content: String },
    Content { content: String },
    Data { data: Value },
}

impl NoteBody {
    pub fn kind(&self) -> &'static str {
        match self {
            NoteBody::Title { .. } => "title",
            NoteBody::Content { .. } => "content",
            NoteBody::Data { .. } => "data",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NoteBody::Title { .. } => "TitleNote",
            NoteBody::Content { .. } => "ContentNote",
            NoteBody::Data { .. } => "DataNote",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NoteRecord {
    pub id: NoteId,
    #[serde(flatten)]
    pub body: NoteBody,
    pub created_at: String,
    pub updated_at: String,
}

pub type NoteVector = Vec<NoteRecord>;

/// Current local time in the ISO-8601 form the cookie stores.
pub fn now_iso() -> String {
    Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

fn parse_timestamp(raw: &str) -> NaiveDateTime {
    // Display fallback only; never written back to the cookie.
    raw.parse().unwrap_or_else(|_| Local::now().naive_local())
}

/// Render-ready view of a stored record: every field present, timestamps
/// parsed.
#[derive(Debug, Clone)]
pub struct DisplayNote {
    pub id: String,
    pub title: String,
    pub content: String,
    pub data: Value,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl DisplayNote {
    pub fn from_record(record: &NoteRecord) -> Self {
        let (title, content, data) = match &record.body {
            NoteBody::Title { title, content } => {
                (title.clone(), content.clone(), Value::Object(Map::new()))
            }
            NoteBody::Content { content } => {
                (String::new(), content.clone(), Value::Object(Map::new()))
            }
            NoteBody::Data { data } => (String::new(), String::new(), data.clone()),
        };
        DisplayNote {
            id: record.id.to_string(),
            title,
            content,
            data,
            created_at: parse_timestamp(&record.created_at),
            updated_at: parse_timestamp(&record.updated_at),
        }
    }

    /// Title if set, otherwise the first 50 characters of the content,
    /// otherwise the first 50 characters of the JSON rendering of the data.
    pub fn summary(&self) -> String {
        if !self.title.is_empty() {
            self.title.clone()
        } else if !self.content.is_empty() {
            self.content.chars().take(50).collect()
        } else {
            self.data.to_string().chars().take(50).collect()
        }
    }
}
