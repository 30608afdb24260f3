use crate::structs::{now_iso, NoteBody, NoteId, NoteRecord, NoteVector};

/// A form submission before validation.
pub enum NewNote {
    Title { title: String, content: String },
    Content { content: String },
    Data { raw: String },
}

/// Validation failures; each carries the notification shown to the user.
#[derive(Debug, PartialEq)]
pub enum AppendError {
    EmptyTitleNote,
    EmptyContentNote,
    InvalidJson,
}

impl AppendError {
    pub fn message(&self) -> &'static str {
        match self {
            AppendError::EmptyTitleNote => "A title note needs a title or some content.",
            AppendError::EmptyContentNote => "A content note needs some content.",
            AppendError::InvalidJson => "Invalid JSON format. Example: {\"key\": \"value\"}",
        }
    }
}

// CRUD over the decoded collection ////////////////////////////////////////////

pub fn find<'a>(notes: &'a [NoteRecord], id: &str) -> Option<&'a NoteRecord> {
    notes.iter().find(|note| note.id.matches(id))
}

/// Validates the submission, stamps a fresh id and timestamps, and appends.
/// Returns the stored record.
pub fn append(notes: &mut NoteVector, new: NewNote) -> Result<NoteRecord, AppendError> {
    let body = match new {
        NewNote::Title { title, content } => {
            if title.is_empty() && content.is_empty() {
                return Err(AppendError::EmptyTitleNote);
            }
            NoteBody::Title { title, content }
        }
        NewNote::Content { content } => {
            if content.is_empty() {
                return Err(AppendError::EmptyContentNote);
            }
            NoteBody::Content { content }
        }
        NewNote::Data { raw } => {
            let data = serde_json::from_str(&raw).map_err(|_| AppendError::InvalidJson)?;
            NoteBody::Data { data }
        }
    };

    let now = now_iso();
    let record = NoteRecord {
        id: NoteId::Int(next_id(notes)),
        body,
        created_at: now.clone(),
        updated_at: now,
    };
    notes.push(record.clone());
    Ok(record)
}

/// Removes every record matching the id; reports whether anything went.
pub fn delete(notes: &mut NoteVector, id: &str) -> bool {
    let before = notes.len();
    notes.retain(|note| !note.id.matches(id));
    notes.len() != before
}

// Largest existing id plus one; ids are unique but not contiguous.
fn next_id(notes: &[NoteRecord]) -> u64 {
    notes.iter().map(|note| note.id.numeric()).max().unwrap_or(0) + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn content_record(id: u64) -> NoteRecord {
        NoteRecord {
            id: NoteId::Int(id),
            body: NoteBody::Content {
                content: format!("note {}", id),
            },
            created_at: "2024-05-01T12:00:00".to_string(),
            updated_at: "2024-05-01T12:00:00".to_string(),
        }
    }

    #[test]
    fn append_assigns_max_plus_one() {
        let mut notes = vec![content_record(1), content_record(5)];
        let record = append(
            &mut notes,
            NewNote::Content {
                content: "next".to_string(),
            },
        )
        .unwrap();
        assert!(record.id.matches("6"));
        assert_eq!(notes.len(), 3);
    }

    #[test]
    fn append_to_empty_starts_at_one() {
        let mut notes = NoteVector::new();
        let record = append(
            &mut notes,
            NewNote::Title {
                title: "first".to_string(),
                content: String::new(),
            },
        )
        .unwrap();
        assert!(record.id.matches("1"));
        assert_eq!(record.created_at, record.updated_at);
    }

    #[test]
    fn empty_title_note_is_rejected() {
        let mut notes = NoteVector::new();
        let result = append(
            &mut notes,
            NewNote::Title {
                title: String::new(),
                content: String::new(),
            },
        );
        assert_eq!(result, Err(AppendError::EmptyTitleNote));
        assert!(notes.is_empty());
    }

    #[test]
    fn empty_content_note_is_rejected() {
        let mut notes = NoteVector::new();
        let result = append(
            &mut notes,
            NewNote::Content {
                content: String::new(),
            },
        );
        assert_eq!(result, Err(AppendError::EmptyContentNote));
        assert!(notes.is_empty());
    }

    #[test]
    fn bad_json_data_is_rejected() {
        let mut notes = NoteVector::new();
        let result = append(
            &mut notes,
            NewNote::Data {
                raw: "not json".to_string(),
            },
        );
        assert_eq!(result, Err(AppendError::InvalidJson));
        assert!(notes.is_empty());
    }

    #[test]
    fn data_note_keeps_parsed_value() {
        let mut notes = NoteVector::new();
        let record = append(
            &mut notes,
            NewNote::Data {
                raw: r#"{"a": [1, 2]}"#.to_string(),
            },
        )
        .unwrap();
        assert_eq!(record.body, NoteBody::Data { data: json!({"a": [1, 2]}) });
    }

    #[test]
    fn find_compares_string_forms() {
        let mut notes = vec![content_record(3)];
        notes[0].id = NoteId::Text("3".to_string());
        assert!(find(&notes, "3").is_some());
        assert!(find(&notes, "4").is_none());
    }

    #[test]
    fn delete_removes_exactly_the_matching_record() {
        let mut notes = vec![content_record(1), content_record(2)];
        assert!(delete(&mut notes, "1"));
        assert_eq!(notes.len(), 1);
        assert!(notes[0].id.matches("2"));
    }

    #[test]
    fn delete_of_absent_id_reports_not_found() {
        let mut notes = vec![content_record(1)];
        assert!(!delete(&mut notes, "9"));
        assert_eq!(notes.len(), 1);
    }
}
