use anyhow::Context;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::structs::{NoteRecord, NoteVector};

/// Decodes the `notes` cookie value into the note collection.
///
/// Tries the current format first (base64 of a UTF-8 JSON array), then the
/// legacy bare JSON array written before the encoding change. Absent or
/// undecodable input yields an empty collection; this never fails.
pub fn decode(raw: Option<&str>) -> NoteVector {
    let raw = match raw {
        Some(value) => value,
        None => return NoteVector::new(),
    };
    if let Some(notes) = decode_encoded(raw) {
        return notes;
    }
    if let Some(notes) = decode_bare(raw) {
        return notes;
    }
    NoteVector::new()
}

fn decode_encoded(raw: &str) -> Option<NoteVector> {
    let bytes = STANDARD.decode(raw).ok()?;
    let text = String::from_utf8(bytes).ok()?;
    serde_json::from_str(&text).ok()
}

fn decode_bare(raw: &str) -> Option<NoteVector> {
    serde_json::from_str(raw).ok()
}

/// Encodes the collection for the cookie: JSON (non-ASCII kept literal),
/// then base64. The caller logs failures and skips the cookie write.
pub fn encode(notes: &[NoteRecord]) -> anyhow::Result<String> {
    let json = serde_json::to_string(notes).context("serializing notes")?;
    Ok(STANDARD.encode(json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::{NoteBody, NoteId};
    use serde_json::json;

    fn sample_notes() -> NoteVector {
        vec![
            NoteRecord {
                id: NoteId::Int(1),
                body: NoteBody::Title {
                    title: "Zażółć gęślą jaźń".to_string(),
                    content: "non-ASCII survives the round trip".to_string(),
                },
                created_at: "2024-05-01T12:00:00".to_string(),
                updated_at: "2024-05-01T12:00:00".to_string(),
            },
            NoteRecord {
                id: NoteId::Int(2),
                body: NoteBody::Content {
                    content: "plain".to_string(),
                },
                created_at: "2024-05-01T12:00:01".to_string(),
                updated_at: "2024-05-01T12:00:01".to_string(),
            },
            NoteRecord {
                id: NoteId::Int(3),
                body: NoteBody::Data {
                    data: json!({"key": "value", "n": 3}),
                },
                created_at: "2024-05-01T12:00:02".to_string(),
                updated_at: "2024-05-01T12:00:02".to_string(),
            },
        ]
    }

    #[test]
    fn round_trip() {
        let notes = sample_notes();
        let encoded = encode(&notes).unwrap();
        assert_eq!(decode(Some(&encoded)), notes);
    }

    #[test]
    fn legacy_bare_json_falls_back() {
        let notes = sample_notes();
        let bare = serde_json::to_string(&notes).unwrap();
        assert_eq!(decode(Some(&bare)), notes);
    }

    #[test]
    fn legacy_string_ids_decode() {
        let bare = r#"[{"id":"7","type":"content","content":"old","created_at":"2023-01-01T00:00:00","updated_at":"2023-01-01T00:00:00"}]"#;
        let notes = decode(Some(bare));
        assert_eq!(notes.len(), 1);
        assert!(notes[0].id.matches("7"));
    }

    #[test]
    fn malformed_input_yields_empty() {
        assert!(decode(Some("not valid")).is_empty());
        // Valid base64, but the payload is not JSON.
        assert!(decode(Some(&STANDARD.encode("still not json"))).is_empty());
        // Valid base64 of invalid UTF-8.
        assert!(decode(Some(&STANDARD.encode([0xff, 0xfe, 0xfd]))).is_empty());
    }

    #[test]
    fn absent_cookie_yields_empty() {
        assert!(decode(None).is_empty());
    }

    #[test]
    fn non_ascii_stays_literal_in_json() {
        let notes = sample_notes();
        let json = serde_json::to_string(&notes).unwrap();
        assert!(json.contains("Zażółć"));
    }
}
