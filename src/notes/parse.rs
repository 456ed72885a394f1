use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::model::{NoteRecord, NoteSet};

/// One entry of the notes payload: `{ "id", "content", "position": [x, y] }`
/// with position in percent of the viewport. Also the shape written back by
/// the store when a note is added.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub(super) struct RawNote {
    pub(super) id: u64,
    #[serde(default)]
    pub(super) content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) position: Option<[f32; 2]>,
}

/// Parses a `{ "nodes": [...] }` payload. Individually malformed entries are
/// skipped rather than failing the whole set; a payload without a `nodes`
/// array yields an empty set. Only non-JSON input is an error.
pub(super) fn parse_notes_payload(raw: &str) -> Result<NoteSet> {
    let parsed: Value = serde_json::from_str(raw).context("notes payload is not valid JSON")?;

    let Some(entries) = parsed.get("nodes").and_then(Value::as_array) else {
        warn!("notes payload has no nodes array; treating it as empty");
        return Ok(NoteSet::default());
    };

    let mut notes = Vec::with_capacity(entries.len());
    for value in entries {
        match RawNote::deserialize(value) {
            Ok(raw_note) => notes.push(NoteRecord {
                id: raw_note.id,
                content: raw_note.content,
                position: raw_note.position,
            }),
            Err(error) => warn!(%error, "skipping malformed note entry"),
        }
    }

    Ok(NoteSet::new(notes))
}

pub(super) fn render_notes_payload(notes: &[RawNote]) -> Result<String> {
    serde_json::to_string_pretty(&serde_json::json!({ "nodes": notes }))
        .context("failed to render notes payload")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_wire_shape() {
        let set = parse_notes_payload(
            r#"{"nodes": [
                {"id": 1, "content": "alpha", "position": [25.0, 75.0]},
                {"id": 2, "content": "beta"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.get(1).unwrap().position, Some([25.0, 75.0]));
        assert_eq!(set.get(2).unwrap().position, None);
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let set = parse_notes_payload(
            r#"{"nodes": [
                {"id": "not-a-number", "content": "bad"},
                {"content": "missing id"},
                {"id": 3, "content": "good"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(set.len(), 1);
        assert_eq!(set.content_of(3), Some("good"));
    }

    #[test]
    fn missing_nodes_array_yields_an_empty_set() {
        assert!(parse_notes_payload("{}").unwrap().is_empty());
        assert!(parse_notes_payload(r#"{"nodes": 4}"#).unwrap().is_empty());
    }

    #[test]
    fn non_json_input_is_an_error() {
        assert!(parse_notes_payload("not json").is_err());
    }

    #[test]
    fn rendered_payload_round_trips() {
        let raw = vec![
            RawNote {
                id: 1,
                content: "alpha".to_owned(),
                position: Some([10.0, 20.0]),
            },
            RawNote {
                id: 2,
                content: "beta".to_owned(),
                position: None,
            },
        ];

        let rendered = render_notes_payload(&raw).unwrap();
        let set = parse_notes_payload(&rendered).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(1).unwrap().position, Some([10.0, 20.0]));
    }
}
