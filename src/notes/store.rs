use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use super::model::NoteSet;
use super::parse::{RawNote, parse_notes_payload, render_notes_payload};

/// Note storage backed by a local JSON file in the wire shape
/// `{ "nodes": [...] }`. The view layer only ever sees `NoteSet`s.
pub struct FileNoteStore {
    path: PathBuf,
}

impl FileNoteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Loads the full note set. A missing file is an empty store, not an
    /// error; unreadable or non-JSON content is.
    pub fn load(&self) -> Result<NoteSet> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "notes file does not exist yet; starting empty");
            return Ok(NoteSet::default());
        }

        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read notes file {}", self.path.display()))?;
        let set = parse_notes_payload(&raw)
            .with_context(|| format!("failed to parse notes file {}", self.path.display()))?;

        info!(count = set.len(), "loaded notes");
        Ok(set)
    }

    /// Appends a note with the next free id and no stored position (the
    /// layout scatters it), then persists the whole payload. Returns the new
    /// id so the caller can trigger a refresh.
    pub fn add_note(&self, content: &str) -> Result<u64> {
        let mut raw_notes = self.load_raw()?;
        let id = raw_notes
            .iter()
            .map(|note| note.id)
            .max()
            .map_or(1, |max| max + 1);

        raw_notes.push(RawNote {
            id,
            content: content.to_owned(),
            position: None,
        });

        let rendered = render_notes_payload(&raw_notes)?;
        fs::write(&self.path, rendered)
            .with_context(|| format!("failed to write notes file {}", self.path.display()))?;

        info!(id, "added note");
        Ok(id)
    }

    fn load_raw(&self) -> Result<Vec<RawNote>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read notes file {}", self.path.display()))?;
        let parsed: Value =
            serde_json::from_str(&raw).context("notes payload is not valid JSON")?;

        let mut raw_notes = Vec::new();
        if let Some(entries) = parsed.get("nodes").and_then(Value::as_array) {
            for value in entries {
                if let Ok(note) = RawNote::deserialize(value) {
                    raw_notes.push(note);
                }
            }
        }
        Ok(raw_notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_an_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileNoteStore::new(dir.path().join("notes.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn added_notes_survive_a_reload() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileNoteStore::new(dir.path().join("notes.json"));

        let first = store.add_note("remember the milk").unwrap();
        let second = store.add_note("water the plants").unwrap();
        assert_ne!(first, second);

        let set = store.load().unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.content_of(first), Some("remember the milk"));
        assert_eq!(set.content_of(second), Some("water the plants"));
    }

    #[test]
    fn add_note_keeps_existing_positions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.json");
        fs::write(
            &path,
            r#"{"nodes": [{"id": 5, "content": "pinned", "position": [10.0, 20.0]}]}"#,
        )
        .unwrap();

        let store = FileNoteStore::new(&path);
        let id = store.add_note("fresh").unwrap();
        assert_eq!(id, 6);

        let set = store.load().unwrap();
        assert_eq!(set.get(5).unwrap().position, Some([10.0, 20.0]));
        assert_eq!(set.get(6).unwrap().position, None);
    }
}
