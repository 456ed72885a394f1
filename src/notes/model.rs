use std::collections::HashMap;

/// A single note as supplied by the store. `position` is percent-of-viewport
/// when the store has one; unpositioned notes get scattered onto the
/// occupancy grid at layout time.
#[derive(Clone, Debug, PartialEq)]
pub struct NoteRecord {
    pub id: u64,
    pub content: String,
    pub position: Option<[f32; 2]>,
}

/// The current note set. Replaced wholesale on every refresh; nothing in the
/// view layer mutates individual records.
#[derive(Clone, Debug, Default)]
pub struct NoteSet {
    notes: Vec<NoteRecord>,
    index_by_id: HashMap<u64, usize>,
}

impl NoteSet {
    pub fn new(notes: Vec<NoteRecord>) -> Self {
        let mut index_by_id = HashMap::with_capacity(notes.len());
        let mut deduped = Vec::with_capacity(notes.len());

        for note in notes {
            if index_by_id.contains_key(&note.id) {
                continue;
            }
            index_by_id.insert(note.id, deduped.len());
            deduped.push(note);
        }

        Self {
            notes: deduped,
            index_by_id,
        }
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NoteRecord> {
        self.notes.iter()
    }

    pub fn get(&self, id: u64) -> Option<&NoteRecord> {
        self.index_by_id.get(&id).map(|index| &self.notes[*index])
    }

    pub fn content_of(&self, id: u64) -> Option<&str> {
        self.get(id).map(|note| note.content.as_str())
    }

    /// Content lookup for a batch of ids; unknown ids are skipped. This is
    /// the contract consumers like the overlay's linked-note listing use.
    pub fn contents_for(&self, ids: &[u64]) -> Vec<&str> {
        ids.iter()
            .filter_map(|id| self.content_of(*id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: u64, content: &str) -> NoteRecord {
        NoteRecord {
            id,
            content: content.to_owned(),
            position: None,
        }
    }

    #[test]
    fn duplicate_ids_keep_the_first_record() {
        let set = NoteSet::new(vec![note(1, "first"), note(1, "second"), note(2, "other")]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.content_of(1), Some("first"));
    }

    #[test]
    fn contents_for_skips_unknown_ids() {
        let set = NoteSet::new(vec![note(1, "a"), note(2, "b")]);
        assert_eq!(set.contents_for(&[2, 9, 1]), vec!["b", "a"]);
    }
}
