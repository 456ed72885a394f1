use std::collections::HashMap;

/// Hover/click state for the note under the pointer. `Opened` pins the note
/// into the detail overlay until the backdrop is clicked or the note is
/// clicked again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Unfocused,
    Focused(u64),
    Opened(u64),
}

impl Focus {
    pub fn focused_id(&self) -> Option<u64> {
        match self {
            Focus::Unfocused => None,
            Focus::Focused(id) | Focus::Opened(id) => Some(*id),
        }
    }

    pub fn opened_id(&self) -> Option<u64> {
        match self {
            Focus::Opened(id) => Some(*id),
            _ => None,
        }
    }

    pub fn pointer_enter(&mut self, id: u64) {
        if !matches!(self, Focus::Opened(_)) {
            *self = Focus::Focused(id);
        }
    }

    pub fn pointer_leave(&mut self) {
        if !matches!(self, Focus::Opened(_)) {
            *self = Focus::Unfocused;
        }
    }

    pub fn click(&mut self, id: u64) {
        *self = match *self {
            Focus::Opened(open) if open == id => Focus::Unfocused,
            _ => Focus::Opened(id),
        };
    }

    pub fn backdrop_click(&mut self) {
        *self = Focus::Unfocused;
    }
}

/// A note lights up for a non-empty query iff its content contains the query,
/// case-insensitively. With no query, everything is lit unless some note has
/// focus, in which case only the focused note and its out-neighbors are.
pub fn node_highlighted(
    id: u64,
    content: &str,
    query: &str,
    focus: Focus,
    adjacency: &HashMap<u64, Vec<u64>>,
) -> bool {
    if !query.is_empty() {
        return content.to_lowercase().contains(&query.to_lowercase());
    }

    match focus.focused_id() {
        None => true,
        Some(focused) => {
            id == focused
                || adjacency
                    .get(&focused)
                    .is_some_and(|neighbors| neighbors.contains(&id))
        }
    }
}

/// Same rule keyed on the edge's source endpoint. Edges carry no content, so
/// any active search dims them all.
pub fn edge_highlighted(
    from: u64,
    query: &str,
    focus: Focus,
    adjacency: &HashMap<u64, Vec<u64>>,
) -> bool {
    if !query.is_empty() {
        return false;
    }

    match focus.focused_id() {
        None => true,
        Some(focused) => {
            from == focused
                || adjacency
                    .get(&focused)
                    .is_some_and(|neighbors| neighbors.contains(&from))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adjacency() -> HashMap<u64, Vec<u64>> {
        HashMap::from([(1, vec![2, 3]), (2, vec![1]), (3, vec![]), (4, vec![])])
    }

    #[test]
    fn everything_lights_up_without_query_or_focus() {
        let adjacency = adjacency();
        for id in [1, 2, 3, 4] {
            assert!(node_highlighted(
                id,
                "anything",
                "",
                Focus::Unfocused,
                &adjacency
            ));
            assert!(edge_highlighted(id, "", Focus::Unfocused, &adjacency));
        }
    }

    #[test]
    fn query_matches_are_case_insensitive_substrings() {
        let adjacency = adjacency();
        assert!(node_highlighted(
            1,
            "Buy GROCERIES tomorrow",
            "groceries",
            Focus::Unfocused,
            &adjacency
        ));
        assert!(!node_highlighted(
            1,
            "unrelated",
            "groceries",
            Focus::Unfocused,
            &adjacency
        ));
    }

    #[test]
    fn query_overrides_focus() {
        let adjacency = adjacency();
        // Focused but not matching: stays dim while a search is active.
        assert!(!node_highlighted(
            1,
            "other",
            "match",
            Focus::Focused(1),
            &adjacency
        ));
        assert!(!edge_highlighted(1, "match", Focus::Focused(1), &adjacency));
    }

    #[test]
    fn focus_lights_node_and_neighbors_only() {
        let adjacency = adjacency();
        let focus = Focus::Focused(1);
        assert!(node_highlighted(1, "", "", focus, &adjacency));
        assert!(node_highlighted(2, "", "", focus, &adjacency));
        assert!(node_highlighted(3, "", "", focus, &adjacency));
        assert!(!node_highlighted(4, "", "", focus, &adjacency));

        assert!(edge_highlighted(1, "", focus, &adjacency));
        assert!(edge_highlighted(2, "", focus, &adjacency));
        assert!(!edge_highlighted(4, "", focus, &adjacency));
    }

    #[test]
    fn pointer_transitions() {
        let mut focus = Focus::default();
        focus.pointer_enter(5);
        assert_eq!(focus, Focus::Focused(5));
        focus.pointer_enter(6);
        assert_eq!(focus, Focus::Focused(6));
        focus.pointer_leave();
        assert_eq!(focus, Focus::Unfocused);
    }

    #[test]
    fn click_opens_and_reclick_closes() {
        let mut focus = Focus::Focused(5);
        focus.click(5);
        assert_eq!(focus, Focus::Opened(5));

        // Hover is ignored while a note is open.
        focus.pointer_enter(6);
        assert_eq!(focus, Focus::Opened(5));
        focus.pointer_leave();
        assert_eq!(focus, Focus::Opened(5));

        // Clicking another note swaps the overlay to it.
        focus.click(6);
        assert_eq!(focus, Focus::Opened(6));

        focus.click(6);
        assert_eq!(focus, Focus::Unfocused);
    }

    #[test]
    fn backdrop_click_always_unfocuses() {
        let mut focus = Focus::Opened(9);
        focus.backdrop_click();
        assert_eq!(focus, Focus::Unfocused);

        let mut focus = Focus::Focused(2);
        focus.backdrop_click();
        assert_eq!(focus, Focus::Unfocused);
    }
}
