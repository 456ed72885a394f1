/// First line of a note, truncated for card labels and result rows.
pub fn preview(content: &str, max_chars: usize) -> String {
    let first_line = content.lines().next().unwrap_or("");
    let mut out = String::with_capacity(first_line.len().min(max_chars + 1));

    for (taken, ch) in first_line.chars().enumerate() {
        if taken >= max_chars {
            out.push('\u{2026}');
            return out;
        }
        out.push(ch);
    }

    if content.lines().nth(1).is_some() {
        out.push('\u{2026}');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::preview;

    #[test]
    fn short_single_line_is_untouched() {
        assert_eq!(preview("buy milk", 20), "buy milk");
    }

    #[test]
    fn long_lines_are_truncated_with_ellipsis() {
        assert_eq!(preview("abcdefgh", 4), "abcd\u{2026}");
    }

    #[test]
    fn multiline_notes_show_only_the_first_line() {
        assert_eq!(preview("title\nbody text", 20), "title\u{2026}");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(preview("äöüß", 2), "äö\u{2026}");
    }
}
