//! Text shaping for inbound utterances and outbound reply lines.

/// Normalizes a raw chat message before classification.
///
/// Trims surrounding whitespace, drops leading dots and collapses every
/// whitespace run (including CR/LF/TAB) to a single space.
pub fn clean_input(raw: &str) -> String {
    raw.trim()
        .trim_start_matches('.')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Splits a reply into lines.
///
/// A separator is any whitespace run that contains at least one CR or LF;
/// the whitespace around the line break is consumed with it. Text without
/// line breaks comes back as a single line, untouched.
pub fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut pending_ws = String::new();
    let mut pending_break = false;

    for c in text.chars() {
        if c.is_whitespace() {
            pending_ws.push(c);
            pending_break |= c == '\n' || c == '\r';
            continue;
        }
        if pending_break {
            lines.push(std::mem::take(&mut current));
        } else {
            current.push_str(&pending_ws);
        }
        pending_ws.clear();
        pending_break = false;
        current.push(c);
    }

    if pending_break {
        lines.push(std::mem::take(&mut current));
    } else {
        current.push_str(&pending_ws);
    }
    lines.push(current);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_input_strips_dots_and_collapses_whitespace() {
        assert_eq!(clean_input("  ..  what's\tthe \n weather  "), "what's the weather");
    }

    #[test]
    fn clean_input_of_blank_is_empty() {
        assert_eq!(clean_input(" \r\n\t "), "");
        assert_eq!(clean_input("..."), "");
    }

    #[test]
    fn split_lines_keeps_single_line_intact() {
        assert_eq!(split_lines("Hello there "), vec!["Hello there "]);
    }

    #[test]
    fn split_lines_absorbs_whitespace_around_breaks() {
        assert_eq!(
            split_lines("First line.  \n\n   Second line.\r\nThird"),
            vec!["First line.", "Second line.", "Third"]
        );
    }

    #[test]
    fn split_lines_keeps_edge_empties() {
        assert_eq!(split_lines("\nonly"), vec!["", "only"]);
        assert_eq!(split_lines("only\n"), vec!["only", ""]);
    }
}
