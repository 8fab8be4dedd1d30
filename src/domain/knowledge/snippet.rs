use serde::{Deserialize, Serialize};

/// A raw search hit: page title and an HTML-highlighted excerpt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    #[serde(default)]
    pub snippet: String,
}

impl SearchHit {
    pub fn new(title: impl Into<String>, snippet: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            snippet: snippet.into(),
        }
    }
}

/// A search hit ready to be shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    caption: String,
    text: String,
}

impl Snippet {
    /// Strips markup and makes the excerpt end like a sentence.
    ///
    /// Returns `None` when no text is left after stripping.
    pub fn from_hit(hit: &SearchHit) -> Option<Self> {
        let mut text = strip_html(&hit.snippet);
        if text.is_empty() {
            return None;
        }
        if !text.ends_with(['.', '!', '?']) {
            text.push('…');
        }
        Some(Self {
            caption: hit.title.clone(),
            text,
        })
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Basic HTML tag stripping with entity decoding and space collapsing.
pub fn strip_html(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }

    let decoded = result
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_html_removes_highlight_markup() {
        let html = r#"<span class="searchmatch">Rust</span> is a  multi-paradigm &amp; general-purpose"#;
        assert_eq!(strip_html(html), "Rust is a multi-paradigm & general-purpose");
    }

    #[test]
    fn snippet_appends_ellipsis_when_cut_mid_sentence() {
        let hit = SearchHit::new("Rust (programming language)", "Rust is a language that");
        let snippet = Snippet::from_hit(&hit).unwrap();
        assert_eq!(snippet.text(), "Rust is a language that…");
        assert_eq!(snippet.caption(), "Rust (programming language)");
    }

    #[test]
    fn snippet_keeps_complete_sentences() {
        for text in ["Done.", "Really?", "Wow!"] {
            let snippet = Snippet::from_hit(&SearchHit::new("T", text)).unwrap();
            assert_eq!(snippet.text(), text);
        }
    }

    #[test]
    fn markup_only_snippet_is_none() {
        assert!(Snippet::from_hit(&SearchHit::new("T", "<b> </b>")).is_none());
    }
}
