//! Keyword highlighting.
//!
//! Keywords are escaped, ordered longest first and joined into one
//! case-insensitive alternation, so at any position the longest keyword
//! wins ("database" before "data"). The text is scanned left to right and
//! every non-overlapping match is wrapped in the open/close tags with its
//! casing unchanged.
//!
//! `highlight` assumes its input is already safe to render and only adds
//! markers. `highlight_html` escapes the surrounding and matched text while
//! leaving the markers intact, for raw ingested text.

use regex::{Regex, RegexBuilder};
use tracing::warn;

use projfind_core::config::HighlightSettings;

#[derive(Debug, Clone)]
pub struct Highlighter {
    open_tag: String,
    close_tag: String,
    max_keywords: usize,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::from_settings(&HighlightSettings::default())
    }
}

impl Highlighter {
    pub fn new(open_tag: impl Into<String>, close_tag: impl Into<String>) -> Self {
        Self { open_tag: open_tag.into(), close_tag: close_tag.into(), max_keywords: HighlightSettings::default().max_keywords }
    }

    pub fn from_settings(settings: &HighlightSettings) -> Self {
        Self {
            open_tag: settings.open_tag.clone(),
            close_tag: settings.close_tag.clone(),
            max_keywords: settings.max_keywords.max(1),
        }
    }

    pub fn with_max_keywords(mut self, max_keywords: usize) -> Self {
        self.max_keywords = max_keywords.max(1);
        self
    }

    pub fn highlight<I, S>(&self, text: &str, keywords: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.render(text, keywords, |s, out| out.push_str(s))
    }

    pub fn highlight_html<I, S>(&self, text: &str, keywords: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.render(text, keywords, push_escaped)
    }

    fn render<I, S>(&self, text: &str, keywords: I, emit: fn(&str, &mut String)) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = String::with_capacity(text.len());
        let pattern = if text.is_empty() { None } else { self.pattern(keywords) };
        let Some(pattern) = pattern else {
            emit(text, &mut out);
            return out;
        };
        let mut last = 0;
        for m in pattern.find_iter(text) {
            emit(&text[last..m.start()], &mut out);
            out.push_str(&self.open_tag);
            emit(m.as_str(), &mut out);
            out.push_str(&self.close_tag);
            last = m.end();
        }
        emit(&text[last..], &mut out);
        out
    }

    fn pattern<I, S>(&self, keywords: I) -> Option<Regex>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ordered = order_keywords(keywords);
        if ordered.is_empty() {
            return None;
        }
        let kept = if ordered.len() > self.max_keywords {
            warn!(keywords = ordered.len(), kept = self.max_keywords, "highlight keyword set capped");
            &ordered[..self.max_keywords]
        } else {
            &ordered[..]
        };
        let alternation = kept.iter().map(|k| regex::escape(k)).collect::<Vec<_>>().join("|");
        match RegexBuilder::new(&alternation).case_insensitive(true).build() {
            Ok(re) => Some(re),
            Err(e) => {
                warn!(error = %e, "highlight pattern rejected, leaving text unmarked");
                None
            }
        }
    }
}

/// Non-blank, unique keywords, longest first, ties in lexicographic order.
pub fn order_keywords<I, S>(keywords: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut ordered: Vec<String> = keywords
        .into_iter()
        .map(|k| k.as_ref().to_string())
        .filter(|k| !k.trim().is_empty())
        .collect();
    ordered.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then_with(|| a.cmp(b)));
    ordered.dedup();
    ordered
}

/// The first `max_chars` characters of `text`, and whether anything was cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> (&str, bool) {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => (&text[..idx], true),
        None => (text, false),
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    push_escaped(text, &mut out);
    out
}

fn push_escaped(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
}
