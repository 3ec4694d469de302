use std::collections::HashSet;
use std::ops::Range;

use crate::core::Sentence;

/// Sentence-boundary capability.
pub trait SentenceSegmenter: Send + Sync {
    /// Contiguous byte ranges covering all of `text`, in order.
    fn spans(&self, text: &str) -> Vec<Range<usize>>;

    /// Trimmed, non-empty sentences in original order.
    fn segment(&self, text: &str) -> Vec<Sentence> {
        self.spans(text)
            .into_iter()
            .filter_map(|span| text.get(span))
            .filter_map(|piece| Sentence::new(piece.trim()))
            .collect()
    }
}

const DEFAULT_ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "e.g", "i.e", "approx",
    "inc", "ltd", "co", "dept", "est", "fig", "u.s", "a.m", "p.m",
];

const TERMINATORS: [char; 3] = ['.', '!', '?'];
const CLOSERS: [char; 7] = ['"', '\'', ')', ']', '\u{201d}', '\u{2019}', '}'];

/// Rule-based segmenter: splits after terminators followed by whitespace and on
/// blank lines, but not after known abbreviations.
#[derive(Debug, Clone)]
pub struct RuleSegmenter {
    abbreviations: HashSet<String>,
}

impl RuleSegmenter {
    pub fn new() -> Self {
        Self::with_abbreviations(DEFAULT_ABBREVIATIONS.iter().copied())
    }

    /// Abbreviations are given without the final period, e.g. `"dr"` or `"e.g"`.
    pub fn with_abbreviations<S: AsRef<str>>(abbreviations: impl IntoIterator<Item = S>) -> Self {
        Self {
            abbreviations: abbreviations
                .into_iter()
                .map(|a| a.as_ref().trim_end_matches('.').to_lowercase())
                .collect(),
        }
    }

    fn ends_with_abbreviation(&self, before_period: &str) -> bool {
        let word = before_period
            .rsplit(|c: char| c.is_whitespace() || matches!(c, '(' | '"' | '\''))
            .next()
            .unwrap_or("");
        !word.is_empty() && self.abbreviations.contains(&word.to_lowercase())
    }
}

impl Default for RuleSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl SentenceSegmenter for RuleSegmenter {
    fn spans(&self, text: &str) -> Vec<Range<usize>> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let byte_at = |idx: usize| chars.get(idx).map_or(text.len(), |(pos, _)| *pos);
        let skip_whitespace = |mut idx: usize| {
            while idx < chars.len() && chars[idx].1.is_whitespace() {
                idx += 1;
            }
            idx
        };

        let mut spans = Vec::new();
        let mut start = 0;
        let mut i = 0;

        while i < chars.len() {
            let (pos, c) = chars[i];

            if c == '\n' {
                let mut j = i + 1;
                while j < chars.len() && matches!(chars[j].1, ' ' | '\t' | '\r') {
                    j += 1;
                }
                if j < chars.len() && chars[j].1 == '\n' {
                    let next = skip_whitespace(j);
                    let end = byte_at(next);
                    spans.push(start..end);
                    start = end;
                    i = next;
                    continue;
                }
            }

            if TERMINATORS.contains(&c) {
                let mut j = i + 1;
                while j < chars.len() && TERMINATORS.contains(&chars[j].1) {
                    j += 1;
                }
                while j < chars.len() && CLOSERS.contains(&chars[j].1) {
                    j += 1;
                }

                let at_boundary = j == chars.len() || chars[j].1.is_whitespace();
                let abbreviation =
                    c == '.' && j == i + 1 && self.ends_with_abbreviation(&text[start..pos]);

                if at_boundary && !abbreviation {
                    let next = skip_whitespace(j);
                    let end = byte_at(next);
                    spans.push(start..end);
                    start = end;
                    i = next;
                    continue;
                }
                i = j;
                continue;
            }

            i += 1;
        }

        if start < text.len() {
            spans.push(start..text.len());
        }
        spans
    }
}
