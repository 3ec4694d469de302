//! Word-level text preprocessing.
//!
//! Words are split with the BERT pre-tokenizer from `tokenizers` (whitespace plus
//! punctuation splitting), filtered against the English stop-word list and
//! reduced with the Snowball English stemmer.

use std::collections::{HashMap, HashSet};

use rust_stemmers::{Algorithm, Stemmer};
use serde::Serialize;
use tokenizers::pre_tokenizers::bert::BertPreTokenizer;
use tokenizers::{OffsetReferential, OffsetType, PreTokenizedString, PreTokenizer};

/// A word and its byte offsets in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSpan {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl WordSpan {
    pub fn is_punctuation(&self) -> bool {
        self.text.chars().all(|c| !c.is_alphanumeric())
    }
}

/// Split `text` into words and single punctuation marks.
pub fn word_spans(text: &str) -> anyhow::Result<Vec<WordSpan>> {
    let mut pretokenized = PreTokenizedString::from(text);
    BertPreTokenizer
        .pre_tokenize(&mut pretokenized)
        .map_err(|e| anyhow::anyhow!("Failed to pre-tokenize text: {}", e))?;

    Ok(pretokenized
        .get_splits(OffsetReferential::Original, OffsetType::Byte)
        .into_iter()
        .map(|(word, (start, end), _)| WordSpan {
            text: word.to_string(),
            start,
            end,
        })
        .collect())
}

/// English Snowball stem of `word`, lowercased first.
pub fn stem(word: &str) -> String {
    let lower = word.to_lowercase();
    Stemmer::create(Algorithm::English).stem(&lower).into_owned()
}

/// How often a content word occurs in a piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermFrequency {
    pub term: String,
    pub count: usize,
}

/// Lowercasing, stop-word and punctuation filtering over tokenized text.
#[derive(Debug, Clone)]
pub struct TextPreprocessor {
    stop_words: HashSet<String>,
}

impl TextPreprocessor {
    pub fn new() -> Self {
        let stop_words = stop_words::get(stop_words::LANGUAGE::English)
            .into_iter()
            .map(|w| w.to_string())
            .collect();
        Self { stop_words }
    }

    /// Use a custom stop-word list instead of the bundled English one.
    pub fn with_stop_words<S: Into<String>>(stop_words: impl IntoIterator<Item = S>) -> Self {
        Self {
            stop_words: stop_words
                .into_iter()
                .map(|w| w.into().to_lowercase())
                .collect(),
        }
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Lowercased content words, in text order.
    pub fn content_words(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        let words = match word_spans(&lower) {
            Ok(words) => words,
            Err(err) => {
                tracing::warn!("word splitting failed, falling back to whitespace: {err}");
                lower
                    .split_whitespace()
                    .map(|w| WordSpan {
                        text: w.to_string(),
                        start: 0,
                        end: 0,
                    })
                    .collect()
            }
        };

        words
            .into_iter()
            .filter(|w| !w.is_punctuation() && !self.is_stop_word(&w.text))
            .map(|w| w.text)
            .collect()
    }

    /// Lowercase, tokenize, drop stop words and punctuation, then stem.
    pub fn preprocess_text(&self, text: &str) -> Vec<String> {
        self.content_words(text)
            .iter()
            .map(|w| stem(w))
            .collect()
    }

    /// Content-word counts, most frequent first and ties broken alphabetically.
    pub fn term_frequencies(&self, text: &str) -> Vec<TermFrequency> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for word in self.content_words(text) {
            *counts.entry(word).or_default() += 1;
        }

        let mut frequencies: Vec<TermFrequency> = counts
            .into_iter()
            .map(|(term, count)| TermFrequency { term, count })
            .collect();
        frequencies.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.term.cmp(&b.term)));
        frequencies
    }
}

impl Default for TextPreprocessor {
    fn default() -> Self {
        Self::new()
    }
}
