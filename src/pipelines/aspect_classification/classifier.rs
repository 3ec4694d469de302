use std::collections::HashSet;
use std::sync::Arc;

use crate::core::{AspectKeywordTable, AspectLabel};
use crate::text::{stem, DependencyParser, HeuristicDependencyParser};

/// Assigns exactly one aspect (or `Unclassified`) to a sentence.
///
/// Keyword hits form the candidate set. When more than one aspect is a
/// candidate, the first grammatical subject whose lemma is a keyword of a
/// candidate decides; otherwise the earliest candidate in vocabulary order wins.
/// Subject lemmas and keywords are compared on both their surface and stemmed
/// forms, so "lenses" resolves to the keyword "lens".
#[derive(Clone)]
pub struct AspectClassifier {
    table: Arc<AspectKeywordTable>,
    parser: Option<Arc<dyn DependencyParser>>,
    /// Keywords plus their stems, one set per vocabulary entry.
    keyword_forms: Arc<Vec<HashSet<String>>>,
}

impl std::fmt::Debug for AspectClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AspectClassifier")
            .field("table", &self.table)
            .field("parser", &self.parser.is_some())
            .finish()
    }
}

impl AspectClassifier {
    /// Classifier using the built-in heuristic parser for disambiguation.
    pub fn new(table: Arc<AspectKeywordTable>) -> Self {
        Self::with_parser(table, Some(Arc::new(HeuristicDependencyParser::new())))
    }

    /// Pass `None` to skip subject disambiguation entirely.
    pub fn with_parser(
        table: Arc<AspectKeywordTable>,
        parser: Option<Arc<dyn DependencyParser>>,
    ) -> Self {
        let keyword_forms: Vec<HashSet<String>> = table
            .entries()
            .iter()
            .map(|entry| {
                entry
                    .keywords
                    .iter()
                    .flat_map(|k| [k.clone(), stem(k)])
                    .collect()
            })
            .collect();
        Self {
            table,
            parser,
            keyword_forms: Arc::new(keyword_forms),
        }
    }

    pub fn table(&self) -> &AspectKeywordTable {
        &self.table
    }

    /// Vocabulary indices of every aspect with a keyword occurring in
    /// `normalized` (already lowercase), in vocabulary order.
    pub fn candidates(&self, normalized: &str) -> Vec<usize> {
        self.table
            .entries()
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.keywords.iter().any(|k| normalized.contains(k.as_str())))
            .map(|(idx, _)| idx)
            .collect()
    }

    fn disambiguate(&self, normalized: &str, candidates: &[usize]) -> Option<usize> {
        let parser = self.parser.as_ref()?;
        let tokens = match parser.parse(normalized) {
            Ok(tokens) => tokens,
            Err(err) => {
                tracing::warn!("dependency parse failed, skipping disambiguation: {err:#}");
                return None;
            }
        };

        tokens
            .iter()
            .filter(|token| token.role.is_subject())
            .find_map(|token| {
                let lemma = token.lemma.to_lowercase();
                let stemmed = stem(&lemma);
                candidates.iter().copied().find(|&idx| {
                    let forms = &self.keyword_forms[idx];
                    forms.contains(&lemma) || forms.contains(&stemmed)
                })
            })
    }

    pub fn classify(&self, sentence: &str) -> AspectLabel {
        let normalized = sentence.to_lowercase();
        let candidates = self.candidates(&normalized);

        let chosen = match candidates.as_slice() {
            [] => None,
            [only] => Some(*only),
            [first, ..] => {
                let resolved = self.disambiguate(&normalized, &candidates);
                if resolved.is_none() {
                    tracing::debug!(
                        candidates = candidates.len(),
                        "no subject resolved the aspect, using vocabulary order"
                    );
                }
                resolved.or(Some(*first))
            }
        };

        match chosen {
            Some(idx) => AspectLabel::Aspect(self.table.entries()[idx].aspect.clone()),
            None => AspectLabel::Unclassified,
        }
    }
}
