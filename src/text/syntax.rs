//! Syntactic-parse capability used for subject detection.

use std::fmt;

use super::preprocessing::{stem, word_spans};

/// Grammatical role of a token relative to its head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyRole {
    /// `nsubj`
    NominalSubject,
    /// `nsubjpass`
    PassiveNominalSubject,
    Root,
    Other(String),
}

impl DependencyRole {
    /// Map a Universal/ClearNLP dependency tag onto a role.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "nsubj" => DependencyRole::NominalSubject,
            "nsubjpass" | "nsubj:pass" => DependencyRole::PassiveNominalSubject,
            "ROOT" | "root" => DependencyRole::Root,
            other => DependencyRole::Other(other.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            DependencyRole::NominalSubject => "nsubj",
            DependencyRole::PassiveNominalSubject => "nsubjpass",
            DependencyRole::Root => "ROOT",
            DependencyRole::Other(tag) => tag,
        }
    }

    pub fn is_subject(&self) -> bool {
        matches!(
            self,
            DependencyRole::NominalSubject | DependencyRole::PassiveNominalSubject
        )
    }
}

impl fmt::Display for DependencyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxToken {
    pub text: String,
    /// Base lexical form, lowercase. Parsers without a lemmatizer may supply a stem.
    pub lemma: String,
    pub role: DependencyRole,
    /// Index of the head token; the root points at itself.
    pub head: usize,
}

/// Anything that can produce a dependency parse of a sentence.
pub trait DependencyParser: Send + Sync {
    fn parse(&self, sentence: &str) -> anyhow::Result<Vec<SyntaxToken>>;
}

const CLAUSE_CONJUNCTIONS: &[&str] = &[
    "and", "but", "or", "so", "yet", "while", "although", "though", "because", "however",
    "whereas", "except",
];

const HEAD_VERBS: &[&str] = &[
    "is", "are", "was", "were", "be", "been", "am", "has", "have", "had", "does", "do", "did",
    "can", "could", "will", "would", "should", "may", "might", "must", "feels", "feel", "felt",
    "looks", "look", "seems", "seem", "gets", "get", "got", "works", "work", "runs", "run",
    "lasts", "last", "lasted", "makes", "make", "made", "takes", "take", "took", "drains",
    "drained", "needs", "need", "keeps", "kept", "comes", "came", "goes", "went", "dies", "died",
    "stutters", "lags", "struggles", "delivers", "offers", "costs",
];

const NON_SUBJECT_WORDS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "my", "your", "his", "her", "its", "our",
    "their", "very", "really", "also", "just", "so", "too", "not", "never", "quite", "pretty",
    "super", "still", "even", "only", "overall", "honestly", "then", "there",
];

const PREPOSITIONS: &[&str] = &[
    "for", "of", "in", "on", "with", "at", "by", "from", "to", "about", "after", "before", "into",
    "than", "like", "without",
];

/// Lightweight clause-based parser.
///
/// Each clause (split at punctuation and coordinating conjunctions) is headed by
/// its first verb from a closed list; the nearest content word before that verb
/// is tagged as the clause's nominal subject. A clause without a listed verb
/// falls back to the first `-s`/`-ed` word directly following a content word
/// ("the camera shines"). Token lemmas are Snowball stems.
#[derive(Debug, Clone, Default)]
pub struct HeuristicDependencyParser;

impl HeuristicDependencyParser {
    pub fn new() -> Self {
        Self
    }

    fn is_clause_break(word: &str) -> bool {
        word.chars().all(|c| matches!(c, ',' | ';' | ':' | '.' | '!' | '?' | '-'))
            || CLAUSE_CONJUNCTIONS.contains(&word)
    }

    fn is_content_word(word: &str) -> bool {
        word.chars().all(char::is_alphabetic)
            && !NON_SUBJECT_WORDS.contains(&word)
            && !PREPOSITIONS.contains(&word)
    }

    /// Inflected form of a verb missing from `HEAD_VERBS`.
    fn looks_inflected(word: &str) -> bool {
        word.chars().count() > 3
            && word.chars().all(char::is_alphabetic)
            && (word.ends_with("ed")
                || (word.ends_with('s') && !["ss", "us", "is"].iter().any(|s| word.ends_with(s))))
    }
}

impl DependencyParser for HeuristicDependencyParser {
    fn parse(&self, sentence: &str) -> anyhow::Result<Vec<SyntaxToken>> {
        let words = word_spans(sentence)?;
        let lower: Vec<String> = words.iter().map(|w| w.text.to_lowercase()).collect();

        let mut clauses = Vec::new();
        let mut clause_start = 0;
        for (idx, word) in lower.iter().enumerate() {
            if Self::is_clause_break(word) {
                if clause_start < idx {
                    clauses.push(clause_start..idx);
                }
                clause_start = idx + 1;
            }
        }
        if clause_start < lower.len() {
            clauses.push(clause_start..lower.len());
        }

        // (verb index, subject index) per clause that has a verb.
        let heads: Vec<(usize, Option<usize>)> = clauses
            .iter()
            .filter_map(|clause| {
                let listed = clause.clone().find(|&i| HEAD_VERBS.contains(&lower[i].as_str()));
                let verb = listed.or_else(|| {
                    (clause.start + 1..clause.end).find(|&i| {
                        Self::looks_inflected(&lower[i]) && Self::is_content_word(&lower[i - 1])
                    })
                })?;
                let subject = (clause.start..verb)
                    .rev()
                    .find(|&i| Self::is_content_word(&lower[i]));
                Some((verb, subject))
            })
            .collect();

        let root = heads.first().map(|(verb, _)| *verb);
        let mut tokens: Vec<SyntaxToken> = words
            .iter()
            .zip(&lower)
            .enumerate()
            .map(|(idx, (word, lower))| SyntaxToken {
                text: word.text.clone(),
                lemma: stem(lower),
                role: DependencyRole::Other("dep".to_string()),
                head: root.unwrap_or(idx),
            })
            .collect();

        for (verb, subject) in heads {
            if Some(verb) == root {
                tokens[verb].role = DependencyRole::Root;
                tokens[verb].head = verb;
            } else {
                tokens[verb].role = DependencyRole::Other("conj".to_string());
            }
            if let Some(subject) = subject {
                tokens[subject].role = DependencyRole::NominalSubject;
                tokens[subject].head = verb;
            }
        }

        Ok(tokens)
    }
}
