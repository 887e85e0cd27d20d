use tracing::trace;

use crate::corpus::Corpus;
use crate::model::{FaqEntry, MatchPass, MatchResult};

/// Keywords shorter than this many characters are ignored by scoring.
pub const DEFAULT_MIN_KEYWORD_LEN: usize = 3;
/// Lowest keyword score accepted as an answer.
pub const DEFAULT_MIN_SCORE: u32 = 2;

/// Tuning knobs of the keyword pass. Both values are heuristics, not
/// semantically meaningful thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatcherConfig {
    pub min_keyword_len: usize,
    pub min_score: u32,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            min_keyword_len: DEFAULT_MIN_KEYWORD_LEN,
            min_score: DEFAULT_MIN_SCORE,
        }
    }
}

#[derive(Debug, Clone)]
struct PreparedRule {
    canonical: String,
    variants: Vec<String>,
}

/// Best-match lookup over a fixed corpus.
///
/// A query is answered by the first entry whose question contains, or is
/// contained in, the query (a direct match). Failing that, every entry is
/// scored by keyword overlap, question hits counting double, and the highest
/// scoring entry wins if it reaches `min_score`. Ties go to the entry that
/// comes first in the corpus.
#[derive(Debug, Clone)]
pub struct FaqMatcher {
    corpus: Corpus,
    questions: Vec<String>,
    answers: Vec<String>,
    rules: Vec<PreparedRule>,
    config: MatcherConfig,
}

impl FaqMatcher {
    pub fn new(corpus: Corpus) -> Self {
        Self::with_config(corpus, MatcherConfig::default())
    }

    pub fn with_config(corpus: Corpus, config: MatcherConfig) -> Self {
        let questions = corpus
            .entries
            .iter()
            .map(|e| e.question.to_lowercase())
            .collect();
        let answers = corpus
            .entries
            .iter()
            .map(|e| e.answer.to_lowercase())
            .collect();
        let rules = corpus
            .synonyms
            .iter()
            .map(|r| PreparedRule {
                canonical: r.canonical.to_lowercase(),
                variants: r.variants.iter().map(|v| v.to_lowercase()).collect(),
            })
            .collect();

        Self {
            corpus,
            questions,
            answers,
            rules,
            config,
        }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn entries(&self) -> &[FaqEntry] {
        &self.corpus.entries
    }

    pub fn config(&self) -> MatcherConfig {
        self.config
    }

    /// Lowercases and trims a raw query.
    pub fn normalize(query: &str) -> String {
        query.trim().to_lowercase()
    }

    /// Appends the canonical term once for every variant found in the
    /// normalized query. The original text is always kept in front.
    pub fn expand_query(&self, normalized: &str) -> String {
        let mut expanded = normalized.to_string();
        for rule in &self.rules {
            for variant in &rule.variants {
                if normalized.contains(variant.as_str()) {
                    expanded.push(' ');
                    expanded.push_str(&rule.canonical);
                }
            }
        }
        expanded
    }

    fn direct_match(&self, normalized: &str, expanded: &str) -> Option<usize> {
        self.questions.iter().position(|question| {
            normalized.contains(question.as_str())
                || question.contains(normalized)
                || expanded.contains(question.as_str())
        })
    }

    fn keywords<'q>(&self, expanded: &'q str) -> Vec<&'q str> {
        expanded
            .split_whitespace()
            .filter(|word| word.chars().count() >= self.config.min_keyword_len)
            .collect()
    }

    /// Keyword score of every entry, in corpus order, for an already expanded
    /// query.
    pub fn keyword_scores(&self, expanded: &str) -> Vec<u32> {
        let keywords = self.keywords(expanded);

        self.questions
            .iter()
            .zip(self.answers.iter())
            .map(|(question, answer)| {
                let question_score = keywords.iter().filter(|k| question.contains(**k)).count();
                let answer_score = keywords.iter().filter(|k| answer.contains(**k)).count();
                (question_score * 2 + answer_score) as u32
            })
            .collect()
    }

    fn resolve(&self, query: &str) -> (Option<usize>, u32, MatchPass) {
        let normalized = Self::normalize(query);
        let expanded = self.expand_query(&normalized);
        trace!(%expanded, "expanded query");

        if let Some(idx) = self.direct_match(&normalized, &expanded) {
            trace!(entry = idx, "direct match");
            return (Some(idx), 0, MatchPass::Direct);
        }

        let best = self
            .keyword_scores(&expanded)
            .into_iter()
            .enumerate()
            .filter(|(_, score)| *score > 0)
            .fold(None, |best: Option<(usize, u32)>, (idx, score)| match best {
                Some((_, best_score)) if score <= best_score => best,
                _ => Some((idx, score)),
            });

        match best {
            Some((idx, score)) if score >= self.config.min_score => {
                trace!(entry = idx, score, "keyword match");
                (Some(idx), score, MatchPass::Keyword)
            }
            Some((idx, score)) => {
                trace!(entry = idx, score, "best keyword candidate below threshold");
                (Some(idx), score, MatchPass::NoMatch)
            }
            None => (None, 0, MatchPass::NoMatch),
        }
    }

    pub fn decide(&self, query: &str) -> MatchResult {
        let (entry_index, score, pass) = self.resolve(query);
        let answer = match pass {
            MatchPass::NoMatch => None,
            _ => entry_index.map(|idx| self.corpus.entries[idx].answer.clone()),
        };

        MatchResult {
            entry_index,
            answer,
            score,
            pass,
        }
    }

    /// Answer for `query`, or `None` when nothing matches confidently.
    /// Callers are expected to reject blank input first: an empty query is a
    /// substring of every question and direct-matches the first entry.
    pub fn find_best_match(&self, query: &str) -> Option<&str> {
        match self.resolve(query) {
            (_, _, MatchPass::NoMatch) | (None, _, _) => None,
            (Some(idx), _, _) => Some(self.corpus.entries[idx].answer.as_str()),
        }
    }
}

impl Default for FaqMatcher {
    fn default() -> Self {
        Self::new(Corpus::builtin())
    }
}
