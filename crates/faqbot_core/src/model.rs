use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

impl FaqEntry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Phrases that imply a canonical term. A query containing any variant gets
/// the canonical term appended before matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymRule {
    pub canonical: String,
    pub variants: Vec<String>,
}

impl SynonymRule {
    pub fn new(canonical: impl Into<String>, variants: &[&str]) -> Self {
        Self {
            canonical: canonical.into(),
            variants: variants.iter().map(|v| v.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub id: u64,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPass {
    Direct,
    Keyword,
    NoMatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Winning entry, or the best keyword candidate when it scored below the
    /// acceptance threshold.
    pub entry_index: Option<usize>,
    pub answer: Option<String>,
    /// Keyword score of the best candidate; 0 for direct matches.
    pub score: u32,
    pub pass: MatchPass,
}

impl MatchResult {
    pub fn is_hit(&self) -> bool {
        self.answer.is_some()
    }
}
