pub mod controller;
pub mod conversation;
pub mod corpus;
pub mod error;
pub mod eval;
pub mod matcher;
pub mod model;
pub mod storage;

pub use controller::{ChatConfig, ChatController, DEFAULT_REPLY_DELAY};
pub use conversation::{ConversationSession, PendingTurn, TurnState};
pub use corpus::{Corpus, FALLBACK_MESSAGE, GREETING, QUICK_REPLIES};
pub use error::{ChatError, Result};
pub use eval::{evaluate_cases, EvalCase, EvalOutcome, EvalSummary, DEFAULT_REQUIRED_PASS_RATE};
pub use matcher::{FaqMatcher, MatcherConfig, DEFAULT_MIN_KEYWORD_LEN, DEFAULT_MIN_SCORE};
pub use model::{ConversationMessage, FaqEntry, MatchPass, MatchResult, Sender, SynonymRule};
pub use storage::{
    load_corpus, load_entries_jsonl, load_synonyms_json, save_entries_jsonl, save_synonyms_json,
};
