use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::matcher::FaqMatcher;
use crate::model::{MatchPass, MatchResult};

pub const DEFAULT_REQUIRED_PASS_RATE: f32 = 1.0;

/// One regression case for the matcher.
///
/// With neither `expected_entry` nor `expected_answer` set the case expects
/// no match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalCase {
    pub case_id: String,
    pub question: String,
    #[serde(default)]
    pub expected_entry: Option<usize>,
    #[serde(default)]
    pub expected_answer: Option<String>,
    #[serde(default)]
    pub expected_pass: Option<MatchPass>,
    /// Only checked for keyword matches; direct matches carry no score.
    #[serde(default)]
    pub min_score: Option<u32>,
}

impl EvalCase {
    pub fn expects_hit(&self) -> bool {
        self.expected_entry.is_some() || self.expected_answer.is_some()
    }

    pub fn matches(&self, result: &MatchResult) -> bool {
        if self.expects_hit() != result.is_hit() {
            return false;
        }

        if let Some(expected) = self.expected_entry {
            if result.entry_index != Some(expected) {
                return false;
            }
        }

        if let Some(expected) = &self.expected_answer {
            if result.answer.as_deref() != Some(expected.as_str()) {
                return false;
            }
        }

        if let Some(expected) = self.expected_pass {
            if result.pass != expected {
                return false;
            }
        }

        if let Some(min_score) = self.min_score {
            if result.pass == MatchPass::Keyword && result.score < min_score {
                return false;
            }
        }

        true
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalOutcome {
    pub case_id: String,
    pub passed: bool,
    pub pass: MatchPass,
    pub entry_index: Option<usize>,
    pub score: u32,
    pub latency_ms: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub pass_rate: f32,
    pub outcomes: Vec<EvalOutcome>,
}

impl EvalSummary {
    pub fn meets(&self, required_pass_rate: f32) -> bool {
        self.pass_rate >= required_pass_rate
    }
}

pub fn evaluate_cases(matcher: &FaqMatcher, cases: &[EvalCase]) -> EvalSummary {
    let mut outcomes = Vec::with_capacity(cases.len());

    for case in cases {
        let start = Instant::now();
        let result = matcher.decide(&case.question);
        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

        outcomes.push(EvalOutcome {
            case_id: case.case_id.clone(),
            passed: case.matches(&result),
            pass: result.pass,
            entry_index: result.entry_index,
            score: result.score,
            latency_ms,
        });
    }

    let total = outcomes.len();
    let passed = outcomes.iter().filter(|o| o.passed).count();
    let failed = total.saturating_sub(passed);
    let pass_rate = if total == 0 {
        0.0
    } else {
        passed as f32 / total as f32
    };

    EvalSummary {
        total,
        passed,
        failed,
        pass_rate,
        outcomes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(id: &str, question: &str, entry: Option<usize>) -> EvalCase {
        EvalCase {
            case_id: id.to_string(),
            question: question.to_string(),
            expected_entry: entry,
            expected_answer: None,
            expected_pass: None,
            min_score: None,
        }
    }

    #[test]
    fn summarizes_hits_and_misses() {
        let matcher = FaqMatcher::default();
        let cases = vec![
            case("direct", "What is FundedPro?", Some(0)),
            case("synonym", "how long is the challenge", Some(1)),
            case("miss", "xyz123", None),
            case("wrong", "What are the drawdown rules?", Some(0)),
        ];

        let summary = evaluate_cases(&matcher, &cases);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.passed, 3);
        assert_eq!(summary.failed, 1);
        assert!((summary.pass_rate - 0.75).abs() < 1e-6);
        assert!(!summary.meets(DEFAULT_REQUIRED_PASS_RATE));
        assert!(!summary.outcomes[3].passed);
    }

    #[test]
    fn checks_pass_and_min_score() {
        let matcher = FaqMatcher::default();
        let mut c = case("drawdown", "tell me about drawdown rules", Some(7));
        c.expected_pass = Some(MatchPass::Keyword);
        c.min_score = Some(2);
        assert!(c.matches(&matcher.decide(&c.question)));

        c.min_score = Some(100);
        assert!(!c.matches(&matcher.decide(&c.question)));

        c.min_score = None;
        c.expected_pass = Some(MatchPass::Direct);
        assert!(!c.matches(&matcher.decide(&c.question)));
    }

    #[test]
    fn parses_cases_with_optional_fields() {
        let json = r#"[
            {"case_id": "a", "question": "What is FundedPro?", "expected_entry": 0},
            {"case_id": "b", "question": "xyz123", "expected_pass": "no_match"}
        ]"#;
        let cases: Vec<EvalCase> = serde_json::from_str(json).expect("parse");
        assert!(cases[0].expects_hit());
        assert!(!cases[1].expects_hit());
        assert_eq!(cases[1].expected_pass, Some(MatchPass::NoMatch));
    }

    #[test]
    fn empty_case_list_has_zero_rate() {
        let summary = evaluate_cases(&FaqMatcher::default(), &[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.pass_rate, 0.0);
    }
}
