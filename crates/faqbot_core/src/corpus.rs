use serde::{Deserialize, Serialize};

use crate::error::{ChatError, Result};
use crate::model::{FaqEntry, SynonymRule};

pub const GREETING: &str = "Hello! I'm your FundedPro assistant. How can I help you today?";

pub const FALLBACK_MESSAGE: &str =
    "Sir, please contact our support team at support@thefundedpro.com for further assistance.";

pub const QUICK_REPLIES: &[&str] = &[
    "What is FundedPro?",
    "How long is the evaluation period?",
    "What profit splits do you offer?",
    "What are the account sizes?",
];

// Order is the tie-break for both matching passes.
const FAQ_DATA: &[(&str, &str)] = &[
    (
        "What is FundedPro?",
        "FundedPro is a leading proprietary trading firm that provides funded trading accounts to skilled traders worldwide. We offer comprehensive evaluation programs with industry-leading benefits and transparent trading rules.",
    ),
    (
        "How long is the evaluation period?",
        "Our challenge accounts offer a 100-day evaluation period - that's 3x longer than most competitors who only provide 30-60 days. This extended timeframe gives you more confidence to develop and refine your trading strategy.",
    ),
    (
        "What profit splits do you offer?",
        "We offer industry-leading profit splits of 70-80% for traders, which is 15% higher than most competitors who typically offer 50-70%. Higher tiers receive better profit splits, rewarding successful performance.",
    ),
    (
        "What are the account sizes available?",
        "We offer three account tiers: $10,000 (Starter), $25,000 (Professional), and $50,000 (Expert) to suit different experience levels and trading styles. Each tier comes with progressively better benefits and profit splits.",
    ),
    (
        "What happens if I fail the challenge?",
        "Don't worry! Our $10K challenge comes with a free 50% retry option. Plus, with our extended 100-day period and 10% drawdown allowance, you have much better chances of success compared to other firms.",
    ),
    (
        "How do withdrawals work?",
        "Challenge account holders receive full fee refunds upon success, then move to funded status with regular withdrawal schedules. Funded traders can withdraw profits weekly with no minimum withdrawal amounts.",
    ),
    (
        "What trading platforms do you support?",
        "We support MT4/MT5, TradingView, and cTrader through our API integrations, giving you the flexibility to trade on your preferred platform with seamless execution and real-time data.",
    ),
    (
        "What are the drawdown rules?",
        "We use a standardized 10% maximum drawdown across all accounts, making our rules more predictable than competitors who vary their requirements. This includes both daily and overall drawdown limits.",
    ),
    (
        "What are the minimum trading days?",
        "You need to complete 3 days of profitable trading with at least 0.50% of your total account balance in profits to meet the minimum trading days requirement. This ensures consistent trading activity.",
    ),
    (
        "How does account scaling work?",
        "Challenge accounts can scale based on performance with faster scaling available for higher tier accounts. Successful traders can increase their account size and profit splits through consistent performance.",
    ),
    (
        "What makes FundedPro different from other prop firms?",
        "We offer 67% longer evaluation periods, up to 50% lower fees, higher profit splits, and focus on empowering traders globally with transparent, fair rules. Our technology and support are unmatched in the industry.",
    ),
    (
        "Is there any real financial risk during the challenge?",
        "No, challenge phases use simulated capital with full automation. There's no real financial risk until you're verified and move to a live funded account. Your challenge fee is fully refundable upon success.",
    ),
    (
        "What security measures do you have?",
        "We use AI-powered monitoring, biometric ID verification for payouts, encrypted transactions, and anti-cheat detection to ensure a secure trading environment. All data is protected with bank-level security.",
    ),
];

const SYNONYMS: &[(&str, &[&str])] = &[
    ("fundedpro", &["funded pro", "fundedpro", "funded pro trading"]),
    ("evaluation", &["challenge", "evaluation period", "assessment", "test"]),
    ("profit split", &["profit sharing", "split", "commission", "earnings"]),
    ("account size", &["account", "balance", "funding", "capital"]),
    ("drawdown", &["loss limit", "risk limit", "maximum loss"]),
    ("withdrawal", &["payout", "payment", "cash out", "money out"]),
    ("platform", &["trading platform", "software", "mt4", "mt5", "tradingview"]),
    ("scaling", &["account scaling", "increase account", "grow account"]),
    ("security", &["safety", "protection", "secure", "safe"]),
    ("risk", &["financial risk", "danger", "loss risk"]),
];

/// The question/answer table and synonym rules a matcher runs against.
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    pub entries: Vec<FaqEntry>,
    pub synonyms: Vec<SynonymRule>,
}

impl Corpus {
    pub fn new(entries: Vec<FaqEntry>, synonyms: Vec<SynonymRule>) -> Result<Self> {
        let corpus = Self { entries, synonyms };
        corpus.validate()?;
        Ok(corpus)
    }

    pub fn builtin() -> Self {
        Self {
            entries: FAQ_DATA
                .iter()
                .map(|(q, a)| FaqEntry::new(*q, *a))
                .collect(),
            synonyms: SYNONYMS
                .iter()
                .map(|(canonical, variants)| SynonymRule::new(*canonical, variants))
                .collect(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.entries.is_empty() {
            return Err(ChatError::InvalidCorpus("no entries".to_string()));
        }

        for (idx, entry) in self.entries.iter().enumerate() {
            if entry.question.trim().is_empty() {
                return Err(ChatError::InvalidCorpus(format!(
                    "entry {idx}: blank question"
                )));
            }
            if entry.answer.trim().is_empty() {
                return Err(ChatError::InvalidCorpus(format!("entry {idx}: blank answer")));
            }
        }

        for rule in &self.synonyms {
            if rule.canonical.trim().is_empty() {
                return Err(ChatError::InvalidCorpus(
                    "synonym rule with blank canonical term".to_string(),
                ));
            }
            // An empty variant is a substring of every query.
            if rule.variants.is_empty() || rule.variants.iter().any(|v| v.trim().is_empty()) {
                return Err(ChatError::InvalidCorpus(format!(
                    "synonym rule '{}': missing or blank variant",
                    rule.canonical
                )));
            }
        }

        Ok(())
    }
}

impl Default for Corpus {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_corpus_is_valid() {
        let corpus = Corpus::builtin();
        assert_eq!(corpus.entries.len(), 13);
        assert_eq!(corpus.synonyms.len(), 10);
        corpus.validate().expect("valid");
    }

    #[test]
    fn builtin_keeps_source_order() {
        let corpus = Corpus::builtin();
        assert_eq!(corpus.entries[0].question, "What is FundedPro?");
        assert_eq!(
            corpus.entries[12].question,
            "What security measures do you have?"
        );
        assert_eq!(corpus.synonyms[1].canonical, "evaluation");
    }

    #[test]
    fn rejects_empty_and_blank_input() {
        let err = Corpus::new(Vec::new(), Vec::new()).unwrap_err();
        assert!(matches!(err, ChatError::InvalidCorpus(_)));

        let err = Corpus::new(vec![FaqEntry::new("  ", "answer")], Vec::new()).unwrap_err();
        assert!(err.to_string().contains("blank question"));

        let err = Corpus::new(
            vec![FaqEntry::new("q", "a")],
            vec![SynonymRule::new("term", &["ok", " "])],
        )
        .unwrap_err();
        assert!(err.to_string().contains("blank variant"));
    }
}
