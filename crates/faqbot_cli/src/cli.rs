use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use faqbot_core::DEFAULT_REQUIRED_PASS_RATE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "faqbot", version, about = "FundedPro FAQ assistant")]
pub struct Cli {
    /// FAQ entries (.jsonl) replacing the built-in corpus. Requires --synonyms.
    #[arg(long, global = true)]
    pub corpus: Option<PathBuf>,

    /// Synonym rules (.json) used with --corpus.
    #[arg(long, global = true)]
    pub synonyms: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Interactive chat session.
    Chat {
        #[arg(long, default_value = "1s")]
        reply_delay: humantime::Duration,
    },
    /// Answer a single question and exit.
    Ask {
        #[arg(long)]
        question: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Run matcher regression cases.
    Eval {
        #[arg(long)]
        cases: PathBuf,
        #[arg(long, default_value_t = DEFAULT_REQUIRED_PASS_RATE)]
        min_pass_rate: f32,
    },
    /// Write the built-in corpus to files for editing.
    ExportCorpus {
        #[arg(long)]
        entries_out: PathBuf,
        #[arg(long)]
        synonyms_out: PathBuf,
    },
}

impl Cli {
    pub fn validate(&self) -> Result<(), String> {
        if self.corpus.is_some() != self.synonyms.is_some() {
            return Err("--corpus and --synonyms must both be provided".to_string());
        }

        match &self.command {
            Commands::Ask { question, .. } if question.trim().is_empty() => {
                Err("question must not be blank".to_string())
            }
            Commands::Eval { min_pass_rate, .. } if !(0.0..=1.0).contains(min_pass_rate) => {
                Err("min-pass-rate must be between 0 and 1".to_string())
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_chat_defaults() {
        let cli = Cli::try_parse_from(["faqbot", "chat"]).expect("parse");
        match cli.command {
            Commands::Chat { reply_delay } => {
                assert_eq!(*reply_delay.as_ref(), std::time::Duration::from_secs(1));
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn parses_ask_with_json_format() {
        let cli = Cli::try_parse_from([
            "faqbot",
            "ask",
            "--question",
            "What is FundedPro?",
            "--format",
            "json",
        ])
        .expect("parse");
        match cli.command {
            Commands::Ask { question, format } => {
                assert_eq!(question, "What is FundedPro?");
                assert_eq!(format, OutputFormat::Json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_half_a_corpus() {
        let cli = Cli::try_parse_from(["faqbot", "--corpus", "faq.jsonl", "chat"]).expect("parse");
        assert_eq!(
            cli.validate().unwrap_err(),
            "--corpus and --synonyms must both be provided".to_string()
        );
    }

    #[test]
    fn corpus_flags_are_global() {
        let cli = Cli::try_parse_from([
            "faqbot",
            "--corpus",
            "faq.jsonl",
            "ask",
            "--question",
            "x",
            "--synonyms",
            "synonyms.json",
        ])
        .expect("parse");
        assert_eq!(cli.corpus, Some(PathBuf::from("faq.jsonl")));
        assert_eq!(cli.synonyms, Some(PathBuf::from("synonyms.json")));
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn rejects_blank_question() {
        let cli = Cli::try_parse_from(["faqbot", "ask", "--question", "   "]).expect("parse");
        assert_eq!(
            cli.validate().unwrap_err(),
            "question must not be blank".to_string()
        );
    }

    #[test]
    fn rejects_out_of_range_pass_rate() {
        let cli = Cli::try_parse_from([
            "faqbot",
            "eval",
            "--cases",
            "cases.json",
            "--min-pass-rate",
            "1.5",
        ])
        .expect("parse");
        assert!(cli.validate().is_err());
    }
}
