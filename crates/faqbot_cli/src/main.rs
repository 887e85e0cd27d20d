mod cli;
mod output;
mod repl;

use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use faqbot_core::{
    evaluate_cases, load_corpus, save_entries_jsonl, save_synonyms_json, ChatConfig, Corpus,
    EvalCase, FaqMatcher, FALLBACK_MESSAGE,
};
use tracing::info;

use cli::{Cli, Commands};

fn load_matcher(cli: &Cli) -> Result<FaqMatcher> {
    let corpus = match (&cli.corpus, &cli.synonyms) {
        (Some(entries), Some(synonyms)) => {
            let corpus = load_corpus(entries, synonyms).with_context(|| {
                format!(
                    "load corpus from {} and {}",
                    entries.display(),
                    synonyms.display()
                )
            })?;
            info!(entries = corpus.entries.len(), "loaded corpus from disk");
            corpus
        }
        _ => Corpus::builtin(),
    };
    Ok(FaqMatcher::new(corpus))
}

fn read_eval_cases_json(path: &Path) -> Result<Vec<EvalCase>> {
    let file = std::fs::File::open(path).with_context(|| format!("open {}", path.display()))?;
    let cases: Vec<EvalCase> =
        serde_json::from_reader(io::BufReader::new(file)).context("parse eval cases json")?;
    Ok(cases)
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    cli.validate().map_err(anyhow::Error::msg)?;

    match &cli.command {
        Commands::Chat { reply_delay } => {
            let matcher = Arc::new(load_matcher(&cli)?);
            let config = ChatConfig {
                reply_delay: *reply_delay.as_ref(),
                ..ChatConfig::default()
            };
            repl::run_chat(matcher, config).await?;
        }
        Commands::Ask { question, format } => {
            let matcher = load_matcher(&cli)?;
            let result = matcher.decide(question);
            output::print_answer(
                &mut io::stdout(),
                *format,
                question.trim(),
                &result,
                FALLBACK_MESSAGE,
            )?;
        }
        Commands::Eval {
            cases,
            min_pass_rate,
        } => {
            let matcher = load_matcher(&cli)?;
            let cases = read_eval_cases_json(cases)?;
            let summary = evaluate_cases(&matcher, &cases);
            output::print_summary(&mut io::stdout(), &summary, *min_pass_rate)?;

            if !summary.meets(*min_pass_rate) {
                anyhow::bail!(
                    "pass rate {:.4} below required {:.4}",
                    summary.pass_rate,
                    min_pass_rate
                );
            }
        }
        Commands::ExportCorpus {
            entries_out: entries,
            synonyms_out: synonyms,
        } => {
            let corpus = Corpus::builtin();
            save_entries_jsonl(entries, &corpus.entries)
                .with_context(|| format!("write {}", entries.display()))?;
            save_synonyms_json(synonyms, &corpus.synonyms)
                .with_context(|| format!("write {}", synonyms.display()))?;
            println!(
                "entries={} synonyms={} entries_path={} synonyms_path={}",
                corpus.entries.len(),
                corpus.synonyms.len(),
                entries.display(),
                synonyms.display()
            );
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .ok();

    if let Err(err) = run().await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
