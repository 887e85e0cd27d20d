use std::io::Write;

use anyhow::Result;
use chrono::Local;
use faqbot_core::{ConversationMessage, EvalSummary, MatchPass, MatchResult, Sender};
use serde::Serialize;

use crate::cli::OutputFormat;

fn pass_name(pass: MatchPass) -> &'static str {
    match pass {
        MatchPass::Direct => "direct",
        MatchPass::Keyword => "keyword",
        MatchPass::NoMatch => "no_match",
    }
}

#[derive(Serialize)]
struct JsonAnswer<'a> {
    question: &'a str,
    reply: &'a str,
    #[serde(flatten)]
    result: &'a MatchResult,
}

pub fn print_answer(
    out: &mut impl Write,
    format: OutputFormat,
    question: &str,
    result: &MatchResult,
    fallback: &str,
) -> Result<()> {
    let reply = result.answer.as_deref().unwrap_or(fallback);

    match format {
        OutputFormat::Text => {
            writeln!(
                out,
                "pass={} score={} entry={}",
                pass_name(result.pass),
                result.score,
                result
                    .entry_index
                    .map(|i| i.to_string())
                    .unwrap_or_else(|| "null".to_string())
            )?;
            writeln!(out, "reply={reply}")?;
        }
        OutputFormat::Json => {
            let json = JsonAnswer {
                question,
                reply,
                result,
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&json)?)?;
        }
    }

    Ok(())
}

pub fn print_summary(out: &mut impl Write, summary: &EvalSummary, required: f32) -> Result<()> {
    writeln!(
        out,
        "total={} passed={} failed={} pass_rate={:.4} required={:.4} meets_threshold={}",
        summary.total,
        summary.passed,
        summary.failed,
        summary.pass_rate,
        required,
        summary.meets(required)
    )?;

    for o in &summary.outcomes {
        writeln!(
            out,
            "case={} passed={} pass={} entry={} score={} latency={:.3}ms",
            o.case_id,
            o.passed,
            pass_name(o.pass),
            o.entry_index
                .map(|i| i.to_string())
                .unwrap_or_else(|| "null".to_string()),
            o.score,
            o.latency_ms
        )?;
    }

    Ok(())
}

pub fn print_message(out: &mut impl Write, message: &ConversationMessage) -> Result<()> {
    let who = match message.sender {
        Sender::Bot => "FundedPro Assistant",
        Sender::User => "You",
    };
    let time = message.timestamp.with_timezone(&Local).format("%H:%M");
    writeln!(out, "[{time}] {who}: {}", message.text)?;
    Ok(())
}

pub fn print_quick_replies(out: &mut impl Write, replies: &[String]) -> Result<()> {
    if replies.is_empty() {
        return Ok(());
    }
    writeln!(out, "Quick questions:")?;
    for (idx, reply) in replies.iter().enumerate() {
        writeln!(out, "  /{} {reply}", idx + 1)?;
    }
    Ok(())
}
