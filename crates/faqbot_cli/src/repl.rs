use std::io::{self, Write};
use std::sync::Arc;

use anyhow::Result;
use faqbot_core::{ChatConfig, ChatController, FaqMatcher};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

use crate::output::{print_message, print_quick_replies};

const HELP: &str = "Commands: /<n> pick a quick question, /history, /reset, /help, exit";

#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Empty,
    Exit,
    Help,
    History,
    Reset,
    QuickReply(usize),
    Message(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Input::Empty;
    }
    if matches!(trimmed.to_ascii_lowercase().as_str(), "exit" | "quit") {
        return Input::Exit;
    }

    match trimmed {
        "/help" => Input::Help,
        "/history" => Input::History,
        "/reset" => Input::Reset,
        cmd => match cmd.strip_prefix('/').and_then(|n| n.parse::<usize>().ok()) {
            Some(n) if n > 0 => Input::QuickReply(n - 1),
            _ => Input::Message(trimmed),
        },
    }
}

/// Prints messages the host has not shown yet and returns the new count.
fn flush_new(out: &mut impl Write, chat: &ChatController, shown: usize) -> Result<usize> {
    let messages = chat.messages();
    for message in messages.iter().skip(shown) {
        print_message(out, message)?;
    }
    Ok(messages.len())
}

fn mount(
    out: &mut impl Write,
    matcher: &Arc<FaqMatcher>,
    config: &ChatConfig,
) -> Result<(ChatController, usize)> {
    let chat = ChatController::new(Arc::clone(matcher), config.clone());
    let shown = flush_new(out, &chat, 0)?;
    print_quick_replies(out, &chat.quick_replies())?;
    Ok((chat, shown))
}

pub async fn run_chat(matcher: Arc<FaqMatcher>, config: ChatConfig) -> Result<()> {
    let mut out = io::stdout();
    let mut rl = DefaultEditor::new()?;
    let (mut chat, mut shown) = mount(&mut out, &matcher, &config)?;

    loop {
        let line = match rl.readline("you> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };

        let accepted = match parse_input(&line) {
            Input::Empty => continue,
            Input::Exit => break,
            Input::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            Input::History => {
                shown = flush_new(&mut out, &chat, 0)?;
                continue;
            }
            Input::Reset => {
                debug!("remounting conversation");
                (chat, shown) = mount(&mut out, &matcher, &config)?;
                continue;
            }
            Input::QuickReply(idx) => {
                rl.add_history_entry(line.trim()).ok();
                let accepted = chat.select_quick_reply(idx);
                if !accepted {
                    writeln!(out, "No quick question /{} available.", idx + 1)?;
                }
                accepted
            }
            Input::Message(text) => {
                rl.add_history_entry(text).ok();
                chat.submit(text)
            }
        };

        if !accepted {
            continue;
        }

        shown = flush_new(&mut out, &chat, shown)?;
        if chat.is_typing() {
            writeln!(out, "FundedPro Assistant is typing...")?;
            out.flush()?;
        }
        chat.settle().await;
        shown = flush_new(&mut out, &chat, shown)?;
    }

    chat.shutdown();
    Ok(())
}
