use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::conversation::ConversationSession;
use crate::corpus::{FALLBACK_MESSAGE, GREETING, QUICK_REPLIES};
use crate::matcher::FaqMatcher;
use crate::model::ConversationMessage;

pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Simulated "typing" time before the bot answers.
    pub reply_delay: Duration,
    pub greeting: String,
    /// Sent when the matcher finds nothing.
    pub fallback_message: String,
    pub quick_replies: Vec<String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            reply_delay: DEFAULT_REPLY_DELAY,
            greeting: GREETING.to_string(),
            fallback_message: FALLBACK_MESSAGE.to_string(),
            quick_replies: QUICK_REPLIES.iter().map(|q| q.to_string()).collect(),
        }
    }
}

/// Drives a [`ConversationSession`] on the tokio runtime.
///
/// Each accepted submission schedules one reply task that waits
/// `reply_delay`, asks the matcher and appends the answer (or the fallback).
/// Dropping the controller aborts a reply that is still pending.
pub struct ChatController {
    session: Arc<Mutex<ConversationSession>>,
    matcher: Arc<FaqMatcher>,
    config: ChatConfig,
    pending: Option<JoinHandle<()>>,
    version: Arc<watch::Sender<u64>>,
}

fn lock(session: &Mutex<ConversationSession>) -> MutexGuard<'_, ConversationSession> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ChatController {
    pub fn new(matcher: Arc<FaqMatcher>, config: ChatConfig) -> Self {
        let session = ConversationSession::new(config.greeting.clone(), config.quick_replies.clone());
        let (version, _) = watch::channel(session.messages().len() as u64);

        Self {
            session: Arc::new(Mutex::new(session)),
            matcher,
            config,
            pending: None,
            version: Arc::new(version),
        }
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Submits user text. Returns `false` when the input was ignored because
    /// it was blank or a reply is still pending.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&mut self, text: &str) -> bool {
        let turn = match lock(&self.session).begin_turn(text) {
            Some(turn) => turn,
            None => return false,
        };
        self.version.send_modify(|v| *v += 1);

        let session = Arc::clone(&self.session);
        let matcher = Arc::clone(&self.matcher);
        let version = Arc::clone(&self.version);
        let delay = self.config.reply_delay;
        let fallback = self.config.fallback_message.clone();

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let reply = match matcher.find_best_match(&turn.text) {
                Some(answer) => answer.to_string(),
                None => {
                    debug!(message_id = turn.message_id, "no confident match, sending fallback");
                    fallback
                }
            };

            if lock(&session).complete_turn(reply).is_some() {
                version.send_modify(|v| *v += 1);
            }
        }));

        true
    }

    /// Submits the quick reply at `index` exactly as if it had been typed.
    pub fn select_quick_reply(&mut self, index: usize) -> bool {
        let text = match lock(&self.session).quick_reply(index) {
            Some(text) => text.to_string(),
            None => return false,
        };
        self.submit(&text)
    }

    /// Waits until the pending reply, if any, has been appended.
    pub async fn settle(&mut self) {
        if let Some(handle) = self.pending.take() {
            if let Err(err) = handle.await {
                debug!(error = %err, "reply task did not complete");
            }
        }
    }

    /// Tears the conversation down, cancelling a pending reply so it never
    /// reaches the session.
    pub fn shutdown(mut self) {
        self.cancel_pending();
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
            debug!("pending reply cancelled");
        }
    }

    pub fn messages(&self) -> Vec<ConversationMessage> {
        lock(&self.session).messages().to_vec()
    }

    /// True while the bot is "composing" a reply.
    pub fn is_typing(&self) -> bool {
        lock(&self.session).is_awaiting_response()
    }

    pub fn quick_replies(&self) -> Vec<String> {
        lock(&self.session).quick_replies().to_vec()
    }

    /// Receiver that changes whenever a message is appended.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.version.subscribe()
    }
}

impl Drop for ChatController {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
