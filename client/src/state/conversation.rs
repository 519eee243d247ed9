//! Conversation view model: message thread, input box, and prompt gallery.
//!
//! DESIGN
//! ======
//! All state sits behind `std::sync::Mutex` and no lock is held across an
//! `.await`, so a [`Conversation`] can be cloned into timer tasks (prompt
//! auto-submit) while the UI keeps reading it. Renderers call the accessors
//! and redraw; nothing here knows about a particular UI toolkit.
//!
//! TRADE-OFFS
//! ==========
//! Submits are not rejected while a request is outstanding. The in-flight
//! count only drives [`Conversation::is_loading`], which front ends use to
//! disable their send control, so "one request at a time" is best-effort.

#[cfg(test)]
#[path = "conversation_test.rs"]
mod conversation_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use protocol::{Message, Role};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::canned::CannedResponses;
use super::prompts::{PromptAction, PromptShortcut, default_prompts, resolve_action};
use crate::net::ChatTransport;

pub const INITIAL_SYSTEM_PROMPT: &str = "You are a helpful AI assistant.";
pub const GREETING: &str = "Hi Dear, Reader! What would you like to know?";
pub const ERROR_REPLY: &str = "Sorry, I encountered an error. Please try again.";
pub const MAX_INPUT_CHARS: usize = 1000;

/// Failure to hand a URL to the platform.
#[derive(Debug, thiserror::Error)]
#[error("failed to open {url}: {reason}")]
pub struct OpenLinkError {
    pub url: String,
    pub reason: String,
}

/// Opens external resources in a new browsing context.
pub trait LinkOpener: Send + Sync {
    /// # Errors
    ///
    /// Returns [`OpenLinkError`] when the platform refuses the URL.
    fn open(&self, url: &str) -> Result<(), OpenLinkError>;
}

#[derive(Clone, Debug)]
pub struct ConversationConfig {
    /// Include system-role messages in the history posted to the endpoint.
    pub send_system_messages: bool,
    /// Delays of the automatic submits fired after a submit shortcut.
    pub auto_submit_delays: Vec<Duration>,
    pub canned: CannedResponses,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            send_system_messages: true,
            auto_submit_delays: vec![Duration::from_millis(100), Duration::from_millis(300)],
            canned: CannedResponses::default(),
        }
    }
}

/// How a submit ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input was blank; nothing changed.
    Ignored,
    /// Answered locally from the canned table.
    Canned,
    /// Answered by the endpoint.
    Replied,
    /// The endpoint call failed; the apology message was appended.
    Failed,
}

/// Result of clicking a prompt shortcut.
#[derive(Debug)]
pub enum PromptDispatch {
    OpenedLink(String),
    /// Auto-submits scheduled, one handle per configured delay.
    Scheduled(Vec<JoinHandle<SubmitOutcome>>),
}

#[derive(Debug)]
struct ConversationState {
    messages: Vec<Message>,
    input: String,
    in_flight: usize,
    prompts: Vec<PromptShortcut>,
}

/// Client-side chat state machine.
#[derive(Clone)]
pub struct Conversation {
    state: Arc<Mutex<ConversationState>>,
    transport: Arc<dyn ChatTransport>,
    opener: Arc<dyn LinkOpener>,
    config: Arc<ConversationConfig>,
}

enum Plan {
    Canned(String),
    Remote(Vec<Message>),
}

impl Conversation {
    #[must_use]
    pub fn new(transport: Arc<dyn ChatTransport>, opener: Arc<dyn LinkOpener>) -> Self {
        Self::with_config(transport, opener, ConversationConfig::default())
    }

    #[must_use]
    pub fn with_config(
        transport: Arc<dyn ChatTransport>,
        opener: Arc<dyn LinkOpener>,
        config: ConversationConfig,
    ) -> Self {
        let state = ConversationState {
            messages: vec![Message::system(INITIAL_SYSTEM_PROMPT), Message::assistant(GREETING)],
            input: String::new(),
            in_flight: 0,
            prompts: default_prompts(),
        };
        Self { state: Arc::new(Mutex::new(state)), transport, opener, config: Arc::new(config) }
    }

    fn lock(&self) -> MutexGuard<'_, ConversationState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // =========================================================================
    // READS
    // =========================================================================

    /// Full history, system messages included.
    #[must_use]
    pub fn messages(&self) -> Vec<Message> {
        self.lock().messages.clone()
    }

    /// Messages a reader sees: everything except system-role entries.
    #[must_use]
    pub fn visible_messages(&self) -> Vec<Message> {
        self.lock()
            .messages
            .iter()
            .filter(|m| m.role != Role::System)
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn input(&self) -> String {
        self.lock().input.clone()
    }

    /// Character counter shown beside the input box, e.g. `"12/1000"`.
    #[must_use]
    pub fn input_counter(&self) -> String {
        format!("{}/{MAX_INPUT_CHARS}", self.lock().input.chars().count())
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.lock().in_flight > 0
    }

    #[must_use]
    pub fn prompts(&self) -> Vec<PromptShortcut> {
        self.lock().prompts.clone()
    }

    // =========================================================================
    // ACTIONS
    // =========================================================================

    pub fn set_input(&self, text: impl Into<String>) {
        self.lock().input = text.into();
    }

    /// Replace the prompt gallery. An empty list hides it.
    pub fn set_prompts(&self, prompts: Vec<PromptShortcut>) {
        self.lock().prompts = prompts;
    }

    /// Set the input and submit it.
    pub async fn submit_text(&self, text: impl Into<String>) -> SubmitOutcome {
        self.set_input(text);
        self.submit().await
    }

    /// Submit the current input.
    ///
    /// Blank input is ignored. Otherwise the user turn is appended and the
    /// input cleared; a canned reply is used when one matches, else the
    /// history goes to the transport. Exactly one assistant message is
    /// appended in every non-ignored case.
    pub async fn submit(&self) -> SubmitOutcome {
        let plan = {
            let mut state = self.lock();
            if state.input.trim().is_empty() {
                return SubmitOutcome::Ignored;
            }
            let text = std::mem::take(&mut state.input);
            let canned = self.config.canned.find(&text).map(str::to_owned);
            state.messages.push(Message::user(text));
            state.in_flight += 1;
            match canned {
                Some(reply) => Plan::Canned(reply),
                None => Plan::Remote(self.outgoing(&state.messages)),
            }
        };

        let (reply, outcome) = match plan {
            Plan::Canned(reply) => {
                debug!("conversation: answered from canned table");
                (Message::assistant(reply), SubmitOutcome::Canned)
            }
            Plan::Remote(history) => match self.transport.send(&history).await {
                Ok(reply) => (reply, SubmitOutcome::Replied),
                Err(e) => {
                    warn!(error = %e, "conversation: chat request failed");
                    (Message::assistant(ERROR_REPLY), SubmitOutcome::Failed)
                }
            },
        };

        let mut state = self.lock();
        state.messages.push(reply);
        state.in_flight = state.in_flight.saturating_sub(1);
        outcome
    }

    fn outgoing(&self, messages: &[Message]) -> Vec<Message> {
        if self.config.send_system_messages {
            messages.to_vec()
        } else {
            messages
                .iter()
                .filter(|m| m.role != Role::System)
                .cloned()
                .collect()
        }
    }

    /// React to a click on the shortcut labelled `label`.
    ///
    /// Link shortcuts open their URL and leave the chat untouched. Submit
    /// shortcuts (and unknown labels) fill the input and schedule one
    /// auto-submit per configured delay. A later timer finds the input
    /// already cleared and is ignored unless it was refilled meanwhile.
    ///
    /// # Errors
    ///
    /// Returns [`OpenLinkError`] when a link shortcut cannot be opened.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime when timers are scheduled.
    pub fn select_prompt(&self, label: &str) -> Result<PromptDispatch, OpenLinkError> {
        let action = resolve_action(&self.lock().prompts, label);
        match action {
            PromptAction::OpenLink { url } => {
                self.opener.open(&url)?;
                Ok(PromptDispatch::OpenedLink(url))
            }
            PromptAction::Submit { text } => {
                self.set_input(text);
                let handles = self
                    .config
                    .auto_submit_delays
                    .iter()
                    .map(|&delay| {
                        let this = self.clone();
                        tokio::spawn(async move {
                            tokio::time::sleep(delay).await;
                            this.submit().await
                        })
                    })
                    .collect();
                Ok(PromptDispatch::Scheduled(handles))
            }
        }
    }

    /// Clear the visible thread, keeping only system messages.
    pub fn refresh(&self) {
        self.lock().messages.retain(|m| m.role == Role::System);
    }
}
