// SPDX-FileCopyrightText: 2026 Zenchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The conversation controller: owns the log, drives the request lifecycle
//! and persists after every mutation.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use zenchat_core::{
    AttachmentKind, BotMessage, ConversationLog, Message, ProviderAdapter, Theme, UserMessage,
    ZenError,
};

use crate::attachment::{AttachmentPreview, PendingAttachment, read_attachment};
use crate::display::file_marker;
use crate::formatter::format_reply;
use crate::persona::Persona;
use crate::projector::project;
use crate::store::ConversationStore;

/// Reply used when the endpoint answered without usable text.
pub const FALLBACK_REPLY: &str =
    "Sorry, I'm having a little trouble understanding. Could you try rephrasing?";

/// Reply used when the request failed.
pub const ERROR_REPLY: &str = "Error: Could not get response.";

/// Whether a completion request is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    /// Ready to accept a submission.
    Idle,
    /// Awaiting a reply; further submissions are rejected.
    Pending,
}

impl std::fmt::Display for RequestState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestState::Idle => write!(f, "idle"),
            RequestState::Pending => write!(f, "pending"),
        }
    }
}

/// What a call to [`ConversationController::submit`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// No text and no attachment: nothing was appended.
    Ignored,
    /// Another request was in flight: nothing was appended.
    Busy,
    /// The endpoint answered; the reply was appended.
    Replied(BotMessage),
    /// The request failed; the error reply was appended.
    Failed(BotMessage),
    /// The conversation was reset while the request was in flight.
    Discarded,
}

struct ControllerState {
    log: ConversationLog,
    request: RequestState,
    attachment: Option<PendingAttachment>,
    theme: Theme,
    /// Bumped on every reset so replies to an older conversation are dropped.
    epoch: u64,
    in_flight: Option<CancellationToken>,
}

/// Owns the conversation log and the single in-flight request.
///
/// All methods take `&self`; the controller is meant to be shared behind an
/// `Arc` between the input loop and anything that may reset it.
pub struct ConversationController {
    provider: Arc<dyn ProviderAdapter + Send + Sync>,
    store: ConversationStore,
    persona: Persona,
    state: Mutex<ControllerState>,
    attach_gate: Mutex<()>,
}

impl ConversationController {
    /// Creates a controller, restoring the stored log and theme.
    ///
    /// A missing or corrupt log seeds the greeting. The theme comes from the
    /// stored preference, else `default_theme`.
    pub async fn new(
        provider: Arc<dyn ProviderAdapter + Send + Sync>,
        store: ConversationStore,
        persona: Persona,
        default_theme: Theme,
    ) -> Self {
        let log = match store.load_log().await {
            Some(log) => log,
            None => ConversationLog::seeded(&persona.greeting),
        };
        let theme = store.load_theme().await.unwrap_or(default_theme);

        info!(
            provider = provider.name(),
            messages = log.len(),
            theme = %theme,
            "conversation controller ready"
        );

        Self {
            provider,
            store,
            persona,
            state: Mutex::new(ControllerState {
                log,
                request: RequestState::Idle,
                attachment: None,
                theme,
                epoch: 0,
                in_flight: None,
            }),
            attach_gate: Mutex::new(()),
        }
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    /// Snapshot of the current log.
    pub async fn log(&self) -> ConversationLog {
        self.state.lock().await.log.clone()
    }

    pub async fn request_state(&self) -> RequestState {
        self.state.lock().await.request
    }

    /// Sends `input` together with the pending attachment, if any.
    ///
    /// Appends the user message, awaits the endpoint and appends the reply.
    /// Every failure is absorbed into the returned outcome.
    pub async fn submit(&self, input: &str) -> SubmitOutcome {
        let (request, token, epoch) = {
            let mut state = self.state.lock().await;
            if state.request == RequestState::Pending {
                debug!("submit ignored while a request is in flight");
                return SubmitOutcome::Busy;
            }
            if input.trim().is_empty() && state.attachment.is_none() {
                return SubmitOutcome::Ignored;
            }

            let attachment = state.attachment.take().map(|pending| pending.encode());
            let content = match &attachment {
                Some(att) if att.kind == AttachmentKind::Document => {
                    format!("{}{input}", file_marker(&att.name))
                }
                _ => input.to_string(),
            };
            state.log.push(Message::User(UserMessage {
                content,
                attachment,
            }));
            self.persist(&state.log).await;

            let token = CancellationToken::new();
            state.request = RequestState::Pending;
            state.in_flight = Some(token.clone());

            let request = project(state.log.messages(), &self.persona.system_instruction);
            (request, token, state.epoch)
        };

        debug!(turns = request.turns.len(), "sending completion request");
        let result = tokio::select! {
            _ = token.cancelled() => None,
            result = self.provider.complete(request) => Some(result),
        };

        let mut state = self.state.lock().await;
        let Some(result) = result else {
            debug!("completion request cancelled by reset");
            return SubmitOutcome::Discarded;
        };
        if state.epoch != epoch {
            debug!("reply settled after reset, discarding");
            return SubmitOutcome::Discarded;
        }
        state.request = RequestState::Idle;
        state.in_flight = None;

        let (bot, failed) = match result {
            Ok(reply) => {
                let text = reply
                    .text
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| {
                        debug!("reply carried no text, using fallback");
                        FALLBACK_REPLY.to_string()
                    });
                let spans = format_reply(&text);
                (BotMessage {
                    content: text,
                    spans,
                }, false)
            }
            Err(e) => {
                warn!(error = %e, "completion request failed");
                (BotMessage::plain(ERROR_REPLY), true)
            }
        };

        state.log.push(Message::Bot(bot.clone()));
        self.persist(&state.log).await;
        debug!(messages = state.log.len(), "reply appended");

        if failed {
            SubmitOutcome::Failed(bot)
        } else {
            SubmitOutcome::Replied(bot)
        }
    }

    /// Replaces the log with the seeded greeting and clears the stored log.
    ///
    /// An in-flight request is cancelled and its reply, should it still
    /// settle, is discarded. A pending attachment is kept.
    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        if let Some(token) = state.in_flight.take() {
            token.cancel();
            debug!("cancelled in-flight request");
        }
        state.epoch += 1;
        state.request = RequestState::Idle;
        state.log = ConversationLog::seeded(&self.persona.greeting);

        if let Err(e) = self.store.clear_log().await {
            warn!(error = %e, "failed to clear stored conversation");
        }
        info!("conversation reset");
    }

    /// Reads `path` and makes it the pending attachment.
    ///
    /// On failure any previously pending attachment is discarded too. Only one
    /// read may be outstanding at a time.
    pub async fn attach(&self, path: &Path) -> Result<AttachmentPreview, ZenError> {
        let Ok(_gate) = self.attach_gate.try_lock() else {
            return Err(ZenError::Internal(
                "another attachment is still being read".into(),
            ));
        };

        match read_attachment(path).await {
            Ok(pending) => Ok(self.set_attachment(pending).await),
            Err(e) => {
                warn!(error = %e, "attachment read failed, discarding");
                self.state.lock().await.attachment = None;
                Err(e)
            }
        }
    }

    /// Makes already-read content the pending attachment.
    pub async fn set_attachment(&self, pending: PendingAttachment) -> AttachmentPreview {
        let preview = pending.preview();
        debug!(kind = ?pending.kind(), bytes = pending.len(), "attachment pending");
        self.state.lock().await.attachment = Some(pending);
        preview
    }

    /// Drops the pending attachment. Returns whether there was one.
    pub async fn detach(&self) -> bool {
        self.state.lock().await.attachment.take().is_some()
    }

    pub async fn pending_attachment(&self) -> Option<AttachmentPreview> {
        self.state
            .lock()
            .await
            .attachment
            .as_ref()
            .map(PendingAttachment::preview)
    }

    pub async fn theme(&self) -> Theme {
        self.state.lock().await.theme
    }

    /// Switches between light and dark and persists the choice.
    pub async fn toggle_theme(&self) -> Theme {
        let mut state = self.state.lock().await;
        state.theme = state.theme.toggled();
        if let Err(e) = self.store.save_theme(state.theme).await {
            warn!(error = %e, "failed to persist theme");
        }
        state.theme
    }

    async fn persist(&self, log: &ConversationLog) {
        if let Err(e) = self.store.save_log(log).await {
            warn!(error = %e, "failed to persist conversation");
        }
    }
}
