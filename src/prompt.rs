//! Prompt submission: one generation request per user submission.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::in_flight::{self, InFlight};
use crate::interfaces::notice::Notifier;
use crate::interfaces::service::{GenerateRequest, GenerateResponse, GenerationService};
use crate::markdown::{render_html, render_terminal, TerminalStyle};
use crate::notice::{Notice, SERVER_ERROR_TEXT};

pub const SUBMIT_LABEL: &str = "Generate Gift Ideas";
pub const LOADING_LABEL: &str = "Generating Ideas...";

/// What the page shows. `result_text` is empty when there is nothing to show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptState {
    pub text: String,
    pub is_loading: bool,
    pub result_text: String,
}

impl PromptState {
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn can_submit(&self) -> bool {
        !self.is_loading
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_loading {
            LOADING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    pub fn has_result(&self) -> bool {
        !self.result_text.is_empty()
    }
}

/// Which part of the reply ended up in `result_text`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultSource {
    Result,
    /// The service answered successfully but reported its own error. It is
    /// displayed exactly like a result.
    ServiceError,
    /// Neither field was present; nothing is displayed.
    Empty,
    TransportError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Empty prompt; the user was notified and nothing was sent.
    Rejected,
    /// A request is already pending; the submission was ignored.
    Busy,
    Completed(ResultSource),
}

fn resolve_reply(reply: GenerateResponse) -> (String, ResultSource) {
    let result = reply.result.filter(|value| !value.is_empty());
    let error = reply.error.filter(|value| !value.is_empty());
    match (result, error) {
        (Some(result), _) => (result, ResultSource::Result),
        (None, Some(error)) => (error, ResultSource::ServiceError),
        (None, None) => (String::new(), ResultSource::Empty),
    }
}

/// Text the user typed and the text shown for the last reply.
#[derive(Default)]
struct Draft {
    text: String,
    result_text: String,
}

pub struct PromptController {
    service: Arc<dyn GenerationService>,
    notifier: Arc<dyn Notifier>,
    draft: RwLock<Draft>,
    loading: AtomicBool,
}

impl PromptController {
    pub fn new(service: Arc<dyn GenerationService>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            service,
            notifier,
            draft: RwLock::new(Draft::default()),
            loading: AtomicBool::new(false),
        }
    }

    pub async fn state(&self) -> PromptState {
        let draft = self.draft.read().await;
        PromptState {
            text: draft.text.clone(),
            is_loading: in_flight::is_set(&self.loading),
            result_text: draft.result_text.clone(),
        }
    }

    pub async fn is_loading(&self) -> bool {
        in_flight::is_set(&self.loading)
    }

    pub async fn result_text(&self) -> String {
        self.draft.read().await.result_text.clone()
    }

    pub async fn set_text(&self, text: impl Into<String>) {
        self.draft.write().await.text = text.into();
    }

    /// Replaces the prompt text and submits it. Ignored entirely, text
    /// included, while a request is pending.
    pub async fn submit_text(&self, text: impl Into<String>) -> SubmitOutcome {
        self.submit_with(Some(text.into())).await
    }

    /// Sends the current prompt text. While a request is pending further
    /// submissions are ignored.
    pub async fn submit(&self) -> SubmitOutcome {
        self.submit_with(None).await
    }

    async fn submit_with(&self, text: Option<String>) -> SubmitOutcome {
        let (prompt, _loading) = {
            let mut draft = self.draft.write().await;
            if in_flight::is_set(&self.loading) {
                debug!("submission ignored, request already pending");
                return SubmitOutcome::Busy;
            }
            if let Some(text) = text {
                draft.text = text;
            }
            if draft.text.trim().is_empty() {
                drop(draft);
                self.notifier.notify(Notice::EmptyPrompt);
                return SubmitOutcome::Rejected;
            }
            draft.result_text.clear();
            (draft.text.clone(), InFlight::claim(&self.loading))
        };

        info!(chars = prompt.chars().count(), "submitting prompt");
        let reply = self.service.generate(&GenerateRequest { prompt }).await;
        let (text, source) = match reply {
            Ok(reply) => resolve_reply(reply),
            Err(err) => {
                warn!(error = %err, "generate request failed");
                (SERVER_ERROR_TEXT.to_string(), ResultSource::TransportError)
            }
        };

        self.draft.write().await.result_text = text;
        debug!(?source, "prompt request finished");
        SubmitOutcome::Completed(source)
    }

    pub async fn rendered_html(&self) -> Option<String> {
        let draft = self.draft.read().await;
        (!draft.result_text.is_empty()).then(|| render_html(&draft.result_text))
    }

    pub async fn rendered_terminal(&self, style: TerminalStyle) -> Option<String> {
        let draft = self.draft.read().await;
        (!draft.result_text.is_empty()).then(|| render_terminal(&draft.result_text, style))
    }
}
