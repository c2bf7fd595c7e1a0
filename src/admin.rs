use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::admin_fsm::{AdminEvent, AdminFlow, AdminState};
use crate::error::{GiftGenixError, Result};
use crate::in_flight::{self, InFlight};
use crate::interfaces::notice::Notifier;
use crate::interfaces::service::{ApiKeyUpdate, Credentials, GenerationService};
use crate::notice::{Notice, SERVER_ERROR_TEXT};

/// Admin screen: log in, rotate the service API key, log out.
///
/// The session lives only as long as this value; nothing is persisted and
/// no token is issued.
pub struct AdminGate {
    service: Arc<dyn GenerationService>,
    notifier: Arc<dyn Notifier>,
    flow: RwLock<AdminFlow>,
    pending: AtomicBool,
}

impl AdminGate {
    pub fn new(service: Arc<dyn GenerationService>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            service,
            notifier,
            flow: RwLock::new(AdminFlow::new()),
            pending: AtomicBool::new(false),
        }
    }

    pub async fn state(&self) -> AdminState {
        self.flow.read().await.state()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state().await.is_authenticated()
    }

    async fn begin_request(&self, require: AdminState) -> Result<InFlight<'_>> {
        let flow = self.flow.write().await;
        let current = flow.state();
        if current != require {
            return Err(GiftGenixError::Session(match require {
                AdminState::LoggedOut => "already logged in".to_string(),
                AdminState::LoggedIn => "not logged in".to_string(),
            }));
        }
        if in_flight::is_set(&self.pending) {
            return Err(GiftGenixError::Session(
                "an admin request is already pending".to_string(),
            ));
        }
        Ok(InFlight::claim(&self.pending))
    }

    /// Applies `event` and releases the pending request.
    async fn finish_request(&self, pending: InFlight<'_>, event: AdminEvent) -> AdminState {
        let mut flow = self.flow.write().await;
        let state = match flow.apply(event) {
            Some(state) => state,
            None => {
                debug!(?event, "admin event ignored after state change");
                flow.state()
            }
        };
        drop(pending);
        state
    }

    /// Any reply other than `success: true`, including transport failures,
    /// leaves the gate logged out and raises the invalid-credentials notice.
    pub async fn login(&self, credentials: Credentials) -> Result<AdminState> {
        let pending = self.begin_request(AdminState::LoggedOut).await?;
        info!(username = %credentials.username, "admin login attempt");

        let accepted = match self.service.admin_login(&credentials).await {
            Ok(reply) => reply.success,
            Err(err) => {
                warn!(error = %err, "admin login request failed");
                false
            }
        };
        drop(credentials);

        let event = if accepted {
            AdminEvent::LoginAccepted
        } else {
            AdminEvent::LoginRejected
        };
        let state = self.finish_request(pending, event).await;
        if !accepted {
            self.notifier.notify(Notice::InvalidCredentials);
        }
        Ok(state)
    }

    /// Sends the new key and shows the service's message verbatim. The
    /// message is also returned; it does not tell success from failure.
    pub async fn update_key(&self, new_key: impl Into<String>) -> Result<String> {
        let pending = self.begin_request(AdminState::LoggedIn).await?;
        let update = ApiKeyUpdate::new(new_key);

        let message = match self.service.update_key(&update).await {
            Ok(reply) => reply.message,
            Err(err) => {
                warn!(error = %err, "api key update request failed");
                SERVER_ERROR_TEXT.to_string()
            }
        };
        drop(update);

        self.finish_request(pending, AdminEvent::KeyUpdated).await;
        self.notifier.notify(Notice::KeyUpdate(message.clone()));
        Ok(message)
    }

    /// Local reset only; the service is not contacted.
    pub async fn logout(&self) -> AdminState {
        let mut flow = self.flow.write().await;
        if flow.state().is_authenticated() {
            flow.apply(AdminEvent::Logout);
            info!("admin logged out");
        }
        flow.state()
    }
}
