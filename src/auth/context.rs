use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::api::{Ack, RegisterPatient, UserProfile};
use crate::client::ApiClient;
use crate::error::AppResult;
use crate::session::{Session, SessionStore};

use super::state::AuthState;

/// Result of a login attempt. Failures carry the backend's human-readable
/// message; they never surface as errors and never touch the stored session.
#[derive(Debug, Clone)]
pub enum LoginOutcome {
    Success(UserProfile),
    Failure { message: String },
}

/// Process-wide authentication service, constructed once at startup and
/// shared by `Arc`. The state lives in a watch channel so any component can
/// read the current value or await the `Unknown` -> terminal transition.
/// The only writers are `check_auth`, `login` and `logout`.
pub struct AuthContext {
    client: ApiClient,
    store: Arc<SessionStore>,
    state: watch::Sender<AuthState>,
}

impl AuthContext {
    pub fn new(client: ApiClient, store: Arc<SessionStore>) -> Arc<Self> {
        let (state, _) = watch::channel(AuthState::Unknown);
        Arc::new(Self { client, store, state })
    }

    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.state.borrow().user().cloned()
    }

    /// Resolve the initial `Unknown` state exactly once at process start.
    /// No stored token means `Anonymous` without touching the network; a
    /// stored token is validated against the profile endpoint, and any
    /// failure clears the store. Subsequent calls are no-ops.
    pub async fn check_auth(&self) {
        if !self.state.borrow().is_loading() {
            debug!("check_auth called after state already resolved, ignoring");
            return;
        }
        let Some(_session) = self.store.get() else {
            self.state.send_replace(AuthState::Anonymous);
            return;
        };
        match self.client.profile().await {
            Ok(user) => {
                info!("restored session for {} ({:?})", user.username, user.role);
                self.state.send_replace(AuthState::Authenticated(user));
            }
            Err(e) => {
                debug!("stored session rejected: {e}");
                // the client may already have cleared it after a failed
                // refresh exchange; clearing again is a no-op
                self.store.clear();
                self.state.send_replace(AuthState::Anonymous);
            }
        }
    }

    /// Post credentials; on success persist both tokens and publish the
    /// authenticated user. Role-based redirect is the caller's job, via
    /// `routing::landing_path`.
    pub async fn login(&self, email: &str, password: &str) -> LoginOutcome {
        match self.client.login(email, password).await {
            Ok(data) => {
                self.store.set(Session {
                    access_token: data.access,
                    refresh_token: data.refresh,
                });
                info!("logged in as {} ({:?})", data.user.username, data.user.role);
                self.state.send_replace(AuthState::Authenticated(data.user.clone()));
                LoginOutcome::Success(data.user)
            }
            Err(e) => {
                let message = e.message().trim().to_string();
                let message = if message.is_empty() { "Login failed".to_string() } else { message };
                LoginOutcome::Failure { message }
            }
        }
    }

    /// Best-effort backend invalidation of the refresh token, then an
    /// unconditional local logout. Always ends `Anonymous` with no tokens.
    pub async fn logout(&self) {
        if let Some(session) = self.store.get() {
            if let Err(e) = self.client.logout(&session.refresh_token).await {
                warn!("logout request failed (proceeding locally): {e}");
            }
        }
        self.store.clear();
        self.state.send_replace(AuthState::Anonymous);
    }

    /// Self-service patient signup; the account stays unverified until an
    /// admin approves it, so no session is created here.
    pub async fn register_patient(&self, reg: &RegisterPatient) -> AppResult<Ack> {
        self.client.register_patient(reg).await
    }
}
