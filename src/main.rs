use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use carelink::auth::{AuthContext, AuthState};
use carelink::client::ApiClient;
use carelink::config::ClientConfig;
use carelink::routing::landing_path;
use carelink::session::SessionStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Init logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();
    fmt().with_env_filter(filter).init();

    // Startup banner at info level so something always prints at default verbosity
    let rust_log = std::env::var("RUST_LOG").unwrap_or_else(|_| "<unset>".to_string());
    let cfg = ClientConfig::from_env()?;
    info!(
        target: "carelink",
        "carelink starting: RUST_LOG='{}', api_base='{}', session_file='{}'",
        rust_log,
        cfg.api_base,
        cfg.session_file.display()
    );

    let store = Arc::new(SessionStore::open(&cfg.session_file));
    let client = ApiClient::new(&cfg, store.clone())?;
    let auth = AuthContext::new(client, store);

    auth.check_auth().await;
    match auth.state() {
        AuthState::Authenticated(user) => {
            info!(
                target: "carelink",
                "session restored: {} ({:?}), landing at {}",
                user.display_name(),
                user.role,
                landing_path(user.role)
            );
        }
        AuthState::Anonymous => {
            info!(target: "carelink", "no valid session, login required");
        }
        AuthState::Unknown => unreachable!("check_auth resolves the state"),
    }
    Ok(())
}
