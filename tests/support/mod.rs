//! Shared mock hospital backend and fixtures for the integration suite.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use carelink::client::ApiClient;
use carelink::config::ClientConfig;
use carelink::session::{Session, SessionStore};

/// Bind the mock backend on an ephemeral port and return the `/api` base URL.
pub async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind mock backend");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock backend serve");
    });
    format!("http://{addr}/api")
}

/// A session store backed by a fresh temp dir. Keep the dir alive for the
/// duration of the test.
pub fn temp_store() -> (tempfile::TempDir, Arc<SessionStore>) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = Arc::new(SessionStore::open(dir.path().join("session.json")));
    (dir, store)
}

/// Like [`temp_store`] but pre-seeded with a token pair.
pub fn seeded_store(access: &str, refresh: &str) -> (tempfile::TempDir, Arc<SessionStore>) {
    let (dir, store) = temp_store();
    store.set(Session { access_token: access.into(), refresh_token: refresh.into() });
    (dir, store)
}

pub fn make_client(base: &str, store: Arc<SessionStore>) -> ApiClient {
    let cfg = ClientConfig::new(base, "unused-session.json").expect("config");
    ApiClient::new(&cfg, store).expect("client")
}

pub fn ok_data(data: Value) -> Value {
    json!({ "success": true, "data": data })
}

pub fn user_json(role: &str) -> Value {
    json!({
        "id": 1,
        "username": "jdoe",
        "email": "jdoe@hospital.test",
        "first_name": "Jane",
        "last_name": "Doe",
        "role": role,
        "phone": null,
        "department": null
    })
}
