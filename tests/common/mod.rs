// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process mock of the stats backend auth endpoints.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Form, Json, Router,
};
use courtside::config::Config;
use courtside::services::SessionService;
use courtside::storage::{keys, MemoryTokenStore, TokenStore};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

/// How `GET /auth/me` answers.
#[derive(Debug, Clone, Copy)]
#[allow(dead_code)]
pub enum MeBehavior {
    Role(&'static str),
    Status(u16),
    Garbage,
    Slow(Duration),
}

pub struct MockState {
    pub me: Mutex<MeBehavior>,
    pub me_hits: AtomicUsize,
    pub last_auth: Mutex<Option<String>>,
}

pub struct MockBackend {
    pub addr: SocketAddr,
    pub state: Arc<MockState>,
}

#[allow(dead_code)]
impl MockBackend {
    pub fn base_url(&self) -> Url {
        Url::parse(&format!("http://{}", self.addr)).unwrap()
    }

    pub fn me_hits(&self) -> usize {
        self.state.me_hits.load(Ordering::SeqCst)
    }

    pub fn last_auth(&self) -> Option<String> {
        self.state.last_auth.lock().unwrap().clone()
    }
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string)
}

fn detail(status: StatusCode, msg: &str) -> Response {
    (status, Json(json!({ "detail": msg }))).into_response()
}

async fn me(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    state.me_hits.fetch_add(1, Ordering::SeqCst);
    *state.last_auth.lock().unwrap() = bearer(&headers);

    let behavior = *state.me.lock().unwrap();
    match behavior {
        MeBehavior::Role(role) => Json(json!({
            "username": "coach",
            "role": role,
            "email": "coach@example.com",
            "full_name": "Pat Coach",
            "created_at": "2025-09-01T12:00:00",
            "last_login": "2026-10-17T20:15:00Z",
            "provider": "local"
        }))
        .into_response(),
        MeBehavior::Status(code) => {
            detail(StatusCode::from_u16(code).unwrap(), "Could not validate credentials")
        }
        MeBehavior::Garbage => (StatusCode::OK, "<html>maintenance</html>").into_response(),
        MeBehavior::Slow(delay) => {
            tokio::time::sleep(delay).await;
            Json(json!({ "username": "coach", "role": "USER" })).into_response()
        }
    }
}

async fn token(Form(form): Form<HashMap<String, String>>) -> Response {
    match (form.get("username"), form.get("password")) {
        (Some(user), Some(pass)) if pass == "secret" => Json(json!({
            "access_token": format!("tok-{}", user),
            "token_type": "bearer",
            "refresh_token": "refresh-1"
        }))
        .into_response(),
        _ => detail(StatusCode::UNAUTHORIZED, "Incorrect username or password"),
    }
}

async fn oauth_status() -> Json<Value> {
    Json(json!({ "oauth_enabled": true }))
}

async fn profile(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if bearer(&headers).is_none() {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if body["email"] == "taken@example.com" {
        return detail(StatusCode::BAD_REQUEST, "Email already registered");
    }
    Json(json!({ "ok": true })).into_response()
}

async fn change_password(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if bearer(&headers).is_none() {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if body["current_password"] != "secret" {
        return detail(StatusCode::BAD_REQUEST, "Current password is incorrect");
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn echo(headers: HeaderMap) -> Json<Value> {
    Json(json!({ "authorization": bearer(&headers) }))
}

/// Start a mock backend on an ephemeral port.
pub async fn spawn_backend(me_behavior: MeBehavior) -> MockBackend {
    let state = Arc::new(MockState {
        me: Mutex::new(me_behavior),
        me_hits: AtomicUsize::new(0),
        last_auth: Mutex::new(None),
    });

    let app = Router::new()
        .route("/auth/me", get(me))
        .route("/auth/token", post(token))
        .route("/auth/oauth/status", get(oauth_status))
        .route("/auth/profile", put(profile))
        .route("/auth/change-password", post(change_password))
        .route("/public/echo", get(echo))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockBackend { addr, state }
}

/// Config pointing at `base_url` with a short timeout.
pub fn test_config(base_url: Url) -> Config {
    Config {
        api_base_url: base_url,
        request_timeout: Duration::from_millis(500),
        ..Config::test_default()
    }
}

/// Session service over a fresh in-memory store.
pub fn session_for(base_url: Url) -> (SessionService, Arc<MemoryTokenStore>) {
    let store = Arc::new(MemoryTokenStore::new());
    let dyn_store: Arc<dyn TokenStore> = store.clone();
    let session = SessionService::from_config(&test_config(base_url), dyn_store)
        .expect("client should build");
    (session, store)
}

/// Seed a full token set.
#[allow(dead_code)]
pub fn seed_tokens(store: &MemoryTokenStore, access: &str) {
    store.set(keys::ACCESS_TOKEN, access).unwrap();
    store.set(keys::TOKEN_TYPE, "Bearer").unwrap();
    store.set(keys::REFRESH_TOKEN, "refresh-1").unwrap();
}

/// URL of a port with nothing listening.
#[allow(dead_code)]
pub async fn dead_url() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{}", addr)).unwrap()
}
