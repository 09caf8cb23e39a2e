// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Courtside: client for the basketball stats web application.
//!
//! This crate provides the session bootstrap (token storage, redirect
//! absorption, identity introspection and navigation visibility) and the
//! shot-string codec used by scorebook entry.

pub mod client;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod nav;
pub mod routes;
pub mod services;
pub mod shot;
pub mod storage;
pub mod time_utils;

use config::Config;
use std::sync::Arc;
use storage::TokenStore;
use tokio::sync::watch;

/// Shared state for the loopback callback server.
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn TokenStore>,
    /// Signalled once redirect tokens have been absorbed.
    pub absorbed: watch::Sender<bool>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn TokenStore>) -> Self {
        let (absorbed, _) = watch::channel(false);
        Self {
            config,
            store,
            absorbed,
        }
    }
}
