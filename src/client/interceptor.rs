// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bearer-token request interceptor.
//!
//! Only requests to the API origin whose path falls under an allow-listed
//! prefix get the token. Everything else passes through untouched so the
//! token never reaches third-party or static hosts.

use crate::storage::{keys, TokenStore};
use reqwest::header::{HeaderValue, AUTHORIZATION};
use std::sync::Arc;
use url::Url;

/// Injects `Authorization: Bearer <token>` into allow-listed requests.
#[derive(Clone)]
pub struct AuthInterceptor {
    base: Url,
    prefixes: Vec<String>,
    store: Arc<dyn TokenStore>,
}

impl AuthInterceptor {
    pub fn new(base: Url, prefixes: Vec<String>, store: Arc<dyn TokenStore>) -> Self {
        Self {
            base,
            prefixes,
            store,
        }
    }

    /// Path of `url` relative to the API base, or `None` for foreign URLs.
    fn api_path<'a>(&self, url: &'a Url) -> Option<&'a str> {
        if url.origin() != self.base.origin() {
            return None;
        }
        let base_path = self.base.path().trim_end_matches('/');
        let path = url.path().strip_prefix(base_path)?;
        path.starts_with('/').then_some(path)
    }

    /// True when requests to `url` should carry the token.
    pub fn requires_auth(&self, url: &Url) -> bool {
        self.api_path(url)
            .map(|path| self.prefixes.iter().any(|p| path.starts_with(p.as_str())))
            .unwrap_or(false)
    }

    /// Attach the stored token if the request is allow-listed.
    ///
    /// Only `Authorization` is replaced; applying twice is harmless.
    pub fn attach_auth_header(&self, request: &mut reqwest::Request) {
        if !self.requires_auth(request.url()) {
            return;
        }
        let Some(token) = self.store.get(keys::ACCESS_TOKEN).filter(|t| !t.is_empty()) else {
            return;
        };

        match HeaderValue::from_str(&format!("Bearer {}", token)) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.headers_mut().insert(AUTHORIZATION, value);
            }
            Err(_) => {
                tracing::warn!("Stored access token is not a valid header value, not attaching");
            }
        }
    }
}
