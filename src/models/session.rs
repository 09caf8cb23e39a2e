// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session tokens and the auth endpoint payloads.

use crate::storage::{keys, StorageError, TokenStore};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Tokens persisted between invocations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTokens {
    pub access_token: String,
    pub token_type: String,
    pub refresh_token: Option<String>,
}

impl SessionTokens {
    /// Read the persisted tokens. `None` without an access token.
    pub fn load(store: &dyn TokenStore) -> Option<Self> {
        let access_token = store.get(keys::ACCESS_TOKEN).filter(|t| !t.is_empty())?;
        Some(Self {
            access_token,
            token_type: store
                .get(keys::TOKEN_TYPE)
                .unwrap_or_else(|| "Bearer".to_string()),
            refresh_token: store.get(keys::REFRESH_TOKEN),
        })
    }

    /// Write all fields in one batch. A missing refresh token leaves any
    /// stored one alone.
    pub fn persist(&self, store: &dyn TokenStore) -> Result<(), StorageError> {
        let mut entries = vec![
            (keys::ACCESS_TOKEN, self.access_token.as_str()),
            (keys::TOKEN_TYPE, self.token_type.as_str()),
        ];
        if let Some(refresh) = &self.refresh_token {
            entries.push((keys::REFRESH_TOKEN, refresh.as_str()));
        }
        store.set_many(&entries)
    }

    /// Drop the access token and its type; the refresh token survives.
    pub fn clear_access(store: &dyn TokenStore) -> Result<(), StorageError> {
        store.remove(keys::ACCESS_TOKEN)?;
        store.remove(keys::TOKEN_TYPE)
    }

    /// Explicit logout.
    pub fn clear_all(store: &dyn TokenStore) -> Result<(), StorageError> {
        Self::clear_access(store)?;
        store.remove(keys::REFRESH_TOKEN)
    }
}

/// `POST /auth/token` response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl From<TokenResponse> for SessionTokens {
    fn from(resp: TokenResponse) -> Self {
        Self {
            access_token: resp.access_token,
            token_type: resp.token_type,
            refresh_token: resp.refresh_token,
        }
    }
}

/// `GET /auth/oauth/status` response.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct OAuthStatus {
    #[serde(default)]
    pub oauth_enabled: bool,
}

/// `PUT /auth/profile` body.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100))]
    pub full_name: Option<String>,
}

/// `POST /auth/change-password` body.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct PasswordChange {
    #[validate(length(min = 1))]
    pub current_password: String,
    #[validate(length(min = 8, max = 128))]
    pub new_password: String,
}

/// Error body returned by the backend on 4xx.
#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub detail: serde_json::Value,
}

impl ErrorDetail {
    /// Human-readable message; non-string details are rendered as JSON.
    pub fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
