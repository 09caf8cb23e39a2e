// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session bootstrap.
//!
//! Runs once per invocation: reads the persisted token, asks the backend
//! who it belongs to and projects the answer onto the navigation state.
//! Session problems never become user-facing errors; they downgrade the
//! navigation to logged-out.

use crate::client::ApiClient;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::session::{PasswordChange, ProfileUpdate};
use crate::models::{Identity, SessionTokens};
use crate::nav::{project_role, NavState, NavView};
use crate::services::redirect::{self, TokenPresence};
use crate::storage::TokenStore;
use std::sync::Arc;
use url::Url;
use validator::Validate;

/// Result of one introspection round.
#[derive(Debug, Clone)]
pub enum AuthCheck {
    /// No access token stored; no request was made.
    NoToken,
    Authenticated(Identity),
    /// The backend rejected the token; access token and type were cleared.
    Rejected(String),
    /// No usable answer (network failure, timeout, bad body). Tokens kept.
    Unavailable(String),
}

impl AuthCheck {
    pub fn nav_state(&self) -> NavState {
        match self {
            AuthCheck::Authenticated(identity) => project_role(identity.role),
            _ => NavState::LoggedOut,
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            AuthCheck::Authenticated(identity) => Some(identity),
            _ => None,
        }
    }
}

/// Session operations over one API client and token store.
#[derive(Clone)]
pub struct SessionService {
    client: ApiClient,
    store: Arc<dyn TokenStore>,
}

impl SessionService {
    pub fn new(client: ApiClient, store: Arc<dyn TokenStore>) -> Self {
        Self { client, store }
    }

    /// Build the API client for `config` around `store`.
    pub fn from_config(config: &Config, store: Arc<dyn TokenStore>) -> Result<Self> {
        let client = ApiClient::new(config, store.clone())?;
        Ok(Self::new(client, store))
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn store(&self) -> Arc<dyn TokenStore> {
        self.store.clone()
    }

    /// Persist tokens carried by a redirect URL.
    pub fn absorb_redirect_tokens(&self, url: &Url) -> Result<TokenPresence> {
        Ok(redirect::absorb_redirect_tokens(url, self.store.as_ref())?)
    }

    /// Introspect the stored token.
    pub async fn check(&self) -> AuthCheck {
        let Some(tokens) = SessionTokens::load(self.store.as_ref()) else {
            tracing::debug!("No stored access token");
            return AuthCheck::NoToken;
        };

        match self.client.me(&tokens.access_token).await {
            Ok(identity) => {
                tracing::debug!(username = %identity.username, role = ?identity.role, "Session valid");
                AuthCheck::Authenticated(identity)
            }
            Err(err) if err.is_rejection() => {
                tracing::info!(error = %err, "Session rejected, clearing access token");
                if let Err(e) = SessionTokens::clear_access(self.store.as_ref()) {
                    tracing::warn!(error = %e, "Failed to clear rejected token");
                }
                AuthCheck::Rejected(err.to_string())
            }
            Err(err) => {
                tracing::warn!(error = %err, "Introspection unavailable, keeping tokens");
                AuthCheck::Unavailable(err.to_string())
            }
        }
    }

    /// Re-evaluate the session and push the navigation state into `view`.
    ///
    /// The view is updated only after the introspection completes, so the
    /// returned state is exactly what the view shows.
    pub async fn refresh_auth_ui(&self, view: &mut dyn NavView) -> NavState {
        let state = self.check().await.nav_state();
        state.apply(view);
        state
    }

    /// Identity for the account settings view.
    pub async fn current_identity(&self) -> Result<Identity> {
        match self.check().await {
            AuthCheck::Authenticated(identity) => Ok(identity),
            AuthCheck::NoToken | AuthCheck::Rejected(_) => Err(AppError::SessionInvalid(401)),
            AuthCheck::Unavailable(msg) => Err(AppError::NetworkUnavailable(msg)),
        }
    }

    /// Exchange credentials for tokens and persist them.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        let tokens: SessionTokens = self.client.token(username, password).await?.into();
        tokens.persist(self.store.as_ref())?;
        tracing::info!(username, "Logged in");
        Ok(())
    }

    /// Forget every stored token.
    pub fn logout(&self, view: &mut dyn NavView) -> Result<NavState> {
        SessionTokens::clear_all(self.store.as_ref())?;
        tracing::info!("Logged out");
        let state = NavState::LoggedOut;
        state.apply(view);
        Ok(state)
    }

    /// Whether the external identity provider is enabled. Failures read as disabled.
    pub async fn oauth_enabled(&self) -> bool {
        match self.client.oauth_status().await {
            Ok(status) => status.oauth_enabled,
            Err(e) => {
                tracing::debug!(error = %e, "OAuth status unavailable");
                false
            }
        }
    }

    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<()> {
        update
            .validate()
            .map_err(|e| AppError::ValidationFailed(e.to_string()))?;
        self.client.update_profile(&update).await
    }

    pub async fn change_password(&self, change: PasswordChange) -> Result<()> {
        change
            .validate()
            .map_err(|e| AppError::ValidationFailed(e.to_string()))?;
        if change.current_password == change.new_password {
            return Err(AppError::ValidationFailed(
                "New password must differ from the current password".to_string(),
            ));
        }
        self.client.change_password(&change).await
    }
}
