// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Stats backend API client.
//!
//! Built once at startup and shared by reference. Every request passes
//! through the single installed [`AuthInterceptor`].

pub mod interceptor;

pub use interceptor::AuthInterceptor;

use crate::config::Config;
use crate::error::AppError;
use crate::models::session::{ErrorDetail, OAuthStatus, PasswordChange, ProfileUpdate};
use crate::models::{Identity, TokenResponse};
use crate::storage::TokenStore;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use url::Url;

/// Stats backend API client.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    interceptor: AuthInterceptor,
}

impl ApiClient {
    /// Create a client with the default interceptor for `config`.
    pub fn new(config: &Config, store: Arc<dyn TokenStore>) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HTTP client init failed: {}", e)))?;

        let interceptor = AuthInterceptor::new(
            config.api_base_url.clone(),
            config.auth_prefixes.clone(),
            store,
        );

        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            interceptor,
        })
    }

    /// Replace the installed interceptor. Interceptors never stack.
    pub fn with_interceptor(mut self, interceptor: AuthInterceptor) -> Self {
        self.interceptor = interceptor;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL for an API path such as `/auth/me`.
    pub fn url(&self, path: &str) -> Result<Url, AppError> {
        let joined = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&joined).map_err(|e| AppError::BadRequest(format!("Bad API path {}: {}", path, e)))
    }

    /// Start a request to an API path.
    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, AppError> {
        Ok(self.http.request(method, self.url(path)?))
    }

    /// Send a request through the interceptor.
    pub async fn send(&self, builder: RequestBuilder) -> Result<reqwest::Response, AppError> {
        let mut request = builder
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to build request: {}", e)))?;
        self.interceptor.attach_auth_header(&mut request);

        tracing::debug!(method = %request.method(), path = request.url().path(), "API request");
        Ok(self.http.execute(request).await?)
    }

    /// `GET /auth/me` with an explicit bearer token.
    pub async fn me(&self, access_token: &str) -> Result<Identity, AppError> {
        let builder = self
            .request(Method::GET, "/auth/me")?
            .bearer_auth(access_token);
        check_response_json(self.send(builder).await?).await
    }

    /// `POST /auth/token` with the OAuth2 password grant form.
    pub async fn token(&self, username: &str, password: &str) -> Result<TokenResponse, AppError> {
        let builder = self
            .request(Method::POST, "/auth/token")?
            .form(&[("username", username), ("password", password)]);
        let response = self.send(builder).await?;
        check_response_json(response).await
    }

    /// `GET /auth/oauth/status`.
    pub async fn oauth_status(&self) -> Result<OAuthStatus, AppError> {
        self.get_json("/auth/oauth/status").await
    }

    /// `PUT /auth/profile`.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<(), AppError> {
        let builder = self.request(Method::PUT, "/auth/profile")?.json(update);
        check_response(self.send(builder).await?).await
    }

    /// `POST /auth/change-password`.
    pub async fn change_password(&self, change: &PasswordChange) -> Result<(), AppError> {
        let builder = self
            .request(Method::POST, "/auth/change-password")?
            .json(change);
        check_response(self.send(builder).await?).await
    }

    /// Generic GET request with JSON response.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let response = self.send(self.request(Method::GET, path)?).await?;
        check_response_json(response).await
    }
}

/// Check response status and return error if not successful.
async fn check_response(response: reqwest::Response) -> Result<(), AppError> {
    if response.status().is_success() {
        return Ok(());
    }
    Err(error_from_response(response).await)
}

/// Check response and parse JSON body.
async fn check_response_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, AppError> {
    if !response.status().is_success() {
        return Err(error_from_response(response).await);
    }
    Ok(response.json().await?)
}

async fn error_from_response(response: reqwest::Response) -> AppError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    if status.is_client_error() {
        if let Ok(detail) = serde_json::from_str::<ErrorDetail>(&body) {
            return AppError::ValidationFailed(detail.message());
        }
    }

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return AppError::SessionInvalid(status.as_u16());
    }

    tracing::warn!(status = status.as_u16(), "Unexpected backend response");
    AppError::Backend(status.as_u16(), body)
}
