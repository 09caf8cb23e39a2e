// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local
//! development. Command-line flags override individual values.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// Path prefixes whose requests carry the bearer token.
pub const DEFAULT_AUTH_PREFIXES: &[&str] = &[
    "/auth/",
    "/admin/",
    "/players/new",
    "/players/edit",
    "/players/delete",
    "/players/substitutes",
    "/teams/new",
    "/teams/edit",
    "/teams/delete",
];

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the stats backend API
    pub api_base_url: Url,
    /// File holding the persisted session tokens
    pub session_file: PathBuf,
    /// Timeout applied to every backend request
    pub request_timeout: Duration,
    /// Port for the loopback OAuth callback server
    pub callback_port: u16,
    /// Backend endpoint that starts the external identity provider flow
    pub oauth_login_url: Url,
    /// Request path prefixes that receive the `Authorization` header
    pub auth_prefixes: Vec<String>,
}

impl Config {
    /// Config for tests: points at localhost and uses a scratch session file.
    pub fn test_default() -> Self {
        Self {
            api_base_url: Url::parse("http://127.0.0.1:8000").expect("static URL"),
            session_file: env::temp_dir().join("courtside-test-session.json"),
            request_timeout: Duration::from_secs(2),
            callback_port: 0,
            oauth_login_url: Url::parse("http://127.0.0.1:8000/auth/oauth/login")
                .expect("static URL"),
            auth_prefixes: default_auth_prefixes(),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let raw_url =
            env::var("COURTSIDE_API_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());
        let api_base_url = Url::parse(raw_url.trim())
            .map_err(|e| ConfigError::Invalid("COURTSIDE_API_URL", e.to_string()))?;

        let session_file = match env::var("COURTSIDE_SESSION_FILE") {
            Ok(path) => PathBuf::from(path),
            Err(_) => default_session_file(),
        };

        let timeout_secs: u64 = parse_var("COURTSIDE_TIMEOUT_SECS", 10)?;
        let callback_port: u16 = parse_var("COURTSIDE_CALLBACK_PORT", 8765)?;

        let oauth_login_url = match env::var("COURTSIDE_OAUTH_URL") {
            Ok(v) => Url::parse(v.trim())
                .map_err(|e| ConfigError::Invalid("COURTSIDE_OAUTH_URL", e.to_string()))?,
            Err(_) => default_oauth_login_url(&api_base_url)?,
        };

        let auth_prefixes = match env::var("COURTSIDE_AUTH_PREFIXES") {
            Ok(v) => parse_prefixes(&v),
            Err(_) => default_auth_prefixes(),
        };

        Ok(Self {
            api_base_url,
            session_file,
            request_timeout: Duration::from_secs(timeout_secs),
            callback_port,
            oauth_login_url,
            auth_prefixes,
        })
    }

    /// Provider sign-in URL that redirects back to `redirect_uri`.
    pub fn oauth_authorize_url(&self, redirect_uri: &str) -> String {
        let sep = if self.oauth_login_url.query().is_some() { '&' } else { '?' };
        format!(
            "{}{}redirect_uri={}",
            self.oauth_login_url,
            sep,
            urlencoding::encode(redirect_uri)
        )
    }
}

/// Parse an optional environment variable, rejecting unparseable values.
fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(v) => v.trim().parse().map_err(|_| ConfigError::Invalid(name, v)),
        Err(_) => Ok(default),
    }
}

fn default_oauth_login_url(api_base_url: &Url) -> Result<Url, ConfigError> {
    let raw = format!("{}/auth/oauth/login", api_base_url.as_str().trim_end_matches('/'));
    Url::parse(&raw).map_err(|e| ConfigError::Invalid("COURTSIDE_OAUTH_URL", e.to_string()))
}

fn default_auth_prefixes() -> Vec<String> {
    DEFAULT_AUTH_PREFIXES.iter().map(|p| p.to_string()).collect()
}

fn default_session_file() -> PathBuf {
    let home = env::var("HOME").map(PathBuf::from).unwrap_or_else(|_| PathBuf::from("."));
    home.join(".courtside").join("session.json")
}

/// Split a comma-separated prefix list, dropping empty entries.
fn parse_prefixes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("COURTSIDE_API_URL", "https://stats.example.com");
        env::set_var("COURTSIDE_TIMEOUT_SECS", "5");
        env::set_var("COURTSIDE_AUTH_PREFIXES", "/auth/, /admin/,,");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.api_base_url.as_str(), "https://stats.example.com/");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.auth_prefixes, vec!["/auth/", "/admin/"]);
        assert_eq!(
            config.oauth_login_url.as_str(),
            "https://stats.example.com/auth/oauth/login"
        );

        env::remove_var("COURTSIDE_API_URL");
        env::remove_var("COURTSIDE_TIMEOUT_SECS");
        env::remove_var("COURTSIDE_AUTH_PREFIXES");
    }

    #[test]
    fn test_bad_number_is_rejected() {
        env::set_var("COURTSIDE_TEST_PORT_OUT_OF_RANGE", "70000");
        env::set_var("COURTSIDE_TEST_PORT_GOOD", " 9000 ");

        assert!(matches!(
            parse_var::<u16>("COURTSIDE_TEST_PORT_OUT_OF_RANGE", 8765),
            Err(ConfigError::Invalid("COURTSIDE_TEST_PORT_OUT_OF_RANGE", v)) if v == "70000"
        ));
        assert_eq!(parse_var::<u16>("COURTSIDE_TEST_PORT_GOOD", 8765).unwrap(), 9000);
        assert_eq!(parse_var::<u16>("COURTSIDE_TEST_PORT_UNSET", 8765).unwrap(), 8765);

        env::remove_var("COURTSIDE_TEST_PORT_OUT_OF_RANGE");
        env::remove_var("COURTSIDE_TEST_PORT_GOOD");
    }

    #[test]
    fn test_oauth_authorize_url_encodes_redirect() {
        let mut config = Config::test_default();
        assert_eq!(
            config.oauth_authorize_url("http://127.0.0.1:8765/callback"),
            "http://127.0.0.1:8000/auth/oauth/login?redirect_uri=http%3A%2F%2F127.0.0.1%3A8765%2Fcallback"
        );

        config.oauth_login_url = Url::parse("https://id.example.com/start?app=stats").unwrap();
        assert_eq!(
            config.oauth_authorize_url("http://x/cb"),
            "https://id.example.com/start?app=stats&redirect_uri=http%3A%2F%2Fx%2Fcb"
        );
    }

    #[test]
    fn test_default_prefixes_cover_auth_and_admin() {
        let prefixes = default_auth_prefixes();
        assert!(prefixes.iter().any(|p| p == "/auth/"));
        assert!(prefixes.iter().any(|p| p == "/admin/"));
    }
}
