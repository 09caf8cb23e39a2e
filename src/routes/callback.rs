// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OAuth redirect landing page.
//!
//! The identity provider sends the browser here with the session tokens
//! in the query string. The tokens are persisted and the page replaces
//! its own history entry with the stripped URL, without reloading.

use axum::{
    extract::{OriginalUri, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use url::Url;

use crate::error::{AppError, Result};
use crate::services::redirect::{absorb_redirect_tokens, TokenPresence};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/callback", get(oauth_callback))
}

/// Absorb redirect tokens and rewrite the visible URL.
async fn oauth_callback(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
) -> Result<Response> {
    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("127.0.0.1");
    let url = Url::parse(&format!("http://{}{}", host, uri))
        .map_err(|e| AppError::BadRequest(format!("Unparseable callback URL: {}", e)))?;

    match absorb_redirect_tokens(&url, state.store.as_ref())? {
        TokenPresence::Absorbed { url: cleaned } => {
            state.absorbed.send_replace(true);
            Ok(Html(signed_in_page(&relative_location(&cleaned))).into_response())
        }
        TokenPresence::NotPresent => {
            tracing::warn!(path = %uri.path(), "Callback without a complete token set");
            Ok((StatusCode::BAD_REQUEST, Html(incomplete_page())).into_response())
        }
    }
}

/// Path, query and fragment of `url`.
fn relative_location(url: &Url) -> String {
    let mut location = url.path().to_string();
    if let Some(query) = url.query() {
        location.push('?');
        location.push_str(query);
    }
    if let Some(fragment) = url.fragment() {
        location.push('#');
        location.push_str(fragment);
    }
    location
}

/// Quote `value` as a JS string literal safe inside a `<script>` element.
fn script_string(value: &str) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "\"/\"".to_string())
        .replace("</", "<\\/")
}

fn signed_in_page(location: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Courtside - signed in</title></head>
<body>
<p>Signed in. You can close this tab and return to the terminal.</p>
<script>history.replaceState(null, "", {});</script>
</body>
</html>
"#,
        script_string(location)
    )
}

fn incomplete_page() -> String {
    r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Courtside - sign-in incomplete</title></head>
<body>
<p>Sign-in did not complete: the redirect was missing session tokens.</p>
</body>
</html>
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_location() {
        let url = Url::parse("http://127.0.0.1:8765/callback?next=%2Fgames#top").unwrap();
        assert_eq!(relative_location(&url), "/callback?next=%2Fgames#top");
    }

    #[test]
    fn test_script_string_escapes_closing_tags() {
        let quoted = script_string("/callback?x=</script>");
        assert!(!quoted.contains("</script>"));
        assert!(quoted.starts_with('"'));
    }
}
