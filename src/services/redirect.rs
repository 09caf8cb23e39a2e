// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Absorption of tokens delivered on an OAuth redirect.
//!
//! The provider callback lands on a URL carrying `access_token`,
//! `refresh_token` and `token_type`. Those three are persisted and
//! stripped; every other query parameter is kept byte-for-byte in its
//! original order.

use crate::models::SessionTokens;
use crate::storage::{keys, StorageError, TokenStore};
use url::{form_urlencoded, Url};

/// Outcome of [`absorb_redirect_tokens`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenPresence {
    /// Tokens were persisted; `url` is the address to show instead.
    Absorbed { url: Url },
    /// Not all three parameters were present. Nothing was stored.
    NotPresent,
}

impl TokenPresence {
    pub fn found(&self) -> bool {
        matches!(self, TokenPresence::Absorbed { .. })
    }
}

/// Persist redirect tokens from `url` and compute the stripped URL.
///
/// All three parameters must be present and non-empty; a partial set is
/// ignored so a malformed session is never stored.
pub fn absorb_redirect_tokens(
    url: &Url,
    store: &dyn TokenStore,
) -> Result<TokenPresence, StorageError> {
    let Some((tokens, cleaned)) = extract_redirect_tokens(url) else {
        return Ok(TokenPresence::NotPresent);
    };

    tokens.persist(store)?;
    tracing::info!(token_type = %tokens.token_type, "Absorbed redirect tokens");

    Ok(TokenPresence::Absorbed { url: cleaned })
}

/// Split the token parameters out of `url` without touching storage.
pub fn extract_redirect_tokens(url: &Url) -> Option<(SessionTokens, Url)> {
    let query = url.query()?;

    let mut access_token = None;
    let mut refresh_token = None;
    let mut token_type = None;
    let mut kept = Vec::new();

    for pair in query.split('&').filter(|p| !p.is_empty()) {
        // Decode this pair alone; the raw text is what gets kept
        let Some((key, value)) = form_urlencoded::parse(pair.as_bytes()).next() else {
            kept.push(pair);
            continue;
        };
        let slot = match &*key {
            keys::ACCESS_TOKEN => &mut access_token,
            keys::REFRESH_TOKEN => &mut refresh_token,
            keys::TOKEN_TYPE => &mut token_type,
            _ => {
                kept.push(pair);
                continue;
            }
        };
        // First occurrence wins; repeats are still stripped
        if slot.is_none() {
            *slot = Some(value.into_owned());
        }
    }

    let non_empty = |v: Option<String>| v.filter(|s| !s.is_empty());
    let (Some(access_token), Some(refresh_token), Some(token_type)) = (
        non_empty(access_token),
        non_empty(refresh_token),
        non_empty(token_type),
    ) else {
        return None;
    };

    let mut cleaned = url.clone();
    if kept.is_empty() {
        cleaned.set_query(None);
    } else {
        cleaned.set_query(Some(&kept.join("&")));
    }

    Some((
        SessionTokens {
            access_token,
            token_type,
            refresh_token: Some(refresh_token),
        },
        cleaned,
    ))
}
