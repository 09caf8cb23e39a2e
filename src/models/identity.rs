// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Identity returned by the introspection endpoint.

use crate::time_utils::parse_backend_timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Recognized account roles.
///
/// The backend is inconsistent about case, so roles are normalized here
/// and never compared as raw strings elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    /// Case-insensitive parse; unknown roles yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("admin") {
            Some(Role::Admin)
        } else if raw.eq_ignore_ascii_case("user") {
            Some(Role::User)
        } else {
            None
        }
    }
}

fn deserialize_role<'de, D>(deserializer: D) -> Result<Option<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Role::parse))
}

/// Current user as reported by `GET /auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub username: String,
    #[serde(default, deserialize_with = "deserialize_role")]
    pub role: Option<Role>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    /// Account creation time as sent by the backend
    #[serde(default)]
    pub created_at: Option<String>,
    /// Previous login time as sent by the backend
    #[serde(default)]
    pub last_login: Option<String>,
    /// Identity provider ("local" or an external provider name)
    #[serde(default)]
    pub provider: Option<String>,
}

impl Identity {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_deref().and_then(parse_backend_timestamp)
    }

    pub fn last_login(&self) -> Option<DateTime<Utc>> {
        self.last_login.as_deref().and_then(parse_backend_timestamp)
    }

    /// Name to show in the user link.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.username)
    }
}
