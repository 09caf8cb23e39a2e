// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod identity;
pub mod session;
pub mod stats;

pub use identity::{Identity, Role};
pub use session::{SessionTokens, TokenResponse};
pub use stats::{QuarterLine, ShotTotals};
