// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - session logic layer.

pub mod redirect;
pub mod session;

pub use redirect::{absorb_redirect_tokens, TokenPresence};
pub use session::{AuthCheck, SessionService};
