// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Middleware modules for the loopback callback server.

pub mod security;

pub use security::add_security_headers;
