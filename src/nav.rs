// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Navigation visibility state machine.
//!
//! The navigation chrome is a pure projection of the visitor's role.
//! Rendering lives behind [`NavView`] so the projection stays testable.

use crate::models::Role;
use serde::Serialize;

/// Derived navigation state. Starts as `LoggedOut` on every load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavState {
    #[default]
    LoggedOut,
    /// Valid session without a recognized role
    AuthenticatedGuest,
    AuthenticatedUser,
    AuthenticatedAdmin,
}

/// Project an authenticated identity's role onto the navigation state.
pub fn project_role(role: Option<Role>) -> NavState {
    match role {
        Some(Role::Admin) => NavState::AuthenticatedAdmin,
        Some(Role::User) => NavState::AuthenticatedUser,
        None => NavState::AuthenticatedGuest,
    }
}

impl NavState {
    pub fn is_authenticated(self) -> bool {
        self != NavState::LoggedOut
    }

    pub fn visibility(self) -> VisibilitySet {
        let authenticated = self.is_authenticated();
        let admin_menu = self == NavState::AuthenticatedAdmin;
        VisibilitySet {
            login_link: !authenticated,
            user_link: authenticated,
            manage_menu: admin_menu || self == NavState::AuthenticatedUser,
            admin_menu,
        }
    }

    /// Push the projected visibility into a view.
    pub fn apply(self, view: &mut dyn NavView) {
        let visibility = self.visibility();
        for element in NavElement::ALL {
            view.set_visible(element, visibility.is_visible(element));
        }
    }
}

/// Toggleable navigation elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavElement {
    LoginLink,
    UserLink,
    ManageMenu,
    AdminMenu,
}

impl NavElement {
    pub const ALL: [NavElement; 4] = [
        NavElement::LoginLink,
        NavElement::UserLink,
        NavElement::ManageMenu,
        NavElement::AdminMenu,
    ];

    pub fn label(self) -> &'static str {
        match self {
            NavElement::LoginLink => "Login",
            NavElement::UserLink => "Account / Logout",
            NavElement::ManageMenu => "Manage",
            NavElement::AdminMenu => "Admin",
        }
    }
}

/// Which navigation elements are shown.
///
/// Only obtainable from [`NavState::visibility`], which guarantees that
/// exactly one of the login/user links is visible and that the admin
/// menu implies the manage menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisibilitySet {
    login_link: bool,
    user_link: bool,
    manage_menu: bool,
    admin_menu: bool,
}

impl VisibilitySet {
    pub fn is_visible(&self, element: NavElement) -> bool {
        match element {
            NavElement::LoginLink => self.login_link,
            NavElement::UserLink => self.user_link,
            NavElement::ManageMenu => self.manage_menu,
            NavElement::AdminMenu => self.admin_menu,
        }
    }

    pub fn visible(&self) -> impl Iterator<Item = NavElement> + '_ {
        NavElement::ALL
            .into_iter()
            .filter(move |e| self.is_visible(*e))
    }
}

/// View-binding adapter for navigation chrome.
pub trait NavView {
    fn set_visible(&mut self, element: NavElement, visible: bool);
}

/// View that only remembers the last applied visibility.
#[derive(Debug, Default, Clone)]
pub struct RecordedNav {
    shown: Vec<NavElement>,
    updates: usize,
}

impl RecordedNav {
    pub fn shown(&self) -> &[NavElement] {
        &self.shown
    }

    pub fn is_shown(&self, element: NavElement) -> bool {
        self.shown.contains(&element)
    }

    /// Number of `set_visible` calls received.
    pub fn updates(&self) -> usize {
        self.updates
    }
}

impl NavView for RecordedNav {
    fn set_visible(&mut self, element: NavElement, visible: bool) {
        self.updates += 1;
        self.shown.retain(|e| *e != element);
        if visible {
            self.shown.push(element);
        }
    }
}
