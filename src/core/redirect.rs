//! Caller-side redirect state for ref switching.
//!
//! [`RedirectTracker`] follows the current route and holds at most one pending
//! redirect. Any change of pathname drops the pending redirect before a new ref
//! selection is accepted, so a redirect computed for one route can never fire on
//! another.

use crate::core::path_rewriter::{compute_new_path, RouteRefDescriptor};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectState {
    Idle,
    RedirectReady { new_path: String },
}

#[derive(Debug, Clone)]
pub struct RedirectTracker {
    pathname: String,
    state: RedirectState,
}

impl RedirectTracker {
    pub fn new(pathname: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            state: RedirectState::Idle,
        }
    }

    pub fn pathname(&self) -> &str {
        &self.pathname
    }

    pub fn state(&self) -> &RedirectState {
        &self.state
    }

    pub fn new_path(&self) -> Option<&str> {
        match &self.state {
            RedirectState::RedirectReady { new_path } => Some(new_path.as_str()),
            RedirectState::Idle => None,
        }
    }

    /// Record the current route. Returns `true` if it changed, in which case
    /// any pending redirect has been dropped.
    pub fn observe_route(&mut self, pathname: &str) -> bool {
        if self.pathname == pathname {
            return false;
        }
        log::debug!("route changed {} -> {pathname}, resetting redirect", self.pathname);
        self.pathname = pathname.to_string();
        self.state = RedirectState::Idle;
        true
    }

    /// Handle a ref selection for the current route.
    ///
    /// A descriptor built for another pathname is stale and leaves the state
    /// untouched.
    pub fn select_ref(&mut self, descriptor: &RouteRefDescriptor) -> &RedirectState {
        if descriptor.pathname != self.pathname {
            log::debug!(
                "ignoring ref selection for stale route {} (current {})",
                descriptor.pathname,
                self.pathname
            );
            return &self.state;
        }

        self.state = match compute_new_path(descriptor) {
            Some(new_path) => RedirectState::RedirectReady { new_path },
            None => RedirectState::Idle,
        };
        &self.state
    }

    /// Hand the pending redirect to the navigation layer, returning to idle
    pub fn take_redirect(&mut self) -> Option<String> {
        match std::mem::replace(&mut self.state, RedirectState::Idle) {
            RedirectState::RedirectReady { new_path } => Some(new_path),
            RedirectState::Idle => None,
        }
    }
}
