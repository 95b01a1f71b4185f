//! Session guard gating every page except the login screen.
//!
//! The guard only knows whether someone is logged in. It does not look at
//! the user's role: any authenticated user reaches every page.

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::User;
use crate::session::SessionStore;
use tracing::{debug, info};

pub const LOGIN_ROUTE: &str = "/login";
pub const HOME_ROUTE: &str = "/";
pub const LOGIN_FAILED_MESSAGE: &str = "Invalid email or password. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Loading,
    Unauthenticated,
    Authenticated(User),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    Redirect(&'static str),
}

/// What a protected route should show for the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Render,
    Spinner,
    Blank,
}

#[derive(Debug)]
pub struct AuthGuard {
    state: AuthState,
}

impl Default for AuthGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthGuard {
    pub fn new() -> Self {
        Self {
            state: AuthState::Loading,
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, AuthState::Loading)
    }

    pub fn current_user(&self) -> Option<&User> {
        match &self.state {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// Reads the persisted session once. Redirects to the login route only
    /// when nobody is logged in and `route` is not already the login route.
    pub fn init(&mut self, session: &SessionStore, route: &str) -> Navigation {
        match session.load() {
            Some(user) => {
                debug!(user = %user.email, route, "session restored");
                self.state = AuthState::Authenticated(user);
                Navigation::Stay
            }
            None => {
                self.state = AuthState::Unauthenticated;
                if route == LOGIN_ROUTE {
                    Navigation::Stay
                } else {
                    debug!(route, "no session, redirecting to login");
                    Navigation::Redirect(LOGIN_ROUTE)
                }
            }
        }
    }

    /// On success the caller is expected to navigate away from the login
    /// route. On failure the state stays unauthenticated and the error
    /// carries the message shown on the login form.
    pub async fn login(
        &mut self,
        api: &ApiClient,
        email: &str,
        password: &str,
    ) -> Result<User, ApiError> {
        match api.login(email, password).await {
            Ok(user) => {
                self.state = AuthState::Authenticated(user.clone());
                Ok(user)
            }
            Err(ApiError::Session(e)) => {
                self.state = AuthState::Unauthenticated;
                Err(ApiError::Session(e))
            }
            Err(_) => {
                self.state = AuthState::Unauthenticated;
                Err(ApiError::Auth(LOGIN_FAILED_MESSAGE.to_string()))
            }
        }
    }

    pub fn logout(&mut self, api: &ApiClient) -> Navigation {
        api.logout();
        if let AuthState::Authenticated(user) = &self.state {
            info!(user = %user.email, "logged out");
        }
        self.state = AuthState::Unauthenticated;
        Navigation::Redirect(LOGIN_ROUTE)
    }

    pub fn gate(&self, route: &str) -> Gate {
        if route == LOGIN_ROUTE {
            return Gate::Render;
        }
        match self.state {
            AuthState::Loading => Gate::Spinner,
            AuthState::Unauthenticated => Gate::Blank,
            AuthState::Authenticated(_) => Gate::Render,
        }
    }
}
