//! Route gating for protected and public views.
//!
//! Every protected view calls through [`SessionGate`] before rendering. The
//! decision is recomputed from the store on each call and always resolves to
//! a definite [`Access`]; it never fails.
//!
//! Role checks are a visibility filter by default: a role mismatch still
//! renders the view, and role-specific elements are hidden via
//! [`SessionGate::is_visible`]. Real authorization is the backend's job;
//! [`GateConfig::enforce_roles`] turns mismatches into redirects for hosts that
//! want the stricter UX.

use serde::{Deserialize, Serialize};

use crate::session::{ROLE_KEY, Session, SessionStore, TOKEN_KEY};

pub const LOGIN_PATH: &str = "/auth/login";
pub const HOME_PATH: &str = "/";

/// Token stored when the login endpoint succeeds without returning one.
const PLACEHOLDER_TOKEN: &str = "loggedin";

/// Outcome of a gate evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", content = "path", rename_all = "snake_case")]
pub enum Access {
    Allow,
    RedirectTo(String),
}

impl Access {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Access::Allow)
    }

    pub fn redirect_path(&self) -> Option<&str> {
        match self {
            Access::Allow => None,
            Access::RedirectTo(path) => Some(path),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateConfig {
    pub login_path: String,
    pub home_path: String,
    /// Redirect to `home_path` on role mismatch instead of allowing.
    pub enforce_roles: bool,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            login_path: LOGIN_PATH.to_string(),
            home_path: HOME_PATH.to_string(),
            enforce_roles: false,
        }
    }
}

/// Decide whether a protected view may render, with the default config.
pub fn authorize(session: &Session, required_role: Option<&str>) -> Access {
    authorize_with(&GateConfig::default(), session, required_role)
}

pub fn authorize_with(config: &GateConfig, session: &Session, required_role: Option<&str>) -> Access {
    if !session.is_authenticated() {
        return Access::RedirectTo(config.login_path.clone());
    }

    let Some(required) = required_role else {
        return Access::Allow;
    };

    if session.role().is_some_and(|role| role.matches(required)) {
        return Access::Allow;
    }

    if config.enforce_roles {
        tracing::debug!(required, "role mismatch; redirecting");
        Access::RedirectTo(config.home_path.clone())
    } else {
        Access::Allow
    }
}

/// Whether role-specific UI should be shown to this session.
pub fn is_visible(session: &Session, role: &str) -> bool {
    session.is_authenticated() && session.role().is_some_and(|r| r.matches(role))
}

/// Body returned by the login endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// The single seam between views and the persisted session.
#[derive(Debug)]
pub struct SessionGate<S> {
    store: S,
    config: GateConfig,
}

impl<S: SessionStore> SessionGate<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, GateConfig::default())
    }

    pub fn with_config(store: S, config: GateConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fresh snapshot of the persisted session.
    pub fn session(&self) -> Session {
        Session::load(&self.store)
    }

    /// Gate a protected view.
    pub fn authorize(&self, required_role: Option<&str>) -> Access {
        let access = authorize_with(&self.config, &self.session(), required_role);
        tracing::debug!(?required_role, ?access, "protected view gate");
        access
    }

    /// Gate a public-only view (login, register): signed-in users are sent home.
    pub fn authorize_public(&self) -> Access {
        if self.session().is_authenticated() {
            Access::RedirectTo(self.config.home_path.clone())
        } else {
            Access::Allow
        }
    }

    pub fn is_visible(&self, role: &str) -> bool {
        is_visible(&self.session(), role)
    }

    /// Persist a successful login.
    pub fn login(&self, response: &LoginResponse) {
        let token = response
            .access_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(PLACEHOLDER_TOKEN);
        self.store.set(TOKEN_KEY, token);

        match response.role.as_deref().filter(|r| !r.trim().is_empty()) {
            Some(role) => self.store.set(ROLE_KEY, role),
            None => self.store.remove(ROLE_KEY),
        }
        tracing::info!(role = ?response.role, "session established");
    }

    /// Clear the persisted session; the next gated view redirects to login.
    pub fn logout(&self) {
        self.store.remove(TOKEN_KEY);
        self.store.remove(ROLE_KEY);
        tracing::info!("session cleared");
    }
}
