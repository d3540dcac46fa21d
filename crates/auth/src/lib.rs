//! `clinic-auth` — client-side session state and route gating.
//!
//! This crate is intentionally decoupled from HTTP and from the browser: the
//! persisted key-value store is reached only through [`SessionStore`].
//! Token issuance and verification belong to the backend.

pub mod gate;
pub mod roles;
pub mod session;

pub use gate::{
    Access, GateConfig, HOME_PATH, LOGIN_PATH, LoginResponse, SessionGate, authorize,
    authorize_with, is_visible,
};
pub use roles::Role;
pub use session::{InMemorySessionStore, ROLE_KEY, Session, SessionState, SessionStore, TOKEN_KEY};
