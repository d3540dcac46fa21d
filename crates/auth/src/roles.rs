use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use clinic_core::ValueObject;

/// Staff role (e.g. "doctor", "pharmacist").
///
/// Roles are opaque strings chosen at registration. Comparison with
/// [`Role::matches`] ignores case; `PartialEq` stays exact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl ValueObject for Role {}

impl Role {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive match against a required role name.
    pub fn matches(&self, required: &str) -> bool {
        let (have, want) = (self.as_str().trim(), required.trim());
        have.to_lowercase() == want.to_lowercase()
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_ignoring_case() {
        let role = Role::new("Doctor");
        assert!(role.matches("doctor"));
        assert!(role.matches("DOCTOR"));
        assert!(role.matches(" doctor "));
        assert!(!role.matches("nurse"));
        assert_ne!(role, Role::new("doctor"));
    }

    #[test]
    fn matches_non_ascii_names() {
        assert!(Role::new("ÄRZTIN").matches("ärztin"));
    }
}
