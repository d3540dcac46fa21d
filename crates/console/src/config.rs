//! Environment-driven configuration, read once at startup.

use clinic_auth::GateConfig;
use clinic_inventory::ExpiryPolicy;
use clinic_inventory::expiry::DEFAULT_WARNING_DAYS;
use clinic_observability::LogFormat;

pub const WARNING_DAYS_VAR: &str = "CLINIC_EXPIRY_WARNING_DAYS";
pub const ENFORCE_ROLES_VAR: &str = "CLINIC_ENFORCE_ROLES";
pub const LOG_FORMAT_VAR: &str = "CLINIC_LOG_FORMAT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub expiry_warning_days: u32,
    pub enforce_roles: bool,
    pub log_format: LogFormat,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            expiry_warning_days: DEFAULT_WARNING_DAYS,
            enforce_roles: false,
            log_format: LogFormat::Pretty,
        }
    }
}

impl ConsoleConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unparseable values fall back to
    /// defaults with a warning rather than aborting startup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let expiry_warning_days = match lookup(WARNING_DAYS_VAR) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(var = WARNING_DAYS_VAR, value = %raw, "invalid value; using default");
                defaults.expiry_warning_days
            }),
            None => defaults.expiry_warning_days,
        };

        let enforce_roles = match lookup(ENFORCE_ROLES_VAR) {
            Some(raw) => parse_flag(&raw).unwrap_or_else(|| {
                tracing::warn!(var = ENFORCE_ROLES_VAR, value = %raw, "invalid value; using default");
                defaults.enforce_roles
            }),
            None => defaults.enforce_roles,
        };

        let log_format = lookup(LOG_FORMAT_VAR)
            .and_then(|raw| LogFormat::parse(&raw))
            .unwrap_or(defaults.log_format);

        Self {
            expiry_warning_days,
            enforce_roles,
            log_format,
        }
    }

    pub fn expiry_policy(&self) -> ExpiryPolicy {
        ExpiryPolicy::new(self.expiry_warning_days)
    }

    pub fn gate_config(&self) -> GateConfig {
        GateConfig {
            enforce_roles: self.enforce_roles,
            ..GateConfig::default()
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ConsoleConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ConsoleConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]);
        assert_eq!(config, ConsoleConfig::default());
        assert_eq!(config.expiry_policy().warning_days(), 30);
        assert!(!config.gate_config().enforce_roles);
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            (WARNING_DAYS_VAR, "14"),
            (ENFORCE_ROLES_VAR, "yes"),
            (LOG_FORMAT_VAR, "json"),
        ]);
        assert_eq!(config.expiry_warning_days, 14);
        assert!(config.gate_config().enforce_roles);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = config_from(&[(WARNING_DAYS_VAR, "-3"), (ENFORCE_ROLES_VAR, "maybe")]);
        assert_eq!(config.expiry_warning_days, DEFAULT_WARNING_DAYS);
        assert!(!config.enforce_roles);
    }
}
