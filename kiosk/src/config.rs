//! Configuration management for the kiosk.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::submission::CartDisposition;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but its value cannot be used
    #[error("invalid value '{value}' for {key}: {reason}")]
    Invalid {
        /// Variable name
        key: &'static str,
        /// Raw value
        value: String,
        /// What was expected
        reason: &'static str,
    },
}

/// Kiosk configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KioskConfig {
    /// Header shown above the menu
    pub title: String,
    /// Log filter used when `RUST_LOG` is unset
    pub log_level: String,
    /// Remove submitted entries from the cart once checkout succeeds
    pub clear_cart_on_checkout: bool,
    /// Bound on a single checkout handoff
    pub checkout_timeout: Duration,
    /// How long to wait for in-flight effects on exit
    pub shutdown_timeout: Duration,
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            title: "Chinese Restaurant Kiosk".to_string(),
            log_level: "info".to_string(),
            clear_cart_on_checkout: false,
            checkout_timeout: Duration::from_secs(10),
            shutdown_timeout: Duration::from_secs(5),
        }
    }
}

impl KioskConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a variable is set to a value that
    /// does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a variable is set to a value that
    /// does not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            title: lookup("KIOSK_TITLE")
                .filter(|title| !title.trim().is_empty())
                .unwrap_or(defaults.title),
            log_level: lookup("KIOSK_LOG_LEVEL").unwrap_or(defaults.log_level),
            clear_cart_on_checkout: parse(
                &lookup,
                "KIOSK_CLEAR_CART_ON_CHECKOUT",
                "expected true or false",
            )?
            .unwrap_or(defaults.clear_cart_on_checkout),
            checkout_timeout: parse(
                &lookup,
                "KIOSK_CHECKOUT_TIMEOUT_SECS",
                "expected a whole number of seconds",
            )?
            .map_or(defaults.checkout_timeout, Duration::from_secs),
            shutdown_timeout: parse(
                &lookup,
                "KIOSK_SHUTDOWN_TIMEOUT_SECS",
                "expected a whole number of seconds",
            )?
            .map_or(defaults.shutdown_timeout, Duration::from_secs),
        })
    }

    /// Cart policy handed to the order submitter
    #[must_use]
    pub const fn cart_disposition(&self) -> CartDisposition {
        if self.clear_cart_on_checkout {
            CartDisposition::Clear
        } else {
            CartDisposition::Retain
        }
    }
}

fn parse<T, F>(lookup: &F, key: &'static str, reason: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| {
            value.trim().parse().map_err(|_| ConfigError::Invalid {
                key,
                value: value.clone(),
                reason,
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code can use unwrap

    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = KioskConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, KioskConfig::default());
        assert_eq!(config.title, "Chinese Restaurant Kiosk");
        assert_eq!(config.cart_disposition(), CartDisposition::Retain);
    }

    #[test]
    fn reads_every_variable() {
        let config = KioskConfig::from_lookup(lookup_from(&[
            ("KIOSK_TITLE", "Golden Dragon"),
            ("KIOSK_LOG_LEVEL", "debug"),
            ("KIOSK_CLEAR_CART_ON_CHECKOUT", "true"),
            ("KIOSK_CHECKOUT_TIMEOUT_SECS", " 3 "),
            ("KIOSK_SHUTDOWN_TIMEOUT_SECS", "1"),
        ]))
        .unwrap();

        assert_eq!(config.title, "Golden Dragon");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.cart_disposition(), CartDisposition::Clear);
        assert_eq!(config.checkout_timeout, Duration::from_secs(3));
        assert_eq!(config.shutdown_timeout, Duration::from_secs(1));
    }

    #[test]
    fn blank_title_falls_back() {
        let config = KioskConfig::from_lookup(lookup_from(&[("KIOSK_TITLE", "   ")])).unwrap();
        assert_eq!(config.title, "Chinese Restaurant Kiosk");
    }

    #[test]
    fn rejects_unparseable_values() {
        let err = KioskConfig::from_lookup(lookup_from(&[("KIOSK_CHECKOUT_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "KIOSK_CHECKOUT_TIMEOUT_SECS",
                value: "soon".to_string(),
                reason: "expected a whole number of seconds",
            }
        );

        let err = KioskConfig::from_lookup(lookup_from(&[("KIOSK_CLEAR_CART_ON_CHECKOUT", "yes")]))
            .unwrap_err();
        assert!(err.to_string().contains("KIOSK_CLEAR_CART_ON_CHECKOUT"));
    }
}
