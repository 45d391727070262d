//! Semantic checks on a loaded client record.
//!
//! Loading never rejects a value that converts cleanly; these checks report
//! values that convert but make no sense for a REST client.

use std::fmt;

use serde::Serialize;

use crate::client_config::RestClientConfig;
use crate::field::{self, Field};

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigIssue {
    pub field: &'static str,
    pub severity: Severity,
    pub message: String,
}

impl ConfigIssue {
    fn warning(field: &Field, message: impl Into<String>) -> Self {
        Self {
            field: field.name,
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    fn error(field: &Field, message: impl Into<String>) -> Self {
        Self {
            field: field.name,
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.field, self.message)
    }
}

impl RestClientConfig {
    /// Run all semantic checks. An empty result means the record is usable.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.url.is_none() && self.uri.is_none() {
            issues.push(ConfigIssue::warning(
                &field::URL,
                "neither url nor uri is set; the client has no base address",
            ));
        }

        check_non_negative(&mut issues, &field::CONNECT_TIMEOUT, self.connect_timeout);
        check_non_negative(&mut issues, &field::READ_TIMEOUT, self.read_timeout);
        check_non_negative(&mut issues, &field::CONNECTION_TTL, self.connection_ttl.map(i64::from));
        check_non_negative(&mut issues, &field::MAX_REDIRECTS, self.max_redirects.map(i64::from));

        if let Some(size) = self.connection_pool_size {
            if size <= 0 {
                issues.push(ConfigIssue::error(
                    &field::CONNECTION_POOL_SIZE,
                    format!("must be positive, got {}", size),
                ));
            }
        }

        if let Some(proxy) = &self.proxy_address {
            if let Err(reason) = check_proxy_address(proxy) {
                issues.push(ConfigIssue::error(&field::PROXY_ADDRESS, reason));
            }
        }

        if self.trust_store_password.is_some() && self.trust_store.is_none() {
            issues.push(ConfigIssue::warning(
                &field::TRUST_STORE_PASSWORD,
                "set without trust-store; it will be ignored",
            ));
        }
        if self.key_store_password.is_some() && self.key_store.is_none() {
            issues.push(ConfigIssue::warning(
                &field::KEY_STORE_PASSWORD,
                "set without key-store; it will be ignored",
            ));
        }

        issues
    }
}

fn check_non_negative(issues: &mut Vec<ConfigIssue>, field: &Field, value: Option<i64>) {
    if let Some(v) = value {
        if v < 0 {
            issues.push(ConfigIssue::error(
                field,
                format!("must not be negative, got {}", v),
            ));
        }
    }
}

/// Accepts `host:port` with a non-empty host and a port in `1..=65535`.
fn check_proxy_address(address: &str) -> Result<(), String> {
    let (host, port) = address
        .rsplit_once(':')
        .ok_or_else(|| format!("'{}' is not host:port", address))?;
    if host.trim().is_empty() {
        return Err(format!("'{}' has an empty host", address));
    }
    match port.parse::<u16>() {
        Ok(0) | Err(_) => Err(format!("'{}' has an invalid port '{}'", address, port)),
        Ok(_) => Ok(()),
    }
}
