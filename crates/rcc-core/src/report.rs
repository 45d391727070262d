//! Command payloads and their summary renderings.
//!
//! Builders here take an already assembled source; they never read the
//! process environment or the filesystem.

use serde::Serialize;

use rcc_config::{ConfigSource, LayeredConfig};
use rcc_envers::{contribute_boot_properties, AbsentPolicy, EnversConfig, PropertyValue};
use rcc_rest::{
    configured_clients, ClientConfigResolver, ClientIdentity, ConfigIssue, Explanation, Field,
    FieldKind, FieldValue, RestClientConfig, Severity, REDACTED,
};

use crate::error::Result;

// ============================================================================
// client
// ============================================================================

/// Resolved record for one client.
#[derive(Debug, Clone, Serialize)]
pub struct ClientReport {
    pub identity: String,
    /// `key` or `type`.
    pub kind: &'static str,
    pub config: RestClientConfig,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<ConfigIssue>,
}

impl ClientReport {
    /// Load `identity`, optionally filling gaps from `fallback`.
    pub fn build<S: ConfigSource + ?Sized>(
        resolver: &ClientConfigResolver<'_, S>,
        identity: &ClientIdentity,
        fallback: Option<&ClientIdentity>,
        show_secrets: bool,
    ) -> Result<Self> {
        let mut config = RestClientConfig::load(resolver, identity)?;
        if let Some(fallback) = fallback {
            let defaults = RestClientConfig::load(resolver, fallback)?;
            config = config.with_fallback(&defaults);
        }
        let issues = config.validate();
        Ok(Self {
            identity: identity.as_str().to_string(),
            kind: identity_kind(identity),
            config: if show_secrets { config } else { config.redacted() },
            issues,
        })
    }

    pub fn summary(&self) -> String {
        let mut out = format!(
            "{} {}: {} field(s) set\n",
            self.kind,
            self.identity,
            self.config.present_count()
        );
        let json = serde_json::to_value(&self.config).unwrap_or_default();
        if let Some(map) = json.as_object() {
            for field in rcc_rest::FIELDS.iter() {
                match map.get(field.name) {
                    Some(serde_json::Value::Null) | None => {}
                    Some(serde_json::Value::String(s)) => out.push_str(&format!("  {} = {}\n", field.name, s)),
                    Some(other) => out.push_str(&format!("  {} = {}\n", field.name, other)),
                }
            }
        }
        for issue in &self.issues {
            out.push_str(&format!("  {}\n", issue));
        }
        out.trim_end().to_string()
    }
}

fn identity_kind(identity: &ClientIdentity) -> &'static str {
    match identity {
        ClientIdentity::Key(_) => "key",
        ClientIdentity::Type { .. } => "type",
    }
}

// ============================================================================
// explain
// ============================================================================

/// One probed key, with the layer that defines it.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateReport {
    pub key: String,
    pub raw: Option<String>,
    pub layer: Option<String>,
}

/// How one field of one client was resolved.
#[derive(Debug, Clone, Serialize)]
pub struct ExplainReport {
    pub identity: String,
    pub field: &'static str,
    pub kind: FieldKind,
    pub matched_key: Option<String>,
    /// Source that supplied the matched key.
    pub layer: Option<String>,
    pub value: Option<FieldValue>,
    pub error: Option<String>,
    pub candidates: Vec<CandidateReport>,
}

impl ExplainReport {
    pub fn build(
        resolver: &ClientConfigResolver<'_, LayeredConfig>,
        identity: &ClientIdentity,
        field: &Field,
        show_secrets: bool,
    ) -> Self {
        let layered = resolver.source();
        let Explanation {
            identity,
            field: field_name,
            kind,
            candidates,
            matched_key,
            value,
            error,
        } = resolver.explain(identity, field);
        let mask = field.secret && !show_secrets;

        let layer = matched_key
            .as_deref()
            .and_then(|key| layered.lookup(key))
            .map(|lookup| lookup.source);
        let candidates = candidates
            .into_iter()
            .map(|candidate| {
                let layer = layered.lookup(&candidate.key).map(|lookup| lookup.source);
                CandidateReport {
                    raw: if mask {
                        candidate.raw.map(|_| REDACTED.to_string())
                    } else {
                        candidate.raw
                    },
                    key: candidate.key,
                    layer,
                }
            })
            .collect();
        let value = if mask {
            value.map(|_| FieldValue::String(REDACTED.to_string()))
        } else {
            value
        };

        Self {
            identity,
            field: field_name,
            kind,
            matched_key,
            layer,
            value,
            error,
            candidates,
        }
    }

    pub fn summary(&self) -> String {
        let mut out = format!("{} {} ({})\n", self.identity, self.field, self.kind);
        for (i, candidate) in self.candidates.iter().enumerate() {
            let marker = if self.matched_key.as_deref() == Some(candidate.key.as_str()) {
                "*"
            } else {
                " "
            };
            let found = match (&candidate.raw, &candidate.layer) {
                (Some(raw), Some(layer)) => format!("{:?} from {}", raw, layer),
                _ => "-".to_string(),
            };
            out.push_str(&format!("{} {}. {} => {}\n", marker, i + 1, candidate.key, found));
        }
        match (&self.value, &self.error) {
            (_, Some(error)) => out.push_str(&format!("error: {}", error)),
            (Some(value), None) => out.push_str(&format!("value: {}", value)),
            (None, None) => out.push_str("value: <absent>"),
        }
        out
    }
}

// ============================================================================
// list
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ListReport {
    pub prefix: String,
    pub clients: Vec<String>,
}

impl ListReport {
    pub fn build<S: ConfigSource + ?Sized>(source: &S, prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            clients: configured_clients(source, prefix),
        }
    }

    pub fn summary(&self) -> String {
        if self.clients.is_empty() {
            return format!("no clients configured under {}", self.prefix);
        }
        self.clients.join("\n")
    }
}

// ============================================================================
// check
// ============================================================================

/// Overall result of a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckStatus::Ok => write!(f, "ok"),
            CheckStatus::Warning => write!(f, "warning"),
            CheckStatus::Error => write!(f, "error"),
        }
    }
}

/// Findings for one configured client.
#[derive(Debug, Clone, Serialize)]
pub struct ClientCheck {
    pub client: String,
    pub status: CheckStatus,
    pub conversion_errors: Vec<String>,
    pub issues: Vec<ConfigIssue>,
}

impl ClientCheck {
    fn run<S: ConfigSource + ?Sized>(resolver: &ClientConfigResolver<'_, S>, client: String) -> Self {
        let identity = ClientIdentity::key(client.clone());
        let (config, errors) = RestClientConfig::load_lenient(resolver, &identity);
        let issues = config.validate();

        let status = if !errors.is_empty() || issues.iter().any(|i| i.severity == Severity::Error) {
            CheckStatus::Error
        } else if issues.is_empty() {
            CheckStatus::Ok
        } else {
            CheckStatus::Warning
        };

        Self {
            client,
            status,
            conversion_errors: errors.iter().map(|e| e.to_string()).collect(),
            issues,
        }
    }

    fn error_count(&self) -> usize {
        self.conversion_errors.len()
            + self
                .issues
                .iter()
                .filter(|i| i.severity == Severity::Error)
                .count()
    }

    fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }
}

/// Result of validating every configured client.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub generated_at: String,
    pub run_id: String,
    pub status: CheckStatus,
    pub config_file: Option<String>,
    pub config_origin: String,
    pub errors: usize,
    pub warnings: usize,
    /// Conversion failure in the audit settings, if any.
    pub envers_error: Option<String>,
    pub clients: Vec<ClientCheck>,
}

/// Where the checked configuration came from.
#[derive(Debug, Clone)]
pub struct CheckContext {
    pub run_id: String,
    pub config_file: Option<String>,
    pub config_origin: String,
}

impl CheckReport {
    pub fn build<S: ConfigSource + ?Sized>(
        resolver: &ClientConfigResolver<'_, S>,
        context: CheckContext,
    ) -> Self {
        let clients: Vec<ClientCheck> = configured_clients(resolver.source(), resolver.prefix())
            .into_iter()
            .map(|client| ClientCheck::run(resolver, client))
            .collect();
        let envers_error = EnversConfig::load(resolver.source()).err().map(|e| e.to_string());

        let errors = clients.iter().map(ClientCheck::error_count).sum::<usize>()
            + usize::from(envers_error.is_some());
        let warnings = clients.iter().map(ClientCheck::warning_count).sum::<usize>();
        let status = if errors > 0 {
            CheckStatus::Error
        } else if warnings > 0 {
            CheckStatus::Warning
        } else {
            CheckStatus::Ok
        };

        tracing::info!(clients = clients.len(), errors, warnings, "check complete");

        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            run_id: context.run_id,
            status,
            config_file: context.config_file,
            config_origin: context.config_origin,
            errors,
            warnings,
            envers_error,
            clients,
        }
    }

    pub fn summary(&self) -> String {
        let mut out = format!(
            "check {}: {} client(s), {} error(s), {} warning(s)\n",
            self.status,
            self.clients.len(),
            self.errors,
            self.warnings
        );
        for client in &self.clients {
            out.push_str(&format!("[{}] {}\n", client.status, client.client));
            for error in &client.conversion_errors {
                out.push_str(&format!("  error: {}\n", error));
            }
            for issue in &client.issues {
                out.push_str(&format!("  {}\n", issue));
            }
        }
        if let Some(error) = &self.envers_error {
            out.push_str(&format!("[error] envers\n  error: {}\n", error));
        }
        out.trim_end().to_string()
    }
}

// ============================================================================
// envers
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct BootProperty {
    pub name: String,
    pub value: PropertyValue,
}

/// Boot properties in contribution order.
#[derive(Debug, Clone, Serialize)]
pub struct EnversReport {
    pub properties: Vec<BootProperty>,
}

impl EnversReport {
    pub fn build<S: ConfigSource + ?Sized>(source: &S, absent: AbsentPolicy) -> Result<Self> {
        let config = EnversConfig::load(source)?;
        let mut properties = Vec::new();
        let mut sink = |name: &str, value: PropertyValue| {
            properties.push(BootProperty {
                name: name.to_string(),
                value,
            })
        };
        contribute_boot_properties(&config, &mut sink, absent);
        Ok(Self { properties })
    }

    /// One `name=value` line per property.
    pub fn summary(&self) -> String {
        self.properties
            .iter()
            .map(|p| format!("{}={}", p.name, p.value))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
