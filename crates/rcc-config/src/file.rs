//! Application config files.
//!
//! Every supported format is flattened into dotted composite keys. Nested
//! table names become path segments; a name that contains a dot becomes a
//! quoted segment, so
//!
//! ```toml
//! [quarkus.rest-client."com.acme.Client"]
//! url = "http://x"
//! ```
//!
//! is read as `quarkus.rest-client."com.acme.Client".url`.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{ConfigError, ConfigResult};
use crate::keys::join_segments;
use crate::source::{ConfigSource, ORDINAL_FILE};

/// Supported config file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Properties,
    Toml,
    Yaml,
    Json,
}

impl FileFormat {
    /// Recognized file extensions, in discovery order.
    pub const EXTENSIONS: &'static [&'static str] = &["properties", "toml", "yaml", "yml", "json"];

    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Option<FileFormat> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "properties" => Some(FileFormat::Properties),
            "toml" => Some(FileFormat::Toml),
            "yaml" | "yml" => Some(FileFormat::Yaml),
            "json" => Some(FileFormat::Json),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileFormat::Properties => "properties",
            FileFormat::Toml => "toml",
            FileFormat::Yaml => "yaml",
            FileFormat::Json => "json",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A config file, fully read and flattened at construction.
#[derive(Debug, Clone)]
pub struct FileSource {
    name: String,
    path: Option<PathBuf>,
    format: FileFormat,
    ordinal: i32,
    values: BTreeMap<String, String>,
}

impl FileSource {
    /// Read and parse a config file. The format comes from the extension.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let format = FileFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let values = parse_content(format, &content).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            format: format.as_str(),
            message,
        })?;
        tracing::debug!(
            path = %path.display(),
            %format,
            keys = values.len(),
            "loaded config file"
        );

        Ok(Self {
            name: path.display().to_string(),
            path: Some(path.to_path_buf()),
            format,
            ordinal: ORDINAL_FILE,
            values,
        })
    }

    /// Parse in-memory content as if it had been read from a file.
    pub fn from_content(name: impl Into<String>, format: FileFormat, content: &str) -> ConfigResult<Self> {
        let name = name.into();
        let values = parse_content(format, content).map_err(|message| ConfigError::Parse {
            path: PathBuf::from(&name),
            format: format.as_str(),
            message,
        })?;
        Ok(Self {
            name,
            path: None,
            format,
            ordinal: ORDINAL_FILE,
            values,
        })
    }

    /// Set the ordinal.
    pub fn with_ordinal(mut self, ordinal: i32) -> Self {
        self.ordinal = ordinal;
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }
}

impl ConfigSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn ordinal(&self) -> i32 {
        self.ordinal
    }

    fn get_value(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }
}

/// Parse file content into flattened key/value pairs.
pub fn parse_content(format: FileFormat, content: &str) -> Result<BTreeMap<String, String>, String> {
    match format {
        FileFormat::Properties => Ok(parse_properties(content)),
        FileFormat::Toml => {
            let value: toml::Value = toml::from_str(content).map_err(|e| e.to_string())?;
            Ok(flatten(&toml_to_json(value)))
        }
        FileFormat::Yaml => {
            if content.trim().is_empty() {
                return Ok(BTreeMap::new());
            }
            let value: serde_yaml::Value = serde_yaml::from_str(content).map_err(|e| e.to_string())?;
            Ok(flatten(&yaml_to_json(value)))
        }
        FileFormat::Json => {
            let value: Value = serde_json::from_str(content).map_err(|e| e.to_string())?;
            Ok(flatten(&value))
        }
    }
}

// ============================================================================
// Properties
// ============================================================================

/// Parse `.properties` text.
///
/// Supports `#`/`!` comments, `=`, `:` or whitespace separators, trailing
/// backslash line continuation and the usual escapes (`\t`, `\n`, `\r`,
/// `\f`, `\uXXXX`). Later duplicates replace earlier ones.
pub fn parse_properties(content: &str) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    let mut lines = content.lines();

    while let Some(line) = lines.next() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }

        let mut logical = trimmed.to_string();
        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some(next) => logical.push_str(next.trim_start()),
                None => break,
            }
        }

        let (key, value) = split_property(&logical);
        out.insert(key, value);
    }

    out
}

fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

fn split_property(line: &str) -> (String, String) {
    let mut escaped = false;
    let mut separator = None;
    for (idx, ch) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '=' | ':' => {
                separator = Some((idx, ch.len_utf8(), true));
                break;
            }
            c if c.is_whitespace() => {
                separator = Some((idx, c.len_utf8(), false));
                break;
            }
            _ => {}
        }
    }

    let (raw_key, raw_value) = match separator {
        None => (line, ""),
        Some((idx, len, explicit)) => {
            let mut rest = line[idx + len..].trim_start();
            if !explicit {
                if let Some(after) = rest.strip_prefix(|c: char| c == '=' || c == ':') {
                    rest = after.trim_start();
                }
            }
            (&line[..idx], rest)
        }
    };

    (unescape(raw_key), unescape(raw_value))
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) if hex.len() == 4 => out.push(decoded),
                    _ => {
                        out.push('u');
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

// ============================================================================
// Structured formats
// ============================================================================

fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => Value::String(f.to_string()),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}

fn yaml_to_json(value: serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => Value::String(n.to_string()),
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => {
            Value::Array(items.into_iter().map(yaml_to_json).collect())
        }
        serde_yaml::Value::Mapping(map) => Value::Object(
            map.into_iter()
                .filter_map(|(k, v)| yaml_key(&k).map(|k| (k, yaml_to_json(v))))
                .collect(),
        ),
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn yaml_key(key: &serde_yaml::Value) -> Option<String> {
    match key {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Flatten a document into composite keys. Nulls are skipped.
fn flatten(root: &Value) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    let mut path = Vec::new();
    flatten_into(&mut path, root, &mut out);
    out
}

fn flatten_into(path: &mut Vec<String>, value: &Value, out: &mut BTreeMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                path.push(key.clone());
                flatten_into(path, child, out);
                path.pop();
            }
        }
        Value::Null => {}
        Value::Array(items) => {
            if path.is_empty() {
                return;
            }
            let joined = items
                .iter()
                .filter_map(scalar_text)
                .collect::<Vec<_>>()
                .join(",");
            out.insert(join_segments(path), joined);
        }
        scalar => {
            if path.is_empty() {
                return;
            }
            if let Some(text) = scalar_text(scalar) {
                out.insert(join_segments(path), text);
            }
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            FileFormat::from_path(Path::new("application.properties")),
            Some(FileFormat::Properties)
        );
        assert_eq!(FileFormat::from_path(Path::new("a.YML")), Some(FileFormat::Yaml));
        assert_eq!(FileFormat::from_path(Path::new("a.ini")), None);
        assert_eq!(FileFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_properties_basic() {
        let map = parse_properties(
            "# comment\n\
             ! also comment\n\
             a.b=1\n\
             c.d : two\n\
             e.f   three\n\
             quarkus.rest-client.\"my-client\".url=http://x\n",
        );
        assert_eq!(map.get("a.b").map(String::as_str), Some("1"));
        assert_eq!(map.get("c.d").map(String::as_str), Some("two"));
        assert_eq!(map.get("e.f").map(String::as_str), Some("three"));
        assert_eq!(
            map.get("quarkus.rest-client.\"my-client\".url").map(String::as_str),
            Some("http://x")
        );
    }

    #[test]
    fn test_properties_continuation_and_escapes() {
        let map = parse_properties("list=a,\\\n    b,\\\n    c\nesc=tab\\there\nuni=\\u0041\n");
        assert_eq!(map.get("list").map(String::as_str), Some("a,b,c"));
        assert_eq!(map.get("esc").map(String::as_str), Some("tab\there"));
        assert_eq!(map.get("uni").map(String::as_str), Some("A"));
    }

    #[test]
    fn test_properties_key_without_value() {
        let map = parse_properties("lonely\n");
        assert_eq!(map.get("lonely").map(String::as_str), Some(""));
    }

    #[test]
    fn test_toml_quotes_dotted_table_names() {
        let content = r#"
            [quarkus.rest-client."com.acme.Client"]
            url = "http://x"
            connect-timeout = 5000
            follow-redirects = true
        "#;
        let map = parse_content(FileFormat::Toml, content).unwrap();
        assert_eq!(
            map.get("quarkus.rest-client.\"com.acme.Client\".url").map(String::as_str),
            Some("http://x")
        );
        assert_eq!(
            map.get("quarkus.rest-client.\"com.acme.Client\".connect-timeout")
                .map(String::as_str),
            Some("5000")
        );
        assert_eq!(
            map.get("quarkus.rest-client.\"com.acme.Client\".follow-redirects")
                .map(String::as_str),
            Some("true")
        );
    }

    #[test]
    fn test_yaml_flatten() {
        let content = "quarkus:\n  rest-client:\n    api:\n      url: http://y\n      providers:\n        - a.B\n        - c.D\n";
        let map = parse_content(FileFormat::Yaml, content).unwrap();
        assert_eq!(
            map.get("quarkus.rest-client.api.url").map(String::as_str),
            Some("http://y")
        );
        assert_eq!(
            map.get("quarkus.rest-client.api.providers").map(String::as_str),
            Some("a.B,c.D")
        );
    }

    #[test]
    fn test_empty_yaml_is_empty() {
        assert!(parse_content(FileFormat::Yaml, "  \n").unwrap().is_empty());
    }

    #[test]
    fn test_json_skips_null() {
        let map = parse_content(FileFormat::Json, r#"{"a": {"b": null, "c": 3}}"#).unwrap();
        assert!(!map.contains_key("a.b"));
        assert_eq!(map.get("a.c").map(String::as_str), Some("3"));
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = FileSource::from_content("bad.toml", FileFormat::Toml, "= = =").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { format: "toml", .. }));
    }
}
