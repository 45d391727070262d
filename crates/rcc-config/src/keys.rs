//! Composite property keys.
//!
//! A composite key is a dot-separated path. A segment that itself contains
//! dots is wrapped in double quotes so the dots are not read as separators:
//! `quarkus.rest-client."com.acme.Client".url` has four segments.

/// Wrap a segment in literal double quotes.
pub fn quote(segment: &str) -> String {
    format!("\"{}\"", segment)
}

/// Build `prefix + key + "." + field`.
///
/// The prefix is expected to carry its own trailing dot.
pub fn compose_key(prefix: &str, key: &str, field: &str) -> String {
    let mut out = String::with_capacity(prefix.len() + key.len() + field.len() + 1);
    out.push_str(prefix);
    out.push_str(key);
    out.push('.');
    out.push_str(field);
    out
}

/// Split a composite key on dots that are outside double quotes.
///
/// Quotes are stripped from the returned segments. An unterminated quote
/// swallows the rest of the key into the last segment.
pub fn split_key(key: &str) -> Vec<String> {
    let mut segments = Vec::new();
    if key.is_empty() {
        return segments;
    }

    let mut current = String::new();
    let mut in_quotes = false;
    for ch in key.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            '.' if !in_quotes => segments.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    segments.push(current);
    segments
}

/// Join segments into a composite key, quoting any segment that is empty
/// or contains a dot.
pub fn join_segments<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(|s| {
            let s = s.as_ref();
            if s.is_empty() || s.contains('.') {
                quote(s)
            } else {
                s.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}

/// Strip one layer of surrounding double quotes, if present.
pub fn unquote(segment: &str) -> &str {
    segment
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(segment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote() {
        assert_eq!(quote("my-client"), "\"my-client\"");
        assert_eq!(quote(""), "\"\"");
    }

    #[test]
    fn test_compose_key() {
        assert_eq!(
            compose_key("quarkus.rest-client.", "my-client", "url"),
            "quarkus.rest-client.my-client.url"
        );
        assert_eq!(
            compose_key("p.", &quote("com.acme.Client"), "connect-timeout"),
            "p.\"com.acme.Client\".connect-timeout"
        );
    }

    #[test]
    fn test_split_key_respects_quotes() {
        assert_eq!(
            split_key("quarkus.rest-client.\"com.acme.Client\".url"),
            vec!["quarkus", "rest-client", "com.acme.Client", "url"]
        );
        assert_eq!(split_key("a..b"), vec!["a", "", "b"]);
        assert!(split_key("").is_empty());
    }

    #[test]
    fn test_join_segments_requotes_dotted() {
        let key = join_segments(&["quarkus", "rest-client", "com.acme.Client", "url"]);
        assert_eq!(key, "quarkus.rest-client.\"com.acme.Client\".url");
        assert_eq!(split_key(&key).len(), 4);
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"x.y\""), "x.y");
        assert_eq!(unquote("plain"), "plain");
        assert_eq!(unquote("\"half"), "\"half");
    }

    #[test]
    fn test_empty_segment_survives_join() {
        let segments = split_key("\"\"");
        assert_eq!(segments, vec![""]);
        let joined = join_segments(&segments);
        assert_eq!(joined, "\"\"");
        assert_eq!(split_key(&joined), segments);

        let segments = split_key("a..b");
        assert_eq!(split_key(&join_segments(&segments)), segments);
    }
}
