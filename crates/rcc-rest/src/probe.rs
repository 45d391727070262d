//! Ordered probing: first present candidate wins.

/// A value found by [`probe_first`] and the candidate key that held it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probe<T> {
    pub value: T,
    pub key: String,
}

/// Try each candidate in order and return the first present value.
///
/// Absent candidates fall through to the next one. An error from `lookup`
/// stops the probe immediately and is returned unchanged.
pub fn probe_first<T, E, I, F>(candidates: I, mut lookup: F) -> Result<Option<Probe<T>>, E>
where
    I: IntoIterator<Item = String>,
    F: FnMut(&str) -> Result<Option<T>, E>,
{
    for key in candidates {
        tracing::trace!(key = %key, "probing config key");
        if let Some(value) = lookup(&key)? {
            return Ok(Some(Probe { value, key }));
        }
    }
    Ok(None)
}
