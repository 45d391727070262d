//! Query parameter encoding styles.

use std::fmt;
use std::str::FromStr;

use rcc_config::FromConfigValue;
use serde::{Deserialize, Serialize};

/// How multiple values for one query parameter are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryParamStyle {
    /// `k=v1&k=v2`
    #[default]
    MultiPairs,
    /// `k=v1,v2`
    CommaSeparated,
    /// `k[]=v1&k[]=v2`
    ArrayPairs,
}

impl QueryParamStyle {
    pub const ALL: &'static [QueryParamStyle] = &[
        QueryParamStyle::MultiPairs,
        QueryParamStyle::CommaSeparated,
        QueryParamStyle::ArrayPairs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QueryParamStyle::MultiPairs => "MULTI_PAIRS",
            QueryParamStyle::CommaSeparated => "COMMA_SEPARATED",
            QueryParamStyle::ArrayPairs => "ARRAY_PAIRS",
        }
    }
}

impl fmt::Display for QueryParamStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryParamStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        QueryParamStyle::ALL
            .iter()
            .copied()
            .find(|style| style.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "expected one of {}",
                    QueryParamStyle::ALL
                        .iter()
                        .map(|s| s.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
    }
}

impl FromConfigValue for QueryParamStyle {
    const TYPE_NAME: &'static str = "query-param-style";

    fn from_config_value(raw: &str) -> Result<Self, String> {
        raw.parse()
    }
}
