//! Typed conversion of raw configuration text.

/// A type that can be parsed from a raw configuration value.
///
/// `from_config_value` never sees empty input: blank values are treated as
/// absent before conversion runs.
pub trait FromConfigValue: Sized {
    /// Human-readable type name used in conversion errors.
    const TYPE_NAME: &'static str;

    /// Parse the raw text. The error is a short reason, not a full message.
    fn from_config_value(raw: &str) -> Result<Self, String>;
}

impl FromConfigValue for String {
    const TYPE_NAME: &'static str = "string";

    fn from_config_value(raw: &str) -> Result<Self, String> {
        Ok(raw.to_string())
    }
}

macro_rules! impl_from_config_value_int {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl FromConfigValue for $ty {
                const TYPE_NAME: &'static str = $name;

                fn from_config_value(raw: &str) -> Result<Self, String> {
                    raw.trim().parse::<$ty>().map_err(|e| e.to_string())
                }
            }
        )*
    };
}

impl_from_config_value_int! {
    i64 => "long",
    i32 => "integer",
    u64 => "unsigned long",
    u32 => "unsigned integer",
}

impl FromConfigValue for bool {
    const TYPE_NAME: &'static str = "boolean";

    fn from_config_value(raw: &str) -> Result<Self, String> {
        parse_bool(raw)
    }
}

/// Strict boolean parsing: anything outside the accepted spellings fails.
pub fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "on" | "1" => Ok(true),
        "false" | "no" | "n" | "off" | "0" => Ok(false),
        _ => Err("expected boolean (true/false/yes/no/y/n/on/off/1/0)".to_string()),
    }
}
