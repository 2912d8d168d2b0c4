//! String actions

use crate::action::{Action, Predicate, Rule};
use crate::checks;
use regex::Regex;
use std::borrow::Cow;
use std::fmt;

/// Action over a string value
pub type StringAction = Action<StringRule>;

/// A format check delegated to a stateless checker
#[derive(Clone, Copy)]
pub struct Format {
    pub code: &'static str,
    pub description: &'static str,
    pub check: fn(&str) -> bool,
}

impl fmt::Debug for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Format")
            .field("code", &self.code)
            .field("description", &self.description)
            .finish()
    }
}

/// Rules applicable to strings
#[derive(Debug, Clone)]
pub enum StringRule {
    NotEmpty,
    OneOf(Vec<String>),
    Pattern(Regex),
    /// Minimum length in characters (inclusive)
    MinLength(usize),
    /// Maximum length in characters (inclusive)
    MaxLength(usize),
    Prefix(String),
    Suffix(String),
    Contains(String),
    EqualFold(String),
    Format(Format),
    Custom(Predicate<str>),
}

impl Rule for StringRule {
    type Value = String;

    fn check(&self, value: &String) -> bool {
        match self {
            StringRule::NotEmpty => !value.is_empty(),
            StringRule::OneOf(allowed) => allowed.iter().any(|candidate| candidate == value),
            StringRule::Pattern(regex) => regex.is_match(value),
            StringRule::MinLength(min) => value.chars().count() >= *min,
            StringRule::MaxLength(max) => value.chars().count() <= *max,
            StringRule::Prefix(prefix) => value.starts_with(prefix.as_str()),
            StringRule::Suffix(suffix) => value.ends_with(suffix.as_str()),
            StringRule::Contains(needle) => value.contains(needle.as_str()),
            StringRule::EqualFold(target) => value.to_lowercase() == target.to_lowercase(),
            StringRule::Format(format) => (format.check)(value),
            StringRule::Custom(predicate) => predicate.test(value),
        }
    }

    fn describe(&self) -> Cow<'static, str> {
        match self {
            StringRule::NotEmpty => Cow::Borrowed("cannot be empty"),
            StringRule::OneOf(_) => Cow::Borrowed("value is not allowed"),
            StringRule::Pattern(regex) => {
                Cow::Owned(format!("string doesn't follow the pattern {}", regex.as_str()))
            }
            StringRule::MinLength(min) => {
                Cow::Owned(format!("string length must be at least {}", min))
            }
            StringRule::MaxLength(max) => {
                Cow::Owned(format!("string length exceeds maximum of {}", max))
            }
            StringRule::Prefix(prefix) => Cow::Owned(format!("must start with {}", prefix)),
            StringRule::Suffix(suffix) => Cow::Owned(format!("must end with {}", suffix)),
            StringRule::Contains(needle) => Cow::Owned(format!("must contain {}", needle)),
            StringRule::EqualFold(target) => {
                Cow::Owned(format!("must be equal to {} (case-insensitive)", target))
            }
            StringRule::Format(format) => Cow::Borrowed(format.description),
            StringRule::Custom(_) => Cow::Borrowed("invalid string"),
        }
    }

    fn code(&self) -> &'static str {
        match self {
            StringRule::NotEmpty => "not_empty",
            StringRule::OneOf(_) => "one_of",
            StringRule::Pattern(_) => "pattern",
            StringRule::MinLength(_) => "min_length",
            StringRule::MaxLength(_) => "max_length",
            StringRule::Prefix(_) => "prefix",
            StringRule::Suffix(_) => "suffix",
            StringRule::Contains(_) => "contains",
            StringRule::EqualFold(_) => "equal_fold",
            StringRule::Format(format) => format.code,
            StringRule::Custom(_) => "custom",
        }
    }
}

impl Action<StringRule> {
    /// Wrap a caller-supplied predicate. Default message: "invalid string".
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self::new(StringRule::Custom(Predicate::new(predicate)))
    }

    pub fn not_empty() -> Self {
        Self::new(StringRule::NotEmpty)
    }

    /// The value must equal one of the allowed strings
    pub fn one_of<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(StringRule::OneOf(allowed.into_iter().map(Into::into).collect()))
    }

    /// The value must contain a match of the regular expression.
    ///
    /// The pattern is compiled here, once; anchor it with `^...$` for a full match.
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self::new(StringRule::Pattern(Regex::new(pattern)?)))
    }

    /// Create from an already compiled regex
    pub fn from_regex(regex: Regex) -> Self {
        Self::new(StringRule::Pattern(regex))
    }

    pub fn min_length(min: usize) -> Self {
        Self::new(StringRule::MinLength(min))
    }

    pub fn max_length(max: usize) -> Self {
        Self::new(StringRule::MaxLength(max))
    }

    pub fn has_prefix(prefix: impl Into<String>) -> Self {
        Self::new(StringRule::Prefix(prefix.into()))
    }

    pub fn has_suffix(suffix: impl Into<String>) -> Self {
        Self::new(StringRule::Suffix(suffix.into()))
    }

    pub fn contains(needle: impl Into<String>) -> Self {
        Self::new(StringRule::Contains(needle.into()))
    }

    /// Case-insensitive equality
    pub fn equal_fold(target: impl Into<String>) -> Self {
        Self::new(StringRule::EqualFold(target.into()))
    }

    /// Delegate to any `fn(&str) -> bool` checker
    pub fn format(description: &'static str, check: fn(&str) -> bool) -> Self {
        Self::checked("format", description, check)
    }

    fn checked(code: &'static str, description: &'static str, check: fn(&str) -> bool) -> Self {
        Self::new(StringRule::Format(Format {
            code,
            description,
            check,
        }))
    }

    pub fn email() -> Self {
        Self::checked("email", "not a valid email", checks::is_email)
    }

    pub fn url() -> Self {
        Self::checked("url", "not a valid URL", checks::is_url)
    }

    pub fn uuid() -> Self {
        Self::checked("uuid", "not a valid UUID", checks::is_uuid)
    }

    pub fn uuid_v1() -> Self {
        Self::checked("uuid_v1", "not a valid UUIDv1", checks::is_uuid_v1)
    }

    pub fn uuid_v3() -> Self {
        Self::checked("uuid_v3", "not a valid UUIDv3", checks::is_uuid_v3)
    }

    pub fn uuid_v4() -> Self {
        Self::checked("uuid_v4", "not a valid UUIDv4", checks::is_uuid_v4)
    }

    pub fn uuid_v5() -> Self {
        Self::checked("uuid_v5", "not a valid UUIDv5", checks::is_uuid_v5)
    }

    pub fn ipv4() -> Self {
        Self::checked("ipv4", "not a valid IPv4 address", checks::is_ipv4)
    }

    pub fn ipv6() -> Self {
        Self::checked("ipv6", "not a valid IPv6 address", checks::is_ipv6)
    }

    pub fn json() -> Self {
        Self::checked("json", "not a valid JSON string", checks::is_json)
    }

    pub fn base64() -> Self {
        Self::checked("base64", "not a valid base64 string", checks::is_base64)
    }

    pub fn hexadecimal() -> Self {
        Self::checked("hexadecimal", "not a valid hexadecimal string", checks::is_hexadecimal)
    }

    pub fn hex_color() -> Self {
        Self::checked("hex_color", "not a valid hex color", checks::is_hex_color)
    }

    pub fn alpha() -> Self {
        Self::checked("alpha", "must contain only alphabetic characters", checks::is_alpha)
    }

    pub fn alphanumeric() -> Self {
        Self::checked(
            "alphanumeric",
            "must contain only alphanumeric characters",
            checks::is_alphanumeric,
        )
    }

    pub fn ascii() -> Self {
        Self::checked("ascii", "must contain only ASCII characters", checks::is_ascii)
    }

    pub fn decimal() -> Self {
        Self::checked("decimal", "not a valid decimal number", checks::is_decimal)
    }

    pub fn port() -> Self {
        Self::checked("port", "not a valid port number", checks::is_port)
    }

    pub fn rfc3339() -> Self {
        Self::checked("rfc3339", "not a valid RFC 3339 timestamp", checks::is_rfc3339)
    }

    pub fn date() -> Self {
        Self::checked("date", "not a valid date", checks::is_date)
    }

    pub fn path() -> Self {
        Self::checked("path", "not a valid path", checks::is_path)
    }

    pub fn rgb() -> Self {
        Self::checked("rgb", "not a valid RGB color", checks::is_rgb)
    }

    pub fn hsl() -> Self {
        Self::checked("hsl", "not a valid HSL color", checks::is_hsl)
    }

    pub fn ulid() -> Self {
        Self::checked("ulid", "not a valid ULID", checks::is_ulid)
    }

    pub fn credit_card() -> Self {
        Self::checked("credit_card", "not a valid credit card number", checks::is_credit_card)
    }
}
