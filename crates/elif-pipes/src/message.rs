//! Custom error message templates
//!
//! An [`ErrMsg`] replaces an action's built-in description with a caller-supplied
//! message. Every occurrence of [`VALUE_TOKEN`] in the template is substituted with
//! the failing value:
//!
//! ```
//! use elif_pipes::ErrMsg;
//!
//! let msg = ErrMsg::new("{VALUE} is too small");
//! assert_eq!(msg.render(&5i64), "5 is too small");
//! ```

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder replaced by the failing value
pub const VALUE_TOKEN: &str = "{VALUE}";

/// Values that can be substituted into a message template.
///
/// Returning `None` leaves the template untouched.
pub trait TemplateValue {
    fn template_repr(&self) -> Option<String> {
        None
    }
}

impl TemplateValue for str {
    fn template_repr(&self) -> Option<String> {
        Some(self.to_owned())
    }
}

impl TemplateValue for String {
    fn template_repr(&self) -> Option<String> {
        Some(self.clone())
    }
}

impl TemplateValue for bool {
    fn template_repr(&self) -> Option<String> {
        Some(if *self { "true" } else { "false" }.to_owned())
    }
}

macro_rules! display_template_value {
    ($($ty:ty),*) => {
        $(
            impl TemplateValue for $ty {
                fn template_repr(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )*
    };
}

display_template_value!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

/// Instants render as RFC 3339 in their own offset
impl<Tz> TemplateValue for DateTime<Tz>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    fn template_repr(&self) -> Option<String> {
        Some(self.to_rfc3339())
    }
}

impl<T: TemplateValue + ?Sized> TemplateValue for &T {
    fn template_repr(&self) -> Option<String> {
        (**self).template_repr()
    }
}

/// Message policy built from a literal template
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrMsg {
    template: String,
}

impl ErrMsg {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Whether the template contains [`VALUE_TOKEN`]
    pub fn has_placeholder(&self) -> bool {
        self.template.contains(VALUE_TOKEN)
    }

    /// Render the message for a failing value
    pub fn render<V: TemplateValue + ?Sized>(&self, value: &V) -> String {
        if !self.has_placeholder() {
            return self.template.clone();
        }

        match value.template_repr() {
            Some(repr) => self.template.replace(VALUE_TOKEN, &repr),
            None => self.template.clone(),
        }
    }
}

impl From<&str> for ErrMsg {
    fn from(template: &str) -> Self {
        Self::new(template)
    }
}

impl From<String> for ErrMsg {
    fn from(template: String) -> Self {
        Self::new(template)
    }
}

impl fmt::Display for ErrMsg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}
