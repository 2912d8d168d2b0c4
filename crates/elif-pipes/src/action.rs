//! Action abstraction: a single rule plus its failure message policy

use crate::error::ActionError;
use crate::message::{ErrMsg, TemplateValue};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// A pure predicate over one value type.
///
/// Implementors are plain configuration data (bounds, patterns, targets); `check`
/// must depend only on that data and the value.
pub trait Rule: fmt::Debug + Send + Sync {
    /// The value type checked by this rule
    type Value: TemplateValue + Send + Sync;

    /// Whether the value satisfies the rule
    fn check(&self, value: &Self::Value) -> bool;

    /// Built-in message used when no custom message is configured
    fn describe(&self) -> Cow<'static, str>;

    /// Short identifier of the rule, carried on the error
    fn code(&self) -> &'static str;
}

/// Caller-supplied predicate used by the `custom` rules
pub struct Predicate<T: ?Sized>(Arc<dyn Fn(&T) -> bool + Send + Sync>);

impl<T: ?Sized> Predicate<T> {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(predicate))
    }

    pub fn test(&self, value: &T) -> bool {
        (self.0)(value)
    }
}

impl<T: ?Sized> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T: ?Sized> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

/// Optional configuration accepted by every action
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOptions {
    /// Replaces the rule's built-in message on failure
    #[serde(default)]
    pub message: Option<ErrMsg>,
}

impl ActionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom error message
    pub fn message(mut self, message: impl Into<ErrMsg>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl From<ErrMsg> for ActionOptions {
    fn from(message: ErrMsg) -> Self {
        Self {
            message: Some(message),
        }
    }
}

/// One validation step of a pipe
#[derive(Debug, Clone)]
pub struct Action<R> {
    rule: R,
    options: ActionOptions,
}

impl<R: Rule> Action<R> {
    pub fn new(rule: R) -> Self {
        Self {
            rule,
            options: ActionOptions::default(),
        }
    }

    /// Replace the action's options
    pub fn with_options(mut self, options: impl Into<ActionOptions>) -> Self {
        self.options = options.into();
        self
    }

    /// Set custom error message. `{VALUE}` is replaced by the failing value.
    pub fn message(mut self, message: impl Into<ErrMsg>) -> Self {
        self.options.message = Some(message.into());
        self
    }

    pub fn rule(&self) -> &R {
        &self.rule
    }

    pub fn options(&self) -> &ActionOptions {
        &self.options
    }

    /// Run the rule against a value
    pub fn run(&self, value: &R::Value) -> Result<(), ActionError> {
        if self.rule.check(value) {
            return Ok(());
        }

        let message = match &self.options.message {
            Some(template) => template.render(value),
            None => self.rule.describe().into_owned(),
        };

        Err(ActionError::new(self.rule.code(), message))
    }
}

impl<R: Rule> From<R> for Action<R> {
    fn from(rule: R) -> Self {
        Self::new(rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Even;

    impl Rule for Even {
        type Value = i64;

        fn check(&self, value: &i64) -> bool {
            value % 2 == 0
        }

        fn describe(&self) -> Cow<'static, str> {
            Cow::Borrowed("must be even")
        }

        fn code(&self) -> &'static str {
            "even"
        }
    }

    #[test]
    fn test_passing_action() {
        assert!(Action::new(Even).run(&4).is_ok());
    }

    #[test]
    fn test_default_message() {
        let error = Action::new(Even).run(&3).unwrap_err();
        assert_eq!(error.message, "must be even");
        assert_eq!(error.code, "even");
    }

    #[test]
    fn test_custom_message_renders_value() {
        let error = Action::new(Even).message("{VALUE} is odd").run(&7).unwrap_err();
        assert_eq!(error.message, "7 is odd");
        assert_eq!(error.code, "even");
    }

    #[test]
    fn test_options_struct() {
        let options = ActionOptions::new().message("nope");
        let action = Action::from(Even).with_options(options.clone());
        assert_eq!(action.options(), &options);
        assert_eq!(action.run(&1).unwrap_err().message, "nope");
    }

    #[test]
    fn test_action_is_reusable() {
        let action = Action::new(Even);
        assert!(action.run(&2).is_ok());
        assert!(action.run(&3).is_err());
        assert!(action.run(&2).is_ok());
    }

    #[test]
    fn test_predicate_clone_shares_function() {
        let predicate = Predicate::new(|v: &i64| *v > 1);
        let copy = predicate.clone();
        assert!(copy.test(&2));
        assert!(!predicate.test(&1));
        assert_eq!(format!("{:?}", predicate), "Predicate(..)");
    }
}
