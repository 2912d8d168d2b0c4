//! Float actions

use crate::action::{Action, Predicate, Rule};
use std::borrow::Cow;

/// Action over an `f64` value
pub type FloatAction = Action<FloatRule>;

/// Rules applicable to floats. Every comparison fails for NaN.
#[derive(Debug, Clone)]
pub enum FloatRule {
    Gt(f64),
    Gte(f64),
    Lt(f64),
    Lte(f64),
    Min(f64),
    Max(f64),
    /// Strictly greater than zero
    Positive,
    /// Zero or greater
    NonNegative,
    /// Strictly less than zero
    Negative,
    /// Neither NaN nor infinite
    Finite,
    Custom(Predicate<f64>),
}

impl Rule for FloatRule {
    type Value = f64;

    fn check(&self, value: &f64) -> bool {
        let value = *value;
        match self {
            FloatRule::Gt(bound) => value > *bound,
            FloatRule::Gte(bound) => value >= *bound,
            FloatRule::Lt(bound) => value < *bound,
            FloatRule::Lte(bound) => value <= *bound,
            FloatRule::Min(min) => value >= *min,
            FloatRule::Max(max) => value <= *max,
            FloatRule::Positive => value > 0.0,
            FloatRule::NonNegative => value >= 0.0,
            FloatRule::Negative => value < 0.0,
            FloatRule::Finite => value.is_finite(),
            FloatRule::Custom(predicate) => predicate.test(&value),
        }
    }

    fn describe(&self) -> Cow<'static, str> {
        match self {
            FloatRule::Gt(bound) => Cow::Owned(format!("value must be greater than {}", bound)),
            FloatRule::Gte(bound) => {
                Cow::Owned(format!("value must be greater than or equal to {}", bound))
            }
            FloatRule::Lt(bound) => Cow::Owned(format!("value must be less than {}", bound)),
            FloatRule::Lte(bound) => {
                Cow::Owned(format!("value must be less than or equal to {}", bound))
            }
            FloatRule::Min(min) => Cow::Owned(format!("value must be at least {}", min)),
            FloatRule::Max(max) => Cow::Owned(format!("value exceeds maximum of {}", max)),
            FloatRule::Positive => Cow::Borrowed("value must be positive"),
            FloatRule::NonNegative => Cow::Borrowed("value cannot be negative"),
            FloatRule::Negative => Cow::Borrowed("value must be negative"),
            FloatRule::Finite => Cow::Borrowed("value must be a finite number"),
            FloatRule::Custom(_) => Cow::Borrowed("invalid float"),
        }
    }

    fn code(&self) -> &'static str {
        match self {
            FloatRule::Gt(_) => "gt",
            FloatRule::Gte(_) => "gte",
            FloatRule::Lt(_) => "lt",
            FloatRule::Lte(_) => "lte",
            FloatRule::Min(_) => "min",
            FloatRule::Max(_) => "max",
            FloatRule::Positive => "positive",
            FloatRule::NonNegative => "non_negative",
            FloatRule::Negative => "negative",
            FloatRule::Finite => "finite",
            FloatRule::Custom(_) => "custom",
        }
    }
}

impl Action<FloatRule> {
    /// Wrap a caller-supplied predicate. Default message: "invalid float".
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&f64) -> bool + Send + Sync + 'static,
    {
        Self::new(FloatRule::Custom(Predicate::new(predicate)))
    }

    pub fn gt(bound: f64) -> Self {
        Self::new(FloatRule::Gt(bound))
    }

    pub fn gte(bound: f64) -> Self {
        Self::new(FloatRule::Gte(bound))
    }

    pub fn lt(bound: f64) -> Self {
        Self::new(FloatRule::Lt(bound))
    }

    pub fn lte(bound: f64) -> Self {
        Self::new(FloatRule::Lte(bound))
    }

    pub fn min(min: f64) -> Self {
        Self::new(FloatRule::Min(min))
    }

    pub fn max(max: f64) -> Self {
        Self::new(FloatRule::Max(max))
    }

    /// Strictly positive; zero fails. Use [`non_negative`](Self::non_negative) to accept zero.
    pub fn positive() -> Self {
        Self::new(FloatRule::Positive)
    }

    pub fn non_negative() -> Self {
        Self::new(FloatRule::NonNegative)
    }

    pub fn negative() -> Self {
        Self::new(FloatRule::Negative)
    }

    pub fn finite() -> Self {
        Self::new(FloatRule::Finite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        assert!(FloatAction::gt(1.5).run(&1.5).is_err());
        assert!(FloatAction::gte(1.5).run(&1.5).is_ok());
        assert!(FloatAction::lt(1.5).run(&1.5).is_err());
        assert!(FloatAction::lte(1.5).run(&1.5).is_ok());
        assert!(FloatAction::min(0.0).run(&-0.1).is_err());
        assert!(FloatAction::max(1.0).run(&1.0).is_ok());
    }

    #[test]
    fn test_positive_is_strict_and_non_negative_is_not() {
        assert!(FloatAction::positive().run(&0.0).is_err());
        assert!(FloatAction::positive().run(&0.1).is_ok());
        assert!(FloatAction::non_negative().run(&0.0).is_ok());
        assert!(FloatAction::non_negative().run(&-0.1).is_err());
        assert!(FloatAction::negative().run(&-0.1).is_ok());
        assert!(FloatAction::negative().run(&0.0).is_err());
    }

    #[test]
    fn test_nan_fails_comparisons() {
        assert!(FloatAction::gt(0.0).run(&f64::NAN).is_err());
        assert!(FloatAction::lte(0.0).run(&f64::NAN).is_err());
        assert!(FloatAction::finite().run(&f64::NAN).is_err());
        assert!(FloatAction::finite().run(&f64::INFINITY).is_err());
        assert!(FloatAction::finite().run(&1.0).is_ok());
    }

    #[test]
    fn test_template_uses_decimal_form() {
        let action = FloatAction::max(10.0).message("{VALUE} is above the limit");
        assert_eq!(action.run(&12.5).unwrap_err().message, "12.5 is above the limit");
        assert_eq!(
            FloatAction::max(10.0).run(&12.5).unwrap_err().message,
            "value exceeds maximum of 10"
        );
    }

    #[test]
    fn test_custom() {
        let whole = FloatAction::custom(|v| v.fract() == 0.0);
        assert!(whole.run(&2.0).is_ok());
        assert_eq!(whole.run(&2.5).unwrap_err().message, "invalid float");
    }
}
