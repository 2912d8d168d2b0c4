//! Integer actions

use crate::action::{Action, Predicate, Rule};
use std::borrow::Cow;

/// Action over an `i64` value
pub type IntAction = Action<IntRule>;

/// Rules applicable to integers
#[derive(Debug, Clone)]
pub enum IntRule {
    /// value > bound
    Gt(i64),
    /// value >= bound
    Gte(i64),
    /// value < bound
    Lt(i64),
    /// value <= bound
    Lte(i64),
    /// value >= min
    Min(i64),
    /// value <= max
    Max(i64),
    /// min <= value <= max
    Between(i64, i64),
    Positive,
    Negative,
    Zero,
    NonZero,
    Custom(Predicate<i64>),
}

impl Rule for IntRule {
    type Value = i64;

    fn check(&self, value: &i64) -> bool {
        let value = *value;
        match self {
            IntRule::Gt(bound) => value > *bound,
            IntRule::Gte(bound) => value >= *bound,
            IntRule::Lt(bound) => value < *bound,
            IntRule::Lte(bound) => value <= *bound,
            IntRule::Min(min) => value >= *min,
            IntRule::Max(max) => value <= *max,
            IntRule::Between(min, max) => value >= *min && value <= *max,
            IntRule::Positive => value > 0,
            IntRule::Negative => value < 0,
            IntRule::Zero => value == 0,
            IntRule::NonZero => value != 0,
            IntRule::Custom(predicate) => predicate.test(&value),
        }
    }

    fn describe(&self) -> Cow<'static, str> {
        match self {
            IntRule::Gt(bound) => Cow::Owned(format!("value must be greater than {}", bound)),
            IntRule::Gte(bound) => {
                Cow::Owned(format!("value must be greater than or equal to {}", bound))
            }
            IntRule::Lt(bound) => Cow::Owned(format!("value must be less than {}", bound)),
            IntRule::Lte(bound) => {
                Cow::Owned(format!("value must be less than or equal to {}", bound))
            }
            IntRule::Min(min) => Cow::Owned(format!("value must be at least {}", min)),
            IntRule::Max(max) => Cow::Owned(format!("value exceeds maximum of {}", max)),
            IntRule::Between(min, max) => {
                Cow::Owned(format!("value must be between {} and {}", min, max))
            }
            IntRule::Positive => Cow::Borrowed("value must be positive"),
            IntRule::Negative => Cow::Borrowed("value must be negative"),
            IntRule::Zero => Cow::Borrowed("value must be zero"),
            IntRule::NonZero => Cow::Borrowed("value cannot be zero"),
            IntRule::Custom(_) => Cow::Borrowed("invalid number"),
        }
    }

    fn code(&self) -> &'static str {
        match self {
            IntRule::Gt(_) => "gt",
            IntRule::Gte(_) => "gte",
            IntRule::Lt(_) => "lt",
            IntRule::Lte(_) => "lte",
            IntRule::Min(_) => "min",
            IntRule::Max(_) => "max",
            IntRule::Between(..) => "between",
            IntRule::Positive => "positive",
            IntRule::Negative => "negative",
            IntRule::Zero => "zero",
            IntRule::NonZero => "non_zero",
            IntRule::Custom(_) => "custom",
        }
    }
}

impl Action<IntRule> {
    /// Wrap a caller-supplied predicate. Default message: "invalid number".
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&i64) -> bool + Send + Sync + 'static,
    {
        Self::new(IntRule::Custom(Predicate::new(predicate)))
    }

    pub fn gt(bound: i64) -> Self {
        Self::new(IntRule::Gt(bound))
    }

    pub fn gte(bound: i64) -> Self {
        Self::new(IntRule::Gte(bound))
    }

    pub fn lt(bound: i64) -> Self {
        Self::new(IntRule::Lt(bound))
    }

    pub fn lte(bound: i64) -> Self {
        Self::new(IntRule::Lte(bound))
    }

    pub fn min(min: i64) -> Self {
        Self::new(IntRule::Min(min))
    }

    pub fn max(max: i64) -> Self {
        Self::new(IntRule::Max(max))
    }

    pub fn between(min: i64, max: i64) -> Self {
        Self::new(IntRule::Between(min, max))
    }

    pub fn positive() -> Self {
        Self::new(IntRule::Positive)
    }

    pub fn negative() -> Self {
        Self::new(IntRule::Negative)
    }

    pub fn zero() -> Self {
        Self::new(IntRule::Zero)
    }

    pub fn non_zero() -> Self {
        Self::new(IntRule::NonZero)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_and_inclusive_boundaries() {
        assert!(IntAction::gt(18).run(&18).is_err());
        assert!(IntAction::gt(18).run(&19).is_ok());
        assert!(IntAction::gte(18).run(&18).is_ok());
        assert!(IntAction::gte(18).run(&17).is_err());

        assert!(IntAction::lt(10).run(&10).is_err());
        assert!(IntAction::lt(10).run(&9).is_ok());
        assert!(IntAction::lte(10).run(&10).is_ok());
        assert!(IntAction::lte(10).run(&11).is_err());
    }

    #[test]
    fn test_min_max_between() {
        assert!(IntAction::min(0).run(&0).is_ok());
        assert!(IntAction::min(0).run(&-1).is_err());
        assert!(IntAction::max(100).run(&100).is_ok());
        assert!(IntAction::max(100).run(&101).is_err());

        let range = IntAction::between(1, 5);
        assert!(range.run(&1).is_ok());
        assert!(range.run(&5).is_ok());
        assert_eq!(range.run(&6).unwrap_err().message, "value must be between 1 and 5");
    }

    #[test]
    fn test_sign_rules() {
        assert!(IntAction::positive().run(&1).is_ok());
        assert!(IntAction::positive().run(&0).is_err());
        assert!(IntAction::negative().run(&-1).is_ok());
        assert!(IntAction::negative().run(&0).is_err());
        assert!(IntAction::zero().run(&0).is_ok());
        assert!(IntAction::zero().run(&1).is_err());
        assert!(IntAction::non_zero().run(&0).is_err());
        assert!(IntAction::non_zero().run(&-3).is_ok());
    }

    #[test]
    fn test_min_with_template() {
        let action = IntAction::min(18).message("must be at least 18, but is {VALUE}");
        let error = action.run(&15).unwrap_err();
        assert_eq!(error.message, "must be at least 18, but is 15");
        assert_eq!(error.code, "min");
    }

    #[test]
    fn test_custom() {
        let even = IntAction::custom(|v| v % 2 == 0);
        assert!(even.run(&4).is_ok());
        assert_eq!(even.run(&3).unwrap_err().message, "invalid number");
    }
}
