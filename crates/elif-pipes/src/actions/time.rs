//! Time actions
//!
//! Values are instants with a fixed UTC offset. Calendar comparisons (same day, week,
//! month, year) read the calendar fields of each instant in its own offset, so two
//! instants can be equal yet fall on different days.

use crate::action::{Action, Predicate, Rule};
use chrono::{DateTime, Datelike, Duration, FixedOffset, Offset, TimeZone, Utc};
use std::borrow::Cow;

/// Instant checked by time actions
pub type Timestamp = DateTime<FixedOffset>;

/// Action over a [`Timestamp`] value
pub type TimeAction = Action<TimeRule>;

const MIN_OFFSET_SECONDS: i32 = -12 * 3600;
const MAX_OFFSET_SECONDS: i32 = 14 * 3600;

/// Convert any zoned instant into a [`Timestamp`], keeping its offset
pub fn timestamp<Tz: TimeZone>(at: DateTime<Tz>) -> Timestamp {
    let offset = at.offset().fix();
    at.with_timezone(&offset)
}

/// Rules applicable to instants
#[derive(Debug, Clone)]
pub enum TimeRule {
    Before(Timestamp),
    After(Timestamp),
    /// Strictly between the two instants
    Between(Timestamp, Timestamp),
    BeforeNow,
    AfterNow,
    /// Not the Unix epoch
    NotZero,
    SameDay(Timestamp),
    /// Same ISO 8601 week
    SameWeek(Timestamp),
    SameMonth(Timestamp),
    SameYear(Timestamp),
    /// On or after
    MinDate(Timestamp),
    /// On or before
    MaxDate(Timestamp),
    Equal(Timestamp),
    NotEqual(Timestamp),
    /// Older than now minus the given days
    OldOf(i64),
    /// Later than now plus the given days
    NewOf(i64),
    Weekday,
    /// UTC offset within -12:00..=+14:00
    Timezone,
    Custom(Predicate<Timestamp>),
}

fn now() -> DateTime<Utc> {
    Utc::now()
}

fn utc(at: &Timestamp) -> DateTime<Utc> {
    at.with_timezone(&Utc)
}

impl Rule for TimeRule {
    type Value = Timestamp;

    fn check(&self, value: &Timestamp) -> bool {
        match self {
            TimeRule::Before(t) => value < t,
            TimeRule::After(t) => value > t,
            TimeRule::Between(start, end) => value > start && value < end,
            TimeRule::BeforeNow => utc(value) < now(),
            TimeRule::AfterNow => utc(value) > now(),
            TimeRule::NotZero => value.timestamp() != 0 || value.timestamp_subsec_nanos() != 0,
            TimeRule::SameDay(t) => value.date_naive() == t.date_naive(),
            TimeRule::SameWeek(t) => value.iso_week() == t.iso_week(),
            TimeRule::SameMonth(t) => value.year() == t.year() && value.month() == t.month(),
            TimeRule::SameYear(t) => value.year() == t.year(),
            TimeRule::MinDate(t) => value >= t,
            TimeRule::MaxDate(t) => value <= t,
            TimeRule::Equal(t) => value == t,
            TimeRule::NotEqual(t) => value != t,
            TimeRule::OldOf(days) => Duration::try_days(*days)
                .and_then(|span| now().checked_sub_signed(span))
                .map_or(false, |cutoff| utc(value) < cutoff),
            TimeRule::NewOf(days) => Duration::try_days(*days)
                .and_then(|span| now().checked_add_signed(span))
                .map_or(false, |cutoff| utc(value) > cutoff),
            TimeRule::Weekday => value.weekday().number_from_monday() <= 5,
            TimeRule::Timezone => {
                let offset = value.offset().local_minus_utc();
                (MIN_OFFSET_SECONDS..=MAX_OFFSET_SECONDS).contains(&offset)
            }
            TimeRule::Custom(predicate) => predicate.test(value),
        }
    }

    fn describe(&self) -> Cow<'static, str> {
        match self {
            TimeRule::Before(t) => Cow::Owned(format!("time must be before {}", t.to_rfc3339())),
            TimeRule::After(t) => Cow::Owned(format!("time must be after {}", t.to_rfc3339())),
            TimeRule::Between(start, end) => Cow::Owned(format!(
                "time must be between {} and {}",
                start.to_rfc3339(),
                end.to_rfc3339()
            )),
            TimeRule::BeforeNow => Cow::Borrowed("time must be in the past"),
            TimeRule::AfterNow => Cow::Borrowed("time must be in the future"),
            TimeRule::NotZero => Cow::Borrowed("time cannot be zero value"),
            TimeRule::SameDay(t) => {
                Cow::Owned(format!("time must be on the same day as {}", t.to_rfc3339()))
            }
            TimeRule::SameWeek(t) => {
                Cow::Owned(format!("time must be in the same week as {}", t.to_rfc3339()))
            }
            TimeRule::SameMonth(t) => {
                Cow::Owned(format!("time must be in the same month as {}", t.to_rfc3339()))
            }
            TimeRule::SameYear(t) => {
                Cow::Owned(format!("time must be in the same year as {}", t.to_rfc3339()))
            }
            TimeRule::MinDate(t) => {
                Cow::Owned(format!("time must be on or after {}", t.to_rfc3339()))
            }
            TimeRule::MaxDate(t) => {
                Cow::Owned(format!("time must be on or before {}", t.to_rfc3339()))
            }
            TimeRule::Equal(t) => Cow::Owned(format!("time must equal {}", t.to_rfc3339())),
            TimeRule::NotEqual(t) => {
                Cow::Owned(format!("time must not equal {}", t.to_rfc3339()))
            }
            TimeRule::OldOf(days) => {
                Cow::Owned(format!("time must be at least {} days old", days))
            }
            TimeRule::NewOf(days) => {
                Cow::Owned(format!("time must be at least {} days in the future", days))
            }
            TimeRule::Weekday => Cow::Borrowed("time must fall on a weekday (Monday-Friday)"),
            TimeRule::Timezone => Cow::Borrowed("time has invalid timezone offset"),
            TimeRule::Custom(_) => Cow::Borrowed("invalid time"),
        }
    }

    fn code(&self) -> &'static str {
        match self {
            TimeRule::Before(_) => "before",
            TimeRule::After(_) => "after",
            TimeRule::Between(..) => "between",
            TimeRule::BeforeNow => "before_now",
            TimeRule::AfterNow => "after_now",
            TimeRule::NotZero => "not_zero",
            TimeRule::SameDay(_) => "same_day",
            TimeRule::SameWeek(_) => "same_week",
            TimeRule::SameMonth(_) => "same_month",
            TimeRule::SameYear(_) => "same_year",
            TimeRule::MinDate(_) => "min_date",
            TimeRule::MaxDate(_) => "max_date",
            TimeRule::Equal(_) => "equal",
            TimeRule::NotEqual(_) => "not_equal",
            TimeRule::OldOf(_) => "old_of",
            TimeRule::NewOf(_) => "new_of",
            TimeRule::Weekday => "weekday",
            TimeRule::Timezone => "timezone",
            TimeRule::Custom(_) => "custom",
        }
    }
}

impl Action<TimeRule> {
    /// Wrap a caller-supplied predicate. Default message: "invalid time".
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&Timestamp) -> bool + Send + Sync + 'static,
    {
        Self::new(TimeRule::Custom(Predicate::new(predicate)))
    }

    pub fn before<Tz: TimeZone>(t: DateTime<Tz>) -> Self {
        Self::new(TimeRule::Before(timestamp(t)))
    }

    pub fn after<Tz: TimeZone>(t: DateTime<Tz>) -> Self {
        Self::new(TimeRule::After(timestamp(t)))
    }

    /// Strictly between `start` and `end`
    pub fn between<Tz: TimeZone, Tz2: TimeZone>(start: DateTime<Tz>, end: DateTime<Tz2>) -> Self {
        Self::new(TimeRule::Between(timestamp(start), timestamp(end)))
    }

    pub fn before_now() -> Self {
        Self::new(TimeRule::BeforeNow)
    }

    pub fn after_now() -> Self {
        Self::new(TimeRule::AfterNow)
    }

    pub fn not_zero() -> Self {
        Self::new(TimeRule::NotZero)
    }

    pub fn same_day<Tz: TimeZone>(t: DateTime<Tz>) -> Self {
        Self::new(TimeRule::SameDay(timestamp(t)))
    }

    pub fn same_week<Tz: TimeZone>(t: DateTime<Tz>) -> Self {
        Self::new(TimeRule::SameWeek(timestamp(t)))
    }

    pub fn same_month<Tz: TimeZone>(t: DateTime<Tz>) -> Self {
        Self::new(TimeRule::SameMonth(timestamp(t)))
    }

    pub fn same_year<Tz: TimeZone>(t: DateTime<Tz>) -> Self {
        Self::new(TimeRule::SameYear(timestamp(t)))
    }

    pub fn min_date<Tz: TimeZone>(t: DateTime<Tz>) -> Self {
        Self::new(TimeRule::MinDate(timestamp(t)))
    }

    pub fn max_date<Tz: TimeZone>(t: DateTime<Tz>) -> Self {
        Self::new(TimeRule::MaxDate(timestamp(t)))
    }

    pub fn equal<Tz: TimeZone>(t: DateTime<Tz>) -> Self {
        Self::new(TimeRule::Equal(timestamp(t)))
    }

    pub fn not_equal<Tz: TimeZone>(t: DateTime<Tz>) -> Self {
        Self::new(TimeRule::NotEqual(timestamp(t)))
    }

    /// At least `days` old. Negative counts are treated as zero.
    pub fn old_of(days: i64) -> Self {
        Self::new(TimeRule::OldOf(days.max(0)))
    }

    /// At least `days` in the future. Negative counts are treated as zero.
    pub fn new_of(days: i64) -> Self {
        Self::new(TimeRule::NewOf(days.max(0)))
    }

    pub fn weekday() -> Self {
        Self::new(TimeRule::Weekday)
    }

    pub fn timezone() -> Self {
        Self::new(TimeRule::Timezone)
    }
}
