//! Typed validation pipes
//!
//! A [`Pipe`] owns one value and an ordered list of actions. Validation runs the
//! actions in order and stops at the first failure, reporting it under the pipe's key.
//! The key is assigned by the [`Schema`](crate::Schema) the pipe is inserted into.

use crate::action::{Action, Rule};
use crate::actions::{FloatRule, IntRule, StringRule, TimeRule};
use crate::actions::time::timestamp;
use crate::error::ValidationError;
use chrono::{DateTime, TimeZone};
use std::fmt;

pub(crate) mod sealed {
    /// Key assignment, reachable only from inside the crate
    pub trait Keyed {
        fn set_key(&mut self, key: String);
    }
}

/// A keyed pipe with its value type erased, as stored by a schema
pub trait Field: sealed::Keyed + fmt::Debug + Send + Sync {
    /// Assigned key, empty until the pipe is inserted into a schema
    fn key(&self) -> &str;

    /// Run the pipe's actions in order, stopping at the first failure
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Ordered actions over one owned value
pub struct Pipe<R: Rule> {
    value: R::Value,
    actions: Vec<Action<R>>,
    key: String,
}

pub type StringPipe = Pipe<StringRule>;
pub type IntPipe = Pipe<IntRule>;
pub type FloatPipe = Pipe<FloatRule>;
pub type TimePipe = Pipe<TimeRule>;

impl<R: Rule> Pipe<R> {
    pub fn new<I>(value: R::Value, actions: I) -> Self
    where
        I: IntoIterator<Item = Action<R>>,
    {
        Self {
            value,
            actions: actions.into_iter().collect(),
            key: String::new(),
        }
    }

    /// Append an action to the end of the pipe
    pub fn action(mut self, action: Action<R>) -> Self {
        self.actions.push(action);
        self
    }

    pub fn value(&self) -> &R::Value {
        &self.value
    }

    pub fn actions(&self) -> &[Action<R>] {
        &self.actions
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        for action in &self.actions {
            action
                .run(&self.value)
                .map_err(|cause| ValidationError::new(self.key.clone(), cause))?;
        }
        Ok(())
    }
}

impl<R: Rule + 'static> Pipe<R> {
    /// Type-erase the pipe for use in a key-to-pipe map
    pub fn boxed(self) -> Box<dyn Field> {
        Box::new(self)
    }
}

impl<R: Rule> sealed::Keyed for Pipe<R> {
    fn set_key(&mut self, key: String) {
        self.key = key;
    }
}

impl<R: Rule> Field for Pipe<R> {
    fn key(&self) -> &str {
        Pipe::key(self)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Pipe::validate(self)
    }
}

impl<R: Rule> fmt::Debug for Pipe<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipe")
            .field("key", &self.key)
            .field("actions", &self.actions)
            .finish()
    }
}

pub fn string_pipe<I>(value: impl Into<String>, actions: I) -> StringPipe
where
    I: IntoIterator<Item = Action<StringRule>>,
{
    Pipe::new(value.into(), actions)
}

pub fn int_pipe<I>(value: i64, actions: I) -> IntPipe
where
    I: IntoIterator<Item = Action<IntRule>>,
{
    Pipe::new(value, actions)
}

pub fn float_pipe<I>(value: f64, actions: I) -> FloatPipe
where
    I: IntoIterator<Item = Action<FloatRule>>,
{
    Pipe::new(value, actions)
}

pub fn time_pipe<Tz, I>(value: DateTime<Tz>, actions: I) -> TimePipe
where
    Tz: TimeZone,
    I: IntoIterator<Item = Action<TimeRule>>,
{
    Pipe::new(timestamp(value), actions)
}

/// Start a pipe under a known key, for schemas built from an ordered list
pub fn entry(key: impl Into<String>) -> Entry {
    Entry { key: key.into() }
}

/// Holds a key until the pipe is constructed
#[derive(Debug, Clone)]
pub struct Entry {
    key: String,
}

impl Entry {
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Attach the key to an existing pipe
    pub fn pipe<R: Rule>(self, mut pipe: Pipe<R>) -> Pipe<R> {
        pipe.key = self.key;
        pipe
    }

    pub fn string<I>(self, value: impl Into<String>, actions: I) -> StringPipe
    where
        I: IntoIterator<Item = Action<StringRule>>,
    {
        self.pipe(string_pipe(value, actions))
    }

    pub fn int<I>(self, value: i64, actions: I) -> IntPipe
    where
        I: IntoIterator<Item = Action<IntRule>>,
    {
        self.pipe(int_pipe(value, actions))
    }

    pub fn float<I>(self, value: f64, actions: I) -> FloatPipe
    where
        I: IntoIterator<Item = Action<FloatRule>>,
    {
        self.pipe(float_pipe(value, actions))
    }

    pub fn time<Tz, I>(self, value: DateTime<Tz>, actions: I) -> TimePipe
    where
        Tz: TimeZone,
        I: IntoIterator<Item = Action<TimeRule>>,
    {
        self.pipe(time_pipe(value, actions))
    }
}
