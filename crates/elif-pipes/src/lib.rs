//! # elif-pipes
//!
//! Declarative validation pipes for the elif.rs framework.
//!
//! A pipe wraps one value together with an ordered list of actions. Each action is a
//! predicate with a default error message, which can be overridden by a template that
//! may reference the checked value through `{VALUE}`. Pipes are grouped under field
//! keys into a [`Schema`], which validates either fail-fast or exhaustively.
//!
//! ```
//! use elif_pipes::{int_pipe, string_pipe, IntAction, Schema, StringAction};
//!
//! let schema = Schema::builder()
//!     .field("email", string_pipe("user@example.com", [StringAction::not_empty(), StringAction::email()]))
//!     .field("age", int_pipe(15, [IntAction::min(18).message("must be at least 18, but is {VALUE}")]))
//!     .build();
//!
//! let error = schema.validate().unwrap_err();
//! assert_eq!(error.key(), "age");
//! assert_eq!(error.message(), "must be at least 18, but is 15");
//! ```

pub mod action;
pub mod actions;
pub mod checks;
pub mod config;
pub mod error;
pub mod message;
pub mod parse;
pub mod pipe;
pub mod schema;

pub use action::{Action, ActionOptions, Predicate, Rule};
pub use actions::{
    FloatAction, FloatRule, Format, IntAction, IntRule, StringAction, StringRule, TimeAction,
    TimeRule, Timestamp,
};
pub use config::{Concurrency, ConfigError, SchemaConfig};
pub use error::{
    ActionError, JoinedError, ParseError, ValidationError, ValidationErrors, ValidationResult,
    PRE_CHECK_KEY,
};
pub use message::{ErrMsg, TemplateValue, VALUE_TOKEN};
pub use parse::Validate;
pub use pipe::{
    entry, float_pipe, int_pipe, string_pipe, time_pipe, Entry, Field, FloatPipe, IntPipe, Pipe,
    StringPipe, TimePipe,
};
pub use schema::{Schema, SchemaBuilder};
