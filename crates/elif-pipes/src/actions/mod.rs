//! Built-in actions for each pipe value type

pub mod float;
pub mod int;
pub mod string;
pub mod time;

pub use float::{FloatAction, FloatRule};
pub use int::{IntAction, IntRule};
pub use string::{Format, StringAction, StringRule};
pub use time::{TimeAction, TimeRule, Timestamp};
