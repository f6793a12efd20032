//! Built-in validators.
//!
//! Every validator carries a default message that can be replaced with
//! `with_message`. Constructors that take bounds or patterns return
//! [`ValidatorError`](crate::ValidatorError) for a bad configuration, so a
//! misconfigured validator never reaches validation.

mod equality;
mod numeric;
mod pattern;
mod selection;
mod text;

pub use equality::{Checked, EqualTo};
pub use numeric::{MaxValue, MinValue, Transform, ValueRange, parse_number};
pub use pattern::{Contains, Matches};
pub use selection::{SelectionExact, SelectionMax, SelectionMin, SelectionNotEmpty, SelectionRange};
pub use text::{Email, MaxLength, MinLength, Required};
