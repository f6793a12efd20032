//! Numeric bounds over the raw text a user typed.
//!
//! The value under validation is the unparsed string. Blank input is decided
//! by `allow_empty` alone; otherwise the string goes through the transform
//! and a failed parse counts as invalid.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::rc::Rc;
use std::str::FromStr;

use crate::{Validator, ValidatorError};

/// Converts raw input to a number; `None` means "not a number". Closures may
/// capture their configuration, such as a decimal separator or a unit suffix.
pub type Transform<N> = Rc<dyn Fn(&str) -> Option<N>>;

/// Default transform: trims surrounding whitespace and parses with `FromStr`.
pub fn parse_number<N: FromStr>(raw: &str) -> Option<N> {
    raw.trim().parse().ok()
}

struct NumericInput<N> {
    allow_empty: bool,
    transform: Transform<N>,
}

impl<N: FromStr + 'static> NumericInput<N> {
    fn new() -> Self {
        Self {
            allow_empty: false,
            transform: Rc::new(parse_number::<N>),
        }
    }
}

impl<N> Clone for NumericInput<N> {
    fn clone(&self) -> Self {
        Self {
            allow_empty: self.allow_empty,
            transform: Rc::clone(&self.transform),
        }
    }
}

impl<N> fmt::Debug for NumericInput<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NumericInput")
            .field("allow_empty", &self.allow_empty)
            .finish_non_exhaustive()
    }
}

impl<N> NumericInput<N> {
    fn check(&self, raw: &str, within: impl FnOnce(&N) -> bool) -> bool {
        if raw.trim().is_empty() {
            return self.allow_empty;
        }
        match (self.transform)(raw) {
            Some(n) => within(&n),
            None => false,
        }
    }
}

/// Number must be `>= min`.
#[derive(Debug, Clone)]
pub struct MinValue<N> {
    min: N,
    input: NumericInput<N>,
    message: Cow<'static, str>,
}

impl<N: PartialOrd + FromStr + Display + 'static> MinValue<N> {
    pub fn new(min: N) -> Self {
        let message = Cow::Owned(format!("must be at least {min}"));
        Self {
            min,
            input: NumericInput::new(),
            message,
        }
    }
}

impl<N> MinValue<N> {
    pub fn allow_empty(mut self, allow: bool) -> Self {
        self.input.allow_empty = allow;
        self
    }

    pub fn with_transform(mut self, transform: impl Fn(&str) -> Option<N> + 'static) -> Self {
        self.input.transform = Rc::new(transform);
        self
    }

    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }
}

impl<N: PartialOrd> Validator<String> for MinValue<N> {
    fn error_message(&self) -> &str {
        &self.message
    }

    fn validate(&self, value: &String) -> bool {
        self.input.check(value, |n| *n >= self.min)
    }
}

/// Number must be `<= max`.
#[derive(Debug, Clone)]
pub struct MaxValue<N> {
    max: N,
    input: NumericInput<N>,
    message: Cow<'static, str>,
}

impl<N: PartialOrd + FromStr + Display + 'static> MaxValue<N> {
    pub fn new(max: N) -> Self {
        let message = Cow::Owned(format!("must be at most {max}"));
        Self {
            max,
            input: NumericInput::new(),
            message,
        }
    }
}

impl<N> MaxValue<N> {
    pub fn allow_empty(mut self, allow: bool) -> Self {
        self.input.allow_empty = allow;
        self
    }

    pub fn with_transform(mut self, transform: impl Fn(&str) -> Option<N> + 'static) -> Self {
        self.input.transform = Rc::new(transform);
        self
    }

    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }
}

impl<N: PartialOrd> Validator<String> for MaxValue<N> {
    fn error_message(&self) -> &str {
        &self.message
    }

    fn validate(&self, value: &String) -> bool {
        self.input.check(value, |n| *n <= self.max)
    }
}

/// Number must lie in `[min, max]`.
///
/// ```rust
/// use reform_form::Validator;
/// use reform_form::validators::ValueRange;
///
/// let age = ValueRange::new(18, 120).unwrap().allow_empty(true);
/// assert!(age.validate(&"42".to_string()));
/// assert!(age.validate(&"  ".to_string()));
/// assert!(!age.validate(&"17".to_string()));
/// assert!(!age.validate(&"forty".to_string()));
/// assert!(ValueRange::new(5, 3).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ValueRange<N> {
    min: N,
    max: N,
    input: NumericInput<N>,
    message: Cow<'static, str>,
}

impl<N: PartialOrd + FromStr + Display + 'static> ValueRange<N> {
    pub fn new(min: N, max: N) -> Result<Self, ValidatorError> {
        match min.partial_cmp(&max) {
            Some(Ordering::Less | Ordering::Equal) => {}
            _ => return Err(ValidatorError::bounds(&min, &max)),
        }
        let message = Cow::Owned(format!("must be between {min} and {max}"));
        Ok(Self {
            min,
            max,
            input: NumericInput::new(),
            message,
        })
    }
}

impl<N> ValueRange<N> {
    pub fn allow_empty(mut self, allow: bool) -> Self {
        self.input.allow_empty = allow;
        self
    }

    pub fn with_transform(mut self, transform: impl Fn(&str) -> Option<N> + 'static) -> Self {
        self.input.transform = Rc::new(transform);
        self
    }

    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }
}

impl<N: PartialOrd> Validator<String> for ValueRange<N> {
    fn error_message(&self) -> &str {
        &self.message
    }

    fn validate(&self, value: &String) -> bool {
        self.input.check(value, |n| *n >= self.min && *n <= self.max)
    }
}
