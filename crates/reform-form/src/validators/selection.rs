//! Count bounds over multi-select values (`Vec<T>`).

use std::borrow::Cow;

use crate::{Validator, ValidatorError};

#[derive(Debug, Clone)]
pub struct SelectionNotEmpty {
    message: Cow<'static, str>,
}

impl SelectionNotEmpty {
    pub fn new() -> Self {
        Self {
            message: Cow::Borrowed("select at least one option"),
        }
    }

    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }
}

impl Default for SelectionNotEmpty {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Validator<Vec<T>> for SelectionNotEmpty {
    fn error_message(&self) -> &str {
        &self.message
    }

    fn validate(&self, value: &Vec<T>) -> bool {
        !value.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct SelectionMin {
    min: usize,
    message: Cow<'static, str>,
}

impl SelectionMin {
    pub fn new(min: usize) -> Self {
        Self {
            min,
            message: Cow::Owned(format!("select at least {min} options")),
        }
    }

    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }
}

impl<T> Validator<Vec<T>> for SelectionMin {
    fn error_message(&self) -> &str {
        &self.message
    }

    fn validate(&self, value: &Vec<T>) -> bool {
        value.len() >= self.min
    }
}

#[derive(Debug, Clone)]
pub struct SelectionMax {
    max: usize,
    message: Cow<'static, str>,
}

impl SelectionMax {
    pub fn new(max: usize) -> Self {
        Self {
            max,
            message: Cow::Owned(format!("select at most {max} options")),
        }
    }

    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }
}

impl<T> Validator<Vec<T>> for SelectionMax {
    fn error_message(&self) -> &str {
        &self.message
    }

    fn validate(&self, value: &Vec<T>) -> bool {
        value.len() <= self.max
    }
}

#[derive(Debug, Clone)]
pub struct SelectionExact {
    count: usize,
    message: Cow<'static, str>,
}

impl SelectionExact {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            message: Cow::Owned(format!("select exactly {count} options")),
        }
    }

    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }
}

impl<T> Validator<Vec<T>> for SelectionExact {
    fn error_message(&self) -> &str {
        &self.message
    }

    fn validate(&self, value: &Vec<T>) -> bool {
        value.len() == self.count
    }
}

/// Between `min` and `max` options, inclusive. Counts are unsigned, so a
/// negative minimum cannot be expressed; `min > max` is rejected.
#[derive(Debug, Clone)]
pub struct SelectionRange {
    min: usize,
    max: usize,
    message: Cow<'static, str>,
}

impl SelectionRange {
    pub fn new(min: usize, max: usize) -> Result<Self, ValidatorError> {
        if min > max {
            return Err(ValidatorError::bounds(min, max));
        }
        Ok(Self {
            min,
            max,
            message: Cow::Owned(format!("select between {min} and {max} options")),
        })
    }

    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }
}

impl<T> Validator<Vec<T>> for SelectionRange {
    fn error_message(&self) -> &str {
        &self.message
    }

    fn validate(&self, value: &Vec<T>) -> bool {
        (self.min..=self.max).contains(&value.len())
    }
}
