use std::borrow::Cow;

use crate::Validator;

enum Target<T> {
    Fixed(T),
    Lazy(Box<dyn Fn() -> T>),
}

/// Value must equal a target.
///
/// The target is either fixed at construction or read through an accessor
/// every time the validator runs, which lets a "confirm password" field
/// compare against the live value of another field.
pub struct EqualTo<T> {
    target: Target<T>,
    message: Cow<'static, str>,
}

impl<T: PartialEq> EqualTo<T> {
    pub fn value(target: T) -> Self {
        Self {
            target: Target::Fixed(target),
            message: Cow::Borrowed("does not match"),
        }
    }

    pub fn lazy(accessor: impl Fn() -> T + 'static) -> Self {
        Self {
            target: Target::Lazy(Box::new(accessor)),
            message: Cow::Borrowed("does not match"),
        }
    }

    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }
}

impl<T: PartialEq> Validator<T> for EqualTo<T> {
    fn error_message(&self) -> &str {
        &self.message
    }

    fn validate(&self, value: &T) -> bool {
        match &self.target {
            Target::Fixed(target) => value == target,
            Target::Lazy(accessor) => *value == accessor(),
        }
    }
}

/// A boolean field that must be ticked, e.g. accepting terms.
#[derive(Debug, Clone)]
pub struct Checked {
    message: Cow<'static, str>,
}

impl Checked {
    pub fn new() -> Self {
        Self {
            message: Cow::Borrowed("must be checked"),
        }
    }

    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }
}

impl Default for Checked {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator<bool> for Checked {
    fn error_message(&self) -> &str {
        &self.message
    }

    fn validate(&self, value: &bool) -> bool {
        *value
    }
}
