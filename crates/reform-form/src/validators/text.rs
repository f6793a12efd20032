use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::Validator;

// local@domain.tld, no whitespace, at least a two-letter top-level label
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$")
        .expect("EMAIL_REGEX: invalid regex pattern")
});

fn grapheme_len(value: &str) -> usize {
    value.graphemes(true).count()
}

/// Rejects empty and whitespace-only text.
#[derive(Debug, Clone)]
pub struct Required {
    message: Cow<'static, str>,
}

impl Required {
    pub fn new() -> Self {
        Self {
            message: Cow::Borrowed("is required"),
        }
    }

    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }
}

impl Default for Required {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator<String> for Required {
    fn error_message(&self) -> &str {
        &self.message
    }

    fn validate(&self, value: &String) -> bool {
        !value.trim().is_empty()
    }
}

/// Text must be at least `min` characters long (grapheme clusters).
#[derive(Debug, Clone)]
pub struct MinLength {
    min: usize,
    message: Cow<'static, str>,
}

impl MinLength {
    pub fn new(min: usize) -> Self {
        Self {
            min,
            message: Cow::Owned(format!("must be at least {min} characters")),
        }
    }

    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }
}

impl Validator<String> for MinLength {
    fn error_message(&self) -> &str {
        &self.message
    }

    fn validate(&self, value: &String) -> bool {
        grapheme_len(value) >= self.min
    }
}

/// Text must be at most `max` characters long (grapheme clusters).
#[derive(Debug, Clone)]
pub struct MaxLength {
    max: usize,
    message: Cow<'static, str>,
}

impl MaxLength {
    pub fn new(max: usize) -> Self {
        Self {
            max,
            message: Cow::Owned(format!("must be at most {max} characters")),
        }
    }

    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }
}

impl Validator<String> for MaxLength {
    fn error_message(&self) -> &str {
        &self.message
    }

    fn validate(&self, value: &String) -> bool {
        grapheme_len(value) <= self.max
    }
}

/// Text must look like an email address. Empty text is rejected too; pair
/// with [`Required`] first for a friendlier message.
#[derive(Debug, Clone)]
pub struct Email {
    message: Cow<'static, str>,
}

impl Email {
    pub fn new() -> Self {
        Self {
            message: Cow::Borrowed("must be a valid email address"),
        }
    }

    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }
}

impl Default for Email {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator<String> for Email {
    fn error_message(&self) -> &str {
        &self.message
    }

    fn validate(&self, value: &String) -> bool {
        EMAIL_REGEX.is_match(value)
    }
}
