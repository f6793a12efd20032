use std::borrow::Cow;

use regex::Regex;

use crate::{Validator, ValidatorError};

fn compile(pattern: &str) -> Result<Regex, ValidatorError> {
    Regex::new(pattern).map_err(|source| ValidatorError::InvalidPattern {
        pattern: pattern.to_owned(),
        source,
    })
}

/// The whole text must match the pattern.
///
/// ```rust
/// use reform_form::Validator;
/// use reform_form::validators::Matches;
///
/// let digits = Matches::new(r"\d+").unwrap();
/// assert!(digits.validate(&"2024".to_string()));
/// assert!(!digits.validate(&"20x24".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct Matches {
    regex: Regex,
    message: Cow<'static, str>,
}

impl Matches {
    pub fn new(pattern: &str) -> Result<Self, ValidatorError> {
        // anchor without disturbing alternations in `pattern`
        let regex = compile(&format!("^(?:{pattern})$"))?;
        Ok(Self {
            regex,
            message: Cow::Owned(format!("must match {pattern}")),
        })
    }

    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }
}

impl Validator<String> for Matches {
    fn error_message(&self) -> &str {
        &self.message
    }

    fn validate(&self, value: &String) -> bool {
        self.regex.is_match(value)
    }
}

/// The pattern must occur somewhere in the text.
#[derive(Debug, Clone)]
pub struct Contains {
    regex: Regex,
    message: Cow<'static, str>,
}

impl Contains {
    pub fn new(pattern: &str) -> Result<Self, ValidatorError> {
        let regex = compile(pattern)?;
        Ok(Self {
            regex,
            message: Cow::Owned(format!("must contain {pattern}")),
        })
    }

    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }
}

impl Validator<String> for Contains {
    fn error_message(&self) -> &str {
        &self.message
    }

    fn validate(&self, value: &String) -> bool {
        self.regex.is_match(value)
    }
}
