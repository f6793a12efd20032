use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use smallvec::SmallVec;

/// A named, pure check over a field value.
///
/// `validate` must depend only on `value` and the validator's own
/// configuration (or an accessor it was given), so calling it twice with the
/// same input gives the same answer.
pub trait Validator<T> {
    fn error_message(&self) -> &str;
    fn validate(&self, value: &T) -> bool;
}

type Slots<T> = SmallVec<[Box<dyn Validator<T>>; 4]>;

/// An ordered, shared, immutable validator list.
///
/// Cloning is cheap and keeps the identity: two `Validators` compare equal
/// only if they are the same list. Validation bindings treat a new list as a
/// changed input, so remember the list when it should not trigger a re-run.
pub struct Validators<T>(Rc<Slots<T>>);

impl<T> Validators<T> {
    pub fn new() -> Self {
        Self(Rc::new(SmallVec::new()))
    }

    pub fn builder() -> ValidatorsBuilder<T> {
        ValidatorsBuilder {
            slots: SmallVec::new(),
        }
    }

    pub fn from_boxed(list: impl IntoIterator<Item = Box<dyn Validator<T>>>) -> Self {
        Self(Rc::new(list.into_iter().collect()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Validator<T>> {
        self.0.iter().map(|v| v.as_ref())
    }

    /// The first validator, in list order, that rejects `value`. Validators
    /// after it are not evaluated.
    pub fn first_failure(&self, value: &T) -> Option<&dyn Validator<T>> {
        self.iter().find(|v| !v.validate(value))
    }

    pub fn first_error(&self, value: &T) -> Option<String> {
        self.first_failure(value).map(|v| v.error_message().to_owned())
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Default for Validators<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Validators<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> PartialEq for Validators<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<T> fmt::Debug for Validators<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|v| v.error_message()))
            .finish()
    }
}

pub struct ValidatorsBuilder<T> {
    slots: Slots<T>,
}

impl<T> ValidatorsBuilder<T> {
    pub fn with(mut self, validator: impl Validator<T> + 'static) -> Self {
        self.slots.push(Box::new(validator));
        self
    }

    pub fn build(self) -> Validators<T> {
        Validators(Rc::new(self.slots))
    }
}

/// Builds a [`Validators`] list in evaluation order.
///
/// ```rust
/// use reform_form::validators::{Email, Required};
/// use reform_form::{Validators, validators};
///
/// let list: Validators<String> = validators![Required::new(), Email::new()];
/// assert_eq!(list.first_error(&String::new()).as_deref(), Some("is required"));
/// ```
#[macro_export]
macro_rules! validators {
    () => {
        $crate::Validators::new()
    };
    ($($validator:expr),+ $(,)?) => {
        $crate::Validators::builder()$(.with($validator))+.build()
    };
}

/// Validator backed by a closure; see [`validator_fn`].
pub struct FnValidator<T, F> {
    message: String,
    predicate: F,
    _value: PhantomData<fn(&T)>,
}

impl<T, F> Validator<T> for FnValidator<T, F>
where
    F: Fn(&T) -> bool,
{
    fn error_message(&self) -> &str {
        &self.message
    }

    fn validate(&self, value: &T) -> bool {
        (self.predicate)(value)
    }
}

pub fn validator_fn<T, F>(message: impl Into<String>, predicate: F) -> FnValidator<T, F>
where
    F: Fn(&T) -> bool,
{
    FnValidator {
        message: message.into(),
        predicate,
        _value: PhantomData,
    }
}
