//! # Forms, fields, and validation
//!
//! Form state for Reform compositions. The pieces:
//!
//! - [`Field<T>`]: a typed handle identified by name only; make them `const`.
//! - [`Validator<T>`]: a message plus a pure check; [`Validators`] is an
//!   ordered list where the first failure wins.
//! - [`FormState`]: the store of values, dirty set, error map, and whether
//!   errors are shown.
//! - [`form_field`] / [`ValidationEffect`]: binds a field to its default and
//!   validators, re-validating when either input changes.
//! - [`FormScope`]: typed reads/writes plus `submit` and `reset`.
//! - [`form`] / [`Form`]: run a body against a scope for one pass.
//!
//! ## A sign-in form
//!
//! ```rust
//! use reform_form::prelude::*;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! const EMAIL: Field<String> = text_field("email");
//! const REMEMBER: Field<bool> = bool_field("remember");
//!
//! let email_rules: Validators<String> = validators![Required::new(), Email::new()];
//! let no_rules: Validators<bool> = Validators::new();
//! let sent = Rc::new(Cell::new(false));
//!
//! let mut form = Form::new(FormState::new());
//! let mut pass = |edit: &dyn Fn(&FormScope)| {
//!     let sent = sent.clone();
//!     form.compose(move || sent.set(true), |scope| {
//!         form_field(scope, &EMAIL, String::new(), &email_rules);
//!         form_field(scope, &REMEMBER, false, &no_rules);
//!         edit(scope);
//!     });
//! };
//!
//! pass(&|_| {});
//! pass(&|scope| scope.set_value(&EMAIL, "bad".to_string()));
//! pass(&|scope| {
//!     assert!(scope.is_dirty(&EMAIL));
//!     assert!(!scope.submit());
//!     assert_eq!(scope.error(&EMAIL).as_deref(), Some("must be a valid email address"));
//!     scope.set_value(&EMAIL, "a@b.co".to_string());
//! });
//! pass(&|scope| {
//!     assert_eq!(scope.error(&EMAIL), None);
//!     assert!(scope.submit());
//! });
//! assert!(sent.get());
//! ```
//!
//! Errors are always computed; whether they count is gated by the form's
//! visibility flag, which only `submit` (or an explicit
//! [`FormState::set_show_errors`]) turns on. An untouched form, or one whose
//! errors are hidden, reports itself valid.

pub mod effect;
pub mod error;
pub mod field;
pub mod form;
pub mod prelude;
pub mod scope;
pub mod state;
pub mod tests;
pub mod validator;
pub mod validators;

pub use effect::{ValidationEffect, form_field};
pub use error::{FormError, FormResult, ValidatorError};
pub use field::{Field, FieldKey, bool_field, list_field, number_field, range_field, text_field};
pub use form::{Form, current_form_scope, form};
pub use scope::FormScope;
pub use state::{FieldValue, FormSnapshot, FormState};
pub use validator::{FnValidator, Validator, Validators, ValidatorsBuilder, validator_fn};
