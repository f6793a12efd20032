//! Validation bindings.
//!
//! A binding ties one field to its default value and validator list. Each
//! time it runs it makes sure the field has a value, marks the field dirty
//! once the value moves away from the default, and records the first failing
//! validator's message (or clears it). Runs are skipped while the observed
//! inputs, the form generation, the field value and the validator list,
//! stay the same.

use std::cell::RefCell;

use reform_core::{KeyedEffect, remember_with_key};

use crate::error::FormResult;
use crate::field::Field;
use crate::scope::FormScope;
use crate::state::{FieldValue, FormState};
use crate::validator::Validators;

/// What a binding saw the last time it ran. The store is recorded by id so a
/// remembered binding never keeps a dropped form alive.
#[derive(PartialEq)]
struct Observed<T> {
    store: u64,
    generation: u64,
    value: T,
    validators: Validators<T>,
}

/// Keeps a field's dirty mark and error in step with its value.
pub struct ValidationEffect<T> {
    field: Field<T>,
    effect: KeyedEffect<Observed<T>>,
}

impl<T: FieldValue> ValidationEffect<T> {
    pub fn new(field: Field<T>) -> Self {
        Self {
            field,
            effect: KeyedEffect::new(),
        }
    }

    pub fn field(&self) -> &Field<T> {
        &self.field
    }

    /// Runs the binding against `state`. Returns whether validators were
    /// evaluated, `false` when nothing it observes changed since last time.
    pub fn try_run(
        &mut self,
        state: &FormState,
        default: &T,
        validators: &Validators<T>,
    ) -> FormResult<bool> {
        // the value must exist before anything reads it
        state.initialize(&self.field, default.clone())?;
        let value = state.try_value(&self.field)?;

        let observed = Observed {
            store: state.store_id(),
            generation: state.generation(),
            value: value.clone(),
            validators: validators.clone(),
        };
        let field = &self.field;
        let ran = self.effect.run(observed, || {
            if value != *default && state.mark_dirty(field) {
                log::trace!("field `{}` is dirty", field.name());
            }
            let error = validators.first_error(&value);
            match &error {
                Some(message) => log::trace!("field `{}` invalid: {message}", field.name()),
                None => log::trace!("field `{}` valid", field.name()),
            }
            state.set_error(field, error);
        });
        Ok(ran)
    }

    /// [`try_run`](Self::try_run) for bindings that must be wired correctly.
    ///
    /// # Panics
    ///
    /// If the field's name is already used with another value type.
    pub fn run(&mut self, state: &FormState, default: &T, validators: &Validators<T>) -> bool {
        self.try_run(state, default, validators)
            .unwrap_or_else(|err| panic!("{err}"))
    }

    /// Forces the next run to evaluate validators.
    pub fn invalidate(&mut self) {
        self.effect.invalidate();
    }
}

/// Binds `field` inside the current composition and returns its value.
///
/// One [`ValidationEffect`] is remembered per form and field name, where a
/// form is one [`form`](crate::form) call or one hand-built [`FormScope`].
/// Calling this on every pass re-validates only when the value or
/// `validators` changed. Pass the same (remembered) list across passes to keep that
/// memoization; a freshly built list counts as a change.
///
/// # Panics
///
/// If the field's name is already used in this form with another value type.
pub fn form_field<T: FieldValue>(
    scope: &FormScope,
    field: &Field<T>,
    default: T,
    validators: &Validators<T>,
) -> T {
    let state = scope.state();
    let key = format!("reform:field:{}:{}", scope.slot(), field.name());
    let binding = remember_with_key(key, || RefCell::new(ValidationEffect::new(field.clone())));
    binding.borrow_mut().run(state, &default, validators);
    state.value(field)
}
