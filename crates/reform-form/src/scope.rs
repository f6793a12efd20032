use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::FormResult;
use crate::field::Field;
use crate::state::{FieldValue, FormState};

/// Typed accessors and the submit/reset lifecycle over one [`FormState`].
///
/// A scope holds no state of its own: a handle to the store, the submit
/// callback, and the slot id its field bindings are remembered under. Clones
/// are cheap and refer to the same form.
#[derive(Clone)]
pub struct FormScope {
    state: FormState,
    on_submit: Rc<dyn Fn()>,
    slot: u64,
}

static NEXT_SLOT: AtomicU64 = AtomicU64::new(1);

pub(crate) fn next_slot() -> u64 {
    NEXT_SLOT.fetch_add(1, Ordering::Relaxed)
}

impl FormScope {
    /// A scope with its own binding slot. Build it once and reuse it across
    /// passes; [`form`](crate::form) does that for you.
    pub fn new(state: FormState, on_submit: impl Fn() + 'static) -> Self {
        Self::from_parts(state, Rc::new(on_submit), next_slot())
    }

    pub(crate) fn from_parts(state: FormState, on_submit: Rc<dyn Fn()>, slot: u64) -> Self {
        Self {
            state,
            on_submit,
            slot,
        }
    }

    pub(crate) fn slot(&self) -> u64 {
        self.slot
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// # Panics
    ///
    /// If the field has not been initialized by its binding yet, or was
    /// initialized with another type.
    pub fn value<T: FieldValue>(&self, field: &Field<T>) -> T {
        self.state.value(field)
    }

    pub fn try_value<T: FieldValue>(&self, field: &Field<T>) -> FormResult<T> {
        self.state.try_value(field)
    }

    /// Stores a new value. The binding marks the field dirty and re-validates
    /// on the next pass.
    ///
    /// # Panics
    ///
    /// If the field already holds a value of another type.
    pub fn set_value<T: FieldValue>(&self, field: &Field<T>, value: T) {
        self.state.set_value(field, value);
    }

    pub fn try_set_value<T: FieldValue>(&self, field: &Field<T>, value: T) -> FormResult<()> {
        self.state.try_set_value(field, value)
    }

    /// Marks the field dirty directly, e.g. when an input loses focus.
    pub fn mark_dirty<T>(&self, field: &Field<T>) {
        self.state.mark_dirty(field);
    }

    pub fn is_dirty<T>(&self, field: &Field<T>) -> bool {
        self.state.is_field_dirty(field)
    }

    /// The message to display: present only once the field is dirty and the
    /// form shows errors.
    pub fn error<T>(&self, field: &Field<T>) -> Option<String> {
        self.state.visible_error(field)
    }

    /// Records an error from outside the validator list, such as the result
    /// of a server-side check. The next validator run for the field
    /// overwrites it.
    pub fn set_error<T>(&self, field: &Field<T>, error: impl Into<String>) {
        self.state.set_error(field, Some(error.into()));
    }

    pub fn clear_error<T>(&self, field: &Field<T>) {
        self.state.set_error(field, None);
    }

    pub fn is_valid<T>(&self, field: &Field<T>) -> bool {
        self.state.is_field_valid(field)
    }

    pub fn is_form_valid(&self) -> bool {
        self.state.is_valid()
    }

    pub fn is_form_dirty(&self) -> bool {
        self.state.is_dirty()
    }

    /// Submits the form, see [`submit_or`](Self::submit_or).
    pub fn submit(&self) -> bool {
        self.submit_or(|| {})
    }

    /// Marks every known field dirty and shows errors, then calls the submit
    /// callback if the form is valid or `on_invalid` otherwise. Returns
    /// whether the submit callback ran.
    pub fn submit_or(&self, on_invalid: impl FnOnce()) -> bool {
        let check = self.state.begin_submit();
        if check.valid {
            log::debug!("form submitted");
            (self.on_submit)();
        } else {
            log::debug!("submit blocked: {} field(s) failing", check.failing);
            on_invalid();
        }
        check.valid
    }

    pub fn reset(&self) {
        self.state.reset();
    }
}

impl fmt::Debug for FormScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormScope")
            .field("slot", &self.slot)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
