use std::any::{Any, TypeId};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::error::{FormError, FormResult};
use crate::field::{Field, FieldKey};

/// Bounds every value stored in a form must satisfy.
pub trait FieldValue: Clone + PartialEq + Send + 'static {}

impl<T: Clone + PartialEq + Send + 'static> FieldValue for T {}

/// A value tagged with the type it was written as.
struct StoredValue {
    type_id: TypeId,
    type_name: &'static str,
    value: Box<dyn Any + Send>,
}

impl StoredValue {
    fn new<T: FieldValue>(value: T) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            value: Box::new(value),
        }
    }

    fn check<T: FieldValue>(&self, key: &FieldKey) -> FormResult<()> {
        if self.type_id == TypeId::of::<T>() {
            Ok(())
        } else {
            Err(FormError::TypeMismatch {
                field: key.to_string(),
                expected: std::any::type_name::<T>(),
                found: self.type_name,
            })
        }
    }

    fn get<T: FieldValue>(&self, key: &FieldKey) -> FormResult<&T> {
        self.check::<T>(key)?;
        self.value
            .downcast_ref::<T>()
            .ok_or_else(|| FormError::TypeMismatch {
                field: key.to_string(),
                expected: std::any::type_name::<T>(),
                found: self.type_name,
            })
    }
}

static NEXT_STORE_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Default)]
struct Store {
    id: u64,
    values: HashMap<FieldKey, StoredValue>,
    dirty_fields: BTreeSet<FieldKey>,
    errors: BTreeMap<FieldKey, String>,
    show_errors: bool,
    generation: u64,
    revision: u64,
}

impl Store {
    fn is_valid(&self) -> bool {
        !self.show_errors || self.dirty_fields.is_empty() || self.errors.is_empty()
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}

pub(crate) struct SubmitCheck {
    pub(crate) valid: bool,
    pub(crate) failing: usize,
}

/// Consistent copy of a form's bookkeeping, taken under one lock.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormSnapshot {
    pub fields: BTreeSet<FieldKey>,
    pub dirty_fields: BTreeSet<FieldKey>,
    pub errors: BTreeMap<FieldKey, String>,
    pub show_errors: bool,
    pub is_valid: bool,
    pub is_dirty: bool,
    pub generation: u64,
    pub revision: u64,
}

/// The mutable store behind a form: values by field name, the dirty set,
/// the error map, and the error-visibility flag.
///
/// `FormState` is a handle; clones share one store, so a state created above
/// a screen survives the screen being recomposed or torn down. All four
/// parts sit behind a single lock so derived reads (`is_valid`, `is_dirty`)
/// never see a half-applied update.
///
/// Errors are always computed; `show_errors` only gates whether they count
/// and are displayed.
#[derive(Clone)]
pub struct FormState {
    inner: Arc<Mutex<Store>>,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    pub fn new() -> Self {
        let store = Store {
            id: NEXT_STORE_ID.fetch_add(1, Ordering::Relaxed),
            ..Store::default()
        };
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Forgets every value, dirty mark and error and hides errors. The store
    /// keeps its identity; bindings re-initialize their fields on the next
    /// pass.
    pub fn reset(&self) {
        let mut store = self.inner.lock();
        store.values.clear();
        store.dirty_fields.clear();
        store.errors.clear();
        store.show_errors = false;
        store.generation += 1;
        store.touch();
        log::debug!("form reset (generation {})", store.generation);
    }

    /// Valid when errors are hidden, when nothing has been touched, or when
    /// no field currently fails.
    pub fn is_valid(&self) -> bool {
        self.inner.lock().is_valid()
    }

    pub fn is_dirty(&self) -> bool {
        !self.inner.lock().dirty_fields.is_empty()
    }

    pub fn show_errors(&self) -> bool {
        self.inner.lock().show_errors
    }

    pub fn set_show_errors(&self, show: bool) {
        let mut store = self.inner.lock();
        if store.show_errors != show {
            store.show_errors = show;
            store.touch();
        }
    }

    pub fn contains<T>(&self, field: &Field<T>) -> bool {
        self.inner.lock().values.contains_key(field.key())
    }

    /// Writes `default` if the field has no value yet. Returns whether it
    /// wrote; fails if the field already holds another type.
    pub fn initialize<T: FieldValue>(&self, field: &Field<T>, default: T) -> FormResult<bool> {
        let mut store = self.inner.lock();
        if let Some(existing) = store.values.get(field.key()) {
            existing.check::<T>(field.key())?;
            return Ok(false);
        }
        store
            .values
            .insert(field.key().clone(), StoredValue::new(default));
        store.touch();
        log::trace!("initialized field `{}`", field.name());
        Ok(true)
    }

    pub fn try_value<T: FieldValue>(&self, field: &Field<T>) -> FormResult<T> {
        let store = self.inner.lock();
        let stored = store
            .values
            .get(field.key())
            .ok_or_else(|| FormError::Uninitialized {
                field: field.name().to_owned(),
            })?;
        stored.get::<T>(field.key()).cloned()
    }

    /// Current value of `field`.
    ///
    /// # Panics
    ///
    /// If the field was never initialized or holds another type; both are
    /// wiring defects.
    pub fn value<T: FieldValue>(&self, field: &Field<T>) -> T {
        self.try_value(field).unwrap_or_else(|err| panic!("{err}"))
    }

    pub fn try_set_value<T: FieldValue>(&self, field: &Field<T>, value: T) -> FormResult<()> {
        let mut guard = self.inner.lock();
        let store = &mut *guard;
        if let Some(stored) = store.values.get(field.key())
            && *stored.get::<T>(field.key())? == value
        {
            return Ok(());
        }
        store
            .values
            .insert(field.key().clone(), StoredValue::new(value));
        store.touch();
        log::trace!("set field `{}`", field.name());
        Ok(())
    }

    /// # Panics
    ///
    /// If the field already holds a value of another type.
    pub fn set_value<T: FieldValue>(&self, field: &Field<T>, value: T) {
        if let Err(err) = self.try_set_value(field, value) {
            panic!("{err}");
        }
    }

    pub fn is_field_dirty<T>(&self, field: &Field<T>) -> bool {
        self.inner.lock().dirty_fields.contains(field.key())
    }

    /// Marks `field` dirty. Returns whether it was clean before.
    pub fn mark_dirty<T>(&self, field: &Field<T>) -> bool {
        let mut store = self.inner.lock();
        let inserted = store.dirty_fields.insert(field.key().clone());
        if inserted {
            store.touch();
        }
        inserted
    }

    /// Marks every field that currently has a value dirty.
    pub fn mark_all_dirty(&self) {
        let mut store = self.inner.lock();
        let keys: Vec<FieldKey> = store.values.keys().cloned().collect();
        let before = store.dirty_fields.len();
        store.dirty_fields.extend(keys);
        if store.dirty_fields.len() != before {
            store.touch();
        }
    }

    /// The recorded error for `field`, regardless of dirtiness or visibility.
    pub fn error<T>(&self, field: &Field<T>) -> Option<String> {
        self.inner.lock().errors.get(field.key()).cloned()
    }

    /// Records or clears the error for `field` without consulting validators.
    pub fn set_error<T>(&self, field: &Field<T>, error: Option<String>) {
        let mut store = self.inner.lock();
        let changed = match error {
            Some(message) if store.errors.get(field.key()) == Some(&message) => false,
            Some(message) => {
                store.errors.insert(field.key().clone(), message);
                true
            }
            None => store.errors.remove(field.key()).is_some(),
        };
        if changed {
            store.touch();
        }
    }

    /// The error for `field` if it is both dirty and errors are shown.
    pub fn visible_error<T>(&self, field: &Field<T>) -> Option<String> {
        let store = self.inner.lock();
        if store.show_errors && store.dirty_fields.contains(field.key()) {
            store.errors.get(field.key()).cloned()
        } else {
            None
        }
    }

    /// True while errors are hidden or `field` has no recorded error.
    pub fn is_field_valid<T>(&self, field: &Field<T>) -> bool {
        let store = self.inner.lock();
        !store.show_errors || !store.errors.contains_key(field.key())
    }

    /// Dirties every known field, shows errors, and reports validity, all
    /// under one lock.
    pub(crate) fn begin_submit(&self) -> SubmitCheck {
        let mut store = self.inner.lock();
        let keys: Vec<FieldKey> = store.values.keys().cloned().collect();
        store.dirty_fields.extend(keys);
        store.show_errors = true;
        store.touch();
        SubmitCheck {
            valid: store.is_valid(),
            failing: store.errors.len(),
        }
    }

    /// Unique per store for the life of the process; never reused.
    pub(crate) fn store_id(&self) -> u64 {
        self.inner.lock().id
    }

    /// Bumped by every reset.
    pub fn generation(&self) -> u64 {
        self.inner.lock().generation
    }

    /// Bumped by every change; a host can skip a pass while it is unchanged.
    pub fn revision(&self) -> u64 {
        self.inner.lock().revision
    }

    pub fn snapshot(&self) -> FormSnapshot {
        let store = self.inner.lock();
        FormSnapshot {
            fields: store.values.keys().cloned().collect(),
            dirty_fields: store.dirty_fields.clone(),
            errors: store.errors.clone(),
            show_errors: store.show_errors,
            is_valid: store.is_valid(),
            is_dirty: !store.dirty_fields.is_empty(),
            generation: store.generation,
            revision: store.revision,
        }
    }

    /// Whether both handles point at the same store.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for FormState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot();
        f.debug_struct("FormState")
            .field("fields", &snapshot.fields)
            .field("dirty_fields", &snapshot.dirty_fields)
            .field("errors", &snapshot.errors)
            .field("show_errors", &snapshot.show_errors)
            .finish()
    }
}
