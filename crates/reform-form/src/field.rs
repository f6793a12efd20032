//! Field identity.
//!
//! A [`Field`] is a typed, stateless handle over a [`FieldKey`]. The name is
//! the whole identity: handles are cheap to build anywhere, need no
//! registration, and two handles with the same name address the same slot
//! of a [`FormState`](crate::FormState) whatever their declared type.

use std::borrow::{Borrow, Cow};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::RangeInclusive;

/// Name of a field, used as the store key.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldKey(Cow<'static, str>);

impl FieldKey {
    pub const fn new(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for FieldKey {
    fn from(name: &'static str) -> Self {
        Self::new(name)
    }
}

impl From<String> for FieldKey {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl Borrow<str> for FieldKey {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed handle to a form field.
///
/// ```rust
/// use reform_form::{Field, text_field};
///
/// const EMAIL: Field<String> = text_field("email");
/// let same: Field<i64> = Field::named(String::from("email"));
/// assert_eq!(EMAIL, same);
/// ```
pub struct Field<T> {
    key: FieldKey,
    _ty: PhantomData<fn() -> T>,
}

impl<T> Field<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            key: FieldKey::new(name),
            _ty: PhantomData,
        }
    }

    /// Handle for a name only known at runtime.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            key: FieldKey::from(name.into()),
            _ty: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        self.key.as_str()
    }

    pub fn key(&self) -> &FieldKey {
        &self.key
    }
}

impl<T> Clone for Field<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            _ty: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name())
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T, U> PartialEq<Field<U>> for Field<T> {
    fn eq(&self, other: &Field<U>) -> bool {
        self.key == other.key
    }
}

impl<T> Eq for Field<T> {}

impl<T> Hash for Field<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

pub const fn text_field(name: &'static str) -> Field<String> {
    Field::new(name)
}

pub const fn bool_field(name: &'static str) -> Field<bool> {
    Field::new(name)
}

pub const fn number_field<N>(name: &'static str) -> Field<N> {
    Field::new(name)
}

pub const fn list_field<T>(name: &'static str) -> Field<Vec<T>> {
    Field::new(name)
}

pub const fn range_field<N>(name: &'static str) -> Field<RangeInclusive<N>> {
    Field::new(name)
}
