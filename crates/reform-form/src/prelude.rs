pub use crate::effect::{ValidationEffect, form_field};
pub use crate::error::{FormError, FormResult, ValidatorError};
pub use crate::field::{
    Field, FieldKey, bool_field, list_field, number_field, range_field, text_field,
};
pub use crate::form::{Form, current_form_scope, form};
pub use crate::scope::FormScope;
pub use crate::state::{FieldValue, FormSnapshot, FormState};
pub use crate::validator::{Validator, Validators, validator_fn};
pub use crate::validators;
pub use crate::validators::*;
