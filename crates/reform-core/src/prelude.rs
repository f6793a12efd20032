pub use crate::effects::{KeyedEffect, side_effect};
pub use crate::launched_effect;
pub use crate::locals::{local, provide_local};
pub use crate::runtime::{
    Composition, Latest, in_composition, remember, remember_state, remember_state_with_key,
    remember_updated, remember_updated_with_key, remember_with_key,
};
