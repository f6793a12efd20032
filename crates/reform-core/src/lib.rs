//! # Compositions, remembered state, and effects
//!
//! Reform's runtime is a small composition model rather than a retained
//! object graph. A screen is a plain function that is re-run ("composed")
//! whenever the host decides something changed; state that must survive
//! between passes lives in `remember*` slots owned by a [`Composition`].
//!
//! - [`Composition`]: the slot table; one call to `compose` is one pass.
//! - `remember*`: lifecycle-aware storage bound to the current composition.
//! - [`KeyedEffect`] / `launched_effect!`: work that re-runs only when its
//!   key changes.
//! - [`remember_updated`]: a slot refreshed on every pass.
//! - [`provide_local`] / [`local`]: values visible to a composed subtree.
//!
//! ## Remembered state
//!
//! ```rust
//! use reform_core::*;
//! use std::cell::Cell;
//!
//! let mut composition = Composition::new();
//! for _ in 0..3 {
//!     composition.compose(|| {
//!         let renders = remember(|| Cell::new(0));
//!         renders.set(renders.get() + 1);
//!     });
//! }
//! let total = composition.compose(|| remember(|| Cell::new(0)).get());
//! assert_eq!(total, 3);
//! ```
//!
//! - `remember` and `remember_state` are order-based: the Nth call in a
//!   pass always refers to the Nth stored value.
//! - `remember_with_key` and `remember_state_with_key` are key-based and stay
//!   stable across conditional branches.
//!
//! ## Keyed effects
//!
//! ```rust
//! use reform_core::*;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let runs = Rc::new(Cell::new(0));
//! let mut composition = Composition::new();
//! for key in [1, 1, 2] {
//!     let runs = runs.clone();
//!     composition.compose(move || {
//!         launched_effect!(key, || runs.set(runs.get() + 1));
//!     });
//! }
//! assert_eq!(runs.get(), 2);
//! ```

pub mod effects;
pub mod locals;
pub mod prelude;
pub mod runtime;

pub use effects::*;
pub use locals::*;
pub use runtime::*;
