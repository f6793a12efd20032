//! # Composition locals
//!
//! Values provided for the duration of a closure and readable by anything
//! composed inside it, without threading them through every call:
//!
//! ```rust
//! use reform_core::{local, provide_local};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Accent(&'static str);
//!
//! assert_eq!(local::<Accent>(), None);
//! provide_local(Accent("teal"), || {
//!     assert_eq!(local::<Accent>(), Some(Accent("teal")));
//!     provide_local(Accent("amber"), || {
//!         assert_eq!(local::<Accent>(), Some(Accent("amber")));
//!     });
//!     assert_eq!(local::<Accent>(), Some(Accent("teal")));
//! });
//! ```
//!
//! Lookup walks frames innermost first, keyed by the value's type.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;

type Frame = HashMap<TypeId, Box<dyn Any>>;

thread_local! {
    static FRAMES: RefCell<Vec<Frame>> = const { RefCell::new(Vec::new()) };
}

/// Pops the frame it pushed, also when the body unwinds.
struct FrameGuard;

impl FrameGuard {
    fn push(frame: Frame) -> Self {
        FRAMES.with(|frames| frames.borrow_mut().push(frame));
        FrameGuard
    }
}

impl Drop for FrameGuard {
    fn drop(&mut self) {
        FRAMES.with(|frames| {
            frames.borrow_mut().pop();
        });
    }
}

/// Provides `value` to everything running inside `f`.
pub fn provide_local<T: 'static, R>(value: T, f: impl FnOnce() -> R) -> R {
    let mut frame = Frame::new();
    frame.insert(TypeId::of::<T>(), Box::new(value));
    let _frame = FrameGuard::push(frame);
    f()
}

/// The innermost provided value of type `T`, if any.
pub fn local<T: Clone + 'static>() -> Option<T> {
    FRAMES.with(|frames| {
        frames
            .borrow()
            .iter()
            .rev()
            .find_map(|frame| frame.get(&TypeId::of::<T>())?.downcast_ref::<T>())
            .cloned()
    })
}
