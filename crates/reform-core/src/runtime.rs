use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

thread_local! {
    static COMPOSER: RefCell<Option<Composer>> = const { RefCell::new(None) };
}

/// Slot table backing `remember*` calls for one composition.
#[derive(Default)]
struct Composer {
    slots: Vec<Box<dyn Any>>,
    cursor: usize,
    keyed_slots: HashMap<String, Box<dyn Any>>,
}

/// A composition that keeps its remembered slots between passes.
///
/// Each call to [`Composition::compose`] is one pass: the slot cursor is
/// rewound, the composition is installed as the current one for the calling
/// thread, and the closure runs. Compositions nest; the outer one is restored
/// when the inner pass ends (also on unwind).
#[derive(Default)]
pub struct Composition {
    composer: Option<Composer>,
    passes: u64,
}

impl Composition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compose<R>(&mut self, f: impl FnOnce() -> R) -> R {
        let mut composer = self.composer.take().unwrap_or_default();
        composer.cursor = 0;
        self.passes += 1;
        log::trace!("composition pass {}", self.passes);

        let prev = COMPOSER.with(|c| c.borrow_mut().replace(composer));
        let _guard = PassGuard {
            prev,
            home: &mut self.composer,
        };
        f()
    }

    /// Number of passes run so far.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Drops every remembered slot; the next pass starts from scratch.
    pub fn clear(&mut self) {
        self.composer = None;
    }
}

struct PassGuard<'a> {
    prev: Option<Composer>,
    home: &'a mut Option<Composer>,
}

impl Drop for PassGuard<'_> {
    fn drop(&mut self) {
        let finished = COMPOSER.with(|c| std::mem::replace(&mut *c.borrow_mut(), self.prev.take()));
        *self.home = finished;
    }
}

/// True while a composition pass is running on this thread.
pub fn in_composition() -> bool {
    COMPOSER.with(|c| c.borrow().is_some())
}

/// Slot-based remember (sequential composition only)
pub fn remember<T: 'static>(init: impl FnOnce() -> T) -> Rc<T> {
    enum Lookup<T> {
        Hit(Rc<T>),
        Miss(usize),
        Outside,
    }

    let lookup = COMPOSER.with(|c| {
        let mut c = c.borrow_mut();
        let Some(c) = c.as_mut() else {
            return Lookup::Outside;
        };
        let cursor = c.cursor;
        c.cursor += 1;

        if cursor >= c.slots.len() {
            // placeholder keeps nested remembers in `init` in order
            c.slots.push(Box::new(()));
            return Lookup::Miss(cursor);
        }
        match c.slots[cursor].downcast_ref::<Rc<T>>() {
            Some(rc) => Lookup::Hit(rc.clone()),
            None => {
                log::warn!(
                    "remember: slot {} type changed; replacing. \
                     If this is due to conditional composition, prefer remember_with_key.",
                    cursor
                );
                Lookup::Miss(cursor)
            }
        }
    });

    match lookup {
        Lookup::Hit(rc) => rc,
        Lookup::Outside => {
            log::warn!("remember called outside a composition; value will not be kept");
            Rc::new(init())
        }
        Lookup::Miss(cursor) => {
            let rc: Rc<T> = Rc::new(init());
            COMPOSER.with(|c| {
                if let Some(c) = c.borrow_mut().as_mut() {
                    c.slots[cursor] = Box::new(rc.clone());
                }
            });
            rc
        }
    }
}

/// Key-based remember
pub fn remember_with_key<T: 'static>(key: impl Into<String>, init: impl FnOnce() -> T) -> Rc<T> {
    let key = key.into();

    let existing = COMPOSER.with(|c| {
        let c = c.borrow();
        let c = c.as_ref()?;
        let slot = c.keyed_slots.get(&key)?;
        match slot.downcast_ref::<Rc<T>>() {
            Some(rc) => Some(rc.clone()),
            None => {
                log::warn!(
                    "remember_with_key: key '{}' reused with a different type; replacing.",
                    key
                );
                None
            }
        }
    });
    if let Some(rc) = existing {
        return rc;
    }

    let rc: Rc<T> = Rc::new(init());
    let kept = COMPOSER.with(|c| match c.borrow_mut().as_mut() {
        Some(c) => {
            c.keyed_slots.insert(key.clone(), Box::new(rc.clone()));
            true
        }
        None => false,
    });
    if !kept {
        log::warn!("remember_with_key('{key}') called outside a composition; value will not be kept");
    }
    rc
}

pub fn remember_state<T: 'static>(init: impl FnOnce() -> T) -> Rc<RefCell<T>> {
    remember(|| RefCell::new(init()))
}

pub fn remember_state_with_key<T: 'static>(
    key: impl Into<String>,
    init: impl FnOnce() -> T,
) -> Rc<RefCell<T>> {
    remember_with_key(key, || RefCell::new(init()))
}

/// Holder whose contents are replaced on every pass; see [`remember_updated`].
pub struct Latest<T>(RefCell<Option<T>>);

impl<T> Latest<T> {
    fn empty() -> Self {
        Self(RefCell::new(None))
    }

    pub fn set(&self, value: T) {
        *self.0.borrow_mut() = Some(value);
    }

    pub fn get(&self) -> Option<T>
    where
        T: Clone,
    {
        self.0.borrow().clone()
    }
}

/// Remembers a slot and overwrites it with `value` on every pass, so closures
/// captured once keep seeing the newest value.
pub fn remember_updated<T: 'static>(value: T) -> Rc<Latest<T>> {
    let latest = remember(Latest::empty);
    latest.set(value);
    latest
}

/// Key-based [`remember_updated`].
pub fn remember_updated_with_key<T: 'static>(key: impl Into<String>, value: T) -> Rc<Latest<T>> {
    let latest = remember_with_key(key, Latest::empty);
    latest.set(value);
    latest
}
