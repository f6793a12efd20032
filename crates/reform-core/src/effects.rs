use std::cell::RefCell;

/// Remembers the last key an effect ran for and skips the effect while the
/// key stays equal.
#[derive(Debug)]
pub struct KeyedEffect<K> {
    last: Option<K>,
}

impl<K> Default for KeyedEffect<K> {
    fn default() -> Self {
        Self { last: None }
    }
}

impl<K: PartialEq> KeyedEffect<K> {
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Whether `key` differs from the key of the last run.
    pub fn is_stale(&self, key: &K) -> bool {
        self.last.as_ref() != Some(key)
    }

    /// Runs `effect` if `key` changed since the last run. Returns whether it ran.
    pub fn run(&mut self, key: K, effect: impl FnOnce()) -> bool {
        if !self.is_stale(&key) {
            return false;
        }
        self.last = Some(key);
        effect();
        true
    }

    pub fn last_key(&self) -> Option<&K> {
        self.last.as_ref()
    }

    /// Forgets the last key; the next `run` always fires.
    pub fn invalidate(&mut self) {
        self.last = None;
    }
}

/// runs on every recomposition
pub fn side_effect(effect: impl FnOnce()) {
    effect();
}

/// Internal implementation: keyed by a per-callsite id string.
pub fn launched_effect_internal<K: PartialEq + 'static>(
    callsite: &'static str,
    key: K,
    effect: impl FnOnce(),
) -> bool {
    // One slot per call-site, with K baked into its type.
    let slot = crate::remember_with_key(format!("launched:{callsite}"), || {
        RefCell::new(KeyedEffect::<K>::new())
    });
    let mut keyed = slot.borrow_mut();
    keyed.run(key, effect)
}

/// Runs the effect on first composition and again whenever `$key` changes.
#[macro_export]
macro_rules! launched_effect {
    ($key:expr, $effect:expr) => {
        $crate::effects::launched_effect_internal(
            concat!(module_path!(), ":", line!(), ":", column!()),
            $key,
            $effect,
        )
    };
}
