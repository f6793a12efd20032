use std::rc::Rc;

use reform_core::{Composition, local, provide_local, remember, remember_updated};

use crate::scope::{FormScope, next_slot};
use crate::state::FormState;

/// What one `form` call keeps between passes.
struct FormSlot {
    id: u64,
    submit: Rc<dyn Fn()>,
}

/// Composes a form over `state` for the current pass.
///
/// `on_submit` is refreshed on every pass, and the scope handed to `body`
/// always calls the newest one, so a submit captured by a long-lived closure
/// still runs the logic of the latest pass. The scope is also available to
/// anything inside `body` through [`current_form_scope`].
///
/// Like `remember`, a call is identified by its position in the pass. Each
/// call gets its own callback and field bindings, also when two calls share
/// one `state`; composing a different `state` at the same position reuses
/// the slot instead of keeping the old form alive.
pub fn form<R>(
    state: &FormState,
    on_submit: impl Fn() + 'static,
    body: impl FnOnce(&FormScope) -> R,
) -> R {
    let latest = remember_updated::<Rc<dyn Fn()>>(Rc::new(on_submit));
    let slot = remember(|| {
        let submit: Rc<dyn Fn()> = Rc::new(move || {
            if let Some(on_submit) = latest.get() {
                on_submit();
            }
        });
        FormSlot {
            id: next_slot(),
            submit,
        }
    });

    let scope = FormScope::from_parts(state.clone(), Rc::clone(&slot.submit), slot.id);
    provide_local(scope.clone(), || body(&scope))
}

/// The scope of the innermost [`form`] being composed, if any.
pub fn current_form_scope() -> Option<FormScope> {
    local::<FormScope>()
}

/// A form with its own composition, for hosts that drive passes by hand:
/// tests, command-line tools, or an event loop without a UI runtime.
///
/// ```rust
/// use reform_form::prelude::*;
///
/// const NAME: Field<String> = text_field("name");
///
/// let mut form = Form::new(FormState::new());
/// let rules: Validators<String> = validators![Required::new()];
///
/// form.compose(|| {}, |scope| {
///     form_field(scope, &NAME, String::new(), &rules);
/// });
/// assert!(form.state().is_valid());
///
/// let submitted = form.compose(|| {}, |scope| {
///     form_field(scope, &NAME, String::new(), &rules);
///     scope.submit()
/// });
/// assert!(!submitted);
/// let scope = form.scope().unwrap();
/// assert_eq!(scope.error(&NAME).as_deref(), Some("is required"));
/// ```
pub struct Form {
    state: FormState,
    composition: Composition,
    last_scope: Option<FormScope>,
}

impl Form {
    pub fn new(state: FormState) -> Self {
        Self {
            state,
            composition: Composition::new(),
            last_scope: None,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// The scope of the most recent pass, `None` before the first one. Its
    /// submit runs the callback given to that pass.
    pub fn scope(&self) -> Option<FormScope> {
        self.last_scope.clone()
    }

    /// Runs one composition pass of the form.
    pub fn compose<R>(
        &mut self,
        on_submit: impl Fn() + 'static,
        body: impl FnOnce(&FormScope) -> R,
    ) -> R {
        let state = &self.state;
        let last_scope = &mut self.last_scope;
        self.composition.compose(|| {
            form(state, on_submit, |scope| {
                *last_scope = Some(scope.clone());
                body(scope)
            })
        })
    }

    pub fn passes(&self) -> u64 {
        self.composition.passes()
    }
}
