#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::sync::{Arc, Weak};

    use reform_core::Composition;

    use crate::prelude::*;

    const NAME: Field<String> = text_field("name");
    const AGE: Field<i64> = number_field("age");
    const TAGS: Field<Vec<String>> = list_field("tags");

    fn s(v: &str) -> String {
        v.to_string()
    }

    #[test]
    fn test_read_before_initialization_is_an_error() {
        let state = FormState::new();
        assert_eq!(
            state.try_value(&NAME),
            Err(FormError::Uninitialized { field: s("name") })
        );
    }

    #[test]
    #[should_panic(expected = "read before it was initialized")]
    fn test_value_panics_when_uninitialized() {
        FormState::new().value(&NAME);
    }

    #[test]
    fn test_same_name_different_type_is_an_error() {
        let state = FormState::new();
        let as_text: Field<String> = Field::new("x");
        let as_int: Field<i32> = Field::new("x");

        state.set_value(&as_text, s("12"));
        let err = state.try_value(&as_int).unwrap_err();
        assert!(matches!(err, FormError::TypeMismatch { ref field, .. } if field == "x"));
        assert!(state.try_set_value(&as_int, 12).is_err());
        assert!(state.initialize(&as_int, 0).is_err());
        assert_eq!(state.value(&as_text), "12");
    }

    #[test]
    fn test_initialize_writes_once() {
        let state = FormState::new();
        assert_eq!(state.initialize(&AGE, 30), Ok(true));
        assert_eq!(state.initialize(&AGE, 99), Ok(false));
        assert_eq!(state.value(&AGE), 30);
    }

    #[test]
    fn test_is_valid_escape_hatches() {
        let state = FormState::new();
        state.initialize(&NAME, s("")).unwrap();
        state.set_error(&NAME, Some(s("is required")));

        // errors hidden
        assert!(state.is_valid());

        // shown, but nothing dirty
        state.set_show_errors(true);
        assert!(state.is_valid());

        // shown and dirty
        state.mark_dirty(&NAME);
        assert!(!state.is_valid());

        // hidden again
        state.set_show_errors(false);
        assert!(state.is_valid());

        state.set_show_errors(true);
        state.set_error(&NAME, None);
        assert!(state.is_valid());
    }

    #[test]
    fn test_dirty_tracking() {
        let state = FormState::new();
        assert!(!state.is_dirty());
        assert!(state.mark_dirty(&NAME));
        assert!(!state.mark_dirty(&NAME));
        assert!(state.is_dirty());
        assert!(state.is_field_dirty(&NAME));
        assert!(!state.is_field_dirty(&AGE));
    }

    #[test]
    fn test_reset_keeps_identity_and_clears() {
        let state = FormState::new();
        let handle = state.clone();
        state.set_value(&NAME, s("Ada"));
        state.mark_dirty(&NAME);
        state.set_error(&NAME, Some(s("taken")));
        state.set_show_errors(true);
        let generation = state.generation();

        handle.reset();

        assert!(state.ptr_eq(&handle));
        assert!(!state.contains(&NAME));
        assert!(!state.is_dirty());
        assert!(!state.show_errors());
        assert_eq!(state.error(&NAME), None);
        assert_eq!(state.generation(), generation + 1);
    }

    #[test]
    fn test_revision_only_moves_on_change() {
        let state = FormState::new();
        state.set_value(&NAME, s("a"));
        let r = state.revision();
        state.set_value(&NAME, s("a"));
        state.set_show_errors(false);
        state.set_error(&NAME, None);
        assert_eq!(state.revision(), r);
        state.set_value(&NAME, s("b"));
        assert!(state.revision() > r);
    }

    #[test]
    fn test_snapshot_is_consistent() {
        let state = FormState::new();
        state.initialize(&NAME, s("")).unwrap();
        state.initialize(&AGE, 0).unwrap();
        state.mark_dirty(&AGE);
        state.set_error(&AGE, Some(s("too young")));

        let snap = state.snapshot();
        assert_eq!(snap.fields.len(), 2);
        assert!(snap.dirty_fields.contains("age"));
        assert_eq!(snap.errors.get("age").map(String::as_str), Some("too young"));
        assert!(snap.is_dirty);
        assert!(snap.is_valid);
        assert!(!snap.show_errors);
    }

    #[test]
    fn test_effect_initializes_marks_dirty_and_validates() {
        let state = FormState::new();
        let rules: Validators<String> = validators![Required::new()];
        let mut effect = ValidationEffect::new(NAME);
        assert_eq!(effect.field(), &NAME);

        assert!(effect.run(&state, &s(""), &rules));
        assert_eq!(state.value(&NAME), "");
        assert!(!state.is_field_dirty(&NAME));
        assert_eq!(state.error(&NAME).as_deref(), Some("is required"));

        state.set_value(&NAME, s("Ada"));
        assert!(effect.run(&state, &s(""), &rules));
        assert!(state.is_field_dirty(&NAME));
        assert_eq!(state.error(&NAME), None);

        // back to the default: stays dirty
        state.set_value(&NAME, s(""));
        effect.run(&state, &s(""), &rules);
        assert!(state.is_field_dirty(&NAME));
        assert_eq!(state.error(&NAME).as_deref(), Some("is required"));
    }

    #[test]
    fn test_effect_skips_when_inputs_unchanged() {
        let calls = Rc::new(Cell::new(0));
        let counting = |calls: &Rc<Cell<u32>>| -> Validators<String> {
            let calls = calls.clone();
            Validators::builder()
                .with(validator_fn("never", move |_: &String| {
                    calls.set(calls.get() + 1);
                    true
                }))
                .build()
        };
        let state = FormState::new();
        let rules = counting(&calls);
        let mut effect = ValidationEffect::new(NAME);

        assert!(effect.run(&state, &s(""), &rules));
        assert!(!effect.run(&state, &s(""), &rules));
        assert_eq!(calls.get(), 1);

        // a new list is a new input
        let fresh = counting(&calls);
        assert!(effect.run(&state, &s(""), &fresh));
        assert_eq!(calls.get(), 2);

        effect.invalidate();
        assert!(effect.run(&state, &s(""), &fresh));
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_effect_reruns_after_reset() {
        let state = FormState::new();
        let rules: Validators<String> = validators![MaxLength::new(3)];
        let mut effect = ValidationEffect::new(NAME);

        effect.run(&state, &s(""), &rules);
        state.set_value(&NAME, s("toolong"));
        effect.run(&state, &s(""), &rules);
        assert!(state.error(&NAME).is_some());

        state.reset();
        assert!(effect.run(&state, &s(""), &rules));
        assert_eq!(state.value(&NAME), "");
        assert!(!state.is_field_dirty(&NAME));
        assert_eq!(state.error(&NAME), None);
    }

    #[test]
    fn test_effect_type_conflict_is_reported() {
        let state = FormState::new();
        state.set_value(&Field::<String>::new("age"), s("x"));
        let mut effect = ValidationEffect::new(AGE);
        let err = effect.try_run(&state, &0, &Validators::new()).unwrap_err();
        assert!(matches!(err, FormError::TypeMismatch { .. }));
    }

    #[test]
    fn test_scope_error_visibility() {
        let state = FormState::new();
        let scope = FormScope::new(state.clone(), || {});
        state.initialize(&NAME, s("")).unwrap();
        state.set_error(&NAME, Some(s("is required")));

        assert_eq!(scope.error(&NAME), None);
        assert!(scope.is_valid(&NAME));

        state.set_show_errors(true);
        // shown, not dirty: still hidden from display, but the field is invalid
        assert_eq!(scope.error(&NAME), None);
        assert!(!scope.is_valid(&NAME));

        scope.mark_dirty(&NAME);
        assert_eq!(scope.error(&NAME).as_deref(), Some("is required"));
    }

    #[test]
    fn test_scope_manual_errors() {
        let scope = FormScope::new(FormState::new(), || {});
        scope.state().initialize(&NAME, s("ada")).unwrap();
        scope.mark_dirty(&NAME);
        scope.state().set_show_errors(true);

        scope.set_error(&NAME, "already taken");
        assert_eq!(scope.error(&NAME).as_deref(), Some("already taken"));
        assert!(!scope.is_form_valid());

        scope.clear_error(&NAME);
        assert_eq!(scope.error(&NAME), None);
        assert!(scope.is_form_valid());
    }

    #[test]
    fn test_submit_valid_and_invalid() {
        let submitted = Rc::new(Cell::new(0));
        let rejected = Cell::new(0);
        let state = FormState::new();
        let scope = FormScope::new(state.clone(), {
            let submitted = submitted.clone();
            move || submitted.set(submitted.get() + 1)
        });

        state.initialize(&NAME, s("")).unwrap();
        state.initialize(&AGE, 0).unwrap();
        state.set_error(&NAME, Some(s("is required")));

        assert!(!scope.submit_or(|| rejected.set(rejected.get() + 1)));
        assert_eq!((submitted.get(), rejected.get()), (0, 1));
        assert!(state.show_errors());
        assert!(state.is_field_dirty(&NAME));
        assert!(state.is_field_dirty(&AGE));

        state.set_error(&NAME, None);
        assert!(scope.submit_or(|| rejected.set(rejected.get() + 1)));
        assert_eq!((submitted.get(), rejected.get()), (1, 1));
    }

    #[test]
    fn test_submit_without_invalid_callback() {
        let scope = FormScope::new(FormState::new(), || {});
        scope.state().initialize(&TAGS, Vec::new()).unwrap();
        scope.state().set_error(&TAGS, Some(s("select at least one option")));
        assert!(!scope.submit());
        assert!(!scope.is_form_valid());

        scope.reset();
        assert!(scope.is_form_valid());
        assert!(!scope.is_form_dirty());
    }

    #[test]
    fn test_form_field_memoizes_per_composition() {
        let calls = Rc::new(Cell::new(0));
        let rules: Validators<String> = {
            let calls = calls.clone();
            Validators::builder()
                .with(validator_fn("counted", move |_: &String| {
                    calls.set(calls.get() + 1);
                    true
                }))
                .build()
        };
        let state = FormState::new();
        let scope = FormScope::new(state.clone(), || {});
        let mut composition = Composition::new();

        for _ in 0..3 {
            composition.compose(|| form_field(&scope, &NAME, s(""), &rules));
        }
        assert_eq!(calls.get(), 1);

        scope.set_value(&NAME, s("x"));
        let value = composition.compose(|| form_field(&scope, &NAME, s(""), &rules));
        assert_eq!(value, "x");
        assert_eq!(calls.get(), 2);
    }

    #[test]
    #[should_panic(expected = "accessed as")]
    fn test_form_field_type_conflict_panics() {
        let mut form = Form::new(FormState::new());
        form.compose(|| {}, |scope| {
            form_field(scope, &Field::<String>::new("x"), s(""), &Validators::new());
            form_field(scope, &Field::<i32>::new("x"), 0, &Validators::new());
        });
    }

    #[test]
    fn test_form_uses_latest_submit_callback() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut form = Form::new(FormState::new());

        let kept = form.compose(
            {
                let log = log.clone();
                move || log.borrow_mut().push("first")
            },
            |scope| scope.clone(),
        );
        form.compose(
            {
                let log = log.clone();
                move || log.borrow_mut().push("second")
            },
            |_| {},
        );

        // a scope captured in the first pass runs the second pass's callback
        assert!(kept.submit());
        assert_eq!(*log.borrow(), vec!["second"]);
        assert_eq!(form.passes(), 2);
    }

    #[test]
    fn test_current_form_scope_inside_body_only() {
        let state = FormState::new();
        let mut form = Form::new(state.clone());
        assert!(current_form_scope().is_none());
        let found = form.compose(|| {}, |_| current_form_scope());
        assert!(found.is_some_and(|scope| scope.state().ptr_eq(&state)));
        assert!(current_form_scope().is_none());
    }

    #[test]
    fn test_two_forms_share_one_composition() {
        let left = FormState::new();
        let right = FormState::new();
        let rules: Validators<String> = validators![Required::new()];
        let mut composition = Composition::new();

        for name in ["", "Ada"] {
            composition.compose(|| {
                form(&left, || {}, |scope| {
                    form_field(scope, &NAME, s(""), &rules);
                    scope.set_value(&NAME, s(name));
                });
                form(&right, || {}, |scope| {
                    form_field(scope, &NAME, s("Bob"), &rules);
                });
            });
        }
        composition.compose(|| {
            form(&left, || {}, |scope| form_field(scope, &NAME, s(""), &rules));
        });

        assert!(left.is_field_dirty(&NAME));
        assert_eq!(left.error(&NAME), None);
        assert_eq!(right.value(&NAME), "Bob");
        assert!(!right.is_field_dirty(&NAME));
    }

    #[test]
    fn test_boxed_validator_list() {
        let boxed: Vec<Box<dyn Validator<String>>> =
            vec![Box::new(Required::new()), Box::new(MaxLength::new(3))];
        let rules = Validators::from_boxed(boxed);
        assert_eq!(rules.len(), 2);
        assert_eq!(rules.first_error(&s("")).as_deref(), Some("is required"));
        assert_eq!(
            rules.first_error(&s("four")).as_deref(),
            Some("must be at most 3 characters")
        );
        assert_eq!(rules.first_error(&s("abc")), None);
    }

    struct DropCount(Rc<Cell<u32>>);

    impl Drop for DropCount {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn test_replaced_forms_are_released() {
        const TOKEN: Field<Arc<()>> = Field::new("token");
        let rules: Validators<String> = validators![Required::new()];
        let callbacks_dropped = Rc::new(Cell::new(0));
        let mut stores: Vec<Weak<()>> = Vec::new();
        let mut composition = Composition::new();

        for _ in 0..100 {
            let state = FormState::new();
            let token = Arc::new(());
            stores.push(Arc::downgrade(&token));
            state.set_value(&TOKEN, token);

            let counted = DropCount(callbacks_dropped.clone());
            composition.compose(|| {
                form(
                    &state,
                    move || {
                        let _ = &counted;
                    },
                    |scope| form_field(scope, &NAME, s(""), &rules),
                )
            });
        }

        // every store is gone; only the newest callback is still remembered
        assert!(stores.iter().all(|store| store.upgrade().is_none()));
        assert_eq!(callbacks_dropped.get(), 99);

        composition.clear();
        assert_eq!(callbacks_dropped.get(), 100);
    }

    #[test]
    fn test_forms_sharing_a_state_keep_their_own_callbacks() {
        let bits = Rc::new(Cell::new(0u8));
        let state = FormState::new();
        let mut composition = Composition::new();
        let set_bit = |bit: u8| {
            let bits = bits.clone();
            move || bits.set(bits.get() | bit)
        };

        let (first, second) = composition.compose(|| {
            let first = form(&state, set_bit(1), |scope| scope.clone());
            let second = form(&state, set_bit(2), |scope| scope.clone());
            (first, second)
        });

        assert!(first.submit());
        assert_eq!(bits.get(), 1);
        assert!(second.submit());
        assert_eq!(bits.get(), 3);
    }

    #[test]
    fn test_forms_sharing_a_state_keep_their_own_bindings() {
        let runs = Rc::new(Cell::new(0));
        let rules: Validators<String> = {
            let runs = runs.clone();
            Validators::builder()
                .with(validator_fn("counted", move |_: &String| {
                    runs.set(runs.get() + 1);
                    true
                }))
                .build()
        };
        let state = FormState::new();
        let mut composition = Composition::new();

        for _ in 0..3 {
            composition.compose(|| {
                form(&state, || {}, |scope| form_field(scope, &NAME, s(""), &rules));
                form(&state, || {}, |scope| form_field(scope, &NAME, s(""), &rules));
            });
        }
        // one run per form, none on later passes
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn test_form_scope_comes_from_the_last_pass() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut form = Form::new(FormState::new());
        assert!(form.scope().is_none());

        for name in ["first", "second"] {
            let log = log.clone();
            form.compose(move || log.borrow_mut().push(name), |_| {});
        }

        let scope = form.scope().expect("composed twice");
        assert!(scope.state().ptr_eq(form.state()));
        assert!(scope.submit());
        assert_eq!(*log.borrow(), vec!["second"]);
    }
}
