//! A sign-up screen without a window: a scripted list of input events drives
//! the form through composition passes. Run with `RUST_LOG=debug` to watch
//! validation, or `RUST_LOG=trace` for every binding run.

use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;

use reform_core::prelude::*;
use reform_form::prelude::*;

const NAME: Field<String> = text_field("name");
const EMAIL: Field<String> = text_field("email");
const PASSWORD: Field<String> = text_field("password");
const CONFIRM: Field<String> = text_field("confirm");
const AGE: Field<String> = text_field("age");
const PLAN: Field<String> = text_field("plan");
const INTERESTS: Field<Vec<String>> = list_field("interests");
const TERMS: Field<bool> = bool_field("terms");

const PLANS: [&str; 3] = ["free", "team", "enterprise"];

struct Rules {
    name: Validators<String>,
    email: Validators<String>,
    password: Validators<String>,
    confirm: Validators<String>,
    age: Validators<String>,
    plan: Validators<String>,
    interests: Validators<Vec<String>>,
    terms: Validators<bool>,
}

impl Rules {
    fn new(state: &FormState) -> Result<Self, ValidatorError> {
        let live = state.clone();
        Ok(Self {
            name: validators![Required::new(), MinLength::new(2), MaxLength::new(40)],
            email: validators![Required::new(), Email::new()],
            password: validators![
                Required::new(),
                MinLength::new(8),
                Contains::new(r"\d")?.with_message("must contain a digit"),
            ],
            confirm: validators![
                Required::new(),
                EqualTo::lazy(move || live.try_value(&PASSWORD).unwrap_or_default())
                    .with_message("passwords do not match"),
            ],
            age: validators![
                ValueRange::<u8>::new(13, 120)?.with_message("enter an age from 13 to 120")
            ],
            plan: validators![validator_fn("pick a plan", |plan: &String| {
                PLANS.contains(&plan.as_str())
            })],
            interests: validators![
                SelectionRange::new(1, 3)?.with_message("pick one to three topics")
            ],
            terms: validators![Checked::new().with_message("accept the terms to continue")],
        })
    }
}

#[derive(Debug)]
enum Event {
    Type(Field<String>, &'static str),
    Leave(Field<String>),
    Choose(&'static str),
    Toggle(&'static str),
    Check(bool),
    Submit,
    Reset,
}

fn script() -> Vec<Event> {
    vec![
        Event::Type(NAME, "Ada"),
        Event::Leave(EMAIL),
        Event::Type(EMAIL, "ada@"),
        Event::Submit,
        Event::Type(EMAIL, "ada@analytical.engine"),
        Event::Type(PASSWORD, "difference"),
        Event::Type(PASSWORD, "difference1"),
        Event::Type(CONFIRM, "difference"),
        Event::Type(CONFIRM, "difference1"),
        Event::Type(AGE, "thirty-six"),
        Event::Type(AGE, "36"),
        Event::Choose("team"),
        Event::Toggle("math"),
        Event::Toggle("poetry"),
        Event::Toggle("math"),
        Event::Toggle("engines"),
        Event::Check(true),
        Event::Submit,
        Event::Reset,
    ]
}

#[derive(Debug, Clone)]
struct Account {
    name: String,
    email: String,
    plan: String,
    interests: Vec<String>,
}

impl Account {
    fn read(state: &FormState) -> FormResult<Self> {
        Ok(Self {
            name: state.try_value(&NAME)?,
            email: state.try_value(&EMAIL)?,
            plan: state.try_value(&PLAN)?,
            interests: state.try_value(&INTERESTS)?,
        })
    }
}

type Outbox = Rc<RefCell<Vec<FormResult<Account>>>>;

fn on_submit(state: &FormState, outbox: &Outbox) -> impl Fn() + 'static {
    let state = state.clone();
    let outbox = outbox.clone();
    move || outbox.borrow_mut().push(Account::read(&state))
}

fn row(label: &str, shown: impl Display, error: Option<String>) {
    match error {
        Some(error) => log::debug!("  {label:<10} {shown:<24} ! {error}"),
        None => log::debug!("  {label:<10} {shown}"),
    }
}

fn sign_up(scope: &FormScope, rules: &Rules, event: Option<&Event>) {
    let name = form_field(scope, &NAME, String::new(), &rules.name);
    let email = form_field(scope, &EMAIL, String::new(), &rules.email);
    let password = form_field(scope, &PASSWORD, String::new(), &rules.password);
    form_field(scope, &CONFIRM, String::new(), &rules.confirm);
    let age = form_field(scope, &AGE, String::new(), &rules.age);
    let plan = form_field(scope, &PLAN, String::new(), &rules.plan);
    let interests = form_field(scope, &INTERESTS, Vec::new(), &rules.interests);
    let terms = form_field(scope, &TERMS, false, &rules.terms);

    let valid = scope.is_form_valid();
    launched_effect!(valid, move || {
        log::info!("form is {}", if valid { "valid" } else { "invalid" });
    });

    row("name", &name, scope.error(&NAME));
    row("email", &email, scope.error(&EMAIL));
    row("password", "*".repeat(password.len()), scope.error(&PASSWORD));
    row("confirm", "", scope.error(&CONFIRM));
    row("age", &age, scope.error(&AGE));
    row("plan", &plan, scope.error(&PLAN));
    row("interests", interests.join(", "), scope.error(&INTERESTS));
    row("terms", if terms { "[x]" } else { "[ ]" }, scope.error(&TERMS));

    if let Some(event) = event {
        apply(scope, event);
    }
}

fn apply(scope: &FormScope, event: &Event) {
    log::info!("> {event:?}");
    match event {
        Event::Type(field, text) => scope.set_value(field, text.to_string()),
        Event::Leave(field) => scope.mark_dirty(field),
        Event::Choose(plan) => scope.set_value(&PLAN, plan.to_string()),
        Event::Toggle(topic) => {
            let mut picked = scope.value(&INTERESTS);
            match picked.iter().position(|t| t == topic) {
                Some(at) => {
                    picked.remove(at);
                }
                None => picked.push(topic.to_string()),
            }
            scope.set_value(&INTERESTS, picked);
        }
        Event::Check(on) => scope.set_value(&TERMS, *on),
        Event::Submit => {
            scope.submit_or(|| log::warn!("sign-up blocked; fix the fields marked with !"));
        }
        Event::Reset => scope.reset(),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let state = FormState::new();
    let rules = Rules::new(&state)?;
    let outbox = Outbox::default();
    let mut form = Form::new(state.clone());

    form.compose(on_submit(&state, &outbox), |scope| sign_up(scope, &rules, None));
    for event in script() {
        form.compose(on_submit(&state, &outbox), |scope| {
            sign_up(scope, &rules, Some(&event))
        });
        // let the bindings see the edit
        form.compose(on_submit(&state, &outbox), |scope| sign_up(scope, &rules, None));
    }

    let submitted = outbox.borrow_mut().drain(..).collect::<Result<Vec<_>, _>>()?;
    let account = submitted
        .last()
        .ok_or_else(|| anyhow::anyhow!("no submission went through"))?;
    println!(
        "created {} <{}> on the {} plan, interested in {}",
        account.name,
        account.email,
        account.plan,
        account.interests.join(" and ")
    );
    println!(
        "{} passes, {} submission(s), form dirty after reset: {}",
        form.passes(),
        submitted.len(),
        state.is_dirty()
    );
    Ok(())
}
