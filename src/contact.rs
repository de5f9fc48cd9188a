use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlFormElement};

use crate::config::DomContract;
use crate::dom;
use crate::events::ListenerHandle;

const SUBMIT_DELAY_MS: u32 = 1_800;
const BANNER_HIDE_MS: u32 = 5_000;
const PENDING_LABEL: &str = "<i class=\"fa-solid fa-spinner fa-spin\"></i> Sending\u{2026}";

/// Validation rule for one form field, applied to the trimmed value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldRule {
    MinChars(usize),
    Email,
}

impl FieldRule {
    pub fn validate(self, raw: &str) -> bool {
        let value = raw.trim();
        match self {
            FieldRule::MinChars(min) => value.chars().count() >= min,
            FieldRule::Email => email_shape(value),
        }
    }
}

/// Permissive single-@ address shape: no whitespace, exactly one @, both
/// sides non-empty, and an interior dot in the domain. Not RFC validation.
pub fn email_shape(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(index, ch)| ch == '.' && index > 0 && index + 1 < domain.len())
}

/// Binding of one field to its input and error indicator.
#[derive(Clone, Copy, Debug)]
pub struct FieldSpec {
    pub input_id: &'static str,
    pub error_id: &'static str,
    pub rule: FieldRule,
}

struct Field {
    input: HtmlElement,
    error: Element,
    rule: FieldRule,
}

/// Per-field validation plus the simulated submit lifecycle. Both deferred
/// steps are cancellable timers owned here; a new submit replaces (and so
/// cancels) a still-pending pair.
pub struct ContactForm {
    _inner: Rc<Inner>,
    _listeners: Vec<ListenerHandle>,
}

struct Inner {
    form: HtmlFormElement,
    fields: Vec<Field>,
    submit: HtmlButtonElement,
    idle_label: String,
    banner: Element,
    invalid_class: &'static str,
    visible_class: &'static str,
    submit_timer: RefCell<Option<Timeout>>,
    banner_timer: RefCell<Option<Timeout>>,
}

impl ContactForm {
    pub fn attach(document: &Document, contract: &DomContract) -> Option<Self> {
        let form = dom::element_by_id(document, contract.form_id)?
            .dyn_into::<HtmlFormElement>()
            .ok()?;
        let submit = form
            .query_selector("button[type=\"submit\"]")
            .ok()
            .flatten()?
            .dyn_into::<HtmlButtonElement>()
            .ok()?;
        let banner = dom::element_by_id(document, contract.success_banner_id)?;

        let mut fields = Vec::with_capacity(contract.contact_fields.len());
        for spec in contract.contact_fields {
            fields.push(Field {
                input: dom::html_by_id(document, spec.input_id)?,
                error: dom::element_by_id(document, spec.error_id)?,
                rule: spec.rule,
            });
        }

        let idle_label = submit.inner_html();
        let inner = Rc::new(Inner {
            form,
            fields,
            submit,
            idle_label,
            banner,
            invalid_class: contract.invalid_class,
            visible_class: contract.visible_class,
            submit_timer: RefCell::new(None),
            banner_timer: RefCell::new(None),
        });

        let mut listeners = Vec::new();
        for index in 0..inner.fields.len() {
            let input = inner.fields[index].input.clone();

            let on_blur = Rc::clone(&inner);
            listeners.push(ListenerHandle::new(&input, "blur", move |_event| {
                validate_field(&on_blur, index);
            }));

            // Re-validate on input only while flagged, so a field stays quiet
            // until its first blur.
            let on_input = Rc::clone(&inner);
            listeners.push(ListenerHandle::new(&input, "input", move |_event| {
                let flagged = on_input.fields[index]
                    .input
                    .class_list()
                    .contains(on_input.invalid_class);
                if flagged {
                    validate_field(&on_input, index);
                }
            }));
        }

        let on_submit = Rc::clone(&inner);
        listeners.push(ListenerHandle::new(&inner.form, "submit", move |event| {
            event.prevent_default();
            handle_submit(&on_submit);
        }));

        Some(Self {
            _inner: inner,
            _listeners: listeners,
        })
    }
}

fn validate_field(inner: &Inner, index: usize) -> bool {
    let field = &inner.fields[index];
    let valid = field.rule.validate(&dom::field_value(&field.input));
    let input_classes = field.input.class_list();
    let error_classes = field.error.class_list();
    if valid {
        let _ = input_classes.remove_1(inner.invalid_class);
        let _ = error_classes.remove_1(inner.visible_class);
    } else {
        let _ = input_classes.add_1(inner.invalid_class);
        let _ = error_classes.add_1(inner.visible_class);
    }
    valid
}

fn handle_submit(inner: &Rc<Inner>) {
    // Every field is validated even after the first failure so all errors
    // show at once.
    let mut all_valid = true;
    for index in 0..inner.fields.len() {
        all_valid &= validate_field(inner, index);
    }
    if !all_valid {
        tracing::debug!("contact: submit rejected");
        return;
    }
    tracing::debug!("contact: submit accepted");

    inner.submit.set_disabled(true);
    inner.submit.set_inner_html(PENDING_LABEL);

    let weak = Rc::downgrade(inner);
    inner
        .submit_timer
        .replace(Some(Timeout::new(SUBMIT_DELAY_MS, move || {
            finish_submit(&weak);
        })));
}

// Simulation boundary: a real deployment would issue the request where the
// delay sits, keeping the disable -> pending -> reset/banner sequence.
fn finish_submit(weak: &Weak<Inner>) {
    let Some(inner) = weak.upgrade() else {
        return;
    };
    inner.form.reset();
    inner.submit.set_disabled(false);
    inner.submit.set_inner_html(&inner.idle_label);
    let _ = inner.banner.class_list().add_1(inner.visible_class);

    let weak = Rc::downgrade(&inner);
    inner
        .banner_timer
        .replace(Some(Timeout::new(BANNER_HIDE_MS, move || {
            if let Some(inner) = weak.upgrade() {
                let _ = inner.banner.class_list().remove_1(inner.visible_class);
            }
        })));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_needs_two_chars_after_trimming() {
        let rule = FieldRule::MinChars(2);
        assert!(!rule.validate(" A "));
        assert!(!rule.validate(""));
        assert!(rule.validate("Jo"));
        assert!(rule.validate("  Jo  "));
    }

    #[test]
    fn subject_and_message_minimums() {
        assert!(!FieldRule::MinChars(3).validate("Hi"));
        assert!(FieldRule::MinChars(3).validate("Hi there"));
        assert!(!FieldRule::MinChars(10).validate("short"));
        assert!(FieldRule::MinChars(10).validate("This message is long enough."));
    }

    #[test]
    fn email_shape_accepts_single_at_with_dotted_domain() {
        assert!(email_shape("a@b.co"));
        assert!(email_shape("first.last@sub.domain.org"));
        assert!(FieldRule::Email.validate("  a@b.co  "));
    }

    #[test]
    fn email_shape_rejects_malformed_addresses() {
        assert!(!email_shape("bad"));
        assert!(!email_shape("a@b"));
        assert!(!email_shape("a @b.co"));
        assert!(!email_shape("a@b."));
        assert!(!email_shape("a@.b"));
        assert!(!email_shape("@b.co"));
        assert!(!email_shape("a@"));
        assert!(!email_shape("a@@b.co"));
        assert!(!email_shape("a@b@c.co"));
    }

    #[test]
    fn revalidating_a_valid_value_is_idempotent() {
        let rule = FieldRule::MinChars(2);
        assert_eq!(rule.validate("Jo"), rule.validate("Jo"));
    }
}
