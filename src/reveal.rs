use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::config::DomContract;
use crate::dom;
use crate::events::ListenerHandle;

const REVEAL_THRESHOLD: f64 = 0.12;
// Negative bottom margin so elements reveal slightly before they fully enter.
const REVEAL_ROOT_MARGIN: &str = "0px 0px -40px 0px";
const ENTRANCE_DELAY_MS: u32 = 120;

/// Fade/slide-in of tagged elements on viewport entry. Each target reveals at
/// most once: the observer drops it as soon as it has intersected.
pub struct ViewportReveal {
    observer: IntersectionObserver,
    _closure: Rc<Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>>,
}

impl ViewportReveal {
    pub fn attach(document: &Document, contract: &DomContract) -> Option<Self> {
        let targets = dom::query_all(document, contract.reveal_selector);
        if targets.is_empty() {
            return None;
        }

        let visible_class = contract.visible_class;
        let closure = Rc::new(Closure::wrap(Box::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    if !entry.is_intersecting() {
                        continue;
                    }
                    let target = entry.target();
                    let _ = target.class_list().add_1(visible_class);
                    observer.unobserve(&target);
                }
            },
        )
            as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>));

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
        init.set_root_margin(REVEAL_ROOT_MARGIN);
        let observer = IntersectionObserver::new_with_options(
            closure.as_ref().as_ref().unchecked_ref(),
            &init,
        )
        .ok()?;

        for target in &targets {
            observer.observe(target);
        }
        tracing::debug!("reveal: observing {} elements", targets.len());

        Some(Self {
            observer,
            _closure: closure,
        })
    }
}

impl Drop for ViewportReveal {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Hero slide-in elements, revealed shortly after the window load event.
pub struct EntranceReveal {
    _timer: Rc<RefCell<Option<Timeout>>>,
    _load: Option<ListenerHandle>,
}

impl EntranceReveal {
    pub fn attach(document: &Document, contract: &DomContract) -> Option<Self> {
        let targets = dom::query_all(document, contract.entrance_selector);
        if targets.is_empty() {
            return None;
        }

        let visible_class = contract.visible_class;
        let timer = Rc::new(RefCell::new(None));
        let timer_slot = Rc::clone(&timer);
        let schedule = move || {
            timer_slot.replace(Some(Timeout::new(ENTRANCE_DELAY_MS, move || {
                for target in &targets {
                    let _ = target.class_list().add_1(visible_class);
                }
            })));
        };

        // Module startup can run after the load event already fired; waiting
        // for it then would never reveal the hero.
        if document.ready_state() == "complete" {
            schedule();
            return Some(Self {
                _timer: timer,
                _load: None,
            });
        }

        let window = dom::window()?;
        let mut schedule = Some(schedule);
        let load = ListenerHandle::new(&window, "load", move |_event| {
            if let Some(schedule) = schedule.take() {
                schedule();
            }
        });
        Some(Self {
            _timer: timer,
            _load: Some(load),
        })
    }
}
