use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Event, EventTarget};

/// A DOM event listener that detaches itself when dropped.
pub struct ListenerHandle {
    target: EventTarget,
    event: &'static str,
    closure: Rc<Closure<dyn FnMut(Event)>>,
}

impl ListenerHandle {
    pub fn new(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Self {
        let closure = Rc::new(Closure::wrap(Box::new(handler) as Box<dyn FnMut(_)>));
        let _ = target
            .add_event_listener_with_callback(event, closure.as_ref().as_ref().unchecked_ref());
        Self {
            target: target.clone(),
            event,
            closure,
        }
    }

    /// Passive registration, for high-frequency events like scroll where the
    /// handler never calls prevent_default.
    pub fn new_passive(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Self {
        let closure = Rc::new(Closure::wrap(Box::new(handler) as Box<dyn FnMut(_)>));
        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        let _ = target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            closure.as_ref().as_ref().unchecked_ref(),
            &options,
        );
        Self {
            target: target.clone(),
            event,
            closure,
        }
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback(
            self.event,
            self.closure.as_ref().as_ref().unchecked_ref(),
        );
    }
}
