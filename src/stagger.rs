use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit};

use crate::dom;

const PROGRESS_ATTRIBUTE: &str = "data-progress";
const DEFAULT_PROGRESS_PERCENT: f64 = 65.0;

/// One observed container whose children reveal in sequence.
#[derive(Clone, Copy, Debug)]
pub struct StaggerGroup {
    pub container: &'static str,
    pub item: &'static str,
    pub step_ms: u32,
    pub threshold: f64,
    pub variant: Variant,
}

#[derive(Clone, Copy, Debug)]
pub enum Variant {
    /// Opacity/translate reveal; items start offset below their final spot.
    Fade { offset_px: u32, duration_s: f64 },
    /// Width animation toward the per-item target percentage.
    Progress { base_delay_ms: u32 },
}

impl Variant {
    fn base_delay_ms(self) -> u32 {
        match self {
            Variant::Fade { .. } => 0,
            Variant::Progress { base_delay_ms } => base_delay_ms,
        }
    }
}

pub fn delay_for(index: usize, base_ms: u32, step_ms: u32) -> u32 {
    base_ms + index as u32 * step_ms
}

/// Target width for a progress bar. Absent or unparsable attributes fall back
/// to the default percentage.
pub fn target_percent(attr: Option<&str>) -> f64 {
    attr.and_then(|raw| raw.trim().parse::<f64>().ok())
        .unwrap_or(DEFAULT_PROGRESS_PERCENT)
}

/// Reveals each configured group with incremental per-item delay once the
/// containing element first intersects the viewport. Observation is
/// fire-once; pending reveals are cancellable timers owned by the controller.
pub struct StaggerReveal {
    _groups: Vec<GroupHandle>,
    _timers: Rc<RefCell<Vec<Timeout>>>,
}

struct GroupHandle {
    observer: IntersectionObserver,
    _closure: Rc<Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>>,
}

impl Drop for GroupHandle {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

impl StaggerReveal {
    pub fn attach(document: &Document, groups: &[StaggerGroup]) -> Option<Self> {
        let timers = Rc::new(RefCell::new(Vec::new()));
        let mut handles = Vec::new();
        for group in groups {
            for container in dom::query_all(document, group.container) {
                let items = dom::query_all_in(&container, group.item);
                if let Some(handle) = observe_group(&container, items, *group, &timers) {
                    handles.push(handle);
                }
            }
        }
        if handles.is_empty() {
            return None;
        }
        tracing::debug!("stagger: observing {} groups", handles.len());
        Some(Self {
            _groups: handles,
            _timers: timers,
        })
    }
}

fn observe_group(
    container: &HtmlElement,
    items: Vec<HtmlElement>,
    group: StaggerGroup,
    timers: &Rc<RefCell<Vec<Timeout>>>,
) -> Option<GroupHandle> {
    if let Variant::Fade {
        offset_px,
        duration_s,
    } = group.variant
    {
        for item in &items {
            prime_fade(item, offset_px, duration_s);
        }
    }

    let timers = Rc::clone(timers);
    let closure = Rc::new(Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if !entry.is_intersecting() {
                    continue;
                }
                let base = group.variant.base_delay_ms();
                for (index, item) in items.iter().enumerate() {
                    let delay = delay_for(index, base, group.step_ms);
                    timers
                        .borrow_mut()
                        .push(schedule_reveal(item, group.variant, delay));
                }
                observer.unobserve(&entry.target());
                return;
            }
        },
    )
        as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>));

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(group.threshold));
    let observer =
        IntersectionObserver::new_with_options(closure.as_ref().as_ref().unchecked_ref(), &init)
            .ok()?;
    observer.observe(container);

    Some(GroupHandle {
        observer,
        _closure: closure,
    })
}

fn prime_fade(item: &HtmlElement, offset_px: u32, duration_s: f64) {
    let style = item.style();
    let _ = style.set_property("opacity", "0");
    let _ = style.set_property("transform", &format!("translateY({offset_px}px)"));
    let _ = style.set_property(
        "transition",
        &format!("opacity {duration_s}s ease, transform {duration_s}s ease"),
    );
}

fn schedule_reveal(item: &HtmlElement, variant: Variant, delay_ms: u32) -> Timeout {
    let item = item.clone();
    match variant {
        Variant::Fade { .. } => Timeout::new(delay_ms, move || {
            let style = item.style();
            let _ = style.set_property("opacity", "1");
            let _ = style.set_property("transform", "translateY(0)");
        }),
        Variant::Progress { .. } => {
            let percent = target_percent(item.get_attribute(PROGRESS_ATTRIBUTE).as_deref());
            Timeout::new(delay_ms, move || {
                let _ = item.style().set_property("width", &format!("{percent}%"));
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn delays_grow_with_index() {
        assert_eq!(delay_for(0, 0, 70), 0);
        assert_eq!(delay_for(3, 0, 70), 210);
        assert_eq!(delay_for(2, 180, 80), 340);
    }

    #[test]
    fn delays_are_strictly_increasing_across_a_group() {
        let delays: Vec<u32> = (0..6).map(|index| delay_for(index, 180, 80)).collect();
        for pair in delays.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn empty_group_schedules_nothing() {
        let delays: Vec<u32> = (0..0).map(|index| delay_for(index, 0, 80)).collect();
        assert_eq!(delays, Vec::<u32>::new());
    }

    #[test]
    fn progress_percent_reads_attribute() {
        assert_eq!(target_percent(Some("72")), 72.0);
        assert_eq!(target_percent(Some(" 40 ")), 40.0);
    }

    #[test]
    fn progress_percent_falls_back_when_absent_or_malformed() {
        assert_eq!(target_percent(None), 65.0);
        assert_eq!(target_percent(Some("n/a")), 65.0);
        assert_eq!(target_percent(Some("")), 65.0);
    }
}
