use web_sys::{Document, ScrollBehavior, ScrollToOptions};

use crate::config::DomContract;
use crate::dom;
use crate::events::ListenerHandle;

const NAV_HEIGHT_FALLBACK_PX: f64 = 70.0;

/// Intercepts in-page anchor clicks and scrolls to the target with the fixed
/// navbar height compensated. Bare or dangling anchors keep their default
/// behavior.
pub struct SmoothScroll {
    _listeners: Vec<ListenerHandle>,
}

impl SmoothScroll {
    pub fn attach(document: &Document, contract: &DomContract) -> Option<Self> {
        let anchors = dom::query_all(document, contract.anchor_selector);
        if anchors.is_empty() {
            return None;
        }

        let navbar_id = contract.navbar_id;
        let mut listeners = Vec::with_capacity(anchors.len());
        for anchor in anchors {
            let document = document.clone();
            let source = anchor.clone();
            let closure = move |event: web_sys::Event| {
                let Some(href) = source.get_attribute("href") else {
                    return;
                };
                if href.is_empty() || href == "#" {
                    return;
                }
                let Ok(Some(target)) = document.query_selector(&href) else {
                    return;
                };
                event.prevent_default();
                let Some(window) = dom::window() else {
                    return;
                };
                let nav_height = dom::html_by_id(&document, navbar_id)
                    .map(|navbar| f64::from(navbar.offset_height()))
                    .unwrap_or(NAV_HEIGHT_FALLBACK_PX);
                let top =
                    target.get_bounding_client_rect().top() + dom::scroll_y(&window) - nav_height;

                let options = ScrollToOptions::new();
                options.set_top(top);
                options.set_behavior(ScrollBehavior::Smooth);
                window.scroll_to_with_scroll_to_options(&options);
            };
            listeners.push(ListenerHandle::new(&anchor, "click", closure));
        }

        Some(Self {
            _listeners: listeners,
        })
    }
}
