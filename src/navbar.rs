use web_sys::Document;

use crate::config::DomContract;
use crate::dom;
use crate::events::ListenerHandle;

const SHADOW_OFFSET_PX: f64 = 30.0;
const NAV_HEIGHT_PX: f64 = 80.0;
const ACTIVATION_SLACK_PX: f64 = 20.0;

pub fn is_scrolled(scroll_y: f64) -> bool {
    scroll_y > SHADOW_OFFSET_PX
}

/// Index of the active section: the last one whose activation threshold has
/// been reached, or none when the viewport sits above all of them.
pub fn active_index(thresholds: &[f64], scroll_y: f64) -> Option<usize> {
    let mut current = None;
    for (index, threshold) in thresholds.iter().enumerate() {
        if scroll_y >= *threshold {
            current = Some(index);
        }
    }
    current
}

/// Navbar shadow plus active-link highlighting, recomputed from the scroll
/// offset on every scroll event and once at attach.
pub struct NavBar {
    _scroll: ListenerHandle,
}

impl NavBar {
    pub fn attach(document: &Document, contract: &DomContract) -> Option<Self> {
        let navbar = dom::html_by_id(document, contract.navbar_id)?;
        let window = dom::window()?;
        let sections = dom::query_all(document, contract.section_selector);
        let links = dom::query_all(document, contract.nav_link_selector);
        let scrolled_class = contract.scrolled_class;
        let active_class = contract.active_class;

        let update = move || {
            let Some(window) = dom::window() else {
                return;
            };
            let offset = dom::scroll_y(&window);

            let classes = navbar.class_list();
            if is_scrolled(offset) {
                let _ = classes.add_1(scrolled_class);
            } else {
                let _ = classes.remove_1(scrolled_class);
            }

            let thresholds: Vec<f64> = sections
                .iter()
                .map(|section| {
                    f64::from(section.offset_top()) - NAV_HEIGHT_PX - ACTIVATION_SLACK_PX
                })
                .collect();
            let active_id = active_index(&thresholds, offset)
                .and_then(|index| sections[index].get_attribute("id"));

            for link in &links {
                let classes = link.class_list();
                let _ = classes.remove_1(active_class);
                if let (Some(id), Some(href)) = (active_id.as_ref(), link.get_attribute("href")) {
                    if href == format!("#{id}") {
                        let _ = classes.add_1(active_class);
                    }
                }
            }
        };

        update();
        let scroll = ListenerHandle::new_passive(&window, "scroll", move |_event| update());
        Some(Self { _scroll: scroll })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn shadow_appears_past_the_offset() {
        assert!(!is_scrolled(0.0));
        assert!(!is_scrolled(30.0));
        assert!(is_scrolled(30.5));
    }

    #[test]
    fn last_reached_section_wins() {
        let thresholds = [0.0, 500.0, 1200.0];
        assert_eq!(active_index(&thresholds, 600.0), Some(1));
        assert_eq!(active_index(&thresholds, 1200.0), Some(2));
        assert_eq!(active_index(&thresholds, 0.0), Some(0));
    }

    #[test]
    fn no_section_active_above_all_thresholds() {
        assert_eq!(active_index(&[10.0, 500.0], 5.0), None);
        assert_eq!(active_index(&[], 100.0), None);
    }

    #[test]
    fn overwrite_semantics_hold_for_unsorted_thresholds() {
        // Document order decides, not threshold magnitude.
        assert_eq!(active_index(&[500.0, 100.0], 300.0), Some(1));
    }
}
