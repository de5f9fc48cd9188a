use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Node};

use crate::config::DomContract;
use crate::dom;
use crate::events::ListenerHandle;

/// Where a click landed, relative to the hamburger control and the menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickTarget {
    Hamburger,
    MenuLink,
    Menu,
    Outside,
}

/// The whole open/close machine: hamburger toggles, links and outside clicks
/// close, other clicks inside the open menu change nothing.
pub fn next_open(open: bool, target: ClickTarget) -> bool {
    match target {
        ClickTarget::Hamburger => !open,
        ClickTarget::MenuLink | ClickTarget::Outside => false,
        ClickTarget::Menu => open,
    }
}

pub struct MobileMenu {
    _listeners: Vec<ListenerHandle>,
}

impl MobileMenu {
    pub fn attach(document: &Document, contract: &DomContract) -> Option<Self> {
        let hamburger = dom::html_by_id(document, contract.hamburger_id)?;
        let menu = dom::html_by_id(document, contract.nav_links_id)?;
        let open_class = contract.open_class;

        let mut listeners = Vec::new();

        {
            let menu = menu.clone();
            listeners.push(ListenerHandle::new(&hamburger, "click", move |_event| {
                let classes = menu.class_list();
                let open = classes.contains(open_class);
                set_open(&menu, open_class, next_open(open, ClickTarget::Hamburger));
            }));
        }

        for link in dom::query_all_in(&menu, "a") {
            let menu = menu.clone();
            listeners.push(ListenerHandle::new(&link, "click", move |_event| {
                let open = menu.class_list().contains(open_class);
                set_open(&menu, open_class, next_open(open, ClickTarget::MenuLink));
            }));
        }

        {
            let hamburger = hamburger.clone();
            let menu = menu.clone();
            listeners.push(ListenerHandle::new(document, "click", move |event| {
                let target = event.target();
                let node = target.as_ref().and_then(|value| value.dyn_ref::<Node>());
                if classify_document_click(&hamburger, &menu, node) != ClickTarget::Outside {
                    return;
                }
                let open = menu.class_list().contains(open_class);
                set_open(&menu, open_class, next_open(open, ClickTarget::Outside));
            }));
        }

        Some(Self {
            _listeners: listeners,
        })
    }
}

fn set_open(menu: &HtmlElement, open_class: &str, open: bool) {
    let classes = menu.class_list();
    if open {
        let _ = classes.add_1(open_class);
    } else {
        let _ = classes.remove_1(open_class);
    }
}

// The document-level listener only distinguishes outside clicks; hamburger
// and link clicks are handled by their own listeners on the same event.
fn classify_document_click(
    hamburger: &HtmlElement,
    menu: &HtmlElement,
    target: Option<&Node>,
) -> ClickTarget {
    if hamburger.contains(target) {
        return ClickTarget::Hamburger;
    }
    if menu.contains(target) {
        return ClickTarget::Menu;
    }
    ClickTarget::Outside
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn hamburger_toggles_both_ways() {
        assert!(next_open(false, ClickTarget::Hamburger));
        assert!(!next_open(true, ClickTarget::Hamburger));
    }

    #[test]
    fn contained_link_click_closes() {
        assert!(!next_open(true, ClickTarget::MenuLink));
    }

    #[test]
    fn outside_click_closes() {
        assert!(!next_open(true, ClickTarget::Outside));
        assert!(!next_open(false, ClickTarget::Outside));
    }

    #[test]
    fn non_link_click_inside_open_menu_changes_nothing() {
        assert!(next_open(true, ClickTarget::Menu));
        assert!(!next_open(false, ClickTarget::Menu));
    }
}
