use std::rc::Rc;

use gloo_storage::{LocalStorage, Storage};
use serde::{Deserialize, Serialize};
use web_sys::{Document, Element, Window};

use crate::config::DomContract;
use crate::dom;
use crate::events::ListenerHandle;

const THEME_STORAGE_KEY: &str = "portfolio.theme";
const THEME_ATTRIBUTE: &str = "data-theme";
const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";
const ICON_MOON: &str = "fa-moon";
const ICON_SUN: &str = "fa-sun";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Theme> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn opposite(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Persisted preference wins; otherwise the OS color scheme decides.
pub fn initial_theme(saved: Option<Theme>, prefers_dark: bool) -> Theme {
    match saved {
        Some(theme) => theme,
        None if prefers_dark => Theme::Dark,
        None => Theme::Light,
    }
}

/// Next theme when the toggle is pressed, given what the document attribute
/// currently says. A missing or unreadable attribute toggles to dark.
pub fn toggled(current: Option<Theme>) -> Theme {
    match current {
        Some(theme) => theme.opposite(),
        None => Theme::Dark,
    }
}

fn read_saved_theme() -> Option<Theme> {
    LocalStorage::get(THEME_STORAGE_KEY).ok()
}

fn write_saved_theme(theme: Theme) {
    let _ = LocalStorage::set(THEME_STORAGE_KEY, theme);
}

fn prefers_dark(window: &Window) -> bool {
    window
        .match_media(DARK_SCHEME_QUERY)
        .ok()
        .flatten()
        .map(|list| list.matches())
        .unwrap_or(false)
}

/// Light/dark preference: applied to the document element at attach, toggled
/// by the header button, persisted on every change.
pub struct ThemePreference {
    _inner: Rc<Inner>,
    _toggle: Option<ListenerHandle>,
}

struct Inner {
    root: Element,
    icon: Option<Element>,
}

impl ThemePreference {
    pub fn attach(document: &Document, contract: &DomContract) -> Option<Self> {
        let root = document.document_element()?;
        let window = dom::window()?;
        let inner = Rc::new(Inner {
            root,
            icon: dom::element_by_id(document, contract.theme_icon_id),
        });

        apply(&inner, initial_theme(read_saved_theme(), prefers_dark(&window)));

        let toggle = dom::element_by_id(document, contract.theme_toggle_id).map(|button| {
            let inner = Rc::clone(&inner);
            ListenerHandle::new(&button, "click", move |_event| {
                let current = inner
                    .root
                    .get_attribute(THEME_ATTRIBUTE)
                    .and_then(|value| Theme::parse(&value));
                apply(&inner, toggled(current));
            })
        });

        Some(Self {
            _inner: inner,
            _toggle: toggle,
        })
    }
}

// Attribute first, then storage: the two never diverge observably because
// both writes happen in the same handler turn.
fn apply(inner: &Inner, theme: Theme) {
    let _ = inner.root.set_attribute(THEME_ATTRIBUTE, theme.as_str());
    write_saved_theme(theme);
    if let Some(icon) = &inner.icon {
        let classes = icon.class_list();
        match theme {
            Theme::Dark => {
                let _ = classes.remove_1(ICON_MOON);
                let _ = classes.add_1(ICON_SUN);
            }
            Theme::Light => {
                let _ = classes.remove_1(ICON_SUN);
                let _ = classes.add_1(ICON_MOON);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn saved_preference_wins_over_os_scheme() {
        assert_eq!(initial_theme(Some(Theme::Light), true), Theme::Light);
        assert_eq!(initial_theme(Some(Theme::Dark), false), Theme::Dark);
    }

    #[test]
    fn os_scheme_decides_when_nothing_saved() {
        assert_eq!(initial_theme(None, true), Theme::Dark);
        assert_eq!(initial_theme(None, false), Theme::Light);
    }

    #[test]
    fn toggle_flips_the_current_attribute() {
        assert_eq!(toggled(Some(Theme::Dark)), Theme::Light);
        assert_eq!(toggled(Some(Theme::Light)), Theme::Dark);
        assert_eq!(toggled(None), Theme::Dark);
    }

    #[test]
    fn persisted_representation_is_the_plain_name() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        let restored: Theme = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(restored, Theme::Light);
    }

    #[test]
    fn attribute_values_round_trip() {
        for theme in [Theme::Light, Theme::Dark] {
            assert_eq!(Theme::parse(theme.as_str()), Some(theme));
        }
        assert_eq!(Theme::parse("sepia"), None);
    }
}
