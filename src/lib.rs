use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use web_sys::Document;

pub mod config;
pub mod contact;
pub mod dom;
pub mod events;
pub mod menu;
pub mod navbar;
pub mod reveal;
pub mod scroll;
pub mod stagger;
pub mod theme;

use config::DomContract;
use contact::ContactForm;
use menu::MobileMenu;
use navbar::NavBar;
use reveal::{EntranceReveal, ViewportReveal};
use scroll::SmoothScroll;
use stagger::StaggerReveal;
use theme::ThemePreference;

/// All page controllers. Each binds to its own DOM subset and detaches on
/// drop; a controller whose root markup is missing simply stays unattached
/// without affecting the rest.
pub struct App {
    _entrance: Option<EntranceReveal>,
    _reveal: Option<ViewportReveal>,
    _stagger: Option<StaggerReveal>,
    _navbar: Option<NavBar>,
    _theme: Option<ThemePreference>,
    _menu: Option<MobileMenu>,
    _scroll: Option<SmoothScroll>,
    _contact: Option<ContactForm>,
}

impl App {
    pub fn attach(document: &Document) -> App {
        let contract = DomContract::default();
        App {
            _entrance: note("entrance", EntranceReveal::attach(document, &contract)),
            _reveal: note("reveal", ViewportReveal::attach(document, &contract)),
            _stagger: note(
                "stagger",
                StaggerReveal::attach(document, contract.stagger_groups),
            ),
            _navbar: note("navbar", NavBar::attach(document, &contract)),
            _theme: note("theme", ThemePreference::attach(document, &contract)),
            _menu: note("menu", MobileMenu::attach(document, &contract)),
            _scroll: note("scroll", SmoothScroll::attach(document, &contract)),
            _contact: note("contact", ContactForm::attach(document, &contract)),
        }
    }
}

fn note<T>(name: &'static str, controller: Option<T>) -> Option<T> {
    if controller.is_none() {
        tracing::debug!("{name}: root markup missing, skipped");
    }
    controller
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    let Some(document) = dom::document() else {
        return;
    };
    let app = App::attach(&document);
    APP.with(|slot| {
        slot.replace(Some(app));
    });
    tracing::info!("portfolio behaviors attached");
}
