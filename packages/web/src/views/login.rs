//! Login and registration pages.

use dioxus::prelude::*;
use ui::{use_app_state, AuthForm, AuthMode};

use crate::Route;

fn route_for(mode: AuthMode) -> Route {
    match mode {
        AuthMode::Login => Route::Login {},
        AuthMode::Register => Route::Register {},
    }
}

#[component]
fn AuthPage(mode: AuthMode) -> Element {
    let state = use_app_state();
    let nav = use_navigator();

    // Signing in from the form lands here too.
    if state.read().is_signed_in() {
        nav.replace(Route::Notes {});
        return rsx! {};
    }

    rsx! {
        AuthForm {
            mode,
            on_switch: move |mode| {
                nav.replace(route_for(mode));
            },
        }
    }
}

#[component]
pub fn Login() -> Element {
    rsx! { AuthPage { mode: AuthMode::Login } }
}

#[component]
pub fn Register() -> Element {
    rsx! { AuthPage { mode: AuthMode::Register } }
}
