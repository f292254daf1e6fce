//! The signed-in board.

use dioxus::prelude::*;
use ui::{use_app_state, use_restored, Board, Navbar};

use crate::Route;

#[component]
pub fn Notes() -> Element {
    let state = use_app_state();
    let restored = use_restored();
    let nav = use_navigator();

    if !restored {
        return rsx! {
            div { class: "loading", "Loading..." }
        };
    }
    if !state.read().is_signed_in() {
        nav.replace(Route::Login {});
        return rsx! {};
    }

    rsx! {
        Navbar {}
        Board {}
    }
}
