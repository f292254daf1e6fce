//! Top bar: brand, new note, theme toggle and the user menu.

use dioxus::prelude::*;
use store::{Theme, UserInfo};

use crate::app::{use_app_state, use_controller};
use crate::icons::{FaMoon, FaPlus, FaSun};
use crate::platform::{alert, canvas_size, confirm};
use crate::profile::ProfileModal;
use crate::Icon;

/// Round picture of a user, or their initial when there is none.
#[component]
pub fn Avatar(user: UserInfo, #[props(default = "avatar".to_string())] class: String) -> Element {
    rsx! {
        div {
            class: "{class}",
            if let Some(src) = user.profile_image.as_deref() {
                img { src: "{src}", alt: "Profile Picture" }
            } else {
                "{user.initial()}"
            }
        }
    }
}

#[component]
pub fn Navbar() -> Element {
    let state = use_app_state();
    let controller = use_controller();
    let mut menu_open = use_signal(|| false);
    let mut profile_open = use_signal(|| false);

    let add_note = {
        let controller = controller.clone();
        move |_| {
            let controller = controller.clone();
            async move {
                let (width, height) = canvas_size();
                if let Err(e) = controller.create_note(width, height).await {
                    tracing::error!("Failed to create note: {}", e);
                    alert("Failed to create note. Please try again.");
                }
            }
        }
    };

    let toggle_theme = {
        let controller = controller.clone();
        move |_| {
            let controller = controller.clone();
            async move {
                controller.toggle_theme().await;
            }
        }
    };

    let logout = move |_| {
        menu_open.set(false);
        let controller = controller.clone();
        async move {
            if confirm("Are you sure you want to logout?") {
                controller.logout().await;
            }
        }
    };

    let theme = state.read().theme();
    let Some(user) = state.read().user().cloned() else {
        return rsx! {};
    };

    rsx! {
        header {
            class: "navbar",
            div { class: "brand", "📝 Sticky Notes" }
            div {
                class: "navbar-actions",
                button {
                    class: "btn btn-primary",
                    onclick: add_note,
                    Icon { icon: FaPlus, width: 14, height: 14 }
                    " Add Note"
                }
                button {
                    class: "btn btn-icon",
                    title: "Toggle Theme",
                    onclick: toggle_theme,
                    if theme == Theme::Dark {
                        Icon { icon: FaSun, width: 16, height: 16 }
                    } else {
                        Icon { icon: FaMoon, width: 16, height: 16 }
                    }
                }
                div {
                    class: "user-menu",
                    button {
                        class: "user-menu-trigger",
                        onclick: move |_| menu_open.toggle(),
                        Avatar { user: user.clone(), class: "avatar avatar-small" }
                        span { class: "username", "{user.username}" }
                    }
                    if menu_open() {
                        div {
                            class: "user-dropdown",
                            button {
                                class: "dropdown-item",
                                onclick: move |_| {
                                    menu_open.set(false);
                                    profile_open.set(true);
                                },
                                "Profile"
                            }
                            button {
                                class: "dropdown-item",
                                onclick: logout,
                                "Logout"
                            }
                        }
                    }
                }
            }
        }

        if profile_open() {
            ProfileModal { on_close: move |_| profile_open.set(false) }
        }
    }
}
