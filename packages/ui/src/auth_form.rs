//! Login and registration form.

use dioxus::prelude::*;

use crate::app::use_controller;
use crate::platform::alert;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

#[component]
pub fn AuthForm(mode: AuthMode, on_switch: EventHandler<AuthMode>) -> Element {
    let controller = use_controller();
    let mut username = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut busy = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let controller = controller.clone();
        async move {
            busy.set(true);
            let result = match mode {
                AuthMode::Login => controller.login(&email(), &password()).await,
                AuthMode::Register => controller.register(&username(), &email(), &password()).await,
            };
            busy.set(false);
            match result {
                Ok(()) => password.set(String::new()),
                Err(e) => alert(&e.to_string()),
            }
        }
    };

    let (title, submit, switch_label, other) = match mode {
        AuthMode::Login => ("Welcome back", "Login", "Need an account? Register", AuthMode::Register),
        AuthMode::Register => ("Create an account", "Register", "Have an account? Login", AuthMode::Login),
    };

    rsx! {
        div {
            class: "auth-container",
            form {
                class: "auth-card",
                onsubmit: onsubmit,
                h1 { class: "auth-brand", "Sticky Notes" }
                h2 { class: "auth-title", "{title}" }

                if mode == AuthMode::Register {
                    input {
                        class: "auth-input",
                        r#type: "text",
                        placeholder: "Username",
                        autocomplete: "username",
                        value: username(),
                        oninput: move |evt: FormEvent| username.set(evt.value()),
                    }
                }
                input {
                    class: "auth-input",
                    r#type: "email",
                    placeholder: "Email",
                    autocomplete: "email",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }
                input {
                    class: "auth-input",
                    r#type: "password",
                    placeholder: "Password",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: busy(),
                    if busy() { "Please wait..." } else { "{submit}" }
                }
                button {
                    class: "btn btn-link",
                    r#type: "button",
                    onclick: move |_| on_switch.call(other),
                    "{switch_label}"
                }
            }
        }
    }
}
