//! Profile modal: picture, username and account details.

use dioxus::prelude::*;

use crate::app::{use_app_state, use_controller};
use crate::modal_overlay::ModalOverlay;
use crate::navbar::Avatar;
use crate::platform::alert;

#[component]
pub fn ProfileModal(on_close: EventHandler<()>) -> Element {
    let state = use_app_state();
    let controller = use_controller();
    let mut editing = use_signal(|| false);
    let mut draft = use_signal(String::new);

    let upload = {
        let controller = controller.clone();
        move |evt: FormEvent| {
            let controller = controller.clone();
            async move {
                let Some(file) = evt.files().into_iter().next() else {
                    return;
                };
                let name = file.name();
                let bytes = match file.read_bytes().await {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        tracing::error!("Failed to read {}: {}", name, e);
                        alert("Failed to upload profile image. Please try again.");
                        return;
                    }
                };
                if let Err(e) = controller.upload_profile_image(&name, &bytes).await {
                    alert(&e.to_string());
                }
            }
        }
    };

    let remove = {
        let controller = controller.clone();
        move |_| {
            let controller = controller.clone();
            async move {
                if let Err(e) = controller.remove_profile_image().await {
                    tracing::error!("Failed to remove profile image: {}", e);
                    alert("Failed to remove profile image. Please try again.");
                }
            }
        }
    };

    let save = move |_| {
        let controller = controller.clone();
        async move {
            match controller.rename(&draft()).await {
                Ok(changed) => {
                    editing.set(false);
                    if changed {
                        alert("Username updated successfully!");
                    }
                }
                Err(e) => alert(&e.to_string()),
            }
        }
    };

    let app = state.read();
    let Some(user) = app.user().cloned() else {
        return rsx! {};
    };
    let note_count = app.notes.len();
    let theme = match app.theme() {
        store::Theme::Light => "Light",
        store::Theme::Dark => "Dark",
    };
    drop(app);

    rsx! {
        ModalOverlay {
            class: "modal-card profile-modal",
            on_close: move |_| on_close.call(()),
            div {
                class: "profile-header",
                h3 { "Profile" }
                button {
                    class: "close-btn",
                    onclick: move |_| on_close.call(()),
                    "×"
                }
            }

            div {
                class: "profile-avatar-section",
                Avatar { user: user.clone(), class: "avatar avatar-large" }
                div {
                    class: "profile-avatar-actions",
                    label {
                        class: "btn btn-secondary",
                        "Upload Picture"
                        input {
                            r#type: "file",
                            accept: "image/*",
                            hidden: true,
                            onchange: upload,
                        }
                    }
                    if user.profile_image.is_some() {
                        button {
                            class: "btn btn-link",
                            onclick: remove,
                            "Remove"
                        }
                    }
                }
            }

            div {
                class: "profile-info",
                div {
                    class: "profile-row",
                    span { class: "profile-label", "Username" }
                    if editing() {
                        input {
                            class: "username-input",
                            value: draft(),
                            maxlength: 20,
                            oninput: move |evt: FormEvent| draft.set(evt.value()),
                        }
                        button { class: "btn btn-primary", onclick: save, "Save" }
                        button {
                            class: "btn btn-secondary",
                            onclick: move |_| editing.set(false),
                            "Cancel"
                        }
                    } else {
                        span { class: "profile-value", "{user.username}" }
                        button {
                            class: "btn btn-link",
                            onclick: {
                                let current = user.username.clone();
                                move |_| {
                                    draft.set(current.clone());
                                    editing.set(true);
                                }
                            },
                            "Edit"
                        }
                    }
                }
                div {
                    class: "profile-row",
                    span { class: "profile-label", "Email" }
                    span { class: "profile-value", "{user.email}" }
                }
                div {
                    class: "profile-row",
                    span { class: "profile-label", "Notes" }
                    span { class: "profile-value", "{note_count}" }
                }
                div {
                    class: "profile-row",
                    span { class: "profile-label", "Theme" }
                    span { class: "profile-value", "{theme}" }
                }
            }
        }
    }
}
