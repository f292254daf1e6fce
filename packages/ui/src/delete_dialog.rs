//! Confirmation before a note is deleted.

use dioxus::prelude::*;

use crate::app::{use_app_state, use_controller};
use crate::modal_overlay::ModalOverlay;
use crate::platform::alert;

#[component]
pub fn DeleteDialog() -> Element {
    let mut state = use_app_state();
    let controller = use_controller();

    let confirm = move |_| {
        let controller = controller.clone();
        async move {
            if let Err(e) = controller.delete_confirmed().await {
                tracing::error!("Failed to delete note: {}", e);
                alert("Failed to delete note. Please try again.");
            }
        }
    };

    rsx! {
        ModalOverlay {
            on_close: move |_| state.write().cancel_delete(),
            h3 { "Delete Note" }
            p { "Are you sure you want to delete this note? This action cannot be undone." }
            div {
                class: "modal-actions",
                button {
                    class: "btn btn-secondary",
                    onclick: move |_| state.write().cancel_delete(),
                    "Cancel"
                }
                button {
                    class: "btn btn-danger",
                    onclick: confirm,
                    "Delete"
                }
            }
        }
    }
}
