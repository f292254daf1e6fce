//! Emoji picker modal.

use dioxus::prelude::*;
use store::EmojiCategory;

use crate::app::{use_app_state, use_controller};
use crate::modal_overlay::ModalOverlay;
use crate::sticky_note::{field_element_id, place_caret};

#[component]
pub fn EmojiPicker() -> Element {
    let mut state = use_app_state();
    let controller = use_controller();
    let active = state.read().emoji_category();

    let pick = use_callback(move |emoji: &'static str| {
        let target = state.peek().emoji_target().cloned();
        let Some(target) = target else {
            return;
        };
        // Caret first, network after, so typing can resume right away.
        let Some((edit, caret)) = state.write().insert_emoji(emoji) else {
            return;
        };
        place_caret(&field_element_id(&target.note_id, target.field), caret);
        let controller = controller.clone();
        spawn(async move { controller.persist(edit).await });
    });

    rsx! {
        ModalOverlay {
            class: "modal-card emoji-modal",
            on_close: move |_| state.write().close_emoji_picker(),
            div {
                class: "emoji-picker-header",
                h3 { "Choose an Emoji" }
                button {
                    class: "close-btn",
                    onclick: move |_| state.write().close_emoji_picker(),
                    "×"
                }
            }
            div {
                class: "emoji-categories",
                for category in EmojiCategory::ALL {
                    button {
                        key: "{category.label()}",
                        class: if category == active { "emoji-category active" } else { "emoji-category" },
                        title: "{category.label()}",
                        onclick: move |_| state.write().set_emoji_category(category),
                        "{category.icon()}"
                    }
                }
            }
            div {
                class: "emoji-grid",
                for emoji in active.emojis().iter().copied() {
                    button {
                        key: "{emoji}",
                        class: "emoji-item",
                        onclick: move |_| pick.call(emoji),
                        "{emoji}"
                    }
                }
            }
        }
    }
}
