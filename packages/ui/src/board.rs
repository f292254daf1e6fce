//! The canvas every note is laid out on.

use dioxus::prelude::*;
use store::Position;

use crate::app::{use_app_state, use_controller};
use crate::delete_dialog::DeleteDialog;
use crate::emoji_picker::EmojiPicker;
use crate::sticky_note::StickyNote;

#[component]
pub fn Board() -> Element {
    let mut state = use_app_state();
    let controller = use_controller();

    let release = move |_| {
        let controller = controller.clone();
        async move { controller.end_drag().await }
    };

    let board = state.read();
    let dragged = board.dragging().map(|d| d.note_id.as_str());
    let notes: Vec<_> = board
        .notes
        .iter()
        .map(|note| {
            let position = board.display_position(&note.id).unwrap_or_default();
            let dragging = dragged == Some(note.id.as_str());
            (note.clone(), position, dragging)
        })
        .collect();
    let picker_open = board.emoji_target().is_some();
    let confirming = board.pending_delete().is_some();
    drop(board);

    rsx! {
        div {
            class: "board",
            onmousemove: move |evt: MouseEvent| {
                if state.peek().dragging().is_some() {
                    let point = evt.page_coordinates();
                    state.write().drag_to(Position::new(point.x, point.y));
                }
            },
            onmouseup: release.clone(),
            onmouseleave: release,

            if notes.is_empty() {
                div {
                    class: "board-empty",
                    "No notes yet. Use \"Add Note\" to create one."
                }
            }
            for (note, position, dragging) in notes {
                StickyNote {
                    key: "{note.id}",
                    note,
                    position,
                    dragging,
                }
            }
        }

        if picker_open {
            EmojiPicker {}
        }
        if confirming {
            DeleteDialog {}
        }
    }
}
