//! A single note on the board.

use dioxus::prelude::*;
use store::{EmojiTarget, Note, NoteColor, NoteField, NotePatch, NoteSize, Position, Selection};

use crate::app::{use_app_state, use_controller};
use crate::icons::{FaPalette, FaRulerCombined, FaTrashCan};
use crate::Icon;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Picker {
    Color,
    Size,
}

/// DOM id of a note's title or content textarea.
pub fn field_element_id(note_id: &str, field: NoteField) -> String {
    format!("note-{}-{}", field.as_str(), note_id)
}

/// Current selection of a textarea, in UTF-16 code units.
async fn read_selection(element_id: &str) -> Option<Selection> {
    let js = format!(
        r#"const el = document.getElementById("{element_id}");
        if (!el) {{ return null; }}
        return [el.selectionStart, el.selectionEnd];"#
    );
    document::eval(&js)
        .join::<Option<[usize; 2]>>()
        .await
        .ok()
        .flatten()
        .map(|[start, end]| Selection { start, end })
}

/// Focus a textarea and put the caret at `caret` once the new value is rendered.
pub fn place_caret(element_id: &str, caret: usize) {
    let js = format!(
        r#"requestAnimationFrame(() => {{
            const el = document.getElementById("{element_id}");
            if (el) {{ el.focus(); el.setSelectionRange({caret}, {caret}); }}
        }});"#
    );
    let _ = document::eval(&js);
}

#[component]
pub fn StickyNote(note: Note, position: Position, dragging: bool) -> Element {
    let mut state = use_app_state();
    let controller = use_controller();
    let mut picker = use_signal(|| Option::<Picker>::None);
    // The emoji button targets the field that last had focus.
    let mut focused = use_signal(|| NoteField::Title);

    let id = note.id.clone();
    let title_id = field_element_id(&id, NoteField::Title);
    let content_id = field_element_id(&id, NoteField::Content);

    let edit = use_callback({
        let id = id.clone();
        move |patch: NotePatch| {
            let controller = controller.clone();
            let id = id.clone();
            spawn(async move { controller.edit_note(&id, patch).await });
        }
    });

    let onmousedown = {
        let id = id.clone();
        move |evt: MouseEvent| {
            let point = evt.page_coordinates();
            state.write().begin_drag(&id, Position::new(point.x, point.y));
        }
    };

    let open_emoji = {
        let id = id.clone();
        move |_| {
            let id = id.clone();
            let field = focused();
            async move {
                let selection = read_selection(&field_element_id(&id, field)).await;
                state.write().open_emoji_picker(EmojiTarget {
                    note_id: id,
                    field,
                    selection,
                });
            }
        }
    };

    let request_delete = {
        let id = id.clone();
        move |_| state.write().request_delete(&id)
    };

    let class = format!(
        "note {} {}{}",
        note.color.as_str(),
        note.size.as_str(),
        if dragging { " dragging" } else { "" }
    );

    rsx! {
        div {
            class: "{class}",
            style: "left: {position.x}px; top: {position.y}px;",
            onmousedown: onmousedown,
            div {
                class: "note-header",
                textarea {
                    id: "{title_id}",
                    class: "note-title",
                    placeholder: "Note title...",
                    value: "{note.title}",
                    onmousedown: move |evt: MouseEvent| evt.stop_propagation(),
                    onfocus: move |_| focused.set(NoteField::Title),
                    oninput: move |evt: FormEvent| edit.call(NotePatch::title(evt.value())),
                }
                div {
                    class: "note-controls",
                    onmousedown: move |evt: MouseEvent| evt.stop_propagation(),
                    button {
                        class: "note-btn",
                        title: "Add Emoji",
                        onclick: open_emoji,
                        "😊"
                    }
                    button {
                        class: "note-btn",
                        title: "Change Color",
                        onclick: move |_| picker.set(toggle(picker(), Picker::Color)),
                        Icon { icon: FaPalette, width: 12, height: 12 }
                    }
                    button {
                        class: "note-btn",
                        title: "Change Size",
                        onclick: move |_| picker.set(toggle(picker(), Picker::Size)),
                        Icon { icon: FaRulerCombined, width: 12, height: 12 }
                    }
                    button {
                        class: "note-btn",
                        title: "Delete Note",
                        onclick: request_delete,
                        Icon { icon: FaTrashCan, width: 12, height: 12 }
                    }

                    {match picker() {
                        Some(Picker::Color) => rsx! {
                            div {
                                class: "color-picker",
                                for color in NoteColor::ALL.iter().copied() {
                                    div {
                                        key: "{color}",
                                        class: "color-option {color}",
                                        title: "{color}",
                                        onclick: move |_| {
                                            picker.set(None);
                                            edit.call(NotePatch::color(color));
                                        },
                                    }
                                }
                            }
                        },
                        Some(Picker::Size) => rsx! {
                            div {
                                class: "size-picker",
                                for size in NoteSize::ALL.iter().copied() {
                                    button {
                                        key: "{size}",
                                        class: "size-option",
                                        onclick: move |_| {
                                            picker.set(None);
                                            edit.call(NotePatch::size(size));
                                        },
                                        "{size_label(size)}"
                                    }
                                }
                            }
                        },
                        None => rsx! {},
                    }}
                }
            }
            div {
                class: "note-content",
                textarea {
                    id: "{content_id}",
                    class: "note-textarea",
                    placeholder: "Start typing your note...",
                    value: "{note.content}",
                    onmousedown: move |evt: MouseEvent| evt.stop_propagation(),
                    onfocus: move |_| focused.set(NoteField::Content),
                    oninput: move |evt: FormEvent| edit.call(NotePatch::content(evt.value())),
                }
            }
        }
    }
}

fn toggle(current: Option<Picker>, picker: Picker) -> Option<Picker> {
    if current == Some(picker) {
        None
    } else {
        Some(picker)
    }
}

fn size_label(size: NoteSize) -> &'static str {
    match size {
        NoteSize::Small => "Small",
        NoteSize::Medium => "Medium",
        NoteSize::Large => "Large",
    }
}
