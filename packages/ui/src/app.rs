//! Application context: the state signal and the controller every component uses.

use api::ApiClient;
use dioxus::prelude::*;
use store::AppState;

use crate::controller::Controller;
use crate::platform::{api_base, make_session_store, PlatformSessions};

pub type AppController = Controller<ApiClient, PlatformSessions, Signal<AppState>>;

/// Whether the stored session has been looked at yet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Restored(pub Signal<bool>);

/// Get the application state. Re-renders the caller when it changes.
pub fn use_app_state() -> Signal<AppState> {
    use_context::<Signal<AppState>>()
}

pub fn use_controller() -> AppController {
    use_context::<AppController>()
}

pub fn use_restored() -> bool {
    let Restored(restored) = use_context::<Restored>();
    restored()
}

/// Provider component that owns the application state.
/// Wrap your app with this component; it restores the previous session on mount.
#[component]
pub fn AppProvider(children: Element) -> Element {
    let state = use_signal(AppState::new);
    let mut restored = use_signal(|| false);

    use_context_provider(|| state);
    use_context_provider(|| Restored(restored));
    let controller =
        use_context_provider(|| Controller::new(ApiClient::new(api_base()), make_session_store(), state));

    // Effects only run in the client, never during server rendering.
    use_effect(move || {
        let controller = controller.clone();
        spawn(async move {
            controller.restore().await;
            restored.set(true);
        });
    });

    let theme = state.read().theme().as_str();

    rsx! {
        div {
            class: "app",
            "data-theme": "{theme}",
            {children}
        }
    }
}
