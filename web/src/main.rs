use dioxus::prelude::*;

use ui::analysis::{use_analysis, use_analysis_provider};
use ui::components::AppHeader;
use ui::core::session::{route_guard, use_session, use_session_provider, Redirect};
use ui::theme::{MAIN_CSS, PDF_BRIDGE};
use ui::views::{LoginView, WorkspaceView};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebShell)]
    #[route("/")]
    Workspace {},
    #[route("/login")]
    Login {},
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    ui::i18n::init();

    // The header writes the chosen language here; keying the router on it
    // remounts every view with fresh lookups. Session and analysis state live
    // above the key so a switch keeps them.
    let lang_code = use_signal(ui::i18n::current_language);
    use_context_provider(|| lang_code);
    use_session_provider();
    use_analysis_provider();

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Script { src: PDF_BRIDGE }

        div { key: "{lang_code()}",
            Router::<Route> {}
        }
    }
}

/// Header plus the routed page, with the session guard applied to every
/// route inside the layout.
#[component]
fn WebShell() -> Element {
    let mut session = use_session();
    let route = use_route::<Route>();
    let navigator = use_navigator();

    let redirect = route_guard(
        session.read().is_active(),
        matches!(route, Route::Login {}),
    );
    use_effect(use_reactive!(|redirect| {
        match redirect {
            Some(Redirect::ToLogin) => {
                navigator.replace(Route::Login {});
            }
            Some(Redirect::ToWorkspace) => {
                navigator.replace(Route::Workspace {});
            }
            None => {}
        }
    }));

    let analysis = use_analysis();
    let on_logout = move |_| {
        analysis.reset();
        session.with_mut(|s| s.logout());
        navigator.replace(Route::Login {});
    };

    rsx! {
        AppHeader { on_logout }
        if redirect.is_none() {
            Outlet::<Route> {}
        }
    }
}

#[component]
fn Workspace() -> Element {
    rsx! { WorkspaceView {} }
}

#[component]
fn Login() -> Element {
    let navigator = use_navigator();
    rsx! {
        LoginView {
            on_success: move |_| {
                navigator.replace(Route::Workspace {});
            },
        }
    }
}

/// Unknown paths fall through to the workspace, which the guard may
/// bounce on to the login page.
#[component]
fn NotFound(segments: Vec<String>) -> Element {
    let navigator = use_navigator();
    tracing::debug!(path = %segments.join("/"), "unknown route");
    use_effect(move || {
        navigator.replace(Route::Workspace {});
    });
    rsx! {}
}
