#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

#[cfg(feature = "desktop")]
use dioxus::desktop::{tao::window::WindowBuilder, Config};
use dioxus::prelude::*;

use ui::analysis::{use_analysis, use_analysis_provider};
use ui::components::AppHeader;
use ui::core::session::{route_guard, use_session, use_session_provider, Redirect};
use ui::theme::{MAIN_CSS_INLINE, PDF_BRIDGE_INLINE};
use ui::views::{LoginView, WorkspaceView};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(DesktopShell)]
    #[route("/")]
    Workspace {},
    #[route("/login")]
    Login {},
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

#[cfg(feature = "desktop")]
fn main() {
    LaunchBuilder::desktop()
        .with_cfg(
            Config::new().with_window(
                WindowBuilder::new()
                    .with_title(format!("Contract Intel – v{}", env!("CARGO_PKG_VERSION")))
                    .with_maximized(true),
            ),
        )
        .launch(App);
}

#[cfg(all(feature = "server", not(feature = "desktop")))]
fn main() {
    LaunchBuilder::server().launch(App);
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

    // Runtime maximize fallback (in case initial builder maximize is ignored by WM)
    #[cfg(feature = "desktop")]
    {
        let win = dioxus::desktop::use_window();
        use_effect(move || {
            win.set_maximized(true);
        });
    }

    rsx! {
        // Desktop builds carry no bundle directory: theme and viewer bridge are inlined.
        document::Style { "{MAIN_CSS_INLINE}" }
        document::Script { "{PDF_BRIDGE_INLINE}" }

        div { key: "{lang_code()}",
            Router::<Route> {}
        }
    }
}

#[component]
fn DesktopShell() -> Element {
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

    rsx! {
        AppHeader {
            on_logout: move |_| {
                analysis.reset();
                session.with_mut(|s| s.logout());
                navigator.replace(Route::Login {});
            },
        }
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

#[component]
fn NotFound(segments: Vec<String>) -> Element {
    let navigator = use_navigator();
    tracing::debug!(path = %segments.join("/"), "unknown route");
    use_effect(move || {
        navigator.replace(Route::Workspace {});
    });
    rsx! {}
}
