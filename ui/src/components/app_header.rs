use crate::core::session::use_session;
use crate::i18n;
use crate::t;
use dioxus::prelude::*;

/// Brand bar with the locale switcher and, once someone is signed in, the
/// user menu.
///
/// The language selector writes through to the `Signal<String>` language code
/// the launcher provides (if any), so every subscribed view re-renders with
/// fresh `t!` lookups.
#[component]
pub fn AppHeader(on_logout: EventHandler<()>) -> Element {
    i18n::init();

    let session = use_session();
    let mut current_lang = use_signal(i18n::current_language);
    let langs = use_signal(i18n::available_languages);
    let mut menu_open = use_signal(|| false);
    let show_switcher = langs().len() > 1;
    let lang_code_ctx: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let lang_marker = lang_code_ctx.as_ref().map(|c| c()).unwrap_or_default();

    #[cfg(debug_assertions)]
    tracing::debug!(lang = %lang_marker, "AppHeader render");

    let on_change = move |evt: dioxus::events::FormEvent| {
        let val = evt.value();
        match i18n::set_language(&val) {
            Ok(()) => {
                current_lang.set(val.clone());
                if let Some(mut code) = lang_code_ctx {
                    code.set(val);
                }
            }
            Err(err) => tracing::warn!("language switch to {val} failed: {err}"),
        }
    };

    let username = session.read().username().map(str::to_string);
    let initial = username
        .as_deref()
        .and_then(|name| name.chars().next())
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_default();

    rsx! {
        header {
            id: "app-header",
            class: "app-header",
            div { style: "display:none", "{lang_marker}" }
            div { class: "app-header__inner",
                div { class: "app-header__brand",
                    span { class: "app-header__brand-mark", aria_hidden: "true", "⚖" }
                    div {
                        span { class: "app-header__brand-name", {t!("brand-name")} }
                        span { class: "app-header__brand-subtitle", {t!("tagline")} }
                    }
                }

                div { class: "app-header__tools",
                    if show_switcher {
                        div { class: "app-header__locale",
                            label {
                                class: "visually-hidden",
                                r#for: "locale-select",
                                {t!("nav-language-label")}
                            }
                            select {
                                id: "locale-select",
                                value: "{current_lang()}",
                                oninput: on_change,
                                { langs().iter().map(|code| {
                                    let c = code.clone();
                                    rsx!{
                                        option { key: "{c}", value: "{c}", "{c}" }
                                    }
                                })}
                            }
                        }
                    }

                    if let Some(name) = username {
                        div { class: "user-menu",
                            button {
                                r#type: "button",
                                class: "user-menu__toggle",
                                aria_haspopup: "true",
                                aria_expanded: menu_open(),
                                onclick: move |_| menu_open.toggle(),
                                span { class: "user-menu__avatar", "{initial}" }
                                span { class: "user-menu__name", "{name}" }
                            }
                            if menu_open() {
                                div { class: "user-menu__dropdown", role: "menu",
                                    button {
                                        r#type: "button",
                                        role: "menuitem",
                                        class: "user-menu__item",
                                        onclick: move |_| {
                                            menu_open.set(false);
                                            on_logout.call(());
                                        },
                                        {t!("nav-logout")}
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
