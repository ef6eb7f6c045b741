use dioxus::prelude::*;

use crate::components::AppFooter;
use crate::core::session::use_session;
use crate::t;

/// Name-only sign-in. Blank names are ignored without a message.
#[component]
pub fn LoginView(on_success: EventHandler<()>) -> Element {
    let mut session = use_session();
    let mut name = use_signal(String::new);

    let mut submit = move || {
        let entered = name();
        if session.with_mut(|s| s.login(&entered)) {
            name.set(String::new());
            on_success.call(());
        } else {
            tracing::debug!("blank login ignored");
        }
    };

    rsx! {
        main { class: "login",
            div { class: "login__card",
                div { class: "login__brand",
                    span { class: "login__mark", aria_hidden: "true", "⚖" }
                    h1 { class: "login__title", {t!("login-title")} }
                    p { class: "login__lead", {t!("login-lead")} }
                }
                form {
                    class: "login__form",
                    onsubmit: move |evt: FormEvent| {
                        evt.prevent_default();
                        submit();
                    },
                    label { class: "login__label", r#for: "login-name", {t!("login-name-label")} }
                    input {
                        id: "login-name",
                        class: "login__input",
                        r#type: "text",
                        autocomplete: "name",
                        placeholder: t!("login-name-placeholder"),
                        value: "{name}",
                        oninput: move |evt: FormEvent| name.set(evt.value()),
                    }
                    button { r#type: "submit", class: "button button--primary login__submit",
                        {t!("login-submit")}
                    }
                }
                p { class: "login__note", {t!("login-note")} }
            }
            AppFooter {}
        }
    }
}
