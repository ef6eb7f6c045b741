use dioxus::prelude::*;

use crate::analysis::AnalysisView;
use crate::components::AppFooter;

/// Main page once signed in: upload, analyze and review.
#[component]
pub fn WorkspaceView() -> Element {
    rsx! {
        main { class: "workspace",
            AnalysisView {}
        }
        AppFooter {}
    }
}
