//! Localization for `contract-intel-ui`.
//!
//! Bundles live under `i18n/<lang-id>/contract-intel-ui.ftl` and are embedded
//! with `rust-embed`; `en-US` is the fallback and the reference every other
//! locale must match. Lookups go through the [`t!`](crate::t) macro, which is
//! checked against the fallback bundle at compile time by `i18n-embed-fl`.
//!
//! Desktop builds request the OS locale list, web builds `navigator.languages`.
use std::sync::Once;

use i18n_embed::fluent::FluentLanguageLoader;
use i18n_embed::LanguageLoader;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use unic_langid::LanguageIdentifier;

pub use i18n_embed_fl::fl;

/// Translate through the shared loader, with optional fluent arguments.
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    };
    ($key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key, $( $arg = $value ),+ )
    };
}

/// Fallback bundle is `i18n/en-US/{DOMAIN}.ftl`.
const DOMAIN: &str = "contract-intel-ui";
const FALLBACK: &str = "en-US";

#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

pub static LOADER: Lazy<FluentLanguageLoader> = Lazy::new(|| {
    let fallback: LanguageIdentifier = FALLBACK.parse().expect("valid fallback language tag");
    FluentLanguageLoader::new(DOMAIN, fallback)
});

static INIT: Once = Once::new();

/// Load the bundles best matching the user's locale (idempotent).
pub fn init() {
    INIT.call_once(|| {
        let requested = requested_languages();
        match select(&requested) {
            Ok(selected) => tracing::debug!(?selected, "localization ready"),
            Err(err) => tracing::warn!("language selection failed ({err}); using en-US"),
        }
    });
}

/// Switch language at runtime. Unparseable tags are ignored.
pub fn set_language(tag: &str) -> Result<(), i18n_embed::I18nEmbedError> {
    let Ok(lang) = tag.parse::<LanguageIdentifier>() else {
        tracing::debug!(tag, "ignoring unparseable language tag");
        return Ok(());
    };
    select(&[lang]).map(|_| ())
}

/// Tag of the bundle lookups currently resolve against.
pub fn current_language() -> String {
    LOADER.current_language().to_string()
}

// Every selection rebuilds the bundles, which resets isolation to the
// default. Bidi marks would leak into CSV exports and tooltips.
fn select(
    requested: &[LanguageIdentifier],
) -> Result<Vec<LanguageIdentifier>, i18n_embed::I18nEmbedError> {
    let selected = i18n_embed::select(&*LOADER, &Localizations, requested)?;
    LOADER.set_use_isolating(false);
    Ok(selected)
}

/// Embedded language tags, sorted, for the header's picker.
pub fn available_languages() -> Vec<String> {
    let mut langs = Localizations::iter()
        .filter_map(|path| path.split('/').next().map(str::to_string))
        .collect::<Vec<_>>();
    langs.sort();
    langs.dedup();
    langs
}

#[cfg(target_arch = "wasm32")]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::WebLanguageRequester::requested_languages()
}

#[cfg(not(target_arch = "wasm32"))]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::DesktopLanguageRequester::requested_languages()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Tests that switch the global language run one at a time.
    static SWITCH: Mutex<()> = Mutex::new(());

    #[test]
    fn ships_fallback_and_spanish() {
        let langs = available_languages();
        assert!(langs.iter().any(|l| l == "en-US"));
        assert!(langs.iter().any(|l| l == "es-ES"));
    }

    #[test]
    fn fallback_is_the_loader_default() {
        assert_eq!(LOADER.fallback_language().to_string(), FALLBACK);
    }

    #[test]
    fn arguments_are_interpolated_without_isolation_marks() {
        init();
        let text = fl!(&*LOADER, "results-welcome", name = "Sarah");
        assert!(text.contains("Sarah"));
        assert!(!text.contains('\u{2068}'));
    }

    #[test]
    fn switching_language_keeps_isolation_off() {
        let _guard = SWITCH.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        init();
        set_language("es-ES").unwrap();
        let text = fl!(&*LOADER, "export-saved", path = "/tmp/report.csv");
        assert!(text.ends_with("/tmp/report.csv"));
        assert!(!text.contains(['\u{2068}', '\u{2069}']));
        assert_eq!(current_language(), "es-ES");
        set_language(FALLBACK).unwrap();
    }

    #[test]
    fn macro_domain_matches_bundle_file_name() {
        let config = include_str!("../i18n.toml");
        assert!(config.contains(&format!("domain = \"{DOMAIN}\"")));
        assert!(Localizations::get(&format!("en-US/{DOMAIN}.ftl")).is_some());
        assert!(Localizations::get(&format!("es-ES/{DOMAIN}.ftl")).is_some());
    }

    #[test]
    fn current_language_is_a_picker_option() {
        let _guard = SWITCH.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        init();
        assert!(available_languages().contains(&current_language()));

        set_language("es-ES").unwrap();
        assert!(available_languages().contains(&current_language()));
        set_language(FALLBACK).unwrap();
        assert_eq!(current_language(), FALLBACK);
    }

    #[test]
    fn unknown_language_keeps_current_bundle() {
        let _guard = SWITCH.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        init();
        let before = fl!(&*LOADER, "brand-name");
        let _ = set_language("zz-ZZ");
        let after = fl!(&*LOADER, "brand-name");
        assert_eq!(before, after);
    }
}
