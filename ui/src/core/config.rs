//! Endpoint and ticker configuration.
//!
//! Resolution order for every key:
//! 1. Process environment (native targets only, so a packaged desktop build can
//!    be pointed at another service without recompiling).
//! 2. Compile-time `option_env!` (the only source on wasm).
//! 3. Built-in defaults matching a local analysis service.

const DEFAULT_API_BASE: &str = "http://localhost:8000";
const DEFAULT_ANALYZE_PATH: &str = "/api/analyze/enhanced";

pub const ENV_API_BASE: &str = "CONTRACT_INTEL_API_BASE";
pub const ENV_ANALYZE_PATH: &str = "CONTRACT_INTEL_ANALYZE_PATH";
pub const ENV_USE_BATCH: &str = "CONTRACT_INTEL_USE_BATCH";

/// Where and how the analysis request is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub analyze_path: String,
    /// Value of the `use_batch` processing-mode field.
    pub use_batch: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            analyze_path: DEFAULT_ANALYZE_PATH.to_string(),
            use_batch: true,
        }
    }
}

impl ApiConfig {
    /// Resolve from the environment of the running platform.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| runtime_var(key).or_else(|| compile_time_var(key)))
    }

    /// Resolve through an arbitrary lookup; unknown or blank values fall back
    /// to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let base_url = read(ENV_API_BASE)
            .map(|value| value.trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url);
        let analyze_path = read(ENV_ANALYZE_PATH)
            .map(|value| {
                if value.starts_with('/') {
                    value
                } else {
                    format!("/{value}")
                }
            })
            .unwrap_or(defaults.analyze_path);
        let use_batch = read(ENV_USE_BATCH)
            .and_then(|value| parse_flag(&value))
            .unwrap_or(defaults.use_batch);

        Self {
            base_url,
            analyze_path,
            use_batch,
        }
    }

    pub fn analyze_url(&self) -> String {
        format!("{}{}", self.base_url, self.analyze_path)
    }

    /// Turn a server-relative link (such as `contract_url`) into an absolute one.
    /// Absolute links pass through untouched.
    pub fn resolve(&self, link: &str) -> String {
        if link.starts_with("http://") || link.starts_with("https://") {
            return link.to_string();
        }
        if link.starts_with('/') {
            format!("{}{}", self.base_url, link)
        } else {
            format!("{}/{}", self.base_url, link)
        }
    }
}

/// Constants for the advisory progress indicator shown while a request is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressConfig {
    pub step: u8,
    pub interval_ms: u64,
    /// Ticks never push the value past this; only a completed run reaches 100.
    pub ceiling: u8,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            step: 5,
            interval_ms: 300,
            ceiling: 90,
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[cfg(target_arch = "wasm32")]
fn runtime_var(_key: &str) -> Option<String> {
    None
}

fn compile_time_var(key: &str) -> Option<String> {
    let value = match key {
        ENV_API_BASE => option_env!("CONTRACT_INTEL_API_BASE"),
        ENV_ANALYZE_PATH => option_env!("CONTRACT_INTEL_ANALYZE_PATH"),
        ENV_USE_BATCH => option_env!("CONTRACT_INTEL_USE_BATCH"),
        _ => None,
    };
    value.map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_local_service() {
        let config = ApiConfig::from_lookup(|_| None);
        assert_eq!(
            config.analyze_url(),
            "http://localhost:8000/api/analyze/enhanced"
        );
        assert!(config.use_batch);
    }

    #[test]
    fn overrides_are_normalised() {
        let config = ApiConfig::from_lookup(lookup_from(&[
            (ENV_API_BASE, "https://intel.example.com/ "),
            (ENV_ANALYZE_PATH, "api/analyze"),
            (ENV_USE_BATCH, "off"),
        ]));
        assert_eq!(config.analyze_url(), "https://intel.example.com/api/analyze");
        assert!(!config.use_batch);
    }

    #[test]
    fn blank_or_unparseable_values_fall_back() {
        let config = ApiConfig::from_lookup(lookup_from(&[
            (ENV_API_BASE, "   "),
            (ENV_USE_BATCH, "maybe"),
        ]));
        assert_eq!(config, ApiConfig::default());
    }

    #[test]
    fn resolve_handles_relative_and_absolute_links() {
        let config = ApiConfig::default();
        assert_eq!(
            config.resolve("/uploads/abc_contract.pdf"),
            "http://localhost:8000/uploads/abc_contract.pdf"
        );
        assert_eq!(
            config.resolve("uploads/x.pdf"),
            "http://localhost:8000/uploads/x.pdf"
        );
        assert_eq!(
            config.resolve("https://cdn.example.com/x.pdf"),
            "https://cdn.example.com/x.pdf"
        );
    }

    #[test]
    fn progress_defaults() {
        let progress = ProgressConfig::default();
        assert_eq!((progress.step, progress.interval_ms, progress.ceiling), (5, 300, 90));
    }
}
