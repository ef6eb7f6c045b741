//! Platform detection and browser/desktop resource helpers.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Web,
    Desktop,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_arch = "wasm32") {
            Self::Web
        } else {
            Self::Desktop
        }
    }
}

/// Run a future on the current component's scope. The task is cancelled when
/// that component unmounts.
pub fn spawn_future(fut: impl std::future::Future<Output = ()> + 'static) {
    dioxus::prelude::spawn(fut);
}

/// Directory for desktop settings and exported reports.
#[cfg(not(target_arch = "wasm32"))]
pub fn data_dir() -> Result<std::path::PathBuf, super::storage::StorageError> {
    directories::ProjectDirs::from("com", "ContractIntel", "ContractIntel")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            super::storage::StorageError::Unavailable("no home directory for app data".into())
        })
}

/// A URL the embedded PDF viewer can load for an in-memory file.
///
/// On the web this is an object URL that is revoked when the value drops, so
/// replacing or unmounting the preview releases the blob. Desktop builds use a
/// base64 `data:` URL, which owns nothing.
#[derive(Debug)]
pub struct DocumentUrl {
    url: String,
}

impl DocumentUrl {
    pub fn for_bytes(bytes: &[u8], mime: &str) -> Result<Self, String> {
        #[cfg(target_arch = "wasm32")]
        {
            use web_sys::{Blob, BlobPropertyBag, Url};

            let array = js_sys::Uint8Array::from(bytes);
            let parts = js_sys::Array::new();
            parts.push(&array.buffer());

            let opts = BlobPropertyBag::new();
            opts.set_type(mime);
            let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
                .map_err(|_| "Failed to create blob".to_string())?;
            let url = Url::create_object_url_with_blob(&blob)
                .map_err(|_| "Unable to create preview URL".to_string())?;
            Ok(Self { url })
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            use base64::{engine::general_purpose::STANDARD, Engine as _};

            Ok(Self {
                url: format!("data:{mime};base64,{}", STANDARD.encode(bytes)),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl PartialEq for DocumentUrl {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
    }
}

impl Drop for DocumentUrl {
    fn drop(&mut self) {
        #[cfg(target_arch = "wasm32")]
        {
            tracing::debug!("revoking preview URL");
            web_sys::Url::revoke_object_url(&self.url).ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_preview_is_a_data_url() {
        let url = DocumentUrl::for_bytes(b"%PDF-1.7", "application/pdf").unwrap();
        assert!(url.as_str().starts_with("data:application/pdf;base64,"));
        assert_eq!(Platform::current(), Platform::Desktop);
    }
}
