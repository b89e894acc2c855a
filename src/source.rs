use std::future::Future;

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::error::{KmlTrackError, Result};

/// Where a track document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackSource {
    /// Fetched over HTTP (relative URLs resolve against the page).
    Url(String),
    /// KML text already in memory.
    Inline(String),
}

impl TrackSource {
    /// Resolve to the raw document text, fetching if needed.
    pub async fn resolve<F: DocumentFetcher>(&self, fetcher: &F) -> Result<String> {
        match self {
            Self::Url(url) => fetcher.fetch_text(url).await,
            Self::Inline(text) => Ok(text.clone()),
        }
    }
}

/// Retrieves the text of a document by URL.
pub trait DocumentFetcher {
    fn fetch_text(&self, url: &str) -> impl Future<Output = Result<String>>;
}

impl<T: DocumentFetcher + ?Sized> DocumentFetcher for &T {
    fn fetch_text(&self, url: &str) -> impl Future<Output = Result<String>> {
        (**self).fetch_text(url)
    }
}

/// `window.fetch` based fetcher. Only usable inside a browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserFetcher;

impl DocumentFetcher for BrowserFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        let fetch_error = |reason: &str| KmlTrackError::Fetch {
            url: url.to_string(),
            reason: reason.to_string(),
        };

        let Some(window) = web_sys::window() else {
            return Err(fetch_error("No window"));
        };

        let opts = web_sys::RequestInit::new();
        opts.set_method("GET");

        let request = web_sys::Request::new_with_str_and_init(url, &opts)
            .map_err(|_| fetch_error("Failed to create request"))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| fetch_error(&format!("{e:?}")))?;

        let resp: web_sys::Response = resp_value
            .dyn_into()
            .map_err(|_| fetch_error("Invalid response"))?;

        if !resp.ok() {
            return Err(KmlTrackError::HttpStatus {
                url: url.to_string(),
                status: resp.status(),
            });
        }

        let text = JsFuture::from(resp.text().map_err(|_| fetch_error("Failed to get text"))?)
            .await
            .map_err(|_| fetch_error("Failed to read body"))?;

        text.as_string()
            .ok_or_else(|| fetch_error("Response is not a string"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NeverFetch;

    impl DocumentFetcher for NeverFetch {
        async fn fetch_text(&self, url: &str) -> Result<String> {
            Err(KmlTrackError::Fetch {
                url: url.to_string(),
                reason: "offline".to_string(),
            })
        }
    }

    #[test]
    fn test_inline_source_skips_fetcher() {
        let source = TrackSource::Inline("<kml/>".to_string());
        let text = pollster::block_on(source.resolve(&NeverFetch)).unwrap();
        assert_eq!(text, "<kml/>");
    }

    #[test]
    fn test_url_source_uses_fetcher() {
        let source = TrackSource::Url("roads/1.kml".to_string());
        let err = pollster::block_on(source.resolve(&NeverFetch)).unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch 'roads/1.kml': offline");
    }
}
