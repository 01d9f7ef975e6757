use async_trait::async_trait;
use bytes::Bytes;
use log::{debug, info};

use super::ImageLoader;
use crate::error::MapError;

/// Loads images over HTTP from the heatmap server.
///
/// Relative urls (starting with `/`) are resolved against the base url given at construction.
#[derive(Debug, Clone)]
pub struct HttpImageLoader {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpImageLoader {
    /// Creates a new loader.
    pub fn new(base_url: impl Into<String>) -> Result<Self, MapError> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("wildfind-map/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn resolve(&self, url: &str) -> String {
        if url.starts_with('/') {
            format!("{}{url}", self.base_url)
        } else {
            url.to_string()
        }
    }
}

#[async_trait]
impl ImageLoader for HttpImageLoader {
    async fn load_bytes(&self, url: &str) -> Result<Bytes, MapError> {
        let url = self.resolve(url);
        debug!("Loading {url}");

        let response = self.http_client.get(&url).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            info!("Failed to load {url}: {status}");
            return Err(MapError::IO(format!("{url}: {status}")));
        }

        Ok(response.bytes().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_urls_use_base() {
        let loader = HttpImageLoader::new("http://localhost:12015/").unwrap();
        assert_eq!(
            loader.resolve("/heatmap.png?a=1"),
            "http://localhost:12015/heatmap.png?a=1"
        );
        assert_eq!(
            loader.resolve("http://example.com/a.png"),
            "http://example.com/a.png"
        );
    }
}
