//! Loading of raster overlays.

use async_trait::async_trait;
use bytes::Bytes;

use crate::decoded_image::DecodedImage;
use crate::error::MapError;

#[cfg(feature = "native-loader")]
mod native;

#[cfg(feature = "native-loader")]
pub use native::HttpImageLoader;

/// Source of raw image data, addressed by URL.
#[async_trait]
pub trait ImageLoader: Send + Sync {
    /// Loads the raw (encoded) content of the url.
    async fn load_bytes(&self, url: &str) -> Result<Bytes, MapError>;

    /// Loads and decodes an image.
    async fn load_image(&self, url: &str) -> Result<DecodedImage, MapError> {
        let bytes = self.load_bytes(url).await?;
        DecodedImage::decode(&bytes)
    }
}
