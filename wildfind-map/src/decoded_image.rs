//! Raster images loaded into memory, such as the heatmap overlay.

use crate::error::MapError;

/// An image that has been loaded into memory.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    bytes: Vec<u8>,
    dimensions: (u32, u32),
}

impl DecodedImage {
    /// Decode an image from a byte slice.
    ///
    /// Attempts to guess the format of the image from the data. Non-RGBA images will be converted
    /// to RGBA.
    pub fn decode(bytes: &[u8]) -> Result<Self, MapError> {
        let decoded = image::load_from_memory(bytes)?;
        let rgba = decoded.to_rgba8();
        let dimensions = rgba.dimensions();

        Ok(Self {
            bytes: rgba.into_raw(),
            dimensions,
        })
    }

    /// Creates an image from raw RGBA bytes.
    pub fn from_raw(bytes: Vec<u8>, width: u32, height: u32) -> Result<Self, MapError> {
        let expected = width as usize * height as usize * 4;
        if bytes.len() != expected {
            return Err(MapError::InvalidArgument(format!(
                "expected {expected} bytes for a {width}x{height} RGBA image, got {}",
                bytes.len()
            )));
        }

        Ok(Self {
            bytes,
            dimensions: (width, height),
        })
    }

    /// Raw bytes of the image, in RGBA order.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Width and height of the image in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn png_bytes() -> Vec<u8> {
        let image = image::RgbaImage::from_pixel(3, 2, image::Rgba([255, 96, 0, 128]));
        let mut bytes = std::io::Cursor::new(Vec::new());
        image
            .write_to(&mut bytes, image::ImageOutputFormat::Png)
            .unwrap();
        bytes.into_inner()
    }

    #[test]
    fn decodes_png() {
        let image = DecodedImage::decode(&png_bytes()).unwrap();
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.bytes().len(), 3 * 2 * 4);
        assert_eq!(&image.bytes()[0..4], &[255, 96, 0, 128]);
    }

    #[test]
    fn rejects_garbage() {
        assert_matches!(
            DecodedImage::decode(b"not an image"),
            Err(MapError::ImageDecode(_))
        );
    }

    #[test]
    fn from_raw_checks_length() {
        assert!(DecodedImage::from_raw(vec![0; 16], 2, 2).is_ok());
        assert_matches!(
            DecodedImage::from_raw(vec![0; 15], 2, 2),
            Err(MapError::InvalidArgument(_))
        );
    }
}
