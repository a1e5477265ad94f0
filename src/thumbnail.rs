//! Embedded thumbnail decoding
//!
//! Instruction files carry their preview image as base64 text spread over
//! consecutive comment lines. The scanner strips the comment markers and
//! concatenates the payload; this module turns that text back into bytes
//! and asks an [`ImageDecoder`] whether the bytes are a usable image.

use crate::error::Result;
use crate::model::Thumbnail;
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};

/// What an image decoder learned about a byte buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    /// Container format, as a lowercase file extension (e.g. "png")
    pub format: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// Checks that a byte buffer holds a readable image
pub trait ImageDecoder: Send + Sync {
    /// Decode `data`, failing if it is not a supported image
    fn decode(&self, data: &[u8]) -> Result<ImageInfo>;
}

/// Default decoder backed by the `image` crate (PNG and JPEG)
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterDecoder;

impl ImageDecoder for RasterDecoder {
    fn decode(&self, data: &[u8]) -> Result<ImageInfo> {
        let format = image::guess_format(data)?;
        let decoded = image::load_from_memory_with_format(data, format)?;
        Ok(ImageInfo {
            format: format
                .extensions_str()
                .first()
                .copied()
                .unwrap_or("bin")
                .to_string(),
            width: decoded.width(),
            height: decoded.height(),
        })
    }
}

/// Decode a concatenated base64 payload into a thumbnail
///
/// Fails without producing anything if the text is not valid base64 or the
/// bytes are rejected by `decoder`.
pub fn decode_thumbnail(encoded: &str, decoder: &dyn ImageDecoder) -> Result<Thumbnail> {
    let data = BASE64.decode(encoded.trim())?;
    let info = decoder.decode(&data)?;
    Ok(Thumbnail {
        data,
        format: info.format,
        width: info.width,
        height: info.height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([200, 40, 40]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_decode_valid_png() {
        let png = png_bytes(3, 2);
        let encoded = BASE64.encode(&png);

        let thumb = decode_thumbnail(&encoded, &RasterDecoder).unwrap();
        assert_eq!(thumb.data, png);
        assert_eq!(thumb.format, "png");
        assert_eq!((thumb.width, thumb.height), (3, 2));
    }

    #[test]
    fn test_invalid_base64_fails() {
        let err = decode_thumbnail("not base64 at all!", &RasterDecoder).unwrap_err();
        assert!(matches!(err, Error::Base64(_)));
    }

    #[test]
    fn test_valid_base64_but_not_an_image_fails() {
        let encoded = BASE64.encode(b"plain text, not pixels");
        let err = decode_thumbnail(&encoded, &RasterDecoder).unwrap_err();
        assert!(matches!(err, Error::Image(_)));
    }

    #[test]
    fn test_truncated_png_fails() {
        let png = png_bytes(4, 4);
        let encoded = BASE64.encode(&png[..png.len() / 2]);
        assert!(decode_thumbnail(&encoded, &RasterDecoder).is_err());
    }
}
