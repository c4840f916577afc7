// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! PNG and data URI encoding for signature images.
//!
//! Signatures travel as `data:image/png;base64,<payload>` strings. Decoding
//! also accepts a bare base64 payload and any image format the `image`
//! crate was built with.

use crate::error::EncodeError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;

/// Prefix of every data URI produced by this module.
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Encode a raster as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, EncodeError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Encode a raster as a PNG data URI.
pub fn encode_data_uri(image: &RgbaImage) -> Result<String, EncodeError> {
    let png = encode_png(image)?;
    Ok(format!("{}{}", PNG_DATA_URI_PREFIX, STANDARD.encode(png)))
}

/// Extract and decode the base64 payload of a data URI.
///
/// Everything up to the first comma is treated as the header; a string
/// without a comma is taken as a bare payload.
pub fn data_uri_bytes(text: &str) -> Result<Vec<u8>, EncodeError> {
    let payload = match text.split_once(',') {
        Some((_, payload)) => payload,
        None => text,
    };
    let payload = payload.trim();
    if payload.is_empty() {
        return Err(EncodeError::EmptyPayload);
    }
    Ok(STANDARD.decode(payload)?)
}

/// Decode image bytes into an RGBA raster.
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage, EncodeError> {
    if bytes.is_empty() {
        return Err(EncodeError::EmptyPayload);
    }
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}

/// Decode a data URI (or bare base64 payload) into an RGBA raster.
pub fn decode_data_uri(text: &str) -> Result<RgbaImage, EncodeError> {
    decode_image(&data_uri_bytes(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn sample() -> RgbaImage {
        let mut image = RgbaImage::new(9, 4);
        image.put_pixel(2, 1, Rgba([12, 34, 56, 255]));
        image.put_pixel(8, 3, Rgba([200, 0, 0, 90]));
        image
    }

    #[test]
    fn test_data_uri_has_png_prefix() {
        let uri = encode_data_uri(&sample()).unwrap();
        assert!(uri.starts_with(PNG_DATA_URI_PREFIX));
        assert!(uri.len() > PNG_DATA_URI_PREFIX.len());
    }

    #[test]
    fn test_decode_restores_pixels() {
        let uri = encode_data_uri(&sample()).unwrap();
        assert_eq!(decode_data_uri(&uri).unwrap(), sample());
    }

    #[test]
    fn test_decode_bare_payload() {
        let uri = encode_data_uri(&sample()).unwrap();
        let bare = uri.trim_start_matches(PNG_DATA_URI_PREFIX);
        assert_eq!(decode_data_uri(bare).unwrap(), sample());
    }

    #[test]
    fn test_payload_bytes_match_png() {
        let png = encode_png(&sample()).unwrap();
        let uri = encode_data_uri(&sample()).unwrap();
        assert_eq!(data_uri_bytes(&uri).unwrap(), png);
    }

    #[test]
    fn test_empty_payload_rejected() {
        assert!(matches!(
            data_uri_bytes("data:image/png;base64,"),
            Err(EncodeError::EmptyPayload)
        ));
        assert!(matches!(decode_image(&[]), Err(EncodeError::EmptyPayload)));
    }

    #[test]
    fn test_invalid_base64_rejected() {
        assert!(matches!(
            decode_data_uri("data:image/png;base64,@@not-base64@@"),
            Err(EncodeError::Base64(_))
        ));
    }

    #[test]
    fn test_non_image_payload_rejected() {
        let uri = format!("{}{}", PNG_DATA_URI_PREFIX, STANDARD.encode(b"hello world"));
        assert!(matches!(decode_data_uri(&uri), Err(EncodeError::Image(_))));
    }
}
