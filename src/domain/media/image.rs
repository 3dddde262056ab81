//! Base64 image payloads.
//!
//! Clients send images as base64 strings, optionally wrapped in a
//! `data:<mime>;base64,` URL. Each entry is decoded and sniffed by its
//! magic bytes; anything that is not JPEG, PNG, GIF or WebP is rejected
//! with the index of the offending entry.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use thiserror::Error;
use uuid::Uuid;

/// Standard alphabet, padding optional.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Maximum number of images accepted in one upload request.
pub const MAX_IMAGES_PER_REQUEST: usize = 10;

/// Image formats accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Webp,
}

impl ImageFormat {
    /// Detects the format from the leading bytes of a file.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(ImageFormat::Jpeg)
        } else if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
            Some(ImageFormat::Png)
        } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            Some(ImageFormat::Gif)
        } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            Some(ImageFormat::Webp)
        } else {
            None
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Png => "png",
            ImageFormat::Gif => "gif",
            ImageFormat::Webp => "webp",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Webp => "image/webp",
        }
    }
}

/// A decoded image ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
}

impl DecodedImage {
    /// Object key for this image: `{area}/{owner}/{uuid}.{ext}`.
    pub fn object_key(&self, area: &str, owner: impl std::fmt::Display) -> String {
        format!(
            "{}/{}/{}.{}",
            area,
            owner,
            Uuid::new_v4(),
            self.format.extension()
        )
    }
}

/// Errors raised while decoding an image batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    #[error("at least one image is required")]
    Empty,

    #[error("at most {max} images may be uploaded at once, got {actual}")]
    TooMany { max: usize, actual: usize },

    #[error("image at index {index} is not valid base64")]
    NotBase64 { index: usize },

    #[error("image at index {index} is not a supported image (expected JPEG, PNG, GIF or WebP)")]
    UnsupportedFormat { index: usize },
}

impl ImageError {
    /// Index of the failing entry, if the error concerns one entry.
    pub fn index(&self) -> Option<usize> {
        match self {
            ImageError::NotBase64 { index } | ImageError::UnsupportedFormat { index } => {
                Some(*index)
            }
            ImageError::Empty | ImageError::TooMany { .. } => None,
        }
    }
}

/// Decodes one base64 image. `index` is only used for error reporting.
pub fn decode_image(index: usize, encoded: &str) -> Result<DecodedImage, ImageError> {
    let body = strip_data_url(encoded.trim());
    let compact: String = body.chars().filter(|c| !c.is_ascii_whitespace()).collect();

    let bytes = LENIENT_BASE64
        .decode(compact.as_bytes())
        .map_err(|_| ImageError::NotBase64 { index })?;

    let format = ImageFormat::sniff(&bytes).ok_or(ImageError::UnsupportedFormat { index })?;

    Ok(DecodedImage { bytes, format })
}

/// Decodes every entry, failing on the first bad one.
pub fn decode_images(encoded: &[String]) -> Result<Vec<DecodedImage>, ImageError> {
    if encoded.is_empty() {
        return Err(ImageError::Empty);
    }
    if encoded.len() > MAX_IMAGES_PER_REQUEST {
        return Err(ImageError::TooMany {
            max: MAX_IMAGES_PER_REQUEST,
            actual: encoded.len(),
        });
    }

    encoded
        .iter()
        .enumerate()
        .map(|(index, entry)| decode_image(index, entry))
        .collect()
}

fn strip_data_url(s: &str) -> &str {
    if s.starts_with("data:") {
        if let Some((_, payload)) = s.split_once(";base64,") {
            return payload;
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;

    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 13];
    const JPEG_HEADER: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

    fn encode(bytes: &[u8]) -> String {
        STANDARD.encode(bytes)
    }

    #[test]
    fn decodes_png() {
        let image = decode_image(0, &encode(PNG_HEADER)).unwrap();
        assert_eq!(image.format, ImageFormat::Png);
        assert_eq!(image.bytes, PNG_HEADER);
    }

    #[test]
    fn decodes_data_url() {
        let data_url = format!("data:image/jpeg;base64,{}", encode(JPEG_HEADER));
        let image = decode_image(0, &data_url).unwrap();
        assert_eq!(image.format, ImageFormat::Jpeg);
    }

    #[test]
    fn tolerates_missing_padding_and_line_breaks() {
        let encoded = encode(PNG_HEADER);
        let unpadded = encoded.trim_end_matches('=');
        let wrapped = format!("{}\n{}", &unpadded[..8], &unpadded[8..]);
        assert!(decode_image(0, &wrapped).is_ok());
    }

    #[test]
    fn sniffs_gif_and_webp() {
        assert_eq!(ImageFormat::sniff(b"GIF89a...."), Some(ImageFormat::Gif));
        assert_eq!(
            ImageFormat::sniff(b"RIFF\x10\x00\x00\x00WEBPVP8 "),
            Some(ImageFormat::Webp)
        );
        assert_eq!(ImageFormat::sniff(b"%PDF-1.7"), None);
    }

    #[test]
    fn non_base64_entry_names_its_index() {
        let batch = vec![encode(PNG_HEADER), "not base64 !!!".to_string()];
        let err = decode_images(&batch).unwrap_err();

        assert_eq!(err, ImageError::NotBase64 { index: 1 });
        assert_eq!(err.to_string(), "image at index 1 is not valid base64");
    }

    #[test]
    fn non_image_entry_names_its_index() {
        let batch = vec![encode(b"just some text, not an image")];
        let err = decode_images(&batch).unwrap_err();

        assert_eq!(err, ImageError::UnsupportedFormat { index: 0 });
        assert!(err.to_string().contains("index 0"));
    }

    #[test]
    fn empty_batch_is_rejected() {
        assert_eq!(decode_images(&[]).unwrap_err(), ImageError::Empty);
    }

    #[test]
    fn oversized_batch_is_rejected() {
        let batch = vec![encode(PNG_HEADER); MAX_IMAGES_PER_REQUEST + 1];
        assert!(matches!(
            decode_images(&batch),
            Err(ImageError::TooMany { .. })
        ));
    }

    #[test]
    fn object_key_has_area_owner_and_extension() {
        let image = decode_image(0, &encode(PNG_HEADER)).unwrap();
        let key = image.object_key("measurements", "owner-1");

        assert!(key.starts_with("measurements/owner-1/"));
        assert!(key.ends_with(".png"));
    }
}
