use std::fmt::Display;
use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// Declared MIME type of an uploaded structure image. Only the formats the
/// upload surface accepts are representable.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ImageMime {
    Jpeg,
    Png,
}

impl ImageMime {
    // `.jpg` and `.jpeg` both declare image/jpeg
    pub fn from_path(path: &Path) -> Option<ImageMime> {
        let ext = path.extension()?.to_str()?;

        match ext.to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Some(ImageMime::Jpeg),
            "png" => Some(ImageMime::Png),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageMime::Jpeg => "image/jpeg",
            ImageMime::Png => "image/png",
        }
    }
}

impl Display for ImageMime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw image bytes plus their declared MIME type, as handed over by the
/// upload surface. The bytes are never decoded here.
#[derive(Debug, Clone)]
pub struct ImageAttachment {
    bytes: Vec<u8>,
    mime: ImageMime,
}

impl ImageAttachment {
    pub fn new(bytes: Vec<u8>, mime: ImageMime) -> ImageAttachment {
        ImageAttachment { bytes, mime }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn mime(&self) -> ImageMime {
        self.mime
    }

    // base64 payload for the wire's inline_data field
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }
}
