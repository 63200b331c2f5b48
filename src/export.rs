use std::fmt;
use std::str::FromStr;

use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ImageEncoder, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::error::{FrameError, FrameResult};
use crate::raster::Surface;

/// Largest accepted upload.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub const JPEG_QUALITY: u8 = 95;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    #[serde(alias = "jpeg")]
    Jpg,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpg => "jpg",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpg => "image/jpeg",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(ExportFormat::Png),
            "jpg" | "jpeg" => Ok(ExportFormat::Jpg),
            other => Err(format!("unknown export format '{other}' (expected png or jpg)")),
        }
    }
}

/// Decode an uploaded image into RGBA8, enforcing the upload limit.
pub fn decode(bytes: &[u8]) -> FrameResult<RgbaImage> {
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(FrameError::TooLarge {
            size: bytes.len(),
            limit: MAX_UPLOAD_BYTES,
        });
    }
    let format = image::guess_format(bytes)
        .map_err(|_| FrameError::UnsupportedFormat("not an image".into()))?;
    let img = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| FrameError::decode(e.to_string()))?;
    Ok(img.to_rgba8())
}

/// Decode a base64 payload, with or without a `data:` URL prefix.
pub fn decode_base64(payload: &str) -> FrameResult<RgbaImage> {
    let b64 = match payload.split_once(',') {
        Some((head, body)) if head.starts_with("data:") => {
            if !head.starts_with("data:image/") {
                return Err(FrameError::UnsupportedFormat(head.to_string()));
            }
            body
        }
        _ => payload,
    };
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(b64.trim())
        .map_err(|e| FrameError::decode(format!("invalid base64: {e}")))?;
    decode(&bytes)
}

/// Flatten straight-alpha RGBA onto white, as a JPEG viewer would show it.
fn flatten_on_white(rgba: &[u8]) -> Vec<u8> {
    rgba.chunks_exact(4)
        .flat_map(|p| {
            let a = p[3] as u32;
            let over = |c: u8| ((c as u32 * a + 255 * (255 - a) + 127) / 255) as u8;
            [over(p[0]), over(p[1]), over(p[2])]
        })
        .collect()
}

/// Encode the surface. PNG keeps alpha; JPEG is flattened onto white.
pub fn encode(surface: &Surface, format: ExportFormat) -> FrameResult<Vec<u8>> {
    let (w, h) = (surface.w as u32, surface.h as u32);
    let mut buf = Vec::new();
    match format {
        ExportFormat::Png => PngEncoder::new(&mut buf)
            .write_image(&surface.rgba, w, h, image::ExtendedColorType::Rgba8)
            .map_err(|e| FrameError::encode(e.to_string()))?,
        ExportFormat::Jpg => {
            let rgb = flatten_on_white(&surface.rgba);
            JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY)
                .write_image(&rgb, w, h, image::ExtendedColorType::Rgb8)
                .map_err(|e| FrameError::encode(e.to_string()))?
        }
    }
    Ok(buf)
}

pub fn data_url(bytes: &[u8], format: ExportFormat) -> String {
    let b64 = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{};base64,{}", format.mime(), b64)
}

/// Download name, stamped with milliseconds since the epoch.
pub fn file_name(format: ExportFormat, millis: u128) -> String {
    format!("kodak-frame-{}.{}", millis, format.extension())
}
