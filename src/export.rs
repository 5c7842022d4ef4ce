use std::io::Cursor;

use image::ImageFormat;

use crate::common::error::{QRError, QRResult};
use crate::render::Bitmap;

// Platform image
//------------------------------------------------------------------------------

/// Encoded image handed to the host for drag and save.
pub trait PlatformImage: Sized {
    const FORMAT: ImageFormat;

    fn from_bytes(bytes: Vec<u8>) -> Self;

    fn bytes(&self) -> &[u8];

    fn from_bitmap(bitmap: &Bitmap) -> QRResult<Self> {
        let mut buf = Cursor::new(Vec::new());
        bitmap.as_image().write_to(&mut buf, Self::FORMAT).map_err(|e| {
            log::error!("Failed to encode {:?} image: {e}", Self::FORMAT);
            QRError::ExportFailed
        })?;
        Ok(Self::from_bytes(buf.into_inner()))
    }

    fn mime_type(&self) -> &'static str {
        Self::FORMAT.to_mime_type()
    }

    fn extension(&self) -> &'static str {
        Self::FORMAT.extensions_str().first().copied().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngImage(Vec<u8>);

impl PlatformImage for PngImage {
    const FORMAT: ImageFormat = ImageFormat::Png;

    fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    fn bytes(&self) -> &[u8] {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TiffImage(Vec<u8>);

impl PlatformImage for TiffImage {
    const FORMAT: ImageFormat = ImageFormat::Tiff;

    fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    fn bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Image type the host pasteboard expects on this target.
#[cfg(target_os = "macos")]
pub type NativeImage = TiffImage;

#[cfg(not(target_os = "macos"))]
pub type NativeImage = PngImage;
