//! QR code rendering to PNG.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Luma};
use qrcode::{EcLevel, QrCode};

use crate::config::QrConfig;
use waymark_common::{QrEcLevel, WaymarkError};

/// Render `url` as a black-on-white PNG with a 4-module quiet zone.
///
/// Output is deterministic for a given URL and config.
pub fn render_qr(url: &str, config: &QrConfig) -> Result<Vec<u8>, WaymarkError> {
    let code = QrCode::with_error_correction_level(url.as_bytes(), ec_level(config.error_correction))
        .map_err(|e| WaymarkError::Render(format!("{}: {}", url, e)))?;

    let image = code
        .render::<Luma<u8>>()
        .module_dimensions(config.module_size, config.module_size)
        .quiet_zone(true)
        .build();

    let mut png = Vec::new();
    DynamicImage::ImageLuma8(image)
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| WaymarkError::Render(e.to_string()))?;

    Ok(png)
}

fn ec_level(level: QrEcLevel) -> EcLevel {
    match level {
        QrEcLevel::L => EcLevel::L,
        QrEcLevel::M => EcLevel::M,
        QrEcLevel::Q => EcLevel::Q,
        QrEcLevel::H => EcLevel::H,
    }
}
