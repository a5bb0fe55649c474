use std::io::Cursor;

use crate::application::ports::{CaptureError, Screenshot};
use crate::domain::ImageFormat;

/// Reads the dimensions of a PNG capture and re-encodes it when another format is asked for.
pub(super) fn encode_screenshot(png: &[u8], format: ImageFormat) -> Result<Screenshot, CaptureError> {
    let image = image::load_from_memory_with_format(png, image::ImageFormat::Png)
        .map_err(|e| CaptureError::Render(format!("unreadable screenshot: {e}")))?;
    let (width, height) = (image.width(), image.height());

    let data = match format {
        ImageFormat::Png => png.to_vec(),
        ImageFormat::Jpeg => {
            let mut jpeg_bytes: Vec<u8> = Vec::new();
            image
                .to_rgb8()
                .write_to(&mut Cursor::new(&mut jpeg_bytes), image::ImageFormat::Jpeg)
                .map_err(|e| CaptureError::Render(format!("JPEG encode failed: {e}")))?;
            jpeg_bytes
        }
    };

    Ok(Screenshot {
        data,
        width,
        height,
        format,
    })
}

/// Solid-colour PNG used by the fake renderer.
pub(super) fn blank_png(width: u32, height: u32) -> Result<Vec<u8>, CaptureError> {
    let canvas = image::RgbImage::from_pixel(width.max(1), height.max(1), image::Rgb([245, 245, 245]));
    let mut png_bytes: Vec<u8> = Vec::new();
    canvas
        .write_to(&mut Cursor::new(&mut png_bytes), image::ImageFormat::Png)
        .map_err(|e| CaptureError::Render(format!("PNG encode failed: {e}")))?;
    Ok(png_bytes)
}
