use base64::Engine as _;

use crate::foundation::config::Settings;
use crate::foundation::error::{FramemarkError, FramemarkResult};
use crate::render::raster::FrameRGBA;

const DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

/// Encode `frame` as a JPEG data URL, downscaled to at most `max_width` pixels wide.
pub fn jpeg_data_url(frame: &FrameRGBA, quality: u8, max_width: u32) -> FramemarkResult<String> {
    let rgba = frame.to_rgba_image()?;
    let rgb = image::DynamicImage::ImageRgba8(rgba).to_rgb8();
    let rgb = if max_width > 0 && rgb.width() > max_width {
        let height = ((u64::from(rgb.height()) * u64::from(max_width)) / u64::from(rgb.width()))
            .max(1) as u32;
        image::imageops::thumbnail(&rgb, max_width, height)
    } else {
        rgb
    };

    let mut jpeg = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg, quality.clamp(1, 100))
        .encode_image(&rgb)
        .map_err(|e| FramemarkError::render(format!("encode thumbnail: {e}")))?;

    let mut url = String::with_capacity(DATA_URL_PREFIX.len() + jpeg.len() * 4 / 3 + 4);
    url.push_str(DATA_URL_PREFIX);
    base64::engine::general_purpose::STANDARD.encode_string(&jpeg, &mut url);
    Ok(url)
}

/// [`jpeg_data_url`] with quality and width from `settings`.
pub fn thumbnail_for(frame: &FrameRGBA, settings: &Settings) -> FramemarkResult<String> {
    jpeg_data_url(frame, settings.thumbnail_quality, settings.thumbnail_max_width)
}
