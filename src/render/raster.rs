use std::sync::Arc;

use anyhow::Context;
use base64::Engine as _;

use crate::drawing::color::Rgba8;
use crate::foundation::core::{Canvas, Rgba8Premul};
use crate::foundation::error::{FramemarkError, FramemarkResult};
use crate::foundation::math::Fnv1a64;

/// The frozen video frame annotations are drawn over, as premultiplied RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseRaster {
    pub width: u32,
    pub height: u32,
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl BaseRaster {
    /// Decode encoded image bytes (PNG, JPEG, ...).
    pub fn decode(bytes: &[u8]) -> FramemarkResult<Self> {
        let dyn_img = image::load_from_memory(bytes).context("decode base raster")?;
        let rgba = dyn_img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba8_straight(width, height, rgba.into_raw())
    }

    /// Decode a `data:<mime>;base64,<payload>` URL, as frames are handed over by players.
    pub fn from_data_url(url: &str) -> FramemarkResult<Self> {
        let (header, payload) = url
            .split_once(',')
            .ok_or_else(|| FramemarkError::validation("data url is missing ',' separator"))?;
        if !header.starts_with("data:") || !header.ends_with(";base64") {
            return Err(FramemarkError::validation(
                "only base64 data urls are supported",
            ));
        }
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(payload.trim())
            .context("decode data url payload")?;
        Self::decode(&bytes)
    }

    pub fn from_rgba8_straight(width: u32, height: u32, mut rgba: Vec<u8>) -> FramemarkResult<Self> {
        if rgba.len() != Canvas::new(width, height).byte_len() {
            return Err(FramemarkError::validation(
                "base raster byte length does not match width*height*4",
            ));
        }
        premultiply_rgba8_in_place(&mut rgba);
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba),
        })
    }

    /// A uniformly colored raster.
    pub fn solid(width: u32, height: u32, color: Rgba8) -> Self {
        let px = Rgba8Premul::from_straight_rgba(color.r, color.g, color.b, color.a).to_array();
        Self {
            width,
            height,
            rgba8_premul: Arc::new(px.repeat((width as usize) * (height as usize))),
        }
    }

    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }
}

/// A rendered composite.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    pub(crate) fn from_base(base: &BaseRaster) -> Self {
        Self {
            width: base.width,
            height: base.height,
            data: base.rgba8_premul.as_ref().clone(),
            premultiplied: true,
        }
    }

    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }

    /// Premultiplied RGBA at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]])
    }

    /// Stable content hash of the frame.
    pub fn digest(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        h.write_u32(self.width);
        h.write_u32(self.height);
        h.write_bytes(&self.data);
        h.finish()
    }

    /// Straight-alpha RGBA8 copy, as image encoders expect.
    pub fn to_rgba8_straight(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut out);
        }
        out
    }

    pub fn to_rgba_image(&self) -> FramemarkResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.to_rgba8_straight())
            .ok_or_else(|| FramemarkError::render("frame byte length mismatch"))
    }
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
