// SPDX-FileCopyrightText: 2026 Prachar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Logo compositing onto generated base images.
//!
//! Pure CPU work, no network. The logo is scaled to 12% of the base width,
//! placed at a caller-selected corner with 4% padding, and given a soft drop
//! shadow. The base image's pixel dimensions are always preserved, and a
//! logo that fails to decode falls back to the unmodified base.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};
use tracing::warn;

/// Logo width as a fraction of the base image width.
const LOGO_WIDTH_FRACTION: f32 = 0.12;
/// Corner padding as a fraction of the base image width.
const PADDING_FRACTION: f32 = 0.04;
/// Shadow offset in pixels.
const SHADOW_OFFSET: i64 = 2;
/// Shadow blur radius (gaussian sigma).
const SHADOW_SIGMA: f32 = 3.0;
/// Shadow opacity applied to the logo's alpha.
const SHADOW_ALPHA: u16 = 128;

/// Placement corner for the composited logo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

/// Composite a base64-encoded logo (optionally a `data:` URL) onto a base
/// image. Any decode failure returns the base unchanged.
pub fn composite_logo_b64(base: &DynamicImage, logo_b64: &str, corner: Corner) -> DynamicImage {
    // tolerate "data:image/png;base64,...." wrappers
    let encoded = logo_b64.rsplit(',').next().unwrap_or(logo_b64);
    match BASE64.decode(encoded.trim()) {
        Ok(bytes) => composite_logo(base, &bytes, corner),
        Err(e) => {
            warn!(error = %e, "logo is not valid base64, skipping compositing");
            base.clone()
        }
    }
}

/// Composite an encoded logo image onto a base image. A logo that fails to
/// decode returns the base unchanged.
pub fn composite_logo(base: &DynamicImage, logo_bytes: &[u8], corner: Corner) -> DynamicImage {
    match image::load_from_memory(logo_bytes) {
        Ok(logo) => composite_images(base, &logo, corner),
        Err(e) => {
            warn!(error = %e, "logo failed to decode, skipping compositing");
            base.clone()
        }
    }
}

/// Composite a decoded logo onto a base image.
pub fn composite_images(base: &DynamicImage, logo: &DynamicImage, corner: Corner) -> DynamicImage {
    let (base_w, base_h) = base.dimensions();

    let logo_w = ((base_w as f32) * LOGO_WIDTH_FRACTION).round().max(1.0) as u32;
    let scale = logo_w as f32 / logo.width().max(1) as f32;
    let logo_h = ((logo.height() as f32) * scale).round().max(1.0) as u32;
    let scaled = logo
        .resize_exact(logo_w, logo_h, FilterType::Lanczos3)
        .to_rgba8();

    let padding = ((base_w as f32) * PADDING_FRACTION).round() as u32;
    let (x, y) = placement(corner, base_w, base_h, logo_w, logo_h, padding);

    let mut canvas = base.to_rgba8();

    // Shadow: the logo's alpha silhouette, darkened, blurred, and offset.
    let mut shadow = RgbaImage::new(logo_w, logo_h);
    for (sx, sy, pixel) in scaled.enumerate_pixels() {
        let alpha = (pixel.0[3] as u16 * SHADOW_ALPHA / 255) as u8;
        shadow.put_pixel(sx, sy, Rgba([0, 0, 0, alpha]));
    }
    let shadow = imageops::blur(&shadow, SHADOW_SIGMA);
    imageops::overlay(
        &mut canvas,
        &shadow,
        x as i64 + SHADOW_OFFSET,
        y as i64 + SHADOW_OFFSET,
    );
    imageops::overlay(&mut canvas, &scaled, x as i64, y as i64);

    DynamicImage::ImageRgba8(canvas)
}

/// Top-left coordinates for the logo at the requested corner.
fn placement(
    corner: Corner,
    base_w: u32,
    base_h: u32,
    logo_w: u32,
    logo_h: u32,
    padding: u32,
) -> (u32, u32) {
    let right = base_w.saturating_sub(logo_w + padding);
    let bottom = base_h.saturating_sub(logo_h + padding);
    match corner {
        Corner::TopLeft => (padding, padding),
        Corner::TopRight => (right, padding),
        Corner::BottomLeft => (padding, bottom),
        Corner::BottomRight => (right, bottom),
    }
}
