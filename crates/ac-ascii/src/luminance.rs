//! Tone mapping: RGB → brightness scalar in [0, 1].

use ac_core::color::{Rgb, clamp_unit};

/// Poids perceptuels Rec. 601.
pub const WEIGHT_R: f32 = 0.299;
pub const WEIGHT_G: f32 = 0.587;
pub const WEIGHT_B: f32 = 0.114;

/// Grayscale-mode luma: `(0.299r + 0.587g + 0.114b) / 255`.
///
/// # Example
/// ```
/// use ac_ascii::luminance::luma;
/// assert!((luma((128, 128, 128)) - 0.50196).abs() < 1e-4);
/// ```
#[inline(always)]
#[must_use]
pub fn luma((r, g, b): Rgb) -> f32 {
    (WEIGHT_R * f32::from(r) + WEIGHT_G * f32::from(g) + WEIGHT_B * f32::from(b)) / 255.0
}

/// Color-mode perceptual RMS:
/// `sqrt(0.299 (r/255)² + 0.587 (g/255)² + 0.114 (b/255)²)`.
///
/// Saturated colors read lighter than under [`luma`].
///
/// # Example
/// ```
/// use ac_ascii::luminance::{luma, perceptual_rms};
/// assert!(perceptual_rms((255, 0, 0)) > luma((255, 0, 0)));
/// ```
#[inline(always)]
#[must_use]
pub fn perceptual_rms((r, g, b): Rgb) -> f32 {
    let r = f32::from(r) / 255.0;
    let g = f32::from(g) / 255.0;
    let b = f32::from(b) / 255.0;
    (WEIGHT_R * r * r + WEIGHT_G * g * g + WEIGHT_B * b * b).sqrt()
}

/// Brightness of `rgb` in [0, 1], using [`luma`] or [`perceptual_rms`].
#[inline(always)]
#[must_use]
pub fn tone_map(rgb: Rgb, grayscale: bool) -> f32 {
    clamp_unit(if grayscale {
        luma(rgb)
    } else {
        perceptual_rms(rgb)
    })
}

/// `1 - b`, applied after dithering and before glyph selection.
#[inline(always)]
#[must_use]
pub fn invert(brightness: f32) -> f32 {
    clamp_unit(1.0 - brightness)
}
