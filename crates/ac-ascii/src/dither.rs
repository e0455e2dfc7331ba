//! Tramage ordonné (Ordered Dithering) sur la luminance normalisée.

use ac_core::color::clamp_unit;

/// Matrice de Bayer 4x4. Normalisée sur 16 niveaux (0-15).
pub const BAYER_4X4: [[u8; 4]; 4] = [[0, 8, 2, 10], [12, 4, 14, 6], [3, 11, 1, 9], [15, 7, 13, 5]];

/// Amplitude fixe de la perturbation.
pub const DITHER_AMOUNT: f32 = 0.2;

/// Seuil normalisé `BAYER_4X4[y % 4][x % 4] / 16` pour la position (x, y).
#[inline(always)]
#[must_use]
pub fn threshold(x: u32, y: u32) -> f32 {
    f32::from(BAYER_4X4[(y % 4) as usize][(x % 4) as usize]) / 16.0
}

/// Perturb `brightness` by the Bayer threshold at the sample coordinates.
///
/// `clamp(brightness + (threshold - 0.5) * DITHER_AMOUNT, 0, 1)`.
///
/// # Example
/// ```
/// use ac_ascii::dither::apply_bayer_4x4;
/// assert!((apply_bayer_4x4(1.0, 0, 0) - 0.9).abs() < 1e-6);
/// assert!((apply_bayer_4x4(1.0, 1, 1) - 0.95).abs() < 1e-6);
/// ```
#[inline(always)]
#[must_use]
pub fn apply_bayer_4x4(brightness: f32, x: u32, y: u32) -> f32 {
    clamp_unit(brightness + (threshold(x, y) - 0.5) * DITHER_AMOUNT)
}
