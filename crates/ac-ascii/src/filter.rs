//! Stack de filtres sur le buffer RGBA de travail.
//!
//! Order is fixed: tone → sharpen → blur → edges. Each stage is skipped at
//! its neutral value and clamps RGB into [0, 255] on the way out.

use ac_core::color::clamp_channel;
use ac_core::config::FilterConfig;
use ac_core::frame::RasterImage;

use crate::convolve::{Neighborhood, SHARPEN, clamp_coord, gaussian_kernel};
use crate::edge::detect_edges;

/// Run every enabled stage of `filters` over `img`, in place.
///
/// # Example
/// ```
/// use ac_core::config::FilterConfig;
/// use ac_core::frame::RasterImage;
/// use ac_ascii::filter::apply_filters;
///
/// let mut img = RasterImage::filled(3, 3, [100, 100, 100, 255]);
/// let filters = FilterConfig { brightness: 2.0, ..FilterConfig::default() };
/// apply_filters(&mut img, &filters);
/// assert_eq!(img.rgb(0, 0), (200, 200, 200));
/// ```
#[allow(clippy::float_cmp)]
pub fn apply_filters(img: &mut RasterImage, filters: &FilterConfig) {
    if filters.brightness != 1.0 || filters.contrast != 1.0 {
        log::trace!(
            "filtre tonal : luminosité {} contraste {}",
            filters.brightness,
            filters.contrast
        );
        adjust_tone(img, filters.brightness, filters.contrast);
    }
    if filters.sharpen_amount > 0.0 {
        log::trace!("renforcement : {}", filters.sharpen_amount);
        sharpen(img, filters.sharpen_amount);
    }
    if filters.blur_radius > 0.0 {
        log::trace!("flou : rayon {}", filters.blur_radius);
        blur(img, filters.blur_radius);
    }
    if filters.edge_detection {
        log::trace!("détection de contours");
        detect_edges(img);
    }
}

/// `v' = clamp(((v * brightness) - 128) * contrast + 128, 0, 255)` on R, G, B.
///
/// Alpha is left as is.
pub fn adjust_tone(img: &mut RasterImage, brightness: f32, contrast: f32) {
    for px in img.data_mut().chunks_exact_mut(4) {
        for c in &mut px[..3] {
            let v = f32::from(*c);
            *c = clamp_channel(((v * brightness) - 128.0) * contrast + 128.0);
        }
    }
}

/// Blend each interior pixel with its [`SHARPEN`] convolution by `amount`.
///
/// `result = clamp(original + (convolved - original) * amount, 0, 255)` per
/// RGB channel. Border pixels keep their value since the kernel needs a full
/// 3×3 window. `amount <= 0` leaves the buffer untouched.
pub fn sharpen(img: &mut RasterImage, amount: f32) {
    if amount <= 0.0 {
        return;
    }
    let src = img.clone();
    for y in 0..img.height() {
        for x in 0..img.width() {
            let mut out = src.pixel(x, y);
            for (c, slot) in out.iter_mut().take(3).enumerate() {
                let Some(nb) = Neighborhood::gather(&src, x, y, |p| f32::from(p[c])) else {
                    break;
                };
                let original = nb.center();
                *slot = clamp_channel(original + (nb.convolve(&SHARPEN) - original) * amount);
            }
            img.set_pixel(x, y, out);
        }
    }
}

/// Separable Gaussian blur with standard deviation `radius` pixels.
///
/// Samples outside the canvas reuse the nearest edge pixel, so edges blur
/// without darkening. All four channels are blurred.
pub fn blur(img: &mut RasterImage, radius: f32) {
    if radius <= 0.0 || img.width() == 0 || img.height() == 0 {
        return;
    }
    let taps = gaussian_kernel(radius);
    let half = (taps.len() / 2) as i64;
    let (w, h) = (img.width(), img.height());

    let mut horizontal = vec![0.0f32; img.data().len()];
    {
        let src = img.data();
        for y in 0..h {
            for x in 0..w {
                let mut acc = [0.0f32; 4];
                for (k, weight) in taps.iter().enumerate() {
                    let sx = clamp_coord(i64::from(x) + k as i64 - half, w);
                    let i = (y as usize * w as usize + sx as usize) * 4;
                    for (a, v) in acc.iter_mut().zip(&src[i..i + 4]) {
                        *a += f32::from(*v) * weight;
                    }
                }
                let o = (y as usize * w as usize + x as usize) * 4;
                horizontal[o..o + 4].copy_from_slice(&acc);
            }
        }
    }

    let dst = img.data_mut();
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0.0f32; 4];
            for (k, weight) in taps.iter().enumerate() {
                let sy = clamp_coord(i64::from(y) + k as i64 - half, h);
                let i = (sy as usize * w as usize + x as usize) * 4;
                for (a, v) in acc.iter_mut().zip(&horizontal[i..i + 4]) {
                    *a += v * weight;
                }
            }
            let o = (y as usize * w as usize + x as usize) * 4;
            for (d, a) in dst[o..o + 4].iter_mut().zip(acc) {
                *d = clamp_channel(a);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_image(w: u32, h: u32) -> RasterImage {
        let mut img = RasterImage::new(w, h);
        for y in 0..h {
            for x in 0..w {
                let v = ((x * 37 + y * 91) % 256) as u8;
                img.set_pixel(x, y, [v, 255 - v, v / 2, 255]);
            }
        }
        img
    }

    #[test]
    fn neutral_config_is_noop() {
        let mut img = gradient_image(8, 6);
        let before = img.clone();
        apply_filters(&mut img, &FilterConfig::default());
        assert_eq!(img, before);
    }

    #[test]
    fn tone_formula_applies_brightness_then_contrast() {
        let mut img = RasterImage::filled(1, 1, [100, 200, 10, 77]);
        adjust_tone(&mut img, 1.1, 1.5);
        // 100*1.1=110 → (110-128)*1.5+128 = 101
        // 200*1.1=220 → 266 → 255
        // 10*1.1=11 → -47.5 → 0
        assert_eq!(img.pixel(0, 0), [101, 255, 0, 77]);
    }

    #[test]
    fn sharpen_zero_is_bit_identical() {
        let mut img = gradient_image(9, 7);
        let before = img.clone();
        sharpen(&mut img, 0.0);
        assert_eq!(img.data(), before.data());
        let filters = FilterConfig {
            sharpen_amount: 0.0,
            ..FilterConfig::default()
        };
        apply_filters(&mut img, &filters);
        assert_eq!(img.data(), before.data());
    }

    #[test]
    fn sharpen_leaves_border_and_alpha() {
        let mut img = gradient_image(6, 5);
        let before = img.clone();
        sharpen(&mut img, 1.0);
        for x in 0..6 {
            assert_eq!(img.pixel(x, 0), before.pixel(x, 0));
            assert_eq!(img.pixel(x, 4), before.pixel(x, 4));
        }
        for y in 0..5 {
            assert_eq!(img.pixel(0, y), before.pixel(0, y));
            assert_eq!(img.pixel(5, y), before.pixel(5, y));
            for x in 0..6 {
                assert_eq!(img.pixel(x, y)[3], 255);
            }
        }
    }

    #[test]
    fn sharpen_amplifies_isolated_spike() {
        let mut img = RasterImage::filled(3, 3, [100, 100, 100, 255]);
        img.set_pixel(1, 1, [120, 100, 80, 255]);
        sharpen(&mut img, 0.5);
        // R: conv = 5*120 - 400 = 200 → 120 + 80*0.5 = 160
        // G: conv = 100 → unchanged
        // B: conv = 5*80 - 400 = 0 → 80 - 80*0.5 = 40
        assert_eq!(img.pixel(1, 1), [160, 100, 40, 255]);
    }

    #[test]
    fn blur_preserves_uniform_image() {
        let mut img = RasterImage::filled(5, 4, [33, 66, 99, 255]);
        blur(&mut img, 2.5);
        for y in 0..4 {
            for x in 0..5 {
                assert_eq!(img.pixel(x, y), [33, 66, 99, 255]);
            }
        }
    }

    #[test]
    fn blur_spreads_a_point_and_keeps_order() {
        let mut img = RasterImage::filled(7, 7, [0, 0, 0, 255]);
        img.set_pixel(3, 3, [255, 255, 255, 255]);
        blur(&mut img, 1.0);
        let center = img.pixel(3, 3)[0];
        let near = img.pixel(4, 3)[0];
        let far = img.pixel(6, 3)[0];
        assert!(center < 255);
        assert!(center > near && near > far);
        assert_eq!(img.pixel(2, 3), img.pixel(4, 3));
    }

    #[test]
    fn blur_handles_single_pixel() {
        let mut img = RasterImage::filled(1, 1, [12, 34, 56, 78]);
        blur(&mut img, 3.0);
        assert_eq!(img.pixel(0, 0), [12, 34, 56, 78]);
    }

    #[test]
    fn edges_run_after_other_stages() {
        // Whatever the earlier stages produce, the final buffer is an
        // opaque grayscale edge map.
        let mut img = gradient_image(6, 6);
        let filters = FilterConfig {
            brightness: 3.0,
            contrast: 3.0,
            edge_detection: true,
            ..FilterConfig::default()
        };
        apply_filters(&mut img, &filters);
        for y in 0..6 {
            for x in 0..6 {
                let p = img.pixel(x, y);
                assert_eq!(p[3], 255);
                assert_eq!(p[0], p[1]);
                assert_eq!(p[1], p[2]);
            }
        }
    }
}
