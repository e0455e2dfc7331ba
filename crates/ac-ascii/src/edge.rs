use ac_core::color::clamp_channel;
use ac_core::frame::RasterImage;

use crate::convolve::{Neighborhood, SOBEL_X, SOBEL_Y};

/// Unweighted channel average used as the edge detector's luminance.
#[inline(always)]
#[must_use]
pub fn mean_gray(p: [u8; 4]) -> f32 {
    (f32::from(p[0]) + f32::from(p[1]) + f32::from(p[2])) / 3.0
}

/// Compute Sobel gradient components over a luminance window.
///
/// Returns (gx, gy).
#[inline]
#[must_use]
pub fn gradient(nb: &Neighborhood) -> (f32, f32) {
    (nb.convolve(&SOBEL_X), nb.convolve(&SOBEL_Y))
}

/// Gradient magnitude, saturated at 255.
///
/// # Example
/// ```
/// use ac_ascii::edge::magnitude;
/// assert_eq!(magnitude(3.0, 4.0), 5.0);
/// assert_eq!(magnitude(1000.0, 0.0), 255.0);
/// ```
#[inline(always)]
#[must_use]
pub fn magnitude(gx: f32, gy: f32) -> f32 {
    (gx * gx + gy * gy).sqrt().min(255.0)
}

/// Replace `img` by its grayscale Sobel edge map.
///
/// Interior pixels get the gradient magnitude in R, G and B with alpha 255.
/// The outermost row and column on every side are forced to opaque black.
///
/// # Example
/// ```
/// use ac_core::frame::RasterImage;
/// use ac_ascii::edge::detect_edges;
///
/// let mut img = RasterImage::filled(4, 4, [200, 200, 200, 255]);
/// detect_edges(&mut img);
/// assert_eq!(img.pixel(0, 0), [0, 0, 0, 255]);
/// assert_eq!(img.pixel(1, 1), [0, 0, 0, 255]); // flat image, no gradient
/// ```
pub fn detect_edges(img: &mut RasterImage) {
    let src = img.clone();
    let (w, h) = (img.width(), img.height());
    for y in 0..h {
        for x in 0..w {
            let out = match Neighborhood::gather(&src, x, y, mean_gray) {
                Some(nb) => {
                    let (gx, gy) = gradient(&nb);
                    let m = clamp_channel(magnitude(gx, gy));
                    [m, m, m, 255]
                }
                None => [0, 0, 0, 255],
            };
            img.set_pixel(x, y, out);
        }
    }
}
