//! Petits noyaux de convolution et vue immuable sur un voisinage 3×3.

use ac_core::frame::RasterImage;

/// 3×3 integer kernel, row-major, indexed `[ky][kx]`.
pub type Kernel3 = [[i32; 3]; 3];

/// Noyau de renforcement (Laplacien + identité).
pub const SHARPEN: Kernel3 = [[0, -1, 0], [-1, 5, -1], [0, -1, 0]];

/// Sobel horizontal (réagit aux contours verticaux).
pub const SOBEL_X: Kernel3 = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];

/// Sobel vertical (réagit aux contours horizontaux).
pub const SOBEL_Y: Kernel3 = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

/// Immutable 3×3 window of scalar samples around an interior pixel.
///
/// # Example
/// ```
/// use ac_core::frame::RasterImage;
/// use ac_ascii::convolve::{Neighborhood, SHARPEN};
///
/// let img = RasterImage::filled(3, 3, [10, 20, 30, 255]);
/// let nb = Neighborhood::gather(&img, 1, 1, |p| f32::from(p[0])).unwrap();
/// assert!((nb.convolve(&SHARPEN) - 10.0).abs() < 1e-6);
/// assert!(Neighborhood::gather(&img, 0, 1, |p| f32::from(p[0])).is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neighborhood([[f32; 3]; 3]);

impl Neighborhood {
    /// Sample the 3×3 window centred on (x, y).
    ///
    /// Returns `None` when (x, y) lies on the 1-pixel border, where the
    /// window would leave the image.
    #[inline]
    pub fn gather(
        img: &RasterImage,
        x: u32,
        y: u32,
        sample: impl Fn([u8; 4]) -> f32,
    ) -> Option<Self> {
        if !is_interior(img.width(), img.height(), x, y) {
            return None;
        }
        let mut w = [[0.0f32; 3]; 3];
        for (ky, row) in w.iter_mut().enumerate() {
            for (kx, v) in row.iter_mut().enumerate() {
                *v = sample(img.pixel(x + kx as u32 - 1, y + ky as u32 - 1));
            }
        }
        Some(Self(w))
    }

    /// Sample at the centre of the window.
    #[inline(always)]
    #[must_use]
    pub fn center(&self) -> f32 {
        self.0[1][1]
    }

    /// Weighted sum of the window with `kernel`.
    #[inline(always)]
    #[must_use]
    pub fn convolve(&self, kernel: &Kernel3) -> f32 {
        let mut sum = 0.0;
        for (row, krow) in self.0.iter().zip(kernel) {
            for (v, k) in row.iter().zip(krow) {
                sum += v * *k as f32;
            }
        }
        sum
    }
}

/// True if (x, y) has a full 3×3 neighborhood inside a `width × height` image.
#[inline(always)]
#[must_use]
pub fn is_interior(width: u32, height: u32, x: u32, y: u32) -> bool {
    x >= 1 && y >= 1 && x + 1 < width && y + 1 < height
}

/// Normalised 1-D Gaussian taps for standard deviation `sigma`.
///
/// The kernel spans `ceil(3σ)` pixels on each side (at least one), so the
/// returned length is always odd.
///
/// # Example
/// ```
/// use ac_ascii::convolve::gaussian_kernel;
/// let k = gaussian_kernel(1.0);
/// assert_eq!(k.len(), 7);
/// assert!((k.iter().sum::<f32>() - 1.0).abs() < 1e-5);
/// ```
#[must_use]
pub fn gaussian_kernel(sigma: f32) -> Vec<f32> {
    let sigma = sigma.max(f32::EPSILON);
    let radius = ((sigma * 3.0).ceil() as i32).max(1);
    let two_sigma_sq = 2.0 * sigma * sigma;
    let mut taps: Vec<f32> = (-radius..=radius)
        .map(|d| (-((d * d) as f32) / two_sigma_sq).exp())
        .collect();
    let total: f32 = taps.iter().sum();
    for t in &mut taps {
        *t /= total;
    }
    taps
}

/// Clamp a signed coordinate into `[0, len - 1]`.
#[inline(always)]
#[must_use]
pub fn clamp_coord(i: i64, len: u32) -> u32 {
    i.clamp(0, i64::from(len) - 1) as u32
}
