use ac_core::config::DEFAULT_FONT_ASPECT;
use ac_core::error::ConversionError;

/// Grille d'échantillonnage dérivée des dimensions source et de la densité.
///
/// Point sampling: each cell takes the pixel at the top-left corner of its
/// `step_x × step_y` block, no averaging.
///
/// # Example
/// ```
/// use ac_ascii::sampler::SamplingPlan;
/// let plan = SamplingPlan::new(100, 60, 0.1, 0.5).unwrap();
/// assert_eq!((plan.out_width, plan.out_height), (10, 6));
/// assert_eq!((plan.step_x, plan.step_y), (10, 20));
/// assert_eq!((plan.columns, plan.rows), (10, 3));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SamplingPlan {
    /// `floor(W * resolution)`.
    pub out_width: u32,
    /// `floor(H * resolution)`.
    pub out_height: u32,
    /// `ceil(W / out_width)`, always ≥ 1.
    pub step_x: u32,
    /// `ceil(H / out_height / font_aspect)`, always ≥ 1.
    pub step_y: u32,
    /// Horizontal samples taken: `ceil(W / step_x)`.
    pub columns: u32,
    /// Vertical samples taken: `ceil(H / step_y)`.
    pub rows: u32,
}

impl SamplingPlan {
    /// Plan the sampling of a `width × height` source.
    ///
    /// A non-positive or non-finite `font_aspect` falls back to 0.5.
    ///
    /// # Errors
    /// - [`ConversionError::InvalidDimensions`] if a side is zero.
    /// - [`ConversionError::DegenerateSampling`] if `resolution` yields zero
    ///   output columns or rows.
    pub fn new(
        width: u32,
        height: u32,
        resolution: f32,
        font_aspect: f32,
    ) -> Result<Self, ConversionError> {
        if width == 0 || height == 0 {
            return Err(ConversionError::InvalidDimensions { width, height });
        }
        let degenerate = ConversionError::DegenerateSampling {
            width,
            height,
            resolution,
        };
        if resolution.is_nan() || resolution <= 0.0 {
            return Err(degenerate);
        }
        let out_width = (width as f32 * resolution).floor() as u32;
        let out_height = (height as f32 * resolution).floor() as u32;
        if out_width == 0 || out_height == 0 {
            return Err(degenerate);
        }

        let aspect = if font_aspect.is_finite() && font_aspect > 0.0 {
            font_aspect
        } else {
            log::warn!("font_aspect {font_aspect} invalide, repli sur {DEFAULT_FONT_ASPECT}");
            DEFAULT_FONT_ASPECT
        };

        let step_x = width.div_ceil(out_width).max(1);
        let step_y = (f64::from(height) / f64::from(out_height) / f64::from(aspect))
            .ceil()
            .max(1.0) as u32;

        Ok(Self {
            out_width,
            out_height,
            step_x,
            step_y,
            columns: width.div_ceil(step_x),
            rows: height.div_ceil(step_y),
        })
    }

    /// Source pixel sampled for cell (col, row).
    #[inline(always)]
    #[must_use]
    pub fn source_point(&self, col: u32, row: u32) -> (u32, u32) {
        (col * self.step_x, row * self.step_y)
    }

    /// Every cell in row-major order as `(col, row, x, y)`.
    pub fn points(&self) -> impl Iterator<Item = (u32, u32, u32, u32)> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.columns).map(move |col| {
                let (x, y) = self.source_point(col, row);
                (col, row, x, y)
            })
        })
    }
}
