use std::borrow::Cow;

use ac_core::config::ConvertConfig;
use ac_core::error::ConversionError;
use ac_core::frame::{Cell, CellGrid, Conversion, RasterImage};

use crate::color_map::cell_color;
use crate::dither::apply_bayer_4x4;
use crate::filter::apply_filters;
use crate::luminance::{invert, tone_map};
use crate::sampler::SamplingPlan;

/// Étapes d'une passe de conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Nothing running; initial state of every invocation.
    Idle,
    /// Validating the source and planning the cell grid.
    Sampling,
    /// Running the filter stack on a private copy of the pixels.
    Filtering,
    /// Tone map → dither → invert → glyph → color, per cell.
    PerCellMapping,
    /// A complete grid and text were produced.
    Done,
    /// The pass aborted; nothing was produced.
    Failed,
}

/// Compositor orchestre la conversion pixel → grille de cellules.
///
/// Holds no state across invocations other than the stage reached by the
/// last one, which is only informative.
///
/// # Example
/// ```
/// use ac_ascii::compositor::{Compositor, Stage};
/// use ac_core::config::ConvertConfig;
/// use ac_core::frame::RasterImage;
///
/// let mut compositor = Compositor::new();
/// let image = RasterImage::filled(40, 40, [255, 255, 255, 255]);
/// let out = compositor.convert(&image, &ConvertConfig::default()).unwrap();
/// assert_eq!(compositor.stage(), Stage::Done);
/// assert_eq!(out.text.lines().count() as u32, out.grid.height());
/// ```
#[derive(Debug)]
pub struct Compositor {
    stage: Stage,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new()
    }
}

impl Compositor {
    /// Create an idle compositor.
    #[must_use]
    pub fn new() -> Self {
        Self { stage: Stage::Idle }
    }

    /// Stage reached by the most recent invocation.
    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    fn enter(&mut self, stage: Stage) {
        log::trace!("{:?} → {:?}", self.stage, stage);
        self.stage = stage;
    }

    /// Convert `image` into a colorized cell grid and its plain-text form.
    ///
    /// Always starts from [`Stage::Idle`]. On error the compositor ends in
    /// [`Stage::Failed`] and no partial output exists.
    ///
    /// # Errors
    /// - [`ConversionError::InvalidDimensions`] for a zero-sized source.
    /// - [`ConversionError::InvalidRamp`] for a custom ramp under 2 glyphs.
    /// - [`ConversionError::DegenerateSampling`] if the resolution yields no cell.
    pub fn convert(
        &mut self,
        image: &RasterImage,
        config: &ConvertConfig,
    ) -> Result<Conversion, ConversionError> {
        self.stage = Stage::Idle;
        match self.run(image, config) {
            Ok(conversion) => {
                self.enter(Stage::Done);
                Ok(conversion)
            }
            Err(e) => {
                self.enter(Stage::Failed);
                log::warn!("Conversion échouée : {e}");
                Err(e)
            }
        }
    }

    fn run(
        &mut self,
        image: &RasterImage,
        config: &ConvertConfig,
    ) -> Result<Conversion, ConversionError> {
        self.enter(Stage::Sampling);
        let plan = SamplingPlan::new(
            image.width(),
            image.height(),
            config.resolution,
            config.font_aspect,
        )?;
        let ramp = config.char_set.ramp()?;
        log::debug!(
            "Échantillonnage {}×{} → {}×{} cellules (pas {}×{})",
            image.width(),
            image.height(),
            plan.columns,
            plan.rows,
            plan.step_x,
            plan.step_y
        );

        self.enter(Stage::Filtering);
        let working = if config.filters.is_identity() {
            Cow::Borrowed(image)
        } else {
            let mut filtered = image.clone();
            apply_filters(&mut filtered, &config.filters);
            Cow::Owned(filtered)
        };

        self.enter(Stage::PerCellMapping);
        let theme = config.theme.theme();
        let mut grid = CellGrid::new(plan.columns, plan.rows);
        for (col, row, x, y) in plan.points() {
            let rgb = working.rgb(x, y);
            let mut brightness = tone_map(rgb, config.grayscale);
            if config.filters.dithering {
                brightness = apply_bayer_4x4(brightness, x, y);
            }
            if config.inverted {
                brightness = invert(brightness);
            }
            let (index, glyph) = ramp.select(brightness);
            let color = cell_color(rgb, index, &ramp, config.grayscale, &theme);
            grid.set(col, row, Cell { glyph, color });
        }

        let text = grid.to_text();
        Ok(Conversion { grid, text })
    }
}

/// One-shot conversion with a fresh [`Compositor`].
///
/// # Errors
/// See [`Compositor::convert`].
pub fn convert(image: &RasterImage, config: &ConvertConfig) -> Result<Conversion, ConversionError> {
    Compositor::new().convert(image, config)
}
