use thiserror::Error;

/// Failure of a single conversion pass.
///
/// Every variant is terminal for the invocation: no partial grid or text is
/// ever returned alongside it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// Source width or height is zero.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Pixel data could not be read as a `width × height` RGBA buffer.
    #[error("Buffer de pixels indisponible : {reason}")]
    BufferUnavailable {
        /// Human readable cause.
        reason: String,
    },

    /// The resolution yields zero output columns or rows.
    #[error("Échantillonnage dégénéré : résolution {resolution} sur {width}×{height} ne produit aucune cellule")]
    DegenerateSampling {
        /// Source width.
        width: u32,
        /// Source height.
        height: u32,
        /// Requested density fraction.
        resolution: f32,
    },

    /// A character ramp needs at least two glyphs.
    #[error("Rampe de caractères invalide : {len} glyphe(s), minimum 2")]
    InvalidRamp {
        /// Number of glyphs supplied.
        len: usize,
    },
}
