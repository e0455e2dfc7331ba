pub mod color_map;
pub mod compositor;
pub mod convolve;
pub mod dither;
pub mod edge;
pub mod filter;
/// Moteur de conversion image → grille ASCII pour asciify.
///
/// Converts an RGBA raster into a colorized grid of glyphs.
pub mod luminance;
pub mod sampler;

pub use compositor::{Compositor, Stage, convert};
pub use sampler::SamplingPlan;
