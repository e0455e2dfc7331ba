/// Data model, configuration and shared types for asciify.
///
/// This crate holds the raster and cell-grid types, character ramps,
/// themes, presets and the error type shared across the workspace.

pub mod charset;
pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod preset;
pub mod theme;

pub use charset::{CharSet, CharacterRamp, RampKind};
pub use config::{ConvertConfig, FilterConfig};
pub use error::ConversionError;
pub use frame::{Cell, CellGrid, Conversion, RasterImage};
pub use preset::{Preset, PresetLibrary};
pub use theme::{Theme, ThemeKind};
