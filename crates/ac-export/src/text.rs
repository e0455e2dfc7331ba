use std::path::Path;

use ac_core::frame::Conversion;
use anyhow::{Context, Result};

/// Plain-text export: the converter's text, verbatim.
///
/// # Example
/// ```
/// use ac_core::frame::{CellGrid, Conversion};
/// use ac_export::text::to_text;
/// let grid = CellGrid::new(2, 2);
/// let conv = Conversion { text: grid.to_text(), grid };
/// assert_eq!(to_text(&conv), "  \n  ");
/// ```
#[must_use]
pub fn to_text(conversion: &Conversion) -> String {
    conversion.text.clone()
}

/// Write [`to_text`] to `path`.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn save_text(path: &Path, conversion: &Conversion) -> Result<()> {
    std::fs::write(path, to_text(conversion))
        .with_context(|| format!("Impossible d'écrire {}", path.display()))
}
