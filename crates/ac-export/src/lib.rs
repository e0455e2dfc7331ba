//! Serializers turning a conversion into text, HTML, SVG, JSON or PNG.
//!
//! Exporters only read the grid and text produced by the converter; they
//! never recompute glyphs or colors.

pub mod html;
pub mod json;
pub mod rasterizer;
pub mod svg;
pub mod text;

use std::path::Path;

use ac_core::config::ConvertConfig;
use ac_core::theme::Theme;

/// Taille de police nominale des exports HTML/SVG, en pixels.
pub const FONT_SIZE_PX: u32 = 8;

/// Largeur d'un glyphe monospace en dixièmes de pixel (0.6 × 8px).
pub const CHAR_WIDTH_TENTHS: u32 = FONT_SIZE_PX * 6;

/// Presentation parameters shared by every exporter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderStyle {
    /// Background and foreground palette.
    pub theme: Theme,
    /// Whether the conversion ran in grayscale mode.
    pub grayscale: bool,
}

impl RenderStyle {
    /// Style matching the configuration a conversion ran with.
    #[must_use]
    pub fn from_config(config: &ConvertConfig) -> Self {
        Self {
            theme: config.theme.theme(),
            grayscale: config.grayscale,
        }
    }
}

/// Output formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Html,
    Svg,
    Json,
    Png,
}

impl ExportFormat {
    /// Guess the format from a file extension.
    ///
    /// # Example
    /// ```
    /// use ac_export::ExportFormat;
    /// use std::path::Path;
    /// assert_eq!(ExportFormat::from_path(Path::new("out.SVG")), Some(ExportFormat::Svg));
    /// assert_eq!(ExportFormat::from_path(Path::new("out")), None);
    /// ```
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "txt" | "text" => Some(Self::Text),
            "html" | "htm" => Some(Self::Html),
            "svg" => Some(Self::Svg),
            "json" => Some(Self::Json),
            "png" => Some(Self::Png),
            _ => None,
        }
    }

    /// True for formats that can be written to stdout.
    #[must_use]
    pub fn is_textual(self) -> bool {
        !matches!(self, Self::Png)
    }
}

/// Escape `&`, `<`, `>` and `"` for HTML and XML text.
pub(crate) fn escape_markup(ch: char, out: &mut String) {
    match ch {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        c => out.push(c),
    }
}

/// Format a length given in tenths of a pixel: `48 → "4.8"`, `80 → "8"`.
pub(crate) fn fmt_tenths(tenths: u32) -> String {
    if tenths.is_multiple_of(10) {
        (tenths / 10).to_string()
    } else {
        format!("{}.{}", tenths / 10, tenths % 10)
    }
}
