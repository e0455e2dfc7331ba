use std::io::Write as _;
use std::path::{Path, PathBuf};

use ac_core::frame::{Conversion, RasterImage};
use ac_export::rasterizer::{Rasterizer, save_png};
use ac_export::{ExportFormat, RenderStyle, html, json, svg, text};
use anyhow::{Context, Result};

/// Rendered document, ready to be written.
pub enum Rendered {
    Text(String),
    Image(RasterImage),
}

/// Format choisi + destination + police chargée une seule fois (export PNG).
pub struct Exporter {
    format: ExportFormat,
    output: Option<PathBuf>,
    font: Option<(Vec<u8>, f32)>,
}

impl Exporter {
    /// # Errors
    /// Returns an error for a binary format without an output path, or if
    /// the PNG font cannot be read.
    pub fn new(
        format: ExportFormat,
        output: Option<&Path>,
        font: Option<&Path>,
        font_size: f32,
    ) -> Result<Self> {
        if output.is_none() && !format.is_textual() {
            anyhow::bail!("Le format {format:?} ne peut pas être écrit sur la sortie standard.");
        }
        let font = match (format, font) {
            (ExportFormat::Png, Some(path)) => {
                let data = std::fs::read(path)
                    .with_context(|| format!("Impossible de lire la police {}", path.display()))?;
                Some((data, font_size))
            }
            (ExportFormat::Png, None) => anyhow::bail!("L'export PNG requiert une police."),
            _ => None,
        };
        Ok(Self {
            format,
            output: output.map(Path::to_path_buf),
            font,
        })
    }

    /// # Errors
    /// Returns an error if serialization or rasterization fails.
    pub fn render(&self, conversion: &Conversion, style: &RenderStyle) -> Result<Rendered> {
        let rendered = match self.format {
            ExportFormat::Text => Rendered::Text(text::to_text(conversion)),
            ExportFormat::Html => Rendered::Text(html::to_html(conversion, style)),
            ExportFormat::Svg => Rendered::Text(svg::to_svg(conversion, style)),
            ExportFormat::Json => Rendered::Text(json::to_json(conversion)?),
            ExportFormat::Png => {
                let (data, size) = self
                    .font
                    .as_ref()
                    .context("L'export PNG requiert une police.")?;
                let glyphs = conversion.text.chars().filter(|&c| c != '\n');
                let rasterizer = Rasterizer::new(data, *size, glyphs)?;
                Rendered::Image(rasterizer.render(conversion, style))
            }
        };
        Ok(rendered)
    }

    /// Render and write to the output path, or to stdout.
    ///
    /// # Errors
    /// Returns an error if rendering or the write fails.
    pub fn export(&self, conversion: &Conversion, style: &RenderStyle) -> Result<()> {
        let rendered = self.render(conversion, style)?;
        match (&rendered, self.output.as_deref()) {
            (Rendered::Text(s), Some(p)) => {
                std::fs::write(p, s)
                    .with_context(|| format!("Impossible d'écrire {}", p.display()))?;
                log::info!("Export écrit : {}", p.display());
            }
            (Rendered::Text(s), None) => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(s.as_bytes()).context("Écriture stdout impossible")?;
                if !s.ends_with('\n') {
                    stdout.write_all(b"\n").context("Écriture stdout impossible")?;
                }
                stdout.flush().context("Écriture stdout impossible")?;
            }
            (Rendered::Image(img), p) => {
                save_png(p.context("Une image requiert un fichier de sortie.")?, img)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ac_core::frame::CellGrid;
    use ac_core::theme::ThemeKind;

    fn conversion() -> Conversion {
        let grid = CellGrid::new(2, 2);
        Conversion {
            text: grid.to_text(),
            grid,
        }
    }

    const STYLE: RenderStyle = RenderStyle {
        theme: ThemeKind::Default.theme(),
        grayscale: false,
    };

    #[test]
    fn png_without_font_is_refused() {
        let out = Path::new("a.png");
        assert!(Exporter::new(ExportFormat::Png, Some(out), None, 12.0).is_err());
    }

    #[test]
    fn png_without_output_is_refused() {
        let font = Path::new("f.ttf");
        assert!(Exporter::new(ExportFormat::Png, None, Some(font), 12.0).is_err());
    }

    #[test]
    fn missing_font_file_is_an_error() {
        let res = Exporter::new(
            ExportFormat::Png,
            Some(Path::new("a.png")),
            Some(Path::new("/nonexistent/font.ttf")),
            12.0,
        );
        assert!(res.is_err());
    }

    #[test]
    fn text_is_written_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("art.txt");
        let exporter = Exporter::new(ExportFormat::Text, Some(&path), None, 12.0).unwrap();
        exporter.export(&conversion(), &STYLE).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "  \n  ");
    }

    #[test]
    fn textual_formats_accept_stdout() {
        for format in [ExportFormat::Text, ExportFormat::Html, ExportFormat::Svg, ExportFormat::Json] {
            assert!(Exporter::new(format, None, None, 12.0).is_ok());
        }
    }
}
