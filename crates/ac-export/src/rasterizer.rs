use std::collections::HashMap;
use std::path::Path;

use ab_glyph::{Font, FontRef, PxScale, point};
use ac_core::color::Rgb;
use ac_core::frame::{Conversion, RasterImage};
use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::RenderStyle;

/// Rend une conversion en pixels RGBA avec une police monospace.
/// Les glyphes sont rastérisés une seule fois dans un cache d'alpha.
pub struct Rasterizer {
    char_width: u32,
    char_height: u32,
    /// Alpha buffer per char (size = char_width * char_height)
    glyph_cache: HashMap<char, Vec<u8>>,
    empty_glyph: Vec<u8>,
}

impl Rasterizer {
    /// Pré-calcule ASCII imprimable, Latin-1 et les blocs (░▒▓█),
    /// plus les glyphes supplémentaires fournis (rampes personnalisées).
    ///
    /// # Errors
    /// Retourne une erreur si la police fournie est invalide.
    pub fn new(font_data: &[u8], scale_px: f32, extra: impl IntoIterator<Item = char>) -> Result<Self> {
        let font = FontRef::try_from_slice(font_data).context("Police invalide")?;
        let scale = PxScale::from(scale_px.max(1.0));

        let v_advance = font.ascent_unscaled() - font.descent_unscaled() + font.line_gap_unscaled();
        let height = (v_advance * scale.y / font.height_unscaled()).ceil() as u32;

        let m_glyph = font.glyph_id('M');
        let h_advance = font.h_advance_unscaled(m_glyph);
        let width = (h_advance * scale.x / font.height_unscaled()).ceil() as u32;

        let char_width = width.max(1);
        let char_height = height.max(1);

        let mut rasterizer = Self {
            char_width,
            char_height,
            glyph_cache: HashMap::new(),
            empty_glyph: vec![0u8; (char_width * char_height) as usize],
        };

        let ranges = [32..=126u32, 0x00A0..=0x00FF, 0x2580..=0x259F];
        let chars = ranges
            .into_iter()
            .flatten()
            .filter_map(char::from_u32)
            .chain(extra);
        for ch in chars {
            rasterizer.cache_glyph(&font, scale, ch);
        }
        log::debug!(
            "Rasterizer: cellule {}x{}px, {} glyphes en cache",
            char_width,
            char_height,
            rasterizer.glyph_cache.len()
        );

        Ok(rasterizer)
    }

    fn cache_glyph(&mut self, font: &FontRef, scale: PxScale, ch: char) {
        if self.glyph_cache.contains_key(&ch) {
            return;
        }
        // glyph_id 0 = .notdef, rendered blank rather than as a box
        let gid = font.glyph_id(ch);
        if gid.0 == 0 {
            return;
        }

        let mut buffer = vec![0u8; (self.char_width * self.char_height) as usize];
        let ascent_px = font.ascent_unscaled() * scale.y / font.height_unscaled();
        let glyph = gid.with_scale_and_position(scale, point(0.0, ascent_px));

        if let Some(outline) = font.outline_glyph(glyph) {
            let bounds = outline.px_bounds();
            outline.draw(|x, y, v| {
                let px = (x as i32 + bounds.min.x as i32).max(0) as u32;
                let py = (y as i32 + bounds.min.y as i32).max(0) as u32;
                if px < self.char_width && py < self.char_height {
                    let idx = (py * self.char_width + px) as usize;
                    buffer[idx] = (v * 255.0).round() as u8;
                }
            });
        }
        self.glyph_cache.insert(ch, buffer);
    }

    /// Rendu de la conversion sur fond de thème.
    ///
    /// En niveaux de gris, le canevas suit les lignes du texte et tous les
    /// glyphes prennent la couleur primaire du thème. En couleur, il suit la
    /// grille et chaque glyphe garde sa couleur de cellule.
    #[must_use]
    pub fn render(&self, conversion: &Conversion, style: &RenderStyle) -> RasterImage {
        let lines = styled_lines(conversion, style);
        let cols = lines.iter().map(Vec::len).max().unwrap_or(0) as u32;
        let rows = lines.len() as u32;

        let bg = style.theme.background;
        let mut fb = RasterImage::filled(
            cols * self.char_width,
            rows * self.char_height,
            [bg.0, bg.1, bg.2, 255],
        );

        let stride = fb.width() as usize * 4;
        let band_size = stride * self.char_height as usize;
        if band_size == 0 {
            return fb;
        }

        fb.data_mut()
            .par_chunks_exact_mut(band_size)
            .zip(lines.par_iter())
            .for_each(|(band, line)| {
                for (gx, &(ch, fg)) in line.iter().enumerate() {
                    let alpha_buf = self.glyph_cache.get(&ch).unwrap_or(&self.empty_glyph);
                    let cx_start = gx * self.char_width as usize;
                    for cy in 0..self.char_height as usize {
                        let row_offset = cy * stride;
                        for cx in 0..self.char_width as usize {
                            let alpha = alpha_buf[cy * self.char_width as usize + cx];
                            if alpha == 0 {
                                continue;
                            }
                            let a = f32::from(alpha) / 255.0;
                            let px = row_offset + (cx_start + cx) * 4;
                            band[px] = blend(fg.0, bg.0, a);
                            band[px + 1] = blend(fg.1, bg.1, a);
                            band[px + 2] = blend(fg.2, bg.2, a);
                        }
                    }
                }
            });

        fb
    }
}

#[inline]
fn blend(fg: u8, bg: u8, a: f32) -> u8 {
    (f32::from(fg) * a + f32::from(bg) * (1.0 - a)).round() as u8
}

/// Glyph/color pairs per output line.
fn styled_lines(conversion: &Conversion, style: &RenderStyle) -> Vec<Vec<(char, Rgb)>> {
    if style.grayscale {
        let fg = style.theme.primary;
        conversion
            .text
            .lines()
            .map(|line| line.chars().map(|c| (c, fg)).collect())
            .collect()
    } else {
        conversion
            .grid
            .rows()
            .map(|row| row.iter().map(|cell| (cell.glyph, cell.color)).collect())
            .collect()
    }
}

/// Write a raster to disk as PNG.
///
/// # Errors
/// Returns an error if the buffer is inconsistent or the file cannot be written.
pub fn save_png(path: &Path, image: &RasterImage) -> Result<()> {
    let buf = image::RgbaImage::from_raw(image.width(), image.height(), image.data().to_vec())
        .context("Tampon RGBA incohérent")?;
    buf.save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("Impossible d'écrire {}", path.display()))?;
    log::info!("PNG écrit: {} ({}x{})", path.display(), image.width(), image.height());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ac_core::frame::{Cell, CellGrid};
    use ac_core::theme::ThemeKind;

    fn conversion() -> Conversion {
        let mut grid = CellGrid::new(3, 2);
        grid.set(0, 0, Cell {
            glyph: '#',
            color: (200, 10, 10),
        });
        Conversion {
            text: "# \u{00a0}\n   ".to_owned(),
            grid,
        }
    }

    #[test]
    fn invalid_font_is_rejected() {
        assert!(Rasterizer::new(b"not a font", 8.0, []).is_err());
    }

    #[test]
    fn grayscale_lines_use_theme_primary() {
        let style = RenderStyle {
            theme: ThemeKind::Retro.theme(),
            grayscale: true,
        };
        let lines = styled_lines(&conversion(), &style);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), 3);
        assert!(lines.iter().flatten().all(|&(_, c)| c == style.theme.primary));
    }

    #[test]
    fn color_lines_follow_grid() {
        let style = RenderStyle {
            theme: ThemeKind::Default.theme(),
            grayscale: false,
        };
        let lines = styled_lines(&conversion(), &style);
        assert_eq!(lines[0][0], ('#', (200, 10, 10)));
        assert_eq!(lines[1][2], (' ', (0, 0, 0)));
    }

    #[test]
    fn blend_endpoints() {
        assert_eq!(blend(200, 10, 1.0), 200);
        assert_eq!(blend(200, 10, 0.0), 10);
    }

    /// Fonts commonly shipped by Linux distributions, monospace first.
    const SYSTEM_FONTS: [&str; 5] = [
        "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
        "/usr/share/fonts/dejavu/DejaVuSansMono.ttf",
        "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    ];

    fn system_font() -> Option<Vec<u8>> {
        SYSTEM_FONTS.iter().find_map(|p| std::fs::read(p).ok())
    }

    fn lit_pixels(img: &RasterImage, bg: Rgb) -> usize {
        img.data()
            .chunks_exact(4)
            .filter(|px| (px[0], px[1], px[2]) != bg)
            .count()
    }

    #[test]
    fn render_sizes_canvas_and_draws_glyphs() {
        let Some(font) = system_font() else {
            eprintln!("aucune police système, test ignoré");
            return;
        };
        let rasterizer = Rasterizer::new(&font, 16.0, []).unwrap();
        let (cw, ch) = (rasterizer.char_width, rasterizer.char_height);
        assert!(cw > 1 && ch > 1);

        let color = RenderStyle {
            theme: ThemeKind::Default.theme(),
            grayscale: false,
        };
        let img = rasterizer.render(&conversion(), &color);
        assert_eq!((img.width(), img.height()), (3 * cw, 2 * ch));
        let lit = lit_pixels(&img, color.theme.background);
        assert!(lit > 0);
        // Only '#' is drawn, in its cell color, inside the first cell
        for y in 0..img.height() {
            for x in 0..img.width() {
                if img.rgb(x, y) != color.theme.background {
                    assert!(x < cw && y < ch, "pixel hors cellule en ({x}, {y})");
                }
            }
        }

        let gray = RenderStyle {
            theme: ThemeKind::Matrix.theme(),
            grayscale: true,
        };
        let img = rasterizer.render(&conversion(), &gray);
        assert_eq!((img.width(), img.height()), (3 * cw, 2 * ch));
        assert!(lit_pixels(&img, gray.theme.background) > 0);
        assert_eq!(img.pixel(img.width() - 1, img.height() - 1)[3], 255);
    }

    #[test]
    fn empty_conversion_renders_empty_canvas() {
        let Some(font) = system_font() else {
            return;
        };
        let rasterizer = Rasterizer::new(&font, 12.0, []).unwrap();
        let conv = Conversion {
            grid: CellGrid::new(0, 0),
            text: String::new(),
        };
        let style = RenderStyle {
            theme: ThemeKind::Default.theme(),
            grayscale: true,
        };
        let img = rasterizer.render(&conv, &style);
        assert_eq!((img.width(), img.height()), (0, 0));
    }

    #[test]
    fn png_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        save_png(&path, &RasterImage::filled(4, 2, [1, 2, 3, 255])).unwrap();
        let back = image::open(&path).unwrap().to_rgba8();
        assert_eq!(back.dimensions(), (4, 2));
        assert_eq!(back.get_pixel(3, 1).0, [1, 2, 3, 255]);
    }
}
