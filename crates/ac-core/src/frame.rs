use serde::Serialize;

use crate::color::Rgb;
use crate::error::ConversionError;

/// Image source en RGBA row-major, 4 bytes par pixel.
///
/// The length invariant `data.len() == width * height * 4` holds for every
/// value of this type; constructors refuse buffers that break it.
///
/// # Example
/// ```
/// use ac_core::frame::RasterImage;
/// let img = RasterImage::new(10, 10);
/// assert_eq!(img.data().len(), 400);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl RasterImage {
    /// Transparent black image of the given size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize * 4],
            width,
            height,
        }
    }

    /// Image where every pixel is `rgba`.
    ///
    /// # Example
    /// ```
    /// use ac_core::frame::RasterImage;
    /// let img = RasterImage::filled(4, 4, [128, 128, 128, 255]);
    /// assert_eq!(img.rgb(3, 3), (128, 128, 128));
    /// ```
    #[must_use]
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let mut data = Vec::with_capacity(count * 4);
        for _ in 0..count {
            data.extend_from_slice(&rgba);
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// Wrap an existing RGBA buffer.
    ///
    /// # Errors
    /// - [`ConversionError::InvalidDimensions`] if either side is zero.
    /// - [`ConversionError::BufferUnavailable`] if the byte count does not match.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, ConversionError> {
        if width == 0 || height == 0 {
            return Err(ConversionError::InvalidDimensions { width, height });
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| ConversionError::BufferUnavailable {
                reason: format!("{width}×{height} dépasse l'espace adressable"),
            })?;
        if data.len() != expected {
            return Err(ConversionError::BufferUnavailable {
                reason: format!("{} octets reçus, {expected} attendus", data.len()),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Raw RGBA bytes, mutable. The length cannot change through this slice.
    #[must_use]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Byte offset of pixel (x, y).
    #[inline(always)]
    #[must_use]
    pub fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Accès au pixel (x, y) → [r, g, b, a].
    ///
    /// # Panics
    /// Panics if (x, y) lies outside the image.
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// RGB part of pixel (x, y).
    #[inline(always)]
    #[must_use]
    pub fn rgb(&self, x: u32, y: u32) -> Rgb {
        let [r, g, b, _] = self.pixel(x, y);
        (r, g, b)
    }

    /// Overwrite pixel (x, y).
    #[inline(always)]
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = self.offset(x, y);
        self.data[i..i + 4].copy_from_slice(&rgba);
    }
}

/// Single cell in the output grid.
///
/// # Example
/// ```
/// use ac_core::frame::Cell;
/// let cell = Cell::default();
/// assert_eq!(cell.glyph, ' ');
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Cell {
    /// Caractère à afficher.
    pub glyph: char,
    /// Couleur d'affichage (RGB).
    pub color: Rgb,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            glyph: ' ',
            color: (0, 0, 0),
        }
    }
}

/// Rectangular grid of cells, row-major.
///
/// # Example
/// ```
/// use ac_core::frame::{CellGrid, Cell};
/// let mut grid = CellGrid::new(80, 24);
/// grid.set(0, 0, Cell { glyph: '@', color: (255, 0, 0) });
/// assert_eq!(grid.get(0, 0).glyph, '@');
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CellGrid {
    /// Width in cells.
    width: u32,
    /// Height in cells.
    height: u32,
    /// Flat array of cells, row-major.
    cells: Vec<Cell>,
}

impl CellGrid {
    /// Crée une grille remplie de cellules par défaut.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            cells: vec![Cell::default(); width as usize * height as usize],
            width,
            height,
        }
    }

    /// Cells per row.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Set a cell at position (x, y).
    #[inline(always)]
    pub fn set(&mut self, x: u32, y: u32, cell: Cell) {
        self.cells[y as usize * self.width as usize + x as usize] = cell;
    }

    /// Get a cell reference at position (x, y).
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> &Cell {
        &self.cells[y as usize * self.width as usize + x as usize]
    }

    /// Rows, top to bottom. Every row has exactly `width()` cells.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(self.width.max(1) as usize)
    }

    /// Plain-text rendering: one glyph per cell, rows joined by `\n`.
    ///
    /// # Example
    /// ```
    /// use ac_core::frame::{CellGrid, Cell};
    /// let mut grid = CellGrid::new(2, 2);
    /// grid.set(1, 1, Cell { glyph: '#', color: (0, 0, 0) });
    /// assert_eq!(grid.to_text(), "  \n #");
    /// ```
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out =
            String::with_capacity(self.cells.len() + self.height.saturating_sub(1) as usize);
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.extend(row.iter().map(|c| c.glyph));
        }
        out
    }
}

/// Complete result of one conversion pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conversion {
    /// Colorized grid, canonical input for HTML/SVG/PNG renderers.
    pub grid: CellGrid,
    /// Plain-text equivalent of `grid`, canonical text/clipboard export.
    pub text: String,
}
