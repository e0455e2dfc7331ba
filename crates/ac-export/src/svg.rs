use std::fmt::Write as _;

use ac_core::color::{to_css_rgb, to_hex};
use ac_core::frame::Conversion;

use crate::{CHAR_WIDTH_TENTHS, FONT_SIZE_PX, RenderStyle, escape_markup, fmt_tenths};

/// SVG document with one `<text>` element per cell.
///
/// Cells sit on a fixed monospace lattice: 4.8px wide, 8px tall, baseline
/// at the bottom of the cell.
#[must_use]
pub fn to_svg(conversion: &Conversion, style: &RenderStyle) -> String {
    let grid = &conversion.grid;
    let line_tenths = FONT_SIZE_PX * 10;
    let mut svg = String::new();
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" style=\"background: {bg}\">
<style>
    .ascii-char {{ font-family: monospace; font-size: {FONT_SIZE_PX}px; white-space: pre; }}
</style>",
        w = fmt_tenths(grid.width() * CHAR_WIDTH_TENTHS),
        h = fmt_tenths(grid.height() * line_tenths),
        bg = to_hex(style.theme.background),
    );

    for (row_idx, row) in grid.rows().enumerate() {
        let y = fmt_tenths((row_idx as u32 + 1) * line_tenths);
        for (col_idx, cell) in row.iter().enumerate() {
            let _ = write!(
                svg,
                "<text x=\"{}\" y=\"{y}\" class=\"ascii-char\" fill=\"{}\">",
                fmt_tenths(col_idx as u32 * CHAR_WIDTH_TENTHS),
                to_css_rgb(cell.color),
            );
            escape_markup(cell.glyph, &mut svg);
            svg.push_str("</text>");
        }
    }

    svg.push_str("</svg>");
    svg
}
