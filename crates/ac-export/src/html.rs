use std::fmt::Write as _;

use ac_core::color::{to_css_rgb, to_hex};
use ac_core::frame::Conversion;

use crate::{FONT_SIZE_PX, RenderStyle, escape_markup};

/// Standalone HTML document.
///
/// Grayscale conversions are emitted as the plain text in the theme's
/// foreground; color conversions wrap every cell in a colored `<span>`.
#[must_use]
pub fn to_html(conversion: &Conversion, style: &RenderStyle) -> String {
    let theme = &style.theme;
    let mut html = String::with_capacity(512 + conversion.grid.height() as usize * 64);
    let _ = write!(
        html,
        "<!DOCTYPE html>
<html>
<head>
    <meta charset=\"UTF-8\">
    <title>ASCII Art</title>
    <style>
        body {{
            background: {bg};
            color: {fg};
            font-family: monospace;
            white-space: pre;
            margin: 20px;
            font-size: {FONT_SIZE_PX}px;
            line-height: {FONT_SIZE_PX}px;
        }}
    </style>
</head>
<body>",
        bg = to_hex(theme.background),
        fg = to_hex(theme.primary),
    );

    if style.grayscale {
        for ch in conversion.text.chars() {
            escape_markup(ch, &mut html);
        }
    } else {
        for row in conversion.grid.rows() {
            for cell in row {
                let _ = write!(html, "<span style=\"color: {}\">", to_css_rgb(cell.color));
                escape_markup(cell.glyph, &mut html);
                html.push_str("</span>");
            }
            html.push('\n');
        }
    }

    html.push_str("</body></html>");
    html
}
