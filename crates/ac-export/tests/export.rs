use ac_core::charset::{CharSet, RampKind};
use ac_core::config::ConvertConfig;
use ac_core::frame::RasterImage;
use ac_core::theme::ThemeKind;
use ac_export::{RenderStyle, html, json, svg, text};

fn gradient(w: u32, h: u32) -> RasterImage {
    let mut img = RasterImage::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let v = (x * 255 / (w - 1)) as u8;
            img.set_pixel(x, y, [v, 255 - v, 128, 255]);
        }
    }
    img
}

fn config(grayscale: bool) -> ConvertConfig {
    ConvertConfig {
        resolution: 0.5,
        char_set: CharSet::Preset(RampKind::Standard),
        grayscale,
        font_aspect: 1.0,
        theme: ThemeKind::Neon,
        ..ConvertConfig::default()
    }
}

#[test]
fn exporters_agree_with_the_conversion() {
    let cfg = config(false);
    let conv = ac_ascii::convert(&gradient(20, 10), &cfg).unwrap();
    let style = RenderStyle::from_config(&cfg);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("art.txt");
    text::save_text(&path, &conv).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), conv.text);

    let cells = (conv.grid.width() * conv.grid.height()) as usize;
    assert_eq!(html::to_html(&conv, &style).matches("<span").count(), cells);
    assert_eq!(svg::to_svg(&conv, &style).matches("<text ").count(), cells);

    let value: serde_json::Value = serde_json::from_str(&json::to_json(&conv).unwrap()).unwrap();
    assert_eq!(value["cells"].as_array().unwrap().len(), cells);
    assert_eq!(value["width"], conv.grid.width());
}

#[test]
fn grayscale_html_carries_the_text() {
    let cfg = config(true);
    let conv = ac_ascii::convert(&gradient(20, 10), &cfg).unwrap();
    let html = html::to_html(&conv, &RenderStyle::from_config(&cfg));
    // Standard ramp has no markup characters
    assert!(html.contains(&conv.text));
    assert!(html.contains("background: #0a0a0a"));
}
