use ac_core::charset::CharacterRamp;
use ac_core::color::{Rgb, clamp_channel};
use ac_core::theme::Theme;

/// Plancher par canal : évite les cellules quasi noires illisibles sur fond sombre.
pub const MIN_BRIGHTNESS: u8 = 40;

/// `(index / (N-1)) * 1.5 + 0.5`, in [0.5, 2.0].
///
/// # Example
/// ```
/// use ac_core::charset::CharacterRamp;
/// use ac_ascii::color_map::brightness_factor;
/// let ramp = CharacterRamp::new(" .:#@").unwrap();
/// assert!((brightness_factor(0, &ramp) - 0.5).abs() < 1e-6);
/// assert!((brightness_factor(4, &ramp) - 2.0).abs() < 1e-6);
/// ```
#[inline(always)]
#[must_use]
pub fn brightness_factor(index: usize, ramp: &CharacterRamp) -> f32 {
    ramp.position(index) * 1.5 + 0.5
}

/// Color-mode cell color: source RGB scaled by the glyph's ramp position,
/// each channel clamped into `[MIN_BRIGHTNESS, 255]`.
///
/// # Example
/// ```
/// use ac_core::charset::CharacterRamp;
/// use ac_ascii::color_map::colorize;
/// let ramp = CharacterRamp::new(" .:#@").unwrap();
/// assert_eq!(colorize((100, 10, 200), 4, &ramp), (200, 40, 255));
/// ```
#[inline]
#[must_use]
pub fn colorize((r, g, b): Rgb, index: usize, ramp: &CharacterRamp) -> Rgb {
    let factor = brightness_factor(index, ramp);
    let scale = |c: u8| clamp_channel(f32::from(c) * factor).max(MIN_BRIGHTNESS);
    (scale(r), scale(g), scale(b))
}

/// Display color of a cell: the theme foreground in grayscale mode,
/// [`colorize`] otherwise.
#[inline]
#[must_use]
pub fn cell_color(
    rgb: Rgb,
    index: usize,
    ramp: &CharacterRamp,
    grayscale: bool,
    theme: &Theme,
) -> Rgb {
    if grayscale {
        theme.primary
    } else {
        colorize(rgb, index, ramp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ac_core::theme::ThemeKind;

    #[test]
    fn floor_applies_to_dark_pixels() {
        let ramp = CharacterRamp::new(" .:-=+*#%@").unwrap();
        assert_eq!(colorize((0, 0, 0), 9, &ramp), (40, 40, 40));
        assert_eq!(colorize((60, 90, 255), 0, &ramp), (40, 45, 128));
    }

    #[test]
    fn grayscale_uses_theme_primary() {
        let ramp = CharacterRamp::new(" @").unwrap();
        let theme = ThemeKind::Retro.theme();
        assert_eq!(
            cell_color((1, 2, 3), 1, &ramp, true, &theme),
            (0xff, 0xb0, 0x00)
        );
        assert_eq!(cell_color((100, 100, 100), 1, &ramp, false, &theme), (200, 200, 200));
    }

    #[test]
    fn denser_glyph_never_darker() {
        let ramp = CharacterRamp::new(" .,:;i1tfLCG08@").unwrap();
        let rgb = (90, 140, 30);
        let mut prev = colorize(rgb, 0, &ramp);
        for i in 1..ramp.len() {
            let c = colorize(rgb, i, &ramp);
            assert!(c.0 >= prev.0 && c.1 >= prev.1 && c.2 >= prev.2);
            prev = c;
        }
    }
}
