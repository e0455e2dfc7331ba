use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// Palette used by renderers and by grayscale-mode cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    /// Display name.
    pub name: &'static str,
    /// Canvas background.
    pub background: Rgb,
    /// Foreground of every grayscale-mode cell.
    pub primary: Rgb,
    /// Secondary text color.
    pub secondary: Rgb,
    /// Accent color.
    pub accent: Rgb,
}

/// Built-in themes.
///
/// # Example
/// ```
/// use ac_core::theme::ThemeKind;
/// let t = ThemeKind::Matrix.theme();
/// assert_eq!(t.primary, (0, 255, 0));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKind {
    #[default]
    Default,
    Dark,
    White,
    Matrix,
    Retro,
    Neon,
    Cyberpunk,
}

impl ThemeKind {
    /// All themes, in menu order.
    pub const ALL: [ThemeKind; 7] = [
        ThemeKind::Default,
        ThemeKind::Dark,
        ThemeKind::White,
        ThemeKind::Matrix,
        ThemeKind::Retro,
        ThemeKind::Neon,
        ThemeKind::Cyberpunk,
    ];

    /// Resolve the palette.
    #[must_use]
    pub const fn theme(self) -> Theme {
        match self {
            ThemeKind::Default => Theme {
                name: "Default",
                background: (0x00, 0x00, 0x00),
                primary: (0xff, 0xff, 0xff),
                secondary: (0x88, 0x88, 0x88),
                accent: (0x66, 0x66, 0x66),
            },
            ThemeKind::Dark => Theme {
                name: "Dark",
                background: (0x0a, 0x0a, 0x0a),
                primary: (0xff, 0xff, 0xff),
                secondary: (0xa0, 0xa0, 0xa0),
                accent: (0x33, 0x33, 0x33),
            },
            ThemeKind::White => Theme {
                name: "White",
                background: (0xff, 0xff, 0xff),
                primary: (0x00, 0x00, 0x00),
                secondary: (0x66, 0x66, 0x66),
                accent: (0xcc, 0xcc, 0xcc),
            },
            ThemeKind::Matrix => Theme {
                name: "Matrix",
                background: (0x00, 0x00, 0x00),
                primary: (0x00, 0xff, 0x00),
                secondary: (0x00, 0x88, 0x00),
                accent: (0x00, 0x44, 0x00),
            },
            ThemeKind::Retro => Theme {
                name: "Retro",
                background: (0x00, 0x00, 0x00),
                primary: (0xff, 0xb0, 0x00),
                secondary: (0xcc, 0x88, 0x00),
                accent: (0x99, 0x66, 0x00),
            },
            ThemeKind::Neon => Theme {
                name: "Neon",
                background: (0x0a, 0x0a, 0x0a),
                primary: (0xff, 0x00, 0xff),
                secondary: (0x00, 0xff, 0xff),
                accent: (0x88, 0x00, 0xff),
            },
            ThemeKind::Cyberpunk => Theme {
                name: "Cyberpunk",
                background: (0x0d, 0x11, 0x17),
                primary: (0xff, 0x00, 0x80),
                secondary: (0x00, 0xff, 0x80),
                accent: (0x80, 0x00, 0xff),
            },
        }
    }

    /// Lookup by case-insensitive name.
    ///
    /// # Example
    /// ```
    /// use ac_core::theme::ThemeKind;
    /// assert_eq!(ThemeKind::from_name("Retro"), Some(ThemeKind::Retro));
    /// assert_eq!(ThemeKind::from_name("sepia"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.theme().name.eq_ignore_ascii_case(name))
    }
}
