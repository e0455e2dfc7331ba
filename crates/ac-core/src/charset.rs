use serde::{Deserialize, Serialize};

use crate::error::ConversionError;

/// 10 caractères: compact, bon contraste.
pub const RAMP_STANDARD: &str = " .:-=+*#%@";

/// 15 caractères: plus de paliers pour les portraits.
pub const RAMP_DETAILED: &str = " .,:;i1tfLCG08@";

/// Blocs Unicode, pseudo-pixels.
pub const RAMP_BLOCKS: &str = " ░▒▓█";

/// Minimal, haut contraste.
pub const RAMP_MINIMAL: &str = " .:█";

/// 70 caractères: Paul Bourke extended.
pub const RAMP_EXTENDED: &str =
    " .'`^\",:;Il!i><~+_-?][}{1)(|\\/tfjrxnuvczXYUJCLQ0OZmwqpdbkhao*#MW&8%B@$";

/// The five predefined ramps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RampKind {
    #[default]
    Standard,
    Detailed,
    Blocks,
    Minimal,
    Extended,
}

impl RampKind {
    /// All predefined ramps.
    pub const ALL: [RampKind; 5] = [
        RampKind::Standard,
        RampKind::Detailed,
        RampKind::Blocks,
        RampKind::Minimal,
        RampKind::Extended,
    ];

    /// Glyphs ordered sparse → dense.
    #[must_use]
    pub const fn glyphs(self) -> &'static str {
        match self {
            RampKind::Standard => RAMP_STANDARD,
            RampKind::Detailed => RAMP_DETAILED,
            RampKind::Blocks => RAMP_BLOCKS,
            RampKind::Minimal => RAMP_MINIMAL,
            RampKind::Extended => RAMP_EXTENDED,
        }
    }

    /// Lowercase identifier used in config files and on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            RampKind::Standard => "standard",
            RampKind::Detailed => "detailed",
            RampKind::Blocks => "blocks",
            RampKind::Minimal => "minimal",
            RampKind::Extended => "extended",
        }
    }

    /// Lookup by case-insensitive name.
    ///
    /// # Example
    /// ```
    /// use ac_core::charset::RampKind;
    /// assert_eq!(RampKind::from_name("Blocks"), Some(RampKind::Blocks));
    /// assert_eq!(RampKind::from_name("braille"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(name))
    }
}

/// Ramp selection as stored in a config: a preset name or a literal ramp.
///
/// `char_set = "blocks"` picks a preset and any other bare string is taken
/// as a custom ramp. Custom ramps are always written as
/// `char_set = { custom = "..." }`, which also allows a literal ramp
/// spelled like a preset name.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "CharSetRepr", into = "CharSetRepr")]
pub enum CharSet {
    /// One of the predefined ramps.
    Preset(RampKind),
    /// Caller-supplied glyphs, sparse → dense.
    Custom(String),
}

#[derive(Deserialize, Serialize)]
#[serde(untagged)]
enum CharSetRepr {
    Preset(RampKind),
    Table { custom: String },
    Bare(String),
}

impl From<CharSetRepr> for CharSet {
    fn from(repr: CharSetRepr) -> Self {
        match repr {
            CharSetRepr::Preset(kind) => CharSet::Preset(kind),
            CharSetRepr::Table { custom } | CharSetRepr::Bare(custom) => CharSet::Custom(custom),
        }
    }
}

impl From<CharSet> for CharSetRepr {
    fn from(set: CharSet) -> Self {
        match set {
            CharSet::Preset(kind) => CharSetRepr::Preset(kind),
            CharSet::Custom(custom) => CharSetRepr::Table { custom },
        }
    }
}

impl Default for CharSet {
    fn default() -> Self {
        CharSet::Preset(RampKind::Standard)
    }
}

impl CharSet {
    /// Build the ramp this selection designates.
    ///
    /// # Errors
    /// Returns [`ConversionError::InvalidRamp`] for custom ramps shorter than 2 glyphs.
    pub fn ramp(&self) -> Result<CharacterRamp, ConversionError> {
        match self {
            CharSet::Preset(kind) => CharacterRamp::new(kind.glyphs()),
            CharSet::Custom(glyphs) => CharacterRamp::new(glyphs),
        }
    }
}

/// Ordered glyph sequence mapping brightness to a character.
///
/// # Example
/// ```
/// use ac_core::charset::CharacterRamp;
/// let ramp = CharacterRamp::new(" .:#@").unwrap();
/// assert_eq!(ramp.select(0.0), (0, ' '));
/// assert_eq!(ramp.select(1.0), (4, '@'));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharacterRamp {
    glyphs: Vec<char>,
}

impl CharacterRamp {
    /// Build a ramp from glyphs ordered sparse → dense.
    ///
    /// # Errors
    /// Returns [`ConversionError::InvalidRamp`] if fewer than 2 glyphs are given,
    /// since index math divides by `len - 1`.
    pub fn new(glyphs: &str) -> Result<Self, ConversionError> {
        let glyphs: Vec<char> = glyphs.chars().collect();
        if glyphs.len() < 2 {
            return Err(ConversionError::InvalidRamp { len: glyphs.len() });
        }
        Ok(Self { glyphs })
    }

    /// Number of glyphs (always ≥ 2).
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Glyph at `index`, saturating at the densest glyph.
    #[inline(always)]
    #[must_use]
    pub fn glyph(&self, index: usize) -> char {
        self.glyphs[index.min(self.glyphs.len() - 1)]
    }

    /// `floor(brightness * (N-1))` clamped into `[0, N-1]`.
    ///
    /// # Example
    /// ```
    /// use ac_core::charset::CharacterRamp;
    /// let ramp = CharacterRamp::new(" .:-=+*#%@").unwrap();
    /// assert_eq!(ramp.index_for(0.502), 4);
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn index_for(&self, brightness: f32) -> usize {
        let last = self.glyphs.len() - 1;
        if brightness.is_nan() || brightness <= 0.0 {
            return 0;
        }
        ((brightness * last as f32).floor() as usize).min(last)
    }

    /// Index and glyph for a final brightness.
    #[inline(always)]
    #[must_use]
    pub fn select(&self, brightness: f32) -> (usize, char) {
        let idx = self.index_for(brightness);
        (idx, self.glyph(idx))
    }

    /// Position of `index` along the ramp, in [0, 1].
    #[inline(always)]
    #[must_use]
    pub fn position(&self, index: usize) -> f32 {
        index.min(self.glyphs.len() - 1) as f32 / (self.glyphs.len() - 1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predefined_ramps_have_expected_lengths() {
        let lens: Vec<usize> = RampKind::ALL
            .iter()
            .map(|k| CharacterRamp::new(k.glyphs()).unwrap().len())
            .collect();
        assert_eq!(lens, vec![10, 15, 5, 4, 70]);
    }

    #[test]
    fn short_ramps_are_rejected() {
        assert_eq!(
            CharacterRamp::new("@"),
            Err(ConversionError::InvalidRamp { len: 1 })
        );
        assert_eq!(
            CharSet::Custom(String::new()).ramp(),
            Err(ConversionError::InvalidRamp { len: 0 })
        );
    }

    #[test]
    fn index_stays_in_bounds_at_endpoints() {
        for kind in RampKind::ALL {
            let ramp = CharacterRamp::new(kind.glyphs()).unwrap();
            assert_eq!(ramp.index_for(0.0), 0);
            assert_eq!(ramp.index_for(1.0), ramp.len() - 1);
            assert_eq!(ramp.index_for(1.5), ramp.len() - 1);
            assert_eq!(ramp.index_for(-0.2), 0);
            assert_eq!(ramp.index_for(f32::NAN), 0);
        }
    }

    #[test]
    fn index_monotonic() {
        let ramp = CharacterRamp::new(RAMP_DETAILED).unwrap();
        let mut prev = 0usize;
        for i in 0..=1000 {
            let idx = ramp.index_for(i as f32 / 1000.0);
            assert!(idx >= prev, "rampe non monotone à {i}");
            prev = idx;
        }
    }

    #[test]
    fn multibyte_glyphs_count_as_one() {
        let ramp = CharSet::Preset(RampKind::Blocks).ramp().unwrap();
        assert_eq!(ramp.select(1.0), (4, '█'));
        assert!((ramp.position(2) - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn untagged_charset_deserializes_names_and_literals() {
        #[derive(Deserialize)]
        struct Wrapper {
            char_set: CharSet,
        }
        let w: Wrapper = toml::from_str(r#"char_set = "minimal""#).unwrap();
        assert_eq!(w.char_set, CharSet::Preset(RampKind::Minimal));
        let w: Wrapper = toml::from_str(r#"char_set = " .oO@""#).unwrap();
        assert_eq!(w.char_set, CharSet::Custom(" .oO@".into()));
        let w: Wrapper = toml::from_str(r#"char_set = { custom = "minimal" }"#).unwrap();
        assert_eq!(w.char_set, CharSet::Custom("minimal".into()));
    }

    #[test]
    fn custom_ramps_serialize_as_tables() {
        #[derive(Serialize)]
        struct Wrapper {
            char_set: CharSet,
        }
        let text = toml::to_string(&Wrapper {
            char_set: CharSet::Custom("blocks".into()),
        })
        .unwrap();
        assert!(text.contains("custom = \"blocks\""));
        let text = toml::to_string(&Wrapper {
            char_set: CharSet::Preset(RampKind::Blocks),
        })
        .unwrap();
        assert_eq!(text.trim(), "char_set = \"blocks\"");
    }
}
