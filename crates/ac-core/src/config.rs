use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::charset::CharSet;
use crate::preset::Preset;
use crate::theme::ThemeKind;

/// Correction d'aspect par défaut : un glyphe est environ deux fois plus haut que large.
pub const DEFAULT_FONT_ASPECT: f32 = 0.5;

/// Paramètres du stack de filtres, immuables pendant une conversion.
///
/// Each stage is a no-op at its neutral value.
///
/// # Example
/// ```
/// use ac_core::config::FilterConfig;
/// assert!(FilterConfig::default().is_identity());
/// ```
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct FilterConfig {
    /// Multiplicateur de contraste autour de 128. 1.0 = neutre.
    pub contrast: f32,
    /// Multiplicateur de luminosité. 1.0 = neutre.
    pub brightness: f32,
    /// Rayon du flou en pixels. 0 = désactivé.
    pub blur_radius: f32,
    /// Force du renforcement. 0 = désactivé.
    pub sharpen_amount: f32,
    /// Remplacer l'image par sa carte de contours Sobel.
    pub edge_detection: bool,
    /// Tramage ordonné Bayer 4×4 avant sélection du glyphe.
    pub dithering: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            contrast: 1.0,
            brightness: 1.0,
            blur_radius: 0.0,
            sharpen_amount: 0.0,
            edge_detection: false,
            dithering: false,
        }
    }
}

impl FilterConfig {
    /// True when no stage would touch the pixel buffer.
    ///
    /// Dithering acts on brightness, not pixels, so it is ignored here.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_identity(&self) -> bool {
        self.contrast == 1.0
            && self.brightness == 1.0
            && self.blur_radius <= 0.0
            && self.sharpen_amount <= 0.0
            && !self.edge_detection
    }
}

/// Configuration complète d'une conversion.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use ac_core::config::ConvertConfig;
/// let config = ConvertConfig::default();
/// assert!((config.resolution - 0.11).abs() < f32::EPSILON);
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ConvertConfig {
    /// Fraction de densité dans (0, 1].
    pub resolution: f32,
    /// Rampe de caractères (preset ou littérale).
    pub char_set: CharSet,
    /// Luma simple et couleur unique du thème.
    pub grayscale: bool,
    /// Inverser la luminance (pour fond clair).
    pub inverted: bool,
    /// Correction d'aspect verticale des glyphes.
    pub font_aspect: f32,
    /// Thème utilisé en mode niveaux de gris et par les exports.
    pub theme: ThemeKind,
    /// Stack de filtres.
    pub filters: FilterConfig,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            resolution: 0.11,
            char_set: CharSet::default(),
            grayscale: false,
            inverted: false,
            font_aspect: DEFAULT_FONT_ASPECT,
            theme: ThemeKind::Default,
            filters: FilterConfig::default(),
        }
    }
}

fn finite_or(v: f32, fallback: f32) -> f32 {
    if v.is_finite() { v } else { fallback }
}

impl ConvertConfig {
    /// Clamp numeric fields to their valid ranges.
    /// Called after TOML deserialization to prevent out-of-range values.
    ///
    /// The resolution is only bounded from above: a value too small to
    /// produce a cell must still surface as a conversion error.
    pub fn clamp_all(&mut self) {
        let d = FilterConfig::default();
        let f = &mut self.filters;
        f.contrast = finite_or(f.contrast, d.contrast).clamp(0.0, 3.0);
        f.brightness = finite_or(f.brightness, d.brightness).clamp(0.0, 3.0);
        f.blur_radius = finite_or(f.blur_radius, d.blur_radius).clamp(0.0, 20.0);
        f.sharpen_amount = finite_or(f.sharpen_amount, d.sharpen_amount).clamp(0.0, 10.0);
        self.font_aspect = finite_or(self.font_aspect, DEFAULT_FONT_ASPECT).clamp(0.1, 4.0);
        if self.resolution > 1.0 {
            self.resolution = 1.0;
        }
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    convert: Option<ConvertSection>,
    filters: Option<FilterSection>,
    #[serde(default)]
    preset: Vec<Preset>,
}

/// `[convert]` section, all fields optional for partial override.
#[derive(Deserialize)]
struct ConvertSection {
    resolution: Option<f32>,
    #[serde(alias = "charset")]
    char_set: Option<CharSet>,
    grayscale: Option<bool>,
    inverted: Option<bool>,
    font_aspect: Option<f32>,
    theme: Option<ThemeKind>,
}

/// `[filters]` section, all fields optional.
#[derive(Deserialize)]
struct FilterSection {
    contrast: Option<f32>,
    brightness: Option<f32>,
    #[serde(alias = "blur")]
    blur_radius: Option<f32>,
    #[serde(alias = "sharpen")]
    sharpen_amount: Option<f32>,
    edge_detection: Option<bool>,
    dithering: Option<bool>,
}

#[derive(Serialize)]
struct ConfigOut<'a> {
    convert: ConvertOut<'a>,
    filters: &'a FilterConfig,
    #[serde(skip_serializing_if = "<[Preset]>::is_empty")]
    preset: &'a [Preset],
}

#[derive(Serialize)]
struct ConvertOut<'a> {
    resolution: f32,
    char_set: &'a CharSet,
    grayscale: bool,
    inverted: bool,
    font_aspect: f32,
    theme: ThemeKind,
}

/// Parse TOML content and merge it over the defaults.
///
/// Returns the merged configuration and any `[[preset]]` entries.
///
/// # Errors
/// Returns an error if the content is not valid TOML for this layout.
///
/// # Example
/// ```
/// use ac_core::config::parse_config;
/// let (config, presets) = parse_config("[convert]\ngrayscale = true\n").unwrap();
/// assert!(config.grayscale);
/// assert!(presets.is_empty());
/// ```
pub fn parse_config(content: &str) -> Result<(ConvertConfig, Vec<Preset>)> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;
    let mut config = ConvertConfig::default();

    if let Some(c) = file.convert {
        if let Some(v) = c.resolution {
            config.resolution = v;
        }
        if let Some(v) = c.char_set {
            config.char_set = v;
        }
        if let Some(v) = c.grayscale {
            config.grayscale = v;
        }
        if let Some(v) = c.inverted {
            config.inverted = v;
        }
        if let Some(v) = c.font_aspect {
            config.font_aspect = v;
        }
        if let Some(v) = c.theme {
            config.theme = v;
        }
    }

    if let Some(f) = file.filters {
        if let Some(v) = f.contrast {
            config.filters.contrast = v;
        }
        if let Some(v) = f.brightness {
            config.filters.brightness = v;
        }
        if let Some(v) = f.blur_radius {
            config.filters.blur_radius = v;
        }
        if let Some(v) = f.sharpen_amount {
            config.filters.sharpen_amount = v;
        }
        if let Some(v) = f.edge_detection {
            config.filters.edge_detection = v;
        }
        if let Some(v) = f.dithering {
            config.filters.dithering = v;
        }
    }

    config.clamp_all();
    Ok((config, file.preset))
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use ac_core::config::load_config;
/// use std::path::Path;
/// let (config, presets) = load_config(Path::new("asciify.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<(ConvertConfig, Vec<Preset>)> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    let loaded =
        parse_config(&content).with_context(|| format!("Config invalide : {}", path.display()))?;
    log::info!("Config chargée depuis {}", path.display());
    Ok(loaded)
}

/// Serialize `config` (and optional user presets) to TOML.
///
/// # Errors
/// Returns an error if serialization fails.
pub fn to_toml(config: &ConvertConfig, presets: &[Preset]) -> Result<String> {
    let out = ConfigOut {
        convert: ConvertOut {
            resolution: config.resolution,
            char_set: &config.char_set,
            grayscale: config.grayscale,
            inverted: config.inverted,
            font_aspect: config.font_aspect,
            theme: config.theme,
        },
        filters: &config.filters,
        preset: presets,
    };
    toml::to_string_pretty(&out).context("Erreur de sérialisation TOML")
}

/// Écrit la configuration dans un fichier TOML relisible par [`load_config`].
///
/// # Errors
/// Returns an error if serialization or the write fails.
pub fn save_config(path: &Path, config: &ConvertConfig, presets: &[Preset]) -> Result<()> {
    let content = to_toml(config, presets)?;
    std::fs::write(path, content)
        .with_context(|| format!("Impossible d'écrire {}", path.display()))?;
    log::info!("Config sauvegardée dans {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charset::RampKind;

    #[test]
    fn empty_file_yields_defaults() {
        let (config, presets) = parse_config("").unwrap();
        assert_eq!(config, ConvertConfig::default());
        assert!(presets.is_empty());
    }

    #[test]
    fn partial_sections_override_only_given_keys() {
        let (config, _) = parse_config(
            r#"
            [convert]
            charset = "blocks"
            theme = "matrix"

            [filters]
            blur = 1.5
            dithering = true
            "#,
        )
        .unwrap();
        assert_eq!(config.char_set, CharSet::Preset(RampKind::Blocks));
        assert_eq!(config.theme, ThemeKind::Matrix);
        assert!((config.filters.blur_radius - 1.5).abs() < f32::EPSILON);
        assert!(config.filters.dithering);
        assert!((config.filters.contrast - 1.0).abs() < f32::EPSILON);
        assert!((config.resolution - 0.11).abs() < f32::EPSILON);
    }

    #[test]
    fn clamp_bounds_values_but_not_small_resolution() {
        let mut config = ConvertConfig {
            resolution: 0.0001,
            font_aspect: f32::NAN,
            ..ConvertConfig::default()
        };
        config.filters.contrast = 50.0;
        config.filters.sharpen_amount = -1.0;
        config.clamp_all();
        assert!((config.resolution - 0.0001).abs() < f32::EPSILON);
        assert!((config.font_aspect - DEFAULT_FONT_ASPECT).abs() < f32::EPSILON);
        assert!((config.filters.contrast - 3.0).abs() < f32::EPSILON);
        assert!(config.filters.sharpen_amount.abs() < f32::EPSILON);

        config.resolution = 4.0;
        config.clamp_all();
        assert!((config.resolution - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn unknown_theme_is_a_parse_error() {
        assert!(parse_config("[convert]\ntheme = \"sepia\"\n").is_err());
    }

    #[test]
    fn toml_roundtrip_preserves_config_and_presets() {
        let mut config = ConvertConfig {
            char_set: CharSet::Custom(" .oO@".into()),
            inverted: true,
            ..ConvertConfig::default()
        };
        config.filters.edge_detection = true;
        let presets = vec![Preset::capture("Mine", &config)];

        let text = to_toml(&config, &presets).unwrap();
        let (back, back_presets) = parse_config(&text).unwrap();
        assert_eq!(back, config);
        assert_eq!(back_presets, presets);
    }

    #[test]
    fn custom_ramp_named_like_a_preset_survives_save() {
        let config = ConvertConfig {
            char_set: CharSet::Custom("minimal".into()),
            ..ConvertConfig::default()
        };
        let presets = vec![Preset::capture("Letters", &config)];

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("asciify.toml");
        save_config(&path, &config, &presets).unwrap();
        let (back, back_presets) = load_config(&path).unwrap();
        assert_eq!(back.char_set, CharSet::Custom("minimal".into()));
        assert_eq!(back_presets[0].char_set, CharSet::Custom("minimal".into()));
        assert_eq!(back.char_set.ramp().unwrap().len(), 7);
    }
}
