use serde::{Deserialize, Serialize};

use crate::charset::{CharSet, RampKind};
use crate::config::ConvertConfig;

/// Named bundle of conversion settings.
///
/// # Example
/// ```
/// use ac_core::config::ConvertConfig;
/// use ac_core::preset::PresetLibrary;
///
/// let library = PresetLibrary::new();
/// let mut config = ConvertConfig::default();
/// library.find("sketch").unwrap().apply(&mut config);
/// assert!(config.grayscale);
/// assert!(config.filters.edge_detection);
/// ```
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Preset {
    pub name: String,
    pub resolution: f32,
    #[serde(alias = "charset")]
    pub char_set: CharSet,
    pub grayscale: bool,
    pub inverted: bool,
    pub contrast: f32,
    pub brightness: f32,
    pub blur: f32,
    pub edge_detection: bool,
    pub dithering: bool,
}

impl Preset {
    /// Les quatre presets livrés avec l'outil.
    #[must_use]
    pub fn builtins() -> Vec<Preset> {
        vec![
            Preset {
                name: "Photo Portrait".into(),
                resolution: 0.15,
                char_set: CharSet::Preset(RampKind::Detailed),
                grayscale: false,
                inverted: false,
                contrast: 1.2,
                brightness: 1.0,
                blur: 0.0,
                edge_detection: false,
                dithering: true,
            },
            Preset {
                name: "Logo".into(),
                resolution: 0.08,
                char_set: CharSet::Preset(RampKind::Minimal),
                grayscale: true,
                inverted: false,
                contrast: 1.5,
                brightness: 1.1,
                blur: 0.0,
                edge_detection: true,
                dithering: false,
            },
            Preset {
                name: "Pixel Art".into(),
                resolution: 0.05,
                char_set: CharSet::Preset(RampKind::Blocks),
                grayscale: false,
                inverted: false,
                contrast: 1.0,
                brightness: 1.0,
                blur: 0.0,
                edge_detection: false,
                dithering: true,
            },
            Preset {
                name: "Sketch".into(),
                resolution: 0.12,
                char_set: CharSet::Preset(RampKind::Standard),
                grayscale: true,
                inverted: false,
                contrast: 1.3,
                brightness: 0.9,
                blur: 0.5,
                edge_detection: true,
                dithering: false,
            },
        ]
    }

    /// Overwrite the preset's fields in `config`. Sharpening is reset to 0;
    /// theme and font aspect are left alone.
    pub fn apply(&self, config: &mut ConvertConfig) {
        config.resolution = self.resolution;
        config.char_set = self.char_set.clone();
        config.grayscale = self.grayscale;
        config.inverted = self.inverted;
        config.filters.contrast = self.contrast;
        config.filters.brightness = self.brightness;
        config.filters.blur_radius = self.blur;
        config.filters.sharpen_amount = 0.0;
        config.filters.edge_detection = self.edge_detection;
        config.filters.dithering = self.dithering;
    }

    /// Snapshot the current settings under `name`.
    #[must_use]
    pub fn capture(name: &str, config: &ConvertConfig) -> Preset {
        Preset {
            name: name.trim().to_string(),
            resolution: config.resolution,
            char_set: config.char_set.clone(),
            grayscale: config.grayscale,
            inverted: config.inverted,
            contrast: config.filters.contrast,
            brightness: config.filters.brightness,
            blur: config.filters.blur_radius,
            edge_detection: config.filters.edge_detection,
            dithering: config.filters.dithering,
        }
    }
}

/// Built-in presets followed by user presets.
pub struct PresetLibrary {
    presets: Vec<Preset>,
    builtin_count: usize,
}

impl Default for PresetLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl PresetLibrary {
    /// Library holding only the built-ins.
    #[must_use]
    pub fn new() -> Self {
        let presets = Preset::builtins();
        let builtin_count = presets.len();
        Self {
            presets,
            builtin_count,
        }
    }

    /// Add a user preset. A user preset with the same name is replaced;
    /// built-in names and blank names are refused.
    ///
    /// Returns whether the preset was stored.
    pub fn add(&mut self, preset: Preset) -> bool {
        if preset.name.trim().is_empty() {
            return false;
        }
        match self.position(&preset.name) {
            Some(i) if i < self.builtin_count => {
                log::warn!("Preset '{}' masquerait un preset intégré, ignoré", preset.name);
                false
            }
            Some(i) => {
                self.presets[i] = preset;
                true
            }
            None => {
                self.presets.push(preset);
                true
            }
        }
    }

    /// Remove a user preset. Built-ins cannot be removed.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(i) if i >= self.builtin_count => {
                self.presets.remove(i);
                true
            }
            _ => false,
        }
    }

    /// Drop every user preset.
    pub fn reset(&mut self) {
        self.presets.truncate(self.builtin_count);
    }

    /// Case-insensitive lookup.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Preset> {
        self.position(name).map(|i| &self.presets[i])
    }

    /// All presets, built-ins first.
    #[must_use]
    pub fn presets(&self) -> &[Preset] {
        &self.presets
    }

    /// User presets only.
    #[must_use]
    pub fn user_presets(&self) -> &[Preset] {
        &self.presets[self.builtin_count..]
    }

    fn position(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.presets
            .iter()
            .position(|p| p.name.eq_ignore_ascii_case(name))
    }
}
