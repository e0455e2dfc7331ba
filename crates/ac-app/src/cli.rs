use std::path::PathBuf;

use ac_core::charset::{CharSet, RampKind};
use ac_core::config::ConvertConfig;
use ac_core::theme::ThemeKind;
use ac_export::ExportFormat;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

/// asciify: convertit une image en art ASCII (texte, HTML, SVG, JSON, PNG).
#[allow(clippy::struct_excessive_bools)]
#[derive(Parser, Debug)]
#[command(name = "asciify", version, about, long_about = None)]
pub struct Cli {
    /// Image source (PNG, JPEG, BMP, GIF).
    pub image: PathBuf,

    /// Fichier de configuration TOML.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Preset nommé (intégré ou défini dans la config).
    #[arg(long)]
    pub preset: Option<String>,

    /// Densité d'échantillonnage dans (0, 1].
    #[arg(short, long)]
    pub resolution: Option<f32>,

    /// Rampe prédéfinie : standard, detailed, blocks, minimal, extended.
    #[arg(long)]
    pub charset: Option<String>,

    /// Rampe littérale, du plus sombre au plus clair.
    #[arg(long, conflicts_with = "charset")]
    pub custom_ramp: Option<String>,

    /// Luma simple, glyphes dans la couleur du thème.
    #[arg(long, default_value_t = false)]
    pub grayscale: bool,

    /// Inverser la luminance.
    #[arg(long, default_value_t = false)]
    pub invert: bool,

    /// Thème : default, dark, white, matrix, retro, neon, cyberpunk.
    #[arg(long)]
    pub theme: Option<String>,

    /// Contraste [0, 3].
    #[arg(long)]
    pub contrast: Option<f32>,

    /// Luminosité [0, 3].
    #[arg(long)]
    pub brightness: Option<f32>,

    /// Rayon de flou gaussien [0, 20].
    #[arg(long)]
    pub blur: Option<f32>,

    /// Intensité de netteté [0, 10].
    #[arg(long)]
    pub sharpen: Option<f32>,

    /// Détection de contours (Sobel).
    #[arg(long, default_value_t = false)]
    pub edges: bool,

    /// Tramage ordonné Bayer 4x4.
    #[arg(long, default_value_t = false)]
    pub dither: bool,

    /// Format de sortie. Déduit de l'extension de --output sinon.
    #[arg(short, long, value_enum)]
    pub format: Option<Format>,

    /// Fichier de sortie. Sortie standard si absent (formats texte).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Police TTF/OTF monospace pour l'export PNG.
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Taille de police de l'export PNG, en pixels.
    #[arg(long, default_value_t = 12.0)]
    pub font_size: f32,

    /// Écrire la configuration résolue dans ce fichier TOML.
    #[arg(long)]
    pub save_config: Option<PathBuf>,

    /// Relancer la conversion à chaque modification de --config.
    #[arg(long, default_value_t = false)]
    pub watch: bool,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

/// Formats exposed on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Html,
    Svg,
    Json,
    Png,
}

impl From<Format> for ExportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => Self::Text,
            Format::Html => Self::Html,
            Format::Svg => Self::Svg,
            Format::Json => Self::Json,
            Format::Png => Self::Png,
        }
    }
}

impl Cli {
    /// Explicit `--format`, else the `--output` extension, else text.
    #[must_use]
    pub fn export_format(&self) -> ExportFormat {
        self.format.map(ExportFormat::from).unwrap_or_else(|| {
            self.output
                .as_deref()
                .and_then(ExportFormat::from_path)
                .unwrap_or(ExportFormat::Text)
        })
    }

    /// Reject flag combinations that cannot produce an output.
    ///
    /// # Errors
    /// Returns an error for PNG without `--font` or `--output`, and for
    /// `--watch` without `--config`.
    pub fn validate(&self) -> Result<()> {
        if self.export_format() == ExportFormat::Png {
            if self.font.is_none() {
                anyhow::bail!("L'export PNG requiert --font.");
            }
            if self.output.is_none() {
                anyhow::bail!("L'export PNG requiert --output.");
            }
        }
        if self.watch && self.config.is_none() {
            anyhow::bail!("--watch surveille le fichier --config, qui est absent.");
        }
        Ok(())
    }

    /// Apply command-line overrides on top of a resolved config.
    ///
    /// Boolean flags only switch features on.
    ///
    /// # Errors
    /// Returns an error for an unknown ramp or theme name.
    pub fn apply_overrides(&self, config: &mut ConvertConfig) -> Result<()> {
        if let Some(r) = self.resolution {
            config.resolution = r;
        }
        if let Some(ref name) = self.charset {
            let kind = RampKind::from_name(name).with_context(|| {
                let known: Vec<_> = RampKind::ALL.iter().map(|k| k.name()).collect();
                format!("Rampe inconnue '{name}' (attendu : {})", known.join(", "))
            })?;
            config.char_set = CharSet::Preset(kind);
        }
        if let Some(ref ramp) = self.custom_ramp {
            config.char_set = CharSet::Custom(ramp.clone());
        }
        if self.grayscale {
            config.grayscale = true;
        }
        if self.invert {
            config.inverted = true;
        }
        if let Some(ref name) = self.theme {
            config.theme =
                ThemeKind::from_name(name).with_context(|| format!("Thème inconnu '{name}'"))?;
        }

        let f = &mut config.filters;
        if let Some(v) = self.contrast {
            f.contrast = v;
        }
        if let Some(v) = self.brightness {
            f.brightness = v;
        }
        if let Some(v) = self.blur {
            f.blur_radius = v;
        }
        if let Some(v) = self.sharpen {
            f.sharpen_amount = v;
        }
        if self.edges {
            f.edge_detection = true;
        }
        if self.dither {
            f.dithering = true;
        }
        Ok(())
    }
}
