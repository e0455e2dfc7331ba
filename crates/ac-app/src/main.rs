use ac_ascii::Compositor;
use ac_core::config::{ConvertConfig, load_config, save_config};
use ac_core::frame::RasterImage;
use ac_core::preset::PresetLibrary;
use ac_export::RenderStyle;
use anyhow::{Context, Result};
use clap::Parser;

pub mod cli;
pub mod export;
pub mod hotreload;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Valider les combinaisons de flags
    cli.validate()?;

    // 4. Charger l'image et la config
    let image = ac_source::load_image(&cli.image)?;
    let config = resolve_config(&cli)?;
    if let Some(ref path) = cli.save_config {
        let (_, user_presets) = read_config_file(&cli)?;
        save_config(path, &config, &user_presets)?;
    }

    let exporter = export::Exporter::new(
        cli.export_format(),
        cli.output.as_deref(),
        cli.font.as_deref(),
        cli.font_size,
    )?;
    let mut compositor = Compositor::new();

    // 5. Première conversion : toute erreur est fatale
    run_once(&mut compositor, &exporter, &image, &config)?;

    // 6. Mode surveillance : une erreur garde la sortie précédente
    if cli.watch {
        let path = cli.config.as_deref().context("--watch requiert --config")?;
        let (_watcher, rx) = hotreload::spawn_config_watcher(path)?;
        while hotreload::wait_for_change(&rx, hotreload::DEBOUNCE) {
            let result = resolve_config(&cli)
                .and_then(|config| run_once(&mut compositor, &exporter, &image, &config));
            match result {
                Ok(()) => log::info!("Conversion relancée après modification de {}", path.display()),
                Err(e) => log::warn!("Conversion ignorée, sortie précédente conservée : {e:#}"),
            }
        }
    }

    Ok(())
}

/// Config file contents, or defaults when no `--config` is given.
fn read_config_file(cli: &cli::Cli) -> Result<(ConvertConfig, Vec<ac_core::preset::Preset>)> {
    match cli.config {
        Some(ref path) => load_config(path),
        None => Ok((ConvertConfig::default(), Vec::new())),
    }
}

/// Resolve config: defaults < config file < preset < CLI flags.
fn resolve_config(cli: &cli::Cli) -> Result<ConvertConfig> {
    let (mut config, user_presets) = read_config_file(cli)?;

    if let Some(ref name) = cli.preset {
        let mut library = PresetLibrary::new();
        for preset in user_presets {
            let preset_name = preset.name.clone();
            if !library.add(preset) {
                log::warn!("Preset utilisateur '{preset_name}' ignoré (nom vide ou réservé).");
            }
        }
        let preset = library.find(name).with_context(|| {
            let known: Vec<_> = library.presets().iter().map(|p| p.name.as_str()).collect();
            format!("Preset inconnu : {name} (disponibles : {})", known.join(", "))
        })?;
        preset.apply(&mut config);
        log::debug!("Preset '{}' appliqué", preset.name);
    }

    cli.apply_overrides(&mut config)?;
    config.clamp_all();
    Ok(config)
}

fn run_once(
    compositor: &mut Compositor,
    exporter: &export::Exporter,
    image: &RasterImage,
    config: &ConvertConfig,
) -> Result<()> {
    let conversion = compositor.convert(image, config)?;
    log::debug!(
        "Conversion {}x{} -> grille {}x{}",
        image.width(),
        image.height(),
        conversion.grid.width(),
        conversion.grid.height()
    );
    exporter.export(&conversion, &RenderStyle::from_config(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ac_core::charset::{CharSet, RampKind};
    use ac_core::theme::ThemeKind;

    fn cli(args: &[&str]) -> cli::Cli {
        cli::Cli::try_parse_from(std::iter::once("asciify").chain(args.iter().copied())).unwrap()
    }

    fn config_file(content: &str) -> (tempfile::TempDir, String) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("asciify.toml");
        std::fs::write(&path, content).unwrap();
        let path = path.to_string_lossy().into_owned();
        (dir, path)
    }

    #[test]
    fn defaults_without_config() {
        let config = resolve_config(&cli(&["in.png"])).unwrap();
        assert_eq!(config, ConvertConfig::default());
    }

    #[test]
    fn preset_overrides_file_and_flags_override_preset() {
        let (_dir, path) = config_file("[convert]\ntheme = \"neon\"\nresolution = 0.5\n");
        let config =
            resolve_config(&cli(&["in.png", "-c", &path, "--preset", "Logo", "--resolution", "0.2"]))
                .unwrap();
        // Logo: grayscale, minimal ramp; theme comes from the file
        assert!(config.grayscale);
        assert_eq!(config.char_set, CharSet::Preset(RampKind::Minimal));
        assert_eq!(config.theme, ThemeKind::Neon);
        assert!((config.resolution - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn user_presets_come_from_config() {
        let (_dir, path) = config_file(
            "[[preset]]\nname = \"Mine\"\nresolution = 0.3\ncharset = \"blocks\"\ngrayscale = false\ninverted = true\ncontrast = 1.0\nbrightness = 1.0\nblur = 0.0\nedge_detection = false\ndithering = false\n",
        );
        let config = resolve_config(&cli(&["in.png", "-c", &path, "--preset", "mine"])).unwrap();
        assert!(config.inverted);
        assert_eq!(config.char_set, CharSet::Preset(RampKind::Blocks));
    }

    #[test]
    fn unknown_preset_is_an_error() {
        assert!(resolve_config(&cli(&["in.png", "--preset", "nope"])).is_err());
    }

    #[test]
    fn flags_are_clamped() {
        let config = resolve_config(&cli(&["in.png", "--contrast", "9", "--resolution", "3"])).unwrap();
        assert!((config.filters.contrast - 3.0).abs() < f32::EPSILON);
        assert!((config.resolution - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn failed_conversion_leaves_output_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("art.txt");
        std::fs::write(&out, "previous").unwrap();
        let out_str = out.to_string_lossy().into_owned();
        let cli = cli(&["in.png", "-o", &out_str, "--resolution", "0.001"]);
        let config = resolve_config(&cli).unwrap();
        let exporter =
            export::Exporter::new(cli.export_format(), cli.output.as_deref(), None, 12.0).unwrap();
        let image = RasterImage::filled(10, 10, [128, 128, 128, 255]);
        let mut compositor = Compositor::new();
        assert!(run_once(&mut compositor, &exporter, &image, &config).is_err());
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "previous");

        let ok = cli::Cli::try_parse_from(["asciify", "in.png", "-o", &out_str, "--resolution", "1"]).unwrap();
        let config = resolve_config(&ok).unwrap();
        run_once(&mut compositor, &exporter, &image, &config).unwrap();
        assert_ne!(std::fs::read_to_string(&out).unwrap(), "previous");
    }
}
