use std::path::Path;

use ac_core::frame::RasterImage;
use anyhow::{Context, Result};
use image::DynamicImage;

/// Charge une image depuis le disque en RGBA8.
///
/// Animated formats contribute their first frame only.
///
/// # Errors
/// Returns an error if the file cannot be read or decoded, or if it
/// decodes to an empty raster.
///
/// # Example
/// ```no_run
/// use ac_source::image::load_image;
/// use std::path::Path;
/// let raster = load_image(Path::new("photo.png")).unwrap();
/// ```
pub fn load_image(path: &Path) -> Result<RasterImage> {
    let img = image::open(path).with_context(|| format!("Impossible de charger {}", path.display()))?;
    let raster = to_raster(img).with_context(|| format!("Image inutilisable : {}", path.display()))?;
    log::info!(
        "Image chargée : {} ({}×{})",
        path.display(),
        raster.width(),
        raster.height()
    );
    Ok(raster)
}

/// Decode an in-memory encoded image (format sniffed from the bytes).
///
/// # Errors
/// Returns an error if the bytes are not a supported image.
pub fn decode_image(bytes: &[u8]) -> Result<RasterImage> {
    let img = image::load_from_memory(bytes).context("Décodage de l'image impossible")?;
    to_raster(img)
}

fn to_raster(img: DynamicImage) -> Result<RasterImage> {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(RasterImage::from_rgba(width, height, rgba.into_raw())?)
}
