use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};

/// Délai de regroupement des événements d'un même enregistrement.
pub const DEBOUNCE: Duration = Duration::from_millis(200);

/// Surveille le fichier config et signale chaque modification sur un canal.
///
/// The parent directory is watched, not the file itself, so an editor
/// saving through a rename keeps being followed. Events are filtered on
/// the config's file name.
///
/// Retourne le Watcher (doit rester vivant tant que la surveillance dure).
///
/// # Errors
/// Returns an error if the watcher cannot be created or the path cannot be watched.
pub fn spawn_config_watcher(config_path: &Path) -> Result<(impl Watcher + use<>, flume::Receiver<()>)> {
    let file_name = config_path
        .file_name()
        .with_context(|| format!("Pas un fichier : {}", config_path.display()))?
        .to_os_string();
    let dir = match config_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let (tx, rx) = flume::unbounded();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
        Ok(event)
            if matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
                && event.paths.iter().any(|p| p.file_name() == Some(file_name.as_os_str())) =>
        {
            let _ = tx.send(());
        }
        Ok(_) => {}
        Err(e) => log::warn!("Erreur de surveillance : {e}"),
    })?;

    watcher.watch(&dir, RecursiveMode::NonRecursive)?;
    log::info!("Surveillance de {}", config_path.display());
    Ok((watcher, rx))
}

/// Bloque jusqu'à la prochaine modification, puis absorbe les événements
/// arrivés dans la fenêtre `window`.
///
/// Returns `false` once the watcher is gone.
pub fn wait_for_change(rx: &flume::Receiver<()>, window: Duration) -> bool {
    if rx.recv().is_err() {
        return false;
    }
    while rx.recv_timeout(window).is_ok() {}
    true
}
