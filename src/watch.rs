//! Rebuild-on-change support for `lucius serve`.

use crate::error::CliError;
use notify_debouncer_mini::notify::{RecommendedWatcher, RecursiveMode, Watcher};
use notify_debouncer_mini::{DebounceEventResult, Debouncer, new_debouncer};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEBOUNCE: Duration = Duration::from_millis(500);

/// Whether a change to `path` should be ignored.
///
/// Writes to the output directory and the post database come from the
/// generator itself and must not trigger another build.
pub fn is_ignored(path: &Path, ignored: &[PathBuf]) -> bool {
    ignored.iter().any(|prefix| path.starts_with(prefix))
}

/// Watch `root` recursively and call `on_change` once per burst of relevant
/// changes. The returned debouncer stops watching when dropped.
pub fn watch<F>(
    root: &Path,
    ignored: Vec<PathBuf>,
    mut on_change: F,
) -> Result<Debouncer<RecommendedWatcher>, CliError>
where
    F: FnMut() + Send + 'static,
{
    let mut debouncer = new_debouncer(DEBOUNCE, move |result: DebounceEventResult| {
        match result {
            Ok(events) => {
                let relevant: Vec<_> = events
                    .iter()
                    .filter(|event| !is_ignored(&event.path, &ignored))
                    .collect();
                if let Some(first) = relevant.first() {
                    log::info!(
                        "Detected {} change(s), first at {}; rebuilding",
                        relevant.len(),
                        first.path.display()
                    );
                    on_change();
                }
            }
            Err(e) => log::warn!("Watch error: {e}"),
        }
    })?;

    debouncer.watcher().watch(root, RecursiveMode::Recursive)?;
    log::info!("Watching {} for changes", root.display());
    Ok(debouncer)
}
