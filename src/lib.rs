//! The `lucius` command line: build, update and preview a site.

pub mod error;
pub mod serve;
pub mod watch;

pub use error::CliError;
pub use lucius_site::{BuildReport, SiteConfig, SiteGenerator};

use serve::StaticFiles;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Resolve the project root so watcher events and ignore rules agree.
pub fn project_root(root: &Path) -> Result<PathBuf, CliError> {
    root.canonicalize().map_err(|source| CliError::Root {
        path: root.to_path_buf(),
        source,
    })
}

/// Rebuild the whole site.
pub fn build(root: &Path) -> Result<BuildReport, CliError> {
    let mut generator = SiteGenerator::open(project_root(root)?)?;
    Ok(generator.generate_all()?)
}

/// Render new posts and refresh the index and category pages.
pub fn update(root: &Path) -> Result<BuildReport, CliError> {
    let mut generator = SiteGenerator::open(project_root(root)?)?;
    Ok(generator.update()?)
}

/// Build, then serve the output directory and rebuild whenever sources change.
///
/// Blocks until the process is stopped.
pub fn serve(root: &Path, port: Option<u16>) -> Result<(), CliError> {
    let root = project_root(root)?;
    let mut generator = SiteGenerator::open(&root)?;
    generator.generate_all()?;

    let config = generator.config().clone();
    let files = StaticFiles::new(generator.output_path());
    let ignored = vec![root.join(&config.output_dir), root.join(&config.db_file)];

    let generator = Arc::new(Mutex::new(generator));
    let rebuild = Arc::clone(&generator);
    let _watcher = watch::watch(&root, ignored, move || match rebuild.lock() {
        Ok(mut generator) => {
            if let Err(e) = generator.generate_all() {
                log::error!("Rebuild failed: {e}");
            }
        }
        Err(_) => log::error!("Generator lock poisoned; skipping rebuild"),
    })?;

    serve::serve(&files, port.unwrap_or(config.port))
}

/// Print a build summary the way the generator reports posts.
pub fn report(summary: &BuildReport) {
    for (source, missing) in &summary.rejected {
        log::warn!("Skipped {source}: missing {}", missing.join(", "));
    }
    log::info!(
        "{} post(s) written, {} skipped, {} category page(s)",
        summary.generated.len(),
        summary.rejected.len(),
        summary.categories
    );
}
