pub mod build;
pub mod classify;

use std::path::Path;

use anyhow::Context;
use sunder_engine::{ClassModel, SunderConfig};

/// Read the class models exported by the host compiler.
pub(crate) fn load_models(path: &Path) -> anyhow::Result<Vec<ClassModel>> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let models: Vec<ClassModel> = serde_json::from_str(&source)
        .with_context(|| format!("{} is not a valid class model list", path.display()))?;
    log::debug!("loaded {} class model(s) from {}", models.len(), path.display());
    Ok(models)
}

/// Load the explicit config file, or discover `sunder.toml` in the
/// working directory.
pub(crate) fn load_config(path: Option<&Path>) -> anyhow::Result<SunderConfig> {
    match path {
        Some(path) => SunderConfig::from_file(path)
            .with_context(|| format!("failed to load {}", path.display())),
        None => {
            let cwd = std::env::current_dir()?;
            Ok(SunderConfig::discover(&cwd)?)
        }
    }
}
