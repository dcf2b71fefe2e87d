// src/runner.rs
use std::path::PathBuf;

use crate::{
    cli::{ImageSetting, Params},
    config,
    error::PatchError,
    patch::engine::{self, RunReport},
    store::CatalogStore,
};

/// What one invocation produced.
pub struct RunSummary {
    pub report: RunReport,
    pub written: Option<PathBuf>,
}

/// Top-level runner: load and validate configuration, read the catalog,
/// patch, write back. Any error aborts before the write — the store is
/// never left half-patched.
pub fn run(params: &Params) -> Result<RunSummary, PatchError> {
    let (rules, mut images) = config::load(params.rules.as_deref())?;

    match params.images {
        Some(ImageSetting::Off) => images = None,
        Some(ImageSetting::Mode(mode)) => {
            // Flag overrides the configured mode; the maps and pool come
            // from the config (or the defaults) either way.
            let mut cfg = images.take().unwrap_or_else(config::consts::default_images);
            cfg.mode = mode;
            cfg.validate()?;
            images = Some(cfg);
        }
        None => {}
    }

    let file = params
        .file
        .as_ref()
        .ok_or_else(|| PatchError::InvalidConfig(s!("no catalog file given")))?;
    let store = CatalogStore::new(file);
    let text = store.read()?;
    logf!("run: read {} bytes from {}", text.len(), file.display());

    let (patched, report) = engine::run(&text, &rules, images.as_ref(), params.overwrite)?;

    if params.dry_run {
        return Ok(RunSummary { report, written: None });
    }

    let target = match &params.out {
        Some(out) => CatalogStore::new(out),
        None => store,
    };
    target.write(&patched)?;
    logf!("run: wrote {} bytes to {}", patched.len(), target.path().display());

    Ok(RunSummary { report, written: Some(target.path().to_path_buf()) })
}
