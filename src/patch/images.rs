// src/patch/images.rs

use crate::config::images::{ImageConfig, ImageMode};
use crate::core::sanitize::contains_word_ci;
use crate::error::PatchError;
use crate::patch::locate::RecordSpan;

/// Stateful image chooser. The rotation cursor lives here and nowhere
/// else; a fresh assigner per run keeps reruns reproducible.
pub struct ImageAssigner<'a> {
    cfg: &'a ImageConfig,
    cursor: usize,
}

impl<'a> ImageAssigner<'a> {
    pub fn new(cfg: &'a ImageConfig) -> Self {
        Self { cfg, cursor: 0 }
    }

    /// The asset for one record. Rotation ignores record content entirely;
    /// keyword mode reads the configured locale's name, first matching
    /// keyword wins, then the category map, then the placeholder.
    pub fn assign(&mut self, span: &RecordSpan) -> Result<String, PatchError> {
        match self.cfg.mode {
            ImageMode::Rotation => {
                if self.cfg.pool.is_empty() {
                    return Err(PatchError::AssetUnavailable(s!("image pool is empty")));
                }
                let asset = self.cfg.pool[self.cursor % self.cfg.pool.len()].clone();
                self.cursor += 1;
                Ok(asset)
            }
            ImageMode::Keyword => {
                let name = span.name(&self.cfg.locale).unwrap_or("");
                for (kw, asset) in &self.cfg.keywords {
                    if contains_word_ci(name, kw) {
                        return Ok(asset.clone());
                    }
                }
                for (cat, asset) in &self.cfg.categories {
                    if span.category == *cat {
                        return Ok(asset.clone());
                    }
                }
                self.cfg.placeholder.clone().ok_or_else(|| {
                    PatchError::AssetUnavailable(format!(
                        "no asset for \"{name}\" in category \"{}\"",
                        span.category
                    ))
                })
            }
        }
    }
}
