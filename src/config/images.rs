// src/config/images.rs
//
// Image assignment configuration: rotation pool, keyword map, category
// fallback map and placeholder. Validated before any scanning starts so a
// record can never hit a dead end mid-run.

use serde::Deserialize;

use crate::config::rules::default_locale;
use crate::core::sanitize::to_lower;
use crate::error::PatchError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageMode {
    /// Cycle through a fixed pool, ignoring record content. Deterministic
    /// for a fixed pool and record order, which is what makes reruns
    /// reproducible; the cursor never leaves one run.
    Rotation,
    /// Match the primary-locale name against ordered keyword→asset pairs,
    /// fall back to the category map, then to the placeholder.
    Keyword,
}

#[derive(Clone, Debug)]
pub struct ImageConfig {
    pub mode: ImageMode,
    pub pool: Vec<String>,
    /// Ordered: first matching keyword wins.
    pub keywords: Vec<(String, String)>,
    pub categories: Vec<(String, String)>,
    pub placeholder: Option<String>,
    pub locale: String,
}

impl ImageConfig {
    pub fn validate(&self) -> Result<(), PatchError> {
        match self.mode {
            ImageMode::Rotation => {
                if self.pool.is_empty() {
                    return Err(PatchError::InvalidConfig(s!(
                        "rotation mode with an empty image pool"
                    )));
                }
            }
            ImageMode::Keyword => {
                if self.placeholder.is_none() {
                    return Err(PatchError::AssetUnavailable(s!(
                        "keyword mode needs a placeholder for records no keyword or category covers"
                    )));
                }
                for (i, (k, _)) in self.keywords.iter().enumerate() {
                    if k.trim().is_empty() {
                        return Err(PatchError::InvalidConfig(s!("empty image keyword")));
                    }
                    if self.keywords[..i].iter().any(|(p, _)| to_lower(p) == to_lower(k)) {
                        return Err(PatchError::InvalidConfig(format!(
                            "duplicate image keyword \"{k}\""
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/* ---------- on-disk shape ---------- */

#[derive(Debug, Deserialize)]
pub struct ImagesDef {
    pub mode: String,
    #[serde(default)]
    pub pool: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<(String, String)>,
    #[serde(default)]
    pub categories: Vec<(String, String)>,
    pub placeholder: Option<String>,
    #[serde(default = "default_locale")]
    pub locale: String,
}

impl ImagesDef {
    pub fn into_config(self) -> Result<ImageConfig, PatchError> {
        let mode = match self.mode.as_str() {
            "rotation" => ImageMode::Rotation,
            "keyword" => ImageMode::Keyword,
            other => {
                return Err(PatchError::InvalidConfig(format!("unknown image mode: {other}")));
            }
        };
        Ok(ImageConfig {
            mode,
            pool: self.pool,
            keywords: self.keywords,
            categories: self.categories,
            placeholder: self.placeholder,
            locale: self.locale,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_needs_a_pool() {
        let cfg = ImageConfig {
            mode: ImageMode::Rotation,
            pool: Vec::new(),
            keywords: Vec::new(),
            categories: Vec::new(),
            placeholder: None,
            locale: s!("fr"),
        };
        assert!(matches!(cfg.validate(), Err(PatchError::InvalidConfig(_))));
    }

    #[test]
    fn keyword_mode_without_placeholder_is_asset_unavailable() {
        let cfg = ImageConfig {
            mode: ImageMode::Keyword,
            pool: Vec::new(),
            keywords: vec![(s!("césar"), s!("/a.jpg"))],
            categories: Vec::new(),
            placeholder: None,
            locale: s!("fr"),
        };
        assert!(matches!(cfg.validate(), Err(PatchError::AssetUnavailable(_))));
    }

    #[test]
    fn duplicate_keywords_rejected() {
        let cfg = ImageConfig {
            mode: ImageMode::Keyword,
            pool: Vec::new(),
            keywords: vec![(s!("César"), s!("/a.jpg")), (s!("césar"), s!("/b.jpg"))],
            categories: Vec::new(),
            placeholder: Some(s!("/p.jpg")),
            locale: s!("fr"),
        };
        assert!(matches!(cfg.validate(), Err(PatchError::InvalidConfig(_))));
    }

    #[test]
    fn unknown_mode_rejected() {
        let def: ImagesDef = serde_json::from_str(r#"{ "mode": "shuffle" }"#).unwrap();
        assert!(def.into_config().is_err());
    }
}
