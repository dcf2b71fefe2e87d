// src/config/mod.rs

pub mod consts;
pub mod images;
pub mod rules;

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::PatchError;
use images::{ImageConfig, ImagesDef};
use rules::{RuleDef, RuleTable};

/// On-disk shape of a full configuration file.
#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub rules: Vec<RuleDef>,
    pub images: Option<ImagesDef>,
}

/// Load and validate configuration. Without a path, the built-in tables
/// apply. Validation happens here, before any catalog text is scanned.
pub fn load(path: Option<&Path>) -> Result<(RuleTable, Option<ImageConfig>), PatchError> {
    let (table, images) = match path {
        None => (consts::default_rules(), Some(consts::default_images())),
        Some(p) => {
            let text = fs::read_to_string(p)?;
            let cfg: ConfigFile = serde_json::from_str(&text)?;
            let mut rules = Vec::with_capacity(cfg.rules.len());
            for def in cfg.rules {
                rules.push(def.into_rule()?);
            }
            let images = match cfg.images {
                Some(def) => Some(def.into_config()?),
                None => None,
            };
            (RuleTable::new(rules), images)
        }
    };
    table.validate()?;
    if let Some(cfg) = &images {
        cfg.validate()?;
    }
    Ok((table, images))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::images::ImageMode;
    use crate::config::rules::Selector;

    #[test]
    fn defaults_validate() {
        let (rules, images) = load(None).unwrap();
        assert!(!rules.is_empty());
        let images = images.unwrap();
        assert_eq!(images.mode, ImageMode::Keyword);
        assert!(images.placeholder.is_some());
    }

    #[test]
    fn config_file_round_trips() {
        let json = r#"{
            "rules": [
                { "category": "Soupes", "quantity": "300ml",
                  "nutrition": { "calories": 180, "protein": 8, "carbs": 22, "fat": 6 } },
                { "name": "césar", "image": "/images/caesar-salad.jpg" }
            ],
            "images": { "mode": "rotation", "pool": ["/a.jpg", "/b.jpg"] }
        }"#;
        let cfg: ConfigFile = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.rules.len(), 2);

        let rule = cfg.rules.into_iter().nth(1).unwrap().into_rule().unwrap();
        match rule.selector {
            Selector::NameContains { ref needle, ref locale } => {
                assert_eq!(needle, "césar");
                assert_eq!(locale, "fr");
            }
            _ => panic!("expected name selector"),
        }

        let images = cfg.images.unwrap().into_config().unwrap();
        assert_eq!(images.mode, ImageMode::Rotation);
        assert_eq!(images.pool.len(), 2);
        images.validate().unwrap();
    }
}
