// src/config/rules.rs
//
// The enrichment rule table: which records get which values. Static
// configuration, validated eagerly; the engine never mutates it.

use serde::Deserialize;

use crate::core::sanitize::{contains_word_ci, escape_literal, to_lower};
use crate::error::PatchError;

pub const PRIMARY_LOCALE: &str = "fr";

/// Matching criterion of one rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    /// Exact, case-sensitive category tag. The tags are a closed set, so
    /// there is nothing to fold.
    Category(String),
    /// Word-boundary substring of a localized name, case-insensitive.
    NameContains { needle: String, locale: String },
}

impl Selector {
    pub fn matches(&self, category: &str, names: &[(String, String)]) -> bool {
        match self {
            Selector::Category(c) => category == c,
            Selector::NameContains { needle, locale } => names
                .iter()
                .find(|(l, _)| l == locale)
                .is_some_and(|(_, n)| contains_word_ci(n, needle)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Nutrition {
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
}

impl Nutrition {
    pub fn render(&self) -> String {
        format!(
            "{{ calories: {}, protein: {}, carbs: {}, fat: {} }}",
            self.calories, self.protein, self.carbs, self.fat
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Bilingual {
    pub fr: String,
    pub en: String,
}

impl Bilingual {
    pub fn render(&self) -> String {
        format!(
            "{{ fr: \"{}\", en: \"{}\" }}",
            escape_literal(&self.fr),
            escape_literal(&self.en)
        )
    }
}

/// Enrichment values one rule can carry. All optional; whatever is absent
/// leaves the record's corresponding field alone.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Payload {
    pub nutrition: Option<Nutrition>,
    pub quantity: Option<String>,
    pub tips: Option<Bilingual>,
    pub image: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnrichmentRule {
    pub selector: Selector,
    pub payload: Payload,
}

/// Ordered rule set. Order is declaration order; it breaks precedence ties.
#[derive(Clone, Debug, Default)]
pub struct RuleTable {
    rules: Vec<EnrichmentRule>,
}

impl RuleTable {
    pub fn new(rules: Vec<EnrichmentRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[EnrichmentRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Reject duplicate or empty selectors up front. Two rules for the
    /// same category or the same name keyword would shadow each other
    /// silently — that is a configuration mistake, not a precedence
    /// question.
    pub fn validate(&self) -> Result<(), PatchError> {
        for (i, a) in self.rules.iter().enumerate() {
            if let Selector::NameContains { needle, .. } = &a.selector {
                if needle.trim().is_empty() {
                    return Err(PatchError::InvalidConfig(s!("empty name selector")));
                }
            }
            if let Selector::Category(c) = &a.selector {
                if c.is_empty() {
                    return Err(PatchError::InvalidConfig(s!("empty category selector")));
                }
            }
            for b in &self.rules[..i] {
                if selectors_collide(&a.selector, &b.selector) {
                    return Err(PatchError::InvalidConfig(format!(
                        "duplicate selector: {}",
                        describe(&a.selector)
                    )));
                }
            }
        }
        Ok(())
    }

    /// The single winning rule for a record, if any. A name rule beats a
    /// category rule; among name rules the longest needle wins; remaining
    /// ties go to the earliest declaration. No match is a normal outcome.
    pub fn lookup(&self, category: &str, names: &[(String, String)]) -> Option<&EnrichmentRule> {
        let mut best: Option<(&EnrichmentRule, usize)> = None; // (rule, needle chars)
        for r in &self.rules {
            if !r.selector.matches(category, names) {
                continue;
            }
            match &r.selector {
                Selector::NameContains { needle, .. } => {
                    let len = needle.chars().count();
                    match best {
                        Some((_, prev)) if prev >= len => {}
                        _ => best = Some((r, len)),
                    }
                }
                Selector::Category(_) => {
                    if best.is_none() {
                        best = Some((r, 0));
                    }
                }
            }
        }
        best.map(|(r, _)| r)
    }
}

fn selectors_collide(a: &Selector, b: &Selector) -> bool {
    match (a, b) {
        (Selector::Category(x), Selector::Category(y)) => x == y,
        (
            Selector::NameContains { needle: x, locale: lx },
            Selector::NameContains { needle: y, locale: ly },
        ) => lx == ly && to_lower(x) == to_lower(y),
        _ => false,
    }
}

fn describe(sel: &Selector) -> String {
    match sel {
        Selector::Category(c) => format!("category \"{c}\""),
        Selector::NameContains { needle, locale } => format!("name \"{needle}\" ({locale})"),
    }
}

/* ---------- on-disk shape ---------- */

/// One rule as it appears in the JSON config file. Exactly one of
/// `category` / `name` selects.
#[derive(Debug, Deserialize)]
pub struct RuleDef {
    pub category: Option<String>,
    pub name: Option<String>,
    #[serde(default = "default_locale")]
    pub locale: String,
    pub quantity: Option<String>,
    pub nutrition: Option<Nutrition>,
    pub tips: Option<Bilingual>,
    pub image: Option<String>,
}

pub(crate) fn default_locale() -> String {
    s!(PRIMARY_LOCALE)
}

impl RuleDef {
    pub fn into_rule(self) -> Result<EnrichmentRule, PatchError> {
        let selector = match (self.category, self.name) {
            (Some(c), None) => Selector::Category(c),
            (None, Some(n)) => Selector::NameContains { needle: n, locale: self.locale },
            (Some(_), Some(_)) => {
                return Err(PatchError::InvalidConfig(s!(
                    "rule has both a category and a name selector"
                )));
            }
            (None, None) => {
                return Err(PatchError::InvalidConfig(s!("rule has no selector")));
            }
        };
        Ok(EnrichmentRule {
            selector,
            payload: Payload {
                nutrition: self.nutrition,
                quantity: self.quantity,
                tips: self.tips,
                image: self.image,
            },
        })
    }
}
