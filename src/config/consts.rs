// src/config/consts.rs
//
// Built-in enrichment tables. These consolidate the per-category values
// that used to be re-declared, with drifting figures, across several ad
// hoc maintenance scripts; this table is the single authoritative copy.
// A JSON config file replaces them wholesale.

use crate::config::images::{ImageConfig, ImageMode};
use crate::config::rules::{
    Bilingual, EnrichmentRule, Nutrition, Payload, RuleTable, Selector, PRIMARY_LOCALE,
};

// Field keys of the catalog grammar.
pub const KEY_CATEGORY: &str = "category";
pub const KEY_NAME: &str = "name";
pub const FIELD_NUTRITION: &str = "nutrition";
pub const FIELD_QUANTITY: &str = "quantity";
pub const FIELD_TIPS: &str = "nutritionalTips";
pub const FIELD_IMAGE: &str = "image";

pub const DEFAULT_PLACEHOLDER: &str = "/images/food-placeholder.jpg";

/// Rotation pool: the generic menu shots available on the site.
pub const DEFAULT_POOL: [&str; 7] = [
    "/images/menu/WgESo0WjYDzG.jpg",
    "/images/menu/6BnExjt67ce6.jpg",
    "/images/menu/WU23K8Mz4HXE.jpg",
    "/images/menu/xGkxjMaoLLlM.jpg",
    "/images/menu/X5oLMAlBg8Q1.jpg",
    "/images/menu/TOfmOflBRqDW.jpg",
    "/images/menu/JMDUTzf6D48y.jpg",
];

fn cat(category: &str, quantity: &str, n: [u32; 4], tips: Option<(&str, &str)>) -> EnrichmentRule {
    EnrichmentRule {
        selector: Selector::Category(s!(category)),
        payload: Payload {
            nutrition: Some(Nutrition { calories: n[0], protein: n[1], carbs: n[2], fat: n[3] }),
            quantity: Some(s!(quantity)),
            tips: tips.map(|(fr, en)| Bilingual { fr: s!(fr), en: s!(en) }),
            image: None,
        },
    }
}

/// Per-category portion sizes, nutrition facts and bilingual tips.
pub fn default_rules() -> RuleTable {
    RuleTable::new(vec![
        cat("Sandwichs", "250g", [360, 16, 42, 13], Some((
            "Riche en protéines et fibres. Parfait pour un déjeuner équilibré qui vous garde rassasié.",
            "Rich in protein and fiber. Perfect for a balanced lunch that keeps you satisfied.",
        ))),
        cat("Salades", "350g", [280, 12, 25, 15], Some((
            "Excellente source de vitamines et minéraux. Faible en calories, idéal pour une alimentation saine.",
            "Excellent source of vitamins and minerals. Low in calories, ideal for healthy eating.",
        ))),
        cat("Wraps", "230g", [380, 18, 42, 14], None),
        cat("Soupes", "300ml", [180, 8, 22, 6], Some((
            "Réconfortante et nutritive. Aide à l'hydratation et favorise la digestion.",
            "Comforting and nutritious. Helps with hydration and promotes digestion.",
        ))),
        cat("Plats Principaux", "400g", [520, 35, 48, 20], Some((
            "Repas complet et équilibré. Contient tous les macronutriments essentiels pour votre énergie.",
            "Complete and balanced meal. Contains all essential macronutrients for your energy.",
        ))),
        cat("Viandes", "180g", [380, 42, 5, 22], Some((
            "Excellente source de protéines de haute qualité. Riche en fer et vitamines B.",
            "Excellent source of high-quality protein. Rich in iron and B vitamins.",
        ))),
        cat("Traiteur - Bouchées", "12 pièces", [450, 18, 38, 22], Some((
            "Portions contrôlées parfaites pour les événements. Équilibre entre saveur et nutrition.",
            "Perfect portion-controlled for events. Balance between flavor and nutrition.",
        ))),
        cat("Traiteur - Buffets", "pour 10-12 pers.", [520, 28, 45, 24], Some((
            "Variété équilibrée pour tous les goûts. Permet de composer un repas personnalisé et nutritif.",
            "Balanced variety for all tastes. Allows you to compose a personalized and nutritious meal.",
        ))),
        cat("Desserts", "130g", [320, 5, 48, 14], Some((
            "À déguster avec modération. Source de plaisir et d'énergie rapide.",
            "Enjoy in moderation. Source of pleasure and quick energy.",
        ))),
        cat("Boîtes à Lunch", "600g", [650, 28, 68, 24], Some((
            "Repas complet et pratique. Portions calculées pour un apport nutritionnel optimal.",
            "Complete and convenient meal. Portions calculated for optimal nutritional intake.",
        ))),
        cat("Boissons", "500ml", [120, 2, 28, 1], None),
    ])
}

fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
    raw.iter().map(|(k, v)| (s!(*k), s!(*v))).collect()
}

/// Keyword-mode image maps: named dishes first, then the category
/// fallbacks, then the placeholder.
pub fn default_images() -> ImageConfig {
    ImageConfig {
        mode: ImageMode::Keyword,
        pool: DEFAULT_POOL.iter().map(|p| s!(*p)).collect(),
        keywords: pairs(&[
            ("césar", "/images/caesar-salad.jpg"),
            ("caesar", "/images/caesar-salad.jpg"),
            ("grecque", "/images/greek-salad.jpg"),
            ("greek", "/images/greek-salad.jpg"),
            ("quinoa", "/images/quinoa-salad.jpg"),
            ("wrap", "/images/wrap.jpg"),
        ]),
        categories: pairs(&[
            ("Sandwichs", "/images/sandwich.jpg"),
            ("Salades", "/images/caesar-salad.jpg"),
            ("Soupes", "/images/soup.jpg"),
            ("Plats Principaux", "/images/main-dish.jpg"),
            ("Viandes", "/images/meat.jpg"),
            ("Traiteur - Bouchées", "/images/sandwich.jpg"),
            ("Traiteur - Buffets", "/images/main-dish.jpg"),
            ("Desserts", "/images/dessert.jpg"),
            ("Boîtes à Lunch", "/images/lunch-box.jpg"),
            ("Boissons", "/images/soup.jpg"),
        ]),
        placeholder: Some(s!(DEFAULT_PLACEHOLDER)),
        locale: s!(PRIMARY_LOCALE),
    }
}
