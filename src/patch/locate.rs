// src/patch/locate.rs
//
// Record location. A record is a brace block carrying a string-valued
// `category` field at its own depth. The type declaration block at the top
// of the catalog also mentions `category`, but types it as a bare
// identifier, so it never qualifies.

use crate::config::consts::{KEY_CATEGORY, KEY_NAME};
use crate::config::rules::Selector;
use crate::core::scan::{self, Block, Entry};
use crate::error::PatchError;

/// One located record: its byte span plus the extracted match keys.
/// Never persisted; re-derived on every run.
#[derive(Clone, Debug)]
pub struct RecordSpan {
    pub start: usize,
    pub end: usize,
    pub category: String,
    /// Localized names in declaration order, e.g. `[("fr", "Salade César"), ("en", ...)]`.
    pub names: Vec<(String, String)>,
}

impl RecordSpan {
    pub fn text<'a>(&self, doc: &'a str) -> &'a str {
        &doc[self.start..self.end]
    }

    pub fn name(&self, locale: &str) -> Option<&str> {
        self.names.iter().find(|(l, _)| l == locale).map(|(_, n)| n.as_str())
    }
}

/// Every record in the catalog, in document order. Spans never overlap: a
/// block wrapping another candidate is not itself a record, so only the
/// minimal regions survive. A candidate that does not parse as a field
/// list is fatal — its boundaries cannot be trusted.
pub fn locate_all(text: &str) -> Result<Vec<RecordSpan>, PatchError> {
    let blocks = scan::scan_blocks(text)?;
    let mut candidates: Vec<Block> = blocks
        .into_iter()
        .filter(|bl| scan::has_direct_string_field(&text[bl.start..bl.end], KEY_CATEGORY))
        .collect();
    candidates.sort_by_key(|bl| bl.start);

    let minimal: Vec<Block> = candidates
        .iter()
        .copied()
        .filter(|outer| {
            !candidates.iter().any(|b| b.start > outer.start && b.end < outer.end)
        })
        .collect();

    let mut spans = Vec::with_capacity(minimal.len());
    for bl in minimal {
        let rec = &text[bl.start..bl.end];
        let entries = scan::parse_entries(rec)
            .map_err(|off| PatchError::MalformedRecord(bl.start + off))?;
        let category = direct_literal(rec, &entries, KEY_CATEGORY)
            .ok_or(PatchError::MalformedRecord(bl.start))?;
        let names = extract_names(rec, &entries, bl.start)?;
        spans.push(RecordSpan { start: bl.start, end: bl.end, category, names });
    }
    logd!("locate: {} records", spans.len());
    Ok(spans)
}

/// Records matching one selector, document order. Empty is a normal
/// outcome, not an error.
pub fn locate(text: &str, sel: &Selector) -> Result<Vec<RecordSpan>, PatchError> {
    let spans = locate_all(text)?;
    Ok(spans.into_iter().filter(|s| sel.matches(&s.category, &s.names)).collect())
}

fn direct_literal(rec: &str, entries: &[Entry], key: &str) -> Option<String> {
    entries
        .iter()
        .find(|e| e.key == key)
        .and_then(|e| scan::literal_at(rec, e.val_start, e.val_end))
}

/// Locale → text pairs out of the record's `name` block. A record without
/// a block-shaped name yields no names and simply never matches a name
/// selector.
fn extract_names(
    rec: &str,
    entries: &[Entry],
    base: usize,
) -> Result<Vec<(String, String)>, PatchError> {
    let Some(e) = entries.iter().find(|e| e.key == KEY_NAME) else {
        return Ok(Vec::new());
    };
    let v = &rec[e.val_start..e.val_end];
    if !v.starts_with('{') {
        return Ok(Vec::new());
    }
    let sub = scan::parse_entries(v)
        .map_err(|off| PatchError::MalformedRecord(base + e.val_start + off))?;
    let mut names = Vec::with_capacity(sub.len());
    for se in &sub {
        if let Some(text) = scan::literal_at(v, se.val_start, se.val_end) {
            names.push((se.key.clone(), text));
        }
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"// Catalog data
export interface MenuItem {
  id: string;
  name: { fr: string; en: string };
  category: string;
  image: string;
}

export const menu: MenuItem[] = [
  // SANDWICHS
  {
    id: "sand-001",
    name: { fr: "Le Classique", en: "The Classic" },
    price: 8.50,
    category: "Sandwichs",
    image: "/images/sandwiches/classique.jpg"
  },
  {
    id: "sala-001",
    name: { fr: "Salade César", en: "Caesar Salad" },
    price: 9.75,
    category: "Salades",
    image: "/images/caesar.jpg"
  }
];
"#;

    #[test]
    fn finds_records_not_the_type_declaration() {
        let spans = locate_all(DOC).unwrap();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].category, "Sandwichs");
        assert_eq!(spans[1].category, "Salades");
        assert_eq!(spans[0].name("fr"), Some("Le Classique"));
        assert_eq!(spans[1].name("en"), Some("Caesar Salad"));
    }

    #[test]
    fn spans_are_document_ordered_and_disjoint() {
        let spans = locate_all(DOC).unwrap();
        assert!(spans[0].end <= spans[1].start);
        assert!(DOC[spans[0].start..].starts_with('{'));
        assert!(DOC[..spans[0].end].ends_with('}'));
    }

    #[test]
    fn name_with_brace_character_does_not_truncate_the_span() {
        let doc = r#"[
  {
    id: "x-1",
    name: { fr: "Bol {spécial}", en: "Special } bowl" },
    category: "Salades"
  }
]"#;
        let spans = locate_all(doc).unwrap();
        assert_eq!(spans.len(), 1);
        assert!(spans[0].text(doc).ends_with('}'));
        assert_eq!(spans[0].name("fr"), Some("Bol {spécial}"));
        // span closes at the record's own brace, which is the last one
        // before the closing bracket
        assert_eq!(doc[spans[0].end..].trim(), "]");
    }

    #[test]
    fn category_selector_is_exact_and_case_sensitive() {
        let sel = Selector::Category(s!("Salades"));
        let spans = locate(DOC, &sel).unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].name("fr"), Some("Salade César"));

        let miss = Selector::Category(s!("salades"));
        assert!(locate(DOC, &miss).unwrap().is_empty());
    }

    #[test]
    fn name_selector_is_word_bounded_and_case_insensitive() {
        let sel = Selector::NameContains { needle: s!("césar"), locale: s!("fr") };
        let spans = locate(DOC, &sel).unwrap();
        assert_eq!(spans.len(), 1);

        let en = Selector::NameContains { needle: s!("caesar"), locale: s!("en") };
        assert_eq!(locate(DOC, &en).unwrap().len(), 1);

        let partial = Selector::NameContains { needle: s!("ésar"), locale: s!("fr") };
        assert!(locate(DOC, &partial).unwrap().is_empty());
    }

    #[test]
    fn no_match_yields_empty_not_error() {
        let sel = Selector::Category(s!("Poissons"));
        assert!(locate(DOC, &sel).unwrap().is_empty());
    }

    #[test]
    fn truncated_record_aborts() {
        let doc = r#"[
  {
    id: "x-1",
    category: "Salades",
"#;
        assert!(matches!(locate_all(doc), Err(PatchError::MalformedRecord(_))));
    }

    #[test]
    fn record_with_broken_field_list_aborts() {
        let doc = r#"[ { id: "x" category: "Salades" } ]"#;
        assert!(matches!(locate_all(doc), Err(PatchError::MalformedRecord(_))));
    }
}
