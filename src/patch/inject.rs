// src/patch/inject.rs
//
// Field application over one record slice. The idempotence contract lives
// here: applying the same field twice under SkipIfPresent is a no-op the
// second time, which is what makes whole-catalog reruns safe.

use crate::core::scan::{self, Entry};
use crate::error::PatchError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Leave an existing field untouched; insert only when absent.
    SkipIfPresent,
    /// Replace the existing value in place; insert when absent.
    Overwrite,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Inserted,
    Replaced,
    Skipped,
}

/// Result of one field application.
pub struct Patched {
    pub text: String,
    pub outcome: Outcome,
}

/// Apply one field to one record slice (braces included). `at` is the
/// record's absolute offset, for error reporting. `rendered` must already
/// be valid value text (quoted and escaped by the caller).
pub fn apply(
    rec: &str,
    at: usize,
    field: &str,
    rendered: &str,
    mode: Mode,
) -> Result<Patched, PatchError> {
    let entries =
        scan::parse_entries(rec).map_err(|off| PatchError::MalformedRecord(at + off))?;

    if let Some(e) = entries.iter().find(|e| e.key == field) {
        return match mode {
            Mode::SkipIfPresent => Ok(Patched { text: s!(rec), outcome: Outcome::Skipped }),
            Mode::Overwrite => {
                let mut text = String::with_capacity(rec.len() + rendered.len());
                text.push_str(&rec[..e.val_start]);
                text.push_str(rendered);
                text.push_str(&rec[e.val_end..]);
                Ok(Patched { text, outcome: Outcome::Replaced })
            }
        };
    }

    Ok(Patched { text: insert_field(rec, &entries, field, rendered), outcome: Outcome::Inserted })
}

/// Append `field: rendered` immediately before the record's closing brace,
/// adding the separating comma when the last field lacks one.
fn insert_field(rec: &str, entries: &[Entry], field: &str, rendered: &str) -> String {
    let p = rec[..rec.len() - 1].trim_end().len(); // just past the last non-ws byte
    let multi = rec.contains('\n');

    let mut out = String::with_capacity(rec.len() + field.len() + rendered.len() + 8);
    out.push_str(&rec[..p]);

    if p > 1 && !rec[..p].ends_with(',') {
        out.push(',');
    }
    if multi {
        out.push('\n');
        out.push_str(&field_indent(rec, entries));
    } else {
        out.push(' ');
    }
    out.push_str(field);
    out.push_str(": ");
    out.push_str(rendered);
    out.push_str(&rec[p..]);
    out
}

/// Indentation of the record's own fields, read off the first one.
fn field_indent(rec: &str, entries: &[Entry]) -> String {
    if let Some(first) = entries.first() {
        let before = &rec[..first.key_off];
        if let Some(nl) = before.rfind('\n') {
            let ws = &before[nl + 1..];
            if ws.chars().all(|c| c == ' ' || c == '\t') {
                return s!(ws);
            }
        }
    }
    s!("  ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const REC: &str = "{\n    id: \"sand-001\",\n    category: \"Sandwichs\",\n    image: \"/images/old.jpg\"\n  }";

    #[test]
    fn insert_goes_before_the_closing_brace() {
        let p = apply(REC, 0, "quantity", "\"250g\"", Mode::SkipIfPresent).unwrap();
        assert_eq!(p.outcome, Outcome::Inserted);
        assert_eq!(
            p.text,
            "{\n    id: \"sand-001\",\n    category: \"Sandwichs\",\n    image: \"/images/old.jpg\",\n    quantity: \"250g\"\n  }"
        );
    }

    #[test]
    fn skip_if_present_leaves_the_record_alone() {
        let p = apply(REC, 0, "image", "\"/images/new.jpg\"", Mode::SkipIfPresent).unwrap();
        assert_eq!(p.outcome, Outcome::Skipped);
        assert_eq!(p.text, REC);
    }

    #[test]
    fn overwrite_replaces_in_place() {
        let p = apply(REC, 0, "image", "\"/images/new.jpg\"", Mode::Overwrite).unwrap();
        assert_eq!(p.outcome, Outcome::Replaced);
        assert!(p.text.contains("image: \"/images/new.jpg\""));
        assert!(!p.text.contains("/images/old.jpg"));
    }

    #[test]
    fn overwrite_inserts_when_absent() {
        let p = apply(REC, 0, "quantity", "\"250g\"", Mode::Overwrite).unwrap();
        assert_eq!(p.outcome, Outcome::Inserted);
        assert!(p.text.contains("quantity: \"250g\""));
    }

    #[test]
    fn overwrite_replaces_a_nested_object_value() {
        let rec = "{\n  category: \"Soupes\",\n  nutrition: { calories: 1, protein: 1, carbs: 1, fat: 1 },\n  price: 4.25\n}";
        let p = apply(rec, 0, "nutrition", "{ calories: 180, protein: 8, carbs: 22, fat: 6 }", Mode::Overwrite).unwrap();
        assert_eq!(p.outcome, Outcome::Replaced);
        assert!(p.text.contains("nutrition: { calories: 180, protein: 8, carbs: 22, fat: 6 }"));
        assert!(p.text.contains("price: 4.25"));
    }

    #[test]
    fn double_apply_is_a_no_op() {
        let once = apply(REC, 0, "quantity", "\"250g\"", Mode::SkipIfPresent).unwrap();
        let twice = apply(&once.text, 0, "quantity", "\"250g\"", Mode::SkipIfPresent).unwrap();
        assert_eq!(twice.outcome, Outcome::Skipped);
        assert_eq!(twice.text, once.text);
    }

    #[test]
    fn trailing_comma_is_not_doubled() {
        let rec = "{\n  category: \"Soupes\",\n}";
        let p = apply(rec, 0, "quantity", "\"300ml\"", Mode::SkipIfPresent).unwrap();
        assert_eq!(p.text, "{\n  category: \"Soupes\",\n  quantity: \"300ml\"\n}");
    }

    #[test]
    fn single_line_record_stays_single_line() {
        let rec = "{ id: \"x\", category: \"Soupes\" }";
        let p = apply(rec, 0, "quantity", "\"300ml\"", Mode::SkipIfPresent).unwrap();
        assert_eq!(p.text, "{ id: \"x\", category: \"Soupes\", quantity: \"300ml\" }");
    }

    #[test]
    fn presence_is_judged_at_record_depth_only() {
        // `calories` exists only inside the nested nutrition block; a
        // top-level `calories` field would still be absent.
        let rec = "{ category: \"Soupes\", nutrition: { calories: 180, protein: 8, carbs: 22, fat: 6 } }";
        let p = apply(rec, 0, "calories", "99", Mode::SkipIfPresent).unwrap();
        assert_eq!(p.outcome, Outcome::Inserted);
    }

    #[test]
    fn broken_record_is_malformed_with_offset() {
        let rec = "{ id: \"x\" category: \"y\" }";
        match apply(rec, 100, "quantity", "\"1\"", Mode::SkipIfPresent) {
            Err(PatchError::MalformedRecord(off)) => assert!(off > 100),
            other => panic!("expected malformed, got {:?}", other.map(|p| p.outcome)),
        }
    }
}
