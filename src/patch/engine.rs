// src/patch/engine.rs
//
// Orchestration: locate every record, pick the winning rule per record,
// apply payload fields and image assignment, reassemble the text. Pure
// with respect to the store — callers own write-back, so any error here
// means the file was never touched.

use crate::config::consts::{FIELD_IMAGE, FIELD_NUTRITION, FIELD_QUANTITY, FIELD_TIPS};
use crate::config::images::ImageConfig;
use crate::config::rules::RuleTable;
use crate::core::sanitize::escape_literal;
use crate::error::PatchError;
use crate::patch::images::ImageAssigner;
use crate::patch::inject::{self, Mode, Outcome};
use crate::patch::locate;

/// Counters for one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    pub records_scanned: usize,
    pub records_matched: usize,
    pub fields_inserted: usize,
    pub fields_replaced: usize,
    pub fields_skipped: usize,
    pub images_assigned: usize,
}

/// Patch the whole catalog text.
///
/// Configuration is validated first, then records are processed in
/// document order. Payload fields honor `overwrite`; image assignment
/// always recomputes a definite value and therefore always overwrites.
/// A rule's explicit image is more specific than the configured assigner
/// and wins; the rotation cursor only advances for assigner-chosen images.
pub fn run(
    text: &str,
    rules: &RuleTable,
    images: Option<&ImageConfig>,
    overwrite: bool,
) -> Result<(String, RunReport), PatchError> {
    rules.validate()?;
    if let Some(cfg) = images {
        cfg.validate()?;
    }

    let spans = locate::locate_all(text)?;
    let mut assigner = images.map(ImageAssigner::new);
    let field_mode = if overwrite { Mode::Overwrite } else { Mode::SkipIfPresent };

    let mut report = RunReport { records_scanned: spans.len(), ..RunReport::default() };
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    let mut last = 0usize;

    for span in &spans {
        out.push_str(&text[last..span.start]);
        last = span.end;

        let mut rec = s!(span.text(text));
        let rule = rules.lookup(&span.category, &span.names);
        let mut rule_image = None;

        if let Some(rule) = rule {
            report.records_matched += 1;
            let p = &rule.payload;
            let mut fields: Vec<(&str, String)> = Vec::with_capacity(3);
            if let Some(n) = &p.nutrition {
                fields.push((FIELD_NUTRITION, n.render()));
            }
            if let Some(q) = &p.quantity {
                fields.push((FIELD_QUANTITY, quote(q)));
            }
            if let Some(t) = &p.tips {
                fields.push((FIELD_TIPS, t.render()));
            }
            for (field, rendered) in fields {
                let patched = inject::apply(&rec, span.start, field, &rendered, field_mode)?;
                count(&mut report, patched.outcome);
                rec = patched.text;
            }
            rule_image = p.image.as_deref();
        }

        let image = match (rule_image, assigner.as_mut()) {
            (Some(img), _) => Some(s!(img)),
            (None, Some(a)) => Some(a.assign(span)?),
            (None, None) => None,
        };
        if let Some(img) = image {
            let patched =
                inject::apply(&rec, span.start, FIELD_IMAGE, &quote(&img), Mode::Overwrite)?;
            debug_assert_ne!(patched.outcome, Outcome::Skipped);
            report.images_assigned += 1;
            rec = patched.text;
        }

        out.push_str(&rec);
    }
    out.push_str(&text[last..]);

    logf!(
        "patch: {} records, {} matched, {} inserted, {} replaced, {} skipped, {} images",
        report.records_scanned,
        report.records_matched,
        report.fields_inserted,
        report.fields_replaced,
        report.fields_skipped,
        report.images_assigned
    );

    Ok((out, report))
}

fn quote(s: &str) -> String {
    format!("\"{}\"", escape_literal(s))
}

fn count(report: &mut RunReport, outcome: Outcome) {
    match outcome {
        Outcome::Inserted => report.fields_inserted += 1,
        Outcome::Replaced => report.fields_replaced += 1,
        Outcome::Skipped => report.fields_skipped += 1,
    }
}
