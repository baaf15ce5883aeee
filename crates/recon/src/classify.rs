//! Per-row classification signals.
//!
//! Signals depend on cross-row frequency counts, so they are recomputed from
//! the full row set on every sorting pass: one scan builds the frequency
//! tables, a second derives the per-row values. Nothing here breaks ties;
//! that is the sorter's job.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::model::OrderRow;

/// Derived sorting/partitioning signals for one row.
#[derive(Debug, Clone)]
pub struct ClassificationSignals {
    /// Lower-cased article with its trailing variant/size suffix stripped.
    pub article_core: String,
    /// Rows sharing the same `article_core`.
    pub core_repeat_count: usize,
    /// Rows sharing the exact lower-cased article.
    pub full_article_repeat_count: usize,
    /// More than one row shares this row's shipment id + sticker key, i.e.
    /// the shipment has multiple items and must be physically combined.
    pub shipment_sticker_repeated: bool,
    /// Article carries a kit code (`k` + digit 2-5 + optional digits).
    pub has_combo_code: bool,
    /// Numeric value of a kit code anchored at the article's end; 0 if none.
    pub combo_magnitude: u64,
    pub qty_gt_1: bool,
    pub article_repeated: bool,
    /// Rows sharing lower-cased product name + article.
    pub name_article_repeat_count: usize,
    /// Coarse urgency bucket, 1 (highest) to 4.
    pub priority_tier: u8,
}

fn variant_suffix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[a-z][0-9]+$").unwrap())
}

fn combo_code_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"k[2-5][0-9]*").unwrap())
}

fn combo_magnitude_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"k([2-5][0-9]*)$").unwrap())
}

/// Strip a trailing "single letter + digits" variant suffix so size/variant
/// siblings of the same base article group together: `WIDGET-A12` and
/// `WIDGET-A7` both yield `widget-`.
pub fn article_core(article: &str) -> String {
    let lower = article.to_lowercase();
    let trimmed = lower.trim();
    match variant_suffix_re().find(trimmed) {
        Some(m) => trimmed[..m.start()].trim().to_string(),
        None => trimmed.to_string(),
    }
}

fn combo_magnitude(article_lower: &str) -> u64 {
    combo_magnitude_re()
        .captures(article_lower.trim())
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(0)
}

pub(crate) fn shipment_sticker_key(row: &OrderRow) -> String {
    format!("{}{}", row.shipment_id, row.sticker_key())
}

fn name_article_key(row: &OrderRow) -> String {
    format!(
        "{}{}",
        row.product_name.to_lowercase(),
        row.article.to_lowercase()
    )
}

/// Multiset count of rows per shipment id + sticker key. The partitioner
/// recomputes this table itself; it is order-independent.
pub fn shipment_sticker_counts(rows: &[OrderRow]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for row in rows {
        *counts.entry(shipment_sticker_key(row)).or_insert(0usize) += 1;
    }
    counts
}

/// Compute all signals for the current row set.
pub fn classify(rows: &[OrderRow]) -> Vec<ClassificationSignals> {
    let mut core_counts: HashMap<String, usize> = HashMap::new();
    let mut article_counts: HashMap<String, usize> = HashMap::new();
    let mut name_article_counts: HashMap<String, usize> = HashMap::new();
    for row in rows {
        *core_counts.entry(article_core(&row.article)).or_insert(0) += 1;
        *article_counts
            .entry(row.article.to_lowercase())
            .or_insert(0) += 1;
        *name_article_counts
            .entry(name_article_key(row))
            .or_insert(0) += 1;
    }
    let shipment_counts = shipment_sticker_counts(rows);

    rows.iter()
        .map(|row| {
            let article_lower = row.article.to_lowercase();
            let core = article_core(&row.article);
            let core_repeat_count = core_counts[&core];
            let full_article_repeat_count = article_counts[&article_lower];
            let has_combo_code = combo_code_re().is_match(article_lower.trim());
            let qty_gt_1 = row.quantity > 1;

            let priority_tier = if core_repeat_count > 1 && has_combo_code {
                1
            } else if full_article_repeat_count > 1 && qty_gt_1 {
                2
            } else if full_article_repeat_count > 1 {
                3
            } else {
                4
            };

            ClassificationSignals {
                article_core: core,
                core_repeat_count,
                full_article_repeat_count,
                shipment_sticker_repeated: shipment_counts[&shipment_sticker_key(row)] > 1,
                has_combo_code,
                combo_magnitude: combo_magnitude(&article_lower),
                qty_gt_1,
                article_repeated: full_article_repeat_count > 1,
                name_article_repeat_count: name_article_counts[&name_article_key(row)],
                priority_tier,
            }
        })
        .collect()
}
