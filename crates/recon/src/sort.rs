//! Picking-priority ordering.
//!
//! Rows are compared lexicographically over a fixed key tuple:
//!
//! 1. combined shipment (shipment id + sticker repeated), true first
//! 2. kit code present, true first
//! 3. kit magnitude, descending
//! 4. quantity > 1, true first
//! 5. exact article repeated, true first
//! 6. name+article repeat count, descending
//! 7. priority tier, ascending (1 is most urgent)
//! 8. article core, ascending
//! 9. article-core repeat count, descending
//! 10. quantity, descending
//! 11. product name (lower-cased), ascending
//! 12. article (lower-cased), ascending
//!
//! The key rules encode warehouse picking convention and are deliberately
//! kept verbatim. `sort_by` is stable, so rows equal on every key keep their
//! input order and re-runs over the same input reproduce the same output.

use std::cmp::Ordering;

use crate::classify::{classify, ClassificationSignals};
use crate::model::OrderRow;

struct SortEntry {
    row: OrderRow,
    signals: ClassificationSignals,
    name_lower: String,
    article_lower: String,
}

/// Order the row set by picking priority. Signals are computed fresh from
/// this row set; nothing is carried over between invocations.
pub fn sort_rows(rows: Vec<OrderRow>) -> Vec<OrderRow> {
    let signals = classify(&rows);
    let mut entries: Vec<SortEntry> = rows
        .into_iter()
        .zip(signals)
        .map(|(row, signals)| {
            let name_lower = row.product_name.to_lowercase();
            let article_lower = row.article.to_lowercase();
            SortEntry {
                row,
                signals,
                name_lower,
                article_lower,
            }
        })
        .collect();

    entries.sort_by(compare);
    entries.into_iter().map(|e| e.row).collect()
}

fn compare(a: &SortEntry, b: &SortEntry) -> Ordering {
    let (sa, sb) = (&a.signals, &b.signals);
    sb.shipment_sticker_repeated
        .cmp(&sa.shipment_sticker_repeated)
        .then_with(|| sb.has_combo_code.cmp(&sa.has_combo_code))
        .then_with(|| sb.combo_magnitude.cmp(&sa.combo_magnitude))
        .then_with(|| sb.qty_gt_1.cmp(&sa.qty_gt_1))
        .then_with(|| sb.article_repeated.cmp(&sa.article_repeated))
        .then_with(|| {
            sb.name_article_repeat_count
                .cmp(&sa.name_article_repeat_count)
        })
        .then_with(|| sa.priority_tier.cmp(&sb.priority_tier))
        .then_with(|| sa.article_core.cmp(&sb.article_core))
        .then_with(|| sb.core_repeat_count.cmp(&sa.core_repeat_count))
        .then_with(|| b.row.quantity.cmp(&a.row.quantity))
        .then_with(|| a.name_lower.cmp(&b.name_lower))
        .then_with(|| a.article_lower.cmp(&b.article_lower))
}
