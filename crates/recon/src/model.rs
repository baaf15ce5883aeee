use std::collections::BTreeMap;

use serde::Serialize;

use crate::extract::extract_order_prefix;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One order line item as parsed from the orders CSV, not yet validated.
#[derive(Debug, Clone)]
pub struct RawOrder {
    pub order_id: String,
    pub product_name: String,
    pub article: String,
    pub quantity: u32,
    pub shipment_id: String,
}

/// A validated order row. Construction extracts the sticker key once; the
/// field is private so it cannot change for the row's lifetime.
#[derive(Debug, Clone)]
pub struct OrderRow {
    pub order_id: String,
    pub product_name: String,
    /// Original casing preserved for display; comparisons lower-case a copy.
    pub article: String,
    pub quantity: u32,
    pub shipment_id: String,
    sticker_key: String,
}

impl OrderRow {
    /// Returns `None` when `order_id` lacks the leading-digits-hyphen shape.
    pub fn new(raw: RawOrder) -> Option<Self> {
        let sticker_key = extract_order_prefix(&raw.order_id)?;
        Some(Self {
            order_id: raw.order_id,
            product_name: raw.product_name,
            article: raw.article,
            quantity: raw.quantity,
            shipment_id: raw.shipment_id,
            sticker_key,
        })
    }

    pub fn sticker_key(&self) -> &str {
        &self.sticker_key
    }
}

/// Page number (1-based) to extracted identifier. Pages whose text yielded no
/// identifier are absent entirely. BTreeMap keeps iteration in page order,
/// which the matcher's first-match-wins rule depends on.
pub type PageMap = BTreeMap<u32, String>;

// ---------------------------------------------------------------------------
// Presentation rows
// ---------------------------------------------------------------------------

/// An output row of the picking list.
#[derive(Debug, Clone, Serialize)]
pub struct PickRow {
    /// Dense 1-based sequence number within the numbering mode.
    pub code: usize,
    pub shipment_id: String,
    pub product_name: String,
    pub article: String,
    pub quantity: u32,
    /// Full sticker key; always present, used for page matching.
    pub sticker_key: String,
    /// Display identifier. Blanked for repeated stickers within a combined
    /// run so a printed list names each label once.
    pub sticker: String,
}

impl PickRow {
    pub fn from_row(row: &OrderRow, code: usize) -> Self {
        Self {
            code,
            shipment_id: row.shipment_id.clone(),
            product_name: row.product_name.clone(),
            article: row.article.clone(),
            quantity: row.quantity,
            sticker_key: row.sticker_key().to_string(),
            sticker: row.sticker_key().to_string(),
        }
    }
}

/// The main/combined split of the sorted rows.
#[derive(Debug, Serialize)]
pub struct Partition {
    /// One label per shipment: ordinary picks.
    pub main: Vec<PickRow>,
    /// Shipments represented by more than one row; items must be physically
    /// combined under one label.
    pub combined: Vec<PickRow>,
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

/// A label page whose identifier no row claimed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnusedPage {
    pub page: u32,
    pub identifier: String,
}

#[derive(Debug, Serialize)]
pub struct MatchOutput {
    /// Original page numbers in picking order.
    pub permutation: Vec<u32>,
    /// Row identifiers with no remaining page to claim.
    pub unmatched_identifiers: Vec<String>,
    /// Pages left unconsumed after all identifiers were processed.
    pub unused_pages: Vec<UnusedPage>,
}

// ---------------------------------------------------------------------------
// Summary + Result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub total_rows: usize,
    pub excluded_rows: usize,
    pub main_rows: usize,
    pub combined_rows: usize,
    pub matched_pages: usize,
    pub unmatched_identifiers: usize,
    pub unused_pages: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunMeta {
    pub config_name: String,
    pub depot: String,
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Serialize)]
pub struct PickResult {
    pub meta: RunMeta,
    pub summary: RunSummary,
    pub main: Vec<PickRow>,
    pub combined: Vec<PickRow>,
    pub permutation: Vec<u32>,
    pub unmatched_identifiers: Vec<String>,
    pub unused_pages: Vec<UnusedPage>,
    /// Order ids whose shape yielded no sticker key; excluded before sorting.
    pub excluded_rows: Vec<String>,
}
