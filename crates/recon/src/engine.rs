use crate::config::{ColumnMapping, PickConfig};
use crate::error::PickError;
use crate::matcher::match_pages;
use crate::model::{OrderRow, PageMap, PickResult, RawOrder, RunMeta};
use crate::partition::partition;
use crate::sort::sort_rows;
use crate::summary::compute_summary;

/// Run reconciliation: validate rows, sort, partition, match pages.
///
/// Rows whose order id yields no sticker key are excluded up front and
/// reported in the result. Zero usable rows, or zero matched pages, are
/// terminal errors rather than an empty success: there is nothing to pick
/// or permute, and callers must not treat that as a clean run.
pub fn run(
    config: &PickConfig,
    orders: Vec<RawOrder>,
    pages: PageMap,
) -> Result<PickResult, PickError> {
    let mut rows: Vec<OrderRow> = Vec::with_capacity(orders.len());
    let mut excluded_rows: Vec<String> = Vec::new();
    for raw in orders {
        let order_id = raw.order_id.clone();
        match OrderRow::new(raw) {
            Some(row) => rows.push(row),
            None => excluded_rows.push(order_id),
        }
    }

    if rows.is_empty() {
        return Err(PickError::NoUsableRows {
            excluded: excluded_rows.len(),
        });
    }

    let sorted = sort_rows(rows);
    let parts = partition(&sorted, config.output.numbering);

    let ordered_identifiers: Vec<String> = parts
        .main
        .iter()
        .chain(&parts.combined)
        .map(|row| row.sticker_key.clone())
        .collect();
    let matching = match_pages(&ordered_identifiers, pages);

    if matching.permutation.is_empty() {
        return Err(PickError::NoPagesMatched);
    }

    let summary = compute_summary(&parts, &matching, excluded_rows.len());

    Ok(PickResult {
        meta: RunMeta {
            config_name: config.name.clone(),
            depot: config.depot.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        main: parts.main,
        combined: parts.combined,
        permutation: matching.permutation,
        unmatched_identifiers: matching.unmatched_identifiers,
        unused_pages: matching.unused_pages,
        excluded_rows,
    })
}

/// Load order rows from CSV text, mapping the configured column names.
///
/// Quantity is coerced, not validated: integer first, float truncation as a
/// fallback, 0 for anything else. Marketplace exports are best-effort files
/// and a bad cell must not abort the whole wave.
pub fn load_csv_rows(csv_data: &str, columns: &ColumnMapping) -> Result<Vec<RawOrder>, PickError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| PickError::Io(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let idx = |name: &str| -> Result<usize, PickError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| PickError::MissingColumn { column: name.into() })
    };

    let order_id_idx = idx(&columns.order_id)?;
    let product_name_idx = idx(&columns.product_name)?;
    let article_idx = idx(&columns.article)?;
    let quantity_idx = idx(&columns.quantity)?;
    let shipment_id_idx = idx(&columns.shipment_id)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| PickError::Io(e.to_string()))?;
        rows.push(RawOrder {
            order_id: record.get(order_id_idx).unwrap_or("").to_string(),
            product_name: record.get(product_name_idx).unwrap_or("").to_string(),
            article: record.get(article_idx).unwrap_or("").to_string(),
            quantity: coerce_quantity(record.get(quantity_idx).unwrap_or("")),
            shipment_id: record.get(shipment_id_idx).unwrap_or("").to_string(),
        });
    }

    Ok(rows)
}

fn coerce_quantity(value: &str) -> u32 {
    let value = value.trim();
    if let Ok(n) = value.parse::<u32>() {
        return n;
    }
    value
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite() && *f > 0.0)
        .map(|f| f as u32)
        .unwrap_or(0)
}
