//! Main/combined split of the sorted picking order.
//!
//! A shipment represented by more than one row (same shipment id + sticker
//! key) must be physically combined under one label; those rows are pulled
//! out into their own list so the picker handles them as a unit.

use crate::classify::{shipment_sticker_counts, shipment_sticker_key};
use crate::config::NumberingMode;
use crate::model::{OrderRow, Partition, PickRow};

/// Split the sorted rows into main and combined lists and assign display
/// codes. Splitting never touches `sticker_key`; only the display `sticker`
/// field is annotated.
pub fn partition(sorted: &[OrderRow], numbering: NumberingMode) -> Partition {
    let counts = shipment_sticker_counts(sorted);

    let mut main_rows: Vec<&OrderRow> = Vec::new();
    let mut combined_rows: Vec<&OrderRow> = Vec::new();
    for row in sorted {
        if counts[&shipment_sticker_key(row)] > 1 {
            combined_rows.push(row);
        } else {
            main_rows.push(row);
        }
    }

    // Combined rows are read per shipment; stable, so priority order holds
    // within a shipment.
    combined_rows.sort_by(|a, b| a.shipment_id.cmp(&b.shipment_id));

    let main: Vec<PickRow> = main_rows
        .iter()
        .enumerate()
        .map(|(i, row)| PickRow::from_row(row, i + 1))
        .collect();

    let combined_start = match numbering {
        NumberingMode::Standalone => 1,
        NumberingMode::Continuous => main.len() + 1,
    };
    let mut combined: Vec<PickRow> = combined_rows
        .iter()
        .enumerate()
        .map(|(i, row)| PickRow::from_row(row, combined_start + i))
        .collect();

    // Within a run of identical stickers only the first stays visible, so a
    // printed list names each label once.
    for i in 1..combined.len() {
        if combined[i].sticker_key == combined[i - 1].sticker_key {
            combined[i].sticker.clear();
        }
    }

    Partition { main, combined }
}
