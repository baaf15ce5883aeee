use std::path::PathBuf;

use labelpick_recon::config::PickConfig;
use labelpick_recon::engine::{load_csv_rows, run};
use labelpick_recon::error::PickError;
use labelpick_recon::extract::extract_page_identifier;
use labelpick_recon::model::{PageMap, PickResult};
use labelpick_recon::NumberingMode;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_config() -> PickConfig {
    let toml = std::fs::read_to_string(fixtures_dir().join("wave.pick.toml")).unwrap();
    PickConfig::from_toml(&toml).unwrap()
}

/// Build the page map the way the CLI does: split extracted text on form
/// feeds, number pages from 1, keep only pages with an identifier.
fn load_page_map(config: &PickConfig) -> PageMap {
    let text = std::fs::read_to_string(fixtures_dir().join(&config.files.labels)).unwrap();
    let prefix = config.label_prefix().unwrap();

    let mut chunks: Vec<&str> = text.split('\u{c}').collect();
    if chunks.last().is_some_and(|c| c.trim().is_empty()) {
        chunks.pop();
    }

    let mut pages = PageMap::new();
    for (i, chunk) in chunks.iter().enumerate() {
        if let Some(identifier) = extract_page_identifier(chunk, prefix) {
            pages.insert(i as u32 + 1, identifier);
        }
    }
    pages
}

fn load_and_run(config: &PickConfig) -> Result<PickResult, PickError> {
    let csv = std::fs::read_to_string(fixtures_dir().join(&config.files.orders)).unwrap();
    let orders = load_csv_rows(&csv, &config.columns).unwrap();
    run(config, orders, load_page_map(config))
}

// -------------------------------------------------------------------------
// Full wave
// -------------------------------------------------------------------------

#[test]
fn page_map_skips_pages_without_identifier() {
    let pages = load_page_map(&load_config());
    assert_eq!(pages.len(), 8);
    // Page 7 is a scanned page with no extractable text.
    assert!(!pages.contains_key(&7));
    assert_eq!(pages[&4], "40000002");
}

#[test]
fn full_wave_reconciliation() {
    let result = load_and_run(&load_config()).unwrap();

    assert_eq!(result.summary.total_rows, 9);
    assert_eq!(result.summary.excluded_rows, 1);
    assert_eq!(result.excluded_rows, vec!["notanorder".to_string()]);

    // Main list: kit articles first in descending kit size, then the
    // quantity-2 repeated mug, its quantity-1 twin, then the blanket
    // variants grouped by core.
    let main_articles: Vec<&str> = result.main.iter().map(|r| r.article.as_str()).collect();
    assert_eq!(
        main_articles,
        vec![
            "HOOD-GREY-K4",
            "HOOD-GREY-K3",
            "MUG-RED",
            "MUG-RED",
            "PLED-A12",
            "PLED-A7",
        ]
    );
    assert_eq!(result.main[2].quantity, 2);
    let main_codes: Vec<usize> = result.main.iter().map(|r| r.code).collect();
    assert_eq!(main_codes, vec![1, 2, 3, 4, 5, 6]);

    // Combined list: the two-row shipment, continuous numbering, second
    // sticker blanked for display but intact for matching.
    let combined_articles: Vec<&str> =
        result.combined.iter().map(|r| r.article.as_str()).collect();
    assert_eq!(combined_articles, vec!["CANDLE", "CANDLE-STAND"]);
    assert_eq!(result.combined[0].code, 7);
    assert_eq!(result.combined[1].code, 8);
    assert_eq!(result.combined[0].sticker, "50000001");
    assert_eq!(result.combined[1].sticker, "");
    assert_eq!(result.combined[1].sticker_key, "50000001");

    // Pages follow the picking order; the second row of the combined
    // shipment finds no second label page.
    assert_eq!(result.permutation, vec![5, 2, 1, 8, 9, 4, 3]);
    assert_eq!(result.unmatched_identifiers, vec!["50000001".to_string()]);
    assert_eq!(result.unused_pages.len(), 1);
    assert_eq!(result.unused_pages[0].page, 6);
    assert_eq!(result.unused_pages[0].identifier, "99999999");

    assert_eq!(result.summary.main_rows, 6);
    assert_eq!(result.summary.combined_rows, 2);
    assert_eq!(result.summary.matched_pages, 7);
    assert_eq!(result.summary.unmatched_identifiers, 1);
    assert_eq!(result.summary.unused_pages, 1);
}

#[test]
fn permutation_never_repeats_a_page() {
    let result = load_and_run(&load_config()).unwrap();
    let mut pages = result.permutation.clone();
    pages.sort_unstable();
    pages.dedup();
    assert_eq!(pages.len(), result.permutation.len());
}

#[test]
fn rerun_is_deterministic() {
    let config = load_config();
    let first = load_and_run(&config).unwrap();
    let second = load_and_run(&config).unwrap();
    assert_eq!(first.permutation, second.permutation);

    let order = |r: &PickResult| -> Vec<String> {
        r.main
            .iter()
            .chain(&r.combined)
            .map(|row| format!("{}:{}", row.code, row.sticker_key))
            .collect()
    };
    assert_eq!(order(&first), order(&second));
}

#[test]
fn standalone_numbering_restarts_combined() {
    let mut config = load_config();
    config.output.numbering = NumberingMode::Standalone;
    let result = load_and_run(&config).unwrap();
    assert_eq!(result.combined[0].code, 1);
    assert_eq!(result.combined[1].code, 2);
}

// -------------------------------------------------------------------------
// Terminal conditions
// -------------------------------------------------------------------------

#[test]
fn all_rows_malformed_is_terminal() {
    let config = load_config();
    let csv = "order_id,product,sku,qty,shipment\nnope,Ghost,G1,1,S1\n";
    let orders = load_csv_rows(csv, &config.columns).unwrap();
    let err = run(&config, orders, load_page_map(&config)).unwrap_err();
    match err {
        PickError::NoUsableRows { excluded } => assert_eq!(excluded, 1),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn zero_matched_pages_is_terminal() {
    let config = load_config();
    let csv = std::fs::read_to_string(fixtures_dir().join("orders.csv")).unwrap();
    let orders = load_csv_rows(&csv, &config.columns).unwrap();
    let err = run(&config, orders, PageMap::new()).unwrap_err();
    assert!(matches!(err, PickError::NoPagesMatched));
}
