//! `lpick run` / `lpick validate`: config-driven reconciliation.

use std::path::{Path, PathBuf};

use labelpick_recon::engine::{load_csv_rows, run};
use labelpick_recon::extract::last_n_digits;
use labelpick_recon::model::PickResult;
use labelpick_recon::{NumberingMode, PickConfig};

use crate::exit_codes::{EXIT_PICK_EMPTY, EXIT_PICK_UNMATCHED};
use crate::labels::{extract_page_map, run_pdftotext};
use crate::CliError;

pub(crate) fn cmd_run(
    config_path: PathBuf,
    json_output: bool,
    output_file: Option<PathBuf>,
    quiet: bool,
) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(&config_path)
        .map_err(|e| CliError::io(format!("cannot read config: {e}")))?;
    let config = PickConfig::from_toml(&config_str).map_err(CliError::engine)?;

    // File paths resolve relative to the config file's directory.
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));

    let orders_path = base_dir.join(&config.files.orders);
    let csv_data = std::fs::read_to_string(&orders_path)
        .map_err(|e| CliError::io(format!("cannot read {}: {e}", orders_path.display())))?;
    let orders = load_csv_rows(&csv_data, &config.columns).map_err(CliError::engine)?;

    let labels_path = base_dir.join(&config.files.labels);
    let text = run_pdftotext(&labels_path)?;
    let prefix = config.label_prefix().map_err(CliError::engine)?;
    let pages = extract_page_map(&text, prefix);

    if pages.is_empty() {
        return Err(CliError {
            code: EXIT_PICK_EMPTY,
            message: format!(
                "no page in {} carries a '{}' identifier",
                labels_path.display(),
                prefix,
            ),
            hint: Some("check the config's depot against the label document".into()),
        });
    }

    if !quiet {
        eprintln!(
            "loaded {} order rows and {} label pages with identifiers",
            orders.len(),
            pages.len(),
        );
    }

    let result = run(&config, orders, pages).map_err(CliError::engine)?;

    if let Some(ref picklist) = config.output.picklist {
        let path = base_dir.join(picklist);
        write_picklist(&path, &result)?;
        if !quiet {
            eprintln!("wrote {}", path.display());
        }
    }

    let json_str = serde_json::to_string_pretty(&result)
        .map_err(|e| CliError::io(format!("JSON serialization error: {e}")))?;

    if let Some(ref json_path) = config.output.json {
        let path = base_dir.join(json_path);
        std::fs::write(&path, &json_str)
            .map_err(|e| CliError::io(format!("cannot write {}: {e}", path.display())))?;
        if !quiet {
            eprintln!("wrote {}", path.display());
        }
    }

    if let Some(ref path) = output_file {
        std::fs::write(path, &json_str)
            .map_err(|e| CliError::io(format!("cannot write {}: {e}", path.display())))?;
        if !quiet {
            eprintln!("wrote {}", path.display());
        }
    }

    if json_output {
        println!("{json_str}");
    }

    // Human summary to stderr.
    let s = &result.summary;
    eprintln!(
        "{} rows ({} main, {} combined, {} excluded): {} pages matched, {} rows without a page, {} pages unclaimed",
        s.total_rows,
        s.main_rows,
        s.combined_rows,
        s.excluded_rows,
        s.matched_pages,
        s.unmatched_identifiers,
        s.unused_pages,
    );

    for identifier in &result.unmatched_identifiers {
        eprintln!("warning: no label page for sticker {identifier}");
    }
    for page in &result.unused_pages {
        eprintln!(
            "warning: page {} (sticker {}) claimed by no row",
            page.page, page.identifier,
        );
    }
    if !result.excluded_rows.is_empty() {
        eprintln!(
            "warning: {} row(s) excluded, order id not in '1234-…' shape: {}",
            result.excluded_rows.len(),
            result.excluded_rows.join(", "),
        );
    }

    if s.unmatched_identifiers > 0 || s.unused_pages > 0 {
        return Err(CliError {
            code: EXIT_PICK_UNMATCHED,
            message: "unmatched rows or unclaimed pages remain".into(),
            hint: None,
        });
    }

    Ok(())
}

pub(crate) fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(&config_path)
        .map_err(|e| CliError::io(format!("cannot read config: {e}")))?;

    let config = PickConfig::from_toml(&config_str).map_err(CliError::engine)?;
    eprintln!(
        "valid: '{}', depot {}, {} numbering",
        config.name,
        config.depot,
        match config.output.numbering {
            NumberingMode::Continuous => "continuous",
            NumberingMode::Standalone => "standalone",
        },
    );
    Ok(())
}

/// Write the picklist catalogue: main rows first, then combined rows, with
/// display stickers shortened to their last four digits.
fn write_picklist(path: &Path, result: &PickResult) -> Result<(), CliError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| CliError::io(format!("cannot write {}: {e}", path.display())))?;

    writer
        .write_record(["code", "shipment", "product", "article", "sticker"])
        .map_err(|e| CliError::io(e.to_string()))?;

    for row in result.main.iter().chain(&result.combined) {
        writer
            .write_record([
                row.code.to_string().as_str(),
                row.shipment_id.as_str(),
                row.product_name.as_str(),
                row.article.as_str(),
                last_n_digits(&row.sticker, 4).as_str(),
            ])
            .map_err(|e| CliError::io(e.to_string()))?;
    }

    writer.flush().map_err(|e| CliError::io(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use labelpick_recon::model::{
        PickRow, RunMeta, RunSummary,
    };

    fn pick(code: usize, article: &str, sticker_key: &str, sticker: &str) -> PickRow {
        PickRow {
            code,
            shipment_id: format!("S{code}"),
            product_name: "Item".into(),
            article: article.into(),
            quantity: 1,
            sticker_key: sticker_key.into(),
            sticker: sticker.into(),
        }
    }

    fn result() -> PickResult {
        PickResult {
            meta: RunMeta {
                config_name: "Test".into(),
                depot: "fbs_204514".into(),
                engine_version: "0.0.0".into(),
                run_at: "2026-01-01T00:00:00Z".into(),
            },
            summary: RunSummary {
                total_rows: 3,
                excluded_rows: 0,
                main_rows: 1,
                combined_rows: 2,
                matched_pages: 3,
                unmatched_identifiers: 0,
                unused_pages: 0,
            },
            main: vec![pick(1, "LAMP", "26146990", "26146990")],
            combined: vec![
                pick(2, "CANDLE", "50000001", "50000001"),
                pick(3, "CANDLE-STAND", "50000001", ""),
            ],
            permutation: vec![2, 1, 3],
            unmatched_identifiers: vec![],
            unused_pages: vec![],
            excluded_rows: vec![],
        }
    }

    #[test]
    fn picklist_shortens_and_blanks_stickers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("picklist.csv");
        write_picklist(&path, &result()).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines[0], "code,shipment,product,article,sticker");
        assert_eq!(lines[1], "1,S1,Item,LAMP,6990");
        assert_eq!(lines[2], "2,S2,Item,CANDLE,0001");
        // Blanked display sticker stays blank, not re-derived from the key.
        assert_eq!(lines[3], "3,S3,Item,CANDLE-STAND,");
    }

    #[test]
    fn result_serializes_for_json_output() {
        let json = serde_json::to_string_pretty(&result()).unwrap();
        assert!(json.contains("\"permutation\""));
        assert!(json.contains("\"depot\": \"fbs_204514\""));
    }

    #[test]
    fn validate_accepts_good_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wave.pick.toml");
        std::fs::write(
            &path,
            "name = \"Wave\"\ndepot = \"fbs_204514\"\n\n[files]\norders = \"o.csv\"\nlabels = \"l.pdf\"\n",
        )
        .unwrap();
        assert!(cmd_validate(path).is_ok());
    }

    #[test]
    fn validate_rejects_unknown_depot_with_config_code() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wave.pick.toml");
        std::fs::write(
            &path,
            "name = \"Wave\"\ndepot = \"nowhere\"\n\n[files]\norders = \"o.csv\"\nlabels = \"l.pdf\"\n",
        )
        .unwrap();
        let err = cmd_validate(path).unwrap_err();
        assert_eq!(err.code, crate::exit_codes::EXIT_PICK_INVALID_CONFIG);
    }

    #[test]
    fn run_reports_missing_config_as_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = cmd_run(dir.path().join("absent.toml"), false, None, true).unwrap_err();
        assert_eq!(err.code, crate::exit_codes::EXIT_IO_ERROR);
    }
}
