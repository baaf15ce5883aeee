//! Label-document text extraction.
//!
//! `pdftotext -layout` renders each label page as text, separated by form
//! feeds. Pages are numbered from 1 in document order; a page whose text
//! yields no identifier is simply absent from the map.

use std::path::Path;
use std::process::Command;

use labelpick_recon::config::depot_profile;
use labelpick_recon::extract::extract_page_identifier;
use labelpick_recon::model::PageMap;

use crate::exit_codes::EXIT_IO_ERROR;
use crate::CliError;

pub(crate) fn cmd_pages(file: &Path, depot: &str, quiet: bool) -> Result<(), CliError> {
    let profile = depot_profile(depot).ok_or_else(|| {
        CliError::args(format!("unknown depot: {depot}")).with_hint(format!(
            "known depots: {}",
            labelpick_recon::depots()
                .iter()
                .map(|d| d.name)
                .collect::<Vec<_>>()
                .join(", ")
        ))
    })?;

    let text = run_pdftotext(file)?;
    let total = split_pages(&text).len();
    let pages = extract_page_map(&text, profile.label_prefix);

    if pages.is_empty() {
        return Err(CliError::parse(format!(
            "no page carries a '{}' identifier",
            profile.label_prefix
        ))
        .with_hint("is the depot right for this document?"));
    }

    if !quiet {
        eprintln!(
            "{} of {} pages carry a '{}' identifier",
            pages.len(),
            total,
            profile.label_prefix,
        );
    }

    for (page, identifier) in &pages {
        println!("{page}\t{identifier}");
    }

    Ok(())
}

/// Split pdftotext output into per-page chunks. pdftotext terminates every
/// page with a form feed, so the trailing empty chunk is dropped; interior
/// empty chunks are kept because they occupy a page number.
pub(crate) fn split_pages(text: &str) -> Vec<&str> {
    let mut chunks: Vec<&str> = text.split('\u{c}').collect();
    if chunks.last().is_some_and(|c| c.trim().is_empty()) {
        chunks.pop();
    }
    chunks
}

/// Build the 1-based page-to-identifier map for the given depot prefix.
pub(crate) fn extract_page_map(text: &str, label_prefix: &str) -> PageMap {
    let mut pages = PageMap::new();
    for (i, chunk) in split_pages(text).iter().enumerate() {
        if let Some(identifier) = extract_page_identifier(chunk, label_prefix) {
            pages.insert(i as u32 + 1, identifier);
        }
    }
    pages
}

/// Run `pdftotext -layout <file> -` and capture stdout.
pub(crate) fn run_pdftotext(file: &Path) -> Result<String, CliError> {
    which::which("pdftotext").map_err(|_| CliError {
        code: EXIT_IO_ERROR,
        message: "pdftotext not installed (poppler-utils)".to_string(),
        hint: Some("Install with: apt install poppler-utils / brew install poppler".to_string()),
    })?;

    let file_str = file
        .to_str()
        .ok_or_else(|| CliError::args(format!("invalid file path: {}", file.display())))?;

    let output = Command::new("pdftotext")
        .args(["-layout", file_str, "-"])
        .output()
        .map_err(|e| CliError::io(format!("failed to run pdftotext: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CliError::io(format!(
            "pdftotext failed (exit {}): {}",
            output.status.code().unwrap_or(-1),
            stderr.trim(),
        )));
    }

    let text = String::from_utf8_lossy(&output.stdout).to_string();

    if text.trim().is_empty() {
        return Err(CliError::parse(
            "PDF appears scanned/image-only — text extraction failed",
        ));
    }

    Ok(text)
}
