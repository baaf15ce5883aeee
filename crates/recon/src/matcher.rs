//! Greedy page matching.
//!
//! Each identifier claims the first unconsumed page (in page-number order)
//! whose extracted identifier is an exact string match; a page is consumed at
//! most once. Identifiers with no remaining page, and pages never claimed,
//! are reported rather than treated as errors.

use crate::model::{MatchOutput, PageMap, UnusedPage};

/// Match the ordered identifier sequence against the page map. Takes the map
/// by value: it is the working structure this call consumes.
///
/// An identifier appearing twice claims two distinct pages when two pages
/// carry it, or one match plus one unmatched entry when only one does. That
/// is intended: a combined shipment contributes several rows but usually has
/// a single label page. Callers wanting one-label-per-shipment semantics
/// must deduplicate the identifier sequence first.
pub fn match_pages(ordered_identifiers: &[String], pages: PageMap) -> MatchOutput {
    let mut working = pages;
    let mut permutation = Vec::new();
    let mut unmatched_identifiers = Vec::new();

    for identifier in ordered_identifiers {
        let found = working
            .iter()
            .find(|(_, value)| *value == identifier)
            .map(|(&page, _)| page);
        match found {
            Some(page) => {
                working.remove(&page);
                permutation.push(page);
            }
            None => unmatched_identifiers.push(identifier.clone()),
        }
    }

    let unused_pages = working
        .into_iter()
        .map(|(page, identifier)| UnusedPage { page, identifier })
        .collect();

    MatchOutput {
        permutation,
        unmatched_identifiers,
        unused_pages,
    }
}
