use crate::model::{MatchOutput, Partition, RunSummary};

/// Fold the run outputs into counts for the caller's summary line.
pub fn compute_summary(
    partition: &Partition,
    matching: &MatchOutput,
    excluded_rows: usize,
) -> RunSummary {
    RunSummary {
        total_rows: partition.main.len() + partition.combined.len() + excluded_rows,
        excluded_rows,
        main_rows: partition.main.len(),
        combined_rows: partition.combined.len(),
        matched_pages: matching.permutation.len(),
        unmatched_identifiers: matching.unmatched_identifiers.len(),
        unused_pages: matching.unused_pages.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PickRow, UnusedPage};

    fn pick(code: usize, sticker: &str) -> PickRow {
        PickRow {
            code,
            shipment_id: "S1".into(),
            product_name: "Widget".into(),
            article: "W1".into(),
            quantity: 1,
            sticker_key: sticker.into(),
            sticker: sticker.into(),
        }
    }

    #[test]
    fn summary_counts() {
        let partition = Partition {
            main: vec![pick(1, "100"), pick(2, "200")],
            combined: vec![pick(3, "300")],
        };
        let matching = MatchOutput {
            permutation: vec![4, 1],
            unmatched_identifiers: vec!["300".into()],
            unused_pages: vec![UnusedPage { page: 2, identifier: "900".into() }],
        };
        let summary = compute_summary(&partition, &matching, 2);
        assert_eq!(summary.total_rows, 5);
        assert_eq!(summary.excluded_rows, 2);
        assert_eq!(summary.main_rows, 2);
        assert_eq!(summary.combined_rows, 1);
        assert_eq!(summary.matched_pages, 2);
        assert_eq!(summary.unmatched_identifiers, 1);
        assert_eq!(summary.unused_pages, 1);
    }
}
