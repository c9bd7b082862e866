//! Merge

use crate::records::Record;

/// Concatenate two scored sets and sort them by descending relevance.
///
/// No deduplication happens: the same product offered by both sources yields
/// two records. The sort is stable, so records with equal relevance keep their
/// concatenation order (`a` before `b`, source order within each).
pub fn merge(a: Vec<Record>, b: Vec<Record>) -> Vec<Record> {
    let mut records = a;

    records.extend(b);
    records.sort_by(|left, right| right.relevance().total_cmp(&left.relevance()));

    records
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::{
        prices::Price,
        records::{Listing, Origin, SourceKind},
    };

    use super::*;

    fn record(source: SourceKind, position: usize, relevance: f64) -> Record {
        named(source, position, relevance, &format!("{source}-{position}"))
    }

    fn named(source: SourceKind, position: usize, relevance: f64, name: &str) -> Record {
        Record::scored(
            Listing {
                origin: Origin::new(source, position),
                name: name.to_string(),
                price: Price::new(1),
                discount: 0,
                cash_discount: Decimal::ZERO,
                rate: 0,
                category: String::new(),
                category_importance: 0.0,
            },
            relevance,
        )
    }

    fn names(records: &[Record]) -> Vec<&str> {
        records.iter().map(Record::name).collect()
    }

    #[test]
    fn merge_keeps_every_record() {
        let a = vec![
            record(SourceKind::Catalog, 0, 0.1),
            record(SourceKind::Catalog, 1, 0.2),
        ];
        let b = vec![record(SourceKind::Inventory, 0, 0.3)];

        let merged = merge(a, b);

        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn merge_sorts_by_descending_relevance() {
        let a = vec![
            record(SourceKind::Catalog, 0, 0.1),
            record(SourceKind::Catalog, 1, 0.9),
        ];
        let b = vec![
            record(SourceKind::Inventory, 0, 0.5),
            record(SourceKind::Inventory, 1, 1.0),
        ];

        let merged = merge(a, b);

        assert_eq!(
            names(&merged),
            vec!["inventory-1", "catalog-1", "inventory-0", "catalog-0"]
        );
        assert!(
            merged
                .windows(2)
                .all(|pair| matches!(pair, [l, r] if l.relevance() >= r.relevance())),
            "relevance should be non-increasing"
        );
    }

    #[test]
    fn ties_keep_concatenation_order() {
        let a = vec![
            record(SourceKind::Catalog, 0, 0.5),
            record(SourceKind::Catalog, 1, 0.5),
        ];
        let b = vec![
            record(SourceKind::Inventory, 0, 0.5),
            record(SourceKind::Inventory, 1, 0.7),
            record(SourceKind::Inventory, 2, 0.5),
        ];

        let merged = merge(a, b);

        assert_eq!(
            names(&merged),
            vec![
                "inventory-1",
                "catalog-0",
                "catalog-1",
                "inventory-0",
                "inventory-2"
            ]
        );
    }

    #[test]
    fn same_name_in_both_sources_is_not_deduplicated() {
        let a = vec![named(SourceKind::Catalog, 0, 0.5, "Chips")];
        let b = vec![named(SourceKind::Inventory, 0, 0.5, "Chips")];

        let merged = merge(a, b);

        assert_eq!(names(&merged), vec!["Chips", "Chips"]);
        assert_eq!(
            merged.iter().map(Record::origin).collect::<Vec<_>>(),
            vec![
                Origin::new(SourceKind::Catalog, 0),
                Origin::new(SourceKind::Inventory, 0)
            ]
        );
    }

    #[test]
    fn merging_empty_sets_is_empty() {
        assert!(merge(Vec::new(), Vec::new()).is_empty(), "expected no records");
    }
}
