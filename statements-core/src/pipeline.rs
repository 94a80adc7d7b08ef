//! Applying decoded filters to statement records.

use tracing::debug;

use crate::field::FieldValueAccessor;
use crate::filter::Filter;

/// True when `record` satisfies every filter. Stops at the first failing filter.
pub fn matches_all<R: FieldValueAccessor + ?Sized>(record: &R, filters: &[Filter]) -> bool {
    filters.iter().all(|f| f.matches_record(record))
}

/// Records satisfying all `filters`, in input order.
///
/// An empty filter list keeps every record.
pub fn filter_records<'r, R: FieldValueAccessor>(
    records: &'r [R],
    filters: &[Filter],
) -> Vec<&'r R> {
    let kept: Vec<&R> = records
        .iter()
        .filter(|r| matches_all(*r, filters))
        .collect();
    debug!(
        total = records.len(),
        kept = kept.len(),
        filters = filters.len(),
        "filtered records"
    );
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldValue;
    use crate::filter::{
        DateCondition, DateFilter, NumberCondition, NumberFilter, StringCondition, StringFilter,
    };
    use crate::transaction::{Transaction, TransactionAdapter, adapt_transactions};
    use chrono::NaiveDate;

    #[derive(Debug, Clone, PartialEq)]
    struct MockTransaction {
        date: NaiveDate,
        value: i64,
        desc: &'static str,
    }

    impl FieldValueAccessor for MockTransaction {
        fn field_value(&self, field: &str) -> FieldValue<'_> {
            match field {
                "date" => FieldValue::Date(self.date),
                "value" => FieldValue::Integer(self.value),
                "description" => FieldValue::Text(self.desc),
                _ => FieldValue::Absent,
            }
        }
    }

    impl TransactionAdapter for MockTransaction {
        fn normalize(&self) -> Transaction {
            Transaction {
                date: self.date,
                account_holder: "Test".to_string(),
                description: self.desc.to_string(),
                value: self.value,
                currency: "EUR".to_string(),
            }
        }
    }

    fn fixture() -> Vec<MockTransaction> {
        let day = |d| NaiveDate::from_ymd_opt(2025, 1, d).unwrap();
        vec![
            MockTransaction {
                date: day(1),
                value: 100,
                desc: "Test transaction",
            },
            MockTransaction {
                date: day(5),
                value: 200,
                desc: "Another transaction",
            },
            MockTransaction {
                date: day(10),
                value: 300,
                desc: "Third transaction",
            },
        ]
    }

    fn date(condition: DateCondition, comparison: &str) -> Filter {
        DateFilter {
            field: "date".to_string(),
            condition,
            comparison: comparison.to_string(),
        }
        .into()
    }

    fn number(condition: NumberCondition, comparison: i64) -> Filter {
        NumberFilter {
            field: "value".to_string(),
            condition,
            comparison,
        }
        .into()
    }

    fn string(field: &str, condition: StringCondition, comparison: &str) -> Filter {
        StringFilter {
            field: field.to_string(),
            condition,
            comparison: comparison.to_string(),
        }
        .into()
    }

    fn values(kept: &[&MockTransaction]) -> Vec<i64> {
        kept.iter().map(|t| t.value).collect()
    }

    #[test]
    fn test_no_filters_keeps_all_in_order() {
        let txns = fixture();
        let kept = filter_records(&txns, &[]);
        assert_eq!(values(&kept), vec![100, 200, 300]);
    }

    #[test]
    fn test_single_filters() {
        let txns = fixture();
        let cases = [
            (date(DateCondition::Equal, "01.01.2025"), vec![100]),
            (date(DateCondition::GreaterThan, "01.01.2025"), vec![200, 300]),
            (number(NumberCondition::Equal, 200), vec![200]),
            (number(NumberCondition::GreaterThan, 100), vec![200, 300]),
            (string("description", StringCondition::Contain, "Test"), vec![100]),
            (number(NumberCondition::Equal, 999), vec![]),
        ];
        for (filter, want) in cases {
            let kept = filter_records(&txns, std::slice::from_ref(&filter));
            assert_eq!(values(&kept), want, "{filter}");
        }
    }

    #[test]
    fn test_single_filter_agrees_with_matches() {
        let txns = fixture();
        let filters = [
            date(DateCondition::LessThanEqual, "05.01.2025"),
            number(NumberCondition::NotEqual, 200),
            string("description", StringCondition::NotContain, "Another"),
            string("missing", StringCondition::NotEqual, "x"),
        ];
        for f in &filters {
            for t in &txns {
                let kept = filter_records(std::slice::from_ref(t), std::slice::from_ref(f));
                let expect = f.matches(t.field_value(f.field_name()));
                assert_eq!(kept.len() == 1, expect, "{f} on {t:?}");
            }
        }
    }

    #[test]
    fn test_and_semantics() {
        let txns = fixture();
        let f1 = date(DateCondition::GreaterThan, "01.01.2025");
        let f2 = number(NumberCondition::LessThan, 300);

        let both = filter_records(&txns, &[f1.clone(), f2.clone()]);
        assert_eq!(values(&both), vec![200]);
        assert_eq!(both[0].date, NaiveDate::from_ymd_opt(2025, 1, 5).unwrap());

        let first: Vec<MockTransaction> =
            filter_records(&txns, std::slice::from_ref(&f1)).into_iter().cloned().collect();
        let chained = filter_records(&first, std::slice::from_ref(&f2));
        assert_eq!(values(&chained), values(&both));

        let reversed = filter_records(&txns, &[f2, f1]);
        assert_eq!(values(&reversed), values(&both));
    }

    #[test]
    fn test_absent_field_fails_closed() {
        let txns = fixture();
        for f in [
            string("missing", StringCondition::NotEqual, "x"),
            string("missing", StringCondition::NotContain, "x"),
            DateFilter {
                field: "missing".to_string(),
                condition: DateCondition::NotEqual,
                comparison: "01.01.2025".to_string(),
            }
            .into(),
            NumberFilter {
                field: "missing".to_string(),
                condition: NumberCondition::NotEqual,
                comparison: 0,
            }
            .into(),
        ] {
            assert!(filter_records(&txns, std::slice::from_ref(&f)).is_empty(), "{f}");
        }
    }

    #[test]
    fn test_filters_trait_objects() {
        let adapted = adapt_transactions(fixture());
        assert_eq!(adapted.len(), 3);

        let filters = [string("description", StringCondition::Contain, "Test")];
        let kept = filter_records(&adapted, &filters);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].normalize().description, "Test transaction");
    }

    #[test]
    fn test_input_is_untouched() {
        let txns = fixture();
        let before = txns.clone();
        let _ = filter_records(&txns, &[number(NumberCondition::Equal, 999)]);
        assert_eq!(txns, before);
    }
}
