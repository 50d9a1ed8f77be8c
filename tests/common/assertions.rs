//! Custom assertions for extracted statement records.
//!
//! Domain-specific checks with messages that name the field that went wrong.

use statement_parser::{Field, StatementRecord};

/// Asserts that every field of `record` is absent.
///
/// # Panics
/// Panics listing the fields that carry a value.
pub fn assert_all_absent(record: &StatementRecord) {
    let present: Vec<String> = Field::ALL
        .iter()
        .filter_map(|f| record.get(*f).map(|v| format!("{}={:?}", f.key(), v)))
        .collect();
    assert!(
        present.is_empty(),
        "Expected no fields but found: {}",
        present.join(", ")
    );
}

/// Asserts that `field` holds exactly `expected`.
///
/// # Panics
/// Panics if the field is absent or holds another value.
pub fn assert_field(record: &StatementRecord, field: Field, expected: &str) {
    assert_eq!(
        record.get(field),
        Some(expected),
        "Field '{}' mismatch in record {:?}",
        field.key(),
        record
    );
}

/// Asserts that the record matches the labelled fixture statement.
///
/// # Panics
/// Panics on the first field that differs.
pub fn assert_labelled_statement(record: &StatementRecord) {
    assert_field(record, Field::CardLast4, "4321");
    assert_field(record, Field::StatementPeriod, "01/01/2024 - 01/31/2024");
    assert_field(record, Field::PaymentDueDate, "02/15/2024");
    assert_field(record, Field::TotalAmountDue, "$1,234.56");
    assert_field(record, Field::CreditLimit, "$5,000.00");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_all_absent_on_default() {
        assert_all_absent(&StatementRecord::default());
    }

    #[test]
    #[should_panic(expected = "card_last_4")]
    fn test_assert_all_absent_names_present_field() {
        let mut record = StatementRecord::default();
        record.set(Field::CardLast4, Some("1234".to_string()));
        assert_all_absent(&record);
    }
}
