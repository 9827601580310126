//! Property-based tests for sequence validation and the editor's implicit
//! AND insertion.

use proptest::prelude::*;
use pythia_query::query::{Connector, Entry, EntryError, QueryBuilder, QueryScope, SequenceError};
use pythia_query::{validate, TermCatalog};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn clause(value: &str) -> Entry {
    let catalog = TermCatalog::standard();
    Entry::clause(
        catalog.attribute("value").unwrap().clone(),
        catalog.operator("=").unwrap().clone(),
        value,
    )
}

fn any_entry() -> impl Strategy<Value = Entry> {
    prop_oneof![
        "[a-z]{1,4}".prop_map(|v| clause(&v)),
        Just(Entry::and()),
        Just(Entry::or()),
        Just(Entry::and_not()),
        Just(Entry::open()),
        Just(Entry::close()),
        Just(Entry::locator(pythia_query::query::LocatorEntry::new(
            TermCatalog::standard().locator("NEAR").unwrap().clone()
        ))),
    ]
}

fn any_scope() -> impl Strategy<Value = QueryScope> {
    prop_oneof![Just(QueryScope::Text), Just(QueryScope::Document)]
}

fn count(entries: &[Entry], connector: Connector) -> i64 {
    entries
        .iter()
        .filter(|e| e.as_connector() == Some(&connector))
        .count() as i64
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_unbalanced_iff_counts_differ(
        entries in prop::collection::vec(any_entry(), 0..24),
        scope in any_scope(),
    ) {
        let result = validate(&entries, scope);
        let balanced =
            count(&entries, Connector::BracketOpen) == count(&entries, Connector::BracketClose);
        prop_assert_eq!(
            !balanced,
            result.sequence_errors().contains(&SequenceError::Unbalanced)
        );
    }

    #[test]
    fn prop_negative_depth_close_is_flagged(
        entries in prop::collection::vec(any_entry(), 2..24),
        scope in any_scope(),
    ) {
        let result = validate(&entries, scope);
        let mut depth = 0i64;
        for (i, entry) in entries.iter().enumerate() {
            match entry.as_connector() {
                Some(Connector::BracketOpen) => depth += 1,
                Some(Connector::BracketClose) => {
                    depth -= 1;
                    if depth < 0 && i > 0 {
                        prop_assert_eq!(result.entry_error(i), Some(EntryError::UnexpectedEntry));
                    }
                }
                _ => {}
            }
        }
    }

    #[test]
    fn prop_validation_is_idempotent(
        entries in prop::collection::vec(any_entry(), 0..24),
        scope in any_scope(),
    ) {
        let first = validate(&entries, scope);
        let second = validate(&entries, scope);
        prop_assert_eq!(first.messages(), second.messages());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_messages_list_sequence_errors_first(
        entries in prop::collection::vec(any_entry(), 0..24),
        scope in any_scope(),
    ) {
        let result = validate(&entries, scope);
        let messages = result.messages();
        let n = result.sequence_errors().len();
        prop_assert!(messages[..n].iter().all(|m| !m.starts_with('#')));
        prop_assert!(messages[n..].iter().all(|m| m.starts_with('#')));
        prop_assert!(result.entry_errors().all(|(i, _)| i < entries.len()));
    }

    #[test]
    fn prop_appending_clauses_interposes_and(
        values in prop::collection::vec("[a-z]{1,4}", 1..12),
    ) {
        let mut builder = QueryBuilder::new(QueryScope::Text);
        for value in &values {
            builder.push(clause(value));
        }

        prop_assert_eq!(builder.len(), values.len() * 2 - 1);
        for (i, entry) in builder.entries().iter().enumerate() {
            if i % 2 == 0 {
                prop_assert!(entry.is_clause());
            } else {
                prop_assert_eq!(entry, &Entry::and());
            }
        }
        prop_assert!(builder.is_valid());
    }

    #[test]
    fn prop_appending_after_connector_adds_nothing(
        values in prop::collection::vec("[a-z]{1,4}", 1..12),
    ) {
        let mut builder = QueryBuilder::new(QueryScope::Text);
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                builder.push(Entry::or());
            }
            builder.push(clause(value));
        }

        prop_assert_eq!(builder.len(), values.len() * 2 - 1);
        prop_assert!(builder.entries().iter().all(|e| e != &Entry::and()));
    }
}
