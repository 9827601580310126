//! Structural validation of an entry sequence
//!
//! Validation never fails: it reports every problem found in a single
//! left-to-right pass, as sequence-level errors plus at most one error
//! per entry.

use super::entry::{Connector, Entry, QueryScope};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Error attached to a single entry
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryError {
    #[error("Expected clause")]
    ExpectedClause,

    #[error("Expected clause or (")]
    ExpectedClauseOrOpen,

    #[error("Unexpected entry type")]
    UnexpectedEntry,

    #[error("Opening bracket at end")]
    OpenBracketAtEnd,

    #[error("Logical operator at end")]
    OperatorAtEnd,

    #[error("AND NOT is allowed only in document scope")]
    AndNotOutsideDocument,
}

/// Error concerning the sequence as a whole
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceError {
    #[error("Query is empty")]
    Empty,

    #[error("Unbalanced parentheses")]
    Unbalanced,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    sequence_errors: Vec<SequenceError>,
    /// Keyed by 0-based entry index
    entry_errors: BTreeMap<usize, EntryError>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.sequence_errors.is_empty() && self.entry_errors.is_empty()
    }

    pub fn sequence_errors(&self) -> &[SequenceError] {
        &self.sequence_errors
    }

    pub fn entry_errors(&self) -> impl Iterator<Item = (usize, EntryError)> + '_ {
        self.entry_errors.iter().map(|(i, e)| (*i, *e))
    }

    pub fn entry_error(&self, index: usize) -> Option<EntryError> {
        self.entry_errors.get(&index).copied()
    }

    pub fn error_count(&self) -> usize {
        self.sequence_errors.len() + self.entry_errors.len()
    }

    /// Flat list of messages: sequence-level errors first, then one
    /// `#<n>: <message>` line per flagged entry (1-based)
    pub fn messages(&self) -> Vec<String> {
        self.sequence_errors
            .iter()
            .map(ToString::to_string)
            .chain(
                self.entry_errors
                    .iter()
                    .map(|(i, e)| format!("#{}: {}", i + 1, e)),
            )
            .collect()
    }
}

/// Validate an entry sequence.
///
/// Bracket depth is tracked without clamping, so the sequence is reported
/// unbalanced exactly when the open and close counts differ.
pub fn validate(entries: &[Entry], scope: QueryScope) -> ValidationResult {
    let mut result = ValidationResult::default();

    if entries.is_empty() && !scope.is_document() {
        result.sequence_errors.push(SequenceError::Empty);
    }

    let mut depth: i64 = 0;
    for (i, entry) in entries.iter().enumerate() {
        match entry {
            Entry::Connector(Connector::BracketOpen) => depth += 1,
            Entry::Connector(Connector::BracketClose) => depth -= 1,
            _ => {}
        }

        if let Some(error) = check_entry(entries, i, depth, scope) {
            result.entry_errors.insert(i, error);
        }
    }

    if depth != 0 {
        result.sequence_errors.push(SequenceError::Unbalanced);
    }

    result
}

fn check_entry(entries: &[Entry], i: usize, depth: i64, scope: QueryScope) -> Option<EntryError> {
    let entry = &entries[i];

    if entries.len() == 1 {
        return (!entry.is_clause()).then_some(EntryError::ExpectedClause);
    }

    if i == 0 && !matches!(entry, Entry::Clause(_) | Entry::Connector(Connector::BracketOpen)) {
        return Some(EntryError::ExpectedClauseOrOpen);
    }

    let prev = i.checked_sub(1).map(|p| &entries[p]);
    let is_last = i + 1 == entries.len();

    match entry {
        Entry::Clause(_) => match prev {
            None => None,
            Some(Entry::Connector(c)) if c.is_binary() || *c == Connector::BracketOpen => None,
            Some(_) => Some(EntryError::UnexpectedEntry),
        },
        Entry::Connector(Connector::BracketOpen) => {
            let after_clause_or_close = matches!(
                prev,
                Some(Entry::Clause(_)) | Some(Entry::Connector(Connector::BracketClose))
            );
            if after_clause_or_close {
                Some(EntryError::UnexpectedEntry)
            } else if is_last {
                Some(EntryError::OpenBracketAtEnd)
            } else {
                None
            }
        }
        Entry::Connector(Connector::BracketClose) => {
            if depth < 0 || !follows_operand(prev) {
                Some(EntryError::UnexpectedEntry)
            } else {
                None
            }
        }
        Entry::Connector(connector) => {
            if !follows_operand(prev) {
                Some(EntryError::UnexpectedEntry)
            } else if is_last {
                Some(EntryError::OperatorAtEnd)
            } else if *connector == Connector::AndNot && !scope.is_document() {
                Some(EntryError::AndNotOutsideDocument)
            } else {
                None
            }
        }
    }
}

/// True when the previous entry closes an operand: a clause or `)`
fn follows_operand(prev: Option<&Entry>) -> bool {
    matches!(
        prev,
        Some(Entry::Clause(_)) | Some(Entry::Connector(Connector::BracketClose))
    )
}
