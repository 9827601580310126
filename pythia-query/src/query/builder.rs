//! Editable entry sequence with change notification
//!
//! Every edit re-validates the sequence and notifies listeners with the new
//! entries and their validation result, synchronously and in registration
//! order. A builder is single-owner: wrap it yourself if it must be shared.

use super::entry::{Entry, QueryScope};
use super::serializer::{build, build_corpus_section};
use super::validator::{validate, ValidationResult};
use crate::config::Config;
use std::fmt;

/// Where `add_entry` puts the new entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    #[default]
    Append,
    /// Replace the entry at this index (appends when out of range)
    Replace(usize),
    /// Insert before the entry at this index (appends when out of range)
    Insert(usize),
}

pub type ListenerId = usize;

/// State published to listeners after each edit
#[derive(Debug, Clone, Copy)]
pub struct QuerySnapshot<'a> {
    pub entries: &'a [Entry],
    pub validation: &'a ValidationResult,
}

impl QuerySnapshot<'_> {
    pub fn errors(&self) -> Vec<String> {
        self.validation.messages()
    }
}

type Listener = Box<dyn FnMut(&QuerySnapshot<'_>)>;

pub struct QueryBuilder {
    entries: Vec<Entry>,
    scope: QueryScope,
    implicit_and: bool,
    validation: ValidationResult,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener_id: ListenerId,
}

impl fmt::Debug for QueryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryBuilder")
            .field("entries", &self.entries)
            .field("scope", &self.scope)
            .field("implicit_and", &self.implicit_and)
            .field("validation", &self.validation)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new(QueryScope::default())
    }
}

impl QueryBuilder {
    pub fn new(scope: QueryScope) -> Self {
        Self {
            entries: Vec::new(),
            scope,
            implicit_and: true,
            validation: validate(&[], scope),
            listeners: Vec::new(),
            next_listener_id: 0,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let mut builder = Self::new(config.query.scope);
        builder.implicit_and = config.query.implicit_and;
        builder
    }

    pub fn scope(&self) -> QueryScope {
        self.scope
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn validation(&self) -> &ValidationResult {
        &self.validation
    }

    /// Flat error messages for the current sequence
    pub fn errors(&self) -> Vec<String> {
        self.validation.messages()
    }

    pub fn is_valid(&self) -> bool {
        self.validation.is_valid()
    }

    pub fn snapshot(&self) -> QuerySnapshot<'_> {
        QuerySnapshot {
            entries: &self.entries,
            validation: &self.validation,
        }
    }

    /// Register a listener called after every edit
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&QuerySnapshot<'_>) + 'static,
    {
        let id = self.next_listener_id;
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn set_scope(&mut self, scope: QueryScope) {
        self.scope = scope;
        self.publish("set_scope", None);
    }

    /// Replace the whole sequence
    pub fn set_entries(&mut self, entries: Vec<Entry>) {
        self.entries = entries;
        self.publish("set_entries", None);
    }

    /// Add an entry at the given placement.
    ///
    /// When the entry is a clause and the entry before the target position
    /// is also a clause, an AND connector is first pushed at the END of the
    /// sequence, whatever the placement.
    pub fn add_entry(&mut self, entry: Entry, placement: Placement) {
        if self.implicit_and && entry.is_clause() {
            let prev = match placement {
                Placement::Append => self.entries.last(),
                Placement::Replace(index) | Placement::Insert(index) => index
                    .checked_sub(1)
                    .and_then(|p| self.entries.get(p)),
            };
            if prev.is_some_and(Entry::is_clause) {
                self.entries.push(Entry::and());
            }
        }

        match placement {
            Placement::Replace(index) if index < self.entries.len() => {
                self.entries[index] = entry;
            }
            Placement::Insert(index) if index <= self.entries.len() => {
                self.entries.insert(index, entry);
            }
            _ => self.entries.push(entry),
        }

        let index = match placement {
            Placement::Append => None,
            Placement::Replace(index) | Placement::Insert(index) => Some(index),
        };
        self.publish("add_entry", index);
    }

    /// Append an entry
    pub fn push(&mut self, entry: Entry) {
        self.add_entry(entry, Placement::Append);
    }

    pub fn delete_entry(&mut self, index: usize) {
        if index < self.entries.len() {
            self.entries.remove(index);
        }
        self.publish("delete_entry", Some(index));
    }

    /// Swap the entry with its predecessor; no change at index 0
    pub fn move_entry_up(&mut self, index: usize) {
        if index >= 1 && index < self.entries.len() {
            self.entries.swap(index - 1, index);
        }
        self.publish("move_entry_up", Some(index));
    }

    /// Swap the entry with its successor; no change at the last index
    pub fn move_entry_down(&mut self, index: usize) {
        if index + 1 < self.entries.len() {
            self.entries.swap(index, index + 1);
        }
        self.publish("move_entry_down", Some(index));
    }

    pub fn reset(&mut self) {
        self.entries.clear();
        self.publish("reset", None);
    }

    /// Serialize the current sequence
    pub fn build(&self) -> String {
        build(&self.entries, self.scope)
    }

    /// Serialize the current sequence preceded by the corpus prologue
    pub fn build_with_corpora<S: AsRef<str>>(&self, corpora: &[S]) -> String {
        let mut query = build_corpus_section(corpora);
        query.push_str(&self.build());
        query
    }

    fn publish(&mut self, op: &str, index: Option<usize>) {
        self.validation = validate(&self.entries, self.scope);
        tracing::debug!(
            op,
            index,
            len = self.entries.len(),
            errors = self.validation.error_count(),
            "Query entries changed"
        );

        let snapshot = QuerySnapshot {
            entries: &self.entries,
            validation: &self.validation,
        };
        for (_, listener) in self.listeners.iter_mut() {
            listener(&snapshot);
        }
    }
}
