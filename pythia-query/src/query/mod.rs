//! Query builder for the Pythia search language
//!
//! Turns a user-edited sequence of clauses and connectors into the
//! bracketed-clause query text the search backend parses.

pub mod builder;
pub mod entry;
pub mod input;
pub mod serializer;
pub mod terms;
pub mod validator;

pub use builder::{ListenerId, Placement, QueryBuilder, QuerySnapshot};
pub use entry::{ArgValue, ClauseEntry, Connector, Entry, LocatorEntry, QueryScope};
pub use input::{parse_json, parse_yaml, resolve_all, EntryInput, OpInput};
pub use serializer::{build, build_corpus_section};
pub use terms::{ArgDefinition, TermCatalog, TermDefinition};
pub use validator::{validate, EntryError, SequenceError, ValidationResult};
