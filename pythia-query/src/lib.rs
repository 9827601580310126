pub mod config;
pub mod error;
pub mod query;

pub use config::Config;
pub use error::{Error, Result};
pub use query::{build, build_corpus_section, validate, Entry, QueryBuilder, QueryScope, TermCatalog};
