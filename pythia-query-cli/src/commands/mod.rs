pub mod build;
pub mod terms;
pub mod validate;

pub use build::run_build;
pub use terms::{run_terms, TermKind};
pub use validate::run_validate;

use anyhow::{Context, Result};
use pythia_query::query::{parse_json, parse_yaml, resolve_all, Entry};
use pythia_query::TermCatalog;
use std::path::Path;

/// Read an entry list from a JSON or YAML file (by extension) and resolve
/// it against the standard catalog
pub fn load_entries(path: &Path) -> Result<Vec<Entry>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read entries from {:?}", path))?;

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let inputs = if is_yaml {
        parse_yaml(&content).with_context(|| format!("Invalid YAML in {:?}", path))?
    } else {
        parse_json(&content).with_context(|| format!("Invalid JSON in {:?}", path))?
    };

    let entries = resolve_all(&inputs, TermCatalog::standard())
        .with_context(|| format!("Failed to resolve entries in {:?}", path))?;
    tracing::debug!("Loaded {} entries from {:?}", entries.len(), path);
    Ok(entries)
}
