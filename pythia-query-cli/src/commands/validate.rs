use anyhow::Result;
use pythia_query::{validate, QueryScope};
use std::path::Path;

use super::load_entries;

/// Print one validation error per line; fails when there is any
pub fn run_validate(input: &Path, scope: QueryScope) -> Result<()> {
    let entries = load_entries(input)?;
    let result = validate(&entries, scope);

    if result.is_valid() {
        println!("OK ({} entries)", entries.len());
        return Ok(());
    }

    for message in result.messages() {
        println!("{}", message);
    }
    anyhow::bail!("{} error(s) found", result.error_count())
}
