use anyhow::Result;
use pythia_query::{QueryBuilder, QueryScope};
use std::path::Path;

use super::load_entries;

/// Build the query text for an entry file and print it to stdout.
///
/// Fails without printing a query when the sequence has validation errors.
pub fn run_build(input: &Path, scope: QueryScope, corpora: &[String]) -> Result<()> {
    let mut builder = QueryBuilder::new(scope);
    builder.set_entries(load_entries(input)?);

    if !builder.is_valid() {
        for error in builder.errors() {
            eprintln!("{}", error);
        }
        anyhow::bail!(
            "Query in {:?} has {} error(s)",
            input,
            builder.validation().error_count()
        );
    }

    let query = builder.build_with_corpora(corpora);
    tracing::info!("Built {} query from {} entries", scope_name(scope), builder.len());
    print!("{}", query);
    if !query.ends_with('\n') {
        println!();
    }
    Ok(())
}

fn scope_name(scope: QueryScope) -> &'static str {
    match scope {
        QueryScope::Text => "text",
        QueryScope::Document => "document",
    }
}
