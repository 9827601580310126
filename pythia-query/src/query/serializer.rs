//! Wire serialization of entry sequences
//!
//! Output grammar:
//! - clause: `[attr op "value"]`, e.g. `[value="a"]`
//! - clause with arguments: `[value%="a":0.5]`
//! - connectors: `AND`, `OR`, `AND NOT`, `(`, `)`
//! - collocation: `NEAR(n=0,m=1,s=sent)`, `NOT NEAR`
//! - document scope: `@<query>;\n`
//! - corpus prologue (prepended by the caller): `@@<id> <id>;\n`

use super::entry::{ordered_args, ClauseEntry, Connector, Entry, LocatorEntry, QueryScope};
use std::fmt;

/// Serialize an entry sequence to query text.
///
/// The sequence is not validated; invalid sequences are written as-is.
pub fn build(entries: &[Entry], scope: QueryScope) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let mut query = String::new();
    if scope.is_document() {
        query.push('@');
    }

    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            query.push(' ');
        }
        query.push_str(&entry.to_string());
    }

    if scope.is_document() {
        query.push_str(";\n");
    }

    tracing::trace!(entries = entries.len(), query = %query, "Built query");
    query
}

/// Render the corpus prologue `@@id1 id2;\n`, or an empty string when no
/// corpus is given
pub fn build_corpus_section<S: AsRef<str>>(corpora: &[S]) -> String {
    if corpora.is_empty() {
        return String::new();
    }

    let ids: Vec<&str> = corpora.iter().map(|c| c.as_ref()).collect();
    format!("@@{};\n", ids.join(" "))
}

impl fmt::Display for ClauseEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}{}\"{}\"",
            self.attribute.code, self.operator.code, self.value
        )?;
        for (_, value) in ordered_args(&self.operator, &self.args) {
            write!(f, ":{}", value)?;
        }
        f.write_str("]")
    }
}

impl fmt::Display for LocatorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            f.write_str("NOT ")?;
        }
        f.write_str(&self.operator.code)?;

        let args = ordered_args(&self.operator, &self.args);
        if !args.is_empty() {
            let list: Vec<String> = args
                .iter()
                .map(|(code, value)| format!("{}={}", code, value))
                .collect();
            write!(f, "({})", list.join(","))?;
        }
        Ok(())
    }
}

impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Connector::And => f.write_str("AND"),
            Connector::Or => f.write_str("OR"),
            Connector::AndNot => f.write_str("AND NOT"),
            Connector::BracketOpen => f.write_str("("),
            Connector::BracketClose => f.write_str(")"),
            Connector::Locator(locator) => fmt::Display::fmt(locator, f),
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Clause(clause) => fmt::Display::fmt(clause, f),
            Entry::Connector(connector) => fmt::Display::fmt(connector, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::terms::TermCatalog;

    fn clause(op: &str, value: &str) -> ClauseEntry {
        let catalog = TermCatalog::standard();
        ClauseEntry::new(
            catalog.attribute("value").unwrap().clone(),
            catalog.operator(op).unwrap().clone(),
            value,
        )
    }

    #[test]
    fn test_clause_display() {
        assert_eq!(clause("=", "a").to_string(), "[value=\"a\"]");
        assert_eq!(clause("<>", "b").to_string(), "[value<>\"b\"]");
    }

    #[test]
    fn test_fuzzy_clause_display() {
        let fuzzy = clause("%=", "a").with_arg("t", "0.5");
        assert_eq!(fuzzy.to_string(), "[value%=\"a\":0.5]");
    }

    #[test]
    fn test_clause_ignores_undeclared_args() {
        let c = clause("=", "a").with_arg("t", "0.5");
        assert_eq!(c.to_string(), "[value=\"a\"]");
    }

    #[test]
    fn test_connector_display() {
        assert_eq!(Connector::And.to_string(), "AND");
        assert_eq!(Connector::Or.to_string(), "OR");
        assert_eq!(Connector::AndNot.to_string(), "AND NOT");
        assert_eq!(Connector::BracketOpen.to_string(), "(");
        assert_eq!(Connector::BracketClose.to_string(), ")");
    }

    #[test]
    fn test_locator_display() {
        let near = TermCatalog::standard().locator("NEAR").unwrap().clone();
        assert_eq!(LocatorEntry::new(near.clone()).to_string(), "NEAR");

        let with_args = LocatorEntry::new(near.clone())
            .with_arg("m", "1")
            .with_arg("n", "0");
        assert_eq!(with_args.to_string(), "NEAR(n=0,m=1)");

        let negated = LocatorEntry::new(near).with_arg("s", "sent").negate();
        assert_eq!(negated.to_string(), "NOT NEAR(s=sent)");
    }

    #[test]
    fn test_corpus_section() {
        assert_eq!(build_corpus_section::<&str>(&[]), "");
        assert_eq!(build_corpus_section(&["alpha"]), "@@alpha;\n");
        assert_eq!(
            build_corpus_section(&["alpha".to_string(), "beta".to_string()]),
            "@@alpha beta;\n"
        );
    }

    #[test]
    fn test_empty_sequence() {
        assert_eq!(build(&[], QueryScope::Text), "");
        assert_eq!(build(&[], QueryScope::Document), "");
    }

    #[test]
    fn test_document_wrapper() {
        let catalog = TermCatalog::standard();
        let entries = vec![Entry::clause(
            catalog.attribute("author").unwrap().clone(),
            catalog.operator("=").unwrap().clone(),
            "Catullus",
        )];
        assert_eq!(
            build(&entries, QueryScope::Document),
            "@[author=\"Catullus\"];\n"
        );
    }
}
