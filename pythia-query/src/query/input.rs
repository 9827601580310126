//! Entry descriptions referencing catalog terms by code
//!
//! This is the shape entries take in JSON/YAML files and API payloads:
//!
//! ```json
//! [
//!   {"clause": {"attribute": "value", "operator": "%=", "value": "a", "args": {"t": "0.5"}}},
//!   {"locator": {"operator": "NEAR", "args": {"n": "0", "m": "1"}}},
//!   {"op": "("},
//!   {"op": "and_not"}
//! ]
//! ```

use super::entry::{ArgValue, ClauseEntry, Connector, Entry, LocatorEntry};
use super::terms::{TermCatalog, TermDefinition};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryInput {
    Clause {
        attribute: String,
        operator: String,
        value: String,
        #[serde(default)]
        args: BTreeMap<String, String>,
    },
    Op(OpInput),
    Locator {
        operator: String,
        #[serde(default)]
        args: BTreeMap<String, String>,
        #[serde(default)]
        negated: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpInput {
    And,
    Or,
    AndNot,
    #[serde(rename = "(")]
    Open,
    #[serde(rename = ")")]
    Close,
}

impl EntryInput {
    /// Resolve codes against the catalog and check argument literals
    pub fn resolve(&self, catalog: &TermCatalog) -> Result<Entry> {
        match self {
            EntryInput::Clause {
                attribute,
                operator,
                value,
                args,
            } => {
                let operator = catalog.operator(operator)?.clone();
                let args = resolve_args(&operator, args)?;
                Ok(Entry::Clause(ClauseEntry {
                    attribute: catalog.attribute(attribute)?.clone(),
                    operator,
                    value: value.clone(),
                    args,
                }))
            }
            EntryInput::Op(op) => Ok(Entry::Connector(match op {
                OpInput::And => Connector::And,
                OpInput::Or => Connector::Or,
                OpInput::AndNot => Connector::AndNot,
                OpInput::Open => Connector::BracketOpen,
                OpInput::Close => Connector::BracketClose,
            })),
            EntryInput::Locator {
                operator,
                args,
                negated,
            } => {
                let operator = catalog.locator(operator)?.clone();
                let args = resolve_args(&operator, args)?;
                Ok(Entry::locator(LocatorEntry {
                    operator,
                    args,
                    negated: *negated,
                }))
            }
        }
    }
}

/// Parse a JSON array of entry descriptions
pub fn parse_json(content: &str) -> Result<Vec<EntryInput>> {
    Ok(serde_json::from_str(content)?)
}

/// Parse a YAML sequence of entry descriptions
///
/// Variants are written as single-key maps (`- op: and_not`), the same
/// shape as the JSON form, rather than YAML tags.
pub fn parse_yaml(content: &str) -> Result<Vec<EntryInput>> {
    let de = serde_yaml::Deserializer::from_str(content);
    Ok(serde_yaml::with::singleton_map_recursive::deserialize(de)?)
}

/// Resolve a list of inputs, stopping at the first bad one
pub fn resolve_all(inputs: &[EntryInput], catalog: &TermCatalog) -> Result<Vec<Entry>> {
    inputs.iter().map(|input| input.resolve(catalog)).collect()
}

fn resolve_args(operator: &TermDefinition, args: &BTreeMap<String, String>) -> Result<Vec<ArgValue>> {
    if let Some(code) = args.keys().find(|code| operator.arg(code).is_none()) {
        return Err(Error::UnknownArgument {
            operator: operator.code.clone(),
            code: code.clone(),
        });
    }

    let mut resolved = Vec::new();
    for def in operator.arg_definitions() {
        match args.get(&def.code) {
            Some(value) => {
                def.check(value)?;
                resolved.push(ArgValue::new(def.code.clone(), value.clone()));
            }
            None if def.required => {
                return Err(Error::InvalidArgument {
                    code: def.code.clone(),
                    reason: format!("required by operator {}", operator.code),
                });
            }
            None => {}
        }
    }
    Ok(resolved)
}
