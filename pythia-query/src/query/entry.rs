use super::terms::TermDefinition;
use serde::{Deserialize, Serialize};

/// Whether a query targets document attributes or token occurrences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryScope {
    #[default]
    Text,
    Document,
}

impl QueryScope {
    pub fn is_document(self) -> bool {
        self == QueryScope::Document
    }
}

/// A user-supplied value for one operator argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgValue {
    /// Code of the owning operator's `ArgDefinition`
    pub code: String,
    pub value: String,
}

impl ArgValue {
    pub fn new(code: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            value: value.into(),
        }
    }
}

/// Single comparison term: `[attribute operator "value"]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClauseEntry {
    pub attribute: TermDefinition,
    pub operator: TermDefinition,
    pub value: String,
    /// Only the arguments the user filled in
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<ArgValue>,
}

impl ClauseEntry {
    pub fn new(attribute: TermDefinition, operator: TermDefinition, value: impl Into<String>) -> Self {
        Self {
            attribute,
            operator,
            value: value.into(),
            args: Vec::new(),
        }
    }

    pub fn with_arg(mut self, code: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.push(ArgValue::new(code, value));
        self
    }

    pub fn arg(&self, code: &str) -> Option<&str> {
        find_arg(&self.args, code)
    }
}

/// Collocation connector such as `NEAR(n=0,m=1)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocatorEntry {
    pub operator: TermDefinition,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<ArgValue>,
    /// Rendered as `NOT <operator>`
    #[serde(default)]
    pub negated: bool,
}

impl LocatorEntry {
    pub fn new(operator: TermDefinition) -> Self {
        Self {
            operator,
            args: Vec::new(),
            negated: false,
        }
    }

    pub fn with_arg(mut self, code: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.push(ArgValue::new(code, value));
        self
    }

    pub fn negate(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    pub fn arg(&self, code: &str) -> Option<&str> {
        find_arg(&self.args, code)
    }
}

/// Boolean, grouping or collocation token between clauses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Connector {
    And,
    Or,
    AndNot,
    BracketOpen,
    BracketClose,
    Locator(LocatorEntry),
}

impl Connector {
    /// True for connectors joining two operands: AND, OR, AND NOT and
    /// collocation operators
    pub fn is_binary(&self) -> bool {
        matches!(
            self,
            Connector::And | Connector::Or | Connector::AndNot | Connector::Locator(_)
        )
    }
}

/// One position in the query sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entry {
    Clause(ClauseEntry),
    Connector(Connector),
}

impl Entry {
    pub fn clause(attribute: TermDefinition, operator: TermDefinition, value: impl Into<String>) -> Self {
        Entry::Clause(ClauseEntry::new(attribute, operator, value))
    }

    pub fn and() -> Self {
        Entry::Connector(Connector::And)
    }

    pub fn or() -> Self {
        Entry::Connector(Connector::Or)
    }

    pub fn and_not() -> Self {
        Entry::Connector(Connector::AndNot)
    }

    pub fn open() -> Self {
        Entry::Connector(Connector::BracketOpen)
    }

    pub fn close() -> Self {
        Entry::Connector(Connector::BracketClose)
    }

    pub fn locator(locator: LocatorEntry) -> Self {
        Entry::Connector(Connector::Locator(locator))
    }

    pub fn is_clause(&self) -> bool {
        matches!(self, Entry::Clause(_))
    }

    pub fn as_clause(&self) -> Option<&ClauseEntry> {
        match self {
            Entry::Clause(c) => Some(c),
            Entry::Connector(_) => None,
        }
    }

    pub fn as_connector(&self) -> Option<&Connector> {
        match self {
            Entry::Connector(c) => Some(c),
            Entry::Clause(_) => None,
        }
    }

    /// Get the entry type as a string
    pub fn entry_type(&self) -> &'static str {
        match self {
            Entry::Clause(_) => "clause",
            Entry::Connector(Connector::And) => "and",
            Entry::Connector(Connector::Or) => "or",
            Entry::Connector(Connector::AndNot) => "and_not",
            Entry::Connector(Connector::BracketOpen) => "bracket_open",
            Entry::Connector(Connector::BracketClose) => "bracket_close",
            Entry::Connector(Connector::Locator(_)) => "locator",
        }
    }
}

impl From<ClauseEntry> for Entry {
    fn from(clause: ClauseEntry) -> Self {
        Entry::Clause(clause)
    }
}

impl From<LocatorEntry> for Entry {
    fn from(locator: LocatorEntry) -> Self {
        Entry::locator(locator)
    }
}

fn find_arg<'a>(args: &'a [ArgValue], code: &str) -> Option<&'a str> {
    args.iter()
        .find(|a| a.code == code)
        .map(|a| a.value.as_str())
}

/// Supplied argument values in the operator's declared order.
///
/// Values whose code the operator does not declare are dropped.
pub(crate) fn ordered_args<'a>(
    operator: &'a TermDefinition,
    args: &'a [ArgValue],
) -> Vec<(&'a str, &'a str)> {
    operator
        .arg_definitions()
        .iter()
        .filter_map(|def| find_arg(args, &def.code).map(|v| (def.code.as_str(), v)))
        .collect()
}
