//! Term definitions for the query builder
//!
//! Static tables of the attributes and operators the search backend
//! understands. Codes are the exact wire tokens; labels, groups and tips
//! are display-only.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

pub const GROUP_DOCUMENT: &str = "document";
pub const GROUP_TOKEN: &str = "token";
pub const GROUP_STRUCTURE: &str = "structure";

pub const GROUP_STANDARD: &str = "standard";
pub const GROUP_EXPRESSION: &str = "expression";
pub const GROUP_FUZZY: &str = "fuzzy";
pub const GROUP_NUMERIC: &str = "numeric";
pub const GROUP_COLLOCATION: &str = "collocation";

/// Definition of one named operator argument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgDefinition {
    pub code: String,
    pub label: String,
    #[serde(default)]
    pub numeric: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl ArgDefinition {
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
            numeric: false,
            required: false,
            min: None,
            max: None,
        }
    }

    pub fn numeric(mut self) -> Self {
        self.numeric = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Check a user-supplied literal against this definition's constraints.
    ///
    /// Non-numeric arguments accept any non-empty text.
    pub fn check(&self, value: &str) -> Result<()> {
        let invalid = |reason: String| Error::InvalidArgument {
            code: self.code.clone(),
            reason,
        };

        if value.trim().is_empty() {
            return Err(invalid("empty value".to_string()));
        }
        if !self.numeric {
            return Ok(());
        }

        let n: f64 = value
            .trim()
            .parse()
            .map_err(|_| invalid(format!("'{}' is not a number", value)))?;
        if !n.is_finite() {
            return Err(invalid(format!("'{}' is not a finite number", value)));
        }
        if let Some(min) = self.min {
            if n < min {
                return Err(invalid(format!("{} is less than {}", n, min)));
            }
        }
        if let Some(max) = self.max {
            if n > max {
                return Err(invalid(format!("{} is greater than {}", n, max)));
            }
        }
        Ok(())
    }
}

/// A catalog entry: an attribute or an operator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermDefinition {
    /// Wire token, e.g. `=`, `NEAR`, `value`
    pub code: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Ordered argument list, present only for operators taking arguments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<ArgDefinition>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
}

impl TermDefinition {
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
            group: None,
            args: None,
            tip: None,
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_tip(mut self, tip: impl Into<String>) -> Self {
        self.tip = Some(tip.into());
        self
    }

    pub fn with_args(mut self, args: Vec<ArgDefinition>) -> Self {
        self.args = Some(args);
        self
    }

    /// Declared arguments, empty when the term takes none
    pub fn arg_definitions(&self) -> &[ArgDefinition] {
        self.args.as_deref().unwrap_or_default()
    }

    pub fn has_args(&self) -> bool {
        !self.arg_definitions().is_empty()
    }

    pub fn arg(&self, code: &str) -> Option<&ArgDefinition> {
        self.arg_definitions().iter().find(|a| a.code == code)
    }
}

static STANDARD: LazyLock<TermCatalog> = LazyLock::new(TermCatalog::new);

/// Attribute and operator tables, looked up by exact code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermCatalog {
    document_attributes: Vec<TermDefinition>,
    token_attributes: Vec<TermDefinition>,
    structure_attributes: Vec<TermDefinition>,
    operators: Vec<TermDefinition>,
    locators: Vec<TermDefinition>,
}

impl Default for TermCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl TermCatalog {
    /// Shared catalog with the built-in tables
    pub fn standard() -> &'static TermCatalog {
        &STANDARD
    }

    /// Fresh catalog with the built-in tables, open to extension with
    /// attributes published by the server
    pub fn new() -> Self {
        Self {
            document_attributes: document_attributes(),
            token_attributes: token_attributes(),
            structure_attributes: structure_attributes(),
            operators: [
                standard_operators(),
                expression_operators(),
                fuzzy_operators(),
                numeric_operators(),
            ]
            .concat(),
            locators: collocation_operators(),
        }
    }

    pub fn document_attributes(&self) -> &[TermDefinition] {
        &self.document_attributes
    }

    pub fn token_attributes(&self) -> &[TermDefinition] {
        &self.token_attributes
    }

    pub fn structure_attributes(&self) -> &[TermDefinition] {
        &self.structure_attributes
    }

    /// All clause operators (standard, expression, fuzzy, numeric)
    pub fn operators(&self) -> &[TermDefinition] {
        &self.operators
    }

    /// Clause operators tagged with the given group
    pub fn operators_in<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a TermDefinition> {
        self.operators
            .iter()
            .filter(move |op| op.group.as_deref() == Some(group))
    }

    /// Collocation operators (NEAR, BEFORE, ...)
    pub fn locators(&self) -> &[TermDefinition] {
        &self.locators
    }

    pub fn add_document_attribute(&mut self, code: impl Into<String>, label: impl Into<String>) {
        push_unique(
            &mut self.document_attributes,
            TermDefinition::new(code, label).with_group(GROUP_DOCUMENT),
        );
    }

    pub fn add_token_attribute(&mut self, code: impl Into<String>, label: impl Into<String>) {
        push_unique(
            &mut self.token_attributes,
            TermDefinition::new(code, label).with_group(GROUP_TOKEN),
        );
    }

    pub fn add_structure_attribute(&mut self, code: impl Into<String>, label: impl Into<String>) {
        push_unique(
            &mut self.structure_attributes,
            TermDefinition::new(code, label).with_group(GROUP_STRUCTURE),
        );
    }

    pub fn document_attribute(&self, code: &str) -> Result<&TermDefinition> {
        find(&self.document_attributes, code)
            .ok_or_else(|| Error::UnknownAttribute(code.to_string()))
    }

    pub fn token_attribute(&self, code: &str) -> Result<&TermDefinition> {
        find(&self.token_attributes, code).ok_or_else(|| Error::UnknownAttribute(code.to_string()))
    }

    pub fn structure_attribute(&self, code: &str) -> Result<&TermDefinition> {
        find(&self.structure_attributes, code)
            .ok_or_else(|| Error::UnknownAttribute(code.to_string()))
    }

    /// Look up an attribute in the document, token and structure tables,
    /// in that order
    pub fn attribute(&self, code: &str) -> Result<&TermDefinition> {
        find(&self.document_attributes, code)
            .or_else(|| find(&self.token_attributes, code))
            .or_else(|| find(&self.structure_attributes, code))
            .ok_or_else(|| Error::UnknownAttribute(code.to_string()))
    }

    pub fn operator(&self, code: &str) -> Result<&TermDefinition> {
        find(&self.operators, code).ok_or_else(|| Error::UnknownOperator(code.to_string()))
    }

    pub fn locator(&self, code: &str) -> Result<&TermDefinition> {
        find(&self.locators, code).ok_or_else(|| Error::UnknownOperator(code.to_string()))
    }
}

fn find<'a>(terms: &'a [TermDefinition], code: &str) -> Option<&'a TermDefinition> {
    terms.iter().find(|t| t.code == code)
}

fn push_unique(terms: &mut Vec<TermDefinition>, term: TermDefinition) {
    if find(terms, &term.code).is_none() {
        terms.push(term);
    }
}

fn document_attributes() -> Vec<TermDefinition> {
    [
        ("author", "author"),
        ("title", "title"),
        ("date_value", "date"),
        ("sort_key", "sort key"),
        ("source", "source"),
        ("last_modified", "last modified"),
    ]
    .into_iter()
    .map(|(code, label)| TermDefinition::new(code, label).with_group(GROUP_DOCUMENT))
    .collect()
}

fn token_attributes() -> Vec<TermDefinition> {
    vec![
        TermDefinition::new("value", "value").with_group(GROUP_TOKEN),
        TermDefinition::new("language", "language").with_group(GROUP_TOKEN),
        TermDefinition::new("position", "position")
            .with_group(GROUP_TOKEN)
            .with_tip("token position in document (1-N)"),
        TermDefinition::new("len", "length")
            .with_group(GROUP_TOKEN)
            .with_tip("token length in characters"),
    ]
}

fn structure_attributes() -> Vec<TermDefinition> {
    vec![
        TermDefinition::new("name", "name").with_group(GROUP_STRUCTURE),
        TermDefinition::new("start_position", "start position").with_group(GROUP_STRUCTURE),
        TermDefinition::new("end_position", "end position").with_group(GROUP_STRUCTURE),
    ]
}

fn standard_operators() -> Vec<TermDefinition> {
    vec![
        TermDefinition::new("=", "equal").with_group(GROUP_STANDARD),
        TermDefinition::new("<>", "not equal").with_group(GROUP_STANDARD),
    ]
}

fn expression_operators() -> Vec<TermDefinition> {
    vec![
        TermDefinition::new("*=", "contains").with_group(GROUP_EXPRESSION),
        TermDefinition::new("^=", "starts with").with_group(GROUP_EXPRESSION),
        TermDefinition::new("$=", "ends with").with_group(GROUP_EXPRESSION),
        TermDefinition::new("?=", "wildcards")
            .with_group(GROUP_EXPRESSION)
            .with_tip("? = any single character, * = any number of characters"),
        TermDefinition::new("~=", "regular expression").with_group(GROUP_EXPRESSION),
    ]
}

fn fuzzy_operators() -> Vec<TermDefinition> {
    vec![TermDefinition::new("%=", "similar")
        .with_group(GROUP_FUZZY)
        .with_tip("fuzzy matching with a similarity threshold")
        .with_args(vec![ArgDefinition::new("t", "threshold")
            .numeric()
            .required()
            .min(0.0)
            .max(1.0)])]
}

fn numeric_operators() -> Vec<TermDefinition> {
    [
        ("==", "numeric equal"),
        ("!=", "numeric not equal"),
        ("<", "less than"),
        ("<=", "less than or equal"),
        (">", "greater than"),
        (">=", "greater than or equal"),
    ]
    .into_iter()
    .map(|(code, label)| TermDefinition::new(code, label).with_group(GROUP_NUMERIC))
    .collect()
}

fn distance_arg(code: &str, label: &str) -> ArgDefinition {
    ArgDefinition::new(code, label).numeric().min(0.0)
}

fn structure_arg() -> ArgDefinition {
    ArgDefinition::new("s", "structure")
}

/// `n`, `m` and `s`: min distance, max distance, containing structure
fn span_args() -> Vec<ArgDefinition> {
    vec![
        distance_arg("n", "min distance"),
        distance_arg("m", "max distance"),
        structure_arg(),
    ]
}

fn collocation_operators() -> Vec<TermDefinition> {
    let locator = |code: &str, label: &str, args: Vec<ArgDefinition>| {
        TermDefinition::new(code, label)
            .with_group(GROUP_COLLOCATION)
            .with_args(args)
    };

    vec![
        locator("NEAR", "near", span_args()),
        locator("BEFORE", "before", span_args()),
        locator("AFTER", "after", span_args()),
        locator(
            "INSIDE",
            "inside",
            vec![
                distance_arg("ns", "min start distance"),
                distance_arg("ms", "max start distance"),
                distance_arg("ne", "min end distance"),
                distance_arg("me", "max end distance"),
                structure_arg(),
            ],
        ),
        locator(
            "OVERLAPS",
            "overlaps",
            vec![distance_arg("n", "min overlap"), structure_arg()],
        ),
        locator("LALIGN", "left-aligned", span_args()),
        locator("RALIGN", "right-aligned", span_args()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_attribute_across_tables() {
        let catalog = TermCatalog::standard();
        assert_eq!(catalog.attribute("author").unwrap().code, "author");
        assert_eq!(catalog.attribute("value").unwrap().code, "value");
        assert_eq!(catalog.attribute("end_position").unwrap().code, "end_position");
    }

    #[test]
    fn test_unknown_codes_are_errors() {
        let catalog = TermCatalog::standard();
        assert!(matches!(
            catalog.attribute("colour"),
            Err(Error::UnknownAttribute(_))
        ));
        assert!(matches!(catalog.operator("NEAR"), Err(Error::UnknownOperator(_))));
        assert!(matches!(catalog.locator("="), Err(Error::UnknownOperator(_))));
    }

    #[test]
    fn test_lookup_is_exact_match() {
        let catalog = TermCatalog::standard();
        assert!(catalog.attribute("Value").is_err());
        assert!(catalog.locator("near").is_err());
    }

    #[test]
    fn test_operator_groups() {
        let catalog = TermCatalog::standard();
        let expr: Vec<_> = catalog
            .operators_in(GROUP_EXPRESSION)
            .map(|t| t.code.as_str())
            .collect();
        assert_eq!(expr, vec!["*=", "^=", "$=", "?=", "~="]);

        let numeric: Vec<_> = catalog
            .operators_in(GROUP_NUMERIC)
            .map(|t| t.code.as_str())
            .collect();
        assert_eq!(numeric, vec!["==", "!=", "<", "<=", ">", ">="]);
        assert_eq!(catalog.operators_in(GROUP_STANDARD).count(), 2);
    }

    #[test]
    fn test_fuzzy_threshold_argument() {
        let fuzzy = TermCatalog::standard().operator("%=").unwrap();
        let t = fuzzy.arg("t").unwrap();
        assert!(t.numeric && t.required);
        assert_eq!(t.min, Some(0.0));
        assert_eq!(t.max, Some(1.0));
    }

    #[test]
    fn test_collocation_argument_order() {
        let catalog = TermCatalog::standard();
        let codes = |op: &str| -> Vec<String> {
            catalog
                .locator(op)
                .unwrap()
                .arg_definitions()
                .iter()
                .map(|a| a.code.clone())
                .collect()
        };

        assert_eq!(codes("NEAR"), vec!["n", "m", "s"]);
        assert_eq!(codes("INSIDE"), vec!["ns", "ms", "ne", "me", "s"]);
        assert_eq!(codes("OVERLAPS"), vec!["n", "s"]);
        assert_eq!(catalog.locators().len(), 7);
        assert!(catalog.locators().iter().all(|l| l.has_args()));
    }

    #[test]
    fn test_arg_check() {
        let t = ArgDefinition::new("t", "threshold").numeric().min(0.0).max(1.0);
        assert!(t.check("0.5").is_ok());
        assert!(t.check("1").is_ok());
        assert!(t.check("1.5").is_err());
        assert!(t.check("-0.1").is_err());
        assert!(t.check("abc").is_err());
        assert!(t.check("").is_err());
        assert!(t.check("NaN").is_err());
        assert!(t.check("inf").is_err());

        let n = ArgDefinition::new("n", "distance").numeric().min(0.0);
        assert!(n.check("3").is_ok());
        assert!(n.check("inf").is_err());
        assert!(n.check("infinity").is_err());

        let s = ArgDefinition::new("s", "structure");
        assert!(s.check("sent").is_ok());
        assert!(s.check("NaN").is_ok());
    }

    #[test]
    fn test_add_server_attributes() {
        let mut catalog = TermCatalog::new();
        catalog.add_document_attribute("category", "category");
        catalog.add_document_attribute("category", "duplicate");
        catalog.add_structure_attribute("fp-lat", "Latin phrase");

        assert_eq!(catalog.document_attribute("category").unwrap().label, "category");
        assert_eq!(
            catalog
                .document_attributes()
                .iter()
                .filter(|t| t.code == "category")
                .count(),
            1
        );
        assert!(catalog.structure_attribute("fp-lat").is_ok());
        assert!(TermCatalog::standard().attribute("category").is_err());
    }
}
