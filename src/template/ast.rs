// Abstract Syntax Tree types for URI templates

use serde::{Deserialize, Serialize};
use std::{borrow::Borrow, fmt};

use super::operator::Operator;

/// Name of a template variable, compared by exact byte content
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableName(String);

impl VariableName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for VariableName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for VariableName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Borrow<str> for VariableName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VariableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A parsed template: literal runs and expressions in source order.
///
/// Templates are immutable once parsed and can be expanded any number of
/// times, from any number of threads.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Template {
    elements: Vec<Element>,
}

impl Template {
    pub(crate) fn from_elements(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Get all variable specifications in this template, in source order
    pub fn variables(&self) -> Vec<&VarSpec> {
        self.elements
            .iter()
            .filter_map(|element| match element {
                Element::Expression(expression) => Some(expression.var_specs()),
                Element::Literal(_) => None,
            })
            .flatten()
            .collect()
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.elements
            .iter()
            .try_for_each(|element| write!(f, "{}", element))
    }
}

/// A template consists of literal strings and expressions
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Element {
    /// Literal text, already percent-encoded at parse time
    Literal(String),
    Expression(Expression),
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Literal(literal) => f.write_str(literal),
            Element::Expression(expression) => write!(f, "{{{}}}", expression),
        }
    }
}

/// A `{...}` region: an operator and at least one variable specification
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Expression {
    operator: Operator,
    var_specs: Vec<VarSpec>,
}

impl Expression {
    /// Returns `None` when `var_specs` is empty.
    pub fn new(operator: Operator, var_specs: Vec<VarSpec>) -> Option<Self> {
        if var_specs.is_empty() {
            None
        } else {
            Some(Self {
                operator,
                var_specs,
            })
        }
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn var_specs(&self) -> &[VarSpec] {
        &self.var_specs
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(c) = self.operator.as_char() {
            write!(f, "{}", c)?;
        }
        for (index, spec) in self.var_specs.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", spec)?;
        }
        Ok(())
    }
}

/// Upper bound of a prefix modifier (`{var:9999}`)
pub const MAX_LENGTH_LIMIT: usize = 9999;

/// A single variable inside an expression, with its modifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VarSpec {
    name: VariableName,
    explode: bool,
    max_length: Option<usize>,
}

impl VarSpec {
    pub fn new(name: impl Into<VariableName>) -> Self {
        Self {
            name: name.into(),
            explode: false,
            max_length: None,
        }
    }

    /// Marks the spec as exploded (`*`), clearing any prefix modifier
    pub fn exploded(mut self) -> Self {
        self.explode = true;
        self.max_length = None;
        self
    }

    /// Sets a prefix modifier. Returns `None` if `max_length` is outside `1..=9999`.
    pub fn with_max_length(mut self, max_length: usize) -> Option<Self> {
        if !(1..=MAX_LENGTH_LIMIT).contains(&max_length) {
            return None;
        }
        self.explode = false;
        self.max_length = Some(max_length);
        Some(self)
    }

    pub fn name(&self) -> &VariableName {
        &self.name
    }

    pub fn explode(&self) -> bool {
        self.explode
    }

    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }
}

impl fmt::Display for VarSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(max_length) = self.max_length {
            write!(f, ":{}", max_length)?;
        }
        if self.explode {
            f.write_str("*")?;
        }
        Ok(())
    }
}
