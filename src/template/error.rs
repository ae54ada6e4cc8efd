// Errors raised while parsing templates or turning expansions into URLs

use std::fmt;

/// Why an expression was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    EmptyExpression,
    Unterminated,
    InvalidVarName,
    InvalidModifier,
    MaxLengthOutOfRange,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            InvalidReason::EmptyExpression => "expression has no variables",
            InvalidReason::Unterminated => "missing closing '}'",
            InvalidReason::InvalidVarName => "invalid variable name",
            InvalidReason::InvalidModifier => "invalid modifier",
            InvalidReason::MaxLengthOutOfRange => "prefix length must be between 1 and 9999",
        };
        f.write_str(message)
    }
}

/// Template parsing error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// `position` is the byte offset of the expression's `{` in the template
    InvalidExpression {
        position: usize,
        text: String,
        reason: InvalidReason,
    },
}

impl TemplateError {
    pub fn position(&self) -> usize {
        match self {
            TemplateError::InvalidExpression { position, .. } => *position,
        }
    }

    pub fn reason(&self) -> InvalidReason {
        match self {
            TemplateError::InvalidExpression { reason, .. } => *reason,
        }
    }
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::InvalidExpression {
                position,
                text,
                reason,
            } => write!(
                f,
                "Invalid expression '{}' at position {}: {}",
                text, position, reason
            ),
        }
    }
}

impl std::error::Error for TemplateError {}

/// The expansion succeeded but is not a usable URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpansionError {
    UnusableUri {
        expanded: String,
        source: url::ParseError,
    },
}

impl fmt::Display for ExpansionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpansionError::UnusableUri { expanded, source } => write!(
                f,
                "Expansion produced an unusable URI '{}': {}",
                expanded, source
            ),
        }
    }
}

impl std::error::Error for ExpansionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExpansionError::UnusableUri { source, .. } => Some(source),
        }
    }
}
