// Expression operators and their expansion behavior

use super::encoding::CharacterClass;

/// The operator selected by the first character of an expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// No operator: `{var}`
    Simple,
    /// `+` reserved string expansion
    Reserved,
    /// `#` fragment expansion
    Fragment,
    /// `.` label expansion with dot-prefix
    Label,
    /// `/` path segment expansion
    PathSegment,
    /// `;` path-style parameter expansion
    PathParameter,
    /// `?` form-style query expansion
    Query,
    /// `&` form-style query continuation
    QueryContinuation,
}

/// How an operator joins, names and escapes the values it expands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorDescriptor {
    pub first_prefix: Option<char>,
    pub separator: char,
    pub named: bool,
    pub allowed: CharacterClass,
    pub empty_value_suffix: Option<char>,
}

const fn descriptor(
    first_prefix: Option<char>,
    separator: char,
    named: bool,
    allowed: CharacterClass,
    empty_value_suffix: Option<char>,
) -> OperatorDescriptor {
    OperatorDescriptor {
        first_prefix,
        separator,
        named,
        allowed,
        empty_value_suffix,
    }
}

use CharacterClass::{Unreserved, UnreservedReserved};

// Indexed by `Operator as usize`.
const DESCRIPTORS: [OperatorDescriptor; 8] = [
    descriptor(None, ',', false, Unreserved, None),
    descriptor(None, ',', false, UnreservedReserved, None),
    descriptor(Some('#'), ',', false, UnreservedReserved, None),
    descriptor(Some('.'), '.', false, Unreserved, None),
    descriptor(Some('/'), '/', false, Unreserved, None),
    descriptor(Some(';'), ';', true, Unreserved, None),
    descriptor(Some('?'), '&', true, Unreserved, Some('=')),
    descriptor(Some('&'), '&', true, Unreserved, Some('=')),
];

impl Operator {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Reserved),
            '#' => Some(Operator::Fragment),
            '.' => Some(Operator::Label),
            '/' => Some(Operator::PathSegment),
            ';' => Some(Operator::PathParameter),
            '?' => Some(Operator::Query),
            '&' => Some(Operator::QueryContinuation),
            _ => None,
        }
    }

    pub fn as_char(self) -> Option<char> {
        match self {
            Operator::Simple => None,
            Operator::Reserved => Some('+'),
            Operator::Fragment => Some('#'),
            Operator::Label => Some('.'),
            Operator::PathSegment => Some('/'),
            Operator::PathParameter => Some(';'),
            Operator::Query => Some('?'),
            Operator::QueryContinuation => Some('&'),
        }
    }

    pub fn descriptor(self) -> &'static OperatorDescriptor {
        &DESCRIPTORS[self as usize]
    }
}
