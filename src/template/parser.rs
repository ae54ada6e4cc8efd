// Template parser: a left-to-right scanner over literals and `{...}` expressions

use std::str::FromStr;

use super::ast::{Element, Expression, Template, VarSpec, MAX_LENGTH_LIMIT};
use super::encoding::{is_pct_encoded, normalize, CharacterClass};
use super::error::{InvalidReason, TemplateError};
use super::operator::Operator;

pub struct TemplateParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> TemplateParser<'a> {
    pub fn parse(template: &'a str) -> Result<Template, TemplateError> {
        let mut parser = Self {
            input: template,
            pos: 0,
        };
        let template = parser.parse_template()?;
        tracing::trace!(elements = template.elements().len(), "parsed uri template");
        Ok(template)
    }

    fn parse_template(&mut self) -> Result<Template, TemplateError> {
        let mut elements = Vec::new();

        while self.pos < self.input.len() {
            match self.input[self.pos..].find('{') {
                Some(offset) => {
                    self.push_literal(&mut elements, self.pos + offset);
                    let expression = self.parse_expression()?;
                    elements.push(Element::Expression(expression));
                }
                None => self.push_literal(&mut elements, self.input.len()),
            }
        }

        Ok(Template::from_elements(elements))
    }

    /// Normalizes the text between the cursor and `end` into a literal
    fn push_literal(&mut self, elements: &mut Vec<Element>, end: usize) {
        if self.pos < end {
            let literal = normalize(&self.input[self.pos..end], CharacterClass::UnreservedReserved);
            elements.push(Element::Literal(literal));
        }
        self.pos = end;
    }

    /// Parses the expression whose `{` is at the cursor
    fn parse_expression(&mut self) -> Result<Expression, TemplateError> {
        let start = self.pos;
        let body_start = start + 1;

        let Some(close) = self.input[body_start..].find('}') else {
            self.pos = self.input.len();
            return Err(self.error(start, InvalidReason::Unterminated));
        };

        let body_end = body_start + close;
        self.pos = body_end + 1;

        parse_expression_body(&self.input[body_start..body_end])
            .map_err(|reason| self.error(start, reason))
    }

    fn error(&self, start: usize, reason: InvalidReason) -> TemplateError {
        TemplateError::InvalidExpression {
            position: start,
            text: self.input[start..self.pos].to_string(),
            reason,
        }
    }
}

impl Template {
    /// Parses an RFC 6570 template, failing on the first malformed expression
    pub fn parse(template: &str) -> Result<Self, TemplateError> {
        TemplateParser::parse(template)
    }

    /// Parses an RFC 6570 template, returning `None` if it is invalid
    pub fn new(template: &str) -> Option<Self> {
        Self::parse(template).ok()
    }
}

impl FromStr for Template {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_expression_body(body: &str) -> Result<Expression, InvalidReason> {
    let mut chars = body.chars();
    let (operator, specs) = match chars.next().and_then(Operator::from_char) {
        Some(op) => (op, chars.as_str()),
        None => (Operator::Simple, body),
    };

    if specs.is_empty() {
        return Err(InvalidReason::EmptyExpression);
    }

    let var_specs = specs
        .split(',')
        .map(parse_var_spec)
        .collect::<Result<Vec<_>, _>>()?;

    Expression::new(operator, var_specs).ok_or(InvalidReason::EmptyExpression)
}

/// Parses `name`, `name*` or `name:N`
fn parse_var_spec(token: &str) -> Result<VarSpec, InvalidReason> {
    let name_end = token
        .find(|c: char| !is_varname_char(c))
        .unwrap_or(token.len());
    let (name, modifier) = token.split_at(name_end);

    if !is_valid_varname(name) {
        return Err(InvalidReason::InvalidVarName);
    }

    let spec = VarSpec::new(name);
    match modifier {
        "" => Ok(spec),
        "*" => Ok(spec.exploded()),
        _ => {
            let digits = modifier
                .strip_prefix(':')
                .filter(|d| !d.is_empty() && d.bytes().all(|b| b.is_ascii_digit()))
                .ok_or(InvalidReason::InvalidModifier)?;
            if digits.len() > 4 {
                return Err(InvalidReason::MaxLengthOutOfRange);
            }
            let max_length: usize = digits
                .parse()
                .map_err(|_| InvalidReason::InvalidModifier)?;
            if max_length > MAX_LENGTH_LIMIT {
                return Err(InvalidReason::MaxLengthOutOfRange);
            }
            spec.with_max_length(max_length)
                .ok_or(InvalidReason::MaxLengthOutOfRange)
        }
    }
}

fn is_varname_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '%')
}

/// `varchar *( ["."] varchar )` where `varchar = ALPHA / DIGIT / "_" / pct-encoded`
fn is_valid_varname(name: &str) -> bool {
    let bytes = name.as_bytes();
    if bytes.is_empty() || bytes[0] == b'.' || bytes[bytes.len() - 1] == b'.' {
        return false;
    }

    let mut pos = 0;
    while pos < bytes.len() {
        match bytes[pos] {
            b'%' if is_pct_encoded(&bytes[pos..]) => pos += 3,
            b'%' => return false,
            b'.' if bytes[pos + 1] == b'.' => return false,
            _ => pos += 1,
        }
    }
    true
}
