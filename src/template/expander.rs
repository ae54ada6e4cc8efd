// Template expansion: substitutes variable values into a parsed template

use unicode_segmentation::UnicodeSegmentation;

use super::ast::{Element, Expression, Template, VarSpec};
use super::encoding::{normalize, CharacterClass};
use super::operator::OperatorDescriptor;
use super::value::{Value, Variables};

/// One rendered `name=value` (or bare `value`) fragment of an expression
type Pair = (Option<String>, String);

/// Expands `template` against `variables`.
///
/// Never fails: undefined variables contribute nothing.
pub fn expand(template: &Template, variables: &Variables) -> String {
    template
        .elements()
        .iter()
        .fold(String::new(), |mut result, element| {
            match element {
                Element::Literal(literal) => result.push_str(literal),
                Element::Expression(expression) => {
                    expand_expression(expression, variables, &mut result)
                }
            }
            result
        })
}

fn expand_expression(expression: &Expression, variables: &Variables, result: &mut String) {
    let descriptor = expression.operator().descriptor();
    let pairs = expression
        .var_specs()
        .iter()
        .flat_map(|spec| evaluate(spec, descriptor, variables));

    for (index, (name, value)) in pairs.enumerate() {
        if index == 0 {
            if let Some(prefix) = descriptor.first_prefix {
                result.push(prefix);
            }
        } else {
            result.push(descriptor.separator);
        }

        match name {
            Some(name) => {
                result.push_str(&name);
                if value.is_empty() {
                    if let Some(suffix) = descriptor.empty_value_suffix {
                        result.push(suffix);
                    }
                } else {
                    result.push('=');
                    result.push_str(&value);
                }
            }
            None => result.push_str(&value),
        }
    }
}

/// Produces the pairs a single var-spec contributes to its expression
fn evaluate(spec: &VarSpec, descriptor: &OperatorDescriptor, variables: &Variables) -> Vec<Pair> {
    let Some(value) = variables.get(spec.name().as_str()) else {
        return Vec::new();
    };

    let allowed = descriptor.allowed;
    let name = || descriptor.named.then(|| spec.name().to_string());

    match value {
        Value::Text(text) => {
            let text = match spec.max_length() {
                Some(max_length) => truncate_graphemes(text, max_length),
                None => text.as_str(),
            };
            vec![(name(), normalize(text, allowed))]
        }
        Value::List(items) if spec.explode() => items
            .iter()
            .map(|item| (name(), normalize(item, allowed)))
            .collect(),
        Value::List(items) => vec![(name(), join_normalized(items.iter().map(String::as_str), allowed))],
        Value::AssociativeList(pairs) if pairs.is_empty() => Vec::new(),
        Value::AssociativeList(pairs) if spec.explode() => pairs
            .iter()
            .map(|(key, value)| (Some(normalize(key, allowed)), normalize(value, allowed)))
            .collect(),
        Value::AssociativeList(pairs) => {
            let flattened = pairs.iter().flat_map(|(key, value)| [key, value]);
            vec![(name(), join_normalized(flattened, allowed))]
        }
    }
}

fn join_normalized<'a>(items: impl Iterator<Item = &'a str>, allowed: CharacterClass) -> String {
    items
        .map(|item| normalize(item, allowed))
        .collect::<Vec<_>>()
        .join(",")
}

/// Keeps the first `max_length` user-perceived characters of `text`
fn truncate_graphemes(text: &str, max_length: usize) -> &str {
    match text.grapheme_indices(true).nth(max_length) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

impl Template {
    /// Expands the template into a URI string.
    ///
    /// ```
    /// use uritemplate::template::{Template, Variables};
    ///
    /// let template = Template::parse("http://www.example.com/foo{?query,number}").unwrap();
    /// let variables: Variables = [("query", "bar baz"), ("number", "234")].into_iter().collect();
    /// assert_eq!(
    ///     template.expand(&variables),
    ///     "http://www.example.com/foo?query=bar%20baz&number=234"
    /// );
    /// ```
    pub fn expand(&self, variables: &Variables) -> String {
        expand(self, variables)
    }
}
