// RFC 6570 URI templates
//
// This module parses templates into literals and expressions, and expands
// them against variable bindings into percent-encoded URI strings.

mod ast;
mod encoding;
mod error;
mod expander;
mod operator;
mod parser;
mod uri;
mod value;

pub use ast::{Element, Expression, Template, VarSpec, VariableName, MAX_LENGTH_LIMIT};
pub use encoding::{normalize, CharacterClass};
pub use error::{ExpansionError, InvalidReason, TemplateError};
pub use expander::expand;
pub use operator::{Operator, OperatorDescriptor};
pub use parser::TemplateParser;
pub use uri::to_url;
pub use value::{AssociativeList, Value, Variables};
