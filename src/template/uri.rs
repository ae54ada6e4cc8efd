// Bridge from expanded templates to parsed URLs

use url::Url;

use super::ast::Template;
use super::error::ExpansionError;
use super::value::Variables;

/// Hands an expanded string to the URL parser
pub fn to_url(expanded: String) -> Result<Url, ExpansionError> {
    match Url::parse(&expanded) {
        Ok(url) => Ok(url),
        Err(source) => Err(ExpansionError::UnusableUri { expanded, source }),
    }
}

impl Template {
    /// Expands the template and parses the result as a URL.
    ///
    /// Returns `None` if the expansion is not a valid, absolute URL.
    pub fn make_url(&self, variables: &Variables) -> Option<Url> {
        self.try_make_url(variables).ok()
    }

    /// Like [`Template::make_url`], but reports which expansion was rejected
    pub fn try_make_url(&self, variables: &Variables) -> Result<Url, ExpansionError> {
        to_url(self.expand(variables))
    }
}
