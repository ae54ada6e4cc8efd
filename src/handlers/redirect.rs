// Template redirects for /t/{alias} routes

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;

use crate::{error::AppError, template::Variables, AppState};

/// Builds variable bindings from query parameters.
///
/// A repeated key becomes a list, and `name[key]=value` adds `(key, value)`
/// to the associative list bound to `name`.
pub fn variables_from_query(params: Vec<(String, String)>) -> Variables {
    let mut variables = Variables::new();
    for (key, value) in params {
        match split_member_key(&key) {
            Some((name, member)) => variables.insert_member(name, member, value),
            None => variables.append_text(key, value),
        }
    }
    variables
}

fn split_member_key(key: &str) -> Option<(&str, &str)> {
    let (name, member) = key.strip_suffix(']')?.split_once('[')?;
    if name.is_empty() || member.is_empty() {
        None
    } else {
        Some((name, member))
    }
}

// GET /t/{alias} - Expand the named template and redirect to it
pub async fn redirect(
    Path(alias): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, AppError> {
    let entry = state
        .catalog
        .get(&alias)
        .ok_or_else(|| AppError::NotFound(format!("Unknown alias: '{}'", alias)))?;

    if params.is_empty() {
        if let Some(fallback) = &entry.fallback {
            return Ok(Redirect::to(fallback).into_response());
        }
    }

    let mut variables = variables_from_query(params);
    variables.fill_defaults(&entry.defaults);

    let url = entry.template.try_make_url(&variables).map_err(|err| {
        tracing::warn!(%alias, error = %err, "rejected template expansion");
        AppError::from(err)
    })?;

    tracing::debug!(%alias, %url, "redirecting");
    Ok(Redirect::to(url.as_str()).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::Value;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_single_key_is_text() {
        let variables = variables_from_query(params(&[("q", "rust")]));
        assert_eq!(variables.get("q"), Some(&Value::text("rust")));
    }

    #[test]
    fn test_repeated_key_is_list() {
        let variables = variables_from_query(params(&[("path", "src"), ("path", "lib.rs")]));
        assert_eq!(variables.get("path"), Some(&Value::list(["src", "lib.rs"])));
    }

    #[test]
    fn test_bracketed_key_is_associative_list() {
        let variables =
            variables_from_query(params(&[("opts[sort]", "new"), ("opts[page]", "2")]));
        assert_eq!(
            variables.get("opts"),
            Some(&Value::from([("sort", "new"), ("page", "2")]))
        );
    }

    #[test]
    fn test_split_member_key() {
        assert_eq!(split_member_key("a[b]"), Some(("a", "b")));
        assert_eq!(split_member_key("a[]"), None);
        assert_eq!(split_member_key("[b]"), None);
        assert_eq!(split_member_key("a[b"), None);
        assert_eq!(split_member_key("ab"), None);
    }
}
