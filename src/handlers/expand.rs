// Ad-hoc expansion for POST /expand

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::{
    error::AppError,
    template::{to_url, Template, Variables},
};

#[derive(Debug, Deserialize)]
pub struct ExpandRequest {
    pub template: String,
    #[serde(default)]
    pub variables: Variables,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ExpandResponse {
    pub expanded: String,
    /// `None` when the expansion is not a usable absolute URL
    pub url: Option<String>,
}

// POST /expand - Expand a template supplied in the request body
pub async fn expand_template(
    Json(request): Json<ExpandRequest>,
) -> Result<Json<ExpandResponse>, AppError> {
    let template = Template::parse(&request.template)?;
    let expanded = template.expand(&request.variables);
    let url = to_url(expanded.clone()).ok().map(String::from);

    tracing::debug!(template = %template, %expanded, "expanded ad-hoc template");

    Ok(Json(ExpandResponse { expanded, url }))
}
