// Catalog listing for GET /

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct TemplateSummary {
    pub alias: String,
    pub description: String,
    pub template: String,
    pub variables: Vec<String>,
}

// GET / - List every template in the catalog
pub async fn list_templates(State(state): State<Arc<AppState>>) -> Json<Vec<TemplateSummary>> {
    let summaries = state
        .catalog
        .iter()
        .map(|entry| TemplateSummary {
            alias: entry.alias.clone(),
            description: entry.description.clone(),
            template: entry.template.to_string(),
            variables: entry
                .template
                .variables()
                .into_iter()
                .map(|spec| spec.name().to_string())
                .collect(),
        })
        .collect();

    Json(summaries)
}
