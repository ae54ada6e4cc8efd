use serde::{Deserialize, Serialize};

use crate::template::Variables;

/// One named template as written in the YAML catalog
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct TemplateSettings {
    pub alias: String,
    pub description: String,
    pub template: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
    #[serde(default, skip_serializing_if = "Variables::is_empty")]
    pub defaults: Variables,
}
